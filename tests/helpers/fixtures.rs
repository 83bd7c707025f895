//! Descriptor batches shared by the graph suites.
//!
//! The kitchen batch spans three files and two packages:
//!
//! ```text
//! google/protobuf/timestamp.proto   Timestamp
//!        ↑
//! kitchen/sink.proto                Material { Finish }, Sink, Brand
//!        ↑
//! kitchen/kitchen.proto             Kitchen { Style, maps }, KitchenService
//! ```

use prost::Message as _;
use protograph::descriptor::{
    CodeGeneratorRequest, DescriptorProto, FieldDescriptorProto, FileDescriptorProto, Location,
    SourceCodeInfo, Type,
};

use super::descriptors::*;

pub const TIMESTAMP: &str = "google/protobuf/timestamp.proto";
pub const SINK: &str = "kitchen/sink.proto";
pub const KITCHEN: &str = "kitchen/kitchen.proto";

pub fn timestamp_file() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![message(
            "Timestamp",
            vec![scalar("seconds", 1, Type::Int64), scalar("nanos", 2, Type::Int32)],
        )],
        ..file(TIMESTAMP, "google.protobuf", &[])
    }
}

pub fn sink_file() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![
            DescriptorProto {
                enum_type: vec![enumeration("Finish", &["MATTE", "GLOSSY"])],
                ..message(
                    "Material",
                    vec![
                        enum_field("finish", 1, ".kitchen.Material.Finish"),
                        scalar("name", 2, Type::String),
                    ],
                )
            },
            message(
                "Sink",
                vec![
                    message_field("material", 1, ".kitchen.Material"),
                    message_field("installed", 2, ".google.protobuf.Timestamp"),
                    enum_field("brand", 3, ".kitchen.Brand"),
                ],
            ),
        ],
        enum_type: vec![enumeration("Brand", &["UNKNOWN", "ACME"])],
        ..file(SINK, "kitchen", &[TIMESTAMP])
    }
}

/// Imports the timestamp file without using it.
pub fn kitchen_file() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![DescriptorProto {
            nested_type: vec![
                map_entry(
                    "SinksByRoomEntry",
                    Type::String,
                    message_field("value", 2, ".kitchen.Sink"),
                ),
                map_entry("CountsEntry", Type::String, scalar("value", 2, Type::Int32)),
            ],
            enum_type: vec![enumeration("Style", &["MODERN", "RUSTIC"])],
            ..message(
                "Kitchen",
                vec![
                    repeated(message_field("sinks", 1, ".kitchen.Sink")),
                    repeated(message_field(
                        "sinks_by_room",
                        2,
                        ".kitchen.Kitchen.SinksByRoomEntry",
                    )),
                    repeated(message_field("counts", 3, ".kitchen.Kitchen.CountsEntry")),
                    enum_field("style", 4, ".kitchen.Kitchen.Style"),
                ],
            )
        }],
        service: vec![service(
            "KitchenService",
            vec![method("Install", ".kitchen.Kitchen", ".kitchen.Sink")],
        )],
        ..file(KITCHEN, "kitchen", &[SINK, TIMESTAMP])
    }
}

/// Kitchen batch in dependency order.
pub fn kitchen_files() -> Vec<FileDescriptorProto> {
    vec![timestamp_file(), sink_file(), kitchen_file()]
}

pub const EXTRAS: &str = "kitchen/extras.proto";

/// Extends `Kitchen` at file level with a `Sink`-typed field.
pub fn extras_file() -> FileDescriptorProto {
    FileDescriptorProto {
        extension: vec![FieldDescriptorProto {
            type_name: Some(".kitchen.Sink".to_string()),
            ..extension("spare_sink", 100, Type::Message, ".kitchen.Kitchen")
        }],
        ..file(EXTRAS, "kitchen", &[KITCHEN, SINK])
    }
}

/// Kitchen batch followed by the extras file.
pub fn kitchen_with_extras() -> Vec<FileDescriptorProto> {
    let mut files = kitchen_files();
    files.push(extras_file());
    files
}

/// Host request generating the two kitchen files.
pub fn kitchen_request() -> CodeGeneratorRequest {
    CodeGeneratorRequest {
        file_to_generate: vec![KITCHEN.to_string(), SINK.to_string()],
        parameter: Some("paths=source_relative,verbose".to_string()),
        proto_file: kitchen_files(),
        compiler_version: Some(prost_types::compiler::Version {
            major: Some(3),
            minor: Some(21),
            patch: Some(12),
            suffix: None,
        }),
    }
}

/// Rock beats Scissors beats Paper beats Rock.
pub fn rps_file() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![
            message("Rock", vec![message_field("beats", 1, ".game.Scissors")]),
            message("Paper", vec![message_field("beats", 1, ".game.Rock")]),
            message("Scissors", vec![message_field("beats", 1, ".game.Paper")]),
        ],
        ..file("game/rps.proto", "game", &[])
    }
}

pub fn recursive_file() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![
            message(
                "Recursive",
                vec![
                    message_field("next", 1, ".tree.Recursive"),
                    repeated(message_field("children", 2, ".tree.Recursive")),
                ],
            ),
            message("Isolated", vec![scalar("value", 1, Type::Bool)]),
        ],
        ..file("tree/recursive.proto", "tree", &[])
    }
}

fn location(path: &[i32], span: &[i32], leading: &str, trailing: &str) -> Location {
    Location {
        path: path.to_vec(),
        span: span.to_vec(),
        leading_comments: (!leading.is_empty()).then(|| leading.to_string()),
        trailing_comments: (!trailing.is_empty()).then(|| trailing.to_string()),
        leading_detached_comments: Vec::new(),
    }
}

/// A file carrying source-code-info for most of its declarations, plus one
/// record whose path points nowhere.
pub fn commented_file() -> FileDescriptorProto {
    let mut syntax = location(&[12], &[0, 0, 18], " The syntax.\n", "");
    syntax.leading_detached_comments = vec![" License header.\n".to_string()];
    FileDescriptorProto {
        message_type: vec![DescriptorProto {
            enum_type: vec![enumeration("Kind", &["PLAIN", "FANCY"])],
            ..message("Note", vec![scalar("text", 1, Type::String)])
        }],
        service: vec![service("Notes", vec![method("Get", ".docs.Note", ".docs.Note")])],
        source_code_info: Some(SourceCodeInfo {
            location: vec![
                syntax,
                location(&[2], &[2, 0, 13], " The package.\n", ""),
                location(&[4, 0], &[4, 0, 8, 1], " A note.\n", ""),
                location(&[4, 0, 2, 0], &[5, 2, 18], "", " The text.\n"),
                location(&[4, 0, 4, 0, 2, 1], &[7, 4, 13], " Fancy.\n", ""),
                location(&[6, 0, 2, 0], &[10, 2, 30], " Fetch.\n", ""),
                location(&[4, 9], &[20, 0, 1], " Nowhere.\n", ""),
            ],
        }),
        ..file("docs/note.proto", "docs", &[])
    }
}

pub fn packageless_file() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![DescriptorProto {
            nested_type: vec![message("Leaf", vec![])],
            ..message("Root", vec![message_field("leaf", 1, ".Root.Leaf")])
        }],
        enum_type: vec![enumeration("Color", &["RED", "GREEN"])],
        ..file("root.proto", "", &[])
    }
}

pub const DESCRIPTOR: &str = "google/protobuf/descriptor.proto";
pub const ANNOTATIONS: &str = "acme/annotations.proto";
pub const ACCOUNT: &str = "acme/account.proto";

/// Custom option field numbers declared in the annotations file.
pub const TABLE_NUMBER: u32 = 50001;
pub const SENSITIVE_NUMBER: u32 = 50002;

/// The options messages custom options extend.
pub fn descriptor_file() -> FileDescriptorProto {
    FileDescriptorProto {
        message_type: vec![message("MessageOptions", vec![]), message("FieldOptions", vec![])],
        syntax: Some("proto2".to_string()),
        ..file(DESCRIPTOR, "google.protobuf", &[])
    }
}

pub fn annotations_file() -> FileDescriptorProto {
    FileDescriptorProto {
        extension: vec![
            extension(
                "table",
                TABLE_NUMBER as i32,
                Type::String,
                ".google.protobuf.MessageOptions",
            ),
            extension(
                "sensitive",
                SENSITIVE_NUMBER as i32,
                Type::Bool,
                ".google.protobuf.FieldOptions",
            ),
        ],
        ..file(ANNOTATIONS, "acme", &[DESCRIPTOR])
    }
}

/// `Account` carries `(acme.table) = "accounts"` and `deprecated = true`;
/// its `password` field carries `(acme.sensitive) = true`.
pub fn account_file() -> FileDescriptorProto {
    let mut message_options = prost_types::MessageOptions {
        deprecated: Some(true),
        ..Default::default()
    }
    .encode_to_vec();
    prost::encoding::string::encode(TABLE_NUMBER, &"accounts".to_string(), &mut message_options);

    let mut field_options = Vec::new();
    prost::encoding::bool::encode(SENSITIVE_NUMBER, &true, &mut field_options);

    let password = FieldDescriptorProto {
        options: Some(field_options),
        ..scalar("password", 2, Type::String)
    };
    FileDescriptorProto {
        message_type: vec![DescriptorProto {
            options: Some(message_options),
            ..message("Account", vec![scalar("name", 1, Type::String), password])
        }],
        ..file(ACCOUNT, "acme", &[ANNOTATIONS])
    }
}

pub fn options_files() -> Vec<FileDescriptorProto> {
    vec![descriptor_file(), annotations_file(), account_file()]
}
