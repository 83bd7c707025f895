//! Type hydration tests: field types, maps, oneofs, extensions, methods.

use rstest::rstest;

use crate::helpers::descriptors::*;
use crate::helpers::fixtures::*;
use crate::helpers::graph_helpers::*;
use protograph::descriptor::{FileDescriptorProto, Label, Type};
use protograph::diagnostics::codes;
use protograph::graph::{ElementType, FieldType, ScalarKind};
use protograph::{Entity, EntityKind};

// =============================================================================
// FIELD TYPES
// =============================================================================

#[test]
fn test_scalar_enum_and_embedded_fields() {
    let graph = build(&kitchen_files());

    let name = graph.field(".kitchen.Material.name").unwrap();
    assert_eq!(name.field_type(), Some(FieldType::Scalar(ScalarKind::String)));
    assert!(name.referenced_type().is_none());

    let finish = graph.field(".kitchen.Material.finish").unwrap();
    assert_eq!(finish.enumeration().unwrap().name(), "Finish");
    assert!(finish.field_type().unwrap().is_enum());

    let material = graph.field(".kitchen.Sink.material").unwrap();
    assert_eq!(material.embed().unwrap().name(), "Material");
    assert_eq!(material.proto_type(), Type::Message);
    assert_eq!(material.type_name(), ".kitchen.Material");
    assert_eq!(material.message().unwrap().name(), "Sink");
}

#[test]
fn test_repeated_field() {
    let graph = build(&kitchen_files());
    let sinks = graph.field(".kitchen.Kitchen.sinks").unwrap();
    let sink = graph.message(".kitchen.Sink").unwrap();

    assert_eq!(sinks.label(), Label::Repeated);
    assert_eq!(
        sinks.field_type(),
        Some(FieldType::Repeated(ElementType::Embedded(sink.id())))
    );
    assert!(sinks.embed().is_none());
    assert_eq!(sinks.referenced_type().unwrap().fully_qualified_name(), ".kitchen.Sink");
    assert!(!sinks.has_presence());
}

#[rstest]
#[case(".kitchen.Kitchen.sinks_by_room", ScalarKind::String, Some(".kitchen.Sink"))]
#[case(".kitchen.Kitchen.counts", ScalarKind::String, None)]
fn test_map_fields(#[case] fqn: &str, #[case] key: ScalarKind, #[case] value: Option<&str>) {
    let graph = build(&kitchen_files());
    let field = graph.field(fqn).unwrap();
    let field_type = field.field_type().unwrap();

    assert!(field_type.is_map());
    assert!(!field_type.is_repeated());
    assert_eq!(field_type.key(), Some(key));
    let referenced = field.referenced_type().map(|e| e.fully_qualified_name());
    assert_eq!(referenced, value);
}

#[test]
fn test_map_value_scalar_kind() {
    let graph = build(&kitchen_files());
    let counts = graph.field(".kitchen.Kitchen.counts").unwrap();
    assert_eq!(
        counts.field_type().unwrap().value(),
        Some(ElementType::Scalar(ScalarKind::Int32))
    );
}

#[test]
fn test_map_entry_with_enum_value() {
    let mut file = file("inv/inventory.proto", "inv", &[]);
    file.enum_type = vec![enumeration("Grade", &["LOW", "HIGH"])];
    file.message_type = vec![{
        let mut m = message(
            "Stock",
            vec![repeated(message_field("grades", 1, ".inv.Stock.GradesEntry"))],
        );
        m.nested_type = vec![map_entry("GradesEntry", Type::Int64, enum_field("value", 2, ".inv.Grade"))];
        m
    }];
    let graph = build(&[file]);

    let grades = graph.field(".inv.Stock.grades").unwrap();
    let grade = graph.enumeration(".inv.Grade").unwrap();
    assert_eq!(
        grades.field_type(),
        Some(FieldType::Map {
            key: ScalarKind::Int64,
            value: ElementType::Enum(grade.id()),
        })
    );
    // The map field, not the synthesized entry, depends on the enum.
    assert_eq!(
        names(&grade.dependents()),
        vec!["inv/inventory.proto", ".inv.Stock"]
    );
}

// =============================================================================
// PRESENCE AND ONEOFS
// =============================================================================

fn oneof_file() -> FileDescriptorProto {
    let mut file = file("shape/shape.proto", "shape", &[]);
    let mut shape = message(
        "Shape",
        vec![
            in_oneof(scalar("circle", 1, Type::Double), 0),
            in_oneof(scalar("square", 2, Type::Double), 0),
            proto3_optional(scalar("label", 3, Type::String), 1),
            scalar("sides", 4, Type::Int32),
        ],
    );
    shape.oneof_decl = vec![oneof("kind"), oneof("_label")];
    file.message_type = vec![shape];
    file
}

#[test]
fn test_real_and_synthetic_oneofs() {
    let graph = build(&[oneof_file()]);
    let shape = graph.message(".shape.Shape").unwrap();

    assert_eq!(names(&shape.oneofs()), vec![".shape.Shape.kind", ".shape.Shape._label"]);
    assert_eq!(names(&shape.real_oneofs()), vec![".shape.Shape.kind"]);
    assert_eq!(names(&shape.synthetic_oneofs()), vec![".shape.Shape._label"]);

    let kind = graph.oneof(".shape.Shape.kind").unwrap();
    assert_eq!(names(&kind.fields()), vec![".shape.Shape.circle", ".shape.Shape.square"]);
    assert!(!kind.is_synthetic());
    assert_eq!(kind.message().unwrap(), shape);

    assert_eq!(
        names(&shape.oneof_fields()),
        vec![".shape.Shape.circle", ".shape.Shape.square"]
    );
    assert_eq!(
        names(&shape.non_oneof_fields()),
        vec![".shape.Shape.label", ".shape.Shape.sides"]
    );
}

#[rstest]
#[case(".shape.Shape.circle", true, false)]
#[case(".shape.Shape.label", true, true)]
#[case(".shape.Shape.sides", false, false)]
fn test_presence(#[case] fqn: &str, #[case] presence: bool, #[case] optional_keyword: bool) {
    let graph = build(&[oneof_file()]);
    let field = graph.field(fqn).unwrap();
    assert_eq!(field.has_presence(), presence);
    assert_eq!(field.has_optional_keyword(), optional_keyword);
    assert!(!field.required());
}

#[test]
fn test_label_oneof_membership() {
    let graph = build(&[oneof_file()]);
    let label = graph.field(".shape.Shape.label").unwrap();
    assert!(label.in_oneof());
    assert!(!label.in_real_oneof());
    assert_eq!(label.oneof().unwrap().name(), "_label");
}

#[test]
fn test_proto2_required_and_optional() {
    let mut file = file("legacy/legacy.proto", "legacy", &[]);
    file.syntax = Some("proto2".to_string());
    let mut id = scalar("id", 1, Type::Int32);
    id.label = Some(Label::Required as i32);
    file.message_type = vec![message("Legacy", vec![id, scalar("note", 2, Type::String)])];
    let graph = build(&[file]);

    let id = graph.field(".legacy.Legacy.id").unwrap();
    assert!(id.required());
    assert!(id.has_presence());
    let note = graph.field(".legacy.Legacy.note").unwrap();
    assert!(note.has_optional_keyword());
    assert!(note.has_presence());
}

// =============================================================================
// EXTENSIONS
// =============================================================================

#[test]
fn test_extensions_register_on_extendee() {
    let graph = build(&options_files());
    let message_options = graph.message(".google.protobuf.MessageOptions").unwrap();
    let table = graph.extension(".acme.table").unwrap();

    assert_eq!(table.extendee().unwrap(), message_options);
    assert_eq!(table.defined_in().unwrap().kind(), EntityKind::File);
    assert_eq!(table.field_type(), Some(FieldType::Scalar(ScalarKind::String)));
    assert_eq!(names(&message_options.extensions()), vec![".acme.table"]);
    assert_eq!(
        names(&graph.file(ANNOTATIONS).unwrap().defined_extensions()),
        vec![".acme.table", ".acme.sensitive"]
    );
}

#[test]
fn test_message_scoped_extension() {
    let mut file = file("scoped/scoped.proto", "scoped", &[]);
    let mut holder = message("Holder", vec![]);
    holder.extension = vec![extension("tag", 100, Type::String, ".scoped.Target")];
    file.message_type = vec![message("Target", vec![]), holder];
    let graph = build(&[file]);

    let holder = graph.message(".scoped.Holder").unwrap();
    let tag = graph.extension(".scoped.Holder.tag").unwrap();
    assert_eq!(holder.defined_extensions(), vec![tag]);
    assert_eq!(tag.defined_in().unwrap().fully_qualified_name(), ".scoped.Holder");
    assert_eq!(graph.message(".scoped.Target").unwrap().extensions(), vec![tag]);
}

#[test]
fn test_unresolved_extendee_is_reported() {
    let mut file = file("ext/bad.proto", "ext", &[]);
    file.extension = vec![extension("lost", 100, Type::Bool, ".ext.Missing")];
    let (graph, sink) = build_with_sink(&[file]);
    assert_eq!(sink.with_code(codes::UNRESOLVED_TYPE).len(), 1);
    assert!(graph.extension(".ext.lost").unwrap().extendee().is_none());
}

// =============================================================================
// FAILURES
// =============================================================================

#[test]
fn test_unresolved_field_type() {
    let mut file = file("bad/ref.proto", "bad", &[]);
    file.message_type = vec![message("Holder", vec![message_field("ghost", 1, ".bad.Ghost")])];
    let (graph, sink) = build_with_sink(&[file]);

    let unresolved = sink.with_code(codes::UNRESOLVED_TYPE);
    assert_eq!(unresolved.len(), 1);
    assert_eq!(unresolved[0].entity.as_deref(), Some(".bad.Holder.ghost"));
    assert!(unresolved[0].message.contains(".bad.Ghost"));
    assert!(graph.field(".bad.Holder.ghost").unwrap().field_type().is_none());
}

#[test]
fn test_type_name_of_wrong_kind_is_unresolved() {
    let mut file = file("bad/kind.proto", "bad", &[]);
    file.enum_type = vec![enumeration("Mode", &["A"])];
    file.message_type = vec![message("Holder", vec![message_field("mode", 1, ".bad.Mode")])];
    let (_, sink) = build_with_sink(&[file]);
    assert_eq!(codes(&sink), vec![codes::UNRESOLVED_TYPE]);
}

#[test]
fn test_group_fields_are_unsupported() {
    let mut file = file("bad/group.proto", "bad", &[]);
    file.syntax = Some("proto2".to_string());
    let mut group = message_field("result", 1, ".bad.Holder.Result");
    group.r#type = Some(Type::Group as i32);
    let mut holder = message("Holder", vec![group]);
    holder.nested_type = vec![message("Result", vec![])];
    file.message_type = vec![holder];
    let (_, sink) = build_with_sink(&[file]);

    let groups = sink.with_code(codes::UNSUPPORTED_GROUP);
    assert_eq!(groups.len(), 1);
    assert!(groups[0].message.contains(".bad.Holder.result"));
}

#[test]
fn test_unresolved_method_types() {
    let mut file = file("bad/svc.proto", "bad", &[]);
    file.message_type = vec![message("Ping", vec![])];
    file.service = vec![service("Pinger", vec![method("Ping", ".bad.Ping", ".bad.Pong")])];
    let (graph, sink) = build_with_sink(&[file]);

    assert_eq!(codes(&sink), vec![codes::UNRESOLVED_TYPE]);
    let ping = graph.method(".bad.Pinger.Ping").unwrap();
    assert!(ping.input().is_some());
    assert!(ping.output().is_none());
}
