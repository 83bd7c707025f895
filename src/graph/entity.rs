//! Arena storage for graph entities.
//!
//! Every declaration lives in one `EntityData` slot addressed by an
//! [`EntityId`]. Ownership edges (file → message → field …) are child id lists
//! on the kind-specific payload; dependency edges are plain id lists on the
//! shared part. Nothing in here owns another entity, so reference cycles in
//! the schema never turn into ownership cycles.

use std::sync::Arc;

use once_cell::sync::OnceCell;

use crate::base::EntityId;
use crate::descriptor::{FieldDescriptorProto, MethodDescriptorProto};
use crate::graph::field_type::FieldType;
use crate::graph::source_info::SourceCodeInfo;
use crate::options::OptionPayload;

/// The nine kinds of entity stored in a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    File,
    Message,
    Enum,
    EnumValue,
    Service,
    Method,
    Field,
    OneOf,
    Extension,
}

impl EntityKind {
    pub fn display(self) -> &'static str {
        match self {
            EntityKind::File => "file",
            EntityKind::Message => "message",
            EntityKind::Enum => "enum",
            EntityKind::EnumValue => "enum value",
            EntityKind::Service => "service",
            EntityKind::Method => "method",
            EntityKind::Field => "field",
            EntityKind::OneOf => "oneof",
            EntityKind::Extension => "extension",
        }
    }
}

/// Schema syntax of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Syntax {
    #[default]
    Proto2,
    Proto3,
    Editions,
}

impl Syntax {
    /// Interpret the `syntax` field of a file descriptor. Empty means proto2.
    pub fn from_proto(syntax: &str) -> Self {
        match syntax {
            "proto3" => Syntax::Proto3,
            "editions" => Syntax::Editions,
            _ => Syntax::Proto2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Syntax::Proto2 => "proto2",
            Syntax::Proto3 => "proto3",
            Syntax::Editions => "editions",
        }
    }
}

/// Shared part of every entity.
#[derive(Debug)]
pub(crate) struct EntityData {
    pub name: Arc<str>,
    pub fqn: Arc<str>,
    pub parent: Option<EntityId>,
    /// Owning file; a file points at itself.
    pub file: EntityId,
    pub info: Option<SourceCodeInfo>,
    pub options: OptionPayload,
    /// Direct dependents recorded during hydration (or importers, for files).
    pub dependents: Vec<EntityId>,
    /// Direct dependencies recorded during hydration.
    pub dependencies: Vec<EntityId>,
    pub dependents_closure: OnceCell<Vec<EntityId>>,
    pub dependencies_closure: OnceCell<Vec<EntityId>>,
    pub kind: KindData,
}

impl EntityData {
    pub fn new(
        name: impl Into<Arc<str>>,
        fqn: impl Into<Arc<str>>,
        parent: Option<EntityId>,
        file: EntityId,
        options: OptionPayload,
        kind: KindData,
    ) -> Self {
        Self {
            name: name.into(),
            fqn: fqn.into(),
            parent,
            file,
            info: None,
            options,
            dependents: Vec::new(),
            dependencies: Vec::new(),
            dependents_closure: OnceCell::new(),
            dependencies_closure: OnceCell::new(),
            kind,
        }
    }

    pub fn entity_kind(&self) -> EntityKind {
        match &self.kind {
            KindData::File(_) => EntityKind::File,
            KindData::Message(_) => EntityKind::Message,
            KindData::Enum(_) => EntityKind::Enum,
            KindData::EnumValue(_) => EntityKind::EnumValue,
            KindData::Service(_) => EntityKind::Service,
            KindData::Method(_) => EntityKind::Method,
            KindData::Field(_) => EntityKind::Field,
            KindData::OneOf(_) => EntityKind::OneOf,
            KindData::Extension(_) => EntityKind::Extension,
        }
    }

    pub fn as_file(&self) -> Option<&FileData> {
        match &self.kind {
            KindData::File(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&MessageData> {
        match &self.kind {
            KindData::Message(m) => Some(m),
            _ => None,
        }
    }

    /// Field payload of a field or an extension.
    pub fn as_field(&self) -> Option<&FieldData> {
        match &self.kind {
            KindData::Field(f) | KindData::Extension(f) => Some(f),
            _ => None,
        }
    }

    pub fn is_map_entry(&self) -> bool {
        self.as_message().is_some_and(|m| m.map_entry)
    }
}

#[derive(Debug)]
pub(crate) enum KindData {
    File(FileData),
    Message(MessageData),
    Enum(EnumData),
    EnumValue(EnumValueData),
    Service(ServiceData),
    Method(MethodData),
    Field(FieldData),
    OneOf(OneOfData),
    Extension(FieldData),
}

/// Fallbacks handed out when a view is pointed at an entity of another kind.
pub(crate) static EMPTY_FILE: FileData = FileData {
    package: 0,
    syntax: Syntax::Proto2,
    build_target: false,
    dependencies: Vec::new(),
    public_dependencies: Vec::new(),
    messages: Vec::new(),
    enums: Vec::new(),
    services: Vec::new(),
    extensions: Vec::new(),
    syntax_info: None,
    package_info: None,
};

pub(crate) static EMPTY_MESSAGE: MessageData = MessageData {
    messages: Vec::new(),
    enums: Vec::new(),
    fields: Vec::new(),
    oneofs: Vec::new(),
    defined_extensions: Vec::new(),
    extensions: Vec::new(),
    map_entry: false,
};

pub(crate) static EMPTY_FIELD: FieldData = FieldData {
    descriptor: FieldDescriptorProto {
        name: None,
        number: None,
        label: None,
        r#type: None,
        type_name: None,
        extendee: None,
        default_value: None,
        oneof_index: None,
        json_name: None,
        options: None,
        proto3_optional: None,
    },
    oneof: None,
    field_type: None,
    extendee: None,
};

pub(crate) static EMPTY_METHOD: MethodData = MethodData {
    descriptor: MethodDescriptorProto {
        name: None,
        input_type: None,
        output_type: None,
        options: None,
        client_streaming: None,
        server_streaming: None,
    },
    input: None,
    output: None,
};

pub(crate) static EMPTY_IDS: Vec<EntityId> = Vec::new();

#[derive(Debug, Default)]
pub(crate) struct FileData {
    /// Index into the graph's package table.
    pub package: usize,
    pub syntax: Syntax,
    pub build_target: bool,
    /// Declared imports, in declaration order.
    pub dependencies: Vec<EntityId>,
    pub public_dependencies: Vec<EntityId>,
    pub messages: Vec<EntityId>,
    pub enums: Vec<EntityId>,
    pub services: Vec<EntityId>,
    pub extensions: Vec<EntityId>,
    pub syntax_info: Option<SourceCodeInfo>,
    pub package_info: Option<SourceCodeInfo>,
}

#[derive(Debug, Default)]
pub(crate) struct MessageData {
    /// Nested messages in descriptor order, map entries included.
    pub messages: Vec<EntityId>,
    pub enums: Vec<EntityId>,
    pub fields: Vec<EntityId>,
    pub oneofs: Vec<EntityId>,
    /// Extensions declared inside this message.
    pub defined_extensions: Vec<EntityId>,
    /// Extensions (declared anywhere) that extend this message.
    pub extensions: Vec<EntityId>,
    pub map_entry: bool,
}

#[derive(Debug, Default)]
pub(crate) struct EnumData {
    pub values: Vec<EntityId>,
}

#[derive(Debug)]
pub(crate) struct EnumValueData {
    pub number: i32,
}

#[derive(Debug, Default)]
pub(crate) struct ServiceData {
    pub methods: Vec<EntityId>,
}

#[derive(Debug)]
pub(crate) struct MethodData {
    pub descriptor: MethodDescriptorProto,
    pub input: Option<EntityId>,
    pub output: Option<EntityId>,
}

#[derive(Debug)]
pub(crate) struct FieldData {
    pub descriptor: FieldDescriptorProto,
    pub oneof: Option<EntityId>,
    /// Resolved by the type hydrator.
    pub field_type: Option<FieldType>,
    /// Extended message, for extensions only.
    pub extendee: Option<EntityId>,
}

impl FieldData {
    pub fn new(descriptor: FieldDescriptorProto) -> Self {
        Self {
            descriptor,
            oneof: None,
            field_type: None,
            extendee: None,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct OneOfData {
    pub fields: Vec<EntityId>,
}

/// A package: every file sharing one package name.
#[derive(Debug)]
pub(crate) struct PackageData {
    pub name: Arc<str>,
    pub files: Vec<EntityId>,
}
