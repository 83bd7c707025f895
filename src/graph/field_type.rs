//! Resolved field types.
//!
//! The hydrator turns the `(type, label, type_name)` triple of a field
//! descriptor into one of these. Message and enum references are arena
//! handles; turn them into views with [`Graph::entity`](crate::graph::Graph::entity).

use crate::base::EntityId;
use crate::descriptor::Type;

/// Scalar protobuf types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Double,
    Float,
    Int64,
    Uint64,
    Int32,
    Fixed64,
    Fixed32,
    Bool,
    String,
    Bytes,
    Uint32,
    Sfixed32,
    Sfixed64,
    Sint32,
    Sint64,
}

impl ScalarKind {
    /// Scalar kind of a descriptor type; `None` for message, enum and group.
    pub fn from_proto(ty: Type) -> Option<Self> {
        Some(match ty {
            Type::Double => ScalarKind::Double,
            Type::Float => ScalarKind::Float,
            Type::Int64 => ScalarKind::Int64,
            Type::Uint64 => ScalarKind::Uint64,
            Type::Int32 => ScalarKind::Int32,
            Type::Fixed64 => ScalarKind::Fixed64,
            Type::Fixed32 => ScalarKind::Fixed32,
            Type::Bool => ScalarKind::Bool,
            Type::String => ScalarKind::String,
            Type::Bytes => ScalarKind::Bytes,
            Type::Uint32 => ScalarKind::Uint32,
            Type::Sfixed32 => ScalarKind::Sfixed32,
            Type::Sfixed64 => ScalarKind::Sfixed64,
            Type::Sint32 => ScalarKind::Sint32,
            Type::Sint64 => ScalarKind::Sint64,
            Type::Group | Type::Message | Type::Enum => return None,
        })
    }

    /// Name as written in a `.proto` file.
    pub fn proto_name(self) -> &'static str {
        match self {
            ScalarKind::Double => "double",
            ScalarKind::Float => "float",
            ScalarKind::Int64 => "int64",
            ScalarKind::Uint64 => "uint64",
            ScalarKind::Int32 => "int32",
            ScalarKind::Fixed64 => "fixed64",
            ScalarKind::Fixed32 => "fixed32",
            ScalarKind::Bool => "bool",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
            ScalarKind::Uint32 => "uint32",
            ScalarKind::Sfixed32 => "sfixed32",
            ScalarKind::Sfixed64 => "sfixed64",
            ScalarKind::Sint32 => "sint32",
            ScalarKind::Sint64 => "sint64",
        }
    }

    /// Whether the kind is legal as a map key.
    pub fn is_valid_map_key(self) -> bool {
        !matches!(self, ScalarKind::Double | ScalarKind::Float | ScalarKind::Bytes)
    }
}

/// Type of a single (non-repeated) value: a repeated element or a map value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Scalar(ScalarKind),
    Enum(EntityId),
    Embedded(EntityId),
}

impl ElementType {
    /// The message or enum this element refers to, if any.
    pub fn reference(self) -> Option<EntityId> {
        match self {
            ElementType::Scalar(_) => None,
            ElementType::Enum(id) | ElementType::Embedded(id) => Some(id),
        }
    }
}

/// Fully resolved type of a field or extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    Scalar(ScalarKind),
    Enum(EntityId),
    Embedded(EntityId),
    Map { key: ScalarKind, value: ElementType },
    Repeated(ElementType),
}

impl From<ElementType> for FieldType {
    fn from(element: ElementType) -> Self {
        match element {
            ElementType::Scalar(kind) => FieldType::Scalar(kind),
            ElementType::Enum(id) => FieldType::Enum(id),
            ElementType::Embedded(id) => FieldType::Embedded(id),
        }
    }
}

impl FieldType {
    pub fn is_scalar(&self) -> bool {
        matches!(self, FieldType::Scalar(_))
    }

    pub fn is_enum(&self) -> bool {
        matches!(self, FieldType::Enum(_))
    }

    pub fn is_embed(&self) -> bool {
        matches!(self, FieldType::Embedded(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, FieldType::Map { .. })
    }

    /// Repeated fields, maps excluded.
    pub fn is_repeated(&self) -> bool {
        matches!(self, FieldType::Repeated(_))
    }

    /// Element type of a repeated field.
    pub fn element(&self) -> Option<ElementType> {
        match self {
            FieldType::Repeated(element) => Some(*element),
            _ => None,
        }
    }

    /// Key type of a map field.
    pub fn key(&self) -> Option<ScalarKind> {
        match self {
            FieldType::Map { key, .. } => Some(*key),
            _ => None,
        }
    }

    /// Value type of a map field.
    pub fn value(&self) -> Option<ElementType> {
        match self {
            FieldType::Map { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Element view of a singular type; `None` for maps and repeated fields.
    pub fn as_element(&self) -> Option<ElementType> {
        match self {
            FieldType::Scalar(kind) => Some(ElementType::Scalar(*kind)),
            FieldType::Enum(id) => Some(ElementType::Enum(*id)),
            FieldType::Embedded(id) => Some(ElementType::Embedded(*id)),
            FieldType::Map { .. } | FieldType::Repeated(_) => None,
        }
    }

    /// The message or enum ultimately referenced: the embedded or enum type
    /// itself, a repeated element, or a map value.
    pub fn reference(&self) -> Option<EntityId> {
        match self {
            FieldType::Scalar(_) => None,
            FieldType::Enum(id) | FieldType::Embedded(id) => Some(*id),
            FieldType::Map { value, .. } => value.reference(),
            FieldType::Repeated(element) => element.reference(),
        }
    }
}
