//! Typed, borrowed views over graph entities.
//!
//! A view is a `(graph, id)` pair: cheap to copy, valid for as long as the
//! graph is borrowed. Every view implements [`Entity`]; [`AnyEntity`] is the
//! closed sum over all of them.

mod enums;
mod field;
mod file;
mod message;
mod service;

pub use enums::{Enum, EnumValue};
pub use field::{Extension, Field, OneOf};
pub use file::{File, Package};
pub use message::Message;
pub use service::{Method, Service};

use crate::base::EntityId;
use crate::error::OptionError;
use crate::graph::entity::{EntityKind, KindData, Syntax};
use crate::graph::{Graph, SourceCodeInfo};
use crate::options::{self, OptionPayload};

// ============================================================================
// ENTITY TRAIT
// ============================================================================

/// Capabilities shared by every node of the graph.
pub trait Entity<'g>: Copy {
    /// The graph this view borrows from.
    fn graph(&self) -> &'g Graph;

    /// Arena handle of the entity.
    fn id(&self) -> EntityId;

    fn kind(&self) -> EntityKind {
        self.graph().data(self.id()).entity_kind()
    }

    /// Local name as declared (the input path, for files).
    fn name(&self) -> &'g str {
        &self.graph().data(self.id()).name
    }

    /// Globally unique dotted name (`.pkg.Outer.Inner`), or the input path
    /// for files.
    fn fully_qualified_name(&self) -> &'g str {
        &self.graph().data(self.id()).fqn
    }

    /// Owning entity; `None` only for files.
    fn parent(&self) -> Option<AnyEntity<'g>> {
        let graph = self.graph();
        graph.data(self.id()).parent.map(|id| AnyEntity::new(graph, id))
    }

    /// File the entity is declared in (itself, for files).
    fn file(&self) -> File<'g> {
        File::new(self.graph(), self.graph().data(self.id()).file)
    }

    fn package(&self) -> Package<'g> {
        self.file().package()
    }

    fn syntax(&self) -> Syntax {
        self.file().file_data().syntax
    }

    /// Whether the owning file was requested for generation.
    fn build_target(&self) -> bool {
        self.file().file_data().build_target
    }

    /// Comments and span recorded for the declaration. For a file this is
    /// the `syntax` statement's record.
    fn source_code_info(&self) -> Option<&'g SourceCodeInfo> {
        let data = self.graph().data(self.id());
        match &data.kind {
            KindData::File(file) => file.syntax_info.as_ref(),
            _ => data.info.as_ref(),
        }
    }

    /// Still-encoded options of the declaration.
    fn option_payload(&self) -> &'g OptionPayload {
        &self.graph().data(self.id()).options
    }

    /// Decode a custom option into `out`. See [`options::Extension::decode`].
    fn extension<T: Default>(
        &self,
        extension: &options::Extension<T>,
        out: &mut T,
    ) -> Result<bool, OptionError> {
        extension.decode(self.option_payload(), out)
    }

    fn as_any(&self) -> AnyEntity<'g> {
        AnyEntity::new(self.graph(), self.id())
    }
}

macro_rules! entity_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $name<'g> {
            graph: &'g $crate::graph::Graph,
            id: $crate::base::EntityId,
        }

        impl<'g> $name<'g> {
            pub(crate) fn new(graph: &'g $crate::graph::Graph, id: $crate::base::EntityId) -> Self {
                Self { graph, id }
            }
        }

        impl<'g> $crate::graph::Entity<'g> for $name<'g> {
            fn graph(&self) -> &'g $crate::graph::Graph {
                self.graph
            }

            fn id(&self) -> $crate::base::EntityId {
                self.id
            }
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                ::std::ptr::eq(self.graph, other.graph) && self.id == other.id
            }
        }

        impl Eq for $name<'_> {}

        impl ::std::hash::Hash for $name<'_> {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&self.id, state);
            }
        }

        impl<'g> From<$name<'g>> for $crate::graph::AnyEntity<'g> {
            fn from(view: $name<'g>) -> Self {
                $crate::graph::AnyEntity::$name(view)
            }
        }

        impl ::std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                use $crate::graph::Entity as _;
                f.debug_tuple(stringify!($name))
                    .field(&self.fully_qualified_name())
                    .finish()
            }
        }
    };
}

pub(crate) use entity_view;

// ============================================================================
// ANY ENTITY
// ============================================================================

/// Any node of the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnyEntity<'g> {
    File(File<'g>),
    Message(Message<'g>),
    Enum(Enum<'g>),
    EnumValue(EnumValue<'g>),
    Service(Service<'g>),
    Method(Method<'g>),
    Field(Field<'g>),
    OneOf(OneOf<'g>),
    Extension(Extension<'g>),
}

macro_rules! any_as {
    ($($method:ident => $variant:ident,)+) => {
        $(
            pub fn $method(self) -> Option<$variant<'g>> {
                match self {
                    AnyEntity::$variant(view) => Some(view),
                    _ => None,
                }
            }
        )+
    };
}

impl<'g> AnyEntity<'g> {
    pub(crate) fn new(graph: &'g Graph, id: EntityId) -> Self {
        match graph.data(id).kind {
            KindData::File(_) => AnyEntity::File(File::new(graph, id)),
            KindData::Message(_) => AnyEntity::Message(Message::new(graph, id)),
            KindData::Enum(_) => AnyEntity::Enum(Enum::new(graph, id)),
            KindData::EnumValue(_) => AnyEntity::EnumValue(EnumValue::new(graph, id)),
            KindData::Service(_) => AnyEntity::Service(Service::new(graph, id)),
            KindData::Method(_) => AnyEntity::Method(Method::new(graph, id)),
            KindData::Field(_) => AnyEntity::Field(Field::new(graph, id)),
            KindData::OneOf(_) => AnyEntity::OneOf(OneOf::new(graph, id)),
            KindData::Extension(_) => AnyEntity::Extension(Extension::new(graph, id)),
        }
    }

    any_as! {
        as_file => File,
        as_message => Message,
        as_enum => Enum,
        as_enum_value => EnumValue,
        as_service => Service,
        as_method => Method,
        as_field => Field,
        as_oneof => OneOf,
        as_extension => Extension,
    }
}

impl<'g> Entity<'g> for AnyEntity<'g> {
    fn graph(&self) -> &'g Graph {
        match self {
            AnyEntity::File(v) => v.graph(),
            AnyEntity::Message(v) => v.graph(),
            AnyEntity::Enum(v) => v.graph(),
            AnyEntity::EnumValue(v) => v.graph(),
            AnyEntity::Service(v) => v.graph(),
            AnyEntity::Method(v) => v.graph(),
            AnyEntity::Field(v) => v.graph(),
            AnyEntity::OneOf(v) => v.graph(),
            AnyEntity::Extension(v) => v.graph(),
        }
    }

    fn id(&self) -> EntityId {
        match self {
            AnyEntity::File(v) => v.id(),
            AnyEntity::Message(v) => v.id(),
            AnyEntity::Enum(v) => v.id(),
            AnyEntity::EnumValue(v) => v.id(),
            AnyEntity::Service(v) => v.id(),
            AnyEntity::Method(v) => v.id(),
            AnyEntity::Field(v) => v.id(),
            AnyEntity::OneOf(v) => v.id(),
            AnyEntity::Extension(v) => v.id(),
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Files of `targets`, excluding `own`, deduplicated in first-seen order.
pub(crate) fn import_files<'g>(
    graph: &'g Graph,
    own: EntityId,
    targets: impl IntoIterator<Item = EntityId>,
) -> Vec<File<'g>> {
    let mut files: Vec<File<'g>> = Vec::new();
    for target in targets {
        let file = graph.data(target).file;
        if file != own && !files.iter().any(|f| f.id() == file) {
            files.push(File::new(graph, file));
        }
    }
    files
}

/// Union of several import lists, deduplicated in first-seen order.
pub(crate) fn merge_imports<'g>(lists: impl IntoIterator<Item = Vec<File<'g>>>) -> Vec<File<'g>> {
    let mut merged: Vec<File<'g>> = Vec::new();
    for file in lists.into_iter().flatten() {
        if !merged.contains(&file) {
            merged.push(file);
        }
    }
    merged
}
