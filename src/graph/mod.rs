//! The entity graph.
//!
//! A [`Graph`] is the fully linked, immutable result of one builder session:
//! an arena of entities addressed by [`EntityId`], a lookup table from
//! fully-qualified name (or file path) to id, and the package table.
//!
//! ## Architecture
//!
//! ```text
//! GraphBuilder::build_*           ← one session, single-threaded
//!   ├── builder    instantiate entities, register FQNs, link imports
//!   ├── hydrate    resolve field / extension / method types, record edges
//!   ├── source_info  replay source-code-info paths onto entities
//!   └── dependents   (optional) fill every dependency closure
//!         ↓
//! Graph (Send + Sync, read-only; closures memoized in OnceCells)
//!         ↓
//! views: File<'g>, Message<'g>, … / AnyEntity<'g>
//! ```

mod builder;
mod dependents;
pub(crate) mod entity;
mod field_type;
mod hydrate;
pub mod names;
mod source_info;
mod views;
mod wkt;

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

pub use builder::{GraphBuilder, process_code_generator_request, process_file_descriptor_set};
pub use dependents::get_dependents;
pub use entity::{EntityKind, Syntax};
pub use field_type::{ElementType, FieldType, ScalarKind};
pub use source_info::SourceCodeInfo;
pub use views::{
    AnyEntity, Entity, Enum, EnumValue, Extension, Field, File, Message, Method, OneOf, Package,
    Service,
};
pub use wkt::{WELL_KNOWN_TYPE_PACKAGE, WellKnownType};

use crate::base::EntityId;
use crate::config::Parameters;
use crate::descriptor::Version;
use entity::{EntityData, PackageData};

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Linked, queryable graph of every entity in a batch of descriptor files.
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) entities: Vec<EntityData>,
    /// FQN (or path, for files) → entity.
    pub(crate) lookup: FxIndexMap<Arc<str>, EntityId>,
    /// Every file, in load order.
    pub(crate) files: Vec<EntityId>,
    /// Build targets, in request order.
    pub(crate) targets: IndexMap<Arc<str>, EntityId>,
    pub(crate) packages: FxIndexMap<Arc<str>, PackageData>,
    pub(crate) parameters: Parameters,
    pub(crate) compiler_version: Option<Version>,
}

impl Graph {
    // ========================================================================
    // LOOKUP
    // ========================================================================

    /// Look up any entity by fully-qualified name, or a file by path.
    pub fn lookup(&self, name: &str) -> Option<AnyEntity<'_>> {
        self.lookup.get(name).map(|&id| AnyEntity::new(self, id))
    }

    /// View of the entity behind a handle, `None` if the handle is out of
    /// range for this graph.
    pub fn entity(&self, id: EntityId) -> Option<AnyEntity<'_>> {
        (id.index() < self.entities.len()).then(|| AnyEntity::new(self, id))
    }

    pub fn file(&self, path: &str) -> Option<File<'_>> {
        self.lookup(path)?.as_file()
    }

    pub fn message(&self, fqn: &str) -> Option<Message<'_>> {
        self.lookup(fqn)?.as_message()
    }

    pub fn enumeration(&self, fqn: &str) -> Option<Enum<'_>> {
        self.lookup(fqn)?.as_enum()
    }

    pub fn enum_value(&self, fqn: &str) -> Option<EnumValue<'_>> {
        self.lookup(fqn)?.as_enum_value()
    }

    pub fn service(&self, fqn: &str) -> Option<Service<'_>> {
        self.lookup(fqn)?.as_service()
    }

    pub fn method(&self, fqn: &str) -> Option<Method<'_>> {
        self.lookup(fqn)?.as_method()
    }

    pub fn field(&self, fqn: &str) -> Option<Field<'_>> {
        self.lookup(fqn)?.as_field()
    }

    pub fn oneof(&self, fqn: &str) -> Option<OneOf<'_>> {
        self.lookup(fqn)?.as_oneof()
    }

    pub fn extension(&self, fqn: &str) -> Option<Extension<'_>> {
        self.lookup(fqn)?.as_extension()
    }

    pub fn package(&self, name: &str) -> Option<Package<'_>> {
        self.packages
            .get_index_of(name)
            .map(|index| Package::new(self, index))
    }

    // ========================================================================
    // COLLECTIONS
    // ========================================================================

    /// Build targets keyed by input path, in request order.
    pub fn targets(&self) -> IndexMap<&str, File<'_>> {
        self.targets
            .iter()
            .map(|(path, &id)| (path.as_ref(), File::new(self, id)))
            .collect()
    }

    /// Every loaded file, in load order.
    pub fn files(&self) -> impl Iterator<Item = File<'_>> {
        self.files.iter().map(|&id| File::new(self, id))
    }

    pub fn packages(&self) -> impl Iterator<Item = Package<'_>> {
        (0..self.packages.len()).map(|index| Package::new(self, index))
    }

    /// Every registered entity, in creation order.
    pub fn entities(&self) -> impl Iterator<Item = AnyEntity<'_>> {
        self.lookup.values().map(|&id| AnyEntity::new(self, id))
    }

    /// Plugin parameters passed along with the request.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn compiler_version(&self) -> Option<&Version> {
        self.compiler_version.as_ref()
    }

    /// Number of registered entities.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    // ========================================================================
    // ARENA ACCESS
    // ========================================================================

    pub(crate) fn data(&self, id: EntityId) -> &EntityData {
        &self.entities[id.index()]
    }

    pub(crate) fn data_mut(&mut self, id: EntityId) -> &mut EntityData {
        &mut self.entities[id.index()]
    }

    pub(crate) fn package_data(&self, index: usize) -> Option<&PackageData> {
        self.packages.get_index(index).map(|(_, data)| data)
    }
}
