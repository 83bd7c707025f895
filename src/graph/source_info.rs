//! Source-location attachment.
//!
//! A file's source-code-info is a flat list of `(path, location)` records.
//! Each path is read two integers at a time starting at the file: the first
//! integer is the field number of a child collection on the current
//! descriptor, the second is an index into it. The record lands on whichever
//! entity the path ends at. Paths that do not address an entity (odd length,
//! unknown collection, out-of-range index) are dropped.

use tracing::trace;

use crate::base::{EntityId, Span};
use crate::descriptor::{self, Location, paths};
use crate::graph::Graph;
use crate::graph::entity::KindData;

/// Comments and position recorded by the compiler for one declaration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceCodeInfo {
    location: Location,
}

impl SourceCodeInfo {
    pub fn new(location: Location) -> Self {
        Self { location }
    }

    /// Comment directly above the declaration, without the comment markers.
    pub fn leading_comments(&self) -> &str {
        self.location.leading_comments()
    }

    /// Comment directly after the declaration on the same or next line.
    pub fn trailing_comments(&self) -> &str {
        self.location.trailing_comments()
    }

    /// Comments separated from the declaration by a blank line.
    pub fn leading_detached_comments(&self) -> &[String] {
        &self.location.leading_detached_comments
    }

    /// Position of the declaration, when the compiler recorded a valid one.
    pub fn span(&self) -> Option<Span> {
        Span::from_proto(&self.location.span)
    }

    /// Path the record was addressed by.
    pub fn path(&self) -> &[i32] {
        &self.location.path
    }

    /// The underlying location record.
    pub fn location(&self) -> &Location {
        &self.location
    }
}

/// Where a path lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InfoSlot {
    Entity(EntityId),
    FileSyntax(EntityId),
    FilePackage(EntityId),
}

impl Graph {
    /// Resolve a source-code-info path relative to `file`.
    pub(crate) fn resolve_path(&self, file: EntityId, path: &[i32]) -> Option<InfoSlot> {
        match path {
            [] | [paths::FILE_SYNTAX] => Some(InfoSlot::FileSyntax(file)),
            [paths::FILE_PACKAGE] => Some(InfoSlot::FilePackage(file)),
            _ => self.child_at_path(file, path).map(InfoSlot::Entity),
        }
    }

    /// Entity reached by walking `path` down from `id`; `id` itself for an
    /// empty path.
    pub(crate) fn child_at_path(&self, id: EntityId, path: &[i32]) -> Option<EntityId> {
        let [tag, index, rest @ ..] = path else {
            return path.is_empty().then_some(id);
        };
        let index = usize::try_from(*index).ok()?;
        let children = match (&self.data(id).kind, *tag) {
            (KindData::File(f), paths::FILE_MESSAGE_TYPE) => &f.messages,
            (KindData::File(f), paths::FILE_ENUM_TYPE) => &f.enums,
            (KindData::File(f), paths::FILE_SERVICE) => &f.services,
            (KindData::File(f), paths::FILE_EXTENSION) => &f.extensions,
            (KindData::Message(m), paths::MESSAGE_FIELD) => &m.fields,
            (KindData::Message(m), paths::MESSAGE_NESTED_TYPE) => &m.messages,
            (KindData::Message(m), paths::MESSAGE_ENUM_TYPE) => &m.enums,
            (KindData::Message(m), paths::MESSAGE_EXTENSION) => &m.defined_extensions,
            (KindData::Message(m), paths::MESSAGE_ONEOF_DECL) => &m.oneofs,
            (KindData::Enum(e), paths::ENUM_VALUE) => &e.values,
            (KindData::Service(s), paths::SERVICE_METHOD) => &s.methods,
            _ => return None,
        };
        let child = *children.get(index)?;
        self.child_at_path(child, rest)
    }

    /// Replay every location record of `info` onto the entities of `file`.
    pub(crate) fn attach_source_info(&mut self, file: EntityId, info: &descriptor::SourceCodeInfo) {
        for location in &info.location {
            let Some(slot) = self.resolve_path(file, &location.path) else {
                trace!(
                    file = %self.data(file).fqn,
                    path = ?location.path,
                    "skipped source location"
                );
                continue;
            };
            let info = SourceCodeInfo::new(location.clone());
            match slot {
                InfoSlot::Entity(id) => {
                    trace!(entity = %self.data(id).fqn, "attached source info");
                    self.data_mut(id).info = Some(info);
                }
                InfoSlot::FileSyntax(id) => {
                    if let KindData::File(f) = &mut self.data_mut(id).kind {
                        f.syntax_info = Some(info);
                    }
                }
                InfoSlot::FilePackage(id) => {
                    if let KindData::File(f) = &mut self.data_mut(id).kind {
                        f.package_info = Some(info);
                    }
                }
            }
        }
    }
}
