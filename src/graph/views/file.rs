use std::cmp::Reverse;
use std::fmt;

use super::{AnyEntity, Entity, Enum, Extension, Message, Service, entity_view, merge_imports};
use crate::base::{EntityId, Position};
use crate::error::OptionError;
use crate::graph::entity::{EMPTY_FILE, FileData, PackageData};
use crate::graph::{Graph, SourceCodeInfo};

entity_view! {
    /// A compiled `.proto` file.
    File
}

impl<'g> File<'g> {
    pub(crate) fn file_data(&self) -> &'g FileData {
        self.graph.data(self.id).as_file().unwrap_or(&EMPTY_FILE)
    }

    /// Path of the file relative to the include root, as given by the host.
    pub fn input_path(&self) -> &'g str {
        self.name()
    }

    /// Package declared by the file (the empty package if none).
    pub fn package(&self) -> Package<'g> {
        Package::new(self.graph, self.file_data().package)
    }

    /// Top-level messages, in declaration order.
    pub fn messages(&self) -> Vec<Message<'g>> {
        self.views(&self.file_data().messages, Message::new)
    }

    /// Every message declared in the file, nested ones included (map entries
    /// excluded), in pre-order.
    pub fn all_messages(&self) -> Vec<Message<'g>> {
        self.messages()
            .into_iter()
            .flat_map(|m| std::iter::once(m).chain(m.all_messages()))
            .collect()
    }

    /// Top-level enums, in declaration order.
    pub fn enums(&self) -> Vec<Enum<'g>> {
        self.views(&self.file_data().enums, Enum::new)
    }

    /// Every enum declared in the file, nested ones included.
    pub fn all_enums(&self) -> Vec<Enum<'g>> {
        let mut enums = self.enums();
        for message in self.messages() {
            enums.extend(message.all_enums());
        }
        enums
    }

    /// Map-entry messages synthesized for map fields anywhere in the file.
    pub fn map_entries(&self) -> Vec<Message<'g>> {
        self.all_messages()
            .into_iter()
            .flat_map(|m| m.map_entries())
            .collect()
    }

    pub fn services(&self) -> Vec<Service<'g>> {
        self.views(&self.file_data().services, Service::new)
    }

    /// Extensions declared at file level.
    pub fn defined_extensions(&self) -> Vec<Extension<'g>> {
        self.views(&self.file_data().extensions, Extension::new)
    }

    /// Declared imports, in declaration order.
    pub fn dependencies(&self) -> Vec<File<'g>> {
        self.views(&self.file_data().dependencies, File::new)
    }

    /// Imports re-exported with `import public`.
    pub fn public_dependencies(&self) -> Vec<File<'g>> {
        self.views(&self.file_data().public_dependencies, File::new)
    }

    /// Files actually referenced by a field, extension or method of this file.
    pub fn imports(&self) -> Vec<File<'g>> {
        let messages = self.all_messages();
        merge_imports(
            messages
                .iter()
                .map(Message::imports)
                .chain(messages.iter().flat_map(|m| m.defined_extensions()).map(|e| e.imports()))
                .chain(self.defined_extensions().iter().map(Extension::imports))
                .chain(self.services().iter().map(Service::imports)),
        )
    }

    /// Declared, non-public imports that nothing in the file references.
    pub fn unused_imports(&self) -> Vec<File<'g>> {
        let used = self.imports();
        let public = &self.file_data().public_dependencies;
        self.dependencies()
            .into_iter()
            .filter(|dep| !public.contains(&dep.id) && !used.contains(dep))
            .collect()
    }

    /// Every file reachable through declared imports, deduplicated.
    pub fn transitive_imports(&self) -> Vec<File<'g>> {
        let mut seen: Vec<EntityId> = Vec::new();
        let mut stack: Vec<EntityId> = self.file_data().dependencies.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if id == self.id || seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if let Some(file) = self.graph.data(id).as_file() {
                stack.extend(file.dependencies.iter().rev().copied());
            }
        }
        self.views(&seen, File::new)
    }

    /// Files importing this one, directly or transitively.
    pub fn dependents(&self) -> Vec<File<'g>> {
        self.views(self.graph.dependents_of(self.id), File::new)
    }

    /// Everything this file references, transitively: imported files, the
    /// types of its file-level extensions, and in turn whatever those
    /// depend on. `dependencies` lists the declared imports only.
    pub fn all_dependencies(&self) -> Vec<AnyEntity<'g>> {
        self.views(self.graph.dependencies_of(self.id), AnyEntity::new)
    }

    /// Innermost declaration of this file whose recorded span covers
    /// `position`. Declarations without source-code-info are never found.
    pub fn entity_at(&self, position: Position) -> Option<AnyEntity<'g>> {
        self.graph
            .entities
            .iter()
            .enumerate()
            .filter(|(_, data)| data.file == self.id && data.parent.is_some())
            .filter_map(|(index, data)| {
                let span = data.info.as_ref()?.span()?;
                span.contains(position).then_some((span, index))
            })
            .max_by_key(|&(span, _)| (span.start, Reverse(span.end)))
            .map(|(_, index)| AnyEntity::new(self.graph, EntityId::new(index)))
    }

    /// Record of the `syntax` statement (the file's own record).
    pub fn syntax_source_code_info(&self) -> Option<&'g SourceCodeInfo> {
        self.file_data().syntax_info.as_ref()
    }

    /// Record of the `package` statement.
    pub fn package_source_code_info(&self) -> Option<&'g SourceCodeInfo> {
        self.file_data().package_info.as_ref()
    }

    pub fn file_options(&self) -> Result<prost_types::FileOptions, OptionError> {
        self.option_payload().standard()
    }

    pub fn deprecated(&self) -> bool {
        self.file_options().is_ok_and(|o| o.deprecated())
    }

    fn views<V>(&self, ids: &[EntityId], make: fn(&'g Graph, EntityId) -> V) -> Vec<V> {
        ids.iter().map(|&id| make(self.graph, id)).collect()
    }
}

/// Files sharing one package name. Not an entity: packages have no FQN entry.
#[derive(Clone, Copy)]
pub struct Package<'g> {
    graph: &'g Graph,
    index: usize,
}

impl<'g> Package<'g> {
    pub(crate) fn new(graph: &'g Graph, index: usize) -> Self {
        Self { graph, index }
    }

    fn data(&self) -> Option<&'g PackageData> {
        self.graph.package_data(self.index)
    }

    /// Dotted package name as declared (`foo.bar`), empty for no package.
    pub fn proto_name(&self) -> &'g str {
        self.data().map_or("", |p| &p.name)
    }

    /// Member files, in load order.
    pub fn files(&self) -> Vec<File<'g>> {
        self.data()
            .map(|p| p.files.iter().map(|&id| File::new(self.graph, id)).collect())
            .unwrap_or_default()
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }
}

impl PartialEq for Package<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.graph, other.graph) && self.index == other.index
    }
}

impl Eq for Package<'_> {}

impl fmt::Debug for Package<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Package").field(&self.proto_name()).finish()
    }
}
