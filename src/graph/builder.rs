//! Graph builder.
//!
//! One [`GraphBuilder`] session turns a batch of file descriptors into a
//! [`Graph`]:
//!
//! 1. every file is walked once in load order, instantiating its entities in
//!    the arena and registering each under its FQN;
//! 2. the type hydrator resolves field, extension and method references
//!    (see `hydrate`);
//! 3. source-code-info records are attached;
//! 4. optionally, every dependency closure is computed up front.
//!
//! Problems are reported to the injected [`DiagnosticSink`] and building
//! carries on; the caller decides what a failed sink means.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

use crate::base::{EntityId, MAX_ENTITIES};
use crate::config::Parameters;
use crate::descriptor::{
    CodeGeneratorRequest, DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto,
    FieldDescriptorProto, FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto,
    OneofDescriptorProto, ServiceDescriptorProto, Version,
};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::GraphError;
use crate::graph::Graph;
use crate::graph::entity::{
    EntityData, EnumData, EnumValueData, FieldData, FileData, KindData, MessageData, MethodData,
    OneOfData, PackageData, ServiceData, Syntax,
};
use crate::graph::names;
use crate::options::{OptionPayload, OptionsKind};

/// A single graph construction session.
pub struct GraphBuilder<'s> {
    sink: &'s mut dyn DiagnosticSink,
    pub(super) graph: Graph,
    index_dependents: bool,
    /// Fields and extensions awaiting type resolution, in creation order.
    pub(super) pending_fields: Vec<EntityId>,
    pub(super) pending_methods: Vec<EntityId>,
}

impl<'s> GraphBuilder<'s> {
    pub fn new(sink: &'s mut dyn DiagnosticSink) -> Self {
        Self {
            sink,
            graph: Graph::default(),
            index_dependents: false,
            pending_fields: Vec::new(),
            pending_methods: Vec::new(),
        }
    }

    /// Compute every dependents/dependencies closure during construction
    /// instead of lazily on first access.
    pub fn index_dependents(mut self, eager: bool) -> Self {
        self.index_dependents = eager;
        self
    }

    /// Parameters to hand to consumers through [`Graph::parameters`].
    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.graph.parameters = parameters;
        self
    }

    pub fn compiler_version(mut self, version: Option<Version>) -> Self {
        self.graph.compiler_version = version;
        self
    }

    // ========================================================================
    // ENTRY POINTS
    // ========================================================================

    /// Build from files already in dependency order. `targets` lists the
    /// input paths requested for generation.
    pub fn build_files<S: AsRef<str>>(self, files: &[FileDescriptorProto], targets: &[S]) -> Graph {
        let targets: Vec<&str> = targets.iter().map(AsRef::as_ref).collect();
        self.build(files.iter().collect(), &targets)
    }

    /// Build from a host request: its files, its generation targets, its
    /// parameter string and compiler version.
    pub fn build_request(self, request: &CodeGeneratorRequest) -> Graph {
        self.parameters(Parameters::parse(request.parameter()))
            .compiler_version(request.compiler_version.clone())
            .build_files(&request.proto_file, &request.file_to_generate)
    }

    /// Build from a bare descriptor set. Files may come in any order and all
    /// of them are build targets.
    pub fn build_descriptor_set(self, set: &FileDescriptorSet) -> Graph {
        let files: Vec<&FileDescriptorProto> = topological_order(&set.file)
            .into_iter()
            .map(|index| &set.file[index])
            .collect();
        let targets: Vec<&str> = files.iter().map(|file| file.name()).collect();
        self.build(files, &targets)
    }

    fn build(mut self, files: Vec<&FileDescriptorProto>, targets: &[&str]) -> Graph {
        debug!(files = files.len(), targets = targets.len(), "building graph");
        let wanted: FxHashSet<&str> = targets.iter().copied().collect();

        let ids: Vec<Option<EntityId>> = files
            .iter()
            .map(|file| self.add_file(file, wanted.contains(file.name())))
            .collect();

        for &target in targets {
            let file = self
                .graph
                .lookup
                .get(target)
                .copied()
                .filter(|&id| self.graph.data(id).as_file().is_some());
            match file {
                Some(id) => {
                    let path = self.graph.data(id).fqn.clone();
                    self.graph.targets.insert(path, id);
                }
                None => self.report(GraphError::UnknownEntity(target.to_string()), None),
            }
        }

        self.hydrate();

        debug!("attaching source info");
        for (file, id) in files.iter().zip(ids) {
            if let (Some(id), Some(info)) = (id, &file.source_code_info) {
                self.graph.attach_source_info(id, info);
            }
        }

        if self.index_dependents {
            self.graph.index_dependents();
        }
        debug!(entities = self.graph.len(), "graph built");
        self.graph
    }

    // ========================================================================
    // FILES
    // ========================================================================

    fn add_file(&mut self, desc: &FileDescriptorProto, build_target: bool) -> Option<EntityId> {
        let path = desc.name();
        if path.is_empty() {
            self.report(GraphError::malformed("file descriptor without a name"), None);
            return None;
        }
        debug!(file = path, build_target, "loading file");
        if self.graph.entities.len().saturating_add(entity_count(desc)) > MAX_ENTITIES {
            self.report(
                GraphError::malformed(format!("{path} does not fit in the entity arena")),
                None,
            );
            return None;
        }

        let data = FileData {
            syntax: Syntax::from_proto(desc.syntax()),
            build_target,
            ..FileData::default()
        };
        let id = self.next_id();
        self.push(EntityData::new(
            path,
            path,
            None,
            id,
            OptionPayload::new(OptionsKind::File, desc.options.clone()),
            KindData::File(data),
        ));
        if !self.register(id) {
            return None;
        }
        self.graph.files.push(id);
        let package = self.join_package(desc.package(), id);

        let mut dependencies = Vec::with_capacity(desc.dependency.len());
        for dependency in &desc.dependency {
            match self.loaded_file(dependency) {
                Some(dep) => {
                    dependencies.push(dep);
                    let importers = &mut self.graph.data_mut(dep).dependents;
                    if !importers.contains(&id) {
                        importers.push(id);
                    }
                    let imported = &mut self.graph.data_mut(id).dependencies;
                    if !imported.contains(&dep) {
                        imported.push(dep);
                    }
                }
                None => self.report(
                    GraphError::MissingDependency {
                        file: path.to_string(),
                        dependency: dependency.clone(),
                    },
                    Some(id),
                ),
            }
        }

        let mut public_dependencies = Vec::with_capacity(desc.public_dependency.len());
        for &index in &desc.public_dependency {
            let dependency = usize::try_from(index)
                .ok()
                .and_then(|index| desc.dependency.get(index));
            match dependency {
                Some(name) => public_dependencies.extend(self.loaded_file(name)),
                None => self.report(
                    GraphError::malformed(format!("public dependency index {index} out of range")),
                    Some(id),
                ),
            }
        }

        let namespace = names::file_namespace(desc.package());
        let messages = desc
            .message_type
            .iter()
            .map(|m| self.add_message(m, id, id, &namespace))
            .collect();
        let enums = desc
            .enum_type
            .iter()
            .map(|e| self.add_enum(e, id, id, &namespace))
            .collect();
        let services = desc
            .service
            .iter()
            .map(|s| self.add_service(s, id, &namespace))
            .collect();
        let extensions = desc
            .extension
            .iter()
            .map(|e| self.add_field(e, id, id, &namespace, &[], true))
            .collect();

        if let KindData::File(file) = &mut self.graph.data_mut(id).kind {
            file.package = package;
            file.dependencies = dependencies;
            file.public_dependencies = public_dependencies;
            file.messages = messages;
            file.enums = enums;
            file.services = services;
            file.extensions = extensions;
        }
        Some(id)
    }

    /// Package table index for `name`, creating the package on first use.
    fn join_package(&mut self, name: &str, file: EntityId) -> usize {
        let entry = self.graph.packages.entry(name.into());
        let index = entry.index();
        entry
            .or_insert_with(|| PackageData {
                name: name.into(),
                files: Vec::new(),
            })
            .files
            .push(file);
        index
    }

    fn loaded_file(&self, path: &str) -> Option<EntityId> {
        self.graph
            .lookup
            .get(path)
            .copied()
            .filter(|&id| self.graph.data(id).as_file().is_some())
    }

    // ========================================================================
    // DECLARATIONS
    // ========================================================================

    fn add_message(
        &mut self,
        desc: &DescriptorProto,
        parent: EntityId,
        file: EntityId,
        namespace: &str,
    ) -> EntityId {
        let fqn = names::qualify(namespace, desc.name());
        let options = OptionPayload::new(OptionsKind::Message, desc.options.clone());
        let map_entry = options
            .standard::<prost_types::MessageOptions>()
            .map(|o| o.map_entry());
        let id = self.push(EntityData::new(
            desc.name(),
            fqn.as_str(),
            Some(parent),
            file,
            options,
            KindData::Message(MessageData::default()),
        ));
        let map_entry = match map_entry {
            Ok(map_entry) => map_entry,
            Err(err) => {
                self.report(GraphError::malformed(err.to_string()), Some(id));
                false
            }
        };
        if !self.register(id) {
            return id;
        }

        let enums = desc
            .enum_type
            .iter()
            .map(|e| self.add_enum(e, id, file, &fqn))
            .collect();
        let messages = desc
            .nested_type
            .iter()
            .map(|m| self.add_message(m, id, file, &fqn))
            .collect();
        let oneofs: Vec<EntityId> = desc
            .oneof_decl
            .iter()
            .map(|o| self.add_oneof(o, id, file, &fqn))
            .collect();
        let fields = desc
            .field
            .iter()
            .map(|f| self.add_field(f, id, file, &fqn, &oneofs, false))
            .collect();
        let defined_extensions = desc
            .extension
            .iter()
            .map(|e| self.add_field(e, id, file, &fqn, &[], true))
            .collect();

        if let KindData::Message(message) = &mut self.graph.data_mut(id).kind {
            message.enums = enums;
            message.messages = messages;
            message.oneofs = oneofs;
            message.fields = fields;
            message.defined_extensions = defined_extensions;
            message.map_entry = map_entry;
        }
        id
    }

    /// Add a field (`extension == false`) or an extension.
    fn add_field(
        &mut self,
        desc: &FieldDescriptorProto,
        parent: EntityId,
        file: EntityId,
        namespace: &str,
        oneofs: &[EntityId],
        extension: bool,
    ) -> EntityId {
        let id = self.next_id();
        let mut data = FieldData::new(desc.clone());
        if let Some(index) = desc.oneof_index {
            match usize::try_from(index).ok().and_then(|i| oneofs.get(i)) {
                Some(&oneof) => {
                    data.oneof = Some(oneof);
                    if let KindData::OneOf(group) = &mut self.graph.data_mut(oneof).kind {
                        group.fields.push(id);
                    }
                }
                None => self.report(
                    GraphError::malformed(format!(
                        "oneof index {index} of field {} out of range",
                        names::qualify(namespace, desc.name())
                    )),
                    Some(parent),
                ),
            }
        }

        let kind = if extension {
            KindData::Extension(data)
        } else {
            KindData::Field(data)
        };
        self.push(EntityData::new(
            desc.name(),
            names::qualify(namespace, desc.name()),
            Some(parent),
            file,
            OptionPayload::new(OptionsKind::Field, desc.options.clone()),
            kind,
        ));
        if self.register(id) {
            self.pending_fields.push(id);
        }
        id
    }

    fn add_oneof(
        &mut self,
        desc: &OneofDescriptorProto,
        parent: EntityId,
        file: EntityId,
        namespace: &str,
    ) -> EntityId {
        let id = self.push(EntityData::new(
            desc.name(),
            names::qualify(namespace, desc.name()),
            Some(parent),
            file,
            OptionPayload::new(OptionsKind::OneOf, desc.options.clone()),
            KindData::OneOf(OneOfData::default()),
        ));
        self.register(id);
        id
    }

    fn add_enum(
        &mut self,
        desc: &EnumDescriptorProto,
        parent: EntityId,
        file: EntityId,
        namespace: &str,
    ) -> EntityId {
        let fqn = names::qualify(namespace, desc.name());
        let id = self.push(EntityData::new(
            desc.name(),
            fqn.as_str(),
            Some(parent),
            file,
            OptionPayload::new(OptionsKind::Enum, desc.options.clone()),
            KindData::Enum(EnumData::default()),
        ));
        if !self.register(id) {
            return id;
        }
        let values = desc
            .value
            .iter()
            .map(|v| self.add_enum_value(v, id, file, &fqn))
            .collect();
        if let KindData::Enum(data) = &mut self.graph.data_mut(id).kind {
            data.values = values;
        }
        id
    }

    /// Values are qualified against their enum's FQN.
    fn add_enum_value(
        &mut self,
        desc: &EnumValueDescriptorProto,
        parent: EntityId,
        file: EntityId,
        enum_fqn: &str,
    ) -> EntityId {
        let id = self.push(EntityData::new(
            desc.name(),
            names::qualify(enum_fqn, desc.name()),
            Some(parent),
            file,
            OptionPayload::new(OptionsKind::EnumValue, desc.options.clone()),
            KindData::EnumValue(EnumValueData {
                number: desc.number(),
            }),
        ));
        self.register(id);
        id
    }

    fn add_service(&mut self, desc: &ServiceDescriptorProto, file: EntityId, namespace: &str) -> EntityId {
        let fqn = names::qualify(namespace, desc.name());
        let id = self.push(EntityData::new(
            desc.name(),
            fqn.as_str(),
            Some(file),
            file,
            OptionPayload::new(OptionsKind::Service, desc.options.clone()),
            KindData::Service(ServiceData::default()),
        ));
        if !self.register(id) {
            return id;
        }
        let methods = desc
            .method
            .iter()
            .map(|m| self.add_method(m, id, file, &fqn))
            .collect();
        if let KindData::Service(data) = &mut self.graph.data_mut(id).kind {
            data.methods = methods;
        }
        id
    }

    fn add_method(
        &mut self,
        desc: &MethodDescriptorProto,
        service: EntityId,
        file: EntityId,
        namespace: &str,
    ) -> EntityId {
        let id = self.push(EntityData::new(
            desc.name(),
            names::qualify(namespace, desc.name()),
            Some(service),
            file,
            OptionPayload::new(OptionsKind::Method, desc.options.clone()),
            KindData::Method(MethodData {
                descriptor: desc.clone(),
                input: None,
                output: None,
            }),
        ));
        if self.register(id) {
            self.pending_methods.push(id);
        }
        id
    }

    // ========================================================================
    // ARENA
    // ========================================================================

    fn next_id(&self) -> EntityId {
        EntityId::new(self.graph.entities.len())
    }

    fn push(&mut self, data: EntityData) -> EntityId {
        let id = self.next_id();
        self.graph.entities.push(data);
        id
    }

    /// Register `id` under its FQN. A name already taken is reported and the
    /// entity stays out of the lookup table.
    fn register(&mut self, id: EntityId) -> bool {
        let data = self.graph.data(id);
        let fqn = data.fqn.clone();
        if self.graph.lookup.contains_key(&fqn) {
            self.report(
                GraphError::DuplicateName {
                    fqn: fqn.to_string(),
                },
                Some(id),
            );
            return false;
        }
        trace!(fqn = %fqn, kind = data.entity_kind().display(), "registered entity");
        self.graph.lookup.insert(fqn, id);
        true
    }

    /// Forward an error to the sink, tagged with the entity it concerns.
    pub(super) fn report(&mut self, err: GraphError, at: Option<EntityId>) {
        let mut diagnostic = Diagnostic::from(err);
        if let Some(id) = at {
            let data = self.graph.data(id);
            diagnostic = diagnostic
                .with_file(self.graph.data(data.file).fqn.clone())
                .with_entity(data.fqn.clone());
        }
        self.sink.report(diagnostic);
    }
}

/// Indexes of `files` ordered so that every file comes after the files it
/// imports. Imports outside the set are ignored here and reported when the
/// importing file is loaded. Import cycles are broken at the first file seen.
/// Number of arena slots a file descriptor occupies once built.
pub(super) fn entity_count(file: &FileDescriptorProto) -> usize {
    fn enum_count(desc: &EnumDescriptorProto) -> usize {
        1 + desc.value.len()
    }
    fn message_count(desc: &DescriptorProto) -> usize {
        1 + desc.field.len()
            + desc.oneof_decl.len()
            + desc.extension.len()
            + desc.enum_type.iter().map(enum_count).sum::<usize>()
            + desc.nested_type.iter().map(message_count).sum::<usize>()
    }
    1 + file.extension.len()
        + file.message_type.iter().map(message_count).sum::<usize>()
        + file.enum_type.iter().map(enum_count).sum::<usize>()
        + file.service.iter().map(|s| 1 + s.method.len()).sum::<usize>()
}

fn topological_order(files: &[FileDescriptorProto]) -> Vec<usize> {
    let by_name: FxHashMap<&str, usize> = files
        .iter()
        .enumerate()
        .map(|(index, file)| (file.name(), index))
        .collect();
    let mut visited = vec![false; files.len()];
    let mut order = Vec::with_capacity(files.len());

    for root in 0..files.len() {
        // Explicit stack of (file, next dependency to look at).
        let mut stack = vec![(root, 0usize)];
        while let Some((index, next)) = stack.pop() {
            if next == 0 {
                if visited[index] {
                    continue;
                }
                visited[index] = true;
            }
            let unvisited = files[index].dependency[next..]
                .iter()
                .position(|dep| by_name.get(dep.as_str()).is_some_and(|&d| !visited[d]));
            match unvisited {
                Some(offset) => {
                    let dep = &files[index].dependency[next + offset];
                    stack.push((index, next + offset + 1));
                    if let Some(&d) = by_name.get(dep.as_str()) {
                        stack.push((d, 0));
                    }
                }
                None => order.push(index),
            }
        }
    }
    order
}

/// Build a graph from a host request.
pub fn process_code_generator_request(
    sink: &mut dyn DiagnosticSink,
    request: &CodeGeneratorRequest,
) -> Graph {
    GraphBuilder::new(sink).build_request(request)
}

/// Build a graph from a bare descriptor set; every file is a build target.
pub fn process_file_descriptor_set(sink: &mut dyn DiagnosticSink, set: &FileDescriptorSet) -> Graph {
    GraphBuilder::new(sink).build_descriptor_set(set)
}
