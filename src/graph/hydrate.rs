//! Type hydrator.
//!
//! Runs once every file of the batch is registered, so forward references
//! and references into later files resolve. For each field and extension the
//! declared `(type, label, type_name)` becomes a [`FieldType`]; extensions
//! also resolve their extendee, methods their input and output. Each resolved
//! reference records a direct dependency edge between the referencing
//! container and the target.

use tracing::debug;

use crate::base::EntityId;
use crate::descriptor::{FieldDescriptorProto, Label, Type};
use crate::error::GraphError;
use crate::graph::builder::GraphBuilder;
use crate::graph::entity::{EntityKind, KindData};
use crate::graph::field_type::{ElementType, FieldType, ScalarKind};

/// Map entry key and value field numbers.
const MAP_KEY_NUMBER: i32 = 1;
const MAP_VALUE_NUMBER: i32 = 2;

impl GraphBuilder<'_> {
    pub(super) fn hydrate(&mut self) {
        debug!(
            fields = self.pending_fields.len(),
            methods = self.pending_methods.len(),
            "hydrating types"
        );
        // Creation order: a map entry's fields precede the map field using it.
        for id in std::mem::take(&mut self.pending_fields) {
            self.hydrate_field(id);
        }
        for id in std::mem::take(&mut self.pending_methods) {
            self.hydrate_method(id);
        }
    }

    fn hydrate_field(&mut self, id: EntityId) {
        let data = self.graph.data(id);
        let is_extension = data.entity_kind() == EntityKind::Extension;
        let Some(desc) = data.as_field().map(|f| f.descriptor.clone()) else {
            return;
        };

        if is_extension {
            if let Some(extendee) = self.resolve(id, desc.extendee(), EntityKind::Message) {
                if let KindData::Extension(field) = &mut self.graph.data_mut(id).kind {
                    field.extendee = Some(extendee);
                }
                if let KindData::Message(message) = &mut self.graph.data_mut(extendee).kind {
                    message.extensions.push(id);
                }
            }
        }

        let Some(field_type) = self.resolve_field_type(id, &desc) else {
            return;
        };
        if let KindData::Field(field) | KindData::Extension(field) = &mut self.graph.data_mut(id).kind {
            field.field_type = Some(field_type);
        }

        // Map entry fields are accounted for by the map field that owns the
        // entry. The container is a message, or a file for file-level
        // extensions.
        let Some(container) = self.graph.data(id).parent else {
            return;
        };
        if self.graph.data(container).is_map_entry() {
            return;
        }
        if let Some(target) = field_type.reference() {
            self.add_edge(container, target);
        }
    }

    fn resolve_field_type(&mut self, id: EntityId, desc: &FieldDescriptorProto) -> Option<FieldType> {
        let element = self.resolve_element(id, desc)?;
        if desc.label() != Label::Repeated {
            return Some(element.into());
        }
        match element {
            ElementType::Embedded(target) if self.graph.data(target).is_map_entry() => {
                self.map_type(id, target)
            }
            _ => Some(FieldType::Repeated(element)),
        }
    }

    fn resolve_element(&mut self, id: EntityId, desc: &FieldDescriptorProto) -> Option<ElementType> {
        match desc.r#type() {
            Type::Group => {
                let field = self.graph.data(id).fqn.to_string();
                self.report(GraphError::UnsupportedGroup { field }, Some(id));
                None
            }
            Type::Message => self
                .resolve(id, desc.type_name(), EntityKind::Message)
                .map(ElementType::Embedded),
            Type::Enum => self
                .resolve(id, desc.type_name(), EntityKind::Enum)
                .map(ElementType::Enum),
            scalar => ScalarKind::from_proto(scalar).map(ElementType::Scalar),
        }
    }

    /// Key and value types of a map field, read from the entry's already
    /// hydrated fields.
    fn map_type(&mut self, id: EntityId, entry: EntityId) -> Option<FieldType> {
        let slot = |number: i32| -> Option<Option<FieldType>> {
            let KindData::Message(message) = &self.graph.data(entry).kind else {
                return None;
            };
            message
                .fields
                .iter()
                .filter_map(|&f| self.graph.data(f).as_field())
                .find(|f| f.descriptor.number() == number)
                .map(|f| f.field_type)
        };
        let (key, value) = (slot(MAP_KEY_NUMBER), slot(MAP_VALUE_NUMBER));
        match (key, value) {
            (Some(Some(FieldType::Scalar(key))), Some(Some(value))) => {
                let value = value.as_element()?;
                Some(FieldType::Map { key, value })
            }
            // The entry's own field failed and was reported already.
            (Some(None), _) | (_, Some(None)) => None,
            _ => {
                let entry = self.graph.data(entry).fqn.to_string();
                self.report(
                    GraphError::malformed(format!("map entry {entry} lacks a scalar key or a value")),
                    Some(id),
                );
                None
            }
        }
    }

    fn hydrate_method(&mut self, id: EntityId) {
        let KindData::Method(method) = &self.graph.data(id).kind else {
            return;
        };
        let input_type = method.descriptor.input_type().to_string();
        let output_type = method.descriptor.output_type().to_string();

        let input = self.resolve(id, &input_type, EntityKind::Message);
        let output = self.resolve(id, &output_type, EntityKind::Message);
        if let KindData::Method(method) = &mut self.graph.data_mut(id).kind {
            method.input = input;
            method.output = output;
        }

        if let Some(service) = self.graph.data(id).parent {
            for target in input.into_iter().chain(output) {
                self.add_edge(service, target);
            }
        }
    }

    /// Look up `type_name` as an entity of `kind`; report it if absent.
    fn resolve(&mut self, referrer: EntityId, type_name: &str, kind: EntityKind) -> Option<EntityId> {
        let found = self
            .graph
            .lookup
            .get(type_name)
            .copied()
            .filter(|&target| self.graph.data(target).entity_kind() == kind);
        if found.is_none() {
            let referrer_fqn = self.graph.data(referrer).fqn.to_string();
            self.report(
                GraphError::UnresolvedType {
                    referrer: referrer_fqn,
                    type_name: type_name.to_string(),
                },
                Some(referrer),
            );
        }
        found
    }

    /// Record that `source` (a message, service or file) uses `target`.
    ///
    /// The target learns `source` as a dependent and `source` learns the
    /// target as a dependency, so the two relations stay inverse.
    fn add_edge(&mut self, source: EntityId, target: EntityId) {
        let target_data = self.graph.data_mut(target);
        if !target_data.dependents.contains(&source) {
            target_data.dependents.push(source);
        }
        let source_data = self.graph.data_mut(source);
        if !source_data.dependencies.contains(&target) {
            source_data.dependencies.push(target);
        }
    }
}
