use super::{AnyEntity, Entity, Enum, Extension, Field, File, OneOf, entity_view, merge_imports};
use crate::error::OptionError;
use crate::graph::entity::{EMPTY_MESSAGE, MessageData};
use crate::graph::wkt::{WELL_KNOWN_TYPE_PACKAGE, WellKnownType};

entity_view! {
    /// A message type.
    Message
}

impl<'g> Message<'g> {
    pub(crate) fn message_data(&self) -> &'g MessageData {
        self.graph.data(self.id).as_message().unwrap_or(&EMPTY_MESSAGE)
    }

    /// Directly nested messages, map entries excluded.
    pub fn messages(&self) -> Vec<Message<'g>> {
        self.nested(false)
    }

    /// Every message nested below this one, in pre-order, map entries
    /// excluded.
    pub fn all_messages(&self) -> Vec<Message<'g>> {
        let mut all = Vec::new();
        for message in self.messages() {
            all.push(message);
            all.extend(message.all_messages());
        }
        all
    }

    /// Synthesized map-entry messages of this message's map fields.
    pub fn map_entries(&self) -> Vec<Message<'g>> {
        self.nested(true)
    }

    pub fn enums(&self) -> Vec<Enum<'g>> {
        self.message_data()
            .enums
            .iter()
            .map(|&id| Enum::new(self.graph, id))
            .collect()
    }

    /// Enums of this message and of every message nested below it.
    pub fn all_enums(&self) -> Vec<Enum<'g>> {
        let mut enums = self.enums();
        for message in self.messages() {
            enums.extend(message.all_enums());
        }
        enums
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> Vec<Field<'g>> {
        self.message_data()
            .fields
            .iter()
            .map(|&id| Field::new(self.graph, id))
            .collect()
    }

    /// Fields outside any real oneof (proto3 `optional` fields included).
    pub fn non_oneof_fields(&self) -> Vec<Field<'g>> {
        self.fields().into_iter().filter(|f| !f.in_real_oneof()).collect()
    }

    /// Fields inside a real oneof.
    pub fn oneof_fields(&self) -> Vec<Field<'g>> {
        self.fields().into_iter().filter(|f| f.in_real_oneof()).collect()
    }

    pub fn oneofs(&self) -> Vec<OneOf<'g>> {
        self.message_data()
            .oneofs
            .iter()
            .map(|&id| OneOf::new(self.graph, id))
            .collect()
    }

    /// Oneofs declared by the user.
    pub fn real_oneofs(&self) -> Vec<OneOf<'g>> {
        self.oneofs().into_iter().filter(|o| !o.is_synthetic()).collect()
    }

    /// Oneofs the compiler synthesized for proto3 `optional` fields.
    pub fn synthetic_oneofs(&self) -> Vec<OneOf<'g>> {
        self.oneofs().into_iter().filter(OneOf::is_synthetic).collect()
    }

    /// Extensions declared inside this message's body.
    pub fn defined_extensions(&self) -> Vec<Extension<'g>> {
        self.message_data()
            .defined_extensions
            .iter()
            .map(|&id| Extension::new(self.graph, id))
            .collect()
    }

    /// Extensions, declared anywhere in the graph, that extend this message.
    pub fn extensions(&self) -> Vec<Extension<'g>> {
        self.message_data()
            .extensions
            .iter()
            .map(|&id| Extension::new(self.graph, id))
            .collect()
    }

    pub fn is_map_entry(&self) -> bool {
        self.message_data().map_entry
    }

    pub fn is_well_known(&self) -> bool {
        self.well_known_type().is_some()
    }

    /// Well-known type this message is, judged by package and name.
    pub fn well_known_type(&self) -> Option<WellKnownType> {
        if self.package().proto_name() != WELL_KNOWN_TYPE_PACKAGE {
            return None;
        }
        WellKnownType::lookup(self.name())
    }

    /// Files (other than its own) that this message's fields reference.
    pub fn imports(&self) -> Vec<File<'g>> {
        merge_imports(self.fields().iter().map(Field::imports))
    }

    /// Every entity that depends on this message, directly or transitively.
    pub fn dependents(&self) -> Vec<AnyEntity<'g>> {
        self.graph
            .dependents_of(self.id)
            .iter()
            .map(|&id| AnyEntity::new(self.graph, id))
            .collect()
    }

    /// Every message and enum this message's fields use (singular, repeated
    /// or as map value), transitively. The inverse of `dependents`.
    pub fn dependencies(&self) -> Vec<AnyEntity<'g>> {
        self.graph
            .dependencies_of(self.id)
            .iter()
            .map(|&id| AnyEntity::new(self.graph, id))
            .collect()
    }

    pub fn message_options(&self) -> Result<prost_types::MessageOptions, OptionError> {
        self.option_payload().standard()
    }

    pub fn deprecated(&self) -> bool {
        self.message_options().is_ok_and(|o| o.deprecated())
    }

    fn nested(&self, map_entries: bool) -> Vec<Message<'g>> {
        self.message_data()
            .messages
            .iter()
            .filter(|&&id| self.graph.data(id).is_map_entry() == map_entries)
            .map(|&id| Message::new(self.graph, id))
            .collect()
    }
}
