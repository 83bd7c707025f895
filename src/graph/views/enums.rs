use super::{AnyEntity, Entity, File, Message, entity_view};
use crate::error::OptionError;
use crate::graph::entity::{EMPTY_IDS, KindData};

entity_view! {
    /// An enum type.
    Enum
}

entity_view! {
    /// A value of an enum.
    EnumValue
}

impl<'g> Enum<'g> {
    /// Values in declaration order.
    pub fn values(&self) -> Vec<EnumValue<'g>> {
        let ids = match &self.graph.data(self.id).kind {
            KindData::Enum(data) => &data.values,
            _ => &EMPTY_IDS,
        };
        ids.iter().map(|&id| EnumValue::new(self.graph, id)).collect()
    }

    /// Message the enum is nested in, if any.
    pub fn message(&self) -> Option<Message<'g>> {
        self.parent()?.as_message()
    }

    /// Enums reference nothing, so they never import anything.
    pub fn imports(&self) -> Vec<File<'g>> {
        Vec::new()
    }

    /// Entities depending on this enum: every direct user and its
    /// dependents, plus the enum's parent (message or file) and everything
    /// depending on that parent.
    pub fn dependents(&self) -> Vec<AnyEntity<'g>> {
        self.graph
            .dependents_of(self.id)
            .iter()
            .map(|&id| AnyEntity::new(self.graph, id))
            .collect()
    }

    /// Types this enum uses. Enum values carry no type, so this is empty.
    pub fn dependencies(&self) -> Vec<AnyEntity<'g>> {
        self.graph
            .dependencies_of(self.id)
            .iter()
            .map(|&id| AnyEntity::new(self.graph, id))
            .collect()
    }

    pub fn enum_options(&self) -> Result<prost_types::EnumOptions, OptionError> {
        self.option_payload().standard()
    }

    pub fn deprecated(&self) -> bool {
        self.enum_options().is_ok_and(|o| o.deprecated())
    }
}

impl<'g> EnumValue<'g> {
    pub fn number(&self) -> i32 {
        match self.graph.data(self.id).kind {
            KindData::EnumValue(ref data) => data.number,
            _ => 0,
        }
    }

    /// Enum the value belongs to.
    pub fn enumeration(&self) -> Option<Enum<'g>> {
        self.parent()?.as_enum()
    }

    pub fn enum_value_options(&self) -> Result<prost_types::EnumValueOptions, OptionError> {
        self.option_payload().standard()
    }

    pub fn deprecated(&self) -> bool {
        self.enum_value_options().is_ok_and(|o| o.deprecated())
    }
}
