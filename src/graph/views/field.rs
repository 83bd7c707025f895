use super::{AnyEntity, Entity, Enum, File, Message, entity_view, import_files};
use crate::descriptor::{FieldDescriptorProto, Label, Type};
use crate::error::OptionError;
use crate::graph::entity::{EMPTY_FIELD, EMPTY_IDS, FieldData, KindData, Syntax};
use crate::graph::field_type::FieldType;

entity_view! {
    /// A field of a message.
    Field
}

entity_view! {
    /// An extension field, declared in a file or message body.
    Extension
}

entity_view! {
    /// A oneof group of a message.
    OneOf
}

/// Accessors shared by fields and extensions.
macro_rules! field_accessors {
    ($view:ident) => {
        impl<'g> $view<'g> {
            pub(crate) fn field_data(&self) -> &'g FieldData {
                self.graph.data(self.id).as_field().unwrap_or(&EMPTY_FIELD)
            }

            /// The raw descriptor of the declaration.
            pub fn descriptor(&self) -> &'g FieldDescriptorProto {
                &self.field_data().descriptor
            }

            pub fn number(&self) -> i32 {
                self.descriptor().number()
            }

            pub fn label(&self) -> Label {
                self.descriptor().label()
            }

            /// Declared wire type.
            pub fn proto_type(&self) -> Type {
                self.descriptor().r#type()
            }

            /// Declared type name for message and enum fields (`.pkg.Foo`).
            pub fn type_name(&self) -> &'g str {
                self.descriptor().type_name()
            }

            pub fn json_name(&self) -> &'g str {
                self.descriptor().json_name()
            }

            pub fn default_value(&self) -> Option<&'g str> {
                self.descriptor().default_value.as_deref()
            }

            /// Resolved type; `None` only if hydration failed for this field.
            pub fn field_type(&self) -> Option<FieldType> {
                self.field_data().field_type
            }

            /// Embedded message of a singular message field.
            pub fn embed(&self) -> Option<Message<'g>> {
                match self.field_type()? {
                    FieldType::Embedded(id) => Some(Message::new(self.graph, id)),
                    _ => None,
                }
            }

            /// Enum of a singular enum field.
            pub fn enumeration(&self) -> Option<Enum<'g>> {
                match self.field_type()? {
                    FieldType::Enum(id) => Some(Enum::new(self.graph, id)),
                    _ => None,
                }
            }

            /// Message or enum the field ultimately carries: the singular type,
            /// the repeated element or the map value.
            pub fn referenced_type(&self) -> Option<AnyEntity<'g>> {
                self.field_type()?
                    .reference()
                    .map(|id| AnyEntity::new(self.graph, id))
            }

            /// `required` label in a proto2 file.
            pub fn required(&self) -> bool {
                self.syntax() == Syntax::Proto2 && self.label() == Label::Required
            }

            /// Whether the field was declared with the `optional` keyword.
            pub fn has_optional_keyword(&self) -> bool {
                if self.syntax() == Syntax::Proto3 {
                    return self.descriptor().proto3_optional();
                }
                self.label() == Label::Optional
            }

            pub fn field_options(&self) -> Result<prost_types::FieldOptions, OptionError> {
                self.option_payload().standard()
            }

            pub fn deprecated(&self) -> bool {
                self.field_options().is_ok_and(|o| o.deprecated())
            }

            /// The `packed` option, when set explicitly.
            pub fn packed(&self) -> Option<bool> {
                self.field_options().ok()?.packed
            }
        }
    };
}

field_accessors!(Field);
field_accessors!(Extension);

impl<'g> Field<'g> {
    /// Message the field belongs to.
    pub fn message(&self) -> Option<Message<'g>> {
        self.parent()?.as_message()
    }

    /// Oneof the field belongs to, synthetic ones included.
    pub fn oneof(&self) -> Option<OneOf<'g>> {
        self.field_data().oneof.map(|id| OneOf::new(self.graph, id))
    }

    pub fn in_oneof(&self) -> bool {
        self.field_data().oneof.is_some()
    }

    /// In a oneof the user declared (not a proto3 `optional` wrapper).
    pub fn in_real_oneof(&self) -> bool {
        self.in_oneof() && !self.descriptor().proto3_optional()
    }

    /// Whether the field tracks presence separately from its value.
    pub fn has_presence(&self) -> bool {
        if self.in_oneof() {
            return true;
        }
        match self.field_type() {
            Some(FieldType::Embedded(_)) => true,
            Some(FieldType::Repeated(_) | FieldType::Map { .. }) => false,
            _ if self.syntax() == Syntax::Proto3 => self.descriptor().proto3_optional(),
            _ => true,
        }
    }

    /// The file of the referenced type, if it is not this field's file.
    pub fn imports(&self) -> Vec<File<'g>> {
        let own = self.graph.data(self.id).file;
        import_files(self.graph, own, self.field_type().and_then(|t| t.reference()))
    }
}

impl<'g> Extension<'g> {
    /// Message or file the extension is declared in.
    pub fn defined_in(&self) -> Option<AnyEntity<'g>> {
        self.parent()
    }

    /// Message being extended.
    pub fn extendee(&self) -> Option<Message<'g>> {
        self.field_data()
            .extendee
            .map(|id| Message::new(self.graph, id))
    }

    /// Files of the extended message and of the referenced type, if they are
    /// not this extension's file.
    pub fn imports(&self) -> Vec<File<'g>> {
        let own = self.graph.data(self.id).file;
        let data = self.field_data();
        let targets = data
            .extendee
            .into_iter()
            .chain(data.field_type.and_then(|t| t.reference()));
        import_files(self.graph, own, targets)
    }
}

impl<'g> OneOf<'g> {
    fn field_ids(&self) -> &'g [crate::base::EntityId] {
        match &self.graph.data(self.id).kind {
            KindData::OneOf(oneof) => &oneof.fields,
            _ => &EMPTY_IDS,
        }
    }

    /// Message the oneof belongs to.
    pub fn message(&self) -> Option<Message<'g>> {
        self.parent()?.as_message()
    }

    /// Member fields in declaration order.
    pub fn fields(&self) -> Vec<Field<'g>> {
        self.field_ids()
            .iter()
            .map(|&id| Field::new(self.graph, id))
            .collect()
    }

    /// Exists only to carry a single proto3 `optional` field.
    pub fn is_synthetic(&self) -> bool {
        let fields = self.fields();
        !fields.is_empty() && fields.iter().all(|f| f.descriptor().proto3_optional())
    }

    pub fn oneof_options(&self) -> Result<prost_types::OneofOptions, OptionError> {
        self.option_payload().standard()
    }
}
