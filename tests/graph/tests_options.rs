//! Options: standard options and custom extensions read from raw payloads.

use protograph::options::{self, OptionsKind};
use protograph::{Entity, OptionError};

use crate::helpers::fixtures::*;
use crate::helpers::graph_helpers::*;

fn table() -> options::Extension<String> {
    options::Extension::string("acme.table", OptionsKind::Message, TABLE_NUMBER)
}

fn sensitive() -> options::Extension<bool> {
    options::Extension::bool("acme.sensitive", OptionsKind::Field, SENSITIVE_NUMBER)
}

#[test]
fn test_standard_options_survive_custom_fields() {
    let graph = build(&options_files());
    let account = graph.message(".acme.Account").unwrap();
    assert!(account.deprecated());
    assert!(account.message_options().unwrap().deprecated());
    assert_eq!(account.option_payload().kind(), OptionsKind::Message);
}

#[test]
fn test_custom_message_option() {
    let graph = build(&options_files());
    let account = graph.message(".acme.Account").unwrap();
    let mut table_name = String::new();
    assert!(account.extension(&table(), &mut table_name).unwrap());
    assert_eq!(table_name, "accounts");
}

#[test]
fn test_custom_field_option() {
    let graph = build(&options_files());
    let mut flag = false;
    let password = graph.field(".acme.Account.password").unwrap();
    assert!(password.extension(&sensitive(), &mut flag).unwrap());
    assert!(flag);
    assert!(!password.deprecated());
}

#[test]
fn test_absent_option_leaves_output_alone() {
    let graph = build(&options_files());
    let name = graph.field(".acme.Account.name").unwrap();
    let mut flag = true;
    assert!(!name.extension(&sensitive(), &mut flag).unwrap());
    assert!(flag);
    assert!(name.option_payload().is_empty());
}

#[test]
fn test_option_on_wrong_entity_kind() {
    let graph = build(&options_files());
    let account = graph.message(".acme.Account").unwrap();
    let mut flag = false;
    let err = account.extension(&sensitive(), &mut flag).unwrap_err();
    assert!(matches!(err, OptionError::ExtendeeMismatch { .. }));
}

#[test]
fn test_option_with_wrong_wire_type() {
    let graph = build(&options_files());
    let account = graph.message(".acme.Account").unwrap();
    let as_number = options::Extension::int64("acme.table", OptionsKind::Message, TABLE_NUMBER);
    let mut out = 0i64;
    let err = account.extension(&as_number, &mut out).unwrap_err();
    assert!(matches!(err, OptionError::WireTypeMismatch { number, .. } if number == TABLE_NUMBER));
    assert_eq!(out, 0);
}

#[test]
fn test_entities_without_options() {
    let graph = build(&kitchen_files());
    let sink = graph.message(".kitchen.Sink").unwrap();
    assert!(!sink.deprecated());
    assert!(!sink.is_map_entry());
    assert_eq!(sink.message_options().unwrap(), prost_types::MessageOptions::default());

    let file = graph.file(KITCHEN).unwrap();
    assert_eq!(file.option_payload().kind(), OptionsKind::File);
    assert!(!file.deprecated());
    let service = graph.service(".kitchen.KitchenService").unwrap();
    assert!(service.service_options().is_ok());
    let value = graph.enum_value(".kitchen.Brand.ACME").unwrap();
    assert_eq!(value.option_payload().kind(), OptionsKind::EnumValue);
}

#[test]
fn test_map_entry_option_is_standard() {
    let graph = build(&kitchen_files());
    let entry = graph.message(".kitchen.Kitchen.CountsEntry").unwrap();
    assert!(entry.message_options().unwrap().map_entry());
}
