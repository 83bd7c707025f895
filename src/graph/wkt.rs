//! Well-known types of the `google.protobuf` package.

/// Package that holds the well-known types.
pub const WELL_KNOWN_TYPE_PACKAGE: &str = "google.protobuf";

/// A message from the well-known type set that generators usually special-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownType {
    Any,
    Duration,
    Empty,
    Struct,
    Timestamp,
    Value,
    ListValue,
    DoubleValue,
    FloatValue,
    Int64Value,
    UInt64Value,
    Int32Value,
    UInt32Value,
    BoolValue,
    StringValue,
    BytesValue,
}

impl WellKnownType {
    /// Look up a well-known type by its local message name.
    pub fn lookup(name: &str) -> Option<Self> {
        Some(match name {
            "Any" => WellKnownType::Any,
            "Duration" => WellKnownType::Duration,
            "Empty" => WellKnownType::Empty,
            "Struct" => WellKnownType::Struct,
            "Timestamp" => WellKnownType::Timestamp,
            "Value" => WellKnownType::Value,
            "ListValue" => WellKnownType::ListValue,
            "DoubleValue" => WellKnownType::DoubleValue,
            "FloatValue" => WellKnownType::FloatValue,
            "Int64Value" => WellKnownType::Int64Value,
            "UInt64Value" => WellKnownType::UInt64Value,
            "Int32Value" => WellKnownType::Int32Value,
            "UInt32Value" => WellKnownType::UInt32Value,
            "BoolValue" => WellKnownType::BoolValue,
            "StringValue" => WellKnownType::StringValue,
            "BytesValue" => WellKnownType::BytesValue,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            WellKnownType::Any => "Any",
            WellKnownType::Duration => "Duration",
            WellKnownType::Empty => "Empty",
            WellKnownType::Struct => "Struct",
            WellKnownType::Timestamp => "Timestamp",
            WellKnownType::Value => "Value",
            WellKnownType::ListValue => "ListValue",
            WellKnownType::DoubleValue => "DoubleValue",
            WellKnownType::FloatValue => "FloatValue",
            WellKnownType::Int64Value => "Int64Value",
            WellKnownType::UInt64Value => "UInt64Value",
            WellKnownType::Int32Value => "Int32Value",
            WellKnownType::UInt32Value => "UInt32Value",
            WellKnownType::BoolValue => "BoolValue",
            WellKnownType::StringValue => "StringValue",
            WellKnownType::BytesValue => "BytesValue",
        }
    }

    /// Whether this is one of the scalar wrapper messages (`Int32Value` …).
    pub fn is_wrapper(self) -> bool {
        matches!(
            self,
            WellKnownType::DoubleValue
                | WellKnownType::FloatValue
                | WellKnownType::Int64Value
                | WellKnownType::UInt64Value
                | WellKnownType::Int32Value
                | WellKnownType::UInt32Value
                | WellKnownType::BoolValue
                | WellKnownType::StringValue
                | WellKnownType::BytesValue
        )
    }
}
