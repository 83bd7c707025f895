//! Option decoder.
//!
//! Every entity carries the still-encoded bytes of its options message
//! (`MessageOptions`, `FieldOptions`, …). The standard options decode through
//! `prost-types`; custom options are extension fields on those messages that
//! only the consumer knows about, so they are described by an [`Extension`]
//! and pulled out of the raw payload on demand.
//!
//! ```text
//! extend google.protobuf.MessageOptions { bool my_flag = 50001; }
//! ```
//!
//! ```ignore
//! const MY_FLAG: Extension<bool> = Extension::bool("my_flag", OptionsKind::Message, 50001);
//! let mut flag = false;
//! if message.extension(&MY_FLAG, &mut flag)? { /* present */ }
//! ```

use std::fmt;

use prost::DecodeError;
use prost::encoding::{DecodeContext, WireType, decode_key, skip_field};

use crate::error::OptionError;

/// The options message an entity carries and an extension extends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OptionsKind {
    #[default]
    File,
    Message,
    Field,
    OneOf,
    Enum,
    EnumValue,
    Service,
    Method,
}

impl OptionsKind {
    /// Fully-qualified name of the options message.
    pub fn message_name(self) -> &'static str {
        match self {
            OptionsKind::File => "google.protobuf.FileOptions",
            OptionsKind::Message => "google.protobuf.MessageOptions",
            OptionsKind::Field => "google.protobuf.FieldOptions",
            OptionsKind::OneOf => "google.protobuf.OneofOptions",
            OptionsKind::Enum => "google.protobuf.EnumOptions",
            OptionsKind::EnumValue => "google.protobuf.EnumValueOptions",
            OptionsKind::Service => "google.protobuf.ServiceOptions",
            OptionsKind::Method => "google.protobuf.MethodOptions",
        }
    }
}

/// Raw options attached to one entity.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct OptionPayload {
    kind: OptionsKind,
    bytes: Vec<u8>,
}

impl OptionPayload {
    pub fn new(kind: OptionsKind, bytes: Option<Vec<u8>>) -> Self {
        Self {
            kind,
            bytes: bytes.unwrap_or_default(),
        }
    }

    pub fn kind(&self) -> OptionsKind {
        self.kind
    }

    /// The encoded options message; empty when the entity declares none.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the payload as a standard options message.
    ///
    /// Custom extensions are skipped as unknown fields; read them through
    /// [`Extension::decode`].
    pub fn standard<M: prost::Message + Default>(&self) -> Result<M, OptionError> {
        M::decode(self.bytes.as_slice()).map_err(|err| OptionError::Decode {
            name: self.kind.message_name(),
            message: err.to_string(),
        })
    }
}

impl fmt::Debug for OptionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionPayload")
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}

type MergeFn<T> = fn(WireType, &mut T, &mut &[u8], DecodeContext) -> Result<(), DecodeError>;

/// Descriptor of a custom option: an extension field of one options message.
pub struct Extension<T> {
    name: &'static str,
    number: u32,
    extendee: OptionsKind,
    wire_type: WireType,
    merge: MergeFn<T>,
}

// Manual impls: `T` itself need not be Clone/Copy.
impl<T> Clone for Extension<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Extension<T> {}

impl<T> fmt::Debug for Extension<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extension")
            .field("name", &self.name)
            .field("number", &self.number)
            .field("extendee", &self.extendee)
            .field("wire_type", &self.wire_type)
            .finish()
    }
}

macro_rules! scalar_extensions {
    ($ty:ty { $($ctor:ident => $codec:ident, $wire:ident;)+ }) => {
        impl Extension<$ty> {
            $(
                pub fn $ctor(name: &'static str, extendee: OptionsKind, number: u32) -> Self {
                    Self {
                        name,
                        number,
                        extendee,
                        wire_type: WireType::$wire,
                        merge: |wire_type, value, buf, ctx| {
                            prost::encoding::$codec::merge(wire_type, value, buf, ctx)
                        },
                    }
                }
            )+
        }
    };
}

scalar_extensions!(bool { bool => bool, Varint; });
scalar_extensions!(i32 {
    int32 => int32, Varint;
    sint32 => sint32, Varint;
    sfixed32 => sfixed32, ThirtyTwoBit;
    enumeration => int32, Varint;
});
scalar_extensions!(i64 {
    int64 => int64, Varint;
    sint64 => sint64, Varint;
    sfixed64 => sfixed64, SixtyFourBit;
});
scalar_extensions!(u32 {
    uint32 => uint32, Varint;
    fixed32 => fixed32, ThirtyTwoBit;
});
scalar_extensions!(u64 {
    uint64 => uint64, Varint;
    fixed64 => fixed64, SixtyFourBit;
});
scalar_extensions!(f32 { float => float, ThirtyTwoBit; });
scalar_extensions!(f64 { double => double, SixtyFourBit; });
scalar_extensions!(String { string => string, LengthDelimited; });

impl Extension<Vec<u8>> {
    pub fn bytes(name: &'static str, extendee: OptionsKind, number: u32) -> Self {
        Self {
            name,
            number,
            extendee,
            wire_type: WireType::LengthDelimited,
            merge: |wire_type, value, buf, ctx| prost::encoding::bytes::merge(wire_type, value, buf, ctx),
        }
    }
}

impl<M: prost::Message + Default> Extension<M> {
    /// An option whose value is itself a message.
    pub fn message(name: &'static str, extendee: OptionsKind, number: u32) -> Self {
        Self {
            name,
            number,
            extendee,
            wire_type: WireType::LengthDelimited,
            merge: |wire_type, value, buf, ctx| prost::encoding::message::merge(wire_type, value, buf, ctx),
        }
    }
}

impl<T> Extension<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn extendee(&self) -> OptionsKind {
        self.extendee
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }
}

impl<T: Default> Extension<T> {
    /// Read this option out of `payload` into `out`.
    ///
    /// Returns `Ok(false)` when the payload is empty or does not carry the
    /// field; `out` is only written when `Ok(true)` is returned. Repeated
    /// occurrences merge like any protobuf field: the last scalar wins,
    /// messages are merged.
    pub fn decode(&self, payload: &OptionPayload, out: &mut T) -> Result<bool, OptionError> {
        if payload.is_empty() {
            return Ok(false);
        }
        if payload.kind() != self.extendee {
            return Err(OptionError::ExtendeeMismatch {
                name: self.name,
                expected: self.extendee.message_name(),
                found: payload.kind().message_name(),
            });
        }

        let mut buf = payload.as_bytes();
        let mut value = T::default();
        let mut found = false;
        while !buf.is_empty() {
            let (tag, wire_type) = decode_key(&mut buf).map_err(|err| self.decode_error(err))?;
            if tag != self.number {
                skip_field(wire_type, tag, &mut buf, DecodeContext::default())
                    .map_err(|err| self.decode_error(err))?;
                continue;
            }
            if wire_type != self.wire_type {
                return Err(OptionError::WireTypeMismatch {
                    name: self.name,
                    number: self.number,
                    expected: self.wire_type,
                    found: wire_type,
                });
            }
            (self.merge)(wire_type, &mut value, &mut buf, DecodeContext::default())
                .map_err(|err| self.decode_error(err))?;
            found = true;
        }

        if found {
            *out = value;
        }
        Ok(found)
    }

    fn decode_error(&self, err: DecodeError) -> OptionError {
        OptionError::Decode {
            name: self.name,
            message: err.to_string(),
        }
    }
}
