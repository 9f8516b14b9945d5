//! Codec layer: external JSON values <-> typed `Value`s, driven by a node.
//!
//! Structs are read from and written to each field's storage key; the typed
//! side always uses field names. Keys no field claims follow
//! `CodecConfig::unknown_keys` (dropped by default).

mod decode;
mod encode;
mod error;


pub use error::{CodecErrorKind, DecodeError, EncodeError, FieldPath, PathSegment};

use crate::{
    config::CodecConfig,
    node::{SchemaNode, StructNode},
    value::Value,
};

/// Decode an external value against `node` with the default config.
pub fn decode(node: &SchemaNode, input: &serde_json::Value) -> Result<Value, DecodeError> {
    decode_with(node, input, &CodecConfig::default())
}

pub fn decode_with(
    node: &SchemaNode,
    input: &serde_json::Value,
    config: &CodecConfig,
) -> Result<Value, DecodeError> {
    decode::Decoder::new(config)
        .node(node, input)
        .inspect_err(|err| {
            tracing::trace!(path = %err.path, kind = %err.kind, "decode rejected value");
        })
}

/// Encode a typed value against `node` with the default config.
pub fn encode(node: &SchemaNode, value: &Value) -> Result<serde_json::Value, EncodeError> {
    encode_with(node, value, &CodecConfig::default())
}

pub fn encode_with(
    node: &SchemaNode,
    value: &Value,
    config: &CodecConfig,
) -> Result<serde_json::Value, EncodeError> {
    encode::Encoder::new(config)
        .node(node, value)
        .inspect_err(|err| {
            tracing::trace!(path = %err.path, kind = %err.kind, "encode rejected value");
        })
}

/// Decode a row against a struct node without wrapping it in a `SchemaNode`.
pub fn decode_record(
    node: &StructNode,
    input: &serde_json::Value,
    config: &CodecConfig,
) -> Result<Value, DecodeError> {
    decode::Decoder::new(config)
        .record(node, input)
        .inspect_err(|err| {
            tracing::trace!(path = %err.path, kind = %err.kind, "decode rejected row");
        })
}

/// Encode a row against a struct node without wrapping it in a `SchemaNode`.
pub fn encode_record(
    node: &StructNode,
    value: &Value,
    config: &CodecConfig,
) -> Result<serde_json::Value, EncodeError> {
    encode::Encoder::new(config)
        .record(node, value)
        .inspect_err(|err| {
            tracing::trace!(path = %err.path, kind = %err.kind, "encode rejected row");
        })
}

// shape name of an external value for mismatch messages
const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
