use crate::{
    codec::{CodecErrorKind, DecodeError, json_kind},
    config::{CodecConfig, TimestampEncoding, UnknownKeys},
    node::{SchemaNode, StructNode},
    value::{Record, Value},
};
use chrono::{DateTime, NaiveDate, Utc};
use rowshape_primitives::ScalarKind;
use serde_json::Value as Json;
use uuid::Uuid;

pub(super) const DATE_FORMAT: &str = "%Y-%m-%d";

///
/// Decoder
///

pub(super) struct Decoder<'a> {
    config: &'a CodecConfig,
}

impl<'a> Decoder<'a> {
    pub(super) const fn new(config: &'a CodecConfig) -> Self {
        Self { config }
    }

    pub(super) fn node(&self, node: &SchemaNode, input: &Json) -> Result<Value, DecodeError> {
        match node {
            SchemaNode::Scalar(kind) => self.scalar(*kind, input),
            SchemaNode::Enum(allowed) => decode_enum(allowed, input),
            SchemaNode::Struct(node) => self.record(node, input),
            SchemaNode::Array(element) => self.list(element, input),
            SchemaNode::Union(members) => self.union(members, input),
            SchemaNode::Absent => match input {
                Json::Null => Ok(Value::Null),
                other => Err(CodecErrorKind::mismatch("null", json_kind(other)).into()),
            },
            SchemaNode::Never => Err(CodecErrorKind::Never.into()),
            SchemaNode::Named { inner, .. } => self.node(inner, input),
        }
    }

    pub(super) fn record(&self, node: &StructNode, input: &Json) -> Result<Value, DecodeError> {
        let Json::Object(object) = input else {
            return Err(CodecErrorKind::mismatch("object", json_kind(input)).into());
        };

        if self.config.unknown_keys == UnknownKeys::Reject
            && let Some(key) = object
                .keys()
                .find(|key| !node.fields().iter().any(|f| f.storage_key() == key.as_str()))
        {
            return Err(CodecErrorKind::UnknownField { key: key.clone() }.into());
        }

        let mut record = Record::new();
        for field in node.fields() {
            match object.get(field.storage_key()) {
                Some(raw) => {
                    let value = self
                        .node(field.ty.node(), raw)
                        .map_err(|err| err.with_field(&field.name))?;
                    record.insert(field.name.clone(), value);
                }
                None if field.optional => {}
                None => {
                    return Err(CodecErrorKind::MissingField {
                        field: field.name.clone(),
                    }
                    .into());
                }
            }
        }

        Ok(Value::Record(record))
    }

    fn list(&self, element: &SchemaNode, input: &Json) -> Result<Value, DecodeError> {
        let Json::Array(items) = input else {
            return Err(CodecErrorKind::mismatch("array", json_kind(input)).into());
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.node(element, item).map_err(|err| err.with_index(i)))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List)
    }

    // First member that accepts the input wins. When exactly one member got
    // past the outer shape check, its error is the real one and keeps its path.
    fn union(&self, members: &[SchemaNode], input: &Json) -> Result<Value, DecodeError> {
        if members.is_empty() {
            return Err(CodecErrorKind::Never.into());
        }

        let mut inner = Vec::new();
        for member in members {
            match self.node(member, input) {
                Ok(value) => return Ok(value),
                Err(err) if err.rejects_outer_shape() => {}
                Err(err) => inner.push(err),
            }
        }

        match inner.pop() {
            Some(err) if inner.is_empty() => Err(err),
            _ => Err(CodecErrorKind::NoMatchingMember {
                members: members.len(),
            }
            .into()),
        }
    }

    fn scalar(&self, kind: ScalarKind, input: &Json) -> Result<Value, DecodeError> {
        let mismatch = || {
            DecodeError::new(CodecErrorKind::mismatch(
                kind.wire().as_str(),
                json_kind(input),
            ))
        };
        let invalid =
            |message: String| DecodeError::new(CodecErrorKind::InvalidScalar { kind, message });

        match kind {
            ScalarKind::Bool => input.as_bool().map(Value::Bool).ok_or_else(mismatch),
            ScalarKind::Int => match input {
                Json::Number(n) => n
                    .as_i64()
                    .map(Value::Int)
                    .ok_or_else(|| invalid(format!("{n} is not a 64-bit signed integer"))),
                _ => Err(mismatch()),
            },
            ScalarKind::Uint => match input {
                Json::Number(n) => n
                    .as_u64()
                    .map(Value::Uint)
                    .ok_or_else(|| invalid(format!("{n} is not a 64-bit unsigned integer"))),
                _ => Err(mismatch()),
            },
            ScalarKind::Float => input.as_f64().map(Value::Float).ok_or_else(mismatch),
            ScalarKind::Text => input
                .as_str()
                .map(|s| Value::Text(s.to_string()))
                .ok_or_else(mismatch),
            ScalarKind::Date => {
                let raw = input.as_str().ok_or_else(mismatch)?;
                NaiveDate::parse_from_str(raw, DATE_FORMAT)
                    .map(Value::Date)
                    .map_err(|err| invalid(format!("'{raw}': {err}")))
            }
            ScalarKind::Timestamp => self.timestamp(input),
            ScalarKind::Uuid => {
                let raw = input.as_str().ok_or_else(mismatch)?;
                Uuid::parse_str(raw)
                    .map(Value::Uuid)
                    .map_err(|err| invalid(format!("'{raw}': {err}")))
            }
            ScalarKind::Json => Ok(Value::Json(input.clone())),
        }
    }

    fn timestamp(&self, input: &Json) -> Result<Value, DecodeError> {
        let invalid = |message: String| {
            DecodeError::new(CodecErrorKind::InvalidScalar {
                kind: ScalarKind::Timestamp,
                message,
            })
        };

        match (self.config.timestamp_encoding, input) {
            (TimestampEncoding::Rfc3339, Json::String(raw)) => DateTime::parse_from_rfc3339(raw)
                .map(|ts| Value::Timestamp(ts.with_timezone(&Utc)))
                .map_err(|err| invalid(format!("'{raw}': {err}"))),
            (TimestampEncoding::Rfc3339, other) => {
                Err(CodecErrorKind::mismatch("rfc3339 string", json_kind(other)).into())
            }
            (TimestampEncoding::UnixMillis, Json::Number(n)) => n
                .as_i64()
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(Value::Timestamp)
                .ok_or_else(|| invalid(format!("{n} is not a millisecond instant"))),
            (TimestampEncoding::UnixMillis, other) => {
                Err(CodecErrorKind::mismatch("unix milliseconds", json_kind(other)).into())
            }
        }
    }
}

fn decode_enum(allowed: &[String], input: &Json) -> Result<Value, DecodeError> {
    let Json::String(literal) = input else {
        return Err(CodecErrorKind::mismatch("string", json_kind(input)).into());
    };

    if allowed.iter().any(|a| a == literal) {
        Ok(Value::Enum(literal.clone()))
    } else {
        Err(CodecErrorKind::UnknownEnumLiteral {
            literal: literal.clone(),
            allowed: allowed.to_vec(),
        }
        .into())
    }
}
