use crate::{
    codec::{CodecErrorKind, EncodeError, decode::DATE_FORMAT},
    config::{CodecConfig, TimestampEncoding, UnknownKeys},
    node::{SchemaNode, StructNode},
    value::Value,
};
use chrono::SecondsFormat;
use rowshape_primitives::ScalarKind;
use serde_json::{Map, Number, Value as Json};

///
/// Encoder
///

pub(super) struct Encoder<'a> {
    config: &'a CodecConfig,
}

impl<'a> Encoder<'a> {
    pub(super) const fn new(config: &'a CodecConfig) -> Self {
        Self { config }
    }

    pub(super) fn node(&self, node: &SchemaNode, value: &Value) -> Result<Json, EncodeError> {
        match node {
            SchemaNode::Scalar(kind) => self.scalar(*kind, value),
            SchemaNode::Enum(allowed) => encode_enum(allowed, value),
            SchemaNode::Struct(node) => self.record(node, value),
            SchemaNode::Array(element) => match value {
                Value::List(items) => items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.node(element, item).map_err(|err| err.with_index(i)))
                    .collect::<Result<Vec<_>, _>>()
                    .map(Json::Array),
                other => Err(CodecErrorKind::mismatch("list", other.kind_name()).into()),
            },
            SchemaNode::Union(members) => self.union(members, value),
            SchemaNode::Absent => match value {
                Value::Null => Ok(Json::Null),
                other => Err(CodecErrorKind::mismatch("null", other.kind_name()).into()),
            },
            SchemaNode::Never => Err(CodecErrorKind::Never.into()),
            SchemaNode::Named { inner, .. } => self.node(inner, value),
        }
    }

    // same member selection and error reporting as decode
    fn union(&self, members: &[SchemaNode], value: &Value) -> Result<Json, EncodeError> {
        if members.is_empty() {
            return Err(CodecErrorKind::Never.into());
        }

        let mut inner = Vec::new();
        for member in members {
            match self.node(member, value) {
                Ok(encoded) => return Ok(encoded),
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

    // typed records are keyed by field name; the output uses storage keys
    pub(super) fn record(&self, node: &StructNode, value: &Value) -> Result<Json, EncodeError> {
        let Value::Record(record) = value else {
            return Err(CodecErrorKind::mismatch("record", value.kind_name()).into());
        };

        if self.config.unknown_keys == UnknownKeys::Reject
            && let Some(name) = record.names().find(|name| node.field(name).is_none())
        {
            return Err(CodecErrorKind::UnknownField {
                key: name.to_string(),
            }
            .into());
        }

        let mut out = Map::with_capacity(node.len());
        for field in node.fields() {
            match record.get(&field.name) {
                Some(inner) => {
                    let encoded = self
                        .node(field.ty.node(), inner)
                        .map_err(|err| err.with_field(&field.name))?;
                    out.insert(field.storage_key().to_string(), encoded);
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

        Ok(Json::Object(out))
    }

    fn scalar(&self, kind: ScalarKind, value: &Value) -> Result<Json, EncodeError> {
        match (kind, value) {
            (ScalarKind::Bool, Value::Bool(b)) => Ok(Json::Bool(*b)),
            (ScalarKind::Int, Value::Int(i)) => Ok(Json::from(*i)),
            (ScalarKind::Uint, Value::Uint(u)) => Ok(Json::from(*u)),
            (ScalarKind::Float, Value::Float(f)) => Number::from_f64(*f)
                .map(Json::Number)
                .ok_or_else(|| CodecErrorKind::NonFinite.into()),
            (ScalarKind::Text, Value::Text(s)) => Ok(Json::String(s.clone())),
            (ScalarKind::Date, Value::Date(d)) => {
                Ok(Json::String(d.format(DATE_FORMAT).to_string()))
            }
            (ScalarKind::Timestamp, Value::Timestamp(ts)) => {
                Ok(match self.config.timestamp_encoding {
                    TimestampEncoding::Rfc3339 => {
                        Json::String(ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
                    }
                    TimestampEncoding::UnixMillis => Json::from(ts.timestamp_millis()),
                })
            }
            (ScalarKind::Uuid, Value::Uuid(id)) => Ok(Json::String(id.to_string())),
            (ScalarKind::Json, Value::Json(raw)) => Ok(raw.clone()),
            (kind, other) => Err(CodecErrorKind::mismatch(kind.label(), other.kind_name()).into()),
        }
    }
}

fn encode_enum(allowed: &[String], value: &Value) -> Result<Json, EncodeError> {
    let literal = match value {
        Value::Enum(s) | Value::Text(s) => s,
        other => return Err(CodecErrorKind::mismatch("enum", other.kind_name()).into()),
    };

    if allowed.contains(literal) {
        Ok(Json::String(literal.clone()))
    } else {
        Err(CodecErrorKind::UnknownEnumLiteral {
            literal: literal.clone(),
            allowed: allowed.to_vec(),
        }
        .into())
    }
}
