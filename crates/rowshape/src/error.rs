use derive_more::Display;
use rowshape_core::{
    codec::{CodecErrorKind, DecodeError, EncodeError},
    config::ConfigError,
    node::NodeError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Rendered location inside the value, for codec failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
            path: None,
        }
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl From<NodeError> for Error {
    fn from(err: NodeError) -> Self {
        let kind = match err {
            NodeError::EmptyFieldName { .. } => SchemaErrorKind::EmptyFieldName,
            NodeError::DuplicateField { .. } => SchemaErrorKind::DuplicateField,
            NodeError::DuplicateStorageKey { .. } => SchemaErrorKind::DuplicateStorageKey,
            NodeError::ConflictingAnnotation { .. } => SchemaErrorKind::ConflictingAnnotation,
        };

        Self::new(ErrorKind::Schema(kind), ErrorOrigin::Schema, err.to_string())
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::new(
            ErrorKind::Codec((&err.kind).into()),
            ErrorOrigin::Decode,
            err.to_string(),
        )
        .with_path(err.path.to_string())
    }
}

impl From<EncodeError> for Error {
    fn from(err: EncodeError) -> Self {
        Self::new(
            ErrorKind::Codec((&err.kind).into()),
            ErrorOrigin::Encode,
            err.to_string(),
        )
        .with_path(err.path.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// The schema itself is malformed; fix the entity definition.
    Schema(SchemaErrorKind),

    /// A value does not fit its shape.
    Codec(CodecErrorClass),

    Config,
}

///
/// SchemaErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum SchemaErrorKind {
    EmptyFieldName,
    DuplicateField,
    DuplicateStorageKey,
    ConflictingAnnotation,
}

///
/// CodecErrorClass
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CodecErrorClass {
    TypeMismatch,
    MissingField,
    UnknownField,
    NoMatchingMember,
    InvalidScalar,
    UnknownEnumLiteral,
    Never,
    NonFinite,
}

impl From<&CodecErrorKind> for CodecErrorClass {
    fn from(kind: &CodecErrorKind) -> Self {
        match kind {
            CodecErrorKind::TypeMismatch { .. } => Self::TypeMismatch,
            CodecErrorKind::MissingField { .. } => Self::MissingField,
            CodecErrorKind::UnknownField { .. } => Self::UnknownField,
            CodecErrorKind::NoMatchingMember { .. } => Self::NoMatchingMember,
            CodecErrorKind::InvalidScalar { .. } => Self::InvalidScalar,
            CodecErrorKind::UnknownEnumLiteral { .. } => Self::UnknownEnumLiteral,
            CodecErrorKind::Never => Self::Never,
            CodecErrorKind::NonFinite => Self::NonFinite,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Config,
    Decode,
    Encode,
    Schema,
}
