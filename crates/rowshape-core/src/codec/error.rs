use rowshape_primitives::ScalarKind;
use std::fmt;
use thiserror::Error as ThisError;

///
/// PathSegment
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

///
/// FieldPath
///
/// Location of a failure inside a value, rendered as `profile.tags[2]`.
/// Segments name fields by their code name.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Segments from the outermost field inwards.
    #[must_use]
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = &PathSegment> {
        // stored innermost-first: errors gain segments while unwinding
        self.0.iter().rev()
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    fn prepend(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }

        for (i, seg) in self.segments().enumerate() {
            match seg {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }

        Ok(())
    }
}

///
/// CodecErrorKind
///
/// Why a value did not fit its node. Shared by both directions.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CodecErrorKind {
    #[error("expected {expected}, found {actual}")]
    TypeMismatch {
        expected: String,
        actual: &'static str,
    },

    #[error("missing required field '{field}'")]
    MissingField { field: String },

    #[error("unknown field '{key}'")]
    UnknownField { key: String },

    #[error("no union member matched ({members} tried)")]
    NoMatchingMember { members: usize },

    #[error("invalid {kind}: {message}")]
    InvalidScalar { kind: ScalarKind, message: String },

    #[error("'{literal}' is not one of {allowed:?}")]
    UnknownEnumLiteral {
        literal: String,
        allowed: Vec<String>,
    },

    #[error("the never type admits no value")]
    Never,

    #[error("float is not finite")]
    NonFinite,
}

impl CodecErrorKind {
    pub(crate) fn mismatch(expected: impl Into<String>, actual: &'static str) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual,
        }
    }
}

macro_rules! codec_error {
    ($name:ident, $message:tt) => {
        #[derive(Clone, Debug, Eq, PartialEq, ThisError)]
        #[error($message)]
        pub struct $name {
            pub path: FieldPath,
            pub kind: CodecErrorKind,
        }

        impl $name {
            #[must_use]
            pub fn new(kind: CodecErrorKind) -> Self {
                Self {
                    path: FieldPath::default(),
                    kind,
                }
            }

            /// Prepend a field segment to the error path.
            #[must_use]
            pub fn with_field(mut self, field: impl Into<String>) -> Self {
                self.path.prepend(PathSegment::Field(field.into()));
                self
            }

            /// Prepend an index segment to the error path.
            #[must_use]
            pub fn with_index(mut self, index: usize) -> Self {
                self.path.prepend(PathSegment::Index(index));
                self
            }

            // the value was turned away at the node itself, not somewhere inside it
            pub(crate) const fn rejects_outer_shape(&self) -> bool {
                self.path.is_root()
                    && matches!(
                        self.kind,
                        CodecErrorKind::TypeMismatch { .. } | CodecErrorKind::Never
                    )
            }
        }

        impl From<CodecErrorKind> for $name {
            fn from(kind: CodecErrorKind) -> Self {
                Self::new(kind)
            }
        }
    };
}

codec_error!(DecodeError, "decode failed at {path}: {kind}");
codec_error!(EncodeError, "encode failed at {path}: {kind}");
