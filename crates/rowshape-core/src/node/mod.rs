//! Schema node model.
//!
//! A `SchemaNode` describes the shape of a value. The tree is closed: every
//! walk over it (projection, codec, rendering) matches exhaustively.

mod column;
mod error;
mod field;

#[cfg(test)]
mod tests;

pub use column::{
    ColumnAnnotation, ColumnType, VariantOverride, with_column_variant, with_generated,
};
pub use error::NodeError;
pub use field::{Field, StructBuilder, StructNode};

use rowshape_primitives::ScalarKind;
use serde::Serialize;
use std::fmt;

///
/// SchemaNode
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum SchemaNode {
    Scalar(ScalarKind),

    /// Closed set of string literals.
    Enum(Vec<String>),

    Struct(StructNode),
    Array(Box<Self>),

    /// Alternatives tried in declaration order. An empty union has no
    /// members and therefore resolves to `Never`.
    Union(Vec<Self>),

    /// The null-like member that makes a union nullable.
    Absent,

    /// No valid values. As a column variant type it means "omit the field".
    Never,

    /// Branded type; carried on the wire exactly like `inner`.
    Named { name: String, inner: Box<Self> },
}

impl SchemaNode {
    #[must_use]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::Scalar(ScalarKind::Text)
    }

    #[must_use]
    pub const fn int() -> Self {
        Self::Scalar(ScalarKind::Int)
    }

    #[must_use]
    pub const fn bool() -> Self {
        Self::Scalar(ScalarKind::Bool)
    }

    #[must_use]
    pub const fn uuid() -> Self {
        Self::Scalar(ScalarKind::Uuid)
    }

    #[must_use]
    pub const fn timestamp() -> Self {
        Self::Scalar(ScalarKind::Timestamp)
    }

    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    #[must_use]
    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    #[must_use]
    pub fn enumeration<S: Into<String>>(literals: impl IntoIterator<Item = S>) -> Self {
        Self::Enum(literals.into_iter().map(Into::into).collect())
    }

    #[must_use]
    pub fn named(name: impl Into<String>, inner: Self) -> Self {
        Self::Named {
            name: name.into(),
            inner: Box::new(inner),
        }
    }

    /// Wrap in a union with `Absent`. Idempotent.
    #[must_use]
    pub fn nullable(self) -> Self {
        if self.admits_absent() {
            return self;
        }

        match self {
            Self::Union(mut members) => {
                members.push(Self::Absent);
                Self::Union(members)
            }
            node => Self::Union(vec![node, Self::Absent]),
        }
    }

    /// True when no value can satisfy this node.
    #[must_use]
    pub fn is_never(&self) -> bool {
        match self {
            Self::Never => true,
            Self::Named { inner, .. } => inner.is_never(),
            Self::Union(members) => members.iter().all(Self::is_never),
            _ => false,
        }
    }

    /// True when `Absent` is one of the alternatives this node accepts.
    #[must_use]
    pub fn admits_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Named { inner, .. } => inner.admits_absent(),
            Self::Union(members) => members.iter().any(Self::admits_absent),
            _ => false,
        }
    }

    /// Resolve through brands to a struct node.
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructNode> {
        match self {
            Self::Struct(node) => Some(node),
            Self::Named { inner, .. } => inner.as_struct(),
            _ => None,
        }
    }
}

impl From<ScalarKind> for SchemaNode {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<StructNode> for SchemaNode {
    fn from(node: StructNode) -> Self {
        Self::Struct(node)
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Enum(literals) => {
                for (i, literal) in literals.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{literal:?}")?;
                }
                Ok(())
            }
            Self::Struct(node) => write!(f, "{node}"),
            Self::Array(element) => match element.as_ref() {
                Self::Union(members) if !members.is_empty() => write!(f, "({element})[]"),
                _ => write!(f, "{element}[]"),
            },
            Self::Union(members) if members.is_empty() => f.write_str("never"),
            Self::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                Ok(())
            }
            Self::Absent => f.write_str("null"),
            Self::Never => f.write_str("never"),
            Self::Named { name, .. } => f.write_str(name),
        }
    }
}
