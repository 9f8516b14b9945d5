//! Closed registry of scalar leaf kinds shared by the rowshape crates.
//!
//! The engine never interprets what a scalar *means*; it only needs the
//! wire shape a scalar travels as and a stable label for rendering.

#[macro_use]
mod macros;

use serde::Serialize;
use std::fmt;

///
/// ScalarKind
///
/// Canonical scalar kind used for schema leaves.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ScalarKind {
    Bool,
    Date,
    Float,
    Int,
    Json,
    Text,
    Timestamp,
    Uint,
    Uuid,
}

impl ScalarKind {
    /// Return the full metadata descriptor for one scalar kind.
    #[must_use]
    pub const fn metadata(self) -> ScalarMetadata {
        scalar_kind_registry!(metadata_from_registry, self)
    }

    #[must_use]
    pub const fn family(self) -> ScalarFamily {
        self.metadata().family
    }

    /// Default external shape for this scalar.
    #[must_use]
    pub const fn wire(self) -> WireShape {
        self.metadata().wire
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        self.metadata().label
    }

    #[must_use]
    pub const fn is_identifier(self) -> bool {
        self.metadata().is_identifier
    }

    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        self.metadata().supports_ordering
    }

    /// Resolve a scalar kind from its registry label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        ALL_SCALAR_KINDS
            .into_iter()
            .find(|kind| kind.label() == label)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

///
/// ScalarMetadata
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScalarMetadata {
    pub family: ScalarFamily,
    pub wire: WireShape,
    pub label: &'static str,
    pub is_identifier: bool,
    pub supports_ordering: bool,
}

///
/// ScalarFamily
///
/// Coarse grouping used when rendering and classifying leaves.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ScalarFamily {
    Bool,
    Identifier,
    Numeric,
    Opaque,
    Temporal,
    Textual,
}

///
/// WireShape
///
/// The external (JSON-like) shape a scalar is carried in.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum WireShape {
    Any,
    Bool,
    Integer,
    Number,
    String,
}

impl WireShape {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

/// Ordered list of all scalar kinds in registry order.
pub const ALL_SCALAR_KINDS: [ScalarKind; 9] = scalar_kind_registry!(all_kinds_from_registry);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registry_labels_are_unique() {
        let labels: HashSet<_> = ALL_SCALAR_KINDS.iter().map(|k| k.label()).collect();

        assert_eq!(labels.len(), ALL_SCALAR_KINDS.len());
    }

    #[test]
    fn labels_round_trip_through_lookup() {
        for kind in ALL_SCALAR_KINDS {
            assert_eq!(ScalarKind::from_label(kind.label()), Some(kind));
        }
        assert_eq!(ScalarKind::from_label("varchar"), None);
    }

    #[test]
    fn only_uuid_is_an_identifier() {
        let identifiers: Vec<_> = ALL_SCALAR_KINDS
            .into_iter()
            .filter(|k| k.is_identifier())
            .collect();

        assert_eq!(identifiers, vec![ScalarKind::Uuid]);
    }

    #[test]
    fn temporal_scalars_travel_as_strings() {
        assert_eq!(ScalarKind::Date.wire(), WireShape::String);
        assert_eq!(ScalarKind::Timestamp.wire(), WireShape::String);
        assert_eq!(ScalarKind::Int.wire().as_str(), "integer");
    }
}
