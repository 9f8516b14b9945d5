//! Core engine for rowshape: the schema node model, per-column annotations,
//! the select/insert/update projections, and the codec that validates values
//! against any node (projected or not).
#![warn(unreachable_pub)]

pub mod codec;
pub mod compose;
pub mod config;
pub mod node;
pub mod project;
pub mod value;
pub mod variant;

pub use rowshape_primitives::{ScalarKind, WireShape};

///
/// Prelude
///
/// Domain vocabulary only; errors and config stay at their module paths.
///

pub mod prelude {
    pub use crate::{
        codec::{decode, encode},
        compose::{DerivedSchemas, get_schemas},
        node::{
            ColumnType, Field, SchemaNode, StructNode, VariantOverride, with_column_variant,
            with_generated,
        },
        value::{Record, Value},
        variant::Variant,
    };
    pub use rowshape_primitives::ScalarKind;
}
