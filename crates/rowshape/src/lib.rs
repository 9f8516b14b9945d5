//! rowshape derives the read, create and partial-update shapes of a row
//! from one authored base struct, and validates values against any of them.
//!
//! ## Crate layout
//! - `core`: node model, column annotations, projections, codec, config.
//! - `primitives`: the closed registry of scalar leaf kinds.
//! - `error`: the public error taxonomy.
//!
//! A typical entity is authored once and handed to [`get_schemas`]:
//!
//! ```
//! use rowshape::prelude::*;
//!
//! let base = StructNode::new([
//!     Field::new(
//!         "id",
//!         with_column_variant(
//!             SchemaNode::uuid(),
//!             SchemaNode::uuid(),
//!             SchemaNode::Never,
//!             SchemaNode::Never,
//!         ),
//!     ),
//!     Field::new("name", SchemaNode::text()),
//! ])?;
//!
//! let schemas = get_schemas(&base, None);
//! assert_eq!(schemas.insertable.keys().collect::<Vec<_>>(), ["name"]);
//! # Ok::<(), rowshape::Error>(())
//! ```

pub use rowshape_core as core;
pub use rowshape_primitives as primitives;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};
pub use rowshape_core::{
    codec::{decode, decode_with, encode, encode_with},
    compose::get_schemas,
    node::{with_column_variant, with_generated},
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///
/// Everything an entity definition and its call sites need.
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{
            compose::{DerivedSchemas, SchemaCache, get_schemas},
            config::CodecConfig,
            node::{
                ColumnType, Field, SchemaNode, StructNode, with_column_variant, with_generated,
            },
            value::{Record, Value},
            variant::Variant,
        },
        decode, encode,
        primitives::ScalarKind,
    };
}
