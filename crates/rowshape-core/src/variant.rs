use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// Variant
///
/// One of the three shapes derived from a base row schema.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Full row as read back from storage.
    Select,
    /// Values a caller supplies to create a row.
    Insert,
    /// Partial update payload.
    Update,
}

impl Variant {
    pub const ALL: [Self; 3] = [Self::Select, Self::Insert, Self::Update];
}
