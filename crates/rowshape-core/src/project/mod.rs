//! Select, insert and update projections of a base row struct.
//!
//! Each projection walks the base fields in order and keeps, retypes or
//! drops every field according to its column annotation. The base is never
//! touched; every call builds a fresh `StructNode`.
//!
//! - Select keeps each field under its select type, dropping select-never.
//! - Insert drops insert-never and generated columns; a surviving field is
//!   optional when the base field is, or when its column is optional on
//!   insert.
//! - Update drops update-never columns and makes every survivor optional.
//!
//! Storage keys are copied unchanged in all three.


use crate::{
    node::{ColumnType, Field, StructNode},
    variant::Variant,
};
use tracing::debug;

/// Full row shape.
#[must_use]
pub fn select(base: &StructNode) -> StructNode {
    project(Variant::Select, base)
}

/// Shape of the values a caller supplies to create a row.
#[must_use]
pub fn insert(base: &StructNode) -> StructNode {
    project(Variant::Insert, base)
}

/// Partial update payload; the empty record is always valid.
#[must_use]
pub fn update(base: &StructNode) -> StructNode {
    project(Variant::Update, base)
}

/// Derive one variant of `base`.
#[must_use]
pub fn project(variant: Variant, base: &StructNode) -> StructNode {
    let mut fields = Vec::with_capacity(base.len());
    let mut omitted = Vec::new();

    for field in base.fields() {
        match project_field(variant, field) {
            Some(projected) => fields.push(projected),
            None => omitted.push(field.name.as_str()),
        }
    }

    debug!(
        %variant,
        base = base.len(),
        kept = fields.len(),
        ?omitted,
        "projected row struct"
    );

    // a subset of a validated field list is still valid
    StructNode::from_validated(fields)
}

fn project_field(variant: Variant, field: &Field) -> Option<Field> {
    let node = field.ty.variant_type(variant)?;

    let optional = match variant {
        Variant::Select => field.optional,
        Variant::Insert => field.optional || field.ty.is_optional_on_insert(),
        Variant::Update => true,
    };

    Some(Field {
        name: field.name.clone(),
        ty: ColumnType::new(node.clone()),
        storage_key: field.storage_key.clone(),
        optional,
    })
}
