use crate::{
    node::{NodeError, SchemaNode},
    variant::Variant,
};
use rowshape_primitives::ScalarKind;
use serde::Serialize;

///
/// VariantOverride
///
/// Three independent types for the same logical column. A `Never` member
/// removes the column from that variant.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct VariantOverride {
    pub select: SchemaNode,
    pub insert: SchemaNode,
    pub update: SchemaNode,
}

impl VariantOverride {
    #[must_use]
    pub const fn get(&self, variant: Variant) -> &SchemaNode {
        match variant {
            Variant::Select => &self.select,
            Variant::Insert => &self.insert,
            Variant::Update => &self.update,
        }
    }

    fn map(self, f: impl Fn(SchemaNode) -> SchemaNode) -> Self {
        Self {
            select: f(self.select),
            insert: f(self.insert),
            update: f(self.update),
        }
    }
}

///
/// ColumnAnnotation
///
/// A column is either overridden per variant or generated, never both.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ColumnAnnotation {
    Variant(VariantOverride),

    /// Assigned by the database; absent from insert payloads.
    Generated,
}

impl ColumnAnnotation {
    const fn label(&self) -> &'static str {
        match self {
            Self::Variant(_) => "a column variant",
            Self::Generated => "generated",
        }
    }
}

///
/// ColumnType
///
/// A field's declared node plus its annotation. Decoding and encoding only
/// ever look at `node`, so annotating a column never changes how values
/// validate against it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ColumnType {
    node: SchemaNode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotation: Option<ColumnAnnotation>,

    optional_on_insert: bool,

    // set through `optional_on_insert(..)`; annotations no longer re-infer it
    #[serde(skip)]
    insert_optionality_pinned: bool,
}

impl ColumnType {
    #[must_use]
    pub fn new(node: SchemaNode) -> Self {
        let optional_on_insert = node.admits_absent();

        Self {
            node,
            annotation: None,
            optional_on_insert,
            insert_optionality_pinned: false,
        }
    }

    #[must_use]
    pub const fn node(&self) -> &SchemaNode {
        &self.node
    }

    #[must_use]
    pub const fn annotation(&self) -> Option<&ColumnAnnotation> {
        self.annotation.as_ref()
    }

    #[must_use]
    pub const fn variant_override(&self) -> Option<&VariantOverride> {
        match &self.annotation {
            Some(ColumnAnnotation::Variant(over)) => Some(over),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_generated(&self) -> bool {
        matches!(self.annotation, Some(ColumnAnnotation::Generated))
    }

    /// Whether the key may be left out of an insert payload.
    #[must_use]
    pub const fn is_optional_on_insert(&self) -> bool {
        self.optional_on_insert
    }

    /// Set the insert optionality explicitly instead of the value inferred
    /// from the insert type. A later `nullable` or `try_column_variant` keeps
    /// this value.
    #[must_use]
    pub const fn optional_on_insert(mut self, optional: bool) -> Self {
        self.optional_on_insert = optional;
        self.insert_optionality_pinned = true;
        self
    }

    /// Make the declared node, and every non-never variant type, nullable.
    #[must_use]
    pub fn nullable(self) -> Self {
        let lift = |node: SchemaNode| {
            if node.is_never() {
                node
            } else {
                node.nullable()
            }
        };

        let annotation = match self.annotation {
            Some(ColumnAnnotation::Variant(over)) => {
                Some(ColumnAnnotation::Variant(over.map(lift)))
            }
            other => other,
        };
        let node = lift(self.node);

        let mut column = Self {
            node,
            annotation,
            optional_on_insert: self.optional_on_insert,
            insert_optionality_pinned: self.insert_optionality_pinned,
        };
        if !column.insert_optionality_pinned {
            column.optional_on_insert |= column.declared(Variant::Insert).admits_absent();
        }

        column
    }

    /// Attach a generated marker to an unannotated column.
    pub fn try_generated(self) -> Result<Self, NodeError> {
        self.annotate(ColumnAnnotation::Generated)
    }

    /// Attach a variant override to an unannotated column.
    pub fn try_column_variant(
        self,
        select: SchemaNode,
        insert: SchemaNode,
        update: SchemaNode,
    ) -> Result<Self, NodeError> {
        let optional_on_insert = insert.admits_absent();
        let mut column = self.annotate(ColumnAnnotation::Variant(VariantOverride {
            select,
            insert,
            update,
        }))?;
        if !column.insert_optionality_pinned {
            column.optional_on_insert = optional_on_insert;
        }

        Ok(column)
    }

    /// The type this column takes in `variant`, or `None` when the column
    /// does not exist in that variant.
    #[must_use]
    pub fn variant_type(&self, variant: Variant) -> Option<&SchemaNode> {
        if variant == Variant::Insert && self.is_generated() {
            return None;
        }

        let node = self.declared(variant);
        if node.is_never() { None } else { Some(node) }
    }

    // declared type for a variant before the never check
    fn declared(&self, variant: Variant) -> &SchemaNode {
        self.variant_override()
            .map_or(&self.node, |over| over.get(variant))
    }

    fn annotate(mut self, annotation: ColumnAnnotation) -> Result<Self, NodeError> {
        if let Some(existing) = &self.annotation {
            return Err(NodeError::ConflictingAnnotation {
                existing: existing.label(),
            });
        }
        self.annotation = Some(annotation);

        Ok(self)
    }
}

impl From<SchemaNode> for ColumnType {
    fn from(node: SchemaNode) -> Self {
        Self::new(node)
    }
}

impl From<ScalarKind> for ColumnType {
    fn from(kind: ScalarKind) -> Self {
        Self::new(SchemaNode::Scalar(kind))
    }
}

/// Attach independent select, insert and update types to `node`.
///
/// The returned column decodes and encodes exactly like `node`; the three
/// types only matter to the projections.
#[must_use]
pub fn with_column_variant(
    node: SchemaNode,
    select: SchemaNode,
    insert: SchemaNode,
    update: SchemaNode,
) -> ColumnType {
    let optional_on_insert = insert.admits_absent();

    ColumnType {
        node,
        annotation: Some(ColumnAnnotation::Variant(VariantOverride {
            select,
            insert,
            update,
        })),
        optional_on_insert,
        insert_optionality_pinned: false,
    }
}

/// Mark a column as database-assigned.
#[must_use]
pub fn with_generated(node: SchemaNode) -> ColumnType {
    ColumnType {
        annotation: Some(ColumnAnnotation::Generated),
        ..ColumnType::new(node)
    }
}
