use crate::node::{ColumnType, NodeError};
use serde::Serialize;
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
};

///
/// Field
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Field {
    /// Name the field is addressed by in code.
    pub name: String,
    pub ty: ColumnType,

    /// Key used in the external row representation, when it differs from
    /// `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,

    /// The key may be absent from a value.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            storage_key: None,
            optional: false,
        }
    }

    #[must_use]
    pub fn stored_as(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Effective external key: the explicit storage key, or the name.
    #[must_use]
    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_renamed(&self) -> bool {
        self.storage_key
            .as_deref()
            .is_some_and(|key| key != self.name)
    }
}

///
/// StructNode
///
/// Ordered fields with unique names and unique storage keys.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StructNode {
    fields: Vec<Field>,
}

impl StructNode {
    pub fn new(fields: impl IntoIterator<Item = Field>) -> Result<Self, NodeError> {
        let fields: Vec<Field> = fields.into_iter().collect();
        validate_fields(&fields)?;

        Ok(Self { fields })
    }

    #[must_use]
    pub fn builder() -> StructBuilder {
        StructBuilder::default()
    }

    // fields taken from an already validated struct
    pub(crate) const fn from_validated(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Map of field name to effective storage key.
    #[must_use]
    pub fn storage_keys(&self) -> BTreeMap<&str, &str> {
        self.fields
            .iter()
            .map(|f| (f.name.as_str(), f.storage_key()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl fmt::Display for StructNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("{}");
        }

        f.write_str("{ ")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let marker = if field.optional { "?" } else { "" };
            write!(f, "{}{marker}: {}", field.name, field.ty.node())?;
        }
        f.write_str(" }")
    }
}

fn validate_fields(fields: &[Field]) -> Result<(), NodeError> {
    let mut names: HashMap<&str, usize> = HashMap::with_capacity(fields.len());
    let mut keys: HashMap<&str, &str> = HashMap::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        if field.name.is_empty() {
            return Err(NodeError::EmptyFieldName { index });
        }
        if names.insert(field.name.as_str(), index).is_some() {
            return Err(NodeError::DuplicateField {
                name: field.name.clone(),
            });
        }
        if let Some(first) = keys.insert(field.storage_key(), field.name.as_str()) {
            return Err(NodeError::DuplicateStorageKey {
                key: field.storage_key().to_string(),
                first: first.to_string(),
                second: field.name.clone(),
            });
        }
    }

    Ok(())
}

///
/// StructBuilder
///

#[derive(Debug, Default)]
pub struct StructBuilder {
    fields: Vec<Field>,
}

impl StructBuilder {
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<StructNode, NodeError> {
        StructNode::new(self.fields)
    }
}
