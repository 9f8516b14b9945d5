//! One call site per entity for the whole variant set.

use crate::{
    codec::{self, DecodeError, EncodeError},
    config::CodecConfig,
    node::{SchemaNode, StructNode},
    project,
    value::Value,
    variant::Variant,
};
use serde::Serialize;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

///
/// DerivedSchemas
///
/// The three projections of one base struct, plus the entity's identifier
/// type when the caller supplies one.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DerivedSchemas {
    pub selectable: StructNode,
    pub insertable: StructNode,
    pub updateable: StructNode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SchemaNode>,
}

impl DerivedSchemas {
    #[must_use]
    pub const fn variant(&self, variant: Variant) -> &StructNode {
        match variant {
            Variant::Select => &self.selectable,
            Variant::Insert => &self.insertable,
            Variant::Update => &self.updateable,
        }
    }

    /// Decode an external row against one variant.
    pub fn decode(
        &self,
        variant: Variant,
        input: &serde_json::Value,
        config: &CodecConfig,
    ) -> Result<Value, DecodeError> {
        codec::decode_record(self.variant(variant), input, config)
    }

    /// Encode a typed row against one variant.
    pub fn encode(
        &self,
        variant: Variant,
        value: &Value,
        config: &CodecConfig,
    ) -> Result<serde_json::Value, EncodeError> {
        codec::encode_record(self.variant(variant), value, config)
    }
}

/// Derive select, insert and update shapes from the same base.
#[must_use]
pub fn get_schemas(base: &StructNode, id: Option<SchemaNode>) -> DerivedSchemas {
    DerivedSchemas {
        selectable: project::select(base),
        insertable: project::insert(base),
        updateable: project::update(base),
        id,
    }
}

///
/// SchemaCache
///
/// Write-once-per-entity memo of derived schemas. Derivation runs outside
/// the lock; when two callers race, the first published value wins and
/// both receive it.
///

#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: RwLock<HashMap<String, Arc<DerivedSchemas>>>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, entity: &str) -> Option<Arc<DerivedSchemas>> {
        // entries are never mutated after insert, so a poisoned map is still
        // consistent
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(entity)
            .cloned()
    }

    pub fn get_or_derive(
        &self,
        entity: &str,
        base: &StructNode,
        id: Option<SchemaNode>,
    ) -> Arc<DerivedSchemas> {
        if let Some(found) = self.get(entity) {
            return found;
        }

        let derived = Arc::new(get_schemas(base, id));
        tracing::debug!(entity, fields = base.len(), "derived entity schemas");

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        Arc::clone(entries.entry(entity.to_string()).or_insert(derived))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Field, with_column_variant, with_generated};
    use std::thread;

    fn post() -> StructNode {
        StructNode::new([
            Field::new(
                "id",
                with_column_variant(
                    SchemaNode::uuid(),
                    SchemaNode::uuid(),
                    SchemaNode::Never,
                    SchemaNode::Never,
                ),
            ),
            Field::new("createdAt", with_generated(SchemaNode::timestamp())),
            Field::new("title", SchemaNode::text()),
        ])
        .unwrap()
    }

    #[test]
    fn bundles_the_three_projections_and_the_id() {
        let base = post();
        let id = SchemaNode::named("PostId", SchemaNode::uuid());
        let schemas = get_schemas(&base, Some(id.clone()));

        assert_eq!(schemas.selectable, project::select(&base));
        assert_eq!(schemas.insertable, project::insert(&base));
        assert_eq!(schemas.updateable, project::update(&base));
        assert_eq!(schemas.id, Some(id));

        for variant in Variant::ALL {
            assert_eq!(schemas.variant(variant), &project::project(variant, &base));
        }
    }

    #[test]
    fn decodes_through_a_chosen_variant() {
        let schemas = get_schemas(&post(), None);
        let config = CodecConfig::default();
        let input = serde_json::json!({ "title": "hello" });

        let value = schemas.decode(Variant::Update, &input, &config).unwrap();
        assert_eq!(value, Value::record([("title", "hello")]));

        let err = schemas.decode(Variant::Select, &input, &config).unwrap_err();
        assert!(matches!(
            err.kind,
            codec::CodecErrorKind::MissingField { ref field } if field == "id"
        ));

        let encoded = schemas.encode(Variant::Insert, &value, &config).unwrap();
        assert_eq!(encoded, input);
    }

    #[test]
    fn id_is_omitted_when_not_supplied() {
        let schemas = get_schemas(&post(), None);
        let json = serde_json::to_value(&schemas).unwrap();

        assert!(schemas.id.is_none());
        assert!(json.get("id").is_none());
    }

    #[test]
    fn cache_derives_once_per_entity() {
        let cache = SchemaCache::new();
        let base = post();

        let first = cache.get_or_derive("post", &base, None);
        // a different base under the same key does not replace the entry
        let second = cache.get_or_derive("post", &StructNode::default(), None);

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
        assert!(cache.get("comment").is_none());
    }

    #[test]
    fn concurrent_callers_share_one_entry() {
        let cache = Arc::new(SchemaCache::new());
        let base = Arc::new(post());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let base = Arc::clone(&base);
                thread::spawn(move || cache.get_or_derive("post", &base, None))
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(cache.len(), 1);
        let published = cache.get("post").unwrap();
        assert!(results.iter().all(|r| Arc::ptr_eq(r, &published)));
    }
}
