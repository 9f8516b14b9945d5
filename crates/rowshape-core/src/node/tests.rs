use super::*;
use crate::variant::Variant;
use rowshape_primitives::ScalarKind;
use serde_json::json;

#[test]
fn rejects_duplicate_field_names() {
    let err = StructNode::new([
        Field::new("name", SchemaNode::text()),
        Field::new("name", SchemaNode::int()),
    ])
    .unwrap_err();

    assert_eq!(
        err,
        NodeError::DuplicateField {
            name: "name".to_string()
        }
    );
}

#[test]
fn rejects_empty_field_name() {
    let err = StructNode::builder()
        .field(Field::new("id", SchemaNode::uuid()))
        .field(Field::new("", SchemaNode::text()))
        .build()
        .unwrap_err();

    assert_eq!(err, NodeError::EmptyFieldName { index: 1 });
}

#[test]
fn rejects_two_fields_on_one_storage_key() {
    let err = StructNode::new([
        Field::new("displayName", SchemaNode::text()).stored_as("display_name"),
        Field::new("display_name", SchemaNode::text()),
    ])
    .unwrap_err();

    assert!(matches!(
        err,
        NodeError::DuplicateStorageKey { ref key, .. } if key == "display_name"
    ));
}

#[test]
fn storage_key_defaults_to_name() {
    let plain = Field::new("title", SchemaNode::text());
    let renamed = Field::new("displayName", SchemaNode::text()).stored_as("display_name");
    let same = Field::new("bio", SchemaNode::text()).stored_as("bio");

    assert_eq!(plain.storage_key(), "title");
    assert_eq!(renamed.storage_key(), "display_name");
    assert!(renamed.is_renamed());
    assert!(!same.is_renamed());
}

#[test]
fn nullable_is_idempotent() {
    let once = SchemaNode::text().nullable();
    let twice = once.clone().nullable();

    assert_eq!(once, SchemaNode::Union(vec![SchemaNode::text(), SchemaNode::Absent]));
    assert_eq!(once, twice);
}

#[test]
fn nullable_extends_an_existing_union() {
    let node = SchemaNode::union([SchemaNode::text(), SchemaNode::int()]).nullable();

    assert_eq!(
        node,
        SchemaNode::Union(vec![SchemaNode::text(), SchemaNode::int(), SchemaNode::Absent])
    );
}

#[test]
fn never_resolves_through_brands_and_empty_unions() {
    assert!(SchemaNode::Never.is_never());
    assert!(SchemaNode::Union(vec![]).is_never());
    assert!(SchemaNode::union([SchemaNode::Never, SchemaNode::Never]).is_never());
    assert!(SchemaNode::named("Hidden", SchemaNode::Never).is_never());

    assert!(!SchemaNode::union([SchemaNode::Never, SchemaNode::text()]).is_never());
    assert!(!SchemaNode::array(SchemaNode::Never).is_never());
}

#[test]
fn absent_detection_looks_through_brands() {
    let branded = SchemaNode::named("MaybeName", SchemaNode::text().nullable());

    assert!(branded.admits_absent());
    assert!(!SchemaNode::text().admits_absent());
    assert!(!SchemaNode::array(SchemaNode::text().nullable()).admits_absent());
}

#[test]
fn display_renders_the_shape() {
    let node = StructNode::new([
        Field::new("id", SchemaNode::named("UserId", SchemaNode::uuid())),
        Field::new("tags", SchemaNode::array(SchemaNode::text().nullable())),
        Field::new("role", SchemaNode::enumeration(["admin", "member"])),
        Field::new("bio", SchemaNode::text().nullable()).optional(),
    ])
    .unwrap();

    assert_eq!(
        node.to_string(),
        r#"{ id: UserId, tags: (text | null)[], role: "admin" | "member", bio?: text | null }"#
    );
    assert_eq!(StructNode::default().to_string(), "{}");
    assert_eq!(SchemaNode::Union(vec![]).to_string(), "never");
}

#[test]
fn serializes_with_kind_tags() {
    let node = SchemaNode::array(SchemaNode::scalar(ScalarKind::Int));

    assert_eq!(
        serde_json::to_value(&node).unwrap(),
        json!({ "kind": "array", "of": { "kind": "scalar", "of": "Int" } })
    );
}

#[test]
fn column_variant_keeps_declared_node_for_codec() {
    let column = with_column_variant(
        SchemaNode::uuid(),
        SchemaNode::uuid(),
        SchemaNode::Never,
        SchemaNode::Never,
    );

    assert_eq!(column.node(), &SchemaNode::uuid());
    assert!(column.variant_override().is_some());
    assert_eq!(column.variant_type(Variant::Select), Some(&SchemaNode::uuid()));
    assert_eq!(column.variant_type(Variant::Insert), None);
    assert_eq!(column.variant_type(Variant::Update), None);
}

#[test]
fn generated_column_is_missing_only_from_insert() {
    let column = with_generated(SchemaNode::timestamp());

    assert!(column.is_generated());
    assert_eq!(column.variant_type(Variant::Select), Some(&SchemaNode::timestamp()));
    assert_eq!(column.variant_type(Variant::Insert), None);
    assert_eq!(column.variant_type(Variant::Update), Some(&SchemaNode::timestamp()));
}

#[test]
fn annotations_are_exclusive() {
    let err = with_generated(SchemaNode::int())
        .try_column_variant(SchemaNode::int(), SchemaNode::Never, SchemaNode::int())
        .unwrap_err();
    assert_eq!(
        err,
        NodeError::ConflictingAnnotation {
            existing: "generated"
        }
    );

    let err = ColumnType::new(SchemaNode::int())
        .try_column_variant(SchemaNode::int(), SchemaNode::int(), SchemaNode::Never)
        .and_then(ColumnType::try_generated)
        .unwrap_err();
    assert!(matches!(err, NodeError::ConflictingAnnotation { .. }));
}

#[test]
fn optional_on_insert_is_derived_once_and_overridable() {
    let nullable = ColumnType::new(SchemaNode::text().nullable());
    assert!(nullable.is_optional_on_insert());

    let forced = nullable.optional_on_insert(false);
    assert!(!forced.is_optional_on_insert());

    let variant = with_column_variant(
        SchemaNode::int(),
        SchemaNode::int(),
        SchemaNode::int().nullable(),
        SchemaNode::int(),
    );
    assert!(variant.is_optional_on_insert());
}

#[test]
fn explicit_insert_optionality_survives_later_annotation() {
    let column = ColumnType::new(SchemaNode::int())
        .optional_on_insert(true)
        .try_column_variant(SchemaNode::int(), SchemaNode::int(), SchemaNode::int())
        .unwrap();
    assert!(column.is_optional_on_insert());

    let column = ColumnType::new(SchemaNode::text())
        .optional_on_insert(false)
        .nullable();
    assert!(!column.is_optional_on_insert());

    // inferred values still follow the new insert type
    let column = ColumnType::new(SchemaNode::int())
        .try_column_variant(
            SchemaNode::int(),
            SchemaNode::int().nullable(),
            SchemaNode::int(),
        )
        .unwrap();
    assert!(column.is_optional_on_insert());
}

#[test]
fn nullable_column_lifts_every_live_variant_type() {
    let column = with_column_variant(
        SchemaNode::int(),
        SchemaNode::int(),
        SchemaNode::Never,
        SchemaNode::text(),
    )
    .nullable();

    assert_eq!(column.node(), &SchemaNode::int().nullable());
    assert_eq!(
        column.variant_type(Variant::Select),
        Some(&SchemaNode::int().nullable())
    );
    assert_eq!(column.variant_type(Variant::Insert), None);
    assert_eq!(
        column.variant_type(Variant::Update),
        Some(&SchemaNode::text().nullable())
    );
}

fn arb_node() -> impl proptest::strategy::Strategy<Value = SchemaNode> {
    use proptest::prelude::*;

    let leaf = prop_oneof![
        Just(SchemaNode::text()),
        Just(SchemaNode::int()),
        Just(SchemaNode::Absent),
        Just(SchemaNode::Never),
    ];

    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(SchemaNode::array),
            prop::collection::vec(inner.clone(), 0..4).prop_map(SchemaNode::Union),
            inner.prop_map(|node| SchemaNode::named("Brand", node)),
        ]
    })
}

proptest::proptest! {
    #[test]
    fn nullable_always_admits_absent_and_is_idempotent(node in arb_node()) {
        let once = node.nullable();

        proptest::prop_assert!(once.admits_absent());
        proptest::prop_assert!(!once.is_never());
        proptest::prop_assert_eq!(once.clone().nullable(), once);
    }
}
