use govlens_core::{FieldKind, FieldValue, Record, RecordStore, Schema};

/// Minimal schema: `id`, searchable `name` and `note`, categorical `cat`
#[allow(dead_code)]
pub fn simple_schema() -> Schema {
    Schema::builder("simple")
        .field("id", FieldKind::Text)
        .field("name", FieldKind::Text)
        .field("note", FieldKind::Text)
        .field("cat", FieldKind::Category)
        .id_field("id")
        .category_field("cat")
        .searchable(["name", "note"])
        .build()
}

/// Build a store from (name, category) pairs; ids are positional
#[allow(dead_code)]
pub fn simple_store(rows: &[(String, String)]) -> RecordStore {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, (name, cat))| {
            Record::new()
                .with("id", FieldValue::text(format!("r-{}", i)))
                .with("name", FieldValue::text(name.as_str()))
                .with("cat", FieldValue::category(cat.as_str()))
        })
        .collect();
    RecordStore::new(simple_schema(), records).unwrap()
}

/// Identifiers of records, in order
#[allow(dead_code)]
pub fn ids<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<String> {
    records
        .into_iter()
        .map(|r| r.text_of("id").into_owned())
        .collect()
}
