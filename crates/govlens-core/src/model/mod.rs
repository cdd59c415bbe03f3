pub mod record;
pub mod schema;
pub mod value;

pub use record::Record;
pub use schema::{FieldSpec, Schema, SchemaBuilder};
pub use value::{FieldKind, FieldValue};
