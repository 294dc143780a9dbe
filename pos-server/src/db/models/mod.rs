//! Database Models
//!
//! Record shapes as stored in SurrealDB. Money is stored as `f64` rounded to
//! 2 dp and converted to `Decimal` at the edge of the repository.

pub mod order;
pub mod product;
pub mod user;

pub use order::{OrderItemRecord, OrderRecord};
pub use product::ProductRecord;
pub use user::UserRecord;

use surrealdb::RecordId;

/// "table:key" form used by the API
pub(crate) fn id_string(id: &Option<RecordId>) -> String {
    id.as_ref().map(|t| t.to_string()).unwrap_or_default()
}
