//! Product Model

use serde::{Deserialize, Serialize};
use shared::models::{Product, ProductCategory};
use shared::order::money;
use surrealdb::RecordId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub name: String,
    pub price: f64,
    pub category: ProductCategory,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: super::id_string(&record.id),
            name: record.name,
            price: money::to_decimal(record.price),
            category: record.category,
            is_active: record.is_active,
        }
    }
}
