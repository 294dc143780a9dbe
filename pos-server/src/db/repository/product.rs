//! Product Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::ProductRecord;
use shared::models::{Product, ProductCategory, ProductCreate, ProductUpdate};
use shared::order::money;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Products sorted by name, optionally filtered
    pub async fn find_all(
        &self,
        category: Option<ProductCategory>,
        include_inactive: bool,
    ) -> RepoResult<Vec<Product>> {
        let records: Vec<ProductRecord> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM product
                WHERE ($include_inactive OR is_active = true)
                    AND ($category = "" OR category = $category)
                ORDER BY name"#,
            )
            .bind(("include_inactive", include_inactive))
            .bind((
                "category",
                category.map(|c| c.as_str()).unwrap_or_default().to_string(),
            ))
            .await?
            .take(0)?;
        Ok(records.into_iter().map(Product::from).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let thing = parse_record_id(TABLE, id)?;
        let record: Option<ProductRecord> = self.base.db().select(thing).await?;
        Ok(record.map(Product::from))
    }

    pub async fn create(&self, data: ProductCreate) -> RepoResult<Product> {
        data.validate().map_err(RepoError::Validation)?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE product SET
                    name = $name,
                    price = $price,
                    category = $category,
                    is_active = true
                RETURN AFTER"#,
            )
            .bind(("name", data.name.trim().to_string()))
            .bind(("price", money::to_f64(data.price)))
            .bind(("category", data.category.as_str().to_string()))
            .await?;

        let created: Option<ProductRecord> = result.take(0)?;
        created
            .map(Product::from)
            .ok_or_else(|| RepoError::Database("Failed to create product".to_string()))
    }

    pub async fn update(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        data.validate().map_err(RepoError::Validation)?;
        let thing = parse_record_id(TABLE, id)?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    name = $name OR name,
                    price = IF $has_price THEN $price ELSE price END,
                    category = $category OR category,
                    is_active = IF $has_is_active THEN $is_active ELSE is_active END
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("name", data.name.map(|n| n.trim().to_string())))
            .bind(("has_price", data.price.is_some()))
            .bind(("price", data.price.map(money::to_f64)))
            .bind(("category", data.category.map(|c| c.as_str().to_string())))
            .bind(("has_is_active", data.is_active.is_some()))
            .bind(("is_active", data.is_active))
            .await?;

        result
            .take::<Option<ProductRecord>>(0)?
            .map(Product::from)
            .ok_or_else(|| RepoError::NotFound(format!("Product {} not found", id)))
    }

    /// Soft delete: the product disappears from the catalog but past orders keep their snapshot
    pub async fn deactivate(&self, id: &str) -> RepoResult<Product> {
        self.update(
            id,
            ProductUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
    }
}
