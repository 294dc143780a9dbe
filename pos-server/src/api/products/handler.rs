//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{Product, ProductCategory, ProductCreate, ProductUpdate};
use shared::order::money;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Category name, or "ALL"
    pub category: Option<String>,
    /// Include deactivated products (admin only)
    #[serde(default)]
    pub include_inactive: bool,
}

fn parse_category(raw: Option<&str>) -> AppResult<Option<ProductCategory>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s.eq_ignore_ascii_case("ALL") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|e: String| AppError::with_message(ErrorCode::ProductInvalidCategory, e)),
    }
}

fn repo(state: &ServerState) -> ProductRepository {
    ProductRepository::new(state.get_db())
}

/// GET /api/products - 商品列表 (按名称排序)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    if query.include_inactive && !user.is_admin() {
        return Err(AppError::new(ErrorCode::AdminRequired));
    }
    let category = parse_category(query.category.as_deref())?;

    let products = repo(&state)
        .find_all(category, query.include_inactive)
        .await?;
    Ok(Json(products))
}

/// GET /api/products/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let product = repo(&state)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_price(Some(payload.price))?;
    payload.validate().map_err(AppError::validation)?;
    let product = repo(&state).create(payload).await?;
    tracing::info!(product_id = %product.id, name = %product.name, price = %product.price, "Product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// PUT /api/products/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validate_price(payload.price)?;
    payload.validate().map_err(AppError::validation)?;
    let repo = repo(&state);
    if repo.find_by_id(&id).await?.is_none() {
        return Err(product_not_found(&id));
    }
    let product = repo.update(&id, payload).await?;
    tracing::info!(product_id = %product.id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/products/{id} - 软删除 (停售)
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = repo(&state);
    if repo.find_by_id(&id).await?.is_none() {
        return Err(product_not_found(&id));
    }
    let product = repo.deactivate(&id).await?;
    tracing::info!(product_id = %product.id, "Product deactivated");
    Ok(Json(product))
}

fn product_not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", id)
}

fn validate_price(price: Option<Decimal>) -> AppResult<()> {
    match price {
        Some(price) => money::validate_price(price)
            .map_err(|e| AppError::with_message(ErrorCode::ProductInvalidPrice, e)),
        None => Ok(()),
    }
}
