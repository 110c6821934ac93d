//! HTTP Handlers
//!
//! Every handler sits behind the auth gate and receives the verified
//! [`Principal`].

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use kernel::id::ProductId;
use kernel::pagination::Page;
use kernel::principal::Principal;
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::application::{
    AdjustStockUseCase, CreateProductUseCase, DeleteProductUseCase, GetProductUseCase,
    InventorySummaryUseCase, ListProductsUseCase, UpdateProductUseCase,
};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{
    AdjustStockRequest, CreateProductRequest, InventorySummaryResponse, ListProductsQuery,
    ProductResponse, UpdateProductRequest,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<CatalogConfig>,
}

/// Malformed ids are reported exactly like unknown ones
fn parse_product_id(raw: &str) -> CatalogResult<ProductId> {
    ProductId::parse_str(raw).ok_or(CatalogError::NotFound)
}

// ============================================================================
// List
// ============================================================================

/// GET /api/products?page&limit&search
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> CatalogResult<Json<Page<ProductResponse>>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let Query(query) = query.map_err(AppError::from)?;
    let use_case = ListProductsUseCase::new(state.repo.clone(), state.config.clone());
    let page = use_case.execute(query.into()).await?;
    Ok(Json(page.map(ProductResponse::from)))
}

// ============================================================================
// Summary
// ============================================================================

/// GET /api/products/summary
pub async fn inventory_summary<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<InventorySummaryResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let summary = InventorySummaryUseCase::new(state.repo.clone(), state.config.clone())
        .execute()
        .await?;
    Ok(Json(summary.into()))
}

// ============================================================================
// Create
// ============================================================================

/// POST /api/products
pub async fn create_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> CatalogResult<(StatusCode, Json<ProductResponse>)>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let Json(req) = payload.map_err(AppError::from)?;

    let product = CreateProductUseCase::new(state.repo.clone())
        .execute(req.into())
        .await?;

    tracing::debug!(user_id = %principal.user_id, product_id = %product.id, "Create requested");

    Ok((StatusCode::CREATED, Json(product.into())))
}

// ============================================================================
// Get
// ============================================================================

/// GET /api/products/{id}
pub async fn get_product<R>(
    State(state): State<CatalogAppState<R>>,
    Path(id): Path<String>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let id = parse_product_id(&id)?;
    let product = GetProductUseCase::new(state.repo.clone()).execute(id).await?;
    Ok(Json(product.into()))
}

// ============================================================================
// Update
// ============================================================================

/// PATCH /api/products/{id}
pub async fn update_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let id = parse_product_id(&id)?;
    let Json(req) = payload.map_err(AppError::from)?;

    let product = UpdateProductUseCase::new(state.repo.clone())
        .execute(id, req.into())
        .await?;

    tracing::debug!(user_id = %principal.user_id, product_id = %product.id, "Update requested");

    Ok(Json(product.into()))
}

// ============================================================================
// Delete
// ============================================================================

/// DELETE /api/products/{id}
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> CatalogResult<StatusCode>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let id = parse_product_id(&id)?;

    DeleteProductUseCase::new(state.repo.clone())
        .execute(id)
        .await?;

    tracing::debug!(user_id = %principal.user_id, product_id = %id, "Delete requested");

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Stock
// ============================================================================

/// POST /api/products/{id}/stock
pub async fn adjust_stock<R>(
    State(state): State<CatalogAppState<R>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    payload: Result<Json<AdjustStockRequest>, JsonRejection>,
) -> CatalogResult<Json<ProductResponse>>
where
    R: ProductRepository + Clone + Send + Sync + 'static,
{
    let id = parse_product_id(&id)?;
    let Json(req) = payload.map_err(AppError::from)?;

    let product = AdjustStockUseCase::new(state.repo.clone())
        .execute(id, req.delta)
        .await?;

    tracing::debug!(user_id = %principal.user_id, product_id = %id, "Stock change requested");

    Ok(Json(product.into()))
}
