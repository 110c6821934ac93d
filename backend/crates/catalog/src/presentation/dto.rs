//! API DTOs (Data Transfer Objects)
//!
//! Prices go out as JSON numbers (`12.5`); input accepts numbers and
//! decimal strings (`"12.50"`).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::{CreateProductInput, ListProductsInput, UpdateProductInput};
use crate::domain::entity::product::Product;
use crate::domain::entity::summary::InventorySummary;

// ============================================================================
// Product
// ============================================================================

/// Product as returned by every endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.as_str().to_string(),
            sku: product.sku.map(|s| s.as_str().to_string()),
            description: product.description,
            price: product.price.amount(),
            quantity: product.quantity.value(),
            image_url: product.image_url,
            product_type: product.product_type,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Dashboard totals
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummaryResponse {
    pub products: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_inventory_value: Decimal,
    pub low_stock_alerts: u64,
}

impl From<InventorySummary> for InventorySummaryResponse {
    fn from(summary: InventorySummary) -> Self {
        Self {
            products: summary.products,
            total_inventory_value: summary.total_inventory_value,
            low_stock_alerts: summary.low_stock,
        }
    }
}

// ============================================================================
// Create
// ============================================================================

/// Create product request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub price: Decimal,
    pub quantity: Option<i64>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

impl From<CreateProductRequest> for CreateProductInput {
    fn from(req: CreateProductRequest) -> Self {
        Self {
            name: req.name,
            sku: req.sku,
            description: req.description,
            price: req.price,
            quantity: req.quantity,
            image_url: req.image_url,
            product_type: req.product_type,
        }
    }
}

// ============================================================================
// Update
// ============================================================================

/// Partial update request
///
/// Absent or `null` leaves a field unchanged; `""` clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub image_url: Option<String>,
    #[serde(rename = "type")]
    pub product_type: Option<String>,
}

impl From<UpdateProductRequest> for UpdateProductInput {
    fn from(req: UpdateProductRequest) -> Self {
        Self {
            name: req.name,
            sku: req.sku,
            description: req.description,
            price: req.price,
            quantity: req.quantity,
            image_url: req.image_url,
            product_type: req.product_type,
        }
    }
}

// ============================================================================
// Stock
// ============================================================================

/// Relative stock change: positive receives, negative picks
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustStockRequest {
    pub delta: i64,
}

// ============================================================================
// List
// ============================================================================

/// `GET /products` query string
///
/// Kept as strings so non-integer values can be reported as 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListProductsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl From<ListProductsQuery> for ListProductsInput {
    fn from(query: ListProductsQuery) -> Self {
        Self {
            page: query.page,
            limit: query.limit,
            search: query.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_number_or_string_price() {
        let from_number: CreateProductRequest =
            serde_json::from_str(r#"{"name":"A","price":12.5}"#).unwrap();
        let from_string: CreateProductRequest =
            serde_json::from_str(r#"{"name":"A","price":"12.5"}"#).unwrap();
        assert_eq!(from_number.price, from_string.price);
    }

    #[test]
    fn test_response_price_is_a_number() {
        let summary = InventorySummaryResponse {
            products: 1,
            total_inventory_value: Decimal::new(2550, 2),
            low_stock_alerts: 0,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalInventoryValue"], 25.5);
    }

    #[test]
    fn test_type_field_name() {
        let req: UpdateProductRequest = serde_json::from_str(r#"{"type":"tools"}"#).unwrap();
        assert_eq!(req.product_type.as_deref(), Some("tools"));
    }
}
