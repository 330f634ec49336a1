use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use backoffice_admin::actions::BulkOutcome;
use backoffice_admin::filters::{parse_payment_status, StockBucket};
use backoffice_admin::registry::Entity;
use backoffice_admin::views::{CollectionRow, CustomerRow, OrderRow, ProductRow};
use backoffice_core::customer::Membership;
use backoffice_core::repository::{CustomerQuery, OrderQuery, Page, ProductQuery};
use backoffice_invoice::ExportBundle;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/admin/schema", get(schema))
        .route("/admin/customers", get(list_customers))
        .route(
            "/admin/customers/{id}/membership",
            patch(update_membership),
        )
        .route("/admin/products", get(list_products))
        .route(
            "/admin/products/{id}/unit-price",
            patch(update_unit_price),
        )
        .route(
            "/admin/products/actions/clear-inventory",
            post(clear_inventory),
        )
        .route("/admin/collections", get(list_collections))
        .route("/admin/orders", get(list_orders))
        .route(
            "/admin/orders/{id}/payment-status",
            patch(update_payment_status),
        )
        .route(
            "/admin/orders/actions/download-invoices",
            post(download_invoices),
        )
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CustomerListParams {
    pub search: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    pub collection: Option<Uuid>,
    pub stock: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    pub customer: Option<Uuid>,
    pub payment_status: Option<String>,
    pub page: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMembershipRequest {
    /// One-letter membership code: B, S or G
    pub membership: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUnitPriceRequest {
    pub unit_price: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePaymentStatusRequest {
    /// One-letter payment status code: P, C or F
    pub payment_status: String,
}

/// An admin row selection, as posted by the console's bulk actions
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub updated: bool,
}

// ============================================================================
// Schema
// ============================================================================

/// GET /admin/schema
/// The registration tables the console renders its list pages from
pub async fn schema(State(state): State<AppState>) -> Json<backoffice_admin::AdminRegistry> {
    Json(state.registry.as_ref().clone())
}

// ============================================================================
// Customers
// ============================================================================

/// GET /admin/customers
pub async fn list_customers(
    State(state): State<AppState>,
    Query(params): Query<CustomerListParams>,
) -> Result<Json<Vec<CustomerRow>>, AppError> {
    let query = CustomerQuery {
        search: params.search,
        page: page_for(&state, Entity::Customers, params.page),
    };
    let rows = state.customers.list(&query).await?;
    Ok(Json(rows.into_iter().map(CustomerRow::from).collect()))
}

/// PATCH /admin/customers/{id}/membership
pub async fn update_membership(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateMembershipRequest>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let membership = Membership::from_code(&req.membership).ok_or_else(|| {
        AppError::Validation(format!("unknown membership code: {}", req.membership))
    })?;

    let updated = state.customers.update_membership(id, membership).await?;
    if !updated {
        return Err(AppError::NotFound(format!("customer {id} not found")));
    }
    Ok(Json(UpdatedResponse { updated }))
}

// ============================================================================
// Products
// ============================================================================

/// GET /admin/products
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
) -> Result<Json<Vec<ProductRow>>, AppError> {
    let (inventory_min, inventory_max) = match params.stock.as_deref() {
        Some(value) => {
            let bucket = StockBucket::parse(value)
                .ok_or_else(|| AppError::Validation(format!("unknown stock bucket: {value}")))?;
            let (min, max) = bucket.bounds();
            (Some(min), max)
        }
        None => (None, None),
    };

    let query = ProductQuery {
        collection_id: params.collection,
        inventory_min,
        inventory_max,
        page: page_for(&state, Entity::Products, params.page),
    };
    let rows = state.products.list(&query).await?;
    Ok(Json(rows.into_iter().map(ProductRow::from).collect()))
}

/// PATCH /admin/products/{id}/unit-price
pub async fn update_unit_price(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUnitPriceRequest>,
) -> Result<Json<UpdatedResponse>, AppError> {
    if req.unit_price.is_sign_negative() {
        return Err(AppError::Validation(
            "unit price must not be negative".to_string(),
        ));
    }

    let updated = state.products.update_unit_price(id, req.unit_price).await?;
    if !updated {
        return Err(AppError::NotFound(format!("product {id} not found")));
    }
    Ok(Json(UpdatedResponse { updated }))
}

/// POST /admin/products/actions/clear-inventory
/// Bulk action: zero the inventory of the selected products
pub async fn clear_inventory(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<BulkOutcome>, AppError> {
    let affected = state.products.clear_inventory(&req.ids).await?;
    tracing::info!("cleared inventory for {} of {} products", affected, req.ids.len());
    Ok(Json(BulkOutcome::inventory_cleared(req.ids.len(), affected)))
}

// ============================================================================
// Collections
// ============================================================================

/// GET /admin/collections
pub async fn list_collections(
    State(state): State<AppState>,
) -> Result<Json<Vec<CollectionRow>>, AppError> {
    let rows = state.collections.list().await?;
    Ok(Json(rows.into_iter().map(CollectionRow::from).collect()))
}

// ============================================================================
// Orders
// ============================================================================

/// GET /admin/orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> Result<Json<Vec<OrderRow>>, AppError> {
    let payment_status = match params.payment_status.as_deref() {
        Some(value) => Some(parse_payment_status(value).ok_or_else(|| {
            AppError::Validation(format!("unknown payment status: {value}"))
        })?),
        None => None,
    };

    let query = OrderQuery {
        customer_id: params.customer,
        payment_status,
        page: page_for(&state, Entity::Orders, params.page),
    };
    let rows = state.orders.list(&query).await?;
    Ok(Json(rows.into_iter().map(OrderRow::from).collect()))
}

/// PATCH /admin/orders/{id}/payment-status
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePaymentStatusRequest>,
) -> Result<Json<UpdatedResponse>, AppError> {
    let status = parse_payment_status(&req.payment_status).ok_or_else(|| {
        AppError::Validation(format!("unknown payment status: {}", req.payment_status))
    })?;

    let updated = state.orders.update_payment_status(id, status).await?;
    if !updated {
        return Err(AppError::NotFound(format!("order {id} not found")));
    }
    Ok(Json(UpdatedResponse { updated }))
}

/// POST /admin/orders/actions/download-invoices
/// Bulk action: export one invoice PDF per selected order; several orders
/// pack into a ZIP. An empty selection produces no file and no error.
pub async fn download_invoices(
    State(state): State<AppState>,
    Json(req): Json<SelectionRequest>,
) -> Result<Response, AppError> {
    let bundle = state
        .exporter
        .export(&req.ids)
        .await
        .map_err(AppError::Export)?;

    let skipped = bundle.report().skipped();
    match bundle {
        ExportBundle::Empty { report } => {
            if !report.outcomes.is_empty() || !report.warnings.is_empty() {
                tracing::warn!("invoice export produced no documents: {:?}", report);
            }
            Ok(with_skip_header(
                StatusCode::NO_CONTENT.into_response(),
                skipped,
            )?)
        }
        ExportBundle::Single {
            filename, bytes, ..
        } => file_response("application/pdf", &filename, bytes, skipped),
        ExportBundle::Archive {
            filename, bytes, ..
        } => file_response("application/zip", &filename, bytes, skipped),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn page_for(state: &AppState, entity: Entity, page: Option<u32>) -> Page {
    Page::new(page.unwrap_or(1).max(1), state.registry.page_size(entity))
}

fn file_response(
    content_type: &str,
    filename: &str,
    bytes: Vec<u8>,
    skipped: usize,
) -> Result<Response, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type).map_err(anyhow::Error::from)?,
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(anyhow::Error::from)?,
    );
    with_skip_header((headers, bytes).into_response(), skipped)
}

fn with_skip_header(mut response: Response, skipped: usize) -> Result<Response, AppError> {
    if skipped > 0 {
        response.headers_mut().insert(
            HeaderName::from_static("x-export-skipped"),
            HeaderValue::from_str(&skipped.to_string()).map_err(anyhow::Error::from)?,
        );
    }
    Ok(response)
}
