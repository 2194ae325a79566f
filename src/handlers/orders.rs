use std::str::FromStr;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::order_processor::OrderProcessor;
use crate::application::order_query::OrderQueryService;
use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, Order, Page, PageRequest, ProcessedOrder};
use crate::errors::AppError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

// ── Request / response DTOs ──────────────────────────────────────────────────

/// A price sent either as a JSON number (`10.5`) or a decimal string (`"10.50"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl PriceInput {
    fn to_decimal(&self) -> Result<BigDecimal, DomainError> {
        let text = match self {
            PriceInput::Text(s) => s.trim().to_string(),
            PriceInput::Number(n) => n.to_string(),
        };
        BigDecimal::from_str(&text)
            .map_err(|e| DomainError::InvalidInput(format!("invalid unit price '{}': {}", text, e)))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    #[schema(value_type = String, example = "10.00")]
    pub unit_price: PriceInput,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order_id: String,
    #[serde(default)]
    pub products: Vec<ProductRequest>,
}

impl TryFrom<OrderRequest> for Order {
    type Error = DomainError;

    fn try_from(req: OrderRequest) -> Result<Self, Self::Error> {
        let products = req
            .products
            .into_iter()
            .map(|p| LineItem::new(p.name, p.unit_price.to_decimal()?, p.quantity))
            .collect::<Result<Vec<_>, _>>()?;
        Order::new(req.order_id, products)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub name: String,
    pub unit_price: String,
    pub quantity: i32,
    pub total_price: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: String,
    pub products: Vec<ProductResponse>,
    pub total: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ProcessedOrder> for OrderResponse {
    fn from(order: ProcessedOrder) -> Self {
        Self {
            products: order
                .products
                .iter()
                .map(|p| ProductResponse {
                    name: p.name().to_string(),
                    unit_price: p.unit_price().to_string(),
                    quantity: p.quantity(),
                    total_price: p.line_total().to_string(),
                })
                .collect(),
            order_id: order.order_id,
            total: order.total.to_string(),
            status: order.status.to_string(),
            created_at: order.created_at.to_rfc3339(),
            updated_at: order.updated_at.to_rfc3339(),
        }
    }
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListOrdersParams {
    /// Page number (0-based). Defaults to 0.
    #[serde(default)]
    pub page: u32,
    /// Number of items per page. Defaults to 10, maximum 100.
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderPageResponse {
    pub content: Vec<OrderResponse>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl From<Page<ProcessedOrder>> for OrderPageResponse {
    fn from(page: Page<ProcessedOrder>) -> Self {
        let total_pages = page.total_pages();
        let page = page.map(OrderResponse::from);
        Self {
            content: page.content,
            page_number: page.page_number,
            page_size: page.page_size,
            total_elements: page.total_elements,
            total_pages,
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// Undecodable bodies and query strings get the same `{"error": ..}` shape as
/// every other 400.
fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::QueryConfig::default().error_handler(query_error))
            .route("", web::post().to(receive_order))
            .route("", web::get().to(list_orders))
            .route("/{id}", web::get().to(get_order)),
    );
}

/// POST /orders
///
/// Processes an order submission. Resubmitting an id that was processed in
/// the last 24 hours is accepted and ignored.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = OrderRequest,
    responses(
        (status = 200, description = "Order processed (or already processed)"),
        (status = 400, description = "Invalid order"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn receive_order(
    processor: web::Data<OrderProcessor>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = Order::try_from(body.into_inner())?;

    web::block(move || processor.process(order))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().finish())
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = String, Path, description = "Order identifier"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    queries: web::Data<OrderQueryService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || queries.find_by_id(&order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders
///
/// Returns one page of processed orders in store order.
#[utoipa::path(
    get,
    path = "/orders",
    params(ListOrdersParams),
    responses(
        (status = 200, description = "Page of orders", body = OrderPageResponse),
        (status = 400, description = "Invalid page request"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    queries: web::Data<OrderQueryService>,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    if params.size > MAX_PAGE_SIZE {
        return Err(AppError::BadRequest(format!(
            "page size must be at most {}",
            MAX_PAGE_SIZE
        )));
    }
    let page = PageRequest::new(params.page, params.size)?;

    let result = web::block(move || queries.find_all(page))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderPageResponse::from(result)))
}
