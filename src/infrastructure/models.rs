use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::errors::DomainError;
use crate::domain::order::{LineItem, ProcessedOrder};
use crate::schema::processed_orders;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = processed_orders)]
#[diesel(primary_key(order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProcessedOrderRow {
    pub order_id: String,
    pub products: Value,
    pub total: BigDecimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Shape of one element of the `products` JSONB array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDocument {
    pub name: String,
    pub unit_price: BigDecimal,
    pub quantity: i32,
}

impl From<&LineItem> for ProductDocument {
    fn from(item: &LineItem) -> Self {
        Self {
            name: item.name().to_string(),
            unit_price: item.unit_price().clone(),
            quantity: item.quantity(),
        }
    }
}

impl TryFrom<&ProcessedOrder> for ProcessedOrderRow {
    type Error = DomainError;

    fn try_from(order: &ProcessedOrder) -> Result<Self, Self::Error> {
        let products: Vec<ProductDocument> = order.products.iter().map(Into::into).collect();
        Ok(Self {
            order_id: order.order_id.clone(),
            products: serde_json::to_value(products)?,
            total: order.total.clone(),
            status: order.status.as_str().to_string(),
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }
}

impl TryFrom<ProcessedOrderRow> for ProcessedOrder {
    type Error = DomainError;

    fn try_from(row: ProcessedOrderRow) -> Result<Self, Self::Error> {
        let documents: Vec<ProductDocument> = serde_json::from_value(row.products)?;
        let products = documents
            .into_iter()
            .map(|d| LineItem::new(d.name, d.unit_price, d.quantity))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::Persistence(format!("corrupt stored line item: {}", e)))?;
        Ok(Self {
            order_id: row.order_id,
            products,
            total: row.total,
            status: row.status.parse()?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Persistence(e.to_string())
    }
}
