use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    name: String,
    unit_price: BigDecimal,
    quantity: i32,
}

impl LineItem {
    pub fn new(
        name: impl Into<String>,
        unit_price: BigDecimal,
        quantity: i32,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if unit_price < BigDecimal::from(0) {
            return Err(DomainError::InvalidInput(format!(
                "unit price of '{}' must not be negative, got {}",
                name, unit_price
            )));
        }
        if quantity < 0 {
            return Err(DomainError::InvalidInput(format!(
                "quantity of '{}' must not be negative, got {}",
                name, quantity
            )));
        }
        Ok(Self {
            name,
            unit_price,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit_price(&self) -> &BigDecimal {
        &self.unit_price
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn line_total(&self) -> BigDecimal {
        &self.unit_price * BigDecimal::from(self.quantity)
    }
}

/// An order submission. Lives only for the duration of a `process` call.
#[derive(Debug, Clone)]
pub struct Order {
    order_id: String,
    products: Vec<LineItem>,
}

impl Order {
    pub fn new(order_id: impl Into<String>, products: Vec<LineItem>) -> Result<Self, DomainError> {
        let order_id = order_id.into();
        if order_id.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "order id must not be empty".to_string(),
            ));
        }
        Ok(Self { order_id, products })
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn products(&self) -> &[LineItem] {
        &self.products
    }

    pub fn total(&self) -> BigDecimal {
        self.products.iter().map(LineItem::line_total).sum()
    }

    pub fn into_products(self) -> Vec<LineItem> {
        self.products
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Processed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Processed => "processed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processed" => Ok(OrderStatus::Processed),
            other => Err(DomainError::Persistence(format!(
                "unknown order status '{}'",
                other
            ))),
        }
    }
}

/// The persisted form of an order. Never mutated once stored.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedOrder {
    pub order_id: String,
    pub products: Vec<LineItem>,
    pub total: BigDecimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// `page_number` is zero-based; `page_size` must be positive.
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::InvalidInput(
                "page size must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page_number) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(u64::from(self.page_size.max(1)))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
        }
    }
}
