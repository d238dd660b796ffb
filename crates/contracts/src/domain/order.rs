use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order_item::OrderItemDto;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: i32,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub customer_id: i32,
    /// "first last" of the owning customer, resolved at read time.
    pub customer_name: Option<String>,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderDto {
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub customer_id: i32,
    pub total_amount: f64,
}

/// The owning customer is fixed at creation; updates replace the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderDto {
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderWithItemsDto {
    pub id: i32,
    pub order_number: String,
    pub order_date: DateTime<Utc>,
    pub customer_id: i32,
    pub customer_name: Option<String>,
    pub total_amount: f64,
    pub items: Vec<OrderItemDto>,
}
