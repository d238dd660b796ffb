use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub id: i32,
    pub product_id: i32,
    /// Product name resolved at read time, reflecting renames immediately.
    pub product_name: Option<String>,
    pub unit_price: f64,
    pub quantity: i32,
    /// `unit_price * quantity`, computed, never stored.
    pub line_total: f64,
}

impl OrderItemDto {
    pub fn line_total(unit_price: f64, quantity: i32) -> f64 {
        unit_price * quantity as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderItemDto {
    pub order_id: i32,
    pub product_id: i32,
    pub unit_price: f64,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderItemDto {
    pub product_id: i32,
    pub unit_price: f64,
    pub quantity: i32,
}
