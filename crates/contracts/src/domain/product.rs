use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub product_name: String,
    pub supplier_id: i32,
    /// Supplier company name, resolved at read time. Never persisted.
    pub supplier_name: Option<String>,
    pub unit_price: f64,
    pub package: Option<String>,
    pub is_discontinued: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDto {
    pub product_name: String,
    pub supplier_id: i32,
    pub unit_price: f64,
    pub package: Option<String>,
    #[serde(default)]
    pub is_discontinued: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDto {
    pub product_name: String,
    pub supplier_id: i32,
    pub unit_price: f64,
    pub package: Option<String>,
    #[serde(default)]
    pub is_discontinued: bool,
}

/// Catalog listing descriptor. Absent filters impose no constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    #[serde(default = "default_page_number")]
    pub page_number: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// Case-insensitive substring match against the product name.
    pub search: Option<String>,
    pub supplier_id: Option<i32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub discontinued: Option<bool>,

    /// One of `name`, `price`, `createdAt`.
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// One of `asc`, `desc`.
    #[serde(default = "default_sort_dir")]
    pub sort_dir: String,
}

fn default_page_number() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

fn default_sort_by() -> String {
    "name".to_string()
}

fn default_sort_dir() -> String {
    "asc".to_string()
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
            search: None,
            supplier_id: None,
            min_price: None,
            max_price: None,
            discontinued: None,
            sort_by: default_sort_by(),
            sort_dir: default_sort_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_from_empty_json() {
        let q: ProductQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.page_number, 1);
        assert_eq!(q.page_size, 20);
        assert_eq!(q.sort_by, "name");
        assert_eq!(q.sort_dir, "asc");
        assert!(q.search.is_none());
    }
}
