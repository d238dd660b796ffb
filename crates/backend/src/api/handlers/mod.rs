pub mod customers;
pub mod order_items;
pub mod orders;
pub mod products;
pub mod suppliers;

use serde::Deserialize;

/// Common paging parameters; zero or negative values fall back to the
/// resource's default inside the service layer.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn page_number(&self) -> i64 {
        self.page_number.unwrap_or(0)
    }

    pub fn page_size(&self) -> i64 {
        self.page_size.unwrap_or(0)
    }
}
