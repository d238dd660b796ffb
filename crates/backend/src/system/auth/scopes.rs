//! Scope grants carried in the access token (`scope` claim,
//! space-delimited, Auth0 style).

pub const CUSTOMERS_READ: &str = "read:customers";
pub const CUSTOMERS_WRITE: &str = "write:customers";

pub const ORDERS_READ: &str = "read:orders";
pub const ORDERS_WRITE: &str = "write:orders";

pub const ORDER_ITEMS_READ: &str = "read:orderItems";
pub const ORDER_ITEMS_WRITE: &str = "write:orderItems";

pub const PRODUCTS_READ: &str = "read:products";
pub const PRODUCTS_WRITE: &str = "write:products";

const READ_SCOPES: [&str; 4] = [CUSTOMERS_READ, ORDERS_READ, ORDER_ITEMS_READ, PRODUCTS_READ];
const WRITE_SCOPES: [&str; 4] = [CUSTOMERS_WRITE, ORDERS_WRITE, ORDER_ITEMS_WRITE, PRODUCTS_WRITE];

/// Scope grant issued at login. Regular accounts get the read scopes,
/// admin accounts additionally the write scopes.
pub fn scopes_for(is_admin: bool) -> String {
    let mut scopes: Vec<&str> = READ_SCOPES.to_vec();
    if is_admin {
        scopes.extend_from_slice(&WRITE_SCOPES);
    }
    scopes.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_user_gets_read_scopes_only() {
        let scopes = scopes_for(false);
        assert!(scopes.contains(CUSTOMERS_READ));
        assert!(scopes.contains(PRODUCTS_READ));
        assert!(!scopes.contains(CUSTOMERS_WRITE));
        assert!(!scopes.contains(PRODUCTS_WRITE));
    }

    #[test]
    fn test_admin_gets_write_scopes() {
        let scopes = scopes_for(true);
        assert!(scopes.contains(ORDERS_WRITE));
        assert!(scopes.contains(ORDER_ITEMS_WRITE));
    }
}
