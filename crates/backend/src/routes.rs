use axum::http::{header, Method};
use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers;
use crate::system;
use crate::system::auth::middleware as auth;

/// All application routes with their authorization policies. Reads need
/// the resource's read scope, writes its write scope; products accept
/// write-scope-or-admin on mutations and admin-only on delete;
/// suppliers are admin-only throughout.
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH ROUTES (PUBLIC)
        // ========================================
        .route("/api/v1/auth/login", post(system::handlers::auth::login))
        .route("/api/v1/auth/refresh", post(system::handlers::auth::refresh))
        .route("/api/v1/auth/logout", post(system::handlers::auth::logout))
        .route(
            "/api/v1/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(auth::require_auth)),
        )
        // ========================================
        // USER MANAGEMENT (ADMIN ONLY)
        // ========================================
        .route(
            "/api/v1/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(auth::require_admin)),
        )
        .route(
            "/api/v1/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(auth::require_admin)),
        )
        .route(
            "/api/v1/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(auth::require_auth)),
        )
        // ========================================
        // CUSTOMERS
        // ========================================
        .route(
            "/api/v1/customers",
            get(handlers::customers::list).layer(middleware::from_fn(auth::customers_read)),
        )
        .route(
            "/api/v1/customers",
            post(handlers::customers::create).layer(middleware::from_fn(auth::customers_write)),
        )
        .route(
            "/api/v1/customers/:id",
            get(handlers::customers::get_by_id).layer(middleware::from_fn(auth::customers_read)),
        )
        .route(
            "/api/v1/customers/:id",
            put(handlers::customers::update)
                .delete(handlers::customers::delete)
                .layer(middleware::from_fn(auth::customers_write)),
        )
        .route(
            "/api/v1/customers/:id/orders",
            get(handlers::customers::get_with_orders)
                .layer(middleware::from_fn(auth::customers_read)),
        )
        // ========================================
        // SUPPLIERS (ADMIN ONLY)
        // ========================================
        .route(
            "/api/v1/suppliers",
            get(handlers::suppliers::list)
                .post(handlers::suppliers::create)
                .layer(middleware::from_fn(auth::require_admin)),
        )
        .route(
            "/api/v1/suppliers/:id",
            get(handlers::suppliers::get_by_id)
                .put(handlers::suppliers::update)
                .delete(handlers::suppliers::delete)
                .layer(middleware::from_fn(auth::require_admin)),
        )
        // ========================================
        // PRODUCTS
        // ========================================
        .route(
            "/api/v1/products",
            get(handlers::products::list).layer(middleware::from_fn(auth::products_read)),
        )
        .route(
            "/api/v1/products",
            post(handlers::products::create).layer(middleware::from_fn(auth::products_write)),
        )
        .route(
            "/api/v1/products/:id",
            get(handlers::products::get_by_id).layer(middleware::from_fn(auth::products_read)),
        )
        .route(
            "/api/v1/products/:id",
            put(handlers::products::update).layer(middleware::from_fn(auth::products_write)),
        )
        .route(
            "/api/v1/products/:id",
            delete(handlers::products::delete).layer(middleware::from_fn(auth::require_admin)),
        )
        // ========================================
        // ORDERS
        // ========================================
        .route(
            "/api/v1/orders",
            get(handlers::orders::list).layer(middleware::from_fn(auth::orders_read)),
        )
        .route(
            "/api/v1/orders",
            post(handlers::orders::create).layer(middleware::from_fn(auth::orders_write)),
        )
        .route(
            "/api/v1/orders/:id",
            get(handlers::orders::get_by_id).layer(middleware::from_fn(auth::orders_read)),
        )
        .route(
            "/api/v1/orders/:id",
            put(handlers::orders::update)
                .delete(handlers::orders::delete)
                .layer(middleware::from_fn(auth::orders_write)),
        )
        .route(
            "/api/v1/orders/:id/items",
            get(handlers::orders::get_with_items).layer(middleware::from_fn(auth::orders_read)),
        )
        // ========================================
        // ORDER ITEMS
        // ========================================
        .route(
            "/api/v1/order-items",
            get(handlers::order_items::list).layer(middleware::from_fn(auth::order_items_read)),
        )
        .route(
            "/api/v1/order-items",
            post(handlers::order_items::create)
                .layer(middleware::from_fn(auth::order_items_write)),
        )
        .route(
            "/api/v1/order-items/:id",
            get(handlers::order_items::get_by_id)
                .layer(middleware::from_fn(auth::order_items_read)),
        )
        .route(
            "/api/v1/order-items/:id",
            put(handlers::order_items::update)
                .delete(handlers::order_items::delete)
                .layer(middleware::from_fn(auth::order_items_write)),
        )
}

/// Routes wrapped in the cross-cutting pipeline. Outermost first:
/// CORS, correlation ids, request logging, security headers,
/// problem-details enrichment.
pub fn configure_app() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    configure_routes()
        .layer(middleware::from_fn(
            system::middleware::problem_details::problem_context,
        ))
        .layer(middleware::from_fn(
            system::middleware::security_headers::security_headers,
        ))
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(middleware::from_fn(
            system::middleware::correlation::correlation_context,
        ))
        .layer(cors)
}
