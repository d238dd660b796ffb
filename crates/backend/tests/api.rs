use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use backend::routes;
use backend::shared::data::db;
use backend::system::initialization;

static INIT: tokio::sync::OnceCell<String> = tokio::sync::OnceCell::const_new();

/// One database and one admin login per test binary. Every test works
/// on its own rows, so sharing the store is safe.
async fn setup() -> (Router, String) {
    let token = INIT
        .get_or_init(|| async {
            let db_path =
                std::env::temp_dir().join(format!("trading_api_test_{}.db", std::process::id()));
            let _ = std::fs::remove_file(&db_path);
            db::initialize_database(Some(db_path.to_str().unwrap()))
                .await
                .expect("database init");
            initialization::ensure_admin_user_exists()
                .await
                .expect("admin bootstrap");

            let app = routes::configure_app();
            let response = app
                .oneshot(post_json(
                    "/api/v1/auth/login",
                    None,
                    json!({ "username": "admin", "password": "admin" }),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "admin login failed");
            let body = read_json(response).await;
            body["access_token"].as_str().unwrap().to_string()
        })
        .await
        .clone();

    (routes::configure_app(), token)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn post_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn put_json(uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("DELETE").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn parse_ts(value: &Value) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(value.as_str().expect("timestamp"))
        .expect("rfc3339 timestamp")
        .with_timezone(&chrono::Utc)
}

async fn create_supplier(app: &Router, token: &str, company_name: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/suppliers",
            Some(token),
            json!({ "companyName": company_name }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap()
}

async fn create_customer(app: &Router, token: &str, first: &str, last: &str) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/customers",
            Some(token),
            json!({ "firstName": first, "lastName": last }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap()
}

async fn create_product(
    app: &Router,
    token: &str,
    supplier_id: i64,
    name: &str,
    price: f64,
) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/products",
            Some(token),
            json!({ "productName": name, "supplierId": supplier_id, "unitPrice": price }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap()
}

async fn create_order(
    app: &Router,
    token: &str,
    customer_id: i64,
    number: &str,
    date: &str,
    amount: f64,
) -> i64 {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/orders",
            Some(token),
            json!({
                "orderNumber": number,
                "orderDate": date,
                "customerId": customer_id,
                "totalAmount": amount
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_customer_create_then_fetch_round_trip() {
    let (app, token) = setup().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/customers",
            Some(&token),
            json!({
                "firstName": "Jane",
                "lastName": "Smith",
                "city": "Oslo",
                "country": "Norway",
                "phone": "555-0100"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
        .expect("Location header");

    let body = read_json(response).await;
    let id = body["id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(location, format!("/api/v1/customers/{id}"));
    assert!(body["createdAt"].is_string());
    assert!(body["updatedAt"].is_null());

    let response = app
        .clone()
        .oneshot(get(&format!("/api/v1/customers/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = read_json(response).await;
    assert_eq!(fetched["firstName"], "Jane");
    assert_eq!(fetched["lastName"], "Smith");
    assert_eq!(fetched["city"], "Oslo");
    assert_eq!(fetched["country"], "Norway");
    assert_eq!(fetched["phone"], "555-0100");
    assert!(fetched["createdAt"].is_string());
    assert!(fetched["updatedAt"].is_null());
}

#[tokio::test]
async fn test_missing_customer_returns_404() {
    let (app, token) = setup().await;

    let response = app
        .clone()
        .oneshot(get("/api/v1/customers/999999", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(delete("/api/v1/customers/999999", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(put_json(
            "/api/v1/customers/999999",
            Some(&token),
            json!({ "firstName": "No", "lastName": "One" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_touches_updated_at_and_is_idempotent() {
    let (app, token) = setup().await;
    let id = create_customer(&app, &token, "Ida", "Berg").await;

    let update = json!({ "firstName": "Ida", "lastName": "Berg-Hansen", "city": "Bergen" });

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/v1/customers/{id}"),
            Some(&token),
            update.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let first = read_json(
        app.clone()
            .oneshot(get(&format!("/api/v1/customers/{id}"), Some(&token)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(first["lastName"], "Berg-Hansen");
    let created = parse_ts(&first["createdAt"]);
    let first_updated = parse_ts(&first["updatedAt"]);
    assert!(first_updated >= created);

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/v1/customers/{id}"),
            Some(&token),
            update,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let second = read_json(
        app.clone()
            .oneshot(get(&format!("/api/v1/customers/{id}"), Some(&token)))
            .await
            .unwrap(),
    )
    .await;
    // Same visible state, advancing timestamp
    assert_eq!(second["firstName"], first["firstName"]);
    assert_eq!(second["lastName"], first["lastName"]);
    assert_eq!(second["city"], first["city"]);
    let second_updated = parse_ts(&second["updatedAt"]);
    assert!(second_updated >= first_updated);
}

#[tokio::test]
async fn test_create_product_with_negative_price_rejected() {
    let (app, token) = setup().await;
    let supplier_id = create_supplier(&app, &token, "Negative Price Supplies").await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/products",
            Some(&token),
            json!({ "productName": "Broken", "supplierId": supplier_id, "unitPrice": -1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let problem = read_json(response).await;
    assert_eq!(problem["status"], 400);
    assert_eq!(problem["title"], "Bad request.");
    assert_eq!(problem["instance"], "/api/v1/products");
    assert!(problem["traceId"].is_string());
    assert!(problem["detail"]
        .as_str()
        .unwrap()
        .contains("unitPrice cannot be negative"));
}

#[tokio::test]
async fn test_create_product_with_unknown_supplier_rejected() {
    let (app, token) = setup().await;

    let response = app
        .oneshot(post_json(
            "/api/v1/products",
            Some(&token),
            json!({ "productName": "Orphan", "supplierId": 999999, "unitPrice": 5.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let problem = read_json(response).await;
    assert!(problem["detail"]
        .as_str()
        .unwrap()
        .contains("Supplier '999999' was not found"));
}

#[tokio::test]
async fn test_order_item_with_unknown_product_rejected_without_write() {
    let (app, token) = setup().await;
    let customer_id = create_customer(&app, &token, "Olav", "Nilsen").await;
    let order_id = create_order(
        &app,
        &token,
        customer_id,
        "ORD-ITEM-MISS",
        "2024-03-01T10:00:00Z",
        0.0,
    )
    .await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/order-items",
            Some(&token),
            json!({
                "orderId": order_id,
                "productId": 999999,
                "unitPrice": 9.5,
                "quantity": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was written
    let nested = read_json(
        app.oneshot(get(&format!("/api/v1/orders/{order_id}/items"), Some(&token)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(nested["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_catalog_sorts_by_price_with_name_tiebreak() {
    let (app, token) = setup().await;
    let supplier_id = create_supplier(&app, &token, "Tiebreak Trading").await;
    create_product(&app, &token, supplier_id, "tieA", 5.0).await;
    create_product(&app, &token, supplier_id, "tieB", 5.0).await;
    create_product(&app, &token, supplier_id, "tieC", 10.0).await;

    let response = app
        .oneshot(get(
            &format!("/api/v1/products?supplierId={supplier_id}&sortBy=price&sortDir=desc"),
            Some(&token),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page = read_json(response).await;
    assert_eq!(page["totalCount"], 3);
    let names: Vec<&str> = page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["productName"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["tieC", "tieA", "tieB"]);
}

#[tokio::test]
async fn test_catalog_pagination_envelope() {
    let (app, token) = setup().await;
    let supplier_id = create_supplier(&app, &token, "Envelope Goods").await;
    create_product(&app, &token, supplier_id, "envA", 1.0).await;
    create_product(&app, &token, supplier_id, "envB", 2.0).await;
    create_product(&app, &token, supplier_id, "envC", 3.0).await;

    let response = app
        .clone()
        .oneshot(get(
            &format!("/api/v1/products?supplierId={supplier_id}&pageNumber=1&pageSize=2"),
            Some(&token),
        ))
        .await
        .unwrap();
    let page = read_json(response).await;
    assert_eq!(page["totalCount"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["pageNumber"], 1);
    assert_eq!(page["items"].as_array().unwrap().len(), 2);
    assert_eq!(page["hasPrevious"], false);
    assert_eq!(page["hasNext"], true);

    let response = app
        .oneshot(get(
            &format!("/api/v1/products?supplierId={supplier_id}&pageNumber=2&pageSize=2"),
            Some(&token),
        ))
        .await
        .unwrap();
    let page = read_json(response).await;
    assert_eq!(page["totalCount"], 3);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["hasPrevious"], true);
    assert_eq!(page["hasNext"], false);
}

#[tokio::test]
async fn test_catalog_filters_by_search_and_price() {
    let (app, token) = setup().await;
    let supplier_id = create_supplier(&app, &token, "Filter Foods").await;
    create_product(&app, &token, supplier_id, "Gorgonzola Telino", 12.5).await;
    create_product(&app, &token, supplier_id, "Mozzarella di Giovanni", 34.8).await;
    create_product(&app, &token, supplier_id, "Filo Mix", 7.0).await;

    // Case-insensitive substring search
    let page = read_json(
        app.clone()
            .oneshot(get(
                &format!("/api/v1/products?supplierId={supplier_id}&search=gorgon"),
                Some(&token),
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["items"][0]["productName"], "Gorgonzola Telino");
    assert_eq!(page["items"][0]["supplierName"], "Filter Foods");

    // Price band
    let page = read_json(
        app.oneshot(get(
            &format!("/api/v1/products?supplierId={supplier_id}&minPrice=10&maxPrice=20"),
            Some(&token),
        ))
        .await
        .unwrap(),
    )
    .await;
    assert_eq!(page["totalCount"], 1);
    assert_eq!(page["items"][0]["productName"], "Gorgonzola Telino");
}

#[tokio::test]
async fn test_catalog_validation_failures() {
    let (app, token) = setup().await;

    let cases = [
        "/api/v1/products?sortBy=weight",
        "/api/v1/products?sortDir=up",
        "/api/v1/products?pageSize=500",
        "/api/v1/products?minPrice=-2",
        "/api/v1/products?minPrice=10&maxPrice=5",
        "/api/v1/products?supplierId=0",
    ];

    for uri in cases {
        let response = app.clone().oneshot(get(uri, Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
    }
}

#[tokio::test]
async fn test_customer_orders_newest_first() {
    let (app, token) = setup().await;
    let customer_id = create_customer(&app, &token, "Nora", "Vik").await;
    create_order(
        &app,
        &token,
        customer_id,
        "ORD-OLD",
        "2024-01-10T00:00:00Z",
        100.0,
    )
    .await;
    create_order(
        &app,
        &token,
        customer_id,
        "ORD-NEW",
        "2024-06-10T00:00:00Z",
        250.0,
    )
    .await;

    let body = read_json(
        app.oneshot(get(
            &format!("/api/v1/customers/{customer_id}/orders"),
            Some(&token),
        ))
        .await
        .unwrap(),
    )
    .await;

    let orders = body["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["orderNumber"], "ORD-NEW");
    assert_eq!(orders[1]["orderNumber"], "ORD-OLD");
    assert_eq!(orders[0]["customerName"], "Nora Vik");
}

#[tokio::test]
async fn test_order_items_with_product_names_and_line_totals() {
    let (app, token) = setup().await;
    let supplier_id = create_supplier(&app, &token, "Line Total Foods").await;
    let product_a = create_product(&app, &token, supplier_id, "Crates of Jam", 4.5).await;
    let product_b = create_product(&app, &token, supplier_id, "Tinned Fish", 2.25).await;

    let customer_id = create_customer(&app, &token, "Erik", "Moe").await;
    let order_id = create_order(
        &app,
        &token,
        customer_id,
        "ORD-LINES",
        "2024-04-01T00:00:00Z",
        0.0,
    )
    .await;

    for (product_id, price, qty) in [(product_a, 4.5, 3), (product_b, 2.25, 2)] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/order-items",
                Some(&token),
                json!({
                    "orderId": order_id,
                    "productId": product_id,
                    "unitPrice": price,
                    "quantity": qty
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body = read_json(
        app.oneshot(get(&format!("/api/v1/orders/{order_id}/items"), Some(&token)))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(body["customerName"], "Erik Moe");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Insertion order
    assert_eq!(items[0]["productName"], "Crates of Jam");
    assert_eq!(items[0]["lineTotal"], 13.5);
    assert_eq!(items[1]["productName"], "Tinned Fish");
    assert_eq!(items[1]["lineTotal"], 4.5);
}

#[tokio::test]
async fn test_requires_authentication() {
    let (app, _) = setup().await;

    let response = app
        .clone()
        .oneshot(get("/api/v1/customers", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(get("/api/v1/customers", Some("not-a-token")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_correlation_id_echoed_and_in_problem_body() {
    let (app, token) = setup().await;

    let request = Request::builder()
        .method("GET")
        .uri("/api/v1/products?sortBy=weight")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header("x-correlation-id", "corr-test-123")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get("x-correlation-id")
            .and_then(|v| v.to_str().ok()),
        Some("corr-test-123")
    );

    let problem = read_json(response).await;
    assert_eq!(problem["correlationId"], "corr-test-123");
}

#[tokio::test]
async fn test_security_headers_present() {
    let (app, _) = setup().await;

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("referrer-policy").unwrap(), "no-referrer");
}

#[tokio::test]
async fn test_customer_list_page_respects_page_size() {
    let (app, token) = setup().await;
    for i in 0..3 {
        create_customer(&app, &token, "Page", &format!("Tester{i}")).await;
    }

    let page = read_json(
        app.oneshot(get(
            "/api/v1/customers?pageNumber=1&pageSize=2",
            Some(&token),
        ))
        .await
        .unwrap(),
    )
    .await;

    assert!(page["items"].as_array().unwrap().len() <= 2);
    assert!(page["totalCount"].as_u64().unwrap() >= 3);
}

#[tokio::test]
async fn test_supplier_update_and_delete() {
    let (app, token) = setup().await;
    let id = create_supplier(&app, &token, "Transient Supplies").await;

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/v1/suppliers/{id}"),
            Some(&token),
            json!({ "companyName": "Renamed Supplies", "city": "Tromsø" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let fetched = read_json(
        app.clone()
            .oneshot(get(&format!("/api/v1/suppliers/{id}"), Some(&token)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(fetched["companyName"], "Renamed Supplies");
    assert!(fetched["updatedAt"].is_string());

    let response = app
        .clone()
        .oneshot(delete(&format!("/api/v1/suppliers/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(get(&format!("/api/v1/suppliers/{id}"), Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_product_rename_reflected_in_item_reads() {
    let (app, token) = setup().await;
    let supplier_id = create_supplier(&app, &token, "Rename Foods").await;
    let product_id = create_product(&app, &token, supplier_id, "Old Name", 3.0).await;

    let customer_id = create_customer(&app, &token, "Rena", "Med").await;
    let order_id = create_order(
        &app,
        &token,
        customer_id,
        "ORD-RENAME",
        "2024-02-02T00:00:00Z",
        0.0,
    )
    .await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/order-items",
            Some(&token),
            json!({ "orderId": order_id, "productId": product_id, "unitPrice": 3.0, "quantity": 1 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(put_json(
            &format!("/api/v1/products/{product_id}"),
            Some(&token),
            json!({ "productName": "New Name", "supplierId": supplier_id, "unitPrice": 3.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // Display name is resolved at read time, no update cascade needed
    let body = read_json(
        app.oneshot(get(&format!("/api/v1/orders/{order_id}/items"), Some(&token)))
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(body["items"][0]["productName"], "New Name");
}
