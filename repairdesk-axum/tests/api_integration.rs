//! Integration tests for the repairdesk REST API.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

use repairdesk_axum::{AppState, router};
use repairdesk_shop::{RepairShop, SearchConfig};

fn create_test_app() -> Router {
    router(AppState::new(RepairShop::in_memory(SearchConfig::default())))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-actor", "front-desk")
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

async fn create(app: &Router, uri: &str, body: Value) -> Value {
    let (status, json) = send(app, with_json("POST", uri, body)).await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"].clone()
}

async fn create_model(app: &Router, model: &str, year: i32) -> String {
    let data = create(
        app,
        "/api/appliance-models",
        json!({ "brand": "Acme", "model": model, "kind": "TELEVISION", "year": year }),
    )
    .await;
    data["id"].as_str().expect("id").to_string()
}

fn models(json: &Value) -> Vec<&str> {
    json["data"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .map(|item| item["model"].as_str().expect("model"))
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let (status, json) = send(&app, get("/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = create_test_app();
    let id = "6f1c1f52-2a4e-4b8e-9a51-2f1b4f3d8c11";
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", id)
        .body(Body::empty())
        .expect("Failed to build request");

    let response = app.oneshot(request).await.expect("Request failed");
    assert_eq!(response.headers()["x-request-id"], id);
}

#[tokio::test]
async fn test_search_with_query_string_criteria() {
    let app = create_test_app();
    create_model(&app, "Smart TV 55", 2020).await;
    create_model(&app, "Smart TV 43", 2019).await;
    create_model(&app, "Soundbar 200", 2021).await;

    let (status, json) = send(
        &app,
        get("/api/appliance-models?model=tv&yearGreaterOrEqual=2020"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(models(&json), vec!["Smart TV 55"]);
    assert_eq!(json["data"]["total"], 1);

    let (_, json) = send(&app, get("/api/appliance-models")).await;
    assert_eq!(json["data"]["total"], 3);
}

#[tokio::test]
async fn test_empty_search_is_success() {
    let app = create_test_app();
    let (status, json) = send(&app, get("/api/clients?name=nobody")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["items"], json!([]));
}

#[tokio::test]
async fn test_paging_from_query_string() {
    let app = create_test_app();
    for (i, year) in [2015, 2016, 2017].into_iter().enumerate() {
        create_model(&app, &format!("Model {i}"), year).await;
    }

    let (_, json) = send(&app, get("/api/appliance-models?page=2&size=2")).await;
    assert_eq!(models(&json), vec!["Model 2"]);
    assert_eq!(json["data"]["page"], 2);
    assert_eq!(json["data"]["size"], 2);
}

#[tokio::test]
async fn test_malformed_enum_token_is_bad_request() {
    let app = create_test_app();
    let (status, json) = send(&app, get("/api/orders?status=LOST")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "P5003");
}

#[tokio::test]
async fn test_blank_typed_parameters_are_ignored() {
    let app = create_test_app();
    create_model(&app, "Smart TV 55", 2020).await;
    create_model(&app, "Soundbar 200", 2021).await;

    let (status, json) = send(&app, get("/api/appliance-models?model=tv&kind=&yearGreaterOrEqual=")).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(models(&json), vec!["Smart TV 55"]);

    let (status, json) = send(&app, get("/api/orders?status=&receivedFrom=&clientId=")).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    assert_eq!(json["data"]["total"], 0);

    let (status, json) = send(&app, get("/api/appliance-models?yearGreaterOrEqual=soon")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "P5003");
}

#[tokio::test]
async fn test_enum_tokens_are_case_insensitive() {
    let app = create_test_app();
    create(
        &app,
        "/api/inventory",
        json!({ "name": "Drain pump", "partNumber": "DP-100", "category": "pump", "quantity": 1, "price": "9.90" }),
    )
    .await;

    let (status, json) = send(&app, get("/api/inventory?category=pump")).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    let items = json["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "PUMP");
}

#[tokio::test]
async fn test_part_number_search_ignores_padding() {
    let app = create_test_app();
    create(
        &app,
        "/api/inventory",
        json!({ "name": "Drain pump", "partNumber": " DP-100 ", "category": "PUMP", "quantity": 1, "price": "9.90" }),
    )
    .await;

    let (status, json) = send(&app, get("/api/inventory?partNumber=%20DP-100")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total"], 1);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let app = create_test_app();
    let (status, json) = send(
        &app,
        get("/api/orders/00000000-0000-0000-0000-000000000001"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "P1001");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = create_test_app();
    let (status, _) = send(&app, get("/api/clients/not-a-uuid")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_validation_error_is_bad_request() {
    let app = create_test_app();
    let (status, json) = send(
        &app,
        with_json(
            "POST",
            "/api/appliance-models",
            json!({ "brand": "Acme", "model": "Old", "kind": "OVEN", "year": 1900 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "P5003");
}

#[tokio::test]
async fn test_inventory_compatible_model_search() {
    let app = create_test_app();
    let x100 = create_model(&app, "WM-X100", 2018).await;
    let z9 = create_model(&app, "WM-Z9", 2020).await;

    for (part, model) in [("P-1", &x100), ("P-2", &z9)] {
        create(
            &app,
            "/api/inventory",
            json!({
                "name": format!("Pump {part}"),
                "partNumber": part,
                "category": "PUMP",
                "quantity": 1,
                "price": "12.50",
                "compatibleModelIds": [model],
            }),
        )
        .await;
    }

    let (status, json) = send(&app, get("/api/inventory?compatibleModel=x100")).await;
    assert_eq!(status, StatusCode::OK);
    let items = json["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["partNumber"], "P-1");

    let (status, json) = send(
        &app,
        with_json(
            "POST",
            "/api/inventory",
            json!({ "name": "Dup", "partNumber": "P-1", "category": "PUMP", "quantity": 0, "price": "1" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "P2001");
}

#[tokio::test]
async fn test_order_flow() {
    let app = create_test_app();
    let client = create(
        &app,
        "/api/clients",
        json!({ "fullName": "Ada Lovelace", "phone": "+44 20 7946 0000" }),
    )
    .await;
    let model = create_model(&app, "Smart TV 55", 2021).await;

    let order = create(
        &app,
        "/api/orders",
        json!({
            "clientId": client["id"],
            "applianceModelId": model,
            "description": "No picture",
            "receivedOn": "2024-05-03",
        }),
    )
    .await;
    assert_eq!(order["status"], "RECEIVED");
    assert_eq!(order["updatedBy"], "front-desk");

    let uri = format!("/api/orders/{}/status", order["id"].as_str().expect("id"));
    let request = Request::builder()
        .method("PUT")
        .uri(&uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-actor", "tech-7")
        .body(Body::from(json!({ "status": "READY" }).to_string()))
        .expect("Failed to build request");
    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["updatedBy"], "tech-7");

    let (_, json) = send(&app, get("/api/orders?applianceModel=tv%2055&status=READY")).await;
    assert_eq!(json["data"]["total"], 1);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/clients/{}", client["id"].as_str().expect("id")))
        .body(Body::empty())
        .expect("Failed to build request");
    let (status, json) = send(&app, delete).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "P2002");
}

#[tokio::test]
async fn test_stock_adjustment() {
    let app = create_test_app();
    let item = create(
        &app,
        "/api/inventory",
        json!({ "name": "Belt", "partNumber": "B-1", "category": "BELT", "quantity": 1, "price": "3.00" }),
    )
    .await;
    let uri = format!("/api/inventory/{}/stock", item["id"].as_str().expect("id"));

    let (status, json) = send(&app, with_json("POST", &uri, json!({ "delta": 4 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["quantity"], 5);

    let (status, _) = send(&app, with_json("POST", &uri, json!({ "delta": -6 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
