use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, Product, Split};
use serde_json::Value;
use tower::ServiceExt;

const AUTH: &str = "Bearer sk_test_mock";

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn get(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, AUTH)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn data<T: serde::de::DeserializeOwned>(envelope: Value) -> T {
    serde_json::from_value(envelope["data"].clone()).unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_key_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/product").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Invalid key");
}

#[tokio::test]
async fn live_key_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/product")
                .header(http::header::AUTHORIZATION, "Bearer sk_live_nope")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_returns_api_error() {
    let resp = app().oneshot(get("/nowhere")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], false);
}

// --- products ---

#[tokio::test]
async fn list_products_empty_has_meta() {
    let resp = app().oneshot(get("/product?perPage=5&page=1")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["meta"]["perPage"], 5);
    assert_eq!(body["meta"]["total"], 0);
}

#[tokio::test]
async fn create_product_malformed_json_returns_422() {
    let resp = app()
        .oneshot(json_request("POST", "/product", r#"{"name":"no price"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn get_product_not_found() {
    let resp = app().oneshot(get("/product/404")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = body_json(resp).await;
    assert_eq!(body["message"], "Product not found");
}

#[tokio::test]
async fn product_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/product",
            r#"{"name":"Puff Puff","description":"Snack","price":5000,"currency":"NGN","quantity":100}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Product = data(body_json(resp).await);
    assert_eq!(created.name, "Puff Puff");
    assert!(created.product_code.starts_with("PROD_"));
    let id = created.id;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request("PUT", &format!("/product/{id}"), r#"{"quantity":170}"#))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Product = data(body_json(resp).await);
    assert_eq!(updated.quantity, 170);
    assert_eq!(updated.price, 5000);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/product"))
        .await
        .unwrap();
    let body: Value = body_json(resp).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["id"], id);
}

// --- splits ---

#[tokio::test]
async fn split_subaccounts_add_and_remove() {
    use tower::Service;

    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            "/split",
            r#"{"name":"Halfsies","type":"percentage","currency":"NGN","subaccounts":[{"subaccount":"ACCT_a","share":50}]}"#,
        ))
        .await
        .unwrap();
    let split: Split = data(body_json(resp).await);
    assert_eq!(split.total_subaccounts, 1);
    let id = split.id;

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("/split/{id}/subaccount/add"),
            r#"{"subaccount":"ACCT_b","share":30}"#,
        ))
        .await
        .unwrap();
    let split: Split = data(body_json(resp).await);
    assert_eq!(split.total_subaccounts, 2);

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "POST",
            &format!("/split/{id}/subaccount/remove"),
            r#"{"subaccount":"ACCT_a"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert_eq!(body["status"], true);
    assert!(body.get("data").is_none());
}

// --- dedicated accounts ---

#[tokio::test]
async fn remove_split_requires_account_number_query() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/dedicated_account/split")
                .header(http::header::AUTHORIZATION, AUTH)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let bytes = body_bytes(resp).await;
    assert!(std::str::from_utf8(&bytes).unwrap().contains("account_number"));
}

#[tokio::test]
async fn bank_providers_returns_array_data() {
    let resp = app()
        .oneshot(get("/dedicated_account/available_providers"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = body_json(resp).await;
    assert!(body["data"].is_array());
}
