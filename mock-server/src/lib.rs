//! In-memory stand-in for the Paystack REST API.
//!
//! Covers the product, split, and dedicated-account endpoints with the same
//! `{status, message, data}` envelopes, `{meta, data}` listings, and
//! `{status: false, message}` errors as the real service. Requests without a
//! `Bearer sk_test_*` credential are rejected with 401.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub product_code: String,
    pub price: u64,
    pub currency: String,
    pub quantity: u64,
    pub unlimited: bool,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub currency: String,
    #[serde(default)]
    pub unlimited: bool,
    #[serde(default)]
    pub quantity: u64,
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub currency: Option<String>,
    pub unlimited: Option<bool>,
    pub quantity: Option<u64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SplitMember {
    pub subaccount: Value,
    pub share: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Split {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
    pub split_code: String,
    pub active: bool,
    pub bearer_type: String,
    pub subaccounts: Vec<SplitMember>,
    pub total_subaccounts: u64,
}

#[derive(Deserialize)]
pub struct Share {
    pub subaccount: String,
    #[serde(default)]
    pub share: u64,
}

#[derive(Deserialize)]
pub struct CreateSplit {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
    pub subaccounts: Vec<Share>,
    pub bearer_type: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateSplit {
    pub name: Option<String>,
    pub active: Option<bool>,
    pub bearer_type: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DedicatedAccount {
    pub id: u64,
    pub account_name: String,
    pub account_number: String,
    pub assigned: bool,
    pub active: bool,
    pub currency: String,
    pub bank: Value,
    pub split_config: Option<Value>,
}

#[derive(Deserialize)]
pub struct CreateDedicatedAccount {
    pub customer: Value,
    pub preferred_bank: Option<String>,
}

#[derive(Deserialize)]
pub struct AccountSplit {
    pub account_number: Option<String>,
    pub customer: Option<Value>,
    pub split_code: Option<String>,
}

#[derive(Deserialize)]
pub struct PageQuery {
    #[serde(rename = "perPage")]
    pub per_page: Option<u64>,
    pub page: Option<u64>,
}

#[derive(Deserialize)]
pub struct AccountNumberQuery {
    pub account_number: Option<String>,
}

#[derive(Default)]
pub struct Store {
    next_id: u64,
    products: BTreeMap<u64, Product>,
    splits: BTreeMap<u64, Split>,
    accounts: BTreeMap<u64, DedicatedAccount>,
}

impl Store {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error reply in the API's wire format.
pub struct ApiFailure(StatusCode, &'static str);

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        (self.0, Json(json!({"status": false, "message": self.1}))).into_response()
    }
}

fn ok<T: Serialize>(message: &str, data: T) -> Json<Value> {
    Json(json!({"status": true, "message": message, "data": data}))
}

fn listing<T: Serialize + Clone>(items: Vec<T>, query: &PageQuery) -> Json<Value> {
    let per_page = query.per_page.unwrap_or(50).max(1);
    let page = query.page.unwrap_or(1).max(1);
    let total = items.len() as u64;
    let skipped = per_page.saturating_mul(page - 1);
    let data: Vec<T> = items
        .into_iter()
        .skip(usize::try_from(skipped).unwrap_or(usize::MAX))
        .take(usize::try_from(per_page).unwrap_or(usize::MAX))
        .collect();
    Json(json!({
        "status": true,
        "message": "Retrieved",
        "data": data,
        "meta": {
            "total": total,
            "skipped": skipped,
            "perPage": per_page,
            "page": page,
            "pageCount": total.div_ceil(per_page),
        }
    }))
}

fn code(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &raw[..14])
}

async fn require_secret_key(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer sk_test_"));
    if !authorized {
        tracing::debug!(uri = %request.uri(), "rejecting request without valid key");
        return ApiFailure(StatusCode::UNAUTHORIZED, "Invalid key").into_response();
    }
    next.run(request).await
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route("/product/{id}", get(get_product).put(update_product))
        .route("/split", get(list_splits).post(create_split))
        .route("/split/{id}", get(get_split).put(update_split))
        .route("/split/{id}/subaccount/add", post(add_split_subaccount))
        .route("/split/{id}/subaccount/remove", post(remove_split_subaccount))
        .route(
            "/dedicated_account",
            get(list_accounts).post(create_account),
        )
        .route(
            "/dedicated_account/split",
            post(split_account).delete(remove_account_split),
        )
        .route("/dedicated_account/available_providers", get(bank_providers))
        .fallback(|| async { ApiFailure(StatusCode::NOT_FOUND, "Not found") })
        .layer(middleware::from_fn(require_secret_key))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

// --- products ---

async fn list_products(State(db): State<Db>, Query(query): Query<PageQuery>) -> Json<Value> {
    let store = db.read().await;
    listing(store.products.values().cloned().collect(), &query)
}

async fn create_product(State(db): State<Db>, Json(input): Json<CreateProduct>) -> Json<Value> {
    let mut store = db.write().await;
    let id = store.next_id();
    let product = Product {
        id,
        name: input.name,
        description: input.description,
        product_code: code("PROD"),
        price: input.price,
        currency: input.currency,
        quantity: input.quantity,
        unlimited: input.unlimited,
    };
    store.products.insert(id, product.clone());
    ok("Product successfully created", product)
}

async fn get_product(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Value>, ApiFailure> {
    let store = db.read().await;
    store
        .products
        .get(&id)
        .map(|p| ok("Product retrieved", p))
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Product not found"))
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Value>, ApiFailure> {
    let mut store = db.write().await;
    let product = store
        .products
        .get_mut(&id)
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Product not found"))?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(description) = input.description {
        product.description = description;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    if let Some(currency) = input.currency {
        product.currency = currency;
    }
    if let Some(unlimited) = input.unlimited {
        product.unlimited = unlimited;
    }
    if let Some(quantity) = input.quantity {
        product.quantity = quantity;
    }
    Ok(ok("Product successfully updated", product.clone()))
}

// --- splits ---

fn member(subaccount: String, share: u64) -> SplitMember {
    SplitMember {
        subaccount: json!({"subaccount_code": subaccount}),
        share,
    }
}

async fn list_splits(State(db): State<Db>, Query(query): Query<PageQuery>) -> Json<Value> {
    let store = db.read().await;
    listing(store.splits.values().cloned().collect(), &query)
}

async fn create_split(State(db): State<Db>, Json(input): Json<CreateSplit>) -> Json<Value> {
    let mut store = db.write().await;
    let id = store.next_id();
    let subaccounts: Vec<SplitMember> = input
        .subaccounts
        .into_iter()
        .map(|s| member(s.subaccount, s.share))
        .collect();
    let split = Split {
        id,
        name: input.name,
        kind: input.kind,
        currency: input.currency,
        split_code: code("SPL"),
        active: true,
        bearer_type: input.bearer_type.unwrap_or_else(|| "account".to_string()),
        total_subaccounts: subaccounts.len() as u64,
        subaccounts,
    };
    store.splits.insert(id, split.clone());
    ok("Split created", split)
}

async fn get_split(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Value>, ApiFailure> {
    let store = db.read().await;
    store
        .splits
        .get(&id)
        .map(|s| ok("Split retrieved", s))
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Split not found"))
}

async fn update_split(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateSplit>,
) -> Result<Json<Value>, ApiFailure> {
    let mut store = db.write().await;
    let split = store
        .splits
        .get_mut(&id)
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Split not found"))?;
    if let Some(name) = input.name {
        split.name = name;
    }
    if let Some(active) = input.active {
        split.active = active;
    }
    if let Some(bearer_type) = input.bearer_type {
        split.bearer_type = bearer_type;
    }
    Ok(ok("Split group updated", split.clone()))
}

async fn add_split_subaccount(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<Share>,
) -> Result<Json<Value>, ApiFailure> {
    let mut store = db.write().await;
    let split = store
        .splits
        .get_mut(&id)
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Split not found"))?;
    let existing = split
        .subaccounts
        .iter_mut()
        .find(|m| m.subaccount["subaccount_code"] == input.subaccount.as_str());
    match existing {
        Some(m) => m.share = input.share,
        None => split.subaccounts.push(member(input.subaccount, input.share)),
    }
    split.total_subaccounts = split.subaccounts.len() as u64;
    Ok(ok("Subaccount added", split.clone()))
}

async fn remove_split_subaccount(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<Share>,
) -> Result<Json<Value>, ApiFailure> {
    let mut store = db.write().await;
    let split = store
        .splits
        .get_mut(&id)
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Split not found"))?;
    split
        .subaccounts
        .retain(|m| m.subaccount["subaccount_code"] != input.subaccount.as_str());
    split.total_subaccounts = split.subaccounts.len() as u64;
    Ok(Json(json!({"status": true, "message": "Subaccount has been removed successfully"})))
}

// --- dedicated accounts ---

async fn list_accounts(State(db): State<Db>, Query(query): Query<PageQuery>) -> Json<Value> {
    let store = db.read().await;
    listing(store.accounts.values().cloned().collect(), &query)
}

async fn create_account(
    State(db): State<Db>,
    Json(input): Json<CreateDedicatedAccount>,
) -> Json<Value> {
    let mut store = db.write().await;
    let id = store.next_id();
    let account = DedicatedAccount {
        id,
        account_name: format!("MOCK / CUSTOMER {}", input.customer),
        account_number: format!("99{id:08}"),
        assigned: true,
        active: true,
        currency: "NGN".to_string(),
        bank: json!({
            "id": 1,
            "name": "Test Bank",
            "slug": input.preferred_bank.unwrap_or_else(|| "test-bank".to_string()),
        }),
        split_config: None,
    };
    store.accounts.insert(id, account.clone());
    ok("Assigned Managed Account Successfully Created", account)
}

async fn split_account(
    State(db): State<Db>,
    Json(input): Json<AccountSplit>,
) -> Result<Json<Value>, ApiFailure> {
    let mut store = db.write().await;
    let split_code = input
        .split_code
        .ok_or(ApiFailure(StatusCode::BAD_REQUEST, "split_code is required"))?;
    let account = store
        .accounts
        .values_mut()
        .find(|a| {
            input.account_number.as_deref() == Some(a.account_number.as_str())
                || input.customer.as_ref().is_some_and(|c| a.account_name.ends_with(&c.to_string()))
        })
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Dedicated account not found"))?;
    account.split_config = Some(json!({"split_code": split_code}));
    Ok(ok("Subaccount assigned", account.clone()))
}

async fn remove_account_split(
    State(db): State<Db>,
    Query(query): Query<AccountNumberQuery>,
) -> Result<Json<Value>, ApiFailure> {
    let account_number = query
        .account_number
        .ok_or(ApiFailure(StatusCode::BAD_REQUEST, "account_number is required"))?;
    let mut store = db.write().await;
    let account = store
        .accounts
        .values_mut()
        .find(|a| a.account_number == account_number)
        .ok_or(ApiFailure(StatusCode::NOT_FOUND, "Dedicated account not found"))?;
    account.split_config = None;
    Ok(ok("Subaccount unassigned", account.clone()))
}

async fn bank_providers() -> Json<Value> {
    ok(
        "Dedicated account providers retrieved",
        json!([
            {"provider_slug": "test-bank", "bank_id": 1, "bank_name": "Test Bank", "id": 1},
            {"provider_slug": "wema-bank", "bank_id": 20, "bank_name": "Wema Bank", "id": 5},
        ]),
    )
}
