use serde::{Deserialize, Serialize};

use crate::dispatch::{Dispatcher, Endpoint, NO_BODY};
use crate::error::Result;
use crate::pagination::{List, Page};
use crate::types::Metadata;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub product_code: String,
    pub slug: String,
    pub currency: String,
    pub price: u64,
    pub quantity: u64,
    pub quantity_sold: u64,
    pub is_shippable: bool,
    pub unlimited: bool,
    pub active: bool,
    pub in_stock: bool,
    pub integration: u64,
    pub domain: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub metadata: Option<Metadata>,
    pub shipping_fields: Option<Metadata>,
    pub minimum_orderable: u64,
    pub maximum_orderable: Option<u64>,
    pub low_stock_alert: bool,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Payload for creating a product. `price` is in the currency's subunit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlimited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

/// Partial update. Only fields that are `Some` are sent, so
/// `unlimited: Some(false)` switches a product back to limited stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlimited: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u64>,
}

/// Products on the integration.
#[derive(Debug, Clone, Copy)]
pub struct ProductService<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> ProductService<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: &CreateProductRequest) -> Result<Product> {
        self.dispatcher.fetch(&Endpoint::post("/product"), Some(request))
    }

    /// First page of products, ten per page.
    pub fn list(&self) -> Result<List<Product>> {
        let page = Page::default();
        self.list_n(page.per_page, page.page)
    }

    pub fn list_n(&self, count: u32, offset: u32) -> Result<List<Product>> {
        let endpoint = Endpoint::get("/product").paginate(Page::new(count, offset));
        self.dispatcher.fetch(&endpoint, NO_BODY)
    }

    pub fn get(&self, id: u64) -> Result<Product> {
        self.dispatcher.fetch(&Endpoint::get(format!("/product/{id}")), NO_BODY)
    }

    pub fn update(&self, id: u64, request: &UpdateProductRequest) -> Result<Product> {
        self.dispatcher
            .fetch(&Endpoint::put(format!("/product/{id}")), Some(request))
    }
}
