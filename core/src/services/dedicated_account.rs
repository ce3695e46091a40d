use serde::{Deserialize, Serialize};

use crate::dispatch::{Dispatcher, Endpoint, NO_BODY};
use crate::error::Result;
use crate::pagination::{List, Page};
use crate::services::split::Split;
use crate::types::{Acknowledgement, Bank, Customer, CustomerRef, Envelope, Metadata};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assignment {
    pub integration: u64,
    pub assignee_id: u64,
    pub assignee_type: String,
    pub expired: bool,
    pub account_type: String,
    pub assigned_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DedicatedAccount {
    pub id: u64,
    pub account_name: String,
    pub account_number: String,
    pub assigned: bool,
    pub active: bool,
    pub currency: String,
    pub bank: Option<Bank>,
    pub customer: Option<Customer>,
    pub assignment: Option<Assignment>,
    pub split_config: Option<Split>,
    pub metadata: Option<Metadata>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDedicatedAccountRequest {
    pub customer: CustomerRef,
    /// Provider slug, e.g. `wema-bank` or `test-bank`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_bank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Create, validate, and assign in one step. The API finishes the work
/// asynchronously and reports the outcome through webhooks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssignDedicatedAccountRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub preferred_bank: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bvn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
}

/// Listing filter. `active: Some(false)` selects inactive accounts; `None`
/// applies no status filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DedicatedAccountFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequeryRequest {
    pub account_number: String,
    pub provider_slug: String,
    /// `YYYY-MM-DD`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitDedicatedAccountRequest {
    pub customer: CustomerRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subaccount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_bank: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankProvider {
    pub id: u64,
    pub provider_slug: String,
    pub bank_id: u64,
    pub bank_name: String,
}

#[derive(Serialize)]
struct AccountNumber<'a> {
    account_number: &'a str,
}

/// Dedicated virtual accounts.
#[derive(Debug, Clone, Copy)]
pub struct DedicatedAccountService<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> DedicatedAccountService<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: &CreateDedicatedAccountRequest) -> Result<DedicatedAccount> {
        self.dispatcher
            .fetch(&Endpoint::post("/dedicated_account"), Some(request))
    }

    pub fn assign(&self, request: &AssignDedicatedAccountRequest) -> Result<Acknowledgement> {
        self.dispatcher
            .fetch(&Endpoint::post("/dedicated_account/assign").envelope(), Some(request))
    }

    pub fn list(&self, filter: Option<&DedicatedAccountFilter>) -> Result<List<DedicatedAccount>> {
        let page = Page::default();
        self.list_n(filter, page.per_page, page.page)
    }

    pub fn list_n(
        &self,
        filter: Option<&DedicatedAccountFilter>,
        count: u32,
        offset: u32,
    ) -> Result<List<DedicatedAccount>> {
        let endpoint = Endpoint::get("/dedicated_account").paginate(Page::new(count, offset));
        self.dispatcher.fetch(&endpoint, filter)
    }

    pub fn get(&self, id: u64) -> Result<DedicatedAccount> {
        self.dispatcher
            .fetch(&Endpoint::get(format!("/dedicated_account/{id}")), NO_BODY)
    }

    /// Ask the provider to check the account for new transactions.
    pub fn requery(&self, request: &RequeryRequest) -> Result<Acknowledgement> {
        self.dispatcher
            .fetch(&Endpoint::get("/dedicated_account/requery").envelope(), Some(request))
    }

    pub fn deactivate(&self, id: u64) -> Result<DedicatedAccount> {
        self.dispatcher
            .fetch(&Endpoint::delete(format!("/dedicated_account/{id}")), NO_BODY)
    }

    pub fn split(&self, request: &SplitDedicatedAccountRequest) -> Result<DedicatedAccount> {
        self.dispatcher
            .fetch(&Endpoint::post("/dedicated_account/split"), Some(request))
    }

    /// Remove the split from an account. The account number travels in the
    /// query string of the DELETE, not in a body.
    pub fn remove_split(&self, account_number: &str) -> Result<DedicatedAccount> {
        self.dispatcher.fetch(
            &Endpoint::delete("/dedicated_account/split").query_encoded(),
            Some(&AccountNumber { account_number }),
        )
    }

    pub fn bank_providers(&self) -> Result<Vec<BankProvider>> {
        let envelope: Envelope<Vec<BankProvider>> = self
            .dispatcher
            .fetch(&Endpoint::get("/dedicated_account/available_providers").envelope(), NO_BODY)?;
        Ok(envelope.data)
    }
}
