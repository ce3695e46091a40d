use serde::{Deserialize, Serialize};

use crate::dispatch::{Dispatcher, Endpoint, NO_BODY};
use crate::error::Result;
use crate::pagination::{List, Page};
use crate::types::{Acknowledgement, SubAccount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    Percentage,
    Flat,
}

/// Who bears the transaction charges of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BearerType {
    Subaccount,
    Account,
    AllProportional,
    All,
}

/// One beneficiary in a split request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitShare {
    /// Subaccount code, e.g. `ACCT_6uujpqtzmnufzkw`.
    pub subaccount: String,
    pub share: u64,
}

/// A beneficiary as returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitSubaccount {
    pub subaccount: SubAccount,
    pub share: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Split {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: String,
    pub integration: u64,
    pub domain: String,
    pub split_code: String,
    pub active: bool,
    pub bearer_type: String,
    pub bearer_subaccount: Option<String>,
    pub is_dynamic: bool,
    pub subaccounts: Vec<SplitSubaccount>,
    pub total_subaccounts: u64,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSplitRequest {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SplitType,
    pub currency: String,
    pub subaccounts: Vec<SplitShare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_type: Option<BearerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_subaccount: Option<String>,
}

/// Partial update. `active: Some(false)` deactivates the split; `None`
/// leaves it as is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateSplitRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_type: Option<BearerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_subaccount: Option<String>,
}

#[derive(Serialize)]
struct RemoveSubaccount<'a> {
    subaccount: &'a str,
}

/// Transaction splits.
#[derive(Debug, Clone, Copy)]
pub struct SplitService<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> SplitService<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: &CreateSplitRequest) -> Result<Split> {
        self.dispatcher.fetch(&Endpoint::post("/split"), Some(request))
    }

    pub fn list(&self) -> Result<List<Split>> {
        let page = Page::default();
        self.list_n(page.per_page, page.page)
    }

    pub fn list_n(&self, count: u32, offset: u32) -> Result<List<Split>> {
        let endpoint = Endpoint::get("/split").paginate(Page::new(count, offset));
        self.dispatcher.fetch(&endpoint, NO_BODY)
    }

    pub fn get(&self, id: u64) -> Result<Split> {
        self.dispatcher.fetch(&Endpoint::get(format!("/split/{id}")), NO_BODY)
    }

    pub fn update(&self, id: u64, request: &UpdateSplitRequest) -> Result<Split> {
        self.dispatcher
            .fetch(&Endpoint::put(format!("/split/{id}")), Some(request))
    }

    /// Add a subaccount to the split, or change its share if already present.
    pub fn add_subaccount(&self, id: u64, subaccount: &str, share: u64) -> Result<Split> {
        let request = SplitShare {
            subaccount: subaccount.to_string(),
            share,
        };
        self.dispatcher
            .fetch(&Endpoint::post(format!("/split/{id}/subaccount/add")), Some(&request))
    }

    pub fn remove_subaccount(&self, id: u64, subaccount: &str) -> Result<Acknowledgement> {
        self.dispatcher.fetch(
            &Endpoint::post(format!("/split/{id}/subaccount/remove")).envelope(),
            Some(&RemoveSubaccount { subaccount }),
        )
    }
}
