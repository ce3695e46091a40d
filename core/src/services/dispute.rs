use serde::{Deserialize, Serialize};

use crate::dispatch::{Dispatcher, Endpoint, NO_BODY};
use crate::error::Result;
use crate::pagination::{List, Page};
use crate::types::{Metadata, Transaction};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeMessage {
    pub id: u64,
    pub dispute: u64,
    pub sender: String,
    pub body: String,
    pub is_deleted: u8,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// One entry in a dispute's status history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeState {
    pub id: u64,
    pub dispute: u64,
    pub status: String,
    pub by: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisputeEvidence {
    pub id: u64,
    pub dispute: u64,
    pub customer_email: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_details: String,
    pub delivery_address: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Dispute {
    pub id: u64,
    pub integration: u64,
    pub domain: String,
    pub currency: String,
    pub last4: Option<String>,
    pub bin: Option<String>,
    pub transaction_reference: Option<String>,
    pub merchant_transaction_reference: Option<String>,
    pub refund_amount: Option<u64>,
    pub status: String,
    pub resolution: Option<String>,
    pub category: String,
    pub note: Option<String>,
    pub attachments: Option<Metadata>,
    pub created_by: Option<String>,
    pub evidence: Option<DisputeEvidence>,
    pub transaction: Option<Transaction>,
    pub messages: Vec<DisputeMessage>,
    pub history: Vec<DisputeState>,
    #[serde(rename = "resolvedAt")]
    pub resolved_at: Option<String>,
    #[serde(rename = "dueAt")]
    pub due_at: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Filters for listing and exporting disputes. Dates are ISO-8601 strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisputeFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Transaction id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateDisputeRequest {
    pub refund_amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_filename: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddEvidenceRequest {
    pub customer_email: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub service_details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resolution {
    MerchantAccepted,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolveDisputeRequest {
    pub resolution: Resolution,
    pub message: String,
    pub refund_amount: u64,
    pub uploaded_filename: String,
    /// Evidence id, required for fraud claims.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence: Option<u64>,
}

/// Signed URL for uploading dispute evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upload {
    #[serde(rename = "signedUrl")]
    pub signed_url: String,
    #[serde(rename = "fileName", alias = "filename")]
    pub file_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Export {
    pub path: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: Option<String>,
}

#[derive(Serialize)]
struct UploadQuery<'a> {
    upload_filename: &'a str,
}

/// Disputes filed against the integration.
#[derive(Debug, Clone, Copy)]
pub struct DisputeService<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> DisputeService<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn list(&self, filter: Option<&DisputeFilter>) -> Result<List<Dispute>> {
        let page = Page::default();
        self.list_n(filter, page.per_page, page.page)
    }

    pub fn list_n(&self, filter: Option<&DisputeFilter>, count: u32, offset: u32) -> Result<List<Dispute>> {
        let endpoint = Endpoint::get("/dispute").paginate(Page::new(count, offset));
        self.dispatcher.fetch(&endpoint, filter)
    }

    pub fn get(&self, id: u64) -> Result<Dispute> {
        self.dispatcher.fetch(&Endpoint::get(format!("/dispute/{id}")), NO_BODY)
    }

    /// Dispute raised against a particular transaction.
    pub fn list_transaction_disputes(&self, transaction_id: u64) -> Result<Dispute> {
        self.dispatcher.fetch(
            &Endpoint::get(format!("/dispute/transaction/{transaction_id}")),
            NO_BODY,
        )
    }

    pub fn update(&self, id: u64, request: &UpdateDisputeRequest) -> Result<Dispute> {
        self.dispatcher
            .fetch(&Endpoint::put(format!("/dispute/{id}")), Some(request))
    }

    pub fn add_evidence(&self, id: u64, request: &AddEvidenceRequest) -> Result<DisputeEvidence> {
        self.dispatcher
            .fetch(&Endpoint::post(format!("/dispute/{id}/evidence")), Some(request))
    }

    pub fn resolve(&self, id: u64, request: &ResolveDisputeRequest) -> Result<Dispute> {
        self.dispatcher
            .fetch(&Endpoint::put(format!("/dispute/{id}/resolve")), Some(request))
    }

    pub fn upload_url(&self, id: u64, upload_filename: &str) -> Result<Upload> {
        self.dispatcher.fetch(
            &Endpoint::get(format!("/dispute/{id}/upload_url")),
            Some(&UploadQuery { upload_filename }),
        )
    }

    pub fn export(&self, filter: Option<&DisputeFilter>) -> Result<Export> {
        self.dispatcher.fetch(&Endpoint::get("/dispute/export"), filter)
    }
}
