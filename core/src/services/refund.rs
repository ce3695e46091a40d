use serde::{Deserialize, Serialize};

use crate::dispatch::{Dispatcher, Endpoint, NO_BODY};
use crate::error::Result;
use crate::pagination::{List, Page};
use crate::types::{Metadata, Transaction};

/// The refunded transaction: listings carry only its id, single fetches
/// embed the full record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefundTransaction {
    Id(u64),
    Details(Box<Transaction>),
}

impl RefundTransaction {
    pub fn id(&self) -> u64 {
        match self {
            RefundTransaction::Id(id) => *id,
            RefundTransaction::Details(tx) => tx.id,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Refund {
    pub id: u64,
    pub transaction: Option<RefundTransaction>,
    pub integration: u64,
    pub amount: u64,
    pub deducted_amount: u64,
    pub fully_deducted: bool,
    pub currency: String,
    pub channel: Option<Metadata>,
    pub merchant_note: Option<String>,
    pub customer_note: Option<String>,
    pub status: String,
    pub refunded_by: String,
    pub expected_at: Option<String>,
    pub domain: String,
    #[serde(rename = "createdAt")]
    pub created_at: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Payload for refunding a transaction. `amount` defaults to the full
/// transaction amount when omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateRefundRequest {
    /// Transaction reference or id.
    pub transaction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_note: Option<String>,
}

/// Transaction refunds.
#[derive(Debug, Clone, Copy)]
pub struct RefundService<'a> {
    dispatcher: &'a Dispatcher,
}

impl<'a> RefundService<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn create(&self, request: &CreateRefundRequest) -> Result<Refund> {
        self.dispatcher.fetch(&Endpoint::post("/refund"), Some(request))
    }

    pub fn list(&self) -> Result<List<Refund>> {
        let page = Page::default();
        self.list_n(page.per_page, page.page)
    }

    pub fn list_n(&self, count: u32, offset: u32) -> Result<List<Refund>> {
        let endpoint = Endpoint::get("/refund").paginate(Page::new(count, offset));
        self.dispatcher.fetch(&endpoint, NO_BODY)
    }

    pub fn get(&self, id: u64) -> Result<Refund> {
        self.dispatcher.fetch(&Endpoint::get(format!("/refund/{id}")), NO_BODY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{client, RecordingTransport};

    #[test]
    fn create_omits_unset_optionals() {
        let transport = RecordingTransport::replying(
            200,
            r#"{"status":true,"data":{"id":3,"amount":600000,"transaction":{"id":1641,"reference":"Txn-1"}}}"#,
        );
        let request = CreateRefundRequest {
            transaction: "Txn-1".to_string(),
            ..Default::default()
        };
        let refund = client(&transport).refunds().create(&request).unwrap();
        assert_eq!(refund.amount, 600000);
        assert_eq!(refund.transaction.as_ref().map(RefundTransaction::id), Some(1641));
        assert_eq!(
            transport.last_request().unwrap().body.as_deref(),
            Some(r#"{"transaction":"Txn-1"}"#)
        );
    }

    #[test]
    fn listing_accepts_bare_transaction_ids() {
        let transport = RecordingTransport::replying(
            200,
            r#"{"data":[{"id":1,"transaction":1641,"amount":10}],"meta":{"total":1,"perPage":5,"page":2}}"#,
        );
        let refunds = client(&transport).refunds().list_n(5, 2).unwrap();
        assert_eq!(refunds.data[0].transaction, Some(RefundTransaction::Id(1641)));
        assert_eq!(
            transport.last_request().unwrap().url,
            "https://api.example.test/refund?perPage=5&page=2"
        );
    }

    #[test]
    fn get_decodes_embedded_transaction() {
        let transport = RecordingTransport::replying(
            200,
            r#"{"status":true,"message":"Refund retrieved","data":{"id":3,"amount":600000,"status":"processed","transaction":{"id":1641,"reference":"Txn-1","amount":600000}}}"#,
        );
        let refund = client(&transport).refunds().get(3).unwrap();
        assert_eq!(refund.status, "processed");
        match refund.transaction {
            Some(RefundTransaction::Details(tx)) => assert_eq!(tx.reference, "Txn-1"),
            other => panic!("expected embedded transaction, got {other:?}"),
        }

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, crate::http::HttpMethod::Get);
        assert_eq!(sent.url, "https://api.example.test/refund/3");
        assert!(sent.body.is_none());
    }
}
