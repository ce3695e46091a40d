//! DTOs shared by several resource services.
//!
//! # Design
//! Response structs use `#[serde(default)]` so fields the API omits or adds
//! later do not break decoding. Fields whose shape the API does not pin down
//! (`metadata`, `channel`, `attachments`) use `Metadata`, which keeps the raw
//! JSON intact for round trips.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Loosely typed JSON: the API sends a plain string, an object, or
/// occasionally something else in these fields. `null` is represented by the
/// surrounding `Option` being `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metadata {
    Text(String),
    Object(Map<String, Value>),
    Raw(Value),
}

impl Metadata {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Metadata::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Metadata::Object(map) => map.get(key),
            _ => None,
        }
    }
}

/// Generic `{status, message, data}` envelope, for endpoints whose `data` is
/// not an object (e.g. an array of providers).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope<T> {
    pub status: bool,
    pub message: String,
    pub data: T,
}

/// `{status, message}` reply from endpoints that return no `data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acknowledgement {
    pub status: bool,
    pub message: String,
}

/// A customer given either by numeric id or by customer code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CustomerRef {
    Id(u64),
    Code(String),
}

impl From<u64> for CustomerRef {
    fn from(id: u64) -> Self {
        CustomerRef::Id(id)
    }
}

impl From<&str> for CustomerRef {
    fn from(code: &str) -> Self {
        CustomerRef::Code(code.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    pub id: u64,
    pub domain: String,
    pub status: String,
    pub reference: String,
    pub amount: u64,
    pub currency: String,
    pub channel: Option<Metadata>,
    pub paid_at: Option<String>,
    #[serde(rename = "createdAt", alias = "created_at")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    pub id: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub customer_code: String,
    pub phone: Option<String>,
    pub metadata: Option<Metadata>,
    pub risk_action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bank {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubAccount {
    pub id: u64,
    pub subaccount_code: String,
    pub business_name: String,
    pub description: Option<String>,
    pub settlement_bank: String,
    pub account_number: String,
    pub percentage_charge: f64,
    pub currency: String,
    pub active: bool,
}
