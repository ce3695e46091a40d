//! Entry point tying the dispatcher to the resource services.
//!
//! # Design
//! `Client` owns one `Dispatcher`; each accessor hands out a lightweight
//! service borrowing it. The client is `Send + Sync`, so a single instance
//! can be shared across threads (e.g. behind an `Arc`) without locking.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::http::Transport;
use crate::services::{
    DedicatedAccountService, DisputeService, ProductService, RefundService, SplitService,
};

/// Blocking client for the Paystack API.
#[derive(Debug)]
pub struct Client {
    dispatcher: Dispatcher,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::new(config)?,
        })
    }

    /// Build from `PAYSTACK_SECRET_KEY` and friends; see `ClientConfig::from_env`.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        Ok(Self {
            dispatcher: Dispatcher::with_transport(config, transport)?,
        })
    }

    /// The shared dispatcher, for endpoints without a dedicated service.
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn products(&self) -> ProductService<'_> {
        ProductService::new(&self.dispatcher)
    }

    pub fn refunds(&self) -> RefundService<'_> {
        RefundService::new(&self.dispatcher)
    }

    pub fn splits(&self) -> SplitService<'_> {
        SplitService::new(&self.dispatcher)
    }

    pub fn disputes(&self) -> DisputeService<'_> {
        DisputeService::new(&self.dispatcher)
    }

    pub fn dedicated_accounts(&self) -> DedicatedAccountService<'_> {
        DedicatedAccountService::new(&self.dispatcher)
    }
}
