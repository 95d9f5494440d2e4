//! # Service Traits
//!
//! Seams between the controller and its external collaborators, so tests can swap in mocks.

use crate::core::error::AppError;
use async_trait::async_trait;
use lib_swap::chains::ChainId;
use lib_swap::currency::NativeCurrency;
use lib_swap::math;
use lib_swap::price::PriceClient;
use lib_swap::quote::QuoteClient;
use lib_swap::types::Asset;
use parking_lot::RwLock;
use shared::dto::quote::{QuoteParams, QuoteResponse};
use shared::dto::token::ExternalToken;
use std::cmp::Ordering;

/// Same-chain and cross-chain quote resolution.
#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse, AppError>;

    async fn get_crosschain_quote(&self, params: &QuoteParams) -> Result<QuoteResponse, AppError>;
}

/// External token price lookup.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// `Ok(None)` when the service does not list the token.
    async fn fetch_external_token(
        &self,
        address: &str,
        chain: ChainId,
        currency: NativeCurrency,
    ) -> Result<Option<ExternalToken>, AppError>;
}

/// Read-only snapshot access to the user's held assets.
pub trait UserAssetStore: Send + Sync {
    /// Held assets, largest native balance value first.
    fn user_assets(&self) -> Vec<Asset>;

    fn get_user_asset(&self, unique_id: &str) -> Option<Asset>;
}

#[async_trait]
impl QuoteService for QuoteClient {
    async fn get_quote(&self, params: &QuoteParams) -> Result<QuoteResponse, AppError> {
        QuoteClient::get_quote(self, params).await.map_err(AppError::from)
    }

    async fn get_crosschain_quote(&self, params: &QuoteParams) -> Result<QuoteResponse, AppError> {
        QuoteClient::get_crosschain_quote(self, params).await.map_err(AppError::from)
    }
}

#[async_trait]
impl PriceService for PriceClient {
    async fn fetch_external_token(
        &self,
        address: &str,
        chain: ChainId,
        currency: NativeCurrency,
    ) -> Result<Option<ExternalToken>, AppError> {
        listed_token(PriceClient::fetch_external_token(self, address, chain, currency).await)
    }
}

/// A token the price service does not list is not an error for the controller.
fn listed_token(result: lib_core::Result<ExternalToken>) -> Result<Option<ExternalToken>, AppError> {
    match result {
        Ok(token) => Ok(Some(token)),
        Err(lib_core::AppError::NotFound(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// region: --- In-memory asset store

/// Asset store backed by a list held in memory.
#[derive(Debug, Default)]
pub struct InMemoryAssetStore {
    assets: RwLock<Vec<Asset>>,
}

impl InMemoryAssetStore {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self {
            assets: RwLock::new(assets),
        }
    }

    /// Insert an asset, replacing any entry with the same unique id.
    pub fn upsert(&self, asset: Asset) {
        let mut assets = self.assets.write();
        match assets.iter_mut().find(|held| held.is_same_asset(&asset)) {
            Some(held) => *held = asset,
            None => assets.push(asset),
        }
    }
}

fn native_balance(asset: &Asset) -> String {
    math::multiply(&asset.balance.amount, asset.price.as_deref().unwrap_or("0"))
}

fn by_native_balance_desc(a: &Asset, b: &Asset) -> Ordering {
    let (a, b) = (native_balance(a), native_balance(b));
    if math::greater_than(&a, &b) {
        Ordering::Less
    } else if math::less_than(&a, &b) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

impl UserAssetStore for InMemoryAssetStore {
    fn user_assets(&self) -> Vec<Asset> {
        let mut assets: Vec<Asset> = self
            .assets
            .read()
            .iter()
            .filter(|asset| !asset.balance.is_empty())
            .cloned()
            .collect();
        assets.sort_by(by_native_balance_desc);
        assets
    }

    fn get_user_asset(&self, unique_id: &str) -> Option<Asset> {
        self.assets
            .read()
            .iter()
            .find(|asset| asset.unique_id == unique_id)
            .cloned()
    }
}

// endregion: --- In-memory asset store
