use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::marketplace::{ListingStatus, LoadState, MarketplaceItem};
use crate::models::mint::{MintEvent, NftRecord};
use crate::providers::traits::NftService;
use crate::services::event_bus::Subscription;
use crate::services::lifetime::LifetimeToken;

/// The simulated marketplace: every minted NFT, newest first, plus the
/// user's local buy/sell toggles.
///
/// Fetched records and local statuses are kept apart. Statuses live only
/// here and are never sent anywhere.
pub struct Marketplace {
    items: Vec<MintEvent>,
    statuses: HashMap<String, ListingStatus>,
    load_state: LoadState,
    token: LifetimeToken,
}

impl Marketplace {
    pub fn new(token: LifetimeToken) -> Self {
        Self {
            items: Vec::new(),
            statuses: HashMap::new(),
            load_state: LoadState::Idle,
            token,
        }
    }

    /// Re-fetch the full list and replace what is held.
    ///
    /// - Sorted newest first; equal timestamps keep service order.
    /// - Statuses survive for ids still present and are dropped otherwise.
    /// - Records with an unknown `nft_type` are skipped.
    /// - On failure the previous list is kept and `load_state()` carries the
    ///   message. Nothing is retried.
    ///
    /// Returns the number of items now held.
    pub async fn refresh(&mut self, service: &dyn NftService) -> Result<usize, CoreError> {
        let previous = std::mem::replace(&mut self.load_state, LoadState::Loading);

        match self.token.run(service.list_all()).await {
            Ok(records) => {
                self.replace_items(records);
                self.load_state = LoadState::Ready;
                tracing::info!(
                    service = service.name(),
                    items = self.items.len(),
                    statuses = self.statuses.len(),
                    "marketplace refreshed"
                );
                Ok(self.items.len())
            }
            Err(CoreError::Cancelled) => {
                self.load_state = previous;
                Err(CoreError::Cancelled)
            }
            Err(e) => {
                tracing::warn!(service = service.name(), error = %e, "marketplace refresh failed");
                self.load_state = LoadState::Failed(e.user_message());
                Err(e)
            }
        }
    }

    /// Refresh once if any mint was published since the last call.
    /// Returns `Ok(false)` when nothing was pending.
    pub async fn refresh_on_events(
        &mut self,
        subscription: &mut Subscription,
        service: &dyn NftService,
    ) -> Result<bool, CoreError> {
        let pending = subscription.drain();
        if pending.is_empty() {
            return Ok(false);
        }
        tracing::debug!(events = pending.len(), "mint published; refreshing marketplace");
        self.refresh(service).await?;
        Ok(true)
    }

    fn replace_items(&mut self, records: Vec<NftRecord>) {
        let mut items: Vec<MintEvent> = records
            .into_iter()
            .filter_map(|record| {
                let id = record.id.clone();
                match MintEvent::try_from(record) {
                    Ok(event) => Some(event),
                    Err(e) => {
                        tracing::warn!(%id, error = %e, "skipping marketplace record");
                        None
                    }
                }
            })
            .collect();
        // sort_by is stable: ties keep service order
        items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        self.statuses
            .retain(|id, _| items.iter().any(|item| &item.id == id));
        self.items = items;
    }

    // ── Status toggles ──────────────────────────────────────────────

    /// Simulated buy.
    pub fn mark_owned(&mut self, id: &str) -> Result<(), CoreError> {
        self.set_status(id, ListingStatus::Owned)
    }

    /// Simulated sell.
    pub fn mark_for_sale(&mut self, id: &str) -> Result<(), CoreError> {
        self.set_status(id, ListingStatus::ForSale)
    }

    /// Back to unset. Returns the status that was removed, if any.
    pub fn clear_status(&mut self, id: &str) -> Result<Option<ListingStatus>, CoreError> {
        self.ensure_known(id)?;
        Ok(self.statuses.remove(id))
    }

    fn set_status(&mut self, id: &str, status: ListingStatus) -> Result<(), CoreError> {
        self.ensure_known(id)?;
        tracing::debug!(%id, ?status, "marketplace status set");
        self.statuses.insert(id.to_string(), status);
        Ok(())
    }

    fn ensure_known(&self, id: &str) -> Result<(), CoreError> {
        if self.items.iter().any(|item| item.id == id) {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("marketplace item {id}")))
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Items in display order, each with its local status.
    pub fn items(&self) -> Vec<MarketplaceItem<'_>> {
        self.items
            .iter()
            .map(|event| MarketplaceItem {
                event,
                status: self.statuses.get(&event.id).copied(),
            })
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<MarketplaceItem<'_>> {
        self.items
            .iter()
            .find(|event| event.id == id)
            .map(|event| MarketplaceItem {
                event,
                status: self.statuses.get(id).copied(),
            })
    }

    pub fn status(&self, id: &str) -> Option<ListingStatus> {
        self.statuses.get(id).copied()
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when there is nothing to list ("No NFTs available" placeholder).
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
