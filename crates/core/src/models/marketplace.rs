use serde::{Deserialize, Serialize};

use super::mint::MintEvent;

/// Client-side simulated ownership state. Never sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    Owned,
    ForSale,
}

impl ListingStatus {
    /// Caption shown under the card.
    pub fn caption(&self) -> &'static str {
        match self {
            ListingStatus::Owned => "Owned by you (Simulated)",
            ListingStatus::ForSale => "For Sale (Simulated)",
        }
    }

    /// Highlight color for the caption.
    pub fn highlight(&self) -> &'static str {
        match self {
            ListingStatus::Owned => "green",
            ListingStatus::ForSale => "orange",
        }
    }
}

impl std::fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.caption())
    }
}

/// A fetched record joined with its local status for display.
///
/// `status == None` is the unset state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketplaceItem<'a> {
    pub event: &'a MintEvent,
    pub status: Option<ListingStatus>,
}

/// Progress of the most recent marketplace fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Never fetched
    #[default]
    Idle,
    Loading,
    Ready,
    /// Last fetch failed; the previous list is still held
    Failed(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
