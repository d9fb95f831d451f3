use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::mint::{ImageUpload, MintKind, NftRecord};

/// Trait abstraction for the remote NFT service.
///
/// The dashboard only ever talks to the service through this trait, so tests
/// and alternative transports can stand in for the HTTP client.
///
/// Implementations return wire records untouched; kind validation happens in
/// the services that consume them.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait NftService: Send + Sync {
    /// Human-readable name of this service (for logs/errors).
    fn name(&self) -> &str;

    /// Upload an image and mint a new NFT of the given kind.
    async fn mint(&self, upload: &ImageUpload, kind: MintKind) -> Result<NftRecord, CoreError>;

    /// Every NFT minted so far, in service order.
    async fn list_all(&self) -> Result<Vec<NftRecord>, CoreError>;
}
