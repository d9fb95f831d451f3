use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::{CoreError, GENERIC_FAILURE_MESSAGE};
use crate::models::mint::{ImageUpload, MintKind, NftRecord};
use crate::models::settings::ClientSettings;
use super::traits::NftService;

/// HTTP client for the NFT service.
///
/// - `POST {base}{prefix}/nft/mint`: multipart form (`file`, `nft_type`)
/// - `GET  {base}{prefix}/nft/all`: JSON array of records
///
/// Non-2xx replies carry a JSON body `{"error": "..."}`; that message is
/// surfaced verbatim through `CoreError::Service`.
pub struct HttpNftService {
    client: Client,
    mint_url: String,
    list_url: String,
}

impl HttpNftService {
    pub fn new(settings: &ClientSettings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            mint_url: settings.mint_url(),
            list_url: settings.list_url(),
        }
    }

    pub fn mint_url(&self) -> &str {
        &self.mint_url
    }

    pub fn list_url(&self) -> &str {
        &self.list_url
    }
}

impl Default for HttpNftService {
    fn default() -> Self {
        Self::new(&ClientSettings::default())
    }
}

// ── Error body ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

/// Build the error for a non-2xx reply from its status and raw body.
pub(crate) fn service_error(status: u16, body: &str) -> CoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.or(b.message))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
    CoreError::Service { status, message }
}

async fn check_status(resp: Response) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(service_error(status.as_u16(), &body))
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl NftService for HttpNftService {
    fn name(&self) -> &str {
        "NFT service (HTTP)"
    }

    async fn mint(&self, upload: &ImageUpload, kind: MintKind) -> Result<NftRecord, CoreError> {
        let part = Part::bytes(upload.bytes().to_vec())
            .file_name(upload.file_name().to_string())
            .mime_str(upload.mime().as_str())?;
        let form = Form::new()
            .part("file", part)
            .text("nft_type", kind.as_str());

        tracing::debug!(
            url = %self.mint_url,
            file = upload.file_name(),
            bytes = upload.len(),
            %kind,
            "sending mint request"
        );

        let resp = self.client.post(&self.mint_url).multipart(form).send().await?;
        let resp = check_status(resp).await?;
        let body = resp.text().await?;
        let record: NftRecord = serde_json::from_str(&body)?;
        Ok(record)
    }

    async fn list_all(&self) -> Result<Vec<NftRecord>, CoreError> {
        tracing::debug!(url = %self.list_url, "fetching all NFTs");

        let resp = self.client.get(&self.list_url).send().await?;
        let resp = check_status(resp).await?;
        let body = resp.text().await?;
        let records: Vec<NftRecord> = serde_json::from_str(&body)?;
        Ok(records)
    }
}
