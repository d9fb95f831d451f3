use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Direction of a mint signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MintKind {
    /// Bullish on SOL
    #[default]
    Long,
    /// Bearish on BTC
    Short,
}

impl MintKind {
    /// Wire form sent as the `nft_type` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            MintKind::Long => "long",
            MintKind::Short => "short",
        }
    }
}

impl std::fmt::Display for MintKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MintKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "long" => Ok(MintKind::Long),
            "short" => Ok(MintKind::Short),
            other => Err(CoreError::InvalidEventKind(other.to_string())),
        }
    }
}

/// A minted NFT exactly as the service serializes it.
///
/// `nft_type` is kept as a raw string here so that an unexpected value
/// surfaces as `InvalidEventKind` rather than an opaque JSON error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftRecord {
    pub id: String,
    pub nft_type: String,
    pub creation_timestamp: DateTime<Utc>,
    pub minting_price_btc: f64,
    pub minting_price_sol: f64,
    pub gif_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_image_url: Option<String>,
}

/// One completed simulated NFT creation. Immutable once received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MintEvent {
    pub id: String,
    pub kind: MintKind,
    pub timestamp: DateTime<Utc>,
    /// BTC/USD at mint time
    pub price_a: f64,
    /// SOL/USD at mint time
    pub price_b: f64,
    /// Animated GIF produced by the service (absolute or root-relative)
    pub image_ref: String,
    pub original_image_ref: Option<String>,
}

impl MintEvent {
    /// First eight characters of the id, for card headings.
    pub fn short_id(&self) -> &str {
        match self.id.char_indices().nth(8) {
            Some((idx, _)) => &self.id[..idx],
            None => &self.id,
        }
    }

    /// Turn a root-relative image path into a full URL under `base_url`.
    /// Absolute `http(s)` references are returned untouched.
    pub fn resolve_image_url(&self, base_url: &str) -> String {
        resolve_url(base_url, &self.image_ref)
    }

    /// Axis label for this event: wall-clock time of the mint.
    pub fn axis_label(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }
}

impl TryFrom<NftRecord> for MintEvent {
    type Error = CoreError;

    fn try_from(record: NftRecord) -> Result<Self, Self::Error> {
        let kind = record.nft_type.parse::<MintKind>()?;
        Ok(Self {
            id: record.id,
            kind,
            timestamp: record.creation_timestamp,
            price_a: record.minting_price_btc,
            price_b: record.minting_price_sol,
            image_ref: record.gif_url,
            original_image_ref: record.original_image_url,
        })
    }
}

impl From<&MintEvent> for NftRecord {
    fn from(event: &MintEvent) -> Self {
        Self {
            id: event.id.clone(),
            nft_type: event.kind.as_str().to_string(),
            creation_timestamp: event.timestamp,
            minting_price_btc: event.price_a,
            minting_price_sol: event.price_b,
            gif_url: event.image_ref.clone(),
            original_image_url: event.original_image_ref.clone(),
        }
    }
}

pub(crate) fn resolve_url(base_url: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }
    let base = base_url.trim_end_matches('/');
    if reference.starts_with('/') {
        format!("{base}{reference}")
    } else {
        format!("{base}/{reference}")
    }
}

/// Image formats the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMime {
    Png,
    Jpeg,
}

impl ImageMime {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Png => "image/png",
            ImageMime::Jpeg => "image/jpeg",
        }
    }

    /// Guess from a file name's extension (png, jpg, jpeg; any case).
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageMime::Png),
            "jpg" | "jpeg" => Some(ImageMime::Jpeg),
            _ => None,
        }
    }
}

/// A user-selected image, ready to be sent as the `file` form part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    mime: ImageMime,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, CoreError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(CoreError::ValidationError("No selected file".into()));
        }
        let mime = ImageMime::from_file_name(&file_name).ok_or_else(|| {
            CoreError::ValidationError(format!(
                "File type not allowed: '{file_name}' (expected .png, .jpg or .jpeg)"
            ))
        })?;
        if bytes.is_empty() {
            return Err(CoreError::ValidationError(format!("File '{file_name}' is empty")));
        }
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> ImageMime {
        self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
