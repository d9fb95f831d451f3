use tokio::sync::watch;

use crate::errors::CoreError;
use crate::models::mint::{ImageUpload, MintEvent, MintKind};
use crate::providers::traits::NftService;
use crate::services::event_bus::MintBus;
use crate::services::lifetime::LifetimeToken;

pub const MSG_NO_FILE: &str = "Please select an image file.";
pub const MSG_MINTING: &str = "Minting NFT...";
pub const MSG_MINTED: &str = "NFT Minted Successfully!";

/// Whether a mint request is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Pending,
}

/// Message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Info(String),
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Feedback::Info(m) | Feedback::Success(m) | Feedback::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// The "create your NFT" form: file + kind in, minted record out.
///
/// A successful mint is published on the `MintBus`; nothing is published
/// for a failed or cancelled one.
pub struct CreatorForm {
    selected: Option<ImageUpload>,
    kind: MintKind,
    state: watch::Sender<SubmitState>,
    feedback: Option<Feedback>,
    last_minted: Option<MintEvent>,
    token: LifetimeToken,
}

impl CreatorForm {
    pub fn new(token: LifetimeToken) -> Self {
        let (state, _) = watch::channel(SubmitState::Idle);
        Self {
            selected: None,
            kind: MintKind::default(),
            state,
            feedback: None,
            last_minted: None,
            token,
        }
    }

    // ── Inputs ──────────────────────────────────────────────────────

    /// Pick a new image. Clears the previous feedback and minted record.
    pub fn select_file(&mut self, upload: ImageUpload) {
        self.selected = Some(upload);
        self.feedback = None;
        self.last_minted = None;
    }

    /// Validate raw file contents and select them.
    /// A rejected file clears the selection and shows the reason.
    pub fn select_file_bytes(
        &mut self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), CoreError> {
        match ImageUpload::new(file_name, bytes) {
            Ok(upload) => {
                self.select_file(upload);
                Ok(())
            }
            Err(e) => {
                self.selected = None;
                self.last_minted = None;
                self.feedback = Some(Feedback::Error(e.user_message()));
                Err(e)
            }
        }
    }

    pub fn clear_file(&mut self) {
        self.selected = None;
    }

    pub fn set_kind(&mut self, kind: MintKind) {
        self.kind = kind;
    }

    // ── Submit ──────────────────────────────────────────────────────

    /// Mint the selected file.
    ///
    /// Without a file this fails with `ValidationError` and makes no call.
    /// While the request runs, `submit_state()` reports `Pending`; it is
    /// back to `Idle` when this returns, whatever the outcome.
    pub async fn submit(
        &mut self,
        service: &dyn NftService,
        bus: &MintBus,
    ) -> Result<MintEvent, CoreError> {
        let upload = match &self.selected {
            Some(upload) => upload.clone(),
            None => {
                self.feedback = Some(Feedback::Error(MSG_NO_FILE.to_string()));
                return Err(CoreError::ValidationError(MSG_NO_FILE.to_string()));
            }
        };
        if self.is_pending() {
            return Err(CoreError::ValidationError("A mint is already in progress".into()));
        }

        let kind = self.kind;
        self.state.send_replace(SubmitState::Pending);
        self.feedback = Some(Feedback::Info(MSG_MINTING.to_string()));
        self.last_minted = None;

        let result = self
            .token
            .run(async {
                let record = service.mint(&upload, kind).await?;
                MintEvent::try_from(record)
            })
            .await;

        self.state.send_replace(SubmitState::Idle);

        match result {
            Ok(event) => {
                tracing::info!(
                    id = %event.id,
                    kind = %event.kind,
                    price_btc = event.price_a,
                    price_sol = event.price_b,
                    "NFT minted"
                );
                self.feedback = Some(Feedback::Success(MSG_MINTED.to_string()));
                self.last_minted = Some(event.clone());
                bus.publish(event.clone());
                Ok(event)
            }
            Err(CoreError::Cancelled) => Err(CoreError::Cancelled),
            Err(e) => {
                tracing::warn!(service = service.name(), error = %e, "mint failed");
                self.feedback = Some(Feedback::Error(e.user_message()));
                Err(e)
            }
        }
    }

    // ── Queries ─────────────────────────────────────────────────────

    pub fn selected_file(&self) -> Option<&ImageUpload> {
        self.selected.as_ref()
    }

    pub fn kind(&self) -> MintKind {
        self.kind
    }

    pub fn submit_state(&self) -> SubmitState {
        *self.state.borrow()
    }

    /// Follow `submit_state()` changes from elsewhere (e.g. to disable inputs).
    pub fn watch_state(&self) -> watch::Receiver<SubmitState> {
        self.state.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.submit_state() == SubmitState::Pending
    }

    /// The submit button is enabled only with a file and no request in flight.
    pub fn can_submit(&self) -> bool {
        self.selected.is_some() && !self.is_pending()
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Record shown in the "minted NFT details" panel.
    pub fn last_minted(&self) -> Option<&MintEvent> {
        self.last_minted.as_ref()
    }
}
