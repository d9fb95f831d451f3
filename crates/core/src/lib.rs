pub mod errors;
pub mod models;
pub mod providers;
pub mod services;

use models::{
    annotation::Annotation,
    marketplace::{ListingStatus, MarketplaceItem},
    mint::{MintEvent, MintKind},
    render::ChartSpec,
    settings::ClientSettings,
};
use providers::{http::HttpNftService, traits::NftService};
use services::{
    chart_service::ChartView,
    creator_service::CreatorForm,
    event_bus::{MintBus, Subscription},
    lifetime::Lifetime,
    marketplace_service::Marketplace,
};

use errors::CoreError;

/// What one `Dashboard::sync` pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Mint events applied to the chart
    pub chart_applied: usize,
    /// Whether the marketplace re-fetched
    pub marketplace_refreshed: bool,
}

/// Main entry point for the mint dashboard core library.
///
/// Owns the three views of the page (creator form, price chart,
/// marketplace) and the bus that connects them. A successful mint is
/// published once and fanned out: the chart extends its series and adds an
/// arrow, the marketplace re-fetches the full list.
#[must_use]
pub struct Dashboard {
    settings: ClientSettings,
    service: Box<dyn NftService>,
    bus: MintBus,
    creator: CreatorForm,
    chart: ChartView,
    chart_events: Subscription,
    marketplace: Marketplace,
    marketplace_events: Subscription,
    lifetime: Lifetime,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("service", &self.service.name())
            .field("base_url", &self.settings.base_url)
            .field("chart_points", &self.chart.chart().len())
            .field("annotations", &self.chart.annotations().len())
            .field("marketplace_items", &self.marketplace.len())
            .field("torn_down", &self.lifetime.is_ended())
            .finish()
    }
}

impl Dashboard {
    /// Build a dashboard talking to `service`.
    pub fn new(settings: ClientSettings, service: Box<dyn NftService>) -> Result<Self, CoreError> {
        settings.validate()?;
        let bus = MintBus::new();
        let lifetime = Lifetime::new();

        let chart_events = bus.subscribe();
        let marketplace_events = bus.subscribe();

        Ok(Self {
            creator: CreatorForm::new(lifetime.token()),
            chart: ChartView::new(),
            marketplace: Marketplace::new(lifetime.token()),
            settings,
            service,
            bus,
            chart_events,
            marketplace_events,
            lifetime,
        })
    }

    /// Build a dashboard over HTTP using `settings.base_url`.
    pub fn with_http(settings: ClientSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        let service = HttpNftService::new(&settings);
        Self::new(settings, Box::new(service))
    }

    /// Initial marketplace load. Returns the number of listed items.
    pub async fn mount(&mut self) -> Result<usize, CoreError> {
        self.marketplace.refresh(self.service.as_ref()).await
    }

    // ── Creator ─────────────────────────────────────────────────────

    /// Validate and select an image for the next mint.
    pub fn select_file(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<(), CoreError> {
        self.creator.select_file_bytes(file_name, bytes)
    }

    pub fn set_kind(&mut self, kind: MintKind) {
        self.creator.set_kind(kind);
    }

    /// Mint the selected image and fan the result out to chart and marketplace.
    ///
    /// The chart and marketplace are only touched after the mint call has
    /// succeeded. A failing marketplace refresh does not fail the mint; it is
    /// reported through `marketplace().load_state()`.
    pub async fn submit_mint(&mut self) -> Result<MintEvent, CoreError> {
        let event = self
            .creator
            .submit(self.service.as_ref(), &self.bus)
            .await?;
        if let Err(e) = self.sync().await {
            tracing::warn!(id = %event.id, error = %e, "post-mint sync incomplete");
        }
        Ok(event)
    }

    /// Deliver published mint events to the chart and the marketplace.
    pub async fn sync(&mut self) -> Result<SyncReport, CoreError> {
        let chart_applied = self.chart.drain(&mut self.chart_events);
        let marketplace_refreshed = self
            .marketplace
            .refresh_on_events(&mut self.marketplace_events, self.service.as_ref())
            .await?;
        Ok(SyncReport {
            chart_applied,
            marketplace_refreshed,
        })
    }

    pub fn creator(&self) -> &CreatorForm {
        &self.creator
    }

    pub fn creator_mut(&mut self) -> &mut CreatorForm {
        &mut self.creator
    }

    // ── Chart ───────────────────────────────────────────────────────

    pub fn chart(&self) -> &ChartView {
        &self.chart
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        self.chart.annotations()
    }

    #[must_use]
    pub fn render_chart(&self) -> ChartSpec {
        self.chart.render()
    }

    /// Restore the seed chart and drop all arrows.
    pub fn reset_chart(&mut self) {
        self.chart.reset();
    }

    // ── Marketplace ─────────────────────────────────────────────────

    pub fn marketplace(&self) -> &Marketplace {
        &self.marketplace
    }

    #[must_use]
    pub fn marketplace_items(&self) -> Vec<MarketplaceItem<'_>> {
        self.marketplace.items()
    }

    pub async fn refresh_marketplace(&mut self) -> Result<usize, CoreError> {
        self.marketplace.refresh(self.service.as_ref()).await
    }

    pub fn buy(&mut self, id: &str) -> Result<(), CoreError> {
        self.marketplace.mark_owned(id)
    }

    pub fn sell(&mut self, id: &str) -> Result<(), CoreError> {
        self.marketplace.mark_for_sale(id)
    }

    pub fn clear_status(&mut self, id: &str) -> Result<Option<ListingStatus>, CoreError> {
        self.marketplace.clear_status(id)
    }

    // ── Misc ────────────────────────────────────────────────────────

    /// Full URL for an event's image under the configured base URL.
    #[must_use]
    pub fn image_url(&self, event: &MintEvent) -> String {
        event.resolve_image_url(&self.settings.base_url)
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// A handle that can tear the dashboard down from elsewhere while one of
    /// its calls is in flight.
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime.clone()
    }

    /// Cancel in-flight calls; later calls fail with `Cancelled`.
    pub fn teardown(&self) {
        self.lifetime.end();
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        self.lifetime.end();
    }
}
