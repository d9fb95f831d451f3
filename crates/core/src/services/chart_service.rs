use serde::Serialize;

use crate::errors::CoreError;
use crate::models::annotation::Annotation;
use crate::models::chart::{PriceChart, Series, BTC_AXIS_ID, SOL_AXIS_ID};
use crate::models::mint::{MintEvent, NftRecord};
use crate::models::render::{AxisPosition, AxisSpec, ChartSpec, DatasetSpec};
use crate::services::annotation_service::AnnotationService;
use crate::services::event_bus::Subscription;

const CHART_TITLE: &str = "Crypto Price Chart with Mint Events";

/// Everything the chart shows, swapped as one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartState {
    pub chart: PriceChart,
    pub annotations: Vec<Annotation>,
}

impl ChartState {
    pub fn initial() -> Self {
        Self {
            chart: PriceChart::initial(),
            annotations: Vec::new(),
        }
    }
}

impl Default for ChartState {
    fn default() -> Self {
        Self::initial()
    }
}

/// The price chart with mint arrows.
///
/// Applying a mint extends both series and adds its arrow in one step: the
/// next state is computed fully off to the side and then swapped in, so no
/// reader ever sees the series extended without the arrow (or the reverse).
pub struct ChartView {
    seed: PriceChart,
    state: ChartState,
    annotation_service: AnnotationService,
}

impl ChartView {
    pub fn new() -> Self {
        Self::with_seed(PriceChart::initial())
    }

    /// Start from `seed` instead of the built-in dataset. `reset` returns here.
    pub fn with_seed(seed: PriceChart) -> Self {
        Self {
            state: ChartState {
                chart: seed.clone(),
                annotations: Vec::new(),
            },
            seed,
            annotation_service: AnnotationService::new(),
        }
    }

    pub fn state(&self) -> &ChartState {
        &self.state
    }

    pub fn chart(&self) -> &PriceChart {
        &self.state.chart
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.state.annotations
    }

    /// Extend the chart with a mint and add its arrow.
    ///
    /// On error nothing changes.
    pub fn apply_mint(&mut self, event: &MintEvent) -> Result<Annotation, CoreError> {
        let label = event.axis_label();

        // Arrow offsets are scaled on the chart as it was before this mint.
        let annotation = self
            .annotation_service
            .build_annotation(event, &self.state.chart);
        let chart = self
            .state
            .chart
            .append(label, event.price_a, event.price_b)?;
        let annotations = AnnotationService::append_annotation(
            self.state.annotations.clone(),
            annotation.clone(),
        );

        self.state = ChartState { chart, annotations };

        tracing::debug!(
            id = %event.id,
            kind = %event.kind,
            points = self.state.chart.len(),
            annotations = self.state.annotations.len(),
            "applied mint to chart"
        );

        Ok(annotation)
    }

    /// `apply_mint` for a raw wire record. Unknown kinds are rejected.
    pub fn apply_record(&mut self, record: NftRecord) -> Result<Annotation, CoreError> {
        let event = MintEvent::try_from(record)?;
        self.apply_mint(&event)
    }

    /// Apply every event waiting on `subscription`, oldest first.
    /// Events that cannot be applied are logged and skipped.
    /// Returns how many were applied.
    pub fn drain(&mut self, subscription: &mut Subscription) -> usize {
        let mut applied = 0;
        for event in subscription.drain() {
            match self.apply_mint(&event) {
                Ok(_) => applied += 1,
                Err(e) => tracing::warn!(id = %event.id, error = %e, "skipping mint event"),
            }
        }
        applied
    }

    /// Back to the seed data with no arrows. Mints applied so far are discarded.
    pub fn reset(&mut self) {
        self.state = ChartState {
            chart: self.seed.clone(),
            annotations: Vec::new(),
        };
        tracing::debug!("chart reset");
    }

    /// Describe the chart for the renderer.
    pub fn render(&self) -> ChartSpec {
        let chart = &self.state.chart;
        ChartSpec {
            title: CHART_TITLE.to_string(),
            labels: chart.labels().to_vec(),
            datasets: vec![
                dataset(chart.series_a(), "rgb(255, 99, 132)", "rgba(255, 99, 132, 0.5)"),
                dataset(chart.series_b(), "rgb(54, 162, 235)", "rgba(54, 162, 235, 0.5)"),
            ],
            x_axis: AxisSpec {
                id: "x".to_string(),
                title: "Time/Events".to_string(),
                position: AxisPosition::Bottom,
                tick_prefix: None,
                grid_on_chart: true,
            },
            y_axes: vec![
                AxisSpec {
                    id: BTC_AXIS_ID.to_string(),
                    title: "BTC Price (USD)".to_string(),
                    position: AxisPosition::Left,
                    tick_prefix: None,
                    grid_on_chart: false,
                },
                AxisSpec {
                    id: SOL_AXIS_ID.to_string(),
                    title: "SOL Price (USD)".to_string(),
                    position: AxisPosition::Right,
                    tick_prefix: Some("$".to_string()),
                    grid_on_chart: true,
                },
            ],
            annotations: self.state.annotations.clone(),
            animated: false,
        }
    }
}

impl Default for ChartView {
    fn default() -> Self {
        Self::new()
    }
}

fn dataset(series: &Series, border: &str, background: &str) -> DatasetSpec {
    DatasetSpec {
        label: series.name.clone(),
        axis_id: series.axis_id.clone(),
        data: series.values().collect(),
        border_color: border.to_string(),
        background_color: background.to_string(),
        tension: 0.1,
    }
}
