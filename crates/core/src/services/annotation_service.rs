use crate::errors::CoreError;
use crate::models::annotation::{Annotation, AnnotationColor, ArrowStyle};
use crate::models::chart::PriceChart;
use crate::models::mint::{MintEvent, MintKind, NftRecord};

/// Long arrows point down from the SOL price by this share of SOL's high.
pub const LONG_OFFSET_RATIO: f64 = 0.10;

/// Short arrows point up from the BTC price by this share of BTC's high.
pub const SHORT_OFFSET_RATIO: f64 = 0.05;

/// Derives chart arrows from mint events.
///
/// Pure business logic, no I/O. The same event and the same chart always
/// produce the same annotation.
pub struct AnnotationService;

impl AnnotationService {
    pub fn new() -> Self {
        Self
    }

    /// Build the arrow for `event`.
    ///
    /// `chart` must be the chart *before* the event's own prices were
    /// appended: the offset is scaled by the highest value seen so far.
    ///
    /// - Long: on SOL's axis, from `price_b` down to
    ///   `price_b - 10% * max(SOL)`, green, "Long SOL/USD".
    /// - Short: on BTC's axis, from `price_a` up to
    ///   `price_a + 5% * max(BTC)`, red, "Short BTC/USD".
    pub fn build_annotation(&self, event: &MintEvent, chart: &PriceChart) -> Annotation {
        let anchor_label = event.axis_label();
        match event.kind {
            MintKind::Long => {
                let series = chart.series_b();
                Annotation {
                    target_axis_id: series.axis_id.clone(),
                    anchor_label,
                    start_value: event.price_b,
                    end_value: event.price_b - series.max_value() * LONG_OFFSET_RATIO,
                    color: AnnotationColor::Green,
                    caption: format!("Long {}", series.name),
                    style: ArrowStyle::LONG,
                }
            }
            MintKind::Short => {
                let series = chart.series_a();
                Annotation {
                    target_axis_id: series.axis_id.clone(),
                    anchor_label,
                    start_value: event.price_a,
                    end_value: event.price_a + series.max_value() * SHORT_OFFSET_RATIO,
                    color: AnnotationColor::Red,
                    caption: format!("Short {}", series.name),
                    style: ArrowStyle::SHORT,
                }
            }
        }
    }

    /// Same as `build_annotation`, straight from a wire record.
    /// Fails with `InvalidEventKind` for anything but "long"/"short".
    pub fn build_from_record(
        &self,
        record: &NftRecord,
        chart: &PriceChart,
    ) -> Result<Annotation, CoreError> {
        let event = MintEvent::try_from(record.clone())?;
        Ok(self.build_annotation(&event, chart))
    }

    /// Append `next` after `existing`. Order is kept and nothing is merged.
    pub fn append_annotation(mut existing: Vec<Annotation>, next: Annotation) -> Vec<Annotation> {
        existing.push(next);
        existing
    }
}

impl Default for AnnotationService {
    fn default() -> Self {
        Self::new()
    }
}
