use serde::{Deserialize, Serialize};

use super::annotation::Annotation;

/// Everything a front end needs to draw the price chart.
///
/// The core computes the layout; the frontend only renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<DatasetSpec>,
    pub x_axis: AxisSpec,
    /// Left axis first, then right
    pub y_axes: Vec<AxisSpec>,
    pub annotations: Vec<Annotation>,
    /// Always false; data changes must not animate
    pub animated: bool,
}

/// One drawn line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub label: String,
    pub axis_id: String,
    pub data: Vec<f64>,
    pub border_color: String,
    pub background_color: String,
    pub tension: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisPosition {
    Bottom,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub id: String,
    pub title: String,
    pub position: AxisPosition,
    /// Prepended to tick values (e.g., "$")
    pub tick_prefix: Option<String>,
    /// Whether grid lines for this axis are drawn across the plot area
    pub grid_on_chart: bool,
}
