use serde::{Deserialize, Serialize};

/// Marker color; green for long signals, red for short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationColor {
    Green,
    Red,
}

impl AnnotationColor {
    /// Translucent fill used behind the caption.
    pub fn caption_background(&self) -> &'static str {
        match self {
            AnnotationColor::Green => "rgba(0,255,0,0.1)",
            AnnotationColor::Red => "rgba(255,0,0,0.1)",
        }
    }
}

impl std::fmt::Display for AnnotationColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotationColor::Green => write!(f, "green"),
            AnnotationColor::Red => write!(f, "red"),
        }
    }
}

/// Fixed drawing parameters shared by every mint arrow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowStyle {
    pub border_width: u32,
    pub head_length: u32,
    pub head_width: u32,
    /// Vertical nudge applied to the caption, in pixels
    pub caption_offset_y: i32,
}

impl ArrowStyle {
    pub const LONG: ArrowStyle = ArrowStyle {
        border_width: 3,
        head_length: 12,
        head_width: 8,
        caption_offset_y: -10,
    };

    pub const SHORT: ArrowStyle = ArrowStyle {
        border_width: 3,
        head_length: 12,
        head_width: 8,
        caption_offset_y: 10,
    };
}

/// A vertical arrow drawn at one x position against one y axis.
///
/// Derived from a mint event and the chart as it was just before that
/// event's prices were appended. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Y axis the arrow is measured against ("yBtc" / "ySol")
    pub target_axis_id: String,

    /// X position (the label appended for the mint)
    pub anchor_label: String,

    pub start_value: f64,
    pub end_value: f64,
    pub color: AnnotationColor,
    pub caption: String,
    pub style: ArrowStyle,
}
