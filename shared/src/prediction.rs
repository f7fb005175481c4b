use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum_macros::EnumIter;

/// Label the prediction service uses for the positive class.
pub const BURNOUT_LABEL: &str = "Burnout";

pub const BURNOUT_COLOR: &str = "#ef4444";
pub const RELAXED_COLOR: &str = "#10b981";

/// Marker offset from the centre of the distance axis per confidence point.
const MARKER_SCALE: f64 = 2.2;
const MARKER_MIN: f64 = 2.0;
const MARKER_MAX: f64 = 98.0;

/// Body returned by `POST /predict`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub prediction: String,
    pub confidence: String,
    #[serde(default)]
    pub details: PredictionDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xai_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topomap_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Raw result of the prediction service, echoed under `details`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct PredictionDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows_analyzed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xai_base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topomap_base64: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Burnout,
    Relaxed,
}

impl Verdict {
    /// Anything the service calls other than `Burnout` is shown as relaxed.
    pub fn from_label(label: &str) -> Self {
        if label == BURNOUT_LABEL {
            Verdict::Burnout
        } else {
            Verdict::Relaxed
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            Verdict::Burnout => "Burnout Detected",
            Verdict::Relaxed => "Relaxed State",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Verdict::Burnout => BURNOUT_COLOR,
            Verdict::Relaxed => RELAXED_COLOR,
        }
    }
}

/// Optional diagnostic images and the DOM hooks they render into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum ImagePanel {
    SpatialPlot,
    Xai,
    Topomap,
}

impl ImagePanel {
    pub fn container_id(self) -> &'static str {
        match self {
            ImagePanel::SpatialPlot => "spatial-plot-container",
            ImagePanel::Xai => "xai-container",
            ImagePanel::Topomap => "topomap-container",
        }
    }

    pub fn img_id(self) -> &'static str {
        match self {
            ImagePanel::SpatialPlot => "spatial-plot-img",
            ImagePanel::Xai => "xai-img",
            ImagePanel::Topomap => "topomap-img",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ImagePanel::SpatialPlot => "Spatial Activity",
            ImagePanel::Xai => "Model Attention (XAI)",
            ImagePanel::Topomap => "Topographic Map",
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl PredictionResponse {
    pub fn verdict(&self) -> Verdict {
        Verdict::from_label(&self.prediction)
    }

    /// Base64 payload for `panel`, top level first, then `details`.
    pub fn image(&self, panel: ImagePanel) -> Option<&str> {
        let (top, nested) = match panel {
            ImagePanel::SpatialPlot => (&self.image_base64, &self.details.image_base64),
            ImagePanel::Xai => (&self.xai_base64, &self.details.xai_base64),
            ImagePanel::Topomap => (&self.topomap_base64, &self.details.topomap_base64),
        };
        non_empty(top).or_else(|| non_empty(nested))
    }
}

/// Numeric part of a percentage string such as `"87.3%"`.
///
/// Everything except digits and `.` is dropped, then the longest leading
/// decimal is parsed, so `"1.2.3"` reads as `1.2`.
pub fn parse_confidence(text: &str) -> Option<f64> {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in kept.char_indices() {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        end = i + 1;
    }

    let number = &kept[..end];
    if !number.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    number.parse::<f64>().ok()
}

/// Position of the verdict marker on the 0..100 distance axis.
pub fn marker_position(verdict: Verdict, percent: f64) -> f64 {
    let offset = percent / MARKER_SCALE;
    let position = match verdict {
        Verdict::Burnout => 50.0 + offset,
        Verdict::Relaxed => 50.0 - offset,
    };
    position.clamp(MARKER_MIN, MARKER_MAX)
}

pub fn png_data_url(payload: &str) -> String {
    format!("data:image/png;base64,{}", payload)
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelImage {
    pub panel: ImagePanel,
    pub data_url: String,
}

/// Everything the result card needs, computed once per response.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionView {
    pub verdict: Verdict,
    pub confidence: String,
    pub windows: String,
    pub marker_position: f64,
    pub images: Vec<PanelImage>,
}

impl PredictionView {
    pub fn from_response(response: &PredictionResponse) -> Self {
        use strum::IntoEnumIterator;

        let verdict = response.verdict();
        // An unreadable confidence leaves the marker at the centre.
        let percent = parse_confidence(&response.confidence).unwrap_or(0.0);
        let images = ImagePanel::iter()
            .filter_map(|panel| {
                response.image(panel).map(|payload| PanelImage {
                    panel,
                    data_url: png_data_url(payload),
                })
            })
            .collect();

        Self {
            verdict,
            confidence: response.confidence.clone(),
            windows: response
                .details
                .windows_analyzed
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            marker_position: marker_position(verdict, percent),
            images,
        }
    }

    pub fn image(&self, panel: ImagePanel) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.panel == panel)
            .map(|img| img.data_url.as_str())
    }
}
