use derive_more::{Display, From};
use uuid::Uuid;

use crate::error::UploadError;
use crate::prediction::{PredictionResponse, PredictionView};
use crate::progress::{FINALIZE_TRANSITION, PENDING_TRANSITION, SimulatedProgress};
use crate::ACCEPTED_EXTENSION;

const PENDING_COLOR: &str = "#94a3b8";
const ERROR_COLOR: &str = "#ef4444";

/// Identifies one upload; results from older attempts are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From)]
pub struct AttemptId(Uuid);

impl AttemptId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AttemptId {
    fn default() -> Self {
        Self::new()
    }
}

pub fn validate_upload(name: &str) -> Result<(), UploadError> {
    if name.ends_with(ACCEPTED_EXTENSION) {
        Ok(())
    } else {
        Err(UploadError::InvalidExtension {
            name: name.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum UploadPhase {
    Idle,
    Uploading { progress: SimulatedProgress },
    Finalizing { response: PredictionResponse },
    Done(PredictionView),
    Failed(String),
}

/// View-model behind the result card.
///
/// Every transition takes the `AttemptId` it belongs to and returns whether
/// anything changed, so callbacks from a superseded upload are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSession {
    attempt: Option<AttemptId>,
    filename: Option<String>,
    phase: UploadPhase,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSession {
    pub fn new() -> Self {
        Self {
            attempt: None,
            filename: None,
            phase: UploadPhase::Idle,
        }
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Starts a new attempt. A rejected file leaves the session untouched.
    pub fn begin(&mut self, filename: &str) -> Result<AttemptId, UploadError> {
        validate_upload(filename)?;

        let id = AttemptId::new();
        self.attempt = Some(id);
        self.filename = Some(filename.to_string());
        self.phase = UploadPhase::Uploading {
            progress: SimulatedProgress::new(),
        };
        Ok(id)
    }

    fn is_current(&self, id: AttemptId) -> bool {
        self.attempt == Some(id)
    }

    pub fn tick(&mut self, id: AttemptId, sample: f64) -> bool {
        if !self.is_current(id) {
            return false;
        }
        match &mut self.phase {
            UploadPhase::Uploading { progress } => {
                progress.advance(sample);
                true
            }
            _ => false,
        }
    }

    pub fn complete(&mut self, id: AttemptId, response: PredictionResponse) -> bool {
        if !self.is_current(id) || !matches!(self.phase, UploadPhase::Uploading { .. }) {
            return false;
        }
        self.phase = UploadPhase::Finalizing { response };
        true
    }

    pub fn reveal(&mut self, id: AttemptId) -> bool {
        if !self.is_current(id) {
            return false;
        }
        match &self.phase {
            UploadPhase::Finalizing { response } => {
                self.phase = UploadPhase::Done(PredictionView::from_response(response));
                true
            }
            _ => false,
        }
    }

    pub fn fail(&mut self, id: AttemptId, error: &UploadError) -> bool {
        if !self.is_current(id) || !matches!(self.phase, UploadPhase::Uploading { .. }) {
            return false;
        }
        self.phase = UploadPhase::Failed(error.to_string());
        true
    }

    pub fn card_visible(&self) -> bool {
        !matches!(self.phase, UploadPhase::Idle)
    }

    /// The distance visualizer pulses until the results are swapped in.
    pub fn is_loading(&self) -> bool {
        matches!(
            self.phase,
            UploadPhase::Uploading { .. } | UploadPhase::Finalizing { .. }
        )
    }

    pub fn title(&self) -> String {
        match &self.phase {
            UploadPhase::Idle => String::new(),
            UploadPhase::Uploading { progress } => {
                format!("Processing... {}%", progress.percent())
            }
            UploadPhase::Finalizing { .. } => "Finalizing Analysis... 100%".to_string(),
            UploadPhase::Done(view) => view.verdict.headline().to_string(),
            UploadPhase::Failed(message) => format!("Error: {}", message),
        }
    }

    pub fn title_color(&self) -> &'static str {
        match &self.phase {
            UploadPhase::Done(view) => view.verdict.color(),
            UploadPhase::Failed(_) => ERROR_COLOR,
            _ => PENDING_COLOR,
        }
    }

    pub fn bar_width(&self) -> f64 {
        match &self.phase {
            UploadPhase::Idle | UploadPhase::Failed(_) => 0.0,
            UploadPhase::Uploading { progress } => progress.value(),
            UploadPhase::Finalizing { .. } | UploadPhase::Done(_) => 100.0,
        }
    }

    pub fn bar_transition(&self) -> &'static str {
        match &self.phase {
            UploadPhase::Finalizing { .. } | UploadPhase::Done(_) => FINALIZE_TRANSITION,
            _ => PENDING_TRANSITION,
        }
    }

    pub fn result(&self) -> Option<&PredictionView> {
        match &self.phase {
            UploadPhase::Done(view) => Some(view),
            _ => None,
        }
    }
}
