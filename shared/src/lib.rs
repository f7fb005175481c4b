//! Types and view logic shared by the gateway and the browser app.
//!
//! Nothing in here touches the DOM or the network, so the whole crate is
//! unit-tested on the host.

pub mod carousel;
pub mod error;
pub mod prediction;
pub mod progress;
pub mod upload;

pub use carousel::{CardSlot, Carousel};
pub use error::UploadError;
pub use prediction::{ImagePanel, PredictionDetails, PredictionResponse, PredictionView, Verdict};
pub use progress::SimulatedProgress;
pub use upload::{AttemptId, UploadSession};

/// Multipart field name carrying the recording, on both hops.
pub const UPLOAD_FIELD: &str = "file";

/// Only plain-text OpenBCI/STEW exports are accepted.
pub const ACCEPTED_EXTENSION: &str = ".txt";
