//! Error types for reverb-core
//!
//! Operations on a live observable never error: delivery with no listener
//! and double registration are silent no-ops. Errors only surface at the
//! edges, on construction and registry lookup.

use crate::ObservableId;
use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Observable not found: {0}")]
    ObservableNotFound(ObservableId),

    #[error("{0} requires an event factory for first-event synthesis")]
    MissingEventFactory(ObservableId),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
