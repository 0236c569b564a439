//! Identity types for observables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an observable instance at runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObservableId(pub u64);

impl ObservableId {
    /// Create a new observable ID
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ObservableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "observable:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observable_id() {
        let id = ObservableId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "observable:42");
    }
}
