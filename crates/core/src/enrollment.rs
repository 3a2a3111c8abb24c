//! Enrollment gate.

use serde::{Deserialize, Serialize};

/// Singleton flag controlling whether new registrations are accepted.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub enabled: bool,
}

impl Enrollment {
    /// Value the singleton takes when it is first read and does not exist yet.
    pub const DEFAULT_ENABLED: bool = true;

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether a registration may be created under the given gate state.
    ///
    /// A missing singleton counts as closed.
    pub fn admits(gate: Option<&Enrollment>) -> bool {
        gate.is_some_and(|e| e.enabled)
    }
}

impl Default for Enrollment {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ENABLED)
    }
}
