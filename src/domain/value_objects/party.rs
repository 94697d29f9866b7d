//! Party parameters for encounter balancing

use serde::{Deserialize, Serialize};

use crate::domain::errors::AnalysisError;

pub const DEFAULT_PARTY_LEVEL: u32 = 3;
pub const DEFAULT_PARTY_SIZE: u32 = 4;

/// Level and head-count of the adventuring party
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyProfile {
    level: u32,
    size: u32,
}

impl PartyProfile {
    /// Validate party parameters.
    ///
    /// Levels outside the reference table are kept as given; the threshold
    /// lookup clamps them. An empty party is rejected.
    pub fn new(level: u32, size: u32) -> Result<Self, AnalysisError> {
        if size == 0 {
            return Err(AnalysisError::InvalidArgument(
                "party size must be at least 1".to_string(),
            ));
        }
        Ok(Self { level, size })
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl Default for PartyProfile {
    fn default() -> Self {
        Self {
            level: DEFAULT_PARTY_LEVEL,
            size: DEFAULT_PARTY_SIZE,
        }
    }
}
