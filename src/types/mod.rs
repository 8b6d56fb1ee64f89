pub mod node;
pub mod reading;

pub use node::SensorNode;
pub use reading::Reading;

use serde::{Deserialize, Serialize};

/// Baseline gas resistance in kOhm for a plant with no detectable infection.
pub const HEALTHY_GAS_BASELINE: f64 = 150.0;
/// Infected plants emit volatiles that pull gas resistance down to this level.
pub const INFECTED_GAS_BASELINE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiseaseStatus {
    Healthy,
    Infected,
}

impl DiseaseStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DiseaseStatus::Healthy => "healthy",
            DiseaseStatus::Infected => "infected",
        }
    }

    /// The steady-state gas resistance this classification fluctuates around.
    pub fn gas_resistance_baseline(&self) -> f64 {
        match self {
            DiseaseStatus::Healthy => HEALTHY_GAS_BASELINE,
            DiseaseStatus::Infected => INFECTED_GAS_BASELINE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    Registered,
    Unregistered,
}

impl RegistrationState {
    pub fn is_registered(&self) -> bool {
        matches!(self, RegistrationState::Registered)
    }
}
