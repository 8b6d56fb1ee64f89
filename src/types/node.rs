use std::f64::consts::TAU;

use rand::Rng;

use super::{DiseaseStatus, RegistrationState};

/// One virtual sensor. Everything except `registration` is fixed at
/// construction and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SensorNode {
    pub name: String,
    pub location: String,
    pub plant_id: String,
    pub disease_status: DiseaseStatus,
    /// Fixed phase shift in [0, 2π) so nodes do not move in lockstep.
    pub phase_offset: f64,
    pub gas_resistance_baseline: f64,
    pub registration: RegistrationState,
}

impl SensorNode {
    pub fn new<R: Rng>(
        name: impl Into<String>,
        location: impl Into<String>,
        plant_id: impl Into<String>,
        disease_status: DiseaseStatus,
        rng: &mut R,
    ) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
            plant_id: plant_id.into(),
            disease_status,
            phase_offset: rng.gen_range(0.0..TAU),
            gas_resistance_baseline: disease_status.gas_resistance_baseline(),
            registration: RegistrationState::Unregistered,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.registration.is_registered()
    }
}
