use serde::{Deserialize, Serialize};

use super::DiseaseStatus;

/// One synthesized measurement bundle, shaped exactly like the collector's
/// `/update` payload. Field values are already rounded by the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reading {
    pub name: String,
    pub plant_id: String,
    pub disease_status: DiseaseStatus,
    /// Wall-clock capture time, microseconds since the Unix epoch.
    pub timestamp: i64,
    pub temperature: f64,
    pub humidity: f64,
    pub pressure: f64,
    #[serde(rename = "gasResistance")]
    pub gas_resistance: f64,
    pub mq2_rs: f64,
    pub mq2_ratio: f64,
    pub mq2_r0: f64,
    pub mq2_delta: f64,
    pub mq2_variance: f64,
    pub mq2_baseline: f64,
}

impl Reading {
    /// One-line console summary of the fields an operator watches.
    pub fn summary(&self) -> String {
        format!(
            "temp={}°C, humidity={}%, gas={}kΩ",
            self.temperature, self.humidity, self.gas_resistance
        )
    }
}
