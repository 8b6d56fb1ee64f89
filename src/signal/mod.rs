use chrono::Utc;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

use crate::types::{Reading, SensorNode};

pub const TEMPERATURE_BASELINE: f64 = 20.0; // °C
pub const HUMIDITY_BASELINE: f64 = 35.0; // %
pub const PRESSURE_BASELINE: f64 = 101.0; // kPa
pub const MQ2_R0_BASELINE: f64 = 320.0; // Ohm

/// Produces one `Reading` per (node, instant). Owns the pseudo-random source
/// so tests can inject a seeded one and assert exact outputs.
pub struct SignalGenerator<R: Rng> {
    rng: R,
}

impl SignalGenerator<ChaCha8Rng> {
    /// Deterministic generator for reproducible runs and exact-output tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(ChaCha8Rng::from_entropy())
    }
}

impl<R: Rng> SignalGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Synthesize a reading for `node` at `now` (fractional seconds since an
    /// arbitrary epoch). Total over its domain; the only state touched is the
    /// generator's RNG.
    pub fn generate(&mut self, node: &SensorNode, now: f64) -> Reading {
        let t = now + node.phase_offset;

        // Slow sinusoid emulating a sped-up day/night cycle, humidity moving
        // against temperature.
        let temperature = TEMPERATURE_BASELINE + 2.0 * (t / 60.0).sin() + self.gauss(0.0, 0.3);
        let humidity = HUMIDITY_BASELINE - 1.5 * (t / 60.0).sin() + self.gauss(0.0, 0.5);
        let pressure = PRESSURE_BASELINE + 0.5 * (t / 300.0).sin() + self.gauss(0.0, 0.05);

        // The discriminating signal: noise scales with the disease-derived
        // baseline, so healthy and infected stay separable.
        let gas_resistance = node.gas_resistance_baseline
            + self.gauss(0.0, node.gas_resistance_baseline * 0.1);

        let mq2_r0 = MQ2_R0_BASELINE + self.gauss(0.0, 5.0);
        let mq2_rs = mq2_r0 * (3.0 + self.gauss(0.0, 0.2));
        // Ratio comes from the unrounded intermediates.
        let mq2_ratio = mq2_rs / mq2_r0;

        Reading {
            name: node.name.clone(),
            plant_id: node.plant_id.clone(),
            disease_status: node.disease_status,
            timestamp: Utc::now().timestamp_micros(),
            temperature: round_to(temperature, 2),
            humidity: round_to(humidity, 2),
            pressure: round_to(pressure, 3),
            gas_resistance: round_to(gas_resistance, 2),
            mq2_rs: round_to(mq2_rs, 2),
            mq2_ratio: round_to(mq2_ratio, 3),
            mq2_r0: round_to(mq2_r0, 1),
            mq2_delta: round_to(self.gauss(0.15, 0.05), 4),
            mq2_variance: round_to(self.gauss(3.0, 0.5), 5),
            mq2_baseline: round_to(self.gauss(1.35, 0.1), 4),
        }
    }

    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(StandardNormal);
        mean + std_dev * z
    }
}

/// Wall-clock seconds since the Unix epoch, the `now` fed to the generator.
pub fn wall_clock_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1e6
}

/// Round to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiseaseStatus, RegistrationState, SensorNode};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_node(disease_status: DiseaseStatus, phase_offset: f64) -> SensorNode {
        SensorNode {
            name: "sensor_01".to_string(),
            location: "greenhouse_zone_1".to_string(),
            plant_id: "plant_001".to_string(),
            disease_status,
            phase_offset,
            gas_resistance_baseline: disease_status.gas_resistance_baseline(),
            registration: RegistrationState::Unregistered,
        }
    }

    fn sample_stats(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        (mean, variance.sqrt())
    }

    #[test]
    fn test_round_to_reference_cases() {
        assert_eq!(round_to(151.2345, 2), 151.23);
        assert_eq!(round_to(3.123456, 5), 3.12346);
        assert_eq!(round_to(320.04, 1), 320.0);
        assert_eq!(round_to(-0.0371, 2), -0.04);
    }

    #[test]
    fn test_healthy_gas_resistance_distribution() {
        let mut generator = SignalGenerator::seeded(11);
        let node = test_node(DiseaseStatus::Healthy, 0.0);
        let values: Vec<f64> = (0..2000)
            .map(|i| generator.generate(&node, i as f64).gas_resistance)
            .collect();
        let (mean, std_dev) = sample_stats(&values);
        assert!((mean - 150.0).abs() < 2.0, "mean {mean}");
        assert!((std_dev - 15.0).abs() < 1.5, "std dev {std_dev}");
    }

    #[test]
    fn test_infected_gas_resistance_distribution() {
        let mut generator = SignalGenerator::seeded(12);
        let node = test_node(DiseaseStatus::Infected, 0.0);
        let values: Vec<f64> = (0..2000)
            .map(|i| generator.generate(&node, i as f64).gas_resistance)
            .collect();
        let (mean, std_dev) = sample_stats(&values);
        assert!((mean - 50.0).abs() < 1.0, "mean {mean}");
        assert!((std_dev - 5.0).abs() < 0.5, "std dev {std_dev}");
    }

    #[test]
    fn test_mq2_ratio_consistent_with_components() {
        let mut generator = SignalGenerator::seeded(13);
        let node = test_node(DiseaseStatus::Healthy, 0.0);
        for i in 0..500 {
            let reading = generator.generate(&node, i as f64);
            let recomputed = reading.mq2_rs / reading.mq2_r0;
            assert!(
                (reading.mq2_ratio - recomputed).abs() < 0.002,
                "ratio {} vs rs/r0 {}",
                reading.mq2_ratio,
                recomputed
            );
        }
    }

    #[test]
    fn test_temperature_humidity_anti_correlated_at_peak() {
        // sin(t/60) == 1 at t = 30π; with zero phase offset the sinusoidal
        // terms sit at +2.0 (temperature) and -1.5 (humidity).
        let mut generator = SignalGenerator::seeded(14);
        let node = test_node(DiseaseStatus::Healthy, 0.0);
        let now = 30.0 * std::f64::consts::PI;

        let readings: Vec<_> = (0..2000).map(|_| generator.generate(&node, now)).collect();
        let (temp_mean, _) =
            sample_stats(&readings.iter().map(|r| r.temperature).collect::<Vec<_>>());
        let (humidity_mean, _) =
            sample_stats(&readings.iter().map(|r| r.humidity).collect::<Vec<_>>());

        let temp_dev = temp_mean - TEMPERATURE_BASELINE;
        let humidity_dev = humidity_mean - HUMIDITY_BASELINE;
        assert!((temp_dev - 2.0).abs() < 0.1, "temperature term {temp_dev}");
        assert!(
            (humidity_dev + 1.5).abs() < 0.1,
            "humidity term {humidity_dev}"
        );
        assert!((humidity_dev / temp_dev + 0.75).abs() < 0.05);
    }

    #[test]
    fn test_timestamps_non_decreasing() {
        let mut generator = SignalGenerator::seeded(15);
        let node = test_node(DiseaseStatus::Healthy, 0.0);
        let mut last = 0;
        for i in 0..100 {
            let reading = generator.generate(&node, i as f64);
            assert!(reading.timestamp >= last);
            last = reading.timestamp;
        }
    }

    #[test]
    fn test_same_seed_same_signal() {
        let node = test_node(DiseaseStatus::Infected, 1.25);
        let mut a = SignalGenerator::seeded(99);
        let mut b = SignalGenerator::seeded(99);
        for i in 0..20 {
            let now = i as f64 * 2.0;
            let left = a.generate(&node, now);
            let right = b.generate(&node, now);
            // Everything but the wall-clock timestamp is a pure function of
            // (seed, node, now).
            assert_eq!(left.temperature, right.temperature);
            assert_eq!(left.humidity, right.humidity);
            assert_eq!(left.pressure, right.pressure);
            assert_eq!(left.gas_resistance, right.gas_resistance);
            assert_eq!(left.mq2_rs, right.mq2_rs);
            assert_eq!(left.mq2_ratio, right.mq2_ratio);
            assert_eq!(left.mq2_r0, right.mq2_r0);
            assert_eq!(left.mq2_delta, right.mq2_delta);
            assert_eq!(left.mq2_variance, right.mq2_variance);
            assert_eq!(left.mq2_baseline, right.mq2_baseline);
        }
    }

    #[test]
    fn test_injected_rng_is_honored() {
        let node = test_node(DiseaseStatus::Healthy, 0.0);
        let mut from_seed = SignalGenerator::seeded(7);
        let mut injected = SignalGenerator::new(ChaCha8Rng::seed_from_u64(7));
        let a = from_seed.generate(&node, 5.0);
        let b = injected.generate(&node, 5.0);
        assert_eq!(a.gas_resistance, b.gas_resistance);
        assert_eq!(a.mq2_variance, b.mq2_variance);
    }
}
