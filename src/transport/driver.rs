use rand::Rng;

use super::{Collector, RegistrationRequest};
use crate::signal::{self, SignalGenerator};
use crate::types::{Reading, RegistrationState, SensorNode};

/// What became of one reading. Failures are terminal for the tick only;
/// nothing is queued for later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    Dropped,
}

/// Delivers registrations and readings, applying the one-shot
/// re-register-and-retry policy when the collector refuses an update.
pub struct TransportDriver<C: Collector> {
    collector: C,
}

impl<C: Collector> TransportDriver<C> {
    pub fn new(collector: C) -> Self {
        Self { collector }
    }

    /// Best-effort registration. On failure the node simply stays
    /// unregistered; the caller decides whether to proceed.
    pub async fn register(&self, node: &mut SensorNode) -> bool {
        let request = RegistrationRequest {
            name: node.name.clone(),
            location: node.location.clone(),
        };

        match self.collector.register(&request).await {
            Ok(()) => {
                node.registration = RegistrationState::Registered;
                println!("[{}] registered successfully", node.name);
                true
            }
            Err(error) => {
                println!("[{}] registration failed: {}", node.name, error);
                false
            }
        }
    }

    /// Deliver one reading. A refused update is assumed to mean the collector
    /// lost this node's registration: re-register and resubmit exactly once,
    /// then drop the reading for this tick.
    pub async fn send_reading(&self, node: &mut SensorNode, reading: &Reading) -> DeliveryOutcome {
        if !node.is_registered() {
            self.register(node).await;
        }

        match self.collector.update(reading).await {
            Ok(()) => {
                println!("[{}] sent: {}", node.name, reading.summary());
                DeliveryOutcome::Delivered
            }
            Err(first) => {
                println!("[{}] update failed ({}), re-registering...", node.name, first);
                node.registration = RegistrationState::Unregistered;
                self.register(node).await;

                match self.collector.update(reading).await {
                    Ok(()) => {
                        println!("[{}] sent: {}", node.name, reading.summary());
                        DeliveryOutcome::Delivered
                    }
                    Err(second) => {
                        println!("[{}] update still failed: {}", node.name, second);
                        DeliveryOutcome::Dropped
                    }
                }
            }
        }
    }

    /// One round over the whole fleet, sequentially. Never fails; returns how
    /// many readings were delivered.
    pub async fn run_tick<R: Rng>(
        &self,
        generator: &mut SignalGenerator<R>,
        nodes: &mut [SensorNode],
    ) -> usize {
        let mut delivered = 0;
        for node in nodes.iter_mut() {
            let reading = generator.generate(node, signal::wall_clock_secs());
            if self.send_reading(node, &reading).await == DeliveryOutcome::Delivered {
                delivered += 1;
            }
        }
        log::debug!("tick complete, {}/{} readings delivered", delivered, nodes.len());
        delivered
    }
}
