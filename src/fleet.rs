use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use rand::Rng;
use serde::Deserialize;

use crate::types::{DiseaseStatus, SensorNode};

/// Generate a fleet of `count` nodes. Every third node (0-indexed 2, 5, 8, …)
/// is classified infected so a downstream classifier always has both classes
/// once the fleet reaches three nodes.
pub fn build<R: Rng>(count: usize, rng: &mut R) -> Vec<SensorNode> {
    (0..count)
        .map(|i| {
            let ordinal = i + 1;
            let disease_status = if i % 3 == 2 {
                DiseaseStatus::Infected
            } else {
                DiseaseStatus::Healthy
            };
            SensorNode::new(
                format!("sensor_{ordinal:02}"),
                format!("greenhouse_zone_{ordinal}"),
                format!("plant_{ordinal:03}"),
                disease_status,
                rng,
            )
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct FleetFile {
    #[serde(default)]
    node: Vec<NodeEntry>,
}

#[derive(Debug, Deserialize)]
struct NodeEntry {
    name: String,
    location: String,
    plant_id: String,
    disease_status: DiseaseStatus,
}

/// Load an explicit fleet from a TOML file of `[[node]]` tables. Names must
/// be unique and at least one node must be declared.
pub fn from_file<R: Rng>(path: &Path, rng: &mut R) -> Result<Vec<SensorNode>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read fleet file {}", path.display()))?;
    let fleet: FleetFile = toml::from_str(&content)
        .with_context(|| format!("invalid fleet file {}", path.display()))?;

    if fleet.node.is_empty() {
        bail!("fleet file {} declares no nodes", path.display());
    }

    let mut seen = HashSet::new();
    for node in &fleet.node {
        if !seen.insert(node.name.as_str()) {
            bail!("duplicate node name in fleet file: {}", node.name);
        }
    }

    Ok(fleet
        .node
        .into_iter()
        .map(|n| SensorNode::new(n.name, n.location, n.plant_id, n.disease_status, rng))
        .collect())
}
