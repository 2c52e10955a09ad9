use serde::{Deserialize, Serialize};

use crate::core::{Category, ChartStats};
use crate::error::{ChartError, ChartResult};
use crate::interaction::Tooltip;

use super::{ChartInstance, ChartOptions};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub instance: u64,
    pub options: ChartOptions,
    pub categories: Vec<Category>,
    pub committed: Vec<Vec<f64>>,
    pub displayed: Vec<Vec<f64>>,
    pub animating: bool,
    pub hovered_marker: Option<usize>,
    pub tooltip: Option<Tooltip>,
    pub stats: ChartStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartInstance {
    /// Captures the live state; `None` for inert or destroyed charts.
    #[must_use]
    pub fn snapshot(&self) -> Option<ChartSnapshot> {
        let options = self.options()?.clone();
        Some(ChartSnapshot {
            instance: self.serial(),
            options,
            categories: self.categories().to_vec(),
            committed: self
                .series()
                .iter()
                .map(|series| series.values.clone())
                .collect(),
            displayed: (0..self.series().len())
                .map(|index| self.displayed_series(index).to_vec())
                .collect(),
            animating: self.is_animating(),
            hovered_marker: self.hovered_marker(),
            tooltip: self.tooltip(),
            stats: self.stats(),
        })
    }
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts both a bare snapshot and a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}
