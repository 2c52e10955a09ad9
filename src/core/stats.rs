use serde::{Deserialize, Serialize};

/// Summary of one committed data vector.
///
/// An entry counts as completed when its value is strictly positive; average,
/// max and min only consider completed entries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartStats {
    pub total: f64,
    pub average: f64,
    pub max: f64,
    pub min: f64,
    pub completed_items: usize,
    /// Whole percent of completed entries, 0..=100 for non-negative data.
    pub completion_rate: u32,
}

impl ChartStats {
    #[must_use]
    pub fn from_values(values: &[f64]) -> Self {
        let total: f64 = values.iter().sum();
        let completed: Vec<f64> = values.iter().copied().filter(|value| *value > 0.0).collect();
        let completed_items = completed.len();

        let (average, max, min) = if completed.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            let sum: f64 = completed.iter().sum();
            let max = completed.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = completed.iter().copied().fold(f64::INFINITY, f64::min);
            (round_to_tenth(sum / completed_items as f64), max, min)
        };

        let completion_rate = if values.is_empty() {
            0
        } else {
            (100.0 * completed_items as f64 / values.len() as f64).round() as u32
        };

        Self {
            total: round_to_tenth(total),
            average,
            max,
            min,
            completed_items,
            completion_rate,
        }
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
