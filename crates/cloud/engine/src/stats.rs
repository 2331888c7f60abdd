//! Summary statistics over generated drops.

use cloudeval_types::CloudDrop;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of a drop set.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropStatistics {
    pub count: usize,
    /// Mean drop value.
    pub mean: f64,
    /// Population standard deviation of drop values.
    pub std_dev: f64,
    pub mean_membership: f64,
    pub min: f64,
    pub max: f64,
}

impl DropStatistics {
    /// Summarize `drops`. Returns `None` for an empty slice.
    pub fn from_drops(drops: &[CloudDrop]) -> Option<Self> {
        if drops.is_empty() {
            return None;
        }
        let n = drops.len() as f64;
        let mean = drops.iter().map(|d| d.value).sum::<f64>() / n;
        let variance = drops.iter().map(|d| (d.value - mean).powi(2)).sum::<f64>() / n;
        let mean_membership = drops.iter().map(|d| d.membership).sum::<f64>() / n;
        let (min, max) = drops
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
                (lo.min(d.value), hi.max(d.value))
            });

        Some(Self {
            count: drops.len(),
            mean,
            std_dev: variance.sqrt(),
            mean_membership,
            min,
            max,
        })
    }

    /// Width of the observed value range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}
