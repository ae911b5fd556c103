use serde::Serialize;

/// Itemized cost of one (strategy, workload) pair
///
/// `guardrails` carries model calls made outside the main exchange; for the
/// summarization strategies this is where the summarization calls land.
/// Invariant: `total` equals the sum of the five components.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub cache_write: f64,
    pub cache_read: f64,
    pub fresh_input: f64,
    pub output: f64,
    pub guardrails: f64,
    pub total: f64,
}

impl CostBreakdown {
    /// Create a zero-cost breakdown
    pub fn zero() -> Self {
        Self::default()
    }

    /// Calculate total cost from components
    pub fn calculate_total(&mut self) {
        self.total = self.cache_write
            + self.cache_read
            + self.fresh_input
            + self.output
            + self.guardrails;
    }

    /// Sum of components, independent of the stored total
    pub fn component_sum(&self) -> f64 {
        self.cache_write + self.cache_read + self.fresh_input + self.output + self.guardrails
    }
}
