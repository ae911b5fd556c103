//! Workload description
//!
//! A [`WorkloadSpec`] captures one repeated-inference workload: a number of
//! independent actors ("students"), the turns each of them runs, and the
//! token counts of the prompt segments involved. Specs are immutable for the
//! duration of one computation and cheap to clone; parameter changes create
//! a new spec rather than mutating in place.

use crate::accumulation;
use crate::error::PlannerError;
use serde::{Deserialize, Serialize};

/// Prompt cache time-to-live tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheTtl {
    #[default]
    FiveMinutes,
    OneHour,
}

impl CacheTtl {
    pub fn label(&self) -> &'static str {
        match self {
            CacheTtl::FiveMinutes => "5min",
            CacheTtl::OneHour => "1hour",
        }
    }
}

impl std::str::FromStr for CacheTtl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "5min" | "five-minutes" => Ok(CacheTtl::FiveMinutes),
            "1hour" | "one-hour" => Ok(CacheTtl::OneHour),
            other => Err(format!("unknown cache TTL: {} (expected 5min or 1hour)", other)),
        }
    }
}

/// One repeated-inference workload
///
/// Token fields describe the prompt segments of a single request, in prompt
/// order: system prompt, shared context, per-student submission, then
/// instructions. For conversational workloads `instruction_tokens` is the
/// history cap instead of a flat per-request count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkloadSpec {
    /// Number of independent actors
    pub students: u64,
    /// Turns each actor runs
    pub turns_per_student: u64,
    pub system_tokens: u64,
    pub shared_context_tokens: u64,
    pub submission_tokens: u64,
    /// Flat instruction count, or the history cap when conversational
    pub instruction_tokens: u64,
    pub output_tokens: u64,
    /// Target size of a history summary, for summarization strategies
    pub summary_tokens: u64,
    /// History accumulates across turns instead of a flat instruction count
    pub conversational: bool,
    /// The submission grows from empty to full across turns
    pub progressive_submission: bool,
    /// The submission is stable per student (deep-cacheable)
    pub submission_cacheable: bool,
    pub cache_ttl: CacheTtl,
}

impl WorkloadSpec {
    /// Validate the domains the formulas assume
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.students == 0 {
            return Err(PlannerError::InvalidWorkload(
                "students must be positive".to_string(),
            ));
        }
        if self.turns_per_student == 0 {
            return Err(PlannerError::InvalidWorkload(
                "turns-per-student must be positive".to_string(),
            ));
        }
        if self.conversational && self.summary_tokens >= self.instruction_tokens {
            return Err(PlannerError::InvalidWorkload(format!(
                "summary size ({}) must be below the history cap ({})",
                self.summary_tokens, self.instruction_tokens
            )));
        }
        Ok(())
    }

    /// Total request count across all actors and turns
    pub fn total_requests(&self) -> u64 {
        self.students * self.turns_per_student
    }

    /// Shared prefix span: system prompt plus shared context
    pub fn prefix_tokens(&self) -> u64 {
        self.system_tokens + self.shared_context_tokens
    }

    /// Average per-request submission size, progressive growth applied
    pub fn effective_submission_tokens(&self) -> f64 {
        accumulation::effective_submission_tokens(
            self.submission_tokens,
            self.turns_per_student,
            self.progressive_submission,
        )
    }

    /// Average per-request instruction/history size
    ///
    /// Flat count for one-shot workloads; the graduated conversation average
    /// for conversational ones.
    pub fn effective_instruction_tokens(&self) -> f64 {
        if self.conversational {
            accumulation::avg_history_tokens(
                self.instruction_tokens,
                self.turns_per_student,
                self.output_tokens,
            )
        } else {
            self.instruction_tokens as f64
        }
    }
}

impl Default for WorkloadSpec {
    fn default() -> Self {
        Self {
            students: 30,
            turns_per_student: 5,
            system_tokens: 1000,
            shared_context_tokens: 15000,
            submission_tokens: 2000,
            instruction_tokens: 500,
            output_tokens: 1000,
            summary_tokens: 300,
            conversational: false,
            progressive_submission: false,
            submission_cacheable: true,
            cache_ttl: CacheTtl::FiveMinutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_zero_counts() {
        let spec = WorkloadSpec {
            students: 0,
            ..WorkloadSpec::default()
        };
        assert!(spec.validate().is_err());

        let spec = WorkloadSpec {
            turns_per_student: 0,
            ..WorkloadSpec::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_summary() {
        let spec = WorkloadSpec {
            conversational: true,
            instruction_tokens: 200,
            summary_tokens: 200,
            ..WorkloadSpec::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn test_derived_counts() {
        let spec = WorkloadSpec::default();
        assert_eq!(spec.total_requests(), 150);
        assert_eq!(spec.prefix_tokens(), 16000);
        assert_eq!(spec.effective_instruction_tokens(), 500.0);
        assert_eq!(spec.effective_submission_tokens(), 2000.0);
    }

    #[test]
    fn test_progressive_submission_halves_average() {
        let spec = WorkloadSpec {
            progressive_submission: true,
            ..WorkloadSpec::default()
        };
        assert_eq!(spec.effective_submission_tokens(), 1000.0);

        // Single turn sends the full submission
        let spec = WorkloadSpec {
            progressive_submission: true,
            turns_per_student: 1,
            ..WorkloadSpec::default()
        };
        assert_eq!(spec.effective_submission_tokens(), 2000.0);
    }
}
