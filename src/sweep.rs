//! Parameter sweep and winner stabilization
//!
//! Recomputes every enabled strategy's total across a grid of values for one
//! workload parameter and marks the cheapest strategy at each point. Costs
//! at neighboring points are often numerically indistinguishable; a
//! stabilization pass keeps the winner band from flickering across such
//! runs by resolving each near-tie run to the first unambiguous winner after
//! it.

use crate::catalog::ModelPrice;
use crate::cost::{CostMemo, Strategy};
use crate::workload::WorkloadSpec;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Absolute gap below which two strategies count as tied, in currency units.
///
/// Deliberately not scaled to the magnitude of the totals involved; sweeps
/// over very large workloads can have gaps that are relatively tiny but
/// absolutely large, which this constant does not catch. Kept fixed until
/// the tolerance is made a caller parameter.
pub const TIE_EPSILON: f64 = 0.005;

/// Sweepable workload parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SweepParameter {
    Students,
    TurnsPerStudent,
    SystemTokens,
    SharedContextTokens,
    SubmissionTokens,
    InstructionTokens,
    OutputTokens,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 7] = [
        SweepParameter::Students,
        SweepParameter::TurnsPerStudent,
        SweepParameter::SystemTokens,
        SweepParameter::SharedContextTokens,
        SweepParameter::SubmissionTokens,
        SweepParameter::InstructionTokens,
        SweepParameter::OutputTokens,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SweepParameter::Students => "students",
            SweepParameter::TurnsPerStudent => "turns-per-student",
            SweepParameter::SystemTokens => "system-tokens",
            SweepParameter::SharedContextTokens => "shared-context-tokens",
            SweepParameter::SubmissionTokens => "submission-tokens",
            SweepParameter::InstructionTokens => "instruction-tokens",
            SweepParameter::OutputTokens => "output-tokens",
        }
    }

    /// Fixed sample grid, spanning at least one order of magnitude
    pub fn sample_grid(&self) -> &'static [u64] {
        match self {
            SweepParameter::Students => &[1, 2, 5, 10, 20, 30, 50, 100, 200, 500, 1000],
            SweepParameter::TurnsPerStudent => &[1, 2, 3, 5, 8, 10, 15, 20, 30, 50],
            SweepParameter::SystemTokens => &[100, 250, 500, 1000, 2500, 5000, 10000],
            SweepParameter::SharedContextTokens => {
                &[500, 1000, 2500, 5000, 10000, 15000, 25000, 50000, 100000]
            }
            SweepParameter::SubmissionTokens => &[250, 500, 1000, 2000, 5000, 10000, 20000, 50000],
            SweepParameter::InstructionTokens => &[100, 250, 500, 1000, 2500, 5000, 10000, 20000],
            SweepParameter::OutputTokens => &[100, 250, 500, 1000, 2000, 4000, 8000, 16000],
        }
    }

    /// Current live value of this parameter in a workload
    pub fn live_value(&self, spec: &WorkloadSpec) -> u64 {
        match self {
            SweepParameter::Students => spec.students,
            SweepParameter::TurnsPerStudent => spec.turns_per_student,
            SweepParameter::SystemTokens => spec.system_tokens,
            SweepParameter::SharedContextTokens => spec.shared_context_tokens,
            SweepParameter::SubmissionTokens => spec.submission_tokens,
            SweepParameter::InstructionTokens => spec.instruction_tokens,
            SweepParameter::OutputTokens => spec.output_tokens,
        }
    }

    /// A copy of the workload with this parameter set to `value`
    pub fn apply(&self, spec: &WorkloadSpec, value: u64) -> WorkloadSpec {
        let mut spec = spec.clone();
        match self {
            SweepParameter::Students => spec.students = value,
            SweepParameter::TurnsPerStudent => spec.turns_per_student = value,
            SweepParameter::SystemTokens => spec.system_tokens = value,
            SweepParameter::SharedContextTokens => spec.shared_context_tokens = value,
            SweepParameter::SubmissionTokens => spec.submission_tokens = value,
            SweepParameter::InstructionTokens => spec.instruction_tokens = value,
            SweepParameter::OutputTokens => spec.output_tokens = value,
        }
        spec
    }
}

impl std::fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for SweepParameter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| format!("unknown sweep parameter: {}", s))
    }
}

/// One evaluated grid point
#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub value: u64,
    /// Total cost per strategy at this value
    pub totals: BTreeMap<Strategy, f64>,
    pub winner: Strategy,
    pub winner_color: &'static str,
}

/// Boundary where the stabilized winner changes
#[derive(Debug, Clone, Serialize)]
pub struct Crossover {
    /// Index of the first point with the new winner
    pub index: usize,
    pub value: u64,
    pub from: Strategy,
    pub to: Strategy,
}

/// Ordered sweep output: points by strictly increasing parameter value,
/// including the workload's live value
#[derive(Debug, Clone, Serialize)]
pub struct SweepResult {
    pub parameter: SweepParameter,
    pub points: Vec<SweepPoint>,
    pub crossovers: Vec<Crossover>,
}

/// Cheapest strategy at a point, resolving exact ties by rank
fn raw_winner(totals: &BTreeMap<Strategy, f64>) -> Strategy {
    let mut best: Option<(Strategy, f64)> = None;
    for (&strategy, &total) in totals {
        let better = match best {
            None => true,
            Some((current, current_total)) => {
                total < current_total
                    || (total == current_total
                        && strategy.tie_break_rank() < current.tie_break_rank())
            }
        };
        if better {
            best = Some((strategy, total));
        }
    }
    best.map(|(s, _)| s).unwrap_or(Strategy::NoCache)
}

/// Whether the two cheapest strategies at a point are within the tie epsilon
fn is_near_tie(totals: &BTreeMap<Strategy, f64>) -> bool {
    let mut costs: Vec<f64> = totals.values().copied().collect();
    if costs.len() < 2 {
        return false;
    }
    costs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    costs[1] - costs[0] < TIE_EPSILON
}

/// Sweep one parameter across its grid
///
/// Each grid point is an independent evaluation; the stabilization pass runs
/// afterwards, over all points in ascending value order.
pub fn sweep(
    parameter: SweepParameter,
    spec: &WorkloadSpec,
    price: &ModelPrice,
    tier: f64,
    strategies: &[Strategy],
    memo: &mut CostMemo,
) -> SweepResult {
    let mut grid: Vec<u64> = parameter.sample_grid().to_vec();
    let live = parameter.live_value(spec);
    if !grid.contains(&live) {
        grid.push(live);
    }
    grid.sort_unstable();
    grid.dedup();

    debug!(
        parameter = parameter.name(),
        points = grid.len(),
        strategies = strategies.len(),
        "running sweep"
    );

    let mut raw: Vec<(u64, BTreeMap<Strategy, f64>)> = Vec::with_capacity(grid.len());
    for value in grid {
        let point_spec = parameter.apply(spec, value);
        let totals: BTreeMap<Strategy, f64> = strategies
            .iter()
            .map(|&s| (s, memo.estimate(s, &point_spec, price, tier).total))
            .collect();
        raw.push((value, totals));
    }

    let points = stabilize(raw);
    let crossovers = find_crossovers(&points);

    SweepResult {
        parameter,
        points,
        crossovers,
    }
}

/// Stabilization pass: backward-fill near-tie runs
///
/// A point whose two cheapest strategies are within [`TIE_EPSILON`] adopts
/// the winner of the next point, so a whole run of near-ties resolves to the
/// first unambiguous winner after it. The final point keeps its own raw
/// winner when the tie persists to the end of the grid.
fn stabilize(raw: Vec<(u64, BTreeMap<Strategy, f64>)>) -> Vec<SweepPoint> {
    let n = raw.len();
    let mut winners: Vec<Strategy> = raw.iter().map(|(_, totals)| raw_winner(totals)).collect();
    let near: Vec<bool> = raw.iter().map(|(_, totals)| is_near_tie(totals)).collect();

    for i in (0..n).rev() {
        if near[i] && i + 1 < n {
            winners[i] = winners[i + 1];
        }
    }

    raw.into_iter()
        .zip(winners)
        .map(|((value, totals), winner)| SweepPoint {
            value,
            totals,
            winner,
            winner_color: winner.color(),
        })
        .collect()
}

fn find_crossovers(points: &[SweepPoint]) -> Vec<Crossover> {
    points
        .windows(2)
        .enumerate()
        .filter(|(_, w)| w[0].winner != w[1].winner)
        .map(|(i, w)| Crossover {
            index: i + 1,
            value: w[1].value,
            from: w[0].winner,
            to: w[1].winner,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn totals(pairs: &[(Strategy, f64)]) -> BTreeMap<Strategy, f64> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_raw_winner_tie_break() {
        // Exact tie: the caching strategy wins over no-cache.
        let t = totals(&[(Strategy::NoCache, 10.0), (Strategy::PrefixCache, 10.0)]);
        assert_eq!(raw_winner(&t), Strategy::PrefixCache);

        let t = totals(&[(Strategy::NoCache, 9.0), (Strategy::PrefixCache, 10.0)]);
        assert_eq!(raw_winner(&t), Strategy::NoCache);
    }

    #[test]
    fn test_near_tie_detection() {
        let t = totals(&[(Strategy::NoCache, 10.001), (Strategy::PrefixCache, 9.999)]);
        assert!(is_near_tie(&t));

        let t = totals(&[(Strategy::NoCache, 12.0), (Strategy::PrefixCache, 8.0)]);
        assert!(!is_near_tie(&t));
    }

    #[test]
    fn test_stabilization_adopts_post_tie_winner() {
        // Two near-tied points followed by an unambiguous one: all three
        // must report the winner of the third.
        let raw = vec![
            (
                1,
                totals(&[(Strategy::NoCache, 10.001), (Strategy::PrefixCache, 9.999)]),
            ),
            (
                2,
                totals(&[(Strategy::NoCache, 10.000), (Strategy::PrefixCache, 10.000)]),
            ),
            (
                3,
                totals(&[(Strategy::NoCache, 12.0), (Strategy::PrefixCache, 8.0)]),
            ),
        ];
        let points = stabilize(raw);
        assert_eq!(points[0].winner, Strategy::PrefixCache);
        assert_eq!(points[1].winner, Strategy::PrefixCache);
        assert_eq!(points[2].winner, Strategy::PrefixCache);
    }

    #[test]
    fn test_tie_to_end_keeps_last_raw_winner() {
        let raw = vec![
            (
                1,
                totals(&[(Strategy::NoCache, 8.0), (Strategy::PrefixCache, 12.0)]),
            ),
            (
                2,
                totals(&[(Strategy::NoCache, 10.001), (Strategy::PrefixCache, 9.999)]),
            ),
            (
                3,
                totals(&[(Strategy::NoCache, 10.000), (Strategy::PrefixCache, 10.000)]),
            ),
        ];
        let points = stabilize(raw);
        assert_eq!(points[0].winner, Strategy::NoCache);
        // Tie persists to the end: the last point resolves itself (rank
        // tie-break) and the run adopts it.
        assert_eq!(points[2].winner, Strategy::PrefixCache);
        assert_eq!(points[1].winner, Strategy::PrefixCache);
    }

    #[test]
    fn test_sweep_grid_contains_live_value_once() {
        let catalog = Catalog::builtin().unwrap();
        let price = catalog.get("claude-sonnet-4").unwrap();
        let spec = WorkloadSpec {
            students: 37, // not on the fixed grid
            ..WorkloadSpec::default()
        };
        let mut memo = CostMemo::new();

        let result = sweep(
            SweepParameter::Students,
            &spec,
            price,
            1.0,
            &[Strategy::NoCache, Strategy::PrefixCache],
            &mut memo,
        );

        let values: Vec<u64> = result.points.iter().map(|p| p.value).collect();
        assert_eq!(values.iter().filter(|&&v| v == 37).count(), 1);
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_sweep_crossovers_match_winner_changes() {
        let catalog = Catalog::builtin().unwrap();
        let price = catalog.get("claude-sonnet-4").unwrap();
        let spec = WorkloadSpec::default();
        let mut memo = CostMemo::new();

        let result = sweep(
            SweepParameter::Students,
            &spec,
            price,
            1.0,
            &[Strategy::NoCache, Strategy::Batch, Strategy::PrefixCache],
            &mut memo,
        );

        let expected: usize = result
            .points
            .windows(2)
            .filter(|w| w[0].winner != w[1].winner)
            .count();
        assert_eq!(result.crossovers.len(), expected);
        for c in &result.crossovers {
            assert_eq!(result.points[c.index].winner, c.to);
            assert_eq!(result.points[c.index - 1].winner, c.from);
        }
    }

    #[test]
    fn test_parameter_round_trip() {
        for p in SweepParameter::ALL {
            assert_eq!(p.name().parse::<SweepParameter>().unwrap(), p);
            assert!(p.sample_grid().len() >= 5);
            let spec = WorkloadSpec::default();
            let applied = p.apply(&spec, 12345);
            assert_eq!(p.live_value(&applied), 12345);
        }
    }
}
