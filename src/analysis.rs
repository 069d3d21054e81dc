//! Post-hoc analysis of logged cost sequences.
//!
//! All comparisons are exact (by bit pattern). Runs with the same seed and
//! parameters reproduce their costs bit for bit, so grouping by exact value
//! is meaningful; tolerance-based grouping would merge distinct outcomes.

use std::collections::HashMap;
use std::fmt;

use crate::costlog::FINAL_COST_PREFIX;

/// A cost sequence read back from a [`FileCostLog`](crate::costlog::FileCostLog) file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedCostLog {
    /// Per-iteration costs in emission order.
    pub costs: Vec<f64>,
    /// Best cost from the trailer line, if the run finished.
    pub final_cost: Option<f64>,
}

/// A line of a cost log that is not a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCostError {
    /// 1-based line number.
    pub line: usize,
    /// The offending text.
    pub token: String,
}

impl fmt::Display for ParseCostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: could not parse '{}' as a cost", self.line, self.token)
    }
}

impl std::error::Error for ParseCostError {}

/// Parses the contents of a cost log. Blank lines are ignored.
pub fn parse_cost_log(text: &str) -> Result<ParsedCostLog, ParseCostError> {
    let mut costs = Vec::new();
    let mut final_cost = None;
    for (i, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (token, is_final) = match line.strip_prefix(FINAL_COST_PREFIX) {
            Some(rest) => (rest.trim(), true),
            None => (line, false),
        };
        let value: f64 = token.parse().map_err(|_| ParseCostError {
            line: i + 1,
            token: token.to_string(),
        })?;
        if is_final {
            final_cost = Some(value);
        } else {
            costs.push(value);
        }
    }
    Ok(ParsedCostLog { costs, final_cost })
}

/// Length of the tail of `costs` made up of at most `distinct_values`
/// different values.
///
/// With `distinct_values == 1` this is the run-length of the last value:
/// how long the chain has been stuck. Larger values tolerate that many
/// alternating states.
///
/// The first occurrence of the last value counts too, so a tail `[3, 3, 3]`
/// scores 3 and a fresh value scores 1. Reports that count only the
/// repeats are one lower for every non-empty run.
pub fn boredom(costs: &[f64], distinct_values: usize) -> usize {
    let mut seen: Vec<u64> = Vec::with_capacity(distinct_values);
    let mut count = 0;
    for cost in costs.iter().rev() {
        let bits = cost.to_bits();
        if !seen.contains(&bits) {
            if seen.len() == distinct_values {
                break;
            }
            seen.push(bits);
        }
        count += 1;
    }
    count
}

/// Average [`boredom`] over several runs. Returns 0 for no runs.
pub fn mean_boredom<S: AsRef<[f64]>>(runs: &[S], distinct_values: usize) -> f64 {
    if runs.is_empty() {
        return 0.0;
    }
    let total: usize = runs
        .iter()
        .map(|r| boredom(r.as_ref(), distinct_values))
        .sum();
    total as f64 / runs.len() as f64
}

/// One distinct cost value and the runs that ended with it.
#[derive(Debug, Clone, PartialEq)]
pub struct CostGroup {
    pub cost: f64,
    pub labels: Vec<String>,
}

/// The best and worst distinct final costs over a batch of runs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedCosts {
    /// Lowest costs first.
    pub best: Vec<CostGroup>,
    /// Highest costs first.
    pub worst: Vec<CostGroup>,
}

impl RankedCosts {
    /// How many distinct values each side keeps.
    pub const DEPTH: usize = 3;

    /// Groups `(label, final_cost)` pairs by exact cost and keeps the
    /// [`DEPTH`](Self::DEPTH) lowest and highest groups. Labels keep their
    /// input order. NaN costs are ignored.
    pub fn from_runs<L: AsRef<str>>(runs: &[(L, f64)]) -> Self {
        let mut groups: Vec<CostGroup> = Vec::new();
        let mut by_bits: HashMap<u64, usize> = HashMap::new();
        for (label, cost) in runs {
            if cost.is_nan() {
                continue;
            }
            // fold -0.0 into 0.0
            let cost = *cost + 0.0;
            let slot = *by_bits.entry(cost.to_bits()).or_insert_with(|| {
                groups.push(CostGroup {
                    cost,
                    labels: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].labels.push(label.as_ref().to_string());
        }

        groups.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        let best = groups.iter().take(Self::DEPTH).cloned().collect();
        let worst = groups.iter().rev().take(Self::DEPTH).cloned().collect();
        Self { best, worst }
    }
}
