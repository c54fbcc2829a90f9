use serde::Serialize;

use super::config::ScoreConfig;
use super::domain::{round_to, SpendCategory, SpendInput};
use super::model::{compute, ScoreResult};
use super::sanitize::sanitize;

/// Currency added to the chosen category on every greedy step.
pub const BACKSOLVE_STEP: f64 = 100.0;
/// Hard ceiling on greedy iterations; past it the plan reports best effort.
pub const BACKSOLVE_GUARD: u32 = 2000;

/// Extra spend the planner proposes, per category and in total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AddedSpend {
    #[serde(rename = "S1")]
    pub s1: f64,
    #[serde(rename = "S2")]
    pub s2: f64,
    #[serde(rename = "S3")]
    pub s3: f64,
    pub total: f64,
}

/// Outcome of a backsolve run. `reached` is false when the target sits above
/// what capped categories can deliver or the step guard ran out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacksolvePlan {
    pub target: f64,
    pub inputs: SpendInput,
    pub added: AddedSpend,
    pub achieved_gi: f64,
    pub reached: bool,
    pub steps: u32,
}

/// Searches for extra spending that lifts the index to `target_gi`.
///
/// Greedy in fixed steps: each round adds [`BACKSOLVE_STEP`] to whichever
/// category currently closes its gap for the least money, then rescores.
/// Never guarantees exact attainment; read `reached` before trusting a plan.
pub fn backsolve(input: SpendInput, target_gi: f64, config: &ScoreConfig) -> BacksolvePlan {
    let target = sanitize(target_gi);
    let mut current = compute(input.sanitized(), config);
    let start = current.inputs;
    let mut steps = 0u32;

    while current.gi < target && steps < BACKSOLVE_GUARD {
        let Some(category) = cheapest_category(&current) else {
            // Everything is capped; no amount of spending moves the index.
            break;
        };
        current = compute(current.inputs.bump(category, BACKSOLVE_STEP), config);
        steps += 1;
    }

    let inputs = current.inputs;
    BacksolvePlan {
        target,
        inputs,
        added: AddedSpend {
            s1: round_to(inputs.s1 - start.s1, 2),
            s2: round_to(inputs.s2 - start.s2, 2),
            s3: round_to(inputs.s3 - start.s3, 2),
            total: round_to(inputs.total - start.total, 2),
        },
        achieved_gi: current.gi,
        reached: current.gi >= target,
        steps,
    }
}

/// The category whose current suggestion costs the least, ties going to the
/// earlier category in S1, S2, S3 order.
fn cheapest_category(result: &ScoreResult) -> Option<SpendCategory> {
    let candidates = [
        (SpendCategory::S1, result.suggestions.s1),
        (SpendCategory::S2, result.suggestions.s2),
        (SpendCategory::S3, result.suggestions.s3),
    ];

    let mut best: Option<(SpendCategory, f64)> = None;
    for (category, suggestion) in candidates {
        let Some(cost) = suggestion else { continue };
        let better = match best {
            Some((_, current)) => cost < current,
            None => true,
        };
        if better {
            best = Some((category, cost));
        }
    }
    best.map(|(category, _)| category)
}
