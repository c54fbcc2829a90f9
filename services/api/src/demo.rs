use crate::infra::InMemoryReceiptStore;
use chrono::{Local, NaiveDate};
use clap::Args;
use greenpass::error::AppError;
use greenpass::history::PassbookHistoryService;
use greenpass::scoring::{
    backsolve, benefit_window, compute, BacksolvePlan, ScoreConfig, ScoreResult, SpendCategory,
    SpendInput, TierBand, UndoHistory,
};
use std::sync::Arc;

/// Spending mixes from the passbook onboarding screens, as
/// (name, total, s1, s2, s3).
const PRESETS: [(&str, f64, f64, f64, f64); 3] = [
    ("均衡", 8000.0, 1800.0, 2500.0, 900.0),
    ("通勤族", 9000.0, 1200.0, 3200.0, 600.0),
    ("二手派", 7000.0, 1500.0, 1600.0, 1400.0),
];

/// The sample receipts the passbook upload screen offers for download, fed to
/// the history portion of the demo.
const SAMPLE_RECEIPTS_CSV: &str = "\
date,category,amount
2025-08-01,S1,380
2025-08-08,S2,2200
2025-08-15,S3,900
2025-08-20,OTHER,600
";

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Reported total spending for the month
    #[arg(long, default_value_t = 5000.0)]
    pub(crate) total: f64,
    /// Daily green consumption (S1)
    #[arg(long, default_value_t = 1000.0)]
    pub(crate) s1: f64,
    /// Low-carbon durables (S2)
    #[arg(long, default_value_t = 2000.0)]
    pub(crate) s2: f64,
    /// Second-hand circulation (S3)
    #[arg(long, default_value_t = 500.0)]
    pub(crate) s3: f64,
    /// Also plan the extra spending needed to reach this Green Index
    #[arg(long)]
    pub(crate) target: Option<f64>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Green Index target for the planning portion of the demo
    #[arg(long, default_value_t = 40.0)]
    pub(crate) target: f64,
    /// Override the reporting date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the receipt history portion of the demo.
    #[arg(long)]
    pub(crate) skip_history: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        total,
        s1,
        s2,
        s3,
        target,
    } = args;

    let config = ScoreConfig::default();
    let result = compute(SpendInput::new(total, s1, s2, s3), &config);
    render_score(&result);

    if let Some(target) = target {
        let plan = backsolve(result.inputs, target, &config);
        render_plan(&plan);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        target,
        today,
        skip_history,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let config = ScoreConfig::default();

    println!("Green passbook demo");

    println!("\nTier ladder");
    for band in TierBand::ordered() {
        println!(
            "- GI {:>2}+ {}: {} | {}",
            band.threshold(),
            band.label(),
            band.reward_text(),
            band.extra_rights()
        );
    }

    println!("\nScenario presets");
    for (name, total, s1, s2, s3) in PRESETS {
        let result = compute(SpendInput::new(total, s1, s2, s3), &config);
        println!(
            "- {name}: GI {:.2} -> {} (next tier at {:.0}, {:.2} away)",
            result.gi, result.level, result.next_target.target, result.next_target.delta
        );
    }

    println!("\nWhat-if editing with undo");
    let mut history = UndoHistory::new();
    let mut current = SpendInput::new(8000.0, 1800.0, 2500.0, 900.0);
    println!("- start: GI {:.2}", compute(current, &config).gi);

    history.record(current);
    current = current.with_deltas(600.0, 0.0, 300.0);
    println!(
        "- add S1 600 / S3 300: GI {:.2}",
        compute(current, &config).gi
    );

    if let Some(previous) = history.undo(current) {
        current = previous;
        println!("- undo: GI {:.2}", compute(current, &config).gi);
    }
    if let Some(next) = history.redo(current) {
        println!("- redo: GI {:.2}", compute(next, &config).gi);
    }

    println!("\nPlanning from an empty month");
    let plan = backsolve(SpendInput::new(0.0, 0.0, 0.0, 0.0), target, &config);
    render_plan(&plan);

    let (from, until) = benefit_window(today);
    println!("\nA tier earned this month pays out {from} ~ {until}");

    if skip_history {
        return Ok(());
    }

    println!("\nReceipt history (in-memory store)");
    let store = Arc::new(InMemoryReceiptStore::default());
    let service = PassbookHistoryService::new(store);
    let report = service.import_csv(SAMPLE_RECEIPTS_CSV.as_bytes())?;
    println!(
        "- imported {} receipts ({} rejected)",
        report.inserted, report.skipped
    );

    println!("\nMonthly series");
    for month in &report.monthly {
        println!(
            "- {}: total {:.0}, GI {:.2} -> {}",
            month.month, month.total, month.gi, month.level
        );
    }

    println!("\nTrailing 12-month view");
    for point in &report.rolling {
        println!(
            "- {}: GI {:.2} -> {}",
            point.month, point.gi_12m, point.level_12m
        );
    }

    println!("\nCategory totals to date");
    for (category, total) in service.category_totals()? {
        println!("- {}: {:.0}", category.label(), total);
    }

    Ok(())
}

fn render_score(result: &ScoreResult) {
    println!("Green Index: {:.2} ({})", result.gi, result.level);
    println!("Rewards: {}", result.reward);
    println!("Extra rights: {}", result.extra_rights);
    if result.total_adjusted {
        println!("Note: reported total was below the category sum and was raised to match");
    }

    println!("\nSpending breakdown (total {:.2})", result.inputs.total);
    for share in &result.breakdown {
        println!(
            "- {}: {:.2} ({:.1}%)",
            share.label, share.amount, share.percent
        );
    }

    println!("\nCategory scores (raw / normalized)");
    println!("- S1: {:.2} / {:.2}", result.scores.s1, result.norms.s1);
    println!("- S2: {:.2} / {:.2}", result.scores.s2, result.norms.s2);
    println!("- S3: {:.2} / {:.2}", result.scores.s3, result.norms.s3);

    println!(
        "\nNext tier at GI {:.0}, {:.2} points away",
        result.next_target.target, result.next_target.delta
    );
    let suggestions = [
        (SpendCategory::S1, result.suggestions.s1),
        (SpendCategory::S2, result.suggestions.s2),
        (SpendCategory::S3, result.suggestions.s3),
    ];
    for (category, suggestion) in suggestions {
        match suggestion {
            Some(amount) => println!(
                "- {}: spend {:.0} more to close the gap alone",
                category.label(),
                amount
            ),
            None => println!("- {}: capped, extra spend earns nothing", category.label()),
        }
    }
}

fn render_plan(plan: &BacksolvePlan) {
    println!("\nPlan toward GI {:.0}", plan.target);
    if plan.steps == 0 && plan.reached {
        println!("- target already met, nothing to add");
        return;
    }

    println!(
        "- add S1 {:.0} / S2 {:.0} / S3 {:.0} (total {:.0} over {} steps)",
        plan.added.s1, plan.added.s2, plan.added.s3, plan.added.total, plan.steps
    );
    if plan.reached {
        println!("- lands at GI {:.2}", plan.achieved_gi);
    } else {
        println!(
            "- target out of reach, best effort lands at GI {:.2}",
            plan.achieved_gi
        );
    }
}
