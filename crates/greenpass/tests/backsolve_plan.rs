use greenpass::scoring::{
    backsolve, compute, CategoryWeights, ScoreConfig, SpendInput, TierBand, BACKSOLVE_STEP,
};

#[test]
fn plans_a_path_from_zero_to_gold() {
    let plan = backsolve(SpendInput::new(0.0, 0.0, 0.0, 0.0), 40.0, &ScoreConfig::default());

    assert!(plan.reached);
    assert_eq!(plan.target, 40.0);
    assert!(plan.achieved_gi >= 40.0);
    // Greedy fills S1 to its cap first (16 steps), then leans on S2.
    assert_eq!(plan.added.s1, 1600.0);
    assert_eq!(plan.added.s2, 600.0);
    assert_eq!(plan.added.s3, 0.0);
    assert_eq!(plan.steps, 22);

    // The plan's inputs really do score what the plan claims.
    let verified = compute(plan.inputs, &ScoreConfig::default());
    assert_eq!(verified.gi, plan.achieved_gi);
    assert_eq!(verified.band, TierBand::Gold);
}

#[test]
fn every_step_spends_exactly_the_step_size() {
    let start = SpendInput::new(4000.0, 500.0, 1000.0, 300.0);
    let plan = backsolve(start, 60.0, &ScoreConfig::default());

    assert!(plan.reached);
    assert_eq!(
        plan.added.total,
        f64::from(plan.steps) * BACKSOLVE_STEP,
        "total added must equal steps times step size"
    );
}

#[test]
fn target_already_met_returns_the_identity_plan() {
    let input = SpendInput::new(8000.0, 1600.0, 4900.0, 1000.0);
    let plan = backsolve(input, 60.0, &ScoreConfig::default());

    assert!(plan.reached);
    assert_eq!(plan.steps, 0);
    assert_eq!(plan.added.total, 0.0);
    assert_eq!(plan.inputs, input.sanitized());
}

#[test]
fn skewed_weights_redirect_the_plan() {
    // With S3 carrying all the weight, the planner must buy S3 points even
    // though S1 points are cheaper under the default mix.
    let config = ScoreConfig::new(
        None,
        Some(CategoryWeights {
            s1: 0.0,
            s2: 0.0,
            s3: 1.0,
        }),
    );
    let plan = backsolve(SpendInput::new(0.0, 0.0, 0.0, 0.0), 20.0, &config);

    assert!(plan.reached);
    assert_eq!(plan.added.s1, 0.0);
    assert_eq!(plan.added.s2, 0.0);
    assert!(plan.added.s3 > 0.0);
}

#[test]
fn unreachable_target_is_reported_not_spun_on() {
    let config = ScoreConfig::new(None, Some(CategoryWeights { s1: 0.0, s2: 0.0, s3: 0.0 }));
    let plan = backsolve(SpendInput::new(0.0, 0.0, 0.0, 0.0), 40.0, &config);

    assert!(!plan.reached);
    assert_eq!(plan.achieved_gi, 0.0);
    assert_eq!(plan.steps, 0);
}
