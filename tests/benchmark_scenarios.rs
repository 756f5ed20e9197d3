//! Scenarios S5 and S6 from the benchmark aggregator's acceptance criteria.

use wardgame::services::benchmark::{compare_strategies, compute_metrics, TrialResult};

fn detected_trial(detection_round: u32) -> TrialResult {
    TrialResult {
        strategy: "sse_optimal".to_string(),
        topology: "small".to_string(),
        seed: 0,
        winner: "defender".to_string(),
        rounds_played: detection_round,
        max_rounds: 10,
        detected: true,
        detection_round: Some(detection_round),
        num_detections: 1,
        dwell_time: detection_round,
        exfiltrated_value: 0.0,
        compromised_count: 1,
        defender_budget: 10.0,
        defender_spent: 5.0,
        defender_utility: 1.1,
    }
}

#[test]
fn s5_ten_detected_trials_at_round_three_summarise_exactly() {
    let trials: Vec<TrialResult> = (0..10).map(|_| detected_trial(3)).collect();
    let metrics = compute_metrics("sse_optimal", "small", &trials);

    assert!((metrics.detection_rate.mean - 1.0).abs() < 1e-9);
    assert!((metrics.mean_time_to_detect.mean - 3.0).abs() < 1e-9);
    // p_hat = 1.0 for every trial, so the standard error of the proportion
    // (p_hat * (1 - p_hat) / n).sqrt() collapses to exactly 0.
    assert!((metrics.detection_rate.std - 0.0).abs() < 1e-9);
}

#[test]
fn detection_rate_std_is_the_standard_error_of_the_proportion() {
    // 80/100 detected: std must be sqrt(p*(1-p)/n) = sqrt(0.8*0.2/100) = 0.04,
    // not the bare Bernoulli std sqrt(p*(1-p)) = 0.4 a missing `/n` would give.
    let mut trials: Vec<TrialResult> = (0..80).map(|_| detected_trial(3)).collect();
    let mut undetected = detected_trial(3);
    undetected.detected = false;
    undetected.detection_round = None;
    undetected.dwell_time = undetected.rounds_played;
    trials.extend((0..20).map(|_| undetected.clone()));

    let metrics = compute_metrics("sse_optimal", "small", &trials);
    assert!((metrics.detection_rate.mean - 0.8).abs() < 1e-9);
    assert!((metrics.detection_rate.std - 0.04).abs() < 1e-9);
}

#[test]
fn s6_fully_separated_samples_are_significant() {
    let a = vec![1.0; 50];
    let b = vec![0.0; 50];
    let comparison = compare_strategies("detection_rate", "sse_optimal", &a, "uniform", &b);

    assert!(comparison.significant);
    assert!(comparison.p_value < 0.05);
}
