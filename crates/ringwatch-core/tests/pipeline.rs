//! End-to-end pipeline scenarios, from CSV bytes to the final report.

use std::fmt::Write as _;
use std::time::Duration;

use ringwatch_core::{analyze, DetectorConfig, EngineError, ParseError, PatternKind};

const HEADER: &str = "transaction_id,sender_id,receiver_id,amount,timestamp\n";

async fn run(csv: &str) -> ringwatch_core::AnalysisReport {
    analyze(csv.as_bytes(), &DetectorConfig::default())
        .await
        .expect("pipeline must succeed on valid input")
}

fn triangle_csv() -> String {
    format!(
        "{HEADER}\
         T1,A,B,100,2024-01-01 10:00:00\n\
         T2,B,C,90,2024-01-01 10:05:00\n\
         T3,C,A,85,2024-01-01 10:10:00\n"
    )
}

fn fan_out_rows(hub: &str, start_id: usize) -> String {
    let mut rows = String::new();
    for i in 0..10 {
        writeln!(
            rows,
            "F{},{hub},R{i:02},950,2024-02-01 {i:02}:00:00",
            start_id + i
        )
        .expect("writing to a String cannot fail");
    }
    rows
}

// ==============================================================================
// Detection Scenarios
// ==============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn triangle_cycle_yields_one_ring_with_expected_scores() {
    let report = run(&triangle_csv()).await;

    assert_eq!(report.fraud_rings.len(), 1);
    let ring = &report.fraud_rings[0];
    assert_eq!(ring.ring_id, "RING_001");
    assert_eq!(ring.pattern_type, PatternKind::Cycle);
    assert_eq!(ring.member_accounts, vec!["A", "B", "C"]);
    assert_eq!(ring.risk_score, 48.0);

    assert_eq!(report.suspicious_accounts.len(), 3);
    for account in &report.suspicious_accounts {
        assert_eq!(account.suspicion_score, 40.0);
        assert_eq!(account.ring_id, "RING_001");
        assert!(account
            .detected_patterns
            .contains(&"cycle_length_3".to_string()));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn fan_out_hub_yields_one_smurfing_ring() {
    let report = run(&format!("{HEADER}{}", fan_out_rows("H", 0))).await;

    assert_eq!(report.fraud_rings.len(), 1);
    let ring = &report.fraud_rings[0];
    assert_eq!(ring.pattern_type, PatternKind::Smurfing);
    assert_eq!(ring.member_accounts.len(), 11);
    assert_eq!(ring.member_accounts[0], "H");
    assert_eq!(ring.risk_score, 30.0);

    let hub = report
        .suspicious_accounts
        .iter()
        .find(|a| a.account_id == "H")
        .expect("hub must be flagged");
    assert_eq!(hub.suspicion_score, 30.0);
    assert!(hub.detected_patterns.contains(&"fan_out".to_string()));
}

#[tokio::test(flavor = "multi_thread")]
async fn cycle_and_fan_out_overlap_compounds_the_hub_score() {
    let csv = format!("{}{}", triangle_csv(), fan_out_rows("A", 10));
    let report = run(&csv).await;

    assert_eq!(report.fraud_rings.len(), 2);
    assert_eq!(report.fraud_rings[0].ring_id, "RING_001");
    assert_eq!(report.fraud_rings[0].pattern_type, PatternKind::Cycle);
    assert_eq!(report.fraud_rings[1].ring_id, "RING_002");
    assert_eq!(report.fraud_rings[1].pattern_type, PatternKind::Smurfing);

    let a = report
        .suspicious_accounts
        .iter()
        .find(|acct| acct.account_id == "A")
        .expect("A must be flagged");
    // base 40 + 30, ×1.15 involvement, +15 multi-pattern bonus.
    assert_eq!(a.suspicion_score, 95.5);
    assert!(a.detected_patterns.contains(&"cycle_length_3".to_string()));
    assert!(a.detected_patterns.contains(&"fan_out".to_string()));
    // A sits in both rings; the smurfing ring was processed last.
    assert_eq!(a.ring_id, "RING_002");

    // The highest score leads the report.
    assert_eq!(report.suspicious_accounts[0].account_id, "A");
}

#[tokio::test(flavor = "multi_thread")]
async fn layered_shell_chain_is_flagged_with_intermediary_labels() {
    // A and B carry filler traffic so only S1..S3 sit in the shell band.
    let mut csv = format!(
        "{HEADER}\
         T1,A,S1,900,2024-01-01 10:00:00\n\
         T2,S1,S2,890,2024-01-01 11:00:00\n\
         T3,S2,S3,880,2024-01-01 12:00:00\n\
         T4,S3,B,870,2024-01-01 13:00:00\n"
    );
    for i in 0..4 {
        writeln!(csv, "FA{i},X{i},A,10,2024-01-02 09:00:00").unwrap();
        writeln!(csv, "FB{i},B,Y{i},10,2024-01-02 10:00:00").unwrap();
    }
    let report = run(&csv).await;

    let full_chain = report
        .fraud_rings
        .iter()
        .find(|r| r.member_accounts == vec!["A", "S1", "S2", "S3", "B"])
        .expect("full shell chain must be flagged");
    assert_eq!(full_chain.pattern_type, PatternKind::LayeredShell);

    // The 3-hop prefix ending on S3 is reported as well — chains are
    // recorded both mid-walk and at non-shell endpoints.
    assert!(report
        .fraud_rings
        .iter()
        .any(|r| r.member_accounts == vec!["A", "S1", "S2", "S3"]));

    for shell in ["S1", "S2", "S3"] {
        let account = report
            .suspicious_accounts
            .iter()
            .find(|a| a.account_id == shell)
            .expect("shell intermediary must be flagged");
        assert!(
            account
                .detected_patterns
                .contains(&"shell_intermediary".to_string()),
            "{shell} should carry the intermediary label"
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_deadline_degrades_to_an_empty_finding_set() {
    let config = DetectorConfig {
        detector_timeout: Duration::ZERO,
        ..Default::default()
    };
    let report = analyze(triangle_csv().as_bytes(), &config)
        .await
        .expect("deadline expiry is not an error");

    assert!(report.suspicious_accounts.is_empty());
    assert!(report.fraud_rings.is_empty());
    assert_eq!(report.summary.total_accounts_analyzed, 3);
    assert_eq!(report.graph.nodes.len(), 3);
    assert_eq!(report.graph.edges.len(), 3);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_rows_are_skipped_without_polluting_the_graph() {
    let csv = format!(
        "{HEADER}\
         T1,A,B,100,2024-01-01 10:00:00\n\
         T2,C,D,,2024-01-01 10:00:00\n\
         T3,E,F,-5,2024-01-01 10:00:00\n\
         T4,G,G,50,2024-01-01 10:00:00\n\
         T1,A,B,100,2024-01-01 10:00:00\n"
    );
    let report = run(&csv).await;

    assert_eq!(report.summary.total_accounts_analyzed, 2);
    assert_eq!(report.graph.edges.len(), 1);
    assert!(report.fraud_rings.is_empty());
    assert!(report.suspicious_accounts.is_empty());
}

// ==============================================================================
// Boundary Failures
// ==============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn empty_header_only_and_all_invalid_files_fail_to_parse() {
    for (input, expected) in [
        ("", ParseError::MissingHeader),
        (HEADER, ParseError::NoValidTransactions),
        (
            "transaction_id,sender_id,receiver_id,amount,timestamp\nT1,A,A,10,2024-01-01 10:00:00\n",
            ParseError::NoValidTransactions,
        ),
    ] {
        let err = analyze(input.as_bytes(), &DetectorConfig::default())
            .await
            .expect_err("input must be rejected");
        match err {
            EngineError::Parse(parse) => assert_eq!(parse, expected),
            other => panic!("expected a parse failure, got {other:?}"),
        }
    }
}

// ==============================================================================
// Determinism
// ==============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn repeated_runs_agree_up_to_processing_time() {
    let csv = format!(
        "{}{}{}",
        triangle_csv(),
        fan_out_rows("A", 10),
        "T9,A,S1,900,2024-01-03 10:00:00\n"
    );

    let mut first = serde_json::to_value(run(&csv).await).expect("report serializes");
    let mut second = serde_json::to_value(run(&csv).await).expect("report serializes");
    first["summary"]["processing_time_seconds"] = 0.into();
    second["summary"]["processing_time_seconds"] = 0.into();

    assert_eq!(first, second);
}

#[tokio::test(flavor = "multi_thread")]
async fn duplicated_transaction_id_changes_nothing() {
    let base = triangle_csv();
    let with_duplicate = format!("{base}T1,A,B,100,2024-01-01 10:00:00\n");

    let mut plain = serde_json::to_value(run(&base).await).expect("report serializes");
    let mut duplicated =
        serde_json::to_value(run(&with_duplicate).await).expect("report serializes");
    plain["summary"]["processing_time_seconds"] = 0.into();
    duplicated["summary"]["processing_time_seconds"] = 0.into();

    assert_eq!(plain, duplicated);
}
