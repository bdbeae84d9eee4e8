//! Source fan-out: partial-failure isolation, timeouts and cancellation.

mod support;

use std::time::Duration;

use pretty_assertions::assert_eq;
use scout_core::enums::SourceKind;
use scout_pipeline::{CancellationToken, PipelineError, ScoutWarning, SourceAdapter};
use support::{FakeAcademic, FakeGrey, paper, papers, titles};

const QUERY: &str = "federated learning privacy";

fn adapter(academic: FakeAcademic, grey: FakeGrey) -> SourceAdapter<FakeAcademic, FakeGrey> {
    SourceAdapter::new(
        academic,
        grey,
        10,
        5,
        Duration::from_millis(200),
        Duration::from_millis(200),
    )
}

fn academic() -> FakeAcademic {
    FakeAcademic::default().with_results(QUERY, papers(&["A1", "A2", "A3"]))
}

#[tokio::test]
async fn merges_academic_then_grey() {
    let grey = FakeGrey::default().with_results(papers(&["G1", "G2"]));
    let out = adapter(academic(), grey)
        .fetch(QUERY, true, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles(&out.candidates), vec!["A1", "A2", "A3", "G1", "G2"]);
    assert_eq!(out.candidates[0].source_kind, SourceKind::Academic);
    assert_eq!(out.candidates[4].source_kind, SourceKind::Grey);
    assert!(out.warnings.is_empty());
}

#[tokio::test]
async fn grey_is_skipped_unless_requested() {
    let grey = FakeGrey::default().with_results(papers(&["G1"]));
    let out = adapter(academic(), grey.clone())
        .fetch(QUERY, false, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles(&out.candidates), vec!["A1", "A2", "A3"]);
    assert_eq!(grey.calls(), 0);
}

#[tokio::test]
async fn grey_failure_leaves_academic_results_unchanged() {
    let baseline = adapter(academic(), FakeGrey::default())
        .fetch(QUERY, false, &CancellationToken::new())
        .await
        .unwrap();
    let out = adapter(academic(), FakeGrey::default().failing())
        .fetch(QUERY, true, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(out.candidates, baseline.candidates);
    assert_eq!(out.warnings.len(), 1);
    assert!(matches!(
        &out.warnings[0],
        ScoutWarning::SourceUnavailable { origin: SourceKind::Grey, .. }
    ));
}

#[tokio::test]
async fn academic_failure_leaves_grey_results() {
    let grey = FakeGrey::default().with_results(papers(&["G1"]));
    let out = adapter(academic().failing(), grey)
        .fetch(QUERY, true, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles(&out.candidates), vec!["G1"]);
    assert!(matches!(
        &out.warnings[0],
        ScoutWarning::SourceUnavailable { origin: SourceKind::Academic, .. }
    ));
}

#[tokio::test]
async fn stalled_source_times_out_softly() {
    let grey = FakeGrey::default()
        .with_results(papers(&["G1"]))
        .delayed(Duration::from_secs(30));
    let out = adapter(academic(), grey)
        .fetch(QUERY, true, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles(&out.candidates), vec!["A1", "A2", "A3"]);
    let [ScoutWarning::SourceUnavailable { origin, reason }] = out.warnings.as_slice() else {
        panic!("expected one source warning, got {:?}", out.warnings);
    };
    assert_eq!(*origin, SourceKind::Grey);
    assert!(reason.starts_with("no response within"), "{reason}");
}

#[tokio::test]
async fn grey_results_respect_cap_and_drop_blank_titles() {
    let mut hits = papers(&["G1", "G2", "G3", "G4", "G5", "G6"]);
    hits.insert(0, paper("  "));
    let out = adapter(FakeAcademic::default(), FakeGrey::default().with_results(hits))
        .fetch(QUERY, true, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(titles(&out.candidates), vec!["G1", "G2", "G3", "G4"]);
}

#[tokio::test]
async fn cancelled_fetch_returns_cancelled() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let err = adapter(academic(), FakeGrey::default())
        .fetch(QUERY, true, &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Cancelled));
}
