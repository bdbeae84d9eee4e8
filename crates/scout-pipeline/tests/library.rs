//! Metadata ingest and grounded synthesis.

mod support;

use pretty_assertions::assert_eq;
use scout_core::enums::SourceKind;
use scout_core::structured::PaperMetadata;
use scout_pipeline::{CancellationToken, PipelineError};
use serde_json::json;
use support::{FakeAcademic, FakeGrey, FakeLlm, paper, scout, settings};

fn metadata() -> serde_json::Value {
    json!({
        "title": "On the Opportunities and Risks of Foundation Models",
        "authors": ["Rishi Bommasani", "Percy Liang"],
        "year": 2021,
        "abstract": "A survey of foundation models."
    })
}

#[tokio::test]
async fn extracted_metadata_is_archived_as_ingest() {
    let llm = FakeLlm::default().extracting(metadata());
    let (scout, project) = scout(FakeAcademic::default(), FakeGrey::default(), llm.clone(), settings()).await;
    let cancel = CancellationToken::new();

    let text = "On the Opportunities and Risks of Foundation Models\nRishi Bommasani ...";
    let extracted = scout.extract_metadata(text, &cancel).await.unwrap();
    assert_eq!(extracted.authors, vec!["Rishi Bommasani", "Percy Liang"]);
    assert_eq!(extracted.year, Some(2021));
    assert!(llm.prompts()[0].contains("DOCUMENT:\nOn the Opportunities"));

    let outcome = scout
        .archive_metadata(&project, extracted, Some("https://arxiv.org/abs/2108.07258".into()))
        .await
        .unwrap();
    assert!(outcome.is_inserted());
    let paper = outcome.paper();
    assert_eq!(paper.source_kind, SourceKind::Ingest);
    assert_eq!(paper.url.as_deref(), Some("https://arxiv.org/abs/2108.07258"));
    assert_eq!(paper.abstract_text.as_deref(), Some("A survey of foundation models."));
}

#[tokio::test]
async fn ingesting_an_archived_title_is_a_duplicate() {
    let (scout, project) =
        scout(FakeAcademic::default(), FakeGrey::default(), FakeLlm::default(), settings()).await;
    let meta = PaperMetadata {
        title: "Layer Normalization".into(),
        authors: vec![],
        year: None,
        abstract_text: String::new(),
    };

    scout.archive_metadata(&project, meta.clone(), None).await.unwrap();
    let again = scout.archive_metadata(&project, meta, None).await.unwrap();
    assert!(!again.is_inserted());
}

#[tokio::test]
async fn malformed_metadata_is_a_schema_error() {
    let llm = FakeLlm::default().extracting(json!({"title": "Only a title"}));
    let (scout, _) = scout(FakeAcademic::default(), FakeGrey::default(), llm, settings()).await;

    let err = scout
        .extract_metadata("some document", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Schema(_)));
}

#[tokio::test]
async fn blank_document_is_invalid() {
    let (scout, _) =
        scout(FakeAcademic::default(), FakeGrey::default(), FakeLlm::default(), settings()).await;
    let err = scout
        .extract_metadata(" \n ", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));
}

#[tokio::test]
async fn synthesis_is_grounded_in_the_project_archive() {
    let llm = FakeLlm::default().answering(json!({
        "answer": "Secure aggregation hides individual updates (A. Author, 2020).",
        "citations": ["(A. Author, 2020)"]
    }));
    let (scout, project) = scout(FakeAcademic::default(), FakeGrey::default(), llm.clone(), settings()).await;
    scout
        .save_candidate(&project, &paper("Practical Secure Aggregation"))
        .await
        .unwrap();
    scout
        .save_candidate(&project, &paper("Deep Leakage from Gradients"))
        .await
        .unwrap();

    let answer = scout
        .synthesize(&project, "How are updates protected?", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(answer.citations, vec!["(A. Author, 2020)"]);

    let prompt = &llm.prompts()[0];
    assert!(prompt.contains(
        "KEY: (A. Author, 2020) | TITLE: Practical Secure Aggregation | CONTENT: Abstract of Practical Secure Aggregation."
    ));
    assert!(prompt.contains("TITLE: Deep Leakage from Gradients"));
    assert!(prompt.ends_with("QUESTION: How are updates protected?"));
}

#[tokio::test]
async fn synthesis_over_an_empty_project_is_invalid() {
    let llm = FakeLlm::default().answering(json!({"answer": "x", "citations": []}));
    let (scout, project) = scout(FakeAcademic::default(), FakeGrey::default(), llm.clone(), settings()).await;

    let err = scout
        .synthesize(&project, "Anything?", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidInput(_)));
    assert!(llm.prompts().is_empty());
}

#[tokio::test]
async fn synthesis_model_failure_is_reported() {
    // No scripted answer: the model call fails.
    let (scout, project) =
        scout(FakeAcademic::default(), FakeGrey::default(), FakeLlm::default(), settings()).await;
    scout.save_candidate(&project, &paper("Layer Normalization")).await.unwrap();

    let err = scout
        .synthesize(&project, "What is it?", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Llm(_)));
}
