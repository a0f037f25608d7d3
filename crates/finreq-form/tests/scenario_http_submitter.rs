//! HttpSubmitter against a local mock of the submission endpoint.

use std::sync::Arc;

use chrono::NaiveDate;
use finreq_config::load_layered_yaml_from_strings;
use finreq_form::{HttpSubmitter, SubmissionOutcome, SubmissionWorkflow, SubmitError, Submitter};
use finreq_schemas::{Currency, FinancingRequestDraft};
use httpmock::prelude::*;
use serde_json::json;

fn draft() -> FinancingRequestDraft {
    FinancingRequestDraft {
        name: "Ada".to_string(),
        surname: "Lovelace".to_string(),
        country: "India".to_string(),
        project_code: "ABCD-1234".to_string(),
        description: "Looms".to_string(),
        amount: Some(7500.0),
        currency: Some(Currency::Inr),
        start_date: "2024-02-01".to_string(),
        end_date: "2026-02-01".to_string(),
    }
}

#[tokio::test]
async fn posts_the_full_draft_as_json() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/requests")
                .json_body(json!({
                    "name": "Ada",
                    "surname": "Lovelace",
                    "country": "India",
                    "projectCode": "ABCD-1234",
                    "description": "Looms",
                    "amount": 7500.0,
                    "currency": "INR",
                    "startDate": "2024-02-01",
                    "endDate": "2026-02-01"
                }));
            then.status(201).json_body(json!({ "id": 1 }));
        })
        .await;

    let submitter = HttpSubmitter::new(server.url("/api/requests"));
    submitter.submit(&draft()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn any_non_success_status_is_a_failure() {
    for status in [400u16, 404, 500, 503] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/requests");
                then.status(status);
            })
            .await;

        let submitter = HttpSubmitter::new(server.url("/api/requests"));
        assert_eq!(
            submitter.submit(&draft()).await,
            Err(SubmitError::Status(status))
        );
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_failure() {
    // Port 9 (discard) is not expected to accept HTTP on the loopback interface.
    let submitter = HttpSubmitter::new("http://127.0.0.1:9/api/requests");
    assert!(matches!(
        submitter.submit(&draft()).await,
        Err(SubmitError::Transport(_))
    ));
}

#[tokio::test]
async fn workflow_from_config_hits_configured_endpoint_once() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v2/financing");
            then.status(200);
        })
        .await;

    let yaml = format!(
        "submission:\n  base_url: \"{}\"\n  path: \"/v2/financing\"\n  timeout_ms: 5000\n",
        server.base_url()
    );
    let cfg = load_layered_yaml_from_strings(&[&yaml]).unwrap();
    let workflow = Arc::new(SubmissionWorkflow::from_config(&cfg));

    let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let attempt = workflow.submit(&draft(), today).await;

    assert_eq!(attempt.outcome(), Some(&SubmissionOutcome::Success));
    mock.assert_hits_async(1).await;
}
