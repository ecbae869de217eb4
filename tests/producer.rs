mod support;

use planline::config::ProducerConfig;
use planline::error::ProducerError;
use planline::planner::{ExecutionState, RunOutcome, run_document};
use planline::producer::{OpenAiProducer, produce_plan_document};
use serde_json::json;
use support::stub_toolbox;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn producer_for(server: &MockServer) -> OpenAiProducer {
    let config = ProducerConfig {
        base_url: server.uri(),
        model: "gpt-4o".into(),
        temperature: 0.2,
    };
    OpenAiProducer::new(Some("test-key".into()), &config)
}

fn chat_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [{"message": {"role": "assistant", "content": content}}],
        "model": "gpt-4o"
    })
}

#[tokio::test]
async fn fenced_plan_from_producer_executes_end_to_end() {
    let server = MockServer::start().await;
    let plan_text = r#"```json
{
    "FAILURE": false,
    "REASON": "",
    "STEPS": 2,
    "1": {"TOOL_NAME": "browser", "X": "rust planners", "OUTPUTS": {"A": "status", "B": "results"}},
    "2": {"TOOL_NAME": "to_user", "X": {"ref": "1B"}, "OUTPUTS": {"A": "status"}}
}
```"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(plan_text)))
        .mount(&server)
        .await;

    let toolbox = stub_toolbox();
    let producer = producer_for(&server);
    let doc = produce_plan_document(&producer, "research rust planners", "AVAILABLE TOOLS:\n")
        .await
        .unwrap();

    let RunOutcome::Executed(report) = run_document(&doc, &toolbox.registry).await.unwrap()
    else {
        panic!("expected an executed plan");
    };
    assert_eq!(report.state, ExecutionState::Completed);
    assert_eq!(
        toolbox.delivered.lock().unwrap().as_deref(),
        Some("results for rust planners")
    );
}

#[tokio::test]
async fn producer_failure_document_round_trips() {
    let server = MockServer::start().await;
    let plan_text =
        r#"{"FAILURE": true, "REASON": "no tool can send email", "STEPS": 0}"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(plan_text)))
        .mount(&server)
        .await;

    let toolbox = stub_toolbox();
    let producer = producer_for(&server);
    let doc = produce_plan_document(&producer, "email my boss", "AVAILABLE TOOLS:\n")
        .await
        .unwrap();

    let RunOutcome::FailurePlan { reason } = run_document(&doc, &toolbox.registry).await.unwrap()
    else {
        panic!("expected a failure plan");
    };
    assert_eq!(reason, "no tool can send email");
    assert_eq!(toolbox.total_calls(), 0);
}

#[tokio::test]
async fn http_error_is_reported_as_request_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream broke"))
        .mount(&server)
        .await;

    let producer = producer_for(&server);
    let err = produce_plan_document(&producer, "anything", "AVAILABLE TOOLS:\n")
        .await
        .unwrap_err();

    match err {
        ProducerError::Request { producer, message } => {
            assert_eq!(producer, "openai");
            assert!(message.contains("500"));
        }
        other => panic!("expected a request error, got {other:?}"),
    }
}

#[tokio::test]
async fn prose_only_response_is_a_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body(
            "I'm sorry, I cannot produce a plan for that.",
        )))
        .mount(&server)
        .await;

    let producer = producer_for(&server);
    let err = produce_plan_document(&producer, "anything", "AVAILABLE TOOLS:\n")
        .await
        .unwrap_err();
    assert!(matches!(err, ProducerError::Payload(_)));
}
