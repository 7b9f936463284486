//! End-to-end submission cycles: session state machine driving the real
//! client against a mock prediction service.

use serde_json::json;
use symptom_chat::client::PredictionClient;
use symptom_chat::constants::FAILURE_MESSAGE;
use symptom_chat::session::{ChatSession, Role};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn successful_cycle_updates_log_result_and_chart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_disease": "Flu",
            "advice": "Rest and hydrate",
            "probabilities": {"Flu": 0.8, "Cold": 0.2}
        })))
        .mount(&server)
        .await;

    let client = PredictionClient::new(server.uri());
    let mut session = ChatSession::new();

    let submission = session.submit("fever and body aches").unwrap();
    assert!(session.is_loading());

    let outcome = client.predict(&submission.request.user_input).await;
    assert!(session.settle(submission.seq, outcome));

    assert!(!session.is_loading());
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[0].role, Role::User);
    assert_eq!(session.messages()[1].role, Role::Bot);
    assert!(session.messages()[1].text.contains("Flu"));

    let result = session.result().unwrap();
    assert_eq!(result.predicted_disease, "Flu");
    assert_eq!(result.advice, "Rest and hydrate");

    let chart = session.chart().unwrap();
    assert_eq!(chart.labels(), ["Flu", "Cold"]);
    assert_eq!(chart.values(), [0.8, 0.2]);
}

#[tokio::test]
async fn service_error_cycle_shows_the_fixed_message_only() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"error": "No recognizable symptoms found."})),
        )
        .mount(&server)
        .await;

    let client = PredictionClient::new(server.uri());
    let mut session = ChatSession::new();

    let submission = session.submit("asdfgh").unwrap();
    let outcome = client.predict(&submission.request.user_input).await;
    session.settle(submission.seq, outcome);

    assert!(!session.is_loading());
    assert_eq!(session.messages().len(), 2);
    assert_eq!(session.messages()[1].text, FAILURE_MESSAGE);
    assert!(session.result().is_none());
    assert!(session.chart().is_none());
}

#[tokio::test]
async fn transport_failure_cycle_settles_like_any_other_error() {
    let client = PredictionClient::new("http://127.0.0.1:9");
    let mut session = ChatSession::new();

    let submission = session.submit("fever").unwrap();
    let outcome = client.predict(&submission.request.user_input).await;
    session.settle(submission.seq, outcome);

    assert!(!session.is_loading());
    assert_eq!(session.messages()[1].text, FAILURE_MESSAGE);
}

#[tokio::test]
async fn back_to_back_cycles_keep_one_chart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_disease": "Flu",
            "advice": "Rest",
            "probabilities": {"Flu": 0.8, "Cold": 0.2}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predicted_disease": "Cold",
            "advice": "Stay warm",
            "probabilities": {"Cold": 0.9, "Flu": 0.1}
        })))
        .mount(&server)
        .await;

    let client = PredictionClient::new(server.uri());
    let mut session = ChatSession::new();

    let first = session.submit("fever").unwrap();
    let outcome = client.predict(&first.request.user_input).await;
    session.settle(first.seq, outcome);

    let second = session.submit("sneezing").unwrap();
    // The new submission hides the previous result immediately.
    assert!(session.result().is_none());
    assert!(session.chart().is_none());

    let outcome = client.predict(&second.request.user_input).await;
    session.settle(second.seq, outcome);

    let chart = session.chart().unwrap();
    assert_eq!(chart.labels(), ["Cold", "Flu"]);
    assert_eq!(session.result().unwrap().predicted_disease, "Cold");
    assert_eq!(session.messages().len(), 4);
}
