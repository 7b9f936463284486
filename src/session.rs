//! Chat log and submission state machine
//!
//! Owns everything a submission cycle touches except I/O: the append-only
//! message log, the loading phase, the last successful result and its chart.
//! The eframe app drives it and paints from it, which keeps the whole cycle
//! testable without a window or a live service.

use crate::chart::PieChart;
use crate::client::PredictError;
use crate::constants::{FAILURE_MESSAGE, PREDICT_PREFIX};
use crate::types::{PredictionRequest, PredictionResult};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub text: String,
}

/// One submission cycle: idle, or waiting on the request tagged `seq`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Loading { seq: u64 },
}

/// A submission accepted by [`ChatSession::submit`], ready to dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub seq: u64,
    pub request: PredictionRequest,
}

#[derive(Debug)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    phase: Phase,
    result: Option<PredictionResult>,
    chart: Option<PieChart>,
    next_seq: u64,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            phase: Phase::Idle,
            result: None,
            chart: None,
            next_seq: 0,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// The last successful prediction, cleared on every new submission.
    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn chart(&self) -> Option<&PieChart> {
        self.chart.as_ref()
    }

    /// Accept one user input and enter the loading phase.
    ///
    /// Whitespace-only input is a no-op. Input while a request is in flight
    /// is rejected; the caller should also disable the form, this is the
    /// backstop. On acceptance: exactly one user message is appended, the
    /// prior result and chart are cleared, and the request to send comes
    /// back tagged with a fresh sequence number.
    pub fn submit(&mut self, input: &str) -> Option<Submission> {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        if self.is_loading() {
            warn!("Submission ignored: a request is already in flight");
            return None;
        }

        self.messages.push(ChatMessage {
            role: Role::User,
            text: text.to_string(),
        });
        self.result = None;
        self.chart = None;

        let seq = self.next_seq;
        self.next_seq += 1;
        self.phase = Phase::Loading { seq };

        Some(Submission {
            seq,
            request: PredictionRequest {
                user_input: text.to_string(),
            },
        })
    }

    /// Settle the request tagged `seq` with its outcome.
    ///
    /// A sequence number that is not the one in flight belongs to an
    /// abandoned cycle and is discarded untouched. Otherwise exactly one bot
    /// message is appended and the phase returns to idle, on every branch.
    pub fn settle(
        &mut self,
        seq: u64,
        outcome: Result<PredictionResult, PredictError>,
    ) -> bool {
        match self.phase {
            Phase::Loading { seq: current } if current == seq => {}
            _ => {
                warn!(seq, "Discarding stale prediction outcome");
                return false;
            }
        }

        match outcome {
            Ok(result) => {
                info!(disease = %result.predicted_disease, "Prediction received");
                self.messages.push(ChatMessage {
                    role: Role::Bot,
                    text: format!("{PREDICT_PREFIX}{}", result.predicted_disease),
                });
                // Drop the previous chart before building the replacement.
                self.chart = None;
                self.chart = Some(PieChart::new(&result.probabilities));
                self.result = Some(result);
            }
            Err(e) => {
                // Diagnostic detail stays in the log; the user sees the
                // fixed message only.
                error!(error = %e, "Prediction failed");
                self.messages.push(ChatMessage {
                    role: Role::Bot,
                    text: FAILURE_MESSAGE.to_string(),
                });
            }
        }

        self.phase = Phase::Idle;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flu_result() -> PredictionResult {
        serde_json::from_str(
            r#"{
                "predicted_disease": "Flu",
                "advice": "Rest and hydrate",
                "probabilities": {"Flu": 0.8, "Cold": 0.2}
            }"#,
        )
        .unwrap()
    }

    fn service_error() -> PredictError {
        PredictError::Service(serde_json::json!(true))
    }

    #[test]
    fn empty_input_changes_nothing() {
        let mut session = ChatSession::new();
        assert!(session.submit("").is_none());
        assert!(session.submit("   \t\n").is_none());
        assert!(session.messages().is_empty());
        assert!(!session.is_loading());
    }

    #[test]
    fn submit_appends_one_user_message_and_loads() {
        let mut session = ChatSession::new();
        let sub = session.submit("  I have a fever  ").unwrap();
        assert_eq!(sub.request.user_input, "I have a fever");
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, Role::User);
        assert_eq!(session.messages()[0].text, "I have a fever");
        assert!(session.is_loading());
    }

    #[test]
    fn success_appends_bot_message_and_builds_chart() {
        let mut session = ChatSession::new();
        let sub = session.submit("fever and chills").unwrap();

        assert!(session.settle(sub.seq, Ok(flu_result())));

        assert_eq!(session.messages().len(), 2);
        let bot = &session.messages()[1];
        assert_eq!(bot.role, Role::Bot);
        assert!(bot.text.contains("Flu"));

        let result = session.result().unwrap();
        assert_eq!(result.predicted_disease, "Flu");
        assert_eq!(result.advice, "Rest and hydrate");

        let chart = session.chart().unwrap();
        assert_eq!(chart.labels(), ["Flu", "Cold"]);
        assert_eq!(chart.values(), [0.8, 0.2]);
        assert!(!session.is_loading());
    }

    #[test]
    fn failure_appends_fixed_message_and_keeps_result_hidden() {
        let mut session = ChatSession::new();
        let sub = session.submit("gibberish").unwrap();

        assert!(session.settle(sub.seq, Err(service_error())));

        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].text, FAILURE_MESSAGE);
        assert!(session.result().is_none());
        assert!(session.chart().is_none());
        assert!(!session.is_loading());
    }

    #[test]
    fn exactly_one_bot_message_per_attempt() {
        let mut session = ChatSession::new();
        let sub = session.submit("headache").unwrap();
        session.settle(sub.seq, Ok(flu_result()));
        // A second settle for the same cycle is stale and ignored.
        assert!(!session.settle(sub.seq, Err(service_error())));
        assert_eq!(session.messages().len(), 2);
    }

    #[test]
    fn new_submission_hides_prior_result() {
        let mut session = ChatSession::new();
        let sub = session.submit("fever").unwrap();
        session.settle(sub.seq, Ok(flu_result()));
        assert!(session.result().is_some());

        session.submit("now a rash").unwrap();
        assert!(session.result().is_none());
        assert!(session.chart().is_none());
        assert!(session.is_loading());
    }

    #[test]
    fn submissions_while_loading_are_rejected() {
        let mut session = ChatSession::new();
        session.submit("first").unwrap();
        assert!(session.submit("second").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn stale_outcome_is_discarded() {
        let mut session = ChatSession::new();
        let first = session.submit("first").unwrap();
        session.settle(first.seq, Err(service_error()));
        let second = session.submit("second").unwrap();

        // The first cycle resolving late must not touch the new cycle.
        assert!(!session.settle(first.seq, Ok(flu_result())));
        assert!(session.is_loading());
        assert!(session.result().is_none());
        assert_eq!(session.messages().len(), 3);

        assert!(session.settle(second.seq, Ok(flu_result())));
        assert!(!session.is_loading());
    }

    #[test]
    fn redraw_replaces_the_chart() {
        let mut session = ChatSession::new();
        let sub = session.submit("fever").unwrap();
        session.settle(sub.seq, Ok(flu_result()));

        let second: PredictionResult = serde_json::from_str(
            r#"{
                "predicted_disease": "Cold",
                "advice": "Stay warm",
                "probabilities": {"Cold": 0.9, "Flu": 0.1}
            }"#,
        )
        .unwrap();
        let sub = session.submit("sneezing").unwrap();
        session.settle(sub.seq, Ok(second));

        // Exactly one chart alive, reflecting the latest response.
        let chart = session.chart().unwrap();
        assert_eq!(chart.labels(), ["Cold", "Flu"]);
    }

    #[test]
    fn loading_clears_on_every_outcome() {
        for outcome in [
            Ok(flu_result()),
            Err(service_error()),
            Err(PredictError::Decode(
                serde_json::from_str::<serde_json::Value>("not json").unwrap_err(),
            )),
        ] {
            let mut session = ChatSession::new();
            let sub = session.submit("fever").unwrap();
            session.settle(sub.seq, outcome);
            assert!(!session.is_loading());
            assert_eq!(session.messages().len(), 2);
        }
    }
}
