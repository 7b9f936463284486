//! Application constants and configuration

pub const APP_NAME: &str = "Symptom Chat";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default base URL of the prediction service (Flask dev server).
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:5000";

/// Fixed bot reply shown for every failed prediction attempt.
pub const FAILURE_MESSAGE: &str = "Something went wrong. Try again.";

/// Prefix of the bot reply announcing a prediction.
pub const PREDICT_PREFIX: &str = "I predict: ";

/// Recognition language passed to the voice transcriber.
pub const VOICE_LANG: &str = "en-US";
