//! Symptom Chat - chat-style desktop client for a symptom prediction service

pub mod app;
pub mod chart;
pub mod client;
pub mod constants;
pub mod session;
pub mod settings;
pub mod theme;
pub mod types;
pub mod ui;
