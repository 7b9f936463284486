//! Voice input via an external transcriber command
//!
//! Desktop stand-in for a speech-recognition API: the configured command is
//! expected to capture one utterance and print the transcript to stdout.
//! Single-shot; on success the transcript replaces the input field content,
//! on error the user gets a blocking alert and nothing else happens.

use super::App;
use crate::constants::VOICE_LANG;
use eframe::egui;
use std::process::Command;
use tracing::{error, info, warn};

const VOICE_TRANSCRIPT_KEY: &str = "voice_transcript";
const VOICE_ERROR_KEY: &str = "voice_error";

impl App {
    pub fn start_voice_capture(&mut self, ctx: &egui::Context) {
        let Some(command) = self.voice_command.clone() else {
            return;
        };
        if self.voice_busy {
            return;
        }
        self.voice_busy = true;

        info!(command = %command, lang = VOICE_LANG, "Starting voice capture");

        let ctx = ctx.clone();
        std::thread::spawn(move || {
            let result = Command::new(&command).arg(VOICE_LANG).output();

            ctx.memory_mut(|mem| match result {
                Ok(output) if output.status.success() => {
                    let transcript =
                        String::from_utf8_lossy(&output.stdout).trim().to_string();
                    if transcript.is_empty() {
                        warn!("Voice capture produced no transcript");
                        mem.data.insert_temp(
                            VOICE_ERROR_KEY.into(),
                            "no speech detected".to_string(),
                        );
                    } else {
                        info!(len = transcript.len(), "Voice transcript received");
                        mem.data.insert_temp(VOICE_TRANSCRIPT_KEY.into(), transcript);
                    }
                }
                Ok(output) => {
                    let detail = String::from_utf8_lossy(&output.stderr).trim().to_string();
                    error!(status = %output.status, detail = %detail, "Transcriber failed");
                    mem.data.insert_temp(
                        VOICE_ERROR_KEY.into(),
                        format!("transcriber exited with {}", output.status),
                    );
                }
                Err(e) => {
                    error!(error = %e, "Failed to run transcriber");
                    mem.data.insert_temp(VOICE_ERROR_KEY.into(), e.to_string());
                }
            });
            ctx.request_repaint();
        });
    }

    pub fn poll_voice_results(&mut self, ctx: &egui::Context) {
        let transcript: Option<String> = ctx.memory_mut(|mem| {
            let v = mem.data.get_temp(VOICE_TRANSCRIPT_KEY.into());
            if v.is_some() {
                mem.data.remove::<String>(VOICE_TRANSCRIPT_KEY.into());
            }
            v
        });
        if let Some(transcript) = transcript {
            self.voice_busy = false;
            // Replaces, not appends: matches single-shot recognition.
            self.input = transcript;
            self.focus_input = true;
        }

        let voice_error: Option<String> = ctx.memory_mut(|mem| {
            let v = mem.data.get_temp(VOICE_ERROR_KEY.into());
            if v.is_some() {
                mem.data.remove::<String>(VOICE_ERROR_KEY.into());
            }
            v
        });
        if let Some(detail) = voice_error {
            self.voice_busy = false;
            rfd::MessageDialog::new()
                .set_level(rfd::MessageLevel::Error)
                .set_title("Voice input error")
                .set_description(format!("Voice input error: {detail}"))
                .show();
        }
    }
}
