//! Prediction dispatch

use super::App;
use eframe::egui;
use tracing::{debug, info};

impl App {
    /// Submit the current input field content.
    ///
    /// Delegates acceptance to the session (trimming, empty rejection, the
    /// in-flight guard); an accepted submission clears the field and goes out
    /// on the runtime. The settled outcome lands in the inbox and wakes the
    /// UI with a repaint request.
    pub fn submit_input(&mut self, ctx: &egui::Context) {
        let Some(submission) = self.session.submit(&self.input) else {
            return;
        };
        self.input.clear();
        self.focus_input = true;

        info!(seq = submission.seq, "Dispatching prediction request");

        let client = self.client.clone();
        let inbox = self.inbox.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            let outcome = client.predict(&submission.request.user_input).await;
            inbox.lock().unwrap().push((submission.seq, outcome));
            ctx.request_repaint();
        });
    }

    /// Drain settled outcomes into the session.
    pub fn poll_predictions(&mut self) {
        let settled: Vec<_> = self.inbox.lock().unwrap().drain(..).collect();
        for (seq, outcome) in settled {
            debug!(seq, ok = outcome.is_ok(), "Settling prediction");
            self.session.settle(seq, outcome);
        }
    }

    /// Open the server-rendered PDF report in the system viewer.
    pub fn open_report(&self, pdf_url: &str) {
        let url = self.client.resolve(pdf_url);
        info!(url = %url, "Opening report");
        let _ = open::that(url);
    }
}
