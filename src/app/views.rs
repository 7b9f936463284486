//! Panel rendering (chat log, input bar, result panel)

use super::App;
use crate::theme;
use crate::ui::components::{chat_bubble, legend_row, loading_row};
use eframe::egui;

impl App {
    pub fn render_chat_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 12)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        let max_width = (ui.available_width() * 0.75).max(200.0);
                        for message in self.session.messages() {
                            chat_bubble(ui, message, max_width);
                        }
                        if self.session.is_loading() {
                            loading_row(ui);
                        }
                    });
            });
    }

    pub fn render_input_bar(&mut self, ctx: &egui::Context) {
        let loading = self.session.is_loading();

        egui::TopBottomPanel::bottom("input_bar")
            .exact_height(theme::INPUT_BAR_HEIGHT)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .inner_margin(egui::Margin::symmetric(16, 8)),
            )
            .show(ctx, |ui| {
                theme::input_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = theme::SPACING_MD;

                        // Mic button only when a transcriber is configured
                        if self.voice_available() {
                            let mic = ui.add_enabled(
                                !loading && !self.voice_busy,
                                egui::Button::new(
                                    egui::RichText::new(egui_phosphor::regular::MICROPHONE)
                                        .size(16.0)
                                        .color(theme::TEXT_MUTED),
                                )
                                .frame(false),
                            );
                            if mic.clicked() {
                                self.start_voice_capture(ctx);
                            }
                            mic.on_hover_text("Voice input");
                        }

                        // Send button laid out from the right, input takes the rest
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let send = ui.add_enabled(
                                !loading,
                                theme::button_accent(format!(
                                    "{} Send",
                                    egui_phosphor::regular::PAPER_PLANE_TILT
                                )),
                            );

                            let response = ui.add(
                                egui::TextEdit::singleline(&mut self.input)
                                    .hint_text("Describe your symptoms...")
                                    .frame(false)
                                    .desired_width(ui.available_width()),
                            );
                            if self.focus_input {
                                self.focus_input = false;
                                response.request_focus();
                            }

                            let enter_pressed = response.lost_focus()
                                && ui.input(|i| i.key_pressed(egui::Key::Enter));

                            if !loading && (send.clicked() || enter_pressed) {
                                self.submit_input(ctx);
                            }
                        });
                    });
                });
            });
    }

    /// Hidden until a prediction succeeds; cleared again on the next submit.
    pub fn render_result_panel(&mut self, ctx: &egui::Context) {
        let Some(result) = self.session.result().cloned() else {
            return;
        };

        egui::SidePanel::right("result_panel")
            .exact_width(theme::RESULT_PANEL_WIDTH)
            .resizable(false)
            .frame(
                egui::Frame::new()
                    .fill(theme::BG_BASE)
                    .stroke(egui::Stroke::new(theme::STROKE_DEFAULT, theme::BORDER_SUBTLE))
                    .inner_margin(egui::Margin::same(16)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        ui.add(egui::Label::new(
                            egui::RichText::new("Prediction Result")
                                .size(theme::FONT_HEADING)
                                .strong(),
                        ));
                        ui.add_space(theme::SPACING_MD);

                        theme::card_frame().show(ui, |ui| {
                            section_label(ui, "PREDICTED CONDITION");
                            ui.add(egui::Label::new(
                                egui::RichText::new(&result.predicted_disease)
                                    .size(theme::FONT_HEADING)
                                    .color(theme::ACCENT_LIGHT)
                                    .strong(),
                            ));
                            ui.add_space(theme::SPACING_MD);
                            section_label(ui, "ADVICE");
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(&result.advice)
                                        .size(theme::FONT_LABEL)
                                        .color(theme::TEXT_SECONDARY),
                                )
                                .wrap(),
                            );
                        });

                        if !result.symptoms.is_empty() {
                            ui.add_space(theme::SPACING_MD);
                            theme::card_frame().show(ui, |ui| {
                                section_label(ui, "MATCHED SYMPTOMS");
                                ui.add(
                                    egui::Label::new(
                                        egui::RichText::new(result.symptoms.join(", "))
                                            .size(theme::FONT_LABEL)
                                            .color(theme::TEXT_MUTED),
                                    )
                                    .wrap(),
                                );
                            });
                        }

                        if let Some(chart) = self.session.chart() {
                            ui.add_space(theme::SPACING_MD);
                            theme::card_frame().show(ui, |ui| {
                                section_label(ui, "PROBABILITIES");
                                ui.vertical_centered(|ui| {
                                    chart.paint(ui, theme::CHART_DIAMETER);
                                });
                                ui.add_space(theme::SPACING_MD);
                                let total = chart.total();
                                for slice in chart.slices() {
                                    legend_row(ui, slice, total);
                                }
                            });
                        }

                        if let Some(pdf_url) = &result.pdf_url {
                            ui.add_space(theme::SPACING_LG);
                            let open = ui.add(theme::button_accent(format!(
                                "{} Open full report",
                                egui_phosphor::regular::FILE_PDF
                            )));
                            if open.clicked() {
                                self.open_report(pdf_url);
                            }
                        }
                    });
            });
    }
}

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.add(
        egui::Label::new(
            egui::RichText::new(text)
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_DIM),
        )
        .selectable(false),
    );
    ui.add_space(theme::SPACING_SM);
}
