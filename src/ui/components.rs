//! Reusable UI components

use crate::chart::Slice;
use crate::constants::FAILURE_MESSAGE;
use crate::session::{ChatMessage, Role};
use crate::theme;
use eframe::egui;

/// Format a probability value for the legend.
///
/// Values come through unvalidated; anything non-finite renders as "—".
pub fn format_percent(value: f64, total: f64) -> String {
    if !value.is_finite() || total <= 0.0 {
        return "—".to_string();
    }
    format!("{:.1}%", value / total * 100.0)
}

/// Render one chat bubble, aligned by role.
pub fn chat_bubble(ui: &mut egui::Ui, message: &ChatMessage, max_width: f32) {
    let (fill, layout) = match message.role {
        Role::User => (
            theme::BUBBLE_USER,
            egui::Layout::right_to_left(egui::Align::TOP),
        ),
        Role::Bot if message.text == FAILURE_MESSAGE => (
            theme::BUBBLE_BOT_ERROR,
            egui::Layout::left_to_right(egui::Align::TOP),
        ),
        Role::Bot => (
            theme::BUBBLE_BOT,
            egui::Layout::left_to_right(egui::Align::TOP),
        ),
    };

    ui.with_layout(layout, |ui| {
        egui::Frame::new()
            .fill(fill)
            .corner_radius(theme::RADIUS_BUBBLE)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_max_width(max_width);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&message.text)
                            .size(theme::FONT_BODY)
                            .color(theme::TEXT_PRIMARY),
                    )
                    .wrap(),
                );
            });
    });
    ui.add_space(theme::SPACING_SM);
}

/// Spinner row shown while a request is in flight.
pub fn loading_row(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add(egui::Spinner::new().size(14.0).color(theme::ACCENT));
        ui.add(
            egui::Label::new(
                egui::RichText::new("Analyzing symptoms...")
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_DIM),
            )
            .selectable(false),
        );
    });
    ui.add_space(theme::SPACING_SM);
}

/// One legend entry: color swatch, label, percentage.
pub fn legend_row(ui: &mut egui::Ui, slice: &Slice, total: f64) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, slice.color);
        ui.add(
            egui::Label::new(
                egui::RichText::new(&slice.label)
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_SECONDARY),
            )
            .selectable(false)
            .truncate(),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add(
                egui::Label::new(
                    egui::RichText::new(format_percent(slice.value, total))
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                )
                .selectable(false),
            );
        });
    });
}
