//! Pie chart built from a probability mapping

use egui::{Color32, Pos2, Shape, Stroke, Vec2};

/// The fixed slice palette, cycled when there are more than 10 labels.
pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(0x29, 0xb6, 0xf6),
    Color32::from_rgb(0x66, 0xbb, 0x6a),
    Color32::from_rgb(0xef, 0x53, 0x50),
    Color32::from_rgb(0xff, 0xa7, 0x26),
    Color32::from_rgb(0xab, 0x47, 0xbc),
    Color32::from_rgb(0x26, 0xc6, 0xda),
    Color32::from_rgb(0xd4, 0xe1, 0x57),
    Color32::from_rgb(0x8d, 0x6e, 0x63),
    Color32::from_rgb(0xec, 0x40, 0x7a),
    Color32::from_rgb(0x78, 0x90, 0x9c),
];

/// Color for the n-th slice.
pub fn slice_color(index: usize) -> Color32 {
    PALETTE[index % PALETTE.len()]
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    /// Fraction of the full circle, 0.0 when the value paints no slice.
    pub fraction: f64,
    pub color: Color32,
}

/// A rendered probability distribution.
///
/// Built fresh on every redraw; the session drops the previous instance
/// before constructing the next one, so at most one chart is alive.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    slices: Vec<Slice>,
}

impl PieChart {
    /// Build a chart from (label, value) pairs in mapping order.
    ///
    /// Values are taken as-is from the service: they need not sum to 1.
    /// Angles are proportional to value / total; non-finite and non-positive
    /// values keep their legend entry but get a zero-size slice.
    pub fn new(probabilities: &[(String, f64)]) -> Self {
        let total: f64 = probabilities
            .iter()
            .map(|(_, v)| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
            .sum();

        let slices = probabilities
            .iter()
            .enumerate()
            .map(|(i, (label, value))| {
                let fraction = if total > 0.0 && value.is_finite() && *value > 0.0 {
                    value / total
                } else {
                    0.0
                };
                Slice {
                    label: label.clone(),
                    value: *value,
                    fraction,
                    color: slice_color(i),
                }
            })
            .collect();

        Self { slices }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn labels(&self) -> Vec<&str> {
        self.slices.iter().map(|s| s.label.as_str()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.slices.iter().map(|s| s.value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.iter().all(|s| s.fraction == 0.0)
    }

    /// Sum of the values that contribute slices, used for legend percentages.
    pub fn total(&self) -> f64 {
        self.slices
            .iter()
            .map(|s| if s.value.is_finite() && s.value > 0.0 { s.value } else { 0.0 })
            .sum()
    }

    /// Paint the pie into `ui`, allocating a square of `diameter`.
    pub fn paint(&self, ui: &mut egui::Ui, diameter: f32) {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(diameter), egui::Sense::hover());
        if !ui.is_rect_visible(rect) || self.is_empty() {
            return;
        }

        let center = rect.center();
        let radius = diameter / 2.0 - 2.0;
        let painter = ui.painter();

        // Start at 12 o'clock, clockwise.
        let mut angle = -std::f64::consts::FRAC_PI_2;
        for slice in &self.slices {
            if slice.fraction <= 0.0 {
                continue;
            }
            let sweep = slice.fraction * std::f64::consts::TAU;
            for points in slice_polygons(center, radius, angle, sweep) {
                painter.add(Shape::convex_polygon(points, slice.color, Stroke::NONE));
            }
            angle += sweep;
        }
    }
}

/// Arc polygons for one slice, split so each stays convex.
fn slice_polygons(center: Pos2, radius: f32, start: f64, sweep: f64) -> Vec<Vec<Pos2>> {
    const MAX_SWEEP: f64 = std::f64::consts::FRAC_PI_2;
    const STEP: f64 = std::f64::consts::PI / 48.0;

    let mut polygons = Vec::new();
    let mut from = start;
    let end = start + sweep;
    while from < end - 1e-9 {
        let to = (from + MAX_SWEEP).min(end);
        let mut points = vec![center];
        let steps = ((to - from) / STEP).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let a = from + (to - from) * (i as f64 / steps as f64);
            points.push(center + radius * Vec2::new(a.cos() as f32, a.sin() as f32));
        }
        polygons.push(points);
        from = to;
    }
    polygons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, f64)]) -> Vec<(String, f64)> {
        entries.iter().map(|(l, v)| (l.to_string(), *v)).collect()
    }

    #[test]
    fn slices_keep_mapping_order_and_values() {
        let chart = PieChart::new(&pairs(&[("Flu", 0.8), ("Cold", 0.2)]));
        assert_eq!(chart.labels(), ["Flu", "Cold"]);
        assert_eq!(chart.values(), [0.8, 0.2]);
    }

    #[test]
    fn fractions_cover_the_full_circle() {
        let chart = PieChart::new(&pairs(&[("A", 3.0), ("B", 1.0)]));
        let total: f64 = chart.slices().iter().map(|s| s.fraction).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!((chart.slices()[0].fraction - 0.75).abs() < 1e-12);
    }

    #[test]
    fn unnormalized_percentages_are_accepted() {
        // The service sends percentages; no validation, just proportions.
        let chart = PieChart::new(&pairs(&[("Flu", 80.0), ("Cold", 20.0)]));
        assert!((chart.slices()[0].fraction - 0.8).abs() < 1e-12);
    }

    #[test]
    fn palette_cycles_past_ten_labels() {
        let entries: Vec<(String, f64)> =
            (0..12).map(|i| (format!("label-{i}"), 1.0)).collect();
        let chart = PieChart::new(&entries);
        assert_eq!(chart.slices()[10].color, PALETTE[0]);
        assert_eq!(chart.slices()[11].color, PALETTE[1]);
        assert_eq!(chart.slices()[9].color, PALETTE[9]);
    }

    #[test]
    fn degenerate_values_paint_nothing() {
        let chart = PieChart::new(&pairs(&[("A", 0.0), ("B", -1.0), ("C", f64::NAN)]));
        assert!(chart.is_empty());
        // Legend entries survive even without slices.
        assert_eq!(chart.labels(), ["A", "B", "C"]);
    }

    #[test]
    fn wide_slices_split_into_convex_polygons() {
        let polys = slice_polygons(Pos2::ZERO, 10.0, 0.0, std::f64::consts::TAU * 0.75);
        assert_eq!(polys.len(), 3);
        for poly in &polys {
            assert!(poly.len() >= 3);
            assert_eq!(poly[0], Pos2::ZERO);
        }
    }
}
