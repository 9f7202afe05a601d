use std::f64::consts::{FRAC_PI_2, TAU};

// ---------------------------------------------------------------------------
// Pie geometry (plot coordinates, unit circle centred on the origin)
// ---------------------------------------------------------------------------

/// Arc points per full turn.
const SEGMENTS_PER_TURN: f64 = 128.0;

/// One slice of the pie, angles measured clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub start: f64,
    pub sweep: f64,
}

/// Lay out slices around the circle in the given order.
/// Zero-count slices get no wedge; an all-zero input yields no wedges.
pub fn layout(slices: &[(String, usize)]) -> Vec<Wedge> {
    let total: usize = slices.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = 0.0;
    slices
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, count)| {
            let fraction = *count as f64 / total as f64;
            let sweep = fraction * TAU;
            let wedge = Wedge {
                label: label.clone(),
                count: *count,
                fraction,
                start,
                sweep,
            };
            start += sweep;
            wedge
        })
        .collect()
}

fn point_at(angle: f64, radius: f64) -> [f64; 2] {
    // Clockwise from the top.
    let theta = FRAC_PI_2 - angle;
    [radius * theta.cos(), radius * theta.sin()]
}

impl Wedge {
    /// Filled outline split into convex pieces of at most a quarter turn each,
    /// since plot polygons are only filled correctly when convex.
    pub fn pieces(&self, radius: f64) -> Vec<Vec<[f64; 2]>> {
        let n_pieces = (self.sweep / FRAC_PI_2).ceil().max(1.0) as usize;
        let piece_sweep = self.sweep / n_pieces as f64;

        (0..n_pieces)
            .map(|i| {
                let from = self.start + i as f64 * piece_sweep;
                let steps = ((piece_sweep / TAU) * SEGMENTS_PER_TURN).ceil().max(1.0) as usize;
                let mut outline = Vec::with_capacity(steps + 2);
                outline.push([0.0, 0.0]);
                outline.extend(
                    (0..=steps).map(|s| point_at(from + piece_sweep * s as f64 / steps as f64, radius)),
                );
                outline
            })
            .collect()
    }

    /// Where to put the percentage label: mid-angle, part way out.
    pub fn label_anchor(&self, radius: f64) -> [f64; 2] {
        point_at(self.start + self.sweep / 2.0, radius * 0.65)
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}
