use crate::{
    style::palette::{Color, DepthThresholdTable},
    ui::controls::ControlPosition,
};
use serde::Serialize;
use std::fmt;

/// One legend row: a depth range and its swatch color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// `"0–10"` for bounded bands, `"90+"` for the top band
    pub label: String,
    pub color: Color,
    pub lower: f64,
    /// `None` for the top band
    pub upper: Option<f64>,
}

/// Static depth legend, derived from the same table the classifier reads.
///
/// Built once per session and attached when the earthquake data arrives.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    position: ControlPosition,
    attached: bool,
}

impl Legend {
    pub fn from_table(table: &DepthThresholdTable, position: ControlPosition) -> Self {
        let entries = table
            .bands()
            .iter()
            .enumerate()
            .map(|(i, band)| {
                let upper = table.upper_bound(i);
                let label = match upper {
                    Some(upper) => format!("{}\u{2013}{}", band.lower, upper),
                    None => format!("{}+", band.lower),
                };
                LegendEntry {
                    label,
                    color: band.color,
                    lower: band.lower,
                    upper,
                }
            })
            .collect();

        Self {
            entries,
            position,
            attached: false,
        }
    }

    /// Rows in ascending depth order
    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn position(&self) -> ControlPosition {
        self.position
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// Inner HTML of the legend box: a colored `<i>` swatch per row
    pub fn render_html(&self) -> String {
        let mut html = String::new();
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background:{}\"></i> {}",
                entry.color,
                entry.lower
            ));
            match entry.upper {
                Some(upper) => html.push_str(&format!("&ndash;{}<br>", upper)),
                None => html.push('+'),
            }
        }
        html
    }

    /// Plain-text rows, `"<color> <label>"`
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{} {}", e.color, e.label))
            .collect()
    }
}

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
