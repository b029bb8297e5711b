//! Coloured character map of a diagram for terminal output

use crate::diagram::{PourbaixDiagram, RenderMode};
use crate::view::{DiagramView, NO_PRECIPITATION_RGB, PRECIPITATION_RGB, phase_color};
use colored::{Color, Colorize};

const PRECIPITATION_GLYPH: char = '#';
const NO_PRECIPITATION_GLYPH: char = '.';
const WATER_GLYPH: char = '~';

#[derive(Debug, Clone)]
pub struct TerminalView {
    pub width: usize,
    pub height: usize,
}

impl Default for TerminalView {
    fn default() -> Self {
        Self {
            width: 70,
            height: 28,
        }
    }
}

impl TerminalView {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(2),
            height: height.max(2),
        }
    }

    /// Grid index for character position `pos` of `chars`
    fn sample_index(pos: usize, chars: usize, samples: usize) -> usize {
        ((pos as f64 / (chars - 1) as f64) * (samples - 1) as f64).round() as usize
    }

    fn cell(&self, diagram: &PourbaixDiagram, row: usize, col: usize) -> (char, [u8; 3]) {
        let classification = &diagram.classification;
        match diagram.options.render_mode {
            RenderMode::PrecipitationOnly => {
                if classification.precipitation_mask[[row, col]] {
                    (PRECIPITATION_GLYPH, PRECIPITATION_RGB)
                } else {
                    (NO_PRECIPITATION_GLYPH, NO_PRECIPITATION_RGB)
                }
            }
            RenderMode::PhaseColors => {
                let index = classification.phase_map[[row, col]];
                (classification.species[index].glyph(), phase_color(index))
            }
        }
    }

    /// True when a water line passes through this character cell
    fn on_water_line(&self, diagram: &PourbaixDiagram, ph: f64, ty: usize) -> bool {
        let spec = &diagram.grid.spec;
        let half_step = (spec.e_max_v - spec.e_min_v) / (self.height - 1) as f64 / 2.0;
        let e = spec.e_max_v - ty as f64 * 2.0 * half_step;
        let lines = &diagram.water_lines;
        (lines.oxygen_potential(ph) - e).abs() <= half_step
            || (lines.hydrogen_potential(ph) - e).abs() <= half_step
    }

    fn legend(&self, diagram: &PourbaixDiagram) -> Vec<String> {
        let mut lines = Vec::new();
        match diagram.options.render_mode {
            RenderMode::PrecipitationOnly => {
                let entries = diagram.legend();
                let glyphs = [
                    (PRECIPITATION_GLYPH, PRECIPITATION_RGB),
                    (NO_PRECIPITATION_GLYPH, NO_PRECIPITATION_RGB),
                ];
                for ((glyph, rgb), entry) in glyphs.iter().zip(entries) {
                    lines.push(format!("  {} {}", paint(*glyph, *rgb), entry));
                }
            }
            RenderMode::PhaseColors => {
                for (index, species) in diagram.species().iter().enumerate() {
                    lines.push(format!("  {} {}", paint(species.glyph(), phase_color(index)), species));
                }
            }
        }
        lines.push(format!("  {} water stability limits", WATER_GLYPH));
        for label in diagram.labels() {
            lines.push(format!(
                "  {} centred near pH {:.1}, E {:.2} V",
                label.species, label.ph, label.e_v
            ));
        }
        lines
    }
}

fn paint(glyph: char, rgb: [u8; 3]) -> String {
    glyph
        .to_string()
        .color(Color::TrueColor {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
        })
        .to_string()
}

impl DiagramView for TerminalView {
    type Output = String;

    fn name(&self) -> &str {
        "Terminal"
    }

    fn render(&self, diagram: &PourbaixDiagram) -> String {
        let (rows, cols) = diagram.grid.shape();
        let mut out = String::new();
        out.push_str(&diagram.title());
        out.push('\n');

        // top line is the highest potential
        for ty in 0..self.height {
            let row = Self::sample_index(self.height - 1 - ty, self.height, rows);
            for tx in 0..self.width {
                let col = Self::sample_index(tx, self.width, cols);
                let ph = diagram.grid.ph_axis[col];
                if self.on_water_line(diagram, ph, ty) {
                    out.push(WATER_GLYPH);
                } else {
                    let (glyph, rgb) = self.cell(diagram, row, col);
                    out.push_str(&paint(glyph, rgb));
                }
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "pH {} .. {}, E {} .. {} V\n",
            diagram.grid.spec.ph_min,
            diagram.grid.spec.ph_max,
            diagram.grid.spec.e_min_v,
            diagram.grid.spec.e_max_v
        ));
        for line in self.legend(diagram) {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}
