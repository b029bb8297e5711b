//! In-memory raster of a diagram: one pixel per grid cell, origin lower-left.

use crate::diagram::{PourbaixDiagram, RenderMode};
use crate::math_utils::inverse_lerp;
use crate::view::{DiagramView, NO_PRECIPITATION_RGB, PRECIPITATION_RGB, phase_color};
use image::{ImageBuffer, Rgb, RgbImage};
use log::debug;

const PRECIPITATION_OVERLAY_ALPHA: f64 = 0.18;
const BOUNDARY_ALPHA: f64 = 0.6;
const WATER_LINE_ALPHA: f64 = 0.4;
const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];

#[derive(Debug, Clone)]
pub struct RasterView {
    /// Dash length of the water lines in pixels; 0 draws them solid
    pub water_line_dash_px: u32,
}

impl Default for RasterView {
    fn default() -> Self {
        Self {
            water_line_dash_px: 6,
        }
    }
}

impl RasterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dash(water_line_dash_px: u32) -> Self {
        Self { water_line_dash_px }
    }

    fn base_color(diagram: &PourbaixDiagram, row: usize, col: usize) -> Rgb<u8> {
        let classification = &diagram.classification;
        let precipitates = classification.precipitation_mask[[row, col]];
        match diagram.options.render_mode {
            RenderMode::PrecipitationOnly => {
                if precipitates {
                    Rgb(PRECIPITATION_RGB)
                } else {
                    Rgb(NO_PRECIPITATION_RGB)
                }
            }
            RenderMode::PhaseColors => {
                let color = Rgb(phase_color(classification.phase_map[[row, col]]));
                if precipitates {
                    blend(color, BLACK, PRECIPITATION_OVERLAY_ALPHA)
                } else {
                    color
                }
            }
        }
    }

    fn draw_boundaries(diagram: &PourbaixDiagram, image: &mut RgbImage) {
        let boundaries = &diagram.classification.boundaries;
        if boundaries.is_empty() {
            return;
        }
        let (rows, cols) = diagram.grid.shape();
        for row in 0..rows {
            for col in 0..cols {
                if boundaries.iter().any(|b| b.crosses_at(row, col)) {
                    let (x, y) = pixel_for(rows, row, col);
                    let pixel = *image.get_pixel(x, y);
                    image.put_pixel(x, y, blend(pixel, WHITE, BOUNDARY_ALPHA));
                }
            }
        }
    }

    fn draw_water_lines(&self, diagram: &PourbaixDiagram, image: &mut RgbImage) {
        let spec = &diagram.grid.spec;
        let (rows, _) = diagram.grid.shape();
        for (col, (_, upper, lower)) in diagram
            .water_lines
            .sample(&diagram.grid.ph_axis)
            .into_iter()
            .enumerate()
        {
            if self.water_line_dash_px > 0 && (col as u32 / self.water_line_dash_px) % 2 == 1 {
                continue;
            }
            for e in [upper, lower] {
                let ratio = inverse_lerp(spec.e_min_v, spec.e_max_v, e);
                if !(0.0..=1.0).contains(&ratio) {
                    continue;
                }
                let row = (ratio * (rows - 1) as f64).round() as usize;
                let (x, y) = pixel_for(rows, row, col);
                let pixel = *image.get_pixel(x, y);
                image.put_pixel(x, y, blend(pixel, BLACK, WATER_LINE_ALPHA));
            }
        }
    }
}

/// Grid row 0 is the lowest potential, drawn at the bottom of the image
fn pixel_for(rows: usize, row: usize, col: usize) -> (u32, u32) {
    (col as u32, (rows - 1 - row) as u32)
}

fn blend(base: Rgb<u8>, toward: [u8; 3], alpha: f64) -> Rgb<u8> {
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - alpha) + b as f64 * alpha).round() as u8;
    Rgb([
        mix(base[0], toward[0]),
        mix(base[1], toward[1]),
        mix(base[2], toward[2]),
    ])
}

impl DiagramView for RasterView {
    type Output = RgbImage;

    fn name(&self) -> &str {
        "Raster"
    }

    fn render(&self, diagram: &PourbaixDiagram) -> RgbImage {
        let (rows, cols) = diagram.grid.shape();
        let mut image: RgbImage = ImageBuffer::new(cols as u32, rows as u32);

        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = pixel_for(rows, row, col);
                image.put_pixel(x, y, Self::base_color(diagram, row, col));
            }
        }

        if diagram.options.show_boundaries {
            Self::draw_boundaries(diagram, &mut image);
        }
        self.draw_water_lines(diagram, &mut image);

        debug!(
            "{} view: {}x{} pixels, mode {}",
            self.name(),
            cols,
            rows,
            diagram.options.render_mode
        );
        image
    }
}
