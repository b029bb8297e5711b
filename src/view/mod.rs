// Presentation collaborators fed by a computed diagram
pub mod raster_view;
pub mod terminal_view;

// Re-export the views for easier access
pub use raster_view::RasterView;
pub use terminal_view::TerminalView;

use crate::diagram::PourbaixDiagram;

/// Colours shared by every view, indexed by species position
pub const PHASE_PALETTE: [[u8; 3]; 8] = [
    [0x94, 0xa3, 0xb8],
    [0x3b, 0x82, 0xf6],
    [0xfa, 0xcc, 0x15],
    [0x60, 0xa5, 0xfa],
    [0xf8, 0x71, 0x71],
    [0xa8, 0x55, 0xf7],
    [0x22, 0xc5, 0x5e],
    [0xfb, 0x92, 0x3c],
];
pub const PRECIPITATION_RGB: [u8; 3] = [0xef, 0x44, 0x44];
pub const NO_PRECIPITATION_RGB: [u8; 3] = [0x9c, 0xa3, 0xaf];

pub fn phase_color(index: usize) -> [u8; 3] {
    PHASE_PALETTE[index % PHASE_PALETTE.len()]
}

pub trait DiagramView {
    type Output;

    /// The name of this view (for identification and logging)
    fn name(&self) -> &str;

    /// Present a diagram; views never recompute chemistry
    fn render(&self, diagram: &PourbaixDiagram) -> Self::Output;
}
