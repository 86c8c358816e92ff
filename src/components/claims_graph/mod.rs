mod component;
mod forces;
mod legend;
mod render;
mod render_loop;
pub mod scale;
mod simulation;
mod state;
mod tooltip;

pub use component::ClaimsGraphCanvas;
pub use legend::GraphLegend;
