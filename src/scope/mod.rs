//! The persistent render surface: one ratatui chart, cleared and redrawn
//! every cycle with tight autoscaled bounds.

mod chart;
mod surface;

pub use chart::ScopeFrame;
pub use surface::ScopeSurface;
