pub mod bridge;
mod overlay_index;
mod overlays;
mod supervisor;

pub use overlay_index::*;
pub use overlays::*;
pub use supervisor::*;
