//! Sprite data independent of the GPU
//!
//! Frames are kept as CPU-side RGBA images so collision masks can be
//! derived from them and the simulation can run without a window.
//! The renderer uploads them to textures once at startup.

mod mask;
mod sheet;

pub use mask::Mask;
pub use sheet::*;
