//! Level data
//!
//! A level is a static set of square terrain blocks plus the player's
//! starting point. Levels are built once at startup and never change.

mod layout;
mod io;

pub use layout::*;
pub use io::*;
