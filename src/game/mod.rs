//! Game Simulation Module
//!
//! Everything that decides where the player is and what it looks like,
//! independent of the window:
//! - Player: position, velocity, jump bookkeeping and animation
//! - Collision: mask-refined overlap tests and axis-separated resolution
//! - Camera: horizontal scroll offset
//! - Runtime: the fixed-timestep loop tying them together
//!
//! Rendering and input live outside this module and talk to it through
//! `GameState`, `FrameInput` and the event queue.

pub mod animation;
pub mod camera;
pub mod collision;
pub mod event;
pub mod player;
pub mod runtime;

pub use animation::AnimationState;
pub use event::GameEvent;
pub use runtime::{FrameClock, FrameInput, GameState};
