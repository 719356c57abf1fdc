//! Deterministic simulation of a side-scrolling obstacle game.
//!
//! - [`core`] - Playfield constants and pixel collision masks
//! - [`engine`] - Birds, pipe pairs, ground, the world tick and the sensing contract

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PlayfieldError {
    #[display("every sprite needs a non-zero width and height")]
    EmptySprite,
    #[display("window has no playable area above the ground")]
    EmptyWindow,
    #[display("maximum pipe drift must not be negative")]
    NegativeDrift,
    #[display("no room for a pipe gap: gap bottom range {lower}..={upper} is empty")]
    NoRoomForGap { lower: i32, upper: i32 },
    #[display("a world needs at least one bird")]
    NoBirds,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("seed must be 32 hexadecimal characters")]
pub struct InvalidSeedError;
