//! Simulation entities and the per-tick world update.
//!
//! - [`World`] - Birds, pipe stream and ground advanced one tick at a time
//! - [`Bird`] - An agent falling under gravity that can flap
//! - [`PipePair`] - An obstacle with a drifting gap
//! - [`Ground`] - Cosmetic scrolling floor
//! - [`Observation`] / [`Action`] - What a controller sees and decides per tick
//! - [`Sprite`] / [`Surface`] - Boundary towards a rendering front end
//! - [`Seed`] - Seed for the deterministic pipe stream
//!
//! # Tick Order
//!
//! 1. Increment the score
//! 2. Move every pipe pair (vertical drift, then scroll)
//! 3. Spawn a new frontier once the birds have passed the current one, and
//!    drop the oldest pair once it leaves the window
//! 4. For every living bird: test bounds and collision against the frontier,
//!    record the score, apply gravity
//! 5. Recount survivors, scroll the ground

pub use self::{bird::*, ground::*, pipe_pair::*, seed::*, sensor::*, sprite::*, world::*};

mod bird;
mod ground;
mod pipe_pair;
mod seed;
mod sensor;
mod sprite;
mod world;
