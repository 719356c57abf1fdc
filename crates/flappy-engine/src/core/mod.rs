pub use self::{mask::*, playfield::*};

pub(crate) mod mask;
pub(crate) mod playfield;
