//! Shared building blocks: nalgebra aliases, frame timing, seeded random
//! draws and logger setup

pub mod math;
pub mod time;
pub mod random;
pub mod logging;
