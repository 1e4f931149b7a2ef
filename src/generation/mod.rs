//! Test signal generation.
//!
//! Only the linear chirp is provided; see [`chirp`].

pub mod chirp;

pub use chirp::{synthesize, time_axis};
