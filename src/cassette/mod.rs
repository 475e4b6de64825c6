//! Cassette format for recording and replaying store traffic.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

pub use format::{Cassette, CassetteError, Interaction};
