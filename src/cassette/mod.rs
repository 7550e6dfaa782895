//! Cassettes: recorded port interactions that make collaborator calls replayable.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;
