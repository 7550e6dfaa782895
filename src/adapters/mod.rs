//! Port adapters: live (real I/O), recording (live plus cassette capture),
//! and replaying (cassette only).

pub mod live;
pub mod recording;
pub mod replaying;
