//! Service context bundling all port trait objects.

use std::path::{Path, PathBuf};

use crate::adapters::live::clock::LiveClock;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::llm::LiveLlmClient;
use crate::adapters::recording::{RecordingClock, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingClock, ReplayingLlmClient};
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::LlmClient;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
/// The filesystem is always live: source trees and generated projects are
/// fixtures on disk, not recorded interactions.
pub struct ServiceContext {
    /// Clock for run ids.
    pub clock: Box<dyn Clock>,
    /// Filesystem for reading sources and writing the project.
    pub fs: Box<dyn FileSystem>,
    /// LLM client behind the collaborators.
    pub llm: Box<dyn LlmClient>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            llm: Box::new(LiveLlmClient::new()),
        }
    }

    /// Creates a recording context plus the session that owns its cassettes.
    ///
    /// Drop the context before calling [`RecordingSession::finish`] so the
    /// adapters release their recorders.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory cannot be created.
    pub fn recording_at(root: &Path) -> Result<(Self, RecordingSession), String> {
        let session = RecordingSession::new(root)?;
        let ctx = Self {
            clock: Box::new(RecordingClock::new(Box::new(LiveClock), session.clock.clone())),
            fs: Box::new(LiveFileSystem),
            llm: Box::new(RecordingLlmClient::new(
                Box::new(LiveLlmClient::new()),
                session.llm.clone(),
            )),
        };
        Ok((ctx, session))
    }

    /// Creates a replaying context from one or more cassette files.
    ///
    /// Interactions from all files are merged; each port then gets its own
    /// replayer, so per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if any cassette file cannot be read or parsed.
    pub fn replaying(paths: &[PathBuf]) -> Result<Self, String> {
        let mut merged: Option<Cassette> = None;
        for path in paths {
            let cassette = Cassette::load(path)?;
            match merged.as_mut() {
                Some(all) => all.interactions.extend(cassette.interactions),
                None => merged = Some(cassette),
            }
        }
        let cassette = merged.ok_or_else(|| "No cassette files given for replay".to_string())?;

        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(LiveFileSystem),
            llm: Box::new(ReplayingLlmClient::new(CassetteReplayer::new(&cassette))),
        })
    }
}
