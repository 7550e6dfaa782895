//! Error types for generation and pipeline runs.

use std::path::PathBuf;

use thiserror::Error;

use crate::pipeline::{Stage, StateField};
use crate::ports::PortError;

/// A failure while writing the generated project.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A filesystem operation failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// Path being written or created.
        path: PathBuf,
        /// Underlying port error.
        #[source]
        source: PortError,
    },
    /// A plan name would place output outside its parent directory.
    #[error("refusing to write outside the project: {path}")]
    UnsafePath {
        /// The offending name as given in the plan.
        path: String,
    },
    /// An app would share its directory with the project settings package.
    #[error("app '{name}' collides with the project settings package")]
    NameCollision {
        /// The app and package name.
        name: String,
    },
}

/// A fatal pipeline failure. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input root does not exist.
    #[error("input directory not found: {}", path.display())]
    MissingInput {
        /// Input root as given.
        path: PathBuf,
    },
    /// A stage ran without a field it requires.
    #[error("stage '{stage}' requires '{field}', which is not set")]
    PreconditionViolation {
        /// Stage that was about to run.
        stage: Stage,
        /// Missing state field.
        field: StateField,
    },
    /// An external collaborator call failed.
    #[error("stage '{stage}': collaborator call failed: {message}")]
    CollaboratorFailure {
        /// Stage that made the call.
        stage: Stage,
        /// Error reported by the collaborator.
        message: String,
    },
    /// Writing output failed.
    #[error("stage '{stage}': {source}")]
    FileSystem {
        /// Stage that was writing.
        stage: Stage,
        /// Underlying generation error.
        #[source]
        source: GenerateError,
    },
}
