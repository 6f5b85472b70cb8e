use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type CompileResult<T> = Result<T, CompileError>;

/// Errors that stop the compilation. Per-line problems are collected as
/// [`crate::ast::LineError`] first and only surface here as a count.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no main function defined")]
    NoMain,

    #[error("multiple main functions defined: [{}]", .0.join(", "))]
    MultipleMains(Vec<String>),

    #[error("{count} errors found")]
    Validation { count: usize },

    #[error("{location}: malformed function: {message}")]
    Malformed { location: String, message: String },

    #[error("unhandled instruction `{instruction}`: {reason}")]
    Unhandled { instruction: String, reason: String },

    #[error("unknown target `{0}`")]
    UnknownTarget(String),

    #[error("write {}: {source}", path.display())]
    WriteAssembly {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("{tool} failed ({status}): {output}")]
    Tool {
        tool: String,
        status: ExitStatus,
        output: String,
    },
}
