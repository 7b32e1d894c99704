//! Error taxonomy. Fatal setup errors propagate to `main` via `?` and
//! are printed as `Error: <msg>` before exiting 1. Recoverable per-event
//! errors are logged and the triggering event is dropped; they never
//! escape the handler that produced them.

use thiserror::Error;

/// Errors the display backend can report. `Connect`, `NoScreen` and
/// `InternAtom` are always fatal (startup only); `QueryGeometry` is
/// recoverable and is handled inline by the framing path.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("could not connect to display server")]
    Connect,
    #[error("no screen associated with display")]
    NoScreen,
    #[error("failed to intern atom `{0}`")]
    InternAtom(String),
    #[error("failed to query window geometry")]
    QueryGeometry,
}

/// Errors loading the configuration file. A missing file is not an
/// error (defaults apply); a present-but-malformed file is fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level fatal error, the only kind that ever reaches `main`.
#[derive(Debug, Error)]
pub enum WmError {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
