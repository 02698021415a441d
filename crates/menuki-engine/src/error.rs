use std::result::Result as StdResult;

use menuki_protocol::HostError;
use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the menuki engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Errors originating from the host adapter.
    #[error("Host adapter error: {0}")]
    Host(#[from] HostError),

    /// The diagnostic notice channel has been closed by the receiver.
    #[error("Notice channel closed")]
    ChannelClosed,
}
