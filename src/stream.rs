// std imports
use std::{io::Read, sync::Arc};

// ---

/// Intent flags forwarded to a stream handler at open time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AccessMode {
    /// Open an existing resource for reading.
    #[default]
    Read,
    /// Open a resource for reading and writing, creating or truncating it.
    ReadWrite,
}

impl AccessMode {
    #[inline]
    pub fn is_writable(&self) -> bool {
        matches!(self, Self::ReadWrite)
    }
}

// ---

/// A cancellation hook passed through to stream handlers at open time.
///
/// Returns true when the pending operation should be abandoned.
/// The hook is opaque to this crate and is forwarded verbatim to inner
/// opens for handlers that natively support interruption.
pub type InterruptHook = Arc<dyn Fn() -> bool + Send + Sync>;

// ---

/// An open readable stream produced by a stream handler.
///
/// Closing is explicit because close outcomes are part of the contract
/// and cannot be reported from a drop.
pub trait Source: Read + Send {
    /// Releases the stream, reporting any failure to finalize it.
    fn close(self: Box<Self>) -> std::io::Result<()> {
        Ok(())
    }
}
