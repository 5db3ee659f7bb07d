//! Error taxonomy for recording and execution.

use thiserror::Error;

use crate::target::TargetError;

#[derive(Debug, Error)]
pub enum GfxError {
    /// Attachment-set invariant violation; raised before any recording.
    #[error(transparent)]
    InvalidTargets(#[from] TargetError),

    /// The active backend lacks a requested feature. Fails the single
    /// offending call, never the whole pass.
    #[error("unsupported feature: {0}")]
    Unsupported(&'static str),

    /// The command arena refused to grow. The offending command is dropped;
    /// everything recorded before it stays intact.
    #[error("command arena exhausted (limit {limit} bytes)")]
    ArenaExhausted { limit: usize },

    #[error("transform stack underflow")]
    TransformStackUnderflow,

    /// A payload referenced an input of the wrong kind. Indicates recorder
    /// corruption; never expected from public API use.
    #[error("corrupt command stream")]
    CorruptCommandStream,

    #[error("framebuffer incomplete (status 0x{status:X})")]
    IncompleteFramebuffer { status: u32 },
}
