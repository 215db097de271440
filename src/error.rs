//! Errors reported by frame sinks

/// A renderer or audio sink could not accept output
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SinkError {
    #[error("{0} disconnected")]
    Disconnected(&'static str),

    #[error("{sink} failed: {reason}")]
    Failed { sink: &'static str, reason: String },
}
