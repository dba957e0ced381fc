use crate::{Edge, Scope};

/// Rejected descriptor parameters.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum DescriptorError {
    #[error("animation duration must be finite and positive (got {0} s)")]
    InvalidDuration(f32),
    #[error("{edge:?} slides are not available in {scope:?} scope")]
    UnsupportedEdge { scope: Scope, edge: Edge },
    #[error("table-scope animations run as a single item and cannot be staggered")]
    StaggerInTableScope,
}

/// Why a batch was not started.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum FlipError {
    #[error("another animation batch is still in flight")]
    Busy,
    #[error(transparent)]
    Descriptor(#[from] DescriptorError),
}
