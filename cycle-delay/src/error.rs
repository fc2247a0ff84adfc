use crate::backend::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DelayError {
    #[error("Unknown delay backend (expected `native` or `barrier`)")]
    UnknownBackend,
    #[error("Delay backend `{0}` is not available on this target")]
    Unsupported(Backend),
}
