use core::fmt;

/// Fatal engine errors.
///
/// All variants are unrecoverable at the point of detection: continuing would
/// corrupt pool or ledger invariants, so they must be surfaced to the host
/// rather than swallowed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecyclerError {
    /// The computed window (or the slot pool) exceeded `items_limit`.
    ///
    /// This almost always means the container is not actually scrollable, so
    /// the engine is being asked to render the entire collection at once.
    Configuration { rendered: usize, limit: usize },
    /// An item's key resolved to `None`.
    DataIntegrity { index: usize },
    /// A component requires dynamic per-item sizing but the required
    /// size-state is absent.
    MissingCapability(&'static str),
}

impl fmt::Display for RecyclerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration { rendered, limit } => write!(
                f,
                "rendered items limit reached ({rendered} > {limit}); the scroll container \
                 is probably missing a fixed extent or overflow, so it cannot scroll and \
                 tries to render every item at once"
            ),
            Self::DataIntegrity { index } => {
                write!(f, "key resolved to None on item at index {index}")
            }
            Self::MissingCapability(what) => write!(f, "missing capability: {what}"),
        }
    }
}

impl core::error::Error for RecyclerError {}
