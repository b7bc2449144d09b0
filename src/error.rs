use thiserror::Error;

/// Rejections raised while applying a player command. The engine absorbs
/// both kinds as no-ops; they never escape a tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FarmError {
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("insufficient funds: need {needed} coins, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
}

impl FarmError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        FarmError::InvalidAction(reason.into())
    }
}

/// Malformed crop tables. Only raised while building a catalog at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("crop catalog must define at least one crop")]
    Empty,
    #[error("crop id '{0}' defined more than once")]
    DuplicateId(String),
    #[error("unknown crop id '{0}'")]
    UnknownCrop(String),
    #[error("crop '{id}' has invalid grow time {grow_time_secs}")]
    InvalidGrowTime { id: String, grow_time_secs: f64 },
}
