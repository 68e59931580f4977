use crate::game::Door;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("arrangement must hold exactly one prize, found {prizes}")]
    InvalidArrangement { prizes: usize },

    #[error("host cannot open the contestant's pick (door {door})")]
    RevealedPick { door: Door },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logger error: {0}")]
    Logging(#[from] flexi_logger::FlexiLoggerError),
}

pub type Result<T> = std::result::Result<T, SimError>;
