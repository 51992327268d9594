//! Domain error types.

/// Top-level error type for gbce.
///
/// Sentinel outcomes (a zero-dividend P/E, an empty VWSP window, an index
/// with no priced stocks) are successful results and never appear here.
#[derive(Debug, thiserror::Error)]
pub enum GbceError {
    #[error("Stock '{symbol}' not found.")]
    StockNotFound { symbol: String },

    #[error("Price must be greater than zero, got {price}")]
    InvalidPrice { price: f64 },

    #[error("Invalid trade type: '{value}'. Must be 'buy' or 'sell'.")]
    InvalidTradeType { value: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&GbceError> for std::process::ExitCode {
    fn from(err: &GbceError) -> Self {
        let code: u8 = match err {
            GbceError::Io(_) => 1,
            GbceError::ConfigParse { .. } | GbceError::ConfigInvalid { .. } => 2,
            GbceError::StockNotFound { .. }
            | GbceError::InvalidPrice { .. }
            | GbceError::InvalidTradeType { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
