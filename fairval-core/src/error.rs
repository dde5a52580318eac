//! Top-level error for the full analysis pipeline.

use thiserror::Error;

use crate::config::ConfigError;
use crate::domain::BarError;
use crate::valuation::ValuationError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid price bar: {0}")]
    InvalidBar(#[from] BarError),
    #[error("insufficient valuation inputs: no method could be applied")]
    InsufficientInputs,
    #[error("invalid valuation input: {0}")]
    InvalidInput(String),
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl From<ValuationError> for EngineError {
    fn from(err: ValuationError) -> Self {
        match err {
            ValuationError::InsufficientInputs => EngineError::InsufficientInputs,
            ValuationError::InvalidPrice(_) => EngineError::InvalidInput(err.to_string()),
            ValuationError::Config(e) => EngineError::Configuration(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valuation_errors_map_onto_engine_errors() {
        assert_eq!(
            EngineError::from(ValuationError::InsufficientInputs),
            EngineError::InsufficientInputs
        );
        let config = ConfigError::invalid("x", "bad");
        assert_eq!(
            EngineError::from(ValuationError::Config(config.clone())),
            EngineError::Configuration(config)
        );
        assert!(matches!(
            EngineError::from(ValuationError::InvalidPrice(-1.0)),
            EngineError::InvalidInput(_)
        ));
    }

    #[test]
    fn bar_errors_convert() {
        let err: EngineError = BarError::EmptySeries.into();
        assert!(err.to_string().starts_with("invalid price bar"));
    }
}
