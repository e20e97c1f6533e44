use thiserror::Error;

/// Structurally invalid diagram input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("qubit count must be at least 1, got {0}")]
    QubitCountBelowOne(i64),
    #[error("repetition layer count must not be negative, got {0}")]
    NegativeRepetitionLayers(i64),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid layout input: {0}")]
    InvalidLayoutInput(#[from] InputError),
    #[error("rendering environment failure: {0}")]
    EnvironmentFailure(String),
}

impl RenderError {
    pub fn environment(message: impl Into<String>) -> Self {
        Self::EnvironmentFailure(message.into())
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidLayoutInput(_))
    }
}
