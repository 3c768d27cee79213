//! Domain error types.

/// A strategy or signal grammar error, tagged with the offending line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error on line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    /// 1-based line number within the strategy source, 0 when parsed standalone.
    pub line: usize,
    pub content: String,
}

impl ParseError {
    pub fn new(message: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: 0,
            content: content.into(),
        }
    }

    /// Re-anchor an error raised on a fragment onto the full source line.
    pub fn at_line(mut self, line: usize, content: &str) -> Self {
        self.line = line;
        self.content = content.to_string();
        self
    }

    /// Format the error with the offending line shown above the message.
    pub fn display_with_context(&self) -> String {
        format!("{}\n  | {}", self, self.content)
    }
}

/// Top-level error type for pricebook.
#[derive(Debug, thiserror::Error)]
pub enum PricebookError {
    #[error("csv error for {ticker}: {reason}")]
    Csv { ticker: String, reason: String },

    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    #[error("invalid date '{value}' (expected format {format})")]
    InvalidDate { value: String, format: String },

    #[error(transparent)]
    StrategyParse(#[from] ParseError),

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

impl From<&PricebookError> for std::process::ExitCode {
    fn from(err: &PricebookError) -> Self {
        let code: u8 = match err {
            PricebookError::Io(_) => 1,
            PricebookError::ConfigParse { .. } | PricebookError::ConfigInvalid { .. } => 2,
            PricebookError::Csv { .. }
            | PricebookError::MalformedRow { .. }
            | PricebookError::InvalidDate { .. } => 3,
            PricebookError::StrategyParse(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}
