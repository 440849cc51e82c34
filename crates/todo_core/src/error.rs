use thiserror::Error;

/// Every failure a command can surface to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("invalid_index - {}", invalid_index_message(*index, *len))]
    InvalidIndex { index: usize, len: usize },
    #[error("empty_input - task text is required")]
    EmptyInput,
    #[error("invalid_input - {0}")]
    InvalidInput(String),
    #[error("decode_error - {0}")]
    Decode(String),
    #[error("encode_error - {0}")]
    Encode(String),
    #[error("io_error - {0}")]
    Io(String),
}

fn invalid_index_message(index: usize, len: usize) -> String {
    match len {
        0 => format!("invalid index {index}: the list is empty"),
        _ => format!("invalid index {index}: expected 1..={len}"),
    }
}

impl AppError {
    pub fn invalid_index(index: usize, len: usize) -> Self {
        Self::InvalidIndex { index, len }
    }

    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn decode<M: Into<String>>(message: M) -> Self {
        Self::Decode(message.into())
    }

    pub fn encode<M: Into<String>>(message: M) -> Self {
        Self::Encode(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIndex { .. } => "invalid_index",
            Self::EmptyInput => "empty_input",
            Self::InvalidInput(_) => "invalid_input",
            Self::Decode(_) => "decode_error",
            Self::Encode(_) => "encode_error",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidIndex { index, len } => invalid_index_message(*index, *len),
            Self::EmptyInput => "task text is required".to_string(),
            Self::InvalidInput(message)
            | Self::Decode(message)
            | Self::Encode(message)
            | Self::Io(message) => message.clone(),
        }
    }
}
