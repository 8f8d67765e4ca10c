/// Broad category of an [`AppError`].
///
/// Front-ends match on the kind to decide how to surface a failure; the
/// message is always shown verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested month is not one of the enumerated report months.
    NotFound,
    /// The month's data file is missing or malformed.
    DataUnavailable,
    /// The PDF document could not be assembled.
    PdfGeneration,
    /// Terminal setup, drawing or event I/O failed.
    Terminal,
    /// Bad CLI input or a filesystem failure outside the data files.
    Usage,
}

impl ErrorKind {
    fn exit_code(self) -> u8 {
        match self {
            ErrorKind::NotFound | ErrorKind::Usage => 2,
            ErrorKind::DataUnavailable => 3,
            ErrorKind::PdfGeneration => 4,
            ErrorKind::Terminal => 5,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.exit_code(),
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DataUnavailable, message)
    }

    pub fn pdf(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PdfGeneration, message)
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Terminal, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_follow_kind() {
        assert_eq!(AppError::not_found("x").exit_code(), 2);
        assert_eq!(AppError::data_unavailable("x").exit_code(), 3);
        assert_eq!(AppError::pdf("x").exit_code(), 4);
        assert_eq!(AppError::terminal("x").exit_code(), 5);
        assert_eq!(AppError::usage("x").kind(), ErrorKind::Usage);
    }
}
