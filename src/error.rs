/// What went wrong, at the granularity callers dispatch on.
///
/// Point-level problems (a bad time label, a null value) are never errors;
/// decoders skip those silently. Only structural failures surface here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// A structural precondition of a wire format was violated
    /// (missing `Tid` dimension, `data` not an array, ...).
    Format,
    /// The network request failed after retries were exhausted.
    Fetch,
    /// Decoding succeeded structurally but left zero points after filtering.
    Empty,
    /// Local I/O failure (reading a bundled data file).
    Io,
    /// The request itself was wrong (unknown chart id, bad arguments).
    Usage,
}

impl ErrorKind {
    fn label(self) -> &'static str {
        match self {
            ErrorKind::Format => "format",
            ErrorKind::Fetch => "fetch",
            ErrorKind::Empty => "empty",
            ErrorKind::Io => "io",
            ErrorKind::Usage => "usage",
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn format(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Format, message)
    }

    pub fn fetch(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Fetch, message)
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Empty, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, message)
    }

    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Process exit code for the binary.
    pub fn exit_code(&self) -> u8 {
        match self.kind {
            ErrorKind::Io | ErrorKind::Usage => 2,
            ErrorKind::Fetch => 3,
            ErrorKind::Format | ErrorKind::Empty => 4,
        }
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
            .field("kind", &self.kind.label())
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
