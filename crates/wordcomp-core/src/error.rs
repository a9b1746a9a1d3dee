/// Errors that can occur while running a prompt.
///
/// Malformed key sequences and queries with no matches are not errors; they
/// are swallowed by the decoder and the suggestion engine.  The only failure
/// a caller sees is the terminal itself failing to read or write.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// An I/O error from the terminal device, including interruption by Ctrl+C.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PromptError {
    /// Whether the prompt was abandoned because the user pressed Ctrl+C.
    pub fn is_interrupted(&self) -> bool {
        match self {
            PromptError::Io(err) => err.kind() == std::io::ErrorKind::Interrupted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn io_errors_convert() {
        let err: PromptError = io::Error::new(io::ErrorKind::BrokenPipe, "gone").into();
        assert!(!err.is_interrupted());
        assert_eq!(err.to_string(), "IO error: gone");
    }

    #[test]
    fn interrupted_is_detected() {
        let err = PromptError::from(io::Error::new(io::ErrorKind::Interrupted, "ctrl+c"));
        assert!(err.is_interrupted());
    }
}
