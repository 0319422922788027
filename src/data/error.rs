use thiserror::Error;

/// The two failure classes an import can end in. Callers treat both the
/// same way: the import is abandoned and the current catalog is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input bytes or text could not be read as a spreadsheet or CSV.
    Decode,
    /// The shared-sheet URL could not be fetched.
    Network,
}

/// Failure of a whole import attempt. Row-level problems never end up here;
/// they are repaired during normalization.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("reading file: {0}")]
    Io(#[from] std::io::Error),

    #[error("decoding workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("workbook contains no worksheet")]
    NoSheet,

    #[error("decoding JSON rows: {0}")]
    Json(#[from] serde_json::Error),

    #[error("input is neither a spreadsheet nor UTF-8 text")]
    NotText,

    #[error("input contains no header row")]
    Empty,

    #[error("import stopped before producing a result")]
    Aborted,

    #[error("response is an HTML page, not CSV (is the sheet shared publicly?)")]
    NotCsv,

    #[error("invalid sheet URL '{0}'")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Status(reqwest::StatusCode),
}

impl ImportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImportError::InvalidUrl(_) | ImportError::Http(_) | ImportError::Status(_) => {
                ErrorKind::Network
            }
            _ => ErrorKind::Decode,
        }
    }

    /// Short message suitable for the end user. The `Display` output carries
    /// the diagnostic and belongs in the log.
    pub fn user_message(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Decode => {
                "Failed to process file. Please ensure it has the correct format."
            }
            ErrorKind::Network => {
                "Failed to load the shared sheet. Check the link and your connection."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(ImportError::Empty.kind(), ErrorKind::Decode);
        assert_eq!(ImportError::NotCsv.kind(), ErrorKind::Decode);
        assert_eq!(ImportError::NoSheet.kind(), ErrorKind::Decode);
        assert_eq!(
            ImportError::Status(reqwest::StatusCode::NOT_FOUND).kind(),
            ErrorKind::Network
        );
        assert_eq!(
            ImportError::InvalidUrl("x".into()).kind(),
            ErrorKind::Network
        );
    }

    #[test]
    fn user_message_hides_diagnostics() {
        let err = ImportError::Status(reqwest::StatusCode::FORBIDDEN);
        assert!(err.to_string().contains("403"));
        assert!(!err.user_message().contains("403"));
    }
}
