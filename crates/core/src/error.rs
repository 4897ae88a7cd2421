use thiserror::Error;

use crate::assembly::AssemblyError;
use crate::ingest::IngestError;
use crate::model::{QuestionError, SessionResultError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error(transparent)]
    Assembly(#[from] AssemblyError),
    #[error(transparent)]
    SessionResult(#[from] SessionResultError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_module_errors_transparently() {
        let err = Error::from(IngestError::PoolEmpty);
        assert!(matches!(err, Error::Ingest(IngestError::PoolEmpty)));
        assert_eq!(err.to_string(), "no valid questions were loaded");

        let err = Error::from(AssemblyError::Incomplete { empty: 2 });
        assert_eq!(err.to_string(), AssemblyError::Incomplete { empty: 2 }.to_string());
    }
}
