use crate::{TemplateDraftError, WorkoutDraftError};

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum CreateError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

impl From<WorkoutDraftError> for CreateError {
    fn from(value: WorkoutDraftError) -> Self {
        CreateError::Validation(value.to_string())
    }
}

impl From<TemplateDraftError> for CreateError {
    fn from(value: TemplateDraftError) -> Self {
        CreateError::Validation(value.to_string())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum DeleteError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("no connection")]
    NoConnection,
    #[error("no session")]
    NoSession,
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_error_from_workout_draft_error() {
        assert!(matches!(
            CreateError::from(WorkoutDraftError::NoExercises),
            CreateError::Validation(message)
                if message == WorkoutDraftError::NoExercises.to_string()
        ));
    }

    #[test]
    fn test_storage_error_rejected_message() {
        assert_eq!(
            StorageError::Rejected("Email already registered".to_string()).to_string(),
            "Email already registered"
        );
    }

    #[test]
    fn test_read_error_from_storage_error() {
        assert!(matches!(
            ReadError::from(StorageError::NoSession),
            ReadError::Storage(StorageError::NoSession)
        ));
        assert!(matches!(
            ReadError::Other("foo".into()),
            ReadError::Other(error) if error.to_string() == "foo"
        ));
    }
}
