use reqwest::StatusCode;

/// Why a single request to the gradebook service failed.
#[derive(Debug, thiserror::Error)]
pub enum RequestFailure {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service answered {0}")]
    Status(StatusCode),

    #[error("malformed listing: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GradebookError {
    #[error("failed to fetch subjects: {0}")]
    Fetch(#[source] RequestFailure),

    #[error("failed to add subject {subject}: {source}")]
    Add {
        subject: String,
        #[source]
        source: RequestFailure,
    },

    #[error("failed to update grade for {subject}: {source}")]
    Update {
        subject: String,
        #[source]
        source: RequestFailure,
    },

    #[error("failed to delete subject {subject}: {source}")]
    Delete {
        subject: String,
        #[source]
        source: RequestFailure,
    },

    #[error("invalid grade {0:?}")]
    Validation(String),
}

impl GradebookError {
    /// The one-line message shown to the user in place of any earlier one.
    pub fn advisory(&self) -> &'static str {
        match self {
            GradebookError::Fetch(_) => "Error fetching subjects",
            GradebookError::Add { .. } => "Error adding subject",
            GradebookError::Update { .. } => "Error updating grade",
            GradebookError::Delete { .. } => "Error deleting subject",
            GradebookError::Validation(_) => "Please enter a valid grade",
        }
    }
}
