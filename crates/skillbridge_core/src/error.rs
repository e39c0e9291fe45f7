use thiserror::Error;

use crate::model::TaskId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("task {task_id}: malformed required_skills: {source}")]
    MalformedSkills {
        task_id: TaskId,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown task status: {0}")]
    UnknownTaskStatus(String),

    #[error("unknown application status: {0}")]
    UnknownApplicationStatus(String),

    #[error("unknown user role: {0}")]
    UnknownRole(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
