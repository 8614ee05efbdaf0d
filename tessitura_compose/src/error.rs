// Errors from building and composing timelines.

use tessitura_timeline::TimelineError;

#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    #[error(transparent)]
    Timeline(#[from] TimelineError),
    #[error("no {category} named {type_name:?} is registered")]
    UnknownBuilder { category: String, type_name: String },
    #[error("builder {type_name:?} is a {found}, not a {expected}")]
    WrongCategory {
        type_name: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("parameter {name:?} {reason}")]
    InvalidParameter { name: String, reason: String },
    #[error("chord pool {type_name:?} produced no chords")]
    EmptyChordPool { type_name: String },
    #[error("error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("error parsing config: {0}")]
    Json(#[from] serde_json::Error),
}

impl ComposeError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        ComposeError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
