//! Errores específicos del core (taxonomía mínima: todo fallo es terminal).

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum CoreBuildError {
    #[error("stage '{stage_id}' failed: {message}")] StageFailed { stage_id: String, message: String },
    #[error("value is not callable")] NotCallable,
    #[error("internal: {0}")] Internal(String),
}
