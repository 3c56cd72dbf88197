use crate::{errors::CoreBuildError, model::Value};

/// Resultado abstracto de aplicar una etapa.
pub enum StageRunResult {
    Success { output: Value },
    Failure { error: CoreBuildError },
}
