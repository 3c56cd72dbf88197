//! Etapa final: fija las formas escalares del valor y limpia las claves que
//! lo harían pasar por thenable o por mock con historial.
//!
//! Debe correr estrictamente después de la intercepción: escribe `then` y
//! `calls` por la ruta de escritura normal (quedan almacenadas como `Null`)
//! en lugar de dejar que la ruta de lectura las materialice como sub-valores
//! perezosos.

use serde_json::json;

use crate::constants::{CALLS_KEY, SENTINEL_NUMBER, SENTINEL_TEXT, THEN_KEY};
use crate::errors::CoreBuildError;
use crate::model::{Key, Value};

use super::{StageContext, StageDefinition, StageKind, StageRunResult};

#[derive(Debug)]
pub struct FinalizeStage {
    display: String,
    numeric: f64,
}

impl FinalizeStage {
    /// Finalizador con los centinelas por defecto.
    pub fn new() -> Self {
        Self { display: SENTINEL_TEXT.to_string(),
               numeric: SENTINEL_NUMBER }
    }

    /// Finalizador con centinelas propios (configuraciones a medida).
    pub fn with_sentinels(display: impl Into<String>, numeric: f64) -> Self {
        Self { display: display.into(), numeric }
    }
}

impl Default for FinalizeStage {
    fn default() -> Self {
        Self::new()
    }
}

impl StageDefinition for FinalizeStage {
    fn id(&self) -> &str {
        "finalize"
    }

    fn kind(&self) -> StageKind {
        StageKind::Decorator
    }

    fn base_params(&self) -> serde_json::Value {
        json!({ "display": self.display, "numeric": self.numeric })
    }

    fn apply(&self, ctx: &StageContext) -> StageRunResult {
        match &ctx.input {
            Value::Node(node) => {
                node.set_display_hint(self.display.clone());
                node.set_numeric_hint(self.numeric);
                node.set(Key::data(THEN_KEY), Value::Null);
                node.set(Key::data(CALLS_KEY), Value::Null);
                StageRunResult::Success { output: ctx.input.clone() }
            }
            other => StageRunResult::Failure { error: CoreBuildError::StageFailed { stage_id: self.id().to_string(),
                                                                                    message: format!("cannot finalize {} input", other.kind_name()) } },
        }
    }
}
