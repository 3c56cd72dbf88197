//! Capability port: utilidad externa de registro de invocaciones.
//!
//! El core no detecta globals; la capacidad se inyecta como estrategia
//! anulable en la configuración. Si está presente, el wrap corre antes de la
//! intercepción (el valor crudo pasa por la utilidad y su retorno reemplaza
//! al valor en curso por el resto del pipeline).

use std::rc::Rc;

use serde_json::json;

use crate::model::Value;

use super::{StageContext, StageDefinition, StageKind, StageRunResult};

/// Contrato único que el core necesita de la utilidad de mocking.
pub trait CallRecorder {
    fn wrap(&self, value: Value) -> Value;
}

pub struct RecorderStage {
    recorder: Rc<dyn CallRecorder>,
}

impl RecorderStage {
    pub fn new(recorder: Rc<dyn CallRecorder>) -> Self {
        Self { recorder }
    }
}

impl StageDefinition for RecorderStage {
    fn id(&self) -> &str {
        "recorder"
    }

    fn kind(&self) -> StageKind {
        StageKind::Decorator
    }

    fn base_params(&self) -> serde_json::Value {
        json!({})
    }

    fn apply(&self, ctx: &StageContext) -> StageRunResult {
        StageRunResult::Success { output: self.recorder.wrap(ctx.input.clone()) }
    }
}
