//! Etapa decoradora: intercepción perezosa de propiedades.
//!
//! Marca el nodo en curso como interceptado e instala el handle de rebuild:
//! desde aquí toda lectura de una clave de datos ausente materializa un
//! build completo y lo memoiza bajo esa clave (ver `Node::get`). Las claves
//! meta quedan exentas del mecanismo.
//!
//! Un input que no es nodo es un fallo de etapa: no hay nada que
//! interceptar en un escalar.

use serde_json::json;

use crate::errors::CoreBuildError;
use crate::model::Value;

use super::{StageContext, StageDefinition, StageKind, StageRunResult};

#[derive(Debug, Default)]
pub struct InterceptStage;

impl InterceptStage {
    pub fn new() -> Self {
        Self
    }
}

impl StageDefinition for InterceptStage {
    fn id(&self) -> &str {
        "intercept"
    }

    fn kind(&self) -> StageKind {
        StageKind::Decorator
    }

    fn base_params(&self) -> serde_json::Value {
        json!({})
    }

    fn apply(&self, ctx: &StageContext) -> StageRunResult {
        match &ctx.input {
            Value::Node(node) => {
                node.enable_intercept(ctx.rebuild.clone());
                StageRunResult::Success { output: ctx.input.clone() }
            }
            other => StageRunResult::Failure { error: CoreBuildError::StageFailed { stage_id: self.id().to_string(),
                                                                                    message: format!("cannot intercept {} input", other.kind_name()) } },
        }
    }
}
