//! Etapa productora: el valor base del pipeline es un nodo invocable.
//!
//! Corre como etapa inicial para que las decoradoras posteriores trabajen
//! sobre un invocable y el valor final sea a la vez invocable y accesible
//! por propiedades. Ignora su input: produce siempre un nodo fresco con el
//! handle de rebuild instalado.

use serde_json::json;

use crate::model::{Node, Value};

use super::{StageContext, StageDefinition, StageKind, StageRunResult};

#[derive(Debug, Default)]
pub struct SelfCallableStage;

impl SelfCallableStage {
    pub fn new() -> Self {
        Self
    }
}

impl StageDefinition for SelfCallableStage {
    fn id(&self) -> &str {
        "self_callable"
    }

    fn kind(&self) -> StageKind {
        StageKind::Producer
    }

    fn base_params(&self) -> serde_json::Value {
        json!({})
    }

    fn apply(&self, ctx: &StageContext) -> StageRunResult {
        let node = Node::new_callable(ctx.rebuild.clone());
        StageRunResult::Success { output: Value::Node(node) }
    }
}
