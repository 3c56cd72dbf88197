use std::rc::Rc;

use crate::errors::CoreBuildError;
use crate::model::Value;

/// Handle al pipeline completo. Las etapas núcleo lo instalan en los nodos
/// que producen; cada miss de clave y cada primera invocación lo ejecutan.
/// Siempre corre contra las listas de etapas vigentes en ese momento.
pub type Rebuild = Rc<dyn Fn() -> Result<Value, CoreBuildError>>;

/// Contexto de aplicación entregado a `StageDefinition::apply`.
pub struct StageContext {
    pub input: Value,    // valor en curso (Null para la primera etapa)
    pub rebuild: Rebuild, // re-entrada al pipeline (builds perezosos)
}
