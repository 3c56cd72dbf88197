use serde_json::Value as JsonValue;

use super::context::StageContext;
use super::run_result::StageRunResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind { Producer, Decorator }

/// Trait que define una etapa del pipeline. Implementaciones deben ser puras
/// respecto a input + params (el handle `rebuild` del contexto es la única
/// vía de re-entrada permitida).
pub trait StageDefinition {
    /// Identificador estable y único dentro del pipeline.
    fn id(&self) -> &str;

    /// Nombre opcional amigable.
    fn name(&self) -> &str { self.id() }

    /// Parámetros base deterministas (entran en la definition_hash).
    fn base_params(&self) -> JsonValue;

    /// Aplicación de la etapa sobre el valor en curso.
    fn apply(&self, ctx: &StageContext) -> StageRunResult;

    /// Tipo general de la etapa.
    fn kind(&self) -> StageKind;
}
