//! Motor de construcción del valor stand-in.
//!
//! Responsable de sostener las dos secuencias ordenadas de etapas
//! (productoras + decoradoras), reducirlas determinísticamente sobre la
//! semilla `Null` y emitir la traza de eventos de cada build, incluidos los
//! builds anidados que disparan las lecturas perezosas.
//!
//! El builder es un handle compartido: el `Rebuild` que reciben las etapas
//! captura este mismo handle, de modo que un build perezoso posterior corre
//! contra las listas de etapas vigentes en ese momento (mutar las listas
//! entre builds afecta sólo a los builds siguientes).

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{json, Value as JsonValue};
use uuid::Uuid;

use crate::constants::PIPELINE_VERSION;
use crate::errors::CoreBuildError;
use crate::event::{BuildEvent, BuildEventKind, EventStore, InMemoryEventStore};
use crate::hashing::hash_value;
use crate::model::Value;
use crate::stage::{CallRecorder, FinalizeStage, InterceptStage, Rebuild, RecorderStage, SelfCallableStage,
                   StageContext, StageDefinition, StageRunResult};

pub struct MoebiusBuilder<E: EventStore = InMemoryEventStore> {
    core: Rc<BuilderCore<E>>,
}

struct BuilderCore<E: EventStore> {
    initial_stages: RefCell<Vec<Rc<dyn StageDefinition>>>,
    pipeline_stages: RefCell<Vec<Rc<dyn StageDefinition>>>,
    events: RefCell<E>,
}

impl<E: EventStore> Clone for MoebiusBuilder<E> {
    fn clone(&self) -> Self {
        Self { core: Rc::clone(&self.core) }
    }
}

impl MoebiusBuilder<InMemoryEventStore> {
    /// Crea un builder vacío con store de eventos en memoria.
    pub fn new() -> Self {
        Self::new_with_store(InMemoryEventStore::default())
    }

    /// Builder listo para usar: etapas núcleo instaladas en orden.
    pub fn with_defaults() -> Self {
        let builder = Self::new();
        builder.install_core_stages();
        builder
    }
}

impl Default for MoebiusBuilder<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventStore + 'static> MoebiusBuilder<E> {
    /// Crea un builder vacío con el store de eventos provisto.
    pub fn new_with_store(store: E) -> Self {
        Self { core: Rc::new(BuilderCore { initial_stages: RefCell::new(Vec::new()),
                                           pipeline_stages: RefCell::new(Vec::new()),
                                           events: RefCell::new(store) }) }
    }

    /// Instala las etapas núcleo: productora invocable, intercepción
    /// perezosa y finalizador de coerciones, en ese orden.
    pub fn install_core_stages(&self) {
        self.push_initial(Rc::new(SelfCallableStage::new()));
        self.push_stage(Rc::new(InterceptStage::new()));
        self.push_stage(Rc::new(FinalizeStage::new()));
    }

    /// Inyecta la utilidad opcional de registro de invocaciones. El wrap
    /// queda por delante de las demás decoradoras (ve el valor crudo).
    pub fn install_call_recorder(&self, recorder: Rc<dyn CallRecorder>) {
        self.prepend_stage(Rc::new(RecorderStage::new(recorder)));
    }

    pub fn push_initial(&self, stage: Rc<dyn StageDefinition>) {
        self.core.initial_stages.borrow_mut().push(stage);
    }

    pub fn prepend_initial(&self, stage: Rc<dyn StageDefinition>) {
        self.core.initial_stages.borrow_mut().insert(0, stage);
    }

    pub fn push_stage(&self, stage: Rc<dyn StageDefinition>) {
        self.core.pipeline_stages.borrow_mut().push(stage);
    }

    pub fn prepend_stage(&self, stage: Rc<dyn StageDefinition>) {
        self.core.pipeline_stages.borrow_mut().insert(0, stage);
    }

    /// Ids de todas las etapas en orden de aplicación.
    pub fn stage_ids(&self) -> Vec<String> {
        self.snapshot().iter().map(|s| s.id().to_string()).collect()
    }

    /// Hash de la definición vigente: ids + params base en orden.
    pub fn definition_hash(&self) -> String {
        let specs: Vec<JsonValue> = self.snapshot()
                                        .iter()
                                        .map(|s| json!({ "id": s.id(), "params": s.base_params() }))
                                        .collect();
        hash_value(&json!(specs))
    }

    /// Reduce las etapas en orden de índice sobre la semilla `Null` y
    /// devuelve el valor final. Un pipeline vacío devuelve la semilla.
    ///
    /// Cada invocación produce un valor fresco con memoización propia; el
    /// fallo de una etapa se propaga sin recuperación local.
    pub fn build(&self) -> Result<Value, CoreBuildError> {
        let build_id = Uuid::new_v4();
        let stages = self.snapshot();
        let definition_hash = self.definition_hash();

        self.append(build_id,
                    BuildEventKind::BuildStarted { definition_hash: definition_hash.clone(),
                                                   stage_count: stages.len() });

        let rebuild = self.rebuild_handle();
        let mut value = Value::Null;
        let mut applied: Vec<String> = Vec::with_capacity(stages.len());

        for (stage_index, stage) in stages.iter().enumerate() {
            let ctx = StageContext { input: value, rebuild: rebuild.clone() };
            match stage.apply(&ctx) {
                StageRunResult::Success { output } => {
                    self.append(build_id,
                                BuildEventKind::StageApplied { stage_index,
                                                               stage_id: stage.id().to_string() });
                    applied.push(stage.id().to_string());
                    value = output;
                }
                StageRunResult::Failure { error } => {
                    self.append(build_id,
                                BuildEventKind::StageFailed { stage_index,
                                                              stage_id: stage.id().to_string(),
                                                              error: error.clone() });
                    return Err(error);
                }
            }
        }

        let fingerprint = hash_value(&json!({
                              "pipeline_version": PIPELINE_VERSION,
                              "definition_hash": definition_hash,
                              "applied": applied,
                          }));
        self.append(build_id, BuildEventKind::BuildCompleted { build_fingerprint: fingerprint });

        Ok(value)
    }

    /// Lista todos los eventos emitidos hasta ahora (builds anidados
    /// incluidos, en orden de append).
    pub fn events(&self) -> Vec<BuildEvent> {
        self.core.events.borrow().list_all()
    }

    /// Eventos de un build concreto.
    pub fn events_for(&self, build_id: Uuid) -> Vec<BuildEvent> {
        self.core.events.borrow().list(build_id)
    }

    /// Variante compacta de la traza (una letra por evento).
    pub fn event_variants(&self) -> Vec<&'static str> {
        self.events()
            .iter()
            .map(|e| match e.kind {
                BuildEventKind::BuildStarted { .. } => "B",
                BuildEventKind::StageApplied { .. } => "S",
                BuildEventKind::StageFailed { .. } => "X",
                BuildEventKind::BuildCompleted { .. } => "C",
            })
            .collect()
    }

    // Copia superficial de las listas vigentes: el valor resultante refleja
    // exactamente la lista de etapas en el momento del build.
    fn snapshot(&self) -> Vec<Rc<dyn StageDefinition>> {
        let initial = self.core.initial_stages.borrow();
        let pipeline = self.core.pipeline_stages.borrow();
        initial.iter().chain(pipeline.iter()).cloned().collect()
    }

    fn rebuild_handle(&self) -> Rebuild {
        let builder = self.clone();
        Rc::new(move || builder.build())
    }

    fn append(&self, build_id: Uuid, kind: BuildEventKind) {
        let _ = self.core.events.borrow_mut().append_kind(build_id, kind);
    }
}

/// Punto de entrada sin argumentos: configuración por defecto, un build.
/// Cada llamada devuelve un valor nuevo con memoización independiente.
pub fn create() -> Result<Value, CoreBuildError> {
    MoebiusBuilder::with_defaults().build()
}
