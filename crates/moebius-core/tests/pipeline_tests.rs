use std::rc::Rc;

use moebius_core::{BuildEventKind, CoreBuildError, Key, MoebiusBuilder, StageContext, StageDefinition,
                   StageKind, StageRunResult, Value};
use serde_json::json;

/// Decoradora de prueba: marca el nodo en curso con una clave fija.
struct TagStage;

impl StageDefinition for TagStage {
    fn id(&self) -> &str { "tag" }
    fn kind(&self) -> StageKind { StageKind::Decorator }
    fn base_params(&self) -> serde_json::Value { json!({}) }
    fn apply(&self, ctx: &StageContext) -> StageRunResult {
        match &ctx.input {
            Value::Node(node) => {
                node.set(Key::data("tag"), Value::Data(json!("marked")));
                StageRunResult::Success { output: ctx.input.clone() }
            }
            other => StageRunResult::Failure { error: CoreBuildError::StageFailed { stage_id: "tag".into(),
                                                                                    message: format!("needs a node, got {}", other.kind_name()) } },
        }
    }
}

/// Etapa que siempre falla (pipelines mal configurados).
struct FailStage;

impl StageDefinition for FailStage {
    fn id(&self) -> &str { "boom" }
    fn kind(&self) -> StageKind { StageKind::Decorator }
    fn base_params(&self) -> serde_json::Value { json!({}) }
    fn apply(&self, _ctx: &StageContext) -> StageRunResult {
        StageRunResult::Failure { error: CoreBuildError::StageFailed { stage_id: "boom".into(),
                                                                       message: "configured to fail".into() } }
    }
}

#[test]
fn empty_pipeline_passes_the_seed_through() {
    let builder = MoebiusBuilder::new();
    let value = builder.build().expect("empty build");
    assert!(value.is_null(), "no stages means the null seed comes back");
    assert_eq!(builder.event_variants(), vec!["B", "C"]);
}

#[test]
fn stage_failure_propagates_unchanged() {
    let builder = MoebiusBuilder::with_defaults();
    builder.push_stage(Rc::new(FailStage));

    let err = builder.build().expect_err("the failing stage aborts the build");
    assert_eq!(err,
               CoreBuildError::StageFailed { stage_id: "boom".into(),
                                             message: "configured to fail".into() });
    // apertura, tres etapas núcleo y el fallo; sin evento de cierre
    assert_eq!(builder.event_variants(), vec!["B", "S", "S", "S", "X"]);
}

#[test]
fn lazy_read_failure_propagates_to_the_accessor() {
    let builder = MoebiusBuilder::with_defaults();
    let node = builder.build().expect("build").as_node().cloned().expect("node");

    // mutar el pipeline después del build: los builds perezosos corren
    // contra la lista vigente
    builder.push_stage(Rc::new(FailStage));

    let err = node.get(&Key::data("anything")).expect_err("nested build fails");
    assert!(matches!(err, CoreBuildError::StageFailed { ref stage_id, .. } if stage_id == "boom"));

    // el fallo no deja valor parcial memoizado
    assert_eq!(node.keys().len(), 2, "only then/calls from the finalizer are stored");
}

#[test]
fn mutation_between_builds_affects_only_later_builds() {
    let builder = MoebiusBuilder::with_defaults();
    let first = builder.build().expect("first build").as_node().cloned().expect("node");

    builder.push_stage(Rc::new(TagStage));
    let second = builder.build().expect("second build").as_node().cloned().expect("node");

    assert_eq!(second.get(&Key::data("tag")).expect("tag"), Value::Data(json!("marked")));
    assert!(!first.keys().contains(&Key::data("tag")),
            "the first value was built before the stage existed");
}

#[test]
fn prepended_stages_run_ahead_of_the_other_decorators() {
    let builder = MoebiusBuilder::with_defaults();
    builder.prepend_stage(Rc::new(TagStage));
    assert_eq!(builder.stage_ids(), vec!["self_callable", "tag", "intercept", "finalize"]);
}

#[test]
fn nested_builds_emit_their_own_trail() {
    let builder = MoebiusBuilder::with_defaults();
    let node = builder.build().expect("build").as_node().cloned().expect("node");
    assert_eq!(builder.events().len(), 5);

    let _ = node.get(&Key::data("branch")).expect("lazy read");
    let events = builder.events();
    assert_eq!(events.len(), 10, "a lazy read runs one full nested build");
    assert_ne!(events[0].build_id, events[5].build_id, "nested builds carry their own id");
    assert_eq!(builder.events_for(events[5].build_id).len(), 5);

    // la segunda lectura de la misma clave no construye nada
    let _ = node.get(&Key::data("branch")).expect("memoized read");
    assert_eq!(builder.events().len(), 10);
}

#[test]
fn build_fingerprint_closes_every_successful_trail() {
    let builder = MoebiusBuilder::with_defaults();
    builder.build().expect("build");
    let closing = builder.events().pop().expect("events");
    assert!(matches!(closing.kind, BuildEventKind::BuildCompleted { .. }));
}
