//! Tipos de evento del build y estructura `BuildEvent`.
//!
//! Rol en el pipeline:
//! - Cada `build()` del `MoebiusBuilder` emite eventos a un `EventStore`
//!   append-only, incluidos los builds anidados que disparan los accesos
//!   perezosos a propiedades.
//! - El enum `BuildEventKind` define el contrato observable del pipeline.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreBuildError;

/// Tipos de eventos emitidos por un build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BuildEventKind {
    /// Apertura de un build: fija la `definition_hash` y la cantidad de
    /// etapas. Invariante: debe ser el primer evento de un `build_id`.
    BuildStarted { definition_hash: String, stage_count: usize },
    /// Una etapa se aplicó correctamente sobre el valor en curso.
    StageApplied { stage_index: usize, stage_id: String },
    /// Una etapa terminó con error terminal. El build no continúa
    /// (stop-on-failure).
    StageFailed {
        stage_index: usize,
        stage_id: String,
        error: CoreBuildError,
    },
    /// Evento de cierre con fingerprint agregado del build.
    BuildCompleted { build_fingerprint: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildEvent {
    pub seq: u64, // asignado por el EventStore (orden append global)
    pub build_id: Uuid,
    pub kind: BuildEventKind,
    pub ts: DateTime<Utc>, // metadato (no entra en fingerprint)
}
