use chrono::Utc;
use uuid::Uuid;

use super::{BuildEvent, BuildEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, build_id: Uuid, kind: BuildEventKind) -> BuildEvent;
    /// Lista eventos de un build (orden ascendente por seq).
    fn list(&self, build_id: Uuid) -> Vec<BuildEvent>;
    /// Lista todos los eventos en orden de append (builds anidados incluidos).
    fn list_all(&self) -> Vec<BuildEvent>;
}

pub struct InMemoryEventStore { pub inner: Vec<BuildEvent> }

impl Default for InMemoryEventStore { fn default() -> Self { Self { inner: Vec::new() } } }

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, build_id: Uuid, kind: BuildEventKind) -> BuildEvent {
        let seq = self.inner.len() as u64;
        let ev = BuildEvent { seq, build_id, kind, ts: Utc::now() };
        self.inner.push(ev.clone());
        ev
    }

    fn list(&self, build_id: Uuid) -> Vec<BuildEvent> {
        self.inner.iter().filter(|e| e.build_id == build_id).cloned().collect()
    }

    fn list_all(&self) -> Vec<BuildEvent> { self.inner.clone() }
}
