//! moebius-core: pipeline determinista del valor stand-in universal
pub mod constants;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod pipeline;
pub mod stage;

pub use errors::CoreBuildError;
pub use event::{BuildEvent, BuildEventKind, EventStore, InMemoryEventStore};
pub use model::{Key, Node, Value};
pub use pipeline::{create, MoebiusBuilder};
pub use stage::{CallRecorder, FinalizeStage, InterceptStage, Rebuild, RecorderStage, SelfCallableStage,
                StageContext, StageDefinition, StageKind, StageRunResult};
