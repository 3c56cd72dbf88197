pub mod context;
pub mod definition;
pub mod finalize;
pub mod intercept;
pub mod recorder;
pub mod run_result;
pub mod self_callable;

pub use context::{Rebuild, StageContext};
pub use definition::{StageDefinition, StageKind};
pub use finalize::FinalizeStage;
pub use intercept::InterceptStage;
pub use recorder::{CallRecorder, RecorderStage};
pub use run_result::StageRunResult;
pub use self_callable::SelfCallableStage;
