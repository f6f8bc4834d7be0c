//! Node execution: behaviors, the compute context and the run engine.

pub mod behavior;
pub mod context;
pub mod engine;

pub use behavior::{NodeBehavior, NoopBehavior};
pub use context::ComputeContext;
pub use engine::RunReport;
