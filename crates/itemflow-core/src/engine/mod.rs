//! Motor del pipeline: builder, orquestación de un run y su reporte.

pub mod builder;
pub mod core;
pub mod report;

pub use builder::PipelineBuilder;
pub use core::Pipeline;
pub use report::{ItemFailure, ItemOutcome, RunReport};
