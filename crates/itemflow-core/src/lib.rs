//! itemflow-core: pipeline observable de items (núcleo).
//!
//! Un `Pipeline` toma los items de una `Collection`, lanza una unidad de
//! trabajo concurrente por item y pliega cada item a través de la lista
//! ordenada de `Step`s. Cada invocación de step queda enmarcada por un
//! `Scope` del `Slogger` que emite exactamente un evento "starting" y un
//! único evento terminal ("success" o "error").
//!
//! Los fallos de un item quedan aislados: el resto de items sigue su curso y
//! el item fallido simplemente no aparece en la salida de `run`/`collect`.
//! `settle` expone el detalle por item cuando el llamador lo necesita.
pub mod collection;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod event;
pub mod model;
pub mod naming;
pub mod slog;
pub mod step;

pub use collection::Collection;
pub use engine::{ItemFailure, ItemOutcome, Pipeline, PipelineBuilder, RunReport};
pub use errors::{ErrorKind, HandlerError, PipelineError};
pub use event::{Level, LogRecord, LogSink, MemorySink, Slog, WriterSink};
pub use model::{Context, Item};
pub use slog::{Loggable, Scope, ScopeState, Slogger};
pub use step::{Handler, Step};
