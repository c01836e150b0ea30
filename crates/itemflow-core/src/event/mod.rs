//! Eventos estructurados y sinks.
//!
//! Rol en el flujo:
//! - Cada `Scope` construye un `Slog` (mapa ordenado de campos) y lo entrega
//!   al `Slogger`, que lo envuelve en un `LogRecord` con nivel y timestamp.
//! - El `LogSink` recibe el record ya completo; es el único estado mutable
//!   compartido del proceso y cada `emit` es una escritura atómica.

mod sink;
mod types;

pub use sink::{LogSink, MemorySink, WriterSink};
pub use types::{slog, Level, LogRecord, Slog};
