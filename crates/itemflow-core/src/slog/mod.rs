//! Logging estructurado con scopes.
//!
//! `Slogger` es el handle explícito hacia el sink: se construye una vez al
//! arrancar el proceso y se inyecta en el pipeline y en cada step (no hay
//! logger global). `Scope` enmarca una unidad de trabajo con
//! "starting" / "success" / "error".

mod scope;

pub use scope::{Scope, ScopeState};

use std::fmt;
use std::sync::Arc;

use crate::event::{Level, LogRecord, LogSink, Slog};

/// Componentes que aportan campos de identidad a sus scopes.
pub trait Loggable {
    fn slog(&self) -> Slog;
}

/// Handle clonable hacia el sink de eventos.
#[derive(Clone)]
pub struct Slogger {
    sink: Arc<dyn LogSink>,
    min_level: Level,
}

impl Slogger {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self { sink,
               min_level: Level::Info }
    }

    /// Descarta eventos por debajo de `level`.
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    /// Emite un evento de forma síncrona. Usado también desde `Drop`.
    pub fn emit(&self, level: Level, event: Slog) {
        if level >= self.min_level {
            self.sink.emit(&LogRecord::now(level, event));
        }
    }

    /// Emite y cede el control: cada emisión es un punto de suspensión.
    pub async fn info(&self, event: Slog) {
        self.emit(Level::Info, event);
        tokio::task::yield_now().await;
    }

    pub async fn error(&self, event: Slog) {
        self.emit(Level::Error, event);
        tokio::task::yield_now().await;
    }

    /// Abre un scope y emite `{…fields, status: "starting"}`.
    pub async fn begin(&self, fields: Slog) -> Scope {
        Scope::open(self.clone(), fields, false).await
    }

    /// Abre un scope sin evento "starting" (el llamador ya lo registró).
    pub async fn begin_quiet(&self, fields: Slog) -> Scope {
        Scope::open(self.clone(), fields, true).await
    }

    pub fn flush(&self) {
        self.sink.flush();
    }
}

impl fmt::Debug for Slogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slogger").field("min_level", &self.min_level).finish_non_exhaustive()
    }
}
