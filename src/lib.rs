//! Itemflow
//!
//! Librería del binario de demostración:
//! - `config` lee el entorno y decide qué escenario ejecutar.
//! - `errors` agrupa los fallos de arranque (configuración, ensamblado, IO).
//! - `logging` redirige la fachada `log` al sink estructurado.
//!
//! `run_scenario` es lo que hace `main.rs`, sin tocar el proceso global.

pub mod config;
pub mod errors;
pub mod logging;

use std::sync::Arc;

use itemflow_core::{Context, LogSink, RunReport, Slogger, WriterSink};

use crate::config::{AppConfig, LogTarget};
use crate::errors::AppError;

/// Sink de salida según la configuración.
pub fn sink_for(cfg: &AppConfig) -> Arc<dyn LogSink> {
    match cfg.log.target {
        LogTarget::Stdout => Arc::new(WriterSink::stdout()),
        LogTarget::Stderr => Arc::new(WriterSink::stderr()),
    }
}

/// Ensambla el escenario configurado y lo ejecuta hasta el final.
pub async fn run_scenario(cfg: &AppConfig, slogger: Slogger) -> Result<RunReport<i64>, AppError> {
    let ctx = Context::new(cfg.run.uow.clone(), cfg.run.data);
    let pipeline = cfg.run.scenario.build(ctx, slogger.clone())?;
    let report = pipeline.settle().await;
    slogger.flush();
    Ok(report)
}
