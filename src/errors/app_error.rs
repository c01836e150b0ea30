use itemflow_core::PipelineError;
use thiserror::Error;

/// Errores del binario: configuración, ensamblado del pipeline y salida.
/// Los fallos por item nunca llegan aquí; se quedan en el `RunReport`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error de pipeline: {0}")]
    Pipeline(#[from] PipelineError),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Error al instalar el logger: {0}")]
    Logging(#[from] log::SetLoggerError),
}
