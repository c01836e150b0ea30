//! Errores del core.
//!
//! - `HandlerError`: lo que un handler de step puede devolver. El step lo
//!   registra y lo propaga sin modificarlo.
//! - `PipelineError`: errores de ensamblado del pipeline.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::naming::short_name_of;

/// Errores que exponen un nombre de tipo estable para los eventos "error".
///
/// El `kind` se registra como `result` y el mensaje (`Display`) como
/// `detail`.
pub trait ErrorKind: std::error::Error {
    fn kind(&self) -> Cow<'_, str>;
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum HandlerError {
    /// El handler rechaza el valor recibido (regla de negocio).
    #[error("{0}")]
    Rejected(String),
    /// El valor no puede procesarse (overflow, payload inesperado, ...).
    #[error("{0}")]
    Invalid(String),
    /// Error externo adaptado con su propio nombre de tipo.
    #[error("{message}")]
    Custom { kind: String, message: String },
}

impl HandlerError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn custom(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Custom { kind: kind.into(),
                       message: message.into() }
    }

    /// Adapta cualquier error conservando el nombre corto de su tipo.
    pub fn wrap<E: std::error::Error>(err: E) -> Self {
        Self::Custom { kind: short_name_of::<E>(),
                       message: err.to_string() }
    }
}

impl ErrorKind for HandlerError {
    fn kind(&self) -> Cow<'_, str> {
        match self {
            Self::Rejected(_) => Cow::Borrowed("Rejected"),
            Self::Invalid(_) => Cow::Borrowed("Invalid"),
            Self::Custom { kind, .. } => Cow::Borrowed(kind.as_str()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum PipelineError {
    #[error("pipeline `{0}` has no collection")]
    MissingCollection(String),
}
