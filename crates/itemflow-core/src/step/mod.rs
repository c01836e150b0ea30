//! Steps del pipeline.
//!
//! Un `Step` es un wrapper con nombre alrededor de un `Handler`: aplica el
//! handler a un item bajo un `Scope` y propaga su resultado sin tocarlo.
//! - `Handler`: capacidad externa `(Arc<Context>, T) -> Result<T, HandlerError>`.
//! - `Step`: configuración inmutable, compartida por todas las unidades de
//!   trabajo de un run.

mod definition;
mod handler;

pub use definition::Step;
pub use handler::Handler;
