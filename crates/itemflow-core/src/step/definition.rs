use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use super::Handler;
use crate::constants::{HANDLER_KEY, ITEM_KEY, PANIC_KIND, STEP_KEY};
use crate::errors::HandlerError;
use crate::event::{slog, Slog};
use crate::model::{to_log_value, Context, Item};
use crate::slog::{Loggable, Slogger};

/// Step con nombre: aplica un handler a un item bajo un scope de log.
///
/// Cada `apply` emite exactamente dos eventos: "starting" y luego
/// "success" o "error".
pub struct Step<T: Item> {
    name: String,
    handler_name: String,
    handler: Arc<dyn Handler<T>>,
    slogger: Slogger,
}

impl<T: Item> Step<T> {
    pub fn new<H>(name: impl Into<String>, handler: H, slogger: Slogger) -> Self
        where H: Handler<T> + 'static
    {
        let handler_name = handler.handler_name();
        Self { name: name.into(),
               handler_name,
               handler: Arc::new(handler),
               slogger }
    }

    /// Sustituye el identificador del handler que aparece en los eventos.
    pub fn with_handler_name(mut self, handler_name: impl Into<String>) -> Self {
        self.handler_name = handler_name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    /// Aplica el handler. Un error del handler se registra y se devuelve tal
    /// cual; el step nunca lo convierte ni lo oculta.
    ///
    /// Un pánico del handler no cruza el step: se registra como error
    /// `Panic` y sólo falla este item.
    pub async fn apply(&self, ctx: &Arc<Context>, item: T) -> Result<T, HandlerError> {
        let mut fields = self.slog();
        fields.insert(ITEM_KEY.to_string(), to_log_value(&item));

        let scope = self.slogger.begin(fields).await;
        let caught = AssertUnwindSafe(self.handler.handle(Arc::clone(ctx), item)).catch_unwind().await;
        let outcome = caught.unwrap_or_else(|payload| Err(panic_error(payload)));
        scope.settle(outcome).await
    }
}

fn panic_error(payload: Box<dyn Any + Send>) -> HandlerError {
    let message = payload.downcast_ref::<&str>()
                         .map(|s| s.to_string())
                         .or_else(|| payload.downcast_ref::<String>().cloned())
                         .unwrap_or_else(|| "handler panicked".to_string());
    HandlerError::custom(PANIC_KIND, message)
}

impl<T: Item> Loggable for Step<T> {
    fn slog(&self) -> Slog {
        slog([(STEP_KEY, self.name.as_str()), (HANDLER_KEY, self.handler_name.as_str())])
    }
}

impl<T: Item> Clone for Step<T> {
    fn clone(&self) -> Self {
        Self { name: self.name.clone(),
               handler_name: self.handler_name.clone(),
               handler: Arc::clone(&self.handler),
               slogger: self.slogger.clone() }
    }
}

impl<T: Item> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
         .field("name", &self.name)
         .field("handler", &self.handler_name)
         .finish()
    }
}
