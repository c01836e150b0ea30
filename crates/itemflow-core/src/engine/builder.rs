//! Builder para `Pipeline`.
//!
//! Acumula colección y steps en el orden en que se declaran. El `Slogger` se
//! fija al crear el builder y se inyecta en cada step creado con `step`.
//!
//! ```ignore
//! let pipeline = Pipeline::builder("pipeline1", Context::new("uow", 1), slogger)
//!     .collection(ItemCollection::default())
//!     .step("step1", double_up_to_five)
//!     .step("step2", add_three)
//!     .build()?;
//! ```

use std::sync::Arc;

use super::core::Pipeline;
use crate::collection::Collection;
use crate::errors::PipelineError;
use crate::model::{Context, Item};
use crate::slog::Slogger;
use crate::step::{Handler, Step};

pub struct PipelineBuilder<T: Item> {
    name: String,
    ctx: Context,
    slogger: Slogger,
    collection: Option<Arc<dyn Collection<T>>>,
    steps: Vec<Step<T>>,
}

impl<T: Item> PipelineBuilder<T> {
    pub fn new(name: impl Into<String>, ctx: Context, slogger: Slogger) -> Self {
        Self { name: name.into(),
               ctx,
               slogger,
               collection: None,
               steps: Vec::new() }
    }

    /// Fuente de items. Una segunda llamada reemplaza a la anterior.
    pub fn collection<C>(self, collection: C) -> Self
        where C: Collection<T> + 'static
    {
        self.shared_collection(Arc::new(collection))
    }

    pub fn shared_collection(mut self, collection: Arc<dyn Collection<T>>) -> Self {
        self.collection = Some(collection);
        self
    }

    /// Añade un step que registra con el `Slogger` del builder.
    pub fn step<H>(self, name: impl Into<String>, handler: H) -> Self
        where H: Handler<T> + 'static
    {
        let step = Step::new(name, handler, self.slogger.clone());
        self.add_step(step)
    }

    /// Añade un step ya construido (por ejemplo, con otro `Slogger`).
    pub fn add_step(mut self, step: Step<T>) -> Self {
        self.steps.push(step);
        self
    }

    pub fn build(self) -> Result<Pipeline<T>, PipelineError> {
        let collection = self.collection
                             .ok_or_else(|| PipelineError::MissingCollection(self.name.clone()))?;
        Ok(Pipeline::from_parts(self.name, self.ctx, collection, self.steps, self.slogger))
    }
}
