use std::fmt;
use std::sync::Arc;

use futures::stream::{self, BoxStream, FuturesUnordered, StreamExt};

use super::builder::PipelineBuilder;
use super::report::{ItemFailure, ItemOutcome, RunReport};
use crate::collection::{sourced, Collection};
use crate::constants::{PIPELINE_KEY, UOW_KEY};
use crate::errors::HandlerError;
use crate::event::{slog, Slog};
use crate::model::{to_log_value, Context, Item};
use crate::slog::{Loggable, Slogger};
use crate::step::Step;

/// Orquestador de un run: colección -> una unidad de trabajo por item ->
/// steps en orden -> supervivientes en el orden de emisión.
///
/// El orden de los steps queda fijado en la construcción y se aplica igual a
/// todos los items. Contexto, colección y steps se comparten en modo lectura
/// entre las unidades de trabajo.
pub struct Pipeline<T: Item> {
    name: String,
    ctx: Arc<Context>,
    collection: Arc<dyn Collection<T>>,
    steps: Vec<Step<T>>,
    slogger: Slogger,
}

impl<T: Item> Pipeline<T> {
    pub fn builder(name: impl Into<String>, ctx: Context, slogger: Slogger) -> PipelineBuilder<T> {
        PipelineBuilder::new(name, ctx, slogger)
    }

    pub(super) fn from_parts(name: String,
                             ctx: Context,
                             collection: Arc<dyn Collection<T>>,
                             steps: Vec<Step<T>>,
                             slogger: Slogger)
                             -> Self {
        Self { name,
               ctx: Arc::new(ctx),
               collection,
               steps,
               slogger }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn steps(&self) -> &[Step<T>] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Pliega un item por todos los steps en orden.
    ///
    /// El primer error corta la cadena (los steps siguientes no se invocan
    /// para ese item) y se devuelve sin modificar.
    pub async fn apply(&self, item: T) -> Result<T, HandlerError> {
        self.fold(item).await.map_err(|failure| failure.error)
    }

    async fn fold(&self, item: T) -> Result<T, ItemFailure> {
        let mut result = item;
        for (step_index, step) in self.steps.iter().enumerate() {
            result = step.apply(&self.ctx, result)
                         .await
                         .map_err(|error| ItemFailure { step: step.name().to_string(),
                                                        step_index,
                                                        error })?;
        }
        Ok(result)
    }

    /// Ejecuta un run completo y devuelve el desenlace de cada item.
    ///
    /// Todas las unidades de trabajo llegan a su fin: un fallo no cancela a
    /// sus hermanas. Los fallos ya quedaron registrados por el step
    /// responsable y no se vuelven a registrar aquí.
    pub async fn settle(&self) -> RunReport<T> {
        let scope = self.slogger.begin(self.slog()).await;

        let items: Vec<T> = sourced(self.collection.as_ref(), &self.ctx, &self.slogger).collect().await;

        let mut pending: FuturesUnordered<_> =
            items.into_iter()
                 .enumerate()
                 .map(|(index, item)| async move {
                     let input = to_log_value(&item);
                     ItemOutcome { index,
                                   input,
                                   result: self.fold(item).await }
                 })
                 .collect();

        let mut outcomes = Vec::with_capacity(pending.len());
        while let Some(outcome) = pending.next().await {
            outcomes.push(outcome);
        }

        let report = RunReport::new(outcomes);
        log::debug!("pipeline {} settled: {} ok, {} failed", self.name, report.succeeded(), report.failed());
        scope.succeed(report.summary()).await;
        report
    }

    /// Secuencia perezosa de los items que completaron todos los steps, en
    /// el orden de emisión de la colección. Los items fallidos se omiten.
    pub fn run(&self) -> BoxStream<'_, T> {
        stream::once(self.settle()).flat_map(|report| stream::iter(report.into_successes()))
                                   .boxed()
    }

    /// Materializa `run` por completo.
    pub async fn collect(&self) -> Vec<T> {
        self.run().collect().await
    }
}

impl<T: Item> Loggable for Pipeline<T> {
    fn slog(&self) -> Slog {
        slog([(PIPELINE_KEY, self.name.as_str()), (UOW_KEY, self.ctx.uow())])
    }
}

impl<T: Item> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
         .field("name", &self.name)
         .field("ctx", &self.ctx)
         .field("collection", &self.collection.name())
         .field("steps", &self.steps)
         .finish()
    }
}
