//! Pipelines de ejemplo ensamblados con los handlers y colecciones de este
//! crate.

use std::fmt;
use std::str::FromStr;

use itemflow_core::{Context, Pipeline, PipelineError, Slogger};

use crate::collections::ItemCollection;
use crate::steps::{add_context_data, add_three, double_up_to_five, times_seven_non_negative};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// `[2, 3, 10, 4]` por duplicar (<= 5) y sumar 3.
    A,
    /// Lista completa por seis steps con dos reglas de rechazo.
    B,
    /// `[2, 3, 10, 4]` desplazado por el payload del contexto y +3.
    C,
}

impl Scenario {
    pub fn build(self, ctx: Context, slogger: Slogger) -> Result<Pipeline<i64>, PipelineError> {
        match self {
            Scenario::A => scenario_a(ctx, slogger),
            Scenario::B => scenario_b(ctx, slogger),
            Scenario::C => scenario_c(ctx, slogger),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scenario::A => f.write_str("a"),
            Scenario::B => f.write_str("b"),
            Scenario::C => f.write_str("c"),
        }
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a" => Ok(Scenario::A),
            "b" => Ok(Scenario::B),
            "c" => Ok(Scenario::C),
            other => Err(format!("unknown scenario `{other}` (expected `a`, `b` or `c`)")),
        }
    }
}

pub fn scenario_a(ctx: Context, slogger: Slogger) -> Result<Pipeline<i64>, PipelineError> {
    Pipeline::builder("pipeline_a", ctx, slogger).collection(ItemCollection::scenario_a())
                                                 .step("step1", double_up_to_five)
                                                 .step("step2", add_three)
                                                 .build()
}

pub fn scenario_b(ctx: Context, slogger: Slogger) -> Result<Pipeline<i64>, PipelineError> {
    Pipeline::builder("pipeline1", ctx, slogger).collection(ItemCollection::default())
                                                .step("step1", double_up_to_five)
                                                .step("step2", add_three)
                                                .step("step3", times_seven_non_negative)
                                                .step("step4", add_three)
                                                .step("step5", add_three)
                                                .step("step6", times_seven_non_negative)
                                                .build()
}

pub fn scenario_c(ctx: Context, slogger: Slogger) -> Result<Pipeline<i64>, PipelineError> {
    Pipeline::builder("pipeline_c", ctx, slogger).collection(ItemCollection::scenario_a())
                                                 .step("offset", add_context_data)
                                                 .step("step2", add_three)
                                                 .build()
}
