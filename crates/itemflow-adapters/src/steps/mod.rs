//! Handlers concretos.

pub mod arith;

pub use arith::{add_context_data, add_three, double_up_to_five, times_seven_non_negative};
