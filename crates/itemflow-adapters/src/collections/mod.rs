//! Colecciones de referencia.

mod literal;

pub use literal::{ItemCollection, LiteralCollection, SCENARIO_A_ITEMS, SCENARIO_B_ITEMS};
