use futures::stream::{self, BoxStream, StreamExt};

use itemflow_core::{Collection, Context, Item};

pub const SCENARIO_A_ITEMS: &[i64] = &[2, 3, 10, 4];
pub const SCENARIO_B_ITEMS: &[i64] = &[2, 3, 10, 4, 5, 1, 3, 12, -33, 8, 4, 2, -11];

/// Lista fija de enteros, emitida en orden. Por defecto, la lista completa
/// de ejemplo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemCollection {
    items: Vec<i64>,
}

impl ItemCollection {
    pub fn new(items: impl Into<Vec<i64>>) -> Self {
        Self { items: items.into() }
    }

    pub fn scenario_a() -> Self {
        Self::new(SCENARIO_A_ITEMS)
    }

    pub fn items(&self) -> &[i64] {
        &self.items
    }
}

impl Default for ItemCollection {
    fn default() -> Self {
        Self::new(SCENARIO_B_ITEMS)
    }
}

impl Collection<i64> for ItemCollection {
    fn sequence<'a>(&'a self, _ctx: &'a Context) -> BoxStream<'a, i64> {
        stream::iter(self.items.iter().copied()).boxed()
    }
}

/// Lista literal de cualquier tipo clonable, con nombre propio para los
/// eventos.
#[derive(Debug, Clone)]
pub struct LiteralCollection<T> {
    name: String,
    items: Vec<T>,
}

impl<T: Item + Clone> LiteralCollection<T> {
    pub fn new(name: impl Into<String>, items: Vec<T>) -> Self {
        Self { name: name.into(),
               items }
    }
}

impl<T: Item + Clone> Collection<T> for LiteralCollection<T> {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn sequence<'a>(&'a self, _ctx: &'a Context) -> BoxStream<'a, T> {
        stream::iter(self.items.iter().cloned()).boxed()
    }
}
