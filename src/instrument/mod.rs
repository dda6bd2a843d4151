//! Instrumentation Module
//!
//! Middleware that wraps a cache operation with side effects recorded in the
//! store itself: a call counter and input/output history lists.

mod layers;
mod playback;

pub use layers::{CallHistory, CountCalls};
pub use playback::{history, replay, replay_to, CallRecord};

use std::fmt;

use async_trait::async_trait;
use tracing::debug;

use crate::backend::KvStore;
use crate::error::Result;

// == Operation ==
/// An instrumented operation, identified by its qualified name.
///
/// The name doubles as the counter key; the history lists live under
/// `{name}:inputs` and `{name}:outputs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Operation {
    name: &'static str,
}

impl Operation {
    // == Constructor ==
    /// Creates an operation from its qualified name, e.g. `Cache.store`.
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }

    /// Returns the qualified name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Key of the invocation counter.
    pub fn counter_key(&self) -> String {
        self.name.to_string()
    }

    /// Key of the list of serialized arguments.
    pub fn inputs_key(&self) -> String {
        format!("{}:inputs", self.name)
    }

    /// Key of the list of serialized results.
    pub fn outputs_key(&self) -> String {
        format!("{}:outputs", self.name)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Serializes call arguments as a tuple literal: `()`, `("a",)`, `("a", 1)`.
pub fn format_call_args(args: &[&dyn fmt::Display]) -> String {
    match args {
        [] => "()".to_string(),
        [only] => format!("({},)", only),
        _ => {
            let joined: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
            format!("({})", joined.join(", "))
        }
    }
}

// == Middleware ==
/// Side effects run around a single invocation of an operation.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Runs before the operation with its serialized arguments.
    async fn before(&self, _store: &dyn KvStore, _op: &Operation, _args: &str) -> Result<()> {
        Ok(())
    }

    /// Runs after the operation with its serialized result.
    async fn after(&self, _store: &dyn KvStore, _op: &Operation, _output: &str) -> Result<()> {
        Ok(())
    }
}

// == Instruments ==
/// An ordered stack of middleware.
///
/// `before` hooks run in attach order and `after` hooks in reverse, so the
/// first layer attached is the outermost.
#[derive(Default)]
pub struct Instruments {
    layers: Vec<Box<dyn Middleware>>,
}

impl Instruments {
    // == Constructor ==
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a layer inside the ones already attached.
    pub fn with(mut self, layer: impl Middleware + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }

    /// Returns the number of attached layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if no layer is attached.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    // == Hooks ==
    /// Runs every layer's `before` hook in attach order, stopping at the
    /// first error.
    pub async fn before(&self, store: &dyn KvStore, op: &Operation, args: &str) -> Result<()> {
        for layer in &self.layers {
            debug!("{} before {}{}", layer.name(), op, args);
            layer.before(store, op, args).await?;
        }
        Ok(())
    }

    /// Runs every layer's `after` hook in reverse attach order, stopping at
    /// the first error.
    pub async fn after(&self, store: &dyn KvStore, op: &Operation, output: &str) -> Result<()> {
        for layer in self.layers.iter().rev() {
            debug!("{} after {} -> {}", layer.name(), op, output);
            layer.after(store, op, output).await?;
        }
        Ok(())
    }
}

impl fmt::Debug for Instruments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.layers.iter().map(|layer| layer.name()))
            .finish()
    }
}
