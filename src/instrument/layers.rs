//! Counting and history layers.

use async_trait::async_trait;

use crate::backend::KvStore;
use crate::error::Result;
use crate::instrument::{Middleware, Operation};

// == Count Calls ==
/// Increments the operation's counter once per invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountCalls;

#[async_trait]
impl Middleware for CountCalls {
    fn name(&self) -> &'static str {
        "count_calls"
    }

    async fn before(&self, store: &dyn KvStore, op: &Operation, _args: &str) -> Result<()> {
        store.incr(&op.counter_key()).await?;
        Ok(())
    }
}

// == Call History ==
/// Records serialized arguments before, and the result after, each invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallHistory;

#[async_trait]
impl Middleware for CallHistory {
    fn name(&self) -> &'static str {
        "call_history"
    }

    async fn before(&self, store: &dyn KvStore, op: &Operation, args: &str) -> Result<()> {
        store.rpush(&op.inputs_key(), args.to_string()).await?;
        Ok(())
    }

    async fn after(&self, store: &dyn KvStore, op: &Operation, output: &str) -> Result<()> {
        store.rpush(&op.outputs_key(), output.to_string()).await?;
        Ok(())
    }
}
