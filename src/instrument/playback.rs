//! Replay of recorded call history.

use std::io::{self, Write};

use crate::backend::KvStore;
use crate::error::Result;
use crate::instrument::Operation;

/// One recorded call: serialized arguments and serialized result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRecord {
    pub inputs: String,
    pub output: String,
}

/// Reads the history of `op`, pairing inputs with outputs in call order.
///
/// If the two lists differ in length the extra entries are dropped.
pub async fn history<S>(store: &S, op: &Operation) -> Result<Vec<CallRecord>>
where
    S: KvStore + ?Sized,
{
    let inputs = store.lrange(&op.inputs_key()).await?;
    let outputs = store.lrange(&op.outputs_key()).await?;

    Ok(inputs
        .into_iter()
        .zip(outputs)
        .map(|(inputs, output)| CallRecord { inputs, output })
        .collect())
}

/// Writes the history of `op` to `out`:
///
/// ```text
/// Cache.store was called 2 times:
/// Cache.store(*("foo",)) -> 13bf32a9-a45c-4f8e-8c7b-a1d2f3e4b5c6
/// Cache.store(*(42,)) -> dcddd00c-4219-4dd7-8877-66afbe8e7df8
/// ```
///
/// The call count is the length of the inputs list.
pub async fn replay_to<S, W>(store: &S, op: &Operation, out: &mut W) -> Result<()>
where
    S: KvStore + ?Sized,
    W: Write,
{
    let inputs = store.lrange(&op.inputs_key()).await?;
    let outputs = store.lrange(&op.outputs_key()).await?;

    writeln!(out, "{} was called {} times:", op, inputs.len())?;
    for (args, output) in inputs.iter().zip(outputs.iter()) {
        writeln!(out, "{}(*{}) -> {}", op, args, output)?;
    }
    Ok(())
}

/// Prints the history of `op` to standard output.
pub async fn replay<S>(store: &S, op: &Operation) -> Result<()>
where
    S: KvStore + ?Sized,
{
    let mut buf = Vec::new();
    replay_to(store, op, &mut buf).await?;
    io::stdout().lock().write_all(&buf)?;
    Ok(())
}
