// ─── Fallback Chains ───
// Ordered strategies tried one after another until one resolves.

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::LauncherResult;
use crate::core::repository::RepositoryReference;
use crate::core::sync::SyncContext;

/// Outcome of a single strategy.
///
/// `Skipped` is a soft failure: the next strategy gets its turn. Hard
/// failures travel as `Err` and stop the chain.
#[derive(Debug)]
pub enum Attempt<T> {
    Resolved(T),
    Skipped(String),
}

#[async_trait]
pub trait FallbackStrategy: Send + Sync {
    type Output: Send;

    fn label(&self) -> &'static str;

    async fn attempt(
        &self,
        ctx: &SyncContext<'_>,
        repo: &RepositoryReference,
    ) -> LauncherResult<Attempt<Self::Output>>;
}

/// Run `chain` in order and return the first resolved value, tagged with
/// the label of the strategy that produced it. `None` when all skipped.
pub async fn resolve_first<S: FallbackStrategy>(
    ctx: &SyncContext<'_>,
    repo: &RepositoryReference,
    chain: &[S],
) -> LauncherResult<Option<(&'static str, S::Output)>> {
    for strategy in chain {
        match strategy.attempt(ctx, repo).await? {
            Attempt::Resolved(value) => {
                debug!("{} resolved via {}", repo, strategy.label());
                return Ok(Some((strategy.label(), value)));
            }
            Attempt::Skipped(reason) => {
                debug!("{} skipped for {}: {}", strategy.label(), repo, reason);
            }
        }
    }
    Ok(None)
}
