//! Shared operation pipeline. Every catalog operation runs through the same
//! stage chain: open a transaction on a fresh snapshot, hand it to the
//! operation body, then commit or roll back depending on the outcome. The
//! transaction travels by value so the body can call `&mut` methods without
//! tying its lifetime to the pipeline.

use std::future::Future;

use tracing::Instrument;

use crate::core::context::OpContext;
use crate::ops::error::OpError;
use crate::store::{CatalogStore, CatalogTx};

pub(crate) type TxBox = Box<dyn CatalogTx>;

/// Runs a mutating operation body inside a transaction. A successful body
/// result triggers commit; commit failures (stale tokens, names taken by a
/// concurrent writer) surface as the operation's error. Any body error rolls
/// the transaction back.
pub(crate) async fn mutate<Req, Out, F, Fut>(
    store: &dyn CatalogStore,
    ctx: &OpContext,
    op: &'static str,
    req: Req,
    body: F,
) -> Result<Out, OpError>
where
    F: FnOnce(TxBox, Req) -> Fut,
    Fut: Future<Output = (TxBox, Result<Out, OpError>)>,
{
    let span = tracing::info_span!("catalog_op", name = op, correlation = %ctx.correlation_id());
    async move {
        let tx = store.begin().await?;
        let (tx, outcome) = body(tx, req).await;
        match outcome {
            Ok(out) => {
                tx.commit().await?;
                tracing::debug!("committed");
                Ok(out)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                tracing::debug!(error = %err, "rolled back");
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

/// Runs a read-only operation body against a snapshot. The transaction is
/// always rolled back; reads never publish anything.
pub(crate) async fn query<Req, Out, F, Fut>(
    store: &dyn CatalogStore,
    ctx: &OpContext,
    op: &'static str,
    req: Req,
    body: F,
) -> Result<Out, OpError>
where
    F: FnOnce(TxBox, Req) -> Fut,
    Fut: Future<Output = (TxBox, Result<Out, OpError>)>,
{
    let span = tracing::debug_span!("catalog_op", name = op, correlation = %ctx.correlation_id());
    async move {
        let tx = store.begin().await?;
        let (tx, outcome) = body(tx, req).await;
        if let Err(rollback_err) = tx.rollback().await {
            tracing::warn!(error = %rollback_err, "rollback failed");
        }
        outcome
    }
    .instrument(span)
    .await
}
