//! The async pipeline shell
//!
//! One [`TilingPipeline`] instance is one pagination session: it owns a
//! [`Tiler`], consumes tile inputs, dispatches fetches, and publishes
//! [`TiledList`] snapshots through a watch channel. Teardown is by
//! replacement: when the owner drops its [`PipelineHandle`], the watch
//! channel closes, the driver task ends, and in-flight fetch tasks unwind
//! on their next send. No explicit cancellation tokens are involved; a
//! superseded pipeline's late results die with its channels.

use crate::cursor::CursorList;
use crate::loader::CursorListLoader;
use crate::pivot::cursor_tile_inputs;
use crate::query::TiledQuery;
use crate::tile::TiledList;
use crate::tiler::{FetchPlan, Tiler};
use futures::StreamExt;
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{debug, trace};

/// The owner's handle on one tiling pipeline.
///
/// Dropping the handle tears the pipeline down.
#[derive(Debug)]
pub struct PipelineHandle<Q, I> {
    queries: mpsc::UnboundedSender<Q>,
    snapshots: watch::Receiver<TiledList<Q, I>>,
}

impl<Q: TiledQuery, I> PipelineHandle<Q, I> {
    /// Re-center the loaded window around `query`.
    ///
    /// Best-effort: a pipeline that has already wound down ignores this,
    /// and the owner is expected to be replacing it.
    pub fn load_around(&self, query: Q) {
        if self.queries.send(query).is_err() {
            trace!("load_around after pipeline teardown; dropped");
        }
    }

    /// Await the next snapshot change. Returns `None` once the pipeline is
    /// gone.
    pub async fn changed(&mut self) -> Option<TiledList<Q, I>>
    where
        I: Clone,
    {
        self.snapshots.changed().await.ok()?;
        Some(self.snapshots.borrow_and_update().clone())
    }

    /// The latest snapshot.
    pub fn latest(&self) -> TiledList<Q, I>
    where
        I: Clone,
    {
        self.snapshots.borrow().clone()
    }
}

/// Launches tiling pipelines.
pub struct TilingPipeline;

impl TilingPipeline {
    /// Launch one pipeline for the pagination session `starting_query`
    /// opens. Must be called within a tokio runtime.
    ///
    /// The pipeline immediately pivots to the starting query, so its first
    /// fetch (with [`Cursor::Initial`](crate::Cursor::Initial)) needs no
    /// further prompting.
    pub fn launch<Q, I, L>(
        loader: Arc<L>,
        starting_query: Q,
        columns: watch::Receiver<u32>,
    ) -> PipelineHandle<Q, I>
    where
        Q: TiledQuery,
        I: Clone + Send + Sync + 'static,
        L: CursorListLoader<Q, I>,
    {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(TiledList::new());

        let tiler = Tiler::new(starting_query.clone());
        let _ = query_tx.send(starting_query);

        tokio::spawn(drive(loader, tiler, columns, query_rx, snapshot_tx));

        PipelineHandle {
            queries: query_tx,
            snapshots: snapshot_rx,
        }
    }
}

/// The pipeline driver: the only task mutating this session's tiler.
async fn drive<Q, I, L>(
    loader: Arc<L>,
    mut tiler: Tiler<Q, I>,
    columns: watch::Receiver<u32>,
    query_rx: mpsc::UnboundedReceiver<Q>,
    snapshot_tx: watch::Sender<TiledList<Q, I>>,
) where
    Q: TiledQuery,
    I: Clone + Send + Sync + 'static,
    L: CursorListLoader<Q, I>,
{
    let queries = UnboundedReceiverStream::new(query_rx);
    let mut inputs = pin!(cursor_tile_inputs(columns, queries));

    // Fetch tasks funnel pages back through this channel. The driver keeps
    // one sender alive, so `recv` idles rather than ending while no fetch
    // is in flight.
    let (page_tx, mut page_rx) = mpsc::unbounded_channel::<(Q, CursorList<I>)>();

    loop {
        tokio::select! {
            input = inputs.next() => {
                let Some(input) = input else { break };
                for plan in tiler.on_input(input) {
                    spawn_fetch(Arc::clone(&loader), plan, page_tx.clone());
                }
            }
            page = page_rx.recv() => {
                let Some((query, list)) = page else { break };
                let Some(snapshot) = tiler.on_page(&query, list) else {
                    trace!(page = query.page(), "dropped page for evicted query");
                    continue;
                };
                debug!(
                    page = query.page(),
                    items = snapshot.len(),
                    "publishing snapshot"
                );
                if snapshot_tx.send(snapshot).is_err() {
                    break;
                }
            }
            () = snapshot_tx.closed() => break,
        }
    }
    debug!("tiling pipeline wound down");
}

fn spawn_fetch<Q, I, L>(
    loader: Arc<L>,
    plan: FetchPlan<Q>,
    page_tx: mpsc::UnboundedSender<(Q, CursorList<I>)>,
) where
    Q: TiledQuery,
    I: Clone + Send + Sync + 'static,
    L: CursorListLoader<Q, I>,
{
    tokio::spawn(async move {
        trace!(page = plan.query.page(), "dispatching fetch");
        let mut pages = loader.load(&plan.query, plan.cursor);
        while let Some(page) = pages.next().await {
            if page_tx.send((plan.query.clone(), page)).is_err() {
                // Pipeline superseded; abandon the subscription.
                break;
            }
        }
    });
}
