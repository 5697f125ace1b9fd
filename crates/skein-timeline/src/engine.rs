//! The spawned engine and its handle
//!
//! One [`Timeline`] is spawned per screen subscription. The engine task
//! owns the state, interprets reduced [`Effect`]s, rebuilds the tiling
//! pipeline whenever the anchor changes, and folds pipeline snapshots and
//! the update signal into the observable [`TimelineState`].
//!
//! Teardown is by replacement throughout: dropping the [`TimelineHandle`]
//! closes the action channel and the state watch, which unwinds the engine
//! task, which drops its pipeline handle, which unwinds the pipeline and
//! its fetches. Nothing holds a cancellation token.

use crate::action::TimelineAction;
use crate::errors::TimelineError;
use crate::mutations::{apply_action, apply_fetch, Effect};
use crate::query::TimelineQuery;
use crate::repository::{RepositoryLoader, TimelineRepository};
use crate::source::TimelineSource;
use crate::state::{Presentation, TimelineState};
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use skein_core::Anchor;
use std::pin::pin;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Engine tuning for one timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Items requested per page
    pub page_size: usize,
    /// Whether a valid, non-empty page-0 fetch marks the session refreshed
    pub refreshed_on_new_items: bool,
    /// Layout the screen starts in
    pub presentation: Presentation,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            page_size: 30,
            refreshed_on_new_items: true,
            presentation: Presentation::TextAndEmbed,
        }
    }
}

/// A frontend's handle on one running timeline.
#[derive(Debug, Clone)]
pub struct TimelineHandle {
    actions: mpsc::UnboundedSender<TimelineAction>,
    states: watch::Receiver<TimelineState>,
}

impl TimelineHandle {
    /// Dispatch an action to the engine.
    pub fn send(&self, action: TimelineAction) -> Result<(), TimelineError> {
        self.actions
            .send(action)
            .map_err(|_| TimelineError::EngineStopped)
    }

    /// A fresh receiver on the state watch, for observation loops.
    pub fn states(&self) -> watch::Receiver<TimelineState> {
        self.states.clone()
    }

    /// The latest state.
    pub fn state(&self) -> TimelineState {
        self.states.borrow().clone()
    }
}

/// Spawns timeline engines.
pub struct Timeline;

impl Timeline {
    /// Spawn the engine for one screen subscription. Must be called within
    /// a tokio runtime.
    ///
    /// The first pagination session opens immediately; no initial action is
    /// required for the top of the feed to load.
    pub fn spawn<R: TimelineRepository>(
        repository: Arc<R>,
        source: TimelineSource,
        config: TimelineConfig,
    ) -> TimelineHandle {
        let starting =
            TimelineQuery::starting(source.clone(), Anchor::now(), config.page_size);
        let state = TimelineState::initial(starting, config.presentation);

        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(state.clone());

        tokio::spawn(run(repository, source, config, state, action_rx, state_tx));

        TimelineHandle {
            actions: action_tx,
            states: state_rx,
        }
    }
}

/// The engine task: the only writer of this timeline's state.
async fn run<R: TimelineRepository>(
    repository: Arc<R>,
    source: TimelineSource,
    config: TimelineConfig,
    mut state: TimelineState,
    mut action_rx: mpsc::UnboundedReceiver<TimelineAction>,
    state_tx: watch::Sender<TimelineState>,
) {
    let loader = Arc::new(RepositoryLoader::new(Arc::clone(&repository)));
    let (columns_tx, columns_rx) = watch::channel(state.num_columns);

    let mut pipeline =
        skein_tiling::TilingPipeline::launch(Arc::clone(&loader), state.query.clone(), columns_rx);

    let mut updates = pin!(repository.has_updates(&source));
    let mut updates_active = true;

    loop {
        // Branch handlers only name what woke us; the pipeline is mutated
        // below, after the select's borrows have ended.
        let wake = tokio::select! {
            action = action_rx.recv() => Wake::Action(action),
            fetched = pipeline.changed() => Wake::Fetched(fetched),
            update = updates.next(), if updates_active => Wake::Update(update),
        };

        match wake {
            Wake::Action(None) => break,
            Wake::Action(Some(action)) => {
                match apply_action(&mut state, action) {
                    Effect::None => {}
                    Effect::UpdateColumns(columns) => {
                        let _ = columns_tx.send(columns);
                    }
                    Effect::ForwardQuery(query) => pipeline.load_around(query),
                    Effect::Rebuild { starting } => {
                        debug!(source = %source, anchor = %starting.anchor, "rebuilding tiling pipeline");
                        pipeline = skein_tiling::TilingPipeline::launch(
                            Arc::clone(&loader),
                            starting,
                            columns_tx.subscribe(),
                        );
                    }
                }
                if state_tx.send(state.clone()).is_err() {
                    break;
                }
            }
            Wake::Fetched(None) => {
                // The pipeline task died out from under us; start a fresh
                // session rather than going dark.
                debug!(source = %source, "pipeline lost; relaunching");
                pipeline = skein_tiling::TilingPipeline::launch(
                    Arc::clone(&loader),
                    state.query.clone(),
                    columns_tx.subscribe(),
                );
            }
            Wake::Fetched(Some(fetched)) => {
                if apply_fetch(&mut state, fetched, config.refreshed_on_new_items)
                    && state_tx.send(state.clone()).is_err()
                {
                    break;
                }
            }
            Wake::Update(None) => updates_active = false,
            Wake::Update(Some(available)) => {
                if state.has_updates != available {
                    state.has_updates = available;
                    if state_tx.send(state.clone()).is_err() {
                        break;
                    }
                }
            }
        }
    }
    debug!(source = %source, "timeline engine wound down");
}

/// What the engine loop woke up for.
enum Wake {
    Action(Option<TimelineAction>),
    Fetched(Option<skein_tiling::TiledList<TimelineQuery, skein_core::FeedItem>>),
    Update(Option<bool>),
}
