//! Single-threaded runtime driver for the synchronization engine.
//!
//! The engine owns the application state, the pin store adapter, and the
//! position source, and runs the event pipeline: events are dispatched through
//! [`handle_event`], the resulting actions are executed in sequence, and each
//! capability request feeds exactly one completion event back into the
//! pipeline. Store snapshots arriving through the standing watch are queued
//! and processed in delivery order.
//!
//! Nothing here blocks: the only "asynchronous" operations, the position
//! request and the store write, resolve as completion events, so the
//! embedding host observes a fully synchronous dispatch with deterministic
//! state transitions.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::app::{handle_event, Action, AppState, Event, Notice};
use crate::domain::error::Result;
use crate::geo::PositionSource;
use crate::store::{PinStoreAdapter, RealtimeCollection};
use crate::view::MapViewModel;
use crate::{initialize, Config};

/// Runtime driver wiring the state machine to its capabilities.
///
/// Lives on a single thread. Subscribes to the pin collection on construction
/// and processes the initial snapshot before returning, so the state reflects
/// the remote collection from the first moment. Dropping the engine (or
/// calling [`shutdown`](Self::shutdown)) tears down the subscription
/// deterministically; teardown is idempotent.
pub struct Engine<C, P> {
    state: AppState,
    adapter: PinStoreAdapter<C>,
    positions: P,
    inbox: Rc<RefCell<VecDeque<Event>>>,
    notices: Vec<Notice>,
}

impl<C: RealtimeCollection, P: PositionSource> Engine<C, P> {
    /// Builds the engine, subscribes to the configured collection, and applies
    /// the initial snapshot.
    ///
    /// # Errors
    ///
    /// Propagates failures from processing the initial snapshot delivery.
    pub fn new(config: &Config, store: C, positions: P) -> Result<Self> {
        let state = initialize(config);
        let mut adapter = PinStoreAdapter::new(store, config.collection.clone());

        let inbox: Rc<RefCell<VecDeque<Event>>> = Rc::new(RefCell::new(VecDeque::new()));
        let queue = Rc::clone(&inbox);
        adapter.subscribe(move |snapshot| {
            queue
                .borrow_mut()
                .push_back(Event::SnapshotDelivered(snapshot));
        });

        let mut engine = Self {
            state,
            adapter,
            positions,
            inbox,
            notices: Vec::new(),
        };
        engine.drain()?;
        Ok(engine)
    }

    /// Dispatches one event through the pipeline.
    ///
    /// Returns `true` when the derived view model changed and should be
    /// recomposed. Actions emitted by the handler are executed before
    /// returning, including any follow-up events they produce (write
    /// acknowledgements, position resolutions, snapshot redeliveries).
    ///
    /// # Errors
    ///
    /// Propagates handler failures; capability failures are converted into
    /// events and notices instead of errors.
    pub fn dispatch(&mut self, event: Event) -> Result<bool> {
        self.inbox.borrow_mut().push_back(event);
        self.drain()
    }

    /// Processes store deliveries queued since the last dispatch.
    ///
    /// Remote changes made by other clients arrive through the standing watch
    /// between dispatches; hosts call this when the backend signals activity.
    /// Returns `true` when the view model should be recomposed.
    ///
    /// # Errors
    ///
    /// Propagates handler failures, as [`dispatch`](Self::dispatch) does.
    pub fn pump(&mut self) -> Result<bool> {
        self.drain()
    }

    /// Current application state.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Composes the renderable view model from the current state.
    #[must_use]
    pub fn viewmodel(&self) -> MapViewModel {
        self.state.compute_viewmodel()
    }

    /// Drains the user-visible notices accumulated since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Tears down the store subscription. Idempotent; also runs on drop.
    pub fn shutdown(&mut self) {
        self.adapter.unsubscribe();
    }

    fn drain(&mut self) -> Result<bool> {
        let mut redraw = false;
        loop {
            let next = self.inbox.borrow_mut().pop_front();
            let Some(event) = next else { break };

            let (changed, actions) = handle_event(&mut self.state, &event)?;
            redraw |= changed;
            for action in actions {
                self.execute(action);
            }
        }
        Ok(redraw)
    }

    fn execute(&mut self, action: Action) {
        match action {
            Action::AppendPin(pin) => {
                let completion = match self.adapter.append(&pin) {
                    Ok(key) => Event::PinWritten { key },
                    Err(e) => Event::PinWriteFailed {
                        message: e.to_string(),
                    },
                };
                self.inbox.borrow_mut().push_back(completion);
            }
            Action::RequestPosition => {
                let completion = match self.positions.request_position() {
                    Ok(position) => Event::PositionResolved { position },
                    Err(error) => Event::PositionFailed { error },
                };
                self.inbox.borrow_mut().push_back(completion);
            }
            Action::Notify(notice) => {
                tracing::debug!(notice = %notice.message(), "notice surfaced");
                self.notices.push(notice);
            }
        }
    }
}
