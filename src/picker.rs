use std::sync::Arc;

use color_eyre::eyre::{eyre, Result};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
};
use tracing::{debug, info, instrument, warn};

use crate::{
    config::PickerConfig,
    debounce::Debouncer,
    navigation::{Navigator, Screen},
    places::PlacesSearch,
    state::{CommitOutcome, Field, PickerState},
    store::TripStore,
    types::{dto::places::PlacesResponse, place::Place, trip::TripAction},
};

/// Receives the filtered result list after every successful search
pub trait ResultsView: Send + Sync {
    fn show_results(&self, results: Vec<Place>);
}

impl<F> ResultsView for F
where
    F: Fn(Vec<Place>) + Send + Sync,
{
    fn show_results(&self, results: Vec<Place>) {
        self(results)
    }
}

#[derive(Clone)]
pub struct Collaborators {
    pub places: Arc<dyn PlacesSearch>,
    pub store: Arc<dyn TripStore>,
    pub navigator: Arc<dyn Navigator>,
    pub results_view: Arc<dyn ResultsView>,
}

pub enum PickerCommand {
    Focus(Field),
    Edit(String),
    Clear(Field),
    Commit {
        item: Place,
        ignore_state: bool,
        reply: oneshot::Sender<CommitOutcome>,
    },
    Snapshot(oneshot::Sender<PickerState>),
}

enum Event {
    SearchDue(String),
    SearchFinished(Option<PlacesResponse>),
    SavedRouteResolved {
        location: String,
        response: Option<PlacesResponse>,
    },
}

/// The parent's side of a mounted picker. Dropping it unmounts the picker.
pub struct PickerHandle {
    commands: mpsc::UnboundedSender<PickerCommand>,
    state: watch::Receiver<PickerState>,
    task: JoinHandle<()>,
}

impl PickerHandle {
    fn send(&self, command: PickerCommand) -> Result<()> {
        self.commands
            .send(command)
            .map_err(|_| eyre!("picker is not mounted"))
    }

    pub fn focus(&self, field: Field) -> Result<()> {
        self.send(PickerCommand::Focus(field))
    }

    pub fn edit(&self, text: impl Into<String>) -> Result<()> {
        self.send(PickerCommand::Edit(text.into()))
    }

    pub fn clear(&self, field: Field) -> Result<()> {
        self.send(PickerCommand::Clear(field))
    }

    /// Apply `item` to the focused field. `ignore_state` bypasses the need for prior search results.
    pub async fn commit(&self, item: Place, ignore_state: bool) -> Result<CommitOutcome> {
        let (reply, outcome) = oneshot::channel();
        self.send(PickerCommand::Commit {
            item,
            ignore_state,
            reply,
        })?;
        Ok(outcome.await?)
    }

    /// State after every command sent so far has been handled
    pub async fn snapshot(&self) -> Result<PickerState> {
        let (reply, state) = oneshot::channel();
        self.send(PickerCommand::Snapshot(reply))?;
        Ok(state.await?)
    }

    pub fn subscribe(&self) -> watch::Receiver<PickerState> {
        self.state.clone()
    }

    /// Stop the picker, discarding any pending search
    pub async fn unmount(self) -> Result<()> {
        let PickerHandle { commands, task, .. } = self;
        drop(commands);
        task.await?;
        Ok(())
    }
}

pub fn mount(collaborators: Collaborators, config: PickerConfig) -> PickerHandle {
    let state = PickerState::mount(collaborators.store.user_location().as_ref(), config);
    let (published, state_rx) = watch::channel(state.clone());
    let (commands_tx, commands_rx) = mpsc::unbounded_channel();
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let debouncer = Debouncer::spawn(state.config().wait, state.config().max_wait, events_tx.clone());
    let picker = Picker {
        state,
        collaborators,
        debouncer,
        events: events_tx,
        published,
    };
    let task = tokio::spawn(picker.run(commands_rx, events_rx));
    PickerHandle {
        commands: commands_tx,
        state: state_rx,
        task,
    }
}

struct Picker {
    state: PickerState,
    collaborators: Collaborators,
    debouncer: Debouncer<Event>,
    events: mpsc::UnboundedSender<Event>,
    published: watch::Sender<PickerState>,
}

impl Picker {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<PickerCommand>,
        mut events: mpsc::UnboundedReceiver<Event>,
    ) {
        info!(focused = ?self.state.focused, "picker mounted");
        self.load_saved_route();
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => break,
                },
                Some(event) = events.recv() => self.handle_event(event),
            }
            self.publish();
        }
        info!("picker unmounted");
    }

    fn publish(&self) {
        self.published.send_if_modified(|current| {
            if *current == self.state {
                return false;
            }
            *current = self.state.clone();
            true
        });
    }

    fn handle_command(&mut self, command: PickerCommand) {
        match command {
            PickerCommand::Focus(field) => self.state.focus(field),
            PickerCommand::Edit(text) => {
                if let Some(query) = self.state.edit(&text) {
                    debug!(%query, "search scheduled");
                    self.debouncer.call(Event::SearchDue(query));
                }
            }
            PickerCommand::Clear(field) => self.state.clear(field),
            PickerCommand::Commit {
                item,
                ignore_state,
                reply,
            } => {
                let outcome = self.commit(item, ignore_state);
                // The parent may have stopped waiting
                let _ = reply.send(outcome);
            }
            PickerCommand::Snapshot(reply) => {
                let _ = reply.send(self.state.clone());
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::SearchDue(query) => self.search(query),
            Event::SearchFinished(response) => {
                if let Some(filtered) = self.state.search_finished(response) {
                    debug!(count = filtered.len(), "search results");
                    self.collaborators.results_view.show_results(filtered);
                }
            }
            Event::SavedRouteResolved { location, response } => {
                self.saved_route_resolved(location, response)
            }
        }
    }

    #[instrument(skip(self))]
    fn search(&mut self, query: String) {
        self.state.search_started();
        let places = self.collaborators.places.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let response = checked(places.search(&query).await);
            // Nobody to report to once the picker is unmounted
            let _ = events.send(Event::SearchFinished(response));
        });
    }

    #[instrument(skip(self, item))]
    fn commit(&mut self, item: Place, ignore_state: bool) -> CommitOutcome {
        let Some((field, action)) = self.state.commit(&item, ignore_state) else {
            debug!("no results to commit against");
            return CommitOutcome::Ignored;
        };
        let trip = self.collaborators.store.dispatch(action);
        let navigated = self.state.should_navigate(field, ignore_state, &trip);
        if navigated {
            self.collaborators.navigator.navigate(Screen::Map);
        }
        CommitOutcome::Applied { field, navigated }
    }

    fn load_saved_route(&self) {
        let Some(location) = self.collaborators.navigator.params().destination else {
            return;
        };
        info!(%location, "resolving saved destination");
        let places = self.collaborators.places.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let response = checked(places.search(&location).await);
            let _ = events.send(Event::SavedRouteResolved { location, response });
        });
    }

    fn saved_route_resolved(&mut self, location: String, response: Option<PlacesResponse>) {
        let Some(destination) = response
            .and_then(PlacesResponse::into_results)
            .and_then(|results| results.into_iter().next())
        else {
            warn!(%location, "saved destination did not resolve");
            return;
        };
        let store = &self.collaborators.store;
        let trip = store.dispatch(TripAction::SetDestination(destination));
        self.state.saved_route_resolved(&location);
        if trip.origin.is_some() && trip.origin == trip.destination {
            debug!("saved destination is the origin, clearing origin");
            store.dispatch(TripAction::ClearOrigin);
        }
    }
}

fn checked(response: Result<PlacesResponse>) -> Option<PlacesResponse> {
    match response {
        Ok(response) if response.status == 200 => Some(response),
        Ok(response) => {
            warn!(status = response.status, "places search failed");
            None
        }
        Err(e) => {
            warn!("places search failed: {e}");
            None
        }
    }
}
