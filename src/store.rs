use tokio::sync::watch;
use tracing::debug;

use crate::types::trip::{Trip, TripAction, UserLocation};

/// Shared trip state. `dispatch` hands back the trip as it stands once the action is applied,
/// so callers never decide anything from a stale read.
pub trait TripStore: Send + Sync {
    fn user_location(&self) -> Option<UserLocation>;
    fn trip(&self) -> Trip;
    fn dispatch(&self, action: TripAction) -> Trip;
}

pub fn reduce(trip: &mut Trip, action: TripAction) {
    match action {
        TripAction::SetOrigin(place) => trip.origin = Some(place),
        TripAction::SetDestination(place) => trip.destination = Some(place),
        TripAction::ClearOrigin => trip.origin = None,
    }
}

pub struct InMemoryTripStore {
    user_location: Option<UserLocation>,
    trip: watch::Sender<Trip>,
}

impl InMemoryTripStore {
    pub fn new(user_location: Option<UserLocation>) -> Self {
        let (trip, _) = watch::channel(Trip::default());
        InMemoryTripStore {
            user_location,
            trip,
        }
    }

    pub fn with_trip(self, trip: Trip) -> Self {
        self.trip.send_replace(trip);
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<Trip> {
        self.trip.subscribe()
    }
}

impl TripStore for InMemoryTripStore {
    fn user_location(&self) -> Option<UserLocation> {
        self.user_location.clone()
    }

    fn trip(&self) -> Trip {
        self.trip.borrow().clone()
    }

    fn dispatch(&self, action: TripAction) -> Trip {
        debug!(?action, "dispatch");
        self.trip.send_modify(|trip| reduce(trip, action));
        self.trip()
    }
}
