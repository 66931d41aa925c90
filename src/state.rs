use serde::Serialize;

use crate::{
    config::PickerConfig,
    filter::filter_results,
    text::ellipsis,
    types::{
        dto::places::PlacesResponse,
        place::Place,
        trip::{Trip, TripAction, UserLocation},
    },
};

pub const ORIGIN_PLACEHOLDER: &str = "Enter pickup location";
pub const DESTINATION_PLACEHOLDER: &str = "Where to?";

#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Field {
    #[default]
    Origin,
    Destination,
}

impl Field {
    pub fn other(self) -> Field {
        match self {
            Field::Origin => Field::Destination,
            Field::Destination => Field::Origin,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct FieldState {
    /// Raw text as typed, or the label of the last commit
    pub value: Option<String>,
    pub committed: Option<Place>,
    pub placeholder: String,
}

impl FieldState {
    fn with_placeholder(placeholder: String) -> Self {
        FieldState {
            placeholder,
            ..Default::default()
        }
    }

    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|value| !value.is_empty())
    }

    pub fn display_value(&self, max: usize) -> Option<String> {
        self.value.as_deref().map(|value| ellipsis(value, max))
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    /// Last normalized query handed to the debouncer
    pub last_query: Option<String>,
    /// Raw results of the last successful search, absent until one succeeds
    pub results: Option<Vec<Place>>,
    pub loading: bool,
}

/// Everything the picker knows locally. Only the handler methods below change it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PickerState {
    pub focused: Field,
    pub origin: FieldState,
    pub destination: FieldState,
    pub session: SearchSession,
    pub saved_route: Option<String>,
    #[serde(skip)]
    config: PickerConfig,
}

/// Result of handing a place to the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Nothing to commit against yet
    Ignored,
    Applied { field: Field, navigated: bool },
}

impl PickerState {
    pub fn mount(user_location: Option<&UserLocation>, config: PickerConfig) -> Self {
        let street = user_location.and_then(|location| location.street.as_deref());
        let focused = if street.is_some_and(|street| !street.is_empty()) {
            Field::Destination
        } else {
            Field::Origin
        };
        let origin_placeholder = street
            .filter(|street| !street.is_empty())
            .map(|street| ellipsis(street, config.ellipsis_len))
            .unwrap_or(ORIGIN_PLACEHOLDER.to_string());
        PickerState {
            focused,
            origin: FieldState::with_placeholder(origin_placeholder),
            destination: FieldState::with_placeholder(DESTINATION_PLACEHOLDER.to_string()),
            session: SearchSession::default(),
            saved_route: None,
            config,
        }
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn field(&self, field: Field) -> &FieldState {
        match field {
            Field::Origin => &self.origin,
            Field::Destination => &self.destination,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut FieldState {
        match field {
            Field::Origin => &mut self.origin,
            Field::Destination => &mut self.destination,
        }
    }

    pub fn focus(&mut self, field: Field) {
        self.focused = field;
    }

    pub fn clear(&mut self, field: Field) {
        self.field_mut(field).value = None;
    }

    /// Record an edit of the focused field. Returns the normalized query when it should be searched.
    pub fn edit(&mut self, input: &str) -> Option<String> {
        let focused = self.focused;
        self.field_mut(focused).value = Some(input.to_string());

        let query = input.to_lowercase().trim().to_string();
        if query.chars().count() < self.config.min_query_len {
            return None;
        }
        // Typing further into an already searched query keeps the current results
        if let Some(last) = &self.session.last_query {
            if query.starts_with(last.as_str()) {
                return None;
            }
        }
        self.session.last_query = Some(query.clone());
        Some(query)
    }

    pub fn search_started(&mut self) {
        self.session.loading = true;
    }

    /// Apply a search response. Returns the filtered list for the results view on success.
    pub fn search_finished(&mut self, response: Option<PlacesResponse>) -> Option<Vec<Place>> {
        self.session.loading = false;
        let results = response?.into_results()?;
        let filtered = filter_results(&results);
        self.session.results = Some(results);
        Some(filtered)
    }

    /// Put `item` into the focused field. Returns the store action to dispatch, if any.
    pub fn commit(&mut self, item: &Place, ignore_state: bool) -> Option<(Field, TripAction)> {
        if self.session.results.is_none() && !ignore_state {
            return None;
        }
        let target = self.focused;
        let value = if ignore_state {
            item.name.clone()
        } else {
            item.display_string.clone()
        };
        let field = self.field_mut(target);
        field.value = Some(value);
        field.committed = Some(item.clone());
        let action = match target {
            Field::Origin => TripAction::SetOrigin(item.clone()),
            Field::Destination => TripAction::SetDestination(item.clone()),
        };
        Some((target, action))
    }

    /// Decide on forward navigation from the trip as confirmed by the store after a commit
    pub fn should_navigate(&self, target: Field, ignore_state: bool, trip: &Trip) -> bool {
        (self.field(target.other()).has_value() || ignore_state) && trip.is_resolved()
    }

    pub fn saved_route_resolved(&mut self, location: &str) {
        self.saved_route = Some(location.to_string());
        self.destination.placeholder = ellipsis(location, self.config.ellipsis_len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> PickerState {
        PickerState::mount(None, PickerConfig::default())
    }

    fn place(display_string: &str, name: &str) -> Place {
        Place {
            display_string: display_string.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn mount_focuses_destination_when_user_street_is_known() {
        let location = UserLocation {
            street: Some("1 Infinite Loop, Cupertino, California".to_string()),
            point: None,
        };
        let state = PickerState::mount(Some(&location), PickerConfig::default());
        assert_eq!(state.focused, Field::Destination);
        assert_eq!(state.origin.placeholder, "1 Infinite Loop, Cupertin...");
        assert_eq!(state.destination.placeholder, DESTINATION_PLACEHOLDER);

        let state = PickerState::mount(None, PickerConfig::default());
        assert_eq!(state.focused, Field::Origin);
        assert_eq!(state.origin.placeholder, ORIGIN_PLACEHOLDER);
    }

    #[test]
    fn fields_map_to_zero_and_one() {
        assert_eq!(Field::Origin.index(), 0);
        assert_eq!(Field::Destination.index(), 1);
        assert_eq!(Field::Origin.other(), Field::Destination);
    }

    #[test]
    fn short_input_is_kept_but_not_searched() {
        let mut state = state();
        for input in ["", "abc", "  Main  ", "MAIN S"] {
            let query = state.edit(input);
            if input == "MAIN S" {
                assert_eq!(query.as_deref(), Some("main s"));
            } else {
                assert_eq!(query, None, "{input:?}");
            }
        }
        assert_eq!(state.origin.value.as_deref(), Some("MAIN S"));
        assert!(!state.session.loading);
    }

    #[test]
    fn refinements_of_last_query_are_skipped() {
        let mut state = state();
        assert_eq!(state.edit("Market St").as_deref(), Some("market st"));
        assert_eq!(state.edit("market street"), None);
        assert_eq!(state.edit("  MARKET ST  "), None);
        assert_eq!(state.edit("mission st").as_deref(), Some("mission st"));
        assert_eq!(state.session.last_query.as_deref(), Some("mission st"));
    }

    #[test]
    fn edits_go_to_the_focused_field() {
        let mut state = state();
        state.focus(Field::Destination);
        state.edit("Ferry Building");
        assert_eq!(state.origin.value, None);
        assert_eq!(state.destination.value.as_deref(), Some("Ferry Building"));
        state.clear(Field::Destination);
        assert_eq!(state.destination.value, None);
    }

    #[test]
    fn successful_search_replaces_results_and_clears_loading() {
        let mut state = state();
        state.search_started();
        let filtered = state
            .search_finished(Some(PlacesResponse::ok(vec![place("123 Main St 94105", "Main")])))
            .unwrap();
        assert_eq!(filtered[0].display_string, "123 Main St");
        let raw = state.session.results.as_ref().unwrap();
        assert_eq!(raw[0].display_string, "123 Main St 94105");
        assert!(!state.session.loading);

        state.search_finished(Some(PlacesResponse::ok(vec![])));
        assert_eq!(state.session.results, Some(vec![]));
    }

    #[test]
    fn failed_search_clears_loading_and_keeps_results() {
        let mut state = state();
        state.search_finished(Some(PlacesResponse::ok(vec![place("A", "a")])));

        state.search_started();
        assert_eq!(state.search_finished(Some(PlacesResponse::with_status(500))), None);
        assert!(!state.session.loading);

        state.search_started();
        assert_eq!(state.search_finished(None), None);
        assert!(!state.session.loading);
        assert_eq!(state.session.results.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn commit_without_results_is_ignored() {
        let mut state = state();
        assert_eq!(state.commit(&place("Union Square", "Union Square"), false), None);
        assert_eq!(state.origin.value, None);
        assert_eq!(state.origin.committed, None);
    }

    #[test]
    fn commit_with_ignore_state_uses_name() {
        let mut state = state();
        let item = place("", "Downtown");
        let (field, action) = state.commit(&item, true).unwrap();
        assert_eq!(field, Field::Origin);
        assert_eq!(action, TripAction::SetOrigin(item.clone()));
        assert_eq!(state.origin.value.as_deref(), Some("Downtown"));
        assert_eq!(state.origin.committed, Some(item));
    }

    #[test]
    fn commit_from_results_uses_display_string() {
        let mut state = state();
        state.search_finished(Some(PlacesResponse::ok(vec![])));
        state.focus(Field::Destination);
        let item = place("Ferry Building, San Francisco", "Ferry Building");
        let (field, action) = state.commit(&item, false).unwrap();
        assert_eq!(field, Field::Destination);
        assert_eq!(action, TripAction::SetDestination(item));
        assert_eq!(
            state.destination.value.as_deref(),
            Some("Ferry Building, San Francisco")
        );
    }

    #[test]
    fn navigation_needs_both_ends_and_the_other_field() {
        let mut state = state();
        let trip = Trip {
            origin: Some(place("a", "a")),
            destination: Some(place("b", "b")),
        };
        assert!(!state.should_navigate(Field::Destination, false, &trip));
        assert!(state.should_navigate(Field::Destination, true, &trip));

        state.origin.value = Some("a".to_string());
        assert!(state.should_navigate(Field::Destination, false, &trip));
        assert!(!state.should_navigate(Field::Destination, false, &Trip::default()));
    }
}
