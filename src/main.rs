use std::sync::Arc;

use color_eyre::eyre::eyre;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::watch,
};
use tracing::info;
use trip_picker::{
    clients::{get_reqwest_client, init_reqwest_client},
    config::{PickerConfig, PlacesConfig},
    navigation::{RouteParams, Screen, StackNavigator},
    picker::{mount, Collaborators, PickerHandle},
    places::PlacesClient,
    state::{CommitOutcome, Field, PickerState},
    store::{InMemoryTripStore, TripStore},
    types::{place::Place, trip::UserLocation},
};

#[derive(Debug, PartialEq)]
enum Input {
    Focus(Field),
    Pick(usize),
    Nearby(String),
    Clear,
    State,
    Quit,
    Text(String),
}

impl Input {
    fn parse(line: &str) -> color_eyre::Result<Input> {
        let Some(command) = line.strip_prefix(':') else {
            return Ok(Input::Text(line.to_string()));
        };
        let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
        Ok(match name {
            "origin" => Input::Focus(Field::Origin),
            "dest" => Input::Focus(Field::Destination),
            "pick" => Input::Pick(arg.trim().parse()?),
            "nearby" if !arg.trim().is_empty() => Input::Nearby(arg.trim().to_string()),
            "clear" => Input::Clear,
            "state" => Input::State,
            "quit" => Input::Quit,
            _ => Err(eyre!("unknown command {line:?}"))?,
        })
    }
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    // initialize tracing
    tracing_subscriber::fmt::init();

    init_reqwest_client()?;
    let places = PlacesClient::new(get_reqwest_client()?.clone(), PlacesConfig::from_env()?);
    let user_location = std::env::var("TRIP_PICKER_USER_STREET")
        .ok()
        .map(|street| UserLocation {
            street: Some(street),
            point: None,
        });
    let store = Arc::new(InMemoryTripStore::new(user_location));
    let navigator = Arc::new(StackNavigator::new(RouteParams {
        destination: std::env::var("TRIP_PICKER_SAVED_DESTINATION").ok(),
    }));
    let (results_tx, results) = watch::channel(Vec::<Place>::new());

    let picker = mount(
        Collaborators {
            places: Arc::new(places),
            store: store.clone(),
            navigator: navigator.clone(),
            results_view: Arc::new(move |results: Vec<Place>| {
                for (i, place) in results.iter().enumerate() {
                    println!("  {}. {}", i + 1, place.display_string);
                }
                results_tx.send_replace(results);
            }),
        },
        PickerConfig::default(),
    );

    info!("Type to search. :origin, :dest, :pick N, :nearby NAME, :clear, :state, :quit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut screens = navigator.subscribe();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match Input::parse(&line) {
                    Ok(Input::Quit) => break,
                    Ok(input) => handle_input(&picker, &results, input).await?,
                    Err(e) => println!("{e}"),
                }
            }
            changed = screens.changed() => {
                changed?;
                if navigator.current() == Screen::Map {
                    let trip = store.trip();
                    println!("{}", serde_json::to_string_pretty(&trip)?);
                    break;
                }
            }
        }
    }

    picker.unmount().await?;
    Ok(())
}

async fn handle_input(
    picker: &PickerHandle,
    results: &watch::Receiver<Vec<Place>>,
    input: Input,
) -> color_eyre::Result<()> {
    match input {
        Input::Focus(field) => {
            picker.focus(field)?;
            render(&picker.snapshot().await?);
        }
        Input::Text(text) => picker.edit(text)?,
        Input::Clear => {
            let focused = picker.snapshot().await?.focused;
            picker.clear(focused)?;
            render(&picker.snapshot().await?);
        }
        Input::Pick(n) => {
            let item = results.borrow().get(n.wrapping_sub(1)).cloned();
            match item {
                Some(item) => report(picker.commit(item, false).await?),
                None => println!("no result {n}"),
            }
        }
        Input::Nearby(name) => report(picker.commit(Place::nearby(name, None), true).await?),
        Input::State => {
            println!("{}", serde_json::to_string_pretty(&picker.snapshot().await?)?);
        }
        Input::Quit => {}
    }
    Ok(())
}

fn render(state: &PickerState) {
    let width = state.config().ellipsis_len;
    for field in [Field::Origin, Field::Destination] {
        let marker = if state.focused == field { '>' } else { ' ' };
        let input = state.field(field);
        let text = input
            .display_value(width)
            .unwrap_or(format!("({})", input.placeholder));
        println!("{marker} {text}");
    }
}

fn report(outcome: CommitOutcome) {
    match outcome {
        CommitOutcome::Ignored => println!("search first"),
        CommitOutcome::Applied { field, navigated } => {
            println!("{field:?} set");
            if navigated {
                println!("both ends set, opening map");
            }
        }
    }
}
