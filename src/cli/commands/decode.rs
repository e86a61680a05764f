//! Decode command - Show what a state identifier means

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    agents::forced_action,
    cli::output::{print_kv, print_section},
    taxi::{LOCATIONS, PASSENGER_IN_TAXI, TaxiState},
};

#[derive(Parser, Debug)]
#[command(about = "Decode a taxi state identifier")]
pub struct DecodeArgs {
    /// State identifier in 0..500
    pub state: usize,
}

const LANDMARK_NAMES: [&str; 4] = ["R", "G", "Y", "B"];

fn describe_landmark(index: usize) -> String {
    format!("{} {}", LANDMARK_NAMES[index], LOCATIONS[index])
}

pub fn execute(args: DecodeArgs) -> Result<()> {
    let state = TaxiState::decode(args.state)
        .with_context(|| format!("Cannot decode state {}", args.state))?;
    let sub_state = state.sub_state();

    print_section(&format!("State {}", args.state));
    print_kv("Taxi", &state.taxi.to_string());
    let passenger = if state.passenger == PASSENGER_IN_TAXI {
        "in taxi".to_string()
    } else {
        describe_landmark(state.passenger)
    };
    print_kv("Passenger", &passenger);
    print_kv("Destination", &describe_landmark(state.destination));
    print_kv("Sub-state", &sub_state.encode().to_string());
    print_kv("Driving to", &describe_landmark(sub_state.destination));
    let rule = forced_action(&state).map_or_else(|| "none".to_string(), |a| a.to_string());
    print_kv("Forced action", &rule);

    Ok(())
}
