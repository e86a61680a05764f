//! State and action encoding for the taxi grid world
//!
//! A full state packs four fields into one integer with the mixed radix
//! `(row: 5, col: 5, passenger: 5, destination: 4)`, most significant first:
//!
//! ```text
//! state = ((row * 5 + col) * 5 + passenger) * 4 + destination
//! ```
//!
//! The navigation sub-problem drops the passenger field and keeps
//! `(row: 5, col: 5, destination: 4)`.

use std::fmt;

use crate::{Error, Result};

/// Width and height of the grid
pub const GRID_SIZE: usize = 5;

/// Number of pickup/dropoff landmarks
pub const NUM_LOCATIONS: usize = 4;

/// Passenger index meaning "riding in the taxi"
pub const PASSENGER_IN_TAXI: usize = NUM_LOCATIONS;

/// Number of full-problem states
pub const NUM_STATES: usize = GRID_SIZE * GRID_SIZE * (NUM_LOCATIONS + 1) * NUM_LOCATIONS;

/// Number of navigation sub-problem states
pub const NUM_SUB_STATES: usize = GRID_SIZE * GRID_SIZE * NUM_LOCATIONS;

/// Number of actions in the full problem
pub const NUM_ACTIONS: usize = 6;

/// Number of movement actions (the sub-problem's action space)
pub const NUM_NAVIGATION_ACTIONS: usize = 4;

/// Landmark coordinates, indexed by passenger/destination index (R, G, Y, B)
pub const LOCATIONS: [Position; NUM_LOCATIONS] = [
    Position::new(0, 0),
    Position::new(0, 4),
    Position::new(4, 0),
    Position::new(4, 3),
];

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Index of the landmark at this position, if any
    pub fn landmark(self) -> Option<usize> {
        LOCATIONS.iter().position(|&loc| loc == self)
    }

    fn validate(self) -> Result<Self> {
        check_field("row", self.row, GRID_SIZE)?;
        check_field("col", self.col, GRID_SIZE)?;
        Ok(self)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// An action in the taxi problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    South,
    North,
    East,
    West,
    Pickup,
    Dropoff,
}

impl Action {
    /// All actions in index order
    pub const ALL: [Action; NUM_ACTIONS] = [
        Action::South,
        Action::North,
        Action::East,
        Action::West,
        Action::Pickup,
        Action::Dropoff,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::ActionOutOfRange {
                action: index,
                limit: NUM_ACTIONS,
            })
    }

    /// True for the four movement actions
    pub fn is_navigation(self) -> bool {
        !matches!(self, Action::Pickup | Action::Dropoff)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::South => "south",
            Action::North => "north",
            Action::East => "east",
            Action::West => "west",
            Action::Pickup => "pickup",
            Action::Dropoff => "dropoff",
        };
        f.write_str(name)
    }
}

/// Decoded full-problem state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaxiState {
    pub taxi: Position,
    /// Landmark index in `0..4`, or [`PASSENGER_IN_TAXI`]
    pub passenger: usize,
    pub destination: usize,
}

impl TaxiState {
    pub fn new(taxi: Position, passenger: usize, destination: usize) -> Result<Self> {
        taxi.validate()?;
        check_field("passenger", passenger, NUM_LOCATIONS + 1)?;
        check_field("destination", destination, NUM_LOCATIONS)?;
        Ok(Self {
            taxi,
            passenger,
            destination,
        })
    }

    /// Unpack a state identifier in `0..500`
    pub fn decode(state: usize) -> Result<Self> {
        if state >= NUM_STATES {
            return Err(Error::StateOutOfRange {
                state,
                limit: NUM_STATES,
            });
        }
        let mut rest = state;
        let destination = rest % NUM_LOCATIONS;
        rest /= NUM_LOCATIONS;
        let passenger = rest % (NUM_LOCATIONS + 1);
        rest /= NUM_LOCATIONS + 1;
        let col = rest % GRID_SIZE;
        let row = rest / GRID_SIZE;
        Ok(Self {
            taxi: Position::new(row, col),
            passenger,
            destination,
        })
    }

    pub fn encode(&self) -> usize {
        ((self.taxi.row * GRID_SIZE + self.taxi.col) * (NUM_LOCATIONS + 1) + self.passenger)
            * NUM_LOCATIONS
            + self.destination
    }

    pub fn passenger_in_taxi(&self) -> bool {
        self.passenger == PASSENGER_IN_TAXI
    }

    /// The passenger is waiting and the taxi stands on their landmark
    pub fn can_pick_up(&self) -> bool {
        !self.passenger_in_taxi() && self.taxi == LOCATIONS[self.passenger]
    }

    /// The passenger is aboard and the taxi stands on the destination
    pub fn can_drop_off(&self) -> bool {
        self.passenger_in_taxi() && self.taxi == LOCATIONS[self.destination]
    }

    /// Where the taxi has to drive next: the passenger if still waiting,
    /// otherwise the destination.
    pub fn effective_destination(&self) -> usize {
        if self.passenger_in_taxi() {
            self.destination
        } else {
            self.passenger
        }
    }

    /// Projection onto the navigation sub-problem
    pub fn sub_state(&self) -> SubState {
        SubState {
            taxi: self.taxi,
            destination: self.effective_destination(),
        }
    }
}

/// Decoded navigation sub-problem state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubState {
    pub taxi: Position,
    pub destination: usize,
}

impl SubState {
    pub fn new(taxi: Position, destination: usize) -> Result<Self> {
        taxi.validate()?;
        check_field("destination", destination, NUM_LOCATIONS)?;
        Ok(Self { taxi, destination })
    }

    /// Unpack a sub-state code in `0..100`
    pub fn decode(code: usize) -> Result<Self> {
        if code >= NUM_SUB_STATES {
            return Err(Error::StateOutOfRange {
                state: code,
                limit: NUM_SUB_STATES,
            });
        }
        let destination = code % NUM_LOCATIONS;
        let rest = code / NUM_LOCATIONS;
        Ok(Self {
            taxi: Position::new(rest / GRID_SIZE, rest % GRID_SIZE),
            destination,
        })
    }

    pub fn encode(&self) -> usize {
        (self.taxi.row * GRID_SIZE + self.taxi.col) * NUM_LOCATIONS + self.destination
    }

    /// The taxi has reached the landmark it is driving towards
    pub fn arrived(&self) -> bool {
        self.taxi == LOCATIONS[self.destination]
    }
}

fn check_field(field: &'static str, value: usize, limit: usize) -> Result<()> {
    if value < limit {
        Ok(())
    } else {
        Err(Error::FieldOutOfRange {
            field,
            value,
            limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_zero_decodes_to_origin() {
        let state = TaxiState::decode(0).unwrap();
        assert_eq!(state.taxi, Position::new(0, 0));
        assert_eq!(state.passenger, 0);
        assert_eq!(state.destination, 0);
        assert!(state.can_pick_up());
        assert!(!state.can_drop_off());
    }

    #[test]
    fn test_last_state_decodes_to_far_corner() {
        let state = TaxiState::decode(NUM_STATES - 1).unwrap();
        assert_eq!(state.taxi, Position::new(4, 4));
        assert_eq!(state.passenger, PASSENGER_IN_TAXI);
        assert_eq!(state.destination, 3);
    }

    #[test]
    fn test_destination_is_least_significant() {
        assert_eq!(TaxiState::decode(3).unwrap().destination, 3);
        assert_eq!(TaxiState::decode(4).unwrap().passenger, 1);
        assert_eq!(TaxiState::decode(20).unwrap().taxi, Position::new(0, 1));
        assert_eq!(TaxiState::decode(100).unwrap().taxi, Position::new(1, 0));
    }

    #[test]
    fn test_decode_rejects_out_of_range() {
        assert!(matches!(
            TaxiState::decode(500),
            Err(Error::StateOutOfRange { state: 500, limit: 500 })
        ));
        assert!(matches!(
            SubState::decode(100),
            Err(Error::StateOutOfRange { state: 100, limit: 100 })
        ));
    }

    #[test]
    fn test_new_rejects_bad_fields() {
        assert!(TaxiState::new(Position::new(5, 0), 0, 0).is_err());
        assert!(TaxiState::new(Position::new(0, 0), 5, 0).is_err());
        assert!(TaxiState::new(Position::new(0, 0), 0, 4).is_err());
        assert!(SubState::new(Position::new(0, 5), 0).is_err());
    }

    #[test]
    fn test_drop_off_requires_passenger_aboard() {
        // Taxi at G with passenger aboard bound for G
        let state = TaxiState::new(LOCATIONS[1], PASSENGER_IN_TAXI, 1).unwrap();
        assert!(state.can_drop_off());
        assert!(!state.can_pick_up());

        // Same square, passenger still waiting at R
        let waiting = TaxiState::new(LOCATIONS[1], 0, 1).unwrap();
        assert!(!waiting.can_drop_off());
        assert!(!waiting.can_pick_up());
    }

    #[test]
    fn test_sub_state_tracks_effective_destination() {
        let waiting = TaxiState::new(Position::new(2, 2), 3, 0).unwrap();
        assert_eq!(waiting.sub_state().destination, 3);

        let aboard = TaxiState::new(Position::new(2, 2), PASSENGER_IN_TAXI, 0).unwrap();
        assert_eq!(aboard.sub_state().destination, 0);
        assert_eq!(aboard.sub_state().taxi, Position::new(2, 2));
    }

    #[test]
    fn test_action_indices() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i).unwrap(), *action);
        }
        assert!(Action::from_index(6).is_err());
        assert!(!Action::Pickup.is_navigation());
        assert!(Action::West.is_navigation());
    }

    #[test]
    fn test_landmark_lookup() {
        assert_eq!(Position::new(4, 3).landmark(), Some(3));
        assert_eq!(Position::new(2, 2).landmark(), None);
    }
}
