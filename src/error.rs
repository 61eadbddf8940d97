use crate::geometry::Seat;
use thiserror::Error;

/// Local invariant violations raised while seating members on a plan.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeatError {
    #[error("Seat at line {} col {} is forbidden", .seat.line, .seat.col)]
    SeatForbidden { seat: Seat },

    #[error("Seat at line {} col {} is outside the grid", .seat.line, .seat.col)]
    SeatOutOfGrid { seat: Seat },

    #[error("Seat at line {} col {} is already taken by {group}", .seat.line, .seat.col)]
    SeatOccupied { seat: Seat, group: String },

    #[error("Group {group} has {members} members but {seats} seats")]
    GroupSeatCountMismatch {
        group: String,
        members: usize,
        seats: usize,
    },
}

#[derive(Error, Debug)]
pub enum SeatForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Seating Error: {0}")]
    Seat(#[from] SeatError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    /// Raised by the `run` command when the optimizer stopped on a failed generation.
    #[error("Run aborted: {0}")]
    RunAborted(String),
}

pub type SfResult<T> = Result<T, SeatForgeError>;
