pub mod seat_map;
pub mod quota;
pub mod allocation;
pub mod reservation;

pub use reservation::{OccupancySummary, ReservationService};
