pub mod seat;
pub mod reservation;

pub use seat::{Seat, SeatStatus};
pub use reservation::{Priority, Reservation};
