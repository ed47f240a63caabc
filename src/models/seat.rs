use serde::{Deserialize, Serialize};

/// Одно место в вагоне. Топология неизменна, меняется только `reserved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub number: u32,
    pub row: usize,
    pub col: usize,
    pub reserved: bool,
}

// Элемент ответа GET /api/seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatStatus {
    pub seat_number: u32,
    pub is_reserved: bool,
}

impl From<&Seat> for SeatStatus {
    fn from(seat: &Seat) -> Self {
        Self { seat_number: seat.number, is_reserved: seat.reserved }
    }
}
