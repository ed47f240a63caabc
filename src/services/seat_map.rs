//! Топология вагона и занятость мест.
//!
//! Ряды 0-10 содержат по 7 мест, ряд 11 - 3 места. Номера мест идут
//! построчно начиная с 1, итого 80 мест. Топология не меняется, меняется
//! только флаг `reserved`.

use std::collections::BTreeSet;

use crate::config::CoachConfig;
use crate::error::ReservationError;
use crate::models::{Seat, SeatStatus};

pub const ROW_COUNT: usize = 12;
pub const FULL_ROW_WIDTH: usize = 7;
pub const LAST_ROW_WIDTH: usize = 3;
pub const SEAT_COUNT: usize = (ROW_COUNT - 1) * FULL_ROW_WIDTH + LAST_ROW_WIDTH;

/// Число мест в ряду `row`.
pub fn row_width(row: usize) -> usize {
    match row {
        r if r + 1 < ROW_COUNT => FULL_ROW_WIDTH,
        r if r + 1 == ROW_COUNT => LAST_ROW_WIDTH,
        _ => 0,
    }
}

/// Детерминированная предварительная бронь, применяемая при старте и сбросе.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    modulus: u32,
    residue: u32,
}

impl Baseline {
    pub fn new(modulus: u32, residue: u32) -> Self {
        Self { modulus, residue }
    }

    /// Без предварительной брони: все места свободны.
    pub fn none() -> Self {
        Self { modulus: 0, residue: 0 }
    }

    pub fn from_config(config: &CoachConfig) -> Self {
        Self::new(config.prebook_modulus, config.prebook_residue)
    }

    pub fn contains(&self, number: u32) -> bool {
        self.modulus != 0 && number % self.modulus == self.residue
    }

    /// Номера предзабронированных мест по возрастанию.
    pub fn seats(&self) -> Vec<u32> {
        (1..=SEAT_COUNT as u32).filter(|n| self.contains(*n)).collect()
    }
}

/// Неизменяемый срез занятости, по которому принимается решение о выделении.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatSnapshot {
    seats: Vec<Seat>,
}

impl SeatSnapshot {
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Свободные места ряда в порядке возрастания колонки.
    pub fn free_in_row(&self, row: usize) -> Vec<u32> {
        self.seats
            .iter()
            .filter(|s| s.row == row && !s.reserved)
            .map(|s| s.number)
            .collect()
    }

    pub fn available(&self) -> usize {
        self.seats.iter().filter(|s| !s.reserved).count()
    }

    pub fn is_reserved(&self, number: u32) -> Option<bool> {
        seat_index(number).map(|idx| self.seats[idx].reserved)
    }
}

#[derive(Debug, Clone)]
pub struct SeatMap {
    seats: Vec<Seat>,
    baseline: Baseline,
}

fn seat_index(number: u32) -> Option<usize> {
    let idx = (number as usize).checked_sub(1)?;
    (idx < SEAT_COUNT).then_some(idx)
}

impl SeatMap {
    /// Строит 80 свободных мест и применяет предварительную бронь.
    pub fn initialize(baseline: Baseline) -> Self {
        let seats = (0..SEAT_COUNT)
            .map(|idx| {
                let number = idx as u32 + 1;
                Seat {
                    number,
                    row: idx / FULL_ROW_WIDTH,
                    col: idx % FULL_ROW_WIDTH,
                    reserved: baseline.contains(number),
                }
            })
            .collect();

        Self { seats, baseline }
    }

    /// Возвращает карту к предварительной брони.
    pub fn reset(&mut self) {
        for seat in &mut self.seats {
            seat.reserved = self.baseline.contains(seat.number);
        }
    }

    pub fn baseline(&self) -> Baseline {
        self.baseline
    }

    pub fn snapshot(&self) -> SeatSnapshot {
        SeatSnapshot { seats: self.seats.clone() }
    }

    /// Помечает места занятыми. Сначала проверяет весь набор, поэтому при
    /// ошибке карта не меняется.
    pub fn mark_reserved(&mut self, numbers: &[u32]) -> Result<(), ReservationError> {
        let mut seen = BTreeSet::new();
        for &number in numbers {
            let idx = seat_index(number).ok_or(ReservationError::InvalidSeat { seat: number })?;
            if self.seats[idx].reserved || !seen.insert(number) {
                return Err(ReservationError::InvalidSeat { seat: number });
            }
        }

        for idx in seen.into_iter().filter_map(seat_index) {
            self.seats[idx].reserved = true;
        }
        Ok(())
    }

    pub fn list(&self) -> Vec<SeatStatus> {
        self.seats.iter().map(SeatStatus::from).collect()
    }

    pub fn available(&self) -> usize {
        self.seats.iter().filter(|s| !s.reserved).count()
    }

    /// Свободные места в рядах `0..rows`.
    pub fn available_in_rows(&self, rows: usize) -> usize {
        self.seats.iter().filter(|s| s.row < rows && !s.reserved).count()
    }
}
