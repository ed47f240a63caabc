use crate::error::ReservationError;
use crate::services::seat_map::{row_width, ROW_COUNT};

/// Учёт мест, отведённых под приоритетные запросы (первые ряды вагона).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityQuotaManager {
    quota_rows: usize,
    total_quota_seats: usize,
    consumed_by_priority: usize,
}

impl PriorityQuotaManager {
    pub fn new(quota_rows: usize) -> Self {
        let quota_rows = quota_rows.min(ROW_COUNT);
        Self {
            quota_rows,
            total_quota_seats: (0..quota_rows).map(row_width).sum(),
            consumed_by_priority: 0,
        }
    }

    /// Ряды `0..quota_rows` образуют квоту.
    pub fn quota_rows(&self) -> usize {
        self.quota_rows
    }

    pub fn is_quota_row(&self, row: usize) -> bool {
        row < self.quota_rows
    }

    pub fn total(&self) -> usize {
        self.total_quota_seats
    }

    pub fn remaining(&self) -> usize {
        self.total_quota_seats - self.consumed_by_priority
    }

    pub fn consume(&mut self, n: usize) -> Result<(), ReservationError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(ReservationError::QuotaExceeded { requested: n, remaining });
        }
        self.consumed_by_priority += n;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.consumed_by_priority = 0;
    }
}
