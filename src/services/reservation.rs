//! Транзакционная граница бронирования.
//!
//! Карта мест, квота и журнал броней лежат под одной блокировкой записи:
//! чтение занятости, выбор мест и фиксация выполняются как одна неделимая
//! операция, поэтому два параллельных `reserve` не могут получить одно место.

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{error, info};

use crate::config::CoachConfig;
use crate::error::ReservationError;
use crate::models::{Priority, Reservation, SeatStatus};
use crate::services::allocation;
use crate::services::quota::PriorityQuotaManager;
use crate::services::seat_map::{Baseline, SeatMap, SEAT_COUNT};

#[derive(Debug)]
struct CoachState {
    seats: SeatMap,
    quota: PriorityQuotaManager,
    reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupancySummary {
    pub total: usize,
    pub available: usize,
    pub reserved: usize,
    pub priority_quota_remaining: usize,
}

#[derive(Debug)]
pub struct ReservationService {
    state: RwLock<CoachState>,
}

impl ReservationService {
    pub fn new(baseline: Baseline, quota_rows: usize) -> Self {
        Self {
            state: RwLock::new(CoachState {
                seats: SeatMap::initialize(baseline),
                quota: PriorityQuotaManager::new(quota_rows),
                reservations: Vec::new(),
            }),
        }
    }

    pub fn from_config(config: &CoachConfig) -> Self {
        Self::new(Baseline::from_config(config), config.priority_quota_rows)
    }

    /// Выбирает и фиксирует `count` мест. При любой ошибке состояние не меняется.
    pub fn reserve(&self, count: usize, priority: Priority) -> Result<Vec<u32>, ReservationError> {
        let mut state = self.state.write();

        let snapshot = state.seats.snapshot();
        let allocation = allocation::select(&snapshot, count, priority, &state.quota)?;

        // квоту проверяем до записи мест, чтобы ошибка не оставила частичных изменений
        if allocation.quota_used > state.quota.remaining() {
            let err = ReservationError::QuotaExceeded {
                requested: allocation.quota_used,
                remaining: state.quota.remaining(),
            };
            error!("allocation over-consumed priority quota: {}", err);
            return Err(err);
        }

        if let Err(e) = state.seats.mark_reserved(&allocation.seats) {
            error!("seat map rejected allocation {:?}: {}", allocation.seats, e);
            return Err(e);
        }
        state.quota.consume(allocation.quota_used)?;

        let reservation = Reservation::new(allocation.seats.clone(), priority);
        info!(
            reservation_id = %reservation.id,
            ?priority,
            quota_used = allocation.quota_used,
            "reserved seats {:?}",
            reservation.seat_numbers
        );
        state.reservations.push(reservation);

        Ok(allocation.seats)
    }

    /// Сбрасывает все брони и возвращает карту к предварительной брони.
    pub fn reset(&self) -> Vec<u32> {
        let mut state = self.state.write();
        let dropped = state.reservations.len();

        state.seats.reset();
        state.quota.reset();
        state.reservations.clear();

        let prebooked = state.seats.baseline().seats();
        info!("reset: dropped {} reservations, {} seats prebooked", dropped, prebooked.len());
        prebooked
    }

    pub fn list(&self) -> Vec<SeatStatus> {
        self.state.read().seats.list()
    }

    pub fn reservations(&self) -> Vec<Reservation> {
        self.state.read().reservations.clone()
    }

    /// Остаток квоты ограничен свободными местами в рядах квоты: обычные
    /// брони тоже могут их занять, не списывая квоту.
    pub fn summary(&self) -> OccupancySummary {
        let state = self.state.read();
        let available = state.seats.available();
        let free_in_quota = state.seats.available_in_rows(state.quota.quota_rows());
        OccupancySummary {
            total: SEAT_COUNT,
            available,
            reserved: SEAT_COUNT - available,
            priority_quota_remaining: state.quota.remaining().min(free_in_quota),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn empty_service() -> ReservationService {
        ReservationService::new(Baseline::none(), 1)
    }

    #[test]
    fn capacity_errors_leave_map_unchanged() {
        let service = ReservationService::new(Baseline::new(9, 5), 1);
        let before = service.list();

        for count in [0, 8] {
            assert_eq!(
                service.reserve(count, Priority::Normal),
                Err(ReservationError::Capacity { requested: count })
            );
        }
        assert_eq!(service.list(), before);
        assert!(service.reservations().is_empty());
    }

    #[test]
    fn reserve_commits_and_records_reservation() {
        let service = empty_service();
        assert_eq!(service.reserve(5, Priority::Normal).unwrap(), vec![1, 2, 3, 4, 5]);

        let listed: Vec<u32> = service.list().iter().filter(|s| s.is_reserved).map(|s| s.seat_number).collect();
        assert_eq!(listed, vec![1, 2, 3, 4, 5]);

        let ledger = service.reservations();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].seat_numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(ledger[0].priority, Priority::Normal);
    }

    #[test]
    fn repeated_reservations_never_reuse_seats() {
        let service = empty_service();
        let mut seen = HashSet::new();

        for _ in 0..10 {
            let seats = service.reserve(7, Priority::Normal).unwrap();
            assert_eq!(seats.len(), 7);
            for n in seats {
                assert!(seen.insert(n), "seat {n} reserved twice");
            }
        }
        assert_eq!(service.summary().available, 10);

        // свободны ряд 10 (7 мест) и ряд 11 (3 места)
        let next = service.reserve(5, Priority::Normal).unwrap();
        assert!(next.iter().all(|n| seen.insert(*n)));
        assert_eq!(service.summary().available, 5);

        assert_eq!(
            service.reserve(6, Priority::Normal),
            Err(ReservationError::InsufficientSeats { requested: 6, available: 5 })
        );
        assert_eq!(service.summary().available, 5);
    }

    #[test]
    fn priority_reservation_consumes_quota() {
        let service = empty_service();
        assert_eq!(service.reserve(3, Priority::Priority).unwrap(), vec![1, 2, 3]);
        assert_eq!(service.summary().priority_quota_remaining, 4);

        // обычные брони квоту не списывают, но занимают её места
        service.reserve(2, Priority::Normal).unwrap();
        assert_eq!(service.summary().priority_quota_remaining, 2);
        assert_eq!(service.reserve(2, Priority::Priority).unwrap(), vec![6, 7]);
        assert_eq!(service.summary().priority_quota_remaining, 0);
    }

    #[test]
    fn summary_quota_shrinks_when_quota_rows_fill_up() {
        let service = empty_service();
        service.reserve(7, Priority::Normal).unwrap();
        assert_eq!(service.summary().priority_quota_remaining, 0);

        // квота не списана, после сброса она снова доступна
        service.reset();
        assert_eq!(service.summary().priority_quota_remaining, 7);

        service.reserve(2, Priority::Priority).unwrap();
        service.reserve(3, Priority::Normal).unwrap();
        assert_eq!(service.summary().priority_quota_remaining, 2);
    }

    #[test]
    fn reset_is_idempotent_and_restores_quota() {
        let service = ReservationService::new(Baseline::new(9, 5), 1);
        service.reserve(4, Priority::Priority).unwrap();
        service.reserve(7, Priority::Normal).unwrap();

        let prebooked = service.reset();
        assert_eq!(prebooked, vec![5, 14, 23, 32, 41, 50, 59, 68, 77]);
        let first = service.list();
        service.reset();
        assert_eq!(service.list(), first);

        let summary = service.summary();
        assert_eq!(summary.reserved, 9);
        // место 5 в ряду квоты предзабронировано
        assert_eq!(summary.priority_quota_remaining, 6);
        assert!(service.reservations().is_empty());
    }

    #[test]
    fn baseline_shapes_first_reservation() {
        let service = ReservationService::new(Baseline::new(9, 5), 1);
        assert_eq!(service.reserve(5, Priority::Normal).unwrap(), vec![1, 2, 3, 4, 6]);
    }
}
