//! Выбор мест под запрос.
//!
//! Чистая функция от среза занятости: одинаковый вход всегда даёт одинаковый
//! результат. Сначала ищется первый ряд, где группа помещается целиком
//! (младшие колонки). Если такого нет, места набираются из рядов с наибольшим
//! числом свободных мест, чтобы затронуть как можно меньше рядов.
//! Приоритетный запрос при наличии квоты сначала ищет места только в рядах квоты.

use crate::error::ReservationError;
use crate::models::Priority;
use crate::services::quota::PriorityQuotaManager;
use crate::services::seat_map::{SeatSnapshot, ROW_COUNT};

pub const MIN_SEATS_PER_REQUEST: usize = 1;
pub const MAX_SEATS_PER_REQUEST: usize = 7;

/// Результат выбора: номера мест по возрастанию и сколько из них списать с квоты.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub seats: Vec<u32>,
    pub quota_used: usize,
}

pub fn select(
    snapshot: &SeatSnapshot,
    count: usize,
    priority: Priority,
    quota: &PriorityQuotaManager,
) -> Result<Allocation, ReservationError> {
    if !(MIN_SEATS_PER_REQUEST..=MAX_SEATS_PER_REQUEST).contains(&count) {
        return Err(ReservationError::Capacity { requested: count });
    }

    let available = snapshot.available();
    let insufficient = ReservationError::InsufficientSeats { requested: count, available };
    if available < count {
        return Err(insufficient);
    }

    let rows: Vec<Vec<u32>> = (0..ROW_COUNT).map(|row| snapshot.free_in_row(row)).collect();
    let quota_rows = &rows[..quota.quota_rows()];

    let use_quota = priority.is_priority() && quota.remaining() > 0;
    let seats = if use_quota {
        pick(quota_rows, count).or_else(|| pick(&rows, count))
    } else {
        pick(&rows, count)
    }
    .ok_or(insufficient)?;

    let quota_used = if use_quota {
        let in_quota = snapshot
            .seats()
            .iter()
            .filter(|seat| quota.is_quota_row(seat.row) && seats.contains(&seat.number))
            .count();
        in_quota.min(quota.remaining())
    } else {
        0
    };

    Ok(Allocation { seats, quota_used })
}

/// `rows[i]` - свободные места ряда `i` по возрастанию колонки.
fn pick(rows: &[Vec<u32>], count: usize) -> Option<Vec<u32>> {
    if let Some(row) = rows.iter().find(|row| row.len() >= count) {
        return Some(row[..count].to_vec());
    }

    if rows.iter().map(Vec::len).sum::<usize>() < count {
        return None;
    }

    // sort_by стабилен: при равенстве остаётся меньший индекс ряда
    let mut order: Vec<&Vec<u32>> = rows.iter().collect();
    order.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut seats: Vec<u32> = order.into_iter().flatten().copied().take(count).collect();
    seats.sort_unstable();
    Some(seats)
}
