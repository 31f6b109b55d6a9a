// Public entry points: each call is one read-match-mutate-write pass over
// the inventory file. No state is kept between calls.
use std::path::Path;

use tracing::warn;

use crate::error::InventoryError;
use crate::matcher::match_rows;
use crate::table::Table;

#[derive(Debug, Clone, Copy)]
enum Direction {
    Decrement,
    Increment,
}

/// Decrease `hotel_name`'s available room count by `amount` (clamped at 0)
/// and rewrite the file atomically. Returns the row's new availability.
///
/// Callers booking a single room pass `amount = 1`.
pub fn decrement_availability(
    path: impl AsRef<Path>,
    hotel_name: &str,
    amount: i64,
) -> Result<u32, InventoryError> {
    apply(path.as_ref(), hotel_name, amount, Direction::Decrement)
}

/// Increase `hotel_name`'s available room count by `amount` and rewrite
/// the file atomically. Returns the row's new availability.
pub fn increment_availability(
    path: impl AsRef<Path>,
    hotel_name: &str,
    amount: i64,
) -> Result<u32, InventoryError> {
    apply(path.as_ref(), hotel_name, amount, Direction::Increment)
}

fn apply(
    path: &Path,
    hotel_name: &str,
    amount: i64,
    direction: Direction,
) -> Result<u32, InventoryError> {
    if amount <= 0 {
        return Err(InventoryError::InvalidAmount(amount));
    }
    let magnitude = u32::try_from(amount).unwrap_or(u32::MAX);

    let mut table = Table::load(path)?;
    let matched = match_rows(&table, hotel_name);
    let &target = matched
        .first()
        .ok_or_else(|| InventoryError::NoMatch(hotel_name.to_string()))?;
    if matched.len() > 1 {
        // Duplicate hotel rows are a data-entry smell; only the first row
        // in file order is updated.
        warn!(
            hotel = hotel_name,
            matches = matched.len(),
            "ambiguous hotel name, updating first match only"
        );
    }

    let current = table.rooms_available(target);
    let new_value = match direction {
        Direction::Decrement => current.saturating_sub(magnitude),
        Direction::Increment => current.saturating_add(magnitude),
    };
    table.set_rooms_available(target, new_value);
    table.persist(path)?;

    Ok(new_value)
}
