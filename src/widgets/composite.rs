//! Pieces shared by the multi-column pickers.

use tokio::time::Instant;

use crate::geometry::Region;

/// Callback through which a composite reports a new value to its host.
pub type ChangeCallback<T> = Box<dyn FnMut(T)>;

/// The latest of the given pending deadlines.
pub(crate) fn latest_deadline(deadlines: impl IntoIterator<Item = Option<Instant>>) -> Option<Instant> {
    deadlines.into_iter().flatten().max()
}

/// The column whose region contains (x, y).
pub(crate) fn column_at<F: Copy>(columns: &[(F, Region)], x: i32, y: i32) -> Option<F> {
    columns
        .iter()
        .find(|(_, region)| region.contains(x, y))
        .map(|(field, _)| *field)
}

/// Move `delta` places through `order` from `current`, wrapping around.
pub(crate) fn cycle<F: Copy + PartialEq>(order: &[F], current: F, delta: i32) -> F {
    let len = order.len() as i32;
    let pos = order.iter().position(|f| *f == current).unwrap_or(0) as i32;
    order[(pos + delta).rem_euclid(len) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn latest_deadline_skips_idle_columns() {
        let t0 = Instant::now();
        let later = t0 + Duration::from_millis(5);
        assert_eq!(latest_deadline([None, Some(t0), Some(later)]), Some(later));
        assert_eq!(latest_deadline([None, None]), None);
    }

    #[test]
    fn column_lookup() {
        let columns = [('a', Region::new(0, 0, 2, 3)), ('b', Region::new(3, 0, 2, 3))];
        assert_eq!(column_at(&columns, 1, 1), Some('a'));
        assert_eq!(column_at(&columns, 2, 1), None);
        assert_eq!(column_at(&columns, 4, 2), Some('b'));
        assert_eq!(column_at(&columns, 4, 3), None);
    }

    #[test]
    fn cycle_wraps() {
        let order = [1, 2, 3];
        assert_eq!(cycle(&order, 1, 1), 2);
        assert_eq!(cycle(&order, 3, 1), 1);
        assert_eq!(cycle(&order, 1, -1), 3);
    }
}
