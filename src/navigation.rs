//! Previous/next browsing between detail records.

use schema::{Direction, RecordId};

/// Id to load after moving one step in `direction` from `current`.
///
/// `current` is `None` when the detail session holds no record (still
/// loading, or the fetch failed); that case and the `0` placeholder both
/// target `1`.
///
/// `Next` is unbounded apart from saturating at `RecordId::MAX`; the remote
/// index reports a missing id itself. `Previous` from `1` targets `0` even
/// though the placeholder is hidden from list views. Ids are unsigned, so the
/// target is never negative.
pub fn navigate(current: Option<RecordId>, direction: Direction) -> RecordId {
    match (current, direction) {
        (None | Some(0), _) => 1,
        (Some(id), Direction::Next) => id.saturating_add(1),
        (Some(id), Direction::Previous) => id - 1,
    }
}
