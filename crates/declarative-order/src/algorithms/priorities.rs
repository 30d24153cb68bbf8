//! Priority assignment
//!
//! Turns a topological order into integer priorities spaced by `step`,
//! leaving room for consumers to slot in fixed points by hand.

use crate::domain::entities::{OrderResult, PriorityEntry};
use crate::domain::value_objects::ItemId;

/// Spacing used when no configuration overrides it.
pub const DEFAULT_STEP: i32 = 10;

/// Assign priorities to a topological order.
///
/// - the first item, if any, gets exactly `step`
/// - normal items start at `step` (no first item) or `2 * step`
/// - the last item, if any, gets the slot right after the last normal item
///
/// Markers that also appear in `ordered` (because other items reference
/// them) are numbered only once, in their marker slot.
pub fn assign_priorities(
    ordered: &[ItemId],
    first: Option<&ItemId>,
    last: Option<&ItemId>,
    step: i32,
) -> OrderResult {
    let mut entries = Vec::with_capacity(ordered.len() + 2);

    if let Some(first) = first {
        entries.push(PriorityEntry::new(first.clone(), step));
    }

    let mut slot = if first.is_some() { step * 2 } else { step };
    for item in ordered {
        if Some(item) == first || Some(item) == last {
            continue;
        }
        entries.push(PriorityEntry::new(item.clone(), slot));
        slot += step;
    }

    if let Some(last) = last {
        entries.push(PriorityEntry::new(last.clone(), slot));
    }

    OrderResult::new(step, entries)
}
