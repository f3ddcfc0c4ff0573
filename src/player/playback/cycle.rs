//! Clamped stepping through an ordered list relative to the current position.
//!
//! Both speed and chapter navigation locate "where we are" by scanning for
//! the last element that is at or before a reference value, then step from
//! there. Keeping this free of any UI lookup lets it be tested against
//! synthetic sequences.

/// Step `step` positions away from the last element matching
/// `is_at_or_before_current`, clamped to the bounds of `sequence`.
///
/// When nothing matches, the current position is taken to be just before
/// the first element, so `step = 1` selects the first element.
///
/// # Returns
/// The selected element, or `None` only when `sequence` is empty.
pub fn cycle<T, P>(sequence: &[T], step: i64, is_at_or_before_current: P) -> Option<&T>
where
    P: Fn(&T) -> bool,
{
    let last = sequence.len().checked_sub(1)?;

    // Last match wins so equal keys resolve to the most recently reached item
    let current = sequence
        .iter()
        .rposition(is_at_or_before_current)
        .map_or(-1, |i| i as i64);

    let target = current.saturating_add(step).clamp(0, last as i64) as usize;
    sequence.get(target)
}
