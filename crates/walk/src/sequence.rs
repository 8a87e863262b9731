//! Positional access over a walk.
//!
//! A walk is lazy, so every method here runs a full pass and materializes its
//! output before answering.

use crate::builder::PathIterator;
use crate::entity::PathEntity;
use crate::entry::WalkEntry;
use crate::error::WalkError;

impl<P: PathEntity> PathIterator<P> {
    /// Runs a pass and collects every entry.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkError`] the pass produced.
    pub fn entries(&self) -> Result<Vec<WalkEntry<P>>, WalkError> {
        self.iter().collect()
    }

    /// Number of entries one pass produces.
    ///
    /// # Errors
    ///
    /// Returns the first [`WalkError`] the pass produced.
    pub fn count(&self) -> Result<usize, WalkError> {
        self.iter()
            .try_fold(0, |count, entry| entry.map(|_| count + 1))
    }

    /// Entry at `index`; negative indexes count from the end.
    ///
    /// # Errors
    ///
    /// Returns [`WalkErrorKind::IndexOutOfRange`](crate::WalkErrorKind::IndexOutOfRange)
    /// when `index` falls outside the pass, or the pass's own error.
    pub fn get(&self, index: isize) -> Result<WalkEntry<P>, WalkError> {
        let mut entries = self.entries()?;
        let len = entries.len();
        let position =
            resolve_index(index, len).ok_or_else(|| WalkError::index_out_of_range(index, len))?;
        Ok(entries.swap_remove(position))
    }

    /// Entries selected by `start`, `stop` and `step`.
    ///
    /// Bounds behave like sequence slices: negative bounds count from the
    /// end, bounds past either end are clamped, and a negative `step` walks
    /// backwards with defaults swapped. Out-of-range bounds never fail.
    ///
    /// # Errors
    ///
    /// Returns [`WalkErrorKind::InvalidSlice`](crate::WalkErrorKind::InvalidSlice)
    /// when `step` is zero, or the pass's own error.
    pub fn slice(
        &self,
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    ) -> Result<Vec<WalkEntry<P>>, WalkError> {
        if step == 0 {
            return Err(WalkError::invalid_slice());
        }
        let entries = self.entries()?;
        Ok(slice_positions(entries.len(), start, stop, step)
            .into_iter()
            .filter_map(|position| entries.get(position).cloned())
            .collect())
    }
}

fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index < 0 {
        len.checked_sub(index.unsigned_abs())
    } else {
        usize::try_from(index).ok().filter(|&position| position < len)
    }
}

fn slice_positions(
    len: usize,
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
) -> Vec<usize> {
    let len = isize::try_from(len).unwrap_or(isize::MAX);
    let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
    let clamp = |bound: isize| {
        let bound = if bound < 0 { bound.saturating_add(len) } else { bound };
        bound.clamp(lower, upper)
    };
    let start = start.map_or(if step < 0 { upper } else { lower }, clamp);
    let stop = stop.map_or(if step < 0 { lower } else { upper }, clamp);

    let mut positions = Vec::new();
    let mut cursor = start;
    while (step > 0 && cursor < stop) || (step < 0 && cursor > stop) {
        if let Ok(position) = usize::try_from(cursor) {
            positions.push(position);
        }
        match cursor.checked_add(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_index_supports_negative_positions() {
        assert_eq!(resolve_index(0, 3), Some(0));
        assert_eq!(resolve_index(2, 3), Some(2));
        assert_eq!(resolve_index(3, 3), None);
        assert_eq!(resolve_index(-1, 3), Some(2));
        assert_eq!(resolve_index(-3, 3), Some(0));
        assert_eq!(resolve_index(-4, 3), None);
        assert_eq!(resolve_index(0, 0), None);
    }

    #[test]
    fn slice_positions_forward() {
        assert_eq!(slice_positions(5, None, None, 1), [0, 1, 2, 3, 4]);
        assert_eq!(slice_positions(5, Some(1), Some(3), 1), [1, 2]);
        assert_eq!(slice_positions(5, None, None, 2), [0, 2, 4]);
        assert_eq!(slice_positions(5, Some(-2), None, 1), [3, 4]);
        assert_eq!(slice_positions(5, Some(-10), Some(10), 1), [0, 1, 2, 3, 4]);
        assert!(slice_positions(5, Some(4), Some(1), 1).is_empty());
    }

    #[test]
    fn slice_positions_backward() {
        assert_eq!(slice_positions(5, None, None, -1), [4, 3, 2, 1, 0]);
        assert_eq!(slice_positions(5, Some(3), Some(0), -1), [3, 2, 1]);
        assert_eq!(slice_positions(5, None, None, -2), [4, 2, 0]);
        assert_eq!(slice_positions(5, Some(10), Some(-10), -1), [4, 3, 2, 1, 0]);
        assert!(slice_positions(0, None, None, -1).is_empty());
    }
}
