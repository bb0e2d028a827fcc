use std::fmt;

/// A map from codepoints to values, stored as sorted closed intervals.
///
/// Unicode data files key most properties by codepoint ranges; keeping them
/// as ranges avoids expanding planes of private-use or unassigned codepoints
/// into per-codepoint entries.
#[derive(Clone)]
pub(crate) struct RangeMap<T> {
    ranges: Vec<(u32, u32, T)>,
}

impl<T> Default for RangeMap<T> {
    fn default() -> Self {
        RangeMap { ranges: Vec::new() }
    }
}

impl<T> RangeMap<T> {
    /// Records `value` for every codepoint in `start..=end`.
    ///
    /// Ranges may arrive in any order; call `finish` before lookups.
    pub(crate) fn insert(&mut self, start: u32, end: u32, value: T) {
        if start <= end {
            self.ranges.push((start, end, value));
        }
    }

    /// Sorts the ranges by start, dropping any that overlap a range sorted before it.
    ///
    /// The range with the lowest start wins; ranges with equal starts keep insertion order.
    pub(crate) fn finish(&mut self) {
        self.ranges.sort_by_key(|&(start, _, _)| start);
        let mut last_end: Option<u32> = None;
        self.ranges.retain(|&(start, end, _)| {
            if last_end.map_or(false, |last| start <= last) {
                log::debug!("ignoring overlapping range {:04X}..{:04X}", start, end);
                return false;
            }
            last_end = Some(end);
            true
        });
    }

    pub(crate) fn get(&self, cp: u32) -> Option<&T> {
        let idx = self.ranges.partition_point(|&(start, _, _)| start <= cp);
        let (_, end, value) = self.ranges.get(idx.checked_sub(1)?)?;
        if cp <= *end {
            Some(value)
        } else {
            None
        }
    }

    pub(crate) fn contains(&self, cp: u32) -> bool {
        self.get(cp).is_some()
    }

    /// The largest codepoint covered by any range.
    pub(crate) fn max(&self) -> Option<u32> {
        self.ranges.iter().map(|&(_, end, _)| end).max()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        self.ranges.iter().map(|(start, end, value)| (*start, *end, value))
    }

    pub(crate) fn len(&self) -> usize {
        self.ranges.len()
    }
}

impl<T> fmt::Debug for RangeMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RangeMap({} ranges)", self.ranges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::RangeMap;

    #[test]
    fn test_lookup() {
        let mut map = RangeMap::default();
        map.insert(0x370, 0x3FF, "Greek and Coptic");
        map.insert(0x0, 0x7F, "Basic Latin");
        map.insert(0x80, 0xFF, "Latin-1 Supplement");
        map.finish();
        assert_eq!(Some(&"Basic Latin"), map.get(0x0));
        assert_eq!(Some(&"Basic Latin"), map.get(0x7F));
        assert_eq!(Some(&"Latin-1 Supplement"), map.get(0x80));
        assert_eq!(None, map.get(0x100));
        assert_eq!(Some(&"Greek and Coptic"), map.get(0x3FF));
        assert_eq!(None, map.get(0x400));
        assert_eq!(Some(0x3FF), map.max());
    }

    #[test]
    fn test_overlap_keeps_first() {
        let mut map = RangeMap::default();
        map.insert(0x10, 0x20, 1);
        map.insert(0x18, 0x30, 2);
        map.insert(0x25, 0x24, 3);
        map.finish();
        assert_eq!(1, map.len());
        assert_eq!(Some(&1), map.get(0x18));
        assert_eq!(None, map.get(0x28));
    }

    #[test]
    fn test_overlap_keeps_lowest_start() {
        let mut map = RangeMap::default();
        map.insert(0x18, 0x30, 1);
        map.insert(0x10, 0x20, 2);
        map.insert(0x10, 0x12, 3);
        map.finish();
        assert_eq!(1, map.len());
        assert_eq!(Some(&2), map.get(0x18));
        assert_eq!(None, map.get(0x28));
    }
}
