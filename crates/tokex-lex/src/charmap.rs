//! Character interval map.
//!
//! Both the tokenizer's dispatch table ("which state handles this
//! character") and the word/whitespace states ("is this a word character")
//! are driven by the same structure: an ordered list of character intervals
//! with attached values, where later additions shadow earlier ones.

/// An ordered set of `[from, to]` character intervals mapped to values.
///
/// Intervals are inclusive on both ends and may overlap; a point lookup
/// returns the value of the most recently added interval containing the
/// point. This makes it cheap to carve an exception out of a broad range:
///
/// ```
/// use tokex_lex::CharIntervalMap;
///
/// let mut map = CharIntervalMap::new();
/// map.add_interval('\0', '\u{7f}', false);
/// map.add_interval('A', 'Z', true);
/// assert_eq!(map.lookup('A'), Some(&true));
/// assert_eq!(map.lookup('a'), Some(&false));
/// assert_eq!(map.lookup('\u{100}'), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CharIntervalMap<T> {
    intervals: Vec<Interval<T>>,
}

#[derive(Clone, Debug)]
struct Interval<T> {
    from: char,
    to: char,
    value: T,
}

impl<T> CharIntervalMap<T> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            intervals: Vec::new(),
        }
    }

    /// Adds an inclusive interval mapped to `value`.
    ///
    /// If `from > to` the endpoints are swapped. The new interval shadows
    /// any earlier interval it overlaps.
    pub fn add_interval(&mut self, from: char, to: char, value: T) {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        self.intervals.push(Interval { from, to, value });
    }

    /// Returns the value of the last-added interval containing `symbol`,
    /// or `None` if no interval matches.
    pub fn lookup(&self, symbol: char) -> Option<&T> {
        self.intervals
            .iter()
            .rev()
            .find(|i| i.from <= symbol && symbol <= i.to)
            .map(|i| &i.value)
    }

    /// Removes all intervals.
    pub fn clear(&mut self) {
        self.intervals.clear();
    }

    /// Returns true if the map contains no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lookup() {
        let map: CharIntervalMap<u32> = CharIntervalMap::new();
        assert_eq!(map.lookup('a'), None);
    }

    #[test]
    fn test_single_interval() {
        let mut map = CharIntervalMap::new();
        map.add_interval('a', 'z', 1);
        assert_eq!(map.lookup('a'), Some(&1));
        assert_eq!(map.lookup('m'), Some(&1));
        assert_eq!(map.lookup('z'), Some(&1));
        assert_eq!(map.lookup('A'), None);
    }

    #[test]
    fn test_later_additions_shadow() {
        let mut map = CharIntervalMap::new();
        map.add_interval('\0', '\u{7f}', false);
        map.add_interval('A', 'Z', true);
        assert_eq!(map.lookup('A'), Some(&true));
        assert_eq!(map.lookup('a'), Some(&false));
    }

    #[test]
    fn test_swapped_endpoints() {
        let mut map = CharIntervalMap::new();
        map.add_interval('z', 'a', 7);
        assert_eq!(map.lookup('m'), Some(&7));
    }

    #[test]
    fn test_single_char_interval() {
        let mut map = CharIntervalMap::new();
        map.add_interval('-', '-', true);
        assert_eq!(map.lookup('-'), Some(&true));
        assert_eq!(map.lookup('.'), None);
    }

    #[test]
    fn test_clear() {
        let mut map = CharIntervalMap::new();
        map.add_interval('a', 'z', 1);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.lookup('a'), None);
    }
}
