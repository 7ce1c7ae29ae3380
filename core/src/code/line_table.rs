use hashbrown::HashMap;

/// Byte offset -> source line, for the offsets where a new line starts.
pub type LineStarts = HashMap<usize, i64>;

/// Expand a compact line-number table into [`LineStarts`].
///
/// `lnotab` is a sequence of `(byte increment, line increment)` pairs, both
/// unsigned, starting from offset 0 at `first_line`. An entry is produced only
/// when the line actually changes, so several pairs that advance the line
/// without advancing the offset collapse into one.
pub fn line_starts(lnotab: &[u8], first_line: i64) -> LineStarts {
    let mut starts = LineStarts::new();
    let mut last_line = None;
    let mut line = first_line;
    let mut addr = 0usize;

    for pair in lnotab.chunks_exact(2) {
        let (byte_incr, line_incr) = (pair[0], pair[1]);
        if byte_incr != 0 {
            if last_line != Some(line) {
                starts.insert(addr, line);
                last_line = Some(line);
            }
            addr += usize::from(byte_incr);
        }
        line = line.saturating_add(i64::from(line_incr));
    }
    if last_line != Some(line) {
        starts.insert(addr, line);
    }

    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_starts_at_first_line() {
        let starts = line_starts(&[], 10);
        assert_eq!(starts.len(), 1);
        assert_eq!(starts.get(&0), Some(&10));
    }

    #[test]
    fn test_increments() {
        // line 2 at 0, line 3 at 12, line 4 at 16
        let starts = line_starts(&[0, 1, 12, 1, 4, 1], 1);
        assert_eq!(starts.len(), 3);
        assert_eq!(starts.get(&0), Some(&2));
        assert_eq!(starts.get(&12), Some(&3));
        assert_eq!(starts.get(&16), Some(&4));
    }

    #[test]
    fn test_large_jumps_are_split_across_pairs() {
        // 300 bytes without a line change, then one line later.
        let starts = line_starts(&[255, 0, 45, 1], 1);
        assert_eq!(starts.len(), 2);
        assert_eq!(starts.get(&0), Some(&1));
        assert_eq!(starts.get(&300), Some(&2));
    }

    #[test]
    fn test_trailing_odd_byte_is_ignored() {
        let starts = line_starts(&[3, 1, 7], 5);
        assert_eq!(starts.get(&0), Some(&5));
        assert_eq!(starts.get(&3), Some(&6));
        assert_eq!(starts.len(), 2);
    }
}
