//! Exact substring search using the Boyer-Moore bad-character rule.
//!
//! The searcher keeps a cursor so repeated calls to [`SkipSearcher::find_next`]
//! enumerate non-overlapping occurrences left to right. Each window is compared
//! in full; on a mismatch the window shifts by the skip value of the text byte
//! under the key's last position.

/// Size of the skip table, one entry per byte value
const ALPHABET: usize = 256;

/// Exact-match searcher for one key over one text
#[derive(Debug, Clone)]
pub struct SkipSearcher<'a> {
    text: &'a [u8],
    key: &'a [u8],
    skip: [usize; ALPHABET],
    cursor: usize,
}

impl<'a> SkipSearcher<'a> {
    pub fn new(text: &'a [u8], key: &'a [u8]) -> Self {
        Self {
            text,
            key,
            skip: build_skip_table(key),
            cursor: 0,
        }
    }

    /// Find the next occurrence at or after the cursor.
    ///
    /// Returns the match start and moves the cursor past the match. An empty
    /// key never matches.
    pub fn find_next(&mut self) -> Option<usize> {
        let found = self.search_from(self.cursor)?;
        self.cursor = found + self.key.len();
        Some(found)
    }

    /// Move the cursor back to the start of the text
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Current resume position
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn skip_for(&self, byte: u8) -> usize {
        self.skip[usize::from(byte)]
    }

    fn search_from(&self, start: usize) -> Option<usize> {
        let key_len = self.key.len();
        if key_len == 0 {
            return None;
        }
        let mut pos = start;
        while pos + key_len <= self.text.len() {
            if &self.text[pos..pos + key_len] == self.key {
                return Some(pos);
            }
            pos += self.skip[usize::from(self.text[pos + key_len - 1])];
        }
        None
    }
}

impl Iterator for SkipSearcher<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.find_next()
    }
}

/// Skip table: key length everywhere, then `len - i - 1` for each byte of the
/// key except the last, later occurrences overwriting earlier ones
fn build_skip_table(key: &[u8]) -> [usize; ALPHABET] {
    let mut skip = [key.len(); ALPHABET];
    if let Some((_, head)) = key.split_last() {
        for (i, &byte) in head.iter().enumerate() {
            skip[usize::from(byte)] = key.len() - i - 1;
        }
    }
    skip
}

/// True if `key` occurs anywhere in `text`
#[must_use]
pub fn contains(text: &str, key: &str) -> bool {
    SkipSearcher::new(text.as_bytes(), key.as_bytes())
        .find_next()
        .is_some()
}

/// Number of non-overlapping occurrences of `key` in `text`
#[must_use]
pub fn count_matches(text: &str, key: &str) -> usize {
    SkipSearcher::new(text.as_bytes(), key.as_bytes()).count()
}

/// True if `key` occurs exactly once in `text`
#[must_use]
pub fn has_unique_match(text: &str, key: &str) -> bool {
    let mut searcher = SkipSearcher::new(text.as_bytes(), key.as_bytes());
    searcher.find_next().is_some() && searcher.find_next().is_none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_non_overlapping(text: &[u8], key: &[u8]) -> Vec<usize> {
        let mut hits = Vec::new();
        if key.is_empty() {
            return hits;
        }
        let mut pos = 0;
        while pos + key.len() <= text.len() {
            if &text[pos..pos + key.len()] == key {
                hits.push(pos);
                pos += key.len();
            } else {
                pos += 1;
            }
        }
        hits
    }

    #[test]
    fn test_skip_table_uses_last_pre_terminal_occurrence() {
        let searcher = SkipSearcher::new(b"", b"GATGA");
        assert_eq!(searcher.skip_for(b'G'), 1);
        assert_eq!(searcher.skip_for(b'A'), 3);
        assert_eq!(searcher.skip_for(b'T'), 2);
        assert_eq!(searcher.skip_for(b'C'), 5);
    }

    #[test]
    fn test_find_and_resume() {
        let mut searcher = SkipSearcher::new(b"GAATTCxxGAATTC", b"GAATTC");
        assert_eq!(searcher.find_next(), Some(0));
        assert_eq!(searcher.cursor(), 6);
        assert_eq!(searcher.find_next(), Some(8));
        assert_eq!(searcher.find_next(), None);
        searcher.reset();
        assert_eq!(searcher.find_next(), Some(0));
    }

    #[test]
    fn test_matches_are_non_overlapping() {
        let hits: Vec<usize> = SkipSearcher::new(b"AAAAA", b"AA").collect();
        assert_eq!(hits, vec![0, 2]);
        assert_eq!(count_matches("AAAAA", "AA"), 2);
    }

    #[test]
    fn test_empty_key_never_matches() {
        let mut searcher = SkipSearcher::new(b"ACGT", b"");
        assert_eq!(searcher.find_next(), None);
        assert!(!contains("ACGT", ""));
        assert_eq!(count_matches("", ""), 0);
    }

    #[test]
    fn test_key_longer_than_text() {
        assert!(!contains("ACG", "ACGT"));
        assert!(contains("ACGT", "ACGT"));
    }

    #[test]
    fn test_agrees_with_naive_scan() {
        let texts: [&[u8]; 5] = [
            b"ACGTACGTTTACGGACGGAACGGA",
            b"CCCCCCCCCC",
            b"TATTCAAGTGCACGAGACCAATGACGGGACCTCTGGTGAGG",
            b"GCGCGCGATATATGCGC",
            b"",
        ];
        let keys: [&[u8]; 7] = [b"ACGGA", b"CC", b"CCC", b"GCGC", b"ATAT", b"G", b"GGTGAGG"];
        for text in texts {
            for key in keys {
                let engine: Vec<usize> = SkipSearcher::new(text, key).collect();
                assert_eq!(
                    engine,
                    naive_non_overlapping(text, key),
                    "text {:?} key {:?}",
                    String::from_utf8_lossy(text),
                    String::from_utf8_lossy(key)
                );
            }
        }
    }

    #[test]
    fn test_has_unique_match() {
        assert!(has_unique_match("TTGAATTCTT", "GAATTC"));
        assert!(!has_unique_match("GAATTCGAATTC", "GAATTC"));
        assert!(!has_unique_match("TTTT", "GAATTC"));
    }
}
