//! Byte offset to line/column conversion.

/// Start offsets of every line of a source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| i as u32 + 1))
            .collect();
        Self { line_starts }
    }

    /// 0-based line containing `offset`
    pub fn line_of(&self, offset: u32) -> u32 {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line as u32,
            Err(next) => next.saturating_sub(1) as u32,
        }
    }

    /// 0-based `(line, column)` of `offset`; the column counts characters.
    ///
    /// `source` must be the text the index was built from. Offsets past the
    /// end or inside a multi-byte character are clamped.
    pub fn line_col(&self, source: &str, offset: u32) -> (u32, u32) {
        let offset = (offset as usize).min(source.len());
        let line = self.line_of(offset as u32);
        let line_start = self.line_starts[line as usize] as usize;
        let column = source
            .get(line_start..)
            .map(|rest| {
                rest.char_indices()
                    .take_while(|(i, _)| line_start + i < offset)
                    .count()
            })
            .unwrap_or(0);
        (line, column as u32)
    }

    #[inline]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
