use crate::utils::unicode::char_width;

/// One visual row of laid-out content: chars `start..end` of the document.
/// The terminating newline, if any, is not part of the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualRow {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u16,
    pub height: u16,
    /// Char count of the content this layout was computed for.
    pub char_count: usize,
    pub rows: Vec<VisualRow>,
}

impl Layout {
    /// Soft-wraps `chars` at `width` display cells, hard-breaking on newlines.
    pub fn compute(chars: &[char], width: u16, height: u16) -> Self {
        let width = width.max(1) as usize;
        let mut rows = Vec::new();
        let mut row_start = 0;
        let mut col = 0;

        for (idx, &c) in chars.iter().enumerate() {
            if c == '\n' {
                rows.push(VisualRow { start: row_start, end: idx });
                row_start = idx + 1;
                col = 0;
                continue;
            }
            let w = char_width(c);
            if col + w > width && col > 0 {
                rows.push(VisualRow { start: row_start, end: idx });
                row_start = idx;
                col = 0;
            }
            col += w;
        }
        rows.push(VisualRow { start: row_start, end: chars.len() });

        Self {
            width: width as u16,
            height,
            char_count: chars.len(),
            rows,
        }
    }

    pub fn max_scroll(&self) -> usize {
        self.rows.len().saturating_sub(self.height as usize)
    }

    /// Index of the row holding char `offset`.
    pub fn row_of(&self, offset: usize) -> usize {
        self.rows
            .iter()
            .position(|row| offset <= row.end)
            .unwrap_or(self.rows.len().saturating_sub(1))
    }
}
