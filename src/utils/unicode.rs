use unicode_width::UnicodeWidthChar;

/// Terminal display width of a single char. Control chars take no cells.
pub fn char_width(c: char) -> usize {
    UnicodeWidthChar::width(c).unwrap_or(0)
}

/// Display width of a run of chars.
pub fn chars_width(chars: &[char]) -> usize {
    chars.iter().map(|c| char_width(*c)).sum()
}

/// Byte index of the `char_index`-th char, or `s.len()` past the end.
pub fn byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

/// Slice `s` by char indices. Out of range bounds are clamped.
pub fn char_slice(s: &str, start: usize, end: usize) -> &str {
    if end <= start {
        return "";
    }
    let start_byte = byte_index(s, start);
    let end_byte = byte_index(s, end);
    &s[start_byte..end_byte]
}

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Replace tabs with spaces up to the next tab stop.
pub fn expand_tabs(s: &str, tab_width: usize) -> String {
    let mut out = String::with_capacity(s.len());
    let mut col = 0;
    for c in s.chars() {
        match c {
            '\t' => {
                let pad = tab_width - (col % tab_width);
                out.extend(std::iter::repeat_n(' ', pad));
                col += pad;
            }
            '\n' => {
                out.push(c);
                col = 0;
            }
            '\r' => {}
            _ => {
                out.push(c);
                col += char_width(c);
            }
        }
    }
    out
}
