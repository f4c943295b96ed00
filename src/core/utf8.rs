use unicode_segmentation::UnicodeSegmentation;

/// Number of grapheme clusters in `text`
pub fn grapheme_count(text: &str) -> usize {
    text.graphemes(true).count()
}

/// Byte index of the nth grapheme cluster, or `None` past the end
pub fn grapheme_byte_index(text: &str, n: usize) -> Option<usize> {
    text.grapheme_indices(true).nth(n).map(|(idx, _)| idx)
}

/// Display width of a grapheme cluster in terminal columns
pub fn grapheme_width(g: &str) -> usize {
    g.chars()
        .map(|c| unicode_width::UnicodeWidthChar::width(c).unwrap_or(0))
        .sum()
}

/// Display width of the first `graphemes` clusters of `text`
pub fn width_up_to(text: &str, graphemes: usize) -> usize {
    text.graphemes(true).take(graphemes).map(grapheme_width).sum()
}

/// Longest prefix of `text` that fits in `columns`
pub fn clip_to_width(text: &str, columns: usize) -> &str {
    let mut used = 0;
    for (idx, g) in text.grapheme_indices(true) {
        let w = grapheme_width(g);
        if used + w > columns {
            return &text[..idx];
        }
        used += w;
    }
    text
}
