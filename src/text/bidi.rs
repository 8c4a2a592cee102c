//! Logical-to-visual reordering for right-to-left text.
//!
//! The layout engine draws glyphs strictly left to right, so mixed or RTL
//! text has to arrive in display order. [`display_order`] runs the Unicode
//! bidirectional algorithm over each line. Contextual shaping (Arabic
//! joining forms) is not done here; hosts that need it reshape first.

use unicode_bidi::BidiInfo;

/// Reorder every `\n`-separated line of `text` into visual order.
///
/// Lines without right-to-left characters are returned unchanged.
pub fn display_order(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            let info = BidiInfo::new(line, None);
            if !info.has_rtl() {
                return line.to_string();
            }
            info.paragraphs
                .iter()
                .map(|para| info.reorder_line(para, para.range.clone()).into_owned())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ltr_unchanged() {
        assert_eq!(display_order("Hello\nworld"), "Hello\nworld");
        assert_eq!(display_order(""), "");
    }

    #[test]
    fn test_rtl_run_reversed() {
        assert_eq!(display_order("שלום"), "םולש");
    }

    #[test]
    fn test_lines_reordered_independently() {
        let out = display_order("abc\nאבג");
        assert_eq!(out, "abc\nגבא");
    }
}
