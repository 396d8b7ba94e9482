//! Assertion helpers for tests.

use pretty_assertions::assert_eq;
use termgfx::rendering::{SIXEL_END, SIXEL_START};

/// Split a sixel sequence into its palette section and band section.
///
/// Panics if the framing is wrong.
pub fn split_sixel(encoded: &str) -> (&str, &str) {
    let body = encoded
        .strip_prefix(SIXEL_START)
        .unwrap_or_else(|| panic!("missing sixel introducer in {encoded:?}"))
        .strip_suffix(SIXEL_END)
        .unwrap_or_else(|| panic!("missing sixel terminator in {encoded:?}"));
    let mut split = 0;
    while let Some(len) = palette_directive_len(&body[split..]) {
        split += len;
    }
    body.split_at(split)
}

/// Length of a leading `#<i>;2;<r>;<g>;<b>` directive, if there is one.
fn palette_directive_len(s: &str) -> Option<usize> {
    let rest = s.strip_prefix('#')?;
    let mut pos = 1;
    let mut fields = 0;
    for (n, part) in rest.splitn(6, ';').take(5).enumerate() {
        let digits = part.len() - part.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits == 0 || (n == 1 && &part[..digits] != "2") {
            return None;
        }
        pos += digits;
        fields += 1;
        if n < 4 {
            // separator
            if digits != part.len() {
                return None;
            }
            pos += 1;
        }
    }
    (fields == 5).then_some(pos)
}

/// The band section of a sixel sequence, one entry per band.
pub fn bands(encoded: &str) -> Vec<&str> {
    let (_, bands) = split_sixel(encoded);
    bands.split_terminator('-').collect()
}

/// Assert a sixel sequence is framed correctly and declares `colours`
/// palette entries.
pub fn assert_sixel_frame(encoded: &str, colours: usize) {
    let (palette, _) = split_sixel(encoded);
    assert_eq!(
        palette.matches(";2;").count(),
        colours,
        "Unexpected palette in {palette:?}"
    );
}

/// Assert every sixel character lies in the printable sixel range.
pub fn assert_sixel_chars(encoded: &str) {
    let (_, bands) = split_sixel(encoded);
    for c in bands.chars() {
        assert!(
            matches!(c, '?'..='~' | '#' | '$' | '-' | '!' | '0'..='9'),
            "Unexpected character {c:?} in band data"
        );
    }
}
