//! Inbound message text cleanup.

/// Canonicalize an inbound message body.
///
/// Keeps only the first line, drops control characters and emoji, trims
/// surrounding whitespace and uppercases the result. Every handler sees the
/// canonical form.
pub fn canonical_text(body: &str) -> String {
    let first_line = body.split(['\r', '\n']).next().unwrap_or_default();

    let cleaned: String = first_line
        .chars()
        .filter(|c| !c.is_control() && !is_emoji(*c))
        .collect();

    cleaned.trim().to_uppercase()
}

/// Emoji, pictographs and the joiners/selectors that compose them.
fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x00A9 | 0x00AE
            | 0x200D
            | 0x203C
            | 0x2049
            | 0x20E3
            | 0x2122
            | 0x2139
            | 0x2194..=0x21AA
            | 0x231A..=0x23FF
            | 0x24C2
            | 0x25AA..=0x25FE
            | 0x2600..=0x27BF
            | 0x2934..=0x2935
            | 0x2B00..=0x2BFF
            | 0x3030
            | 0x303D
            | 0x3297
            | 0x3299
            | 0xFE00..=0xFE0F
            | 0x1F000..=0x1FAFF
            | 0xE0020..=0xE007F
    )
}
