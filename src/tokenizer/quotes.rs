// WHY: Centralized quote-pair configuration for the segmentation state machine
// Table-driven so additional quotation styles can be added without touching control flow

/// Open → close glyph pairs recognized by the quotation stack
/// Covers straight, curly, angle/guillemet, CJK corner, and German low-9 styles
pub const QUOTE_PAIRS: &[(char, char)] = &[
    ('"', '"'),
    ('\'', '\''),
    ('\u{201C}', '\u{201D}'), // “ ”
    ('\u{2018}', '\u{2019}'), // ‘ ’
    ('\u{00AB}', '\u{00BB}'), // « »
    ('\u{2039}', '\u{203A}'), // ‹ ›
    ('\u{300C}', '\u{300D}'), // 「 」
    ('\u{300E}', '\u{300F}'), // 『 』
    ('\u{201E}', '\u{201C}'), // „ “ (German low-9)
    ('\u{201A}', '\u{2018}'), // ‚ ‘ (German low-9 single)
];

/// Look up the closing glyph for an opening quote character
pub fn closing_for(open: char) -> Option<char> {
    QUOTE_PAIRS
        .iter()
        .find(|(o, _)| *o == open)
        .map(|(_, c)| *c)
}

/// Check whether a character can open a quotation
pub fn is_opening_quote(ch: char) -> bool {
    QUOTE_PAIRS.iter().any(|(o, _)| *o == ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_lookup() {
        assert_eq!(closing_for('"'), Some('"'));
        assert_eq!(closing_for('\u{201C}'), Some('\u{201D}'));
        assert_eq!(closing_for('\u{00AB}'), Some('\u{00BB}'));
        assert_eq!(closing_for('\u{201E}'), Some('\u{201C}'));
        assert_eq!(closing_for('x'), None);
    }

    #[test]
    fn test_opening_detection() {
        for (open, _) in QUOTE_PAIRS {
            assert!(is_opening_quote(*open), "Should recognize {open:?} as opening quote");
        }
        assert!(!is_opening_quote('a'));
        assert!(!is_opening_quote('.'));
    }
}
