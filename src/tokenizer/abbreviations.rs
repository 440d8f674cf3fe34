// WHY: Centralized abbreviation handling for sentence boundary detection
// Lookup keys are lowercase tokens ending in '.' so matching is case-insensitive

use std::collections::HashSet;

/// English abbreviations that end in a period and must not split sentences
pub const ENGLISH_ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "sen.", "rep.",
    "gen.", "col.", "lt.", "sgt.", "capt.", "gov.", "hon.", "rev.",
    "st.", "mt.", "ave.", "blvd.", "rd.",
    "etc.", "vs.", "e.g.", "i.e.", "cf.", "al.",
    "inc.", "ltd.", "co.", "corp.", "dept.", "est.", "approx.",
    "fig.", "no.", "vol.", "pp.", "ch.", "sec.",
    "u.s.", "u.s.a.", "u.k.",
];

/// French abbreviations
pub const FRENCH_ABBREVIATIONS: &[&str] = &[
    "m.", "mm.", "mme.", "mmes.", "mlle.", "mlles.",
    "av.", "bd.", "env.", "ex.", "fig.", "hab.", "num.",
    "p.ex.", "réf.", "tél.", "vol.",
];

/// German abbreviations
pub const GERMAN_ABBREVIATIONS: &[&str] = &[
    "z.b.", "usw.", "bzw.", "ca.", "d.h.", "evtl.", "ggf.", "inkl.",
    "max.", "min.", "nr.", "o.ä.", "s.o.", "s.u.", "u.a.", "usf.",
    "vgl.", "zzgl.", "str.", "abs.", "bzgl.", "geb.", "ugs.",
];

/// Efficient abbreviation lookup using HashSet for O(1) performance
pub struct AbbreviationChecker {
    abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    /// Create new checker with the combined multilingual abbreviation set
    pub fn new() -> Self {
        let abbreviations = ENGLISH_ABBREVIATIONS
            .iter()
            .chain(FRENCH_ABBREVIATIONS)
            .chain(GERMAN_ABBREVIATIONS)
            .copied()
            .collect();
        Self { abbreviations }
    }

    /// Check if a token (already lowercased, trailing period included) is a known abbreviation
    pub fn is_abbreviation(&self, token: &str) -> bool {
        self.abbreviations.contains(token)
    }

    /// Check a raw token by lowercasing and stripping leading quote/bracket characters
    /// WHY: Tokens pulled out of running text may carry an opening quote or parenthesis
    pub fn matches_token(&self, raw: &str) -> bool {
        let clean = raw.trim_start_matches(|c: char| {
            matches!(c, '"' | '\'' | '(' | '[' | '{' | '\u{201C}' | '\u{2018}' | '\u{00AB}' | '\u{201E}')
        });
        self.is_abbreviation(&clean.to_lowercase())
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    // WHY: Single shared checker instance reduces test overhead
    static SHARED_CHECKER: OnceLock<AbbreviationChecker> = OnceLock::new();

    fn get_checker() -> &'static AbbreviationChecker {
        SHARED_CHECKER.get_or_init(AbbreviationChecker::new)
    }

    #[test]
    fn test_multilingual_lookup() {
        let checker = get_checker();

        let known = ["dr.", "sen.", "etc.", "usw.", "z.b.", "mme.", "u.s.a."];
        for abbr in &known {
            assert!(checker.is_abbreviation(abbr), "Should detect {abbr} as abbreviation");
        }

        assert!(!checker.is_abbreviation("hello"));
        assert!(!checker.is_abbreviation("washington."));
        // a.m./p.m. deliberately absent: their final period is a real boundary
        assert!(!checker.is_abbreviation("p.m."));
        assert!(!checker.is_abbreviation("a.m."));
    }

    #[test]
    fn test_raw_token_matching() {
        let checker = get_checker();

        let cases = [
            ("Dr.", true),
            ("USW.", true),
            ("Z.B.", true),
            ("\"Dr.", true),
            ("(vgl.", true),
            ("Smith.", false),
            ("Dr", false),
        ];
        for (raw, expected) in &cases {
            assert_eq!(checker.matches_token(raw), *expected, "matches_token failed for: {raw}");
        }
    }
}
