// src/normalize/name.rs
//
// Pure string rules applied to the name column.

use once_cell::sync::Lazy;
use regex::Regex;

/// A line break in the wiki cell that text extraction glued together: the
/// last word of a multi-word label (capital plus at least three lowercase
/// letters) running straight into a whole capitalised word. Prefixes
/// like `Mc`, `Mac` or `Mi` and single-word run-ons like `BigorSmall` do not
/// match.
static RUN_ON: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\S\s+\p{Lu}\p{Ll}{3,})(\p{Lu}\p{Ll}+)\b").unwrap());

/// One or more leading `Label: ` prefixes.
static LABEL_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[^:]*:\s+)+").unwrap());

const SIC: &str = "[sic]";

/// Split label/name run-ons with `sep` and a space.
///
/// `fix_camelcase("Bright PonySunshine Smiles", ':')` gives
/// `"Bright Pony: Sunshine Smiles"`.
pub fn fix_camelcase(s: &str, sep: char) -> String {
    let replacement = format!("${{1}}{} ${{2}}", sep);
    RUN_ON.replace_all(s, replacement.as_str()).into_owned()
}

/// Drop every `Label: ` prefix, e.g. `"Bright Pony: Sunshine Smiles"` →
/// `"Sunshine Smiles"`.
pub fn strip_label(name: &str) -> String {
    LABEL_PREFIX.replace(name, "").trim().to_string()
}

/// Clean up scraping noise in a character name.
pub fn clean_name(name: &str) -> String {
    let n = fix_camelcase(name, ':');
    // whitespace around the marker is left alone
    let n = n.replace(SIC, "");
    let n = n.replace('/', "or");
    n.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_name_is_idempotent_on_clean_input() {
        assert_eq!(clean_name("Sunshine Smiles"), "Sunshine Smiles");
        assert_eq!(clean_name(&clean_name("Sunshine Smiles")), "Sunshine Smiles");
    }

    #[test]
    fn slash_becomes_or_without_spaces() {
        assert_eq!(clean_name("Big/Small"), "BigorSmall");
        assert_eq!(clean_name("A / B"), "A or B");
    }

    #[test]
    fn sic_marker_removed_then_trimmed() {
        assert_eq!(clean_name("Surprize [sic]"), "Surprize");
        assert_eq!(clean_name("A [sic] B"), "A  B");
    }

    #[test]
    fn clean_name_trims_raw_cell_text() {
        assert_eq!(clean_name("\n  Lyra Heartstrings \n"), "Lyra Heartstrings");
    }

    #[test]
    fn camelcase_run_on_gets_separator() {
        assert_eq!(
            fix_camelcase("Bright PonySunshine Smiles", ':'),
            "Bright Pony: Sunshine Smiles"
        );
        assert_eq!(fix_camelcase("Already: Fine", ':'), "Already: Fine");
        assert_eq!(fix_camelcase("ALLCAPS", ':'), "ALLCAPS");
    }

    #[test]
    fn names_with_inner_capitals_are_already_clean() {
        assert_eq!(clean_name("Big McIntosh"), "Big McIntosh");
        assert_eq!(clean_name("Princess MiAmore Cadenza"), "Princess MiAmore Cadenza");
        assert_eq!(strip_label(&clean_name("Big McIntosh")), "Big McIntosh");
        assert_eq!(fix_camelcase("Sir MacDonald Jr", ':'), "Sir MacDonald Jr");
    }

    #[test]
    fn clean_name_is_stable_when_reapplied() {
        for raw in [
            "Big/Small",
            "Big McIntosh",
            "Princess MiAmore Cadenza",
            "Bright PonySunshine Smiles",
            "Surprize [sic]",
            "  Lyra Heartstrings\n",
        ] {
            let once = clean_name(raw);
            assert_eq!(clean_name(&once), once, "re-cleaning {:?}", raw);
        }
    }

    #[test]
    fn camelcase_fix_runs_before_slash_substitution() {
        // "orS" produced by the substitution must not be split
        assert_eq!(clean_name("Big/Small"), "BigorSmall");
    }

    #[test]
    fn strip_label_removes_prefixes() {
        assert_eq!(strip_label("Bright Pony: Sunshine Smiles"), "Sunshine Smiles");
        assert_eq!(strip_label("A: B: Carrot Top"), "Carrot Top");
        assert_eq!(strip_label("Carrot Top"), "Carrot Top");
        assert_eq!(strip_label("Ratio 1:2"), "Ratio 1:2");
    }
}
