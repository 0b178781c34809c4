//! Raw ingredient-name normalization.
//!
//! Recipe files spell the same ingredient many ways: trailing whitespace,
//! mixed case, parenthesized modifiers ("cinnamon (ground)"), embedded origin
//! codes ("cascade (US)"), and redundant suffixes ("nottingham yeast"). These
//! helpers reduce names to a consistent form before reconciliation so the
//! similarity ranker compares like with like.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::category::Category;

// Two-letter ISO country codes in parentheses, e.g. "(US)" or "(DE)".
static ORIGIN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\((AF|AX|AL|DZ|AS|AD|AO|AI|AQ|AG|AR|AM|AW|AU|AT|AZ|BS|BH|BD|BB|BY|BE|BZ|BJ|BM|BT|BO|BQ|BA|BW|BV|BR|IO|BN|BG|BF|BI|KH|CM|CA|CV|KY|CF|TD|CL|CN|CX|CC|CO|KM|CG|CD|CK|CR|CI|HR|CU|CW|CY|CZ|DK|DJ|DM|DO|EC|EG|SV|GQ|ER|EE|ET|FK|FO|FJ|FI|FR|GF|PF|TF|GA|GM|GE|DE|GH|GI|GR|GL|GD|GP|GU|GT|GG|GN|GW|GY|HT|HM|VA|HN|HK|HU|IS|IN|ID|IR|IQ|IE|IM|IL|IT|JM|JP|JE|JO|KZ|KE|KI|KP|KR|KW|KG|LA|LV|LB|LS|LR|LY|LI|LT|LU|MO|MK|MG|MW|MY|MV|ML|MT|MH|MQ|MR|MU|YT|MX|FM|MD|MC|MN|ME|MS|MA|MZ|MM|NA|NR|NP|NL|NC|NZ|NI|NE|NG|NU|NF|MP|NO|OM|PK|PW|PS|PA|PG|PY|PE|PH|PN|PL|PT|PR|QA|RE|RO|RU|RW|BL|SH|KN|LC|MF|PM|VC|WS|SM|ST|SA|SN|RS|SC|SL|SG|SX|SK|SI|SB|SO|ZA|GS|SS|ES|LK|SD|SR|SJ|SZ|SE|CH|SY|TW|TJ|TZ|TH|TL|TG|TK|TO|TT|TN|TR|TM|TC|TV|UG|UA|AE|GB|UK|US|UM|UY|UZ|VU|VE|VN|VG|VI|WF|EH|YE|ZM|ZW)\)",
    )
    .unwrap()
});

// A parenthesized modifier, e.g. "(ground)" or "(whole leaf)".
static MODIFIER_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([\w ]*\)").unwrap());

/// Lowercase and trim a raw text value.
///
/// All name handling funnels through this; any change to how text fields are
/// stored belongs here.
pub fn clean_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Remove the first parenthesized modifier from an ingredient name, e.g.
/// `"Cinnamon (Ground)"` becomes `"Cinnamon "`.
pub fn strip_modifiers(text: &str) -> String {
    match MODIFIER_PATTERN.find(text) {
        Some(m) => format!("{}{}", &text[..m.start()], &text[m.end()..]),
        None => text.to_string(),
    }
}

/// Split an embedded origin code out of an ingredient name.
///
/// `"Cascade (US)"` yields `("Cascade ", Some("US"))`; a name without an
/// origin code comes back unchanged with `None`.
pub fn split_origin(text: &str) -> (String, Option<String>) {
    match ORIGIN_PATTERN.find(text) {
        Some(m) => {
            // strip parens
            let origin = text[m.start() + 1..m.end() - 1].to_string();
            let stripped = format!("{}{}", &text[..m.start()], &text[m.end()..]);
            (stripped, Some(origin))
        }
        None => (text.to_string(), None),
    }
}

/// Drop a redundant trailing " yeast" from a yeast name.
pub fn strip_yeast_suffix(text: &str) -> String {
    match text.strip_suffix(" yeast") {
        Some(stripped) => stripped.to_string(),
        None => text.to_string(),
    }
}

/// Normalize a raw name the way the dataset loader stores it for a category.
///
/// Fermentables and hops carry origin codes, misc entries carry modifiers,
/// yeast names carry the redundant suffix. Everything is case-folded and
/// trimmed last so the stripping helpers see the original spacing.
pub fn normalize_raw_name(category: Category, raw: &str) -> String {
    let stripped = match category {
        Category::Fermentable | Category::Hop => split_origin(raw).0,
        Category::Misc => strip_modifiers(raw),
        Category::Yeast => strip_yeast_suffix(&clean_text(raw)),
    };
    clean_text(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(clean_text("  Cascade Hops "), "cascade hops");
        assert_eq!(clean_text("PALE MALT"), "pale malt");
    }

    #[test]
    fn test_strip_modifiers() {
        assert_eq!(strip_modifiers("Cinnamon (Ground)"), "Cinnamon ");
        assert_eq!(strip_modifiers("Irish Moss"), "Irish Moss");
    }

    #[test]
    fn test_split_origin() {
        let (name, origin) = split_origin("Cascade (US)");
        assert_eq!(name, "Cascade ");
        assert_eq!(origin.as_deref(), Some("US"));

        let (name, origin) = split_origin("Fuggle");
        assert_eq!(name, "Fuggle");
        assert!(origin.is_none());
    }

    #[test]
    fn test_origin_is_not_a_modifier() {
        // "(Ground)" is a modifier, not an origin code
        let (name, origin) = split_origin("Cinnamon (Ground)");
        assert_eq!(name, "Cinnamon (Ground)");
        assert!(origin.is_none());
    }

    #[test]
    fn test_strip_yeast_suffix() {
        assert_eq!(strip_yeast_suffix("nottingham yeast"), "nottingham");
        assert_eq!(strip_yeast_suffix("us-05"), "us-05");
    }

    #[test]
    fn test_normalize_raw_name() {
        assert_eq!(
            normalize_raw_name(Category::Hop, "Cascade (US)"),
            "cascade"
        );
        assert_eq!(
            normalize_raw_name(Category::Misc, "Cinnamon (Ground)"),
            "cinnamon"
        );
        assert_eq!(
            normalize_raw_name(Category::Yeast, "Nottingham Yeast"),
            "nottingham"
        );
        assert_eq!(
            normalize_raw_name(Category::Fermentable, " Pale Malt (UK) "),
            "pale malt"
        );
    }
}
