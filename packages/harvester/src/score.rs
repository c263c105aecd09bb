//! Heuristic quality scoring.
//!
//! `score` is a pure function of the clean text, the source entry,
//! and an explicit lexicon, so identical inputs always produce the
//! identical score. Each component is capped independently before
//! the final clamp.

use url::Url;

use crate::config::Lexicon;
use crate::types::SourceEntry;

/// Per-keyword contribution for educational keywords.
const EDUCATIONAL_WEIGHT: f64 = 0.015;
/// Cap on the total educational-keyword contribution.
const EDUCATIONAL_CAP: f64 = 0.30;
/// Per-term contribution for technical terms.
const TECHNICAL_WEIGHT: f64 = 0.02;
/// Cap on the total technical-term contribution.
const TECHNICAL_CAP: f64 = 0.20;
/// Bonus for academic domains.
const ACADEMIC_BONUS: f64 = 0.35;
/// Bonus for high-trust encyclopedic hosts.
const ENCYCLOPEDIC_BONUS: f64 = 0.25;

/// Score clean text against a source entry. Deterministic, in [0, 1].
pub fn score(clean_text: &str, source: &SourceEntry, lexicon: &Lexicon) -> f64 {
    let lowered = clean_text.to_lowercase();
    let word_count = clean_text.split_whitespace().count();

    let total = length_tier(word_count)
        + keyword_component(
            &lowered,
            &lexicon.educational_keywords,
            EDUCATIONAL_WEIGHT,
            EDUCATIONAL_CAP,
        )
        + domain_bonus(&source.url, lexicon)
        + keyword_component(
            &lowered,
            &lexicon.technical_terms,
            TECHNICAL_WEIGHT,
            TECHNICAL_CAP,
        );

    total.clamp(0.0, 1.0)
}

/// Mutually exclusive length tiers by word count.
fn length_tier(word_count: usize) -> f64 {
    if word_count > 15_000 {
        0.35
    } else if word_count > 8_000 {
        0.25
    } else if word_count > 3_000 {
        0.15
    } else if word_count > 1_000 {
        0.08
    } else {
        0.0
    }
}

/// Weight per distinct entry present in the lowered text, capped.
///
/// Presence is a case-insensitive substring test; repetition of one
/// entry never counts twice.
fn keyword_component(lowered_text: &str, entries: &[String], weight: f64, cap: f64) -> f64 {
    let hits = entries
        .iter()
        .filter(|entry| lowered_text.contains(entry.to_lowercase().as_str()))
        .count();

    (hits as f64 * weight).min(cap)
}

/// Domain trust bonus. Academic wins; the bonuses never stack.
fn domain_bonus(url: &str, lexicon: &Lexicon) -> f64 {
    let Ok(parsed) = Url::parse(url) else {
        return 0.0;
    };
    let Some(host) = parsed.host_str() else {
        return 0.0;
    };
    let host = host.to_lowercase();

    if lexicon
        .academic_suffixes
        .iter()
        .any(|suffix| host.ends_with(suffix.as_str()))
    {
        return ACADEMIC_BONUS;
    }

    if lexicon
        .encyclopedic_hosts
        .iter()
        .any(|trusted| host == *trusted || host.ends_with(&format!(".{}", trusted)))
    {
        return ENCYCLOPEDIC_BONUS;
    }

    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(url: &str) -> SourceEntry {
        SourceEntry::new(url, "science", "physics", "Test")
    }

    fn words(n: usize) -> String {
        vec!["lorem"; n].join(" ")
    }

    #[test]
    fn test_deterministic_and_bounded() {
        let lexicon = Lexicon::default();
        let text = format!("{} research algorithm study", words(5_000));
        let entry = source("https://en.wikipedia.org/wiki/Waves");

        let first = score(&text, &entry, &lexicon);
        let second = score(&text, &entry, &lexicon);

        assert_eq!(first, second);
        assert!((0.0..=1.0).contains(&first));
    }

    #[test]
    fn test_length_tiers_are_exclusive() {
        assert_eq!(length_tier(500), 0.0);
        assert_eq!(length_tier(1_001), 0.08);
        assert_eq!(length_tier(3_001), 0.15);
        assert_eq!(length_tier(8_001), 0.25);
        assert_eq!(length_tier(16_000), 0.35);
    }

    #[test]
    fn test_longer_text_never_scores_lower() {
        let lexicon = Lexicon::default();
        let entry = source("https://example.com/page");

        let short = score(&words(500), &entry, &lexicon);
        let long = score(&words(16_000), &entry, &lexicon);

        assert!(long >= short);
    }

    #[test]
    fn test_keyword_caps_apply_before_summation() {
        let lexicon = Lexicon::default();

        // Every keyword and term from both lists, repeated
        let all_terms = format!(
            "{} {} {} {}",
            lexicon.educational_keywords.join(" "),
            lexicon.technical_terms.join(" "),
            lexicon.educational_keywords.join(" "),
            lexicon.technical_terms.join(" ")
        );
        let lowered = all_terms.to_lowercase();

        let educational = keyword_component(
            &lowered,
            &lexicon.educational_keywords,
            EDUCATIONAL_WEIGHT,
            EDUCATIONAL_CAP,
        );
        let technical = keyword_component(
            &lowered,
            &lexicon.technical_terms,
            TECHNICAL_WEIGHT,
            TECHNICAL_CAP,
        );

        assert!(educational <= EDUCATIONAL_CAP);
        assert!(technical <= TECHNICAL_CAP);

        // Short text with full keyword coverage and no domain bonus:
        // 0.0 + 0.30 + 0.0 + 0.20
        let total = score(&all_terms, &source("https://example.com/x"), &lexicon);
        assert!((total - 0.50).abs() < 1e-9);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let lexicon = Lexicon::default();
        let entry = source("https://example.com/x");

        let upper = score("RESEARCH AND ALGORITHM NOTES", &entry, &lexicon);
        let lower = score("research and algorithm notes", &entry, &lexicon);

        assert_eq!(upper, lower);
        assert!(upper > 0.0);
    }

    #[test]
    fn test_domain_bonuses_are_exclusive() {
        let lexicon = Lexicon::default();

        assert_eq!(domain_bonus("https://physics.mit.edu/waves", &lexicon), 0.35);
        assert_eq!(
            domain_bonus("https://en.wikipedia.org/wiki/Waves", &lexicon),
            0.25
        );
        assert_eq!(domain_bonus("https://example.com/waves", &lexicon), 0.0);

        // A host can only ever earn one bonus: academic is checked
        // first and returns immediately
        let text = words(100);
        let academic = score(&text, &source("https://dept.example.edu/a"), &lexicon);
        assert!((academic - 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_unparseable_url_gets_no_bonus() {
        let lexicon = Lexicon::default();
        assert_eq!(domain_bonus("not a url", &lexicon), 0.0);
    }
}
