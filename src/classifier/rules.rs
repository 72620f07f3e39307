use crate::category::{Category, OfferCategory};

use super::keywords::{
    CATEGORY_KEYWORDS, CONVERSATIONAL_MARKERS, OFFER_KEYWORDS, PROMOTIONAL_INDICATORS,
    SPAM_PHRASES,
};

/// A keyword match longer than this settles the category on its own.
const STRONG_KEYWORD_LEN: usize = 8;
/// Number of keyword hits that settles the category immediately.
const STRONG_MATCH_COUNT: usize = 2;
/// Minimum integer spam score for a spam verdict.
const SPAM_SCORE_THRESHOLD: u32 = 4;
/// Maximum body length for the personal-message heuristic.
const PERSONAL_MAX_LEN: usize = 200;

/// Special characters counted toward the spam score.
const SPAM_SPECIAL_CHARS: &[char] = &['!', '@', '#', '$', '%', '^', '&', '*', '(', ')'];

/// Deterministic keyword/pattern classifier used as the fallback and
/// tiebreak path. Pure and total: every function returns a valid answer for
/// any input string, including the empty string, and never fails.
///
/// Matching runs over the raw lowercased body, not the normalized token
/// stream; URL/email/phone redaction would erase signals the heuristics
/// rely on (link counts, long digit runs near "otp", and so on).
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleClassifier;

impl RuleClassifier {
    pub fn new() -> Self {
        RuleClassifier
    }

    /// Assigns a category by scanning the keyword table in declaration
    /// order.
    ///
    /// A category is selected immediately once it accumulates two keyword
    /// hits or a single matched keyword is longer than eight characters. A
    /// single weak hit also wins, but only after that category's list has
    /// been scanned in full, so declaration order acts as the tie-break
    /// when several categories would each have one hit. This
    /// order-sensitivity is inherited behavior and is kept on purpose.
    pub fn classify(&self, body: &str) -> Category {
        let lowered = body.to_lowercase();

        for (category, kw_list) in CATEGORY_KEYWORDS {
            let mut matches = 0usize;
            for kw in *kw_list {
                if lowered.contains(kw) {
                    matches += 1;
                    if matches >= STRONG_MATCH_COUNT || kw.len() > STRONG_KEYWORD_LEN {
                        return *category;
                    }
                }
            }
            if matches > 0 {
                return *category;
            }
        }

        if PROMOTIONAL_INDICATORS.iter().any(|p| lowered.contains(p)) {
            return Category::Promotional;
        }

        if self.looks_personal(&lowered) {
            return Category::Personal;
        }

        Category::Other
    }

    fn looks_personal(&self, lowered: &str) -> bool {
        lowered.len() <= PERSONAL_MAX_LEN
            && !lowered.contains("http")
            && !lowered.contains("www.")
            && CONVERSATIONAL_MARKERS.iter().any(|m| lowered.contains(m))
    }

    /// Integer-scored spam heuristic.
    ///
    /// Two points per spam phrase, two for a mostly-uppercase body, one for
    /// heavy special-character use, two for more than one embedded link.
    /// The verdict is `score >= 4`.
    pub fn is_spam(&self, body: &str) -> bool {
        self.spam_score(body) >= SPAM_SCORE_THRESHOLD
    }

    fn spam_score(&self, body: &str) -> u32 {
        let lowered = body.to_lowercase();
        let mut score = 0u32;

        for phrase in SPAM_PHRASES {
            if lowered.contains(phrase) {
                score += 2;
            }
        }

        let uppercase = body.chars().filter(|c| c.is_uppercase()).count();
        if body.len() > 20 && uppercase * 2 > body.len() {
            score += 2;
        }

        let specials = body.chars().filter(|c| SPAM_SPECIAL_CHARS.contains(c)).count();
        if specials > 5 {
            score += 1;
        }

        let links = lowered.matches("http://").count() + lowered.matches("https://").count();
        if links > 1 {
            score += 2;
        }

        score
    }

    /// Secondary classification for offer/coupon messages: the first
    /// subcategory list with any hit wins.
    pub fn offer_subcategory(&self, body: &str) -> OfferCategory {
        let lowered = body.to_lowercase();
        for (subcategory, kw_list) in OFFER_KEYWORDS {
            if kw_list.iter().any(|kw| lowered.contains(kw)) {
                return *subcategory;
            }
        }
        OfferCategory::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> RuleClassifier {
        RuleClassifier::new()
    }

    #[test]
    fn two_keyword_hits_short_circuit_to_otp() {
        let cat = rules().classify("your otp code is 123456, verification code sent");
        assert_eq!(cat, Category::Otp);
    }

    #[test]
    fn single_weak_keyword_still_wins() {
        // "confirm" is seven characters, one hit, no short-circuit: the weak
        // match falls through and still returns Otp because no other
        // category matched first.
        assert_eq!(rules().classify("confirm"), Category::Otp);
    }

    #[test]
    fn long_keyword_settles_immediately() {
        // "verification code" is a single hit but longer than eight chars.
        assert_eq!(rules().classify("verification code sent"), Category::Otp);
    }

    #[test]
    fn declaration_order_breaks_single_hit_ties() {
        // One BankAlert hit ("credited") and one Coupon hit ("cashback"):
        // BankAlert is scanned first and wins.
        let cat = rules().classify("rs 500 credited as cashback");
        assert_eq!(cat, Category::BankAlert);
    }

    #[test]
    fn bank_and_finance_bodies() {
        assert_eq!(
            rules().classify("INR 2,500 debited from a/c XX1234"),
            Category::BankAlert
        );
        assert_eq!(
            rules().classify("your emi of rs 4,200 and loan due on friday"),
            Category::FinanceAlert
        );
    }

    #[test]
    fn promotional_indicator_without_keywords() {
        assert_eq!(
            rules().classify("reply stop to stop receiving these messages"),
            Category::Promotional
        );
    }

    #[test]
    fn personal_heuristic() {
        assert_eq!(rules().classify("hey, thanks for coming!"), Category::Personal);
    }

    #[test]
    fn personal_heuristic_rejects_links() {
        assert_eq!(
            rules().classify("hey check http://somewhere.example"),
            Category::Other
        );
    }

    #[test]
    fn personal_heuristic_rejects_long_bodies() {
        let long_body = format!("hey {}", "x".repeat(250));
        assert_eq!(rules().classify(&long_body), Category::Other);
    }

    #[test]
    fn unmatched_body_is_other() {
        assert_eq!(rules().classify("lorem ipsum dolor sit amet"), Category::Other);
    }

    #[test]
    fn totality_on_degenerate_inputs() {
        let inputs = ["", " ", "\u{0}", "日本語のメッセージ", "🎉🎉🎉"];
        for input in inputs {
            let _ = rules().classify(input);
            let _ = rules().is_spam(input);
            let _ = rules().offer_subcategory(input);
        }
    }

    #[test]
    fn two_spam_phrases_cross_the_threshold() {
        assert!(rules().is_spam("free prize waiting, results guaranteed"));
    }

    #[test]
    fn one_spam_phrase_does_not() {
        assert!(!rules().is_spam("results guaranteed"));
    }

    #[test]
    fn shouting_and_specials_add_points() {
        // One phrase (2) + uppercase body over 20 chars (2) = 4.
        assert!(rules().is_spam("CLAIM YOUR MONEY TODAY RIGHT AWAY"));
        // Uppercase alone scores 2.
        assert!(!rules().is_spam("PLEASE READ THIS WHOLE NOTICE"));
    }

    #[test]
    fn multiple_links_add_points() {
        // One phrase (2) + two links (2) = 4.
        assert!(rules().is_spam(
            "winner! see http://a.example and http://b.example"
        ));
        // A single link contributes nothing.
        assert!(!rules().is_spam("winner! see http://a.example"));
    }

    #[test]
    fn offer_subcategories_in_order() {
        let r = rules();
        assert_eq!(r.offer_subcategory("flat 50% off on sneakers"), OfferCategory::Shoes);
        assert_eq!(r.offer_subcategory("pizza meal deals tonight"), OfferCategory::Food);
        assert_eq!(r.offer_subcategory("cheap flight plus hotel"), OfferCategory::Travel);
        assert_eq!(r.offer_subcategory("nothing relevant here"), OfferCategory::Other);
        // Medicine is declared first and wins mixed bodies.
        assert_eq!(
            r.offer_subcategory("pharmacy sale, also movie tickets"),
            OfferCategory::Medicine
        );
    }
}
