use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of message categories.
///
/// Ordinal identity is stable and load-bearing: the model's output vector is
/// mapped positionally onto a subset of these variants (see
/// [`MODEL_CATEGORIES`]), and that mapping is versioned together with the
/// model artifact. Do not reorder variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Otp,
    BankAlert,
    FinanceAlert,
    Offer,
    Coupon,
    Personal,
    Business,
    Promotional,
    Spam,
    Other,
}

/// Positional mapping from the model's output tensor to categories.
///
/// Position `i` of the `[1, K]` output corresponds to `MODEL_CATEGORIES[i]`.
/// Changing `K` or this ordering requires a matching model artifact update.
pub const MODEL_CATEGORIES: [Category; 8] = [
    Category::Otp,
    Category::BankAlert,
    Category::FinanceAlert,
    Category::Offer,
    Category::Coupon,
    Category::Promotional,
    Category::Personal,
    Category::Other,
];

impl Category {
    /// Whether messages of this category are important.
    ///
    /// Importance is a static property of the category, never derived from
    /// confidence or spam status.
    pub fn is_important(self) -> bool {
        matches!(
            self,
            Category::Otp | Category::BankAlert | Category::FinanceAlert
        )
    }

    /// The stable name used when results are persisted by collaborators.
    pub fn name(self) -> &'static str {
        match self {
            Category::Otp => "otp",
            Category::BankAlert => "bank_alert",
            Category::FinanceAlert => "finance_alert",
            Category::Offer => "offer",
            Category::Coupon => "coupon",
            Category::Personal => "personal",
            Category::Business => "business",
            Category::Promotional => "promotional",
            Category::Spam => "spam",
            Category::Other => "other",
        }
    }

    /// Maps a serialized name back to its category.
    ///
    /// Unknown names fall back to `Other` so that rows written by a newer
    /// deployment never fail to load.
    pub fn from_name(name: &str) -> Category {
        match name {
            "otp" => Category::Otp,
            "bank_alert" => Category::BankAlert,
            "finance_alert" => Category::FinanceAlert,
            "offer" => Category::Offer,
            "coupon" => Category::Coupon,
            "personal" => Category::Personal,
            "business" => Category::Business,
            "promotional" => Category::Promotional,
            "spam" => Category::Spam,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Secondary classification applied only to `Offer` and `Coupon` messages.
///
/// Computed by a keyword subclassifier, never by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OfferCategory {
    Medicine,
    Clothing,
    Shoes,
    Electronics,
    Food,
    Travel,
    Entertainment,
    Other,
}

impl fmt::Display for OfferCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OfferCategory::Medicine => "medicine",
            OfferCategory::Clothing => "clothing",
            OfferCategory::Shoes => "shoes",
            OfferCategory::Electronics => "electronics",
            OfferCategory::Food => "food",
            OfferCategory::Travel => "travel",
            OfferCategory::Entertainment => "entertainment",
            OfferCategory::Other => "other",
        };
        f.write_str(name)
    }
}

/// The engine's verdict for a single message.
///
/// Created per message, handed to the caller, never retained by the engine.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    /// Final category after model/rule arbitration.
    pub category: Category,
    /// Per-category probabilities when the model produced a distribution;
    /// values sum to approximately 1.0. Absent in rule-only operation.
    pub confidence_scores: Option<HashMap<Category, f32>>,
    pub is_spam: bool,
    /// Always equal to `category.is_important()`.
    pub is_important: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn importance_is_a_pure_category_property() {
        let all = [
            Category::Otp,
            Category::BankAlert,
            Category::FinanceAlert,
            Category::Offer,
            Category::Coupon,
            Category::Personal,
            Category::Business,
            Category::Promotional,
            Category::Spam,
            Category::Other,
        ];
        for cat in all {
            let expected = matches!(
                cat,
                Category::Otp | Category::BankAlert | Category::FinanceAlert
            );
            assert_eq!(cat.is_important(), expected, "{cat}");
        }
    }

    #[test]
    fn names_round_trip() {
        for cat in MODEL_CATEGORIES {
            assert_eq!(Category::from_name(cat.name()), cat);
        }
    }

    #[test]
    fn unknown_name_falls_back_to_other() {
        assert_eq!(Category::from_name("definitely-not-a-category"), Category::Other);
        assert_eq!(Category::from_name(""), Category::Other);
    }

    #[test]
    fn model_mapping_has_eight_positions() {
        assert_eq!(MODEL_CATEGORIES.len(), 8);
        assert_eq!(MODEL_CATEGORIES[0], Category::Otp);
        assert_eq!(MODEL_CATEGORIES[7], Category::Other);
    }
}
