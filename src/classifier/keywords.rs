//! Static keyword tables consumed by the rule classifier.
//!
//! Data lives here, matching logic lives in `rules.rs`, so the tables can be
//! extended or localized without touching the algorithm. All entries are
//! lowercase; the rule classifier matches them as substrings of the
//! lowercased message body.

use crate::category::{Category, OfferCategory};

/// Per-category keyword lists, scanned in this exact order.
///
/// Ordering is semantic twice over: the scan order decides which category
/// wins when several have a single keyword hit each, and within a list
/// earlier keywords are tested first. Treat this table as versioned data.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Otp,
        &[
            "otp",
            "one time password",
            "verification code",
            "security code",
            "passcode",
            "confirm",
            "2fa",
            "do not share",
        ],
    ),
    (
        Category::BankAlert,
        &[
            "credited",
            "debited",
            "a/c",
            "acct",
            "account balance",
            "withdrawn",
            "deposited",
            "transaction",
            "net banking",
            "atm",
            "neft",
            "imps",
        ],
    ),
    (
        Category::FinanceAlert,
        &[
            "emi",
            "loan",
            "credit card",
            "bill due",
            "payment due",
            "insurance",
            "premium",
            "invoice",
            "statement",
            "mutual fund",
            "investment",
        ],
    ),
    (
        Category::Offer,
        &[
            "% off",
            "flat off",
            "discount",
            "mega sale",
            "best deal",
            "save up to",
            "special price",
            "limited period",
            "lowest price",
        ],
    ),
    (
        Category::Coupon,
        &[
            "coupon",
            "promo code",
            "voucher",
            "cashback",
            "use code",
            "redeem",
            "gift card",
            "reward points",
        ],
    ),
];

/// Phrases that mark a message as promotional when no keyword category hit.
pub const PROMOTIONAL_INDICATORS: &[&str] = &[
    "unsubscribe",
    "opt out",
    "text stop",
    "reply stop",
    "exclusively for you",
    "subscribe now",
    "newsletter",
];

/// Conversational markers for the personal-message heuristic.
pub const CONVERSATIONAL_MARKERS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "thanks",
    "thank you",
    "?",
    "how are you",
    "love",
    "miss you",
    "see you",
];

/// Phrases that each add two points to the spam score.
pub const SPAM_PHRASES: &[&str] = &[
    "congratulations",
    "winner",
    "claim",
    "free prize",
    "urgent action",
    "act now",
    "call now",
    "click here",
    "limited time",
    "risk free",
    "no obligation",
    "guaranteed",
    "once in lifetime",
];

/// Sender-id fragments of known financial institutions. A sender matching
/// any of these is never classified as spam, regardless of content.
pub const TRUSTED_FINANCIAL_SENDERS: &[&str] = &[
    "hdfcbk", "icicib", "sbiinb", "axisbk", "kotakb", "pnbsms", "canbnk",
    "unionb", "yesbnk", "idfcfb", "indusb", "boiind",
];

/// Per-subcategory keyword lists for offer messages, tested in this order;
/// the first list with any hit wins.
pub const OFFER_KEYWORDS: &[(OfferCategory, &[&str])] = &[
    (
        OfferCategory::Medicine,
        &["medicine", "pharmacy", "tablet", "health", "wellness", "vitamins"],
    ),
    (
        OfferCategory::Clothing,
        &["clothing", "apparel", "fashion", "dress", "shirt", "jeans", "kurta"],
    ),
    (
        OfferCategory::Shoes,
        &["shoes", "footwear", "sneakers", "sandals", "heels"],
    ),
    (
        OfferCategory::Electronics,
        &["electronics", "mobile", "laptop", "gadget", "headphones", "smart tv"],
    ),
    (
        OfferCategory::Food,
        &["food", "pizza", "burger", "restaurant", "meal", "dining", "grocery"],
    ),
    (
        OfferCategory::Travel,
        &["travel", "flight", "hotel", "holiday", "vacation", "trip", "cab"],
    ),
    (
        OfferCategory::Entertainment,
        &["movie", "concert", "show", "ticket", "streaming", "music"],
    ),
];
