use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use log::info;

use super::error::ClassifierError;

/// Token id used to right-pad sequences. Position 0 of the vocabulary.
pub const PAD_ID: i64 = 0;
/// Token id for out-of-vocabulary tokens. Position 1 of the vocabulary.
pub const UNK_ID: i64 = 1;

/// Words the built-in fallback vocabulary carries after the two reserved
/// entries. Fixed and ordered so the fallback is reproducible byte-for-byte
/// across runs.
const BUILTIN_WORDS: &[&str] = &[
    // otp
    "otp", "code", "verify", "verification", "authentication", "pin",
    "passcode", "confirm", "security", "temporary",
    // banking
    "bank", "account", "balance", "credited", "debited", "transaction",
    "atm", "withdrawal", "deposit", "statement",
    // finance
    "payment", "invoice", "due", "bill", "loan", "emi", "insurance",
    "credit", "card", "stock", "investment",
    // offers
    "offer", "discount", "sale", "deal", "save", "flat", "off", "special",
    "price", "limited", "hurry",
    // coupons
    "coupon", "promo", "voucher", "redeem", "cashback", "reward", "points",
    "gift",
    // common
    "dear", "customer", "your", "the", "is", "for", "and", "to", "from",
    "on", "at", "in", "with", "by", "as", "this", "that", "have", "has",
    "will", "can", "get", "now", "today", "call", "visit", "click", "reply",
    "message", "sms", "alert", "notification", "update", "url", "email",
    "phone",
];

/// An immutable mapping from normalized token strings to integer ids.
///
/// Built once at engine initialization and read-only for the process
/// lifetime, so it is safe to share across any number of concurrent
/// classification calls.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    ids: HashMap<String, i64>,
}

impl Vocabulary {
    /// Loads a vocabulary from a newline-delimited UTF-8 token list.
    ///
    /// The token id is the occurrence index among NON-BLANK lines: blank
    /// lines are skipped without consuming an id. This matches the id
    /// assignment of the trained model's vocabulary; indexing by raw line
    /// number would silently drift every id after a blank line.
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Vocabulary> {
        let contents = fs::read_to_string(path.as_ref())?;
        let vocab = Self::from_lines(contents.lines());
        info!(
            "Loaded vocabulary from {:?} ({} tokens)",
            path.as_ref(),
            vocab.len()
        );
        Ok(vocab)
    }

    /// Builds a vocabulary from an iterator of lines, skipping blanks.
    pub fn from_lines<'a, I>(lines: I) -> Vocabulary
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut ids = HashMap::new();
        let mut next_id: i64 = 0;
        for line in lines {
            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            // First occurrence wins on duplicate tokens.
            ids.entry(token.to_lowercase()).or_insert(next_id);
            next_id += 1;
        }
        Vocabulary { ids }
    }

    /// The deterministic built-in fallback used when no vocabulary resource
    /// is available: `[PAD]` at id 0, `[UNK]` at id 1, then a fixed list of
    /// domain words.
    pub fn builtin() -> Vocabulary {
        let mut ids = HashMap::new();
        ids.insert("[pad]".to_string(), PAD_ID);
        ids.insert("[unk]".to_string(), UNK_ID);
        for (i, word) in BUILTIN_WORDS.iter().enumerate() {
            ids.insert((*word).to_string(), i as i64 + 2);
        }
        Vocabulary { ids }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Looks up a token id. The vocabulary is lowercase-keyed.
    pub fn id_of(&self, token: &str) -> Option<i64> {
        self.ids.get(token).copied()
    }

    /// Maps normalized text to a fixed-length id sequence.
    ///
    /// Splits on whitespace, looks each token up (unknown tokens map to
    /// [`UNK_ID`]), truncates at `max_length` and right-pads with [`PAD_ID`].
    /// The output length is always exactly `max_length`; the model depends
    /// on this invariant.
    pub fn tokenize(&self, text: &str, max_length: usize) -> Result<Vec<i64>, ClassifierError> {
        if self.ids.is_empty() {
            return Err(ClassifierError::NotInitialized);
        }

        let mut ids: Vec<i64> = text
            .split_whitespace()
            .take(max_length)
            .map(|token| {
                // Lookup is case-insensitive; the table is lowercase-keyed
                // and normalized input is already lowercase.
                if token.chars().any(|c| c.is_uppercase()) {
                    self.id_of(&token.to_lowercase())
                } else {
                    self.id_of(token)
                }
                .unwrap_or(UNK_ID)
            })
            .collect();
        ids.resize(max_length, PAD_ID);
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_vocabulary_is_deterministic() {
        let a = Vocabulary::builtin();
        let b = Vocabulary::builtin();
        assert_eq!(a.len(), b.len());
        assert_eq!(a.id_of("[pad]"), Some(PAD_ID));
        assert_eq!(a.id_of("[unk]"), Some(UNK_ID));
        assert_eq!(a.id_of("otp"), b.id_of("otp"));
        assert_eq!(a.id_of("otp"), Some(2));
    }

    #[test]
    fn blank_lines_do_not_consume_ids() {
        let vocab = Vocabulary::from_lines(vec!["[PAD]", "[UNK]", "", "otp", "  ", "code"]);
        assert_eq!(vocab.id_of("otp"), Some(2));
        assert_eq!(vocab.id_of("code"), Some(3));
        assert_eq!(vocab.len(), 4);
    }

    #[test]
    fn tokenize_output_length_is_exact() {
        let vocab = Vocabulary::builtin();
        for max_len in [1, 5, 128, 300] {
            let ids = vocab.tokenize("otp code verify", max_len).unwrap();
            assert_eq!(ids.len(), max_len);
        }
    }

    #[test]
    fn unknown_tokens_map_to_unk() {
        let vocab = Vocabulary::from_lines(vec!["[PAD]", "[UNK]", "otp"]);
        let ids = vocab.tokenize("otp zzzzz", 4).unwrap();
        assert_eq!(ids, vec![2, UNK_ID, PAD_ID, PAD_ID]);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let vocab = Vocabulary::builtin();
        let lower = vocab.tokenize("otp code", 4).unwrap();
        let upper = vocab.tokenize("OTP Code", 4).unwrap();
        assert_eq!(lower, upper);
    }

    #[test]
    fn truncates_past_max_length() {
        let vocab = Vocabulary::builtin();
        let ids = vocab.tokenize("otp code verify pin", 2).unwrap();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn empty_vocabulary_reports_not_initialized() {
        let vocab = Vocabulary::from_lines(Vec::<&str>::new());
        assert!(matches!(
            vocab.tokenize("anything", 8),
            Err(ClassifierError::NotInitialized)
        ));
    }
}
