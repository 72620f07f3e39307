use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"[a-z][a-z0-9+.-]*://\S+").unwrap();
    static ref EMAIL_RE: Regex =
        Regex::new(r"[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").unwrap();
    static ref PHONE_RE: Regex = Regex::new(r"\d{10,}").unwrap();
}

/// Normalizes raw message text into the canonical lowercase token stream the
/// vectorizer consumes. Deterministic, pure, and total: always returns a
/// string, possibly empty.
///
/// URLs, emails and long digit runs are replaced with the placeholder tokens
/// `url`, `email` and `phone`. The placeholders keep the semantic signal
/// ("this message contains a link") without leaking the raw value into the
/// token vocabulary.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let replaced = URL_RE.replace_all(&lowered, " url ");
    let replaced = EMAIL_RE.replace_all(&replaced, " email ");
    let replaced = PHONE_RE.replace_all(&replaced, " phone ");

    let mut out = String::with_capacity(replaced.len());
    for ch in replaced.chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else {
            out.push(' ');
        }
    }

    // Collapse runs of whitespace and trim the ends.
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
