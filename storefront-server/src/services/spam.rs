//! Review spam screening
//!
//! Keyword-based screening applied on submission. Flagged reviews are held
//! in `pending` status for moderation instead of being rejected outright.

/// Phrases that flag a review as spam when present anywhere in the text.
pub const SPAM_KEYWORDS: &[&str] = &["buy now", "free", "winner", "click here"];

/// Case-insensitive substring match against [`SPAM_KEYWORDS`].
pub fn is_spam(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SPAM_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
