use crate::constants::DEFAULT_SPAM_KEYWORDS;

/// Case-insensitive substring blocklist. No word boundaries, so "cryptography"
/// is flagged by "crypto".
#[derive(Debug, Clone)]
pub struct SpamFilter {
    keywords: Vec<String>,
}

impl SpamFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        SpamFilter { keywords }
    }

    /// First blocklisted term found in `text`, if any.
    pub fn matched_keyword(&self, text: &str) -> Option<&str> {
        let folded = text.to_lowercase();
        self.keywords
            .iter()
            .find(|k| folded.contains(k.as_str()))
            .map(String::as_str)
    }

    pub fn is_spam(&self, text: &str) -> bool {
        self.matched_keyword(text).is_some()
    }
}

impl Default for SpamFilter {
    fn default() -> Self {
        SpamFilter::new(DEFAULT_SPAM_KEYWORDS)
    }
}
