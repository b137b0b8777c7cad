//! Query normalization and keyword extraction.

/// Greetings and politeness words. Dropped from every term list, including
/// the broad-word tier.
const FILLER_WORDS: &[&str] = &[
    "hi", "hello", "hey", "there", "please", "pls", "plz", "thanks", "thank", "thx", "kindly",
    "greetings", "ok", "okay", "yo", "dear", "sorry", "excuse",
];

/// Articles, pronouns, question words, auxiliaries and common connectives.
/// Combined with [`FILLER_WORDS`] for keyword extraction.
const STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // pronouns and determiners
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "this", "that",
    "these", "those",
    // question words
    "what", "when", "where", "which", "who", "whom", "whose", "why", "how",
    // auxiliaries
    "is", "are", "was", "were", "be", "been", "am", "do", "does", "did", "can", "could",
    "would", "should", "will", "shall", "may", "might", "must", "have", "has", "had",
    // connectives and prepositions
    "and", "or", "but", "if", "to", "of", "in", "on", "for", "with", "at", "by", "from",
    "about", "as", "into", "so", "any", "some", "get", "want", "need", "know", "tell",
];

/// Minimum token length, counted in characters.
const MIN_TOKEN_LEN: usize = 2;

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token) || FILLER_WORDS.contains(&token)
}

fn is_filler_word(token: &str) -> bool {
    FILLER_WORDS.contains(&token)
}

fn long_enough(token: &str) -> bool {
    token.chars().count() >= MIN_TOKEN_LEN
}

fn push_unique(out: &mut Vec<String>, token: &str) {
    if !out.iter().any(|t| t == token) {
        out.push(token.to_string());
    }
}

/// Lowercase, strip punctuation, drop short tokens and stop words.
///
/// When nothing survives, a second pass re-tokenizes the raw text by
/// whitespace without stripping punctuation, keeping only the length and
/// stop-word filters. Order of first occurrence is preserved.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();

    let cleaned: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let mut keywords = Vec::new();
    for token in cleaned.split_whitespace() {
        if long_enough(token) && !is_stop_word(token) {
            push_unique(&mut keywords, token);
        }
    }

    if keywords.is_empty() {
        for token in lowered.split_whitespace() {
            if long_enough(token) && !is_stop_word(token) {
                push_unique(&mut keywords, token);
            }
        }
    }

    keywords
}

/// Terms for the broad-word tier: every whitespace-separated word of the raw
/// query with edge punctuation trimmed. Question words and pronouns are kept;
/// only greetings/politeness filler is removed.
pub fn broad_terms(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut terms = Vec::new();
    for word in lowered.split_whitespace() {
        let word = word.trim_matches(|c: char| !c.is_alphanumeric());
        if long_enough(word) && !is_filler_word(word) {
            push_unique(&mut terms, word);
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_hours_question() {
        assert_eq!(
            extract_keywords("What are your business hours?"),
            vec!["business", "hours"]
        );
    }

    #[test]
    fn test_strips_punctuation_and_lowercases() {
        assert_eq!(
            extract_keywords("Refund-policy, SHIPPING!!"),
            vec!["refund", "policy", "shipping"]
        );
    }

    #[test]
    fn test_drops_short_tokens() {
        assert_eq!(extract_keywords("a b cd x"), vec!["cd"]);
    }

    #[test]
    fn test_deduplicates_preserving_order() {
        assert_eq!(
            extract_keywords("price price list Price"),
            vec!["price", "list"]
        );
    }

    #[test]
    fn test_only_stop_words_is_empty() {
        assert!(extract_keywords("hi there please").is_empty());
        assert!(extract_keywords("How do I").is_empty());
    }

    #[test]
    fn test_second_pass_keeps_punctuated_tokens() {
        // "c++" collapses to "c" in the first pass and is dropped for length.
        assert_eq!(extract_keywords("c++"), vec!["c++"]);
    }

    #[test]
    fn test_empty_query() {
        assert!(extract_keywords("").is_empty());
        assert!(extract_keywords("   ").is_empty());
    }

    #[test]
    fn test_unicode_tokens_survive() {
        assert_eq!(extract_keywords("Öffnungszeiten?"), vec!["öffnungszeiten"]);
    }

    #[test]
    fn test_broad_terms_keep_question_words() {
        assert_eq!(
            broad_terms("Hi, how do I pay?"),
            vec!["how", "do", "pay"]
        );
    }

    #[test]
    fn test_broad_terms_drop_filler() {
        assert!(broad_terms("hi there please").is_empty());
    }
}
