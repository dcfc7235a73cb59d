//! Fixed keyword sets the rules match against. Matching is plain substring
//! search over lowercased card text.

pub const URGENT_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "critical",
    "deadline",
    "priority",
    "important",
];

pub const WEEK_PHRASES: &[&str] = &[
    "this week",
    "next week",
    "by friday",
    "by monday",
    "by weekend",
];

pub const PROGRESS_KEYWORDS: &[&str] = &[
    "started",
    "working on",
    "in progress",
    "doing",
    "began",
    "beginning",
    "currently",
];

pub const DONE_KEYWORDS: &[&str] = &[
    "completed",
    "finished",
    "done",
    "resolved",
    "closed",
    "fixed",
    "implemented",
];

pub const BLOCKED_KEYWORDS: &[&str] = &[
    "blocked",
    "stuck",
    "waiting",
    "pending",
    "issue",
    "problem",
    "need help",
];

pub const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "this", "that", "these", "those",
];

pub fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_matching_hits_inside_words() {
        assert!(contains_any("reprioritize backlog", URGENT_KEYWORDS));
        assert!(contains_any("undone", DONE_KEYWORDS));
        assert!(!contains_any("polish copy", URGENT_KEYWORDS));
    }

    #[test]
    fn multi_word_phrases_need_exact_spacing() {
        assert!(contains_any("ship by friday", WEEK_PHRASES));
        assert!(!contains_any("ship byfriday", WEEK_PHRASES));
        assert!(contains_any("i need help here", BLOCKED_KEYWORDS));
    }

    #[test]
    fn vocabularies_are_lowercase() {
        for set in [
            URGENT_KEYWORDS,
            WEEK_PHRASES,
            PROGRESS_KEYWORDS,
            DONE_KEYWORDS,
            BLOCKED_KEYWORDS,
            STOP_WORDS,
        ] {
            assert!(set.iter().all(|word| word.to_lowercase() == *word));
        }
    }

    #[test]
    fn stop_words_are_exact_matches() {
        assert!(is_stop_word("those"));
        assert!(!is_stop_word("thoseish"));
    }
}
