use crate::vocabulary::is_stop_word;
use taskboard_core::model::card::Card;

const MIN_MEANINGFUL_LEN: usize = 4;

/// Lowercased `title + " " + description`.
pub(crate) fn card_text(card: &Card) -> String {
    format!("{} {}", card.title, card.description).to_lowercase()
}

/// Lowercased list title with all whitespace removed.
pub(crate) fn compact_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whitespace tokens of at least four lowercase ASCII letters that are not stop words.
pub(crate) fn meaningful_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .filter(|word| word.len() >= MIN_MEANINGFUL_LEN && !is_stop_word(word))
        .filter(|word| word.bytes().all(|b| b.is_ascii_lowercase()))
        .collect()
}

/// Words of `left` also present in `right`, in `left` order, each word once.
pub(crate) fn shared_words<'a>(left: &[&'a str], right: &[&str]) -> Vec<&'a str> {
    let mut shared: Vec<&'a str> = Vec::new();
    for &word in left {
        if right.contains(&word) && !shared.contains(&word) {
            shared.push(word);
        }
    }
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_core::model::id::CardId;

    #[test]
    fn card_text_joins_title_and_description() {
        let card = Card::new(CardId::new("c"), "Fix ASAP").with_description("Login Page");
        assert_eq!(card_text(&card), "fix asap login page");
        let bare = Card::new(CardId::new("c"), "Only Title");
        assert_eq!(card_text(&bare), "only title ");
    }

    #[test]
    fn compact_title_strips_all_whitespace() {
        assert_eq!(compact_title("To  Do"), "todo");
        assert_eq!(compact_title(" In\tProgress "), "inprogress");
    }

    #[test]
    fn meaningful_words_drop_short_punctuated_and_numeric_tokens() {
        let words = meaningful_words("update the database, migration v2 scripts for 2026 api");
        assert_eq!(words, vec!["update", "migration", "scripts"]);
    }

    #[test]
    fn shared_words_keep_left_order_once() {
        let left = vec!["migration", "database", "migration", "schema"];
        let right = vec!["schema", "database", "migration"];
        assert_eq!(
            shared_words(&left, &right),
            vec!["migration", "database", "schema"]
        );
    }
}
