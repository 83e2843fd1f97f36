/// Words masked out of chirp bodies before they are stored
const BANNED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];

/// Replace banned words with `****`, case-insensitively, matching whole
/// words only. Text is split at word boundaries so punctuation glued to a
/// banned word is preserved ("Sharbert!" becomes "****!"), while words that
/// merely contain a banned word ("kerfuffles") pass through.
pub fn clean_chirp(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    let mut word = String::new();

    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            flush_word(&mut cleaned, &mut word);
            cleaned.push(c);
        }
    }
    flush_word(&mut cleaned, &mut word);

    cleaned
}

fn flush_word(out: &mut String, word: &mut String) {
    if word.is_empty() {
        return;
    }
    let lower = word.to_lowercase();
    if BANNED_WORDS.contains(&lower.as_str()) {
        out.push_str("****");
    } else {
        out.push_str(word);
    }
    word.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_banned_words_case_insensitively() {
        assert_eq!(
            clean_chirp("I hear Mastodon is better than Chirpy. sharbert I need to migrate"),
            "I hear Mastodon is better than Chirpy. **** I need to migrate"
        );
        assert_eq!(clean_chirp("KERFUFFLE Sharbert fornax"), "**** **** ****");
    }

    #[test]
    fn punctuation_next_to_banned_words_survives() {
        assert_eq!(
            clean_chirp("I really need a kerfuffle to go to bed sooner, Fornax !"),
            "I really need a **** to go to bed sooner, **** !"
        );
        assert_eq!(clean_chirp("Sharbert!"), "****!");
    }

    #[test]
    fn partial_matches_are_left_alone() {
        assert_eq!(clean_chirp("kerfuffles are fine"), "kerfuffles are fine");
        assert_eq!(clean_chirp("sharbert1"), "sharbert1");
    }

    #[test]
    fn clean_text_is_unchanged() {
        let text = "This is a perfectly ordinary chirp.";
        assert_eq!(clean_chirp(text), text);
    }
}
