use crate::error::QueryError;
use regex::Regex;

const TRUNCATED_BODY_CHARS: usize = 200;
const MIN_ANSWER_SENTENCE_CHARS: usize = 40;
const MIN_HIGHLIGHT_WORD_CHARS: usize = 3;

/// Splits at sentence-ending punctuation followed by whitespace. A body
/// containing no `.`, `?` or `!` at all has no sentences.
pub fn split_sentences(body: &str) -> Vec<&str> {
    if !body.contains(['.', '?', '!']) {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = body.as_bytes();
    let mut position = 0;

    while position < bytes.len() {
        let is_terminator = matches!(bytes[position], b'.' | b'?' | b'!');
        let followed_by_space = bytes
            .get(position + 1)
            .is_some_and(|next| next.is_ascii_whitespace());

        if is_terminator && followed_by_space {
            sentences.push(&body[start..=position]);
            position += 1;
            while position < bytes.len() && bytes[position].is_ascii_whitespace() {
                position += 1;
            }
            start = position;
        } else {
            position += 1;
        }
    }

    if start < body.len() {
        sentences.push(&body[start..]);
    }

    sentences
}

/// Longest sentence over 40 chars that does not echo the question back;
/// falls back to the first sentence, then to a 200-char preview.
pub fn best_sentence(body: &str, question: &str) -> String {
    let sentences = split_sentences(body);
    if sentences.is_empty() {
        let preview: String = body.chars().take(TRUNCATED_BODY_CHARS).collect();
        return format!("{preview}...");
    }

    let needle = question.trim().to_lowercase();
    let mut best: Option<(&str, usize)> = None;

    for sentence in &sentences {
        let length = sentence.chars().count();
        if length <= MIN_ANSWER_SENTENCE_CHARS || sentence.to_lowercase().contains(&needle) {
            continue;
        }
        // strictly greater keeps the first sentence on ties
        if best.map(|(_, len)| length > len).unwrap_or(true) {
            best = Some((sentence, length));
        }
    }

    match best {
        Some((sentence, _)) => sentence.to_string(),
        None => sentences[0].to_string(),
    }
}

/// Wraps every case-insensitive occurrence of each distinct question word
/// longer than 3 chars in `<mark>` tags. Words are stripped of edge
/// punctuation ("¿prevaricación?" emphasizes "prevaricación") and
/// regex-escaped before matching.
pub fn highlight_terms(text: &str, question: &str) -> Result<String, QueryError> {
    let mut highlighted = text.to_string();
    let mut seen = Vec::new();

    for token in question.split_whitespace() {
        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        if word.chars().count() <= MIN_HIGHLIGHT_WORD_CHARS {
            continue;
        }
        let folded = word.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);

        let pattern = Regex::new(&format!("(?i)({})", regex::escape(word)))?;
        highlighted = pattern
            .replace_all(&highlighted, "<mark>$1</mark>")
            .into_owned();
    }

    Ok(highlighted)
}
