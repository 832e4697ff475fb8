use crate::error::IngestError;
use regex::Regex;

/// Characters that mark a sentence end or a list item. A line break right
/// after one of these is an intentional boundary and is never joined.
const BOUNDARY_MARKERS: [char; 8] = ['.', ':', ';', '?', '!', '•', '-', '◦'];

/// Cleans raw page text extracted from a PDF. The passes run in a fixed
/// order; later passes assume the earlier ones already ran.
///
/// 1. Re-join words hyphenated across a line break.
/// 2. Join wrapped lines inside a paragraph into a single space.
/// 3. Collapse runs of blank lines into one blank line.
/// 4. Strip trailing horizontal whitespace before each line break.
/// 5. Strip leading horizontal whitespace after each line break.
///
/// The result is stable under re-normalization.
pub struct TextNormalizer {
    hyphen_break: Regex,
    blank_run: Regex,
    trailing_space: Regex,
    leading_space: Regex,
}

impl TextNormalizer {
    pub fn new() -> Result<Self, IngestError> {
        Ok(Self {
            hyphen_break: Regex::new(r"(\w)-\n(\w)")?,
            blank_run: Regex::new(r"\n{2,}")?,
            trailing_space: Regex::new(r"[ \t]+\n")?,
            leading_space: Regex::new(r"\n[ \t]+")?,
        })
    }

    pub fn normalize(&self, raw: &str) -> String {
        let text = self.hyphen_break.replace_all(raw, "$1$2");
        let text = join_wrapped_lines(&text);
        let text = self.blank_run.replace_all(&text, "\n\n");
        let text = self.trailing_space.replace_all(&text, "\n");
        self.leading_space.replace_all(&text, "\n").into_owned()
    }
}

// Pass 2. A newline is kept when the previous character is a boundary
// marker or a digit, or when it is part of a newline run (a paragraph
// break); otherwise it merely wraps a line and becomes a space. The regex
// crate has no lookaround, so this is an explicit scan.
fn join_wrapped_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(current) = chars.next() {
        if current == '\n' {
            let keep = prev.is_some_and(|p| {
                p == '\n' || p.is_ascii_digit() || BOUNDARY_MARKERS.contains(&p)
            }) || chars.peek() == Some(&'\n');

            out.push(if keep { '\n' } else { ' ' });
            prev = Some(if keep { '\n' } else { ' ' });
        } else {
            out.push(current);
            prev = Some(current);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::TextNormalizer;

    fn normalizer() -> TextNormalizer {
        TextNormalizer::new().expect("patterns should compile")
    }

    #[test]
    fn hyphenated_words_are_rejoined() {
        let cleaned = normalizer().normalize("la prevari-\ncación administrativa");
        assert_eq!(cleaned, "la prevaricación administrativa");
    }

    #[test]
    fn wrapped_lines_are_joined_into_paragraphs() {
        let cleaned = normalizer().normalize("una línea que\ncontinúa abajo");
        assert_eq!(cleaned, "una línea que continúa abajo");
    }

    #[test]
    fn breaks_after_sentence_enders_and_digits_are_kept() {
        let cleaned = normalizer().normalize("Primera frase.\nSegunda frase:\npunto 1\nsigue");
        assert_eq!(cleaned, "Primera frase.\nSegunda frase:\npunto 1\nsigue");
    }

    #[test]
    fn paragraph_breaks_survive_normalization() {
        let cleaned = normalizer().normalize("primer párrafo\n\nsegundo párrafo");
        assert_eq!(cleaned, "primer párrafo\n\nsegundo párrafo");
    }

    #[test]
    fn blank_line_runs_collapse_to_one() {
        let cleaned = normalizer().normalize("uno\n\n\n\ndos");
        assert_eq!(cleaned, "uno\n\ndos");
    }

    #[test]
    fn horizontal_whitespace_around_kept_newlines_is_stripped() {
        let cleaned = normalizer().normalize("uno.\n   dos");
        assert_eq!(cleaned, "uno.\ndos");

        let cleaned = normalizer().normalize("uno.  \n\ndos");
        assert_eq!(cleaned, "uno.\n\ndos");
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "la prevari-\ncación\n\n\nadministrativa  \n   sigue",
            "1.1. Introducción\nEl texto continúa\naquí.\n\n¿Qué es esto?\nRespuesta.",
            "sin saltos de línea",
            "",
            "\n\nempieza con blancos\n",
        ];

        let normalizer = normalizer();
        for sample in samples {
            let once = normalizer.normalize(sample);
            let twice = normalizer.normalize(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }
}
