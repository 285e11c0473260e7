//! Keyword colouring for the code snippet box.
//!
//! Not a lexer: the code is split on whitespace and `( ) . ;`, and whole
//! tokens are looked up in three small keyword lists.

use serde::Serialize;

const RED: &[&str] = &["await", "const", "="];
const BLUE: &[&str] = &["await", "fetch", "console", "response", "css"];
const PURPLE: &[&str] = &["log", "text"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Colour {
    Red,
    Blue,
    Purple,
}

impl Colour {
    pub fn css(&self) -> &'static str {
        match self {
            Colour::Red => "#f87171",
            Colour::Blue => "#60a5fa",
            Colour::Purple => "#c084fc",
        }
    }

    /// Red wins over blue, blue over purple.
    pub fn of(token: &str) -> Option<Self> {
        if RED.contains(&token) {
            Some(Colour::Red)
        } else if BLUE.contains(&token) {
            Some(Colour::Blue)
        } else if PURPLE.contains(&token) {
            Some(Colour::Purple)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub text: &'a str,
    pub colour: Option<Colour>,
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '(' | ')' | '.' | ';')
}

/// Split `code` into words, whitespace runs and single separators.
///
/// Concatenating the result gives back `code`.
pub fn tokenize(code: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start = 0;
    let mut chars = code.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_separator(ch) && !ch.is_whitespace() {
            continue;
        }
        if word_start < idx {
            tokens.push(&code[word_start..idx]);
        }

        let mut end = idx + ch.len_utf8();
        if ch.is_whitespace() {
            while let Some(&(next, c)) = chars.peek() {
                if !c.is_whitespace() {
                    break;
                }
                end = next + c.len_utf8();
                chars.next();
            }
        }
        tokens.push(&code[idx..end]);
        word_start = end;
    }

    if word_start < code.len() {
        tokens.push(&code[word_start..]);
    }
    tokens
}

/// Tokenize and colour. Separators and whitespace are never coloured.
pub fn highlight(code: &str) -> Vec<Token<'_>> {
    tokenize(code)
        .into_iter()
        .map(|text| {
            let plain = text.chars().all(|c| c.is_whitespace() || is_separator(c));
            Token {
                text,
                colour: if plain { None } else { Colour::of(text) },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE: &str = "const css = await response.text()";

    #[test]
    fn tokens_reassemble() {
        let tokens = tokenize(LINE);
        assert_eq!(
            tokens,
            ["const", " ", "css", " ", "=", " ", "await", " ", "response", ".", "text", "(", ")"]
        );
        assert_eq!(tokens.concat(), LINE);
    }

    #[test]
    fn whitespace_runs_stay_together() {
        assert_eq!(tokenize("\n  a\t\tb;\n"), ["\n  ", "a", "\t\t", "b", ";", "\n"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn colours_follow_keyword_lists() {
        let coloured: Vec<_> = highlight(LINE)
            .into_iter()
            .filter_map(|t| t.colour.map(|c| (t.text, c)))
            .collect();
        assert_eq!(
            coloured,
            [
                ("const", Colour::Red),
                ("css", Colour::Blue),
                ("=", Colour::Red),
                ("await", Colour::Red),
                ("response", Colour::Blue),
                ("text", Colour::Purple),
            ]
        );
    }

    #[test]
    fn partial_words_are_plain() {
        assert_eq!(Colour::of("consts"), None);
        assert_eq!(Colour::of("fetch"), Some(Colour::Blue));
        assert_eq!(Colour::Purple.css(), "#c084fc");
    }
}
