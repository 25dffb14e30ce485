use crate::query::{is_operator, AND, CLOSE, OPEN};
use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref RE: Regex = Regex::new(r"(?u)\p{L}[\p{L}\p{N}_']*").expect("valid regex");
}

/// Tokenize text into words using NFKC normalization and lowercasing.
/// Order and repeats are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>().to_lowercase();
    RE.find_iter(&normalized).map(|mat| mat.as_str().to_string()).collect()
}

/// Split a query string into parser tokens. Parentheses always stand alone,
/// operator literals pass through untouched and everything else is
/// normalized like document text. A chunk that normalizes to several words
/// (`x-ray`) becomes `( x AND ray )`; one that normalizes to none is kept
/// as typed, so it reads as an unknown term.
pub fn tokenize_query(text: &str) -> Vec<String> {
    let spaced = text.replace(OPEN, " ( ").replace(CLOSE, " ) ");
    let mut tokens = Vec::new();
    for chunk in spaced.split_whitespace() {
        if is_operator(chunk) {
            tokens.push(chunk.to_string());
            continue;
        }
        let words = tokenize(chunk);
        match words.len() {
            0 => tokens.push(chunk.to_string()),
            1 => tokens.extend(words),
            _ => {
                tokens.push(OPEN.to_string());
                for (i, word) in words.into_iter().enumerate() {
                    if i > 0 {
                        tokens.push(AND.to_string());
                    }
                    tokens.push(word);
                }
                tokens.push(CLOSE.to_string());
            }
        }
    }
    tokens
}
