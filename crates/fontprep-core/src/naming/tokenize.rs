//! Character-class tokenizer shared by the sanitizer and the family detector.
//!
//! Boundary rules (ASCII only; anything else acts as a separator):
//!
//! - a run of non-alphanumeric characters separates words
//! - lowercase followed by uppercase starts a new word (`iconFont` → `icon Font`)
//! - for family names only: inside an uppercase run, the last uppercase letter
//!   starts a new word when a lowercase letter follows (`ABCDef` → `ABC Def`)

/// Splits `s` into identifier words for camel-casing.
pub fn split_words(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut words = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        if !b.is_ascii_alphanumeric() {
            if let Some(st) = start.take() {
                words.push(&s[st..i]);
            }
            continue;
        }
        match start {
            None => start = Some(i),
            Some(st) => {
                if b.is_ascii_uppercase() && bytes[i - 1].is_ascii_lowercase() {
                    words.push(&s[st..i]);
                    start = Some(i);
                }
            }
        }
    }
    if let Some(st) = start {
        words.push(&s[st..]);
    }
    words
}

/// Uppercases the first character of each token and concatenates them.
pub fn camel_case<S: AsRef<str>>(tokens: &[S]) -> String {
    let mut out = String::new();
    for token in tokens {
        let mut chars = token.as_ref().chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.extend(chars);
        }
    }
    out
}

/// Splits an identifier-like family base into readable words.
///
/// Whitespace is kept as a separator; every other character is part of a
/// word. Applies the lower→upper rule and the acronym rule.
pub fn family_words(s: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in s.split_whitespace() {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();
        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_ascii_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
                let lower_to_upper = prev.is_ascii_lowercase();
                let acronym_end = prev.is_ascii_uppercase() && next_is_lower;
                if (lower_to_upper || acronym_end) && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }
        if !current.is_empty() {
            words.push(current);
        }
    }
    words
}
