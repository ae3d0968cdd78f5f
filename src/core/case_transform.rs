//! Text case transform engine.
//!
//! Every mode maps a string to a new string; the input is never modified.
//! Preprocessing runs first (collapse whitespace, then dedupe lines), then the
//! mode is applied to the whole text or to each line on its own.

use crate::core::text_stats::text_stats;
use crate::domain::model::{CaseMode, CaseOptions, CaseTransformResult};
use regex::Regex;
use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Words left lowercase by title case when article skipping is on.
pub const TITLE_STOP_WORDS: [&str; 13] = [
    "a", "an", "the", "and", "but", "or", "for", "nor", "on", "at", "to", "by", "with",
];

static SENTENCE_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\w|[.!?]\s+\w").unwrap());

pub fn transform(text: &str, mode: CaseMode, options: &CaseOptions) -> String {
    let prepared = preprocess(text, options);

    if !options.preserve_line_breaks {
        return apply_mode(&prepared, mode, options.skip_articles);
    }

    prepared
        .split('\n')
        .map(|line| match line.strip_suffix('\r') {
            Some(body) => {
                let mut converted = apply_mode(body, mode, options.skip_articles);
                converted.push('\r');
                converted
            }
            None => apply_mode(line, mode, options.skip_articles),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Like [`transform`], but also reports lengths and input statistics.
pub fn convert(text: &str, mode: CaseMode, options: &CaseOptions) -> CaseTransformResult {
    let converted_text = transform(text, mode, options);
    let output_length = converted_text.chars().count();
    let input_stats = text_stats(text);

    tracing::debug!(
        %mode,
        input_length = input_stats.characters,
        output_length,
        "converted text"
    );

    CaseTransformResult {
        mode,
        converted_text,
        input_length: input_stats.characters,
        output_length,
        input_stats,
    }
}

/// Transforms by mode name. Unknown names leave the text unchanged.
pub fn transform_named(text: &str, mode_name: &str, options: &CaseOptions) -> String {
    match mode_name.parse::<CaseMode>() {
        Ok(mode) => transform(text, mode, options),
        Err(e) => {
            tracing::warn!("{}; returning text unchanged", e);
            text.to_string()
        }
    }
}

pub fn preprocess<'a>(text: &'a str, options: &CaseOptions) -> Cow<'a, str> {
    let mut prepared = Cow::Borrowed(text);

    if options.collapse_whitespace {
        prepared = Cow::Owned(prepared.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    if options.dedupe_lines {
        prepared = Cow::Owned(dedupe_lines(&prepared));
    }

    prepared
}

/// Drops repeated lines, keeping the first occurrence of each.
pub fn dedupe_lines(text: &str) -> String {
    let mut seen = HashSet::new();
    text.split('\n')
        .filter(|line| seen.insert(*line))
        .collect::<Vec<_>>()
        .join("\n")
}

fn apply_mode(text: &str, mode: CaseMode, skip_articles: bool) -> String {
    match mode {
        CaseMode::Upper => text.to_uppercase(),
        CaseMode::Lower => text.to_lowercase(),
        CaseMode::Title => title_case(text, skip_articles),
        CaseMode::Sentence => sentence_case(text),
        CaseMode::Capitalize => title_case(text, false),
        CaseMode::Inverse => inverse_case(text),
        CaseMode::Alternating => alternating_case(text),
        CaseMode::Snake | CaseMode::Kebab | CaseMode::Camel | CaseMode::Pascal | CaseMode::Dot => {
            identifier_case(text, mode)
        }
    }
}

fn title_case(text: &str, skip_articles: bool) -> String {
    text.to_lowercase()
        .split(' ')
        .enumerate()
        .map(|(index, word)| {
            if skip_articles && index > 0 && TITLE_STOP_WORDS.contains(&word) {
                word.to_string()
            } else {
                capitalize_first(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn sentence_case(text: &str) -> String {
    let lower = text.to_lowercase();
    SENTENCE_START
        .replace_all(&lower, |caps: &regex::Captures| caps[0].to_uppercase())
        .into_owned()
}

fn inverse_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_uppercase() {
            out.extend(c.to_lowercase());
        } else if c.is_lowercase() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn alternating_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (index, c) in text.chars().enumerate() {
        if index % 2 == 0 {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
    }
    out
}

fn identifier_case(text: &str, mode: CaseMode) -> String {
    let split_case_humps = matches!(mode, CaseMode::Camel | CaseMode::Pascal);
    let words = identifier_words(text, mode.separator(), split_case_humps);

    match mode {
        CaseMode::Camel => words
            .iter()
            .enumerate()
            .map(|(index, word)| {
                if index == 0 {
                    word.clone()
                } else {
                    capitalize_first(word)
                }
            })
            .collect(),
        CaseMode::Pascal => words.iter().map(|word| capitalize_first(word)).collect(),
        _ => {
            let separator = mode.separator().map(String::from).unwrap_or_default();
            words.join(&separator)
        }
    }
}

/// Lowercased tokens: non-word characters stripped, split on whitespace and the
/// delimiter. camel/pascal output has no separator, so those modes also split
/// at case humps to read their own output back.
fn identifier_words(text: &str, delimiter: Option<char>, split_case_humps: bool) -> Vec<String> {
    let cleaned: String = text
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() || Some(c) == delimiter {
                Some(' ')
            } else if is_word_char(c) {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .flat_map(|token| {
            if split_case_humps {
                split_humps(token)
            } else {
                vec![token]
            }
        })
        .map(|word| word.to_lowercase())
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `customerFirstName` -> customer, First, Name; `HTTPServer` -> HTTP, Server.
fn split_humps(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (offset, c) = chars[i];
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, n)| n.is_lowercase());

        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_numeric()
                || (prev.is_uppercase() && next_is_lower));

        if boundary {
            parts.push(&word[start..offset]);
            start = offset;
        }
    }

    parts.push(&word[start..]);
    parts
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
