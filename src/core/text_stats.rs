use crate::domain::model::TextStats;

/// Character, word and line counts as shown next to the case changer input.
pub fn text_stats(text: &str) -> TextStats {
    TextStats {
        characters: text.chars().count(),
        words: text.split_whitespace().count(),
        // "".split('\n') 也會產生一行
        lines: text.split('\n').count(),
    }
}
