//! Random target-text generation from the built-in word pools.

use rand::Rng;

/// Filler written into skipped positions when the user space-jumps past the
/// rest of a word. Must never occur in any pool so skipped letters always
/// score as misses.
pub const SKIP_MARKER: char = '_';

pub const MIN_WORDS: usize = 1;
pub const MAX_WORDS: usize = 1000;

pub const BASE_WORDS: &[&str] = &[
    "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog", "hello", "world", "typing",
    "test", "program", "simple", "fast", "computer", "keyboard", "screen", "mouse", "software",
    "hardware", "internet", "website", "email", "password", "username", "login", "download",
    "upload", "file", "folder", "document", "window", "button", "click", "double", "right",
    "left", "center", "top", "bottom", "middle", "side", "front", "back", "forward", "backward",
    "up", "down", "north", "south", "east", "west", "morning", "afternoon", "evening", "night",
    "today", "tomorrow", "yesterday", "week", "month", "year", "time", "clock", "watch",
    "minute", "second", "hour", "schedule", "appointment", "meeting", "conference",
    "presentation", "project", "task", "work", "job", "career", "business", "company", "office",
    "desk", "chair", "table", "phone", "mobile", "tablet", "laptop", "desktop", "server",
    "network", "wireless", "bluetooth", "cable", "connection", "signal", "data", "information",
    "knowledge", "learning", "education", "school", "university", "student", "teacher", "book",
    "page", "chapter", "paragraph", "sentence", "word", "letter", "number", "count", "calculate",
    "mathematics", "science", "technology", "innovation", "development", "progress",
    "improvement", "solution", "problem", "challenge", "opportunity",
];

pub const PUNCTUATION_WORDS: &[&str] = &[
    "hello,", "world!", "it's", "don't", "can't", "won't", "we're", "they're", "you'll", "I'll",
    "she'll", "he'll", "we'll", "they'll", "isn't", "aren't", "wasn't", "weren't", "hasn't",
    "haven't", "doesn't", "didn't", "shouldn't", "wouldn't", "couldn't", "mustn't", "needn't",
    "shan't", "hello.", "goodbye!", "really?", "amazing!", "yes,", "no,", "wait...", "stop!",
    "go!", "help!", "wow!", "oh!",
];

pub const NUMBER_WORDS: &[&str] = &[
    "123", "456", "789", "101", "202", "303", "404", "505", "2024", "2025", "1995", "2000", "42",
    "99", "100", "1000", "test1", "test2", "file1", "file2", "user1", "user2", "admin123",
    "pass123", "v1.0", "v2.0", "v3.1", "v4.2", "room101", "room202", "apt3b", "unit4a",
    "level1", "level2", "step1", "step2", "page1", "page2", "item1", "item2",
];

pub const PURE_NUMBERS: &[&str] = &[
    "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16",
    "17", "18", "19", "20", "25", "30", "42", "50", "75", "99", "100", "123", "456", "789",
    "1000", "2024", "2025", "3000", "5000",
];

/// Which token pools participate in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextOptions {
    pub punctuation: bool,
    pub numbers: bool,
}

/// Builds target strings for a fixed word count and mode.
#[derive(Debug, Clone)]
pub struct TextGenerator {
    word_count: usize,
    options: TextOptions,
}

impl TextGenerator {
    pub fn new(word_count: usize, options: TextOptions) -> Self {
        Self {
            word_count,
            options,
        }
    }

    pub fn word_count(&self) -> usize {
        self.word_count
    }

    pub fn options(&self) -> TextOptions {
        self.options
    }

    /// Draw `word_count` tokens uniformly with replacement from the pools
    /// the mode permits and join them with single spaces.
    pub fn generate(&self, rng: &mut impl Rng) -> String {
        let pool = self.pool();
        let tokens: Vec<&str> = (0..self.word_count)
            .map(|_| pool[rng.gen_range(0..pool.len())])
            .collect();
        tokens.join(" ")
    }

    fn pool(&self) -> Vec<&'static str> {
        // Numbers without punctuation is the dedicated numbers-only drill.
        if self.options.numbers && !self.options.punctuation {
            return PURE_NUMBERS.to_vec();
        }

        let mut pool = BASE_WORDS.to_vec();
        if self.options.punctuation {
            pool.extend_from_slice(PUNCTUATION_WORDS);
        }
        if self.options.numbers {
            pool.extend_from_slice(NUMBER_WORDS);
        }
        pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_generates_exact_word_count() {
        for count in [1, 2, 15, 100, 1000] {
            let gen = TextGenerator::new(count, TextOptions::default());
            let text = gen.generate(&mut rng());
            assert_eq!(text.split_whitespace().count(), count);
        }
    }

    #[test]
    fn test_plain_mode_draws_from_base_pool_only() {
        let gen = TextGenerator::new(200, TextOptions::default());
        let text = gen.generate(&mut rng());
        for token in text.split_whitespace() {
            assert!(BASE_WORDS.contains(&token), "unexpected token {token:?}");
        }
    }

    #[test]
    fn test_numbers_only_mode_uses_pure_numbers() {
        let opts = TextOptions {
            punctuation: false,
            numbers: true,
        };
        let gen = TextGenerator::new(200, opts);
        let text = gen.generate(&mut rng());
        for token in text.split_whitespace() {
            assert!(PURE_NUMBERS.contains(&token), "unexpected token {token:?}");
        }
    }

    #[test]
    fn test_combined_mode_pool_membership() {
        let opts = TextOptions {
            punctuation: true,
            numbers: true,
        };
        let gen = TextGenerator::new(500, opts);
        let text = gen.generate(&mut rng());
        for token in text.split_whitespace() {
            assert!(
                BASE_WORDS.contains(&token)
                    || PUNCTUATION_WORDS.contains(&token)
                    || NUMBER_WORDS.contains(&token),
                "unexpected token {token:?}"
            );
        }
    }

    #[test]
    fn test_spaces_only_between_tokens() {
        let gen = TextGenerator::new(50, TextOptions::default());
        let text = gen.generate(&mut rng());
        assert!(!text.starts_with(' '));
        assert!(!text.ends_with(' '));
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_no_pool_contains_the_skip_marker() {
        for pool in [BASE_WORDS, PUNCTUATION_WORDS, NUMBER_WORDS, PURE_NUMBERS] {
            for word in pool {
                assert!(!word.contains(SKIP_MARKER), "{word:?} contains the skip marker");
                assert!(!word.contains(' '), "{word:?} contains a space");
            }
        }
    }
}
