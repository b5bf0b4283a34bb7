//! Tokenizer shared by the vocabulary builder and the vectorizer.
//!
//! Lowercase, split on anything that is not a word character, keep
//! tokens of two or more characters. Both sides of the pipeline go
//! through `tokens()` so a term counted at fit time is always the same
//! term looked up at transform time.

use std::collections::HashSet;

/// Standard English stop word list for bag-of-words vectorizers.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into",
    "is", "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd",
    "made", "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover",
    "most", "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither",
    "never", "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not",
    "nothing", "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part",
    "per", "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed",
    "seeming", "seems", "serious", "several", "she", "should", "show", "side", "since",
    "sincere", "six", "sixty", "so", "some", "somehow", "someone", "something", "sometime",
    "sometimes", "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the",
    "their", "them", "themselves", "then", "thence", "there", "thereafter", "thereby",
    "therefore", "therein", "thereupon", "these", "they", "thick", "thin", "third", "this",
    "those", "though", "three", "through", "throughout", "thru", "thus", "to", "together", "too",
    "top", "toward", "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon",
    "us", "very", "via", "was", "we", "well", "were", "what", "whatever", "when", "whence",
    "whenever", "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever",
    "whether", "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// A set of terms excluded from the vocabulary.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in English list.
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    /// No stop words at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Add extra words. Input is lowercased to match token normalization.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn contains(&self, term: &str) -> bool {
        self.words.contains(term)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Raw tokens of `text`, no stop word filtering.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !is_word_char(c))
        .filter(|w| w.chars().nth(1).is_some())
        .map(|w| w.to_lowercase())
}

/// Tokens of `text` with stop words removed.
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    tokens(text).filter(|t| !stop_words.contains(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_on_punctuation() {
        let toks: Vec<String> = tokens("Space-War, FUTURE!").collect();
        assert_eq!(toks, vec!["space", "war", "future"]);
    }

    #[test]
    fn drops_single_character_tokens() {
        let toks: Vec<String> = tokens("a b cd e fg").collect();
        assert_eq!(toks, vec!["cd", "fg"]);
    }

    #[test]
    fn underscore_and_digits_are_word_chars() {
        let toks: Vec<String> = tokens("sam_worthington 3d 1999").collect();
        assert_eq!(toks, vec!["sam_worthington", "3d", "1999"]);
    }

    #[test]
    fn unicode_letters_survive() {
        let toks: Vec<String> = tokens("Amélie café").collect();
        assert_eq!(toks, vec!["amélie", "café"]);
    }

    #[test]
    fn english_stop_words_filtered() {
        let sw = StopWords::english();
        assert_eq!(
            tokenize("the war of the worlds and beyond", &sw),
            vec!["war", "worlds"]
        );
    }

    #[test]
    fn none_keeps_everything() {
        let sw = StopWords::none();
        assert!(sw.is_empty());
        assert_eq!(tokenize("the war", &sw), vec!["the", "war"]);
    }

    #[test]
    fn extra_words_lowercased() {
        let mut sw = StopWords::none();
        sw.extend(["Movie", "FILM"]);
        assert_eq!(sw.len(), 2);
        assert_eq!(tokenize("movie film noir", &sw), vec!["noir"]);
    }
}
