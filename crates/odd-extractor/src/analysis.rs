//! Rule-based linguistic analysis
//!
//! A lexicon-driven stand-in for a statistical tagger: offset-order
//! tokenization, coarse POS tagging from word lists and suffix
//! heuristics, stop-word flags, lowercased lemmas, and adjective head
//! attachment. The dependency structure is an approximation — every
//! token heads itself except adjectives, which attach to the next
//! content token in the same sentence. That is the only relation the
//! downstream binder consumes.

use unicode_segmentation::UnicodeSegmentation;

use odd_core::{AnalyzedToken, LinguisticAnalyzer, PartOfSpeech, Result};

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "then", "than", "of", "at", "by", "for",
    "with", "about", "to", "from", "in", "on", "into", "over", "under", "is", "are", "was",
    "were", "be", "been", "being", "am", "do", "does", "did", "have", "has", "had", "it",
    "its", "this", "that", "these", "those", "he", "she", "they", "them", "him", "her",
    "his", "their", "we", "us", "our", "you", "your", "i", "me", "my", "as", "so", "not",
    "no", "nor", "too", "very", "can", "will", "just",
];

const DETERMINERS: &[&str] = &[
    "the", "a", "an", "this", "that", "these", "those", "each", "every", "some", "any",
    "no", "both", "either", "neither",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them", "his",
    "hers", "its", "their", "theirs", "our", "ours", "your", "yours", "who", "whom",
    "which", "what",
];

const ADPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "against", "between", "into",
    "through", "during", "before", "after", "above", "below", "to", "from", "up", "down",
    "under", "over", "near", "behind", "beside", "across", "along", "around", "past",
    "toward", "towards", "onto", "off",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "because", "although", "while", "when",
    "since",
];

/// Adjectives common in driving-scenario descriptions
const ADJECTIVES: &[&str] = &[
    "red", "blue", "green", "black", "white", "yellow", "orange", "gray", "grey",
    "silver", "old", "new", "young", "big", "small", "large", "little", "heavy", "light",
    "wet", "dry", "sunny", "rainy", "cloudy", "foggy", "icy", "snowy", "windy", "stormy",
    "dark", "bright", "dim", "busy", "quiet", "empty", "crowded", "narrow", "wide",
    "fast", "slow", "parked", "stationary", "oncoming", "nearby", "residential", "urban",
    "rural", "dense", "clear", "slippery", "rough", "smooth", "steep", "flat",
];

const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "less", "ish"];

/// Rule-based linguistic analyzer backed by word lists
///
/// Stateless; one instance can serve any number of extractions.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    /// Create a new analyzer
    pub fn new() -> Self {
        Self
    }

    fn tag(&self, word: &str) -> PartOfSpeech {
        let lower = word.to_lowercase();

        if word.chars().all(|c| !c.is_alphanumeric()) {
            PartOfSpeech::Punctuation
        } else if word.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',') {
            PartOfSpeech::Numeral
        } else if DETERMINERS.contains(&lower.as_str()) {
            PartOfSpeech::Determiner
        } else if PRONOUNS.contains(&lower.as_str()) {
            PartOfSpeech::Pronoun
        } else if ADPOSITIONS.contains(&lower.as_str()) {
            PartOfSpeech::Adposition
        } else if CONJUNCTIONS.contains(&lower.as_str()) {
            PartOfSpeech::Conjunction
        } else if ADJECTIVES.contains(&lower.as_str()) || has_adjective_suffix(&lower) {
            PartOfSpeech::Adjective
        } else if lower.len() > 3 && lower.ends_with("ly") {
            PartOfSpeech::Adverb
        } else if lower.len() > 4 && (lower.ends_with("ed") || lower.ends_with("ing")) {
            PartOfSpeech::Verb
        } else if word.chars().all(|c| c.is_alphabetic()) {
            PartOfSpeech::Noun
        } else {
            PartOfSpeech::Other
        }
    }
}

fn has_adjective_suffix(lower: &str) -> bool {
    ADJ_SUFFIXES
        .iter()
        .any(|suffix| lower.len() > suffix.len() + 2 && lower.ends_with(suffix))
}

/// Lowercase base form: plural nouns lose their ending, everything else
/// just lowercases
fn lemmatize(lower: &str) -> String {
    if lower.len() > 4 && lower.ends_with("ies") {
        format!("{}y", &lower[..lower.len() - 3])
    } else if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") {
        lower[..lower.len() - 1].to_string()
    } else {
        lower.to_string()
    }
}

/// Content tokens are head-attachment targets for adjectives
fn is_content(token: &AnalyzedToken) -> bool {
    matches!(
        token.pos,
        PartOfSpeech::Noun | PartOfSpeech::Verb | PartOfSpeech::Other
    ) && !token.is_stop
}

fn is_sentence_end(token: &AnalyzedToken) -> bool {
    token.pos == PartOfSpeech::Punctuation
        && matches!(token.text.as_str(), "." | "!" | "?" | ";")
}

impl LinguisticAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<AnalyzedToken>> {
        let mut tokens: Vec<AnalyzedToken> = text
            .split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .map(|segment| {
                let lower = segment.to_lowercase();
                AnalyzedToken::new(segment, self.tag(segment))
                    .with_lemma(lemmatize(&lower))
                    .with_stop(STOP_WORDS.contains(&lower.as_str()))
            })
            .collect();

        // Attach each adjective to the next content token in its sentence
        for i in 0..tokens.len() {
            if tokens[i].pos != PartOfSpeech::Adjective {
                continue;
            }
            let head = tokens[i + 1..]
                .iter()
                .take_while(|t| !is_sentence_end(t))
                .find(|t| is_content(t))
                .map(|t| t.text.clone());
            if let Some(head) = head {
                tokens[i].head_text = head;
            }
        }

        Ok(tokens)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

/// Lowercased lemmas of alphabetic, non-stop tokens
///
/// The content digest logged before extraction.
pub fn content_lemmas(tokens: &[AnalyzedToken]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.is_alpha && !t.is_stop)
        .map(|t| t.lemma.clone())
        .collect()
}
