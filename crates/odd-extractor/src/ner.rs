//! Rule-based entity recognition
//!
//! Dictionary- and pattern-driven recognizer emitting BIO-labelled
//! mentions, standing in for a statistical NER model. Multi-word
//! matches are emitted word by word with `B-`/`I-` prefixes, matching
//! the mention shape the classifier expects from any recognizer.

use std::collections::{HashMap, HashSet};

use regex::Regex;

use odd_core::{EntityMention, EntityRecognizer, Result};

/// A raw span match before deduplication
#[derive(Debug, Clone)]
struct SpanMatch {
    start: usize,
    end: usize,
    label: &'static str,
}

/// Rule-based entity recognizer using gazetteers and regex patterns
pub struct GazetteerRecognizer {
    /// Lowercased term -> coarse label
    terms: HashMap<String, &'static str>,
    /// Pattern rules (regex -> label)
    patterns: Vec<(Regex, &'static str)>,
}

impl GazetteerRecognizer {
    /// Create a recognizer with the default driving-domain rules
    pub fn new() -> Self {
        let mut ner = Self {
            terms: HashMap::new(),
            patterns: Vec::new(),
        };

        ner.init_terms();
        ner.init_patterns();
        ner
    }

    fn init_terms(&mut self) {
        // Locations and structures
        for term in [
            "building", "street", "road", "highway", "intersection", "bridge", "tunnel",
            "crosswalk", "sidewalk", "parking lot", "downtown", "city", "town", "seaport",
            "airport", "station", "school", "park",
        ] {
            self.add_term(term, "LOC");
        }

        // Geopolitical names
        for term in ["boston", "seattle", "new york", "london"] {
            self.add_term(term, "GPE");
        }

        // Organizations
        for term in ["police", "police department", "fire department"] {
            self.add_term(term, "ORG");
        }

        // Persons
        for term in [
            "pedestrian", "driver", "cyclist", "passenger", "officer", "man", "woman",
            "child",
        ] {
            self.add_term(term, "PER");
        }

        // Miscellaneous: vehicles and weather
        for term in [
            "car", "cars", "vehicle", "vehicles", "truck", "trucks", "bus", "motorcycle",
            "bicycle", "van", "suv", "weather", "rain", "sunny", "snow", "fog", "storm",
        ] {
            self.add_term(term, "MISC");
        }
    }

    fn init_patterns(&mut self) {
        // Speed expressions
        self.add_pattern(r"\d+(\.\d+)?\s?(km/h|mph|m/s)", "MISC");
        // Numbered routes and road designations
        self.add_pattern(r"(?i)route\s+\d+", "LOC");
        self.add_pattern(r"[A-Z]{1,2}-\d{1,3}\b", "LOC");
    }

    /// Add a gazetteer term
    fn add_term(&mut self, term: &str, label: &'static str) {
        self.terms.insert(term.to_lowercase(), label);
    }

    /// Add a regex pattern
    fn add_pattern(&mut self, pattern: &str, label: &'static str) {
        if let Ok(regex) = Regex::new(pattern) {
            self.patterns.push((regex, label));
        }
    }

    fn find_term_matches(&self, text: &str) -> Vec<SpanMatch> {
        let lower = text.to_lowercase();
        let mut matches = Vec::new();

        for (term, label) in &self.terms {
            for (start, found) in lower.match_indices(term.as_str()) {
                let end = start + found.len();
                if !on_word_boundary(&lower, start, end) {
                    continue;
                }
                // Lowercasing can shift byte offsets for non-ASCII text;
                // skip matches that no longer line up
                if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
                    continue;
                }
                matches.push(SpanMatch { start, end, label });
            }
        }

        matches
    }

    fn find_pattern_matches(&self, text: &str) -> Vec<SpanMatch> {
        let mut matches = Vec::new();

        for (regex, label) in &self.patterns {
            for found in regex.find_iter(text) {
                matches.push(SpanMatch {
                    start: found.start(),
                    end: found.end(),
                    label,
                });
            }
        }

        matches
    }

    /// Remove overlapping matches, keeping the longest at each position
    fn deduplicate(&self, mut matches: Vec<SpanMatch>) -> Vec<SpanMatch> {
        matches.sort_by(|a, b| a.start.cmp(&b.start).then((b.end - b.start).cmp(&(a.end - a.start))));

        let mut covered: HashSet<usize> = HashSet::new();
        let mut result = Vec::new();

        for m in matches {
            let overlaps = (m.start..m.end).any(|i| covered.contains(&i));
            if !overlaps {
                covered.extend(m.start..m.end);
                result.push(m);
            }
        }

        result.sort_by_key(|m| m.start);
        result
    }
}

impl Default for GazetteerRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityRecognizer for GazetteerRecognizer {
    fn recognize(&self, text: &str) -> Result<Vec<EntityMention>> {
        let mut matches = self.find_term_matches(text);
        matches.extend(self.find_pattern_matches(text));
        let matches = self.deduplicate(matches);

        let mut mentions = Vec::new();
        for m in &matches {
            for (n, word) in text[m.start..m.end].split_whitespace().enumerate() {
                let prefix = if n == 0 { "B" } else { "I" };
                mentions.push(EntityMention::new(word, format!("{}-{}", prefix, m.label)));
            }
        }

        Ok(mentions)
    }

    fn name(&self) -> &str {
        "gazetteer"
    }
}

/// A match counts only when not embedded in a longer alphanumeric run
fn on_word_boundary(lower: &str, start: usize, end: usize) -> bool {
    let before = lower[..start].chars().next_back();
    let after = lower[end..].chars().next();

    before.is_none_or(|c| !c.is_alphanumeric()) && after.is_none_or(|c| !c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recognize(text: &str) -> Vec<EntityMention> {
        GazetteerRecognizer::new().recognize(text).unwrap()
    }

    #[test]
    fn test_single_word_terms() {
        let mentions = recognize("The red car stopped near the old building.");

        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0], EntityMention::new("car", "B-MISC"));
        assert_eq!(mentions[1], EntityMention::new("building", "B-LOC"));
    }

    #[test]
    fn test_multiword_term_gets_bio_labels() {
        let mentions = recognize("We drove through New York today");

        assert_eq!(mentions[0], EntityMention::new("New", "B-GPE"));
        assert_eq!(mentions[1], EntityMention::new("York", "I-GPE"));
    }

    #[test]
    fn test_word_boundaries_respected() {
        assert!(recognize("The scar was visible").is_empty());
        assert!(recognize("A carpool lane").is_empty());
    }

    #[test]
    fn test_longer_match_wins_overlap() {
        let mentions = recognize("the police department was notified");

        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0], EntityMention::new("police", "B-ORG"));
        assert_eq!(mentions[1], EntityMention::new("department", "I-ORG"));
    }

    #[test]
    fn test_speed_pattern() {
        let mentions = recognize("traveling at 60 km/h");

        assert_eq!(mentions[0], EntityMention::new("60", "B-MISC"));
        assert_eq!(mentions[1], EntityMention::new("km/h", "I-MISC"));
    }

    #[test]
    fn test_mentions_in_text_order() {
        let mentions = recognize("A truck passed the pedestrian in Boston");

        let words: Vec<&str> = mentions.iter().map(|m| m.word.as_str()).collect();
        assert_eq!(words, vec!["truck", "pedestrian", "Boston"]);
        assert_eq!(mentions[2].label, "B-GPE");
    }

    #[test]
    fn test_empty_text() {
        assert!(recognize("").is_empty());
    }
}
