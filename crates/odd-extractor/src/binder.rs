//! Attribute binding
//!
//! Walks the analyzed tokens and attaches adjective modifiers to the
//! entities whose surface text matches the adjective's syntactic head.

use odd_core::{AnalyzedToken, Attribute, PartOfSpeech};

use crate::classifier::ClassifiedEntities;

/// Attach adjective attributes to classified entities.
///
/// For every adjective token whose head matches a registered surface
/// text (case-insensitively), an attribute named by the adjective's
/// lowercased text is created on that entity, valued with the original
/// surface text. Traversal order is token order; a repeated attribute
/// name overwrites the earlier value. Adjectives whose head is not a
/// recognized entity are dropped.
pub fn bind_attributes(tokens: &[AnalyzedToken], entities: &mut ClassifiedEntities) {
    for token in tokens {
        if token.pos != PartOfSpeech::Adjective {
            continue;
        }
        if let Some(entity) = entities.get_mut_by_surface(&token.head_text) {
            entity.set_attribute(Attribute::new(token.text.to_lowercase(), &token.text));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::EntityClassifier;
    use odd_core::{ClassifierConfig, EntityMention};

    fn classified(mentions: &[(&str, &str)]) -> ClassifiedEntities {
        let mut classifier = EntityClassifier::new(ClassifierConfig::default());
        for (word, label) in mentions {
            classifier.classify(&EntityMention::new(*word, *label));
        }
        classifier.finish()
    }

    fn adjective(text: &str, head: &str) -> AnalyzedToken {
        AnalyzedToken::new(text, PartOfSpeech::Adjective).with_head(head)
    }

    #[test]
    fn test_adjective_binds_to_head_entity() {
        let mut entities = classified(&[("car", "MISC")]);
        let tokens = vec![adjective("red", "car")];

        bind_attributes(&tokens, &mut entities);

        let attr = entities.entities()[0].attribute("red").unwrap();
        assert_eq!(attr.value, "red");
    }

    #[test]
    fn test_head_match_is_case_insensitive() {
        let mut entities = classified(&[("Car", "MISC")]);
        let tokens = vec![adjective("Red", "CAR")];

        bind_attributes(&tokens, &mut entities);

        // Attribute name is the lowercased adjective, value the original text
        let attr = entities.entities()[0].attribute("red").unwrap();
        assert_eq!(attr.value, "Red");
    }

    #[test]
    fn test_unrecognized_head_is_dropped() {
        let mut entities = classified(&[("car", "MISC")]);
        let tokens = vec![adjective("old", "building")];

        bind_attributes(&tokens, &mut entities);

        // Only the initial ner_type attribute remains
        assert_eq!(entities.entities()[0].attributes.len(), 1);
    }

    #[test]
    fn test_repeated_adjective_last_write_wins() {
        let mut entities = classified(&[("car", "MISC")]);
        let tokens = vec![adjective("Red", "car"), adjective("red", "car")];

        bind_attributes(&tokens, &mut entities);

        let attr = entities.entities()[0].attribute("red").unwrap();
        assert_eq!(attr.value, "red");
    }

    #[test]
    fn test_non_adjectives_are_ignored() {
        let mut entities = classified(&[("car", "MISC")]);
        let tokens = vec![
            AnalyzedToken::new("stopped", PartOfSpeech::Verb).with_head("car"),
            AnalyzedToken::new("the", PartOfSpeech::Determiner).with_head("car"),
        ];

        bind_attributes(&tokens, &mut entities);

        assert_eq!(entities.entities()[0].attributes.len(), 1);
    }

    #[test]
    fn test_binding_is_idempotent_on_same_input() {
        let tokens = vec![adjective("red", "car")];

        let mut first = classified(&[("car", "MISC")]);
        bind_attributes(&tokens, &mut first);

        let mut second = classified(&[("car", "MISC")]);
        bind_attributes(&tokens, &mut second);

        assert_eq!(first.entities(), second.entities());
    }
}
