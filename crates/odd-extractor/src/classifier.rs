//! Entity classification
//!
//! Maps raw recognizer labels onto the four ODD categories and assigns
//! identifiers that are stable within one extraction.

use std::collections::HashMap;

use odd_core::{
    Attribute, ClassifierConfig, Entity, EntityCategory, EntityMention, ExtractionResult,
};

/// Attribute name carrying the recognizer's raw label
pub const NER_TYPE_ATTR: &str = "ner_type";

/// Classified entities plus the surface-text lookup used for binding
///
/// The lookup is keyed by lowercased surface text. When two mentions
/// share the same lowercased text, the later one overwrites the earlier
/// slot (documented quirk, preserved).
#[derive(Debug, Default)]
pub struct ClassifiedEntities {
    entities: Vec<Entity>,
    lookup: HashMap<String, usize>,
}

impl ClassifiedEntities {
    /// Entities in recognition order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access to the entity registered for a surface text
    pub fn get_mut_by_surface(&mut self, surface: &str) -> Option<&mut Entity> {
        let index = *self.lookup.get(&surface.to_lowercase())?;
        self.entities.get_mut(index)
    }

    /// Finalize into an extraction result; entities are immutable after this
    pub fn into_result(self) -> ExtractionResult {
        ExtractionResult {
            entities: self.entities,
            ..Default::default()
        }
    }

    fn register(&mut self, surface_key: String, entity: Entity) {
        let index = self.entities.len();
        self.lookup.insert(surface_key, index);
        self.entities.push(entity);
    }
}

/// Classifier state local to one extraction
///
/// The identifier counter and the surface lookup never outlive one
/// invocation; concurrent extractions must each use their own instance.
pub struct EntityClassifier {
    config: ClassifierConfig,
    counter: usize,
    out: ClassifiedEntities,
}

impl EntityClassifier {
    /// Create a classifier with the given keyword routing
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            counter: 0,
            out: ClassifiedEntities::default(),
        }
    }

    /// Classify one mention and register the produced entity
    ///
    /// Never fails: labels matching no known pattern fall back to the
    /// default category.
    pub fn classify(&mut self, mention: &EntityMention) {
        let word = strip_continuation(&mention.word);
        let label = normalize_label(&mention.label);
        let category = self.categorize(label, &word);

        let id = format!("{}_{}", category.id_prefix(), self.counter);
        self.counter += 1;

        let entity = Entity::new(id, category, &word)
            .with_attribute(Attribute::new(NER_TYPE_ATTR, &mention.label));

        self.out.register(word.to_lowercase(), entity);
    }

    /// Finish classification, yielding the registry for attribute binding
    pub fn finish(self) -> ClassifiedEntities {
        self.out
    }

    fn categorize(&self, label: &str, word: &str) -> EntityCategory {
        if ["loc", "gpe", "org"]
            .iter()
            .any(|known| label.eq_ignore_ascii_case(known))
        {
            EntityCategory::Environment
        } else if label.eq_ignore_ascii_case("per") {
            EntityCategory::Object
        } else if label.eq_ignore_ascii_case("misc") {
            let lower = word.to_lowercase();
            if self.keyword_hit(&lower, &self.config.vehicle_keywords) {
                EntityCategory::Vehicle
            } else if self.keyword_hit(&lower, &self.config.weather_keywords) {
                EntityCategory::Environment
            } else {
                EntityCategory::Entity
            }
        } else {
            EntityCategory::Entity
        }
    }

    fn keyword_hit(&self, lower_word: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| lower_word.contains(k.as_str()))
    }
}

/// Strip a begin/inside prefix from a recognizer label
fn normalize_label(label: &str) -> &str {
    label
        .strip_prefix("B-")
        .or_else(|| label.strip_prefix("I-"))
        .unwrap_or(label)
}

/// Remove sub-word continuation markers from a recognized word
fn strip_continuation(word: &str) -> String {
    word.replace("##", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn classify_all(mentions: &[(&str, &str)]) -> Vec<Entity> {
        let mut classifier = EntityClassifier::new(ClassifierConfig::default());
        for (word, label) in mentions {
            classifier.classify(&EntityMention::new(*word, *label));
        }
        classifier.finish().into_result().entities
    }

    #[test]
    fn test_location_labels_map_to_environment() {
        for label in ["LOC", "GPE", "ORG", "B-LOC", "I-ORG", "loc"] {
            let entities = classify_all(&[("seaport", label)]);
            assert_eq!(entities[0].category, EntityCategory::Environment, "{label}");
        }
    }

    #[test]
    fn test_person_label_maps_to_object() {
        let entities = classify_all(&[("pedestrian", "B-PER")]);
        assert_eq!(entities[0].category, EntityCategory::Object);
        assert_eq!(entities[0].id, "object_0");
    }

    #[test]
    fn test_misc_keyword_routing() {
        let entities = classify_all(&[
            ("truck", "MISC"),
            ("rain", "MISC"),
            ("cone", "MISC"),
        ]);

        assert_eq!(entities[0].category, EntityCategory::Vehicle);
        assert_eq!(entities[1].category, EntityCategory::Environment);
        assert_eq!(entities[2].category, EntityCategory::Entity);
    }

    #[test]
    fn test_vehicle_keywords_win_over_weather() {
        // "rainy truck" contains both; vehicle routing is checked first
        let entities = classify_all(&[("rainytruck", "MISC")]);
        assert_eq!(entities[0].category, EntityCategory::Vehicle);
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let entities = classify_all(&[("thing", "DATE"), ("other", "")]);
        assert_eq!(entities[0].category, EntityCategory::Entity);
        assert_eq!(entities[1].category, EntityCategory::Entity);
    }

    #[test]
    fn test_ids_increase_in_recognition_order() {
        let entities = classify_all(&[("car", "MISC"), ("building", "LOC"), ("x", "PER")]);
        assert_eq!(entities[0].id, "vehicle_0");
        assert_eq!(entities[1].id, "environment_1");
        assert_eq!(entities[2].id, "object_2");
    }

    #[test]
    fn test_ner_type_holds_raw_label() {
        let entities = classify_all(&[("building", "B-LOC")]);
        assert_eq!(
            entities[0].attribute(NER_TYPE_ATTR).map(|a| a.value.as_str()),
            Some("B-LOC")
        );
    }

    #[test]
    fn test_continuation_markers_stripped() {
        let entities = classify_all(&[("##lding", "I-LOC")]);
        assert_eq!(entities[0].text, "lding");
        assert_eq!(entities[0].category, EntityCategory::Environment);
    }

    #[test]
    fn test_duplicate_surface_text_overwrites_lookup() {
        let mut classifier = EntityClassifier::new(ClassifierConfig::default());
        classifier.classify(&EntityMention::new("Car", "MISC"));
        classifier.classify(&EntityMention::new("car", "PER"));
        let mut classified = classifier.finish();

        // Both entities exist, but the lookup now resolves to the later one
        let found = classified.get_mut_by_surface("CAR").unwrap();
        assert_eq!(found.id, "object_1");
        assert_eq!(classified.entities().len(), 2);
    }

    #[test]
    fn test_classifier_is_invocation_scoped() {
        let first = classify_all(&[("car", "MISC"), ("building", "LOC")]);
        let second = classify_all(&[("car", "MISC"), ("building", "LOC")]);
        assert_eq!(first, second);
    }

    proptest! {
        #[test]
        fn prop_ids_unique_and_sequential(
            mentions in proptest::collection::vec(("\\PC{0,12}", "\\PC{0,8}"), 0..24)
        ) {
            let mut classifier = EntityClassifier::new(ClassifierConfig::default());
            for (word, label) in &mentions {
                classifier.classify(&EntityMention::new(word.as_str(), label.as_str()));
            }
            let entities = classifier.finish().into_result().entities;

            prop_assert_eq!(entities.len(), mentions.len());
            for (n, entity) in entities.iter().enumerate() {
                let expected = format!("{}_{}", entity.category.id_prefix(), n);
                prop_assert_eq!(&entity.id, &expected);
            }
        }
    }
}
