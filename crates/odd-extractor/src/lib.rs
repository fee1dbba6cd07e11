//! ODD Extractor - Text-to-record extraction pipeline
//!
//! Implements entity classification, attribute binding, and record
//! assembly on top of injectable linguistic-analysis and entity-
//! recognition capabilities, plus rule-based implementations of both
//! capabilities so the pipeline runs without external models.

pub mod analysis;
pub mod assembler;
pub mod binder;
pub mod classifier;
pub mod ner;
pub mod pipeline;
pub mod units;

pub use analysis::{content_lemmas, LexiconAnalyzer};
pub use assembler::RecordAssembler;
pub use binder::bind_attributes;
pub use classifier::{ClassifiedEntities, EntityClassifier, NER_TYPE_ATTR};
pub use ner::GazetteerRecognizer;
pub use pipeline::{ExtractionReport, ExtractionStatus, OddExtractor};
pub use units::{parse_value_and_unit, NumericValue};
