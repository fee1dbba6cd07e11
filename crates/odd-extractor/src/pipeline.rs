//! Extraction pipeline
//!
//! Wires the injected capabilities through classification, binding, and
//! assembly. All mutable state (identifier counter, surface lookup,
//! partial record) is local to one `extract` call; the extractor itself
//! can be shared freely.

use std::sync::Arc;

use tracing::{debug, info};

use odd_core::{
    EntityRecognizer, ExtractionResult, ExtractorConfig, LinguisticAnalyzer, OddRecord, Result,
};

use crate::analysis::content_lemmas;
use crate::assembler::RecordAssembler;
use crate::binder::bind_attributes;
use crate::classifier::EntityClassifier;

/// Outcome status for one text submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStatus {
    /// Extraction ran to completion
    Completed,
    /// Input was empty or whitespace-only; nothing was extracted
    EmptyInput,
}

/// Result of one extraction call
#[derive(Debug, Clone)]
pub struct ExtractionReport {
    /// Whether extraction ran or was skipped
    pub status: ExtractionStatus,

    /// Extracted entities in recognition order
    pub result: ExtractionResult,

    /// The assembled record
    pub record: OddRecord,
}

/// The text-to-record extraction pipeline
pub struct OddExtractor {
    analyzer: Arc<dyn LinguisticAnalyzer>,
    recognizer: Arc<dyn EntityRecognizer>,
    config: ExtractorConfig,
}

impl OddExtractor {
    /// Create a pipeline with default configuration
    pub fn new(
        analyzer: Arc<dyn LinguisticAnalyzer>,
        recognizer: Arc<dyn EntityRecognizer>,
    ) -> Self {
        Self::with_config(analyzer, recognizer, ExtractorConfig::default())
    }

    /// Create a pipeline with explicit configuration
    pub fn with_config(
        analyzer: Arc<dyn LinguisticAnalyzer>,
        recognizer: Arc<dyn EntityRecognizer>,
        config: ExtractorConfig,
    ) -> Self {
        Self {
            analyzer,
            recognizer,
            config,
        }
    }

    /// Run one extraction start to finish.
    ///
    /// Empty or whitespace-only input is a no-op, not an error: no
    /// capability is called and the baseline record is still returned.
    /// Capability failures abort the invocation.
    pub fn extract(&self, text: &str) -> Result<ExtractionReport> {
        let assembler = RecordAssembler::new(self.config.template.clone());

        if text.trim().is_empty() {
            info!("empty input, skipping extraction");
            let result = ExtractionResult::default();
            let record = assembler.assemble(&result);
            return Ok(ExtractionReport {
                status: ExtractionStatus::EmptyInput,
                result,
                record,
            });
        }

        let mentions = self.recognizer.recognize(text)?;
        debug!(
            recognizer = self.recognizer.name(),
            mentions = mentions.len(),
            "recognition done"
        );

        let mut classifier = EntityClassifier::new(self.config.classifier.clone());
        for mention in &mentions {
            classifier.classify(mention);
        }
        let mut classified = classifier.finish();

        let tokens = self.analyzer.analyze(text)?;
        debug!(
            analyzer = self.analyzer.name(),
            tokens = tokens.len(),
            lemmas = ?content_lemmas(&tokens),
            "analysis done"
        );

        bind_attributes(&tokens, &mut classified);

        let result = classified.into_result();
        info!(entities = result.entities.len(), "extraction complete");

        let record = assembler.assemble(&result);
        Ok(ExtractionReport {
            status: ExtractionStatus::Completed,
            result,
            record,
        })
    }
}
