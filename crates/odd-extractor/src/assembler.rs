//! Record assembly
//!
//! Merges an extraction result with the baseline template into a
//! fully-populated ODD record.

use chrono::Utc;
use uuid::Uuid;

use odd_core::{
    Environment, ExtractionResult, OddRecord, OperationalConditions, TemplateConfig, VehicleState,
};

/// Assembles ODD records from a baseline template
#[derive(Debug, Clone, Default)]
pub struct RecordAssembler {
    template: TemplateConfig,
}

impl RecordAssembler {
    /// Create an assembler for the given template
    pub fn new(template: TemplateConfig) -> Self {
        Self { template }
    }

    /// Build the record for one extraction.
    ///
    /// The record identifier and timestamp are generated here; every
    /// structural field is populated from the template. Cannot fail.
    pub fn assemble(&self, _extraction: &ExtractionResult) -> OddRecord {
        OddRecord {
            odd_id: self
                .template
                .odd_id
                .clone()
                .unwrap_or_else(generate_odd_id),
            environment: Environment {
                illumination: self.template.illumination.clone(),
                // TODO: project classified entities into Objects once the
                // entity-to-scene mapping is settled
                objects: Vec::new(),
                scene_type: self.template.scene_type.clone(),
                weather: self.template.weather.clone(),
            },
            operational_conditions: OperationalConditions {
                road_type: self.template.road_type.clone(),
                route: self.template.route.clone(),
                speed_range: self.template.speed_range.clone(),
                traffic: self.template.traffic.clone(),
            },
            timestamp: Utc::now(),
            vehicle_state: VehicleState::default(),
        }
    }
}

/// Fresh record identifier: compact UTC timestamp plus a short hex suffix
fn generate_odd_id() -> String {
    let stamp = Utc::now().format("%Y%m%d%H%M%S");
    let uuid = Uuid::new_v4().simple().to_string();
    format!("{}_{}", stamp, &uuid[..6])
}
