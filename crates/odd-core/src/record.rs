//! ODD record schema and serialization
//!
//! The fixed-shape record assembled from the baseline template. Struct
//! field order is the serialization order; the YAML output applies no
//! alphabetical reordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{OddError, Result};

/// A fully-populated ODD record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OddRecord {
    /// Record identifier, `{yyyyMMddHHmmss}_{6 hex chars}`
    #[serde(rename = "ODD_ID")]
    pub odd_id: String,

    /// Environment descriptors
    pub environment: Environment,

    /// Operational condition descriptors
    pub operational_conditions: OperationalConditions,

    /// Assembly time
    pub timestamp: DateTime<Utc>,

    /// Vehicle pose and sensor suite
    pub vehicle_state: VehicleState,
}

impl OddRecord {
    /// Render the record as a YAML document, keys in declaration order
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| OddError::Serialize(e.to_string()))
    }
}

/// Environment descriptors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Environment {
    /// Illumination descriptor
    pub illumination: String,

    /// Objects present in the scene
    pub objects: Vec<String>,

    /// Scene identifier
    pub scene_type: String,

    /// Weather descriptor
    pub weather: String,
}

/// Operational condition descriptors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OperationalConditions {
    /// Road type descriptor
    pub road_type: String,

    /// Route name
    pub route: String,

    /// Speed range descriptor
    pub speed_range: String,

    /// Traffic descriptor
    pub traffic: String,
}

/// Vehicle pose and sensor suite
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VehicleState {
    /// Pose quaternion
    pub orientation: Orientation,

    /// Ego position
    pub position: Position,

    /// Sensor suite with calibration
    pub sensors: Sensors,
}

/// Pose quaternion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub qw: f64,
    pub qx: f64,
    pub qy: f64,
    pub qz: f64,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            qw: 0.9999,
            qx: -0.01,
            qy: -0.001,
            qz: 0.0056,
        }
    }
}

/// Ego position in map coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            x: 1845.52,
            y: 867.91,
            z: 0.0,
        }
    }
}

/// The fixed camera/lidar/radar sensor suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensors {
    pub camera: Sensor,
    pub lidar: Sensor,
    pub radar: Sensor,
}

impl Default for Sensors {
    fn default() -> Self {
        Self {
            camera: Sensor::camera(),
            lidar: Sensor::lidar(),
            radar: Sensor::radar(),
        }
    }
}

/// A single calibrated sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Sensor {
    /// Sensor kind (camera, lidar, radar)
    pub sensor_type: String,

    /// Extrinsic/intrinsic calibration
    pub calibration_details: CalibrationDetails,
}

impl Sensor {
    /// Front camera with its intrinsic matrix
    pub fn camera() -> Self {
        Self {
            sensor_type: "camera".to_string(),
            calibration_details: CalibrationDetails {
                camera_intrinsic: vec![
                    [1257.86, 0.0, 827.24],
                    [0.0, 1257.86, 450.91],
                    [0.0, 0.0, 1.0],
                ],
                rotation: [0.68, -0.66, 0.21, -0.21],
                translation: [1.57, 0.50, 1.50],
            },
        }
    }

    /// Roof lidar
    pub fn lidar() -> Self {
        Self {
            sensor_type: "lidar".to_string(),
            calibration_details: CalibrationDetails {
                camera_intrinsic: Vec::new(),
                rotation: [0.70, -0.01, 0.01, -0.70],
                translation: [0.98, 0.0, 1.84],
            },
        }
    }

    /// Rear radar
    pub fn radar() -> Self {
        Self {
            sensor_type: "radar".to_string(),
            calibration_details: CalibrationDetails {
                camera_intrinsic: Vec::new(),
                rotation: [0.04, 0.0, 0.0, -0.99],
                translation: [-0.56, -0.61, 0.53],
            },
        }
    }
}

/// Sensor calibration block
///
/// `camera_intrinsic` is empty for sensors without an intrinsic matrix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationDetails {
    pub camera_intrinsic: Vec<[f64; 3]>,
    pub rotation: [f64; 4],
    pub translation: [f64; 3],
}
