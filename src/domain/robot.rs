// Robot state domain model and the flat feed record it is read from
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Directional distances in centimeters. Values are passed through unvalidated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RangeReadings {
    pub front: f64,
    pub right: f64,
    pub rear: f64,
    pub left: f64,
    pub laser: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotState {
    pub position: Point,
    /// Degrees.
    pub heading: f64,
    /// Percent, reported as-is.
    pub energy_level: f64,
    pub elapsed_seconds: f64,
    pub range_readings: RangeReadings,
    pub activity_state: String,
    pub occupancy_map: Vec<Point>,
    pub is_returning_to_base: bool,
}

impl Default for RobotState {
    fn default() -> Self {
        Self {
            position: Point::default(),
            heading: 0.0,
            energy_level: 100.0,
            elapsed_seconds: 0.0,
            range_readings: RangeReadings::default(),
            activity_state: "descansando".to_string(),
            occupancy_map: Vec::new(),
            is_returning_to_base: false,
        }
    }
}

/// A `robot_data` document exactly as the robot writes it. Extra fields such as
/// `timestamp` only matter to the feed's ordering and are ignored here.
///
/// Energy, time and distances accept any JSON number; missing readings are 0
/// and a missing `regresando` means the robot is not returning.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedRecord {
    pub pos_x: f64,
    pub pos_y: f64,
    pub angulo: f64,
    #[serde(default = "full_energy")]
    pub energia: f64,
    #[serde(default)]
    pub tiempo: f64,
    #[serde(default)]
    pub distancia_frontal: f64,
    #[serde(default)]
    pub distancia_derecha: f64,
    #[serde(default)]
    pub distancia_trasera: f64,
    #[serde(default)]
    pub distancia_izquierda: f64,
    #[serde(default)]
    pub distancia_laser: f64,
    pub estado: String,
    pub mapa: Vec<Point>,
    #[serde(default)]
    pub regresando: bool,
}

fn full_energy() -> f64 {
    100.0
}

impl From<FeedRecord> for RobotState {
    fn from(record: FeedRecord) -> Self {
        Self {
            position: Point::new(record.pos_x, record.pos_y),
            heading: record.angulo,
            energy_level: record.energia,
            elapsed_seconds: record.tiempo,
            range_readings: RangeReadings {
                front: record.distancia_frontal,
                right: record.distancia_derecha,
                rear: record.distancia_trasera,
                left: record.distancia_izquierda,
                laser: record.distancia_laser,
            },
            activity_state: record.estado,
            occupancy_map: record.mapa,
            is_returning_to_base: record.regresando,
        }
    }
}
