// Chart-ready series derived from the robot state and the area bounds
use super::area::AreaBounds;
use super::robot::{Point, RobotState};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MapSeries {
    /// Occupancy samples in source order.
    pub room_map: Vec<Point>,
    /// Always exactly one point.
    pub robot_position: Vec<Point>,
    /// Closed 5-point loop, or empty while the bounds are not finite.
    pub area_boundary: Vec<Point>,
}

pub fn derive_map_series(state: &RobotState, bounds: &AreaBounds) -> MapSeries {
    let area_boundary = if bounds.is_finite() {
        bounds.corners().to_vec()
    } else {
        Vec::new()
    };

    MapSeries {
        room_map: state.occupancy_map.clone(),
        robot_position: vec![state.position],
        area_boundary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_map(map: Vec<Point>) -> RobotState {
        RobotState {
            position: Point::new(1.0, 2.0),
            occupancy_map: map,
            ..RobotState::default()
        }
    }

    #[test]
    fn test_series_follow_state() {
        let state = state_with_map(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        let series = derive_map_series(&state, &AreaBounds::unbounded());

        assert_eq!(series.room_map, vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert_eq!(series.robot_position, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn test_empty_map_yields_empty_series() {
        let series = derive_map_series(&state_with_map(Vec::new()), &AreaBounds::unbounded());
        assert!(series.room_map.is_empty());
        assert_eq!(series.robot_position.len(), 1);
    }

    #[test]
    fn test_boundary_suppressed_until_finite() {
        let state = state_with_map(Vec::new());
        assert!(derive_map_series(&state, &AreaBounds::unbounded()).area_boundary.is_empty());

        let partial = AreaBounds::new(-5.0, 5.0, f64::NEG_INFINITY, 5.0);
        assert!(derive_map_series(&state, &partial).area_boundary.is_empty());

        let series = derive_map_series(&state, &AreaBounds::new(-5.0, 5.0, -5.0, 5.0));
        assert_eq!(
            series.area_boundary,
            vec![
                Point::new(-5.0, -5.0),
                Point::new(5.0, -5.0),
                Point::new(5.0, 5.0),
                Point::new(-5.0, 5.0),
                Point::new(-5.0, -5.0),
            ]
        );
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let state = state_with_map(vec![Point::new(3.0, 4.0)]);
        let bounds = AreaBounds::new(0.0, 1.0, 0.0, 1.0);
        assert_eq!(derive_map_series(&state, &bounds), derive_map_series(&state, &bounds));
    }
}
