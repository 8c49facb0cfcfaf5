// Area bounds returned by the delimit-area command
use super::robot::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl AreaBounds {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// The session value before any area has been delimited.
    pub fn unbounded() -> Self {
        Self::new(
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.x_min, self.x_max, self.y_min, self.y_max]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Closed loop over the four corners, first corner repeated.
    pub fn corners(&self) -> [Point; 5] {
        [
            Point::new(self.x_min, self.y_min),
            Point::new(self.x_max, self.y_min),
            Point::new(self.x_max, self.y_max),
            Point::new(self.x_min, self.y_max),
            Point::new(self.x_min, self.y_min),
        ]
    }

    /// Parse the body of a `detener` response.
    pub fn from_response_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }
}

impl Default for AreaBounds {
    fn default() -> Self {
        Self::unbounded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let bounds = AreaBounds::default();
        assert_eq!(bounds.x_min, f64::NEG_INFINITY);
        assert_eq!(bounds.x_max, f64::INFINITY);
        assert!(!bounds.is_finite());
    }

    #[test]
    fn test_corners_close_the_loop() {
        let corners = AreaBounds::new(-5.0, 5.0, -2.0, 3.0).corners();
        assert_eq!(corners[0], Point::new(-5.0, -2.0));
        assert_eq!(corners[1], Point::new(5.0, -2.0));
        assert_eq!(corners[2], Point::new(5.0, 3.0));
        assert_eq!(corners[3], Point::new(-5.0, 3.0));
        assert_eq!(corners[4], corners[0]);
    }

    #[test]
    fn test_parse_response_body() {
        let bounds =
            AreaBounds::from_response_body(br#"{"xMin":-5,"xMax":5,"yMin":-5,"yMax":5}"#).unwrap();
        assert_eq!(bounds, AreaBounds::new(-5.0, 5.0, -5.0, 5.0));
        assert!(bounds.is_finite());
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        assert!(AreaBounds::from_response_body(b"{}").is_err());
        assert!(AreaBounds::from_response_body(br#"{"xMin":1,"xMax":2,"yMin":3}"#).is_err());
        assert!(AreaBounds::from_response_body(b"not json").is_err());
        assert!(AreaBounds::from_response_body(b"").is_err());
    }
}
