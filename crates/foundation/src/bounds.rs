use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;

/// Axis-aligned lon/lat extent in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// [lon, lat]
    pub min: [f64; 2],
    /// [lon, lat]
    pub max: [f64; 2],
}

impl GeoBounds {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        GeoBounds { min, max }
    }

    pub fn of_point(p: GeoPoint) -> Self {
        Self::new([p.lon_deg, p.lat_deg], [p.lon_deg, p.lat_deg])
    }

    /// Smallest extent covering every point; `None` for an empty iterator.
    pub fn enclosing(points: impl IntoIterator<Item = GeoPoint>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut out = Self::of_point(first);
        for p in iter {
            out.extend(p);
        }
        Some(out)
    }

    pub fn extend(&mut self, p: GeoPoint) {
        self.min[0] = self.min[0].min(p.lon_deg);
        self.min[1] = self.min[1].min(p.lat_deg);
        self.max[0] = self.max[0].max(p.lon_deg);
        self.max[1] = self.max[1].max(p.lat_deg);
    }
}

#[cfg(test)]
mod tests {
    use super::GeoBounds;
    use crate::geo::GeoPoint;

    #[test]
    fn enclosing_covers_all_points() {
        let pts = [
            GeoPoint::new(-6.1, 105.4),
            GeoPoint::new(-7.5, 110.4),
            GeoPoint::new(1.7, 125.1),
        ];
        let b = GeoBounds::enclosing(pts).unwrap();
        assert_eq!(b.min, [105.4, -7.5]);
        assert_eq!(b.max, [125.1, 1.7]);
        for p in pts {
            assert!((b.min[0]..=b.max[0]).contains(&p.lon_deg));
            assert!((b.min[1]..=b.max[1]).contains(&p.lat_deg));
        }
    }

    #[test]
    fn enclosing_empty_is_none() {
        assert!(GeoBounds::enclosing(std::iter::empty::<GeoPoint>()).is_none());
    }
}
