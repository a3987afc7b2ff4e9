use formats::VolcanoRecord;
use serde::Serialize;

pub struct Statistics;

impl Statistics {
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let mut sum = 0.0;
        for &v in values {
            sum += v;
        }
        Some(sum / values.len() as f64)
    }

    pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
        let first = *values.first()?;
        let mut min = first;
        let mut max = first;
        for &v in values.iter().skip(1) {
            min = min.min(v);
            max = max.max(v);
        }
        Some((min, max))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct ElevationSummary {
    /// Rows that carried an elevation.
    pub count: usize,
    pub mean_m: f64,
    pub min_m: f64,
    pub max_m: f64,
}

impl ElevationSummary {
    pub fn of<'a>(rows: impl IntoIterator<Item = &'a VolcanoRecord>) -> Option<Self> {
        let values: Vec<f64> = rows.into_iter().filter_map(|r| r.elevation_m).collect();
        let mean_m = Statistics::mean(&values)?;
        let (min_m, max_m) = Statistics::min_max(&values)?;
        Some(Self {
            count: values.len(),
            mean_m,
            min_m,
            max_m,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ElevationSummary, Statistics};
    use formats::VolcanoRecord;
    use foundation::GeoPoint;

    #[test]
    fn mean_works() {
        let m = Statistics::mean(&[1.0, 2.0, 3.0]).unwrap();
        assert!((m - 2.0).abs() < 1e-9);
    }

    #[test]
    fn elevation_summary_skips_missing_values() {
        let at = GeoPoint::new(0.0, 0.0);
        let rows = vec![
            VolcanoRecord::new("X", "A", "Cone", at).with_elevation(1000.0),
            VolcanoRecord::new("X", "B", "Cone", at),
            VolcanoRecord::new("X", "C", "Cone", at).with_elevation(3000.0),
        ];
        let s = ElevationSummary::of(&rows).unwrap();
        assert_eq!(s.count, 2);
        assert!((s.mean_m - 2000.0).abs() < 1e-9);
        assert_eq!((s.min_m, s.max_m), (1000.0, 3000.0));
    }

    #[test]
    fn elevation_summary_none_without_values() {
        let rows = vec![VolcanoRecord::new("X", "A", "Cone", GeoPoint::new(0.0, 0.0))];
        assert!(ElevationSummary::of(&rows).is_none());
    }
}
