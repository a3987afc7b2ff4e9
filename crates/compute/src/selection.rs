use formats::{Dataset, VolcanoRecord};
use foundation::{GeoBounds, GeoPoint, centroid};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A named volcano was requested but the country has no such record.
    SelectionNotFound { country: String, name: String },
    /// The selection has no rows, so there is nothing to center or aggregate.
    EmptySelection { country: String },
}

impl std::fmt::Display for SelectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionError::SelectionNotFound { country, name } => {
                write!(f, "no volcano named {name:?} in {country:?}")
            }
            SelectionError::EmptySelection { country } => {
                write!(f, "no volcano records for {country:?}")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// Rows matching one user selection, borrowed from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    pub country: String,
    pub name: Option<String>,
    /// Sorted by (country, name).
    pub rows: Vec<&'a VolcanoRecord>,
    /// Country centroid, or the selected volcano's own position.
    pub center: Option<GeoPoint>,
    pub bounds: Option<GeoBounds>,
}

impl<'a> FilteredView<'a> {
    fn empty(country: &str) -> Self {
        Self {
            country: country.to_string(),
            name: None,
            rows: Vec::new(),
            center: None,
            bounds: None,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True when narrowed to a single named volcano.
    pub fn is_single(&self) -> bool {
        self.name.is_some()
    }

    pub fn require_center(&self) -> Result<GeoPoint, SelectionError> {
        self.center.ok_or_else(|| SelectionError::EmptySelection {
            country: self.country.clone(),
        })
    }
}

/// Narrows `dataset` to `country`, and to the volcano `name` when given.
///
/// An unknown country gives an empty view rather than an error; callers offer
/// countries drawn from the dataset itself.
pub fn filter<'a>(
    dataset: &'a Dataset,
    country: &str,
    name: Option<&str>,
) -> Result<FilteredView<'a>, SelectionError> {
    let in_country = dataset.country_records(country);
    if in_country.is_empty() {
        debug!(country, "selection matched no records");
        if let Some(name) = name {
            return Err(SelectionError::SelectionNotFound {
                country: country.to_string(),
                name: name.to_string(),
            });
        }
        return Ok(FilteredView::empty(country));
    }

    let Some(name) = name else {
        let rows: Vec<&VolcanoRecord> = in_country.iter().collect();
        let center = centroid(rows.iter().map(|r| r.location));
        let bounds = GeoBounds::enclosing(rows.iter().map(|r| r.location));
        return Ok(FilteredView {
            country: country.to_string(),
            name: None,
            rows,
            center,
            bounds,
        });
    };

    let record = in_country
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| SelectionError::SelectionNotFound {
            country: country.to_string(),
            name: name.to_string(),
        })?;

    Ok(FilteredView {
        country: country.to_string(),
        name: Some(record.name.clone()),
        rows: vec![record],
        center: Some(record.location),
        bounds: Some(GeoBounds::of_point(record.location)),
    })
}

#[cfg(test)]
mod tests {
    use super::{SelectionError, filter};
    use formats::{Dataset, VolcanoRecord};
    use foundation::GeoPoint;
    use pretty_assertions::assert_eq;

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            VolcanoRecord::new("Japan", "Fuji", "Stratovolcano", GeoPoint::new(35.0, 138.0)),
            VolcanoRecord::new("Indonesia", "Merapi", "Stratovolcano", GeoPoint::new(-8.0, 110.0)),
            VolcanoRecord::new("Indonesia", "Krakatau", "Caldera", GeoPoint::new(-6.0, 105.0)),
            VolcanoRecord::new("Japan", "Aso", "Caldera", GeoPoint::new(33.0, 131.0)),
            VolcanoRecord::new("Indonesia", "Batur", "Caldera", GeoPoint::new(-7.0, 115.0)),
        ])
    }

    #[test]
    fn country_view_contains_exactly_that_country_sorted() {
        let ds = dataset();
        for country in ds.countries() {
            let view = filter(&ds, country, None).unwrap();
            assert!(view.rows.iter().all(|r| &r.country == country));
            let expected = ds.records().iter().filter(|r| &r.country == country).count();
            assert_eq!(view.len(), expected);
            let names: Vec<&str> = view.rows.iter().map(|r| r.name.as_str()).collect();
            let mut sorted = names.clone();
            sorted.sort();
            assert_eq!(names, sorted);
        }
    }

    #[test]
    fn japan_rows_only() {
        let ds = dataset();
        let view = filter(&ds, "Japan", None).unwrap();
        let names: Vec<&str> = view.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Aso", "Fuji"]);
        assert!(!view.is_single());
    }

    #[test]
    fn country_center_is_mean() {
        let ds = dataset();
        let view = filter(&ds, "Indonesia", None).unwrap();
        let c = view.require_center().unwrap();
        assert!((c.lat_deg - -7.0).abs() < 1e-9);
        assert!((c.lon_deg - 110.0).abs() < 1e-9);
        let b = view.bounds.unwrap();
        assert_eq!(b.min, [105.0, -8.0]);
        assert_eq!(b.max, [115.0, -6.0]);
    }

    #[test]
    fn named_volcano_centers_on_itself() {
        let ds = dataset();
        let view = filter(&ds, "Indonesia", Some("Krakatau")).unwrap();
        assert_eq!(view.len(), 1);
        assert!(view.is_single());
        assert_eq!(view.center, Some(view.rows[0].location));
        assert_eq!(view.center, Some(GeoPoint::new(-6.0, 105.0)));
    }

    #[test]
    fn unknown_country_is_empty_not_error() {
        let ds = dataset();
        let view = filter(&ds, "Atlantis", None).unwrap();
        assert!(view.is_empty());
        assert_eq!(view.center, None);
        assert_eq!(
            view.require_center(),
            Err(SelectionError::EmptySelection {
                country: "Atlantis".to_string()
            })
        );
    }

    #[test]
    fn wrong_name_is_selection_not_found() {
        let ds = dataset();
        let err = filter(&ds, "Japan", Some("Krakatau")).unwrap_err();
        assert_eq!(
            err,
            SelectionError::SelectionNotFound {
                country: "Japan".to_string(),
                name: "Krakatau".to_string()
            }
        );
    }

    #[test]
    fn name_match_is_case_sensitive() {
        let ds = dataset();
        assert!(filter(&ds, "Japan", Some("fuji")).is_err());
    }
}
