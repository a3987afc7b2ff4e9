use std::collections::BTreeSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use foundation::GeoPoint;
use tracing::debug;

use crate::record::VolcanoRecord;

const COL_COUNTRY: &[&str] = &["Country"];
const COL_NAME: &[&str] = &["Volcano Name", "VolcanoName"];
const COL_TYPE: &[&str] = &["PrimaryVolcanoType", "Primary Volcano Type"];
const COL_LATITUDE: &[&str] = &["Latitude"];
const COL_LONGITUDE: &[&str] = &["Longitude"];
const COL_ELEVATION: &[&str] = &["Elevation", "Elevation (m)"];
const COL_LINK: &[&str] = &["Link"];

/// The dataset could not be loaded. Loading is all-or-nothing.
#[derive(Debug)]
pub enum DataUnavailable {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Csv(csv::Error),
    MissingColumn {
        column: &'static str,
    },
    /// `row` is the 1-based data row (header excluded).
    MalformedRow {
        row: usize,
        reason: String,
    },
}

impl std::fmt::Display for DataUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataUnavailable::Io { path, source } => {
                write!(f, "data unavailable: failed to read {}: {source}", path.display())
            }
            DataUnavailable::Csv(e) => write!(f, "data unavailable: csv error: {e}"),
            DataUnavailable::MissingColumn { column } => {
                write!(f, "data unavailable: missing required column {column:?}")
            }
            DataUnavailable::MalformedRow { row, reason } => {
                write!(f, "data unavailable: malformed row {row}: {reason}")
            }
        }
    }
}

impl std::error::Error for DataUnavailable {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataUnavailable::Io { source, .. } => Some(source),
            DataUnavailable::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for DataUnavailable {
    fn from(e: csv::Error) -> Self {
        DataUnavailable::Csv(e)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    pub delimiter: u8,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl LoadOptions {
    /// Tab for `.tsv`/`.tab` files, comma otherwise.
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("tsv") | Some("tab") => Self { delimiter: b'\t' },
            _ => Self::default(),
        }
    }
}

/// Immutable, sorted volcano table. Loaded once and shared read-only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<VolcanoRecord>,
    countries: Vec<String>,
}

impl Dataset {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataUnavailable> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| DataUnavailable::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes, LoadOptions::for_path(path))
    }

    pub fn from_reader(mut reader: impl Read, options: LoadOptions) -> Result<Self, DataUnavailable> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| DataUnavailable::Io {
                path: PathBuf::from("<reader>"),
                source,
            })?;
        Self::from_bytes(&bytes, options)
    }

    pub fn from_bytes(bytes: &[u8], options: LoadOptions) -> Result<Self, DataUnavailable> {
        let text = decode_text(bytes);
        let records = parse_records(&text, options)?;
        Ok(Self::from_records(records))
    }

    /// Takes ownership of already-validated records and sorts them.
    pub fn from_records(mut records: Vec<VolcanoRecord>) -> Self {
        records.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let mut countries: Vec<String> = Vec::new();
        for r in &records {
            if countries.last() != Some(&r.country) {
                countries.push(r.country.clone());
            }
        }
        Self { records, countries }
    }

    pub fn records(&self) -> &[VolcanoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct countries, sorted.
    pub fn countries(&self) -> &[String] {
        &self.countries
    }

    pub fn has_country(&self, country: &str) -> bool {
        self.countries
            .binary_search_by(|c| c.as_str().cmp(country))
            .is_ok()
    }

    /// `preferred` when the dataset has it, else the first country.
    pub fn default_country<'a>(&'a self, preferred: &str) -> Option<&'a str> {
        if let Ok(i) = self.countries.binary_search_by(|c| c.as_str().cmp(preferred)) {
            return Some(self.countries[i].as_str());
        }
        self.countries.first().map(String::as_str)
    }

    /// Contiguous run of records for `country`, already sorted by name.
    pub fn country_records(&self, country: &str) -> &[VolcanoRecord] {
        let start = self
            .records
            .partition_point(|r| r.country.as_str() < country);
        let end = self
            .records
            .partition_point(|r| r.country.as_str() <= country);
        &self.records[start..end]
    }

    pub fn volcano_names(&self, country: &str) -> Vec<&str> {
        self.country_records(country)
            .iter()
            .map(|r| r.name.as_str())
            .collect()
    }

    /// Distinct primary types across the whole dataset, sorted.
    pub fn types(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .records
            .iter()
            .map(|r| r.primary_type.as_str())
            .collect();
        set.into_iter().collect()
    }
}

/// UTF-8 when valid, otherwise Latin-1 (every byte maps to the same code point).
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.strip_prefix('\u{feff}').unwrap_or(s).to_string(),
        Err(_) => {
            debug!("dataset is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

struct Columns {
    country: usize,
    name: usize,
    primary_type: usize,
    latitude: usize,
    longitude: usize,
    elevation: Option<usize>,
    link: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DataUnavailable> {
        let find = |aliases: &[&str]| {
            headers
                .iter()
                .position(|h| aliases.iter().any(|a| h.trim() == *a))
        };
        let require = |aliases: &'static [&'static str]| {
            find(aliases).ok_or(DataUnavailable::MissingColumn { column: aliases[0] })
        };

        Ok(Self {
            country: require(COL_COUNTRY)?,
            name: require(COL_NAME)?,
            primary_type: require(COL_TYPE)?,
            latitude: require(COL_LATITUDE)?,
            longitude: require(COL_LONGITUDE)?,
            elevation: find(COL_ELEVATION),
            link: find(COL_LINK),
        })
    }
}

fn parse_records(text: &str, options: LoadOptions) -> Result<Vec<VolcanoRecord>, DataUnavailable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let cols = Columns::resolve(&headers)?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let raw = result?;
        let record = parse_row(&raw, &cols)
            .map_err(|reason| DataUnavailable::MalformedRow { row, reason })?;
        records.push(record);
    }
    Ok(records)
}

fn field<'r>(raw: &'r csv::StringRecord, idx: usize, label: &str) -> Result<&'r str, String> {
    raw.get(idx)
        .map(str::trim)
        .ok_or_else(|| format!("missing {label} field"))
}

fn non_empty<'r>(raw: &'r csv::StringRecord, idx: usize, label: &str) -> Result<&'r str, String> {
    let v = field(raw, idx, label)?;
    if v.is_empty() {
        return Err(format!("empty {label}"));
    }
    Ok(v)
}

fn number(raw: &csv::StringRecord, idx: usize, label: &str) -> Result<f64, String> {
    let v = non_empty(raw, idx, label)?;
    v.parse::<f64>()
        .map_err(|e| format!("{label} {v:?} is not a number: {e}"))
}

fn parse_row(raw: &csv::StringRecord, cols: &Columns) -> Result<VolcanoRecord, String> {
    let country = non_empty(raw, cols.country, "country")?;
    let name = non_empty(raw, cols.name, "volcano name")?;
    let primary_type = field(raw, cols.primary_type, "primary volcano type")?;
    let lat = number(raw, cols.latitude, "latitude")?;
    let lon = number(raw, cols.longitude, "longitude")?;
    let location = GeoPoint::checked(lat, lon)?;

    let mut record = VolcanoRecord::new(country, name, primary_type, location);

    if let Some(idx) = cols.elevation {
        let v = raw.get(idx).map(str::trim).unwrap_or("");
        if !v.is_empty() {
            let elevation = v
                .parse::<f64>()
                .map_err(|e| format!("elevation {v:?} is not a number: {e}"))?;
            if !elevation.is_finite() {
                return Err(format!("elevation {v:?} is not finite"));
            }
            record = record.with_elevation(elevation);
        }
    }
    if let Some(idx) = cols.link {
        let v = raw.get(idx).map(str::trim).unwrap_or("");
        if !v.is_empty() {
            record = record.with_link(v);
        }
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::{DataUnavailable, Dataset, LoadOptions};
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = "\
Country,Volcano Name,PrimaryVolcanoType,Elevation,Latitude,Longitude,Link
Japan,Fuji,Stratovolcano,3776,35.361,138.728,https://volcano.si.edu/volcano.cfm?vn=283030
Indonesia,Merapi,Stratovolcano,2910,-7.54,110.446,
Indonesia,Krakatau,Caldera,155,-6.102,105.423,https://volcano.si.edu/volcano.cfm?vn=262000
Japan,Aso,Caldera,1592,32.884,131.104,
Indonesia,Batur,Caldera,,-8.242,115.375,
";

    fn sample() -> Dataset {
        Dataset::from_bytes(SAMPLE.as_bytes(), LoadOptions::default()).expect("load sample")
    }

    #[test]
    fn sorts_by_country_then_name() {
        let ds = sample();
        let keys: Vec<(&str, &str)> = ds.records().iter().map(|r| r.sort_key()).collect();
        assert_eq!(
            keys,
            vec![
                ("Indonesia", "Batur"),
                ("Indonesia", "Krakatau"),
                ("Indonesia", "Merapi"),
                ("Japan", "Aso"),
                ("Japan", "Fuji"),
            ]
        );
        assert_eq!(ds.countries(), &["Indonesia".to_string(), "Japan".to_string()]);
    }

    #[test]
    fn optional_columns_become_none_when_blank() {
        let ds = sample();
        let batur = &ds.country_records("Indonesia")[0];
        assert_eq!(batur.name, "Batur");
        assert_eq!(batur.elevation_m, None);
        assert_eq!(batur.link, None);

        let krakatau = &ds.country_records("Indonesia")[1];
        assert_eq!(krakatau.elevation_m, Some(155.0));
        assert!(krakatau.link.as_deref().unwrap().ends_with("vn=262000"));
    }

    #[test]
    fn accepts_basic_header_spelling_without_optional_columns() {
        let payload = "Country,VolcanoName,PrimaryVolcanoType,Latitude,Longitude\nChile,Villarrica,Stratovolcano,-39.42,-71.93\n";
        let ds = Dataset::from_bytes(payload.as_bytes(), LoadOptions::default()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records()[0].elevation_m, None);
    }

    #[test]
    fn missing_required_column_fails() {
        let payload = "Country,Volcano Name,Latitude,Longitude\nJapan,Fuji,35.3,138.7\n";
        let err = Dataset::from_bytes(payload.as_bytes(), LoadOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            DataUnavailable::MissingColumn {
                column: "PrimaryVolcanoType"
            }
        ));
    }

    #[test]
    fn one_bad_row_fails_the_whole_load() {
        let payload = "\
Country,Volcano Name,PrimaryVolcanoType,Latitude,Longitude
Japan,Fuji,Stratovolcano,35.3,138.7
Japan,Aso,Caldera,north,131.1
";
        let err = Dataset::from_bytes(payload.as_bytes(), LoadOptions::default()).unwrap_err();
        match err {
            DataUnavailable::MalformedRow { row, .. } => assert_eq!(row, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn out_of_range_latitude_is_malformed() {
        let payload = "Country,Volcano Name,PrimaryVolcanoType,Latitude,Longitude\nX,Y,Cone,91.0,0\n";
        let err = Dataset::from_bytes(payload.as_bytes(), LoadOptions::default()).unwrap_err();
        assert!(matches!(err, DataUnavailable::MalformedRow { row: 1, .. }));
    }

    #[test]
    fn non_finite_elevation_is_malformed() {
        for bad in ["NaN", "inf", "-inf"] {
            let payload = format!(
                "Country,Volcano Name,PrimaryVolcanoType,Elevation,Latitude,Longitude\nJapan,Fuji,Stratovolcano,{bad},35.3,138.7\n"
            );
            let err = Dataset::from_bytes(payload.as_bytes(), LoadOptions::default()).unwrap_err();
            assert!(
                matches!(err, DataUnavailable::MalformedRow { row: 1, .. }),
                "{bad} loaded: {err}"
            );
        }
    }

    #[test]
    fn strips_utf8_bom_before_header() {
        let mut payload = vec![0xEF, 0xBB, 0xBF];
        payload.extend_from_slice(SAMPLE.as_bytes());
        let ds = Dataset::from_bytes(&payload, LoadOptions::default()).unwrap();
        assert_eq!(ds, sample());
        assert_eq!(ds.countries()[0], "Indonesia");
    }

    #[test]
    fn decodes_latin1_names() {
        // "Perú" and "Ubinas" encoded as ISO-8859-1.
        let mut payload =
            b"Country,Volcano Name,PrimaryVolcanoType,Latitude,Longitude\nPer".to_vec();
        payload.push(0xFA);
        payload.extend_from_slice(b",Ubinas,Stratovolcano,-16.355,-70.903\n");
        let ds = Dataset::from_bytes(&payload, LoadOptions::default()).unwrap();
        assert_eq!(ds.records()[0].country, "Perú");
    }

    #[test]
    fn default_country_prefers_requested_then_first() {
        let ds = sample();
        assert_eq!(ds.default_country("Japan"), Some("Japan"));
        assert_eq!(ds.default_country("Iceland"), Some("Indonesia"));
        assert_eq!(Dataset::default().default_country("Japan"), None);
    }

    #[test]
    fn types_are_distinct_and_sorted() {
        assert_eq!(sample().types(), vec!["Caldera", "Stratovolcano"]);
    }

    #[test]
    fn unknown_country_has_no_records() {
        let ds = sample();
        assert!(ds.country_records("Atlantis").is_empty());
        assert!(!ds.has_country("Atlantis"));
        assert_eq!(ds.volcano_names("Japan"), vec!["Aso", "Fuji"]);
    }

    #[test]
    fn loads_from_disk_and_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volcanoes.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        drop(f);

        let ds = Dataset::load(&path).expect("load from disk");
        assert_eq!(ds.len(), 5);

        let err = Dataset::load(dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, DataUnavailable::Io { .. }));
    }

    #[test]
    fn from_reader_matches_from_bytes() {
        let ds = Dataset::from_reader(SAMPLE.as_bytes(), LoadOptions::default()).unwrap();
        assert_eq!(ds, sample());
    }

    #[test]
    fn tsv_extension_switches_delimiter() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volcanoes.tsv");
        std::fs::write(
            &path,
            "Country\tVolcano Name\tPrimaryVolcanoType\tLatitude\tLongitude\nIceland\tHekla\tStratovolcano\t63.983\t-19.666\n",
        )
        .unwrap();
        let ds = Dataset::load(&path).unwrap();
        assert_eq!(ds.volcano_names("Iceland"), vec!["Hekla"]);
    }
}
