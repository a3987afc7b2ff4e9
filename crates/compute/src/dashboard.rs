use formats::{Dataset, VolcanoRecord};
use foundation::{GeoBounds, GeoPoint};
use layers::chart::PieChart;
use layers::deck::{DeckSnapshot, ViewState};
use layers::scatter::ScatterplotLayer;
use layers::tooltip::TooltipMode;
use layers::zoom::{COUNTRY_RADIUS_M, RadiusPolicy, ZoomControl};
use serde::Serialize;
use tracing::debug;

use crate::analysis::{ElevationSummary, aggregate};
use crate::facts::{DEFAULT_FACT_COUNT, FactLookup, pick_facts};
use crate::random::RandomSource;
use crate::selection::{FilteredView, SelectionError, filter};

pub const DASHBOARD_TITLE: &str = "Volcanoes";
pub const DEFAULT_IMAGE_CAPTION: &str = "Anak Krakatau volcano, Sunda Strait, Indonesia";
pub const DEFAULT_COUNTRY: &str = "Indonesia";

const VOLCANO_LAYER_ID: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardQuery {
    pub country: String,
    pub volcano: Option<String>,
    pub zoom: Option<u8>,
}

impl DashboardQuery {
    pub fn country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Default::default()
        }
    }

    pub fn with_volcano(mut self, volcano: impl Into<String>) -> Self {
        self.volcano = Some(volcano.into());
        self
    }

    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = Some(zoom);
        self
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub zoom: ZoomControl,
    pub fact_count: usize,
    pub image_caption: String,
    pub facts: FactLookup,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            zoom: ZoomControl::default(),
            fact_count: DEFAULT_FACT_COUNT,
            image_caption: DEFAULT_IMAGE_CAPTION.to_string(),
            facts: FactLookup::builtin().clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Headings {
    pub data: String,
    pub mapping: String,
    pub types: String,
    pub facts: String,
}

impl Headings {
    fn for_place(place: &str) -> Self {
        Self {
            data: format!("Volcano Eruption Data for {place}"),
            mapping: format!("Volcano Eruption Mapping in {place}"),
            types: format!("Volcano Types By Percentage in {place}"),
            facts: "Volcano Fun Facts".to_string(),
        }
    }
}

/// Everything one dashboard render needs, computed from scratch per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: &'static str,
    pub image_caption: String,
    pub country: String,
    pub volcano: Option<String>,
    pub zoom: u8,
    pub zoom_control: ZoomControl,
    pub headings: Headings,
    pub rows: Vec<VolcanoRecord>,
    pub center: Option<GeoPoint>,
    pub bounds: Option<GeoBounds>,
    pub deck: Option<DeckSnapshot>,
    pub chart: Option<PieChart>,
    pub facts: Vec<String>,
    pub link: Option<String>,
    pub elevation: Option<ElevationSummary>,
    pub notice: Option<String>,
}

/// Filter, aggregate, pick facts and lay out the map for one selection.
///
/// An empty selection is not an error: map, chart and facts are left out and
/// `notice` says why. A named volcano that does not exist is.
pub fn build_dashboard<R: RandomSource + ?Sized>(
    dataset: &Dataset,
    query: &DashboardQuery,
    settings: &DashboardSettings,
    rng: &mut R,
) -> Result<DashboardView, SelectionError> {
    let view = filter(dataset, &query.country, query.volcano.as_deref())?;
    let zoom = settings.zoom.resolve(query.zoom);

    let place = match &view.name {
        Some(name) => format!("{name}, {}", view.country),
        None => view.country.clone(),
    };

    let mut out = DashboardView {
        title: DASHBOARD_TITLE,
        image_caption: settings.image_caption.clone(),
        country: view.country.clone(),
        volcano: view.name.clone(),
        zoom,
        zoom_control: settings.zoom,
        headings: Headings::for_place(&place),
        rows: view.rows.iter().map(|r| (*r).clone()).collect(),
        center: view.center,
        bounds: view.bounds,
        deck: None,
        chart: None,
        facts: Vec::new(),
        link: None,
        elevation: ElevationSummary::of(view.rows.iter().copied()),
        notice: None,
    };

    let center = match view.require_center() {
        Ok(c) => c,
        Err(e) => {
            debug!("skipping map, chart and facts: {e}");
            out.notice = Some(e.to_string());
            return Ok(out);
        }
    };

    out.deck = Some(build_deck(&view, center, zoom));

    let distribution = aggregate(view.rows.iter().copied());
    let shares = distribution.proportions();
    out.chart = Some(PieChart::from_slices(
        out.headings.types.clone(),
        distribution
            .iter()
            .zip(shares)
            .map(|((label, count), (_, percent))| (label, count, percent)),
    ));

    let types = distribution.types();
    out.facts = pick_facts(types.as_slice(), settings.fact_count, &settings.facts, rng)
        .iter()
        .filter_map(|p| p.statement())
        .collect();

    if view.is_single() {
        out.link = view.rows.first().and_then(|r| r.link.clone());
    }

    Ok(out)
}

/// Country-wide maps use a fixed marker radius and coordinate tooltips; a
/// single volcano gets a zoom-scaled radius and its elevation.
fn build_deck(view: &FilteredView<'_>, center: GeoPoint, zoom: u8) -> DeckSnapshot {
    let (radius, tooltip) = if view.is_single() {
        (RadiusPolicy::ByZoom, TooltipMode::Elevation)
    } else {
        (
            RadiusPolicy::Fixed {
                radius_m: COUNTRY_RADIUS_M,
            },
            TooltipMode::Coordinates,
        )
    };
    let layer = ScatterplotLayer::new(VOLCANO_LAYER_ID, tooltip);
    let snapshot = layer.extract(view.rows.iter().copied(), radius.resolve(zoom));
    DeckSnapshot::new(ViewState::centered(center, zoom), vec![snapshot])
}
