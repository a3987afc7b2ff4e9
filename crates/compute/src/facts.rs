//! Educational one-liners about volcano types.
//!
//! The lookup is a plain keyed table: adding a type is a data change. Facts are
//! picked at random from the types present in a selection, never repeating the
//! immediately preceding pick.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::random::{RandomSource, draw_distinct_from_previous};

/// Number of facts shown per selection.
pub const DEFAULT_FACT_COUNT: usize = 2;

const CALDERA: &str = "is a large depression formed when a volcano erupts and collapses. They vary in size from one to 100 kilometers (0.62 to 62 miles) in diameter.";
const COMPLEX: &str = "is a mixed landform consisting of related volcanic centers and their associated lava flows and pyroclastic rock.";
const CONE: &str = "is a conical volcano with a low, steep profile, formed mostly by the cinders or scoria that fall from lava that has violently spewed into the air and broken into fragments.";
const CRATER_ROWS: &str = "are fountains along the fissure that produce small spatter and cinder cones. The fragments that form a spatter cone are hot and plastic enough to weld together, while the fragments that form a cinder cone remain separate because of their lower temperature.";
const FISSURE_VENT: &str = "are a type of volcano in which lava erupts through a linear volcanic vent. Usually these eruptions do not involve an explosion. Fissure vents are usually only several meters wide but can range in length up to many kilometers.";
const LAVA_CONE: &str = "is a type of volcano composed primarily of viscous lava flows.";
const LAVA_DOME: &str = "is a circular mound-shaped protrusion resulting from the slow extrusion of viscous lava from a volcano.";
const MAAR: &str = "is a small volcanic cone of low relief that surrounds a shallow crater. These craters are formed by explosions caused by hot magma coming in contact with cold groundwater.";
const SHIELD: &str = "is a wide volcano with shallowly-sloping sides. Many of the largest volcanoes on Earth are shield volcanoes.";
const SUBGLACIAL: &str = "is a volcanic form produced by subglacial eruptions or eruptions beneath the surface of a glacier or ice sheet which is then melted into a lake by the rising lava.";
const SUBMARINE: &str = "are underwater vents or fissures in the Earth's surface from which magma can erupt. Many submarine volcanoes are located near areas of tectonic plate formation, known as mid-ocean ridges.";
const VOLCANIC_FIELD: &str = "is an area of the Earth's crust that is prone to localized volcanic activity. They usually consist of clusters of up to 100 volcanoes such as cinder cones.";

const BUILTIN_FACTS: &[(&str, &str)] = &[
    ("Caldera", CALDERA),
    ("Explosion crater", CALDERA),
    ("Complex", COMPLEX),
    ("Compound", COMPLEX),
    ("Stratovolcano", COMPLEX),
    ("Cone", CONE),
    ("Tuff cone", CONE),
    ("Pyroclastic cone", CONE),
    ("Lava cone", LAVA_CONE),
    ("Crater rows", CRATER_ROWS),
    ("Fissure vent", FISSURE_VENT),
    ("Lava dome", LAVA_DOME),
    ("Maar", MAAR),
    ("Tuff ring", MAAR),
    ("Shield", SHIELD),
    ("Pyroclastic shield", SHIELD),
    ("Subglacial", SUBGLACIAL),
    ("Submarine", SUBMARINE),
    ("Volcanic field", VOLCANIC_FIELD),
];

static BUILTIN: Lazy<FactLookup> = Lazy::new(|| FactLookup::from_entries(BUILTIN_FACTS.iter().copied()));

/// Read-only table: volcano type -> descriptive text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactLookup {
    entries: BTreeMap<String, String>,
}

impl FactLookup {
    /// The process-wide table of curated volcano type facts.
    pub fn builtin() -> &'static FactLookup {
        &BUILTIN
    }

    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, primary_type: &str) -> Option<&str> {
        self.entries.get(primary_type).map(String::as_str)
    }
}

/// One random draw: the type picked and its fact, if the table knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FactPick {
    pub index: usize,
    pub primary_type: String,
    pub fact: Option<String>,
}

impl FactPick {
    /// Display sentence, e.g. "Maar is a small volcanic cone ...".
    pub fn statement(&self) -> Option<String> {
        self.fact
            .as_ref()
            .map(|fact| format!("{} {fact}", self.primary_type))
    }
}

/// Picks `count` types at random and resolves each through `lookup`.
///
/// - no types: nothing.
/// - one type: exactly one pick of index 0, whatever `count` is, and no
///   entropy is consumed.
/// - otherwise `count` uniform draws, each redrawn only while it equals the
///   draw right before it.
///
/// Types missing from `lookup` still produce a pick, with `fact: None`.
pub fn pick_facts<S, R>(
    types: &[S],
    count: usize,
    lookup: &FactLookup,
    rng: &mut R,
) -> Vec<FactPick>
where
    S: AsRef<str>,
    R: RandomSource + ?Sized,
{
    let resolve = |index: usize| {
        let primary_type = types[index].as_ref();
        FactPick {
            index,
            primary_type: primary_type.to_string(),
            fact: lookup.get(primary_type).map(str::to_string),
        }
    };

    if types.is_empty() || count == 0 {
        return Vec::new();
    }
    if types.len() == 1 {
        return vec![resolve(0)];
    }

    let mut out = Vec::with_capacity(count);
    let mut previous = None;
    for _ in 0..count {
        let index = draw_distinct_from_previous(rng, types.len(), previous);
        previous = Some(index);
        out.push(resolve(index));
    }
    out
}
