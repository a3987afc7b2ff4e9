use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use compute::{DEFAULT_COUNTRY, DashboardQuery, DashboardSettings, build_dashboard, filter};
use formats::Dataset;
use layers::zoom::ZoomControl;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Explore a volcano dataset from the command line")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List distinct countries and the default selection
    Countries {
        /// Volcano table (CSV, or TSV by extension)
        data: PathBuf,
    },

    /// List volcano names for one country
    Volcanoes {
        data: PathBuf,
        #[arg(long)]
        country: String,
    },

    /// Print the dashboard JSON for a selection
    Dashboard {
        data: PathBuf,
        /// Defaults to Indonesia, or the first country if it is absent
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        volcano: Option<String>,
        #[arg(long)]
        zoom: Option<u8>,
        /// Seed for reproducible fact picks
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = compute::DEFAULT_FACT_COUNT)]
        facts: usize,
    },

    /// Export the selection as a GeoJSON FeatureCollection
    Export {
        data: PathBuf,
        #[arg(long)]
        country: String,
        #[arg(long)]
        volcano: Option<String>,
        /// Write here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Debug, Serialize)]
struct CountryListing<'a> {
    countries: &'a [String],
    default_country: Option<&'a str>,
    types: Vec<&'a str>,
    records: usize,
}

fn main() {
    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let args = Args::parse();
    let out = run(args.command)?;
    println!("{out}");
    Ok(())
}

fn load(path: &Path) -> Result<Dataset, String> {
    Dataset::load(path).map_err(|e| e.to_string())
}

fn run(command: Command) -> Result<String, String> {
    match command {
        Command::Countries { data } => {
            let dataset = load(&data)?;
            let listing = CountryListing {
                countries: dataset.countries(),
                default_country: dataset.default_country(DEFAULT_COUNTRY),
                types: dataset.types(),
                records: dataset.len(),
            };
            serde_json::to_string_pretty(&listing).map_err(|e| format!("json: {e}"))
        }
        Command::Volcanoes { data, country } => {
            let dataset = load(&data)?;
            if !dataset.has_country(&country) {
                return Err(format!("unknown country: {country}"));
            }
            Ok(dataset.volcano_names(&country).join("\n"))
        }
        Command::Dashboard {
            data,
            country,
            volcano,
            zoom,
            seed,
            facts,
        } => {
            let dataset = load(&data)?;
            let country = match country {
                Some(c) => c,
                None => dataset
                    .default_country(DEFAULT_COUNTRY)
                    .ok_or("dataset has no countries")?
                    .to_string(),
            };
            let query = DashboardQuery {
                country,
                volcano,
                zoom,
            };
            let settings = DashboardSettings {
                zoom: ZoomControl::default(),
                fact_count: facts,
                ..DashboardSettings::default()
            };
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_entropy(),
            };
            let view =
                build_dashboard(&dataset, &query, &settings, &mut rng).map_err(|e| e.to_string())?;
            serde_json::to_string_pretty(&view).map_err(|e| format!("json: {e}"))
        }
        Command::Export {
            data,
            country,
            volcano,
            out,
        } => {
            let dataset = load(&data)?;
            let view = filter(&dataset, &country, volcano.as_deref()).map_err(|e| e.to_string())?;
            let payload = formats::records_to_geojson_string_pretty(view.rows.iter().copied())
                .map_err(|e| format!("json: {e}"))?;
            match out {
                Some(path) => {
                    fs::write(&path, &payload).map_err(|e| format!("write {path:?}: {e}"))?;
                    eprintln!("wrote {} ({} features)", path.display(), view.len());
                    Ok(String::new())
                }
                None => Ok(payload),
            }
        }
    }
}
