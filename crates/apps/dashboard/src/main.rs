use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use compute::{DashboardSettings, DEFAULT_COUNTRY, DEFAULT_FACT_COUNT, DEFAULT_IMAGE_CAPTION};
use formats::Dataset;
use layers::zoom::ZoomControl;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod assets;

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<Dataset>,
    config: Arc<DashboardConfig>,
}

#[derive(Clone, Debug)]
pub struct DashboardConfig {
    addr: SocketAddr,
    data_path: PathBuf,
    image_path: PathBuf,
    default_country: String,
    settings: DashboardSettings,
}

impl DashboardConfig {
    fn from_env() -> Result<Self, String> {
        let addr_raw = env::var("DASHBOARD_ADDR").unwrap_or_else(|_| "127.0.0.1:8501".to_string());
        let addr: SocketAddr = addr_raw
            .parse()
            .map_err(|e| format!("invalid DASHBOARD_ADDR {addr_raw:?}: {e}"))?;

        let zoom = ZoomControl::new(env_var_u8("ZOOM_MIN", 3), env_var_u8("ZOOM_MAX", 8));
        let settings = DashboardSettings {
            zoom,
            fact_count: env_var_usize("FACT_COUNT", DEFAULT_FACT_COUNT),
            image_caption: env::var("VOLCANO_IMAGE_CAPTION")
                .unwrap_or_else(|_| DEFAULT_IMAGE_CAPTION.to_string()),
            ..DashboardSettings::default()
        };

        Ok(Self {
            addr,
            data_path: env::var("VOLCANO_DATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("volcanoes.csv")),
            image_path: env::var("VOLCANO_IMAGE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("volcanoes.jpg")),
            default_country: env::var("DEFAULT_COUNTRY")
                .unwrap_or_else(|_| DEFAULT_COUNTRY.to_string()),
            settings,
        })
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        error!("dashboard server failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = DashboardConfig::from_env()?;

    // Fatal: there is no dashboard without data.
    let dataset = Dataset::load(&config.data_path).map_err(|e| e.to_string())?;
    info!(
        records = dataset.len(),
        countries = dataset.countries().len(),
        "loaded volcano dataset from {}",
        config.data_path.display()
    );

    let addr = config.addr;
    let state = AppState {
        dataset: Arc::new(dataset),
        config: Arc::new(config),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind {addr}: {e}"))?;
    info!("dashboard server listening on http://{addr}");
    axum::serve(listener, app)
        .await
        .map_err(|e| format!("serve: {e}"))
}

fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers(Any)
        .allow_methods([Method::GET, Method::OPTIONS]);

    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/countries", get(api::get_countries))
        .route("/api/countries/:country/volcanoes", get(api::get_volcanoes))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/export.geojson", get(api::get_export))
        .route("/assets/hero", get(assets::get_hero_image))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> Response {
    (StatusCode::OK, "ok").into_response()
}

fn env_var_u8(key: &str, default: u8) -> u8 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_var_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{router, AppState, DashboardConfig};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use compute::DashboardSettings;
    use formats::{Dataset, LoadOptions};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tower::ServiceExt;

    const SAMPLE: &str = "\
Country,Volcano Name,PrimaryVolcanoType,Elevation,Latitude,Longitude,Link
Japan,Fuji,Stratovolcano,3776,35.361,138.728,
Indonesia,Merapi,Stratovolcano,2910,-7.54,110.446,
Indonesia,Krakatau,Caldera,155,-6.102,105.423,https://volcano.si.edu/volcano.cfm?vn=262000
Perú,Ubinas,Stratovolcano,5672,-16.355,-70.903,
";

    pub(crate) fn test_state(image_path: PathBuf) -> AppState {
        let dataset = Dataset::from_bytes(SAMPLE.as_bytes(), LoadOptions::default()).unwrap();
        AppState {
            dataset: Arc::new(dataset),
            config: Arc::new(DashboardConfig {
                addr: "127.0.0.1:0".parse().unwrap(),
                data_path: PathBuf::from("volcanoes.csv"),
                image_path,
                default_country: "Indonesia".to_string(),
                settings: DashboardSettings::default(),
            }),
        }
    }

    pub(crate) async fn get_json(state: AppState, uri: &str) -> (StatusCode, serde_json::Value) {
        let resp = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let app = router(test_state(PathBuf::from("missing.jpg")));
        let resp = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn countries_include_default() {
        let (status, v) = get_json(test_state(PathBuf::from("missing.jpg")), "/api/countries").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(v["default_country"], "Indonesia");
        assert_eq!(
            v["countries"],
            serde_json::json!(["Indonesia", "Japan", "Perú"])
        );
    }
}
