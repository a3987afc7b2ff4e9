use formats::VolcanoRecord;
use serde::Serialize;

/// Which detail line a marker tooltip carries under name and type.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipMode {
    Coordinates,
    Elevation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipStyle {
    pub background_color: String,
    pub color: String,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background_color: "steelblue".to_string(),
            color: "black".to_string(),
        }
    }
}

pub fn render_tooltip(record: &VolcanoRecord, mode: TooltipMode) -> String {
    let detail = match mode {
        TooltipMode::Coordinates => format!(
            "Lat: {} Long: {}",
            record.location.lat_deg, record.location.lon_deg
        ),
        TooltipMode::Elevation => match record.elevation_m {
            Some(e) => format!("Elevation: {e} m"),
            None => "Elevation: unknown".to_string(),
        },
    };
    format!(
        "<b>Volcano Name:</b><br/> {} <br/>Type: {} <br/>{}",
        escape_html(&record.name),
        escape_html(&record.primary_type),
        detail
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
