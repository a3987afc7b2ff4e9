use serde::Serialize;

/// Proportion chart series: parallel label/value/percent arrays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub percentages: Vec<f64>,
}

impl PieChart {
    /// Builds the series from `(label, count, percent)` slices, in order.
    pub fn from_slices<'a>(
        title: impl Into<String>,
        slices: impl IntoIterator<Item = (&'a str, usize, f64)>,
    ) -> Self {
        let mut labels = Vec::new();
        let mut values = Vec::new();
        let mut percentages = Vec::new();
        for (label, value, percent) in slices {
            labels.push(label.to_string());
            values.push(value);
            percentages.push(percent);
        }
        Self {
            title: title.into(),
            labels,
            values,
            percentages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
