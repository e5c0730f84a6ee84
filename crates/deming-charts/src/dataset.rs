//! Column-oriented tabular input for the chart renderers

use deming_common::{DemingError, Result};
use serde::{Deserialize, Serialize};

/// Values of one dataset column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Column {
    /// Measurements or numeric categories
    Numeric(Vec<f64>),
    /// Category labels such as dates or names
    Text(Vec<String>),
}

impl Column {
    /// Number of rows in the column
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Numeric(values) => values.len(),
            Self::Text(values) => values.len(),
        }
    }

    /// Whether the column has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Display label of row `index`, or `None` past the end
    #[must_use]
    pub fn label(&self, index: usize) -> Option<String> {
        match self {
            Self::Numeric(values) => values.get(index).map(|v| format_number(*v)),
            Self::Text(values) => values.get(index).cloned(),
        }
    }

    /// Display labels of every row
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        (0..self.len()).filter_map(|i| self.label(i)).collect()
    }

    const fn kind(&self) -> &'static str {
        match self {
            Self::Numeric(_) => "numeric",
            Self::Text(_) => "text",
        }
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Self::Numeric(values)
    }
}

impl From<Vec<String>> for Column {
    fn from(values: Vec<String>) -> Self {
        Self::Text(values)
    }
}

impl From<Vec<&str>> for Column {
    fn from(values: Vec<&str>) -> Self {
        Self::Text(values.into_iter().map(str::to_string).collect())
    }
}

/// A named column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedColumn {
    /// Column name used by chart requests
    pub name: String,
    /// Column values
    pub values: Column,
}

/// Table of equally long, named columns.
///
/// Row order is significant: the row index is the regressor of the
/// control chart trendline and the accumulation order of Pareto sums.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    columns: Vec<NamedColumn>,
}

#[derive(Deserialize)]
struct RawDataset {
    columns: Vec<NamedColumn>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = DemingError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        raw.columns
            .into_iter()
            .try_fold(Self::new(), |dataset, column| dataset.with_column(column.name, column.values))
    }
}

impl Dataset {
    /// Create an empty dataset
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Add a column, builder style
    pub fn with_column(mut self, name: impl Into<String>, values: impl Into<Column>) -> Result<Self> {
        self.push_column(name, values)?;
        Ok(self)
    }

    /// Add a column.
    ///
    /// Fails with a validation error when the name is taken or the column
    /// length differs from the existing rows.
    pub fn push_column(&mut self, name: impl Into<String>, values: impl Into<Column>) -> Result<()> {
        let name = name.into();
        let values = values.into();

        if self.columns.iter().any(|c| c.name == name) {
            return Err(DemingError::validation_field(
                format!("column '{name}' already exists"),
                name,
            ));
        }
        if let Some(first) = self.columns.first() {
            if first.values.len() != values.len() {
                return Err(DemingError::validation_field(
                    format!(
                        "column '{name}' has {} rows, expected {}",
                        values.len(),
                        first.values.len()
                    ),
                    name,
                ));
            }
        }

        self.columns.push(NamedColumn { name, values });
        Ok(())
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Whether the dataset has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.values)
            .ok_or_else(|| DemingError::invalid_column(name, "column not found in dataset"))
    }

    /// Look up a column that must hold numbers
    pub fn numeric(&self, name: &str) -> Result<&[f64]> {
        match self.column(name)? {
            Column::Numeric(values) => Ok(values),
            other => Err(DemingError::invalid_column(
                name,
                format!("expected a numeric column, found {}", other.kind()),
            )),
        }
    }
}

/// Format a number for tick labels: integers without a fraction, others
/// with up to two decimals.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
