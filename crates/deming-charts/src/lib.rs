//! # Deming Charts
//!
//! Statistical process control charts and Pareto charts.
//!
//! A [`Dataset`] is reduced to a [`ControlChartSeries`] (mean, control
//! limits, least-squares trendline, optional goal) or a [`ParetoSeries`]
//! (bars with cumulative percentages). One plotters drawing routine per
//! chart kind then renders the series to PNG bytes, an SVG document or,
//! with the `display` feature, a window.
//!
//! ```no_run
//! use deming_charts::{ChartRenderer, ChartRequest, Dataset};
//!
//! # fn main() -> deming_common::Result<()> {
//! let dataset = Dataset::new()
//!     .with_column("week", vec!["2024-07-01", "2024-07-08", "2024-07-15"])?
//!     .with_column("tickets", vec![10.0, 12.0, 14.0])?;
//!
//! let renderer = ChartRenderer::default();
//! let png = renderer.render_static(&dataset, &ChartRequest::new("week", "tickets").goal(11.0))?;
//! let svg = renderer.render_vector(&dataset, &ChartRequest::new("week", "tickets").goal(11.0))?;
//! # let _ = (png, svg);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod control;
pub mod dataset;
#[cfg(feature = "display")]
pub mod display;
pub mod encode;
pub mod pareto;
pub mod renderer;
pub mod stats;
pub mod style;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use control::{draw_control_chart, ControlChartSeries, XAxis};
pub use dataset::{Column, Dataset, NamedColumn};
pub use pareto::{draw_pareto, ParetoSeries};
pub use renderer::{ChartRenderer, ChartRequest, ParetoRequest};
pub use stats::{ControlLimits, LimitConvention, LinearFit};
pub use style::{ControlChartStyle, ParetoStyle};
