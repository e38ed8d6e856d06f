mod list;
pub use list::YearList;

mod charts;
pub use charts::{ChartMounts, PlotlyRenderer, PLOTLY_CDN};

mod export;
pub use export::PngExporter;

pub mod snapshot;
