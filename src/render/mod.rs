//! Render layer: sparkline SVG emission and display view models.
//!
//! Everything here is pure string/geometry work — no I/O, no clocks. The
//! same inputs always produce byte-identical output.

pub mod sparkline;
pub mod view;

pub use sparkline::{normalize, render_sparkline, SparkPoint, SparklineOptions};
pub use view::{CoinRowView, HighCard, MetricsView, SaleCard, SalesView};

/// Escape text for embedding in markup. The display layer builds HTML from
/// view models; every user-controlled string passes through here first.
pub fn sanitize(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
