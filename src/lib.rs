pub mod cli;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod images;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod prompt;
pub mod row;

pub use config::{Categories, Config};
pub use normalize::{normalize, ScrapeOptions};
pub use row::{Link, Row, RowKind};
