pub mod detect;
pub mod inter;
pub mod nubank;
pub mod pipeline;
pub mod row;

pub(crate) mod columns;

pub use detect::{detect, Dialect};
pub use inter::InterParser;
pub use nubank::NubankParser;
pub use pipeline::{IngestError, IngestionResult, Ingestor};
pub use row::RowError;
