pub mod coerce;
pub mod config;
pub mod error;
pub mod merge;
pub mod record;
pub mod text;

pub use coerce::{coerce, to_list};
pub use config::{RecastConfig, RecordConfig};
pub use error::EngineError;
pub use merge::{add_items, normalize, Container, RecordIndex};
pub use record::{decode_row, define_record, format_record, read_row, write_row, write_row_as};
pub use text::{infer, infer_str, project};
