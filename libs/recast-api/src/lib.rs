pub mod error;
pub mod kind;
pub mod record;
pub mod schema;
pub mod value;

pub use error::CoerceError;
pub use kind::{resolve, ContainerKind, Kind, Parameterized, TypeDesc};
pub use record::{Attributes, Record, RecordType};
pub use schema::{Field, Schema};
pub use value::{Value, ValueKind};
