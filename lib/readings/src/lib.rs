mod error;
mod reading;
mod store;

pub use error::Error;
pub use reading::{parse_timestamp, Reading, TIMESTAMP_FORMAT};
pub use store::Store;

pub type Result<T> = std::result::Result<T, Error>;
