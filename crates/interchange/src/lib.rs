//! recnorm-interchange: JSON in and out of the recnorm model.
//!
//! - [`schema_from_json`] reads a stream's JSON schema into an
//!   [`AirbyteType`](recnorm_core::AirbyteType).
//! - [`value_from_json`] decodes record data under that schema, so string
//!   payloads at date/time/timestamp positions become temporal values.
//! - [`record_from_json`] / [`record_to_json`] handle whole records:
//!   `data` is decoded, every other key is carried as opaque metadata.

pub mod error;
pub mod record;
pub mod schema;
pub mod value;

pub use error::InterchangeError;
pub use record::{bare_record_from_json, record_from_json, record_to_json};
pub use schema::schema_from_json;
pub use value::{value_from_json, value_to_json};
