//! recnorm-core: the data model shared by every recnorm crate.
//!
//! Three parallel pieces:
//! - [`Value`]: the semantic value tree of one record's data.
//! - [`AirbyteType`]: the schema describing what each position *should*
//!   hold, including timezone-awareness the value tag cannot express.
//! - [`OutputRecord`]: a value tree plus opaque metadata.
//!
//! Nothing in this crate interprets the tree; traversal and rewriting
//! live in `recnorm-mapper`, JSON decoding in `recnorm-interchange`.

pub mod path;
pub mod record;
pub mod schema;
pub mod value;

pub use path::{FieldPath, PathSegment};
pub use record::OutputRecord;
pub use schema::{AirbyteType, FieldType, ObjectType};
pub use value::{ObjectValue, Value};
