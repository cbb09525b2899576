//! The outer structure of a player save file.
//!
//! A save file is laid out as:
//!
//! ```text
//! [6 bytes "SBVJ01"][string entity name][i32 BE format version][variant root][trailer]
//! ```
//!
//! 1. Header - fixed magic bytes. Anything else is rejected before the rest
//!    of the input is looked at.
//! 2. Entity name - length prefixed string naming the kind of entity saved
//! 3. Format version - fixed width big endian integer, the only field in the
//!    format not encoded as a varint
//! 4. Root - a single variant. The game stores a one element list whose
//!    element is the map of entity data.
//! 5. Trailer - whatever follows the root. It is kept verbatim and written
//!    back untouched.
//!
//! ```text
//! SaveFile
//! ├── entity_name / format_version
//! ├── root → Variant::List([Variant::Map(entity)])
//! │          └── entity() / entity_mut() / set_entity()
//! └── trailer → opaque bytes
//! ```

mod file;
mod header;

pub use file::*;
pub use header::*;
