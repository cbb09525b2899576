/*!

A lossless codec for the `SBVJ01` player save files written by Starbound.

A save file holds a player's full state (identity, inventory, stats,
appearance) as one deeply nested, self describing value. This crate decodes
the file into an owned tree of [`Variant`] values that can be inspected and
edited, and encodes the tree back into bytes that the game will load.

## Quick Start

```rust
use sbvj::{SaveFile, Variant};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
# let mut entity = sbvj::VariantMap::new();
# entity.insert("uuid", "c0ffee");
# let data = SaveFile::new("PlayerEntity", 1, entity).to_bytes();
let mut save = SaveFile::from_slice(&data)?;
assert_eq!(save.entity_name(), "PlayerEntity");

let entity = save.entity_mut().unwrap();
entity.insert("description", "edited");

let out = save.to_bytes();
let reloaded = SaveFile::from_slice(&out)?;
assert_eq!(
    reloaded.entity().and_then(|e| e.get("description")),
    Some(&Variant::from("edited"))
);
# Ok(())
# }
```

## Wire Format

Every integer is a variable length quantity: 7 bits per byte, most
significant group first, with the high bit set on every byte but the last.
Signed integers are zigzag mapped first. Each value is prefixed with a tag:

| tag | kind    | payload                                  |
|-----|---------|------------------------------------------|
| 1   | null    | none                                     |
| 2   | float   | 8 byte big endian double                 |
| 3   | bool    | 1 byte, 0 or 1                           |
| 4   | integer | zigzag varint                            |
| 5   | string  | varint length + UTF-8 bytes              |
| 6   | list    | varint count + that many values          |
| 7   | map     | varint count + (string key, value) pairs |

See the [envelope] module for the outer file layout.

## Caveats

- Strings that are not valid UTF-8 are rejected rather than passed through.
- Map keys are unique. If a file repeats a key within one map, the last value
  wins and the map is re-encoded with one fewer entry.
- Decoding guards against deeply nested input with a configurable limit
  (see [`DecodeOptions`]).

## Color Directives

Appearance fields store palette swaps as text inside string values. These
are handled by [`ColorDirectives`]:

```rust
use sbvj::{decode_color_directives, encode_color_directives};
let groups = decode_color_directives("?replace;body=ffaa00");
assert_eq!(groups, vec![vec![("body".to_string(), "ffaa00".to_string())]]);
assert_eq!(encode_color_directives(&groups), "?replace;body=ffaa00");
```

*/

mod directives;
pub mod envelope;
mod errors;
#[cfg(feature = "json")]
pub mod json;
pub mod player;
mod reader;
pub(crate) mod util;
mod variant;
mod varint;
mod writer;

pub use self::directives::*;
pub use self::envelope::{decode_save, encode_save, SaveFile};
pub use self::errors::{Error, ErrorKind};
pub use self::player::Player;
pub use self::reader::{
    decode_string, decode_variant, DecodeOptions, VariantReader, DEFAULT_MAX_DEPTH,
};
pub use self::variant::{Variant, VariantMap, VariantTag};
pub use self::varint::{
    decode_svarint, decode_uvarint, encode_svarint, encode_uvarint, unzigzag, zigzag,
};
pub use self::writer::{encode_string, encode_variant};
