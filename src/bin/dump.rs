//! Dump a decoded save file as pretty printed JSON for debugging
//!
//! Reads the save from the path given as the first argument, or from stdin
//! when no argument is given.
//!
//! ```text
//! {
//!   "entity_name": "PlayerEntity",
//!   "format_version": 30,
//!   "root": [
//!     {
//!       "uuid": "7d1d3a2fe4a44f6f8b9c8bdfd0a4b0a1",
//!       ...
//!     }
//!   ],
//!   "trailer": []
//! }
//! ```

use std::io::{self, Read, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let data = match std::env::args().nth(1) {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            buf
        }
    };

    let save = sbvj::SaveFile::from_slice(&data)?;

    let stdout = io::stdout();
    let mut writer = io::BufWriter::new(stdout.lock());
    serde_json::to_writer_pretty(&mut writer, &save)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
