use crate::{Error, ErrorKind, VariantReader};

/// Magic bytes every supported save file starts with
pub const SAVE_MAGIC: &[u8; SAVE_MAGIC_LEN] = b"SBVJ01";

/// Length of [`SAVE_MAGIC`]
pub const SAVE_MAGIC_LEN: usize = 6;

/// Returns true if the data starts with the save file magic
///
/// ```
/// assert!(sbvj::envelope::is_save_file(b"SBVJ01\x06player"));
/// assert!(!sbvj::envelope::is_save_file(b"SBVJ02"));
/// assert!(!sbvj::envelope::is_save_file(b"SBV"));
/// ```
pub fn is_save_file(data: &[u8]) -> bool {
    data.starts_with(SAVE_MAGIC)
}

/// Consumes the header, rejecting the input if the magic does not match.
pub(crate) fn read_header(reader: &mut VariantReader) -> Result<(), Error> {
    let remainder = reader.remainder();
    match reader.read_array::<SAVE_MAGIC_LEN>() {
        Ok(magic) if &magic == SAVE_MAGIC => Ok(()),
        _ => {
            let found = remainder.iter().take(SAVE_MAGIC_LEN).copied().collect();
            Err(Error::new(ErrorKind::WrongFormatVersion { found }))
        }
    }
}

pub(crate) fn write_header(out: &mut Vec<u8>) {
    out.extend_from_slice(SAVE_MAGIC);
}
