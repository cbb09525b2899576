use crate::{
    envelope::header::{read_header, write_header},
    writer::{write_string, write_variant},
    DecodeOptions, Error, Variant, VariantMap, VariantReader,
};
use std::{fs, io::Write, path::Path};

/// A decoded player save file
///
/// ```
/// use sbvj::{SaveFile, Variant, VariantMap};
///
/// let mut entity = VariantMap::new();
/// entity.insert("uuid", "c0ffee");
/// let save = SaveFile::new("PlayerEntity", 1, entity);
///
/// let data = save.to_bytes();
/// assert!(data.starts_with(b"SBVJ01"));
///
/// let decoded = SaveFile::from_slice(&data)?;
/// assert_eq!(decoded.entity_name(), "PlayerEntity");
/// assert_eq!(decoded.entity().and_then(|e| e.get("uuid")), Some(&Variant::from("c0ffee")));
/// # Ok::<(), sbvj::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SaveFile {
    entity_name: String,
    format_version: i32,
    root: Variant,
    trailer: Vec<u8>,
}

impl SaveFile {
    /// Creates a save whose root is the conventional one element list
    /// holding the entity
    pub fn new(entity_name: impl Into<String>, format_version: i32, entity: VariantMap) -> Self {
        SaveFile {
            entity_name: entity_name.into(),
            format_version,
            root: Variant::List(vec![Variant::Map(entity)]),
            trailer: Vec::new(),
        }
    }

    /// Decodes a save file held in memory
    pub fn from_slice(data: &[u8]) -> Result<SaveFile, Error> {
        SaveFile::from_slice_with_options(data, DecodeOptions::default())
    }

    /// Decodes a save file held in memory with custom decoding options.
    ///
    /// A header mismatch fails with
    /// [`WrongFormatVersion`](crate::ErrorKind::WrongFormatVersion). Any
    /// failure past the header is reported as
    /// [`CorruptSaveFile`](crate::ErrorKind::CorruptSaveFile) wrapping the
    /// original cause.
    pub fn from_slice_with_options(data: &[u8], options: DecodeOptions) -> Result<SaveFile, Error> {
        let mut reader = VariantReader::with_options(data, options);
        read_header(&mut reader)?;

        let (entity_name, format_version, root) = read_body(&mut reader).map_err(Error::corrupt)?;
        let trailer = reader.read_rest().to_vec();
        log::debug!(
            "decoded save for {} (version: {}, root: {}, trailer: {} bytes)",
            entity_name,
            format_version,
            root.tag(),
            trailer.len()
        );

        Ok(SaveFile {
            entity_name,
            format_version,
            root,
            trailer,
        })
    }

    /// Reads and decodes a save file from the file system
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<SaveFile, Error> {
        let path = path.as_ref();
        log::debug!("reading save file: {}", path.display());
        let data = fs::read(path)?;
        SaveFile::from_slice(&data)
    }

    /// Encodes the save. Fields are written in the same order they are read,
    /// followed by the untouched trailer.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.trailer.len() + 64);
        write_header(&mut out);
        write_string(&mut out, &self.entity_name);
        out.extend_from_slice(&self.format_version.to_be_bytes());
        write_variant(&mut out, &self.root);
        out.extend_from_slice(&self.trailer);
        log::debug!(
            "encoded save for {} ({} bytes, trailer: {} bytes)",
            self.entity_name,
            out.len(),
            self.trailer.len()
        );
        out
    }

    /// Writes the encoded save to a writer
    pub fn write<W>(&self, mut writer: W) -> std::io::Result<()>
    where
        W: Write,
    {
        writer.write_all(&self.to_bytes())
    }

    /// Encodes and writes the save to the file system
    pub fn write_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        log::debug!("writing save file: {}", path.display());
        fs::write(path, self.to_bytes())?;
        Ok(())
    }

    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    pub fn set_entity_name(&mut self, entity_name: impl Into<String>) {
        self.entity_name = entity_name.into();
    }

    pub fn format_version(&self) -> i32 {
        self.format_version
    }

    pub fn set_format_version(&mut self, format_version: i32) {
        self.format_version = format_version;
    }

    /// The root variant exactly as it was decoded
    pub fn root(&self) -> &Variant {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Variant {
        &mut self.root
    }

    pub fn set_root(&mut self, root: Variant) {
        self.root = root;
    }

    /// Bytes that followed the root variant
    pub fn trailer(&self) -> &[u8] {
        &self.trailer
    }

    pub fn set_trailer(&mut self, trailer: Vec<u8>) {
        self.trailer = trailer;
    }

    /// The entity data: the first element of the root list, if that element
    /// is a map
    pub fn entity(&self) -> Option<&VariantMap> {
        self.root.as_list()?.first()?.as_map()
    }

    pub fn entity_mut(&mut self) -> Option<&mut VariantMap> {
        self.root.as_list_mut()?.first_mut()?.as_map_mut()
    }

    /// Replaces the entity data. When the root is not a list with at least one
    /// element, the root is replaced with a list containing only the entity.
    pub fn set_entity(&mut self, entity: VariantMap) {
        match self.root.as_list_mut().and_then(|x| x.first_mut()) {
            Some(first) => *first = Variant::Map(entity),
            None => self.root = Variant::List(vec![Variant::Map(entity)]),
        }
    }
}

fn read_body(reader: &mut VariantReader) -> Result<(String, i32, Variant), Error> {
    let entity_name = reader.read_string()?.to_string();
    let format_version = reader.read_i32()?;
    let root = reader.read_variant()?;
    Ok((entity_name, format_version, root))
}

/// Decodes a save file held in memory
pub fn decode_save(data: &[u8]) -> Result<SaveFile, Error> {
    SaveFile::from_slice(data)
}

/// Encodes a save file
pub fn encode_save(save: &SaveFile) -> Vec<u8> {
    save.to_bytes()
}
