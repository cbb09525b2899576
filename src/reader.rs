use crate::{
    errors::ReadError,
    util::{be_f64, be_i32, get_split},
    varint::{read_svarint, read_uvarint},
    Error, ErrorKind, Variant, VariantMap, VariantTag,
};

/// Default limit on how deeply lists and maps may nest
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Customizes decoding behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    max_depth: usize,
}

impl DecodeOptions {
    /// Creates the structure with default options
    pub fn new() -> Self {
        DecodeOptions::default()
    }

    /// Sets how many containers may be nested inside each other before the
    /// input is considered malicious or corrupt
    pub fn with_max_depth(mut self, max_depth: usize) -> DecodeOptions {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[inline]
pub(crate) fn read_string(data: &[u8]) -> Result<(&str, &[u8]), ReadError> {
    let (len, rest) = read_uvarint(data)?;
    let len = usize::try_from(len).map_err(|_| ReadError::Eof)?;
    if len > rest.len() {
        return Err(ReadError::Eof);
    }

    let (text, rest) = rest.split_at(len);
    let text = std::str::from_utf8(text).map_err(|_| ReadError::InvalidUtf8)?;
    Ok((text, rest))
}

#[inline]
pub(crate) fn read_bool(data: &[u8]) -> Result<(bool, &[u8]), ReadError> {
    let (&first, rest) = data.split_first().ok_or(ReadError::Eof)?;
    match first {
        0 => Ok((false, rest)),
        1 => Ok((true, rest)),
        x => Err(ReadError::InvalidBool(x)),
    }
}

#[inline]
pub(crate) fn read_f64(data: &[u8]) -> Result<(f64, &[u8]), ReadError> {
    let (head, rest) = get_split::<8>(data).ok_or(ReadError::Eof)?;
    Ok((be_f64(head), rest))
}

#[inline]
pub(crate) fn read_i32(data: &[u8]) -> Result<(i32, &[u8]), ReadError> {
    let (head, rest) = get_split::<4>(data).ok_or(ReadError::Eof)?;
    Ok((be_i32(head), rest))
}

#[inline]
pub(crate) fn read_tag(data: &[u8]) -> Result<(VariantTag, &[u8]), ReadError> {
    let (tag, rest) = read_uvarint(data)?;
    let tag = VariantTag::from_u64(tag).ok_or(ReadError::UnknownTag(tag))?;
    Ok((tag, rest))
}

/// A cursor over an in-memory buffer that decodes variants.
///
/// Every read advances the same position, so errors carry the absolute
/// offset of the field that failed to decode.
///
/// ```
/// use sbvj::{Variant, VariantReader};
/// let data = [0x06, 0x02, 0x04, 0x09, 0x05, 0x02, b'h', b'i'];
/// let mut reader = VariantReader::new(&data);
/// let value = reader.read_variant()?;
/// assert_eq!(value, Variant::List(vec![Variant::Integer(-5), Variant::from("hi")]));
/// assert_eq!(reader.position(), data.len());
/// # Ok::<(), sbvj::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct VariantReader<'a> {
    data: &'a [u8],
    original_length: usize,
    options: DecodeOptions,
    depth: usize,
}

impl<'a> VariantReader<'a> {
    /// Creates a reader with the default options
    #[inline]
    pub fn new(data: &'a [u8]) -> Self {
        VariantReader::with_options(data, DecodeOptions::default())
    }

    #[inline]
    pub fn with_options(data: &'a [u8], options: DecodeOptions) -> Self {
        VariantReader {
            data,
            original_length: data.len(),
            options,
            depth: 0,
        }
    }

    /// The bytes that have yet to be read
    #[inline]
    pub fn remainder(&self) -> &'a [u8] {
        self.data
    }

    /// Number of bytes consumed so far
    #[inline]
    pub fn position(&self) -> usize {
        self.original_length - self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    fn err_position(&self, err: ReadError) -> Error {
        err.at(self.position())
    }

    #[inline]
    pub fn read_uvarint(&mut self) -> Result<u64, Error> {
        let (result, rest) = read_uvarint(self.data).map_err(|e| self.err_position(e))?;
        self.data = rest;
        Ok(result)
    }

    #[inline]
    pub fn read_svarint(&mut self) -> Result<i64, Error> {
        let (result, rest) = read_svarint(self.data).map_err(|e| self.err_position(e))?;
        self.data = rest;
        Ok(result)
    }

    /// Reads a length prefixed string. Strings must be valid UTF-8.
    #[inline]
    pub fn read_string(&mut self) -> Result<&'a str, Error> {
        let (result, rest) = read_string(self.data).map_err(|e| self.err_position(e))?;
        self.data = rest;
        Ok(result)
    }

    #[inline]
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        let (result, rest) = read_bool(self.data).map_err(|e| self.err_position(e))?;
        self.data = rest;
        Ok(result)
    }

    /// Reads a big endian double
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let (result, rest) = read_f64(self.data).map_err(|e| self.err_position(e))?;
        self.data = rest;
        Ok(result)
    }

    /// Reads a fixed width big endian signed integer
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32, Error> {
        let (result, rest) = read_i32(self.data).map_err(|e| self.err_position(e))?;
        self.data = rest;
        Ok(result)
    }

    /// Reads exactly `N` raw bytes
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let (result, rest) =
            get_split::<N>(self.data).ok_or_else(|| self.err_position(ReadError::Eof))?;
        self.data = rest;
        Ok(result)
    }

    /// Consumes and returns everything that has not been read
    #[inline]
    pub fn read_rest(&mut self) -> &'a [u8] {
        std::mem::take(&mut self.data)
    }

    #[inline]
    pub fn read_tag(&mut self) -> Result<VariantTag, Error> {
        let (result, rest) = read_tag(self.data).map_err(|e| self.err_position(e))?;
        self.data = rest;
        Ok(result)
    }

    /// Reads a tag and then the value it describes
    pub fn read_variant(&mut self) -> Result<Variant, Error> {
        match self.read_tag()? {
            VariantTag::Null => Ok(Variant::Null),
            VariantTag::Float => self.read_f64().map(Variant::Float),
            VariantTag::Bool => self.read_bool().map(Variant::Bool),
            VariantTag::Integer => self.read_svarint().map(Variant::Integer),
            VariantTag::String => self.read_string().map(|x| Variant::String(x.to_string())),
            VariantTag::List => self.read_list().map(Variant::List),
            VariantTag::Map => self.read_map().map(Variant::Map),
        }
    }

    /// Reads the payload of a list: a count followed by that many variants
    pub fn read_list(&mut self) -> Result<Vec<Variant>, Error> {
        self.enter()?;
        let result = self.read_list_elements();
        self.depth -= 1;
        result
    }

    fn read_list_elements(&mut self) -> Result<Vec<Variant>, Error> {
        let len = self.read_uvarint()?;

        // Don't trust the count for preallocation, every element takes at least one byte
        let mut values = Vec::with_capacity(self.capacity_hint(len));
        for _ in 0..len {
            values.push(self.read_variant()?);
        }

        Ok(values)
    }

    /// Reads the payload of a map: a count followed by that many key value
    /// pairs. A repeated key overwrites the earlier value.
    pub fn read_map(&mut self) -> Result<VariantMap, Error> {
        self.enter()?;
        let result = self.read_map_entries();
        self.depth -= 1;
        result
    }

    fn read_map_entries(&mut self) -> Result<VariantMap, Error> {
        let len = self.read_uvarint()?;
        let mut map = VariantMap::with_capacity(self.capacity_hint(len) / 2);
        for _ in 0..len {
            let key = self.read_string()?;
            let value = self.read_variant()?;
            map.insert(key, value);
        }

        Ok(map)
    }

    #[inline]
    fn enter(&mut self) -> Result<(), Error> {
        if self.depth >= self.options.max_depth() {
            return Err(Error::new(ErrorKind::NestingTooDeep {
                max_depth: self.options.max_depth(),
                offset: self.position(),
            }));
        }

        self.depth += 1;
        Ok(())
    }

    #[inline]
    fn capacity_hint(&self, len: u64) -> usize {
        usize::try_from(len).unwrap_or(usize::MAX).min(self.data.len())
    }
}

/// Decode a length prefixed string, returning the string and the number of
/// bytes consumed
///
/// ```
/// assert_eq!(sbvj::decode_string(&[0x02, b'h', b'i']).unwrap(), ("hi".to_string(), 3));
/// assert_eq!(sbvj::decode_string(&[0x00]).unwrap(), (String::new(), 1));
/// ```
pub fn decode_string(data: &[u8]) -> Result<(String, usize), Error> {
    let mut reader = VariantReader::new(data);
    let result = reader.read_string()?;
    Ok((result.to_string(), reader.position()))
}

/// Decode a single tagged variant, returning the value and the number of
/// bytes consumed
///
/// ```
/// use sbvj::Variant;
/// let (value, len) = sbvj::decode_variant(&[0x05, 0x00]).unwrap();
/// assert_eq!(value, Variant::String(String::new()));
/// assert_eq!(len, 2);
/// ```
pub fn decode_variant(data: &[u8]) -> Result<(Variant, usize), Error> {
    let mut reader = VariantReader::new(data);
    let result = reader.read_variant()?;
    Ok((result, reader.position()))
}
