use indexmap::IndexMap;
use std::fmt;

/// Wire tag identifying which kind of value follows
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum VariantTag {
    Null = 1,
    Float = 2,
    Bool = 3,
    Integer = 4,
    String = 5,
    List = 6,
    Map = 7,
}

impl VariantTag {
    /// Looks up the kind for a tag read off the wire
    #[inline]
    pub const fn from_u64(tag: u64) -> Option<VariantTag> {
        match tag {
            1 => Some(VariantTag::Null),
            2 => Some(VariantTag::Float),
            3 => Some(VariantTag::Bool),
            4 => Some(VariantTag::Integer),
            5 => Some(VariantTag::String),
            6 => Some(VariantTag::List),
            7 => Some(VariantTag::Map),
            _ => None,
        }
    }

    #[inline]
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            VariantTag::Null => "null",
            VariantTag::Float => "float",
            VariantTag::Bool => "bool",
            VariantTag::Integer => "integer",
            VariantTag::String => "string",
            VariantTag::List => "list",
            VariantTag::Map => "map",
        }
    }
}

impl fmt::Display for VariantTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A self describing value. Containers own their children, so a variant is
/// always a tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Variant {
    #[default]
    Null,
    Float(f64),
    Bool(bool),
    Integer(i64),
    String(String),
    List(Vec<Variant>),
    Map(VariantMap),
}

impl Variant {
    /// The wire tag this value is encoded with
    pub fn tag(&self) -> VariantTag {
        match self {
            Variant::Null => VariantTag::Null,
            Variant::Float(_) => VariantTag::Float,
            Variant::Bool(_) => VariantTag::Bool,
            Variant::Integer(_) => VariantTag::Integer,
            Variant::String(_) => VariantTag::String,
            Variant::List(_) => VariantTag::List,
            Variant::Map(_) => VariantTag::Map,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Variant::Float(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Variant::Bool(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Variant::Integer(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(x) => Some(x.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vec<Variant>> {
        match self {
            Variant::List(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Variant>> {
        match self {
            Variant::List(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&VariantMap> {
        match self {
            Variant::Map(x) => Some(x),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut VariantMap> {
        match self {
            Variant::Map(x) => Some(x),
            _ => None,
        }
    }

    /// Looks up a key when this value is a map
    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Walks down the tree. Each segment is a map key, or, when the current
    /// value is a list, an index into that list.
    ///
    /// ```
    /// use sbvj::{Variant, VariantMap};
    /// let mut status = VariantMap::new();
    /// status.insert("health", Variant::Float(8.5));
    /// let mut root = VariantMap::new();
    /// root.insert("status", Variant::Map(status));
    /// root.insert("slots", Variant::List(vec![Variant::Null, Variant::Integer(2)]));
    /// let root = Variant::Map(root);
    ///
    /// assert_eq!(root.pointer(&["status", "health"]), Some(&Variant::Float(8.5)));
    /// assert_eq!(root.pointer(&["slots", "1"]), Some(&Variant::Integer(2)));
    /// assert_eq!(root.pointer(&["slots", "2"]), None);
    /// ```
    pub fn pointer(&self, path: &[&str]) -> Option<&Variant> {
        path.iter().try_fold(self, |current, segment| match current {
            Variant::Map(map) => map.get(segment),
            Variant::List(list) => segment.parse::<usize>().ok().and_then(|i| list.get(i)),
            _ => None,
        })
    }

    /// Mutable version of [`Variant::pointer`]
    pub fn pointer_mut(&mut self, path: &[&str]) -> Option<&mut Variant> {
        path.iter().try_fold(self, |current, segment| match current {
            Variant::Map(map) => map.get_mut(segment),
            Variant::List(list) => match segment.parse::<usize>() {
                Ok(i) => list.get_mut(i),
                Err(_) => None,
            },
            _ => None,
        })
    }
}

impl From<f64> for Variant {
    fn from(x: f64) -> Self {
        Variant::Float(x)
    }
}

impl From<bool> for Variant {
    fn from(x: bool) -> Self {
        Variant::Bool(x)
    }
}

impl From<i64> for Variant {
    fn from(x: i64) -> Self {
        Variant::Integer(x)
    }
}

impl From<&str> for Variant {
    fn from(x: &str) -> Self {
        Variant::String(x.to_string())
    }
}

impl From<String> for Variant {
    fn from(x: String) -> Self {
        Variant::String(x)
    }
}

impl From<Vec<Variant>> for Variant {
    fn from(x: Vec<Variant>) -> Self {
        Variant::List(x)
    }
}

impl From<VariantMap> for Variant {
    fn from(x: VariantMap) -> Self {
        Variant::Map(x)
    }
}

/// String keyed map that remembers the order entries were inserted.
///
/// Re-encoding walks the entries in this order, so a decoded map is written
/// back out in the same order it was read. Keys are unique: inserting an
/// existing key overwrites the value in its original position. Two maps are
/// equal only if they hold the same entries in the same order.
#[derive(Debug, Clone, Default)]
pub struct VariantMap {
    entries: IndexMap<String, Variant>,
}

impl VariantMap {
    pub fn new() -> Self {
        VariantMap::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        VariantMap {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Variant> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Variant> {
        self.entries.get_mut(key)
    }

    /// Inserts a value, returning the previous value if the key was present
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Variant>) -> Option<Variant> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a key, keeping the relative order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<Variant> {
        self.entries.shift_remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variant)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Variant)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Walks down the tree starting at one of this map's keys. See
    /// [`Variant::pointer`].
    pub fn pointer(&self, path: &[&str]) -> Option<&Variant> {
        let (first, rest) = path.split_first()?;
        self.get(first)?.pointer(rest)
    }

    pub fn pointer_mut(&mut self, path: &[&str]) -> Option<&mut Variant> {
        let (first, rest) = path.split_first()?;
        self.get_mut(first)?.pointer_mut(rest)
    }
}

impl PartialEq for VariantMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Into<String>, V: Into<Variant>> FromIterator<(K, V)> for VariantMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = VariantMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl IntoIterator for VariantMap {
    type Item = (String, Variant);
    type IntoIter = indexmap::map::IntoIter<String, Variant>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
