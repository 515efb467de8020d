//! Append-only store of schema-less tagged records.
//!
//! Each [`Record`] is an ordered list of attribute groups, and each group
//! pairs a tag with zero or more string values. Records are addressed by
//! the [`RecordPos`] returned when they were appended, which stays valid
//! while further records are added. Option definitions live here alongside
//! any other record bundles a host program stores (build rules, for
//! example).

use serde::Serialize;

/// Position of a record within a [`RecordStore`].
///
/// [`RecordPos::BEFORE_FIRST`] is a sentinel that precedes every record;
/// [`RecordStore::next`] called with it yields the first record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordPos(usize);

impl RecordPos {
    /// Sentinel position preceding the first record.
    pub const BEFORE_FIRST: Self = Self(0);

    /// Raw position value. The sentinel is `0`; records start at `1`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    fn slot(self) -> Option<usize> {
        self.0.checked_sub(1)
    }
}

/// One tagged attribute group inside a [`Record`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Attribute {
    tag: String,
    values: Vec<String>,
}

impl Attribute {
    /// Creates an attribute group from a tag and its values.
    #[must_use]
    pub fn new<T, I, V>(tag: T, values: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self {
            tag: tag.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Tag naming this group.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Values stored under the tag.
    #[must_use]
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Variable-length record holding zero or more attribute groups.
///
/// # Examples
///
/// ```
/// use optmatch::Record;
///
/// let rule = Record::from_tagged([":target", "app.o", ":deps", "app.c", "app.h"]);
/// assert_eq!(rule.attr(":deps"), Some(&["app.c".to_owned(), "app.h".to_owned()][..]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    attributes: Vec<Attribute>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Appends an attribute group, returning the extended record.
    #[must_use]
    pub fn with<T, I, V>(mut self, tag: T, values: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.attributes.push(Attribute::new(tag, values));
        self
    }

    /// Builds a record from a flat sequence of tags and values.
    ///
    /// Items beginning with `:` open a new attribute group tagged with that
    /// item; the values that follow belong to it. Values preceding the first
    /// tag form a group with an empty tag.
    #[must_use]
    pub fn from_tagged<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut attributes: Vec<Attribute> = Vec::new();
        for item in items.into_iter().map(Into::into) {
            if item.starts_with(':') {
                attributes.push(Attribute::new(item, Vec::<String>::new()));
                continue;
            }
            let Some(group) = attributes.last_mut() else {
                attributes.push(Attribute::new("", [item]));
                continue;
            };
            group.values.push(item);
        }
        Self { attributes }
    }

    /// Values of the first attribute group tagged `tag`.
    #[must_use]
    pub fn attr(&self, tag: &str) -> Option<&[String]> {
        self.attributes
            .iter()
            .find(|attribute| attribute.tag == tag)
            .map(Attribute::values)
    }

    /// Every value in the record, in order, with the tags dropped.
    pub fn raw_values(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .flat_map(|attribute| attribute.values.iter().map(String::as_str))
    }

    /// Attribute groups in insertion order.
    #[must_use]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Whether the record holds no attribute groups.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Ordered, append-only sequence of [`Record`]s.
///
/// # Examples
///
/// ```
/// use optmatch::{Record, RecordPos, RecordStore};
///
/// let mut store = RecordStore::new();
/// let first = store.append(Record::new().with(":name", ["compile"]));
/// let second = store.append(Record::new().with(":name", ["link"]));
///
/// assert_eq!(store.next(RecordPos::BEFORE_FIRST), Some(first));
/// assert_eq!(store.next(first), Some(second));
/// assert_eq!(store.next(second), None);
/// assert_eq!(store.get_attr(second, ":name"), Some(&["link".to_owned()][..]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends `record` and returns its position.
    pub fn append(&mut self, record: Record) -> RecordPos {
        self.records.push(record);
        RecordPos(self.records.len())
    }

    /// Appends a record given as a flat tag/value sequence.
    ///
    /// See [`Record::from_tagged`] for the grouping rules.
    pub fn append_tagged<I, S>(&mut self, items: I) -> RecordPos
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.append(Record::from_tagged(items))
    }

    /// Position of the record following `pos`, or `None` at the end.
    ///
    /// Passing [`RecordPos::BEFORE_FIRST`] yields the first record when the
    /// store is not empty.
    #[must_use]
    pub fn next(&self, pos: RecordPos) -> Option<RecordPos> {
        let following = RecordPos(pos.0 + 1);
        self.get(following).map(|_| following)
    }

    /// Record stored at `pos`.
    #[must_use]
    pub fn get(&self, pos: RecordPos) -> Option<&Record> {
        self.records.get(pos.slot()?)
    }

    /// Values of the first attribute tagged `tag` in the record at `pos`.
    #[must_use]
    pub fn get_attr(&self, pos: RecordPos, tag: &str) -> Option<&[String]> {
        self.get(pos)?.attr(tag)
    }

    /// Every value of the record at `pos`, flattened across its groups.
    #[must_use]
    pub fn raw_values(&self, pos: RecordPos) -> Option<Vec<&str>> {
        self.get(pos).map(|record| record.raw_values().collect())
    }

    /// Iterates over every record with its position, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordPos, &Record)> {
        self.records
            .iter()
            .enumerate()
            .map(|(slot, record)| (RecordPos(slot + 1), record))
    }

    /// Number of stored records.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
