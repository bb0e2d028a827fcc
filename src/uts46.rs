//! UTS #46 statuses and mappings, and the compacted row sequence built from them.

use crate::{
    property_store::{CharVec, CodepointProperties, Uts46Fields},
    tables,
};
use serde::ser::{Serialize, SerializeTuple, Serializer};
use std::fmt;

/// Rows at or below this codepoint are always emitted.
pub const SUPPRESSION_THRESHOLD: u32 = 0xFF;

/// The UTS #46 status of a codepoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Uts46Status {
    /// Valid as is.
    Valid,
    /// Removed during mapping.
    Ignored,
    /// Replaced by its mapping.
    Mapped,
    /// Mapped in transitional processing only.
    Deviation,
    /// Never valid.
    Disallowed,
    /// Valid unless STD3 ASCII rules apply.
    DisallowedStd3Valid,
    /// Mapped unless STD3 ASCII rules apply.
    DisallowedStd3Mapped,
}

impl Uts46Status {
    /// Looks up a status tag, returning the status and whether it carries a mapping.
    pub fn from_tag(tag: &str) -> Option<(Self, bool)> {
        tables::UTS46_STATUSES
            .iter()
            .find(|(name, _, _)| *name == tag)
            .map(|&(_, status, has_mapping)| (status, has_mapping))
    }

    /// The tag as written in `IdnaMappingTable.txt`.
    pub fn tag(self) -> &'static str {
        tables::UTS46_STATUSES
            .iter()
            .find(|(_, status, _)| *status == self)
            .map_or("", |&(name, _, _)| name)
    }

    /// The single letter code used in the generated tables.
    ///
    /// Both STD3 statuses share `3`; they are told apart by the presence of a mapping.
    pub fn code(self) -> char {
        match self {
            Uts46Status::Valid => 'V',
            Uts46Status::Ignored => 'I',
            Uts46Status::Mapped => 'M',
            Uts46Status::Deviation => 'D',
            Uts46Status::Disallowed => 'X',
            Uts46Status::DisallowedStd3Valid | Uts46Status::DisallowedStd3Mapped => '3',
        }
    }
}

/// A resolved UTS #46 status with its mapping, if the status has one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uts46Entry {
    /// The status.
    pub status: Uts46Status,
    /// The replacement text for mapping statuses, possibly empty.
    pub mapping: Option<String>,
}

impl fmt::Display for Uts46Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.status.code(), self.status.tag())?;
        if let Some(mapping) = &self.mapping {
            write!(f, " {:?}", mapping)?;
        }
        Ok(())
    }
}

fn decode_mapping(hex: &str) -> Option<String> {
    hex.split_whitespace()
        .map(|h| u32::from_str_radix(h, 16).ok().and_then(char::from_u32))
        .collect::<Option<CharVec>>()
        .map(|chars| chars.into_iter().collect())
}

/// Interprets raw `IdnaMappingTable.txt` fields.
///
/// Unknown status tags and undecodable mappings yield `None`.
pub fn resolve_fields(fields: &Uts46Fields) -> Option<Uts46Entry> {
    let (status, has_mapping) = Uts46Status::from_tag(&fields.status)?;
    let mapping = if has_mapping {
        Some(decode_mapping(fields.mapping.as_deref().unwrap_or(""))?)
    } else {
        None
    };
    Some(Uts46Entry { status, mapping })
}

/// The UTS #46 entry of a codepoint, or `None` if it is not listed.
pub fn resolve(cp: &CodepointProperties<'_>) -> Option<Uts46Entry> {
    resolve_fields(cp.uts46_fields()?)
}

/// One emitted row: the entry applies from `codepoint` up to the next row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uts46Row {
    /// First codepoint the entry applies to.
    pub codepoint: u32,
    /// The entry.
    pub entry: Uts46Entry,
}

impl Serialize for Uts46Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.entry.mapping.is_some() { 3 } else { 2 };
        let mut tuple = serializer.serialize_tuple(len)?;
        tuple.serialize_element(&self.codepoint)?;
        tuple.serialize_element(&self.entry.status.code())?;
        if let Some(mapping) = &self.entry.mapping {
            tuple.serialize_element(mapping)?;
        }
        tuple.end()
    }
}

/// Drops rows above [`SUPPRESSION_THRESHOLD`] that repeat the previous row's entry.
///
/// The input must be in ascending codepoint order.
#[derive(Clone, Debug)]
pub struct Uts46Rows<I> {
    entries: I,
    last: Option<Uts46Entry>,
}

impl<I> Uts46Rows<I>
where
    I: Iterator<Item = (u32, Uts46Entry)>,
{
    /// Wraps an ascending sequence of `(codepoint, entry)` pairs.
    pub fn new(entries: I) -> Self {
        Uts46Rows {
            entries,
            last: None,
        }
    }
}

impl<I> Iterator for Uts46Rows<I>
where
    I: Iterator<Item = (u32, Uts46Entry)>,
{
    type Item = Uts46Row;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (codepoint, entry) = self.entries.next()?;
            if codepoint > SUPPRESSION_THRESHOLD && self.last.as_ref() == Some(&entry) {
                continue;
            }
            self.last = Some(entry.clone());
            return Some(Uts46Row { codepoint, entry });
        }
    }
}

/// The compacted rows for an ascending sequence of codepoints.
pub fn rows<'a, I>(codepoints: I) -> Uts46Rows<impl Iterator<Item = (u32, Uts46Entry)> + 'a>
where
    I: IntoIterator<Item = CodepointProperties<'a>>,
    I::IntoIter: 'a,
{
    Uts46Rows::new(
        codepoints
            .into_iter()
            .filter_map(|cp| resolve(&cp).map(|entry| (cp.codepoint(), entry))),
    )
}

/// Finds the entry in effect for `codepoint`: the last row at or below it.
pub fn lookup(rows: &[Uts46Row], codepoint: u32) -> Option<&Uts46Entry> {
    let idx = rows.partition_point(|row| row.codepoint <= codepoint);
    rows.get(idx.checked_sub(1)?).map(|row| &row.entry)
}
