#![deny(missing_docs, missing_debug_implementations)]
//! Codepoint classification tables for internationalized domain names.
//!
//! Given a local copy of the Unicode Character Database for one Unicode version,
//! this crate derives the tables that IDNA implementations are built from:
//!
//! * The IDNA2008 derived property of every codepoint (RFC 5892), decided by a
//!   fixed cascade of rules. See [`Classifier`].
//! * The UTS #46 status and mapping of every codepoint, compacted into rows where
//!   each row applies up to the next one. See [`uts46::rows`].
//! * Interval compressed forms of both, written out as a human readable table in
//!   the IANA layout, as a Rust module or as JSON. See [`emit`].
//!
//! Data files are read through a [`UcdSource`]; [`DirectorySource`] reads them
//! from a directory laid out like `https://www.unicode.org/Public/<version>/ucd/`.
//!
//! # Unicode versions
//!
//! The stability rule normalizes codepoints with the NFKC data compiled into this
//! crate. Classifying a Unicode version newer than that data still works, but
//! codepoints new in that version are normalized as if unassigned. Use
//! [`UnicodeVersion::exceeds_normalization_data`] to detect the situation.

pub(crate) mod error;

pub(crate) mod unicode_version;

pub(crate) mod ucd_source;

pub(crate) mod range_map;

pub(crate) mod property_store;

pub mod tables;

pub mod idna2008;

pub mod uts46;

pub mod ranges;

pub mod emit;

pub use error::{Error, Result};

pub use unicode_version::UnicodeVersion;

pub use ucd_source::{DirectorySource, UcdFile, UcdSource};

pub use property_store::{
    CodepointProperties, Codepoints, HangulSyllableType, PropertyStore, Uts46Fields,
};

pub use idna2008::{Classifier, Diagnosis, Idna2008Status, Rule};

pub use uts46::{Uts46Entry, Uts46Row, Uts46Status};

pub use ranges::{Interval, Run};
