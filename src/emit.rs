//! Rendering of classification results into the generated artifacts.

use crate::{
    idna2008::{Classifier, Idna2008Status},
    property_store::PropertyStore,
    ranges::{self, Interval, Run},
    tables,
    unicode_version::UnicodeVersion,
    uts46::{self, Uts46Row},
};
use indexmap::IndexMap;
use serde::Serialize;
use std::{collections::BTreeMap, io};

const HEADER: &str = "// This file is automatically generated by idna-tables.";

const DESCRIPTION_WIDTH: usize = 50;

/// Default number of rows per segment of the UTS #46 artifact.
pub const DEFAULT_SEGMENT_SIZE: usize = 100;

/// Statuses listed in the library data; the others are implied by absence.
const LISTED_STATUSES: [Idna2008Status; 3] = [
    Idna2008Status::PValid,
    Idna2008Status::ContextJ,
    Idna2008Status::ContextO,
];

/// Classifies every codepoint of `store` and merges equal neighbours.
pub fn idna2008_runs(store: &PropertyStore, classifier: &Classifier) -> Vec<Run<Idna2008Status>> {
    let runs = ranges::compress_runs(
        store
            .codepoints()
            .map(|cp| (cp.codepoint(), classifier.classify(&cp))),
    );
    log::debug!("{} IDNA2008 runs up to {:04X}", runs.len(), store.max());
    runs
}

fn truncate(description: &str) -> String {
    if description.chars().count() <= DESCRIPTION_WIDTH {
        return description.to_owned();
    }
    let mut truncated = description
        .chars()
        .take(DESCRIPTION_WIDTH - 3)
        .collect::<String>();
    truncated.push_str("...");
    truncated
}

/// Writes the IANA-style table: one line per run of equal status.
pub fn write_iana_table<W: io::Write>(
    out: &mut W,
    store: &PropertyStore,
    runs: &[Run<Idna2008Status>],
) -> io::Result<()> {
    for run in runs {
        let Interval { start, end } = run.interval;
        let (range, description) = if run.interval.is_singleton() {
            (format!("{:04X}", start), store.get(start).name().to_owned())
        } else {
            (
                format!("{:04X}..{:04X}", start, end),
                format!("{}..{}", store.get(start).name(), store.get(end).name()),
            )
        };
        writeln!(
            out,
            "{:<15} {:<11} {}",
            range,
            run.payload,
            truncate(&description)
        )?;
    }
    Ok(())
}

fn span_literal(interval: &Interval) -> String {
    if interval.is_singleton() {
        format!("Point(0x{:X})", interval.start)
    } else {
        format!("Range(0x{:X}, 0x{:X})", interval.start, interval.end)
    }
}

/// Script ranges, joining types and per-status ranges for a label validator.
#[derive(Clone, Debug, Serialize)]
pub struct LibData {
    /// Unicode version the data was generated from.
    pub unicode_version: String,
    /// Ranges of each whitelisted script.
    pub scripts: IndexMap<&'static str, Vec<Interval>>,
    /// Joining type letter, as its code value, per codepoint.
    pub joining_types: BTreeMap<u32, u32>,
    /// Ranges of each listed IDNA2008 status.
    pub codepoint_classes: IndexMap<&'static str, Vec<Interval>>,
}

impl LibData {
    /// Gathers the library data from the store and the classified runs.
    pub fn build(
        store: &PropertyStore,
        version: UnicodeVersion,
        runs: &[Run<Idna2008Status>],
    ) -> Self {
        let scripts = tables::SCRIPT_WHITELIST
            .iter()
            .map(|&script| {
                (
                    script,
                    ranges::compress_set(store.script_codepoints(script)),
                )
            })
            .collect();
        let joining_types = store
            .codepoints()
            .filter_map(|cp| Some((cp.codepoint(), u32::from(cp.joining_type()?))))
            .collect();
        let codepoint_classes = LISTED_STATUSES
            .iter()
            .map(|status| (status.as_str(), ranges::intervals_of(runs, status)))
            .collect();
        LibData {
            unicode_version: version.to_string(),
            scripts,
            joining_types,
            codepoint_classes,
        }
    }

    /// Writes the data as a Rust module.
    pub fn write_rust<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", HEADER)?;
        writeln!(out)?;
        writeln!(
            out,
            "pub const UNICODE_VERSION: &str = {:?};",
            self.unicode_version
        )?;
        writeln!(out)?;
        writeln!(out, "#[derive(Clone, Copy, Debug, PartialEq, Eq)]")?;
        writeln!(out, "pub enum Span {{")?;
        writeln!(out, "    Point(u32),")?;
        writeln!(out, "    Range(u32, u32),")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        writeln!(out, "use self::Span::{{Point, Range}};")?;
        writeln!(out)?;
        write_span_table(out, "SCRIPTS", &self.scripts)?;
        writeln!(out)?;
        writeln!(out, "pub static JOINING_TYPES: &[(u32, u32)] = &[")?;
        for (cp, jt) in &self.joining_types {
            writeln!(out, "    (0x{:X}, {}),", cp, jt)?;
        }
        writeln!(out, "];")?;
        writeln!(out)?;
        write_span_table(out, "CODEPOINT_CLASSES", &self.codepoint_classes)
    }

    /// Writes the data as JSON.
    pub fn write_json<W: io::Write>(&self, out: &mut W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out).map_err(serde_json::Error::io)
    }
}

fn write_span_table<W: io::Write>(
    out: &mut W,
    name: &str,
    table: &IndexMap<&'static str, Vec<Interval>>,
) -> io::Result<()> {
    writeln!(out, "pub static {}: &[(&str, &[Span])] = &[", name)?;
    for (key, intervals) in table {
        writeln!(out, "    ({:?}, &[", key)?;
        for interval in intervals {
            writeln!(out, "        {},", span_literal(interval))?;
        }
        writeln!(out, "    ]),")?;
    }
    writeln!(out, "];")
}

/// The compacted UTS #46 rows, split into segments.
#[derive(Clone, Debug)]
pub struct Uts46Data {
    /// Unicode version the data was generated from.
    pub unicode_version: String,
    /// Rows in ascending codepoint order.
    pub rows: Vec<Uts46Row>,
    segment_size: usize,
}

#[derive(Serialize)]
struct Uts46DataJson<'a> {
    unicode_version: &'a str,
    segments: Vec<&'a [Uts46Row]>,
}

impl Uts46Data {
    /// Resolves and compacts the UTS #46 entries of every codepoint of `store`.
    ///
    /// A `segment_size` of zero is treated as one.
    pub fn build(store: &PropertyStore, version: UnicodeVersion, segment_size: usize) -> Self {
        let rows = uts46::rows(store.codepoints()).collect::<Vec<_>>();
        log::debug!("{} UTS46 rows", rows.len());
        Uts46Data {
            unicode_version: version.to_string(),
            rows,
            segment_size: segment_size.max(1),
        }
    }

    /// The rows, in consecutive segments of the configured size.
    pub fn segments(&self) -> impl Iterator<Item = &[Uts46Row]> {
        self.rows.chunks(self.segment_size)
    }

    /// Writes the data as a Rust module.
    pub fn write_rust<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", HEADER)?;
        writeln!(out)?;
        writeln!(
            out,
            "pub const UNICODE_VERSION: &str = {:?};",
            self.unicode_version
        )?;
        writeln!(out)?;
        writeln!(out, "pub type Row = (u32, char, Option<&'static str>);")?;
        let mut segment_count = 0;
        for (idx, segment) in self.segments().enumerate() {
            writeln!(out)?;
            writeln!(out, "const SEG_{}: &[Row] = &[", idx)?;
            for row in segment {
                match &row.entry.mapping {
                    Some(mapping) => writeln!(
                        out,
                        "    (0x{:X}, {:?}, Some({:?})),",
                        row.codepoint,
                        row.entry.status.code(),
                        mapping
                    )?,
                    None => writeln!(
                        out,
                        "    (0x{:X}, {:?}, None),",
                        row.codepoint,
                        row.entry.status.code()
                    )?,
                }
            }
            writeln!(out, "];")?;
            segment_count += 1;
        }
        writeln!(out)?;
        writeln!(out, "pub static UTS46DATA: &[&[Row]] = &[")?;
        for idx in 0..segment_count {
            writeln!(out, "    SEG_{},", idx)?;
        }
        writeln!(out, "];")
    }

    /// Writes the data as JSON, each row a 2- or 3-element array.
    pub fn write_json<W: io::Write>(&self, out: &mut W) -> serde_json::Result<()> {
        let json = Uts46DataJson {
            unicode_version: &self.unicode_version,
            segments: self.segments().collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out).map_err(serde_json::Error::io)
    }
}

#[cfg(test)]
mod tests {
    use super::{idna2008_runs, truncate, write_iana_table, LibData, Uts46Data};
    use crate::{
        idna2008::{Classifier, Idna2008Status},
        property_store::tests::sample_store,
        ranges::Interval,
        unicode_version::UnicodeVersion,
    };

    const VERSION: UnicodeVersion = UnicodeVersion::new(15, 1, 0);

    #[test]
    fn test_runs_are_dense_and_exhaustive() {
        let store = sample_store();
        let runs = idna2008_runs(&store, &Classifier::new());
        assert_eq!(0, runs[0].interval.start);
        assert_eq!(store.max(), runs.last().unwrap().interval.end);
        for pair in runs.windows(2) {
            assert_eq!(pair[0].interval.end + 1, pair[1].interval.start);
            assert_ne!(pair[0].payload, pair[1].payload);
        }
        let digits = runs
            .iter()
            .find(|run| run.interval.contains(0x30))
            .unwrap();
        assert_eq!(
            Interval {
                start: 0x30,
                end: 0x39
            },
            digits.interval
        );
        assert_eq!(Idna2008Status::PValid, digits.payload);
    }

    #[test]
    fn test_iana_table() {
        let store = sample_store();
        let runs = idna2008_runs(&store, &Classifier::new());
        let mut out = Vec::new();
        write_iana_table(&mut out, &store, &runs).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(runs.len(), lines.len());
        assert!(lines.contains(&"0030..0039      PVALID      DIGIT ZERO..DIGIT NINE"));
        assert!(lines.contains(&"00DF            PVALID      LATIN SMALL LETTER SHARP S"));
        assert!(lines.contains(&"200C..200D      CONTEXTJ    ZERO WIDTH NON-JOINER..ZERO WIDTH JOINER"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!("SHORT", truncate("SHORT"));
        let long = "X".repeat(60);
        let cut = truncate(&long);
        assert_eq!(50, cut.chars().count());
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_libdata() {
        let store = sample_store();
        let runs = idna2008_runs(&store, &Classifier::new());
        let data = LibData::build(&store, VERSION, &runs);
        assert_eq!(
            vec!["Greek", "Han", "Hebrew", "Hiragana", "Katakana"],
            data.scripts.keys().copied().collect::<Vec<_>>()
        );
        assert_eq!(
            vec![
                Interval::singleton(0x391),
                Interval {
                    start: 0x3B1,
                    end: 0x3B3
                }
            ],
            data.scripts["Greek"]
        );
        assert!(data.scripts["Hiragana"].is_empty());
        assert_eq!(Some(&u32::from('D')), data.joining_types.get(&0x620));
        assert_eq!(Some(&u32::from('T')), data.joining_types.get(&0x20D0));
        assert_eq!(
            vec!["PVALID", "CONTEXTJ", "CONTEXTO"],
            data.codepoint_classes.keys().copied().collect::<Vec<_>>()
        );
        assert_eq!(
            vec![Interval {
                start: 0x200C,
                end: 0x200D
            }],
            data.codepoint_classes["CONTEXTJ"]
        );
        assert!(data.codepoint_classes["PVALID"].contains(&Interval::singleton(0xDF)));

        let mut out = Vec::new();
        data.write_rust(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("pub const UNICODE_VERSION: &str = \"15.1.0\";"));
        assert!(text.contains("    (\"Greek\", &[\n        Point(0x391),\n        Range(0x3B1, 0x3B3),\n    ]),"));
        assert!(text.contains("    (0x620, 68),"));
        assert!(text.contains("        Range(0x30, 0x39),"));
    }

    #[test]
    fn test_libdata_json() {
        let store = sample_store();
        let runs = idna2008_runs(&store, &Classifier::new());
        let data = LibData::build(&store, VERSION, &runs);
        let mut out = Vec::new();
        data.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!("15.1.0", value["unicode_version"]);
        assert_eq!(
            serde_json::json!([[8204, 8205]]),
            value["codepoint_classes"]["CONTEXTJ"]
        );
        assert_eq!(serde_json::json!(68), value["joining_types"]["1568"]);
    }

    #[test]
    fn test_uts46data_segments() {
        let store = sample_store();
        let data = Uts46Data::build(&store, VERSION, 50);
        assert_eq!(0x7D + 5, data.rows.len());
        let sizes = data.segments().map(<[_]>::len).collect::<Vec<_>>();
        assert_eq!(vec![50, 50, 30], sizes);

        let mut out = Vec::new();
        data.write_rust(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("const SEG_2: &[Row] = &["));
        assert!(text.contains("    (0x41, 'M', Some(\"a\")),"));
        assert!(text.contains("    (0xDF, 'D', Some(\"ss\")),"));
        assert!(text.contains("    (0xA0, '3', Some(\" \")),"));
        assert!(text.contains("    (0x378, 'X', None),"));
        assert!(!text.contains("(0x379,"));
        assert!(text.ends_with("    SEG_0,\n    SEG_1,\n    SEG_2,\n];\n"));

        let mut out = Vec::new();
        data.write_json(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(3, value["segments"].as_array().unwrap().len());
        assert_eq!(serde_json::json!([65, "M", "a"]), value["segments"][1][15]);
        assert_eq!(serde_json::json!([0, "3"]), value["segments"][0][0]);
    }
}
