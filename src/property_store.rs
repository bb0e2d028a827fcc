use crate::{
    error::Result,
    range_map::RangeMap,
    ucd_source::{UcdFile, UcdSource},
};
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    iter::FusedIterator,
};

pub(crate) type CharVec = SmallVec<[char; 4]>;

/// `XXXX` or `XXXX..YYYY`, a `;`, one value, an optional comment.
static RANGE_VALUE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<start>[0-9A-F]{4,6})(?:\.\.(?P<end>[0-9A-F]{4,6}))?\s*;\s*(?P<value>[^#;]*?)\s*(?:#.*)?$",
    )
    .unwrap()
});

static CASE_FOLDING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<cp>[0-9A-F]{4,6})\s*;\s*(?P<status>\S+)\s*;\s*(?P<subst>[0-9A-F ]+?)\s*;")
        .unwrap()
});

static ARABIC_SHAPING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<cp>[0-9A-F]{4,6})\s*;[^;]*;\s*(?P<jt>\S+)\s*;").unwrap()
});

static IDNA_MAPPING_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<start>[0-9A-F]{4,6})(?:\.\.(?P<end>[0-9A-F]{4,6}))?\s*;\s*(?P<fields>[^#]+)")
        .unwrap()
});

static UNICODE_DATA_RANGE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(?P<name>.*?), (?P<marker>First|Last)>$").unwrap());

fn hex(s: &str) -> Option<u32> {
    u32::from_str_radix(s, 16).ok()
}

/// Parses a line of the common `start[..end] ; value # comment` shape.
fn range_value_line(line: &str) -> Option<(u32, u32, &str)> {
    let caps = RANGE_VALUE_LINE.captures(line)?;
    let start = hex(caps.name("start")?.as_str())?;
    let end = match caps.name("end") {
        Some(end) => hex(end.as_str())?,
        None => start,
    };
    let value = caps.name("value")?.as_str();
    if value.is_empty() {
        return None;
    }
    Some((start, end, value))
}

/// Hangul syllable type of a codepoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HangulSyllableType {
    /// Leading consonant jamo.
    L,
    /// Vowel jamo.
    V,
    /// Trailing consonant jamo.
    T,
    /// Precomposed leading consonant and vowel syllable.
    LV,
    /// Precomposed leading consonant, vowel and trailing consonant syllable.
    LVT,
}

impl HangulSyllableType {
    fn from_code(code: &str) -> Option<Self> {
        Some(match code {
            "L" => HangulSyllableType::L,
            "V" => HangulSyllableType::V,
            "T" => HangulSyllableType::T,
            "LV" => HangulSyllableType::LV,
            "LVT" => HangulSyllableType::LVT,
            _ => return None,
        })
    }

    /// Returns `true` for the conjoining jamo types `L`, `V` and `T`.
    pub fn is_jamo(self) -> bool {
        matches!(
            self,
            HangulSyllableType::L | HangulSyllableType::V | HangulSyllableType::T
        )
    }
}

/// The raw fields of an `IdnaMappingTable.txt` entry, before interpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Uts46Fields {
    /// The status tag, such as `mapped` or `disallowed_STD3_valid`.
    pub status: String,
    /// The mapping column as written: space separated hexadecimal codepoints.
    /// `Some("")` when the column is present but empty.
    pub mapping: Option<String>,
}

#[derive(Debug)]
struct UnicodeDataRecord {
    name: String,
    general_category: String,
}

/// Immutable per-codepoint Unicode properties for one Unicode version.
pub struct PropertyStore {
    unicode_data: RangeMap<UnicodeDataRecord>,
    properties: BTreeMap<String, RangeMap<()>>,
    blocks: RangeMap<String>,
    case_folding: HashMap<u32, CharVec>,
    hangul_syllable_types: RangeMap<HangulSyllableType>,
    joining_types: RangeMap<char>,
    scripts: RangeMap<String>,
    uts46: RangeMap<Uts46Fields>,
    max: u32,
}

impl fmt::Debug for PropertyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyStore")
            .field("unicode_data", &self.unicode_data)
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("blocks", &self.blocks)
            .field("case_folding", &self.case_folding.len())
            .field("scripts", &self.scripts)
            .field("uts46", &self.uts46)
            .field("max", &format_args!("{:04X}", self.max))
            .finish()
    }
}

impl PropertyStore {
    /// Reads and parses every data file from `source`.
    ///
    /// Lines that do not have the expected shape are skipped; only a file
    /// that cannot be read at all is an error.
    pub fn load<S: UcdSource + ?Sized>(source: &S) -> Result<Self> {
        let mut store = PropertyStore {
            unicode_data: RangeMap::default(),
            properties: BTreeMap::new(),
            blocks: RangeMap::default(),
            case_folding: HashMap::new(),
            hangul_syllable_types: RangeMap::default(),
            joining_types: RangeMap::default(),
            scripts: RangeMap::default(),
            uts46: RangeMap::default(),
            max: 0,
        };
        for file in UcdFile::ALL {
            log::info!("loading {}", file);
            let text = source.read(file)?;
            match file {
                UcdFile::UnicodeData => store.load_unicode_data(&text),
                UcdFile::PropList | UcdFile::DerivedCoreProperties => store.load_properties(&text),
                UcdFile::Blocks => store.load_blocks(&text),
                UcdFile::CaseFolding => store.load_case_folding(&text),
                UcdFile::HangulSyllableType => store.load_hangul_syllable_types(&text),
                UcdFile::JoiningType => store.load_joining_types(&text),
                UcdFile::Scripts => store.load_scripts(&text),
                UcdFile::IdnaMappingTable => store.load_idna_mapping_table(&text),
            }
        }
        store.unicode_data.finish();
        store.properties.values_mut().for_each(RangeMap::finish);
        store.blocks.finish();
        store.hangul_syllable_types.finish();
        store.joining_types.finish();
        store.scripts.finish();
        store.uts46.finish();
        store.max = store.blocks.max().unwrap_or(0);
        log::debug!(
            "loaded {} UnicodeData ranges, {} properties, {} blocks, max {:04X}",
            store.unicode_data.len(),
            store.properties.len(),
            store.blocks.len(),
            store.max
        );
        Ok(store)
    }

    fn load_unicode_data(&mut self, text: &str) {
        let mut range_start: Option<u32> = None;
        for line in text.lines() {
            let fields = line.split(';').collect::<SmallVec<[&str; 16]>>();
            let (cp, name, general_category) = match fields[..] {
                [cp, name, gc, ..] => match hex(cp) {
                    Some(cp) => (cp, name, gc),
                    None => continue,
                },
                _ => continue,
            };
            let record = |name: &str| UnicodeDataRecord {
                name: name.to_owned(),
                general_category: general_category.to_owned(),
            };
            match UNICODE_DATA_RANGE_NAME.captures(name) {
                Some(caps) if &caps["marker"] == "First" => {
                    range_start = Some(cp);
                }
                Some(caps) => {
                    if let Some(start) = range_start.take() {
                        let name = format!("<{}>", &caps["name"]);
                        self.unicode_data.insert(start, cp, record(&name));
                    }
                }
                None => self.unicode_data.insert(cp, cp, record(name)),
            }
        }
    }

    fn load_properties(&mut self, text: &str) {
        for (start, end, prop) in text.lines().filter_map(range_value_line) {
            self.properties
                .entry(prop.to_owned())
                .or_default()
                .insert(start, end, ());
        }
    }

    fn load_blocks(&mut self, text: &str) {
        for (start, end, block) in text.lines().filter_map(range_value_line) {
            self.blocks.insert(start, end, block.to_owned());
        }
    }

    fn load_case_folding(&mut self, text: &str) {
        for caps in text.lines().filter_map(|line| CASE_FOLDING_LINE.captures(line)) {
            if !matches!(&caps["status"], "C" | "F") {
                continue;
            }
            let cp = match hex(&caps["cp"]) {
                Some(cp) => cp,
                None => continue,
            };
            let subst = caps["subst"]
                .split_whitespace()
                .map(|h| hex(h).and_then(char::from_u32))
                .collect::<Option<CharVec>>();
            if let Some(subst) = subst {
                self.case_folding.insert(cp, subst);
            }
        }
    }

    fn load_hangul_syllable_types(&mut self, text: &str) {
        for (start, end, code) in text.lines().filter_map(range_value_line) {
            if let Some(hst) = HangulSyllableType::from_code(code) {
                self.hangul_syllable_types.insert(start, end, hst);
            }
        }
    }

    /// Accepts either `DerivedJoiningType.txt` or `ArabicShaping.txt` lines.
    fn load_joining_types(&mut self, text: &str) {
        for line in text.lines() {
            let (start, end, code) = if let Some(caps) = ARABIC_SHAPING_LINE.captures(line) {
                match (hex(&caps["cp"]), caps.name("jt")) {
                    (Some(cp), Some(jt)) => (cp, cp, jt.as_str()),
                    _ => continue,
                }
            } else if let Some(parsed) = range_value_line(line) {
                parsed
            } else {
                continue;
            };
            let mut chars = code.chars();
            if let (Some(jt), None) = (chars.next(), chars.next()) {
                self.joining_types.insert(start, end, jt);
            }
        }
    }

    fn load_scripts(&mut self, text: &str) {
        for (start, end, script) in text.lines().filter_map(range_value_line) {
            self.scripts.insert(start, end, script.to_owned());
        }
    }

    fn load_idna_mapping_table(&mut self, text: &str) {
        for caps in text.lines().filter_map(|line| IDNA_MAPPING_LINE.captures(line)) {
            let start = match hex(&caps["start"]) {
                Some(start) => start,
                None => continue,
            };
            let end = match caps.name("end") {
                Some(end) => match hex(end.as_str()) {
                    Some(end) => end,
                    None => continue,
                },
                None => start,
            };
            let mut fields = caps["fields"].split(';').map(str::trim);
            let status = match fields.next() {
                Some(status) if !status.is_empty() => status.to_owned(),
                _ => continue,
            };
            let mapping = fields.next().map(str::to_owned);
            self.uts46.insert(start, end, Uts46Fields { status, mapping });
        }
    }

    /// The highest codepoint covered by a block; the codepoint sequence ends here.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// The properties of a single codepoint.
    pub fn get(&self, codepoint: u32) -> CodepointProperties<'_> {
        CodepointProperties {
            codepoint,
            store: self,
        }
    }

    /// Every codepoint in `0..=max`, in ascending order.
    ///
    /// Each call starts a new pass over the full range.
    pub fn codepoints(&self) -> Codepoints<'_> {
        Codepoints {
            store: self,
            range: 0..self.max + 1,
        }
    }

    /// The codepoints assigned to `script` by `Scripts.txt`, in ascending order.
    pub fn script_codepoints(&self, script: &str) -> Vec<u32> {
        self.scripts
            .iter()
            .filter(|&(_, _, name)| name == script)
            .flat_map(|(start, end, _)| start..=end)
            .collect()
    }
}

/// The Unicode properties of one codepoint, borrowed from a [`PropertyStore`].
#[derive(Copy, Clone)]
pub struct CodepointProperties<'a> {
    codepoint: u32,
    store: &'a PropertyStore,
}

impl<'a> CodepointProperties<'a> {
    /// The codepoint value.
    pub fn codepoint(&self) -> u32 {
        self.codepoint
    }

    /// The codepoint as a `char`, or `None` for surrogates.
    pub fn to_char(&self) -> Option<char> {
        char::from_u32(self.codepoint)
    }

    fn record(&self) -> Option<&'a UnicodeDataRecord> {
        self.store.unicode_data.get(self.codepoint)
    }

    /// Returns `true` if the codepoint has an entry in `UnicodeData.txt`.
    pub fn has_unicode_data(&self) -> bool {
        self.record().is_some()
    }

    /// The character name, `<noncharacter>` or `<unassigned>`.
    pub fn name(&self) -> &'a str {
        if let Some(record) = self.record() {
            &record.name
        } else if self.has_property("Noncharacter_Code_Point") {
            "<noncharacter>"
        } else {
            "<unassigned>"
        }
    }

    /// The two letter general category, if the codepoint is in `UnicodeData.txt`.
    pub fn general_category(&self) -> Option<&'a str> {
        self.record().map(|record| record.general_category.as_str())
    }

    /// Returns `true` if the codepoint carries the binary property `name`.
    pub fn has_property(&self, name: &str) -> bool {
        self.store
            .properties
            .get(name)
            .map_or(false, |map| map.contains(self.codepoint))
    }

    /// Every binary property the codepoint carries, by name.
    pub fn properties(&self) -> Vec<&'a str> {
        self.store
            .properties
            .iter()
            .filter(|(_, map)| map.contains(self.codepoint))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// The name of the block containing the codepoint.
    pub fn block(&self) -> Option<&'a str> {
        self.store.blocks.get(self.codepoint).map(String::as_str)
    }

    /// The full case folding of the codepoint, if it differs from the codepoint.
    pub fn case_folding(&self) -> Option<&'a [char]> {
        self.store
            .case_folding
            .get(&self.codepoint)
            .map(|subst| &subst[..])
    }

    /// The Hangul syllable type of the codepoint.
    pub fn hangul_syllable_type(&self) -> Option<HangulSyllableType> {
        self.store
            .hangul_syllable_types
            .get(self.codepoint)
            .copied()
    }

    /// The single letter joining type code, such as `D` or `T`.
    pub fn joining_type(&self) -> Option<char> {
        self.store.joining_types.get(self.codepoint).copied()
    }

    /// The script of the codepoint according to `Scripts.txt`.
    pub fn script(&self) -> Option<&'a str> {
        self.store.scripts.get(self.codepoint).map(String::as_str)
    }

    /// Returns `true` if the codepoint belongs to `script`.
    pub fn in_script(&self, script: &str) -> bool {
        self.script() == Some(script)
    }

    /// The raw `IdnaMappingTable.txt` fields for the codepoint.
    pub fn uts46_fields(&self) -> Option<&'a Uts46Fields> {
        self.store.uts46.get(self.codepoint)
    }

    /// Applies full case folding to each char of `s`.
    pub(crate) fn case_fold(&self, s: impl IntoIterator<Item = char>) -> String {
        let mut folded = String::new();
        for ch in s {
            match self.store.case_folding.get(&(ch as u32)) {
                Some(subst) => folded.extend(subst.iter()),
                None => folded.push(ch),
            }
        }
        folded
    }
}

impl fmt::Debug for CodepointProperties<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodepointProperties(U+{:04X})", self.codepoint)
    }
}

/// An ascending iterator over every codepoint of a [`PropertyStore`].
#[derive(Clone)]
pub struct Codepoints<'a> {
    store: &'a PropertyStore,
    range: std::ops::Range<u32>,
}

impl<'a> Iterator for Codepoints<'a> {
    type Item = CodepointProperties<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let codepoint = self.range.next()?;
        Some(self.store.get(codepoint))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for Codepoints<'_> {}

impl FusedIterator for Codepoints<'_> {}

impl fmt::Debug for Codepoints<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Codepoints({:04X}..{:04X})", self.range.start, self.range.end)
    }
}
