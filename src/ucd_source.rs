use crate::error::{Error, Result};
use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

/// The Unicode data files the property store is built from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UcdFile {
    /// `UnicodeData.txt`: names and general categories.
    UnicodeData,
    /// `PropList.txt`: binary properties.
    PropList,
    /// `DerivedCoreProperties.txt`: derived binary properties.
    DerivedCoreProperties,
    /// `Blocks.txt`: block names.
    Blocks,
    /// `CaseFolding.txt`: case folding substitutions.
    CaseFolding,
    /// `HangulSyllableType.txt`: Hangul syllable types.
    HangulSyllableType,
    /// Joining types, either `extracted/DerivedJoiningType.txt` or `ArabicShaping.txt`.
    JoiningType,
    /// `Scripts.txt`: script membership.
    Scripts,
    /// `IdnaMappingTable.txt`: the UTS46 mapping table.
    IdnaMappingTable,
}

impl UcdFile {
    /// Every file, in load order.
    pub const ALL: [UcdFile; 9] = [
        UcdFile::UnicodeData,
        UcdFile::PropList,
        UcdFile::DerivedCoreProperties,
        UcdFile::Blocks,
        UcdFile::CaseFolding,
        UcdFile::HangulSyllableType,
        UcdFile::JoiningType,
        UcdFile::Scripts,
        UcdFile::IdnaMappingTable,
    ];

    /// Candidate paths relative to the data directory, most preferred first.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            UcdFile::UnicodeData => &["UnicodeData.txt"],
            UcdFile::PropList => &["PropList.txt"],
            UcdFile::DerivedCoreProperties => &["DerivedCoreProperties.txt"],
            UcdFile::Blocks => &["Blocks.txt"],
            UcdFile::CaseFolding => &["CaseFolding.txt"],
            UcdFile::HangulSyllableType => &["HangulSyllableType.txt"],
            UcdFile::JoiningType => &["extracted/DerivedJoiningType.txt", "ArabicShaping.txt"],
            UcdFile::Scripts => &["Scripts.txt"],
            UcdFile::IdnaMappingTable => &["IdnaMappingTable.txt"],
        }
    }
}

impl fmt::Display for UcdFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.candidates()[0])
    }
}

/// Something that can produce the text of a Unicode data file.
pub trait UcdSource {
    /// Returns the full contents of `file`.
    fn read(&self, file: UcdFile) -> Result<String>;
}

/// Reads data files from a local directory laid out like `Public/<version>/ucd`,
/// with `IdnaMappingTable.txt` placed alongside.
#[derive(Clone, Debug)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    /// Creates a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectorySource { root: root.into() }
    }

    /// The directory files are read from.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl UcdSource for DirectorySource {
    fn read(&self, file: UcdFile) -> Result<String> {
        for candidate in file.candidates() {
            let path = self.root.join(candidate);
            match fs::read_to_string(&path) {
                Ok(text) => {
                    log::debug!("read {} ({} bytes)", path.display(), text.len());
                    return Ok(text);
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(source) => return Err(Error::Io { path, source }),
            }
        }
        Err(Error::MissingFile(self.root.join(file.candidates()[0])))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::{UcdFile, UcdSource};
    use crate::error::{Error, Result};
    use std::collections::HashMap;

    /// An in-memory source; files not registered are reported missing.
    #[derive(Debug, Default)]
    pub(crate) struct MemorySource(HashMap<UcdFile, String>);

    impl MemorySource {
        pub(crate) fn with(mut self, file: UcdFile, text: &str) -> Self {
            self.0.insert(file, text.to_owned());
            self
        }
    }

    impl UcdSource for MemorySource {
        fn read(&self, file: UcdFile) -> Result<String> {
            self.0
                .get(&file)
                .cloned()
                .ok_or_else(|| Error::MissingFile(file.to_string().into()))
        }
    }

    pub(crate) const UNICODE_DATA: &str = "\
0020;SPACE;Zs;0;WS;;;;;N;;;;;
002D;HYPHEN-MINUS;Pd;0;ES;;;;;N;;;;;
0030;DIGIT ZERO;Nd;0;EN;;0;0;0;N;;;;;
0031;DIGIT ONE;Nd;0;EN;;1;1;1;N;;;;;
0032;DIGIT TWO;Nd;0;EN;;2;2;2;N;;;;;
0033;DIGIT THREE;Nd;0;EN;;3;3;3;N;;;;;
0034;DIGIT FOUR;Nd;0;EN;;4;4;4;N;;;;;
0035;DIGIT FIVE;Nd;0;EN;;5;5;5;N;;;;;
0036;DIGIT SIX;Nd;0;EN;;6;6;6;N;;;;;
0037;DIGIT SEVEN;Nd;0;EN;;7;7;7;N;;;;;
0038;DIGIT EIGHT;Nd;0;EN;;8;8;8;N;;;;;
0039;DIGIT NINE;Nd;0;EN;;9;9;9;N;;;;;
0041;LATIN CAPITAL LETTER A;Lu;0;L;;;;;N;;;;0061;
0042;LATIN CAPITAL LETTER B;Lu;0;L;;;;;N;;;;0062;
0061;LATIN SMALL LETTER A;Ll;0;L;;;;;N;;;0041;;0041
0062;LATIN SMALL LETTER B;Ll;0;L;;;;;N;;;0042;;0042
0063;LATIN SMALL LETTER C;Ll;0;L;;;;;N;;;0043;;0043
00B7;MIDDLE DOT;Po;0;ON;;;;;N;;;;;
00DF;LATIN SMALL LETTER SHARP S;Ll;0;L;;;;;N;;;;;
00E9;LATIN SMALL LETTER E WITH ACUTE;Ll;0;L;0065 0301;;;;N;LATIN SMALL LETTER E ACUTE;;00C9;;00C9
0391;GREEK CAPITAL LETTER ALPHA;Lu;0;L;;;;;N;;;;03B1;
03B1;GREEK SMALL LETTER ALPHA;Ll;0;L;;;;;N;;;0391;;0391
03B2;GREEK SMALL LETTER BETA;Ll;0;L;;;;;N;;;0392;;0392
03B3;GREEK SMALL LETTER GAMMA;Ll;0;L;;;;;N;;;0393;;0393
05D0;HEBREW LETTER ALEF;Lo;0;R;;;;;N;;;;;
0620;ARABIC LETTER KASHMIRI YEH;Lo;0;AL;;;;;N;;;;;
0640;ARABIC TATWEEL;Lm;0;AL;;;;;N;;;;;
0660;ARABIC-INDIC DIGIT ZERO;Nd;0;AN;;0;0;0;N;;;;;
1100;HANGUL CHOSEONG KIYEOK;Lo;0;L;;;;;N;;;;;
200C;ZERO WIDTH NON-JOINER;Cf;0;BN;;;;;N;;;;;
200D;ZERO WIDTH JOINER;Cf;0;BN;;;;;N;;;;;
20D0;COMBINING LEFT HARPOON ABOVE;Mn;230;NSM;;;;;N;NON-SPACING LEFT HARPOON ABOVE;;;;
2160;ROMAN NUMERAL ONE;Nl;0;L;<compat> 0049;;;1;N;;;;2170;
3007;IDEOGRAPHIC NUMBER ZERO;Nl;0;L;;;;0;N;;;;;
4E00;<CJK Ideograph, First>;Lo;0;L;;;;;N;;;;;
4E02;<CJK Ideograph, Last>;Lo;0;L;;;;;N;;;;;
AC00;<Hangul Syllable, First>;Lo;0;L;;;;;N;;;;;
AC01;<Hangul Syllable, Last>;Lo;0;L;;;;;N;;;;;
not a record at all
";

    pub(crate) const PROP_LIST: &str = "\
# PropList fixture
0020          ; White_Space # Zs       SPACE
200C..200D    ; Join_Control # Cf   [2] ZERO WIDTH NON-JOINER..ZERO WIDTH JOINER
FDD0..FDD1    ; Noncharacter_Code_Point # Cn  [2] <noncharacter-FDD0>..<noncharacter-FDD1>
";

    pub(crate) const DERIVED_CORE_PROPERTIES: &str = "\
200C..200D    ; Default_Ignorable_Code_Point # Cf   [2] ZERO WIDTH NON-JOINER..ZERO WIDTH JOINER
0041..0042    ; Uppercase # L&   [2] LATIN CAPITAL LETTER A..LATIN CAPITAL LETTER B
";

    pub(crate) const BLOCKS: &str = "\
# Blocks fixture
0000..007F; Basic Latin
0080..00FF; Latin-1 Supplement
0370..03FF; Greek and Coptic
0590..05FF; Hebrew
0600..06FF; Arabic
1100..11FF; Hangul Jamo
2000..206F; General Punctuation
20D0..20FF; Combining Diacritical Marks for Symbols
2150..218F; Number Forms
3000..303F; CJK Symbols and Punctuation
4E00..4E0F; CJK Unified Ideographs
AC00..AC0F; Hangul Syllables
FDD0..FDEF; Arabic Presentation Forms-A
";

    pub(crate) const CASE_FOLDING: &str = "\
0041; C; 0061; # LATIN CAPITAL LETTER A
0042; C; 0062; # LATIN CAPITAL LETTER B
0049; C; 0069; # LATIN CAPITAL LETTER I
0391; C; 03B1; # GREEK CAPITAL LETTER ALPHA
00DF; F; 0073 0073; # LATIN SMALL LETTER SHARP S
1E9E; S; 00DF; # LATIN CAPITAL LETTER SHARP S
";

    pub(crate) const HANGUL_SYLLABLE_TYPE: &str = "\
1100          ; L # Lo       HANGUL CHOSEONG KIYEOK
AC00          ; LV # Lo       HANGUL SYLLABLE GA
AC01          ; LVT # Lo       HANGUL SYLLABLE GAG
";

    pub(crate) const DERIVED_JOINING_TYPE: &str = "\
0620          ; D # Lo       ARABIC LETTER KASHMIRI YEH
0640          ; C # Lm       ARABIC TATWEEL
200D          ; C # Cf       ZERO WIDTH JOINER
20D0          ; T # Mn       COMBINING LEFT HARPOON ABOVE
";

    pub(crate) const SCRIPTS: &str = "\
0041..0042    ; Latin # L&   [2] LATIN CAPITAL LETTER A..LATIN CAPITAL LETTER B
0061..0063    ; Latin # L&   [3] LATIN SMALL LETTER A..LATIN SMALL LETTER C
0391          ; Greek # L&       GREEK CAPITAL LETTER ALPHA
03B1..03B3    ; Greek # L&   [3] GREEK SMALL LETTER ALPHA..GREEK SMALL LETTER GAMMA
05D0          ; Hebrew # Lo       HEBREW LETTER ALEF
4E00..4E02    ; Han # Lo   [3] CJK UNIFIED IDEOGRAPH-4E00..CJK UNIFIED IDEOGRAPH-4E02
3007          ; Han # Nl       IDEOGRAPHIC NUMBER ZERO
";

    pub(crate) const IDNA_MAPPING_TABLE: &str = "\
0000..002C    ; disallowed_STD3_valid                  # 1.1  <control-0000>..COMMA
002D..002E    ; valid                                  # 1.1  HYPHEN-MINUS..FULL STOP
002F          ; disallowed_STD3_valid                  # 1.1  SOLIDUS
0030..0039    ; valid                                  # 1.1  DIGIT ZERO..DIGIT NINE
003A..0040    ; disallowed_STD3_valid                  # 1.1  COLON..COMMERCIAL AT
0041          ; mapped                 ; 0061          # 1.1  LATIN CAPITAL LETTER A
0042          ; mapped                 ; 0062          # 1.1  LATIN CAPITAL LETTER B
0043..0060    ; disallowed_STD3_valid                  # 1.1  fixture filler
0061..007A    ; valid                                  # 1.1  LATIN SMALL LETTER A..LATIN SMALL LETTER Z
00A0          ; disallowed_STD3_mapped ; 0020          # 1.1  NO-BREAK SPACE
00AD          ; ignored                                # 1.1  SOFT HYPHEN
00DF          ; deviation              ; 0073 0073     # 1.1  LATIN SMALL LETTER SHARP S
0378..0379    ; disallowed                             # NA   <reserved-0378>..<reserved-0379>
200C..200D    ; deviation              ;               # 1.1  ZERO WIDTH NON-JOINER..ZERO WIDTH JOINER
2160          ; mapped                 ; 0069          # 1.1  ROMAN NUMERAL ONE
FDD0..FDD1    ; disallowed                             # 3.1  <noncharacter-FDD0>..<noncharacter-FDD1>
FE00          ; frobnicated                            # fixture: unknown status
";

    /// Every fixture file, joining types in the derived format.
    pub(crate) fn sample_source() -> MemorySource {
        MemorySource::default()
            .with(UcdFile::UnicodeData, UNICODE_DATA)
            .with(UcdFile::PropList, PROP_LIST)
            .with(UcdFile::DerivedCoreProperties, DERIVED_CORE_PROPERTIES)
            .with(UcdFile::Blocks, BLOCKS)
            .with(UcdFile::CaseFolding, CASE_FOLDING)
            .with(UcdFile::HangulSyllableType, HANGUL_SYLLABLE_TYPE)
            .with(UcdFile::JoiningType, DERIVED_JOINING_TYPE)
            .with(UcdFile::Scripts, SCRIPTS)
            .with(UcdFile::IdnaMappingTable, IDNA_MAPPING_TABLE)
    }
}
