//! The IDNA2008 derived property of RFC 5892.
//!
//! A codepoint's status is decided by the first rule of [`Rule::CASCADE`]
//! that applies to it. The order matters: for example `U+00DF` is a
//! lowercase letter that is unstable under case folding, and only the
//! exceptions table, consulted first, keeps it `PVALID`.

use crate::{
    property_store::CodepointProperties,
    tables,
    uts46::{self, Uts46Entry},
};
use std::{collections::BTreeMap, fmt, iter};
use unicode_normalization::UnicodeNormalization;

/// The IDNA2008 derived property value of a codepoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Idna2008Status {
    /// Permitted in labels.
    PValid,
    /// Permitted only in specific joining contexts.
    ContextJ,
    /// Permitted only in specific contexts other than joining.
    ContextO,
    /// Never permitted.
    Disallowed,
    /// Not assigned in the Unicode version in use.
    Unassigned,
}

impl Idna2008Status {
    /// Every status, in table order.
    pub const ALL: [Idna2008Status; 5] = [
        Idna2008Status::PValid,
        Idna2008Status::ContextJ,
        Idna2008Status::ContextO,
        Idna2008Status::Disallowed,
        Idna2008Status::Unassigned,
    ];

    /// The status as spelled in RFC 5892 and the IANA tables.
    pub fn as_str(self) -> &'static str {
        match self {
            Idna2008Status::PValid => "PVALID",
            Idna2008Status::ContextJ => "CONTEXTJ",
            Idna2008Status::ContextO => "CONTEXTO",
            Idna2008Status::Disallowed => "DISALLOWED",
            Idna2008Status::Unassigned => "UNASSIGNED",
        }
    }
}

impl fmt::Display for Idna2008Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One step of the classification cascade.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    /// Listed in the exceptions table.
    Exceptions,
    /// Listed in the backward-compatible table.
    BackwardCompatible,
    /// Neither in `UnicodeData.txt` nor a noncharacter.
    Unassigned,
    /// ASCII lowercase letter, digit or hyphen.
    Ldh,
    /// Has the `Join_Control` property.
    JoinControl,
    /// Changed by NFKC, case folding, NFKC.
    Unstable,
    /// Default ignorable, white space or noncharacter.
    IgnorableProperties,
    /// In a block of symbols that are not used in words.
    IgnorableBlocks,
    /// A conjoining Hangul jamo.
    OldHangulJamo,
    /// A letter, digit or combining mark.
    LetterDigits,
    /// Anything left.
    Other,
}

impl Rule {
    /// The rules in the order they are evaluated.
    pub const CASCADE: [Rule; 11] = [
        Rule::Exceptions,
        Rule::BackwardCompatible,
        Rule::Unassigned,
        Rule::Ldh,
        Rule::JoinControl,
        Rule::Unstable,
        Rule::IgnorableProperties,
        Rule::IgnorableBlocks,
        Rule::OldHangulJamo,
        Rule::LetterDigits,
        Rule::Other,
    ];

    /// The category letter RFC 5892 section 2 gives this rule.
    pub fn rfc5892_category(self) -> Option<char> {
        Some(match self {
            Rule::LetterDigits => 'A',
            Rule::Unstable => 'B',
            Rule::IgnorableProperties => 'C',
            Rule::IgnorableBlocks => 'D',
            Rule::Ldh => 'E',
            Rule::Exceptions => 'F',
            Rule::BackwardCompatible => 'G',
            Rule::JoinControl => 'H',
            Rule::OldHangulJamo => 'I',
            Rule::Unassigned => 'J',
            Rule::Other => return None,
        })
    }

    /// A short human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Rule::Exceptions => "Exceptions",
            Rule::BackwardCompatible => "BackwardCompatible",
            Rule::Unassigned => "Unassigned",
            Rule::Ldh => "LDH",
            Rule::JoinControl => "JoinControl",
            Rule::Unstable => "Unstable",
            Rule::IgnorableProperties => "IgnorableProperties",
            Rule::IgnorableBlocks => "IgnorableBlocks",
            Rule::OldHangulJamo => "OldHangulJamo",
            Rule::LetterDigits => "LetterDigits",
            Rule::Other => "Other",
        }
    }
}

/// Applies NFKC, full case folding and NFKC again to the codepoint's character.
///
/// Returns `None` for surrogates, which have no character to normalize.
pub fn nfkc_casefold(cp: &CodepointProperties<'_>) -> Option<String> {
    let ch = cp.to_char()?;
    let folded = cp.case_fold(iter::once(ch).nfkc());
    Some(folded.chars().nfkc().collect())
}

/// Returns `true` if [`nfkc_casefold`] changes the codepoint's character.
pub fn is_unstable(cp: &CodepointProperties<'_>) -> bool {
    match (cp.to_char(), nfkc_casefold(cp)) {
        (Some(ch), Some(transformed)) => !transformed.chars().eq(iter::once(ch)),
        _ => false,
    }
}

fn is_ldh(codepoint: u32) -> bool {
    matches!(codepoint, 0x2D | 0x30..=0x39 | 0x61..=0x7A)
}

/// Assigns IDNA2008 statuses.
///
/// The two override tables are fixed at construction.
#[derive(Clone, Debug)]
pub struct Classifier {
    exceptions: BTreeMap<u32, Idna2008Status>,
    backward_compatible: BTreeMap<u32, Idna2008Status>,
}

impl Default for Classifier {
    fn default() -> Self {
        Classifier::new()
    }
}

impl Classifier {
    /// A classifier using the tables of RFC 5892.
    pub fn new() -> Self {
        Classifier::with_overrides(tables::EXCEPTIONS, tables::BACKWARD_COMPATIBLE)
    }

    /// A classifier with custom exception and backward-compatible tables.
    pub fn with_overrides(
        exceptions: &[(u32, Idna2008Status)],
        backward_compatible: &[(u32, Idna2008Status)],
    ) -> Self {
        Classifier {
            exceptions: exceptions.iter().copied().collect(),
            backward_compatible: backward_compatible.iter().copied().collect(),
        }
    }

    /// Evaluates a single rule, returning its status if it applies.
    pub fn check(&self, rule: Rule, cp: &CodepointProperties<'_>) -> Option<Idna2008Status> {
        use Idna2008Status::*;

        let applies = match rule {
            Rule::Exceptions => return self.exceptions.get(&cp.codepoint()).copied(),
            Rule::BackwardCompatible => {
                return self.backward_compatible.get(&cp.codepoint()).copied()
            }
            Rule::Unassigned => {
                !cp.has_unicode_data() && !cp.has_property("Noncharacter_Code_Point")
            }
            Rule::Ldh => is_ldh(cp.codepoint()),
            Rule::JoinControl => cp.has_property("Join_Control"),
            Rule::Unstable => is_unstable(cp),
            Rule::IgnorableProperties => tables::IGNORABLE_PROPERTIES
                .iter()
                .any(|prop| cp.has_property(prop)),
            Rule::IgnorableBlocks => cp
                .block()
                .map_or(false, |block| tables::IGNORABLE_BLOCKS.contains(&block)),
            Rule::OldHangulJamo => cp.hangul_syllable_type().map_or(false, |hst| hst.is_jamo()),
            Rule::LetterDigits => cp
                .general_category()
                .map_or(false, |gc| tables::LETTER_DIGIT_CATEGORIES.contains(&gc)),
            Rule::Other => true,
        };
        if !applies {
            return None;
        }
        Some(match rule {
            Rule::Unassigned => Unassigned,
            Rule::Ldh | Rule::LetterDigits => PValid,
            Rule::JoinControl => ContextJ,
            _ => Disallowed,
        })
    }

    /// The status of the codepoint and the rule that decided it.
    pub fn classify_with_rule(&self, cp: &CodepointProperties<'_>) -> (Rule, Idna2008Status) {
        Rule::CASCADE
            .iter()
            .find_map(|&rule| self.check(rule, cp).map(|status| (rule, status)))
            .unwrap_or((Rule::Other, Idna2008Status::Disallowed))
    }

    /// The IDNA2008 status of the codepoint.
    pub fn classify(&self, cp: &CodepointProperties<'_>) -> Idna2008Status {
        self.classify_with_rule(cp).1
    }

    /// Evaluates every rule for the codepoint, for troubleshooting.
    pub fn diagnose(&self, cp: &CodepointProperties<'_>) -> Diagnosis {
        let (decided_by, status) = self.classify_with_rule(cp);
        Diagnosis {
            codepoint: cp.codepoint(),
            name: cp.name().to_owned(),
            general_category: cp.general_category().map(str::to_owned),
            block: cp.block().map(str::to_owned),
            properties: cp.properties().into_iter().map(str::to_owned).collect(),
            nfkc_casefold: nfkc_casefold(cp),
            steps: Rule::CASCADE
                .iter()
                .map(|&rule| (rule, self.check(rule, cp)))
                .collect(),
            decided_by,
            status,
            uts46: uts46::resolve(cp),
        }
    }
}

/// Every rule's outcome for one codepoint.
#[derive(Clone, Debug)]
pub struct Diagnosis {
    /// The codepoint.
    pub codepoint: u32,
    /// Its name.
    pub name: String,
    /// Its general category.
    pub general_category: Option<String>,
    /// Its block.
    pub block: Option<String>,
    /// Its binary properties.
    pub properties: Vec<String>,
    /// The NFKC_CF transform of its character.
    pub nfkc_casefold: Option<String>,
    /// Each rule in cascade order with the status it would assign.
    pub steps: Vec<(Rule, Option<Idna2008Status>)>,
    /// The first applicable rule.
    pub decided_by: Rule,
    /// The resulting status.
    pub status: Idna2008Status,
    /// The UTS46 entry, if the codepoint is listed.
    pub uts46: Option<Uts46Entry>,
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "U+{:04X}:", self.codepoint)?;
        writeln!(f, "   Name:        {}", self.name)?;
        writeln!(
            f,
            "   Category:    {}",
            self.general_category.as_deref().unwrap_or("-")
        )?;
        writeln!(f, "   Block:       {}", self.block.as_deref().unwrap_or("-"))?;
        writeln!(f, "   Properties:  {}", self.properties.join(", "))?;
        if let Some(transformed) = &self.nfkc_casefold {
            writeln!(f, "   NFKC_CF:     {}", escape_codepoints(transformed))?;
        }
        for (rule, outcome) in &self.steps {
            let category = rule.rfc5892_category().unwrap_or(' ');
            let marker = if *rule == self.decided_by { '*' } else { ' ' };
            match outcome {
                Some(status) => writeln!(
                    f,
                    " {} {} {:<20} {}",
                    marker,
                    category,
                    rule.name(),
                    status
                )?,
                None => writeln!(f, " {} {} {:<20} -", marker, category, rule.name())?,
            }
        }
        writeln!(f, "   IDNA2008:    {}", self.status)?;
        match &self.uts46 {
            Some(entry) => writeln!(f, "   UTS46:       {}", entry),
            None => writeln!(f, "   UTS46:       -"),
        }
    }
}

fn escape_codepoints(s: &str) -> String {
    s.chars()
        .map(|ch| format!("U+{:04X}", ch as u32))
        .collect::<Vec<_>>()
        .join(" ")
}
