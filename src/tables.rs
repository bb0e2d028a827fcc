//! Fixed data that is not derived from the Unicode Character Database.

use crate::idna2008::Idna2008Status::{self, ContextO, Disallowed, PValid};
use crate::uts46::Uts46Status;

/// Exceptions of RFC 5892, section 2.6, in ascending order.
pub const EXCEPTIONS: &[(u32, Idna2008Status)] = &[
    (0x00B7, ContextO),
    (0x00DF, PValid),
    (0x0375, ContextO),
    (0x03C2, PValid),
    (0x05F3, ContextO),
    (0x05F4, ContextO),
    (0x0640, Disallowed),
    (0x0660, ContextO),
    (0x0661, ContextO),
    (0x0662, ContextO),
    (0x0663, ContextO),
    (0x0664, ContextO),
    (0x0665, ContextO),
    (0x0666, ContextO),
    (0x0667, ContextO),
    (0x0668, ContextO),
    (0x0669, ContextO),
    (0x06F0, ContextO),
    (0x06F1, ContextO),
    (0x06F2, ContextO),
    (0x06F3, ContextO),
    (0x06F4, ContextO),
    (0x06F5, ContextO),
    (0x06F6, ContextO),
    (0x06F7, ContextO),
    (0x06F8, ContextO),
    (0x06F9, ContextO),
    (0x06FD, PValid),
    (0x06FE, PValid),
    (0x07FA, Disallowed),
    (0x0F0B, PValid),
    (0x3007, PValid),
    (0x302E, Disallowed),
    (0x302F, Disallowed),
    (0x3031, Disallowed),
    (0x3032, Disallowed),
    (0x3033, Disallowed),
    (0x3034, Disallowed),
    (0x3035, Disallowed),
    (0x303B, Disallowed),
    (0x30FB, ContextO),
];

/// Backward-compatible overrides of RFC 5892, section 2.7. No Unicode
/// version has needed one yet.
pub const BACKWARD_COMPATIBLE: &[(u32, Idna2008Status)] = &[];

/// Scripts whose ranges the contextual rules of RFC 5892, appendix A, consult.
pub const SCRIPT_WHITELIST: [&str; 5] = ["Greek", "Han", "Hebrew", "Hiragana", "Katakana"];

/// Properties that make a codepoint `DISALLOWED` (RFC 5892, section 2.3).
pub const IGNORABLE_PROPERTIES: [&str; 3] = [
    "Default_Ignorable_Code_Point",
    "White_Space",
    "Noncharacter_Code_Point",
];

/// Blocks whose codepoints are `DISALLOWED` (RFC 5892, section 2.4).
pub const IGNORABLE_BLOCKS: [&str; 3] = [
    "Combining Diacritical Marks for Symbols",
    "Musical Symbols",
    "Ancient Greek Musical Notation",
];

/// General categories that are `PVALID` (RFC 5892, section 2.1).
pub const LETTER_DIGIT_CATEGORIES: [&str; 7] = ["Ll", "Lu", "Lo", "Nd", "Lm", "Mn", "Mc"];

/// `IdnaMappingTable.txt` status tags, and whether each carries a mapping.
pub const UTS46_STATUSES: [(&str, Uts46Status, bool); 7] = [
    ("valid", Uts46Status::Valid, false),
    ("ignored", Uts46Status::Ignored, false),
    ("mapped", Uts46Status::Mapped, true),
    ("deviation", Uts46Status::Deviation, true),
    ("disallowed", Uts46Status::Disallowed, false),
    ("disallowed_STD3_valid", Uts46Status::DisallowedStd3Valid, false),
    ("disallowed_STD3_mapped", Uts46Status::DisallowedStd3Mapped, true),
];
