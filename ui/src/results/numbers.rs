//! Number list presentation: special markers for single results and tone
//! classes for compatibility results.

use api::PersonResult;

pub const SPECIAL_MARKER: &str = "★";
pub const NUMBER_SEPARATOR: &str = ", ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedNumber {
    pub value: u32,
    pub special: bool,
}

impl MarkedNumber {
    pub fn label(&self) -> String {
        if self.special {
            format!("{SPECIAL_MARKER}{}", self.value)
        } else {
            self.value.to_string()
        }
    }
}

/// Flags every entry of `numbers` that appears in `special`, keeping the
/// order of `numbers`.
pub fn mark_numbers(numbers: &[u32], special: &[u32]) -> Vec<MarkedNumber> {
    numbers
        .iter()
        .map(|&value| MarkedNumber {
            value,
            special: special.contains(&value),
        })
        .collect()
}

/// `1, ★2, 3`
pub fn marked_numbers_text(numbers: &[u32], special: &[u32]) -> String {
    mark_numbers(numbers, special)
        .iter()
        .map(MarkedNumber::label)
        .collect::<Vec<_>>()
        .join(NUMBER_SEPARATOR)
}

/// Highlight category of a number in a compatibility result, highest
/// priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberTone {
    Joint,
    Person1Synergy,
    Person2Synergy,
    BothHave,
    Solo,
    Plain,
}

impl NumberTone {
    pub fn for_number(value: u32, person: &PersonResult) -> Self {
        if person.joint_numbers.contains(&value) {
            Self::Joint
        } else if person.person1_synergy_numbers.contains(&value) {
            Self::Person1Synergy
        } else if person.person2_synergy_numbers.contains(&value) {
            Self::Person2Synergy
        } else if person.both_have_numbers.contains(&value) {
            Self::BothHave
        } else if person.solo_hissatsu_numbers.contains(&value) {
            Self::Solo
        } else {
            Self::Plain
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Joint => "number-chip number-chip--joint",
            Self::Person1Synergy => "number-chip number-chip--synergy-1",
            Self::Person2Synergy => "number-chip number-chip--synergy-2",
            Self::BothHave => "number-chip number-chip--both",
            Self::Solo => "number-chip number-chip--solo",
            Self::Plain => "number-chip",
        }
    }
}
