//! Request and response payloads of the generate endpoints.
//!
//! Every response field is defaulted so that a partially populated payload
//! (older backend, missing optional sections) still loads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerateRequest {
    pub name: Option<String>,
    pub birthdate: String,
    pub birthtime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompatibilityRequest {
    pub person1_name: Option<String>,
    pub person1_birthdate: String,
    pub person1_birthtime: String,
    pub person2_name: Option<String>,
    pub person2_birthdate: String,
    pub person2_birthtime: String,
}

/// A named ability ("hissatsu") formed by a pair of numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Hissatsu {
    pub hissatsu_no: Option<u32>,
    pub name: String,
    pub color: Option<String>,
    pub meaning: String,
    pub movement: String,
    pub basic_posture: String,
    pub talent: String,
    pub characteristics: String,
    pub advice: String,
    pub on_state: String,
    pub off_state: String,
    pub image_url: Option<String>,
}

impl Hissatsu {
    /// Color label, treating an empty string as no label.
    pub fn color_label(&self) -> Option<&str> {
        self.color.as_deref().filter(|label| !label.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Item {
    pub no: u32,
    pub name: String,
    pub pair_no: Option<u32>,
    pub pair_name: Option<String>,
    pub hissatsu_no: Option<u32>,
    pub hissatsu_name: Option<String>,
    pub color: String,
    pub movement: String,
    pub description: String,
    pub on_state: String,
    pub off_state: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorCount {
    pub name: String,
    pub meaning: String,
    pub count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorSystem {
    pub name: String,
    pub meaning: String,
    pub total_count: u32,
    pub colors: Vec<ColorCount>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorCounts {
    pub color_systems: Vec<ColorSystem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ActionNote {
    pub action: String,
    pub meaning: String,
}

/// Response of `POST /api/generate`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SingleResult {
    pub name: Option<String>,
    pub birthdate: String,
    pub birthtime: String,
    pub image_url: Option<String>,
    pub numbers: Vec<u32>,
    pub hissatsu_numbers: Vec<u32>,
    pub items: Vec<Item>,
    pub hissatsus: Vec<Hissatsu>,
    pub color_counts: ColorCounts,
    pub actions: Vec<ActionNote>,
}

/// One side of a compatibility result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PersonResult {
    pub name: Option<String>,
    pub birthdate: String,
    pub birthtime: String,
    pub numbers: Vec<u32>,
    pub joint_numbers: Vec<u32>,
    pub both_have_numbers: Vec<u32>,
    pub person1_synergy_numbers: Vec<u32>,
    pub person2_synergy_numbers: Vec<u32>,
    pub solo_hissatsu_numbers: Vec<u32>,
    pub items: Vec<Item>,
    pub solo_hissatsus: Vec<Hissatsu>,
}

/// Response of `POST /api/generate-compatibility`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompatibilityResult {
    pub image_url: Option<String>,
    pub person1: PersonResult,
    pub person2: PersonResult,
    pub joint_hissatsus: Vec<Hissatsu>,
    pub both_have_hissatsus: Vec<Hissatsu>,
    pub person1_synergy_hissatsus: Vec<Hissatsu>,
    pub person2_synergy_hissatsus: Vec<Hissatsu>,
    pub color_counts: ColorCounts,
    pub actions: Vec<ActionNote>,
}

impl CompatibilityResult {
    /// The four cross-person categories flattened in display order:
    /// joint, mutual, person1 synergy, person2 synergy.
    pub fn categorized_hissatsus(&self) -> impl Iterator<Item = &Hissatsu> {
        self.joint_hissatsus
            .iter()
            .chain(self.both_have_hissatsus.iter())
            .chain(self.person1_synergy_hissatsus.iter())
            .chain(self.person2_synergy_hissatsus.iter())
    }
}
