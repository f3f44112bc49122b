//! Color tally over abilities, ordered by the fixed color table.

use api::Hissatsu;

/// Canonical colors in presentation order with their fixed meanings.
pub const COLOR_TABLE: [(&str, &str); 7] = [
    ("赤", "俺らしくいることが世界を救う"),
    ("桃", "俺大好きパワーが世界を救う"),
    ("緑", "仲間と俺とで世界を救う"),
    ("黄緑", "仲間を守る本能が世界を救う"),
    ("青", "社会にシェアすることで世界を救う"),
    ("水", "社会で遊ぶことが世界を救う"),
    ("黄", "世界最強の俺が世界を救う"),
];

pub fn color_rank(label: &str) -> Option<usize> {
    COLOR_TABLE.iter().position(|(name, _)| *name == label)
}

pub fn color_meaning(label: &str) -> Option<&'static str> {
    COLOR_TABLE
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, meaning)| *meaning)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTally {
    pub label: String,
    pub count: u32,
    /// `None` for labels outside the table.
    pub meaning: Option<&'static str>,
}

/// Count abilities per color label in a single pass.
///
/// Known colors come out in table order, unknown ones after them in the
/// order they were first seen. Abilities without a color are skipped.
pub fn tally_colors<'a, I>(abilities: I) -> Vec<ColorTally>
where
    I: IntoIterator<Item = &'a Hissatsu>,
{
    let mut tallies: Vec<ColorTally> = Vec::new();

    for label in abilities.into_iter().filter_map(Hissatsu::color_label) {
        match tallies.iter_mut().find(|tally| tally.label == label) {
            Some(tally) => tally.count += 1,
            None => tallies.push(ColorTally {
                label: label.to_string(),
                count: 1,
                meaning: color_meaning(label),
            }),
        }
    }

    // Stable: unknown labels share the same key and keep encounter order.
    tallies.sort_by_key(|tally| color_rank(&tally.label).unwrap_or(COLOR_TABLE.len()));
    tallies
}
