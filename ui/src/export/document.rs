//! Typed export document built from a stored result.
//!
//! The document is independent of the on-screen views: it only carries the
//! text to print and a coarse style per block. `layout` turns it into an SVG
//! fragment.

use api::{ActionNote, CompatibilityResult, Hissatsu, Item, PersonResult, SingleResult};

use crate::results::numbers::{marked_numbers_text, NUMBER_SEPARATOR};
use crate::results::tally::tally_colors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextKind {
    /// Regular body text (12px).
    Body,
    /// Bold list entry (11px).
    Entry,
    /// Plain list entry (11px).
    Detail,
    /// Small text (10px).
    Note,
    /// Small text indented under the previous line.
    Indented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineTone {
    Plain,
    On,
    Off,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardLine {
    pub text: String,
    pub tone: LineTone,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(String),
    Text { kind: TextKind, text: String },
    Card { title: String, lines: Vec<CardLine> },
    Gap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportDocument {
    pub title: String,
    pub blocks: Vec<Block>,
}

impl ExportDocument {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    fn heading(&mut self, text: &str) {
        self.blocks.push(Block::Heading(text.to_string()));
    }

    fn text(&mut self, kind: TextKind, text: impl Into<String>) {
        self.blocks.push(Block::Text {
            kind,
            text: text.into(),
        });
    }

    fn gap(&mut self) {
        self.blocks.push(Block::Gap);
    }

    fn hissatsu_section(&mut self, heading: &str, hissatsus: &[Hissatsu]) {
        if hissatsus.is_empty() {
            return;
        }
        self.heading(heading);
        self.blocks.extend(hissatsus.iter().map(hissatsu_card));
    }

    fn item_section(&mut self, heading: &str, items: &[Item]) {
        if items.is_empty() {
            return;
        }
        self.heading(heading);
        self.blocks.extend(items.iter().map(item_card));
    }

    fn action_section(&mut self, actions: &[ActionNote]) {
        if actions.is_empty() {
            return;
        }
        self.heading("動き方の説明");
        for action in actions {
            self.text(TextKind::Entry, action.action.as_str());
            self.text(TextKind::Indented, action.meaning.as_str());
        }
    }

    /// Single-person details.
    pub fn single(result: &SingleResult) -> Self {
        let mut doc = Self::new("My Dungeon - 診断結果詳細");

        doc.heading("あなたの数字");
        doc.text(
            TextKind::Body,
            marked_numbers_text(&result.numbers, &result.hissatsu_numbers),
        );
        doc.gap();

        if !result.hissatsus.is_empty() || !result.items.is_empty() {
            doc.heading("あなたの必殺技とアイテム");
            for hissatsu in &result.hissatsus {
                doc.text(TextKind::Entry, format!("【必殺技】{}", hissatsu.name));
            }
            for item in &result.items {
                doc.text(TextKind::Detail, format!("No.{}  {}", item.no, item.name));
            }
            doc.gap();
        }

        if !result.color_counts.color_systems.is_empty() {
            doc.heading("色ごとの枚数");
            for system in &result.color_counts.color_systems {
                doc.text(
                    TextKind::Entry,
                    format!(
                        "{}: {} - {}枚",
                        system.name, system.meaning, system.total_count
                    ),
                );
                for color in &system.colors {
                    doc.text(
                        TextKind::Indented,
                        format!("{}: {} - {}枚", color.name, color.meaning, color.count),
                    );
                }
            }
            doc.gap();
        }

        doc.hissatsu_section("持っている必殺技", &result.hissatsus);
        doc.item_section("持っているアイテム", &result.items);
        doc.action_section(&result.actions);
        doc
    }

    /// Compatibility details for both people.
    pub fn compatibility(result: &CompatibilityResult) -> Self {
        let mut doc = Self::new("My Dungeon - 相性診断結果詳細");
        let (p1, p2) = (&result.person1, &result.person2);

        doc.text(TextKind::Body, person_line("あなた", p1));
        doc.text(TextKind::Body, person_line("相手", p2));
        doc.gap();

        doc.heading("2人の数字");
        doc.text(TextKind::Detail, format!("あなた: {}", joined(&p1.numbers)));
        doc.text(TextKind::Detail, format!("相手: {}", joined(&p2.numbers)));
        doc.gap();

        doc.hissatsu_section("二人で発動する必殺技", &result.joint_hissatsus);
        doc.hissatsu_section(
            "お互い持っている必殺技（相乗効果×2）",
            &result.both_have_hissatsus,
        );
        doc.hissatsu_section(
            "あなただけで発動するが相手がいて相乗効果がある必殺技",
            &result.person1_synergy_hissatsus,
        );
        doc.hissatsu_section(
            "相手だけで発動するがあなたがいて相乗効果がある必殺技",
            &result.person2_synergy_hissatsus,
        );

        let tallies = tally_colors(result.categorized_hissatsus());
        if !tallies.is_empty() {
            doc.heading("色ごとの枚数");
            for tally in &tallies {
                let line = match tally.meaning {
                    Some(meaning) => format!("{}: {} - {}枚", tally.label, meaning, tally.count),
                    None => format!("{} - {}枚", tally.label, tally.count),
                };
                doc.text(TextKind::Detail, line);
            }
            doc.gap();
        }

        doc.hissatsu_section("あなたの必殺技", &p1.solo_hissatsus);
        doc.hissatsu_section("相手の必殺技", &p2.solo_hissatsus);
        doc.item_section("あなたのアイテム", &p1.items);
        doc.item_section("相手のアイテム", &p2.items);
        doc.action_section(&result.actions);
        doc
    }

    pub fn headings(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Heading(text) => Some(text.as_str()),
            _ => None,
        })
    }
}

fn person_line(role: &str, person: &PersonResult) -> String {
    let name = person
        .name
        .as_deref()
        .filter(|name| !name.is_empty())
        .unwrap_or("名前なし");
    format!(
        "{role}: {name} ({} {})",
        person.birthdate, person.birthtime
    )
}

fn joined(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(NUMBER_SEPARATOR)
}

fn plain(text: String) -> CardLine {
    CardLine {
        text,
        tone: LineTone::Plain,
    }
}

fn hissatsu_card(h: &Hissatsu) -> Block {
    Block::Card {
        title: h.name.clone(),
        lines: vec![
            plain(format!("色: {}", h.color_label().unwrap_or("-"))),
            plain(format!("意味: {}", h.meaning)),
            plain(format!("動き方: {}", h.movement)),
            plain(format!("基本姿勢: {}", h.basic_posture)),
            plain(format!("才能: {}", h.talent)),
            plain(format!("特性: {}", h.characteristics)),
            plain(format!("アドバイス: {}", h.advice)),
            CardLine {
                text: format!("ON: {}", h.on_state),
                tone: LineTone::On,
            },
            CardLine {
                text: format!("OFF: {}", h.off_state),
                tone: LineTone::Off,
            },
        ],
    }
}

fn item_card(item: &Item) -> Block {
    Block::Card {
        title: format!("No.{}: {}", item.no, item.name),
        lines: vec![
            plain(format!("色: {}", item.color)),
            plain(format!("動き方: {}", item.movement)),
            plain(format!("説明: {}", item.description)),
            CardLine {
                text: format!("ON: {}", item.on_state),
                tone: LineTone::On,
            },
            CardLine {
                text: format!("OFF: {}", item.off_state),
                tone: LineTone::Off,
            },
        ],
    }
}
