//! Lays an [`ExportDocument`] out as a standalone SVG fragment.
//!
//! The fragment is a fixed-width white sheet. Text is wrapped using the
//! advances from [`fonts`](super::fonts), so the height is known before
//! anything is rasterized.

use std::fmt::Write;

use super::document::{Block, CardLine, ExportDocument, LineTone, TextKind};
use super::fonts::{fonts, measure, FontWeight};
use crate::core::config::ExportConfig;

const FONT_FAMILY: &str = "'Noto Sans JP', 'Hiragino Sans', 'Yu Gothic', sans-serif";
const INK: &str = "#333333";
const ON_INK: &str = "#16a34a";
const OFF_INK: &str = "#dc2626";
const CARD_FILL: &str = "#fafafa";

const TITLE_SIZE: f64 = 20.0;
const HEADING_SIZE: f64 = 16.0;
const CARD_TITLE_SIZE: f64 = 12.0;
const CARD_LINE_SIZE: f64 = 10.0;
const CARD_PADDING: f64 = 10.0;
const CARD_MARGIN: f64 = 15.0;
const INDENT: f64 = 15.0;

/// Rendered fragment. Dimensions are CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

struct Style {
    size: f64,
    weight: FontWeight,
    indent: f64,
}

fn text_style(kind: TextKind) -> Style {
    match kind {
        TextKind::Body => Style {
            size: 12.0,
            weight: FontWeight::Regular,
            indent: 0.0,
        },
        TextKind::Entry => Style {
            size: 11.0,
            weight: FontWeight::Bold,
            indent: 0.0,
        },
        TextKind::Detail => Style {
            size: 11.0,
            weight: FontWeight::Regular,
            indent: 0.0,
        },
        TextKind::Note => Style {
            size: 10.0,
            weight: FontWeight::Regular,
            indent: 0.0,
        },
        TextKind::Indented => Style {
            size: 10.0,
            weight: FontWeight::Regular,
            indent: INDENT,
        },
    }
}

struct Canvas {
    body: String,
    left: f64,
    width: f64,
    y: f64,
}

impl Canvas {
    fn text_run(&mut self, x: f64, baseline: f64, size: f64, weight: FontWeight, fill: &str, text: &str) {
        let weight_attr = match weight {
            FontWeight::Bold => " font-weight='700'",
            FontWeight::Regular => "",
        };
        let _ = writeln!(
            self.body,
            "<text x='{x:.1}' y='{baseline:.1}' font-size='{size}'{weight_attr} fill='{fill}'>{}</text>",
            escape_xml(text)
        );
    }

    /// Wrapped paragraph starting at the current cursor.
    fn paragraph(&mut self, text: &str, indent: f64, size: f64, weight: FontWeight, fill: &str) {
        let metrics = measure(weight, size);
        let x = self.left + indent;
        for line in wrap(text, self.width - indent, weight, size) {
            self.text_run(x, self.y + metrics.asc, size, weight, fill, &line);
            self.y += metrics.line_h;
        }
    }

    fn title(&mut self, text: &str) {
        let metrics = measure(FontWeight::Bold, TITLE_SIZE);
        for line in wrap(text, self.width, FontWeight::Bold, TITLE_SIZE) {
            let _ = writeln!(
                self.body,
                "<text x='{:.1}' y='{:.1}' font-size='{TITLE_SIZE}' font-weight='700' text-anchor='middle' fill='{INK}'>{}</text>",
                self.left + self.width / 2.0,
                self.y + metrics.asc,
                escape_xml(&line)
            );
            self.y += metrics.line_h;
        }
        self.y += 20.0;
    }

    fn heading(&mut self, text: &str) {
        self.y += 20.0;
        self.paragraph(text, 0.0, HEADING_SIZE, FontWeight::Bold, INK);
        self.y += 3.0;
        let _ = writeln!(
            self.body,
            "<rect x='{:.1}' y='{:.1}' width='{:.1}' height='2' fill='{INK}'/>",
            self.left, self.y, self.width
        );
        self.y += 2.0 + 8.0;
    }

    fn card(&mut self, title: &str, lines: &[CardLine]) {
        let inner = self.width - 2.0 * CARD_PADDING;
        let title_metrics = measure(FontWeight::Bold, CARD_TITLE_SIZE);
        let line_metrics = measure(FontWeight::Regular, CARD_LINE_SIZE);

        let title_lines = wrap(title, inner, FontWeight::Bold, CARD_TITLE_SIZE);
        let body_lines: Vec<(String, &str)> = lines
            .iter()
            .flat_map(|line| {
                let fill = match line.tone {
                    LineTone::Plain => INK,
                    LineTone::On => ON_INK,
                    LineTone::Off => OFF_INK,
                };
                wrap(&line.text, inner, FontWeight::Regular, CARD_LINE_SIZE)
                    .into_iter()
                    .map(move |text| (text, fill))
            })
            .collect();

        let height = 2.0 * CARD_PADDING
            + title_lines.len() as f64 * title_metrics.line_h
            + 5.0
            + body_lines.len() as f64 * line_metrics.line_h;

        self.y += CARD_MARGIN;
        let _ = writeln!(
            self.body,
            "<rect x='{:.1}' y='{:.1}' width='{:.1}' height='{height:.1}' rx='8' fill='{CARD_FILL}'/>",
            self.left, self.y, self.width
        );

        let x = self.left + CARD_PADDING;
        let mut y = self.y + CARD_PADDING;
        for line in &title_lines {
            self.text_run(x, y + title_metrics.asc, CARD_TITLE_SIZE, FontWeight::Bold, INK, line);
            y += title_metrics.line_h;
        }
        y += 5.0;
        for (text, fill) in &body_lines {
            self.text_run(x, y + line_metrics.asc, CARD_LINE_SIZE, FontWeight::Regular, fill, text);
            y += line_metrics.line_h;
        }

        self.y += height + CARD_MARGIN;
    }
}

/// Produce the SVG fragment for `doc` using the configured width and padding.
pub fn render_fragment(doc: &ExportDocument, config: &ExportConfig) -> Fragment {
    let padding = config.fragment_padding;
    let width = config.fragment_width + 2.0 * padding;
    let mut canvas = Canvas {
        body: String::new(),
        left: padding,
        width: config.fragment_width,
        y: padding,
    };

    canvas.title(&doc.title);
    for block in &doc.blocks {
        match block {
            Block::Heading(text) => canvas.heading(text),
            Block::Text { kind, text } => {
                let style = text_style(*kind);
                canvas.paragraph(text, style.indent, style.size, style.weight, INK);
            }
            Block::Card { title, lines } => canvas.card(title, lines),
            Block::Gap => canvas.y += 20.0,
        }
    }

    let height = (canvas.y + padding).ceil();
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}' font-family=\"{FONT_FAMILY}\">\n<rect width='100%' height='100%' fill='#ffffff'/>\n{}</svg>",
        canvas.body
    );

    Fragment { svg, width, height }
}

/// Greedy character wrap. Japanese text has no spaces to break on, so any
/// glyph boundary is a candidate. Empty input yields one empty line.
fn wrap(text: &str, max_width: f64, weight: FontWeight, size: f64) -> Vec<String> {
    let f = fonts();
    let mut lines = Vec::new();

    for source_line in text.split('\n') {
        let mut current = String::new();
        let mut current_width = 0.0;
        for ch in source_line.chars() {
            let advance = f.advance(ch, weight, size);
            if current_width + advance > max_width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(ch);
            current_width += advance;
        }
        lines.push(current);
    }

    lines
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&apos;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with(blocks: Vec<Block>) -> ExportDocument {
        ExportDocument {
            title: "My Dungeon".into(),
            blocks,
        }
    }

    #[test]
    fn fragment_width_includes_padding() {
        let fragment = render_fragment(&doc_with(vec![]), &ExportConfig::A4);
        assert_eq!(fragment.width, 810.0);
        assert!(fragment.height > 60.0);
        assert!(fragment.svg.starts_with("<svg"));
        assert!(fragment.svg.contains("fill='#ffffff'"));
    }

    #[test]
    fn more_content_means_taller_fragment() {
        let short = render_fragment(&doc_with(vec![Block::Heading("a".into())]), &ExportConfig::A4);
        let card = Block::Card {
            title: "閃光".into(),
            lines: vec![CardLine {
                text: "ON: 全力".into(),
                tone: LineTone::On,
            }],
        };
        let long = render_fragment(
            &doc_with(vec![Block::Heading("a".into()), card.clone(), card]),
            &ExportConfig::A4,
        );
        assert!(long.height > short.height);
        assert!(long.svg.contains(ON_INK));
    }

    #[test]
    fn text_is_escaped() {
        let fragment = render_fragment(
            &doc_with(vec![Block::Text {
                kind: TextKind::Body,
                text: "<b>&'\"".into(),
            }]),
            &ExportConfig::A4,
        );
        assert!(fragment.svg.contains("&lt;b&gt;&amp;&apos;&quot;"));
        assert!(!fragment.svg.contains("<b>"));
    }

    #[test]
    fn long_japanese_lines_wrap() {
        let text = "世界".repeat(100);
        let lines = wrap(&text, 300.0, FontWeight::Regular, 12.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), text);
        let f = fonts();
        assert!(lines
            .iter()
            .all(|line| f.text_width(line, FontWeight::Regular, 12.0) <= 300.0));
    }

    #[test]
    fn empty_text_keeps_one_line() {
        assert_eq!(wrap("", 100.0, FontWeight::Regular, 10.0), vec![String::new()]);
    }
}
