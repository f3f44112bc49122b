//! Every `t!` call site resolves in every embedded locale, and each message
//! mentions the placeholders its call sites pass.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use i18n_embed::fluent::FluentLanguageLoader;
use rust_embed::Embed;
use unic_langid::LanguageIdentifier;

use crate::i18n::{available_languages, Localizations, DOMAIN};

/// Message id -> placeholder names passed at its call sites.
type CallSites = BTreeMap<String, BTreeSet<String>>;

fn is_message_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn collect_call_sites(dir: &Path, sites: &mut CallSites) {
    let entries = fs::read_dir(dir).expect("source directory is readable");
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_call_sites(&path, sites);
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let source = fs::read_to_string(&path).expect("source file is readable");
        scan_source(&source, sites);
    }
}

fn scan_source(source: &str, sites: &mut CallSites) {
    let opener = concat!("t!", "(\"");
    for (start, _) in source.match_indices(opener) {
        // `format!(` and friends also end in `t!(`.
        let preceded_by_ident = source[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if preceded_by_ident {
            continue;
        }
        let rest = &source[start + opener.len()..];
        let Some(end) = rest.find('"') else {
            continue;
        };
        let id = &rest[..end];
        if !is_message_id(id) {
            continue;
        }
        let args = sites.entry(id.to_string()).or_default();
        let tail = &rest[end + 1..];
        let close = tail.find(')').unwrap_or(tail.len());
        for part in tail[..close].split(',').skip(1) {
            if let Some((name, _)) = part.split_once('=') {
                args.insert(name.trim().to_string());
            }
        }
    }
}

fn source_call_sites() -> CallSites {
    let src = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src");
    let mut sites = CallSites::new();
    collect_call_sites(&src, &mut sites);
    sites
}

fn loader_for(tag: &str) -> FluentLanguageLoader {
    let lang: LanguageIdentifier = tag.parse().expect("locale folder is a language tag");
    let loader = FluentLanguageLoader::new(DOMAIN, lang.clone());
    i18n_embed::select(&loader, &Localizations, &[lang]).expect("locale loads");
    loader
}

/// Source line defining `id` in the embedded FTL of `tag`.
fn message_line(tag: &str, id: &str) -> Option<String> {
    let file = Localizations::get(&format!("{tag}/{DOMAIN}.ftl"))?;
    let text = String::from_utf8(file.data.into_owned()).ok()?;
    text.lines()
        .find(|line| {
            line.split_once('=')
                .is_some_and(|(left, _)| left.trim() == id)
        })
        .map(str::to_string)
}

#[test]
fn scanner_reads_ids_and_placeholders() {
    let mut sites = CallSites::new();
    scan_source(
        r#"let a = t!("export-saved", path = path.clone()); let b = format!("ignored {x}");"#,
        &mut sites,
    );
    assert_eq!(sites.len(), 1);
    let args = &sites["export-saved"];
    assert!(args.contains("path"));
}

#[test]
fn sources_use_translated_strings() {
    let sites = source_call_sites();
    for id in ["nav-home", "export-pdf-button", "section-synergy"] {
        assert!(sites.contains_key(id), "expected a call site for {id}");
    }
    assert!(sites["section-synergy"].contains("name"));
}

#[test]
fn every_call_site_resolves_in_every_locale() {
    let sites = source_call_sites();
    let locales = available_languages();
    assert!(locales.len() >= 2, "expected ja-JP and en-US, got {locales:?}");

    let mut problems = Vec::new();
    for tag in &locales {
        let loader = loader_for(tag);
        for (id, args) in &sites {
            if !loader.has(id) {
                problems.push(format!("{tag}: missing `{id}`"));
                continue;
            }
            let line = message_line(tag, id).unwrap_or_default();
            for arg in args {
                let placeholder = format!("${arg}");
                if !line.contains(&placeholder) {
                    problems.push(format!("{tag}: `{id}` never uses `{placeholder}`"));
                }
            }
        }
    }

    assert!(
        problems.is_empty(),
        "Translation problems:\n  {}",
        problems.join("\n  ")
    );
}
