//! Source-level translation checks: every `t!` key used in `src/` exists in
//! the fallback bundle, and every locale uses the same placeables as the
//! fallback for each message.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::i18n::DEFAULT_LANGUAGE;

const FTL_FILENAME: &str = "bookstats-ui.ftl";
const I18N_DIR: &str = "i18n";

/// Message id → placeable names (`{ $name }`) used in its value.
fn parse_messages(content: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut messages = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        let Some((id, value)) = line.split_once('=') else {
            continue;
        };
        let id = id.trim();
        if id.is_empty() || !id.chars().all(valid_key_char) {
            continue;
        }
        messages.insert(id.to_string(), placeables(value));
    }
    messages
}

fn placeables(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .filter_map(|rest| {
            let name: String = rest.chars().take_while(|c| valid_key_char(*c) || *c == '_').collect();
            (!name.is_empty()).then_some(name)
        })
        .collect()
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// Literal first arguments of `t!` invocations under `root`.
fn referenced_keys(root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(entries) = fs::read_dir(&path) {
                stack.extend(entries.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for chunk in content.split("t!(\"").skip(1) {
            if let Some(end) = chunk.find('"') {
                let key = &chunk[..end];
                if !key.is_empty() && key.chars().all(valid_key_char) {
                    found.insert(key.to_string());
                }
            }
        }
    }

    found
}

fn locale_bundles(i18n_root: &Path) -> BTreeMap<String, BTreeMap<String, BTreeSet<String>>> {
    let mut bundles = BTreeMap::new();
    let Ok(entries) = fs::read_dir(i18n_root) else {
        return bundles;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        let Some(locale) = path.file_name().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        if !path.is_dir() || !locale.contains('-') {
            continue;
        }
        let file = path.join(FTL_FILENAME);
        let content = fs::read_to_string(&file)
            .unwrap_or_else(|_| panic!("locale {locale} is missing {FTL_FILENAME}"));
        bundles.insert(locale, parse_messages(&content));
    }
    bundles
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn every_referenced_key_exists_in_fallback() {
    let bundles = locale_bundles(&crate_root().join(I18N_DIR));
    let fallback = bundles
        .get(DEFAULT_LANGUAGE)
        .expect("fallback locale bundle present");

    let missing: Vec<String> = referenced_keys(&crate_root().join("src"))
        .into_iter()
        .filter(|key| !fallback.contains_key(key))
        .collect();

    assert!(
        missing.is_empty(),
        "t! keys missing from {DEFAULT_LANGUAGE}:\n{}",
        missing.join("\n")
    );
}

#[test]
fn locales_share_placeables_with_fallback() {
    let bundles = locale_bundles(&crate_root().join(I18N_DIR));
    let fallback = bundles
        .get(DEFAULT_LANGUAGE)
        .expect("fallback locale bundle present");

    let mut mismatches = Vec::new();
    for (locale, messages) in &bundles {
        for (id, expected) in fallback {
            match messages.get(id) {
                Some(found) if found == expected => {}
                Some(found) => mismatches.push(format!(
                    "{locale}/{id}: expected {expected:?}, found {found:?}"
                )),
                None => mismatches.push(format!("{locale}/{id}: missing")),
            }
        }
    }

    assert!(mismatches.is_empty(), "{}", mismatches.join("\n"));
}

#[test]
fn placeable_parsing() {
    let messages = parse_messages("result-year-count = { $count } книг(и)\n# note\n");
    assert_eq!(
        messages.get("result-year-count"),
        Some(&BTreeSet::from(["count".to_string()]))
    );
}
