//! Pipeline helpers for exercising the folio document model end to end.
//!
//! Provides minimal stand-ins for the loader and link-extractor stages so
//! integration tests can drive [`FileModel`]s the way a real build does:
//! load, extract links, relocate, and re-export uids.

#![warn(missing_docs)]

use folio_common::{normalize_key, FolioResult};
use folio_config::ProjectConfig;
use folio_model::{FileModel, LinkSourceMap, ModelError};
use folio_source::{LineIndex, LinkSourceInfo, UidDefinition};
use std::collections::BTreeSet;

/// Loads a markdown document as a [`FileModel`] whose content is the raw text.
pub fn load_document(config: &ProjectConfig, file: &str, text: &str) -> FileModel<String> {
    let mut model = FileModel::new(config.identity_for(file), text.to_string());
    model.set_local_path_from_root(Some(
        format!("{}/{}", config.project.source_dir, file)
            .trim_start_matches("./")
            .to_string(),
    ));
    model
}

/// Populates the link fields of `model` from its text.
///
/// Recognizes `<xref:Uid>` uid references and `[text](path.md#anchor)` file
/// links. File link targets are resolved relative to the document and stored
/// as canonical keys. Link sources keep first-seen order.
pub fn extract_links(model: &mut FileModel<String>) -> FolioResult<()> {
    let text = model.content().clone();
    let index = LineIndex::new(&text);
    let source_file = model.file().to_string();

    let mut linked_uids = BTreeSet::new();
    let mut uid_sources = LinkSourceMap::new();
    for (offset, uid) in scan_delimited(&text, "<xref:", ">") {
        let position = index.position(offset as u32)?;
        linked_uids.insert(uid.to_string());
        uid_sources
            .entry(uid.to_string())
            .or_default()
            .push(LinkSourceInfo::new(uid, source_file.as_str(), position));
    }

    let mut linked_files = BTreeSet::new();
    let mut file_sources = LinkSourceMap::new();
    for (offset, href) in scan_delimited(&text, "](", ")") {
        let (path, anchor) = match href.split_once('#') {
            Some((path, anchor)) => (path, Some(anchor)),
            None => (href, None),
        };
        if !path.ends_with(".md") || path.contains("://") {
            continue;
        }
        let key = resolve_relative(&source_file, path);
        let position = index.position(offset as u32)?;
        let mut info = LinkSourceInfo::new(key.as_str(), source_file.as_str(), position);
        if let Some(anchor) = anchor {
            info = info.with_anchor(anchor);
        }
        linked_files.insert(key.clone());
        file_sources.entry(key).or_default().push(info);
    }

    model.set_linked_uids(linked_uids);
    model.set_uid_link_sources(uid_sources);
    model.set_linked_files(linked_files);
    model.set_file_link_sources(file_sources);
    Ok(())
}

/// Exports uids declared as `uid: Name` lines in the document text.
pub fn export_declared_uids(model: &mut FileModel<String>) -> Result<usize, ModelError> {
    let file = model.file().to_string();
    let uids: Vec<UidDefinition> = model
        .content()
        .lines()
        .enumerate()
        .filter_map(|(i, line)| {
            let uid = line.strip_prefix("uid:")?.trim();
            (!uid.is_empty()).then(|| {
                UidDefinition::new(uid, file.as_str(), folio_source::SourcePosition::line(i as u32 + 1))
            })
        })
        .collect();
    let count = uids.len();
    model.set_uids(uids)?;
    Ok(count)
}

/// Returns `(byte offset of the match start, inner text)` for each
/// `open ... close` occurrence.
fn scan_delimited<'a>(text: &'a str, open: &str, close: &str) -> Vec<(usize, &'a str)> {
    let mut found = Vec::new();
    let mut cursor = 0;
    while let Some(rel) = text[cursor..].find(open) {
        let start = cursor + rel;
        let inner_start = start + open.len();
        let Some(len) = text[inner_start..].find(close) else {
            break;
        };
        found.push((start, &text[inner_start..inner_start + len]));
        cursor = inner_start + len + close.len();
    }
    found
}

/// Resolves `href` against the directory of `from` and returns its key.
fn resolve_relative(from: &str, href: &str) -> String {
    if href.starts_with(folio_common::ROOT_MARKER) {
        return href.to_string();
    }
    let mut segments: Vec<&str> = from.split('/').collect();
    segments.pop();
    for part in href.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    normalize_key(&segments.join("/"))
}
