//! Integration tests driving file models through load → extract → relocate
//! → re-export, with observers standing in for the resolver and path planner.

use folio_conformance::{export_declared_uids, extract_links, load_document};
use folio_config::{load_config, load_config_from_str, ProjectConfig};
use folio_model::{FileModel, ObserverError, UidsChanged};
use folio_source::{DocumentType, SourcePosition};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

fn config() -> ProjectConfig {
    load_config_from_str(
        r#"
[project]
name = "scenario"
source_dir = "src"
output_dir = "out"
"#,
    )
    .unwrap()
}

// ---------------------------------------------------------------------------
// Load, extract, relocate
// ---------------------------------------------------------------------------

#[test]
fn load_extract_relocate() {
    let config = config();
    let text = "# A\n\nintro\n\n\n\n\n\n\nSee <xref:Foo.Bar> for details.\n";
    let mut model = load_document(&config, "docs/a.md", text);
    assert_eq!(model.key(), "~/docs/a.md");
    assert_eq!(model.doc_type(), DocumentType::Article);

    extract_links(&mut model).unwrap();
    assert_eq!(
        model.linked_uids().iter().collect::<Vec<_>>(),
        vec!["Foo.Bar"]
    );
    let sources = &model.uid_link_sources()["Foo.Bar"];
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].source_file(), "docs/a.md");
    assert_eq!(sources[0].position().line, 10);

    let fired = Arc::new(Mutex::new(0usize));
    let fired2 = Arc::clone(&fired);
    model.on_identity_changed(move |_, _| {
        *fired2.lock().unwrap() += 1;
        Ok(())
    });

    let dispatch = model.set_base_dir(&config.project.output_dir);
    assert_eq!(dispatch.delivered, 1);
    assert_eq!(*fired.lock().unwrap(), 1);
    assert_eq!(model.base_dir(), "out");
    assert_eq!(model.key(), "~/docs/a.md");
}

#[test]
fn file_links_keep_first_seen_order() {
    let config = config();
    let text = "[one](b.md#top)\n[two](../index.md)\n[again](b.md)\n[web](https://x.org/a.md)\n";
    let mut model = load_document(&config, "docs/a.md", text);
    extract_links(&mut model).unwrap();

    assert_eq!(
        model.linked_files().iter().cloned().collect::<Vec<_>>(),
        vec!["~/docs/b.md".to_string(), "~/index.md".to_string()]
    );
    let to_b = &model.file_link_sources()["~/docs/b.md"];
    assert_eq!(to_b.len(), 2);
    assert_eq!(to_b[0].position(), SourcePosition::new(1, 5));
    assert_eq!(to_b[0].anchor(), Some("top"));
    assert_eq!(to_b[1].position().line, 3);
    assert_eq!(to_b[1].anchor(), None);
}

// ---------------------------------------------------------------------------
// Observers standing in for external stages
// ---------------------------------------------------------------------------

/// A global uid → document-key index maintained from uid-changed events.
#[derive(Default)]
struct UidIndex {
    owners: BTreeMap<String, String>,
    invalidated: Vec<String>,
}

impl UidIndex {
    fn apply(&mut self, key: &str, event: &UidsChanged) {
        for def in &event.original {
            if !event.current.iter().any(|d| d.uid() == def.uid()) {
                self.owners.remove(def.uid());
                self.invalidated.push(def.uid().to_string());
            }
        }
        for def in &event.current {
            self.owners.insert(def.uid().to_string(), key.to_string());
        }
    }
}

#[test]
fn resolver_tracks_reexported_uids() {
    let config = config();
    let index = Arc::new(Mutex::new(UidIndex::default()));

    let mut model = load_document(&config, "api/Foo.md", "uid: Foo\nuid: Foo.Bar\n");
    let idx = Arc::clone(&index);
    model.on_uids_changed(move |m, event| {
        idx.lock().unwrap().apply(m.key(), event);
        Ok(())
    });

    assert_eq!(export_declared_uids(&mut model).unwrap(), 2);
    assert_eq!(index.lock().unwrap().owners.len(), 2);

    // Incremental pass: the document no longer declares Foo.Bar.
    model.set_content("uid: Foo\n".to_string());
    export_declared_uids(&mut model).unwrap();

    let index = index.lock().unwrap();
    assert_eq!(index.owners.get("Foo").map(String::as_str), Some("~/api/Foo.md"));
    assert!(!index.owners.contains_key("Foo.Bar"));
    assert_eq!(index.invalidated, vec!["Foo.Bar"]);
}

#[test]
fn reexport_of_same_uids_still_notifies() {
    let config = config();
    let mut model = load_document(&config, "api/Foo.md", "uid: Foo\n");
    let calls = Arc::new(Mutex::new(Vec::new()));
    for name in ["resolver", "planner"] {
        let calls = Arc::clone(&calls);
        model.on_uids_changed(move |_, _| {
            calls.lock().unwrap().push(name);
            Ok(())
        });
    }
    export_declared_uids(&mut model).unwrap();
    export_declared_uids(&mut model).unwrap();
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["resolver", "planner", "resolver", "planner"]
    );
}

#[test]
fn duplicate_declarations_are_rejected() {
    let config = config();
    let mut model = load_document(&config, "api/Foo.md", "uid: Foo\nuid: Foo\n");
    let err = export_declared_uids(&mut model).unwrap_err();
    assert!(err.to_string().contains("duplicate uid 'Foo'"));
    assert!(model.uids().is_empty());
}

#[test]
fn path_planner_observer_failure_is_isolated() {
    let config = config();
    let mut model = load_document(&config, "docs/a.md", "");
    let paths = Arc::new(Mutex::new(Vec::new()));

    model.on_identity_changed(|_, _| Err(ObserverError::new("planner not ready")));
    let p = Arc::clone(&paths);
    model.on_identity_changed(move |m, _| {
        p.lock().unwrap().push(m.identity().full_path());
        Ok(())
    });

    let dispatch = model.set_file("guide/a.md");
    assert_eq!(dispatch.failures.len(), 1);
    assert_eq!(dispatch.failures[0].error.message, "planner not ready");
    assert_eq!(
        *paths.lock().unwrap(),
        vec![std::path::PathBuf::from("src/guide/a.md")]
    );
    assert_eq!(model.file(), "guide/a.md");
}

// ---------------------------------------------------------------------------
// Incremental fingerprints
// ---------------------------------------------------------------------------

#[test]
fn fingerprint_changes_only_with_link_shape() {
    let config = config();
    let mut first = load_document(&config, "docs/a.md", "<xref:Foo>\n");
    extract_links(&mut first).unwrap();

    let mut reworded = load_document(&config, "docs/a.md", "Now see <xref:Foo>.\n");
    extract_links(&mut reworded).unwrap();
    assert_eq!(first.fingerprint(), reworded.fingerprint());

    let mut relinked = load_document(&config, "docs/a.md", "<xref:Bar>\n");
    extract_links(&mut relinked).unwrap();
    assert_ne!(first.fingerprint(), relinked.fingerprint());
}

#[test]
fn fragment_models_relocate_independently() {
    let config = config();
    let mut parent: FileModel<String> = load_document(&config, "api/Foo.yml", "uid: Foo\n");
    let fragment = load_document(&config, "api/Foo.yml.md", "<xref:Bar>\n");
    parent.set_fragment_model(Some(fragment));

    parent.set_base_dir("out");
    let child = parent.fragment_model().unwrap();
    assert_eq!(child.base_dir(), "src");
    assert_eq!(child.key(), "~/api/Foo.yml.md");
}

// ---------------------------------------------------------------------------
// On-disk project
// ---------------------------------------------------------------------------

#[test]
fn project_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("folio.toml"),
        "[project]\nname = \"disk\"\nsource_dir = \"docs\"\n",
    )
    .unwrap();
    let config = load_config(dir.path()).unwrap();

    let toc = load_document(&config, "toc.yml", "");
    assert_eq!(toc.doc_type(), DocumentType::Toc);
    assert_eq!(toc.local_path_from_root(), Some("docs/toc.yml"));

    let image = load_document(&config, "images/logo.png", "");
    assert_eq!(image.doc_type(), DocumentType::Resource);
    assert_eq!(image.key(), "~/images/logo.png");
}
