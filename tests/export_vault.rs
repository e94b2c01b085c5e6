//! End-to-end exports against a vault directory

use std::fs;
use std::path::Path;

use emx_export::{
    CollectingNotifier, ExportEngine, ExportError, ExportOptions, ExportSettings, FsVault, Notice,
};
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn book_vault() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Book.md", "# Book\n\n![[Chapter 1]]\n![[Drafts/Chapter 2|Two]]\n![[cover.png]]\n");
    write(dir.path(), "Chapters/Chapter 1.md", "# Opening\nIt begins.\n![[Scene]]\n");
    write(dir.path(), "Chapters/Scene.md", "# A scene\n#tag line\n");
    write(dir.path(), "Chapter 2.md", "# Wrong chapter\n");
    write(dir.path(), "Drafts/Chapter 2.md", "# Middle\n![[Appendix]]\nDone.\n");
    dir
}

#[test]
fn test_export_book() {
    let dir = book_vault();
    let engine = ExportEngine::new(FsVault::open(dir.path()).unwrap());
    let mut notifier = CollectingNotifier::new();

    let report = engine
        .export(Some("Book"), &ExportSettings::default(), ExportOptions::default(), &mut notifier)
        .unwrap();

    let expected = "\
# Book

# Chapter 1
## Opening
It begins.
## Scene
### A scene
###tag line
# Chapter 2
## Middle
Done.
![[cover.png]]
";
    assert_eq!(report.artifact, dir.path().canonicalize().unwrap().join("Book_Export.md"));
    assert_eq!(fs::read_to_string(&report.artifact).unwrap(), expected);
    assert_eq!(report.failures, 1);
    assert_eq!(
        notifier.notices[0],
        Notice::LinkNotResolved { target: "Appendix".to_string() }
    );
    assert_eq!(notifier.notices.len(), 2);
}

#[test]
fn test_export_uses_stored_settings() {
    let dir = book_vault();
    fs::write(
        dir.path().join(".emx-export.json"),
        r#"{"stacked_headings": false, "insert_titles": false, "export_prefix": "Full-", "export_suffix": ""}"#,
    )
    .unwrap();

    let vault = FsVault::open(dir.path()).unwrap();
    let settings = ExportSettings::load(vault.root()).unwrap();
    let engine = ExportEngine::new(vault);
    let mut notifier = CollectingNotifier::new();

    let report = engine
        .export(Some("Drafts/Chapter 2.md"), &settings, ExportOptions::default(), &mut notifier)
        .unwrap();

    assert!(report.artifact.ends_with("Full-Chapter 2.md"));
    assert_eq!(fs::read_to_string(&report.artifact).unwrap(), "# Middle\nDone.\n");
}

#[test]
fn test_refused_export_leaves_vault_untouched() {
    let dir = book_vault();
    let engine = ExportEngine::new(FsVault::open(dir.path()).unwrap());
    let settings = ExportSettings {
        export_prefix: String::new(),
        export_suffix: String::new(),
        ..Default::default()
    };
    let mut notifier = CollectingNotifier::new();

    let err = engine
        .export(Some("Book"), &settings, ExportOptions::default(), &mut notifier)
        .unwrap_err();

    assert!(matches!(err, ExportError::ConfigurationInvalid));
    assert_eq!(fs::read_to_string(dir.path().join("Book.md")).unwrap().lines().next(), Some("# Book"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 4);
}

#[test]
fn test_cyclic_vault_terminates() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "A.md", "# A\n![[B]]\n");
    write(dir.path(), "B.md", "# B\n![[A]]\n");

    let engine = ExportEngine::new(FsVault::open(dir.path()).unwrap());
    let mut notifier = CollectingNotifier::new();
    let flattened = engine
        .flatten_note(Some("A"), &ExportSettings::default(), &mut notifier)
        .unwrap();

    assert_eq!(flattened.text, "# A\n# B\n## B\n");
    assert_eq!(flattened.failures, 1);
    assert!(matches!(notifier.notices[0], Notice::EmbedCycle { ref path, .. } if path == "A.md"));
}

#[cfg(unix)]
#[test]
fn test_export_embeds_note_with_colon_name() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Book.md", "# Book\n![[Q: Intro]]\n");
    write(dir.path(), "Q: Intro.md", "Why read this?\n");

    let engine = ExportEngine::new(FsVault::open(dir.path()).unwrap());
    let mut notifier = CollectingNotifier::new();
    let report = engine
        .export(Some("Book"), &ExportSettings::default(), ExportOptions::default(), &mut notifier)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&report.artifact).unwrap(),
        "# Book\n# Q: Intro\nWhy read this?\n"
    );
    assert_eq!(report.failures, 0);
}

#[test]
fn test_overwrite_never_replaces_root_note() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "R.md", "# Title\n![[Child]]\n");
    write(dir.path(), "Child.md", "body\n");

    let engine = ExportEngine::new(FsVault::open(dir.path()).unwrap());
    let settings = ExportSettings {
        export_prefix: "./".to_string(),
        export_suffix: String::new(),
        ..Default::default()
    };
    let mut notifier = CollectingNotifier::new();

    let err = engine
        .export(Some("R"), &settings, ExportOptions { overwrite: true }, &mut notifier)
        .unwrap_err();

    assert!(matches!(err, ExportError::ConfigurationInvalid));
    assert_eq!(fs::read_to_string(dir.path().join("R.md")).unwrap(), "# Title\n![[Child]]\n");
    assert!(notifier.notices.is_empty());
}
