//! Descriptor merge behaviour on disk.

use std::path::Path;

use lookup_codegen::{CodegenError, DescriptorMerger, MergeOutcome};

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn test_first_merge_creates_sorted_descriptor() {
    let out = tempfile::tempdir().unwrap();
    let merger = DescriptorMerger::new(out.path());

    let outcome = merger.merge("app.Service", &["app.Zulu", "app.Alpha"]).unwrap();

    let expected = out.path().join("META-INF/services/app.Service");
    assert_eq!(
        outcome,
        MergeOutcome::Written {
            path: expected.clone(),
            added: 2
        }
    );
    assert_eq!(read(&expected), "app.Alpha\napp.Zulu\n");
}

#[test]
fn test_second_identical_merge_leaves_file_untouched() {
    let out = tempfile::tempdir().unwrap();
    let merger = DescriptorMerger::new(out.path());
    let first = merger.merge("app.Service", &["app.One", "app.Two"]).unwrap();
    let path = first.path().to_path_buf();
    let modified = std::fs::metadata(&path).unwrap().modified().unwrap();

    let second = merger.merge("app.Service", &["app.Two", "app.One"]).unwrap();

    assert_eq!(second, MergeOutcome::Unchanged { path: path.clone() });
    assert_eq!(read(&path), "app.One\napp.Two\n");
    assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), modified);
}

#[test]
fn test_merges_accumulate_as_sorted_union() {
    let out = tempfile::tempdir().unwrap();
    let merger = DescriptorMerger::new(out.path());

    merger.merge("app.Service", &["app.C", "app.A"]).unwrap();
    let outcome = merger.merge("app.Service", &["app.B", "app.A"]).unwrap();

    assert_eq!(
        outcome,
        MergeOutcome::Written {
            path: out.path().join("META-INF/services/app.Service"),
            added: 1
        }
    );
    assert_eq!(read(outcome.path()), "app.A\napp.B\napp.C\n");
}

#[test]
fn test_hand_edited_entries_are_kept() {
    let out = tempfile::tempdir().unwrap();
    let services = out.path().join("META-INF/services");
    std::fs::create_dir_all(&services).unwrap();
    std::fs::write(services.join("app.Service"), "# manual\napp.Manual\n").unwrap();

    let merger = DescriptorMerger::new(out.path());
    merger.merge("app.Service", &["app.Generated"]).unwrap();

    assert_eq!(read(&services.join("app.Service")), "app.Generated\napp.Manual\n");
}

#[test]
fn test_write_failure_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("out");
    std::fs::write(&blocker, "not a directory").unwrap();

    let err = DescriptorMerger::new(&blocker)
        .merge("app.Service", &["app.One"])
        .unwrap_err();

    assert!(matches!(err, CodegenError::DescriptorWrite { .. }));
    assert!(err.to_string().contains("app.Service"));
}
