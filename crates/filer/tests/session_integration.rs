//! Integration tests for the JFiler session.
//!
//! These tests drive a [`Filer`] through complete flows on a real filesystem:
//! - History traversal and branching
//! - Locked home behaviour
//! - Clipboard copy/cut/paste
//! - Hide/unhide, zip/unzip and search

use std::fs;
use std::path::PathBuf;

use filer::{FileType, Filer, FilerError, PasteOperation, SearchQuery};
use tempfile::TempDir;

/// Create a canonical sandbox laid out as
/// `home/{a.txt, docs/{2024/, notes.md}}` plus a sibling `etc/`.
fn create_test_tree() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let root = fs::canonicalize(temp_dir.path()).unwrap();

    fs::create_dir_all(root.join("home/docs/2024")).unwrap();
    fs::create_dir_all(root.join("etc")).unwrap();
    fs::write(root.join("home/a.txt"), "alpha").unwrap();
    fs::write(root.join("home/docs/notes.md"), "meeting notes").unwrap();

    (temp_dir, root)
}

// =============================================================================
// History Tests
// =============================================================================

#[test]
fn test_backward_and_forward_through_history() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::new(&home).unwrap();

    filer.open_folder(home.join("docs")).unwrap();
    filer.open_folder(home.join("docs/2024")).unwrap();

    assert_eq!(filer.go_backward().unwrap(), home.join("docs"));
    assert_eq!(filer.go_backward().unwrap(), home);
    assert!(matches!(filer.go_backward(), Err(FilerError::NoBackwardHistory)));

    filer.go_forward().unwrap();
    filer.go_forward().unwrap();
    assert_eq!(filer.current_location(), home.join("docs/2024"));
    assert!(matches!(filer.go_forward(), Err(FilerError::NoForwardHistory)));
}

#[test]
fn test_new_navigation_discards_forward_entries() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::new(&home).unwrap();

    filer.open_folder("docs").unwrap();
    filer.open_folder("2024").unwrap();
    filer.go_backward().unwrap();
    filer.go_backward().unwrap();

    filer.open_folder(root.join("etc")).unwrap();

    assert_eq!(filer.history().entries(), &[home.clone(), root.join("etc")]);
    assert!(filer.front_location().is_none());
    assert_eq!(filer.rear_location(), Some(home.as_path()));
}

#[test]
fn test_dot_dot_is_resolved_before_navigation() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::new(home.join("docs/2024")).unwrap();

    filer.open_folder("../..").unwrap();

    assert_eq!(filer.current_location(), home);
}

// =============================================================================
// Locked Home Tests
// =============================================================================

#[test]
fn test_locked_home_rejects_outside_navigation() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::with_lock(&home, true).unwrap();

    assert!(matches!(filer.go_up(), Err(FilerError::HomeIsLocked { .. })));
    assert!(matches!(
        filer.open_folder(root.join("etc")),
        Err(FilerError::HomeIsLocked { .. })
    ));
    assert_eq!(filer.current_location(), home);
    assert_eq!(filer.history().len(), 1);

    // Inside the boundary is fine
    filer.open_folder("docs").unwrap();
    filer.go_up().unwrap();
    assert_eq!(filer.current_location(), home);
}

#[test]
fn test_open_in_locked_home_keeps_lock() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::with_lock(&home, true).unwrap();

    let folder = filer.open_in_locked_home(root.join("etc")).unwrap();

    assert_eq!(folder.location(), root.join("etc"));
    assert_eq!(filer.current_location(), root.join("etc"));
    assert!(filer.is_home_locked());
    assert_eq!(filer.home_location(), home);
    assert_eq!(filer.lock_boundary(), Some(home.as_path()));

    // The next ordinary navigation is checked again
    assert!(matches!(filer.go_up(), Err(FilerError::HomeIsLocked { .. })));
}

#[test]
fn test_locked_sibling_with_common_prefix_is_outside() {
    let (_temp_dir, root) = create_test_tree();
    fs::create_dir_all(root.join("home2")).unwrap();
    let mut filer = Filer::with_lock(root.join("home"), true).unwrap();

    let result = filer.open_folder(root.join("home2"));

    assert!(matches!(result, Err(FilerError::HomeIsLocked { .. })));
}

// =============================================================================
// Clipboard Tests
// =============================================================================

#[test]
fn test_copy_paste_keeps_source() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::new(&home).unwrap();

    filer.copy("a.txt").unwrap();
    assert_eq!(filer.paste_operation(), Some(PasteOperation::Copy));

    let pasted = filer.paste(root.join("etc")).unwrap();

    assert_eq!(pasted.location(), root.join("etc/a.txt"));
    assert_eq!(fs::read_to_string(root.join("etc/a.txt")).unwrap(), "alpha");
    assert!(home.join("a.txt").exists());
    assert!(filer.clipboard().is_none());
}

#[test]
fn test_cut_paste_moves_folder() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::new(&home).unwrap();

    filer.cut("docs").unwrap();
    let pasted = filer.paste(root.join("etc")).unwrap();

    assert_eq!(pasted.file_type(), FileType::Folder);
    assert!(!home.join("docs").exists());
    assert!(root.join("etc/docs/2024").is_dir());
    assert_eq!(
        fs::read_to_string(root.join("etc/docs/notes.md")).unwrap(),
        "meeting notes"
    );
}

#[test]
fn test_paste_to_new_name() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::new(&home).unwrap();

    filer.copy("a.txt").unwrap();
    let pasted = filer.paste("b.txt").unwrap();

    assert_eq!(pasted.location(), home.join("b.txt"));
    assert_eq!(pasted.name(), "b.txt");
}

#[test]
fn test_paste_with_empty_clipboard() {
    let (_temp_dir, root) = create_test_tree();
    let mut filer = Filer::new(root.join("home")).unwrap();

    let result = filer.paste(root.join("etc"));

    assert!(matches!(result, Err(FilerError::NoClipboardOperationPending)));
    assert_eq!(fs::read_dir(root.join("etc")).unwrap().count(), 0);
}

#[test]
fn test_failed_paste_keeps_clipboard_for_retry() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    fs::write(root.join("etc/a.txt"), "existing").unwrap();
    let mut filer = Filer::new(&home).unwrap();

    filer.cut("a.txt").unwrap();
    let result = filer.paste(root.join("etc"));

    assert!(matches!(result, Err(FilerError::AlreadyExists(_))));
    assert_eq!(filer.clipboard(), Some(home.join("a.txt").as_path()));
    assert_eq!(fs::read_to_string(root.join("etc/a.txt")).unwrap(), "existing");

    // Retry somewhere free
    filer.paste(home.join("docs")).unwrap();
    assert!(home.join("docs/a.txt").exists());
    assert!(!home.join("a.txt").exists());
    assert!(filer.clipboard().is_none());
}

#[test]
fn test_overwrite_replaces_target() {
    let (_temp_dir, root) = create_test_tree();
    fs::write(root.join("etc/a.txt"), "existing").unwrap();
    let mut filer = Filer::new(root.join("home")).unwrap().overwrite(true);

    filer.copy("a.txt").unwrap();
    filer.paste(root.join("etc")).unwrap();

    assert_eq!(fs::read_to_string(root.join("etc/a.txt")).unwrap(), "alpha");
}

#[test]
fn test_copy_to_and_cut_to_leave_clipboard_alone() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let mut filer = Filer::new(&home).unwrap();
    filer.copy("docs/notes.md").unwrap();

    filer.copy_to("a.txt", root.join("etc")).unwrap();
    filer.cut_to("a.txt", "docs/2024").unwrap();

    assert!(root.join("etc/a.txt").exists());
    assert!(home.join("docs/2024/a.txt").exists());
    assert!(!home.join("a.txt").exists());
    assert_eq!(filer.clipboard(), Some(home.join("docs/notes.md").as_path()));
}

#[test]
fn test_copy_folder_into_itself_fails() {
    let (_temp_dir, root) = create_test_tree();
    let filer = Filer::new(root.join("home")).unwrap();

    let result = filer.copy_to("docs", "docs/2024");

    assert!(matches!(result, Err(FilerError::DestinationInsideSource { .. })));
}

#[test]
fn test_overwrite_into_ancestor_keeps_source_and_siblings() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    fs::create_dir_all(home.join("d/d")).unwrap();
    fs::write(home.join("d/d/inner.txt"), "inner").unwrap();
    fs::write(home.join("d/other.txt"), "sibling").unwrap();
    let mut filer = Filer::new(&home).unwrap().overwrite(true);

    // `d/d` sent into `home` resolves to `home/d`, its own parent
    let copied = filer.copy_to("d/d", ".");
    filer.cut("d/d").unwrap();
    let pasted = filer.paste(".");

    assert!(matches!(copied, Err(FilerError::TargetContainsSource { .. })));
    assert!(matches!(pasted, Err(FilerError::TargetContainsSource { .. })));
    assert_eq!(fs::read_to_string(home.join("d/d/inner.txt")).unwrap(), "inner");
    assert_eq!(fs::read_to_string(home.join("d/other.txt")).unwrap(), "sibling");
    assert_eq!(filer.clipboard(), Some(home.join("d/d").as_path()));
}

// =============================================================================
// Peripheral Operation Tests
// =============================================================================

#[cfg(unix)]
#[test]
fn test_hide_and_unhide_twice() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let filer = Filer::new(&home).unwrap();

    filer.hide(home.join("a.txt")).unwrap();
    assert!(matches!(
        filer.hide(home.join("a.txt")),
        Err(FilerError::FileIsAlreadyHidden(_))
    ));

    filer.un_hide(home.join("a.txt")).unwrap();
    assert!(matches!(
        filer.un_hide(home.join("a.txt")),
        Err(FilerError::FileIsAlreadyVisible(_))
    ));
    assert!(home.join("a.txt").exists());
}

#[cfg(unix)]
#[test]
fn test_hidden_entries_drop_out_of_listing() {
    let (_temp_dir, root) = create_test_tree();
    let filer = Filer::new(root.join("home")).unwrap();

    filer.hide("a.txt").unwrap();
    let names: Vec<String> = filer.list().unwrap().iter().map(|f| f.name().to_string()).collect();

    assert_eq!(names, vec!["docs"]);
}

#[test]
fn test_create_rename_delete() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let filer = Filer::new(&home).unwrap();

    filer.create_new_folder("drafts").unwrap();
    filer.create_new_file("drafts/file.txt").unwrap();
    let renamed = filer.rename("drafts/file.txt", "newFile.txt").unwrap();

    assert_eq!(renamed.location(), home.join("drafts/newFile.txt"));
    assert!(filer.is_file_exist("drafts/newFile.txt"));
    assert!(!filer.is_file_exist("drafts/file.txt"));

    filer.delete("drafts").unwrap();
    assert!(!filer.is_file_exist("drafts"));
}

#[test]
fn test_zip_then_unzip_reproduces_contents() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let filer = Filer::new(&home).unwrap();

    let archive = filer.zip(&["docs", "a.txt"], root.join("etc/bundle.zip")).unwrap();
    assert_eq!(archive.file_type(), FileType::Archive);

    let extracted = filer.unzip(archive.location(), root.join("etc/out")).unwrap();

    assert_eq!(extracted.location(), root.join("etc/out"));
    assert_eq!(fs::read_to_string(root.join("etc/out/a.txt")).unwrap(), "alpha");
    assert_eq!(
        fs::read_to_string(root.join("etc/out/docs/notes.md")).unwrap(),
        "meeting notes"
    );
    assert!(root.join("etc/out/docs/2024").is_dir());
}

#[test]
fn test_unzip_non_archive_fails() {
    let (_temp_dir, root) = create_test_tree();
    let filer = Filer::new(root.join("home")).unwrap();

    let result = filer.unzip("a.txt", root.join("etc/out"));

    assert!(matches!(result, Err(FilerError::NotAZipFileToExtract(_))));
    assert!(!root.join("etc/out").exists());
}

#[test]
fn test_search_by_name_and_content() {
    let (_temp_dir, root) = create_test_tree();
    let home = root.join("home");
    let filer = Filer::new(&home).unwrap();

    let by_name = filer.search(r"\.md$").unwrap();
    let by_content = filer
        .search_in(".", &SearchQuery::content("alpha").unwrap())
        .unwrap();

    assert_eq!(by_name, vec![home.join("docs/notes.md")]);
    assert_eq!(by_content, vec![home.join("a.txt")]);
    assert!(matches!(
        filer.search_in("a.txt", &SearchQuery::name("a").unwrap()),
        Err(FilerError::CannotSearchInFile(_))
    ));
}
