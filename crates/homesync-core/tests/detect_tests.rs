//! Tests for change detection

use homesync_core::sync::reasons;
use homesync_core::{AlwaysYes, Settings, SyncEngine};
use homesync_fs::compute_file_checksum;
use homesync_test_utils::TestTree;
use pretty_assertions::assert_eq;
use std::fs;

fn new_engine(tree: &TestTree) -> SyncEngine {
    SyncEngine::new(&tree.configs(), &tree.home(), &Settings::default()).unwrap()
}

/// Sync everything currently detected, forcing past prompts.
fn sync_all(tree: &TestTree) {
    let mut engine = new_engine(tree);
    let files = engine.scan().unwrap();
    engine.sync(&files, true, &mut AlwaysYes).unwrap();
}

#[test]
fn test_new_file_needs_sync_and_gets_record() {
    let tree = TestTree::new();
    let source = tree.write_source(".vimrc", "set number\n");

    let mut engine = new_engine(&tree);
    assert!(engine.needs_sync(&source).unwrap());

    let record = engine.state().get(&source.to_string_lossy()).unwrap();
    assert_eq!(record.sync_reason, reasons::NEW_FILE);
    assert_eq!(record.hash, compute_file_checksum(&source).unwrap());
}

#[test]
fn test_synced_file_is_up_to_date_and_untouched() {
    let tree = TestTree::new();
    let source = tree.write_source(".vimrc", "set number\n");
    sync_all(&tree);

    let mut engine = new_engine(&tree);
    let before = engine.state().get(&source.to_string_lossy()).cloned();

    assert!(!engine.needs_sync(&source).unwrap());
    assert_eq!(engine.state().get(&source.to_string_lossy()).cloned(), before);
}

#[test]
fn test_modified_source_records_new_hash() {
    let tree = TestTree::new();
    let source = tree.write_source(".tmux.conf", "set -g mouse on\n");
    sync_all(&tree);

    fs::write(&source, "set -g mouse off\n").unwrap();

    let mut engine = new_engine(&tree);
    assert!(engine.needs_sync(&source).unwrap());

    let record = engine.state().get(&source.to_string_lossy()).unwrap();
    assert_eq!(record.hash, compute_file_checksum(&source).unwrap());
    assert_eq!(record.sync_reason, reasons::SOURCE_MODIFIED);
}

#[test]
fn test_deleted_target_needs_sync_keeps_hash() {
    let tree = TestTree::new();
    let source = tree.write_source(".gitconfig", "[user]\n\tname = me\n");
    sync_all(&tree);
    fs::remove_file(tree.target(".gitconfig")).unwrap();

    let mut engine = new_engine(&tree);
    let old_hash = engine.state().get(&source.to_string_lossy()).unwrap().hash.clone();

    assert!(engine.needs_sync(&source).unwrap());
    let record = engine.state().get(&source.to_string_lossy()).unwrap();
    assert_eq!(record.sync_reason, reasons::TARGET_MISSING);
    assert_eq!(record.hash, old_hash);
}

#[test]
fn test_edited_overwrite_target_fails_expected_condition() {
    let tree = TestTree::new();
    let source = tree.write_source(".inputrc", "set editing-mode vi\n");
    sync_all(&tree);
    tree.write_target(".inputrc", "set editing-mode emacs\n");

    let mut engine = new_engine(&tree);
    assert!(engine.needs_sync(&source).unwrap());
    assert_eq!(
        engine.state().get(&source.to_string_lossy()).unwrap().sync_reason,
        reasons::CONDITION_UNMET
    );
}

#[test]
fn test_prepend_target_without_directive_fails_expected_condition() {
    let tree = TestTree::new();
    let source = tree.write_source(".bashrc", "alias ll='ls -l'\n");
    sync_all(&tree);
    // Operator rewrote the rc file and dropped the directive
    tree.write_target(".bashrc", "export PS1='$ '\n");

    let mut engine = new_engine(&tree);
    assert!(engine.needs_sync(&source).unwrap());
}

#[test]
fn test_single_line_prepend_target_fails_expected_condition() {
    let tree = TestTree::new();
    let source = tree.write_source(".zshrc", "setopt autocd\n");
    sync_all(&tree);
    tree.write_target(".zshrc", "# one line only");

    let mut engine = new_engine(&tree);
    assert!(engine.needs_sync(&source).unwrap());
}

#[test]
fn test_excluded_files_never_become_candidates() {
    let tree = TestTree::new();
    tree.write_source(".git/config", "[core]\n");
    tree.write_source("README.md", "# my configs\n");
    tree.write_source("nvim/__pycache__/x.pyc", "bytes");
    tree.write_source("setup.sh", "#!/bin/sh\n");
    let kept = tree.write_source(".config/nvim/init.lua", "vim.o.number = true\n");

    let mut engine = new_engine(&tree);
    let files = engine.scan().unwrap();

    assert_eq!(files, vec![kept.clone()]);
    assert_eq!(engine.state().len(), 1);
    assert!(engine.state().contains(&kept.to_string_lossy()));
}

#[test]
fn test_state_file_inside_configs_is_excluded() {
    let tree = TestTree::new();
    tree.write_source(".vimrc", "set number\n");
    sync_all(&tree);

    let mut engine = new_engine(&tree);
    let state_file = engine.state_path().to_path_buf();
    assert!(state_file.exists());
    assert!(!engine.needs_sync(&state_file).unwrap());
}

#[test]
fn test_scan_is_sorted() {
    let tree = TestTree::new();
    let c = tree.write_source("c.conf", "c");
    let a = tree.write_source("a.conf", "a");
    let b = tree.write_source("b/b.conf", "b");

    let mut engine = new_engine(&tree);
    assert_eq!(engine.scan().unwrap(), vec![a, b, c]);
}

#[test]
fn test_source_outside_configs_root_is_error() {
    let tree = TestTree::new();
    let stray = tree.root().join("stray.conf");
    fs::write(&stray, "x").unwrap();

    let mut engine = new_engine(&tree);
    assert!(engine.needs_sync(&stray).is_err());
}

#[test]
fn test_custom_state_file_is_never_a_candidate() {
    let tree = TestTree::new();
    tree.write_source(".vimrc", "set number\n");
    let settings = Settings::parse("state_file = \"state/sync.json\"\n").unwrap();

    for _ in 0..2 {
        let mut engine = SyncEngine::new(&tree.configs(), &tree.home(), &settings).unwrap();
        let files = engine.scan().unwrap();
        engine.sync(&files, true, &mut AlwaysYes).unwrap();
    }

    assert!(tree.source("state/sync.json").exists());
    tree.assert_target_not_exists("state/sync.json");

    let mut engine = SyncEngine::new(&tree.configs(), &tree.home(), &settings).unwrap();
    assert!(engine.scan().unwrap().is_empty());
    assert!(!engine.state().contains(&tree.source("state/sync.json").to_string_lossy()));
}

#[test]
fn test_engine_files_skipped_without_exclude_rules() {
    let tree = TestTree::new();
    let settings_file = tree.write_source("homesync.toml", "exclude = []\n");
    let kept = tree.write_source("README.md", "# configs\n");
    let settings = Settings::load(&tree.configs()).unwrap();
    assert!(settings.exclude.is_empty());

    let mut engine = SyncEngine::new(&tree.configs(), &tree.home(), &settings).unwrap();
    let files = engine.scan().unwrap();
    engine.sync(&files, true, &mut AlwaysYes).unwrap();

    assert_eq!(files, vec![kept]);
    assert!(!engine.needs_sync(&settings_file).unwrap());
    let state_file = engine.state_path().to_path_buf();
    assert!(!engine.needs_sync(&state_file).unwrap());
    tree.assert_target_not_exists("homesync.toml");
    tree.assert_target_not_exists(".sync_state.json");
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::os::unix::fs::symlink;

    #[test]
    fn test_scan_does_not_follow_symlinks() {
        let tree = TestTree::new();
        let outside = tree.root().join("outside");
        fs::create_dir_all(&outside).unwrap();
        fs::write(outside.join("secret.conf"), "x").unwrap();
        symlink(&outside, tree.source("linked")).unwrap();
        symlink(outside.join("secret.conf"), tree.source("linked.conf")).unwrap();
        let kept = tree.write_source("real.conf", "y");

        let mut engine = new_engine(&tree);
        assert_eq!(engine.scan().unwrap(), vec![kept]);
    }
}
