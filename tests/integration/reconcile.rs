//! Integration tests for reconciling trees against existing directories

use fixtree::{read, write, DirTree, TreeNode};
use std::fs;
use tempfile::TempDir;

/// Test that entries the tree does not mention survive a write
#[test]
fn test_unmentioned_entries_survive() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("existing.txt"), "keep me").unwrap();
    fs::create_dir(root.join("existing_dir")).unwrap();
    fs::write(root.join("existing_dir/inner.txt"), "also keep").unwrap();

    let mut tree = DirTree::new();
    tree.insert("fresh.txt", "added");
    write(root, &tree).unwrap();

    assert_eq!(fs::read_to_string(root.join("existing.txt")).unwrap(), "keep me");
    assert_eq!(
        fs::read_to_string(root.join("existing_dir/inner.txt")).unwrap(),
        "also keep"
    );
    assert_eq!(fs::read_to_string(root.join("fresh.txt")).unwrap(), "added");
}

/// Test that an empty tree deletes nothing
#[test]
fn test_empty_tree_leaves_directory_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::create_dir(root.join("b")).unwrap();

    write(root, &DirTree::new()).unwrap();

    assert_eq!(fs::read_to_string(root.join("a.txt")).unwrap(), "a");
    assert!(root.join("b").is_dir());
}

/// Test that a tombstone removes a file
#[test]
fn test_tombstone_removes_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("doomed.txt"), "bye").unwrap();

    let mut tree = DirTree::new();
    tree.insert("doomed.txt", TreeNode::Tombstone);
    write(root, &tree).unwrap();

    assert!(!root.join("doomed.txt").exists());
}

/// Test that a tombstone removes a directory and everything below it
#[test]
fn test_tombstone_removes_directory_recursively() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("doomed/deep")).unwrap();
    fs::write(root.join("doomed/deep/file.txt"), "x").unwrap();

    let mut tree = DirTree::new();
    tree.insert("doomed", TreeNode::Tombstone);
    write(root, &tree).unwrap();

    assert!(!root.join("doomed").exists());
}

/// Test that a nested tombstone removes only its own entry
#[test]
fn test_nested_tombstone_is_scoped() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("dir")).unwrap();
    fs::write(root.join("dir/gone.txt"), "x").unwrap();
    fs::write(root.join("dir/stays.txt"), "y").unwrap();

    let mut tree = DirTree::new();
    let mut dir = DirTree::new();
    dir.insert("gone.txt", TreeNode::Tombstone);
    tree.insert("dir", dir);
    write(root, &tree).unwrap();

    assert!(!root.join("dir/gone.txt").exists());
    assert_eq!(fs::read_to_string(root.join("dir/stays.txt")).unwrap(), "y");
}

/// Test that write followed by read reproduces the tree without tombstones
#[test]
fn test_write_read_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let mut tree = DirTree::new();
    tree.insert_file("a/b/c.txt", "deep").unwrap();
    tree.insert_file("a/top.txt", "top").unwrap();
    tree.ensure_dir("hollow").unwrap();
    write(root, &tree).unwrap();

    let captured = read(root).unwrap();
    assert_eq!(captured, tree);
}

/// Test that writing the same tree twice leaves the directory unchanged
#[test]
fn test_repeated_write_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let mut tree = DirTree::new();
    tree.insert_file("x/y.txt", "stable").unwrap();
    write(root, &tree).unwrap();
    let first = read(root).unwrap();

    write(root, &tree).unwrap();
    let second = read(root).unwrap();
    assert_eq!(first, second);
}

/// Test layering two writes, the second patching the first
#[test]
fn test_sequential_writes_layer() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let mut base = DirTree::new();
    base.insert_file("app/config.json", "{}").unwrap();
    base.insert_file("app/main.rs", "fn main() {}").unwrap();
    write(root, &base).unwrap();

    let mut patch = DirTree::new();
    let mut app = DirTree::new();
    app.insert("config.json", TreeNode::Tombstone);
    app.insert("extra.rs", "mod extra;");
    patch.insert("app", app);
    write(root, &patch).unwrap();

    let result = read(root).unwrap();
    let mut expected = DirTree::new();
    expected.insert_file("app/main.rs", "fn main() {}").unwrap();
    expected.insert_file("app/extra.rs", "mod extra;").unwrap();
    assert_eq!(result, expected);
}
