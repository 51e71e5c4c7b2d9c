//! Integration tests for glob and ignore filtering during capture

use fixtree::{read_with, ReadOptions, TreeNode, WalkOptions, Walker};
use std::fs;
use tempfile::TempDir;

/// Test that globs restrict which files are captured
#[test]
fn test_globs_restrict_capture() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("b.rs"), "b").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.txt"), "c").unwrap();

    let options = ReadOptions {
        globs: Some(vec!["**/*.txt".to_string()]),
        ..Default::default()
    };
    let tree = read_with(root, &options).unwrap();

    assert!(tree.get("a.txt").is_some());
    assert!(tree.get("b.rs").is_none());
    let sub = tree.get("sub").and_then(TreeNode::as_dir).unwrap();
    assert!(sub.get("c.txt").is_some());
}

/// Test that an unmatched directory still yields its matching descendants
#[test]
fn test_glob_miss_on_directory_does_not_hide_children() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::create_dir(root.join("nomatch")).unwrap();
    fs::write(root.join("nomatch/hit.log"), "h").unwrap();

    let options = ReadOptions {
        globs: Some(vec!["**/*.log".to_string()]),
        ..Default::default()
    };
    let tree = read_with(root, &options).unwrap();

    // The directory itself did not match, but insert_file recreates the chain.
    let sub = tree.get("nomatch").and_then(TreeNode::as_dir).unwrap();
    assert_eq!(sub.get("hit.log"), Some(&TreeNode::File("h".to_string())));
}

/// Test that ignore skips a whole subtree during capture
#[test]
fn test_ignore_skips_subtree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("kept.txt"), "k").unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
    fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();

    let options = ReadOptions {
        ignore: Some(vec!["node_modules".to_string()]),
        ..Default::default()
    };
    let tree = read_with(root, &options).unwrap();

    assert_eq!(tree.len(), 1);
    assert!(tree.get("kept.txt").is_some());
}

/// Test that ignore patterns match nested paths too
#[test]
fn test_ignore_matches_nested_paths() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src/lib.rs"), "lib").unwrap();
    fs::write(root.join("src/lib.bak"), "old").unwrap();

    let options = ReadOptions {
        ignore: Some(vec!["**/*.bak".to_string()]),
        ..Default::default()
    };
    let tree = read_with(root, &options).unwrap();

    let src = tree.get("src").and_then(TreeNode::as_dir).unwrap();
    assert!(src.get("lib.rs").is_some());
    assert!(src.get("lib.bak").is_none());
}

/// Test that a star pattern does not cross directory boundaries
#[test]
fn test_star_stays_within_segment() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("top.txt"), "t").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/deep.txt"), "d").unwrap();

    let options = WalkOptions {
        globs: Some(vec!["*.txt".to_string()]),
        ..Default::default()
    };
    let paths = Walker::with_options(root, options).unwrap().paths().unwrap();
    assert_eq!(paths, ["top.txt"]);
}

/// Test that directory entries need a trailing slash in the pattern
#[test]
fn test_directory_pattern_needs_trailing_slash() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir(root.join("sub")).unwrap();

    let options = WalkOptions {
        globs: Some(vec!["sub".to_string()]),
        ..Default::default()
    };
    let paths = Walker::with_options(root, options).unwrap().paths().unwrap();
    assert!(paths.is_empty());

    let options = WalkOptions {
        globs: Some(vec!["sub/".to_string()]),
        ..Default::default()
    };
    let paths = Walker::with_options(root, options).unwrap().paths().unwrap();
    assert_eq!(paths, ["sub/"]);
}

/// Test that an invalid glob pattern fails up front
#[test]
fn test_invalid_glob_fails_before_walking() {
    let temp_dir = TempDir::new().unwrap();
    let options = ReadOptions {
        globs: Some(vec!["a[unclosed".to_string()]),
        ..Default::default()
    };
    let err = read_with(temp_dir.path(), &options).unwrap_err();
    assert!(matches!(err, fixtree::FixtureError::InvalidPattern { .. }));
}
