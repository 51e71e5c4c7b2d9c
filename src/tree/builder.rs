//! Building fixture trees from relative paths.

use crate::error::TreeError;
use crate::tree::node::{DirTree, TreeNode};

impl DirTree {
    /// Insert a file at a `/`-separated relative path, creating any missing
    /// directories on the way.
    ///
    /// The final segment names the file; everything before it is a directory
    /// chain. A path without a file-name segment (empty, or ending in `/`)
    /// is invalid.
    pub fn insert_file(
        &mut self,
        path: &str,
        contents: impl Into<String>,
    ) -> Result<(), TreeError> {
        let (chain, file) = match path.rsplit_once('/') {
            Some((chain, file)) => (chain, file),
            None => ("", path),
        };
        if file.is_empty() {
            return Err(TreeError::InvalidPath(path.to_string()));
        }

        let parent = self.descend(path, chain.split('/'))?;
        parent
            .0
            .insert(file.to_string(), TreeNode::File(contents.into()));
        Ok(())
    }

    /// Ensure a (possibly nested) directory exists at a `/`-separated
    /// relative path, returning the innermost mapping.
    pub fn ensure_dir(&mut self, path: &str) -> Result<&mut DirTree, TreeError> {
        self.descend(path, path.split('/'))
    }

    /// Walk a directory chain, creating empty mappings along the way.
    ///
    /// Stops at the first empty segment, which a trailing slash produces.
    /// A segment already taken by a file is a conflict.
    fn descend<'a, I>(&mut self, full_path: &str, segments: I) -> Result<&mut DirTree, TreeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut current = self;
        for segment in segments {
            if segment.is_empty() {
                break;
            }
            let child = current
                .0
                .entry(segment.to_string())
                .or_insert_with(|| TreeNode::Dir(DirTree::new()));
            current = match child {
                TreeNode::Dir(tree) => tree,
                _ => {
                    return Err(TreeError::PathConflict {
                        path: full_path.to_string(),
                        segment: segment.to_string(),
                    })
                }
            };
        }
        Ok(current)
    }
}
