//! Glob pattern sets with directory-pruning support.

use crate::error::FixtureError;
use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};

/// A compiled set of glob patterns matched against `/`-separated relative
/// paths.
///
/// Beyond plain membership, a pattern set can report whether a directory
/// prefix *may contain* matching descendants, which lets the walker skip
/// whole subtrees. [`PatternSet::may_contain`] is conservative: a `true`
/// may turn out empty and only costs traversal time, but a `false` is
/// definite.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: Vec<String>,
    set: GlobSet,
    prefixes: Vec<PrefixMatcher>,
}

impl PatternSet {
    /// Compile a list of glob patterns.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, FixtureError> {
        let mut builder = GlobSetBuilder::new();
        let mut prefixes = Vec::with_capacity(patterns.len());
        let mut sources = Vec::with_capacity(patterns.len());

        for pattern in patterns {
            let pattern = pattern.as_ref();
            builder.add(compile(pattern)?);
            prefixes.push(PrefixMatcher::build(pattern)?);
            sources.push(pattern.to_string());
        }

        let set = builder
            .build()
            .map_err(|source| FixtureError::InvalidPattern {
                pattern: source.glob().unwrap_or_default().to_string(),
                source,
            })?;

        Ok(Self {
            patterns: sources,
            set,
            prefixes,
        })
    }

    /// Whether `relative_path` matches at least one pattern.
    ///
    /// Directory paths keep their trailing `/` for matching, so a pattern
    /// `sub` does not match the directory entry `sub/`.
    pub fn is_match(&self, relative_path: &str) -> bool {
        self.set.is_match(relative_path)
    }

    /// Whether any pattern could match somewhere below the directory
    /// `prefix` (with or without its trailing slash).
    ///
    /// The empty prefix is the walk root and never prunes.
    pub fn may_contain(&self, prefix: &str) -> bool {
        let parts: Vec<&str> = prefix.split('/').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            return true;
        }
        self.prefixes.iter().any(|m| m.may_contain(&parts))
    }

    /// The source patterns this set was compiled from.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Compile one pattern with `/`-aware wildcards: `*` and `?` stay within a
/// single path segment, `**` spans segments.
fn compile(pattern: &str) -> Result<Glob, FixtureError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| FixtureError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })
}

/// Segment-wise view of one pattern, used only for pruning decisions.
#[derive(Debug, Clone)]
enum PrefixMatcher {
    /// One matcher per pattern segment; `None` marks a `**` segment.
    Segments(Vec<Option<GlobMatcher>>),
    /// Alternations may span a separator, so the pattern cannot be split
    /// into per-segment matchers. Never prunes.
    Any,
}

impl PrefixMatcher {
    fn build(pattern: &str) -> Result<Self, FixtureError> {
        if pattern.contains('{') {
            return Ok(PrefixMatcher::Any);
        }

        let mut segments = Vec::new();
        for segment in pattern.split('/').filter(|s| !s.is_empty()) {
            if segment == "**" {
                segments.push(None);
            } else {
                segments.push(Some(compile(segment)?.compile_matcher()));
            }
        }
        Ok(PrefixMatcher::Segments(segments))
    }

    /// Segment-wise comparison up to the shorter of prefix and pattern. A
    /// prefix deeper than the pattern reports `true`; only a definite
    /// segment mismatch prunes.
    fn may_contain(&self, parts: &[&str]) -> bool {
        let segments = match self {
            PrefixMatcher::Any => return true,
            PrefixMatcher::Segments(segments) => segments,
        };
        for (part, segment) in parts.iter().zip(segments.iter()) {
            match segment {
                // `**` swallows the rest of the prefix.
                None => return true,
                Some(matcher) => {
                    if !matcher.is_match(part) {
                        return false;
                    }
                }
            }
        }
        true
    }
}
