//! Accelerator path parsing.
//!
//! A path arrives as two strings: the canonical one (`global/quit`) and its
//! localized form. Localized segments may contain a literal `/`, which the
//! registration layer writes as [`ESCAPE`]; each escape in a localized
//! segment swallows one canonical separator, so one tree level may cover
//! several canonical components.

use std::fmt;

use crate::error::{PrefsError, Result};

/// Prefix carried by every canonical path in key-binding files.
pub const PATH_PREFIX: &str = "<Lumen>";

/// Stand-in for `/` inside a single localized segment.
pub const ESCAPE: char = '`';

/// One tree level of an accelerator path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub canonical: String,
    pub localized: String,
    /// Default entry of its group; sorts ahead of its siblings.
    pub pinned: bool,
}

impl Segment {
    fn new(canonical: &str, localized: &str) -> Self {
        let restored = localized.replace(ESCAPE, "/");
        match restored.strip_suffix(' ') {
            Some(trimmed) => Self {
                canonical: canonical.to_string(),
                localized: trimmed.to_string(),
                pinned: true,
            },
            None => Self {
                canonical: canonical.to_string(),
                localized: restored,
                pinned: false,
            },
        }
    }
}

/// A parsed accelerator path: canonical identity plus parallel segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccelPath {
    full: String,
    segments: Vec<Segment>,
}

impl AccelPath {
    /// Parses a canonical path and its localized counterpart.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::TranslationMismatch`] when the localized escapes
    /// ask for more canonical components than exist, and
    /// [`PrefsError::EmptyPath`] for an empty path or one with an empty
    /// component, such as a trailing `/`.
    pub fn parse(canonical: &str, localized: &str) -> Result<Self> {
        let relative = strip_prefix(canonical);
        if relative.split('/').any(str::is_empty) {
            return Err(PrefsError::EmptyPath);
        }
        let mut canon = relative;
        let mut trans = strip_prefix(localized);
        let mut segments = Vec::with_capacity(canon.matches('/').count() + 1);

        while !canon.is_empty() {
            let (Some(end), Some(trans_end)) = (canon.find('/'), trans.find('/')) else {
                segments.push(Segment::new(canon, trans));
                break;
            };

            let trans_node = &trans[..trans_end];
            let mut end = Some(end);
            for _ in trans_node.matches(ESCAPE) {
                end = end.and_then(|e| canon[e + 1..].find('/').map(|next| e + 1 + next));
            }
            let Some(end) = end else {
                return Err(PrefsError::TranslationMismatch {
                    canonical: canonical.to_string(),
                    localized: trans_node.replace(ESCAPE, "/"),
                });
            };

            segments.push(Segment::new(&canon[..end], trans_node));
            canon = &canon[end + 1..];
            trans = &trans[trans_end + 1..];
        }

        Ok(Self {
            full: format!("{PATH_PREFIX}/{relative}"),
            segments,
        })
    }

    /// Parses a path whose localized form equals the canonical one.
    pub fn untranslated(canonical: &str) -> Result<Self> {
        Self::parse(canonical, canonical)
    }

    /// Full canonical path including [`PATH_PREFIX`].
    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// Canonical path without the prefix.
    pub fn relative(&self) -> &str {
        &self.full[PATH_PREFIX.len() + 1..]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Localized path for messages, segments joined with `/`.
    pub fn localized(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.localized.as_str())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for AccelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

fn strip_prefix(path: &str) -> &str {
    path.strip_prefix(PATH_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(path)
}

/// Adds [`PATH_PREFIX`] to a relative canonical path.
pub fn full_path(relative: &str) -> String {
    format!("{PATH_PREFIX}/{}", strip_prefix(relative))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(path: &AccelPath) -> Vec<&str> {
        path.segments().iter().map(|s| s.canonical.as_str()).collect()
    }

    fn local(path: &AccelPath) -> Vec<&str> {
        path.segments().iter().map(|s| s.localized.as_str()).collect()
    }

    #[test]
    fn test_plain_path() {
        let path = AccelPath::parse("<Lumen>/global/quit", "<Lumen>/global/beenden").unwrap();
        assert_eq!(canon(&path), ["global", "quit"]);
        assert_eq!(local(&path), ["global", "beenden"]);
        assert_eq!(path.as_str(), "<Lumen>/global/quit");
        assert_eq!(path.relative(), "global/quit");
    }

    #[test]
    fn test_prefix_is_optional() {
        let path = AccelPath::untranslated("views/map/zoom in").unwrap();
        assert_eq!(path.as_str(), "<Lumen>/views/map/zoom in");
        assert_eq!(canon(&path), ["views", "map", "zoom in"]);
    }

    #[test]
    fn test_escape_merges_canonical_components() {
        // "white balance/temperature" is one localized label over two canonical parts
        let path = AccelPath::parse(
            "image operations/temperature/tint/increase",
            "processing modules/white balance`temperature/increase",
        )
        .unwrap();
        assert_eq!(canon(&path), ["image operations", "temperature/tint", "increase"]);
        assert_eq!(
            local(&path),
            ["processing modules", "white balance/temperature", "increase"]
        );
        assert_eq!(
            canon(&path).join("/"),
            "image operations/temperature/tint/increase"
        );
    }

    #[test]
    fn test_escape_in_leaf_is_restored() {
        let path = AccelPath::parse("styles/bw/sepia", "styles/bw`sepia").unwrap();
        assert_eq!(canon(&path), ["styles", "bw/sepia"]);
        assert_eq!(local(&path), ["styles", "bw/sepia"]);
    }

    #[test]
    fn test_translation_mismatch() {
        let err = AccelPath::parse("global/quit", "global`extra`more/quit").unwrap_err();
        assert!(matches!(err, PrefsError::TranslationMismatch { .. }));
    }

    #[test]
    fn test_trailing_space_marks_pinned() {
        let path = AccelPath::parse(
            "image operations/exposure/preset/bright",
            "processing modules/exposure/preset /bright",
        )
        .unwrap();
        let preset = &path.segments()[2];
        assert!(preset.pinned);
        assert_eq!(preset.localized, "preset");
        assert!(!path.segments()[3].pinned);
    }

    #[test]
    fn test_empty_path() {
        assert!(matches!(AccelPath::untranslated(""), Err(PrefsError::EmptyPath)));
        assert!(matches!(
            AccelPath::untranslated("<Lumen>/"),
            Err(PrefsError::EmptyPath)
        ));
    }

    #[test]
    fn test_empty_component_is_rejected() {
        assert!(matches!(AccelPath::untranslated("global/"), Err(PrefsError::EmptyPath)));
        assert!(matches!(
            AccelPath::parse("<Lumen>/global//quit", "global//quit"),
            Err(PrefsError::EmptyPath)
        ));
    }
}
