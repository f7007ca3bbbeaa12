//! Line-oriented view of the target `mediamtx.yml`.
//!
//! The file is never parsed as YAML. Only two landmarks matter: the
//! `paths:` section header and the later `all_others:` catch-all header.
//! Everything strictly between them is the managed region, rewritten
//! wholesale each cycle; every other line is preserved byte-for-byte,
//! comments and ordering included.

use thiserror::Error;

/// Section header that opens the managed region (matched after trimming).
pub const PATHS_HEADER: &str = "paths:";

/// Prefix of the catch-all header that closes the managed region.
pub const CATCH_ALL_PREFIX: &str = "all_others:";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no `paths:` section header found")]
    MissingPathsHeader,
    #[error("no `all_others:` catch-all header found after `paths:`")]
    MissingCatchAllHeader,
}

/// Parsed document: the original lines plus the two landmark indices.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    lines: Vec<String>,
    paths_idx: usize,
    catch_all_idx: usize,
}

impl ConfigDocument {
    /// Locate the landmarks. The catch-all scan only starts after the
    /// paths header, so an `all_others:` line appearing earlier does not
    /// count.
    pub fn parse(lines: Vec<String>) -> Result<Self, ParseError> {
        let paths_idx = lines
            .iter()
            .position(|l| l.trim() == PATHS_HEADER)
            .ok_or(ParseError::MissingPathsHeader)?;
        let catch_all_idx = lines
            .iter()
            .enumerate()
            .skip(paths_idx + 1)
            .find(|(_, l)| l.trim().starts_with(CATCH_ALL_PREFIX))
            .map(|(i, _)| i)
            .ok_or(ParseError::MissingCatchAllHeader)?;
        Ok(Self {
            lines,
            paths_idx,
            catch_all_idx,
        })
    }

    pub fn paths_index(&self) -> usize {
        self.paths_idx
    }

    pub fn catch_all_index(&self) -> usize {
        self.catch_all_idx
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Rebuild the full line sequence with the managed region replaced by
    /// the given `(name, source)` entries. Pure transform; the document
    /// itself is not mutated.
    ///
    /// `source` values are emitted verbatim. With no entries the header and
    /// catch-all lines become adjacent.
    pub fn replace_managed_region(&self, entries: &[(String, String)]) -> Vec<String> {
        let mut out = Vec::with_capacity(self.lines.len() + entries.len() * 2);
        out.extend_from_slice(&self.lines[..=self.paths_idx]);
        for (name, source) in entries {
            out.push(format!("  {}:", name));
            out.push(format!("    source: {}", source));
        }
        out.extend_from_slice(&self.lines[self.catch_all_idx..]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        text.split('\n').map(|s| s.to_string()).collect()
    }

    const BASE: &str = "\
# managed by mtxsync
logLevel: info

paths:
  old_cam:
    source: rtsp://stale
  all_others:
    sourceOnDemand: yes
";

    #[test]
    fn test_parse_locates_landmarks() {
        let doc = ConfigDocument::parse(lines(BASE)).unwrap();
        assert_eq!(doc.paths_index(), 3);
        assert_eq!(doc.catch_all_index(), 6);
    }

    #[test]
    fn test_parse_missing_paths_header() {
        let err = ConfigDocument::parse(lines("logLevel: info\nall_others:\n")).unwrap_err();
        assert_eq!(err, ParseError::MissingPathsHeader);
    }

    #[test]
    fn test_parse_missing_catch_all() {
        let err = ConfigDocument::parse(lines("paths:\n  cam1:\n")).unwrap_err();
        assert_eq!(err, ParseError::MissingCatchAllHeader);
    }

    #[test]
    fn test_catch_all_before_paths_does_not_count() {
        let err = ConfigDocument::parse(lines("all_others:\npaths:\n")).unwrap_err();
        assert_eq!(err, ParseError::MissingCatchAllHeader);
    }

    #[test]
    fn test_replace_preserves_surroundings() {
        let doc = ConfigDocument::parse(lines(BASE)).unwrap();
        let entries = vec![
            ("cam1".to_string(), "rtsp://x".to_string()),
            ("cam2".to_string(), "rtsp://y".to_string()),
        ];
        let out = doc.replace_managed_region(&entries);
        assert_eq!(
            out.join("\n"),
            "\
# managed by mtxsync
logLevel: info

paths:
  cam1:
    source: rtsp://x
  cam2:
    source: rtsp://y
  all_others:
    sourceOnDemand: yes
"
        );
    }

    #[test]
    fn test_replace_with_no_entries_makes_headers_adjacent() {
        let doc = ConfigDocument::parse(lines(BASE)).unwrap();
        let out = doc.replace_managed_region(&[]);
        let paths_pos = out.iter().position(|l| l.trim() == PATHS_HEADER).unwrap();
        assert!(out[paths_pos + 1].trim().starts_with(CATCH_ALL_PREFIX));
    }

    #[test]
    fn test_round_trip_keeps_indices() {
        let doc = ConfigDocument::parse(lines(BASE)).unwrap();
        let entries = vec![("old_cam".to_string(), "rtsp://stale".to_string())];
        let out = doc.replace_managed_region(&entries);
        let reparsed = ConfigDocument::parse(out).unwrap();
        assert_eq!(reparsed.paths_index(), doc.paths_index());
        assert_eq!(reparsed.catch_all_index(), doc.catch_all_index());
    }

    #[test]
    fn test_indented_paths_header_matches_after_trim() {
        let doc = ConfigDocument::parse(lines("  paths:\n  all_others:\n")).unwrap();
        assert_eq!(doc.paths_index(), 0);
        assert_eq!(doc.catch_all_index(), 1);
    }
}
