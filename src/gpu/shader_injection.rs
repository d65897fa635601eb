//! Text-level shader preprocessing.
//!
//! A shader source carries a marker comment on a line of its own; injection
//! replaces that line with a snippet before the source is handed to the
//! composer. Exactly one marker must be present.

use std::fmt;

/// Marker line in `car_lights.wgsl` where the distortion function goes.
pub const DISTORTION_MARKER: &str = "//#distortion";

/// Why a snippet could not be spliced in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// No line carries the marker.
    MarkerNotFound {
        /// The marker searched for.
        marker: String,
    },
    /// More than one line carries the marker.
    DuplicateMarker {
        /// The marker searched for.
        marker: String,
        /// How many lines matched.
        count: usize,
    },
}

impl fmt::Display for InjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkerNotFound { marker } => {
                write!(f, "marker '{marker}' not found")
            }
            Self::DuplicateMarker { marker, count } => {
                write!(f, "marker '{marker}' appears {count} times")
            }
        }
    }
}

impl std::error::Error for InjectionError {}

/// Replace the single line whose trimmed content starts with `marker` by
/// `snippet`.
///
/// # Errors
///
/// Returns [`InjectionError`] if the marker is missing or repeated.
pub fn inject(
    source: &str,
    marker: &str,
    snippet: &str,
) -> Result<String, InjectionError> {
    let is_marker = |line: &str| line.trim_start().starts_with(marker);
    let count = source.lines().filter(|l| is_marker(l)).count();
    match count {
        0 => {
            return Err(InjectionError::MarkerNotFound {
                marker: marker.to_owned(),
            })
        }
        1 => {}
        _ => {
            return Err(InjectionError::DuplicateMarker {
                marker: marker.to_owned(),
                count,
            })
        }
    }

    let mut out = String::with_capacity(source.len() + snippet.len());
    for line in source.lines() {
        if is_marker(line) {
            out.push_str(snippet);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    if !source.ends_with('\n') {
        let _ = out.pop();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_marker_line() {
        let src = "a\n  //#distortion\nb\n";
        let out = inject(src, DISTORTION_MARKER, "fn x() {}").unwrap();
        assert_eq!(out, "a\nfn x() {}\nb\n");
    }

    #[test]
    fn preserves_missing_trailing_newline() {
        let out = inject("//#distortion\nend", DISTORTION_MARKER, "x").unwrap();
        assert_eq!(out, "x\nend");
    }

    #[test]
    fn missing_marker_is_an_error() {
        let err = inject("a\nb", DISTORTION_MARKER, "x").unwrap_err();
        assert_eq!(
            err,
            InjectionError::MarkerNotFound {
                marker: DISTORTION_MARKER.to_owned()
            }
        );
    }

    #[test]
    fn duplicate_marker_is_an_error() {
        let src = "//#distortion\n//#distortion\n";
        let err = inject(src, DISTORTION_MARKER, "x").unwrap_err();
        assert!(matches!(
            err,
            InjectionError::DuplicateMarker { count: 2, .. }
        ));
    }

    #[test]
    fn marker_mid_line_is_ignored() {
        let src = "let a = 1; //#distortion\n//#distortion\n";
        let out = inject(src, DISTORTION_MARKER, "x").unwrap();
        assert_eq!(out, "let a = 1; //#distortion\nx\n");
    }
}
