use crate::error::{AppError, Result};
use crate::types::ColorTriple;
use crate::utils::parse_hex_color;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};
use serde_derive::Deserialize;

#[derive(Debug, Deserialize)]
struct ColorsDocument {
    #[serde(default)]
    colors: Vec<[String; 3]>,
}

/// Loads color triples from `path`. A `.toml` file is read as a `colors` array
/// of three-element arrays, anything else as `c1,c2,c3` lines.
///
/// A missing file yields no triples, so the run does nothing.
pub fn load_triples(path: &Path) -> Result<Vec<ColorTriple>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("colors file {} not found, nothing to run", path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(AppError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let is_toml = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));

    let triples = if is_toml {
        parse_toml_triples(path, &text)?
    } else {
        parse_triples(path, &text)?
    };
    debug!("loaded {} color triples from {}", triples.len(), path.display());

    Ok(triples)
}

pub fn parse_triples(source: &Path, text: &str) -> Result<Vec<ColorTriple>> {
    let mut triples = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        let parse_error = |reason: String| AppError::Parse {
            path: source.to_path_buf(),
            line: index + 1,
            reason,
        };

        if fields.len() != 3 {
            return Err(parse_error(format!(
                "expected 3 comma-separated colors, found {}",
                fields.len()
            )));
        }
        if let Some(position) = fields.iter().position(|f| f.is_empty()) {
            return Err(parse_error(format!("color {} is empty", position + 1)));
        }

        triples.push(ColorTriple::new(fields[0], fields[1], fields[2]));
    }

    Ok(triples)
}

pub fn parse_toml_triples(source: &Path, text: &str) -> Result<Vec<ColorTriple>> {
    let document: ColorsDocument = toml::from_str(text).map_err(|e| AppError::Toml {
        path: source.to_path_buf(),
        source: e,
    })?;

    Ok(document.colors.into_iter().map(ColorTriple::from).collect())
}

/// Fails on the first token tricolor would reject as a hex color.
pub fn validate_hex(triples: &[ColorTriple]) -> Result<()> {
    for triple in triples {
        for token in triple.tokens() {
            parse_hex_color(token)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;

    fn source() -> PathBuf {
        PathBuf::from("colors.txt")
    }

    #[test]
    fn one_triple_per_line() {
        let triples = parse_triples(&source(), "red,green,blue\ncyan,magenta,yellow\n").unwrap();
        assert_eq!(
            triples,
            vec![
                ColorTriple::new("red", "green", "blue"),
                ColorTriple::new("cyan", "magenta", "yellow"),
            ]
        );
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "\n0xFF0000, 0xFFA500 ,0xFFFF00\r\n\n   \n";
        let triples = parse_triples(&source(), text).unwrap();
        assert_eq!(triples, vec![ColorTriple::new("0xFF0000", "0xFFA500", "0xFFFF00")]);
    }

    #[test]
    fn hash_prefixed_colors_are_a_triple() {
        let triples = parse_triples(&source(), "#1E2761,#F96167,#F9E795\n").unwrap();
        assert_eq!(triples, vec![ColorTriple::new("#1E2761", "#F96167", "#F9E795")]);
        assert!(validate_hex(&triples).is_ok());
    }

    #[test]
    fn empty_file_has_no_triples() {
        assert!(parse_triples(&source(), "").unwrap().is_empty());
    }

    #[test]
    fn wrong_arity_reports_line() {
        let err = parse_triples(&source(), "red,green,blue\nred,green\n").unwrap_err();
        match err {
            AppError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 2"), "{reason}");
            }
            other => panic!("unexpected error {other:?}"),
        }

        let err = parse_triples(&source(), "a,b,c,d").unwrap_err();
        assert!(matches!(err, AppError::Parse { line: 1, .. }));
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = parse_triples(&source(), "red,,blue").unwrap_err();
        assert_eq!(err.to_string(), "colors.txt:1: color 2 is empty");
    }

    #[test]
    fn toml_document() {
        let text = r#"
colors = [
    ["0x1E2761", "0xF96167", "0xF9E795"],
    ["red", "green", "blue"],
]
"#;
        let triples = parse_toml_triples(Path::new("colors.toml"), text).unwrap();
        assert_eq!(triples.len(), 2);
        assert_eq!(triples[0].tokens(), ["0x1E2761", "0xF96167", "0xF9E795"]);
    }

    #[test]
    fn toml_arity_is_enforced() {
        let err = parse_toml_triples(Path::new("colors.toml"), r#"colors = [["a", "b"]]"#)
            .unwrap_err();
        assert!(matches!(err, AppError::Toml { .. }));
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let triples = load_triples(&dir.path().join("colors.txt")).unwrap();
        assert!(triples.is_empty());
    }

    #[test]
    fn load_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("palette.TOML");
        fs::write(&toml_path, r#"colors = [["a", "b", "c"]]"#).unwrap();
        let text_path = dir.path().join("colors.txt");
        fs::write(&text_path, "a,b,c\nd,e,f\n").unwrap();

        assert_eq!(load_triples(&toml_path).unwrap().len(), 1);
        assert_eq!(load_triples(&text_path).unwrap().len(), 2);
    }

    #[test]
    fn hex_validation_names_offender() {
        let good = vec![ColorTriple::new("0x1E2761", "#F96167", "F9E795")];
        assert!(validate_hex(&good).is_ok());

        let bad = vec![ColorTriple::new("0x1E2761", "navy", "F9E795")];
        match validate_hex(&bad).unwrap_err() {
            AppError::InvalidColor { token, .. } => assert_eq!(token, "navy"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
