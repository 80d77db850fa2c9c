//! Sample log parsing.
//!
//! One reading per line: `angle_deg,outer_mm,inner_mm`. Whitespace around
//! fields is ignored, as are blank lines and lines starting with `#`.

use std::io::BufRead;

use thiserror::Error;

/// A line that could not be turned into a reading.
#[derive(Debug, Error, PartialEq)]
pub enum LineError {
    /// Not exactly three comma-separated fields.
    #[error("line {line}: expected 3 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    /// A field is not a number.
    #[error("line {line}: field {field} `{text}` is not a number")]
    NotANumber {
        line: usize,
        field: usize,
        text: String,
    },
}

/// Raw reading from the log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub line: usize,
    pub angle_deg: f64,
    pub outer_diameter: f64,
    pub inner_diameter: f64,
}

/// Parse one line. `Ok(None)` for blank and comment lines.
pub fn parse_line(line_no: usize, text: &str) -> Result<Option<Reading>, LineError> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = text.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(LineError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    }

    let mut values = [0.0; 3];
    for (k, (slot, field)) in values.iter_mut().zip(&fields).enumerate() {
        *slot = field.parse().map_err(|_| LineError::NotANumber {
            line: line_no,
            field: k + 1,
            text: field.to_string(),
        })?;
    }

    Ok(Some(Reading {
        line: line_no,
        angle_deg: values[0],
        outer_diameter: values[1],
        inner_diameter: values[2],
    }))
}

/// Iterate over the readings of `reader`, yielding per-line errors.
///
/// I/O errors end the iteration with an `Err`.
pub fn readings<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = std::io::Result<Result<Reading, LineError>>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| match line {
            Ok(text) => parse_line(idx + 1, &text).transpose().map(Ok),
            Err(e) => Some(Err(e)),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_triplet() {
        let r = parse_line(4, " 30.5, 152.01 ,76.0 ").unwrap().unwrap();
        assert_eq!(r.line, 4);
        assert_eq!(r.angle_deg, 30.5);
        assert_eq!(r.outer_diameter, 152.01);
        assert_eq!(r.inner_diameter, 76.0);
    }

    #[test]
    fn skips_blank_and_comment() {
        assert_eq!(parse_line(1, "   "), Ok(None));
        assert_eq!(parse_line(2, "# angle,outer,inner"), Ok(None));
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert_eq!(
            parse_line(7, "1,2"),
            Err(LineError::FieldCount { line: 7, found: 2 })
        );
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_line(3, "0,abc,75").unwrap_err();
        assert!(matches!(err, LineError::NotANumber { field: 2, .. }));
    }

    #[test]
    fn nan_literal_parses_and_is_left_to_the_core() {
        let r = parse_line(1, "0,NaN,75").unwrap().unwrap();
        assert!(r.outer_diameter.is_nan());
    }

    #[test]
    fn iterates_with_line_numbers() {
        let log = "# header\n0,150,75\n\n30,x,75\n60,150,75\n";
        let items: Vec<_> = readings(log.as_bytes()).map(|r| r.unwrap()).collect();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].as_ref().unwrap().line, 2);
        assert!(items[1].is_err());
        assert_eq!(items[2].as_ref().unwrap().line, 5);
    }
}
