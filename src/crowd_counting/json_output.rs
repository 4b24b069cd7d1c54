use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::Formatter;
use std::io;

/// Compact single-line JSON with a space after every `:` and `,`, i.e. `{"count": 2, "confidence": 0.8}`.
///
/// Downstream consumers were written against this layout, so keep it stable.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

pub fn to_json_line<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crowd_counting::summary::DetectionSummary;

    #[test]
    fn empty_summary_layout() {
        let summary = DetectionSummary {
            count: 0,
            confidence: 0.0,
        };
        assert_eq!(
            to_json_line(&summary).unwrap(),
            r#"{"count": 0, "confidence": 0.0}"#
        );
    }

    #[test]
    fn summary_layout() {
        let summary = DetectionSummary {
            count: 2,
            confidence: 0.8,
        };
        assert_eq!(
            to_json_line(&summary).unwrap(),
            r#"{"count": 2, "confidence": 0.8}"#
        );
    }

    #[test]
    fn output_parses_back() {
        let summary = DetectionSummary {
            count: 3,
            confidence: 0.61,
        };
        let value: serde_json::Value = serde_json::from_str(&to_json_line(&summary).unwrap()).unwrap();
        assert_eq!(value["count"], 3);
        assert_eq!(value["confidence"], 0.61);
    }

    #[test]
    fn arrays_are_spaced_too() {
        assert_eq!(to_json_line(&[1, 2, 3]).unwrap(), "[1, 2, 3]");
    }
}
