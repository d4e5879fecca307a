//! Policy for destinations without a time-with-timezone type (Iceberg
//! style table formats). Those store the local time of day and drop the
//! offset, so expected `14:30:00+02:00` becomes `14:30:00`.

use recnorm_core::{AirbyteType, Value};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Time, UtcOffset};

use crate::context::{DiagnosticKind, MapContext};
use crate::identity::{Mapped, ValueMapper};

/// Rewrites TimeWithTimezone positions to their local time of day.
/// Everything else, including TimeWithoutTimezone, is left alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTimeOffset;

impl ValueMapper for DropTimeOffset {
    fn map_time_with_timezone(&self, value: &Value, ctx: MapContext) -> Mapped {
        let Value::Time(text) = value else {
            let message = format!("expected a Time value, found {}", value.type_name());
            return (value.clone(), ctx.report(DiagnosticKind::ShapeMismatch, message));
        };
        match strip_offset(text) {
            Ok(local) => (Value::Time(local), ctx),
            Err(e) => {
                let message = format!("cannot read {:?} as a time with offset: {}", text, e);
                (
                    value.clone(),
                    ctx.report(DiagnosticKind::UnparseableTemporal, message),
                )
            }
        }
    }

    fn map_mismatch(&self, value: &Value, ty: &AirbyteType, ctx: MapContext) -> Mapped {
        let message = format!("expected {}, found {}", ty, value.type_name());
        (value.clone(), ctx.report(DiagnosticKind::ShapeMismatch, message))
    }
}

// ──────────────────────────────────────────────
// Offset time parsing
// ──────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum OffsetTimeError {
    #[error("no UTC offset")]
    MissingOffset,
    #[error("invalid time of day {0:?}")]
    InvalidTime(String),
    #[error("invalid offset {0:?}")]
    InvalidOffset(String),
    #[error("cannot format time: {0}")]
    Format(#[from] time::error::Format),
}

const LOCAL_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[hour]:[minute]:[second].[subsecond]"),
    format_description!("[hour]:[minute]:[second]"),
    format_description!("[hour]:[minute]"),
];

const OFFSET_FORMATS: [&[BorrowedFormatItem<'static>]; 2] = [
    format_description!("[offset_hour sign:mandatory]:[offset_minute]:[offset_second]"),
    format_description!("[offset_hour sign:mandatory]:[offset_minute]"),
];

const WHOLE_SECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second]");
const MILLISECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:3]");
const MICROSECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:6]");
const NANOSECONDS: &[BorrowedFormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:9]");

/// Largest offset a time of day may carry, in seconds.
const MAX_OFFSET_SECONDS: i32 = 18 * 3600;

/// Parse an offset-qualified time of day (`HH:MM[:SS[.fff]]` followed by
/// `Z` or `±HH:MM[:SS]`, at most 18 hours) and return the local part as
/// `HH:MM:SS`. A non-zero fraction is written in groups of three digits
/// (`.250`, `.100200`, `.000000001`).
pub fn strip_offset(text: &str) -> Result<String, OffsetTimeError> {
    let (local, offset) = split_offset(text).ok_or(OffsetTimeError::MissingOffset)?;
    if let Some(offset) = offset {
        parse_offset(offset)?;
    }
    let time = parse_local_time(local)?;
    let format = match time.nanosecond() {
        0 => WHOLE_SECONDS,
        n if n % 1_000_000 == 0 => MILLISECONDS,
        n if n % 1_000 == 0 => MICROSECONDS,
        _ => NANOSECONDS,
    };
    Ok(time.format(format)?)
}

/// Split into (local part, explicit offset). `None` for the offset means
/// the `Z` designator.
fn split_offset(text: &str) -> Option<(&str, Option<&str>)> {
    if let Some(local) = text.strip_suffix('Z') {
        return Some((local, None));
    }
    let at = text.rfind(['+', '-'])?;
    Some((&text[..at], Some(&text[at..])))
}

fn parse_offset(offset: &str) -> Result<UtcOffset, OffsetTimeError> {
    OFFSET_FORMATS
        .into_iter()
        .find_map(|format| UtcOffset::parse(offset, format).ok())
        .filter(|parsed| parsed.whole_seconds().abs() <= MAX_OFFSET_SECONDS)
        .ok_or_else(|| OffsetTimeError::InvalidOffset(offset.to_string()))
}

fn parse_local_time(local: &str) -> Result<Time, OffsetTimeError> {
    LOCAL_TIME_FORMATS
        .into_iter()
        .find_map(|format| Time::parse(local, format).ok())
        .ok_or_else(|| OffsetTimeError::InvalidTime(local.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recnorm_core::{FieldType, ObjectType, ObjectValue};

    #[test]
    fn strips_positive_negative_and_zulu_offsets() {
        assert_eq!(strip_offset("14:30:00+02:00").unwrap(), "14:30:00");
        assert_eq!(strip_offset("23:59:59-08:00").unwrap(), "23:59:59");
        assert_eq!(strip_offset("00:00:00Z").unwrap(), "00:00:00");
        assert_eq!(strip_offset("05:06:07+05:30:15").unwrap(), "05:06:07");
    }

    #[test]
    fn keeps_fraction_and_fills_seconds() {
        assert_eq!(strip_offset("10:15:30.123+01:00").unwrap(), "10:15:30.123");
        assert_eq!(strip_offset("10:15+01:00").unwrap(), "10:15:00");
    }

    #[test]
    fn fraction_is_written_in_three_digit_groups() {
        assert_eq!(strip_offset("18:00:00.250-03:00").unwrap(), "18:00:00.250");
        assert_eq!(strip_offset("10:00:00.100000+01:00").unwrap(), "10:00:00.100");
        assert_eq!(strip_offset("10:00:00.1+01:00").unwrap(), "10:00:00.100");
        assert_eq!(
            strip_offset("10:00:00.1002Z").unwrap(),
            "10:00:00.100200"
        );
        assert_eq!(
            strip_offset("10:00:00.000000001Z").unwrap(),
            "10:00:00.000000001"
        );
        assert_eq!(strip_offset("10:00:00.000+01:00").unwrap(), "10:00:00");
    }

    #[test]
    fn rejects_out_of_range_offset_and_lowercase_zulu() {
        assert!(matches!(
            strip_offset("10:00:00+19:00"),
            Err(OffsetTimeError::InvalidOffset(_))
        ));
        assert!(matches!(
            strip_offset("10:00:00-18:00:01"),
            Err(OffsetTimeError::InvalidOffset(_))
        ));
        assert_eq!(strip_offset("10:00:00-18:00").unwrap(), "10:00:00");
        assert!(strip_offset("10:00:00z").is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(matches!(
            strip_offset("14:30:00"),
            Err(OffsetTimeError::MissingOffset)
        ));
        assert!(strip_offset("not-a-time").is_err());
        assert!(matches!(
            strip_offset("25:00:00+01:00"),
            Err(OffsetTimeError::InvalidTime(_))
        ));
        assert!(matches!(
            strip_offset("10:00:00+1"),
            Err(OffsetTimeError::InvalidOffset(_))
        ));
    }

    #[test]
    fn hook_rewrites_with_timezone_only() {
        let value = Value::Time("14:30:00+02:00".into());

        let (mapped, ctx) =
            DropTimeOffset.map(&value, &AirbyteType::TimeWithTimezone, MapContext::new());
        assert_eq!(mapped, Value::Time("14:30:00".into()));
        assert!(ctx.diagnostics().is_empty());

        let (mapped, _) =
            DropTimeOffset.map(&value, &AirbyteType::TimeWithoutTimezone, MapContext::new());
        assert_eq!(mapped, value);
    }

    #[test]
    fn hook_reports_unparseable_and_misshapen_values() {
        let bad = Value::Time("not-a-time".into());
        let (mapped, ctx) =
            DropTimeOffset.map(&bad, &AirbyteType::TimeWithTimezone, MapContext::new());
        assert_eq!(mapped, bad);
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(
            ctx.diagnostics()[0].kind,
            DiagnosticKind::UnparseableTemporal
        );

        let wrong = Value::String("not-a-time".into());
        let (mapped, ctx) =
            DropTimeOffset.map(&wrong, &AirbyteType::TimeWithTimezone, MapContext::new());
        assert_eq!(mapped, wrong);
        assert_eq!(ctx.diagnostics()[0].kind, DiagnosticKind::ShapeMismatch);
    }

    #[test]
    fn composite_mismatch_is_reported() {
        let schema = AirbyteType::Object(
            ObjectType::new().with(
                "o",
                FieldType::nullable(AirbyteType::Object(
                    ObjectType::new().with("x", FieldType::nullable(AirbyteType::Integer)),
                )),
            ),
        );
        let mut obj = ObjectValue::new();
        obj.insert("o", Value::String("oops".into()));
        obj.insert("undeclared", Value::Integer(1));
        let value = Value::Object(obj);

        let (mapped, ctx) = DropTimeOffset.map(&value, &schema, MapContext::new());
        assert_eq!(mapped, value);
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(ctx.diagnostics()[0].path, "$.o");
        assert_eq!(ctx.diagnostics()[0].kind, DiagnosticKind::ShapeMismatch);
        assert!(ctx.path().is_root());
    }
}
