//! Due-date and recurrence option types
//!
//! A todo line may carry `{key:value}` option blocks. Parsed and validated,
//! they become a [`DueDateOption`]: the next occurrence date plus an optional
//! recurrence rule.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::date::PlainDate;

/// Raw option keys and values, as tokenized from the option blocks.
///
/// A `BTreeMap` keeps iteration deterministic so error messages embedding
/// the mapping are stable.
pub type RawOptionMap = BTreeMap<String, String>;

/// Errors produced while parsing and validating todo options.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    /// The key combination matches no recognized option shape.
    #[error("Invalid due date options: {}", render_map(.0))]
    UnrecognizedOptions(RawOptionMap),

    /// A field value is present but not an integer.
    #[error("Invalid {field} value: {value}")]
    InvalidFieldValue { field: &'static str, value: String },

    /// An integer field falls outside its allowed range.
    #[error("{field} must be between {min} and {max}: {value}")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// `every` parsed as an integer but is not positive.
    #[error("every must be greater than 0: {0}")]
    EveryOutOfRange(String),

    /// The `due`/`next` value is not a valid calendar date.
    #[error("Invalid next due date: {0}")]
    InvalidNextDate(String),
}

fn render_map(map: &RawOptionMap) -> String {
    serde_json::to_string(map).unwrap_or_default()
}

/// Recurrence cadence for a repeating todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DueDateRepeat {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl DueDateRepeat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DueDateRepeat::Daily => "daily",
            DueDateRepeat::Weekly => "weekly",
            DueDateRepeat::Monthly => "monthly",
            DueDateRepeat::Yearly => "yearly",
        }
    }
}

impl FromStr for DueDateRepeat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(DueDateRepeat::Daily),
            "weekly" => Ok(DueDateRepeat::Weekly),
            "monthly" => Ok(DueDateRepeat::Monthly),
            "yearly" => Ok(DueDateRepeat::Yearly),
            _ => Err(()),
        }
    }
}

impl fmt::Display for DueDateRepeat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated due-date descriptor.
///
/// `next` is the next (or only) occurrence. `repeat` is `None` for a one-off
/// due date. The remaining fields refine a recurrence and are populated only
/// for the shape they belong to: `day_of_week` with weekly, `day_of_month` /
/// `week_of_month` with monthly, `day_of_year` / `week_of_year` /
/// `month_of_year` with yearly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DueDateOption {
    pub next: PlainDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<DueDateRepeat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub every: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_of_month: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_year: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub week_of_year: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub month_of_year: Option<u32>,
}

impl DueDateOption {
    /// A one-off due date with no recurrence.
    pub fn once(next: PlainDate) -> Self {
        Self {
            next,
            repeat: None,
            every: None,
            day_of_week: None,
            day_of_month: None,
            week_of_month: None,
            day_of_year: None,
            week_of_year: None,
            month_of_year: None,
        }
    }

    /// True if this descriptor carries a recurrence rule.
    pub fn is_recurring(&self) -> bool {
        self.repeat.is_some()
    }
}

/// All structured metadata attached to one todo line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoOptions {
    /// `None` means the todo carries no scheduling metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDateOption>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_round_trip() {
        for s in ["daily", "weekly", "monthly", "yearly"] {
            let repeat: DueDateRepeat = s.parse().unwrap();
            assert_eq!(repeat.as_str(), s);
        }
        assert!("hourly".parse::<DueDateRepeat>().is_err());
    }

    #[test]
    fn unrecognized_options_display_embeds_mapping() {
        let mut map = RawOptionMap::new();
        map.insert("repeat".to_string(), "daily".to_string());
        map.insert("dayOfWeek".to_string(), "3".to_string());

        let err = OptionsError::UnrecognizedOptions(map);
        let message = err.to_string();
        assert!(message.starts_with("Invalid due date options: "));
        assert!(message.contains("\"repeat\":\"daily\""));
        assert!(message.contains("\"dayOfWeek\":\"3\""));
    }

    #[test]
    fn range_error_display() {
        let err = OptionsError::FieldOutOfRange {
            field: "dayOfWeek",
            value: 9,
            min: 1,
            max: 7,
        };
        assert_eq!(err.to_string(), "dayOfWeek must be between 1 and 7: 9");
    }

    #[test]
    fn every_error_display() {
        let err = OptionsError::EveryOutOfRange("0".to_string());
        assert_eq!(err.to_string(), "every must be greater than 0: 0");
    }

    #[test]
    fn once_has_no_recurrence() {
        let due = DueDateOption::once("2024-01-01".parse().unwrap());
        assert!(!due.is_recurring());
        assert_eq!(due.every, None);
    }

    #[test]
    fn serialize_skips_absent_fields() {
        let due = DueDateOption::once("2024-01-01".parse().unwrap());
        let json = serde_json::to_string(&due).unwrap();
        assert_eq!(json, "{\"next\":\"2024-01-01\"}");
    }
}
