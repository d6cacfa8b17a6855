//! Todo option parsing and validation
//!
//! Turns free-text option fragments (`due:2024-01-01`, `repeat:weekly`,
//! `dayOfWeek:1`) into a validated [`DueDateOption`]. A fragment set must
//! match exactly one recognized shape: a one-off due date, or one of the
//! daily/weekly/monthly/yearly recurrence forms, each with its own
//! required and optional key set. Anything else is rejected.
//!
//! The pipeline is tokenize, classify, validate, build. Validation always
//! runs to completion before any descriptor is constructed, so a failed
//! parse never yields a partially-filled value.

use super::date::PlainDate;
use super::options::{
    DueDateOption, DueDateRepeat, OptionsError, RawOptionMap, TodoOptions,
};

/// One recognized option shape: the keys it requires, the keys it allows,
/// and the `repeat` value that discriminates it from shapes with
/// overlapping key sets.
struct ShapeDef {
    required: &'static [&'static str],
    optional: &'static [&'static str],
    repeat: Option<DueDateRepeat>,
}

/// All recognized shapes, tried in order. The subset rule in
/// [`ShapeDef::matches`] makes earlier shapes no less specific than later
/// ones: a mapping carrying `dayOfMonth` cannot match the plain monthly
/// shape because `dayOfMonth` is not in its allowed set.
static SHAPES: &[ShapeDef] = &[
    // One-off due date
    ShapeDef {
        required: &["due"],
        optional: &[],
        repeat: None,
    },
    // Daily
    ShapeDef {
        required: &["next", "repeat"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Daily),
    },
    // Weekly, optionally pinned to a weekday
    ShapeDef {
        required: &["next", "repeat"],
        optional: &["every", "dayOfWeek"],
        repeat: Some(DueDateRepeat::Weekly),
    },
    // Monthly
    ShapeDef {
        required: &["next", "repeat"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Monthly),
    },
    // Monthly on a fixed day of the month
    ShapeDef {
        required: &["next", "repeat", "dayOfMonth"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Monthly),
    },
    // Monthly on a fixed week of the month
    ShapeDef {
        required: &["next", "repeat", "weekOfMonth"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Monthly),
    },
    // Yearly
    ShapeDef {
        required: &["next", "repeat"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Yearly),
    },
    // Yearly on a fixed day of the year
    ShapeDef {
        required: &["next", "repeat", "dayOfYear"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Yearly),
    },
    // Yearly on a fixed week of the year
    ShapeDef {
        required: &["next", "repeat", "weekOfYear"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Yearly),
    },
    // Yearly on a fixed month of the year
    ShapeDef {
        required: &["next", "repeat", "monthOfYear"],
        optional: &["every"],
        repeat: Some(DueDateRepeat::Yearly),
    },
];

/// Inclusive ranges for the recurrence refinement fields.
const RANGED_FIELDS: &[(&str, i64, i64)] = &[
    ("dayOfWeek", 1, 7),
    ("dayOfMonth", 1, 31),
    ("weekOfMonth", 1, 5),
    ("dayOfYear", 1, 366),
    ("weekOfYear", 1, 4),
    ("monthOfYear", 1, 12),
];

impl ShapeDef {
    fn matches(&self, map: &RawOptionMap) -> bool {
        let required_present = self.required.iter().all(|k| map.contains_key(*k));
        let no_strays = map
            .keys()
            .all(|k| self.required.contains(&k.as_str()) || self.optional.contains(&k.as_str()));

        let repeat_matches = match self.repeat {
            None => true,
            Some(repeat) => map
                .get("repeat")
                .is_some_and(|v| v == repeat.as_str()),
        };

        required_present && no_strays && repeat_matches
    }

    fn date_key(&self) -> &'static str {
        if self.repeat.is_none() {
            "due"
        } else {
            "next"
        }
    }
}

/// Splits option fragments into a key/value map.
///
/// Each fragment splits on its first colon only, so values may themselves
/// contain colons (timestamps). Keys and values are trimmed. A fragment
/// with no colon becomes a key with an empty value. Duplicate keys
/// collapse to the last occurrence.
pub fn tokenize_options<S: AsRef<str>>(fragments: &[S]) -> RawOptionMap {
    let mut map = RawOptionMap::new();

    for fragment in fragments {
        let fragment = fragment.as_ref().trim();
        if fragment.is_empty() {
            continue;
        }

        match fragment.split_once(':') {
            Some((key, value)) => {
                map.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => {
                map.insert(fragment.to_string(), String::new());
            }
        }
    }

    map
}

fn classify(map: &RawOptionMap) -> Option<&'static ShapeDef> {
    SHAPES.iter().find(|shape| shape.matches(map))
}

/// Checks field-level constraints on the raw values of a classified
/// mapping. `every` is checked first, then the refinement fields.
fn validate(map: &RawOptionMap) -> Result<(), OptionsError> {
    if let Some(raw) = map.get("every") {
        let every: i64 = raw
            .parse()
            .map_err(|_| OptionsError::InvalidFieldValue {
                field: "every",
                value: raw.clone(),
            })?;
        if every < 1 {
            return Err(OptionsError::EveryOutOfRange(raw.clone()));
        }
    }

    for &(field, min, max) in RANGED_FIELDS {
        let Some(raw) = map.get(field) else {
            continue;
        };

        let value: i64 = raw
            .parse()
            .map_err(|_| OptionsError::InvalidFieldValue {
                field,
                value: raw.clone(),
            })?;
        if value < min || value > max {
            return Err(OptionsError::FieldOutOfRange {
                field,
                value,
                min,
                max,
            });
        }
    }

    Ok(())
}

/// Builds the typed descriptor from a mapping that passed classification
/// and validation. Only the date can still fail here.
fn build(shape: &ShapeDef, map: &RawOptionMap) -> Result<DueDateOption, OptionsError> {
    let raw_date = map.get(shape.date_key()).cloned().unwrap_or_default();
    let next: PlainDate = raw_date
        .parse()
        .map_err(|_| OptionsError::InvalidNextDate(raw_date.clone()))?;

    let field = |key: &'static str| -> Result<Option<u32>, OptionsError> {
        match map.get(key) {
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|_| OptionsError::InvalidFieldValue {
                    field: key,
                    value: raw.clone(),
                }),
            None => Ok(None),
        }
    };

    Ok(DueDateOption {
        next,
        repeat: shape.repeat,
        every: field("every")?,
        day_of_week: field("dayOfWeek")?,
        day_of_month: field("dayOfMonth")?,
        week_of_month: field("weekOfMonth")?,
        day_of_year: field("dayOfYear")?,
        week_of_year: field("weekOfYear")?,
        month_of_year: field("monthOfYear")?,
    })
}

/// Parses option fragments into validated todo options.
///
/// An empty fragment list is a todo with no scheduling metadata, not an
/// error. Otherwise the fragments must match exactly one recognized shape;
/// the first failing check wins and nothing partial is returned.
pub fn parse_options<S: AsRef<str>>(fragments: &[S]) -> Result<TodoOptions, OptionsError> {
    let map = tokenize_options(fragments);

    if map.is_empty() {
        return Ok(TodoOptions::default());
    }

    let shape = classify(&map).ok_or_else(|| OptionsError::UnrecognizedOptions(map.clone()))?;

    validate(&map)?;
    let due_date = build(shape, &map)?;

    Ok(TodoOptions {
        due_date: Some(due_date),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(s: &str) -> PlainDate {
        s.parse().unwrap()
    }

    fn parse(fragments: &[&str]) -> Result<TodoOptions, OptionsError> {
        parse_options(fragments)
    }

    fn due_date(fragments: &[&str]) -> DueDateOption {
        parse(fragments).unwrap().due_date.unwrap()
    }

    #[test]
    fn empty_fragments_mean_no_due_date() {
        assert_eq!(parse(&[]).unwrap(), TodoOptions::default());
        assert_eq!(parse(&["  "]).unwrap(), TodoOptions::default());
    }

    #[test]
    fn single_due_date_without_time() {
        let due = due_date(&["due:2024-01-01"]);
        assert_eq!(due.next, date("2024-01-01"));
        assert_eq!(due.repeat, None);
        assert!(!due.is_recurring());
    }

    #[test]
    fn single_due_date_with_time() {
        let due = due_date(&["due:2024-01-01T12:31:00Z"]);
        assert_eq!(due.next, date("2024-01-01"));
    }

    #[test]
    fn bad_dates_error() {
        for bad in ["invalid", "2024-99-01"] {
            let result = parse(&[&format!("due:{}", bad)]);
            assert_eq!(
                result,
                Err(OptionsError::InvalidNextDate(bad.to_string())),
                "expected date error for {}",
                bad
            );
        }
    }

    #[test]
    fn daily_repeat() {
        let due = due_date(&["next:2024-01-01", "repeat:daily"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Daily));
        assert_eq!(due.next, date("2024-01-01"));
        assert_eq!(due.every, None);
    }

    #[test]
    fn daily_repeat_every_two_days() {
        let due = due_date(&["next:2024-01-01", "repeat:daily", "every:2"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Daily));
        assert_eq!(due.every, Some(2));
    }

    #[test]
    fn weekly_repeat() {
        let due = due_date(&["next:2024-01-01", "repeat:weekly"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Weekly));
        assert_eq!(due.day_of_week, None);
    }

    #[test]
    fn weekly_repeat_every_two_weeks() {
        let due = due_date(&["next:2024-01-01", "repeat:weekly", "every:2"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Weekly));
        assert_eq!(due.every, Some(2));
    }

    #[test]
    fn weekly_repeat_on_day_of_week() {
        let due = due_date(&["next:2024-01-01", "repeat:weekly", "dayOfWeek:1"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Weekly));
        assert_eq!(due.day_of_week, Some(1));
    }

    #[test]
    fn monthly_repeat() {
        let due = due_date(&["next:2024-01-01", "repeat:monthly"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Monthly));
    }

    #[test]
    fn monthly_repeat_on_day_of_month() {
        let due = due_date(&["next:2024-01-01", "repeat:monthly", "dayOfMonth:15"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Monthly));
        assert_eq!(due.day_of_month, Some(15));
    }

    #[test]
    fn monthly_repeat_on_week_of_month() {
        let due = due_date(&["next:2024-01-01", "repeat:monthly", "weekOfMonth:2"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Monthly));
        assert_eq!(due.week_of_month, Some(2));
    }

    #[test]
    fn yearly_repeat() {
        let due = due_date(&["next:2024-01-01", "repeat:yearly"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Yearly));
    }

    #[test]
    fn yearly_repeat_on_day_of_year() {
        let due = due_date(&["next:2024-01-01", "repeat:yearly", "dayOfYear:15"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Yearly));
        assert_eq!(due.day_of_year, Some(15));
    }

    #[test]
    fn yearly_repeat_on_week_of_year() {
        let due = due_date(&["next:2024-01-01", "repeat:yearly", "weekOfYear:2"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Yearly));
        assert_eq!(due.week_of_year, Some(2));
    }

    #[test]
    fn yearly_repeat_on_month_of_year() {
        let due = due_date(&["next:2024-01-01", "repeat:yearly", "monthOfYear:1"]);
        assert_eq!(due.repeat, Some(DueDateRepeat::Yearly));
        assert_eq!(due.month_of_year, Some(1));
    }

    #[test]
    fn every_must_be_integer() {
        let result = parse(&["next:2024-01-01", "repeat:daily", "every:x"]);
        assert_eq!(
            result,
            Err(OptionsError::InvalidFieldValue {
                field: "every",
                value: "x".to_string()
            })
        );
    }

    #[test]
    fn every_must_be_positive() {
        for bad in ["0", "-1"] {
            let result = parse(&["next:2024-01-01", "repeat:daily", &format!("every:{}", bad)]);
            assert_eq!(
                result,
                Err(OptionsError::EveryOutOfRange(bad.to_string())),
                "expected every error for {}",
                bad
            );
        }
    }

    #[test]
    fn day_of_week_with_daily_is_rejected() {
        let result = parse(&["next:2024-01-01", "repeat:daily", "dayOfWeek:1"]);
        assert!(matches!(
            result,
            Err(OptionsError::UnrecognizedOptions(_))
        ));
    }

    #[test]
    fn day_of_month_with_weekly_is_rejected() {
        let result = parse(&["next:2024-01-01", "repeat:weekly", "dayOfMonth:15"]);
        assert!(matches!(
            result,
            Err(OptionsError::UnrecognizedOptions(_))
        ));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = parse(&["due:2024-01-01", "color:red"]);
        match result {
            Err(OptionsError::UnrecognizedOptions(map)) => {
                assert_eq!(map.get("color").map(String::as_str), Some("red"));
            }
            other => panic!("expected unrecognized options, got {:?}", other),
        }
    }

    #[test]
    fn missing_next_is_rejected() {
        let result = parse(&["repeat:daily"]);
        assert!(matches!(
            result,
            Err(OptionsError::UnrecognizedOptions(_))
        ));
    }

    #[test]
    fn unknown_repeat_value_is_rejected() {
        let result = parse(&["next:2024-01-01", "repeat:hourly"]);
        assert!(matches!(
            result,
            Err(OptionsError::UnrecognizedOptions(_))
        ));
    }

    #[test]
    fn ranged_fields_accept_inclusive_boundaries() {
        let cases: &[(&str, &'static str, i64, i64)] = &[
            ("repeat:weekly", "dayOfWeek", 1, 7),
            ("repeat:monthly", "dayOfMonth", 1, 31),
            ("repeat:monthly", "weekOfMonth", 1, 5),
            ("repeat:yearly", "dayOfYear", 1, 366),
            ("repeat:yearly", "weekOfYear", 1, 4),
            ("repeat:yearly", "monthOfYear", 1, 12),
        ];

        for &(repeat, field, min, max) in cases {
            for value in [min, max] {
                let fragment = format!("{}:{}", field, value);
                let result = parse(&["next:2024-01-01", repeat, &fragment]);
                assert!(result.is_ok(), "expected {}={} to pass", field, value);
            }

            for value in [min - 1, max + 1] {
                let fragment = format!("{}:{}", field, value);
                let result = parse(&["next:2024-01-01", repeat, &fragment]);
                assert_eq!(
                    result,
                    Err(OptionsError::FieldOutOfRange {
                        field,
                        value,
                        min,
                        max,
                    }),
                    "expected {}={} to fail",
                    field,
                    value
                );
            }
        }
    }

    #[test]
    fn validation_runs_before_date_parsing() {
        // Both the date and dayOfWeek are bad; the field check wins.
        let result = parse(&["next:invalid", "repeat:weekly", "dayOfWeek:9"]);
        assert_eq!(
            result,
            Err(OptionsError::FieldOutOfRange {
                field: "dayOfWeek",
                value: 9,
                min: 1,
                max: 7,
            })
        );
    }

    #[test]
    fn bad_next_date_on_recurrence() {
        let result = parse(&["next:2024-99-01", "repeat:daily"]);
        assert_eq!(
            result,
            Err(OptionsError::InvalidNextDate("2024-99-01".to_string()))
        );
    }

    #[test]
    fn values_keep_their_colons() {
        let map = tokenize_options(&["due:2024-01-01T12:31:00Z"]);
        assert_eq!(
            map.get("due").map(String::as_str),
            Some("2024-01-01T12:31:00Z")
        );
    }

    #[test]
    fn fragment_without_colon_keeps_whole_key() {
        let map = tokenize_options(&["urgent"]);
        assert_eq!(map.get("urgent").map(String::as_str), Some(""));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        let due = due_date(&["due:2024-01-01", "due:2024-02-02"]);
        assert_eq!(due.next, date("2024-02-02"));
    }

    #[test]
    fn keys_and_values_are_trimmed() {
        let due = due_date(&["  due : 2024-01-01 "]);
        assert_eq!(due.next, date("2024-01-01"));
    }

    #[test]
    fn parsing_is_idempotent() {
        let fragments = ["next:2024-01-01", "repeat:weekly", "dayOfWeek:3"];
        assert_eq!(parse(&fragments), parse(&fragments));

        let bad = ["next:2024-01-01", "repeat:weekly", "dayOfWeek:9"];
        assert_eq!(parse(&bad), parse(&bad));
    }

    proptest! {
        #[test]
        fn fragment_order_is_irrelevant(
            fragments in Just(vec![
                "next:2024-01-01".to_string(),
                "repeat:weekly".to_string(),
                "dayOfWeek:3".to_string(),
                "every:2".to_string(),
            ])
            .prop_shuffle()
        ) {
            let reference = parse(&["next:2024-01-01", "repeat:weekly", "dayOfWeek:3", "every:2"]);
            prop_assert_eq!(parse_options(&fragments), reference);
        }

        #[test]
        fn tokenizer_never_panics(fragments in proptest::collection::vec(".*", 0..8)) {
            let _ = tokenize_options(&fragments);
        }
    }
}
