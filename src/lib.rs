//! todomd - Checkbox todos with scheduling metadata, extracted from markdown
//!
//! todomd scans plain markdown files for checkbox items (`- [ ]` / `- [x]`)
//! and attaches structured due-date and recurrence metadata parsed from
//! `{...}` option blocks, e.g. `{next:2024-01-01} {repeat:weekly}`.

pub mod domain;
pub mod scanner;
pub mod storage;
pub mod cli;

pub use domain::{
    parse_options, DueDateOption, DueDateRepeat, OptionsError, PlainDate, Todo, TodoOptions,
};
