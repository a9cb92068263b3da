//! Huelink Serial Command Protocol
//!
//! This crate defines the text protocol a host uses to set the color of the
//! LED strip. The device only ever receives; there is no reply per command.
//!
//! # Protocol Overview
//!
//! One command per line, three decimal integers separated by commas:
//! ```text
//! ┌─────┬───┬───────┬───┬──────┬────┐
//! │ RED │ , │ GREEN │ , │ BLUE │ \n │
//! └─────┴───┴───────┴───┴──────┴────┘
//!   "255,0,0\n"      "12, 34, 56\r\n"
//! ```
//!
//! Whitespace around and inside the numbers is ignored, a `\r` before the
//! terminator is stripped, and empty lines are skipped. Malformed lines are
//! dropped silently by the receiver.
//!
//! Bytes arrive in arbitrary fragments, so reception is split in two steps:
//! [`LineAccumulator`] turns the byte stream into logical lines and
//! [`ColorCommand::parse`] turns a line into a command.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod line;

pub use command::{ColorCommand, ParseError, FIELD_COUNT};
pub use line::{Line, LineAccumulator, LineError, Lines, LINE_TERMINATOR, MAX_LINE_LEN};

/// Announcement written once at startup so a host terminal can tell the
/// device is listening
pub const READY_BANNER: &str = "Ready to receive RGB values (format: R,G,B)";
