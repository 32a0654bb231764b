//! Request-handler variant selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Strategy applied to each accepted connection.
///
/// Exactly one variant is active at a time. Changing the variant takes
/// effect for subsequently accepted connections only; live connections keep
/// the variant they were accepted under.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum HandlerVariant {
    /// Writes every chunk back to the sender; connectivity testing only.
    Echo,
    /// Queues every raw chunk; the tick logs each entry through the host.
    Logging,
    /// Queues every raw chunk; the tick classifies and executes each entry.
    #[default]
    DefaultStack,
    /// Aggregates chunks until the sentinel token, then queues one payload
    /// executed unconditionally as Python code.
    PythonStack,
}

/// Errors encountered while parsing a [`HandlerVariant`] from text.
pub type HandlerVariantParseError = strum::ParseError;
