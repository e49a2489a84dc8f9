//! Message catalog seam for the labels this crate produces.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKey {
    BulkSelectNone,
    BulkSelectPage,
    BulkSelectAll,
    FiltersReset,
    FiltersClear,
}

pub trait MessageLookup: Send + Sync {
    fn format_message(&self, key: MessageKey, substitutions: &[(&str, String)]) -> String;
}

/// English catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMessages;

impl DefaultMessages {
    fn template(key: MessageKey) -> &'static str {
        match key {
            MessageKey::BulkSelectNone => "Select none (0)",
            MessageKey::BulkSelectPage => "Select page ({count})",
            MessageKey::BulkSelectAll => "Select all ({count})",
            MessageKey::FiltersReset => "Reset filters",
            MessageKey::FiltersClear => "Clear filters",
        }
    }
}

impl MessageLookup for DefaultMessages {
    fn format_message(&self, key: MessageKey, substitutions: &[(&str, String)]) -> String {
        interpolate(Self::template(key), substitutions)
    }
}

/// Replaces each `{name}` placeholder; unknown placeholders are left as is.
pub fn interpolate(template: &str, substitutions: &[(&str, String)]) -> String {
    substitutions
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_count_placeholder() {
        let text = DefaultMessages.format_message(MessageKey::BulkSelectAll, &[("count", "50".into())]);
        assert_eq!(text, "Select all (50)");
    }

    #[test]
    fn leaves_unknown_placeholders() {
        assert_eq!(
            interpolate("{count} of {total}", &[("count", "3".into())]),
            "3 of {total}"
        );
    }
}
