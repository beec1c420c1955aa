//! Navigation build errors.

/// Error raised for a nav specification the builder cannot interpret.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// A list entry is a mapping without exactly one key.
    #[error(
        "Ambiguous nav entry at {location}: a list item must map exactly one title, found {}",
        describe_keys(.keys)
    )]
    AmbiguousEntry {
        /// Position of the entry, e.g. `nav > User Guide > [2]`.
        location: String,
        /// Keys of the offending mapping.
        keys: Vec<String>,
    },
    /// A list entry has a shape that cannot become a nav item.
    #[error("Invalid nav entry at {location}: {reason}")]
    InvalidEntry {
        /// Position of the entry.
        location: String,
        /// What is wrong with it.
        reason: String,
    },
}

fn describe_keys(keys: &[String]) -> String {
    if keys.is_empty() {
        "an empty mapping".to_owned()
    } else {
        format!("keys {}", keys.join(", "))
    }
}
