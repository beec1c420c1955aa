//! `${VAR}` and `${VAR:-default}` expansion in configuration strings.
//!
//! Bare `$VAR` is left alone unless the string also holds a braced reference.

use std::env::{self, VarError};

use crate::ConfigError;

/// Expand references in every value of `field`, in place.
pub(crate) fn expand_in_place<'a>(
    field: &str,
    values: impl IntoIterator<Item = &'a mut String>,
) -> Result<(), ConfigError> {
    for value in values {
        if value.contains("${") {
            *value = expand(value, field)?;
        }
    }
    Ok(())
}

fn expand(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::env_with_context(value, |var| env::var(var).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: match e.cause {
                VarError::NotPresent => format!("${{{}}} not set", e.var_name),
                VarError::NotUnicode(_) => format!("${{{}}} is not valid unicode", e.var_name),
            },
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TOME_TEST_SIMPLE", "handbook");
        }
        let result = expand("${TOME_TEST_SIMPLE}", "site_name").unwrap();
        assert_eq!(result, "handbook");
        unsafe {
            std::env::remove_var("TOME_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TOME_TEST_UNSET");
        }
        let result = expand("${TOME_TEST_UNSET:-public}", "docs.site_dir").unwrap();
        assert_eq!(result, "public");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("TOME_TEST_MISSING");
        }
        let err = expand("${TOME_TEST_MISSING}", "docs.docs_dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("TOME_TEST_MISSING"));
        assert!(err.to_string().contains("docs.docs_dir"));
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TOME_TEST_BUILD", "nightly");
        }
        let result = expand("out/${TOME_TEST_BUILD}/site", "docs.site_dir").unwrap();
        assert_eq!(result, "out/nightly/site");
        unsafe {
            std::env::remove_var("TOME_TEST_BUILD");
        }
    }

    #[test]
    fn test_expand_in_place_rewrites_each_entry() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("TOME_TEST_THEME", "material");
        }
        let mut dirs = vec!["themes/${TOME_TEST_THEME}".to_owned(), "overrides".to_owned()];
        expand_in_place("theme.dirs", &mut dirs).unwrap();
        assert_eq!(dirs, vec!["themes/material", "overrides"]);
        unsafe {
            std::env::remove_var("TOME_TEST_THEME");
        }
    }

    #[test]
    fn test_bare_dollar_not_expanded() {
        let mut value = "$HOME/docs".to_owned();
        expand_in_place("docs.docs_dir", [&mut value]).unwrap();
        assert_eq!(value, "$HOME/docs");
    }
}
