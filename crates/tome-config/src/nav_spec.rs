//! Declarative navigation specification.
//!
//! The `nav` setting is a recursive value: a document path, a list of
//! entries, or a mapping from titles to entries. Mapping order is the order
//! the entries appear in the source document.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// One node of a navigation specification.
///
/// A mapping entry whose value is a [`NavSpec::Path`] is a titled leaf; any
/// other mapping value describes a section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavSpec {
    /// Document path relative to the docs directory, or a literal URL.
    Path(String),
    /// Ordered list of entries.
    List(Vec<NavSpec>),
    /// Ordered title → entry pairs.
    Map(Vec<(String, NavSpec)>),
}

impl NavSpec {
    /// Shorthand for a single-key mapping, the usual shape of list entries.
    #[must_use]
    pub fn entry(title: impl Into<String>, value: NavSpec) -> Self {
        Self::Map(vec![(title.into(), value)])
    }

    /// Shorthand for a path leaf.
    #[must_use]
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }
}

impl<'de> Deserialize<'de> for NavSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NavSpecVisitor)
    }
}

struct NavSpecVisitor;

impl<'de> Visitor<'de> for NavSpecVisitor {
    type Value = NavSpec;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a document path, a list of nav entries, or a mapping of titles to nav entries")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<NavSpec, E> {
        Ok(NavSpec::Path(value.to_owned()))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<NavSpec, E> {
        Ok(NavSpec::Path(value))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<NavSpec, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(NavSpec::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<NavSpec, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((title, value)) = map.next_entry::<String, NavSpec>()? {
            entries.push((title, value));
        }
        Ok(NavSpec::Map(entries))
    }
}

impl Serialize for NavSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Path(path) => serializer.serialize_str(path),
            Self::List(items) => serializer.collect_seq(items),
            Self::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (title, value) in entries {
                    map.serialize_entry(title, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, serde::Deserialize)]
    struct Wrapper {
        nav: NavSpec,
    }

    #[test]
    fn test_parse_yaml_nested_nav() {
        let yaml = r"
- index.md
- User Guide:
    - Install: guide/install.md
    - guide/usage.md
- About:
    License: about/license.md
- GitHub: https://github.com/example/tome
";
        let spec: NavSpec = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(
            spec,
            NavSpec::List(vec![
                NavSpec::path("index.md"),
                NavSpec::entry(
                    "User Guide",
                    NavSpec::List(vec![
                        NavSpec::entry("Install", NavSpec::path("guide/install.md")),
                        NavSpec::path("guide/usage.md"),
                    ])
                ),
                NavSpec::entry(
                    "About",
                    NavSpec::entry("License", NavSpec::path("about/license.md"))
                ),
                NavSpec::entry("GitHub", NavSpec::path("https://github.com/example/tome")),
            ])
        );
    }

    #[test]
    fn test_parse_toml_nav_keeps_mapping_order() {
        let toml = r#"
nav = { "Zeta" = "zeta.md", "Alpha" = "alpha.md", "Mid" = ["mid/a.md"] }
"#;
        let wrapper: Wrapper = toml::from_str(toml).unwrap();

        assert_eq!(
            wrapper.nav,
            NavSpec::Map(vec![
                ("Zeta".to_owned(), NavSpec::path("zeta.md")),
                ("Alpha".to_owned(), NavSpec::path("alpha.md")),
                ("Mid".to_owned(), NavSpec::List(vec![NavSpec::path("mid/a.md")])),
            ])
        );
    }

    #[test]
    fn test_parse_single_path() {
        let spec: NavSpec = serde_yaml::from_str("index.md").unwrap();
        assert_eq!(spec, NavSpec::path("index.md"));
    }

    #[test]
    fn test_parse_rejects_numbers() {
        let result: Result<NavSpec, _> = serde_yaml::from_str("- index.md\n- 42\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("document path"), "unexpected error: {err}");
    }

    #[test]
    fn test_parse_rejects_booleans_in_toml() {
        let result: Result<Wrapper, _> = toml::from_str("nav = [true]");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_yaml_preserves_shape() {
        let spec = NavSpec::List(vec![
            NavSpec::path("index.md"),
            NavSpec::entry("Guide", NavSpec::List(vec![NavSpec::path("guide/a.md")])),
        ]);

        let yaml = serde_yaml::to_string(&spec).unwrap();
        let reparsed: NavSpec = serde_yaml::from_str(&yaml).unwrap();

        assert!(yaml.contains("Guide:"));
        assert_eq!(reparsed, spec);
    }
}
