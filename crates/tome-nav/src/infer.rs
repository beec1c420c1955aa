//! Navigation inferred from the docs directory layout.

use std::path::Path;

use tome_config::NavSpec;

/// Turn a directory name into a section title.
///
/// `-` and `_` become spaces. Names that are entirely lower-case get their
/// first letter capitalized; anything else keeps its casing.
///
/// ```
/// use tome_nav::dirname_to_title;
///
/// assert_eq!(dirname_to_title("user-guide"), "User guide");
/// assert_eq!(dirname_to_title("API_docs"), "API docs");
/// ```
pub fn dirname_to_title(dirname: &str) -> String {
    let title = dirname.replace(['-', '_'], " ");
    if title.to_lowercase() != title {
        return title;
    }
    let mut chars = title.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => title,
    }
}

/// Nest documentation paths under titled sections, one per directory level.
///
/// Files stay as bare paths; each directory becomes a single-key mapping from
/// its title to a list. Order follows first appearance in `paths`.
pub fn infer_nav<I>(paths: I) -> NavSpec
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut root = Tree::default();
    for path in paths {
        let path = path.as_ref();
        let mut branch = &mut root;
        if let Some(parent) = Path::new(path).parent() {
            for dir in parent.iter() {
                branch = branch.child(&dirname_to_title(&dir.to_string_lossy()));
            }
        }
        branch.entries.push(Entry::Path(path.to_owned()));
    }
    root.into_spec()
}

#[derive(Default)]
struct Tree {
    entries: Vec<Entry>,
    /// Subdirectories in the order their `Entry::Dir` markers appear.
    dirs: Vec<(String, Tree)>,
}

enum Entry {
    Path(String),
    Dir,
}

impl Tree {
    /// Find the subdirectory with `title`, creating it at the end if missing.
    fn child(&mut self, title: &str) -> &mut Tree {
        let index = match self.dirs.iter().position(|(t, _)| t == title) {
            Some(index) => index,
            None => {
                self.entries.push(Entry::Dir);
                self.dirs.push((title.to_owned(), Tree::default()));
                self.dirs.len() - 1
            }
        };
        &mut self.dirs[index].1
    }

    fn into_spec(self) -> NavSpec {
        let mut dirs = self.dirs.into_iter();
        let items = self
            .entries
            .into_iter()
            .filter_map(|entry| match entry {
                Entry::Path(path) => Some(NavSpec::Path(path)),
                Entry::Dir => dirs
                    .next()
                    .map(|(title, tree)| NavSpec::entry(title, tree.into_spec())),
            })
            .collect();
        NavSpec::List(items)
    }
}
