//! End-to-end discovery and navigation over a real docs directory.

use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tome_config::{Config, NavSpec};
use tome_files::{FileCatalog, PathCodec};
use tome_nav::{NavItem, Navigation, NavigationBuilder};

const EXCLUDE: [&str; 2] = [".*", "/templates"];

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, format!("# {rel}\n")).unwrap();
}

fn create_docs(root: &Path) {
    for rel in [
        "index.md",
        "README.md",
        "getting-started.md",
        "user-guide/index.md",
        "user-guide/install.md",
        "user-guide/advanced/tuning.md",
        "reference/api.md",
        "reference/README.md",
        "img/logo.png",
        "css/extra.css",
        ".draft.md",
        "templates/page.html",
    ] {
        touch(root, rel);
    }
}

fn discover(root: &Path) -> FileCatalog {
    FileCatalog::discover(&root.join("docs"), &root.join("site"), true, &EXCLUDE).unwrap()
}

fn uris(nav: &Navigation) -> Vec<String> {
    nav.pages()
        .iter()
        .map(|&id| nav.page(id).src_uri().to_owned())
        .collect()
}

#[test]
fn test_catalog_from_docs_tree() {
    let temp = tempfile::tempdir().unwrap();
    create_docs(&temp.path().join("docs"));

    let catalog = discover(temp.path());

    let src_uris: Vec<_> = catalog.iter().map(|f| f.src_uri()).collect();
    assert_eq!(
        src_uris,
        vec![
            "index.md",
            "getting-started.md",
            "css/extra.css",
            "img/logo.png",
            "reference/README.md",
            "reference/api.md",
            "user-guide/index.md",
            "user-guide/install.md",
            "user-guide/advanced/tuning.md",
        ]
    );
    assert_eq!(catalog.src_uris().len(), catalog.len());
    assert_eq!(catalog.get("reference/README.md").unwrap().url(), "reference/");
}

#[test]
fn test_inferred_navigation_covers_every_page() {
    let temp = tempfile::tempdir().unwrap();
    create_docs(&temp.path().join("docs"));
    let mut catalog = discover(temp.path());
    let config = Config::default();

    let nav = NavigationBuilder::new(&config).build(&mut catalog).unwrap();

    assert_eq!(
        uris(&nav),
        vec![
            "index.md",
            "getting-started.md",
            "reference/README.md",
            "reference/api.md",
            "user-guide/index.md",
            "user-guide/install.md",
            "user-guide/advanced/tuning.md",
        ]
    );
    let titles: Vec<_> = nav
        .sections()
        .into_iter()
        .map(|id| nav.section(id).title().to_owned())
        .collect();
    assert_eq!(titles, vec!["Reference", "User guide", "Advanced"]);
    assert!(catalog.documentation_pages().all(|f| f.page().is_some()));
    assert_eq!(nav.homepage(), Some(nav.pages()[0]));
}

#[test]
fn test_explicit_navigation_with_orphans_and_links() {
    let temp = tempfile::tempdir().unwrap();
    create_docs(&temp.path().join("docs"));
    let mut catalog = discover(temp.path());
    let spec: NavSpec = serde_yaml::from_str(
        r"
- Home: index.md
- User Guide:
    - user-guide/index.md
    - Install: user-guide/install.md
- API: /api/
- Source: https://example.com/tome
",
    )
    .unwrap();
    let config = Config::default();

    let nav = NavigationBuilder::new(&config)
        .with_spec(&spec)
        .build(&mut catalog)
        .unwrap();

    assert_eq!(
        uris(&nav),
        vec![
            "index.md",
            "user-guide/index.md",
            "user-guide/install.md",
            "getting-started.md",
            "reference/README.md",
            "reference/api.md",
            "user-guide/advanced/tuning.md",
        ]
    );

    // Orphans are chained but never reachable from the tree.
    let in_tree: Vec<_> = nav
        .walk()
        .filter_map(|item| match item {
            NavItem::Page(id) => Some(id),
            _ => None,
        })
        .collect();
    assert_eq!(in_tree.len(), 3);
    let first_orphan = nav.pages()[3];
    assert!(!in_tree.contains(&first_orphan));
    assert_eq!(nav.page(first_orphan).previous_page(), Some(nav.pages()[2]));
    assert_eq!(nav.page(nav.pages()[2]).next_page(), Some(first_orphan));

    let link_urls: Vec<_> = nav.links().into_iter().map(|id| nav.link(id).url()).collect();
    assert_eq!(link_urls, vec!["/api/", "https://example.com/tome"]);
}

#[test]
fn test_previous_next_urls_resolve_relative_to_each_page() {
    let temp = tempfile::tempdir().unwrap();
    create_docs(&temp.path().join("docs"));
    let mut catalog = discover(temp.path());
    let config = Config::default();
    let nav = NavigationBuilder::new(&config).build(&mut catalog).unwrap();
    let codec = PathCodec::new();

    let links: Vec<_> = nav
        .pages()
        .iter()
        .map(|&id| {
            let page = nav.page(id);
            let next = page
                .next_page()
                .map(|next| codec.relative_url(nav.page(next).url(), page.url()));
            (page.url().to_owned(), next)
        })
        .collect();

    assert_eq!(
        links,
        vec![
            (".".to_owned(), Some("getting-started/".to_owned())),
            ("getting-started/".to_owned(), Some("../reference/".to_owned())),
            ("reference/".to_owned(), Some("api/".to_owned())),
            ("reference/api/".to_owned(), Some("../../user-guide/".to_owned())),
            ("user-guide/".to_owned(), Some("install/".to_owned())),
            ("user-guide/install/".to_owned(), Some("../advanced/tuning/".to_owned())),
            ("user-guide/advanced/tuning/".to_owned(), None),
        ]
    );
}

#[test]
fn test_rebuild_from_scratch_is_identical() {
    let temp = tempfile::tempdir().unwrap();
    create_docs(&temp.path().join("docs"));
    let config = Config::default();

    let mut first_catalog = discover(temp.path());
    let first = NavigationBuilder::new(&config).build(&mut first_catalog).unwrap();
    let mut second_catalog = discover(temp.path());
    let second = NavigationBuilder::new(&config).build(&mut second_catalog).unwrap();

    assert_eq!(
        first_catalog.iter().collect::<Vec<_>>(),
        second_catalog.iter().collect::<Vec<_>>()
    );
    assert_eq!(first.tree(), second.tree());
    assert_eq!(uris(&first), uris(&second));
    assert_eq!(
        serde_json::to_string(&first.tree()).unwrap(),
        serde_json::to_string(&second.tree()).unwrap()
    );
}
