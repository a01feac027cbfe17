//! Property tests for flattening a nested directory into its parent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use proptest::prelude::*;

use distfix::{merge_into, merge_into_staged};

/// One entry directly under a merged directory
#[derive(Debug, Clone, PartialEq, Eq)]
enum Node {
    File(String),
    Dir(BTreeMap<String, String>),
}

type Layout = BTreeMap<String, Node>;

fn entry_name() -> impl Strategy<Value = String> {
    // Never "public": that name is the source directory itself.
    proptest::string::string_regex("[a-e]{1,2}(\\.js|\\.css|\\.html)?")
        .unwrap()
}

fn node() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-z]{0,8}".prop_map(Node::File),
        proptest::collection::btree_map(entry_name(), "[a-z]{0,8}", 0..4).prop_map(Node::Dir),
    ]
}

fn layout() -> impl Strategy<Value = Layout> {
    proptest::collection::btree_map(entry_name(), node(), 0..6)
}

fn write_layout(dir: &Path, layout: &Layout) {
    fs::create_dir_all(dir).unwrap();
    for (name, node) in layout {
        match node {
            Node::File(content) => fs::write(dir.join(name), content).unwrap(),
            Node::Dir(files) => {
                fs::create_dir_all(dir.join(name)).unwrap();
                for (file, content) in files {
                    fs::write(dir.join(name).join(file), content).unwrap();
                }
            }
        }
    }
}

fn read_files(dir: &Path) -> BTreeMap<String, String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            (
                e.file_name().to_string_lossy().into_owned(),
                fs::read_to_string(e.path()).unwrap(),
            )
        })
        .collect()
}

fn read_layout(dir: &Path) -> Layout {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| {
            let e = e.unwrap();
            let node = if e.path().is_dir() {
                Node::Dir(read_files(&e.path()))
            } else {
                Node::File(fs::read_to_string(e.path()).unwrap())
            };
            (e.file_name().to_string_lossy().into_owned(), node)
        })
        .collect()
}

/// Whole-entry replacement: a built directory is never combined with an old one
fn expected(existing: &Layout, built: &Layout) -> Layout {
    let mut merged = existing.clone();
    merged.extend(built.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: After a merge the root holds the union of both layouts,
    /// with the nested entry winning every name clash, including
    /// file/directory and directory/directory clashes.
    #[test]
    fn property_built_content_wins(existing in layout(), built in layout()) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("dist");
        let public = root.join("public");
        write_layout(&root, &existing);
        write_layout(&public, &built);

        let moved = merge_into(&public, &root, |_| {}).unwrap();

        prop_assert!(!public.exists());
        prop_assert_eq!(moved, built.keys().cloned().collect::<Vec<_>>());
        prop_assert_eq!(read_layout(&root), expected(&existing, &built));
    }

    /// PROPERTY: Staged and direct merges leave identical roots.
    #[test]
    fn property_staged_matches_direct(existing in layout(), built in layout()) {
        let direct = tempfile::tempdir().unwrap();
        let staged = tempfile::tempdir().unwrap();

        for dir in [direct.path(), staged.path()] {
            write_layout(&dir.join("dist"), &existing);
            write_layout(&dir.join("dist/public"), &built);
        }

        merge_into(&direct.path().join("dist/public"), &direct.path().join("dist"), |_| {}).unwrap();
        merge_into_staged(&staged.path().join("dist/public"), &staged.path().join("dist"), |_| {}).unwrap();

        prop_assert_eq!(
            read_layout(&direct.path().join("dist")),
            read_layout(&staged.path().join("dist"))
        );
    }
}
