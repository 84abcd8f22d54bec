use bucketree_core::{BucketConfig, BucketError, NodeId, ObjectTree, ROOT, StoreOperation};

#[test]
fn test_empty_listing_yields_bare_root() {
    let tree = ObjectTree::from_keys(Vec::<String>::new());
    let root = tree.node(ROOT);

    assert_eq!(root.name.as_str(), "root");
    assert_eq!(root.key.as_str(), "");
    assert_eq!(root.parent(), None);
    assert!(root.children().is_empty());
    assert_eq!(tree.file_count(), 0);
    assert_eq!(tree.directory_count(), 0);
}

#[test]
fn test_single_file_at_root() {
    let tree = ObjectTree::from_keys(["file.txt"]);
    let root = tree.node(ROOT);

    assert_eq!(root.children().len(), 1);
    let child = tree.node(root.children()[0]);
    assert!(child.is_file());
    assert_eq!(child.name.as_str(), "file.txt");
    assert_eq!(child.key.as_str(), "file.txt");
}

#[test]
fn test_nested_key_builds_directory_chain() {
    let tree = ObjectTree::from_keys(["folder/subfolder/file.txt"]);

    let folder = tree.find_directory("folder").expect("folder exists");
    let subfolder = tree
        .find_directory("folder/subfolder")
        .expect("subfolder exists");

    assert_eq!(tree.node(folder).name.as_str(), "folder");
    assert_eq!(tree.node(folder).parent(), Some(ROOT));
    assert_eq!(tree.node(subfolder).name.as_str(), "subfolder");
    assert_eq!(tree.node(subfolder).parent(), Some(folder));

    let children = tree.children(subfolder);
    assert_eq!(children.len(), 1);
    let file = tree.node(children[0]);
    assert!(file.is_file());
    assert_eq!(file.key.as_str(), "folder/subfolder/file.txt");
}

#[test]
fn test_two_files_share_one_directory_in_order() {
    let tree = ObjectTree::from_keys(["folder/file1.txt", "folder/file2.txt"]);

    assert_eq!(tree.directory_count(), 1);
    let folder = tree.find_directory("folder").unwrap();
    let names: Vec<&str> = tree
        .children(folder)
        .iter()
        .map(|id| tree.node(*id).name.as_str())
        .collect();
    assert_eq!(names, vec!["file1.txt", "file2.txt"]);
}

#[test]
fn test_mixed_levels_preserve_insertion_order() {
    let tree = ObjectTree::from_keys(["file1.txt", "folder/file2.txt"]);

    let names: Vec<&str> = tree
        .children(ROOT)
        .iter()
        .map(|id| tree.node(*id).name.as_str())
        .collect();
    assert_eq!(names, vec!["file1.txt", "folder"]);
}

#[test]
fn test_existing_directories_are_reused() {
    let tree = ObjectTree::from_keys([
        "folder/subfolder/file1.txt",
        "folder/subfolder/file2.txt",
    ]);

    assert_eq!(tree.directory_count(), 2);
    let subfolder = tree.find_directory("folder/subfolder").unwrap();
    assert_eq!(tree.children(subfolder).len(), 2);
}

#[test]
fn test_rebuild_is_deterministic() {
    let keys = [
        "a/b/c.txt",
        "a/d.txt",
        "e.txt",
        "a/b/f.txt",
        "g/h/i/j.txt",
    ];

    let first = ObjectTree::from_keys(keys);
    let second = ObjectTree::from_keys(keys);

    assert_eq!(first, second);
}

#[test]
fn test_file_keys_match_input_exactly() {
    let keys = ["a/b/c.txt", "top.txt", "deep/nested/path/leaf.txt"];
    let tree = ObjectTree::from_keys(keys);

    for key in keys {
        let id = tree.find(key).expect("every key has a node");
        let node = tree.node(id);
        assert!(node.is_file());
        assert_eq!(node.key.as_str(), key);
    }
}

#[test]
fn test_directory_keys_are_root_to_node_paths() {
    let tree = ObjectTree::from_keys(["a/b/c/d.txt"]);

    for node in tree.iter().filter(|n| n.is_dir() && n.id != ROOT) {
        // Walk back up collecting names; the joined path must equal the key.
        let mut segments = Vec::new();
        let mut current = node.id;
        loop {
            let n = tree.node(current);
            match n.parent() {
                Some(parent) => {
                    segments.push(n.name.as_str());
                    current = parent;
                }
                None => break,
            }
        }
        segments.reverse();
        assert_eq!(node.key.as_str(), segments.join("/"));
    }
}

#[test]
fn test_each_child_appears_exactly_once_in_its_parent() {
    let tree = ObjectTree::from_keys(["a/b.txt", "a/c/d.txt", "a/c/e.txt", "f.txt"]);

    for node in tree.iter() {
        if let Some(parent) = node.parent() {
            let occurrences = tree
                .children(parent)
                .iter()
                .filter(|id| **id == node.id)
                .count();
            assert_eq!(occurrences, 1, "node {} parent linkage", node.key);
        }
    }

    // Files carry no parent link, so check containment by scanning instead.
    for node in tree.iter().filter(|n| n.is_file()) {
        let containers = tree
            .iter()
            .filter(|n| n.children().contains(&node.id))
            .count();
        assert_eq!(containers, 1, "file {} containment", node.key);
    }
}

#[test]
fn test_names_are_unique_within_a_directory() {
    let tree = ObjectTree::from_keys(["a/x.txt", "a/x.txt", "a/y/z.txt", "a/y/q.txt"]);

    for node in tree.iter().filter(|n| n.is_dir()) {
        let mut names: Vec<&str> = tree
            .children(node.id)
            .iter()
            .map(|id| tree.node(*id).name.as_str())
            .collect();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), before, "duplicate name under {}", node.key);
    }
}

#[test]
fn test_stale_directory_key_resolves_to_none_after_rebuild() {
    let first = ObjectTree::from_keys(["gone/file.txt"]);
    assert!(first.find_directory("gone").is_some());

    let second = ObjectTree::from_keys(["kept/file.txt"]);
    assert!(second.find_directory("gone").is_none());
    assert!(second.find_directory("kept").is_some());
}

#[test]
fn test_root_resolves_by_empty_key() {
    let tree = ObjectTree::from_keys(["a/b.txt"]);
    assert_eq!(tree.find_directory(""), Some(ROOT));
}

#[test]
fn test_node_ids_are_arena_indices() {
    let tree = ObjectTree::from_keys(["a/b.txt"]);
    for (index, node) in tree.iter().enumerate() {
        assert_eq!(node.id, NodeId::new(index));
    }
}

#[test]
fn test_error_taxonomy_split() {
    let validation = BucketError::validation("Add new directory or new file name.");
    let transport = BucketError::transport(StoreOperation::Put, "access denied");

    assert!(validation.is_validation());
    assert!(!transport.is_validation());
    assert_eq!(transport.to_string(), "put object failed: access denied");
}

#[test]
fn test_config_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bucketree").join("config.toml");

    let config = BucketConfig {
        access_key_id: "AKIAEXAMPLE".to_string(),
        secret_access_key: "wJalrXUtnFEMI".to_string(),
        region: "eu-west-1".to_string(),
        bucket_name: "demo-bucket".to_string(),
        endpoint_url: None,
    };
    config.save_to(&path).unwrap();

    let loaded = BucketConfig::load_from(&path).expect("saved config loads back");
    assert_eq!(loaded, config);
    assert!(loaded.is_complete());
}
