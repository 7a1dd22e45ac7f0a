use httpfs_namespace::{
    reconstruct, NamespaceError, NodeId, NodeTable, PathError, PathLimits,
};

fn chain(nodes: &mut NodeTable, segments: &[&str]) -> NodeId {
    segments.iter().fold(NodeTable::ROOT, |parent, name| {
        nodes.insert_child(parent, name).unwrap()
    })
}

#[test]
fn test_deepest_allowed_chain() {
    let mut nodes = NodeTable::new();
    let names: Vec<String> = (0..20).map(|i| format!("s{}", i)).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let leaf = chain(&mut nodes, &refs);
    let expected = refs.join("/");

    assert_eq!(nodes.get(leaf).unwrap().full_path(), expected);
    assert_eq!(
        reconstruct(&nodes, leaf, &PathLimits::default()).unwrap(),
        expected
    );

    let err = nodes.insert_child(leaf, "one-more").unwrap_err();
    assert_eq!(
        err,
        NamespaceError::Path(PathError::PathTooDeep { max_depth: 20 })
    );
}

#[test]
fn test_path_bound_is_inclusive() {
    let mut nodes = NodeTable::new();
    let host = nodes.insert_child(NodeTable::ROOT, "example.com").unwrap();

    // 11 + 1 + 244 = 256
    let fits = nodes.insert_child(host, &"a".repeat(244)).unwrap();
    assert_eq!(nodes.get(fits).unwrap().full_path().len(), 256);

    let before = nodes.len();
    let err = nodes.insert_child(host, &"a".repeat(245)).unwrap_err();
    assert_eq!(
        err,
        NamespaceError::Path(PathError::NameTooLong { len: 257, max: 256 })
    );
    assert_eq!(nodes.len(), before);
    assert!(nodes.child(host, &"a".repeat(245)).is_none());
}

#[test]
fn test_custom_limits() {
    let limits = PathLimits::default().with_max_depth(2).with_max_path_len(16);
    let mut nodes = NodeTable::with_limits(limits);

    let leaf = chain(&mut nodes, &["host", "page"]);
    assert_eq!(nodes.get(leaf).unwrap().full_path(), "host/page");

    assert!(matches!(
        nodes.insert_child(leaf, "x"),
        Err(NamespaceError::Path(PathError::PathTooDeep { max_depth: 2 }))
    ));
    assert!(matches!(
        nodes.insert_child(NodeTable::ROOT, "seventeen-bytes!!"),
        Err(NamespaceError::Path(PathError::NameTooLong { .. }))
    ));
}

#[test]
fn test_forget_and_recreate() {
    let mut nodes = NodeTable::new();
    let leaf = chain(&mut nodes, &["example.com", "a"]);

    let removed = nodes.remove(leaf).unwrap();
    assert_eq!(removed.full_path(), "example.com/a");

    let host = nodes.child(NodeTable::ROOT, "example.com").unwrap();
    let again = nodes.insert_child(host, "a").unwrap();
    assert_ne!(again, leaf);
    assert_eq!(nodes.get(again).unwrap().full_path(), "example.com/a");
}
