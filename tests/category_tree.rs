use quiz_admin::api::models::{Category, CategoryId, CategoryLocale};
use quiz_admin::domain::{CategoryNode, TreeBuilder, build_tree};
use std::collections::HashSet;

fn category(id: CategoryId, parent_id: Option<CategoryId>, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        parent_id,
        ancestors: Vec::new(),
        hash: None,
        locales: vec![CategoryLocale::new("uk", format!("{} (uk)", name))],
        questions_count: None,
    }
}

/// A mixed listing: children listed before their parents, a deep chain,
/// orphans pointing at ids that were never fetched, and a self-parent
fn listing() -> Vec<Category> {
    vec![
        category(11, Some(10), "Painting"),
        category(10, None, "Art"),
        category(12, Some(10), "Sculpture"),
        category(20, None, "Geography"),
        category(21, Some(20), "Europe"),
        category(22, Some(21), "Ukraine"),
        category(23, Some(22), "Kyiv"),
        category(30, Some(999), "Orphan"),
        category(31, Some(30), "Orphan child"),
        category(40, Some(40), "Self parent"),
    ]
}

fn collect_ids(node: &CategoryNode, out: &mut Vec<CategoryId>) {
    out.push(node.id);
    for child in &node.children {
        collect_ids(child, out);
    }
}

#[test]
fn test_every_category_appears_exactly_once() {
    let categories = listing();
    let tree = build_tree(&categories, "en");

    let mut seen = Vec::new();
    for root in tree.roots() {
        collect_ids(root, &mut seen);
    }

    assert_eq!(seen.len(), categories.len());
    assert_eq!(tree.len(), categories.len());
    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), categories.len());
}

#[test]
fn test_roots_are_top_level_orphans_and_self_parents() {
    let tree = build_tree(&listing(), "en");
    let root_ids: Vec<CategoryId> = tree.roots().iter().map(|r| r.id).collect();

    // first-appearance order among roots
    assert_eq!(root_ids, vec![10, 20, 30, 40]);
}

#[test]
fn test_children_keep_input_order_and_point_at_their_parent() {
    let tree = build_tree(&listing(), "en");

    let art = tree.find(10).unwrap();
    let child_ids: Vec<CategoryId> = art.children.iter().map(|c| c.id).collect();
    assert_eq!(child_ids, vec![11, 12]);

    for (_, node) in tree.walk() {
        for child in &node.children {
            assert_eq!(child.parent_id, Some(node.id));
        }
    }
}

#[test]
fn test_deep_chain_keeps_depth() {
    let tree = build_tree(&listing(), "en");
    let depths: Vec<(usize, CategoryId)> = tree
        .walk()
        .into_iter()
        .filter(|(_, n)| (20..=23).contains(&n.id))
        .map(|(depth, n)| (depth, n.id))
        .collect();

    assert_eq!(depths, vec![(0, 20), (1, 21), (2, 22), (3, 23)]);
}

#[test]
fn test_titles_follow_the_requested_language() {
    let tree = build_tree(&listing(), "uk");
    assert_eq!(tree.find(22).unwrap().title, "Ukraine (uk)");

    let tree = build_tree(&listing(), "fr");
    assert_eq!(tree.find(22).unwrap().title, "Ukraine");
}

#[test]
fn test_search_surfaces_matching_children_as_roots() {
    let tree = TreeBuilder::new("en").search("orphan").without_actions().build(&listing());
    let root_ids: Vec<CategoryId> = tree.roots().iter().map(|r| r.id).collect();
    assert_eq!(root_ids, vec![30]);
    assert_eq!(tree.len(), 2);
    assert!(tree.walk().iter().all(|(_, n)| n.actions.is_empty()));

    // "Kyiv" matches alone, its ancestors are filtered out
    let tree = TreeBuilder::new("en").search("KYIV").build(&listing());
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(tree.roots()[0].id, 23);
}

#[test]
fn test_empty_listing_gives_empty_forest() {
    let tree = build_tree(&[], "en");
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
}
