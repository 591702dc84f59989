//! Category tree construction from the flat parent-pointer listing
//!
//! The backend returns categories as a flat list where each record names its
//! parent. The tree is rebuilt from scratch on every fetch:
//!
//! 1. one pass assigns every category a slot keyed by id,
//! 2. a second pass hangs each slot under its parent, or at the root when the
//!    parent is not in the list (e.g. it fell off the fetched page).
//!
//! Input order is preserved among siblings.

use crate::api::models::{Category, CategoryId};
use std::collections::HashMap;
use std::fmt::Write as _;

/// Inline affordances offered on every node of the management tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeAction {
    AddSubcategory,
    Delete,
    Edit,
}

impl NodeAction {
    pub const ALL: [NodeAction; 3] = [NodeAction::AddSubcategory, NodeAction::Delete, NodeAction::Edit];

    pub fn symbol(&self) -> &'static str {
        match self {
            NodeAction::AddSubcategory => "+",
            NodeAction::Delete => "-",
            NodeAction::Edit => "✎",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeAction::AddSubcategory => "Add subcategory",
            NodeAction::Delete => "Delete category",
            NodeAction::Edit => "Edit category",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryNode {
    pub id: CategoryId,
    pub parent_id: Option<CategoryId>,
    /// Locale-resolved display text
    pub title: String,
    pub questions_count: Option<u64>,
    pub actions: Vec<NodeAction>,
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    fn from_category(category: &Category, language: &str, with_actions: bool) -> Self {
        Self {
            id: category.id,
            parent_id: category.parent_id,
            title: category.display_name(language).to_string(),
            questions_count: category.questions_count,
            actions: if with_actions { NodeAction::ALL.to_vec() } else { Vec::new() },
            category: category.clone(),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including self
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(CategoryNode::subtree_len).sum::<usize>()
    }

    fn label(&self) -> String {
        match self.questions_count {
            Some(count) => format!("{} [{}] ({} questions)", self.title, self.id, count),
            None => format!("{} [{}]", self.title, self.id),
        }
    }
}

/// Options for building a tree
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    language: String,
    search: Option<String>,
    with_actions: bool,
}

impl TreeBuilder {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            search: None,
            with_actions: true,
        }
    }

    /// Keep only categories whose default name contains `text`, case-insensitively.
    /// Children of a filtered-out category surface as roots.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() { None } else { Some(text.to_lowercase()) };
        self
    }

    pub fn without_actions(mut self) -> Self {
        self.with_actions = false;
        self
    }

    pub fn build(&self, categories: &[Category]) -> CategoryTree {
        let selected: Vec<&Category> = categories
            .iter()
            .filter(|c| match &self.search {
                Some(needle) => c.name.to_lowercase().contains(needle),
                None => true,
            })
            .collect();

        // Pass 1: id -> slot
        let mut slots: Vec<Option<CategoryNode>> = Vec::with_capacity(selected.len());
        let mut index_by_id: HashMap<CategoryId, usize> = HashMap::with_capacity(selected.len());
        for (index, category) in selected.iter().enumerate() {
            slots.push(Some(CategoryNode::from_category(category, &self.language, self.with_actions)));
            index_by_id.entry(category.id).or_insert(index);
        }

        // Pass 2: hang each slot under its parent when the parent is present
        let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); selected.len()];
        let mut root_indices = Vec::new();
        for (index, category) in selected.iter().enumerate() {
            match category.parent_id.and_then(|pid| index_by_id.get(&pid)) {
                Some(&parent_index) if parent_index != index => children_of[parent_index].push(index),
                _ => root_indices.push(index),
            }
        }

        let mut roots: Vec<CategoryNode> = root_indices
            .iter()
            .filter_map(|&index| assemble(index, &mut slots, &children_of))
            .collect();

        // Only nodes caught in a parent cycle are left; surface them rather than drop them
        for index in 0..slots.len() {
            if slots[index].is_some() {
                log::warn!("Category {} is part of a parent cycle, placing it at the root", selected[index].id);
                if let Some(node) = assemble(index, &mut slots, &children_of) {
                    roots.push(node);
                }
            }
        }

        CategoryTree { roots }
    }
}

fn assemble(index: usize, slots: &mut [Option<CategoryNode>], children_of: &[Vec<usize>]) -> Option<CategoryNode> {
    let mut node = slots[index].take()?;
    node.children = children_of[index]
        .iter()
        .filter_map(|&child| assemble(child, slots, children_of))
        .collect();
    Some(node)
}

/// Build the management tree for `language` with all node actions attached
pub fn build_tree(categories: &[Category], language: &str) -> CategoryTree {
    TreeBuilder::new(language).build(categories)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryTree {
    roots: Vec<CategoryNode>,
}

impl CategoryTree {
    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    pub fn into_roots(self) -> Vec<CategoryNode> {
        self.roots
    }

    /// Total node count across the forest
    pub fn len(&self) -> usize {
        self.roots.iter().map(CategoryNode::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Depth-first, pre-order walk yielding `(depth, node)`
    pub fn walk(&self) -> Vec<(usize, &CategoryNode)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(usize, &CategoryNode)> = self.roots.iter().rev().map(|n| (0, n)).collect();
        while let Some((depth, node)) = stack.pop() {
            out.push((depth, node));
            stack.extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        }
        out
    }

    pub fn find(&self, id: CategoryId) -> Option<&CategoryNode> {
        self.walk().into_iter().map(|(_, node)| node).find(|node| node.id == id)
    }

    /// Render as an indented text tree
    pub fn render(&self) -> String {
        let mut out = String::new();
        for root in &self.roots {
            let _ = writeln!(out, "{}", root.label());
            render_children(&root.children, "", &mut out);
        }
        out
    }
}

fn render_children(children: &[CategoryNode], prefix: &str, out: &mut String) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let branch = if last { "└── " } else { "├── " };
        let _ = writeln!(out, "{}{}{}", prefix, branch, child.label());
        let next_prefix = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_children(&child.children, &next_prefix, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::CategoryLocale;

    fn category(id: CategoryId, parent_id: Option<CategoryId>, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            parent_id,
            ancestors: parent_id.into_iter().collect(),
            hash: None,
            locales: Vec::new(),
            questions_count: None,
        }
    }

    #[test]
    fn test_root_and_child_fall_back_to_name() {
        let categories = vec![category(1, None, "Root"), category(2, Some(1), "Child")];
        let tree = build_tree(&categories, "en");

        assert_eq!(tree.roots().len(), 1);
        let root = &tree.roots()[0];
        assert_eq!(root.id, 1);
        assert_eq!(root.title, "Root");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].id, 2);
        assert_eq!(root.children[0].title, "Child");
        assert!(root.children[0].children.is_empty());
    }

    #[test]
    fn test_missing_parent_becomes_root() {
        let tree = build_tree(&[category(2, Some(99), "Orphan")], "en");
        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.roots()[0].id, 2);
    }

    #[test]
    fn test_locale_title_resolution() {
        let mut geo = category(1, None, "Geography");
        geo.locales = vec![CategoryLocale::new("uk", "Географія"), CategoryLocale::new("en", "Geography EN")];

        assert_eq!(build_tree(&[geo.clone()], "uk").roots()[0].title, "Географія");
        assert_eq!(build_tree(&[geo.clone()], "en").roots()[0].title, "Geography EN");
        assert_eq!(build_tree(&[geo], "de").roots()[0].title, "Geography");
    }

    #[test]
    fn test_children_keep_input_order_and_point_at_parent() {
        let categories = vec![
            category(3, Some(1), "C"),
            category(1, None, "Root"),
            category(2, Some(1), "B"),
            category(4, Some(2), "D"),
        ];
        let tree = build_tree(&categories, "en");

        assert_eq!(tree.len(), 4);
        let root = &tree.roots()[0];
        let ids: Vec<_> = root.children.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2]);
        for (_, node) in tree.walk() {
            for child in &node.children {
                assert_eq!(child.parent_id, Some(node.id));
            }
        }
    }

    #[test]
    fn test_nodes_carry_actions_unless_disabled() {
        let categories = vec![category(1, None, "Root")];
        assert_eq!(build_tree(&categories, "en").roots()[0].actions, NodeAction::ALL.to_vec());
        assert!(TreeBuilder::new("en").without_actions().build(&categories).roots()[0].actions.is_empty());
    }

    #[test]
    fn test_search_filters_by_name_and_promotes_children() {
        let categories = vec![
            category(1, None, "Science"),
            category(2, Some(1), "Physics"),
            category(3, Some(1), "Chemistry"),
            category(4, Some(3), "Organic chemistry"),
        ];
        let tree = TreeBuilder::new("en").search("CHEM").build(&categories);

        let root_ids: Vec<_> = tree.roots().iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![3]);
        assert_eq!(tree.roots()[0].children[0].id, 4);
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_cycle_does_not_lose_nodes() {
        let categories = vec![category(1, Some(2), "A"), category(2, Some(1), "B"), category(3, Some(3), "Self")];
        let tree = build_tree(&categories, "en");
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_find_and_render() {
        let mut root = category(1, None, "Root");
        root.questions_count = Some(12);
        let categories = vec![root, category(2, Some(1), "Child"), category(3, Some(1), "Last")];
        let tree = build_tree(&categories, "en");

        assert_eq!(tree.find(3).map(|n| n.title.as_str()), Some("Last"));
        assert!(tree.find(42).is_none());
        assert_eq!(
            tree.render(),
            "Root [1] (12 questions)\n├── Child [2]\n└── Last [3]\n"
        );
    }
}
