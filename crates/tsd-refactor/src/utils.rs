//! Node lookup helpers.
//!
//! Offsets are byte offsets. A node covers `[pos, end)`, so an offset equal
//! to a node's end belongs to whatever follows it.

use tsd_common::TextRange;
use tsd_parser::{NodeArena, NodeIndex, SyntaxKind};

/// Most specific node containing `offset`, starting from `root`.
///
/// Returns `None` when `root` itself does not contain the offset.
pub fn find_child_containing_position(
    arena: &NodeArena,
    root: NodeIndex,
    offset: u32,
) -> Option<NodeIndex> {
    if !arena.get(root)?.contains(offset) {
        return None;
    }
    let mut current = root;
    loop {
        let next = arena
            .children(current)
            .into_iter()
            .find(|&child| arena.get(child).is_some_and(|node| node.contains(offset)));
        match next {
            Some(child) => current = child,
            None => return Some(current),
        }
    }
}

/// Every node fully covered by `range`, in source order.
///
/// Only nodes that contain the range without being covered by it are
/// descended into, so the result is the maximal covered sibling set. Nothing
/// is returned when the range only partially covers nodes.
pub fn find_all_nodes_in_range(arena: &NodeArena, root: NodeIndex, range: TextRange) -> Vec<NodeIndex> {
    let mut found = Vec::new();
    collect_nodes_in_range(arena, root, range, &mut found);
    found
}

fn collect_nodes_in_range(arena: &NodeArena, node: NodeIndex, range: TextRange, found: &mut Vec<NodeIndex>) {
    let Some(data) = arena.get(node) else {
        return;
    };
    let node_range = TextRange::new(data.pos, data.end);
    if range.contains_range(node_range) {
        found.push(node);
    } else if node_range.contains_range(range) {
        for child in arena.children(node) {
            collect_nodes_in_range(arena, child, range, found);
        }
    }
}

/// Nearest strict ancestor of `node` matching `predicate`.
pub fn find_nearest_parent(
    arena: &NodeArena,
    node: NodeIndex,
    predicate: impl Fn(SyntaxKind) -> bool,
) -> Option<NodeIndex> {
    let mut current = arena.parent(node);
    while let Some(ancestor) = arena.get(current) {
        if predicate(ancestor.kind) {
            return Some(current);
        }
        current = ancestor.parent;
    }
    None
}

/// Nearest enclosing function declaration, function expression, arrow
/// function or method.
pub fn find_function_like_parent(arena: &NodeArena, node: NodeIndex) -> Option<NodeIndex> {
    find_nearest_parent(arena, node, |kind| {
        matches!(
            kind,
            SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ArrowFunction
                | SyntaxKind::MethodDeclaration
        )
    })
}

/// Width of the leading whitespace of the line containing `pos`. A line of
/// only whitespace has no indentation.
pub fn get_line_indentation(text: &str, pos: u32) -> u32 {
    let start = tsd_common::line_start_of(text, pos) as usize;
    let line = text.get(start..).unwrap_or("");
    let line = line.split(['\n', '\r']).next().unwrap_or("");
    match line.find(|ch: char| ch != ' ' && ch != '\t') {
        Some(width) => width as u32,
        None => 0,
    }
}

#[cfg(test)]
mod utils_tests {
    use super::*;
    use tsd_parser::SourceFile;

    #[test]
    fn finds_identifier_under_caret() {
        let file = SourceFile::parse("a.ts", "const value = other;\n");
        let arena = file.arena();
        let offset = file.text().find("other").unwrap() as u32;
        let node = find_child_containing_position(arena, file.root(), offset + 2).unwrap();
        assert_eq!(arena.kind(node), Some(SyntaxKind::Identifier));
        assert_eq!(file.node_text(node), "other");
    }

    #[test]
    fn position_at_node_end_belongs_to_what_follows() {
        let file = SourceFile::parse("a.ts", "const value = other;\n");
        let arena = file.arena();
        let offset = file.text().find(" =").unwrap() as u32;
        let node = find_child_containing_position(arena, file.root(), offset).unwrap();
        assert_ne!(file.node_text(node), "value");
    }

    #[test]
    fn offset_outside_tree_is_none() {
        let file = SourceFile::parse("a.ts", "a;\n");
        assert_eq!(find_child_containing_position(file.arena(), file.root(), 100), None);
    }

    #[test]
    fn range_collects_covered_siblings() {
        let file = SourceFile::parse("a.ts", "const { a, b, c } = value;\n");
        let arena = file.arena();
        let pos = file.text().find("b").unwrap() as u32;
        let end = file.text().find("c").unwrap() as u32 + 1;
        let nodes = find_all_nodes_in_range(arena, file.root(), TextRange::new(pos, end));
        assert_eq!(nodes.len(), 2);
        assert!(nodes.iter().all(|&n| arena.is_kind(n, SyntaxKind::BindingElement)));
        assert_eq!(file.node_text(nodes[0]), "b");
        assert_eq!(file.node_text(nodes[1]), "c");
    }

    #[test]
    fn ragged_range_collects_nothing() {
        let file = SourceFile::parse("a.ts", "const abc = value;\n");
        let pos = file.text().find("bc").unwrap() as u32;
        let nodes = find_all_nodes_in_range(file.arena(), file.root(), TextRange::new(pos, pos + 1));
        assert!(nodes.is_empty());
    }

    #[test]
    fn function_like_parent_skips_blocks() {
        let file = SourceFile::parse("a.ts", "function f() {\n    if (x) { y; }\n}\n");
        let arena = file.arena();
        let offset = file.text().find('y').unwrap() as u32;
        let node = find_child_containing_position(arena, file.root(), offset).unwrap();
        let function = find_function_like_parent(arena, node).unwrap();
        assert_eq!(arena.kind(function), Some(SyntaxKind::FunctionDeclaration));
        assert_eq!(find_nearest_parent(arena, node, |kind| kind == SyntaxKind::ClassDeclaration), None);
    }

    #[test]
    fn line_indentation() {
        let text = "a\n    b\n\t c\n   \n";
        assert_eq!(get_line_indentation(text, 0), 0);
        assert_eq!(get_line_indentation(text, 6), 4);
        assert_eq!(get_line_indentation(text, 10), 2);
        assert_eq!(get_line_indentation(text, 13), 0);
    }
}
