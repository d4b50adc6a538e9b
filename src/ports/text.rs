// src/ports/text.rs
use crate::domain::TreeNode;

/// Plain-text rendering of a notes listing for terminals
#[derive(Debug)]
pub struct TreePresenter {
    indent: usize,
}

impl TreePresenter {
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    /// One line per node, folders suffixed with `/` and listed before files
    pub fn render(&self, nodes: &[TreeNode]) -> String {
        let mut out = String::new();
        self.render_level(nodes, 0, &mut out);
        out
    }

    fn render_level(&self, nodes: &[TreeNode], level: usize, out: &mut String) {
        let mut ordered: Vec<&TreeNode> = nodes.iter().collect();
        ordered.sort_by(|a, b| {
            b.is_directory()
                .cmp(&a.is_directory())
                .then_with(|| a.name.cmp(&b.name))
        });

        for node in ordered {
            out.push_str(&" ".repeat(level * self.indent));
            out.push_str(&node.name);
            if node.is_directory() {
                out.push('/');
            }
            out.push('\n');
            self.render_level(node.children(), level + 1, out);
        }
    }
}

impl Default for TreePresenter {
    fn default() -> Self {
        Self::new()
    }
}
