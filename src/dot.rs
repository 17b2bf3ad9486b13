//! Formula DAG to DOT (Graphviz) conversion.
//!
//! Every node of the shared DAG is emitted once, however many parents it has,
//! which makes the output handy for seeing how much structure a
//! transformation shares (or fails to share).
//!
//! # DOT Format
//!
//! - **Constants** (`$true`, `$false`) are squares at the bottom (sink rank)
//! - **Literals** are circles, labeled with the (possibly negated) variable name
//! - **Operators** are boxes labeled with their connective
//! - **Edges** point from an operator to its operands; for implications the
//!   edge to the right-hand side is dashed
//! - **Roots** are rectangles at the top (source rank)
//!
//! # Examples
//!
//! ```
//! use formula_qe::factory::FormulaFactory;
//!
//! let ff = FormulaFactory::default();
//! let a = ff.variable("a");
//! let b = ff.variable("b");
//! let f = ff.and(a, b);
//!
//! let dot = ff.to_dot(&[f]).unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::collections::BTreeSet;
use std::fmt::Write as _;

use crate::factory::FormulaFactory;
use crate::node::Node;
use crate::reference::FormulaRef;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for operator nodes (default: "box")
    pub operator_shape: &'static str,
    /// Shape for literal nodes (default: "circle")
    pub literal_shape: &'static str,
    /// Shape for constant nodes (default: "square")
    pub constant_shape: &'static str,
    /// Shape for root nodes (default: "rect")
    pub root_shape: &'static str,
    /// Style for operand edges (default: "solid")
    pub edge_style: &'static str,
    /// Style for the right operand of an implication (default: "dashed")
    pub right_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            operator_shape: "box",
            literal_shape: "circle",
            constant_shape: "square",
            root_shape: "rect",
            edge_style: "solid",
            right_edge_style: "dashed",
        }
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

impl FormulaFactory {
    /// Converts the formulas rooted at `roots` to DOT format.
    pub fn to_dot(&self, roots: &[FormulaRef]) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(roots, &DotConfig::default())
    }

    /// Converts the formulas rooted at `roots` to DOT format with custom configuration.
    pub fn to_dot_with_config(
        &self,
        roots: &[FormulaRef],
        config: &DotConfig,
    ) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;

        // Sorted for stable output.
        let nodes: BTreeSet<FormulaRef> = self
            .descendants(roots.iter().copied())
            .into_iter()
            .collect();

        // Constants
        let constants: Vec<FormulaRef> = nodes
            .iter()
            .copied()
            .filter(|&f| self.is_constant(f))
            .collect();
        if !constants.is_empty() {
            writeln!(dot, "{{ rank=sink;")?;
            for f in constants {
                let label = if self.is_true(f) { "1" } else { "0" };
                writeln!(
                    dot,
                    "  n{} [label=\"{}\", shape={}];",
                    f.get(),
                    label,
                    config.constant_shape
                )?;
            }
            writeln!(dot, "}}")?;
        }

        // Literals and operators
        for &f in &nodes {
            let (label, shape) = match self.node(f) {
                Node::False | Node::True => continue,
                Node::Literal(lit) => {
                    let name = escape(&self.name(lit.var()));
                    let label = if lit.is_negative() {
                        format!("~{}", name)
                    } else {
                        name
                    };
                    (label, config.literal_shape)
                }
                Node::Not(_) => ("~".to_string(), config.operator_shape),
                Node::Impl(_, _) => ("=>".to_string(), config.operator_shape),
                Node::Equiv(_, _) => ("<=>".to_string(), config.operator_shape),
                Node::And(_) => ("&".to_string(), config.operator_shape),
                Node::Or(_) => ("|".to_string(), config.operator_shape),
            };
            writeln!(dot, "n{} [label=\"{}\", shape={}];", f.get(), label, shape)?;
        }

        // Edges
        for &f in &nodes {
            let node = self.node(f);
            for (i, op) in node.operands().into_iter().enumerate() {
                let style = match &node {
                    Node::Impl(_, _) if i == 1 => config.right_edge_style,
                    _ => config.edge_style,
                };
                writeln!(dot, "n{} -> n{} [style={}];", f.get(), op.get(), style)?;
            }
        }

        // Roots
        writeln!(dot, "{{ rank=source;")?;
        for i in 0..roots.len() {
            writeln!(dot, "  r{} [label=\"f{}\", shape={}];", i, i, config.root_shape)?;
        }
        writeln!(dot, "}}")?;
        for (i, root) in roots.iter().enumerate() {
            writeln!(dot, "r{} -> n{};", i, root.get())?;
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_dot_shares_nodes() {
        let ff = FormulaFactory::default();

        let a = ff.variable("a");
        let b = ff.variable("b");
        let ab = ff.and(a, b);
        let f = ff.or(ab, ff.variable("c"));
        let g = ff.implication(ab, ff.not(a));

        let dot = ff.to_dot(&[f, g]).unwrap();
        // The shared conjunction is declared exactly once.
        let decl = format!("n{} [label=\"&\"", ab.get());
        assert_eq!(dot.matches(&decl).count(), 1);
        assert!(dot.contains("r0 -> "));
        assert!(dot.contains("r1 -> "));
        assert!(dot.contains("label=\"~a\""));
        assert!(dot.contains("style=dashed"));
    }

    #[test]
    fn test_to_dot_constants() {
        let ff = FormulaFactory::default();

        let dot = ff.to_dot(&[ff.verum()]).unwrap();
        assert!(dot.contains("rank=sink"));
        assert!(dot.contains("label=\"1\""));
        assert!(!dot.contains("label=\"0\""));
    }

    #[test]
    fn test_escape() {
        let ff = FormulaFactory::default();

        let f = ff.variable("say \"hi\"");
        let dot = ff.to_dot(&[f]).unwrap();
        assert!(dot.contains("label=\"say \\\"hi\\\"\""));
    }
}
