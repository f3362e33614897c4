//! Inspection utilities: structural dumps and invariant checking.
//!
//! These helpers are primarily useful in tests and during development.

use std::fmt::{self, Write};

use hashbrown::HashSet;

use crate::bdd::Bdd;
use crate::signal::Signal;

impl Bdd {
    /// Write an indented dump of the graph rooted at `f`.
    ///
    /// Each node is indented by its variable depth; a complemented edge
    /// is marked with `!`; terminals print as `constant 0`/`constant 1`.
    ///
    /// ```text
    /// node 3: var = x0
    /// > THEN branch
    ///   !node 2: var = x1
    ///   > THEN branch
    ///     constant 0
    ///   > ELSE branch
    ///     constant 1
    /// > ELSE branch
    ///   ...
    /// ```
    pub fn dump(&self, f: Signal, out: &mut impl Write) -> fmt::Result {
        let node = *self.node(f.index());
        let indent = "  ".repeat(node.var.id() as usize);

        if f.is_const() {
            return writeln!(out, "{}constant {}", indent, if f == Signal::one() { 1 } else { 0 });
        }

        writeln!(
            out,
            "{}{}node {}: var = {}",
            indent,
            if f.is_complemented() { "!" } else { "" },
            f.index(),
            node.var,
        )?;
        writeln!(out, "{}> THEN branch", indent)?;
        self.dump(node.high, out)?;
        writeln!(out, "{}> ELSE branch", indent)?;
        self.dump(node.low, out)
    }

    /// [`dump`][Bdd::dump] into a fresh string.
    pub fn dump_string(&self, f: Signal) -> String {
        let mut result = String::new();
        self.dump(f, &mut result).unwrap();
        result
    }

    /// Check the structural invariants of the whole store; panics with a
    /// description on the first violation.
    ///
    /// Checked per non-terminal node:
    /// - both children sit strictly below the node;
    /// - the then-edge is not complemented;
    /// - the children differ;
    /// - the node is indexed by the subtable of its variable;
    /// - no other node shares its `(var, low, high)` triple.
    pub fn check_invariants(&self) {
        assert_eq!(self.nodes.len(), self.refs.len(), "Node and refcount stores diverge");

        let mut seen = HashSet::new();

        for (i, node) in self.nodes.iter().enumerate().skip(1) {
            assert!(
                node.var.id() < self.num_vars(),
                "Node @{} carries the terminal sentinel",
                i
            );
            assert!(
                self.var_of(node.low) > node.var && self.var_of(node.high) > node.var,
                "Node @{} has a child at or above its own level",
                i
            );
            assert!(!node.high.is_complemented(), "Node @{} has a complemented then-edge", i);
            assert_ne!(node.low, node.high, "Node @{} survived with identical children", i);
            assert_eq!(
                self.subtables[node.var.id() as usize].find(node.low, node.high, &self.nodes),
                Some(i as u32),
                "Node @{} is not indexed by its subtable",
                i
            );
            assert!(
                seen.insert((node.var, node.low, node.high)),
                "Node @{} duplicates another node's triple",
                i
            );
        }
    }
}
