//! # robdd: Reduced Ordered Binary Decision Diagrams with complemented edges
//!
//! **`robdd`** is a manager-centric library for representing Boolean functions
//! canonically as a shared directed acyclic graph and combining them with the
//! usual connectives.
//!
//! ## What is a BDD?
//!
//! A Binary Decision Diagram represents a Boolean function as a DAG of
//! decision nodes under a fixed variable order. After merging isomorphic
//! subgraphs and eliminating redundant decisions, the representation is
//! **canonical**: two functions are equal iff their diagrams are the same
//! graph. Equivalence checking becomes pointer comparison.
//!
//! ## Key Features
//!
//! - **Manager-Centric Architecture**: all operations go through the
//!   [`Bdd`][crate::bdd::Bdd] manager, which owns the node store and keeps
//!   the canonical-form invariant through hash consing.
//! - **Complemented Edges**: a function is addressed by a
//!   [`Signal`][crate::signal::Signal] carrying a one-bit complement flag,
//!   so negation costs a single XOR and `f`/`¬f` share one node.
//! - **Operation Caching**: per-operator computed tables memoize AND, OR,
//!   XOR and ITE, probing both argument orientations of commutative calls.
//! - **Reference Counting**: user handles are bracketed with
//!   `incref`/`decref`; the manager reports exactly the live portion of
//!   the store.
//!
//! ## Basic Usage
//!
//! ```rust
//! use robdd::bdd::Bdd;
//! use robdd::types::Var;
//!
//! // 1. Initialize the manager for functions over x0, x1.
//! let mut bdd = Bdd::new(2);
//!
//! // 2. Create literals (variables are 0-indexed).
//! let x0 = bdd.literal(Var::new(0), false);
//! let x1 = bdd.literal(Var::new(1), false);
//!
//! // 3. Build a formula: f = x0 AND (NOT x1).
//! let not_x1 = bdd.apply_not(x1);
//! let f = bdd.apply_and(x0, not_x1);
//! bdd.incref(f);
//!
//! // 4. Observe it as a truth table (positions are assignments,
//! //    most significant first).
//! assert_eq!(bdd.get_tt(f).to_string(), "0010");
//!
//! // 5. Release the handle; nothing is live anymore.
//! bdd.decref(f);
//! assert_eq!(bdd.num_nodes(), 0);
//! ```
//!
//! ## Core Components
//!
//! - **[`bdd`]**: the heart of the library; the [`Bdd`][crate::bdd::Bdd]
//!   manager and the recursive operators.
//! - **[`signal`]**: the edge encoding (node index plus complement bit).
//! - **[`subtable`]**: per-variable unique tables (hash consing).
//! - **[`cache`]**: computed tables (operation memoization).
//! - **[`truth_table`]**: explicit truth tables, used for observation and
//!   as the reference semantics in tests.

pub mod bdd;
pub mod bitset;
pub mod cache;
pub mod debug;
pub mod node;
pub mod signal;
pub mod subtable;
pub mod truth_table;
pub mod types;
pub mod utils;
