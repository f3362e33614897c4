//! The BDD manager: node store, unique tables, computed tables, and the
//! recursive Boolean operators.
//!
//! All operations go through the [`Bdd`] manager. Functions are handed out
//! as [`Signal`]s (complemented edges), so negation is free and a function
//! and its complement share one node. Canonical form is maintained by
//! [`Bdd::mk_node`]: identical-children reduction, then-edge
//! normalization, and unique-table deduplication.
//!
//! User-facing lifetimes are reference counted: bracket every retained
//! signal with [`Bdd::incref`]/[`Bdd::decref`]. A node acquires references
//! to its children when its own count becomes positive and releases them
//! when it drops back to zero, so [`Bdd::num_nodes`] reports exactly the
//! nodes reachable from live handles. Storage of dead nodes is never
//! reclaimed and indices are never reused, which keeps the computed
//! tables valid indefinitely.

use std::fmt::Debug;

use log::debug;

use crate::bitset::BitSet;
use crate::cache::OpCache;
use crate::node::Node;
use crate::signal::Signal;
use crate::subtable::Subtable;
use crate::truth_table::TruthTable;
use crate::types::Var;

const CACHE_BITS: usize = 14;

pub struct Bdd {
    num_vars: u32,
    pub(crate) nodes: Vec<Node>,
    pub(crate) refs: Vec<u32>,
    pub(crate) subtables: Vec<Subtable>,
    and_cache: OpCache<(Signal, Signal), Signal>,
    or_cache: OpCache<(Signal, Signal), Signal>,
    xor_cache: OpCache<(Signal, Signal), Signal>,
    ite_cache: OpCache<(Signal, Signal, Signal), Signal>,
    invoke_and: u64,
    invoke_or: u64,
    invoke_xor: u64,
    invoke_ite: u64,
}

impl Bdd {
    /// Create a manager for functions over variables `x0 .. x{num_vars-1}`.
    pub fn new(num_vars: u32) -> Self {
        assert!(num_vars >= 1, "At least one variable is required");

        // The terminal sits at index 0 and carries the sentinel variable
        // `num_vars`, below every real variable. Its children point at
        // itself and are never followed.
        let terminal = Node::new(Var::new(num_vars), Signal::one(), Signal::one());

        Self {
            num_vars,
            nodes: vec![terminal],
            refs: vec![0],
            subtables: (0..num_vars).map(|v| Subtable::new(Var::new(v))).collect(),
            and_cache: OpCache::new(CACHE_BITS),
            or_cache: OpCache::new(CACHE_BITS),
            xor_cache: OpCache::new(CACHE_BITS),
            ite_cache: OpCache::new(CACHE_BITS),
            invoke_and: 0,
            invoke_or: 0,
            invoke_xor: 0,
            invoke_ite: 0,
        }
    }

    /// Same as [`Bdd::new`], with `2^bits` unique-table buckets per
    /// variable instead of the default.
    pub fn with_bucket_bits(num_vars: u32, bits: usize) -> Self {
        let mut bdd = Self::new(num_vars);
        bdd.subtables = (0..num_vars)
            .map(|v| Subtable::with_bucket_bits(Var::new(v), bits))
            .collect();
        bdd
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn zero(&self) -> Signal {
        Signal::zero()
    }

    pub fn one(&self) -> Signal {
        Signal::one()
    }

    pub fn constant(&self, value: bool) -> Signal {
        Signal::from(value)
    }

    pub(crate) fn node(&self, index: u32) -> &Node {
        &self.nodes[index as usize]
    }

    /// The variable of the node `f` points at (the sentinel `num_vars`
    /// for constants).
    pub fn var_of(&self, f: Signal) -> Var {
        self.node(f.index()).var
    }
}

impl Debug for Bdd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bdd")
            .field("num_vars", &self.num_vars)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

// Node construction.
impl Bdd {
    /// Look up or create the node `var ? high : low` and return a signal
    /// denoting it.
    ///
    /// This is the only place nodes come into existence, and it enforces
    /// canonical form:
    ///
    /// 1. `low == high` collapses to the child.
    /// 2. A complemented `high` is normalized away by negating both
    ///    children and complementing the returned signal.
    /// 3. The per-variable unique table deduplicates the rest.
    pub fn mk_node(&mut self, var: Var, low: Signal, high: Signal) -> Signal {
        debug!("mk_node(var = {}, low = {}, high = {})", var, low, high);

        assert!(var.id() < self.num_vars, "Variables range from 0 to `num_vars - 1`");
        assert!(self.var_of(low) > var, "Children must sit strictly below their parent");
        assert!(self.var_of(high) > var, "Children must sit strictly below their parent");

        // Identical children: no decision to make here.
        if low == high {
            debug!("mk_node: collapsing {} == {}", low, high);
            return low;
        }

        // Keep the then-edge plain: push the complement up to the caller.
        if high.is_complemented() {
            debug!("mk_node: normalizing complemented then-edge");
            let res = self.mk_node(var, !low, !high);
            return !res;
        }

        if let Some(index) = self.subtables[var.id() as usize].find(low, high, &self.nodes) {
            debug!("mk_node: node @{} already exists", index);
            return Signal::from_index(index);
        }

        let index = self.nodes.len() as u32;
        self.nodes.push(Node::new(var, low, high));
        self.refs.push(0);
        let old_head = self.subtables[var.id() as usize].insert_raw(low, high, index);
        self.nodes[index as usize].next = old_head;
        debug!("mk_node: created node @{}", index);
        Signal::from_index(index)
    }

    /// The function `x_var` (or its complement).
    pub fn literal(&mut self, var: Var, complement: bool) -> Signal {
        self.mk_node(var, Signal::from(complement), Signal::from(!complement))
    }
}

// Reference counting.
impl Bdd {
    /// Increment the reference count of `f` and return `f` unchanged.
    ///
    /// When a node's count becomes positive, it acquires a reference to
    /// each of its children, so a single live handle keeps its whole
    /// subgraph live. The terminal is exempt from counting.
    pub fn incref(&mut self, f: Signal) -> Signal {
        let i = f.index() as usize;
        if i == 0 {
            return f;
        }
        self.refs[i] += 1;
        if self.refs[i] == 1 {
            let Node { low, high, .. } = self.nodes[i];
            self.incref(low);
            self.incref(high);
        }
        f
    }

    /// Decrement the reference count of `f`; a node whose count reaches
    /// zero releases its children in turn.
    pub fn decref(&mut self, f: Signal) {
        let i = f.index() as usize;
        if i == 0 {
            return;
        }
        assert!(self.refs[i] > 0, "Dereferencing a node with no references");
        self.refs[i] -= 1;
        if self.refs[i] == 0 {
            let Node { low, high, .. } = self.nodes[i];
            self.decref(low);
            self.decref(high);
        }
    }
}

// Cofactors.
impl Bdd {
    /// Both cofactors `(f0, f1)` of `f` with respect to `x`.
    ///
    /// `x` must not sit below the top variable of `f`; a signal that does
    /// not depend on `x` passes through unchanged. A complemented inbound
    /// edge complements both cofactors.
    pub fn top_cofactors(&self, f: Signal, x: Var) -> (Signal, Signal) {
        let node = self.node(f.index());
        if node.var > x {
            return (f, f);
        }
        debug_assert_eq!(node.var, x, "Cofactor variable is below the top variable");
        if f.is_complemented() {
            (!node.low, !node.high)
        } else {
            (node.low, node.high)
        }
    }
}

fn probe2(cache: &OpCache<(Signal, Signal), Signal>, f: Signal, g: Signal) -> Option<Signal> {
    // The operators are commutative, so probe both argument orders.
    cache.get(&(f, g)).copied().or_else(|| cache.get(&(g, f)).copied())
}

// Boolean operators.
impl Bdd {
    /// Complement: a single bit flip, no recursion, no table lookup.
    pub fn apply_not(&self, f: Signal) -> Signal {
        !f
    }

    /// Conjunction `f ∧ g`.
    pub fn apply_and(&mut self, f: Signal, g: Signal) -> Signal {
        debug!("apply_and(f = {}, g = {})", f, g);
        self.invoke_and += 1;

        if f == Signal::zero() || g == Signal::zero() {
            return Signal::zero();
        }
        if f == Signal::one() {
            return g;
        }
        if g == Signal::one() {
            return f;
        }
        if f == g {
            return f;
        }

        if let Some(res) = probe2(&self.and_cache, f, g) {
            debug!("cache: apply_and(f = {}, g = {}) -> {}", f, g, res);
            return res;
        }

        let x = self.var_of(f).min(self.var_of(g));
        let (f0, f1) = self.top_cofactors(f, x);
        let (g0, g1) = self.top_cofactors(g, x);

        let r1 = self.apply_and(f1, g1);
        self.incref(r1);
        let r0 = self.apply_and(f0, g0);
        self.incref(r0);
        let res = self.mk_node(x, r0, r1);
        self.decref(r1);
        self.decref(r0);
        debug!("computed: apply_and(f = {}, g = {}) -> {}", f, g, res);

        self.and_cache.insert((f, g), res);
        res
    }

    /// Disjunction `f ∨ g`.
    pub fn apply_or(&mut self, f: Signal, g: Signal) -> Signal {
        debug!("apply_or(f = {}, g = {})", f, g);
        self.invoke_or += 1;

        if f == Signal::one() || g == Signal::one() {
            return Signal::one();
        }
        if f == Signal::zero() {
            return g;
        }
        if g == Signal::zero() {
            return f;
        }
        if f == g {
            return f;
        }

        if let Some(res) = probe2(&self.or_cache, f, g) {
            debug!("cache: apply_or(f = {}, g = {}) -> {}", f, g, res);
            return res;
        }

        let x = self.var_of(f).min(self.var_of(g));
        let (f0, f1) = self.top_cofactors(f, x);
        let (g0, g1) = self.top_cofactors(g, x);

        let r1 = self.apply_or(f1, g1);
        self.incref(r1);
        let r0 = self.apply_or(f0, g0);
        self.incref(r0);
        let res = self.mk_node(x, r0, r1);
        self.decref(r1);
        self.decref(r0);
        debug!("computed: apply_or(f = {}, g = {}) -> {}", f, g, res);

        self.or_cache.insert((f, g), res);
        res
    }

    /// Exclusive or `f ⊕ g`.
    pub fn apply_xor(&mut self, f: Signal, g: Signal) -> Signal {
        debug!("apply_xor(f = {}, g = {})", f, g);
        self.invoke_xor += 1;

        if f == g {
            return Signal::zero();
        }
        if f == !g {
            return Signal::one();
        }
        if f == Signal::zero() {
            return g;
        }
        if g == Signal::zero() {
            return f;
        }
        if f == Signal::one() {
            return !g;
        }
        if g == Signal::one() {
            return !f;
        }

        if let Some(res) = probe2(&self.xor_cache, f, g) {
            debug!("cache: apply_xor(f = {}, g = {}) -> {}", f, g, res);
            return res;
        }

        let x = self.var_of(f).min(self.var_of(g));
        let (f0, f1) = self.top_cofactors(f, x);
        let (g0, g1) = self.top_cofactors(g, x);

        let r1 = self.apply_xor(f1, g1);
        self.incref(r1);
        let r0 = self.apply_xor(f0, g0);
        self.incref(r0);
        let res = self.mk_node(x, r0, r1);
        self.decref(r1);
        self.decref(r0);
        debug!("computed: apply_xor(f = {}, g = {}) -> {}", f, g, res);

        self.xor_cache.insert((f, g), res);
        res
    }

    /// If-then-else `f ? g : h`.
    ///
    /// ```text
    /// ITE(f, g, h) = (f ∧ g) ∨ (¬f ∧ h)
    /// ```
    ///
    /// The computed table exploits `ITE(f, g, h) = ITE(¬f, h, g)`: both
    /// orientations are probed before descending.
    ///
    /// # Examples
    ///
    /// ```
    /// use robdd::bdd::Bdd;
    /// use robdd::types::Var;
    ///
    /// let mut bdd = Bdd::new(3);
    /// let x = bdd.literal(Var::new(0), false);
    /// let y = bdd.literal(Var::new(1), false);
    /// let z = bdd.literal(Var::new(2), false);
    ///
    /// let f = bdd.apply_ite(x, y, z);
    /// let x_and_y = bdd.apply_and(x, y);
    /// let nx = bdd.apply_not(x);
    /// let nx_and_z = bdd.apply_and(nx, z);
    /// assert_eq!(f, bdd.apply_or(x_and_y, nx_and_z));
    /// ```
    pub fn apply_ite(&mut self, f: Signal, g: Signal, h: Signal) -> Signal {
        debug!("apply_ite(f = {}, g = {}, h = {})", f, g, h);
        self.invoke_ite += 1;

        if f == Signal::one() {
            return g;
        }
        if f == Signal::zero() {
            return h;
        }
        if g == h {
            return g;
        }
        if g == Signal::one() && h == Signal::zero() {
            return f;
        }
        if g == Signal::zero() && h == Signal::one() {
            return !f;
        }

        if let Some(&res) = self.ite_cache.get(&(f, g, h)) {
            debug!("cache: apply_ite(f = {}, g = {}, h = {}) -> {}", f, g, h, res);
            return res;
        }
        if let Some(&res) = self.ite_cache.get(&(!f, h, g)) {
            debug!("cache: apply_ite(f = {}, g = {}, h = {}) -> {}", f, g, h, res);
            return res;
        }

        let x = self.var_of(f).min(self.var_of(g)).min(self.var_of(h));
        let (f0, f1) = self.top_cofactors(f, x);
        let (g0, g1) = self.top_cofactors(g, x);
        let (h0, h1) = self.top_cofactors(h, x);

        let r1 = self.apply_ite(f1, g1, h1);
        self.incref(r1);
        let r0 = self.apply_ite(f0, g0, h0);
        self.incref(r0);
        let res = self.mk_node(x, r0, r1);
        self.decref(r1);
        self.decref(r0);
        debug!("computed: apply_ite(f = {}, g = {}, h = {}) -> {}", f, g, h, res);

        self.ite_cache.insert((f, g, h), res);
        res
    }
}

// Observation.
impl Bdd {
    /// Materialize the function denoted by `f` as an explicit truth table
    /// by Shannon expansion over the diagram.
    pub fn get_tt(&self, f: Signal) -> TruthTable {
        if f == Signal::zero() {
            return TruthTable::zeroes(self.num_vars);
        }
        if f == Signal::one() {
            return TruthTable::ones(self.num_vars);
        }

        let Node { var, low, high, .. } = *self.node(f.index());
        let tt_x = TruthTable::nth_var(self.num_vars, var.id(), true);
        let tt_nx = TruthTable::nth_var(self.num_vars, var.id(), false);
        let tt = (tt_x & self.get_tt(high)) | (tt_nx & self.get_tt(low));
        if f.is_complemented() {
            !tt
        } else {
            tt
        }
    }

    /// Number of live (referenced) non-terminal nodes.
    pub fn num_nodes(&self) -> usize {
        self.refs.iter().skip(1).filter(|&&count| count > 0).count()
    }

    /// Number of distinct non-terminal nodes reachable from `f`.
    pub fn size(&self, f: Signal) -> usize {
        if f.is_const() {
            return 0;
        }

        let mut visited = BitSet::new(self.nodes.len());
        visited.insert(0);
        let mut stack = vec![f.index()];
        let mut count = 0;

        while let Some(index) = stack.pop() {
            if !visited.insert(index as usize) {
                continue;
            }
            count += 1;
            let node = self.node(index);
            stack.push(node.low.index());
            stack.push(node.high.index());
        }

        count
    }

    /// Total number of operator entries so far (cache hits included).
    pub fn num_invoke(&self) -> u64 {
        self.invoke_and + self.invoke_or + self.invoke_xor + self.invoke_ite
    }
}
