//! Property tests: random operation sequences, shadowed by truth-table
//! algebra.
//!
//! Each random program is an RPN sequence over literals and connectives.
//! The machine executes it twice in lockstep: once on the BDD manager and
//! once on explicit truth tables. Every retained signal is bracketed with
//! incref/decref the way a user would, so the liveness accounting is
//! checked along with the semantics.

#[macro_use]
extern crate quickcheck;

use quickcheck::{Arbitrary, Gen};

use robdd::bdd::Bdd;
use robdd::signal::Signal;
use robdd::truth_table::TruthTable;
use robdd::types::Var;

const NUM_VARS: u32 = 4;

#[derive(Debug, Clone, Copy)]
enum Step {
    Lit(u8, bool),
    Not,
    And,
    Or,
    Xor,
    Ite,
}

impl Arbitrary for Step {
    fn arbitrary(g: &mut Gen) -> Self {
        // Bias towards literals so stacks keep material to combine.
        match u8::arbitrary(g) % 8 {
            0 | 1 | 2 => Step::Lit(u8::arbitrary(g), bool::arbitrary(g)),
            3 => Step::Not,
            4 => Step::And,
            5 => Step::Or,
            6 => Step::Xor,
            _ => Step::Ite,
        }
    }
}

struct Machine {
    bdd: Bdd,
    stack: Vec<(Signal, TruthTable)>,
}

impl Machine {
    fn run(program: &[Step]) -> Self {
        let mut bdd = Bdd::new(NUM_VARS);
        let mut stack: Vec<(Signal, TruthTable)> = Vec::new();

        for &step in program {
            match step {
                Step::Lit(v, complement) => {
                    let var = v as u32 % NUM_VARS;
                    let s = bdd.literal(Var::new(var), complement);
                    bdd.incref(s);
                    stack.push((s, TruthTable::nth_var(NUM_VARS, var, !complement)));
                }
                Step::Not => {
                    if let Some((a, ta)) = stack.pop() {
                        let r = bdd.apply_not(a);
                        bdd.incref(r);
                        bdd.decref(a);
                        stack.push((r, !ta));
                    }
                }
                Step::And | Step::Or | Step::Xor => {
                    if stack.len() >= 2 {
                        let (b, tb) = stack.pop().unwrap();
                        let (a, ta) = stack.pop().unwrap();
                        let (r, tr) = match step {
                            Step::And => (bdd.apply_and(a, b), ta & tb),
                            Step::Or => (bdd.apply_or(a, b), ta | tb),
                            _ => (bdd.apply_xor(a, b), ta ^ tb),
                        };
                        bdd.incref(r);
                        bdd.decref(a);
                        bdd.decref(b);
                        stack.push((r, tr));
                    }
                }
                Step::Ite => {
                    if stack.len() >= 3 {
                        let (c, tc) = stack.pop().unwrap();
                        let (b, tb) = stack.pop().unwrap();
                        let (a, ta) = stack.pop().unwrap();
                        let r = bdd.apply_ite(a, b, c);
                        let tr = (ta.clone() & tb) | (!ta & tc);
                        bdd.incref(r);
                        bdd.decref(a);
                        bdd.decref(b);
                        bdd.decref(c);
                        stack.push((r, tr));
                    }
                }
            }
        }

        Self { bdd, stack }
    }

    /// Drop every user handle.
    fn release(&mut self) {
        while let Some((s, _)) = self.stack.pop() {
            self.bdd.decref(s);
        }
    }
}

quickcheck! {
    /// The diagram denotes exactly the shadowed function, the structural
    /// invariants hold throughout, and releasing every handle empties the
    /// live count.
    fn prop_semantics_and_liveness(program: Vec<Step>) -> bool {
        let mut machine = Machine::run(&program);
        machine.bdd.check_invariants();

        for (s, tt) in &machine.stack {
            if machine.bdd.get_tt(*s) != *tt {
                return false;
            }
        }

        machine.release();
        machine.bdd.num_nodes() == 0
    }

    /// Signal equality coincides with functional equality (canonicity).
    fn prop_canonical_equality(program: Vec<Step>) -> bool {
        let machine = Machine::run(&program);
        for (a, ta) in &machine.stack {
            for (b, tb) in &machine.stack {
                if (a == b) != (ta == tb) {
                    return false;
                }
            }
        }
        true
    }

    /// Double complement is the identity on signals, bitwise.
    fn prop_not_involution(program: Vec<Step>) -> bool {
        let machine = Machine::run(&program);
        machine.stack.iter().all(|&(s, _)| {
            let n = machine.bdd.apply_not(s);
            machine.bdd.apply_not(n) == s && n != s
        })
    }

    /// AND and OR are idempotent; XOR of a signal with itself vanishes.
    fn prop_idempotence(program: Vec<Step>) -> bool {
        let mut machine = Machine::run(&program);
        let entries: Vec<Signal> = machine.stack.iter().map(|&(s, _)| s).collect();
        entries.iter().all(|&f| {
            machine.bdd.apply_and(f, f) == f
                && machine.bdd.apply_or(f, f) == f
                && machine.bdd.apply_xor(f, f) == Signal::zero()
        })
    }

    /// Neutral elements: f∧1 = f, f∨0 = f, f⊕1 = ¬f.
    fn prop_identities(program: Vec<Step>) -> bool {
        let mut machine = Machine::run(&program);
        let one = machine.bdd.one();
        let zero = machine.bdd.zero();
        let entries: Vec<Signal> = machine.stack.iter().map(|&(s, _)| s).collect();
        entries.iter().all(|&f| {
            machine.bdd.apply_and(f, one) == f
                && machine.bdd.apply_or(f, zero) == f
                && machine.bdd.apply_xor(f, one) == machine.bdd.apply_not(f)
        })
    }

    /// Once (f, g) is in the computed table, the swapped call costs a
    /// single operator entry and returns the identical signal.
    fn prop_commuted_call_hits_cache(program: Vec<Step>) -> bool {
        let mut machine = Machine::run(&program);
        if machine.stack.len() < 2 {
            return true;
        }
        let f = machine.stack[0].0;
        let g = machine.stack[1].0;

        let fg = machine.bdd.apply_and(f, g);
        let before = machine.bdd.num_invoke();
        let gf = machine.bdd.apply_and(g, f);
        fg == gf && machine.bdd.num_invoke() == before + 1
    }

    /// ITE(f, g, h) and ITE(¬f, h, g) coincide and share a cache entry.
    fn prop_ite_orientation(program: Vec<Step>) -> bool {
        let mut machine = Machine::run(&program);
        if machine.stack.len() < 3 {
            return true;
        }
        let f = machine.stack[0].0;
        let g = machine.stack[1].0;
        let h = machine.stack[2].0;

        let a = machine.bdd.apply_ite(f, g, h);
        let before = machine.bdd.num_invoke();
        let nf = machine.bdd.apply_not(f);
        let b = machine.bdd.apply_ite(nf, h, g);
        a == b && machine.bdd.num_invoke() == before + 1
    }

    /// Reachable nodes of a live signal never exceed the live count.
    fn prop_reachable_le_live(program: Vec<Step>) -> bool {
        let machine = Machine::run(&program);
        machine
            .stack
            .iter()
            .all(|&(s, _)| machine.bdd.size(s) <= machine.bdd.num_nodes())
    }
}
