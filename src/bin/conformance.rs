//! Conformance harness: drives the documented scenarios and reports
//! pass/fail per check. Exits 0 iff everything passed.

use robdd::bdd::Bdd;
use robdd::truth_table::TruthTable;
use robdd::types::Var;

fn check_tt(actual: &TruthTable, expected: &TruthTable) -> bool {
    print!("  checking function correctness");
    if actual == expected {
        println!("...passed.");
        true
    } else {
        println!("...failed. (expect {}, but get {})", expected, actual);
        false
    }
}

fn check_le(what: &str, actual: u64, expected: u64) -> bool {
    print!("  checking {}", what);
    if actual <= expected {
        println!("...passed.");
        true
    } else {
        println!("...failed. (expect <= {}, but get {})", expected, actual);
        false
    }
}

fn check_eq(what: &str, actual: u64, expected: u64) -> bool {
    print!("  checking {}", what);
    if actual == expected {
        println!("...passed.");
        true
    } else {
        println!("...failed. (expect {}, but get {})", expected, actual);
        false
    }
}

fn main() {
    let mut passed = true;

    {
        print!("test 00: large truth table");
        let tt = TruthTable::from_bitstring(&"0".repeat(128));
        if tt.num_vars() == 7 {
            println!("...passed.");
        } else {
            println!("...failed.");
            passed = false;
        }
    }

    {
        println!("test 01: computed table");
        let mut bdd = Bdd::new(2);
        let x0 = bdd.literal(Var::new(0), false);
        bdd.incref(x0);
        let x1 = bdd.literal(Var::new(1), false);
        bdd.incref(x1);
        let g = bdd.apply_and(x0, x1);
        bdd.incref(g);
        let h = bdd.apply_and(x0, x1);
        bdd.incref(h);
        bdd.decref(x0);
        bdd.decref(x1);

        let f = bdd.apply_xor(g, h);
        bdd.incref(f);
        bdd.decref(g);
        bdd.decref(h);

        passed &= check_tt(&bdd.get_tt(f), &TruthTable::from_bitstring("0000"));
        passed &= check_le("number of computation", bdd.num_invoke(), 5);
    }

    {
        println!("test 02: complemented edges");
        let mut bdd = Bdd::new(2);
        let x0 = bdd.literal(Var::new(0), false);
        bdd.incref(x0);
        let x1 = bdd.literal(Var::new(1), false);
        bdd.incref(x1);
        let f = bdd.apply_xor(x0, x1);
        bdd.incref(f);
        bdd.decref(x0);
        bdd.decref(x1);

        passed &= check_tt(&bdd.get_tt(f), &TruthTable::from_bitstring("0110"));
        passed &= check_eq("BDD size (reachable nodes)", bdd.size(f) as u64, 2);

        println!("test 03: reference count");
        passed &= check_eq("BDD size (living nodes)", bdd.num_nodes() as u64, 2);
    }

    {
        println!("test 04: ITE(x2, x1, x0) AND ITE(x0, x2 AND NOT x1, x1 XOR x2)");
        let mut bdd = Bdd::new(3);
        let x0 = bdd.literal(Var::new(0), false);
        bdd.incref(x0);
        let x1 = bdd.literal(Var::new(1), false);
        bdd.incref(x1);
        let x2 = bdd.literal(Var::new(2), false);
        bdd.incref(x2);

        let f1 = bdd.apply_ite(x2, x1, x0);
        bdd.incref(f1);

        let nx1 = bdd.apply_not(x1);
        let g = bdd.apply_and(x2, nx1);
        bdd.incref(g);
        let h = bdd.apply_xor(x1, x2);
        bdd.incref(h);
        let f2 = bdd.apply_ite(x0, g, h);
        bdd.incref(f2);
        bdd.decref(g);
        bdd.decref(h);
        bdd.decref(x0);
        bdd.decref(x1);
        bdd.decref(x2);

        let f = bdd.apply_and(f1, f2);
        bdd.incref(f);
        bdd.decref(f1);
        bdd.decref(f2);

        passed &= check_tt(&bdd.get_tt(f), &TruthTable::from_bitstring("00000000"));
        passed &= check_eq("BDD size (reachable nodes)", bdd.size(f) as u64, 0);
        passed &= check_eq("BDD size (living nodes)", bdd.num_nodes() as u64, 0);
    }

    {
        println!("test 05: ITE(x2 AND x3, x1 AND NOT x0, NOT x2 AND NOT x4)");
        let mut bdd = Bdd::new(5);
        let xs: Vec<_> = (0..5)
            .map(|v| {
                let x = bdd.literal(Var::new(v), false);
                bdd.incref(x)
            })
            .collect();
        let f1 = bdd.apply_and(xs[2], xs[3]);
        bdd.incref(f1);
        let nx0 = bdd.apply_not(xs[0]);
        let f2 = bdd.apply_and(xs[1], nx0);
        bdd.incref(f2);
        let nx2 = bdd.apply_not(xs[2]);
        let nx4 = bdd.apply_not(xs[4]);
        let f3 = bdd.apply_and(nx2, nx4);
        bdd.incref(f3);
        for &x in &xs {
            bdd.decref(x);
        }

        let f = bdd.apply_ite(f1, f2, f3);
        bdd.incref(f);
        bdd.decref(f1);
        bdd.decref(f2);
        bdd.decref(f3);

        passed &= check_tt(
            &bdd.get_tt(f),
            &TruthTable::from_bitstring("01000000000000000100111100001111"),
        );
        passed &= check_eq("BDD size (reachable nodes)", bdd.size(f) as u64, 6);
        passed &= check_eq("BDD size (living nodes)", bdd.num_nodes() as u64, 6);
    }

    {
        println!("test 06: more than 6 variables & multiple POs");
        let mut bdd = Bdd::new(10);
        let xs: Vec<_> = (0..10)
            .map(|v| {
                let x = bdd.literal(Var::new(v), false);
                bdd.incref(x)
            })
            .collect();

        let f1 = bdd.apply_or(xs[0], xs[9]);
        bdd.incref(f1);

        let nx4 = bdd.apply_not(xs[4]);
        let g1 = bdd.apply_and(xs[6], nx4);
        bdd.incref(g1);
        let nx6 = bdd.apply_not(xs[6]);
        let g2 = bdd.apply_and(xs[4], nx6);
        bdd.incref(g2);
        let f2 = bdd.apply_or(g1, g2);
        bdd.incref(f2);
        bdd.decref(g1);
        bdd.decref(g2);

        let nx2 = bdd.apply_not(xs[2]);
        let f3 = bdd.apply_ite(xs[6], nx2, nx6);
        bdd.incref(f3);

        for &x in &xs {
            bdd.decref(x);
        }

        let tt1 = TruthTable::nth_var(10, 0, true) | TruthTable::nth_var(10, 9, true);
        passed &= check_tt(&bdd.get_tt(f1), &tt1);
        let tt2 = TruthTable::nth_var(10, 4, true) ^ TruthTable::nth_var(10, 6, true);
        passed &= check_tt(&bdd.get_tt(f2), &tt2);
        let tt3 = !TruthTable::nth_var(10, 2, true) | !TruthTable::nth_var(10, 6, true);
        passed &= check_tt(&bdd.get_tt(f3), &tt3);

        passed &= check_eq("BDD size (reachable nodes) of f1", bdd.size(f1) as u64, 2);
        passed &= check_eq("BDD size (reachable nodes) of f2", bdd.size(f2) as u64, 2);
        passed &= check_eq("BDD size (reachable nodes) of f3", bdd.size(f3) as u64, 2);
        passed &= check_eq("BDD size (living nodes)", bdd.num_nodes() as u64, 5);
    }

    {
        println!("test 07: computed table for XOR");
        let mut bdd = Bdd::new(4);
        let xs: Vec<_> = (0..4)
            .map(|v| {
                let x = bdd.literal(Var::new(v), false);
                bdd.incref(x)
            })
            .collect();

        let g1 = bdd.apply_xor(xs[2], xs[3]);
        bdd.incref(g1);
        let g2 = bdd.apply_xor(xs[1], g1);
        bdd.incref(g2);
        let g3 = bdd.apply_xor(xs[0], g2);
        bdd.incref(g3);
        bdd.decref(g1);
        bdd.decref(g2);

        let h1 = bdd.apply_xor(xs[3], xs[2]);
        bdd.incref(h1);
        let h2 = bdd.apply_xor(xs[0], xs[1]);
        bdd.incref(h2);
        let h3 = bdd.apply_xor(h1, h2);
        bdd.incref(h3);
        bdd.decref(h1);
        bdd.decref(h2);

        for &x in &xs {
            bdd.decref(x);
        }

        let f = bdd.apply_xor(g3, h3);
        bdd.incref(f);
        bdd.decref(g3);
        bdd.decref(h3);

        passed &= check_tt(&bdd.get_tt(f), &TruthTable::from_bitstring("0000000000000000"));
        passed &= check_le("number of computation", bdd.num_invoke(), 20);
    }

    {
        println!("test 08: computed table for ITE");
        let mut bdd = Bdd::new(3);
        let x0 = bdd.literal(Var::new(0), false);
        bdd.incref(x0);
        let x1 = bdd.literal(Var::new(1), false);
        bdd.incref(x1);
        let x2 = bdd.literal(Var::new(2), false);
        bdd.incref(x2);

        let f1 = bdd.apply_ite(x1, x2, x0);
        bdd.incref(f1);
        let nx1 = bdd.apply_not(x1);
        let f2 = bdd.apply_ite(nx1, x0, x2);
        bdd.incref(f2);
        bdd.decref(x0);
        bdd.decref(x1);
        bdd.decref(x2);

        passed &= check_tt(&bdd.get_tt(f1), &TruthTable::from_bitstring("11100010"));
        passed &= check_tt(&bdd.get_tt(f2), &TruthTable::from_bitstring("11100010"));
        passed &= check_le("number of computation", bdd.num_invoke(), 10);
    }

    if passed {
        println!();
        println!("All tests passed, congrats!");
    }

    std::process::exit(if passed { 0 } else { 1 });
}
