use robdd::bdd::Bdd;
use robdd::types::Var;

fn main() {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("logger");

    let time_total = std::time::Instant::now();

    let mut bdd = Bdd::new(3);
    println!("bdd = {:?}", bdd);

    let x0 = bdd.literal(Var::new(0), false);
    println!("x0 = {}", x0);
    let x1 = bdd.literal(Var::new(1), false);
    println!("x1 = {}", x1);
    let x2 = bdd.literal(Var::new(2), false);
    println!("x2 = {}", x2);

    // Majority of three inputs.
    let x0_and_x1 = bdd.apply_and(x0, x1);
    let x0_or_x1 = bdd.apply_or(x0, x1);
    let carry = bdd.apply_ite(x2, x0_or_x1, x0_and_x1);
    bdd.incref(carry);
    println!("maj = {}", carry);
    println!("tt(maj) = {}", bdd.get_tt(carry));
    print!("{}", bdd.dump_string(carry));

    println!("reachable nodes = {}", bdd.size(carry));
    println!("living nodes = {}", bdd.num_nodes());
    println!("operator entries = {}", bdd.num_invoke());

    bdd.decref(carry);
    println!("living nodes after release = {}", bdd.num_nodes());

    let time_total = time_total.elapsed();
    println!("Done in {:.3} s", time_total.as_secs_f64());
}
