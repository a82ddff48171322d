//! Debug walkthrough of a two-variable claiming game

use claim_solver::engine::{
    sweep_all_tables, GameTree, SweepConfig, TreeEvaluator, TruthTable, TurnSequence,
};

fn main() {
    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .unwrap();

    // Strict alternation: F claims, V claims, F assigns, V assigns
    let sequence: TurnSequence = "F0 V0 F1 V1".parse().unwrap();
    let tree = GameTree::build(2, &sequence).unwrap();

    println!("Sequence: {}", sequence);
    println!("{}", tree.stats);

    // Dump every position, level by level
    for (depth, level) in tree.levels.iter().enumerate() {
        println!("Level {}:", depth);
        for &id in level {
            println!("  [{:>2}] {}", id, tree.node(id).state);
        }
    }

    // Resolve the XOR table and annotate each node with its minimax value
    let xor = TruthTable::new(vec![false, true, true, false]);
    let mut evaluator = TreeEvaluator::new(&tree);
    let verifier_wins = evaluator.evaluate(&tree, &xor).unwrap();

    println!();
    println!(
        "Table {} (XOR): verifier {}",
        xor,
        if verifier_wins { "wins" } else { "loses" }
    );
    for (depth, level) in tree.levels.iter().enumerate() {
        print!("  Level {}:", depth);
        for &id in level {
            let value = match evaluator.value(id) {
                Some(true) => '1',
                Some(false) => '0',
                None => '?',
            };
            print!(" {}={}", id, value);
        }
        println!();
    }

    // Graphviz view of the same evaluation
    println!();
    println!("{}", tree.to_dot_with_values(&evaluator).unwrap());

    // Tally all 16 two-variable tables
    let config = SweepConfig::default().with_parallel(false);
    let tally = sweep_all_tables(&tree, &config).unwrap();
    println!(
        "Win tally: V = {:?}, F = {:?}",
        tally.verifier(),
        tally.falsifier()
    );

    // Expected results:
    println!("\nExpected:");
    println!("  XOR is a verifier win: V assigns last, so it can always flip the output to 1");
    println!("  Tally: V = [0, 0, 2, 4, 1], F = [1, 4, 4, 0, 0] (XOR and XNOR are the bucket-2 V wins)");
}
