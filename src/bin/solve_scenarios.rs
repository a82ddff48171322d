//! Claiming game scenario solver binary.
//!
//! Usage:
//!   cargo run --release --bin solve_scenarios -- [OPTIONS]
//!
//! Options:
//!   --scenario <NAME>    Solve only the named catalog scenario (repeatable)
//!   --file <PATH>        Load scenarios from a JSON catalog file
//!   --sequence <TURNS>   Solve one ad-hoc sequence, e.g. "F0 V0 F1 V1"
//!   --vars <N>           Variable count for --sequence (default: 4)
//!   --serial             Evaluate tables on one thread
//!   --threads <N>        Number of threads (default: auto)
//!   --no-progress        Hide the sweep progress bar
//!   --output <FILE>      Save the run report as JSON
//!   --dot <FILE>         Write the game tree in Graphviz DOT (one scenario)

use std::env;
use std::fs;
use std::time::Instant;

use claim_solver::engine::{sweep_all_tables, GameTree, SweepConfig};
use claim_solver::report::{RunReport, ScenarioReport};
use claim_solver::scenarios::{self, Scenario};

fn main() {
    let args: Vec<String> = env::args().collect();

    // Parse arguments
    let mut names: Vec<String> = Vec::new();
    let mut catalog_file: Option<String> = None;
    let mut sequence_text: Option<String> = None;
    let mut num_vars: usize = 4;
    let mut serial = false;
    let mut threads: usize = 0;
    let mut no_progress = false;
    let mut output_file: Option<String> = None;
    let mut dot_file: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--scenario" | "-s" => {
                i += 1;
                if i < args.len() {
                    names.push(args[i].clone());
                }
            }
            "--file" | "-f" => {
                i += 1;
                if i < args.len() {
                    catalog_file = Some(args[i].clone());
                }
            }
            "--sequence" => {
                i += 1;
                if i < args.len() {
                    sequence_text = Some(args[i].clone());
                }
            }
            "--vars" => {
                i += 1;
                if i < args.len() {
                    num_vars = args[i].parse().unwrap_or(4);
                }
            }
            "--serial" => {
                serial = true;
            }
            "--threads" | "-t" => {
                i += 1;
                if i < args.len() {
                    threads = args[i].parse().unwrap_or(0);
                }
            }
            "--no-progress" => {
                no_progress = true;
            }
            "--output" | "-o" => {
                i += 1;
                if i < args.len() {
                    output_file = Some(args[i].clone());
                }
            }
            "--dot" => {
                i += 1;
                if i < args.len() {
                    dot_file = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                print_help();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                return;
            }
        }
        i += 1;
    }

    println!("=================================================");
    println!("  Claiming Game Solver");
    println!("=================================================");
    println!();

    // Assemble the scenario list
    let mut scenario_list: Vec<Scenario> = if let Some(text) = &sequence_text {
        match text.parse() {
            Ok(turns) => vec![Scenario::new("custom", "Ad-hoc sequence", num_vars, turns)],
            Err(e) => {
                eprintln!("Invalid --sequence: {}", e);
                return;
            }
        }
    } else if let Some(path) = &catalog_file {
        println!("Loading scenarios from: {}", path);
        match scenarios::from_json_file(path) {
            Ok(list) => list,
            Err(e) => {
                eprintln!("Error loading scenarios: {}", e);
                return;
            }
        }
    } else {
        scenarios::standard_scenarios()
    };

    if !names.is_empty() {
        scenario_list.retain(|s| names.iter().any(|n| n == &s.name));
        if scenario_list.is_empty() {
            eprintln!("No scenario matches {:?}", names);
            return;
        }
    }

    if dot_file.is_some() && scenario_list.len() != 1 {
        eprintln!(
            "--dot needs exactly one selected scenario ({} selected)",
            scenario_list.len()
        );
        return;
    }

    if threads > 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            eprintln!("Error sizing the thread pool: {}", e);
            return;
        }
    }

    println!("Scenarios: {}", scenario_list.len());
    println!("Sweep mode: {}", if serial { "serial" } else { "parallel" });
    println!(
        "Threads: {}",
        if threads == 0 {
            "auto".to_string()
        } else {
            threads.to_string()
        }
    );
    if let Some(path) = &output_file {
        println!("Output: {}", path);
    }
    println!();

    let sweep_config = SweepConfig::default()
        .with_parallel(!serial)
        .with_progress(!no_progress);

    let mut report = RunReport::new("Claiming game scenario sweep");
    let total_start = Instant::now();

    for (index, scenario) in scenario_list.iter().enumerate() {
        println!(
            "[{}/{}] Scenario {} [{}]",
            index + 1,
            scenario_list.len(),
            scenario.name,
            scenario.turns
        );

        let start = Instant::now();
        let tree = match GameTree::build(scenario.num_vars, &scenario.turns) {
            Ok(tree) => tree,
            Err(e) => {
                eprintln!("Error building tree for {}: {}", scenario.name, e);
                return;
            }
        };
        println!(
            "Tree: {} nodes, {} leaves, depth {}",
            tree.stats.total_nodes, tree.stats.leaf_nodes, tree.stats.max_depth
        );

        let tally = match sweep_all_tables(&tree, &sweep_config) {
            Ok(tally) => tally,
            Err(e) => {
                eprintln!("Error sweeping {}: {}", scenario.name, e);
                return;
            }
        };
        let elapsed = start.elapsed().as_secs_f64();

        // Every table must land in exactly one player's column
        let expected = 1u64 << (1usize << scenario.num_vars);
        println!(
            "Classified {}/{} tables in {:.2}s (V: {}, F: {})",
            tally.total(),
            expected,
            elapsed,
            tally.verifier_total(),
            tally.falsifier_total()
        );
        if tally.total() != expected {
            eprintln!(
                "Coverage mismatch for {}: {} of {} tables",
                scenario.name,
                tally.total(),
                expected
            );
            return;
        }

        let scenario_report = ScenarioReport::new(scenario, &tree, tally, elapsed);
        scenario_report.print_table();
        println!();

        report.add_scenario(scenario_report);

        if let Some(path) = &dot_file {
            match tree.to_dot() {
                Ok(dot) => match fs::write(path, dot) {
                    Ok(_) => println!("Tree written to {}", path),
                    Err(e) => eprintln!("Error writing {}: {}", path, e),
                },
                Err(e) => eprintln!("Error rendering DOT: {}", e),
            }
        }
    }

    println!("Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    if let Some(path) = &output_file {
        println!("Exporting report to {}...", path);
        match report.save_json(path) {
            Ok(_) => println!("Report saved successfully!"),
            Err(e) => eprintln!("Error saving report: {}", e),
        }
    }

    println!("Done!");
}

fn print_help() {
    println!("Claiming Game Solver");
    println!();
    println!("Usage: solve_scenarios [OPTIONS]");
    println!();
    println!("Scenario Selection (default: the six built-in scenarios):");
    println!("  -s, --scenario <NAME>    Solve only the named scenario (repeatable)");
    println!("  -f, --file <PATH>        Load scenarios from a JSON catalog file");
    println!("  --sequence <TURNS>       Solve one ad-hoc sequence, e.g. \"F0 V0 F1 V1\"");
    println!("  --vars <N>               Variable count for --sequence (default: 4)");
    println!();
    println!("Options:");
    println!("  --serial                 Evaluate tables on one thread");
    println!("  -t, --threads <N>        Number of threads (default: auto)");
    println!("  --no-progress            Hide the sweep progress bar");
    println!("  -o, --output <FILE>      Save the run report as JSON");
    println!("  --dot <FILE>             Write the game tree in Graphviz DOT");
    println!("                           (requires exactly one selected scenario)");
    println!("  -h, --help               Show this help");
    println!();
    println!("Examples:");
    println!("  # Solve all six built-in scenarios");
    println!("  solve_scenarios");
    println!();
    println!("  # Solve one built-in scenario and save the report");
    println!("  solve_scenarios --scenario 1.1 --output run.json");
    println!();
    println!("  # Solve a two-variable sequence and render its tree");
    println!("  solve_scenarios --sequence \"F0 V0 F1 V1\" --vars 2 --dot tree.dot");
    println!();
    println!("  # Solve a custom catalog serially");
    println!("  solve_scenarios --file my_scenarios.json --serial");
}
