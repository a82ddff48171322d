//! Win tables for solved scenarios and JSON report export.

use std::fs::File;
use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::engine::{GameTree, WinTally};
use crate::scenarios::Scenario;

/// Results of sweeping one scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario name (catalog key).
    pub name: String,
    /// Scenario description.
    pub description: String,
    /// The turn sequence in compact text form.
    pub sequence: String,
    /// Number of variables in play.
    pub num_vars: usize,
    /// Nodes in the built tree.
    pub total_nodes: u32,
    /// Leaves in the built tree.
    pub leaf_nodes: u32,
    /// Truth tables classified by the sweep.
    pub tables_evaluated: u64,
    /// Wall-clock sweep time in seconds.
    pub elapsed_seconds: f64,
    /// Win counts per popcount bucket.
    pub tally: WinTally,
}

impl ScenarioReport {
    /// Assemble the report for one solved scenario.
    pub fn new(scenario: &Scenario, tree: &GameTree, tally: WinTally, elapsed_seconds: f64) -> Self {
        ScenarioReport {
            name: scenario.name.clone(),
            description: scenario.description.clone(),
            sequence: scenario.turns.to_string(),
            num_vars: scenario.num_vars,
            total_nodes: tree.stats.total_nodes,
            leaf_nodes: tree.stats.leaf_nodes,
            tables_evaluated: tally.total(),
            elapsed_seconds,
            tally,
        }
    }

    /// Render the win table: one column per popcount bucket, one row per
    /// player, right-aligned to a shared column width.
    pub fn format_table(&self) -> String {
        let buckets = self.tally.buckets();
        let mut width = 1;
        for bucket in 0..buckets {
            width = width
                .max(bucket.to_string().len())
                .max(self.tally.verifier_wins(bucket).to_string().len())
                .max(self.tally.falsifier_wins(bucket).to_string().len());
        }

        let mut out = String::new();
        out.push_str("  ");
        for bucket in 0..buckets {
            out.push_str(&format!(" {:>width$}", bucket, width = width));
        }
        out.push('\n');
        out.push_str("V ");
        for bucket in 0..buckets {
            out.push_str(&format!(
                " {:>width$}",
                self.tally.verifier_wins(bucket),
                width = width
            ));
        }
        out.push('\n');
        out.push_str("F ");
        for bucket in 0..buckets {
            out.push_str(&format!(
                " {:>width$}",
                self.tally.falsifier_wins(bucket),
                width = width
            ));
        }
        out.push('\n');
        out
    }

    /// Write the win table to stdout.
    pub fn print_table(&self) {
        print!("{}", self.format_table());
    }
}

/// Metadata attached to a run report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Report title.
    pub title: String,
    /// Unix timestamp at report creation.
    pub timestamp: String,
    /// Number of scenarios in the run.
    pub scenario_count: usize,
}

/// Results of a full solver run across scenarios.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Run-level metadata.
    pub metadata: RunMetadata,
    /// One report per solved scenario, in run order.
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    /// Create an empty report.
    pub fn new(title: &str) -> Self {
        RunReport {
            metadata: RunMetadata {
                title: title.to_string(),
                timestamp: format!(
                    "{}",
                    SystemTime::now()
                        .duration_since(UNIX_EPOCH)
                        .unwrap()
                        .as_secs()
                ),
                scenario_count: 0,
            },
            scenarios: Vec::new(),
        }
    }

    /// Append one scenario's results.
    pub fn add_scenario(&mut self, report: ScenarioReport) {
        self.scenarios.push(report);
        self.metadata.scenario_count = self.scenarios.len();
    }

    /// Save the report as pretty-printed JSON.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Print every scenario's win table to stdout.
    pub fn print_summary(&self) {
        println!();
        println!("========================================");
        println!("  {}", self.metadata.title);
        println!("  Scenarios: {}", self.metadata.scenario_count);
        println!("========================================");
        for scenario in &self.scenarios {
            println!();
            println!("--- {} [{}] ---", scenario.name, scenario.sequence);
            if !scenario.description.is_empty() {
                println!("{}", scenario.description);
            }
            println!(
                "{} nodes, {} leaves, {} tables in {:.2}s",
                scenario.total_nodes,
                scenario.leaf_nodes,
                scenario.tables_evaluated,
                scenario.elapsed_seconds
            );
            scenario.print_table();
        }
    }
}
