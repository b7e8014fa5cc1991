//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions: loading matrix files, resolving invocation
//! plans, and rendering them for inspection.

use std::{path::PathBuf, process};

use clap::{Parser, Subcommand};

use crate::{
    discovery::discover_matrix_files,
    engine::{self, InvocationPlan},
    errors::print_error,
    matrix::{self, MatrixDocument},
    registry::Registry,
    LatticeError,
};

// ============================================================================
// CLI ARGUMENTS - Command-line argument definitions
// ============================================================================

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "lattice",
    version,
    about = "A combinatorial (Cartesian) parameterized-test planning engine."
)]
pub struct LatticeArgs {
    #[command(subcommand)]
    pub command: ArgsCommand,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum ArgsCommand {
    /// Resolve a matrix file and print every planned invocation name.
    Plan {
        /// The path to the matrix file to plan.
        #[arg(required = true)]
        file: PathBuf,
        /// Emit the plan as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Print invocation counts per method without rendering names.
    Count {
        /// The path to the matrix file to count.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Validate and resolve a matrix file, reporting problems only.
    Check {
        /// The path to the matrix file to check.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Discover all matrix files under a directory.
    List {
        /// The directory to scan.
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

// Color constants for terminal output
const RESET: &str = "\x1b[0m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";

/// Output configuration shared by the text-mode commands.
struct OutputConfig {
    use_colors: bool,
}

impl OutputConfig {
    fn from_tty() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }

    /// Apply color formatting to text if colors are enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_string()
        }
    }
}

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

/// The main entry point for the CLI.
pub fn run() {
    let args = LatticeArgs::parse();

    match args.command {
        ArgsCommand::Plan { file, json } => {
            let document = load_or_exit(&file);
            let registry = registry_from_document(&document);
            if json {
                print_plan_json(&document, &registry);
            } else {
                print_plan_text(&document, &registry, &OutputConfig::from_tty());
            }
        }

        ArgsCommand::Count { file } => {
            let document = load_or_exit(&file);
            let registry = registry_from_document(&document);
            let config = OutputConfig::from_tty();
            let mut grand_total = 0usize;
            for method in &document.methods {
                let plan = resolve_or_exit(method, &registry);
                grand_total += plan.total();
                println!(
                    "{}: {} invocations",
                    config.colorize(plan.display_name(), CYAN),
                    plan.total()
                );
            }
            println!("total: {}", grand_total);
        }

        ArgsCommand::Check { file } => {
            let document = load_or_exit(&file);
            let registry = registry_from_document(&document);
            let config = OutputConfig::from_tty();
            for method in &document.methods {
                resolve_or_exit(method, &registry);
            }
            println!(
                "{}: {} methods resolve cleanly",
                config.colorize("OK", GREEN),
                document.methods.len()
            );
        }

        ArgsCommand::List { path } => {
            let files = discover_matrix_files(&path);
            if files.is_empty() {
                println!("  No matrix files found.");
                return;
            }
            for file in files {
                println!("  {}", file.display());
            }
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS - Common patterns extracted
// ============================================================================

/// Every declarative capability a matrix file can carry goes into the
/// registry the plan resolves against. Factories and providers are code;
/// they only exist for embedding runners that build their own registry.
fn registry_from_document(document: &MatrixDocument) -> Registry {
    let mut registry = Registry::new();
    for descriptor in &document.enums {
        registry.register_enum(descriptor.clone());
    }
    registry
}

fn load_or_exit(file: &PathBuf) -> MatrixDocument {
    matrix::load_matrix_file(file).unwrap_or_else(|e| {
        print_error(e);
        process::exit(1);
    })
}

fn resolve_or_exit(
    method: &crate::declaration::MethodDescriptor,
    registry: &Registry,
) -> InvocationPlan {
    engine::resolve(method, registry).unwrap_or_else(|e: LatticeError| {
        print_error(e);
        process::exit(1);
    })
}

// ============================================================================
// OUTPUT FUNCTIONS - Simple, direct output
// ============================================================================

fn print_plan_text(document: &MatrixDocument, registry: &Registry, config: &OutputConfig) {
    for method in &document.methods {
        let plan = resolve_or_exit(method, registry);
        println!(
            "{} ({} invocations)",
            config.colorize(plan.display_name(), CYAN),
            plan.total()
        );
        for record in plan {
            println!("  {}", record.name);
        }
    }
}

fn print_plan_json(document: &MatrixDocument, registry: &Registry) {
    let mut methods = Vec::new();
    for method in &document.methods {
        let plan = resolve_or_exit(method, registry);
        let total = plan.total();
        let display_name = plan.display_name().to_string();
        let invocations: Vec<serde_json::Value> = plan
            .map(|record| {
                serde_json::json!({
                    "index": record.index,
                    "name": record.name,
                    "arguments": record
                        .arguments
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        methods.push(serde_json::json!({
            "method": display_name,
            "total": total,
            "invocations": invocations,
        }));
    }
    let rendered = serde_json::to_string_pretty(&serde_json::Value::Array(methods))
        .unwrap_or_else(|e| {
            eprintln!("failed to render JSON: {e}");
            process::exit(1);
        });
    println!("{rendered}");
}
