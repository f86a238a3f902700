use std::fmt::Display;
use clap::{Parser, ArgAction};
use anyhow::{Result, bail};
use colored::*;

use raf_algorithms::{DependencyGraph, algorithm_by_name, molecule_dependency_graph, reaction_dependency_graph};
use rafnet::init_logging;
use rafnet::input_parsers::{read_reaction_system_input, write_json};
use rafnet::algorithm_parsers::{HeuristicArguments, RuntimeArguments};
use rafnet::progress_bar::ProgressReporter;

#[derive(Debug, Parser)]
#[command(name = "rafnet-depgraph")]
#[command(version, about = "Reaction or molecule dependency graph of a reaction system")]
pub struct Cli {
    /// Input reaction system (JSON), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Build the graph between molecules instead of reactions
    #[arg(short, long)]
    molecules: bool,

    /// Reduce the input with this (exact) algorithm first, e.g. "Max CAF"
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Write the graph as JSON to this file ("-" for stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Verbosity (-v = info, -vv = debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(flatten, next_help_heading = "Heuristic parameters")]
    heuristics: HeuristicArguments,

    #[command(flatten, next_help_heading = "Runtime parameters")]
    runtime: RuntimeArguments,
}

fn print_graph<T: Clone + Ord + Display>(graph: &DependencyGraph<T>) {
    for level in 0..graph.depth() {
        let members: Vec<String> = graph.nodes()
            .iter()
            .filter(|n| n.level == level)
            .map(|n| n.id.to_string())
            .collect();
        println!("{} {}", format!("level {:3}:", level).bold(), members.join(" "));
    }
    for (source, target) in graph.edges() {
        println!("{} {} {}", source, "->".cyan(), target);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.runtime.validate()?;
    cli.runtime.init_thread_pool()?;

    let mut input = read_reaction_system_input(&cli.input)?;
    let progress = ProgressReporter::new(cli.runtime.time_limit());

    if let Some(name) = &cli.algorithm {
        let Some(algorithm) = algorithm_by_name(name) else {
            bail!("Unknown algorithm \"{}\"", name);
        };
        if algorithm.is_heuristic() {
            bail!("\"{}\" is a heuristic, choose an exact algorithm", algorithm.name());
        }
        cli.heuristics.validate(algorithm)?;
        let output = match algorithm.apply(&input, &cli.heuristics.params(), &progress) {
            Ok(output) => output,
            Err(canceled) => bail!("{}: {}", algorithm.name(), canceled),
        };
        input = output.systems.into_iter().next().unwrap_or_default();
    }
    println!("{}", format!("# {}: {} reactions, {} food",
        input.name(), input.size(), input.food_size()).yellow());

    if cli.molecules {
        let graph = molecule_dependency_graph(&input, &progress);
        progress.finish();
        let graph = match graph {
            Ok(graph) => graph,
            Err(canceled) => bail!("Molecule dependencies: {}", canceled),
        };
        print_graph(&graph);
        if let Some(path) = &cli.output {
            write_json(path, &graph)?;
        }
    } else {
        let graph = reaction_dependency_graph(&input, &progress);
        progress.finish();
        let graph = match graph {
            Ok(graph) => graph,
            Err(canceled) => bail!("Reaction dependencies: {}", canceled),
        };
        print_graph(&graph);
        if let Some(path) = &cli.output {
            write_json(path, &graph)?;
        }
    }
    Ok(())
}
