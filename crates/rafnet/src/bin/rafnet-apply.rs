use clap::{Parser, ArgAction};
use anyhow::{Result, bail};
use colored::*;
use log::info;

use raf_algorithms::{RafAlgorithm, all_algorithms, algorithm_by_name};
use rafnet::init_logging;
use rafnet::input_parsers::{read_reaction_system_input, serializable_systems, write_json};
use rafnet::algorithm_parsers::{HeuristicArguments, RuntimeArguments};
use rafnet::progress_bar::ProgressReporter;

#[derive(Debug, Parser)]
#[command(name = "rafnet-apply")]
#[command(version, about = "Apply a RAF algorithm to a reaction system")]
pub struct Cli {
    /// Input reaction system (JSON), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Algorithm name, e.g. "Max RAF" (case and spaces are ignored)
    #[arg(short, long, default_value = "Max RAF")]
    algorithm: String,

    /// List the available algorithms and exit
    #[arg(long)]
    list: bool,

    /// Write the result systems as JSON to this file ("-" for stdout)
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

fn print_algorithms() {
    for a in all_algorithms() {
        let kind = if a.is_heuristic() { " (heuristic)" } else { "" };
        println!("{:32} {}{}", a.name().bold(), a.description(), kind.yellow());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.list {
        print_algorithms();
        return Ok(());
    }
    let Some(algorithm) = algorithm_by_name(&cli.algorithm) else {
        print_algorithms();
        bail!("Unknown algorithm \"{}\"", cli.algorithm);
    };
    cli.heuristics.validate(algorithm)?;
    cli.runtime.validate()?;
    cli.runtime.init_thread_pool()?;

    let input = read_reaction_system_input(&cli.input)?;
    println!("{}", format!("# {}: {} reactions, {} food",
        input.name(), input.size(), input.food_size()).yellow());

    let params = cli.heuristics.params();
    let progress = ProgressReporter::new(cli.runtime.time_limit());
    let result = algorithm.apply(&input, &params, &progress);
    progress.finish();

    let output = match result {
        Ok(output) => output,
        Err(canceled) => bail!("{}: {}", algorithm.name(), canceled),
    };
    if output.partial {
        eprintln!("{}", format!("{} was canceled, showing the best results found so far",
            algorithm.name()).red());
    }
    info!("{} produced {} system(s)", algorithm.name(), output.systems.len());

    for system in &output.systems {
        if system.is_empty() {
            println!("{}", format!("# {}: no reactions", system.name()).cyan());
        } else {
            print!("{}", system.to_string().green());
        }
    }

    if let Some(path) = &cli.output {
        write_json(path, &serializable_systems(&output.systems))?;
    }
    Ok(())
}
