use clap::{Parser, ArgAction};
use anyhow::{Result, bail};
use colored::*;
use serde::Serialize;

use raf_model::ReactionSystem;
use raf_algorithms::{Canceled, Progress, algorithm_by_name, food_importance, reaction_importance};
use rafnet::init_logging;
use rafnet::input_parsers::{read_reaction_system_input, write_json};
use rafnet::algorithm_parsers::{HeuristicArguments, RuntimeArguments};
use rafnet::progress_bar::ProgressReporter;

#[derive(Debug, Parser)]
#[command(name = "rafnet-importance")]
#[command(version, about = "Food and reaction importance for a RAF algorithm")]
pub struct Cli {
    /// Input reaction system (JSON), or "-" for stdin
    #[arg(value_name = "INPUT", default_value = "-")]
    input: String,

    /// Algorithm whose result size is measured
    #[arg(short, long, default_value = "Max RAF")]
    algorithm: String,

    /// Write the importance lists as JSON to this file ("-" for stdout)
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

#[derive(Debug, Serialize)]
struct Importance {
    food: Vec<(String, f64)>,
    reactions: Vec<(String, f64)>,
}

fn print_table(title: &str, rows: &[(String, f64)]) {
    println!("{}", title.bold());
    if rows.is_empty() {
        println!("  {}", "none".cyan());
    }
    for (name, percent) in rows {
        let line = format!("  {:20} {:6.2}%", name, percent);
        if *percent >= 100.0 {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(algorithm) = algorithm_by_name(&cli.algorithm) else {
        bail!("Unknown algorithm \"{}\"", cli.algorithm);
    };
    if algorithm.is_heuristic() {
        bail!("Importance needs an exact algorithm, \"{}\" is a heuristic", algorithm.name());
    }
    cli.heuristics.validate(algorithm)?;
    cli.runtime.validate()?;
    cli.runtime.init_thread_pool()?;

    let input = read_reaction_system_input(&cli.input)?;
    let params = cli.heuristics.params();
    let run = |rs: &ReactionSystem, p: &dyn Progress| -> Result<ReactionSystem, Canceled> {
        let output = algorithm.apply(rs, &params, p)?;
        Ok(output.systems.into_iter().next().unwrap_or_default())
    };

    let progress = ProgressReporter::new(cli.runtime.time_limit());
    let lists = food_importance(&input, run, &progress)
        .and_then(|food| Ok((food, reaction_importance(&input, run, &progress)?)));
    progress.finish();
    let (food, reactions) = match lists {
        Ok(lists) => lists,
        Err(canceled) => bail!("Importance for {}: {}", algorithm.name(), canceled),
    };

    let importance = Importance {
        food: food.into_iter().map(|(m, p)| (m.name().to_string(), p)).collect(),
        reactions: reactions.into_iter().map(|(r, p)| (r.name().to_string(), p)).collect(),
    };
    println!("{}", format!("# Importance for {} of {}", algorithm.name(), input.name()).yellow());
    print_table("Food", &importance.food);
    print_table("Reactions", &importance.reactions);

    if let Some(path) = &cli.output {
        write_json(path, &importance)?;
    }
    Ok(())
}
