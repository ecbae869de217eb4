use crate::config::Config;
use crate::planner::{self, ExecutionState, RunOutcome};
use crate::producer::{OpenAiProducer, produce_plan_document};
use crate::tools::default_registry;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Planline - declarative plan validation and execution for tool-using agents.
#[derive(Parser, Debug)]
#[command(name = "planline")]
#[command(version = "0.1.0")]
#[command(about = "Validate and execute declarative tool plans.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the tool catalog handed to the plan producer
    Tools,

    /// Validate and execute a plan document from a JSON file
    Run {
        /// Path to the plan document
        plan: PathBuf,

        /// Print the full execution report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask the plan producer to draft a plan for an objective
    Plan {
        /// What to accomplish
        objective: String,
    },

    /// Draft a plan for an objective, then validate and execute it
    Agent {
        /// What to accomplish
        objective: String,

        /// Print the full execution report as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Tools => {
            let registry = default_registry(&config)?;
            print!("{}", registry.describe_all());
            Ok(())
        }
        Commands::Run { plan, json } => {
            let contents = std::fs::read_to_string(&plan)
                .with_context(|| format!("Failed to read plan file {}", plan.display()))?;
            let doc: serde_json::Value =
                serde_json::from_str(&contents).context("Plan file is not valid JSON")?;

            let registry = Arc::new(default_registry(&config)?);
            let outcome = planner::run_document(&doc, &registry).await?;
            report_outcome(&outcome, json)
        }
        Commands::Plan { objective } => {
            let registry = default_registry(&config)?;
            let producer = OpenAiProducer::new(config.api_key.clone(), &config.producer);
            let raw = crate::producer::PlanProducer::produce(
                &producer,
                &objective,
                &registry.describe_all(),
            )
            .await?;
            println!("{raw}");
            Ok(())
        }
        Commands::Agent { objective, json } => {
            let registry = Arc::new(default_registry(&config)?);
            let producer = OpenAiProducer::new(config.api_key.clone(), &config.producer);
            let doc =
                produce_plan_document(&producer, &objective, &registry.describe_all()).await?;

            let outcome = planner::run_document(&doc, &registry).await?;
            report_outcome(&outcome, json)
        }
    }
}

fn report_outcome(outcome: &RunOutcome, json: bool) -> Result<()> {
    match outcome {
        RunOutcome::FailurePlan { reason } => {
            println!("No plan could be formed: {reason}");
        }
        RunOutcome::Executed(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(report)?);
                return Ok(());
            }

            for entry in &report.trace {
                println!("step {} [{}]", entry.step, entry.tool_name);
            }
            match &report.state {
                ExecutionState::Completed => {
                    println!("plan completed ({} steps)", report.trace.len());
                }
                state => println!("plan {state}"),
            }
        }
    }
    Ok(())
}
