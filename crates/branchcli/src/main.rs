use anyhow::Result;
use branchcore::{Condition, ExecutionEvent, Flow, FlowStatus, Outcome, END_TASK};
use branchruntime::{lint_flow, FlowEngine, TaskRegistry};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "branchflow")]
#[command(about = "Branching flow engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Execute a flow file
    Run {
        /// Path to flow JSON file
        #[arg(short, long)]
        file: PathBuf,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a flow file against the built-in tasks
    Validate {
        /// Path to flow JSON file
        file: PathBuf,
    },

    /// List available tasks
    Tasks,

    /// Create a new example flow
    Init {
        /// Output file path
        #[arg(short, long, default_value = "flow.json")]
        output: PathBuf,
    },
}

/// Registry with every built-in task registered
fn builtin_registry() -> TaskRegistry {
    let mut registry = TaskRegistry::new();
    branchtasks::register_all(&mut registry);
    registry
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { file, verbose } => {
            // Initialize logging
            let level = if verbose {
                tracing::Level::DEBUG
            } else {
                tracing::Level::INFO
            };
            tracing_subscriber::fmt().with_max_level(level).init();

            run_flow(file).await?;
        }

        Commands::Validate { file } => {
            validate_flow(file)?;
        }

        Commands::Tasks => {
            list_tasks();
        }

        Commands::Init { output } => {
            create_example_flow(output)?;
        }
    }

    Ok(())
}

async fn run_flow(file: PathBuf) -> Result<()> {
    println!("🚀 Loading flow from: {}", file.display());

    let flow_json = std::fs::read_to_string(&file)?;
    let flow: Flow = serde_json::from_str(&flow_json)?;

    println!("📋 Flow: {}", flow.name);
    println!("   Start task: {}", flow.start_task);
    println!("   Conditions: {}", flow.conditions.len());
    println!();

    let engine = FlowEngine::new(Arc::new(builtin_registry()));

    // Subscribe to events for real-time output
    let mut events = engine.subscribe_events();

    let event_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                ExecutionEvent::FlowStarted { .. } => {
                    println!("▶️  Flow started");
                }
                ExecutionEvent::TaskStarted { task, .. } => {
                    println!("  ⚡ Starting task: {}", task);
                }
                ExecutionEvent::TaskCompleted {
                    task, duration_ms, ..
                } => {
                    println!("  ✅ Task {} completed in {}ms", task, duration_ms);
                }
                ExecutionEvent::TaskFailed { task, error, .. } => {
                    println!("  ❌ Task {} failed: {}", task, error);
                }
                ExecutionEvent::FlowFinished {
                    status,
                    duration_ms,
                    ..
                } => match status {
                    FlowStatus::Completed => {
                        println!("✨ Flow completed successfully in {}ms", duration_ms)
                    }
                    FlowStatus::Failed => println!(
                        "💥 Flow finished with diverged branches after {}ms",
                        duration_ms
                    ),
                    FlowStatus::Failure => println!("💥 Flow aborted after {}ms", duration_ms),
                },
            }
        }
    });

    // Execute the flow
    let result = engine.execute(&flow).await;

    // Wait for events to finish printing
    tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    event_task.abort();

    println!();
    println!("📊 Execution Summary:");
    println!("   Status: {}", result.status());
    if let Some(message) = result.message() {
        println!("   Message: {}", message);
    }
    println!("   Tasks invoked: {}", result.execution_log().len());

    for entry in result.execution_log() {
        let mark = if entry.success { "✅" } else { "❌" };
        match entry.expected_outcome {
            Some(expected) => println!("   {} {} (expected {})", mark, entry.task, expected),
            None => println!("   {} {}", mark, entry.task),
        }
    }

    if result.status() != FlowStatus::Completed {
        std::process::exit(1);
    }

    Ok(())
}

fn validate_flow(file: PathBuf) -> Result<()> {
    println!("🔍 Validating flow: {}", file.display());

    let flow_json = std::fs::read_to_string(&file)?;
    let flow: Flow = serde_json::from_str(&flow_json)?;

    let registry = builtin_registry();
    let issues = lint_flow(&flow, &registry);

    if issues.is_empty() {
        println!("✅ Flow is valid:");
        println!("   Name: {}", flow.name);
        println!("   Start task: {}", flow.start_task);
        println!("   Conditions: {}", flow.conditions.len());
    } else {
        println!("⚠️  Found {} issue(s):", issues.len());
        for issue in &issues {
            println!("   • {}", issue);
        }
        std::process::exit(1);
    }

    Ok(())
}

fn list_tasks() {
    println!("📦 Available tasks:");
    println!();

    let registry = builtin_registry();

    for name in registry.task_names() {
        match registry.parameters(&name) {
            Some(params) if !params.is_empty() => {
                let rendered: Vec<String> = params
                    .iter()
                    .map(|p| {
                        if p.required {
                            p.name.clone()
                        } else {
                            format!("{}?", p.name)
                        }
                    })
                    .collect();
                println!("  • {} ({})", name, rendered.join(", "));
            }
            _ => println!("  • {}", name),
        }
    }
}

fn create_example_flow(output: PathBuf) -> Result<()> {
    let mut flow = Flow::new("Example ETL Flow", "extract");
    flow.add_condition(
        Condition::new("extract", Outcome::Success)
            .on_match("transform")
            .on_mismatch(END_TASK),
    );
    flow.add_condition(
        Condition::new("transform", Outcome::Success)
            .on_match("load")
            .on_mismatch(END_TASK),
    );
    flow.add_condition(Condition::new("load", Outcome::Success).on_match(END_TASK));

    let json = serde_json::to_string_pretty(&flow)?;
    std::fs::write(&output, json)?;

    println!("✨ Created example flow: {}", output.display());
    println!();
    println!("Run it with:");
    println!("  branchflow run --file {}", output.display());

    Ok(())
}
