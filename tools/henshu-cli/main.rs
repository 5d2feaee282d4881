use clap::{Parser, ValueEnum};
use henshu::prelude::*;
use std::fs;
use std::time::Instant;

/// Output rendering for the final workflow.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Exported snapshot as pretty-printed JSON
    Json,
    /// Indented tree outline
    Outline,
}

/// Id generation strategy for inserted nodes.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum IdsCli {
    /// Deterministic `node-N` ids
    Sequential,
    /// Random v4 UUIDs
    Uuid,
}

/// Replays a script of workflow edit requests and prints the resulting tree
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a JSON array of requests ({"type": "insert" | "delete" | "updateLabel" | "undo" | "redo", ...})
    script_path: String,

    /// Optional exported workflow snapshot to start from
    #[arg(short, long)]
    snapshot: Option<String>,

    /// How to print the final workflow
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Outline)]
    format: OutputFormat,

    /// How new node ids are generated
    #[arg(long, value_enum, default_value_t = IdsCli::Sequential)]
    ids: IdsCli,

    /// Keep at most this many undo steps
    #[arg(long)]
    limit: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let total_start = Instant::now();

    // --- 1. Loading ---
    let script_json = fs::read_to_string(&cli.script_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read script file '{}': {}",
            cli.script_path, e
        ))
    });
    let requests: Vec<Request> = serde_json::from_str(&script_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse script JSON: {}", e)));

    let initial = cli.snapshot.as_ref().map(|path| {
        let json = fs::read_to_string(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to read snapshot file '{}': {}", path, e))
        });
        WorkflowSnapshot::from_json(&json)
            .and_then(IntoWorkflow::into_workflow)
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid snapshot: {}", e)))
    });

    // --- 2. Session setup ---
    let mut builder = History::builder();
    builder = match cli.ids {
        IdsCli::Sequential => match &initial {
            Some(workflow) => builder.id_generator(SequentialIds::continuing("node", workflow)),
            None => builder.id_generator(SequentialIds::default()),
        },
        IdsCli::Uuid => builder.id_generator(UuidIds),
    };
    if let Some(workflow) = initial {
        builder = builder.workflow(workflow);
    }
    if let Some(limit) = cli.limit {
        builder = builder.limit(limit);
    }
    let mut session = builder.build();

    // --- 3. Replay ---
    let replay_start = Instant::now();
    let request_count = requests.len();
    let summary = session.replay(requests);
    let replay_duration = replay_start.elapsed();

    if let Err(violation) = session.present().check_invariants() {
        exit_with_error(&format!("Replay produced an invalid workflow: {}", violation));
    }

    // --- 4. Output ---
    match cli.format {
        OutputFormat::Json => {
            let json = session
                .export()
                .to_json_pretty()
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to export: {}", e)));
            println!("{}", json);
        }
        OutputFormat::Outline => println!("{}", session.present().outline()),
    }

    eprintln!("\n--- Replay Summary ---");
    eprintln!("Requests:        {}", request_count);
    eprintln!("Accepted:        {}", summary.accepted);
    eprintln!("Rejected:        {}", summary.rejected);
    eprintln!("Nodes:           {}", session.present().len());
    eprintln!("Undo Depth:      {}", session.state().past().count());
    eprintln!("Redo Depth:      {}", session.state().future().count());
    eprintln!("Replay Time:     {:?}", replay_duration);
    eprintln!("Total Execution: {:?}", total_start.elapsed());
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
