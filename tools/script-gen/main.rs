use clap::Parser;
use henshu::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use std::fs;

/// A CLI tool to generate random edit scripts for henshu-cli
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_script.json")]
    output: String,

    /// Number of requests to generate
    #[arg(short, long, default_value_t = 50)]
    count: usize,

    /// Seed for reproducible scripts; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Share of requests (0-100) that are deliberately invalid
    #[arg(long, default_value_t = 10)]
    invalid_percent: u8,
}

const LABELS: &[&str] = &[
    "Validate order",
    "Charge card",
    "In stock?",
    "Notify customer",
    "Ship parcel",
    "Retry later",
    "Archive",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    env_logger::init();

    if cli.invalid_percent > 100 {
        eprintln!(
            "Error: --invalid-percent ({}) must be between 0 and 100",
            cli.invalid_percent
        );
        std::process::exit(1);
    }

    let seed = cli.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    println!(
        "Generating {} requests (seed {}, ~{}% invalid)...",
        cli.count, seed, cli.invalid_percent
    );

    // The script is simulated against a real session so ids line up with what
    // henshu-cli's sequential generator will produce on replay.
    let mut session = History::builder()
        .id_generator(SequentialIds::default())
        .build();
    let mut script = Vec::with_capacity(cli.count);
    for _ in 0..cli.count {
        let request = if rng.random_ratio(u32::from(cli.invalid_percent), 100) {
            invalid_request(&mut rng, session.present())
        } else {
            valid_request(&mut rng, &session)
        };
        session.dispatch(request.clone());
        script.push(request);
    }

    let json_output = serde_json::to_string_pretty(&script)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated a script ending with {} nodes and saved it to '{}'",
        session.present().len(),
        cli.output
    );

    Ok(())
}

fn valid_request(rng: &mut StdRng, session: &History) -> Request {
    let workflow = session.present();
    let mut ids: Vec<&NodeId> = workflow.nodes().map(Node::id).collect();
    ids.sort();

    match rng.random_range(0..100) {
        0..10 if session.can_undo() => Request::Undo,
        10..15 if session.can_redo() => Request::Redo,
        15..35 => {
            let deletable: Vec<&NodeId> = ids
                .iter()
                .copied()
                .filter(|id| *id != workflow.root_id())
                .collect();
            match deletable.choose(rng) {
                Some(id) => Request::Delete {
                    node_id: (*id).clone(),
                },
                None => random_insert(rng, workflow, &ids),
            }
        }
        35..50 => match ids.choose(rng) {
            Some(id) => Request::UpdateLabel {
                node_id: (*id).clone(),
                label: random_label(rng).to_string(),
            },
            None => random_insert(rng, workflow, &ids),
        },
        _ => random_insert(rng, workflow, &ids),
    }
}

fn random_insert(rng: &mut StdRng, workflow: &Workflow, ids: &[&NodeId]) -> Request {
    let parents: Vec<&Node> = ids
        .iter()
        .filter_map(|id| workflow.node(id))
        .filter(|node| !node.kind().is_terminal())
        .collect();
    let parent = parents
        .choose(rng)
        .copied()
        .or_else(|| workflow.root())
        .map(|node| (node.id().clone(), node.kind()));
    let Some((parent_id, parent_kind)) = parent else {
        return Request::Undo;
    };

    let slot = if parent_kind.is_branch() {
        Exit::ALL.choose(rng).copied()
    } else {
        None
    };
    let kind = *[NodeKind::Action, NodeKind::Action, NodeKind::Branch, NodeKind::End]
        .choose(rng)
        .unwrap_or(&NodeKind::Action);
    let label = rng.random_bool(0.7).then(|| random_label(rng).to_string());

    Request::Insert {
        parent_id,
        slot,
        kind,
        label,
    }
}

fn invalid_request(rng: &mut StdRng, workflow: &Workflow) -> Request {
    let root_id = workflow.root_id().clone();
    match rng.random_range(0..4) {
        0 => Request::Delete { node_id: root_id },
        1 => Request::UpdateLabel {
            node_id: root_id,
            label: "   ".to_string(),
        },
        2 => Request::Insert {
            parent_id: NodeId::new("missing"),
            slot: None,
            kind: NodeKind::Action,
            label: None,
        },
        _ => Request::Insert {
            parent_id: root_id,
            slot: Some(Exit::True),
            kind: NodeKind::Action,
            label: None,
        },
    }
}

fn random_label(rng: &mut StdRng) -> &'static str {
    LABELS.choose(rng).copied().unwrap_or("Step")
}
