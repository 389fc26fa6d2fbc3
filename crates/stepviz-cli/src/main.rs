//! stepviz command-line tools.
//!
//! Provides the `stepviz` binary for running a visualizer session offline.
//! `replay` feeds a recorded stream of step events (and user commands) into
//! a session and prints the resulting display state as JSON; `project`
//! prints the trimmed search projection of a graph file.
//!
//! Uses the same `Session` the embedding host drives, so a replay reproduces
//! exactly what a live view would have shown.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use stepviz_core::{projector, VizGraph};
use stepviz_engine::prompt::{CancelPrompt, FixedAnswer};
use stepviz_engine::{
    Command, EngineError, Session, SessionModel, StepState, VisualizerConfig, VisualizerKind,
};

/// Environment variable consulted for the line width when no config file is
/// given.
const LINE_WIDTH_ENV: &str = "STEPVIZ_LINE_WIDTH";

/// Algorithm visualization tools.
#[derive(Parser)]
#[command(name = "stepviz", about = "Algorithm visualization session tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded event stream against a graph.
    Replay {
        /// Path to the graph JSON file.
        #[arg(short, long)]
        graph: PathBuf,

        /// Path to the JSON-lines event file.
        #[arg(short, long)]
        events: PathBuf,

        /// Which visualizer to run.
        #[arg(short, long, value_enum, default_value = "search")]
        kind: KindArg,

        /// Visualizer config JSON file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Answer given to domain-split prompts (default: cancel).
        #[arg(long)]
        split: Option<String>,

        /// Stop at the first dropped line instead of reporting it.
        #[arg(long)]
        strict: bool,
    },

    /// Print the trimmed search projection of a graph.
    Project {
        /// Path to the graph JSON file.
        #[arg(short, long)]
        graph: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Csp,
    Search,
}

impl From<KindArg> for VisualizerKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Csp => VisualizerKind::Csp,
            KindArg::Search => VisualizerKind::Search,
        }
    }
}

/// A user action recorded in the event file as `{"command": ...}`.
#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
enum UserAction {
    FineStep,
    Step,
    AutoSolve,
    Pause,
    Reset,
    ToggleFullDomain,
    PrintPositions,
    ClickNode { id: String },
    ClickEdge { id: String },
}

/// A line of the event file that could not be applied.
#[derive(Debug, Serialize)]
struct Dropped {
    line: usize,
    error: String,
}

/// Final display state printed by `replay`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplayReport {
    graph: Value,
    output: String,
    frontier: Vec<Value>,
    pre_solution: String,
    positions: String,
    state: StepState,
    commands: Vec<Command>,
    dropped: Vec<Dropped>,
}

/// Errors that end a CLI run.
#[derive(Debug)]
enum CliError {
    /// Reading or parsing an input file failed.
    Input(String),
    /// A line was dropped under `--strict`, or a graph could not be encoded.
    Engine(EngineError),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 1,
            CliError::Input(_) => 3,
        }
    }
}

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Replay {
            graph,
            events,
            kind,
            config,
            split,
            strict,
        } => run_replay(&graph, &events, kind.into(), config.as_deref(), split, strict),
        Commands::Project { graph } => run_project(&graph),
    };

    match result {
        Ok(json) => {
            let text = serde_json::to_string_pretty(&json).unwrap_or_else(|e| {
                format!("{{\"error\": \"failed to serialize report: {}\"}}", e)
            });
            println!("{}", text);
        }
        Err(err) => {
            match &err {
                CliError::Input(msg) => eprintln!("Error: {}", msg),
                CliError::Engine(e) => eprintln!("Error: {}", e),
            }
            process::exit(err.exit_code());
        }
    }
}

/// Execute the replay subcommand.
fn run_replay(
    graph_path: &Path,
    events_path: &Path,
    kind: VisualizerKind,
    config_path: Option<&Path>,
    split: Option<String>,
    strict: bool,
) -> Result<Value, CliError> {
    let graph = load_graph(graph_path)?;
    let config = load_config(config_path)?;
    let events = read_file(events_path)?;

    let session = Session::new(kind, SessionModel::new(graph, config), Vec::new());
    let mut session = match split {
        Some(answer) => session.with_prompt(FixedAnswer(Some(answer))),
        None => session.with_prompt(CancelPrompt),
    };
    session.render();
    session.run_deferred();

    let mut dropped = Vec::new();
    for (idx, line) in events.lines().enumerate() {
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        let raw: Value = serde_json::from_str(line).map_err(|e| {
            CliError::Input(format!("{}:{}: invalid JSON: {}", events_path.display(), line_no, e))
        })?;

        if let Err(err) = replay_line(&mut session, &raw) {
            if strict {
                return Err(CliError::Engine(err));
            }
            dropped.push(Dropped {
                line: line_no,
                error: err.to_string(),
            });
        }
    }

    let graph = session
        .displayed_graph()
        .to_json()
        .map_err(|e| CliError::Engine(e.into()))?;
    let report = ReplayReport {
        graph,
        output: session.output().to_string(),
        frontier: session.frontier().to_vec(),
        pre_solution: session.pre_solution().to_string(),
        positions: session.positions().to_string(),
        state: session.state(),
        commands: session.sink().clone(),
        dropped,
    };
    serde_json::to_value(&report)
        .map_err(|e| CliError::Input(format!("failed to serialize report: {}", e)))
}

/// Applies one event-file line: a user action if it carries `command`,
/// otherwise a step event.
fn replay_line(session: &mut Session<Vec<Command>>, raw: &Value) -> Result<(), EngineError> {
    if raw.get("command").is_none() {
        return session.dispatch(raw).map(|_| ());
    }

    let action: UserAction = serde_json::from_value(raw.clone()).map_err(|e| {
        EngineError::MalformedEvent {
            action: "command".to_string(),
            reason: e.to_string(),
        }
    })?;
    match action {
        UserAction::FineStep => session.fine_step(),
        UserAction::Step => session.step(),
        UserAction::AutoSolve => session.auto_solve(),
        UserAction::Pause => session.pause(),
        UserAction::Reset => session.reset(),
        UserAction::ToggleFullDomain => {
            session.toggle_full_domain();
            Ok(())
        }
        UserAction::PrintPositions => session.print_positions(),
        UserAction::ClickNode { id } => session.click_node(&id),
        UserAction::ClickEdge { id } => session.click_edge(&id),
    }
}

/// Execute the project subcommand.
fn run_project(graph_path: &Path) -> Result<Value, CliError> {
    let graph = load_graph(graph_path)?;
    projector::project(&graph)
        .to_json()
        .map_err(|e| CliError::Engine(e.into()))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path)
        .map_err(|e| CliError::Input(format!("failed to read '{}': {}", path.display(), e)))
}

fn load_graph(path: &Path) -> Result<VizGraph, CliError> {
    let text = read_file(path)?;
    VizGraph::from_json_str(&text)
        .map_err(|e| CliError::Input(format!("failed to load graph '{}': {}", path.display(), e)))
}

/// Loads the config file if given; otherwise defaults, with the line width
/// taken from the environment when set.
fn load_config(path: Option<&Path>) -> Result<VisualizerConfig, CliError> {
    if let Some(path) = path {
        let text = read_file(path)?;
        return serde_json::from_str(&text).map_err(|e| {
            CliError::Input(format!("failed to parse config '{}': {}", path.display(), e))
        });
    }

    let mut config = VisualizerConfig::default();
    if let Ok(raw) = std::env::var(LINE_WIDTH_ENV) {
        match raw.parse::<f64>() {
            Ok(width) => config.line_width = width,
            Err(_) => tracing::warn!("ignoring {}={:?}: not a number", LINE_WIDTH_ENV, raw),
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use stepviz_core::{VizEdge, VizNode};

    fn session() -> Session<Vec<Command>> {
        let graph = VizGraph::from_parts(
            vec![VizNode::search("s", "{x}"), VizNode::search("t", "{x, y}")],
            vec![VizEdge::new("st", "s", "t")],
        )
        .unwrap();
        let mut session = Session::new(
            VisualizerKind::Search,
            SessionModel::new(graph, VisualizerConfig::default()),
            Vec::new(),
        );
        session.render();
        session.run_deferred();
        session
    }

    #[test]
    fn cli_parses_replay_arguments() {
        let cli = Cli::try_parse_from([
            "stepviz", "replay", "-g", "g.json", "-e", "ev.jsonl", "--kind", "csp", "--strict",
        ])
        .unwrap();
        match cli.command {
            Commands::Replay { kind, strict, split, .. } => {
                assert!(matches!(kind, KindArg::Csp));
                assert!(strict);
                assert!(split.is_none());
            }
            Commands::Project { .. } => panic!("expected replay"),
        }
    }

    #[test]
    fn command_lines_drive_the_session() {
        let mut s = session();
        replay_line(&mut s, &json!({"command": "auto_solve"})).unwrap();
        replay_line(&mut s, &json!({"command": "click_node", "id": "t"})).unwrap();
        assert_eq!(s.state(), StepState::Stepping);
        assert_eq!(
            s.sink().last(),
            Some(&Command::VarClick {
                var_name: "{x, y}".into()
            })
        );
    }

    #[test]
    fn bad_lines_are_engine_errors() {
        let mut s = session();
        assert!(replay_line(&mut s, &json!({"command": "dance"})).is_err());
        assert!(matches!(
            replay_line(&mut s, &json!({"command": "pause"})),
            Err(EngineError::InvalidTransition { .. })
        ));
        assert!(replay_line(&mut s, &json!({"action": "highlightNodes", "nodeIds": ["q"], "colour": "red"}))
            .is_err());
    }

    #[test]
    fn exit_codes_distinguish_input_from_engine_errors() {
        assert_eq!(CliError::Input("x".into()).exit_code(), 3);
        assert_eq!(CliError::Engine(EngineError::NotInitialized).exit_code(), 1);
    }
}
