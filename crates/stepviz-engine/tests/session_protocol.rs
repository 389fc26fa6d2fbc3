//! End-to-end tests of a session driven the way a host drives it: render,
//! fire the deferred task, then interleave step events and user commands.

use serde_json::{json, Value};

use stepviz_core::{DomainValue, Style, VizEdge, VizGraph, VizNode};
use stepviz_engine::prompt::CancelPrompt;
use stepviz_engine::{
    Command, Dispatch, EngineError, Session, SessionModel, StepState, VisualizerConfig,
    VisualizerKind,
};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Search tree `s {x} -> a {x, y} -> g {x, y, z}` plus a side branch
/// `s -> b {x, w}`.
fn search_graph() -> VizGraph {
    VizGraph::from_parts(
        vec![
            VizNode::search("s", "{x}").with_position(0.0, 0.0),
            VizNode::search("a", "{x, y}").with_position(-50.0, 80.0),
            VizNode::search("b", "{x, w}").with_position(50.0, 80.0),
            VizNode::search("g", "{x, y, z}").with_position(-50.0, 160.0),
        ],
        vec![
            VizEdge::new("sa", "s", "a").with_cost(1.0),
            VizEdge::new("sb", "s", "b").with_cost(4.0),
            VizEdge::new("ag", "a", "g").with_cost(2.0),
        ],
    )
    .unwrap()
}

fn csp_graph() -> VizGraph {
    VizGraph::from_parts(
        vec![
            VizNode::variable("A", "A", 0, [1i64, 2, 3].map(DomainValue::from)),
            VizNode::variable("B", "B", 1, [1i64, 2].map(DomainValue::from)),
            VizNode::constraint("c0", "A < B", 0),
        ],
        vec![VizEdge::new("A-c0", "A", "c0"), VizEdge::new("B-c0", "B", "c0")],
    )
    .unwrap()
}

fn mount(kind: VisualizerKind, graph: VizGraph) -> Session<Vec<Command>> {
    mount_model(kind, SessionModel::new(graph, VisualizerConfig::default()))
}

/// Mounts a view over an existing model, keeping its `previously_rendered`
/// flag.
fn mount_model(kind: VisualizerKind, model: SessionModel) -> Session<Vec<Command>> {
    let mut session = Session::new(kind, model, Vec::new());
    session.render();
    assert!(session.run_deferred());
    session
}

fn send_all(session: &mut Session<Vec<Command>>, events: &[Value]) {
    for event in events {
        session.dispatch(event).unwrap();
    }
}

// ---------------------------------------------------------------------------
// Rendering handshake
// ---------------------------------------------------------------------------

#[test]
fn initial_render_is_sent_at_most_once_across_reloads() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    session.step().unwrap();
    session.reset().unwrap();
    session.dispatch(&json!({"action": "frontReset"})).unwrap();

    let initial = |log: &[Command]| log.iter().filter(|c| **c == Command::InitialRender).count();
    assert_eq!(initial(session.sink()), 1);

    let model = session.into_model();
    assert!(model.previously_rendered);
    let reloaded = mount_model(VisualizerKind::Search, model);
    assert_eq!(initial(reloaded.sink()), 0);
    assert_eq!(reloaded.state(), StepState::Ready);
}

#[test]
fn events_between_render_and_first_paint_send_nothing_early() {
    let mut session = Session::new(
        VisualizerKind::Csp,
        SessionModel::new(csp_graph(), VisualizerConfig::default()),
        Vec::new(),
    );
    session.render();
    assert_eq!(
        session
            .dispatch(&json!({"action": "chooseDomainSplit", "domain": [1, 2]}))
            .unwrap_err(),
        EngineError::NotInitialized
    );
    session
        .dispatch(&json!({"action": "output", "text": "waiting"}))
        .unwrap();
    assert!(session.sink().is_empty());

    assert!(session.run_deferred());
    assert_eq!(session.sink(), &vec![Command::InitialRender]);
    assert_eq!(session.output(), "waiting");
}

#[test]
fn teardown_before_deferred_render_never_raises() {
    let mut session = Session::new(
        VisualizerKind::Csp,
        SessionModel::new(csp_graph(), VisualizerConfig::default()),
        Vec::new(),
    );
    session.render();
    session.teardown();
    assert!(!session.run_deferred());
    assert!(session.sink().is_empty());
    assert!(session.snapshot().is_none());
}

// ---------------------------------------------------------------------------
// Stepping protocol
// ---------------------------------------------------------------------------

#[test]
fn stepping_commands_follow_the_state_machine() {
    let mut session = mount(VisualizerKind::Csp, csp_graph());

    session.auto_solve().unwrap();
    assert_eq!(session.state(), StepState::Stepping);
    assert!(matches!(
        session.step(),
        Err(EngineError::InvalidTransition { command: "step", .. })
    ));
    session.pause().unwrap();
    session.fine_step().unwrap();
    assert_eq!(session.state(), StepState::Paused);
    session.reset().unwrap();
    assert_eq!(session.state(), StepState::Ready);

    assert_eq!(
        session.sink(),
        &vec![
            Command::InitialRender,
            Command::AutoSolve,
            Command::Pause,
            Command::FineStep,
            Command::Reset,
        ]
    );
}

#[test]
fn reset_restores_snapshot_and_clears_transient_fields() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    let snapshot = session.snapshot().cloned().unwrap();

    session.step().unwrap();
    send_all(
        &mut session,
        &[
            json!({"action": "highlightPath", "path": ["sa", "ag"], "colour": "red"}),
            json!({"action": "highlightNodes", "nodeIds": ["g"], "colour": "green"}),
            json!({"action": "setFrontier", "frontier": [["s", "b"]]}),
            json!({"action": "setPreSolution", "solution": "s -> a -> g", "cost": 3}),
            json!({"action": "output", "text": "Solution found"}),
            json!({"action": "showPositions", "positions": "s: (0, 0)"}),
        ],
    );
    assert_eq!(session.output(), "Solution found");

    session.reset().unwrap();
    assert_eq!(session.graph(), &snapshot);
    assert_eq!(session.output(), "");
    assert!(session.frontier().is_empty());
    assert_eq!(session.pre_solution(), "");
    assert_eq!(session.positions(), "");
    for edge in session.projection().unwrap().edges() {
        assert_eq!(edge.style, Style::new("black", 4.0));
    }
}

// ---------------------------------------------------------------------------
// Event dispatch
// ---------------------------------------------------------------------------

#[test]
fn highlight_path_styles_live_and_projected_graphs() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    session
        .dispatch(&json!({"action": "highlightPath", "path": ["sa", "ag"], "colour": "red"}))
        .unwrap();

    let bold = Style::new("red", 7.0);
    for graph in [session.graph(), session.projection().unwrap()] {
        assert_eq!(graph.edge("sa").unwrap().style, bold);
        assert_eq!(graph.edge("ag").unwrap().style, bold);
        assert_eq!(graph.edge("sb").unwrap().style, Style::new("black", 1.0));
    }

    let changes = session.take_style_changes();
    assert!(!changes.live.is_empty());
    assert_eq!(changes.live, changes.projected);
}

#[test]
fn search_node_highlight_width_is_four() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    session
        .dispatch(&json!({"action": "highlightNodes", "nodeIds": ["a", "g"], "colour": "orange"}))
        .unwrap();
    assert_eq!(
        session.displayed_graph().node("g").unwrap().style,
        Style::new("orange", 4.0)
    );
}

#[test]
fn show_positions_toggles() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    let show = |text: &str| json!({"action": "showPositions", "positions": text});

    session.dispatch(&show("A,B")).unwrap();
    assert_eq!(session.positions(), "A,B");
    session.dispatch(&show("A,B")).unwrap();
    assert_eq!(session.positions(), "");

    session.dispatch(&show("A,B")).unwrap();
    session.dispatch(&show("C")).unwrap();
    assert_eq!(session.positions(), "C");
}

#[test]
fn malformed_set_domains_leaves_domains_unchanged() {
    let mut session = mount(VisualizerKind::Csp, csp_graph());
    let before = session.graph().clone();

    let err = session
        .dispatch(&json!({"action": "setDomains", "nodeIds": ["A", "B"], "domains": [[1]]}))
        .unwrap_err();
    assert!(matches!(err, EngineError::MalformedEvent { .. }));

    let err = session
        .dispatch(&json!({"action": "setDomains", "nodeIds": ["A"], "domains": "1,2"}))
        .unwrap_err();
    assert!(matches!(err, EngineError::MalformedEvent { .. }));

    assert_eq!(session.graph(), &before);
}

#[test]
fn unknown_ids_are_not_found() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    let err = session
        .dispatch(&json!({"action": "highlightNodes", "nodeIds": ["s", "nowhere"], "colour": "red"}))
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::NotFound {
            kind: "node",
            id: "nowhere".into()
        }
    );
    assert_eq!(session.graph().node("s").unwrap().style, Style::default());
}

#[test]
fn unknown_actions_are_ignored() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    let before = session.graph().clone();
    assert_eq!(
        session.dispatch(&json!({"action": "confetti"})).unwrap(),
        Dispatch::Ignored
    );
    assert_eq!(
        session
            .dispatch(&json!({"action": "chooseDomainSplit", "domain": [1, 2]}))
            .unwrap(),
        Dispatch::Ignored
    );
    assert_eq!(session.graph(), &before);
    assert_eq!(session.sink().len(), 1);
}

#[test]
fn cancelled_domain_split_sends_null() {
    let mut session = mount(VisualizerKind::Csp, csp_graph()).with_prompt(CancelPrompt);
    session
        .dispatch(&json!({"action": "chooseDomainSplit", "domain": [1, 2, 3]}))
        .unwrap();
    let last = serde_json::to_value(session.sink().last().unwrap()).unwrap();
    assert_eq!(last, json!({"event": "domain_split", "domain": null}));
}

#[test]
fn clear_resets_csp_arcs_to_base_width() {
    let mut session = mount(VisualizerKind::Csp, csp_graph());
    assert_eq!(session.graph().edge("A-c0").unwrap().style, Style::new("blue", 4.0));

    session.dispatch(&json!({"action": "clear"})).unwrap();
    assert_eq!(session.graph().edge("A-c0").unwrap().style, Style::new("black", 4.0));
    assert_eq!(session.graph().node("A").unwrap().style, Style::new("black", 1.0));
}

// ---------------------------------------------------------------------------
// User interaction
// ---------------------------------------------------------------------------

#[test]
fn projection_trims_each_level_and_full_domain_restores_it() {
    let mut session = mount(VisualizerKind::Search, search_graph());
    let names = |graph: &VizGraph| graph.nodes().map(|n| n.name.clone()).collect::<Vec<_>>();

    assert_eq!(names(session.displayed_graph()), ["x", "y", "w", "z"]);
    session.toggle_full_domain();
    assert_eq!(
        names(session.displayed_graph()),
        ["{x}", "{x, y}", "{x, w}", "{x, y, z}"]
    );
}

#[test]
fn clicks_send_live_names() {
    let mut session = mount(VisualizerKind::Csp, csp_graph());
    session.click_node("B").unwrap();
    session.click_edge("A-c0").unwrap();

    let sent: Vec<Value> = session.sink()[1..]
        .iter()
        .map(|c| serde_json::to_value(c).unwrap())
        .collect();
    assert_eq!(
        sent,
        vec![
            json!({"event": "var:click", "varName": "B"}),
            json!({"event": "arc:click", "constId": 0, "varName": "A"}),
        ]
    );
}
