//! Property tests: whatever valid events the execution service sent, a
//! reset brings the session back to its snapshot.

use proptest::prelude::*;
use serde_json::{json, Value};

use stepviz_core::{VizEdge, VizGraph, VizNode};
use stepviz_engine::{Command, Session, SessionModel, StepState, VisualizerConfig, VisualizerKind};

const NODES: [&str; 4] = ["s", "a", "b", "g"];
const EDGES: [&str; 3] = ["sa", "sb", "ag"];

fn search_graph() -> VizGraph {
    VizGraph::from_parts(
        vec![
            VizNode::search("s", "{x}"),
            VizNode::search("a", "{x, y}"),
            VizNode::search("b", "{x, w}"),
            VizNode::search("g", "{x, y, z}"),
        ],
        vec![
            VizEdge::new("sa", "s", "a"),
            VizEdge::new("sb", "s", "b"),
            VizEdge::new("ag", "a", "g"),
        ],
    )
    .unwrap()
}

fn color() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["red", "blue", "green", "orange"])
}

fn subset(ids: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(ids.to_vec(), 0..=ids.len())
}

/// Any well-formed event the search visualizer applies.
fn event() -> impl Strategy<Value = Value> {
    prop_oneof![
        (proptest::option::of(subset(&EDGES)), proptest::option::of(color()), any::<bool>()).prop_map(
            |(ids, colour, bold)| {
                let style = if bold { "bold" } else { "normal" };
                json!({"action": "highlightArcs", "arcIds": ids, "colour": colour, "style": style})
            }
        ),
        (subset(&NODES), color())
            .prop_map(|(ids, colour)| json!({"action": "highlightNodes", "nodeIds": ids, "colour": colour})),
        (subset(&EDGES), color())
            .prop_map(|(path, colour)| json!({"action": "highlightPath", "path": path, "colour": colour})),
        subset(&NODES).prop_map(|ids| json!({"action": "setFrontier", "frontier": [ids]})),
        (0u32..20).prop_map(|cost| json!({"action": "setPreSolution", "solution": "s -> g", "cost": cost})),
        "[a-z ]{0,12}".prop_map(|text| json!({"action": "output", "text": text})),
        prop::sample::select(vec!["", "A,B", "C"])
            .prop_map(|p| json!({"action": "showPositions", "positions": p})),
        Just(json!({"action": "clear"})),
    ]
}

proptest! {
    #[test]
    fn reset_after_any_events_restores_the_snapshot(
        events in prop::collection::vec(event(), 0..24),
        step_first in any::<bool>(),
    ) {
        let mut session = Session::new(
            VisualizerKind::Search,
            SessionModel::new(search_graph(), VisualizerConfig::default()),
            Vec::<Command>::new(),
        );
        session.render();
        session.run_deferred();
        let snapshot = session.snapshot().cloned().unwrap();

        if step_first {
            session.step().unwrap();
        }
        for event in &events {
            session.dispatch(event).unwrap();
        }
        session.reset().unwrap();

        prop_assert_eq!(session.graph(), &snapshot);
        prop_assert_eq!(session.state(), StepState::Ready);
        prop_assert_eq!(session.output(), "");
        prop_assert!(session.frontier().is_empty());
        prop_assert_eq!(session.pre_solution(), "");
        prop_assert_eq!(session.positions(), "");
    }

    #[test]
    fn front_reset_matches_user_reset(events in prop::collection::vec(event(), 0..16)) {
        let mut by_user = Session::new(
            VisualizerKind::Search,
            SessionModel::new(search_graph(), VisualizerConfig::default()),
            Vec::<Command>::new(),
        );
        by_user.render();
        by_user.run_deferred();
        let mut by_service = Session::new(
            VisualizerKind::Search,
            SessionModel::new(search_graph(), VisualizerConfig::default()),
            Vec::<Command>::new(),
        );
        by_service.render();
        by_service.run_deferred();

        for event in &events {
            by_user.dispatch(event).unwrap();
            by_service.dispatch(event).unwrap();
        }
        by_user.reset().unwrap();
        by_service.dispatch(&json!({"action": "frontReset"})).unwrap();

        prop_assert_eq!(by_user.graph(), by_service.graph());
        prop_assert_eq!(by_user.projection(), by_service.projection());
        prop_assert_eq!(by_user.display(), by_service.display());
    }
}
