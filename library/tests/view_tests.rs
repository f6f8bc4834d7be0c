use nodegraph::view::{GraphDataSource, GraphMutator};
use nodegraph::{Connection, Graph, GraphError, Location, SocketAddr, TypeToken};

#[test]
fn test_editor_round_of_edits() {
    let mut graph = Graph::default();
    let n = GraphMutator::add_node(&mut graph, "value.integer", Location::new(1.0, 2.0)).unwrap();
    let inc = GraphMutator::add_node(&mut graph, "math.increment", Location::default()).unwrap();

    let out = SocketAddr::value_output(n, 0);
    let input = SocketAddr::value_input(inc, 0);
    assert!(GraphDataSource::can_connect(&graph, &input, &out));
    GraphMutator::connect(&mut graph, input, out).unwrap();

    let display = graph.node_display(inc).unwrap();
    assert_eq!(display.type_id, "math.increment");
    assert_eq!(display.display_name, "Increment");
    let socket = display.socket(&input).unwrap();
    assert_eq!(socket.name, "A");
    assert_eq!(socket.data_type, Some(TypeToken::Integer));
    assert_eq!(socket.connection_count, 1);

    GraphMutator::move_node(&mut graph, inc, Location::new(5.0, 5.0)).unwrap();
    assert_eq!(graph.node_display(inc).unwrap().location, Location::new(5.0, 5.0));

    GraphMutator::disconnect(&mut graph, &Connection::new(out, input)).unwrap();
    assert!(GraphDataSource::connections(&graph).is_empty());

    GraphMutator::remove_node(&mut graph, n).unwrap();
    assert_eq!(GraphDataSource::node_ids(&graph), vec![inc]);
    assert!(matches!(
        GraphMutator::move_node(&mut graph, n, Location::default()),
        Err(GraphError::NodeNotFound(_))
    ));
}

#[test]
fn test_display_shows_fault_and_exec_sockets() {
    let mut graph = Graph::default();
    let log = graph.create_node("debug.log", Location::default()).unwrap();
    graph.run(log).unwrap();

    let display = graph.node_display(log).unwrap();
    assert!(display.error.is_some());
    let prev = display.socket(&SocketAddr::exec_input(log, 0)).unwrap();
    assert_eq!(prev.data_type, None);
    assert_eq!(display.sockets.len(), 3);
}

#[test]
fn test_available_node_types() {
    let graph = Graph::default();
    let types = graph.available_node_types();
    let branch = types.iter().find(|t| t.type_id == "flow.branch").unwrap();
    assert_eq!(branch.namespace, "flow");
    assert_eq!(branch.display_name, "Branch");
    assert!(GraphMutator::add_node(&mut Graph::default(), "no.such", Location::default()).is_err());
}
