//! Integration tests for relationship upsert and navigation.

use kindred_core::{DeletePolicy, NodeId, NodeRef, OnDelete, Properties, RelationshipKey, Value};
use kindred_graph::{FanOut, Graph, GraphError, PropertyFilter};

fn kind(kind: &str) -> Properties {
    let mut p = Properties::new();
    p.insert("kind".to_owned(), Value::from(kind));
    p
}

fn node(graph: &mut Graph, node_type: &str, props: Properties) -> NodeRef {
    let id = graph.upsert(node_type, props);
    NodeRef::new(node_type, id)
}

fn link(graph: &mut Graph, rel_type: &str, source: &NodeRef, target: &NodeRef) {
    graph
        .upsert_relationship(
            rel_type,
            source.clone(),
            target.clone(),
            Properties::new(),
            DeletePolicy::default(),
        )
        .unwrap();
}

#[test]
fn dangling_source_is_rejected() {
    let mut graph = Graph::new();
    let citation = node(&mut graph, "citation", Properties::new());

    let result = graph.upsert_relationship(
        "TEXT_FOR",
        NodeRef::new("localized_text", 9u64),
        citation,
        Properties::new(),
        DeletePolicy::default(),
    );
    assert!(matches!(result, Err(GraphError::DanglingEndpoint(n)) if n.id == NodeId::new(9)));
    assert_eq!(graph.relationship_count(), 0);
}

#[test]
fn dangling_target_is_rejected() {
    let mut graph = Graph::new();
    let text = node(&mut graph, "localized_text", Properties::new());

    let result = graph.upsert_relationship(
        "TEXT_FOR",
        text,
        NodeRef::new("citation", 1u64),
        Properties::new(),
        DeletePolicy::default(),
    );
    assert!(matches!(result, Err(GraphError::DanglingEndpoint(n)) if n.node_type.as_str() == "citation"));
}

#[test]
fn upsert_relationship_replaces_properties_and_policy() {
    let mut graph = Graph::new();
    let person = node(&mut graph, "person", Properties::new());
    let family = node(&mut graph, "family", Properties::new());

    link(&mut graph, "CHILD_OF", &person, &family);
    let mut props = Properties::new();
    props.insert("order".to_owned(), Value::Int(2));
    graph
        .upsert_relationship(
            "CHILD_OF",
            person.clone(),
            family.clone(),
            props,
            DeletePolicy::default().on_target_deleted(OnDelete::Cascade),
        )
        .unwrap();

    assert_eq!(graph.relationship_count(), 1);
    let key = RelationshipKey::new("CHILD_OF", person, family);
    let rel = graph.get_relationship(&key).unwrap();
    assert_eq!(rel.get_property("order"), Some(&Value::Int(2)));
    assert_eq!(rel.policy.on_target_deleted, OnDelete::Cascade);
    assert_eq!(rel.policy.on_source_deleted, OnDelete::RelationshipOnly);
}

#[test]
fn find_referenced_node_follows_forward_edge() {
    let mut graph = Graph::new();
    let person = node(&mut graph, "person", Properties::new());
    let event = node(&mut graph, "event", kind("death"));
    link(&mut graph, "DEATH", &person, &event);

    let (node_type, record) = graph.find_referenced_node("person", person.id, "DEATH").unwrap();
    assert_eq!(node_type.as_str(), "event");
    assert_eq!(record.get("kind"), Some(&Value::from("death")));

    assert!(graph.find_referenced_node("person", person.id, "BIRTH").is_none());
    assert!(graph.find_referenced_node("event", event.id, "DEATH").is_none());
}

#[test]
fn find_referenced_node_picks_lowest_target() {
    let mut graph = Graph::new();
    let person = node(&mut graph, "person", Properties::new());
    let older = node(&mut graph, "place", kind("first"));
    let newer = node(&mut graph, "place", kind("second"));
    let event = node(&mut graph, "event", kind("other"));
    link(&mut graph, "LIVED_AT", &person, &newer);
    link(&mut graph, "LIVED_AT", &person, &older);
    link(&mut graph, "LIVED_AT", &person, &event);

    // "event" sorts before "place".
    let (node_type, _) = graph.find_referenced_node("person", person.id, "LIVED_AT").unwrap();
    assert_eq!(node_type.as_str(), "event");

    let all = graph.find_referenced_nodes("person", person.id, "LIVED_AT");
    let kinds: Vec<_> = all.iter().map(|(_, p)| p["kind"].clone()).collect();
    assert_eq!(kinds, vec![Value::from("other"), Value::from("first"), Value::from("second")]);
}

#[test]
fn forbid_fan_out_keeps_single_forward_edge() {
    let mut graph = Graph::with_fan_out(FanOut::Forbid);
    let person = node(&mut graph, "person", Properties::new());
    let a = node(&mut graph, "event", Properties::new());
    let b = node(&mut graph, "event", Properties::new());
    link(&mut graph, "BIRTH", &person, &a);

    let result = graph.upsert_relationship(
        "BIRTH",
        person.clone(),
        b.clone(),
        Properties::new(),
        DeletePolicy::default(),
    );
    assert!(matches!(result, Err(GraphError::AmbiguousForwardEdge { existing, .. }) if existing == a));

    // A different relationship type is unaffected.
    link(&mut graph, "BAPTISM", &person, &b);
}

#[test]
fn find_referencing_nodes_by_type_and_filter() {
    let mut graph = Graph::new();
    let citation = node(&mut graph, "citation", Properties::new());
    let other = node(&mut graph, "citation", Properties::new());
    let extract = node(&mut graph, "localized_text", kind("extract"));
    let name = node(&mut graph, "localized_text", kind("name"));
    let unrelated = node(&mut graph, "localized_text", kind("extract"));
    let note = node(&mut graph, "note", kind("extract"));

    link(&mut graph, "TEXT_FOR", &extract, &citation);
    link(&mut graph, "TEXT_FOR", &name, &citation);
    link(&mut graph, "TEXT_FOR", &unrelated, &other);
    link(&mut graph, "TEXT_FOR", &note, &citation);

    let all = graph.find_referencing_nodes("localized_text", &citation, "TEXT_FOR", None);
    assert_eq!(all.len(), 2);

    let wanted = Value::from("extract");
    let filtered = graph.find_referencing_nodes(
        "localized_text",
        &citation,
        "TEXT_FOR",
        Some(PropertyFilter::new("kind", &wanted)),
    );
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0]["id"], Value::from(extract.id));

    assert!(graph.find_referencing_nodes("localized_text", &citation, "NOTE_FOR", None).is_empty());
}

#[test]
fn remove_relationship_leaves_endpoints() {
    let mut graph = Graph::new();
    let text = node(&mut graph, "localized_text", Properties::new());
    let citation = node(&mut graph, "citation", Properties::new());
    link(&mut graph, "TEXT_FOR", &text, &citation);

    let key = RelationshipKey::new("TEXT_FOR", text.clone(), citation.clone());
    assert!(graph.remove_relationship(&key).is_some());
    assert!(graph.remove_relationship(&key).is_none());

    assert!(graph.exists("localized_text", text.id));
    assert!(graph.exists("citation", citation.id));
    assert!(graph.find_referencing_nodes("localized_text", &citation, "TEXT_FOR", None).is_empty());
}

#[test]
fn remove_all_incident_to_leaves_nodes() {
    let mut graph = Graph::new();
    let person = node(&mut graph, "person", Properties::new());
    let family = node(&mut graph, "family", Properties::new());
    let event = node(&mut graph, "event", Properties::new());
    link(&mut graph, "CHILD_OF", &person, &family);
    link(&mut graph, "PRINCIPAL", &event, &person);
    link(&mut graph, "HELD_BY", &event, &family);

    let removed = graph.remove_all_incident_to("person", person.id);
    assert_eq!(removed.len(), 2);
    assert_eq!(graph.relationship_count(), 1);
    assert!(graph.exists("person", person.id));
    assert!(graph.relationships_from(&person).is_empty());
    assert!(graph.relationships_to(&person).is_empty());
    assert_eq!(graph.relationships_from(&event).len(), 1);
}
