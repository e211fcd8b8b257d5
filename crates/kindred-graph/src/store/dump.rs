//! Human-readable dump of a graph, for debugging and test assertions.
//!
//! The layout is deterministic but not a stable machine format.

use std::fmt::Write;

use kindred_core::Properties;

use super::graph::Graph;

impl Graph {
    /// Render every node and relationship.
    ///
    /// Nodes are ordered by type then id; relationships by type, source,
    /// then target.
    ///
    /// ```text
    /// nodes:
    ///   citation#1 {id=1, page="12"}
    /// relationships:
    ///   TRANSCRIPTION_FOR localized_text#1 -> citation#1 [source:CASCADE, target:CASCADE] {}
    /// ```
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::from("nodes:\n");
        for (node_type, id, properties) in self.nodes() {
            let _ = writeln!(out, "  {node_type}#{id} {}", render(properties));
        }
        out.push_str("relationships:\n");
        for rel in self.relationships() {
            let _ = writeln!(
                out,
                "  {} [source:{}, target:{}] {}",
                rel.key,
                rel.policy.on_source_deleted,
                rel.policy.on_target_deleted,
                render(&rel.properties)
            );
        }
        out
    }
}

fn render(properties: &Properties) -> String {
    let fields: Vec<String> = properties.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!("{{{}}}", fields.join(", "))
}

#[cfg(test)]
mod tests {
    use kindred_core::{DeletePolicy, NodeRef, Value};

    use super::*;

    #[test]
    fn empty_graph_dump() {
        assert_eq!(Graph::new().dump(), "nodes:\nrelationships:\n");
    }

    #[test]
    fn dump_orders_nodes_and_relationships() {
        let mut graph = Graph::new();
        let mut props = Properties::new();
        props.insert("page".to_owned(), Value::from("12"));
        let citation = graph.upsert("citation", props);
        let text = graph.upsert("localized_text", Properties::new());
        let place = graph.upsert("place", Properties::new());
        graph
            .upsert_relationship(
                "TRANSCRIPTION_FOR",
                NodeRef::new("localized_text", text),
                NodeRef::new("citation", citation),
                Properties::new(),
                DeletePolicy::CASCADE_BOTH,
            )
            .unwrap();
        assert_eq!(place.as_u64(), 1);

        let expected = "\
nodes:
  citation#1 {id=1, page=\"12\"}
  localized_text#1 {id=1}
  place#1 {id=1}
relationships:
  TRANSCRIPTION_FOR localized_text#1 -> citation#1 [source:CASCADE, target:CASCADE] {}
";
        assert_eq!(graph.dump(), expected);
    }
}
