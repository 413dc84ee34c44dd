//! Plain node/edge lists for external graph and embedding tooling
//!
//! Three shapes are produced: id-keyed node and edge tables, a lemma-labeled
//! `from,to,weight` edge list for embedding training, and a node-link JSON
//! document.

use super::edge::{GraphEdge, LabeledEdge};
use super::node::GraphNode;
use super::DependencyGraph;
use csv::WriterBuilder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Node-link document, the shape most graph libraries import directly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLinkDocument {
    pub directed: bool,
    pub multigraph: bool,
    pub nodes: Vec<GraphNode>,
    pub links: Vec<NodeLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeLink {
    pub source: u64,
    pub target: u64,
    pub weight: u64,
}

impl From<&GraphEdge> for NodeLink {
    fn from(edge: &GraphEdge) -> Self {
        NodeLink {
            source: edge.from.as_u64(),
            target: edge.to.as_u64(),
            weight: edge.weight,
        }
    }
}

impl DependencyGraph {
    /// Edges with lemma labels in place of ids
    pub fn labeled_edges(&self) -> Vec<LabeledEdge> {
        self.edges
            .iter()
            .filter_map(|e| {
                Some(LabeledEdge {
                    from: self.label(e.from)?.to_string(),
                    to: self.label(e.to)?.to_string(),
                    weight: e.weight as f64,
                })
            })
            .collect()
    }

    pub fn to_node_link(&self) -> NodeLinkDocument {
        NodeLinkDocument {
            directed: self.directed,
            multigraph: false,
            nodes: self.nodes.clone(),
            links: self.edges.iter().map(NodeLink::from).collect(),
        }
    }

    /// `id,label,upos,degree,size,color` rows
    pub fn write_node_list<W: Write>(&self, writer: W) -> ExportResult<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(["id", "label", "upos", "degree", "size", "color"])?;
        for node in &self.nodes {
            wtr.write_record([
                node.id.as_u64().to_string(),
                node.label.clone(),
                node.upos.to_string(),
                node.degree.to_string(),
                node.size.to_string(),
                node.color.clone(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// `from,to,weight` rows keyed by vocabulary id
    pub fn write_edge_list<W: Write>(&self, writer: W) -> ExportResult<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        wtr.write_record(["from", "to", "weight"])?;
        for edge in &self.edges {
            wtr.write_record([
                edge.from.as_u64().to_string(),
                edge.to.as_u64().to_string(),
                edge.weight.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// `from,to,weight` rows keyed by lemma
    pub fn write_labeled_edge_list<W: Write>(&self, writer: W) -> ExportResult<()> {
        let mut wtr = WriterBuilder::new().from_writer(writer);
        for edge in self.labeled_edges() {
            wtr.serialize(edge)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn write_node_link<W: Write>(&self, writer: W) -> ExportResult<()> {
        serde_json::to_writer_pretty(writer, &self.to_node_link())?;
        Ok(())
    }

    /// Write `nodes.csv`, `edges.csv`, `labeled_edges.csv` and `graph.json` into a directory
    pub fn export_dir(&self, dir: impl AsRef<Path>) -> ExportResult<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        self.write_node_list(File::create(dir.join("nodes.csv"))?)?;
        self.write_edge_list(File::create(dir.join("edges.csv"))?)?;
        self.write_labeled_edge_list(File::create(dir.join("labeled_edges.csv"))?)?;
        self.write_node_link(File::create(dir.join("graph.json"))?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GraphBuilder;
    use crate::token::{TokenRecord, Upos};

    fn graph() -> crate::graph::DependencyGraph {
        let tokens = vec![
            TokenRecord::new(0, 0, 1, 2, "The", Upos::Det),
            TokenRecord::new(0, 0, 2, 3, "cat", Upos::Noun),
            TokenRecord::new(0, 0, 3, 0, "sat", Upos::Verb),
        ];
        GraphBuilder::default().build(&tokens).unwrap().1
    }

    #[test]
    fn test_labeled_edge_list() {
        let mut out = Vec::new();
        graph().write_labeled_edge_list(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "from,to,weight\ncat,The,1.0\nsat,cat,1.0\n");
    }

    #[test]
    fn test_id_edge_list() {
        let mut out = Vec::new();
        graph().write_edge_list(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "from,to,weight\n1,0,1\n2,1,1\n");
    }

    #[test]
    fn test_node_list_header_and_rows() {
        let mut out = Vec::new();
        graph().write_node_list(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,label,upos,degree,size,color");
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("1,cat,NOUN,2,30,"));
    }

    #[test]
    fn test_node_link_json() {
        let doc = graph().to_node_link();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["directed"], true);
        assert_eq!(json["links"].as_array().unwrap().len(), 2);
        assert_eq!(json["nodes"][1]["label"], "cat");
    }

    #[test]
    fn test_export_dir() {
        let dir = tempfile::tempdir().unwrap();
        graph().export_dir(dir.path().join("out")).unwrap();
        for name in ["nodes.csv", "edges.csv", "labeled_edges.csv", "graph.json"] {
            assert!(dir.path().join("out").join(name).exists());
        }
    }
}
