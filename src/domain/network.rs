//! Enterprise network topology: nodes, edges, and the three preset graphs
//! used throughout the solver, simulator, and benchmark scenarios.

use std::collections::{BTreeMap, HashSet};

use indexmap::IndexMap;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::domain::error::TopologyError;

/// The role a node plays on the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Server,
    Workstation,
    Database,
    Router,
    Firewall,
}

/// Operating system tag, used to gate OS-specific techniques.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Windows,
}

/// Network services that determine which techniques a node is exposed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    Ssh,
    Http,
    Https,
    Smb,
    Rdp,
    Mysql,
    Postgresql,
    Ftp,
    Dns,
}

/// Per-node attributes: type, OS, offered services, defender-loss value,
/// and the two mutable booleans tracked across a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttributes {
    pub node_type: NodeType,
    pub os: Os,
    pub services: Vec<Service>,
    /// Defender utility lost if this node is compromised. Must be `>= 0`.
    pub value: f64,
    #[serde(default)]
    pub compromised: bool,
    #[serde(default)]
    pub is_entry_point: bool,
}

impl NodeAttributes {
    pub fn new(node_type: NodeType, os: Os, services: Vec<Service>, value: f64) -> Self {
        Self {
            node_type,
            os,
            services,
            value,
            compromised: false,
            is_entry_point: false,
        }
    }

    pub fn entry_point(mut self) -> Self {
        self.is_entry_point = true;
        self
    }
}

/// One edge between two nodes, tagged with the network segment it crosses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub src: String,
    pub dst: String,
    #[serde(default = "default_segment")]
    pub segment: String,
}

fn default_segment() -> String {
    "default".to_string()
}

/// A document form of a topology, matching the external serialisation
/// boundary described for the CLI/file-loading collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyDocument {
    pub name: String,
    pub nodes: BTreeMap<String, NodeAttributes>,
    pub edges: Vec<EdgeRecord>,
}

/// Undirected enterprise network graph.
///
/// Node identifiers are unique strings; `petgraph` indices are an
/// internal detail kept in sync via `index_of`.
#[derive(Debug, Clone)]
pub struct Topology {
    pub name: String,
    graph: UnGraph<String, String>,
    attrs: IndexMap<String, NodeAttributes>,
    index_of: IndexMap<String, NodeIndex>,
}

impl Topology {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            graph: UnGraph::new_undirected(),
            attrs: IndexMap::new(),
            index_of: IndexMap::new(),
        }
    }

    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        attrs: NodeAttributes,
    ) -> Result<(), TopologyError> {
        let id = id.into();
        if self.attrs.contains_key(&id) {
            return Err(TopologyError::DuplicateNode(id));
        }
        let idx = self.graph.add_node(id.clone());
        self.index_of.insert(id.clone(), idx);
        self.attrs.insert(id, attrs);
        Ok(())
    }

    pub fn add_edge(
        &mut self,
        src: &str,
        dst: &str,
        segment: impl Into<String>,
    ) -> Result<(), TopologyError> {
        let src_idx = *self
            .index_of
            .get(src)
            .ok_or_else(|| TopologyError::UnknownNode(src.to_string()))?;
        let dst_idx = *self
            .index_of
            .get(dst)
            .ok_or_else(|| TopologyError::UnknownNode(dst.to_string()))?;
        self.graph.add_edge(src_idx, dst_idx, segment.into());
        Ok(())
    }

    pub fn get_attrs(&self, id: &str) -> Option<&NodeAttributes> {
        self.attrs.get(id)
    }

    pub fn set_compromised(&mut self, id: &str, value: bool) {
        if let Some(a) = self.attrs.get_mut(id) {
            a.compromised = value;
        }
    }

    pub fn neighbors(&self, id: &str) -> Vec<String> {
        let Some(idx) = self.index_of.get(id) else {
            return Vec::new();
        };
        self.graph
            .neighbors(*idx)
            .map(|n| self.graph[n].clone())
            .collect()
    }

    /// Node IDs in insertion order (the order `add_node` was called),
    /// matching the original's insertion-ordered dict iteration — load-bearing
    /// for which node the solver's tie-break keeps among equal-EU candidates.
    pub fn nodes(&self) -> Vec<String> {
        self.attrs.keys().cloned().collect()
    }

    pub fn node_count(&self) -> usize {
        self.attrs.len()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn entry_points(&self) -> Vec<String> {
        self.attrs
            .iter()
            .filter(|(_, a)| a.is_entry_point)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn high_value_targets(&self, threshold: f64) -> Vec<String> {
        self.attrs
            .iter()
            .filter(|(_, a)| a.value >= threshold)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn compromised_nodes(&self) -> Vec<String> {
        self.attrs
            .iter()
            .filter(|(_, a)| a.compromised)
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn summary(&self) -> String {
        format!(
            "Topology '{}': {} nodes, {} edges, {} entry points, {} high-value targets",
            self.name,
            self.node_count(),
            self.edge_count(),
            self.entry_points().len(),
            self.high_value_targets(8.0).len(),
        )
    }

    /// Shortest path between two nodes via breadth-first search (the
    /// graph is unweighted, so BFS gives a true shortest path).
    pub fn shortest_path(&self, from: &str, to: &str) -> Option<Vec<String>> {
        use std::collections::VecDeque;

        let start = *self.index_of.get(from)?;
        let goal = *self.index_of.get(to)?;
        if start == goal {
            return Some(vec![from.to_string()]);
        }

        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        let mut prev: BTreeMap<NodeIndex, NodeIndex> = BTreeMap::new();

        visited.insert(start);
        queue.push_back(start);

        while let Some(cur) = queue.pop_front() {
            if cur == goal {
                let mut path = vec![cur];
                let mut node = cur;
                while let Some(&p) = prev.get(&node) {
                    path.push(p);
                    node = p;
                }
                path.reverse();
                return Some(path.into_iter().map(|idx| self.graph[idx].clone()).collect());
            }
            for next in self.graph.neighbors(cur) {
                if visited.insert(next) {
                    prev.insert(next, cur);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    pub fn to_document(&self) -> TopologyDocument {
        let nodes = self.attrs.iter().map(|(id, attrs)| (id.clone(), attrs.clone())).collect();
        let edges = self
            .graph
            .edge_indices()
            .map(|e| {
                let (a, b) = self.graph.edge_endpoints(e).expect("edge index is valid");
                EdgeRecord {
                    src: self.graph[a].clone(),
                    dst: self.graph[b].clone(),
                    segment: self.graph[e].clone(),
                }
            })
            .collect();
        TopologyDocument {
            name: self.name.clone(),
            nodes,
            edges,
        }
    }

    pub fn from_document(doc: TopologyDocument) -> Result<Self, TopologyError> {
        let mut topo = Self::new(doc.name);
        for (id, attrs) in doc.nodes {
            topo.add_node(id, attrs)?;
        }
        for edge in doc.edges {
            topo.add_edge(&edge.src, &edge.dst, edge.segment)?;
        }
        Ok(topo)
    }

    pub fn to_yaml_string(&self) -> Result<String, TopologyError> {
        serde_yaml::to_string(&self.to_document()).map_err(|e| TopologyError::Parse(e.to_string()))
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, TopologyError> {
        let doc: TopologyDocument =
            serde_yaml::from_str(s).map_err(|e| TopologyError::Parse(e.to_string()))?;
        Self::from_document(doc)
    }

    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, TopologyError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| TopologyError::Parse(e.to_string()))?;
        Self::from_yaml_str(&content)
    }

    pub fn save_to_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), TopologyError> {
        let content = self.to_yaml_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| TopologyError::Parse(e.to_string()))
    }

    // ── Preset topologies ────────────────────────────────────────────

    /// 10-node network: DMZ -> corporate LAN -> database tier.
    pub fn small_enterprise() -> Self {
        let mut t = Self::new("small_enterprise");
        use NodeType::*;
        use Os::*;
        use Service::*;

        t.add_node("fw-ext", NodeAttributes::new(Firewall, Linux, vec![Dns], 2.0).entry_point())
            .unwrap();
        t.add_node(
            "web-1",
            NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 4.0).entry_point(),
        )
        .unwrap();
        t.add_node(
            "web-2",
            NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 4.0).entry_point(),
        )
        .unwrap();
        t.add_node("router-1", NodeAttributes::new(Router, Linux, vec![Ssh], 3.0))
            .unwrap();
        t.add_node("ws-1", NodeAttributes::new(Workstation, Windows, vec![Smb, Rdp], 2.0))
            .unwrap();
        t.add_node("ws-2", NodeAttributes::new(Workstation, Windows, vec![Smb, Rdp], 2.0))
            .unwrap();
        t.add_node("ws-3", NodeAttributes::new(Workstation, Windows, vec![Smb, Rdp], 2.0))
            .unwrap();
        t.add_node("app-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 6.0))
            .unwrap();
        t.add_node("db-1", NodeAttributes::new(Database, Linux, vec![Mysql, Ssh], 9.0))
            .unwrap();
        t.add_node("db-2", NodeAttributes::new(Database, Linux, vec![Postgresql, Ssh], 10.0))
            .unwrap();

        t.add_edge("fw-ext", "web-1", "dmz").unwrap();
        t.add_edge("fw-ext", "web-2", "dmz").unwrap();
        t.add_edge("web-1", "router-1", "dmz-to-lan").unwrap();
        t.add_edge("web-2", "router-1", "dmz-to-lan").unwrap();
        t.add_edge("router-1", "ws-1", "lan").unwrap();
        t.add_edge("router-1", "ws-2", "lan").unwrap();
        t.add_edge("router-1", "ws-3", "lan").unwrap();
        t.add_edge("router-1", "app-1", "lan").unwrap();
        t.add_edge("ws-1", "ws-2", "lan").unwrap();
        t.add_edge("ws-2", "ws-3", "lan").unwrap();
        t.add_edge("app-1", "db-1", "lan-to-db").unwrap();
        t.add_edge("app-1", "db-2", "lan-to-db").unwrap();

        t
    }

    /// 21-node network: DMZ -> corporate LAN -> dev zone -> database tier.
    pub fn medium_enterprise() -> Self {
        let mut t = Self::new("medium_enterprise");
        use NodeType::*;
        use Os::*;
        use Service::*;

        t.add_node("fw-ext", NodeAttributes::new(Firewall, Linux, vec![Dns], 2.0).entry_point())
            .unwrap();
        t.add_node(
            "lb-1",
            NodeAttributes::new(Server, Linux, vec![Http, Https], 3.0).entry_point(),
        )
        .unwrap();
        t.add_node("web-1", NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 4.0))
            .unwrap();
        t.add_node("web-2", NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 4.0))
            .unwrap();
        t.add_node("router-1", NodeAttributes::new(Router, Linux, vec![Ssh], 3.0))
            .unwrap();
        t.add_node("router-2", NodeAttributes::new(Router, Linux, vec![Ssh], 3.0))
            .unwrap();
        for i in 1..=5 {
            let (os, services) = if i <= 3 { (Windows, vec![Smb, Rdp]) } else { (Linux, vec![Ssh]) };
            t.add_node(format!("ws-{i}"), NodeAttributes::new(Workstation, os, services, 2.0))
                .unwrap();
        }
        t.add_node("mail-1", NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 5.0))
            .unwrap();
        t.add_node("fw-dev", NodeAttributes::new(Firewall, Linux, vec![Ssh], 2.0))
            .unwrap();
        t.add_node("ci-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 6.0))
            .unwrap();
        t.add_node("dev-1", NodeAttributes::new(Workstation, Linux, vec![Ssh], 3.0))
            .unwrap();
        t.add_node("dev-2", NodeAttributes::new(Workstation, Linux, vec![Ssh], 3.0))
            .unwrap();
        t.add_node("repo-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 7.0))
            .unwrap();
        t.add_node("artifact-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh, Ftp], 5.0))
            .unwrap();
        t.add_node("db-1", NodeAttributes::new(Database, Linux, vec![Mysql, Ssh], 9.0))
            .unwrap();
        t.add_node("db-2", NodeAttributes::new(Database, Linux, vec![Postgresql, Ssh], 10.0))
            .unwrap();
        t.add_node("db-backup", NodeAttributes::new(Database, Linux, vec![Ssh, Ftp], 8.0))
            .unwrap();

        t.add_edge("fw-ext", "lb-1", "dmz").unwrap();
        t.add_edge("lb-1", "web-1", "dmz").unwrap();
        t.add_edge("lb-1", "web-2", "dmz").unwrap();
        t.add_edge("web-1", "router-1", "dmz-to-lan").unwrap();
        t.add_edge("web-2", "router-1", "dmz-to-lan").unwrap();
        t.add_edge("router-1", "router-2", "lan").unwrap();
        t.add_edge("router-1", "ws-1", "lan").unwrap();
        t.add_edge("router-1", "ws-2", "lan").unwrap();
        t.add_edge("router-1", "ws-3", "lan").unwrap();
        t.add_edge("router-2", "ws-4", "lan").unwrap();
        t.add_edge("router-2", "ws-5", "lan").unwrap();
        t.add_edge("router-1", "mail-1", "lan").unwrap();
        t.add_edge("ws-1", "ws-2", "lan").unwrap();
        t.add_edge("ws-2", "ws-3", "lan").unwrap();
        t.add_edge("ws-4", "ws-5", "lan").unwrap();
        t.add_edge("router-2", "fw-dev", "lan-to-dev").unwrap();
        t.add_edge("fw-dev", "ci-1", "dev").unwrap();
        t.add_edge("fw-dev", "dev-1", "dev").unwrap();
        t.add_edge("fw-dev", "dev-2", "dev").unwrap();
        t.add_edge("ci-1", "repo-1", "dev").unwrap();
        t.add_edge("ci-1", "artifact-1", "dev").unwrap();
        t.add_edge("dev-1", "dev-2", "dev").unwrap();
        t.add_edge("mail-1", "db-1", "lan-to-db").unwrap();
        t.add_edge("ci-1", "db-2", "dev-to-db").unwrap();
        t.add_edge("db-1", "db-backup", "db").unwrap();
        t.add_edge("db-2", "db-backup", "db").unwrap();

        t
    }

    /// 43-node network: DMZ -> corporate -> dev -> staging -> production DB
    /// plus an executive subnet.
    pub fn large_enterprise() -> Self {
        let mut t = Self::new("large_enterprise");
        use NodeType::*;
        use Os::*;
        use Service::*;

        t.add_node("fw-ext-1", NodeAttributes::new(Firewall, Linux, vec![Dns], 2.0).entry_point())
            .unwrap();
        t.add_node("fw-ext-2", NodeAttributes::new(Firewall, Linux, vec![Dns], 2.0).entry_point())
            .unwrap();
        t.add_node("lb-1", NodeAttributes::new(Server, Linux, vec![Http, Https], 3.0))
            .unwrap();
        t.add_node("web-1", NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 4.0))
            .unwrap();
        t.add_node("web-2", NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 4.0))
            .unwrap();
        t.add_node("core-rtr", NodeAttributes::new(Router, Linux, vec![Ssh], 4.0))
            .unwrap();
        t.add_node("lan-rtr-1", NodeAttributes::new(Router, Linux, vec![Ssh], 3.0))
            .unwrap();
        t.add_node("lan-rtr-2", NodeAttributes::new(Router, Linux, vec![Ssh], 3.0))
            .unwrap();
        for i in 1..=8 {
            let (os, services) = if i <= 5 { (Windows, vec![Smb, Rdp]) } else { (Linux, vec![Ssh]) };
            t.add_node(format!("ws-{i}"), NodeAttributes::new(Workstation, os, services, 2.0))
                .unwrap();
        }
        t.add_node("mail-1", NodeAttributes::new(Server, Linux, vec![Http, Https, Ssh], 5.0))
            .unwrap();
        t.add_node("file-1", NodeAttributes::new(Server, Windows, vec![Smb, Rdp], 5.0))
            .unwrap();
        t.add_node("ad-1", NodeAttributes::new(Server, Windows, vec![Smb, Rdp, Dns], 8.0))
            .unwrap();
        t.add_node("vpn-1", NodeAttributes::new(Server, Linux, vec![Ssh, Https], 6.0))
            .unwrap();
        t.add_node("exec-rtr", NodeAttributes::new(Router, Linux, vec![Ssh], 3.0))
            .unwrap();
        for i in 1..=3 {
            t.add_node(
                format!("exec-ws-{i}"),
                NodeAttributes::new(Workstation, Windows, vec![Smb, Rdp], 7.0),
            )
            .unwrap();
        }
        t.add_node("fw-dev", NodeAttributes::new(Firewall, Linux, vec![Ssh], 2.0))
            .unwrap();
        t.add_node("ci-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 6.0))
            .unwrap();
        t.add_node("ci-2", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 6.0))
            .unwrap();
        for i in 1..=4 {
            t.add_node(format!("dev-{i}"), NodeAttributes::new(Workstation, Linux, vec![Ssh], 3.0))
                .unwrap();
        }
        t.add_node("repo-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 7.0))
            .unwrap();
        t.add_node("artifact-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh, Ftp], 5.0))
            .unwrap();
        t.add_node("fw-stg", NodeAttributes::new(Firewall, Linux, vec![Ssh], 2.0))
            .unwrap();
        t.add_node("stg-app-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 5.0))
            .unwrap();
        t.add_node("stg-app-2", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 5.0))
            .unwrap();
        t.add_node("stg-db-1", NodeAttributes::new(Database, Linux, vec![Mysql, Ssh], 6.0))
            .unwrap();
        t.add_node("stg-db-2", NodeAttributes::new(Database, Linux, vec![Postgresql, Ssh], 6.0))
            .unwrap();
        t.add_node("fw-prod", NodeAttributes::new(Firewall, Linux, vec![Ssh], 3.0))
            .unwrap();
        t.add_node("prod-app-1", NodeAttributes::new(Server, Linux, vec![Http, Ssh], 7.0))
            .unwrap();
        t.add_node("prod-db-1", NodeAttributes::new(Database, Linux, vec![Mysql, Ssh], 10.0))
            .unwrap();
        t.add_node("prod-db-2", NodeAttributes::new(Database, Linux, vec![Postgresql, Ssh], 10.0))
            .unwrap();
        t.add_node("prod-backup", NodeAttributes::new(Database, Linux, vec![Ssh, Ftp], 9.0))
            .unwrap();

        t.add_edge("fw-ext-1", "lb-1", "dmz").unwrap();
        t.add_edge("fw-ext-2", "lb-1", "dmz").unwrap();
        t.add_edge("lb-1", "web-1", "dmz").unwrap();
        t.add_edge("lb-1", "web-2", "dmz").unwrap();
        t.add_edge("web-1", "core-rtr", "dmz-to-lan").unwrap();
        t.add_edge("web-2", "core-rtr", "dmz-to-lan").unwrap();
        t.add_edge("core-rtr", "lan-rtr-1", "lan").unwrap();
        t.add_edge("core-rtr", "lan-rtr-2", "lan").unwrap();
        t.add_edge("core-rtr", "ad-1", "lan").unwrap();
        t.add_edge("core-rtr", "vpn-1", "lan").unwrap();
        t.add_edge("lan-rtr-1", "ws-1", "lan").unwrap();
        t.add_edge("lan-rtr-1", "ws-2", "lan").unwrap();
        t.add_edge("lan-rtr-1", "ws-3", "lan").unwrap();
        t.add_edge("lan-rtr-1", "ws-4", "lan").unwrap();
        t.add_edge("lan-rtr-1", "mail-1", "lan").unwrap();
        t.add_edge("lan-rtr-2", "ws-5", "lan").unwrap();
        t.add_edge("lan-rtr-2", "ws-6", "lan").unwrap();
        t.add_edge("lan-rtr-2", "ws-7", "lan").unwrap();
        t.add_edge("lan-rtr-2", "ws-8", "lan").unwrap();
        t.add_edge("lan-rtr-2", "file-1", "lan").unwrap();
        t.add_edge("ws-1", "ws-2", "lan").unwrap();
        t.add_edge("ws-3", "ws-4", "lan").unwrap();
        t.add_edge("ws-5", "ws-6", "lan").unwrap();
        t.add_edge("ws-7", "ws-8", "lan").unwrap();
        t.add_edge("core-rtr", "exec-rtr", "lan-to-exec").unwrap();
        t.add_edge("exec-rtr", "exec-ws-1", "exec").unwrap();
        t.add_edge("exec-rtr", "exec-ws-2", "exec").unwrap();
        t.add_edge("exec-rtr", "exec-ws-3", "exec").unwrap();
        t.add_edge("lan-rtr-2", "fw-dev", "lan-to-dev").unwrap();
        t.add_edge("fw-dev", "ci-1", "dev").unwrap();
        t.add_edge("fw-dev", "ci-2", "dev").unwrap();
        t.add_edge("fw-dev", "dev-1", "dev").unwrap();
        t.add_edge("fw-dev", "dev-2", "dev").unwrap();
        t.add_edge("ci-1", "dev-3", "dev").unwrap();
        t.add_edge("ci-2", "dev-4", "dev").unwrap();
        t.add_edge("ci-1", "repo-1", "dev").unwrap();
        t.add_edge("ci-2", "artifact-1", "dev").unwrap();
        t.add_edge("dev-1", "dev-2", "dev").unwrap();
        t.add_edge("dev-3", "dev-4", "dev").unwrap();
        t.add_edge("ci-1", "fw-stg", "dev-to-stg").unwrap();
        t.add_edge("fw-stg", "stg-app-1", "staging").unwrap();
        t.add_edge("fw-stg", "stg-app-2", "staging").unwrap();
        t.add_edge("stg-app-1", "stg-db-1", "staging").unwrap();
        t.add_edge("stg-app-2", "stg-db-2", "staging").unwrap();
        t.add_edge("core-rtr", "fw-prod", "lan-to-prod").unwrap();
        t.add_edge("fw-prod", "prod-app-1", "prod").unwrap();
        t.add_edge("prod-app-1", "prod-db-1", "prod").unwrap();
        t.add_edge("prod-app-1", "prod-db-2", "prod").unwrap();
        t.add_edge("prod-db-1", "prod-backup", "prod").unwrap();
        t.add_edge("prod-db-2", "prod-backup", "prod").unwrap();

        t
    }
}
