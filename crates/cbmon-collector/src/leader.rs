//! Decides which collector instance reports cluster-wide statistics.
//!
//! Every node of a cluster runs its own collector, and all of them read the
//! same node list. The instance whose local node has the byte-wise smallest
//! hostname is the leader for that cycle. Nothing is cached: leadership is
//! derived again from each fresh node list.

use crate::error::{CollectorError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub hostname: String,
    pub this_node: bool,
}

/// Outcome of leader resolution for one poll cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leadership {
    /// Hostname of the node this collector polls; `None` when the node list
    /// did not identify it.
    pub current: Option<String>,
    pub is_leader: bool,
}

/// Extracts `{hostname, thisNode}` from every entry of the `nodes` array.
///
/// # Errors
///
/// Returns [`CollectorError::MissingField`] when `nodes` is absent or an
/// entry has no hostname.
pub fn parse_nodes(response: &Value) -> Result<Vec<NodeDescriptor>> {
    let nodes = response
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| CollectorError::missing("nodes"))?;

    nodes
        .iter()
        .map(|node| {
            let hostname = node
                .get("hostname")
                .and_then(Value::as_str)
                .ok_or_else(|| CollectorError::missing("nodes[].hostname"))?;
            Ok(NodeDescriptor {
                hostname: hostname.to_string(),
                this_node: node.get("thisNode").and_then(Value::as_bool).unwrap_or(false),
            })
        })
        .collect()
}

/// Returns the single node flagged as the local one.
///
/// # Errors
///
/// Returns [`CollectorError::LeadershipAmbiguous`] unless exactly one node is
/// flagged.
pub fn local_node(nodes: &[NodeDescriptor]) -> Result<&NodeDescriptor> {
    let mut flagged = nodes.iter().filter(|n| n.this_node);
    match (flagged.next(), flagged.next()) {
        (Some(node), None) => Ok(node),
        _ => Err(CollectorError::LeadershipAmbiguous {
            flagged: nodes.iter().filter(|n| n.this_node).count(),
        }),
    }
}

/// Resolves the local hostname and whether it sorts first in the cluster.
///
/// An unidentifiable local node is logged and yields a non-leader with no
/// hostname.
///
/// # Examples
///
/// ```
/// use cbmon_collector::leader::{resolve, NodeDescriptor};
///
/// let nodes: Vec<NodeDescriptor> = ["b", "a", "c"]
///     .iter()
///     .map(|h| NodeDescriptor { hostname: h.to_string(), this_node: *h == "a" })
///     .collect();
/// let leadership = resolve(&nodes);
/// assert_eq!(leadership.current.as_deref(), Some("a"));
/// assert!(leadership.is_leader);
/// ```
pub fn resolve(nodes: &[NodeDescriptor]) -> Leadership {
    let current = match local_node(nodes) {
        Ok(node) => node,
        Err(e) => {
            tracing::warn!(error = %e, nodes = nodes.len(), "Skipping cluster-wide statistics this cycle");
            return Leadership::default();
        }
    };

    let mut hostnames: Vec<&str> = nodes.iter().map(|n| n.hostname.as_str()).collect();
    hostnames.sort_unstable();
    let is_leader = hostnames.first() == Some(&current.hostname.as_str());

    Leadership {
        current: Some(current.hostname.clone()),
        is_leader,
    }
}

/// [`parse_nodes`] followed by [`resolve`].
///
/// # Errors
///
/// Propagates parse failures from [`parse_nodes`].
pub fn resolve_response(response: &Value) -> Result<Leadership> {
    Ok(resolve(&parse_nodes(response)?))
}
