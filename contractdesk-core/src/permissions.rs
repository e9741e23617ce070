//! Permission matrix editing with parent-to-child cascade.

use tracing::{debug, info};

use crate::models::{Capability, PermissionNode};

/// Acknowledgement returned by [`PermissionMatrix::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PermissionsSaved {
    pub nodes: usize,
}

/// Flat list of permission nodes; children point at their parent by id.
#[derive(Debug, Clone, Default)]
pub struct PermissionMatrix {
    nodes: Vec<PermissionNode>,
}

impl PermissionMatrix {
    /// Wraps a working copy of the permission tree.
    pub fn new(nodes: Vec<PermissionNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[PermissionNode] {
        &self.nodes
    }

    pub fn node(&self, id: &str) -> Option<&PermissionNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Direct children of `parent_id`, in list order.
    pub fn children_of<'a>(&'a self, parent_id: &'a str) -> impl Iterator<Item = &'a PermissionNode> {
        self.nodes
            .iter()
            .filter(move |n| n.parent_id.as_deref() == Some(parent_id))
    }

    /// Flips `capability` on `node_id`. For a parent node every child is then set to
    /// the parent's new value, whatever it held before. Returns the new value, or
    /// `None` if the node does not exist.
    pub fn toggle(&mut self, node_id: &str, capability: Capability) -> Option<bool> {
        let node = self.nodes.iter_mut().find(|n| n.id == node_id)?;
        let value = !node.get(capability);
        node.set(capability, value);
        let is_parent = node.is_parent;

        if is_parent {
            let mut cascaded = 0;
            for child in self
                .nodes
                .iter_mut()
                .filter(|n| n.parent_id.as_deref() == Some(node_id))
            {
                child.set(capability, value);
                cascaded += 1;
            }
            debug!("{} on {} set to {} for {} children", capability, node_id, value, cascaded);
        }
        Some(value)
    }

    /// Acknowledges a save of the current matrix.
    ///
    /// There is no backend, so this only reports how many nodes were saved.
    pub fn save(&self) -> PermissionsSaved {
        info!("Permissions saved ({} nodes)", self.nodes.len());
        PermissionsSaved {
            nodes: self.nodes.len(),
        }
    }

    pub fn into_nodes(self) -> Vec<PermissionNode> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> PermissionMatrix {
        let mut nodes = vec![
            PermissionNode::parent("contracts", "Hợp đồng"),
            PermissionNode::child("contracts.list", "Danh sách", "contracts"),
            PermissionNode::child("contracts.payments", "Thanh toán", "contracts"),
            PermissionNode::child("contracts.expenses", "Chi phí", "contracts"),
            PermissionNode::parent("system", "Hệ thống"),
            PermissionNode::child("system.users", "Người dùng", "system"),
        ];
        // mixed starting values on the children
        nodes[1].can_edit = true;
        nodes[2].can_view = true;
        nodes[3].can_delete = true;
        PermissionMatrix::new(nodes)
    }

    #[test]
    fn test_parent_toggle_overwrites_all_children() {
        let mut m = matrix();
        assert_eq!(m.toggle("contracts", Capability::CanEdit), Some(true));

        let children: Vec<&PermissionNode> = m.children_of("contracts").collect();
        assert_eq!(children.len(), 3);
        assert!(children.iter().all(|c| c.can_edit));

        // untouched capabilities keep their values
        assert!(!children[0].can_view);
        assert!(children[1].can_view);
        assert!(children[2].can_delete);
        assert!(!children[0].can_add);

        assert_eq!(m.toggle("contracts", Capability::CanEdit), Some(false));
        assert!(m.children_of("contracts").all(|c| !c.can_edit));
    }

    #[test]
    fn test_cascade_stays_within_the_parent() {
        let mut m = matrix();
        m.toggle("contracts", Capability::CanView);
        assert!(!m.node("system.users").unwrap().can_view);
        assert!(!m.node("system").unwrap().can_view);
    }

    #[test]
    fn test_child_toggle_affects_only_itself() {
        let mut m = matrix();
        let before = m.nodes().to_vec();
        assert_eq!(m.toggle("contracts.list", Capability::CanAdd), Some(true));

        for (old, new) in before.iter().zip(m.nodes()) {
            if new.id == "contracts.list" {
                assert!(new.can_add);
            } else {
                assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn test_unknown_node_and_save() {
        let mut m = matrix();
        assert_eq!(m.toggle("missing", Capability::CanView), None);
        assert_eq!(m.save(), PermissionsSaved { nodes: 6 });
    }
}
