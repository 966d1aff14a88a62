use crate::core::template::{OrderMap, Template};
use crate::core::tree::{NodeId, XmlTree};
use crate::parsers::normalize::normalize;
use std::collections::HashSet;

/// 순서 보존 변이기. 쓰기는 전부 이 타입을 거치고, 값이 실제로 기록된 노드만
/// kept 집합에 남는다. prune은 모든 매핑 규칙이 끝난 뒤 한 번만 돈다.
pub struct Mutator {
    tree: XmlTree,
    order: OrderMap,
    kept: HashSet<NodeId>,
}

impl Mutator {
    pub fn new(template: Template) -> Self {
        Self {
            tree: template.tree,
            order: template.order,
            kept: HashSet::new(),
        }
    }

    pub fn tree(&self) -> &XmlTree {
        &self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// Find-or-insert: repeated calls for the same field never duplicate.
    pub fn ensure_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        if let Some(existing) = self.tree.find_child(parent, name) {
            return existing;
        }
        self.insert_new(parent, name)
    }

    /// Always creates a fresh instance (goods items, transport-contract
    /// documents), positioned by the same template-order rule.
    pub fn create_child(&mut self, parent: NodeId, name: &str) -> NodeId {
        self.insert_new(parent, name)
    }

    fn insert_new(&mut self, parent: NodeId, name: &str) -> NodeId {
        let index = self.insert_position(parent, name);
        let child = self.tree.new_element(name);
        self.tree.insert_child(parent, child, index);
        child
    }

    // 서식 순서상 `name`보다 뒤에 오는 첫 기존 자식 앞에 끼워 넣는다.
    // 더 뒤인 자식이 없으면 맨 끝. 자식 수가 작아 선형 탐색으로 충분하다.
    fn insert_position(&self, parent: NodeId, name: &str) -> usize {
        let parent_path = self.tree.path(parent);
        let Some(rank) = self.order.rank(&parent_path, name) else {
            return self.tree.children(parent).len();
        };
        for (i, &child) in self.tree.children(parent).iter().enumerate() {
            if let Some(child_rank) = self.order.rank(&parent_path, self.tree.name(child)) {
                if child_rank > rank {
                    return i;
                }
            }
        }
        self.tree.children(parent).len()
    }

    /// Marks the node and every ancestor up to the root as carrying data.
    pub fn mark_kept(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            if !self.kept.insert(id) {
                break;
            }
            current = self.tree.parent(id);
        }
    }

    /// Normalizes the raw value; writes text and marks the node only when the
    /// value is present. Returns whether anything was written.
    pub fn set_text(&mut self, node: NodeId, raw: &str) -> bool {
        match normalize(raw) {
            Some(value) => {
                self.tree.set_text(node, value);
                self.mark_kept(node);
                true
            }
            None => false,
        }
    }

    /// Attributes ride along with a kept node; callers set them only after a
    /// successful `set_text` on the same node.
    pub fn set_attr(&mut self, node: NodeId, name: &str, raw: &str) -> bool {
        match normalize(raw) {
            Some(value) => {
                self.tree.set_attr(node, name, value);
                true
            }
            None => false,
        }
    }

    /// 품목 전체 재구성용: 같은 이름의 기존 자식을 모두 떼어낸다.
    pub fn remove_children_named(&mut self, parent: NodeId, name: &str) {
        self.tree.remove_children_named(parent, name);
    }

    /// Single sweep removing every element that never received data. Runs
    /// strictly after all mapping rules; un-kept subtrees drop wholesale, so
    /// visiting kept nodes only is equivalent to the post-order detach.
    pub fn prune(&mut self) {
        let root = self.tree.root();
        self.kept.insert(root);
        self.prune_children(root);
    }

    fn prune_children(&mut self, id: NodeId) {
        let kept = &self.kept;
        self.tree.retain_children(id, |child| kept.contains(&child));
        for child in self.tree.children(id).to_vec() {
            self.prune_children(child);
        }
    }

    pub fn into_tree(self) -> XmlTree {
        self.tree
    }
}
