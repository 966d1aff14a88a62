use crate::core::tree::{NodeId, XmlTree};
use crate::domain::model::Direction;
use crate::utils::error::Result;
use std::collections::HashMap;

// 관세청 표준 수입/수출신고서 서식. 호출마다 새로 파싱하므로 트리는 절대
// 호출 간에 공유되지 않는다.
const IMPORT_TEMPLATE: &str = include_str!("../../templates/import_declaration.xml");
const EXPORT_TEMPLATE: &str = include_str!("../../templates/export_declaration.xml");

/// Per-parent-path record of the template's original child tag order,
/// captured once at load time and read-only afterwards. Used purely to pick
/// insertion positions for newly created elements.
#[derive(Debug, Clone)]
pub struct OrderMap {
    children: HashMap<String, Vec<String>>,
}

impl OrderMap {
    fn from_tree(tree: &XmlTree) -> Self {
        let mut children: HashMap<String, Vec<String>> = HashMap::new();
        let mut stack: Vec<NodeId> = vec![tree.root()];
        while let Some(id) = stack.pop() {
            let kids = tree.children(id);
            if kids.is_empty() {
                continue;
            }
            // 반복 요소는 경로가 같고 내부 순서도 같으므로 첫 등장만 기록한다
            children.entry(tree.path(id)).or_insert_with(|| {
                kids.iter().map(|&c| tree.name(c).to_string()).collect()
            });
            stack.extend(kids.iter().copied());
        }
        Self { children }
    }

    /// Position of `name` within the template order for `parent_path`.
    pub fn rank(&self, parent_path: &str, name: &str) -> Option<usize> {
        self.children
            .get(parent_path)?
            .iter()
            .position(|n| n == name)
    }
}

#[derive(Debug, Clone)]
pub struct Template {
    pub tree: XmlTree,
    pub order: OrderMap,
}

impl Template {
    pub fn load(direction: Direction) -> Result<Self> {
        let xml = match direction {
            Direction::Import => IMPORT_TEMPLATE,
            Direction::Export => EXPORT_TEMPLATE,
        };
        let tree = XmlTree::parse(xml)?;
        let order = OrderMap::from_tree(&tree);
        tracing::debug!(
            "Loaded {:?} template: {} parent paths in order map",
            direction,
            order.children.len()
        );
        Ok(Self { tree, order })
    }
}
