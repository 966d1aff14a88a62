use crate::utils::error::{DeclError, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// 노드는 정수 id로만 가리킨다. kept 추적이 값이 아니라 노드 정체성 기준이라
/// 동일 태그가 반복되는 서식에서도 안전하다.
pub type NodeId = usize;

#[derive(Debug, Clone)]
struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Arena-backed element tree. Detached nodes stay allocated but unreachable;
/// the tree lives only for one transformation, so nothing is reclaimed early.
#[derive(Debug, Clone)]
pub struct XmlTree {
    nodes: Vec<Element>,
    root: NodeId,
}

impl XmlTree {
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut nodes: Vec<Element> = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut root: Option<NodeId> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    let id = push_element(&mut nodes, &e, stack.last().copied())?;
                    if root.is_none() {
                        root = Some(id);
                    }
                    stack.push(id);
                }
                Event::Empty(e) => {
                    let id = push_element(&mut nodes, &e, stack.last().copied())?;
                    if root.is_none() {
                        root = Some(id);
                    }
                }
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| DeclError::TemplateError {
                        message: format!("invalid text content: {e}"),
                    })?;
                    if let Some(&current) = stack.last() {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            nodes[current].text = Some(trimmed.to_string());
                        }
                    }
                }
                Event::End(_) => {
                    stack.pop();
                }
                Event::Eof => break,
                _ => {}
            }
        }

        let root = root.ok_or_else(|| DeclError::TemplateError {
            message: "document has no root element".to_string(),
        })?;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id].text.as_deref()
    }

    pub fn set_text(&mut self, id: NodeId, text: String) {
        self.nodes[id].text = Some(text);
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id]
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, id: NodeId, name: &str, value: String) {
        let attrs = &mut self.nodes[id].attrs;
        if let Some(existing) = attrs.iter_mut().find(|(k, _)| k == name) {
            existing.1 = value;
        } else {
            attrs.push((name.to_string(), value));
        }
    }

    pub fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.nodes[parent]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].name == name)
    }

    /// 루트부터 태그 이름을 '/'로 이은 구조 경로. 순서 맵의 키로 쓴다.
    pub fn path(&self, id: NodeId) -> String {
        let mut names = vec![self.nodes[id].name.clone()];
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            names.push(self.nodes[parent].name.clone());
            current = parent;
        }
        names.reverse();
        names.join("/")
    }

    /// New orphan element; attach with `insert_child`.
    pub fn new_element(&mut self, name: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Element {
            name: name.to_string(),
            attrs: Vec::new(),
            text: None,
            children: Vec::new(),
            parent: None,
        });
        id
    }

    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize) {
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.insert(index, child);
    }

    pub fn remove_children_named(&mut self, parent: NodeId, name: &str) {
        let (removed, kept): (Vec<NodeId>, Vec<NodeId>) = self.nodes[parent]
            .children
            .iter()
            .copied()
            .partition(|&c| self.nodes[c].name == name);
        for id in removed {
            self.nodes[id].parent = None;
        }
        self.nodes[parent].children = kept;
    }

    pub fn retain_children(&mut self, parent: NodeId, keep: impl Fn(NodeId) -> bool) {
        let kept: Vec<NodeId> = self.nodes[parent]
            .children
            .iter()
            .copied()
            .filter(|&c| keep(c))
            .collect();
        self.nodes[parent].children = kept;
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.write_element(&mut writer, self.root)?;
        Ok(writer.into_inner())
    }

    fn write_element(&self, writer: &mut Writer<Vec<u8>>, id: NodeId) -> Result<()> {
        let element = &self.nodes[id];
        let mut start = BytesStart::new(element.name.as_str());
        for (key, value) in &element.attrs {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if element.children.is_empty() && element.text.is_none() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if let Some(text) = &element.text {
            writer.write_event(Event::Text(BytesText::new(text)))?;
        }
        for &child in &element.children {
            self.write_element(writer, child)?;
        }
        writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
        Ok(())
    }
}

fn push_element(
    nodes: &mut Vec<Element>,
    start: &BytesStart<'_>,
    parent: Option<NodeId>,
) -> Result<NodeId> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DeclError::TemplateError {
            message: format!("invalid attribute on <{name}>: {e}"),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = String::from_utf8_lossy(&attr.value).to_string();
        attrs.push((key, value));
    }

    let id = nodes.len();
    nodes.push(Element {
        name,
        attrs,
        text: None,
        children: Vec::new(),
        parent,
    });
    if let Some(parent) = parent {
        nodes[parent].children.push(id);
    }
    Ok(id)
}
