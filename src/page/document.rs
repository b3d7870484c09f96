use std::collections::HashMap;

use log::warn;

use super::fragment::Fragment;
use super::selector::{Compound, Selector};
use super::PageSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Root,
    Doctype(String),
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Arena-backed page tree.
///
/// Nodes removed by `replace_children` stay in the arena but are detached,
/// so handles taken before a rewrite never alias new content.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    offsets: HashMap<NodeId, f64>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Document {
            nodes: vec![Node {
                data: NodeData::Root,
                parent: None,
                children: Vec::new(),
            }],
            offsets: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn append(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn append_element(&mut self, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
        self.append(
            parent,
            NodeData::Element {
                tag: tag.to_lowercase(),
                attrs: attrs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            },
        )
    }

    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.append(parent, NodeData::Text(text.to_string()))
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    fn attr_ref(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.node(id).data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    fn class_list(&self, id: NodeId) -> Vec<String> {
        self.attr_ref(id, "class")
            .map(|c| c.split_whitespace().map(|s| s.to_string()).collect())
            .unwrap_or_default()
    }

    fn write_class_list(&mut self, id: NodeId, classes: &[String]) {
        self.set_attr(id, "class", &classes.join(" "));
    }

    /// Record the layout offset the host measured for a node.
    pub fn set_offset_top(&mut self, id: NodeId, top: f64) {
        self.offsets.insert(id, top);
    }

    /// Element descendants of `from` in document order.
    fn element_descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(from).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.tag(id).is_some() {
                out.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.element_descendants(self.root())
            .into_iter()
            .filter(|&id| self.matches(id, selector))
            .collect()
    }

    /// Right-to-left match; greedy ancestor walking is exact for a chain of
    /// descendant combinators.
    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        let (subject, ancestors) = match selector.parts.split_last() {
            Some(split) => split,
            None => return false,
        };
        if !self.matches_compound(id, subject) {
            return false;
        }

        let mut remaining = ancestors.iter().rev().peekable();
        let mut cursor = self.parent(id);
        while let Some(want) = remaining.peek() {
            match cursor {
                Some(node) => {
                    if self.matches_compound(node, want) {
                        remaining.next();
                    }
                    cursor = self.parent(node);
                }
                None => return false,
            }
        }
        true
    }

    fn matches_compound(&self, id: NodeId, c: &Compound) -> bool {
        let tag = match self.tag(id) {
            Some(t) => t,
            None => return false,
        };
        if let Some(want) = &c.tag {
            if want != tag {
                return false;
            }
        }
        if !c.ids.is_empty() {
            let id_attr = self.attr_ref(id, "id").unwrap_or("");
            if c.ids.iter().any(|want| want != id_attr) {
                return false;
            }
        }
        if !c.classes.is_empty() {
            let classes = self.class_list(id);
            if !c.classes.iter().all(|want| classes.contains(want)) {
                return false;
            }
        }
        for a in &c.attrs {
            match self.attr_ref(id, &a.name) {
                Some(v) if a.op.test(v) => {}
                _ => return false,
            }
        }
        if c.first_child && !self.is_first_element_child(id) {
            return false;
        }
        c.not.iter().all(|inner| !self.matches_compound(id, inner))
    }

    fn is_first_element_child(&self, id: NodeId) -> bool {
        match self.parent(id) {
            Some(parent) => self
                .children(parent)
                .iter()
                .find(|&&c| self.tag(c).is_some())
                .map(|&c| c == id)
                .unwrap_or(false),
            None => false,
        }
    }

    fn detach_children(&mut self, id: NodeId) {
        let old = std::mem::take(&mut self.nodes[id.0].children);
        for child in old {
            self.nodes[child.0].parent = None;
        }
    }

    fn materialize(&mut self, parent: NodeId, fragment: Fragment) {
        match fragment {
            Fragment::Text(t) => {
                self.append(parent, NodeData::Text(t));
            }
            Fragment::Element {
                tag,
                attrs,
                children,
            } => {
                let node = self.append(parent, NodeData::Element { tag, attrs });
                for child in children {
                    self.materialize(node, child);
                }
            }
        }
    }

    pub fn to_html(&self) -> String {
        super::markup::serialize(self)
    }
}

impl PageSurface for Document {
    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Ok(sel) => self.select(&sel),
            Err(e) => {
                warn!("Ignoring invalid selector {:?}: {}", selector, e);
                Vec::new()
            }
        }
    }

    fn document_element(&self) -> Option<NodeId> {
        self.children(self.root())
            .iter()
            .copied()
            .find(|&c| self.tag(c).is_some())
    }

    fn attr(&self, node: NodeId, name: &str) -> Option<String> {
        self.attr_ref(node, name).map(|v| v.to_string())
    }

    fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attrs, .. } = &mut self.nodes[node.0].data {
            match attrs.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
    }

    fn text(&self, node: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let NodeData::Text(t) = &self.node(id).data {
                out.push_str(t);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        if self.tag(node).is_none() {
            return;
        }
        self.detach_children(node);
        if !text.is_empty() {
            self.append(node, NodeData::Text(text.to_string()));
        }
    }

    fn replace_children(&mut self, node: NodeId, content: Vec<Fragment>) {
        if self.tag(node).is_none() {
            return;
        }
        self.detach_children(node);
        for fragment in content {
            self.materialize(node, fragment);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.class_list(node).iter().any(|c| c == class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        let mut classes = self.class_list(node);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.write_class_list(node, &classes);
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        let mut classes = self.class_list(node);
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            self.write_class_list(node, &classes);
        }
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.parent(id);
        }
        false
    }

    fn offset_top(&self, node: NodeId) -> Option<f64> {
        self.offsets.get(&node).copied()
    }

    fn set_title(&mut self, title: &str) {
        if let Some(node) = self.query("title") {
            self.set_text(node, title);
        } else if let Some(head) = self.query("head") {
            let node = self.append_element(head, "title", &[]);
            self.set_text(node, title);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        let current = self.attr_ref(node, "style").unwrap_or("").to_string();
        let mut decls: Vec<(String, String)> = current
            .split(';')
            .filter_map(|d| {
                let (k, v) = d.split_once(':')?;
                Some((k.trim().to_string(), v.trim().to_string()))
            })
            .filter(|(k, _)| !k.is_empty())
            .collect();
        match decls.iter_mut().find(|(k, _)| k == property) {
            Some(slot) => slot.1 = value.to_string(),
            None => decls.push((property.to_string(), value.to_string())),
        }
        let style = decls
            .iter()
            .map(|(k, v)| format!("{}: {};", k, v))
            .collect::<Vec<_>>()
            .join(" ");
        self.set_attr(node, "style", &style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::fragment::el;

    fn sample() -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let html = doc.append_element(root, "html", &[]);
        let body = doc.append_element(html, "body", &[]);
        let hero = doc.append_element(body, "section", &[("class", "hero"), ("id", "home")]);
        let h1 = doc.append_element(hero, "h1", &[]);
        doc.append_text(h1, "Name");
        let sub = doc.append_element(hero, "p", &[("class", "subtitle")]);
        doc.append_text(sub, "Title");
        let tag = doc.append_element(hero, "p", &[]);
        doc.append_text(tag, "Tagline");
        doc
    }

    #[test]
    fn test_descendant_and_not() {
        let doc = sample();
        let tagline = doc.query(".hero p:not(.subtitle)").unwrap();
        assert_eq!(doc.text(tagline), "Tagline");
        assert!(doc.query(".missing p").is_none());
    }

    #[test]
    fn test_first_child_skips_text_nodes() {
        let mut doc = Document::new();
        let root = doc.root();
        let footer = doc.append_element(root, "footer", &[]);
        doc.append_text(footer, "\n  ");
        let first = doc.append_element(footer, "p", &[]);
        doc.append_element(footer, "p", &[]);
        assert_eq!(doc.query_all("footer p:first-child"), vec![first]);
    }

    #[test]
    fn test_replace_children_detaches_old_nodes() {
        let mut doc = sample();
        let hero = doc.query(".hero").unwrap();
        let old_h1 = doc.query(".hero h1").unwrap();
        doc.replace_children(hero, vec![el("div").class("fresh").text("new")]);
        assert!(doc.query(".hero h1").is_none());
        assert!(!doc.contains(hero, old_h1));
        assert_eq!(doc.text(hero), "new");
    }

    #[test]
    fn test_class_operations() {
        let mut doc = sample();
        let hero = doc.query(".hero").unwrap();
        assert!(doc.toggle_class(hero, "active"));
        assert!(doc.has_class(hero, "active"));
        assert!(doc.has_class(hero, "hero"));
        assert!(!doc.toggle_class(hero, "active"));
        doc.remove_class(hero, "active");
        assert_eq!(doc.attr(hero, "class").as_deref(), Some("hero"));
    }

    #[test]
    fn test_set_style_merges_declarations() {
        let mut doc = sample();
        let body = doc.query("body").unwrap();
        doc.set_attr(body, "style", "opacity: 0; color: red");
        doc.set_style(body, "opacity", "1");
        assert_eq!(doc.attr(body, "style").as_deref(), Some("opacity: 1; color: red;"));
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let doc = sample();
        assert!(doc.query("#").is_none());
    }
}
