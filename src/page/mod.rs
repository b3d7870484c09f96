pub mod document;
pub mod fragment;
pub mod markup;
pub mod selector;

pub use document::{Document, NodeId};
pub use fragment::Fragment;

/// The only window the engine has onto the page.
///
/// The projector, theme controller and navigation wiring query regions by
/// selector and write through these calls; nothing else about the host is
/// assumed. `Document` is the headless implementation.
pub trait PageSurface {
    // ── Queries ─────────────────────────────────────────────────────
    fn query_all(&self, selector: &str) -> Vec<NodeId>;
    fn query(&self, selector: &str) -> Option<NodeId> {
        self.query_all(selector).into_iter().next()
    }
    /// The root element (`<html>`).
    fn document_element(&self) -> Option<NodeId>;
    fn attr(&self, node: NodeId, name: &str) -> Option<String>;
    fn text(&self, node: NodeId) -> String;
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;
    /// Layout offset from the document top; `None` until the host has measured it.
    fn offset_top(&self, node: NodeId) -> Option<f64>;

    // ── Writes ──────────────────────────────────────────────────────
    fn set_attr(&mut self, node: NodeId, name: &str, value: &str);
    fn set_text(&mut self, node: NodeId, text: &str);
    /// Discard the node's content and build `content` in its place.
    fn replace_children(&mut self, node: NodeId, content: Vec<Fragment>);
    fn add_class(&mut self, node: NodeId, class: &str);
    fn remove_class(&mut self, node: NodeId, class: &str);
    /// Flip membership; returns whether the class is now present.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }
    fn set_title(&mut self, title: &str);
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
}
