//! Structured markup construction.
//!
//! Regenerated regions are built as `Fragment` trees instead of HTML strings,
//! so configuration text is always carried as data and escaped when the page
//! is serialized.

#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
        children: Vec<Fragment>,
    },
    Text(String),
}

/// Start an element fragment.
pub fn el(tag: &str) -> Fragment {
    Fragment::Element {
        tag: tag.to_string(),
        attrs: Vec::new(),
        children: Vec::new(),
    }
}

/// A text fragment. Escaped on output.
pub fn text(s: &str) -> Fragment {
    Fragment::Text(s.to_string())
}

impl Fragment {
    /// Set an attribute, replacing an earlier value of the same name.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        if let Fragment::Element { attrs, .. } = &mut self {
            match attrs.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value.to_string(),
                None => attrs.push((name.to_string(), value.to_string())),
            }
        }
        self
    }

    /// Set an attribute only when a value is given.
    pub fn attr_opt(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    pub fn class(self, class: &str) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: Fragment) -> Self {
        if let Fragment::Element { children, .. } = &mut self {
            children.push(child);
        }
        self
    }

    pub fn children<I: IntoIterator<Item = Fragment>>(mut self, iter: I) -> Self {
        if let Fragment::Element { children, .. } = &mut self {
            children.extend(iter);
        }
        self
    }

    pub fn text(self, s: &str) -> Self {
        self.child(text(s))
    }

    /// Attribute lookup.
    #[cfg(test)]
    pub(crate) fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Fragment::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            Fragment::Text(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_replaces_existing() {
        let f = el("a").attr("href", "#one").attr("href", "#two");
        assert_eq!(f.get_attr("href"), Some("#two"));
    }

    #[test]
    fn test_attr_opt_skips_none() {
        let f = el("a").attr_opt("target", None).attr_opt("title", Some("GitHub"));
        assert_eq!(f.get_attr("target"), None);
        assert_eq!(f.get_attr("title"), Some("GitHub"));
    }

    #[test]
    fn test_children_keep_order() {
        let f = el("ul").children(["a", "b", "c"].iter().map(|s| el("li").text(s)));
        match f {
            Fragment::Element { children, .. } => {
                assert_eq!(children.len(), 3);
                assert_eq!(children[2], el("li").text("c"));
            }
            Fragment::Text(_) => panic!("expected element"),
        }
    }
}
