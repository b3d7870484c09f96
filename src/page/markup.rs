//! Reading page markup into a `Document` and writing it back out as HTML.
//!
//! Input must be well-formed (XHTML-style): void elements self-closed and
//! only the XML entities or numeric character references.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::document::{Document, NodeData, NodeId};

/// Elements that never carry an end tag in HTML output.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Elements whose text content is written verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Parse page markup into a fresh document.
pub fn parse(input: &str) -> Result<Document, String> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(false);

    let mut doc = Document::new();
    let mut open: Vec<NodeId> = Vec::new();

    loop {
        let parent = open.last().copied().unwrap_or_else(|| doc.root());
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => {
                let node = doc.append(parent, element_data(e)?);
                open.push(node);
            }
            Ok(Event::End(_)) => {
                open.pop();
            }
            Ok(Event::Empty(ref e)) => {
                doc.append(parent, element_data(e)?);
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| format!("Bad text at {}: {}", reader.buffer_position(), err))?;
                if !text.is_empty() {
                    doc.append(parent, NodeData::Text(text.into_owned()));
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                doc.append(parent, NodeData::Text(text));
            }
            Ok(Event::Comment(ref e)) => {
                let text = String::from_utf8_lossy(e).into_owned();
                doc.append(parent, NodeData::Comment(text));
            }
            Ok(Event::DocType(ref e)) => {
                let text = String::from_utf8_lossy(e).trim().to_string();
                doc.append(parent, NodeData::Doctype(text));
            }
            Ok(Event::Decl(_)) | Ok(Event::PI(_)) => {}
            Err(e) => {
                return Err(format!(
                    "Markup error at {}: {}",
                    reader.buffer_position(),
                    e
                ))
            }
        }
    }

    if let Some(&unclosed) = open.last() {
        return Err(format!(
            "Unclosed <{}> at end of markup",
            doc.tag(unclosed).unwrap_or("?")
        ));
    }
    Ok(doc)
}

fn element_data(e: &BytesStart) -> Result<NodeData, String> {
    let tag = std::str::from_utf8(e.name().as_ref())
        .map_err(|err| format!("Bad tag name: {}", err))?
        .to_lowercase();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| format!("Bad attribute on <{}>: {}", tag, err))?;
        let name = std::str::from_utf8(attr.key.as_ref())
            .map_err(|err| format!("Bad attribute name on <{}>: {}", tag, err))?
            .to_lowercase();
        let value = attr
            .unescape_value()
            .map_err(|err| format!("Bad value for {} on <{}>: {}", name, tag, err))?
            .into_owned();
        attrs.push((name, value));
    }
    Ok(NodeData::Element { tag, attrs })
}

/// Serialize a document as HTML5.
pub fn serialize(doc: &Document) -> String {
    let mut html = String::new();
    let top = doc.children(doc.root());
    let has_doctype = top
        .iter()
        .any(|&id| matches!(doc.node(id).data, NodeData::Doctype(_)));
    if !has_doctype {
        html.push_str("<!DOCTYPE html>\n");
    }
    for &child in top {
        write_node(doc, child, false, &mut html);
    }
    html
}

fn write_node(doc: &Document, id: NodeId, raw_text: bool, html: &mut String) {
    match &doc.node(id).data {
        NodeData::Root => {}
        NodeData::Doctype(d) => {
            html.push_str("<!DOCTYPE ");
            html.push_str(d);
            html.push('>');
        }
        NodeData::Comment(c) => {
            html.push_str("<!--");
            html.push_str(c);
            html.push_str("-->");
        }
        NodeData::Text(t) => {
            if raw_text {
                html.push_str(t);
            } else {
                html.push_str(&html_escape(t));
            }
        }
        NodeData::Element { tag, attrs } => {
            html.push('<');
            html.push_str(tag);
            for (name, value) in attrs {
                html.push_str(&format!(" {}=\"{}\"", name, html_escape(value)));
            }
            html.push('>');
            if VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            let raw = RAW_TEXT_ELEMENTS.contains(&tag.as_str());
            for &child in doc.children(id) {
                write_node(doc, child, raw, html);
            }
            html.push_str("</");
            html.push_str(tag);
            html.push('>');
        }
    }
}
