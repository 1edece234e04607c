// src/core/dom.rs
//
// Minimal lenient HTML tree for the easySpeak markup dialect.
//
// This is not a general HTML parser. It tokenizes tags into an arena of
// nodes and answers predicate queries (tag / class / attribute) in document
// order, which is all the extraction heuristics need. Markup oddities the
// site is known for (unclosed tags, bare attribute values, stray close
// tags) are absorbed rather than rejected.

use thiserror::Error;

use super::sanitize::{decode_entities, normalize_ws};

pub type NodeId = usize;

#[derive(Debug, Error)]
pub enum DomError {
    /// Input produced no element nodes at all. The only hard failure:
    /// whatever the caller pasted, it was not HTML.
    #[error("no HTML elements found in input")]
    NoElements,
}

#[derive(Debug)]
pub enum NodeKind {
    Element { tag: String, attrs: Vec<(String, String)> },
    Text(String),
}

#[derive(Debug)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

#[derive(Debug)]
pub struct Dom {
    nodes: Vec<Node>,
}

/// Elements that never take children.
fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input"
            | "link" | "meta" | "param" | "source" | "track" | "wbr"
    )
}

impl Dom {
    pub fn parse(html: &str) -> Result<Self, DomError> {
        let mut dom = Dom { nodes: Vec::new() };
        // Synthetic document root; never matched by selectors.
        dom.push_node(
            NodeKind::Element { tag: String::from("#document"), attrs: Vec::new() },
            None,
        );

        let bytes = html.as_bytes();
        let mut stack: Vec<NodeId> = vec![0];
        let mut i = 0usize;

        while i < bytes.len() {
            if bytes[i] != b'<' {
                // Text run up to the next tag. Keep whitespace as-is;
                // text() normalizes, text_raw() wants the newlines.
                let end = html[i..].find('<').map(|o| i + o).unwrap_or(bytes.len());
                let parent = *stack.last().unwrap();
                dom.push_node(NodeKind::Text(decode_entities(&html[i..end])), Some(parent));
                i = end;
                continue;
            }

            let rest = &html[i..];
            if rest.starts_with("<!--") {
                i = rest.find("-->").map(|o| i + o + 3).unwrap_or(bytes.len());
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                // Doctype / processing junk
                i = rest.find('>').map(|o| i + o + 1).unwrap_or(bytes.len());
            } else if rest.starts_with("</") {
                let (raw, end) = match rest.find('>') {
                    Some(o) => (&html[i + 2..i + o], i + o + 1),
                    None => (&html[i + 2..], bytes.len()),
                };
                close_to(&dom, &mut stack, &tag_name(raw));
                i = end;
            } else if rest.len() > 1 && rest.as_bytes()[1].is_ascii_alphabetic() {
                i = dom.parse_open_tag(html, i, &mut stack);
            } else {
                // Stray '<' in text
                let parent = *stack.last().unwrap();
                dom.push_node(NodeKind::Text(String::from("<")), Some(parent));
                i += 1;
            }
        }

        if dom.nodes[0].children.iter().all(|&c| !dom.is_element(c)) {
            return Err(DomError::NoElements);
        }
        Ok(dom)
    }

    /// Parse one open tag starting at `start` (which points at '<').
    /// Returns the index just past the tag, having pushed the element
    /// and adjusted the open-element stack.
    fn parse_open_tag(&mut self, html: &str, start: usize, stack: &mut Vec<NodeId>) -> usize {
        let bytes = html.as_bytes();
        let mut i = start + 1;

        let name_start = i;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'-') {
            i += 1;
        }
        let tag = html[name_start..i].to_ascii_lowercase();

        let mut attrs: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;

        loop {
            while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            if i >= bytes.len() {
                break;
            }
            match bytes[i] {
                b'>' => {
                    i += 1;
                    break;
                }
                b'/' => {
                    self_closing = true;
                    i += 1;
                }
                _ => {
                    let (attr, next) = parse_attr(html, i);
                    if let Some(kv) = attr {
                        attrs.push(kv);
                    }
                    // Guard against zero progress on degenerate input
                    i = next.max(i + 1);
                }
            }
        }

        let parent = *stack.last().unwrap();
        let id = self.push_node(NodeKind::Element { tag: tag.clone(), attrs }, Some(parent));

        if self_closing || is_void(&tag) {
            return i;
        }

        if tag == "script" || tag == "style" {
            // Raw text element: swallow content up to the matching close tag.
            let close = format!("</{}", tag);
            let lower = html[i..].to_ascii_lowercase();
            if let Some(o) = lower.find(&close) {
                let after = i + o;
                return html[after..].find('>').map(|g| after + g + 1).unwrap_or(html.len());
            }
            return html.len();
        }

        stack.push(id);
        i
    }

    fn push_node(&mut self, kind: NodeKind, parent: Option<NodeId>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node { kind, parent, children: Vec::new() });
        if let Some(p) = parent {
            self.nodes[p].children.push(id);
        }
        id
    }

    /* ---------- queries ---------- */

    pub fn root(&self) -> NodeId {
        0
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id].kind, NodeKind::Element { .. })
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    /// True when `class` appears as a token of the element's class attribute.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.attr(id, "class")
            .map(|v| v.split_ascii_whitespace().any(|t| t == class))
            .unwrap_or(false)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// All nodes below `id` in document (pre-order) order, excluding `id`.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut todo: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(n) = todo.pop() {
            out.push(n);
            todo.extend(self.nodes[n].children.iter().rev().copied());
        }
        out
    }

    pub fn find(&self, from: NodeId, sel: &Selector) -> Option<NodeId> {
        self.descendants(from).into_iter().find(|&n| sel.matches(self, n))
    }

    pub fn find_all(&self, from: NodeId, sel: &Selector) -> Vec<NodeId> {
        self.descendants(from)
            .into_iter()
            .filter(|&n| sel.matches(self, n))
            .collect()
    }

    /// Concatenated text content, entity-decoded, original whitespace kept.
    pub fn text_raw(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let NodeKind::Text(t) = &self.nodes[id].kind {
            out.push_str(t);
        }
        for n in self.descendants(id) {
            if let NodeKind::Text(t) = &self.nodes[n].kind {
                out.push_str(t);
            }
        }
        out
    }

    /// Whitespace-normalized text content, the usual form for matching.
    pub fn text(&self, id: NodeId) -> String {
        normalize_ws(&self.text_raw(id))
    }

    /// Direct child text nodes, trimmed, empties dropped.
    pub fn own_texts(&self, id: NodeId) -> Vec<String> {
        self.nodes[id]
            .children
            .iter()
            .filter_map(|&c| match &self.nodes[c].kind {
                NodeKind::Text(t) => {
                    let t = normalize_ws(t);
                    if t.is_empty() { None } else { Some(t) }
                }
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    pub fn next_sibling_element(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings[pos + 1..].iter().copied().find(|&s| self.is_element(s))
    }

    /// Nearest ancestor with the given tag name (the element itself excluded).
    pub fn ancestor_with_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut cur = self.nodes[id].parent;
        while let Some(n) = cur {
            if self.tag(n) == Some(tag) {
                return Some(n);
            }
            cur = self.nodes[n].parent;
        }
        None
    }
}

/// One attribute at `i`; returns the parsed pair (if any) and the next index.
fn parse_attr(html: &str, i: usize) -> (Option<(String, String)>, usize) {
    let bytes = html.as_bytes();
    let mut p = i;

    let name_start = p;
    while p < bytes.len()
        && !bytes[p].is_ascii_whitespace()
        && bytes[p] != b'='
        && bytes[p] != b'>'
        && bytes[p] != b'/'
    {
        p += 1;
    }
    if p == name_start {
        return (None, p + 1);
    }
    let name = html[name_start..p].to_ascii_lowercase();

    while p < bytes.len() && bytes[p].is_ascii_whitespace() {
        p += 1;
    }
    if p >= bytes.len() || bytes[p] != b'=' {
        // Bare boolean attribute
        return (Some((name, String::new())), p);
    }
    p += 1;
    while p < bytes.len() && bytes[p].is_ascii_whitespace() {
        p += 1;
    }
    if p >= bytes.len() {
        return (Some((name, String::new())), p);
    }

    let value = if bytes[p] == b'"' || bytes[p] == b'\'' {
        let quote = bytes[p];
        p += 1;
        let v_start = p;
        while p < bytes.len() && bytes[p] != quote {
            p += 1;
        }
        let v = &html[v_start..p];
        if p < bytes.len() {
            p += 1; // past closing quote
        }
        v
    } else {
        let v_start = p;
        while p < bytes.len() && !bytes[p].is_ascii_whitespace() && bytes[p] != b'>' {
            p += 1;
        }
        &html[v_start..p]
    };

    (Some((name, decode_entities(value))), p)
}

fn tag_name(s: &str) -> String {
    s.trim()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Pop the open-element stack to just below the nearest matching open tag.
/// Unmatched close tags are ignored (the site emits them).
fn close_to(dom: &Dom, stack: &mut Vec<NodeId>, name: &str) {
    if name.is_empty() {
        return;
    }
    if let Some(pos) = stack.iter().rposition(|&id| {
        matches!(&dom.nodes[id].kind, NodeKind::Element { tag, .. } if tag == name)
    }) {
        if pos > 0 {
            stack.truncate(pos);
        }
    }
}

/* ---------- selectors ---------- */

/// Structural predicate over one element: tag name, class token and
/// attribute equality, all optional. The extraction heuristics are just
/// configurations of this one matcher.
#[derive(Debug, Default, Clone)]
pub struct Selector {
    tag: Option<String>,
    class: Option<String>,
    attrs: Vec<(String, String)>,
}

impl Selector {
    pub fn tag(t: &str) -> Self {
        Selector { tag: Some(t.to_ascii_lowercase()), ..Default::default() }
    }

    pub fn any() -> Self {
        Selector::default()
    }

    pub fn class(mut self, c: &str) -> Self {
        self.class = Some(String::from(c));
        self
    }

    pub fn attr(mut self, k: &str, v: &str) -> Self {
        self.attrs.push((k.to_ascii_lowercase(), String::from(v)));
        self
    }

    pub fn matches(&self, dom: &Dom, id: NodeId) -> bool {
        let Some(tag) = dom.tag(id) else { return false };
        if tag == "#document" {
            return false;
        }
        if let Some(want) = &self.tag {
            if tag != want {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !dom.has_class(id, class) {
                return false;
            }
        }
        self.attrs
            .iter()
            .all(|(k, v)| dom.attr(id, k) == Some(v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_text() {
        let dom = Dom::parse(r#"<table><tr><td class="gen">Hi &amp; bye</td></tr></table>"#).unwrap();
        let td = dom.find(dom.root(), &Selector::tag("td")).unwrap();
        assert!(dom.has_class(td, "gen"));
        assert_eq!(dom.text(td), "Hi & bye");
    }

    #[test]
    fn empty_input_is_a_parse_error() {
        assert!(Dom::parse("").is_err());
        assert!(Dom::parse("just some plain text, no markup").is_err());
    }

    #[test]
    fn bare_attribute_values_match() {
        let dom = Dom::parse(r#"<table border=0 cellpadding=1><tr><td>x</td></tr></table>"#).unwrap();
        let sel = Selector::tag("table").attr("border", "0").attr("cellpadding", "1");
        assert!(dom.find(dom.root(), &sel).is_some());
    }

    #[test]
    fn unclosed_tags_do_not_derail_siblings() {
        let dom = Dom::parse("<div><span class=a>one<span class=b>two</div><p>after</p>").unwrap();
        let p = dom.find(dom.root(), &Selector::tag("p")).unwrap();
        assert_eq!(dom.text(p), "after");
    }

    #[test]
    fn class_tokens_not_substrings() {
        let dom = Dom::parse(r#"<span class="gensmall other">x</span><i>y</i>"#).unwrap();
        let root = dom.root();
        assert!(dom.find(root, &Selector::tag("span").class("gensmall")).is_some());
        assert!(dom.find(root, &Selector::tag("span").class("gen")).is_none());
    }

    #[test]
    fn next_sibling_element_skips_text() {
        let dom = Dom::parse("<tr><td>a</td> \n <td>b</td></tr>").unwrap();
        let first = dom.find(dom.root(), &Selector::tag("td")).unwrap();
        let second = dom.next_sibling_element(first).unwrap();
        assert_eq!(dom.text(second), "b");
    }

    #[test]
    fn comments_doctype_and_script_are_skipped() {
        let dom = Dom::parse(
            "<!DOCTYPE html><!-- hello --><html><script>var x = '<td>no</td>';</script><b>8:15</b></html>",
        )
        .unwrap();
        assert!(dom.find(dom.root(), &Selector::tag("td")).is_none());
        let b = dom.find(dom.root(), &Selector::tag("b")).unwrap();
        assert_eq!(dom.text(b), "8:15");
    }

    #[test]
    fn text_raw_keeps_newlines() {
        let dom = Dom::parse("<td class=gensmall>Alice,\nBob</td>").unwrap();
        let td = dom.find(dom.root(), &Selector::tag("td")).unwrap();
        assert!(dom.text_raw(td).contains('\n'));
        assert_eq!(dom.text(td), "Alice, Bob");
    }
}
