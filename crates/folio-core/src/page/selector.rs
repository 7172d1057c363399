//! CSS selector subset used by [`MemoryPage`](super::MemoryPage).
//!
//! Supported: type (`a`), id (`#home`), class (`.nav-link`), attribute
//! presence (`[id]`), equality (`[href="#x"]`), prefix (`[href^="#"]`) and
//! the descendant combinator (whitespace). Anything else fails to parse,
//! which the page treats as "no match".

use super::memory::NodeId;

/// Read access to a node tree for matching.
pub(crate) trait Tree {
    fn tag(&self, node: NodeId) -> &str;
    fn attr(&self, node: NodeId, name: &str) -> Option<&str>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
}

#[derive(Debug, Clone, PartialEq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

/// A parsed selector: compounds joined by descendant combinators.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Selector {
    parts: Vec<Compound>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &[char], pos: &mut usize) -> Option<String> {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    if *pos == start {
        None
    } else {
        Some(chars[start..*pos].iter().collect())
    }
}

fn read_value(chars: &[char], pos: &mut usize) -> Option<String> {
    match chars.get(*pos) {
        Some(&quote @ ('"' | '\'')) => {
            *pos += 1;
            let start = *pos;
            while *pos < chars.len() && chars[*pos] != quote {
                *pos += 1;
            }
            if *pos >= chars.len() {
                return None;
            }
            let value = chars[start..*pos].iter().collect();
            *pos += 1;
            Some(value)
        }
        _ => read_ident(chars, pos),
    }
}

fn parse_attr(chars: &[char], pos: &mut usize) -> Option<AttrMatch> {
    let name = read_ident(chars, pos)?;
    let op = match chars.get(*pos)? {
        ']' => AttrOp::Exists,
        '=' => {
            *pos += 1;
            AttrOp::Equals(read_value(chars, pos)?)
        }
        '^' if chars.get(*pos + 1) == Some(&'=') => {
            *pos += 2;
            AttrOp::Prefix(read_value(chars, pos)?)
        }
        _ => return None,
    };
    if chars.get(*pos) != Some(&']') {
        return None;
    }
    *pos += 1;
    Some(AttrMatch { name, op })
}

fn parse_compound(text: &str) -> Option<Compound> {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;
    let mut compound = Compound::default();

    if chars.first() == Some(&'*') {
        pos = 1;
    } else if chars.first().copied().is_some_and(is_ident_char) {
        compound.tag = Some(read_ident(&chars, &mut pos)?.to_ascii_lowercase());
    }

    while pos < chars.len() {
        let c = chars[pos];
        pos += 1;
        match c {
            '#' => {
                if compound.id.is_some() {
                    return None;
                }
                compound.id = Some(read_ident(&chars, &mut pos)?);
            }
            '.' => compound.classes.push(read_ident(&chars, &mut pos)?),
            '[' => compound.attrs.push(parse_attr(&chars, &mut pos)?),
            _ => return None,
        }
    }
    Some(compound)
}

impl Selector {
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let parts = text
            .split_whitespace()
            .map(parse_compound)
            .collect::<Option<Vec<_>>>()?;
        if parts.is_empty() {
            return None;
        }
        Some(Self { parts })
    }

    pub(crate) fn matches(&self, tree: &impl Tree, node: NodeId) -> bool {
        let Some((last, ancestors)) = self.parts.split_last() else {
            return false;
        };
        if !compound_matches(last, tree, node) {
            return false;
        }

        // Right-to-left: each remaining compound must match some ancestor
        // above the previous match.
        let mut current = tree.parent(node);
        for part in ancestors.iter().rev() {
            loop {
                match current {
                    Some(candidate) => {
                        current = tree.parent(candidate);
                        if compound_matches(part, tree, candidate) {
                            break;
                        }
                    }
                    None => return false,
                }
            }
        }
        true
    }
}

fn compound_matches(compound: &Compound, tree: &impl Tree, node: NodeId) -> bool {
    if let Some(tag) = &compound.tag {
        if !tree.tag(node).eq_ignore_ascii_case(tag) {
            return false;
        }
    }
    if let Some(id) = &compound.id {
        if tree.attr(node, "id") != Some(id.as_str()) {
            return false;
        }
    }
    if !compound.classes.is_empty() {
        let classes = tree.attr(node, "class").unwrap_or_default();
        let has_all = compound
            .classes
            .iter()
            .all(|class| classes.split_whitespace().any(|c| c == class));
        if !has_all {
            return false;
        }
    }
    compound.attrs.iter().all(|attr| {
        let value = tree.attr(node, &attr.name);
        match (&attr.op, value) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(expected), Some(v)) => v == expected,
            (AttrOp::Prefix(prefix), Some(v)) => v.starts_with(prefix.as_str()),
        }
    })
}
