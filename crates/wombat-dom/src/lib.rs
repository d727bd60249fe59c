//! Document tree produced by the wombat HTML parser.
//!
//! This crate provides an arena-based tree structure loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), reduced to what the
//! parser core emits: a document node owning a forest of elements, where each
//! element carries its attributes and an accumulated text run.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships. Parent back-references are plain indices into the arena, so
//! upward traversal works without ownership cycles, and popping an element
//! off the parser's insertion stack never detaches it from the tree.

use std::collections::{HashMap, HashSet};

/// Map of attribute names to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "An object that participates in a tree has a parent, which is either null
/// or an object."
///
/// This node stores indices for parent/child/sibling relationships, enabling
/// O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// What this node is: the document sentinel or an element.
    pub data: NodeData,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// Non-owning back-reference; the parent owns its children, never the
    /// other way around.
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

/// Payload of a tree node.
///
/// The document root is a container, not an element: character data and
/// attributes only ever live on [`NodeData::Element`] nodes.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    /// The root sentinel owning the element forest.
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "When an element is created, its local name is always given."
///
/// Character tokens are accumulated into `text` rather than materialized as
/// separate text nodes; that is the shape downstream consumers of this core
/// read.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// The element's local name, lowercased by the tokenizer.
    pub name: String,
    /// "An element has an associated attribute list" - here a first-wins map.
    attrs: AttributesMap,
    /// Accumulated character data appended while this element was the
    /// current insertion parent.
    pub text: String,
    /// Set at creation for `head`/`template`/`script` elements and inherited
    /// by every descendant created under them; renderers skip these
    /// subtrees.
    pub suppress_display: bool,
}

impl ElementData {
    /// Create a new element with no attributes and empty text.
    #[must_use]
    pub fn new(name: String, suppress_display: bool) -> Self {
        Self {
            name,
            attrs: AttributesMap::new(),
            text: String::new(),
            suppress_display,
        }
    }

    /// Record an attribute. The first occurrence of a name wins; later
    /// duplicates are ignored and `false` is returned.
    pub fn set_attribute(&mut self, name: String, value: String) -> bool {
        if self.attrs.contains_key(&name) {
            return false;
        }
        let _ = self.attrs.insert(name, value);
        true
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// All attributes of this element.
    #[must_use]
    pub const fn attributes(&self) -> &AttributesMap {
        &self.attrs
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    /// Returns the set of class names from the class attribute.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The class attribute, if specified, must have a value that is a set of
    /// space-separated tokens."
    #[must_use]
    pub fn classes(&self) -> HashSet<&str> {
        match self.attrs.get("class") {
            Some(classlist) => classlist.split_whitespace().collect(),
            None => HashSet::new(),
        }
    }
}

/// Arena-based document tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree."
///
/// All nodes live in a contiguous vector, addressed by [`NodeId`]. The
/// document node sits at [`NodeId::ROOT`]; the head/form pointers and the
/// doctype name are recorded by the tree constructor during parsing and are
/// non-owning lookups into the arena.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    nodes: Vec<Node>,
    /// Points at the first `head` element inserted, if any.
    head: Option<NodeId>,
    /// Points at the last `form` element opened, if any.
    form: Option<NodeId>,
    /// Name carried by the document's DOCTYPE token, if one was seen.
    doctype_name: Option<String>,
}

impl DomTree {
    /// Create a new tree with just the document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            data: NodeData::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        DomTree {
            nodes: vec![document],
            head: None,
            form: None,
            doctype_name: None,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of nodes in the tree (document node included).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (never true; the document node always
    /// exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before
    /// null."
    ///
    /// Appends `child` as the last child of `parent`, updating all
    /// relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Append a character to an element's accumulated text.
    ///
    /// Returns `false` (and appends nothing) when `id` does not name an
    /// element; the document node never carries character data.
    pub fn append_text(&mut self, id: NodeId, c: char) -> bool {
        match self.get_mut(id) {
            Some(Node {
                data: NodeData::Element(element),
                ..
            }) => {
                element.text.push(c);
                true
            }
            _ => false,
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// "An object A is called a descendant of an object B, if either A is a
    /// child of B or A is a child of an object C that is a descendant of B."
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element(data) => Some(data),
            NodeData::Document => None,
        })
    }

    /// Get mutable element data if this node is an element.
    pub fn as_element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.get_mut(id).and_then(|n| match &mut n.data {
            NodeData::Element(data) => Some(data),
            NodeData::Document => None,
        })
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is
    /// that document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
    ///
    /// The head element pointer recorded during tree construction.
    #[must_use]
    pub const fn head(&self) -> Option<NodeId> {
        self.head
    }

    /// Record the head element pointer. Set once by the tree constructor.
    pub const fn set_head(&mut self, id: NodeId) {
        self.head = Some(id);
    }

    /// [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#form-element-pointer)
    ///
    /// "The form element pointer points to the last form element that was
    /// opened."
    #[must_use]
    pub const fn form(&self) -> Option<NodeId> {
        self.form
    }

    /// Record the form element pointer.
    pub const fn set_form(&mut self, id: NodeId) {
        self.form = Some(id);
    }

    /// Name carried by the document's DOCTYPE, if one was parsed.
    #[must_use]
    pub fn doctype_name(&self) -> Option<&str> {
        self.doctype_name.as_deref()
    }

    /// Record the document's DOCTYPE name.
    pub fn set_doctype_name(&mut self, name: String) {
        self.doctype_name = Some(name);
    }

    /// Pre-order traversal over every element in the tree.
    ///
    /// The iterator is lazy and finite; calling `traverse()` again restarts
    /// from the top. The document node itself is not yielded.
    #[must_use]
    pub fn traverse(&self) -> Traverse<'_> {
        let mut stack: Vec<NodeId> = self.children(NodeId::ROOT).to_vec();
        stack.reverse();
        Traverse { tree: self, stack }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct Ancestors<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}

/// Lazy pre-order iterator over element ids, produced by
/// [`DomTree::traverse`].
pub struct Traverse<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
}

impl Iterator for Traverse<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Children pushed in reverse so the leftmost child is visited first.
        for &child in self.tree.children(id).iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}
