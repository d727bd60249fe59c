use strum_macros::Display;

use wombat_common::warning::warn_once;
use wombat_dom::{DomTree, ElementData, NodeData, NodeId};

use crate::error::{ContractViolation, ParseError, Position};
use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
///
/// "The insertion mode is a state variable that controls the primary
/// operation of the tree construction stage."
///
/// The full vocabulary is declared so that mode-specific rules are a
/// compile-visible extension point: the dispatcher in
/// [`TreeBuilder::process_token`] matches exhaustively, and today every arm
/// routes to the shared default path. The mode variable itself advances on
/// document-structure milestones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InsertionMode {
    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    Initial,
    /// [§ 13.2.6.4.2 The "before html" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-html-insertion-mode)
    BeforeHtml,
    /// [§ 13.2.6.4.3 The "before head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-before-head-insertion-mode)
    BeforeHead,
    /// [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
    InHead,
    /// [§ 13.2.6.4.6 The "after head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-head-insertion-mode)
    AfterHead,
    /// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    InBody,
    /// [§ 13.2.6.4.8 The "text" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-incdata)
    Text,
    /// [§ 13.2.6.4.19 The "after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-afterbody)
    AfterBody,
    /// [§ 13.2.6.4.22 The "after after body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-after-after-body-insertion-mode)
    AfterAfterBody,
}

/// [§ 13.1.2 Elements - void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// "Void elements only have a start tag; end tags must not be specified for
/// void elements." These are attached but never pushed onto the stack of
/// open elements, so they can never acquire children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "menuitem", "meta",
    "param", "source", "template", "track", "wbr",
];

// Elements whose subtrees carry no visible content. The flag is set at
// creation and inherited by every descendant.
const SUPPRESS_DISPLAY_ELEMENTS: &[&str] = &["head", "template", "script"];

/// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
///
/// Token-at-a-time tree constructor. Fed by the driver after every tokenizer
/// step; builds an arena [`DomTree`] with an open-element stack of
/// [`NodeId`]s.
pub struct TreeBuilder {
    /// [§ 13.2.4.1 The insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-insertion-mode)
    insertion_mode: InsertionMode,

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena. Popping only removes an element from
    /// this stack; the element stays attached to the tree.
    open_elements: Vec<NodeId>,

    /// The document tree under construction. `NodeId::ROOT` is the Document
    /// node.
    tree: DomTree,

    /// Parse errors recorded while constructing, drained by the driver.
    errors: Vec<ParseError>,

    /// Latched once an end-of-file token is accepted; any further token is a
    /// contract violation.
    done: bool,
}

impl TreeBuilder {
    /// Create a new tree builder over an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            insertion_mode: InsertionMode::Initial,
            open_elements: Vec::new(),
            tree: DomTree::new(),
            errors: Vec::new(),
            done: false,
        }
    }

    /// The current insertion mode.
    #[must_use]
    pub const fn insertion_mode(&self) -> InsertionMode {
        self.insertion_mode
    }

    /// True once an end-of-file token has been accepted.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Take the recoverable parse errors recorded since the last drain.
    pub fn drain_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// Finish construction and hand the tree to the caller.
    ///
    /// Valid at any point; a partially-built tree is a valid value (remaining
    /// open elements simply stay attached where they were inserted).
    #[must_use]
    pub fn into_tree(self) -> DomTree {
        self.tree
    }

    /// Read-only view of the tree under construction.
    #[must_use]
    pub const fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction-dispatcher)
    ///
    /// Process one token at the given input position.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::TokenAfterEndOfFile`] when fed another token
    /// after an end-of-file token was accepted. That is a driver bug;
    /// malformed markup never produces an `Err` here.
    pub fn process_token(
        &mut self,
        token: &Token,
        position: Position,
    ) -> Result<(), ContractViolation> {
        if self.done {
            return Err(ContractViolation::TokenAfterEndOfFile);
        }

        // Exhaustive on purpose: a mode with its own rules becomes a new arm
        // here instead of a silently shared branch.
        match self.insertion_mode {
            InsertionMode::Initial
            | InsertionMode::BeforeHtml
            | InsertionMode::BeforeHead
            | InsertionMode::InHead
            | InsertionMode::AfterHead
            | InsertionMode::InBody
            | InsertionMode::Text
            | InsertionMode::AfterBody
            | InsertionMode::AfterAfterBody => self.handle_default(token, position),
        }
        Ok(())
    }

    /// Shared token handling used by every insertion mode.
    fn handle_default(&mut self, token: &Token, position: Position) {
        match token {
            Token::Doctype { name, .. } => self.handle_doctype(name.as_deref()),
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                self.handle_start_tag(name, *self_closing, attributes);
            }
            Token::EndTag { name, .. } => self.handle_end_tag(name, position),
            Token::Character { data } => self.handle_character(*data, position),
            // The reduced element model carries no comment nodes; the token
            // is consumed without mutating the tree.
            Token::Comment { .. } => {}
            Token::EndOfFile => {
                self.done = true;
            }
        }
    }

    /// [§ 13.2.6.4.1 The "initial" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#the-initial-insertion-mode)
    ///
    /// The doctype name is recorded on the document; the force-quirks flag
    /// lives on the token only.
    fn handle_doctype(&mut self, name: Option<&str>) {
        if let Some(n) = name {
            self.tree.set_doctype_name(n.to_string());
        }
        if self.insertion_mode == InsertionMode::Initial {
            self.insertion_mode = InsertionMode::BeforeHtml;
        }
    }

    /// [§ 13.2.6.1 Insert an HTML element](https://html.spec.whatwg.org/multipage/parsing.html#insert-an-html-element)
    fn handle_start_tag(&mut self, name: &str, self_closing: bool, attributes: &[Attribute]) {
        // Display suppression is inherited from the insertion parent.
        let parent_suppressed = self
            .current_node()
            .and_then(|id| self.tree.as_element(id))
            .is_some_and(|e| e.suppress_display);
        let suppress = parent_suppressed || SUPPRESS_DISPLAY_ELEMENTS.contains(&name);

        let mut element = ElementData::new(name.to_string(), suppress);
        for attr in attributes {
            // First occurrence wins; the tokenizer already suppressed exact
            // duplicates, this guards the map itself.
            let _ = element.set_attribute(attr.name.clone(), attr.value.clone());
        }

        let parent = self.current_node().unwrap_or(NodeId::ROOT);
        let id = self.tree.alloc(NodeData::Element(element));
        self.tree.append_child(parent, id);

        // [§ 13.2.4.4 The element pointers](https://html.spec.whatwg.org/multipage/parsing.html#the-element-pointers)
        match name {
            "head" if self.tree.head().is_none() => self.tree.set_head(id),
            "form" => self.tree.set_form(id),
            _ => {}
        }

        // Void elements and self-closing tags never join the stack of open
        // elements, so they can never receive children.
        if !self_closing && !VOID_ELEMENTS.contains(&name) {
            self.open_elements.push(id);
        }

        self.advance_mode_on_start_tag(name);
    }

    /// [§ 13.2.6.4.7 "in body" - Any other end tag](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
    ///
    /// Search the stack of open elements top-down for a matching name; pop
    /// everything above and including it. With no match, the end tag is a
    /// parse error and is ignored - nothing is popped.
    fn handle_end_tag(&mut self, name: &str, position: Position) {
        let matched = self
            .open_elements
            .iter()
            .rposition(|&id| self.tag_name(id) == Some(name));

        match matched {
            Some(index) => {
                self.open_elements.truncate(index);
            }
            None => {
                self.parse_error(position, &format!("unmatched end tag </{name}>"));
                return;
            }
        }

        self.advance_mode_on_end_tag(name);
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// Characters append to the text accumulator of the current node.
    /// Characters arriving with an empty stack have no element to attach to
    /// and are dropped; non-whitespace drops are reported.
    fn handle_character(&mut self, c: char, position: Position) {
        match self.current_node() {
            Some(id) => {
                let _ = self.tree.append_text(id, c);
            }
            None => {
                if !c.is_ascii_whitespace() {
                    self.parse_error(position, "character data outside any element");
                }
            }
        }
    }

    /// [§ 13.2.4.3 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#current-node)
    ///
    /// "The current node is the bottommost node in this stack of open
    /// elements."
    fn current_node(&self) -> Option<NodeId> {
        self.open_elements.last().copied()
    }

    fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|data| data.name.as_str())
    }

    /// Advance the insertion-mode state variable on document-structure
    /// milestones. Observational only: token handling is shared across
    /// modes, but the variable keeps the construction stage inspectable.
    fn advance_mode_on_start_tag(&mut self, name: &str) {
        match (self.insertion_mode, name) {
            (InsertionMode::Initial | InsertionMode::BeforeHtml, "html") => {
                self.insertion_mode = InsertionMode::BeforeHead;
            }
            (
                InsertionMode::Initial | InsertionMode::BeforeHtml | InsertionMode::BeforeHead,
                "head",
            ) => {
                self.insertion_mode = InsertionMode::InHead;
            }
            (_, "body") => {
                self.insertion_mode = InsertionMode::InBody;
            }
            _ => {}
        }
    }

    fn advance_mode_on_end_tag(&mut self, name: &str) {
        match name {
            "head" if self.insertion_mode == InsertionMode::InHead => {
                self.insertion_mode = InsertionMode::AfterHead;
            }
            "body" if self.insertion_mode == InsertionMode::InBody => {
                self.insertion_mode = InsertionMode::AfterBody;
            }
            "html" if self.insertion_mode == InsertionMode::AfterBody => {
                self.insertion_mode = InsertionMode::AfterAfterBody;
            }
            _ => {}
        }
    }

    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a recoverable parse error; construction always continues.
    fn parse_error(&mut self, position: Position, message: &str) {
        let error = ParseError::new(position, message);
        warn_once("HTML Parser", &error.to_string());
        self.errors.push(error);
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Print the tree to stdout with indentation showing structure.
///
/// Elements suppressed for display are printed with a `[hidden]` marker so
/// the dump still shows the whole document.
pub fn print_tree(tree: &DomTree) {
    print_node(tree, NodeId::ROOT, 0);
}

fn print_node(tree: &DomTree, id: NodeId, depth: usize) {
    let indent = "  ".repeat(depth);
    match tree.as_element(id) {
        Some(element) => {
            let hidden = if element.suppress_display {
                " [hidden]"
            } else {
                ""
            };
            println!("{indent}<{}>{hidden}", element.name);
            if !element.text.is_empty() {
                println!("{indent}  {:?}", element.text);
            }
        }
        None => println!("{indent}#document"),
    }
    for &child in tree.children(id) {
        print_node(tree, child, depth + 1);
    }
}
