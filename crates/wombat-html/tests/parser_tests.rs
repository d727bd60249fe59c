//! Integration tests for the tree constructor and the parse driver.

use wombat_dom::{DomTree, NodeId};
use wombat_html::{parse, InsertionMode, ParseOutcome, Position, Token, TreeBuilder};

/// Parse and unwrap; the whole-string entry point never hits a contract
/// violation.
fn parse_ok(input: &str) -> ParseOutcome {
    parse(input).unwrap()
}

/// Find the first element with the given name, in tree order.
fn find(tree: &DomTree, name: &str) -> Option<NodeId> {
    tree.traverse()
        .find(|&id| tree.as_element(id).is_some_and(|e| e.name == name))
}

fn element_text<'a>(tree: &'a DomTree, id: NodeId) -> &'a str {
    &tree.as_element(id).unwrap().text
}

#[test]
fn test_single_element_with_text() {
    let outcome = parse_ok("<div>hello</div>");
    let div = find(&outcome.tree, "div").unwrap();
    assert_eq!(element_text(&outcome.tree, div), "hello");
    assert_eq!(outcome.tree.parent(div), Some(NodeId::ROOT));
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_nested_elements() {
    let outcome = parse_ok("<div><span>inner</span></div>");
    let div = find(&outcome.tree, "div").unwrap();
    let span = find(&outcome.tree, "span").unwrap();
    assert_eq!(outcome.tree.parent(span), Some(div));
    assert_eq!(element_text(&outcome.tree, span), "inner");
    assert_eq!(element_text(&outcome.tree, div), "");
}

#[test]
fn test_void_element_never_gets_children() {
    // `<br>` has no end tag; following text belongs to the parent, and the
    // br element stays childless.
    let outcome = parse_ok("<div>hello<br>world</div>");
    let tree = &outcome.tree;
    let div = find(tree, "div").unwrap();
    let br = find(tree, "br").unwrap();
    assert_eq!(tree.parent(br), Some(div));
    assert!(tree.children(br).is_empty());
    assert_eq!(element_text(tree, br), "");
    assert_eq!(element_text(tree, div), "helloworld");
}

#[test]
fn test_self_closing_tag_not_pushed() {
    let outcome = parse_ok("<div><img src=\"x.png\"/>after</div>");
    let tree = &outcome.tree;
    let div = find(tree, "div").unwrap();
    let img = find(tree, "img").unwrap();
    assert_eq!(tree.parent(img), Some(div));
    assert_eq!(element_text(tree, div), "after");
}

#[test]
fn test_attributes_reach_the_element() {
    let outcome = parse_ok(r#"<a href="/x" class="one two">go</a>"#);
    let tree = &outcome.tree;
    let a = find(tree, "a").unwrap();
    let element = tree.as_element(a).unwrap();
    assert_eq!(element.attribute("href"), Some("/x"));
    assert!(element.classes().contains("two"));
    assert_eq!(element.attribute("missing"), None);
}

#[test]
fn test_end_tag_pops_through_unclosed_children() {
    // `</ul>` closes everything above the matching element on the stack;
    // the popped elements stay attached to the tree.
    let outcome = parse_ok("<ul><li>a<li2>b</ul><p>after</p>");
    let tree = &outcome.tree;
    let ul = find(tree, "ul").unwrap();
    let li = find(tree, "li").unwrap();
    let p = find(tree, "p").unwrap();
    assert_eq!(tree.parent(li), Some(ul));
    // After </ul> the stack is back at document level.
    assert_eq!(tree.parent(p), Some(NodeId::ROOT));
    assert_eq!(element_text(tree, p), "after");
}

#[test]
fn test_unmatched_end_tag_is_ignored() {
    let outcome = parse_ok("<div>a</span>b</div>");
    let tree = &outcome.tree;
    let div = find(tree, "div").unwrap();
    // `</span>` matched nothing: error recorded, nothing popped, text
    // continues into the same element.
    assert_eq!(element_text(tree, div), "ab");
    assert_eq!(outcome.errors.len(), 1);
    assert!(outcome.errors[0].message.contains("span"));
}

#[test]
fn test_doctype_name_recorded_on_document() {
    let outcome = parse_ok("<!DOCTYPE html><html></html>");
    assert_eq!(outcome.tree.doctype_name(), Some("html"));
}

#[test]
fn test_comments_produce_no_nodes() {
    let outcome = parse_ok("<div><!-- note -->x</div>");
    let tree = &outcome.tree;
    let div = find(tree, "div").unwrap();
    assert!(tree.children(div).is_empty());
    assert_eq!(element_text(tree, div), "x");
}

#[test]
fn test_head_pointer_and_suppressed_subtree() {
    let outcome = parse_ok("<html><head><title>t</title></head><body><p>x</p></body></html>");
    let tree = &outcome.tree;

    let head = tree.head().expect("head pointer recorded");
    assert_eq!(tree.as_element(head).unwrap().name, "head");
    assert!(tree.as_element(head).unwrap().suppress_display);

    // Suppression is inherited by descendants created under head.
    let title = find(tree, "title").unwrap();
    assert_eq!(tree.parent(title), Some(head));
    assert!(tree.as_element(title).unwrap().suppress_display);
    assert_eq!(element_text(tree, title), "t");

    // ...but not by siblings outside it.
    let p = find(tree, "p").unwrap();
    assert!(!tree.as_element(p).unwrap().suppress_display);
}

#[test]
fn test_script_subtree_suppressed() {
    let outcome = parse_ok("<body><script>var x = 1;</script><p>y</p></body>");
    let tree = &outcome.tree;
    let script = find(tree, "script").unwrap();
    assert!(tree.as_element(script).unwrap().suppress_display);
    assert_eq!(element_text(tree, script), "var x = 1;");
    let p = find(tree, "p").unwrap();
    assert!(!tree.as_element(p).unwrap().suppress_display);
}

#[test]
fn test_form_pointer_recorded() {
    let outcome = parse_ok(r#"<form id="f"><input name="q"></form>"#);
    let tree = &outcome.tree;
    let form = tree.form().expect("form pointer recorded");
    assert_eq!(tree.as_element(form).unwrap().id(), Some("f"));
    let input = find(tree, "input").unwrap();
    assert_eq!(tree.parent(input), Some(form));
}

#[test]
fn test_template_is_void_and_suppressed() {
    // template never joins the open stack, so its "content" lands in the
    // surrounding element and the stray end tag reports an error.
    let outcome = parse_ok("<body><template><p>x</p></template></body>");
    let tree = &outcome.tree;
    let template = find(tree, "template").unwrap();
    assert!(tree.as_element(template).unwrap().suppress_display);
    assert!(tree.children(template).is_empty());
    let body = find(tree, "body").unwrap();
    let p = find(tree, "p").unwrap();
    assert_eq!(tree.parent(p), Some(body));
    assert!(
        outcome
            .errors
            .iter()
            .any(|e| e.message.contains("template"))
    );
}

#[test]
fn test_text_outside_any_element() {
    let outcome = parse_ok("stray<div>ok</div>");
    let tree = &outcome.tree;
    let div = find(tree, "div").unwrap();
    assert_eq!(element_text(tree, div), "ok");
    // The stray characters had no element to attach to.
    assert!(
        outcome
            .errors
            .iter()
            .any(|e| e.message.contains("outside any element"))
    );
}

#[test]
fn test_leading_whitespace_is_silently_dropped() {
    let outcome = parse_ok("\n  <html></html>");
    assert!(outcome.errors.is_empty());
}

#[test]
fn test_traverse_preorder_and_restartable() {
    let outcome =
        parse_ok("<html><head></head><body><div><p>a</p></div><span>b</span></body></html>");
    let tree = &outcome.tree;

    let names: Vec<&str> = tree
        .traverse()
        .filter_map(|id| tree.as_element(id).map(|e| e.name.as_str()))
        .collect();
    assert_eq!(names, ["html", "head", "body", "div", "p", "span"]);

    // Calling traverse() again restarts from the top.
    let second: Vec<&str> = tree
        .traverse()
        .filter_map(|id| tree.as_element(id).map(|e| e.name.as_str()))
        .collect();
    assert_eq!(names, second);
}

#[test]
fn test_rcdata_fallback_end_to_end() {
    // The mismatched `</titlex>` stays inside the title's text; only the
    // real `</title>` leaves RCDATA and closes the element.
    let outcome = parse_ok("<head><title>abc</titlex></title></head>");
    let tree = &outcome.tree;
    let title = find(tree, "title").unwrap();
    assert_eq!(element_text(tree, title), "abc</titlex>");
    let head = find(tree, "head").unwrap();
    assert_eq!(tree.parent(title), Some(head));
}

#[test]
fn test_errors_accumulate_in_input_order() {
    let outcome = parse_ok("<div></span></em></div>");
    let messages: Vec<&str> = outcome
        .errors
        .iter()
        .map(|e| e.message.as_str())
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("span"));
    assert!(messages[1].contains("em"));
}

#[test]
fn test_insertion_mode_advances_on_milestones() {
    let mut builder = TreeBuilder::new();
    let position = Position::default();
    assert_eq!(builder.insertion_mode(), InsertionMode::Initial);

    builder
        .process_token(
            &Token::Doctype {
                name: Some("html".to_string()),
                force_quirks: false,
            },
            position,
        )
        .unwrap();
    assert_eq!(builder.insertion_mode(), InsertionMode::BeforeHtml);

    let html = Token::StartTag {
        name: "html".to_string(),
        self_closing: false,
        attributes: Vec::new(),
    };
    builder.process_token(&html, position).unwrap();
    assert_eq!(builder.insertion_mode(), InsertionMode::BeforeHead);

    let body = Token::StartTag {
        name: "body".to_string(),
        self_closing: false,
        attributes: Vec::new(),
    };
    builder.process_token(&body, position).unwrap();
    assert_eq!(builder.insertion_mode(), InsertionMode::InBody);
}

#[test]
fn test_token_after_eof_is_contract_violation() {
    let mut builder = TreeBuilder::new();
    let position = Position::default();
    builder
        .process_token(&Token::EndOfFile, position)
        .unwrap();
    assert!(builder.is_done());
    let result = builder.process_token(&Token::Character { data: 'x' }, position);
    assert!(result.is_err());
}

#[test]
fn test_partial_tree_is_valid_without_eof() {
    // Stopping the driver mid-parse leaves a usable tree.
    let mut run = wombat_html::ParserRun::new();
    run.feed_str("<div><p>half").unwrap();
    let outcome = run.finish().unwrap();
    let div = find(&outcome.tree, "div").unwrap();
    let p = find(&outcome.tree, "p").unwrap();
    assert_eq!(outcome.tree.parent(p), Some(div));
    assert_eq!(element_text(&outcome.tree, p), "half");
}
