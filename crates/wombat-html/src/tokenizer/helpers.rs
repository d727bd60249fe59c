//! Helper methods for the HTML tokenizer.
//!
//! [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
//!
//! This module contains utility methods used throughout the state handlers:
//! - State transitions ("Switch to", "Reconsume in")
//! - Token emission ("Emit the current token") and raw-text state feedback
//! - The shared fallback for the RCDATA/RAWTEXT/script-data end tag states
//! - Attribute helpers for duplicate suppression
//! - Parse error recording

use wombat_common::warning::warn_once;

use super::core::{Tokenizer, TokenizerState};
use super::token::Token;
use crate::error::ParseError;

// =============================================================================
// State Transition Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character is consumed on the
    /// driver's next call to [`Tokenizer::step`].
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// Sets the reconsume flag; the driver must replay the same character
    /// (see [`Tokenizer::take_reconsume`]).
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }

    /// [§ 12.1.4 ASCII whitespace](https://infra.spec.whatwg.org/#ascii-whitespace)
    ///
    /// "U+0009 TAB, U+000A LF, U+000C FF, or U+0020 SPACE." CR is assumed
    /// normalized away before the tokenizer sees it.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// True while the accumulated buffer could still grow into `--` or an
    /// ASCII case-insensitive match for `doctype`.
    pub(super) fn is_keyword_prefix(buffer: &str) -> bool {
        "--".starts_with(buffer)
            || "doctype".len() >= buffer.len()
                && buffer.eq_ignore_ascii_case(&"doctype"[..buffer.len()])
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    ///
    /// "Emit the current token" - moves the current token to the pending
    /// queue for the driver to drain.
    ///
    /// Start tags additionally update the last-start-tag slot and drive the
    /// raw-content state feedback: the tree constructor runs strictly after
    /// each step, so the tokenizer switches itself when it emits a start tag
    /// for an element whose content is not further tokenized.
    pub(super) fn emit_current_token(&mut self) {
        if let Some(token) = self.current_token.take() {
            if let Token::StartTag {
                ref name,
                self_closing,
                ..
            } = token
            {
                self.last_start_tag_name = Some(name.clone());

                // A self-closing raw-content tag has no content to switch for.
                if !self_closing {
                    match name.as_str() {
                        // [§ 13.2.6.2 Generic RCDATA element parsing algorithm](https://html.spec.whatwg.org/multipage/parsing.html#generic-rcdata-element-parsing-algorithm)
                        // "Switch the tokenizer to the RCDATA state."
                        "title" | "textarea" => {
                            self.switch_to(TokenizerState::RCDATA);
                        }
                        // [§ 13.2.6.3 Generic raw text element parsing algorithm](https://html.spec.whatwg.org/multipage/parsing.html#generic-raw-text-element-parsing-algorithm)
                        // "Switch the tokenizer to the RAWTEXT state."
                        "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                            self.switch_to(TokenizerState::RAWTEXT);
                        }
                        // [§ 13.2.6.4.4 The "in head" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inhead)
                        // "Switch the tokenizer to the script data state."
                        "script" => {
                            self.switch_to(TokenizerState::ScriptData);
                        }
                        // [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
                        // "A start tag whose tag name is 'plaintext' ...
                        // Switch the tokenizer to the PLAINTEXT state."
                        "plaintext" => {
                            self.switch_to(TokenizerState::PLAINTEXT);
                        }
                        _ => {}
                    }
                }
            }
            self.pending.push_back(token);
        }
    }

    /// "Emit the current input character as a character token."
    pub(super) fn emit_character_token(&mut self, c: char) {
        self.pending.push_back(Token::new_character(c));
    }

    /// "Emit an end-of-file token."
    ///
    /// Also latches the at-eof flag; any further step is a contract
    /// violation.
    pub(super) fn emit_eof_token(&mut self) {
        self.at_eof = true;
        self.pending.push_back(Token::new_eof());
    }
}

// =============================================================================
// RCDATA/RAWTEXT/Script Data Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#appropriate-end-tag-token)
    ///
    /// "An appropriate end tag token is an end tag token whose tag name
    /// matches the tag name of the last start tag to have been emitted from
    /// this tokenizer, if any."
    ///
    /// Decides whether `</title>` closes the current `<title>` element or is
    /// literal text.
    pub(super) fn is_appropriate_end_tag_token(&self) -> bool {
        if let (Some(last_start_tag), Some(Token::EndTag { name, .. })) =
            (&self.last_start_tag_name, &self.current_token)
        {
            return name == last_start_tag;
        }
        false
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    /// (and the identical RAWTEXT/script data variants)
    ///
    /// "Anything else - Emit a U+003C LESS-THAN SIGN character token, a
    /// U+002F SOLIDUS character token, and a character token for each of the
    /// characters in the temporary buffer (in the order they were added to
    /// the buffer). Reconsume in the <fallback> state."
    ///
    /// The candidate end tag token is discarded; its characters were literal
    /// text after all.
    pub(super) fn emit_raw_end_tag_fallback(&mut self, fallback: TokenizerState) {
        self.emit_character_token('<');
        self.emit_character_token('/');
        let buffer = std::mem::take(&mut self.temporary_buffer);
        for c in buffer.chars() {
            self.emit_character_token(c);
        }
        self.current_token = None;
        self.reconsume_in(fallback);
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    ///
    /// "Start a new attribute in the current tag token. Set that attribute
    /// name and value to the empty string."
    ///
    /// Also clears the dropped-attribute flag from any earlier duplicate.
    pub(super) fn start_new_attribute(&mut self) {
        self.current_attribute_dropped = false;
        if let Some(ref mut token) = self.current_token {
            token.start_new_attribute();
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    ///
    /// "When the user agent leaves the attribute name state... if there is
    /// already an attribute on the token with the exact same name, then this
    /// is a duplicate-attribute parse error and the new attribute must be
    /// removed from the token."
    ///
    /// First occurrence wins. The removed attribute's value is still parsed
    /// by the value states; the dropped flag makes those appends no-ops so
    /// the discarded value cannot bleed into the surviving attribute.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(Token::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.parse_error("duplicate attribute");
            if let Some(ref mut token) = self.current_token {
                token.remove_current_attribute();
            }
            self.current_attribute_dropped = true;
        }
    }

    /// "Append the current input character to the current attribute's
    /// value" - unless the current attribute was removed as a duplicate, in
    /// which case the character is consumed and discarded.
    pub(super) fn append_to_attribute_value(&mut self, c: char) {
        if self.current_attribute_dropped {
            return;
        }
        if let Some(ref mut token) = self.current_token {
            token.append_to_current_attribute_value(c);
        }
    }
}

// =============================================================================
// Error Handling
// =============================================================================

impl Tokenizer {
    /// [§ 13.2.2 Parse errors](https://html.spec.whatwg.org/multipage/parsing.html#parse-errors)
    ///
    /// Records a recoverable parse error at the current input position and
    /// surfaces it once on stderr. Parse errors never alter control flow;
    /// every handler continues via its documented recovery transition.
    pub(super) fn parse_error(&mut self, message: &str) {
        let error = ParseError::new(self.position, message);
        warn_once("HTML Tokenizer", &error.to_string());
        self.errors.push(error);
    }
}
