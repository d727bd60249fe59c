use std::collections::VecDeque;

use strum_macros::Display;

use super::token::Token;
use crate::error::{ContractViolation, ParseError, Position};

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// The tokenizer state machine. Each state corresponds to a section in
/// § 13.2.5. States are data, not control flow: the dispatcher in
/// [`Tokenizer::step`] matches exhaustively, so an unimplemented state is a
/// compile error rather than a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    Data,
    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    RCDATA,
    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    RAWTEXT,
    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    ScriptData,
    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    PLAINTEXT,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    RCDATALessThanSign,
    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    RCDATAEndTagOpen,
    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    RCDATAEndTagName,
    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    RAWTEXTLessThanSign,
    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    RAWTEXTEndTagOpen,
    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    RAWTEXTEndTagName,
    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    ScriptDataLessThanSign,
    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    ScriptDataEndTagOpen,
    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    ScriptDataEndTagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    BogusComment,
    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// Redesigned for per-character stepping: instead of whole-input
    /// lookahead, the candidate keyword is accumulated in the temporary
    /// buffer and prefix-matched incrementally.
    MarkupDeclarationOpen,
    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    CommentStart,
    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    CommentStartDash,
    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    Comment,
    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    CommentEndDash,
    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    CommentEnd,
    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    DOCTYPE,
    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    BeforeDOCTYPEName,
    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    DOCTYPEName,
    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    ///
    /// Also stands in for the public/system identifier states, which this
    /// core does not model: everything between the doctype name and `>` is
    /// consumed without being recorded.
    BogusDOCTYPE,
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Simplified: no entity table. The ampersand is swallowed and the next
    /// character is reconsumed in the return state.
    CharacterReference,
}

/// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
///
/// "Implementations must act as if they used the following state machine to
/// tokenize HTML."
///
/// Unlike a pull tokenizer that owns its input, this machine is fed one
/// character at a time through [`Tokenizer::step`] (with `None` as the
/// end-of-input sentinel). Emitted tokens accumulate in a pending queue the
/// driver drains after every step, so the tree constructor sees every token
/// for character N before character N+1 is consumed.
pub struct Tokenizer {
    pub(super) state: TokenizerState,
    pub(super) return_state: Option<TokenizerState>,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<Token>,
    pub(super) at_eof: bool,
    pub(super) pending: VecDeque<Token>,
    // When true, the driver must replay the same character without
    // consuming a new one. "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,
    // Value characters of a removed duplicate attribute are parsed but
    // discarded while this is set.
    pub(super) current_attribute_dropped: bool,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
    /// "The last start tag token emitted is used... in the RCDATA, RAWTEXT,
    /// and script data states." A single slot, not a stack.
    pub(super) last_start_tag_name: Option<String>,

    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#temporary-buffer)
    /// "The temporary buffer is used to temporarily store characters during
    /// certain tokenization operations", particularly end tag detection in
    /// RCDATA/RAWTEXT states and keyword matching after `<!`.
    pub(super) temporary_buffer: String,

    pub(super) position: Position,
    pub(super) errors: Vec<ParseError>,
}

impl Tokenizer {
    /// Create a new tokenizer in the data state.
    ///
    /// [§ 13.2.5 Tokenization](https://html.spec.whatwg.org/multipage/parsing.html#tokenization):
    /// "The initial state is the data state."
    #[must_use]
    pub fn new() -> Self {
        Tokenizer {
            state: TokenizerState::Data,
            return_state: None,
            current_input_character: None,
            current_token: None,
            at_eof: false,
            pending: VecDeque::new(),
            reconsume: false,
            current_attribute_dropped: false,
            last_start_tag_name: None,
            temporary_buffer: String::new(),
            position: Position::default(),
            errors: Vec::new(),
        }
    }

    /// Process one input character (`None` is the end-of-input sentinel).
    ///
    /// Zero or more tokens may be queued; drain them with
    /// [`Tokenizer::next_token`] before stepping again. If the reconsume
    /// flag comes back set (see [`Tokenizer::take_reconsume`]), call `step`
    /// again with the **same** character - in a loop, since a character may
    /// be reconsumed through more than one state.
    ///
    /// # Errors
    ///
    /// [`ContractViolation::StepAfterEndOfInput`] when called again after
    /// the end-of-file token was emitted. That is a caller bug, distinct
    /// from the recoverable parse errors collected on the run.
    pub fn step(
        &mut self,
        input: Option<char>,
        position: Position,
    ) -> Result<(), ContractViolation> {
        if self.at_eof {
            return Err(ContractViolation::StepAfterEndOfInput);
        }
        self.current_input_character = input;
        self.position = position;

        match self.state {
            TokenizerState::Data => self.handle_data_state(),
            TokenizerState::RCDATA => self.handle_rcdata_state(),
            TokenizerState::RAWTEXT => self.handle_rawtext_state(),
            TokenizerState::ScriptData => self.handle_script_data_state(),
            TokenizerState::PLAINTEXT => self.handle_plaintext_state(),
            TokenizerState::TagOpen => self.handle_tag_open_state(),
            TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
            TokenizerState::TagName => self.handle_tag_name_state(),
            TokenizerState::RCDATALessThanSign => self.handle_rcdata_less_than_sign_state(),
            TokenizerState::RCDATAEndTagOpen => self.handle_rcdata_end_tag_open_state(),
            TokenizerState::RCDATAEndTagName => self.handle_rcdata_end_tag_name_state(),
            TokenizerState::RAWTEXTLessThanSign => self.handle_rawtext_less_than_sign_state(),
            TokenizerState::RAWTEXTEndTagOpen => self.handle_rawtext_end_tag_open_state(),
            TokenizerState::RAWTEXTEndTagName => self.handle_rawtext_end_tag_name_state(),
            TokenizerState::ScriptDataLessThanSign => {
                self.handle_script_data_less_than_sign_state();
            }
            TokenizerState::ScriptDataEndTagOpen => self.handle_script_data_end_tag_open_state(),
            TokenizerState::ScriptDataEndTagName => self.handle_script_data_end_tag_name_state(),
            TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
            TokenizerState::AttributeName => self.handle_attribute_name_state(),
            TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
            TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
            TokenizerState::AttributeValueDoubleQuoted => {
                self.handle_attribute_value_double_quoted_state();
            }
            TokenizerState::AttributeValueSingleQuoted => {
                self.handle_attribute_value_single_quoted_state();
            }
            TokenizerState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state(),
            TokenizerState::AfterAttributeValueQuoted => {
                self.handle_after_attribute_value_quoted_state();
            }
            TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            TokenizerState::BogusComment => self.handle_bogus_comment_state(),
            TokenizerState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
            TokenizerState::CommentStart => self.handle_comment_start_state(),
            TokenizerState::CommentStartDash => self.handle_comment_start_dash_state(),
            TokenizerState::Comment => self.handle_comment_state(),
            TokenizerState::CommentEndDash => self.handle_comment_end_dash_state(),
            TokenizerState::CommentEnd => self.handle_comment_end_state(),
            TokenizerState::DOCTYPE => self.handle_doctype_state(),
            TokenizerState::BeforeDOCTYPEName => self.handle_before_doctype_name_state(),
            TokenizerState::DOCTYPEName => self.handle_doctype_name_state(),
            TokenizerState::BogusDOCTYPE => self.handle_bogus_doctype_state(),
            TokenizerState::CharacterReference => self.handle_character_reference_state(),
        }
        Ok(())
    }

    /// Pop the next queued token, if any.
    pub fn next_token(&mut self) -> Option<Token> {
        self.pending.pop_front()
    }

    /// Check and clear the reconsume flag.
    ///
    /// The driving loop must re-invoke [`Tokenizer::step`] with the same
    /// character while this returns true.
    pub fn take_reconsume(&mut self) -> bool {
        let flag = self.reconsume;
        self.reconsume = false;
        flag
    }

    /// True once the end-of-file token has been emitted; stepping further is
    /// a contract violation.
    #[must_use]
    pub const fn is_at_eof(&self) -> bool {
        self.at_eof
    }

    /// Take the recoverable parse errors recorded since the last drain.
    pub fn drain_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// [§ 13.2.5.1 Data state](https://html.spec.whatwg.org/multipage/parsing.html#data-state)
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "U+0026 AMPERSAND (&) - Set the return state to the data state.
            // Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::Data);
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "U+003C LESS-THAN SIGN (<) - Switch to the tag open state."
            Some('<') => {
                self.switch_to(TokenizerState::TagOpen);
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Emit the current input character as a character token."
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.emit_character_token('\0');
            }
            // "EOF - Emit an end-of-file token."
            None => {
                self.emit_eof_token();
            }
            // "Anything else - Emit the current input character as a
            // character token."
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.2 RCDATA state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-state)
    fn handle_rcdata_state(&mut self) {
        match self.current_input_character {
            // "Set the return state to the RCDATA state. Switch to the
            // character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::RCDATA);
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "Switch to the RCDATA less-than sign state."
            Some('<') => {
                self.switch_to(TokenizerState::RCDATALessThanSign);
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.emit_character_token('\u{FFFD}');
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.3 RAWTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-state)
    fn handle_rawtext_state(&mut self) {
        match self.current_input_character {
            // "Switch to the RAWTEXT less-than sign state."
            Some('<') => {
                self.switch_to(TokenizerState::RAWTEXTLessThanSign);
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.emit_character_token('\u{FFFD}');
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.4 Script data state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-state)
    fn handle_script_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.switch_to(TokenizerState::ScriptDataLessThanSign);
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.emit_character_token('\u{FFFD}');
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.5 PLAINTEXT state](https://html.spec.whatwg.org/multipage/parsing.html#plaintext-state)
    ///
    /// "Anything else - Emit the current input character as a character
    /// token." There is no way out of PLAINTEXT.
    fn handle_plaintext_state(&mut self) {
        match self.current_input_character {
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.emit_character_token('\u{FFFD}');
            }
            None => {
                self.emit_eof_token();
            }
            Some(c) => {
                self.emit_character_token(c);
            }
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "U+0021 EXCLAMATION MARK (!) - Switch to the markup
            // declaration open state." The keyword matcher starts with an
            // empty temporary buffer.
            Some('!') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::MarkupDeclarationOpen);
            }
            // "U+002F SOLIDUS (/) - Switch to the end tag open state."
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
            }
            // "ASCII alpha - Create a new start tag token, set its tag name
            // to the empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_start_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003F QUESTION MARK (?) - This is an
            // unexpected-question-mark-instead-of-tag-name parse error.
            // Create a comment token whose data is the empty string.
            // Reconsume in the bogus comment state."
            Some('?') => {
                self.parse_error("unexpected question mark instead of tag name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a
            // U+003C LESS-THAN SIGN character token and an end-of-file
            // token."
            None => {
                self.parse_error("EOF before tag name");
                self.emit_character_token('<');
                self.emit_eof_token();
            }
            // "Anything else - This is an
            // invalid-first-character-of-tag-name parse error. Emit a U+003C
            // LESS-THAN SIGN character token. Reconsume in the data state."
            Some(_) => {
                self.parse_error("invalid first character of tag name");
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token, set its tag name to
            // the empty string. Reconsume in the tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::TagName);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a missing-end-tag-name
            // parse error. Switch to the data state."
            Some('>') => {
                self.parse_error("missing end tag name");
                self.switch_to(TokenizerState::Data);
            }
            // "EOF - This is an eof-before-tag-name parse error. Emit a
            // U+003C LESS-THAN SIGN character token, a U+002F SOLIDUS
            // character token and an end-of-file token."
            None => {
                self.parse_error("EOF before tag name");
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.emit_eof_token();
            }
            // "Anything else - This is an
            // invalid-first-character-of-tag-name parse error. Create a
            // comment token whose data is the empty string. Reconsume in the
            // bogus comment state."
            Some(_) => {
                self.parse_error("invalid first character of tag name");
                self.current_token = Some(Token::new_comment());
                self.reconsume_in(TokenizerState::BogusComment);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            // "Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "ASCII upper alpha - Append the lowercase version of the
            // current input character (add 0x0020 to the character's code
            // point) to the current tag token's tag name."
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the current
            // tag token's tag name."
            Some('\0') => {
                self.parse_error("unexpected null character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name('\u{FFFD}');
                }
            }
            // "EOF - This is an eof-in-tag parse error. Emit an end-of-file
            // token."
            None => {
                self.parse_error("EOF in tag");
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // current tag token's tag name."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.9 RCDATA less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-less-than-sign-state)
    fn handle_rcdata_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/) - Set the temporary buffer to the empty
            // string. Switch to the RCDATA end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::RCDATAEndTagOpen);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the RCDATA state."
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::RCDATA);
            }
        }
    }

    /// [§ 13.2.5.10 RCDATA end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-open-state)
    fn handle_rcdata_end_tag_open_state(&mut self) {
        match self.current_input_character {
            // "ASCII alpha - Create a new end tag token, set its tag name to
            // the empty string. Reconsume in the RCDATA end tag name state."
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::RCDATAEndTagName);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token
            // and a U+002F SOLIDUS character token. Reconsume in the RCDATA
            // state."
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.reconsume_in(TokenizerState::RCDATA);
            }
        }
    }

    /// [§ 13.2.5.11 RCDATA end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rcdata-end-tag-name-state)
    ///
    /// The candidate end tag only closes the element when it is an
    /// appropriate end tag token; otherwise the buffered characters are
    /// flushed back out as literal text.
    fn handle_rcdata_end_tag_name_state(&mut self) {
        self.handle_raw_end_tag_name_state(TokenizerState::RCDATA);
    }

    /// [§ 13.2.5.12 RAWTEXT less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-less-than-sign-state)
    fn handle_rawtext_less_than_sign_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::RAWTEXTEndTagOpen);
            }
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::RAWTEXT);
            }
        }
    }

    /// [§ 13.2.5.13 RAWTEXT end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-open-state)
    fn handle_rawtext_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::RAWTEXTEndTagName);
            }
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.reconsume_in(TokenizerState::RAWTEXT);
            }
        }
    }

    /// [§ 13.2.5.14 RAWTEXT end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#rawtext-end-tag-name-state)
    fn handle_rawtext_end_tag_name_state(&mut self) {
        self.handle_raw_end_tag_name_state(TokenizerState::RAWTEXT);
    }

    /// [§ 13.2.5.15 Script data less-than sign state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-less-than-sign-state)
    fn handle_script_data_less_than_sign_state(&mut self) {
        match self.current_input_character {
            // "U+002F SOLIDUS (/) - Set the temporary buffer to the empty
            // string. Switch to the script data end tag open state."
            Some('/') => {
                self.temporary_buffer.clear();
                self.switch_to(TokenizerState::ScriptDataEndTagOpen);
            }
            // The script data escape states are not modeled; `<!` inside
            // script data is passed through as literal characters.
            Some('!') => {
                self.emit_character_token('<');
                self.emit_character_token('!');
                self.switch_to(TokenizerState::ScriptData);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token.
            // Reconsume in the script data state."
            _ => {
                self.emit_character_token('<');
                self.reconsume_in(TokenizerState::ScriptData);
            }
        }
    }

    /// [§ 13.2.5.16 Script data end tag open state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-open-state)
    fn handle_script_data_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(Token::new_end_tag());
                self.reconsume_in(TokenizerState::ScriptDataEndTagName);
            }
            _ => {
                self.emit_character_token('<');
                self.emit_character_token('/');
                self.reconsume_in(TokenizerState::ScriptData);
            }
        }
    }

    /// [§ 13.2.5.17 Script data end tag name state](https://html.spec.whatwg.org/multipage/parsing.html#script-data-end-tag-name-state)
    fn handle_script_data_end_tag_name_state(&mut self) {
        self.handle_raw_end_tag_name_state(TokenizerState::ScriptData);
    }

    /// Shared body of the RCDATA/RAWTEXT/script-data end tag name states
    /// (§ 13.2.5.11 / § 13.2.5.14 / § 13.2.5.17 - the three sections are
    /// character-for-character identical apart from the fallback state).
    fn handle_raw_end_tag_name_state(&mut self, fallback: TokenizerState) {
        match self.current_input_character {
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the before attribute name state. Otherwise,
            // treat it as per the 'anything else' entry below."
            Some(c) if Self::is_whitespace_char(c) => {
                if self.is_appropriate_end_tag_token() {
                    self.switch_to(TokenizerState::BeforeAttributeName);
                } else {
                    self.emit_raw_end_tag_fallback(fallback);
                }
            }
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the self-closing start tag state."
            Some('/') => {
                if self.is_appropriate_end_tag_token() {
                    self.switch_to(TokenizerState::SelfClosingStartTag);
                } else {
                    self.emit_raw_end_tag_fallback(fallback);
                }
            }
            // "If the current end tag token is an appropriate end tag token,
            // then switch to the data state and emit the current tag token."
            Some('>') => {
                if self.is_appropriate_end_tag_token() {
                    self.switch_to(TokenizerState::Data);
                    self.emit_current_token();
                } else {
                    self.emit_raw_end_tag_fallback(fallback);
                }
            }
            // "ASCII upper alpha - Append the lowercase version of the
            // current input character to the current tag token's tag name.
            // Append the current input character to the temporary buffer."
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c.to_ascii_lowercase());
                }
                self.temporary_buffer.push(c);
            }
            // "ASCII lower alpha - Append the current input character to the
            // current tag token's tag name. Append the current input
            // character to the temporary buffer."
            Some(c) if c.is_ascii_lowercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_tag_name(c);
                }
                self.temporary_buffer.push(c);
            }
            // "Anything else - Emit a U+003C LESS-THAN SIGN character token,
            // a U+002F SOLIDUS character token, and a character token for
            // each of the characters in the temporary buffer (in the order
            // they were added to the buffer). Reconsume in the <fallback>
            // state."
            _ => {
                self.emit_raw_end_tag_fallback(fallback);
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>), EOF -
            // Reconsume in the after attribute name state."
            Some('/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // "U+003D EQUALS SIGN (=) - This is an
            // unexpected-equals-sign-before-attribute-name parse error.
            // Start a new attribute in the current tag token. Set that
            // attribute's name to the current input character, and its value
            // to the empty string. Switch to the attribute name state."
            Some('=') => {
                self.parse_error("unexpected equals sign before attribute name");
                self.start_new_attribute();
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name('=');
                }
                self.switch_to(TokenizerState::AttributeName);
            }
            // "Anything else - Start a new attribute in the current tag
            // token. Set that attribute name and value to the empty string.
            // Reconsume in the attribute name state."
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "Whitespace, U+002F SOLIDUS (/), U+003E GREATER-THAN SIGN (>),
            // EOF - Reconsume in the after attribute name state." Leaving
            // this state triggers the duplicate-attribute check.
            Some(c) if Self::is_whitespace_char(c) => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('/' | '>') | None => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value
            // state."
            Some('=') => {
                self.check_duplicate_attribute();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "ASCII upper alpha - Append the lowercase version of the
            // current input character to the current attribute's name."
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c.to_ascii_lowercase());
                }
            }
            // "U+0000 NULL - This is an unexpected-null-character parse
            // error. Append a U+FFFD REPLACEMENT CHARACTER to the current
            // attribute's name."
            Some('\0') => {
                self.parse_error("unexpected null character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name('\u{FFFD}');
                }
            }
            // "U+0022 QUOTATION MARK ("), U+0027 APOSTROPHE ('), U+003C
            // LESS-THAN SIGN (<) - This is an
            // unexpected-character-in-attribute-name parse error. Treat it
            // as per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<')) => {
                self.parse_error("unexpected character in attribute name");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c);
                }
            }
            // "Anything else - Append the current input character to the
            // current attribute's name."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "U+002F SOLIDUS (/) - Switch to the self-closing start tag
            // state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "U+003D EQUALS SIGN (=) - Switch to the before attribute value
            // state."
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            // "U+003E GREATER-THAN SIGN (>) - Switch to the data state. Emit
            // the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "EOF - This is an eof-in-tag parse error. Emit an end-of-file
            // token."
            None => {
                self.parse_error("EOF in tag");
                self.emit_eof_token();
            }
            // "Anything else - Start a new attribute in the current tag
            // token... Reconsume in the attribute name state."
            Some(_) => {
                self.start_new_attribute();
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "Switch to the attribute value (double-quoted) state."
            Some('"') => {
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            // "Switch to the attribute value (single-quoted) state."
            Some('\'') => {
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            // "U+003E GREATER-THAN SIGN (>) - This is a
            // missing-attribute-value parse error. Switch to the data state.
            // Emit the current tag token."
            Some('>') => {
                self.parse_error("missing attribute value");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "Anything else - Reconsume in the attribute value (unquoted)
            // state."
            _ => {
                self.reconsume_in(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    fn handle_attribute_value_double_quoted_state(&mut self) {
        match self.current_input_character {
            // "Switch to the after attribute value (quoted) state."
            Some('"') => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            // "Set the return state to the attribute value (double-quoted)
            // state. Switch to the character reference state."
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueDoubleQuoted);
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.append_to_attribute_value('\u{FFFD}');
            }
            // "EOF - This is an eof-in-tag parse error. Emit an end-of-file
            // token."
            None => {
                self.parse_error("EOF in tag");
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // current attribute's value."
            Some(c) => {
                self.append_to_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_single_quoted_state(&mut self) {
        match self.current_input_character {
            Some('\'') => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueSingleQuoted);
                self.switch_to(TokenizerState::CharacterReference);
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.append_to_attribute_value('\u{FFFD}');
            }
            None => {
                self.parse_error("EOF in tag");
                self.emit_eof_token();
            }
            Some(c) => {
                self.append_to_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            // "Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('&') => {
                self.return_state = Some(TokenizerState::AttributeValueUnquoted);
                self.switch_to(TokenizerState::CharacterReference);
            }
            // "Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                self.append_to_attribute_value('\u{FFFD}');
            }
            // "This is an unexpected-character-in-unquoted-attribute-value
            // parse error. Treat it as per the 'anything else' entry below."
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.parse_error("unexpected character in unquoted attribute value");
                self.append_to_attribute_value(c);
            }
            None => {
                self.parse_error("EOF in tag");
                self.emit_eof_token();
            }
            Some(c) => {
                self.append_to_attribute_value(c);
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            // "Switch to the before attribute name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            // "Switch to the self-closing start tag state."
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            // "Switch to the data state. Emit the current tag token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => {
                self.parse_error("EOF in tag");
                self.emit_eof_token();
            }
            // "Anything else - This is a
            // missing-whitespace-between-attributes parse error. Reconsume
            // in the before attribute name state."
            Some(_) => {
                self.parse_error("missing whitespace between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            // "Set the self-closing flag of the current tag token. Switch to
            // the data state. Emit the current tag token."
            Some('>') => {
                if let Some(ref mut token) = self.current_token
                    && matches!(token, Token::StartTag { .. })
                {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => {
                self.parse_error("EOF in tag");
                self.emit_eof_token();
            }
            // "Anything else - This is an unexpected-solidus-in-tag parse
            // error. Reconsume in the before attribute name state."
            Some(_) => {
                self.parse_error("unexpected solidus in tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.41 Bogus comment state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-comment-state)
    fn handle_bogus_comment_state(&mut self) {
        match self.current_input_character {
            // "Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "EOF - Emit the comment. Emit an end-of-file token."
            None => {
                self.emit_current_token();
                self.emit_eof_token();
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('\u{FFFD}');
                }
            }
            // "Anything else - Append the current input character to the
            // comment token's data."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
            }
        }
    }

    /// [§ 13.2.5.42 Markup declaration open state](https://html.spec.whatwg.org/multipage/parsing.html#markup-declaration-open-state)
    ///
    /// The spec section peeks at the next few characters; this tokenizer is
    /// fed one character at a time, so the candidate keyword is accumulated
    /// in the temporary buffer instead and prefix-matched as it grows:
    ///
    /// - buffer becomes `--` - comment token, comment start state
    /// - buffer becomes `doctype` (case-insensitive) - DOCTYPE state
    /// - buffer stops being a prefix of either - incorrectly-opened-comment
    ///   parse error; the consumed characters seed a bogus comment and the
    ///   current character is reconsumed there
    ///
    /// CDATA sections are not recognized (they only apply in foreign
    /// content); `<![CDATA[` falls into the bogus comment path.
    fn handle_markup_declaration_open_state(&mut self) {
        match self.current_input_character {
            Some(c) => {
                self.temporary_buffer.push(c);
                if self.temporary_buffer == "--" {
                    // "Consume those two characters, create a comment token
                    // whose data is the empty string, and switch to the
                    // comment start state."
                    self.temporary_buffer.clear();
                    self.current_token = Some(Token::new_comment());
                    self.switch_to(TokenizerState::CommentStart);
                } else if self.temporary_buffer.eq_ignore_ascii_case("doctype") {
                    // "Consume those characters and switch to the DOCTYPE
                    // state."
                    self.temporary_buffer.clear();
                    self.switch_to(TokenizerState::DOCTYPE);
                } else if Self::is_keyword_prefix(&self.temporary_buffer) {
                    // Still a viable prefix; keep consuming.
                } else {
                    // "This is an incorrectly-opened-comment parse error.
                    // Create a comment token whose data is the empty string.
                    // Switch to the bogus comment state (don't consume
                    // anything in the current state)."
                    self.parse_error("incorrectly opened comment");
                    let mut consumed = std::mem::take(&mut self.temporary_buffer);
                    let _ = consumed.pop();
                    self.current_token = Some(Token::new_comment_with(consumed));
                    self.reconsume_in(TokenizerState::BogusComment);
                }
            }
            None => {
                self.parse_error("incorrectly opened comment");
                let consumed = std::mem::take(&mut self.temporary_buffer);
                self.current_token = Some(Token::new_comment_with(consumed));
                self.emit_current_token();
                self.emit_eof_token();
            }
        }
    }

    /// [§ 13.2.5.43 Comment start state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-state)
    fn handle_comment_start_state(&mut self) {
        match self.current_input_character {
            // "Switch to the comment start dash state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentStartDash);
            }
            // "This is an abrupt-closing-of-empty-comment parse error.
            // Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.parse_error("abrupt closing of empty comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "Anything else - Reconsume in the comment state."
            _ => {
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.44 Comment start dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-start-dash-state)
    fn handle_comment_start_dash_state(&mut self) {
        match self.current_input_character {
            // "Switch to the comment end state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            Some('>') => {
                self.parse_error("abrupt closing of empty comment");
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "EOF - This is an eof-in-comment parse error. Emit the current
            // comment token. Emit an end-of-file token."
            None => {
                self.parse_error("EOF in comment");
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data. Reconsume in the comment state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.45 Comment state](https://html.spec.whatwg.org/multipage/parsing.html#comment-state)
    ///
    /// Nested-comment detection (the comment less-than sign states) is not
    /// modeled; `<` inside a comment is plain data.
    fn handle_comment_state(&mut self) {
        match self.current_input_character {
            // "Switch to the comment end dash state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEndDash);
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('\u{FFFD}');
                }
            }
            None => {
                self.parse_error("EOF in comment");
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // comment token's data."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment(c);
                }
            }
        }
    }

    /// [§ 13.2.5.50 Comment end dash state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-dash-state)
    fn handle_comment_end_dash_state(&mut self) {
        match self.current_input_character {
            // "Switch to the comment end state."
            Some('-') => {
                self.switch_to(TokenizerState::CommentEnd);
            }
            None => {
                self.parse_error("EOF in comment");
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append a U+002D HYPHEN-MINUS character (-) to
            // the comment token's data. Reconsume in the comment state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.51 Comment end state](https://html.spec.whatwg.org/multipage/parsing.html#comment-end-state)
    fn handle_comment_end_state(&mut self) {
        match self.current_input_character {
            // "Switch to the data state. Emit the current comment token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "Append a U+002D HYPHEN-MINUS character (-) to the comment
            // token's data."
            Some('-') => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_comment('-');
                }
            }
            None => {
                self.parse_error("EOF in comment");
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append two U+002D HYPHEN-MINUS characters
            // (-) to the comment token's data. Reconsume in the comment
            // state."
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_str_to_comment("--");
                }
                self.reconsume_in(TokenizerState::Comment);
            }
        }
    }

    /// [§ 13.2.5.53 DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-state)
    fn handle_doctype_state(&mut self) {
        match self.current_input_character {
            // "Switch to the before DOCTYPE name state."
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeDOCTYPEName);
            }
            // "Reconsume in the before DOCTYPE name state."
            Some('>') => {
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
            // "EOF - This is an eof-in-doctype parse error. Create a new
            // DOCTYPE token. Set its force-quirks flag to on. Emit the
            // current token. Emit an end-of-file token."
            None => {
                self.parse_error("EOF in doctype");
                let mut token = Token::new_doctype();
                token.set_force_quirks();
                self.current_token = Some(token);
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - This is a
            // missing-whitespace-before-doctype-name parse error. Reconsume
            // in the before DOCTYPE name state."
            Some(_) => {
                self.parse_error("missing whitespace before doctype name");
                self.reconsume_in(TokenizerState::BeforeDOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.54 Before DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#before-doctype-name-state)
    fn handle_before_doctype_name_state(&mut self) {
        match self.current_input_character {
            // "Ignore the character."
            Some(c) if Self::is_whitespace_char(c) => {}
            // "ASCII upper alpha - Create a new DOCTYPE token. Set the
            // token's name to the lowercase version of the current input
            // character. Switch to the DOCTYPE name state."
            Some(c) if c.is_ascii_uppercase() => {
                let mut token = Token::new_doctype();
                token.append_to_doctype_name(c.to_ascii_lowercase());
                self.current_token = Some(token);
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                let mut token = Token::new_doctype();
                token.append_to_doctype_name('\u{FFFD}');
                self.current_token = Some(token);
                self.switch_to(TokenizerState::DOCTYPEName);
            }
            // "This is a missing-doctype-name parse error. Create a new
            // DOCTYPE token. Set its force-quirks flag to on. Switch to the
            // data state. Emit the current token."
            Some('>') => {
                self.parse_error("missing doctype name");
                let mut token = Token::new_doctype();
                token.set_force_quirks();
                self.current_token = Some(token);
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            None => {
                self.parse_error("EOF in doctype");
                let mut token = Token::new_doctype();
                token.set_force_quirks();
                self.current_token = Some(token);
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Create a new DOCTYPE token. Set the token's
            // name to the current input character. Switch to the DOCTYPE
            // name state."
            Some(c) => {
                let mut token = Token::new_doctype();
                token.append_to_doctype_name(c);
                self.current_token = Some(token);
                self.switch_to(TokenizerState::DOCTYPEName);
            }
        }
    }

    /// [§ 13.2.5.55 DOCTYPE name state](https://html.spec.whatwg.org/multipage/parsing.html#doctype-name-state)
    ///
    /// Whitespace after the name leads into the bogus DOCTYPE state rather
    /// than the public/system identifier machinery, which this core does
    /// not model.
    fn handle_doctype_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BogusDOCTYPE);
            }
            // "Switch to the data state. Emit the current DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            // "ASCII upper alpha - Append the lowercase version of the
            // current input character to the current DOCTYPE token's name."
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype_name(c.to_ascii_lowercase());
                }
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype_name('\u{FFFD}');
                }
            }
            None => {
                self.parse_error("EOF in doctype");
                if let Some(ref mut token) = self.current_token {
                    token.set_force_quirks();
                }
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Append the current input character to the
            // current DOCTYPE token's name."
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_doctype_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.68 Bogus DOCTYPE state](https://html.spec.whatwg.org/multipage/parsing.html#bogus-doctype-state)
    fn handle_bogus_doctype_state(&mut self) {
        match self.current_input_character {
            // "Switch to the data state. Emit the DOCTYPE token."
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_current_token();
            }
            Some('\0') => {
                self.parse_error("unexpected null character");
            }
            // "EOF - Emit the DOCTYPE token. Emit an end-of-file token."
            None => {
                self.emit_current_token();
                self.emit_eof_token();
            }
            // "Anything else - Ignore the character."
            Some(_) => {}
        }
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
