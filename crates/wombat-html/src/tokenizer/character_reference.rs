//! Character reference handling for the HTML tokenizer.
//!
//! [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
//!
//! This core deliberately carries no entity table and no numeric reference
//! decoder. An ampersand enters the character reference state as the spec
//! requires, but the resolution step is a fixed simplification: the `&` is
//! swallowed and the character after it is reconsumed in the return state.
//! `a &amp; b` therefore tokenizes to the text `a amp; b`, while `a & b`
//! tokenizes to `a  b` (the ampersand itself is lost in both cases).

use super::core::{Tokenizer, TokenizerState};

impl Tokenizer {
    /// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
    ///
    /// Simplified resolution: whatever follows the ampersand, reconsume it
    /// in the return state. EOF after `&` just reconsumes the sentinel, so
    /// the return state's own EOF rule applies.
    pub(super) fn handle_character_reference_state(&mut self) {
        // The return state was set by whichever state consumed the `&`;
        // falling back to data keeps the machine total if it was not.
        let return_state = self.return_state.take().unwrap_or(TokenizerState::Data);
        self.reconsume_in(return_state);
    }
}
