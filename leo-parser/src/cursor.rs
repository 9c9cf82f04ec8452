use leo_source::Span;

use crate::lexer::{Spanned, Token};

/// A lookahead-of-one cursor over a token slice.
///
/// Reading past the last token yields [`Token::Eof`] rather than failing.
pub struct TokenCursor<'t> {
    tokens: &'t [Spanned],
    /// Index of the current (peeked) token.
    pos: usize,
}

static EOF: Token = Token::Eof;

impl<'t> TokenCursor<'t> {
    pub fn new(tokens: &'t [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn tokens(&self) -> &'t [Spanned] {
        self.tokens
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the current token without consuming it.
    pub fn peek(&self) -> &'t Token {
        self.tokens.get(self.pos).map_or(&EOF, |spanned| &spanned.token)
    }

    /// Returns the span of the current token. At the end of input this is an empty span
    /// just past the last token.
    pub fn peek_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some(spanned) => spanned.span.clone(),
            None => {
                let end = self.tokens.last().map_or(0, |spanned| spanned.span.end);
                end..end
            }
        }
    }

    /// Consumes and returns the current token.
    pub fn next(&mut self) -> &'t Token {
        let token = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Undoes the last [`Self::next`].
    pub fn put_back(&mut self) {
        debug_assert!(self.pos > 0, "put_back before any token was consumed");
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }
}
