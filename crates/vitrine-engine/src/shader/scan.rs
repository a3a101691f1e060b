//! Minimal WGSL scanner: finds `@vertex` / `@fragment` / `@compute` functions.
//!
//! This is not a WGSL parser. It tokenizes just enough (identifiers, `@`,
//! brackets, statement punctuation) to pair stage attributes with the `fn`
//! declaration that follows them.

use super::library::{EntryPoint, ShaderStage};

// ── Token ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Token<'s> {
    Ident(&'s str),
    At,
    LParen,
    RParen,
    /// `;`, `{` or `}`: ends any pending attribute list.
    Boundary,
    Other,
}

/// Scanner failure, reported with the 1-based line it started on.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScanError {
    pub line: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

struct Lexer<'s> {
    src: &'s str,
    pos: usize,
    line: usize,
}

impl<'s> Lexer<'s> {
    fn new(src: &'s str) -> Self {
        Self { src, pos: 0, line: 1 }
    }

    fn rest(&self) -> &'s str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) -> Result<(), ScanError> {
        loop {
            while matches!(self.peek(), Some(c) if c.is_whitespace()) {
                self.advance();
            }
            if self.rest().starts_with("//") {
                while !matches!(self.peek(), None | Some('\n')) {
                    self.advance();
                }
            } else if self.rest().starts_with("/*") {
                self.skip_block_comment()?;
            } else {
                return Ok(());
            }
        }
    }

    /// WGSL block comments nest.
    fn skip_block_comment(&mut self) -> Result<(), ScanError> {
        let start = self.line;
        let mut depth = 0usize;
        loop {
            if self.rest().starts_with("/*") {
                self.pos += 2;
                depth += 1;
            } else if self.rest().starts_with("*/") {
                self.pos += 2;
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            } else if self.advance().is_none() {
                return Err(ScanError { line: start });
            }
        }
    }

    fn next_token(&mut self) -> Result<Option<Token<'s>>, ScanError> {
        self.skip_whitespace_and_comments()?;

        let Some(ch) = self.peek() else { return Ok(None) };

        let tok = match ch {
            '@' => { self.advance(); Token::At }
            '(' => { self.advance(); Token::LParen }
            ')' => { self.advance(); Token::RParen }
            ';' | '{' | '}' => { self.advance(); Token::Boundary }
            c if c.is_alphabetic() || c == '_' => self.lex_ident(),
            _ => { self.advance(); Token::Other }
        };
        Ok(Some(tok))
    }

    fn lex_ident(&mut self) -> Token<'s> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        Token::Ident(&self.src[start..self.pos])
    }
}

// ── Entry point discovery ─────────────────────────────────────────────────

/// Returns the entry points declared in `src`, in source order.
pub(crate) fn entry_points(src: &str) -> Result<Vec<EntryPoint>, ScanError> {
    let mut lexer = Lexer::new(src);
    let mut found = Vec::new();

    let mut pending: Option<ShaderStage> = None;
    let mut after_at = false;
    let mut after_fn = false;
    let mut paren_depth = 0usize;

    while let Some(tok) = lexer.next_token()? {
        // Attribute arguments such as `@workgroup_size(8, 8)` are skipped wholesale.
        if paren_depth > 0 {
            match tok {
                Token::LParen => paren_depth += 1,
                Token::RParen => paren_depth -= 1,
                _ => {}
            }
            continue;
        }

        match tok {
            Token::At => after_at = true,
            Token::Ident(name) if after_at => {
                after_at = false;
                if let Some(stage) = ShaderStage::from_attribute(name) {
                    pending = Some(stage);
                }
            }
            Token::LParen if !after_fn => paren_depth = 1,
            Token::Ident("fn") => after_fn = true,
            Token::Ident(name) if after_fn => {
                after_fn = false;
                if let Some(stage) = pending.take() {
                    found.push(EntryPoint {
                        stage,
                        name: name.to_string(),
                    });
                }
            }
            Token::Boundary => {
                pending = None;
                after_at = false;
                after_fn = false;
            }
            _ => {
                after_at = false;
                after_fn = false;
            }
        }
    }

    Ok(found)
}
