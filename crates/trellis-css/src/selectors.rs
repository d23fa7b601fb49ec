//! Selector grammar
//!
//! A small recursive-descent parser producing [`SelectorList`]. The grammar
//! covers the selectors needed to query markup: compound selectors,
//! combinators, attribute operators and the structural pseudo-classes.

use crate::SelectorError;

/// Comma separated list of complex selectors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators
///
/// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`.
/// A relative selector (`> li`, `+ p`) records its leading combinator in
/// `anchor`; it is resolved against the scope node at match time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplexSelector {
    pub anchor: Option<Combinator>,
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Sequence of simple selectors that all apply to one element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    pub parts: Vec<SimpleSelector>,
}

/// Combinator between compound selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: ancestor descendant
    Descendant,
    /// `>`: parent > child
    Child,
    /// `+`: prev + next
    NextSibling,
    /// `~`: prev ~ subsequent
    SubsequentSibling,
}

impl Combinator {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '>' => Some(Self::Child),
            '+' => Some(Self::NextSibling),
            '~' => Some(Self::SubsequentSibling),
            _ => None,
        }
    }
}

/// A single simple selector component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Universal selector `*`
    Universal,
    /// Type selector, stored lowercase
    Type(String),
    /// ID selector `#foo`
    Id(String),
    /// Class selector `.foo`
    Class(String),
    /// Attribute selector `[attr op value]`
    Attribute(AttributeSelector),
    /// Pseudo-class `:first-child`, `:not(...)`, ...
    PseudoClass(PseudoClass),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSelector {
    /// Attribute name, stored lowercase
    pub name: String,
    pub op: AttrOp,
    pub value: String,
    /// Set by the trailing ` i` flag
    pub case_insensitive: bool,
}

/// Attribute selector operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrOp {
    /// `[attr]`
    Exists,
    /// `[attr=val]`
    Equals,
    /// `[attr~=val]`
    Includes,
    /// `[attr|=val]`
    DashMatch,
    /// `[attr^=val]`
    Prefix,
    /// `[attr$=val]`
    Suffix,
    /// `[attr*=val]`
    Substring,
    /// `[attr!=val]`
    NotEquals,
}

/// Supported pseudo-classes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PseudoClass {
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),
    Checked,
    Disabled,
    Enabled,
    Not(SelectorList),
    /// `:is()`, also spelled `:matches()` and `:where()`
    Is(SelectorList),
    /// `:has()` with relative selectors anchored at the subject
    Has(SelectorList),
    /// `:contains(text)` over the text content
    Contains(String),
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse `odd`, `even`, `3`, `2n+1`, `-n + 3`
    pub fn parse(s: &str) -> Option<Self> {
        let s: String = s.split_whitespace().collect::<String>().to_ascii_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::new(2, 1)),
            "even" => return Some(Self::new(2, 0)),
            "" => return None,
            _ => {}
        }

        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::new(0, n));
        }

        let n_pos = s.find('n')?;
        let a = match &s[..n_pos] {
            "" | "+" => 1,
            "-" => -1,
            a => a.parse().ok()?,
        };
        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else {
            if !rest.starts_with(['+', '-']) {
                return None;
            }
            rest.trim_start_matches('+').parse().ok()?
        };
        Some(Self::new(a, b))
    }

    /// Check if a 1-based position matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }
        let (a, diff) = (i64::from(self.a), i64::from(n) - i64::from(self.b));
        diff % a == 0 && diff / a >= 0
    }
}

impl SelectorList {
    /// Parse a selector list; leading combinators are rejected
    pub fn parse(text: &str) -> Result<Self, SelectorError> {
        Self::parse_with(text, false)
    }

    /// Parse a selector list whose entries may start with a combinator
    ///
    /// Used for queries that run below a scope node.
    pub fn parse_relative(text: &str) -> Result<Self, SelectorError> {
        Self::parse_with(text, true)
    }

    fn parse_with(text: &str, relative: bool) -> Result<Self, SelectorError> {
        if text.trim().is_empty() {
            return Err(SelectorError::Empty);
        }
        let mut parser = Parser::new(text);
        let list = parser.parse_list(relative, false);
        match list {
            Ok(list) => Ok(list),
            Err(err) => {
                tracing::debug!("Rejected selector {text:?}: {err}");
                Err(err)
            }
        }
    }

    /// True if any entry starts with a combinator
    pub fn is_relative(&self) -> bool {
        self.selectors.iter().any(|s| s.anchor.is_some())
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Skip whitespace, reporting whether any was consumed
    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos != start
    }

    fn unexpected(&self) -> SelectorError {
        match self.peek() {
            Some(token) => SelectorError::UnexpectedToken {
                token,
                offset: self.pos,
            },
            None => SelectorError::UnexpectedEnd,
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SelectorError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn parse_list(&mut self, relative: bool, nested: bool) -> Result<SelectorList, SelectorError> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.parse_complex(relative)?);
            self.skip_ws();
            match self.peek() {
                Some(',') => {
                    self.bump();
                }
                Some(')') if nested => break,
                None if !nested => break,
                _ => return Err(self.unexpected()),
            }
        }
        Ok(SelectorList { selectors })
    }

    fn parse_complex(&mut self, relative: bool) -> Result<ComplexSelector, SelectorError> {
        let anchor = match self.peek().and_then(Combinator::from_char) {
            Some(combinator) if relative => {
                self.bump();
                self.skip_ws();
                Some(combinator)
            }
            Some(_) => return Err(self.unexpected()),
            None => None,
        };

        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                None | Some(',') | Some(')') => break,
                Some(ch) => match Combinator::from_char(ch) {
                    Some(combinator) => {
                        self.bump();
                        self.skip_ws();
                        combinator
                    }
                    None if had_ws => Combinator::Descendant,
                    None => return Err(self.unexpected()),
                },
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            anchor,
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector, SelectorError> {
        let mut parts = Vec::new();

        if self.eat('*') {
            parts.push(SimpleSelector::Universal);
        } else if self.peek().is_some_and(is_ident_char) {
            parts.push(SimpleSelector::Type(self.parse_ident()?.to_ascii_lowercase()));
        }

        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    parts.push(SimpleSelector::Id(self.parse_ident()?));
                }
                Some('.') => {
                    self.bump();
                    parts.push(SimpleSelector::Class(self.parse_ident()?));
                }
                Some('[') => {
                    self.bump();
                    parts.push(SimpleSelector::Attribute(self.parse_attribute()?));
                }
                Some(':') => {
                    self.bump();
                    parts.push(SimpleSelector::PseudoClass(self.parse_pseudo()?));
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(self.unexpected());
        }
        Ok(CompoundSelector { parts })
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let mut ident = String::new();
        loop {
            match self.peek() {
                Some('\\') => {
                    self.bump();
                    ident.push(self.bump().ok_or(SelectorError::UnexpectedEnd)?);
                }
                Some(ch) if is_ident_char(ch) => {
                    self.bump();
                    ident.push(ch);
                }
                _ => break,
            }
        }
        if ident.is_empty() {
            return Err(self.unexpected());
        }
        Ok(ident)
    }

    fn parse_string(&mut self, quote: char) -> Result<String, SelectorError> {
        let mut value = String::new();
        loop {
            match self.bump() {
                None => return Err(SelectorError::UnexpectedEnd),
                Some('\\') => value.push(self.bump().ok_or(SelectorError::UnexpectedEnd)?),
                Some(ch) if ch == quote => return Ok(value),
                Some(ch) => value.push(ch),
            }
        }
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector, SelectorError> {
        self.skip_ws();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_ws();

        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector {
                    name,
                    op: AttrOp::Exists,
                    value: String::new(),
                    case_insensitive: false,
                });
            }
            Some('=') => AttrOp::Equals,
            Some('~') => AttrOp::Includes,
            Some('|') => AttrOp::DashMatch,
            Some('^') => AttrOp::Prefix,
            Some('$') => AttrOp::Suffix,
            Some('*') => AttrOp::Substring,
            Some('!') => AttrOp::NotEquals,
            _ => return Err(self.unexpected()),
        };
        self.bump();
        if op != AttrOp::Equals {
            self.expect('=')?;
        }
        self.skip_ws();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                self.parse_string(quote)?
            }
            _ => self.parse_ident()?,
        };
        self.skip_ws();

        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.bump();
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.skip_ws();
        }
        self.expect(']')?;

        Ok(AttributeSelector {
            name,
            op,
            value,
            case_insensitive,
        })
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass, SelectorError> {
        if self.peek() == Some(':') {
            // Pseudo-elements never match nodes
            return Err(self.unexpected());
        }
        let name = self.parse_ident()?.to_ascii_lowercase();

        if !self.eat('(') {
            return match name.as_str() {
                "root" => Ok(PseudoClass::Root),
                "empty" => Ok(PseudoClass::Empty),
                "first-child" => Ok(PseudoClass::FirstChild),
                "last-child" => Ok(PseudoClass::LastChild),
                "only-child" => Ok(PseudoClass::OnlyChild),
                "first-of-type" => Ok(PseudoClass::FirstOfType),
                "last-of-type" => Ok(PseudoClass::LastOfType),
                "only-of-type" => Ok(PseudoClass::OnlyOfType),
                "checked" => Ok(PseudoClass::Checked),
                "disabled" => Ok(PseudoClass::Disabled),
                "enabled" => Ok(PseudoClass::Enabled),
                _ => Err(SelectorError::UnmatchedPseudoClass(name)),
            };
        }

        let pseudo = match name.as_str() {
            "nth-child" => PseudoClass::NthChild(self.parse_nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth()?),
            "nth-last-of-type" => PseudoClass::NthLastOfType(self.parse_nth()?),
            "not" => PseudoClass::Not(self.parse_list(false, true)?),
            "is" | "matches" | "where" => PseudoClass::Is(self.parse_list(false, true)?),
            "has" => PseudoClass::Has(self.parse_list(true, true)?),
            "contains" => PseudoClass::Contains(self.parse_contains()?),
            _ => return Err(SelectorError::UnmatchedPseudoClass(name)),
        };
        self.expect(')')?;
        Ok(pseudo)
    }

    fn parse_nth(&mut self) -> Result<NthExpression, SelectorError> {
        let raw = self.take_until_paren()?;
        NthExpression::parse(raw).ok_or_else(|| SelectorError::InvalidNth(raw.trim().to_string()))
    }

    fn parse_contains(&mut self) -> Result<String, SelectorError> {
        self.skip_ws();
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.bump();
                let text = self.parse_string(quote)?;
                self.skip_ws();
                Ok(text)
            }
            _ => Ok(self.take_until_paren()?.trim().to_string()),
        }
    }

    /// Raw argument text up to (not including) the closing parenthesis
    fn take_until_paren(&mut self) -> Result<&'a str, SelectorError> {
        let input = self.input;
        let rest = &input[self.pos..];
        let len = rest.find(')').ok_or(SelectorError::UnexpectedEnd)?;
        self.pos += len;
        Ok(&rest[..len])
    }
}

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || !ch.is_ascii()
}
