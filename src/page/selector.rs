//! The CSS selector subset the page anchors are written in.
//!
//! Supported: type selectors, `*`, `.class`, `#id`, attribute tests
//! (`[a]`, `[a=v]`, `[a^=v]`, `[a*=v]`, `[a$=v]`), `:first-child`,
//! `:not(<compound>)` and the descendant combinator (whitespace).

#[derive(Debug, Clone, PartialEq)]
pub enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
    Contains(String),
    Suffix(String),
}

impl AttrOp {
    pub fn test(&self, value: &str) -> bool {
        match self {
            AttrOp::Exists => true,
            AttrOp::Equals(v) => value == v,
            AttrOp::Prefix(v) => value.starts_with(v.as_str()),
            AttrOp::Contains(v) => value.contains(v.as_str()),
            AttrOp::Suffix(v) => value.ends_with(v.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttrMatch {
    pub name: String,
    pub op: AttrOp,
}

/// One compound selector: everything between two combinators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
    pub tag: Option<String>,
    pub ids: Vec<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
    pub first_child: bool,
    pub not: Vec<Compound>,
}

/// A chain of compounds joined by descendant combinators, outermost first.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub parts: Vec<Compound>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Selector, String> {
        let mut p = Parser {
            chars: input.trim().chars().collect(),
            pos: 0,
        };
        if p.chars.is_empty() {
            return Err("empty selector".to_string());
        }

        let mut parts = Vec::new();
        loop {
            p.skip_ws();
            if p.eof() {
                break;
            }
            parts.push(p.compound()?);
            if let Some(c) = p.peek() {
                if !c.is_whitespace() {
                    return Err(format!("unexpected '{}' at {}", c, p.pos));
                }
            }
        }
        Ok(Selector { parts })
    }

    /// The rightmost compound, which the matched element itself must satisfy.
    #[cfg(test)]
    fn subject(&self) -> &Compound {
        self.parts.last().expect("parsed selectors are never empty")
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().map(|c| c.is_whitespace()).unwrap_or(false) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, want: char) -> Result<(), String> {
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(c) => Err(format!("expected '{}' at {}, found '{}'", want, self.pos, c)),
            None => Err(format!("expected '{}' at end of selector", want)),
        }
    }

    fn ident(&mut self) -> Result<String, String> {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(format!("expected identifier at {}", start));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn compound(&mut self) -> Result<Compound, String> {
        let start = self.pos;
        let mut c = Compound::default();

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(ch) if ch.is_alphabetic() => c.tag = Some(self.ident()?.to_lowercase()),
            _ => {}
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    c.classes.push(self.ident()?);
                }
                Some('#') => {
                    self.pos += 1;
                    c.ids.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    c.attrs.push(self.attr()?);
                }
                Some(':') => {
                    self.pos += 1;
                    let name = self.ident()?;
                    match name.as_str() {
                        "first-child" => c.first_child = true,
                        "not" => {
                            self.expect('(')?;
                            self.skip_ws();
                            let inner = self.compound()?;
                            self.skip_ws();
                            self.expect(')')?;
                            c.not.push(inner);
                        }
                        other => return Err(format!("unsupported pseudo-class :{}", other)),
                    }
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(format!("expected selector at {}", start));
        }
        Ok(c)
    }

    fn attr(&mut self) -> Result<AttrMatch, String> {
        self.skip_ws();
        let name = self.ident()?.to_lowercase();
        self.skip_ws();

        let op = match self.peek() {
            Some(']') => {
                self.pos += 1;
                return Ok(AttrMatch {
                    name,
                    op: AttrOp::Exists,
                });
            }
            Some('=') => {
                self.pos += 1;
                '='
            }
            Some(c @ ('^' | '*' | '$')) => {
                self.pos += 1;
                self.expect('=')?;
                c
            }
            Some(c) => return Err(format!("unexpected '{}' in attribute selector", c)),
            None => return Err("unterminated attribute selector".to_string()),
        };

        self.skip_ws();
        let value = self.value()?;
        self.skip_ws();
        self.expect(']')?;

        let op = match op {
            '^' => AttrOp::Prefix(value),
            '*' => AttrOp::Contains(value),
            '$' => AttrOp::Suffix(value),
            _ => AttrOp::Equals(value),
        };
        Ok(AttrMatch { name, op })
    }

    fn value(&mut self) -> Result<String, String> {
        match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                let start = self.pos;
                while let Some(c) = self.peek() {
                    if c == q {
                        let v: String = self.chars[start..self.pos].iter().collect();
                        self.pos += 1;
                        return Ok(v);
                    }
                    self.pos += 1;
                }
                Err("unterminated string in attribute selector".to_string())
            }
            _ => self.ident(),
        }
    }
}
