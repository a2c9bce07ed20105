//
// Copyright (c) Pirmin Kalberer. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Band math, e.g. `b1/b2+b3` or `(b4-b3)/(b4+b3);b2`.
//!
//! Formulas are separated by `;`, each one yields an output band.

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Clone, Debug, PartialEq)]
enum Node {
    Band(usize),
    Number(f64),
    Neg(Box<Node>),
    Binary(Op, Box<Node>, Box<Node>),
}

impl Node {
    fn eval<F: Fn(usize) -> f64>(&self, band_value: &F) -> f64 {
        match self {
            Node::Band(b) => band_value(*b),
            Node::Number(n) => *n,
            Node::Neg(node) => -node.eval(band_value),
            Node::Binary(op, lhs, rhs) => {
                let (l, r) = (lhs.eval(band_value), rhs.eval(band_value));
                match op {
                    Op::Add => l + r,
                    Op::Sub => l - r,
                    Op::Mul => l * r,
                    Op::Div => l / r,
                    Op::Pow => l.powf(r),
                }
            }
        }
    }
    fn collect_bands(&self, bands: &mut Vec<usize>) {
        match self {
            Node::Band(b) => bands.push(*b),
            Node::Number(_) => {}
            Node::Neg(node) => node.collect_bands(bands),
            Node::Binary(_, lhs, rhs) => {
                lhs.collect_bands(bands);
                rhs.collect_bands(bands);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Token {
    Number(f64),
    Band(usize),
    Op(Op),
    LParen,
    RParen,
}

fn tokenize(formula: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = formula.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;
    while pos < chars.len() {
        let c = chars[pos];
        match c {
            ' ' | '\t' => pos += 1,
            '+' => {
                tokens.push(Token::Op(Op::Add));
                pos += 1;
            }
            '-' => {
                tokens.push(Token::Op(Op::Sub));
                pos += 1;
            }
            '/' => {
                tokens.push(Token::Op(Op::Div));
                pos += 1;
            }
            '*' => {
                if chars.get(pos + 1) == Some(&'*') {
                    tokens.push(Token::Op(Op::Pow));
                    pos += 2;
                } else {
                    tokens.push(Token::Op(Op::Mul));
                    pos += 1;
                }
            }
            '(' => {
                tokens.push(Token::LParen);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::RParen);
                pos += 1;
            }
            'b' | 'B' => {
                let start = pos + 1;
                let mut end = start;
                while end < chars.len() && chars[end].is_ascii_digit() {
                    end += 1;
                }
                let digits: String = chars[start..end].iter().collect();
                let band = digits.parse::<usize>().map_err(|_| {
                    Error::Expression(format!("invalid band reference in '{}'", formula))
                })?;
                if band == 0 {
                    return Err(Error::Expression(format!(
                        "band indexes start at 1 in '{}'",
                        formula
                    )));
                }
                tokens.push(Token::Band(band));
                pos = end;
            }
            c if c.is_ascii_digit() || c == '.' => {
                let start = pos;
                while pos < chars.len() && (chars[pos].is_ascii_digit() || chars[pos] == '.') {
                    pos += 1;
                }
                let literal: String = chars[start..pos].iter().collect();
                let number = literal.parse::<f64>().map_err(|_| {
                    Error::Expression(format!("invalid number '{}' in '{}'", literal, formula))
                })?;
                tokens.push(Token::Number(number));
            }
            _ => {
                return Err(Error::Expression(format!(
                    "unexpected character '{}' in '{}'",
                    c, formula
                )))
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    formula: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }
    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }
    fn error(&self, msg: &str) -> Error {
        Error::Expression(format!("{} in '{}'", msg, self.formula))
    }
    // expr := term (('+'|'-') term)*
    fn expr(&mut self) -> Result<Node> {
        let mut node = self.term()?;
        while let Some(Token::Op(op)) = self.peek().cloned() {
            if op != Op::Add && op != Op::Sub {
                break;
            }
            self.pos += 1;
            node = Node::Binary(op, Box::new(node), Box::new(self.term()?));
        }
        Ok(node)
    }
    // term := unary (('*'|'/') unary)*
    fn term(&mut self) -> Result<Node> {
        let mut node = self.unary()?;
        while let Some(Token::Op(op)) = self.peek().cloned() {
            if op != Op::Mul && op != Op::Div {
                break;
            }
            self.pos += 1;
            node = Node::Binary(op, Box::new(node), Box::new(self.unary()?));
        }
        Ok(node)
    }
    // unary := '-' unary | power
    fn unary(&mut self) -> Result<Node> {
        if let Some(Token::Op(Op::Sub)) = self.peek() {
            self.pos += 1;
            return Ok(Node::Neg(Box::new(self.unary()?)));
        }
        self.power()
    }
    // power := atom ('**' unary)?
    fn power(&mut self) -> Result<Node> {
        let base = self.atom()?;
        if let Some(Token::Op(Op::Pow)) = self.peek() {
            self.pos += 1;
            let exponent = self.unary()?;
            return Ok(Node::Binary(Op::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }
    fn atom(&mut self) -> Result<Node> {
        match self.next() {
            Some(Token::Number(n)) => Ok(Node::Number(n)),
            Some(Token::Band(b)) => Ok(Node::Band(b)),
            Some(Token::LParen) => {
                let node = self.expr()?;
                match self.next() {
                    Some(Token::RParen) => Ok(node),
                    _ => Err(self.error("missing ')'")),
                }
            }
            Some(_) => Err(self.error("unexpected token")),
            None => Err(self.error("unexpected end of expression")),
        }
    }
}

fn parse_formula(formula: &str) -> Result<Node> {
    let mut parser = Parser {
        formula,
        tokens: tokenize(formula)?,
        pos: 0,
    };
    let node = parser.expr()?;
    if parser.pos < parser.tokens.len() {
        return Err(parser.error("trailing input"));
    }
    Ok(node)
}

/// Parsed band math expression
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    formulas: Vec<(String, Node)>,
}

impl Expression {
    pub fn parse(expression: &str) -> Result<Expression> {
        let formulas = expression
            .split(';')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(|f| parse_formula(f).map(|node| (f.to_string(), node)))
            .collect::<Result<Vec<_>>>()?;
        if formulas.is_empty() {
            return Err(Error::Expression("empty expression".to_string()));
        }
        Ok(Expression { formulas })
    }

    /// Referenced bands, sorted and unique
    pub fn bands(&self) -> Vec<usize> {
        let mut bands = Vec::new();
        for (_, node) in &self.formulas {
            node.collect_bands(&mut bands);
        }
        bands.sort_unstable();
        bands.dedup();
        bands
    }

    /// One name per output band
    pub fn names(&self) -> Vec<String> {
        self.formulas.iter().map(|(f, _)| f.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    /// Evaluate all formulas for one pixel
    pub fn eval<F: Fn(usize) -> f64>(&self, band_value: F) -> Vec<f64> {
        self.formulas
            .iter()
            .map(|(_, node)| node.eval(&band_value))
            .collect()
    }
}
