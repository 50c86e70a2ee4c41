//! Reader for check expressions.
//!
//! The grammar is a small s-expression language: numbers, double-quoted
//! strings, symbols, `nil`/`true`/`false`, parenthesised lists, `'x` as
//! shorthand for `(quote x)`, and `;` comments running to end of line.

use crate::error::EvalError;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Nil,
    Bool(bool),
    Number(f64),
    Str(String),
    Symbol(String),
    List(Vec<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Quote,
    Str(String),
    Atom(String),
}

/// Read every top-level form in `source`.
pub fn read_all(source: &str) -> Result<Vec<Expr>, EvalError> {
    let tokens = tokenize(source)?;
    let mut pos = 0;
    let mut forms = Vec::new();
    while pos < tokens.len() {
        forms.push(read_form(&tokens, &mut pos)?);
    }
    Ok(forms)
}

/// Read `source`, which must contain exactly one form.
pub fn read_one(source: &str) -> Result<Expr, EvalError> {
    let mut forms = read_all(source)?;
    match forms.len() {
        0 => Err(EvalError::Parse("empty expression".to_string())),
        1 => Ok(forms.remove(0)),
        n => Err(EvalError::Parse(format!(
            "expected a single expression, found {n}"
        ))),
    }
}

fn tokenize(source: &str) -> Result<Vec<Token>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = source.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            c if c.is_whitespace() => {
                chars.next();
            }
            ';' => {
                while chars.next_if(|&c| c != '\n').is_some() {}
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '\'' => {
                chars.next();
                tokens.push(Token::Quote);
            }
            '"' => {
                chars.next();
                let mut text = String::new();
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some('n') => text.push('\n'),
                            Some('t') => text.push('\t'),
                            Some(other) => text.push(other),
                            None => return Err(unterminated()),
                        },
                        Some(other) => text.push(other),
                        None => return Err(unterminated()),
                    }
                }
                tokens.push(Token::Str(text));
            }
            _ => {
                let mut atom = String::new();
                while let Some(c) =
                    chars.next_if(|&c| !c.is_whitespace() && !matches!(c, '(' | ')' | '"' | ';' | '\''))
                {
                    atom.push(c);
                }
                tokens.push(Token::Atom(atom));
            }
        }
    }

    Ok(tokens)
}

fn unterminated() -> EvalError {
    EvalError::Parse("unterminated string literal".to_string())
}

fn read_form(tokens: &[Token], pos: &mut usize) -> Result<Expr, EvalError> {
    let token = tokens
        .get(*pos)
        .ok_or_else(|| EvalError::Parse("unexpected end of input".to_string()))?;
    *pos += 1;

    match token {
        Token::Open => {
            let mut items = Vec::new();
            loop {
                match tokens.get(*pos) {
                    Some(Token::Close) => {
                        *pos += 1;
                        return Ok(Expr::List(items));
                    }
                    Some(_) => items.push(read_form(tokens, pos)?),
                    None => return Err(EvalError::Parse("missing closing parenthesis".to_string())),
                }
            }
        }
        Token::Close => Err(EvalError::Parse("unexpected ')'".to_string())),
        Token::Quote => {
            let quoted = read_form(tokens, pos)?;
            Ok(Expr::List(vec![Expr::Symbol("quote".to_string()), quoted]))
        }
        Token::Str(text) => Ok(Expr::Str(text.clone())),
        Token::Atom(atom) => Ok(atom_to_expr(atom)),
    }
}

fn atom_to_expr(atom: &str) -> Expr {
    match atom {
        "nil" => Expr::Nil,
        "true" | "#t" => Expr::Bool(true),
        "false" | "#f" => Expr::Bool(false),
        _ => match atom.parse::<f64>() {
            Ok(n) if !is_float_keyword(atom) => Expr::Number(n),
            _ => Expr::Symbol(atom.to_string()),
        },
    }
}

/// `f64::from_str` accepts `inf`, `nan` and friends; those stay symbols.
fn is_float_keyword(atom: &str) -> bool {
    atom.trim_start_matches(['+', '-'])
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic())
}
