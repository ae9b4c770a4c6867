//! Arithmetic expression evaluator
//!
//! Recursive descent over a token stream, evaluating as it parses. No syntax
//! tree is kept.
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := power (('*' | '/') power)*
//! power      := factor ('^' factor)*         right associative
//! factor     := '(' expression ')' | 'sqrt' '(' expression ')' | number
//! number     := ['+' | '-'] digits ['.' digits] [('e' | 'E') ['+' | '-'] digits]
//! ```
//!
//! Evaluation cannot fail once parsing succeeds: division by zero gives an
//! infinity and `sqrt` of a negative number gives NaN.

use tracing::trace;
use unitcalc_core::ParseError;

/// Deepest allowed nesting of parentheses and `sqrt(...)`
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => format!("number {}", n),
            Token::Ident(name) => format!("'{}'", name),
            Token::Plus => "'+'".to_string(),
            Token::Minus => "'-'".to_string(),
            Token::Star => "'*'".to_string(),
            Token::Slash => "'/'".to_string(),
            Token::Caret => "'^'".to_string(),
            Token::LParen => "'('".to_string(),
            Token::RParen => "')'".to_string(),
        }
    }
}

/// Token plus the character offset it starts at
#[derive(Debug, Clone)]
struct Spanned {
    token: Token,
    pos: usize,
}

/// Tokenize expression string. Whitespace is skipped.
fn tokenize(input: &str) -> Result<Vec<Spanned>, ParseError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '^' => Some(Token::Caret),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => None,
        };
        if let Some(token) = single {
            tokens.push(Spanned { token, pos: i });
            i += 1;
            continue;
        }

        if c.is_whitespace() {
            i += 1;
        } else if c.is_ascii_digit() || c == '.' {
            let (value, end) = lex_number(&chars, i)?;
            tokens.push(Spanned { token: Token::Number(value), pos: i });
            i = end;
        } else if c.is_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let ident: String = chars[start..i].iter().collect();
            tokens.push(Spanned { token: Token::Ident(ident), pos: start });
        } else {
            return Err(ParseError::new(i, "number, operator or parenthesis", format!("'{}'", c)));
        }
    }

    Ok(tokens)
}

/// Lex an unsigned numeric literal starting at `start`.
///
/// Integral literals go through `i64` and are widened; anything with a
/// fraction or exponent (or too large for `i64`) is parsed as `f64`.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), ParseError> {
    let digits = |mut i: usize| {
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = digits(start);
    let mut integral = true;

    if i < chars.len() && chars[i] == '.' {
        integral = false;
        i = digits(i + 1);
    }

    // Exponent only counts when digits follow, so "2e" lexes as 2 then 'e'
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            integral = false;
            i = digits(j);
        }
    }

    let text: String = chars[start..i].iter().collect();
    let parsed = if integral {
        text.parse::<i64>().map(|n| n as f64).or_else(|_| text.parse::<f64>())
    } else {
        text.parse::<f64>()
    };

    parsed
        .map(|value| (value, i))
        .map_err(|_| ParseError::new(start, "number", format!("'{}'", text)))
}

/// `base` raised to a real exponent: `exp(exponent * ln(base))`.
///
/// Uses the platform `powf`, which is exact where the log-exp route rounds.
pub fn real_power(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// The textbook `exp(exponent * ln(base))` formulation.
///
/// Kept for reference and comparison; less accurate than [`real_power`] and
/// NaN for every negative base.
pub fn real_power_log_exp(base: f64, exponent: f64) -> f64 {
    (exponent * base.ln()).exp()
}

/// Non-negative square root. Negative input yields NaN.
pub fn square_root(value: f64) -> f64 {
    value.sqrt()
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Character length of the input, reported for errors at end of input
    end: usize,
    depth: usize,
}

impl Parser {
    fn new(tokens: Vec<Spanned>, end: usize) -> Self {
        Parser { tokens, pos: 0, end, depth: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    /// Error for the current token (or end of input)
    fn unexpected(&self, expected: &str) -> ParseError {
        match self.tokens.get(self.pos) {
            Some(s) => ParseError::new(s.pos, expected, s.token.describe()),
            None => ParseError::end_of_input(self.end, expected),
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), ParseError> {
        if self.peek() == Some(&token) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    // expression = term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ParseError> {
        let mut acc = self.term()?;
        loop {
            match self.peek() {
                Some(Token::Plus) => {
                    self.advance();
                    acc += self.term()?;
                }
                Some(Token::Minus) => {
                    self.advance();
                    acc -= self.term()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    // term = power (('*' | '/') power)*
    fn term(&mut self) -> Result<f64, ParseError> {
        let mut acc = self.power()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.advance();
                    acc *= self.power()?;
                }
                Some(Token::Slash) => {
                    self.advance();
                    acc /= self.power()?;
                }
                _ => return Ok(acc),
            }
        }
    }

    // power = factor ('^' factor)*, folded from the right
    fn power(&mut self) -> Result<f64, ParseError> {
        let base = self.factor()?;
        let mut exponents = Vec::new();
        while self.peek() == Some(&Token::Caret) {
            self.advance();
            exponents.push(self.factor()?);
        }

        let exponent = exponents.into_iter().rev().reduce(|acc, b| real_power(b, acc));
        Ok(exponent.map_or(base, |e| real_power(base, e)))
    }

    // factor = '(' expression ')' | 'sqrt' '(' expression ')' | number
    fn factor(&mut self) -> Result<f64, ParseError> {
        const EXPECTED: &str = "number, '(' or sqrt";

        match self.peek().cloned() {
            Some(Token::LParen) => {
                self.advance();
                let value = self.nested()?;
                self.expect(Token::RParen, "')'")?;
                Ok(value)
            }
            Some(Token::Ident(name)) if name == "sqrt" => {
                self.advance();
                self.expect(Token::LParen, "'(' after sqrt")?;
                let value = self.nested()?;
                self.expect(Token::RParen, "')'")?;
                Ok(square_root(value))
            }
            Some(Token::Plus) | Some(Token::Minus) => {
                let negative = self.peek() == Some(&Token::Minus);
                self.advance();
                match self.peek() {
                    Some(Token::Number(n)) => {
                        let n = *n;
                        self.advance();
                        Ok(if negative { -n } else { n })
                    }
                    _ => Err(self.unexpected("number after sign")),
                }
            }
            Some(Token::Number(n)) => {
                self.advance();
                Ok(n)
            }
            _ => Err(self.unexpected(EXPECTED)),
        }
    }

    /// Parse a parenthesised sub-expression, bounding recursion depth
    fn nested(&mut self) -> Result<f64, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.unexpected("at most 256 nested groups"));
        }
        self.depth += 1;
        let value = self.expression();
        self.depth -= 1;
        value
    }
}

/// Parse and evaluate one arithmetic expression.
///
/// Error positions are character offsets into `input`.
pub fn evaluate(input: &str) -> Result<f64, ParseError> {
    let end = input.chars().count();
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::end_of_input(end, "expression"));
    }

    let mut parser = Parser::new(tokens, end);
    let value = parser.expression()?;

    if parser.pos < parser.tokens.len() {
        return Err(parser.unexpected("operator or end of input"));
    }

    trace!(input, value, "evaluated");
    Ok(value)
}
