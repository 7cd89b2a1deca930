use super::{token::*, Error, LineNumber, MaxValue};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Tokenize one line of source text. Returns the leading line number, if
/// any, and the tokens after it. Unclassifiable input is a lexical error
/// carrying the column where it starts.
pub fn lex(s: &str) -> Result<(LineNumber, Vec<Token>)> {
    BasicLexer::lex(s)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    pos: usize,
    remark: bool,
}

impl<'a> BasicLexer<'a> {
    fn lex(s: &str) -> Result<(LineNumber, Vec<Token>)> {
        let (line_number, rest, offset) = take_line_number(s)?;
        let mut lexer = BasicLexer {
            chars: rest.chars().peekable(),
            pos: offset,
            remark: false,
        };
        let mut tokens: Vec<Token> = vec![];
        while let Some(token) = lexer.token()? {
            tokens.push(token);
        }
        if let Some(Token::Whitespace(_)) = tokens.last() {
            tokens.pop();
        }
        Ok((line_number, tokens))
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        self.pos += 1;
        Some(ch)
    }

    fn token(&mut self) -> Result<Option<Token>> {
        let pk = match self.chars.peek() {
            Some(pk) => *pk,
            None => return Ok(None),
        };
        if self.remark {
            let mut s = String::new();
            while let Some(ch) = self.bump() {
                s.push(ch);
            }
            return Ok(Some(Token::Remark(s.trim_end().to_string())));
        }
        let token = if is_basic_whitespace(pk) {
            self.whitespace()
        } else if is_basic_digit(pk) || pk == '.' {
            self.number()
        } else if is_basic_alphabetic(pk) {
            let token = self.alphabetic();
            if let Ok(Token::Word(Word::Rem)) = token {
                self.remark = true;
            }
            token
        } else if pk == '"' {
            self.string()
        } else {
            self.minutia()
        }?;
        Ok(Some(token))
    }

    fn whitespace(&mut self) -> Result<Token> {
        let mut len = 0;
        loop {
            self.bump();
            len += 1;
            match self.chars.peek() {
                Some(pk) if is_basic_whitespace(*pk) => continue,
                _ => return Ok(Token::Whitespace(len)),
            }
        }
    }

    fn number(&mut self) -> Result<Token> {
        let mut s = String::new();
        let mut decimal = false;
        let mut exp = false;
        loop {
            let mut ch = match self.bump() {
                Some(c) => c,
                None => break,
            };
            if ch == 'e' {
                ch = 'E'
            }
            s.push(ch);
            if ch == '.' {
                decimal = true;
            }
            if let Some(pk) = self.chars.peek() {
                if ch == 'E' {
                    exp = true;
                    if *pk == '+' || *pk == '-' {
                        continue;
                    }
                }
                if is_basic_digit(*pk) {
                    continue;
                }
                if !decimal && !exp && *pk == '.' {
                    continue;
                }
                if !exp && (*pk == 'E' || *pk == 'e') {
                    continue;
                }
            }
            break;
        }
        Ok(Token::Literal(Literal::Number(s)))
    }

    fn string(&mut self) -> Result<Token> {
        let start = self.pos;
        let mut s = String::new();
        self.bump();
        loop {
            match self.bump() {
                Some('"') => {
                    // A doubled quote is a literal quote character.
                    if let Some('"') = self.chars.peek() {
                        self.bump();
                        s.push('"');
                        continue;
                    }
                    return Ok(Token::Literal(Literal::String(s)));
                }
                Some(ch) => s.push(ch),
                None => {
                    return Err(
                        error!(UnrecognizedCharacter, ..&(start..self.pos); "UNTERMINATED STRING"),
                    )
                }
            }
        }
    }

    fn alphabetic(&mut self) -> Result<Token> {
        let mut s = String::new();
        let mut digit = false;
        loop {
            let ch = match self.bump() {
                Some(ch) => ch.to_ascii_uppercase(),
                None => break,
            };
            s.push(ch);
            if is_basic_digit(ch) {
                digit = true;
            }
            // Reserved words bind greedily: FORI=1TO3 is FOR I = 1 TO 3.
            if let Some(token) = Token::from_string(&s) {
                return Ok(token);
            }
            if ch == '$' {
                return Ok(Token::Ident(Ident::String(s.into())));
            }
            if ch == '%' {
                return Ok(Token::Ident(Ident::Integer(s.into())));
            }
            if let Some(pk) = self.chars.peek() {
                if is_basic_alphabetic(*pk) {
                    if digit {
                        break;
                    }
                    continue;
                }
                if is_basic_digit(*pk) || *pk == '$' || *pk == '%' {
                    continue;
                }
            }
            break;
        }
        Ok(Token::Ident(Ident::Plain(s.into())))
    }

    fn minutia(&mut self) -> Result<Token> {
        let start = self.pos;
        let ch = match self.bump() {
            Some(ch) => ch,
            None => return Err(error!(InternalError, ..&(start..start))),
        };
        let s: String = ch.to_string();
        // Two-character operators match greedily before single ones.
        if let Some(pk) = self.chars.peek() {
            let mut two = s.clone();
            two.push(*pk);
            if let Some(token) = Token::from_string(&two) {
                self.bump();
                return Ok(token);
            }
        }
        if let Some(token) = Token::from_string(&s) {
            return Ok(token);
        }
        Err(error!(UnrecognizedCharacter, ..&(start..self.pos); s))
    }
}

fn take_line_number(s: &str) -> Result<(LineNumber, &str, usize)> {
    let trimmed = s.trim_start_matches(is_basic_whitespace);
    let indent = s.chars().count() - trimmed.chars().count();
    let digits = trimmed
        .chars()
        .take_while(|c| is_basic_digit(*c))
        .count();
    if digits == 0 {
        return Ok((None, s, 0));
    }
    let (number, rest) = trimmed.split_at(digits);
    // A digit run is only a line number at a clean token boundary.
    // 1.5E3 is a fractional literal on a direct line, not line 1.
    let mut boundary = rest.chars();
    match boundary.next() {
        Some('.') => return Ok((None, s, 0)),
        Some('E') | Some('e') => {
            if let Some(c) = boundary.next() {
                if is_basic_digit(c) || c == '+' || c == '-' {
                    return Ok((None, s, 0));
                }
            }
        }
        _ => {}
    }
    match number.parse::<u16>() {
        Ok(n) if n <= LineNumber::max_value() => {
            // One space after the line number belongs to the prefix.
            let mut consumed = indent + digits;
            let rest = match rest.strip_prefix(' ') {
                Some(rest) => {
                    consumed += 1;
                    rest
                }
                None => rest,
            };
            Ok((Some(n), rest, consumed))
        }
        _ => Err(error!(Overflow, ..&(indent..indent + digits); "INVALID LINE NUMBER")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> (LineNumber, Vec<Token>) {
        lex(s).unwrap()
    }

    fn render(number: LineNumber, tokens: &[Token]) -> String {
        let text: String = tokens.iter().map(|t| t.to_string()).collect();
        match number {
            Some(n) => format!("{} {}", n, text),
            None => text,
        }
    }

    #[test]
    fn test_line_number() {
        let (number, t) = tokens("10 PRINT 1");
        assert_eq!(number, Some(10));
        assert_eq!(t[0], Token::Word(Word::Print));
        let (number, _) = tokens("PRINT 1");
        assert_eq!(number, None);
        let (number, t) = tokens("20");
        assert_eq!(number, Some(20));
        assert!(t.is_empty());
    }

    #[test]
    fn test_line_number_overflow() {
        assert!(lex("99999 PRINT 1").is_err());
    }

    #[test]
    fn test_keyword_crunch() {
        let (_, t) = tokens("fori=1to3");
        assert_eq!(
            t,
            vec![
                Token::Word(Word::For),
                Token::Ident(Ident::Plain("I".into())),
                Token::Operator(Operator::Equal),
                Token::Literal(Literal::Number("1".to_string())),
                Token::Word(Word::To),
                Token::Literal(Literal::Number("3".to_string())),
            ]
        );
    }

    #[test]
    fn test_multi_char_operators() {
        let (_, t) = tokens("A<=B");
        assert_eq!(t[1], Token::Operator(Operator::LessEqual));
        let (_, t) = tokens("A<>B");
        assert_eq!(t[1], Token::Operator(Operator::NotEqual));
        let (_, t) = tokens("A<B");
        assert_eq!(t[1], Token::Operator(Operator::Less));
    }

    #[test]
    fn test_string_escape() {
        let (_, t) = tokens(r#"PRINT "SAY ""HI""""#);
        assert_eq!(
            t[2],
            Token::Literal(Literal::String("SAY \"HI\"".to_string()))
        );
        assert!(lex(r#"PRINT "OPEN"#).is_err());
    }

    #[test]
    fn test_remark_is_opaque() {
        let (_, t) = tokens("REM anything at all = + \" unbalanced");
        assert_eq!(t[0], Token::Word(Word::Rem));
        assert_eq!(
            t[1],
            Token::Remark(" anything at all = + \" unbalanced".to_string())
        );
    }

    #[test]
    fn test_unrecognized_character() {
        let error = lex("PRINT @").unwrap_err();
        assert_eq!(error.to_string(), "UNRECOGNIZED CHARACTER (6..7); @");
    }

    #[test]
    fn test_numbers() {
        let (_, t) = tokens("1.5e3 .25 100");
        assert_eq!(t[0], Token::Literal(Literal::Number("1.5E3".to_string())));
        assert_eq!(t[2], Token::Literal(Literal::Number(".25".to_string())));
        assert_eq!(t[4], Token::Literal(Literal::Number("100".to_string())));
    }

    #[test]
    fn test_leading_number_boundary() {
        // A fractional or exponent literal at the start of a direct
        // line keeps all of its digits.
        let (number, t) = tokens("1.5E3");
        assert_eq!(number, None);
        assert_eq!(t[0], Token::Literal(Literal::Number("1.5E3".to_string())));
        let (number, t) = tokens("10E3");
        assert_eq!(number, None);
        assert_eq!(t[0], Token::Literal(Literal::Number("10E3".to_string())));
        // Crunched keywords after the number still read as a line number.
        let (number, t) = tokens("10END");
        assert_eq!(number, Some(10));
        assert_eq!(t[0], Token::Word(Word::End));
        let (number, t) = tokens("10E=3");
        assert_eq!(number, Some(10));
        assert_eq!(t[0], Token::Ident(Ident::Plain("E".into())));
    }

    #[test]
    fn test_round_trip() {
        for s in [
            "10 PRINT \"HELLO, WORLD\"",
            "20 LET A = 3.14 * R ^ 2",
            "30 IF A <> 0 THEN 10",
            "40 FOR I% = 1 TO 10 STEP 2",
            "50 REM remarks survive verbatim",
            "PRINT A$;B,C",
        ]
        .iter()
        {
            let (number, first) = tokens(s);
            let rendered = render(number, &first);
            let (number2, second) = tokens(&rendered);
            assert_eq!(number, number2, "{}", s);
            assert_eq!(first, second, "{}", s);
            assert_eq!(rendered, render(number2, &second), "{}", s);
        }
    }
}
