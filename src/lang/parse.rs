use super::{ast::*, token::*, Column, Error, LineNumber};
use crate::error;

type Result<T> = std::result::Result<T, Error>;

/// Parse one statement from a lexed line. Command words (RUN, LIST, ...)
/// are not statements; they are dispatched by the session before parsing.
pub fn parse(line_number: LineNumber, tokens: &[Token]) -> Result<Statement> {
    match Parser::parse(tokens) {
        Err(e) => Err(e.in_line_number(line_number)),
        Ok(r) => Ok(r),
    }
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
    col: Column,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Statement> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
            col: 0..0,
        };
        let statement = match parse.statement() {
            Ok(s) => s,
            Err(e) => return Err(e.in_column(&parse.col)),
        };
        match parse.peek() {
            None => Ok(statement),
            Some(_) => Err(error!(SyntaxError, ..&parse.col; "UNEXPECTED TOKEN")),
        }
    }

    fn column(&self) -> Column {
        self.col.clone()
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        loop {
            self.col.start = self.col.end;
            let t = self.token_stream.next()?;
            self.col.end += t.to_string().chars().count();
            match t {
                Token::Whitespace(_) | Token::Remark(_) => continue,
                _ => return Some(t),
            }
        }
    }

    fn peek(&mut self) -> Option<&&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.next();
        }
        self.peeked.as_ref()
    }

    fn statement(&mut self) -> Result<Statement> {
        match self.peek() {
            Some(Token::Ident(_)) => {
                let column = self.column();
                Statement::r#let(self, column)
            }
            Some(Token::Word(word)) => {
                let word = (*word).clone();
                self.next();
                Statement::for_word(self, &word)
            }
            _ => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn expression(&mut self) -> Result<Expression> {
        self.expr(1)
    }

    fn expr(&mut self, min_precedence: usize) -> Result<Expression> {
        let mut lhs = self.primary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Operator(op)) if Expression::is_binary(op) => (*op).clone(),
                _ => break,
            };
            let precedence = Expression::precedence(&op);
            if precedence < min_precedence {
                break;
            }
            self.next();
            let column = self.column();
            // Exponentiation associates to the right; everything else left.
            let next_min = match op {
                Operator::Caret => precedence,
                _ => precedence + 1,
            };
            let rhs = self.expr(next_min)?;
            lhs = Expression::binary(column, &op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn primary(&mut self) -> Result<Expression> {
        match self.next() {
            Some(Token::Operator(Operator::Minus)) => {
                let column = self.column();
                let expr = self.expr(Expression::UNARY_PRECEDENCE)?;
                Ok(Expression::Negation(column, Box::new(expr)))
            }
            Some(Token::Operator(Operator::Not)) => {
                let column = self.column();
                let expr = self.expr(Expression::UNARY_PRECEDENCE)?;
                Ok(Expression::Not(column, Box::new(expr)))
            }
            Some(Token::LParen) => {
                let expr = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Some(Token::Ident(ident)) => {
                let column = self.column();
                let ident = ident.clone();
                match self.peek() {
                    Some(&&Token::LParen) => Ok(Expression::Function(
                        column,
                        ident,
                        self.expression_list()?,
                    )),
                    _ => Ok(Expression::Var(column, ident)),
                }
            }
            Some(Token::Literal(literal)) => Expression::for_literal(self.column(), literal),
            _ => Err(error!(SyntaxError; "EXPECTED EXPRESSION")),
        }
    }

    fn expression_list(&mut self) -> Result<Vec<Expression>> {
        self.expect(Token::LParen)?;
        let mut v: Vec<Expression> = vec![];
        loop {
            v.push(self.expression()?);
            match self.next() {
                Some(Token::RParen) => return Ok(v),
                Some(Token::Comma) => continue,
                _ => return Err(error!(SyntaxError; "EXPECTED END OR SEPARATOR")),
            }
        }
    }

    fn printer_list(&mut self) -> Result<(Vec<Expression>, bool)> {
        let mut v: Vec<Expression> = vec![];
        let mut linefeed = true;
        loop {
            match self.peek() {
                None => return Ok((v, linefeed)),
                Some(Token::Semicolon) => {
                    linefeed = false;
                    self.next();
                }
                Some(Token::Comma) => {
                    linefeed = false;
                    self.next();
                    v.push(Expression::String(self.column(), "\t".into()));
                }
                _ => {
                    linefeed = true;
                    v.push(self.expression()?);
                }
            }
        }
    }

    fn ident(&mut self) -> Result<(Column, Ident)> {
        match self.next() {
            Some(Token::Ident(i)) => Ok((self.column(), i.clone())),
            _ => Err(error!(SyntaxError; "EXPECTED IDENTIFIER")),
        }
    }

    fn variable(&mut self) -> Result<Variable> {
        let (column, ident) = self.ident()?;
        match self.peek() {
            Some(&&Token::LParen) => Ok(Variable::Array(column, ident, self.expression_list()?)),
            _ => Ok(Variable::Unary(column, ident)),
        }
    }

    fn expect(&mut self, token: Token) -> Result<()> {
        if let Some(t) = self.next() {
            if *t == token {
                return Ok(());
            }
        }
        use Token::*;
        Err(error!(SyntaxError;
            match token {
                Whitespace(_) | Remark(_) => "UNEXPECTED TOKEN",
                Literal(_) => "EXPECTED LITERAL",
                Word(_) => "EXPECTED RESERVED WORD",
                Operator(_) => "EXPECTED OPERATOR",
                Ident(_) => "EXPECTED IDENTIFIER",
                LParen => "EXPECTED LEFT PARENTHESIS",
                RParen => "EXPECTED RIGHT PARENTHESIS",
                Comma => "EXPECTED COMMA",
                Semicolon => "EXPECTED SEMICOLON",
            }
        ))
    }
}

impl Expression {
    const UNARY_PRECEDENCE: usize = 6;

    fn is_binary(op: &Operator) -> bool {
        !matches!(op, Operator::Not)
    }

    fn precedence(op: &Operator) -> usize {
        use Operator::*;
        match op {
            Or => 1,
            And => 2,
            Equal | NotEqual | Less | LessEqual | Greater | GreaterEqual => 3,
            Plus | Minus => 4,
            Multiply | Divide => 5,
            Caret => 7,
            Not => 0,
        }
    }

    fn binary(col: Column, op: &Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let lhs = Box::new(lhs);
        let rhs = Box::new(rhs);
        match op {
            Caret => Expression::Power(col, lhs, rhs),
            Multiply => Expression::Multiply(col, lhs, rhs),
            Divide => Expression::Divide(col, lhs, rhs),
            Plus => Expression::Add(col, lhs, rhs),
            Minus => Expression::Subtract(col, lhs, rhs),
            Equal => Expression::Equal(col, lhs, rhs),
            NotEqual => Expression::NotEqual(col, lhs, rhs),
            Less => Expression::Less(col, lhs, rhs),
            LessEqual => Expression::LessEqual(col, lhs, rhs),
            Greater => Expression::Greater(col, lhs, rhs),
            GreaterEqual => Expression::GreaterEqual(col, lhs, rhs),
            And => Expression::And(col, lhs, rhs),
            Or => Expression::Or(col, lhs, rhs),
            Not => unreachable!("NOT is not a binary operator"),
        }
    }

    fn for_literal(col: Column, literal: &Literal) -> Result<Expression> {
        match literal {
            Literal::Number(s) => match s.parse::<f64>() {
                Ok(n) => Ok(Expression::Number(col, n)),
                Err(_) => Err(error!(SyntaxError, ..&col; "INVALID NUMBER")),
            },
            Literal::String(s) => Ok(Expression::String(col, s.as_str().into())),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: &Word) -> Result<Statement> {
        let column = parse.column();
        use Word::*;
        match word {
            Dim => Self::r#dim(parse, column),
            End => Ok(Statement::End(column)),
            For => Self::r#for(parse, column),
            Gosub => Ok(Statement::Gosub(column, parse.expression()?)),
            Goto => Ok(Statement::Goto(column, parse.expression()?)),
            If => Self::r#if(parse, column),
            Input => Self::r#input(parse, column),
            Let => Self::r#let(parse, column),
            Next => {
                let (_, ident) = parse.ident()?;
                Ok(Statement::Next(column, ident))
            }
            Print => {
                let (items, linefeed) = parse.printer_list()?;
                Ok(Statement::Print(column, items, linefeed))
            }
            Rem => Ok(Statement::Rem(column)),
            Return => Ok(Statement::Return(column)),
            Exit | List | Load | New | Run | Save => {
                Err(error!(SyntaxError; "COMMAND IS NOT A STATEMENT"))
            }
            Step | Then | To => Err(error!(SyntaxError; "EXPECTED STATEMENT")),
        }
    }

    fn r#let(parse: &mut Parser, column: Column) -> Result<Statement> {
        let variable = parse.variable()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let expr = parse.expression()?;
        Ok(Statement::Let(column, variable, expr))
    }

    fn r#dim(parse: &mut Parser, column: Column) -> Result<Statement> {
        let (_, ident) = parse.ident()?;
        let dims = parse.expression_list()?;
        Ok(Statement::Dim(column, ident, dims))
    }

    fn r#for(parse: &mut Parser, column: Column) -> Result<Statement> {
        let (_, ident) = parse.ident()?;
        parse.expect(Token::Operator(Operator::Equal))?;
        let start = parse.expression()?;
        parse.expect(Token::Word(Word::To))?;
        let limit = parse.expression()?;
        let step = match parse.peek() {
            Some(Token::Word(Word::Step)) => {
                parse.next();
                Some(parse.expression()?)
            }
            _ => None,
        };
        Ok(Statement::For(column, ident, start, limit, step))
    }

    fn r#if(parse: &mut Parser, column: Column) -> Result<Statement> {
        let predicate = parse.expression()?;
        parse.expect(Token::Word(Word::Then))?;
        let consequent = match parse.peek() {
            // THEN <line> is shorthand for THEN GOTO <line>.
            Some(Token::Literal(Literal::Number(_))) => {
                let target = match parse.next() {
                    Some(Token::Literal(literal)) => {
                        Expression::for_literal(parse.column(), literal)?
                    }
                    _ => return Err(error!(SyntaxError)),
                };
                Statement::Goto(parse.column(), target)
            }
            _ => parse.statement()?,
        };
        Ok(Statement::If(column, predicate, Box::new(consequent)))
    }

    fn r#input(parse: &mut Parser, column: Column) -> Result<Statement> {
        let prompt = match parse.peek() {
            Some(Token::Literal(Literal::String(_))) => match parse.next() {
                Some(Token::Literal(Literal::String(s))) => {
                    parse.expect(Token::Semicolon)?;
                    Some(s.as_str().into())
                }
                _ => None,
            },
            _ => None,
        };
        let mut variables = vec![parse.variable()?];
        while let Some(Token::Comma) = parse.peek() {
            parse.next();
            variables.push(parse.variable()?);
        }
        Ok(Statement::Input(column, prompt, variables))
    }
}
