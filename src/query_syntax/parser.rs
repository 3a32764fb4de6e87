//! Parser for object builder items using chumsky.
//!
//! Turns the token stream from the lexer into an [`ItemCall`]: the item
//! constructor call followed by a chain of method calls. Checking which
//! items, arguments and methods are allowed happens afterwards.

use chumsky::input::ValueInput;
use chumsky::prelude::*;

use super::lexer::Token;

/// An argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    List(Vec<String>),
    Bool(bool),
}

impl ArgValue {
    pub fn kind(&self) -> &'static str {
        match self {
            ArgValue::Str(_) => "string",
            ArgValue::List(_) => "list of strings",
            ArgValue::Bool(_) => "boolean",
        }
    }
}

/// A positional (`name == None`) or keyword argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: ArgValue,
}

/// `name(arg, key=arg, ...)`
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Argument>,
}

/// `Item(...).method(...).method(...)`
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCall {
    pub item: Call,
    pub methods: Vec<Call>,
}

/// Create the parser.
///
/// Generic over any `ValueInput` producing `Token` values with `SimpleSpan`
/// spans.
pub fn parser<'tokens, 'src: 'tokens, I>(
) -> impl Parser<'tokens, I, ItemCall, extra::Err<Rich<'tokens, Token<'src>, SimpleSpan>>>
where
    I: ValueInput<'tokens, Token = Token<'src>, Span = SimpleSpan>,
{
    let ident = select! {
        Token::Ident(s) => s.to_string(),
    }
    .labelled("identifier");

    let string_lit = select! {
        Token::StringLit(s) => s.to_string(),
    }
    .labelled("string literal");

    let boolean = select! {
        Token::Ident("True") => true,
        Token::Ident("False") => false,
    }
    .labelled("boolean");

    let list = string_lit
        .clone()
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LBracket), just(Token::RBracket));

    let value = choice((
        string_lit.map(ArgValue::Str),
        list.map(ArgValue::List),
        boolean.map(ArgValue::Bool),
    ))
    .labelled("argument value");

    let keyword_arg = ident
        .clone()
        .then_ignore(just(Token::Eq))
        .then(value.clone())
        .map(|(name, value)| Argument {
            name: Some(name),
            value,
        });

    let positional_arg = value.map(|value| Argument { name: None, value });

    let args = keyword_arg
        .or(positional_arg)
        .separated_by(just(Token::Comma))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(just(Token::LParen), just(Token::RParen));

    let call = ident
        .then(args)
        .map(|(name, args)| Call { name, args });

    call.clone()
        .then(
            just(Token::Dot)
                .ignore_then(call)
                .repeated()
                .collect::<Vec<_>>(),
        )
        .then_ignore(end())
        .map(|(item, methods)| ItemCall { item, methods })
}
