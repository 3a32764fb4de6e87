//! Object builder text.
//!
//! Query inputs such as filters and saved queries refer to manifest objects
//! with a small call syntax:
//!
//! ```text
//! Dimension('listing__created_at', entity_path=['host']).grain('day')
//! TimeDimension('metric_time', time_granularity_name='month')
//! Entity('listing', entity_path=['host'])
//! Metric('bookings', group_by=['listing__created_at'])
//! ```
//!
//! The text is lexed and parsed with chumsky, then checked against the
//! arguments and methods each item accepts. Any problem is reported as
//! [`InvalidQuerySyntax`].

pub mod description;
pub mod lexer;
pub mod parser;

pub use description::{ObjectBuilderItemDescription, QueryItemType, ValidMethodMapping};

use chumsky::error::Rich;
use chumsky::input::Input;
use chumsky::span::SimpleSpan;
use chumsky::span::Span as _;
use chumsky::Parser as _;
use thiserror::Error;

/// Raised when object builder text cannot be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid query syntax in `{text}`: {message}")]
pub struct InvalidQuerySyntax {
    pub text: String,
    pub message: String,
}

impl InvalidQuerySyntax {
    pub fn new(text: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            message: message.into(),
        }
    }
}

/// Turns object builder text into item descriptions.
#[derive(Debug, Clone, Default)]
pub struct ObjectBuilderTextProcessor;

impl ObjectBuilderTextProcessor {
    /// Describe a single object builder item, using `valid_methods` to decide
    /// which methods each item type accepts.
    pub fn get_description(
        &self,
        text: &str,
        valid_methods: &ValidMethodMapping,
    ) -> Result<ObjectBuilderItemDescription, InvalidQuerySyntax> {
        let call = parse_item_call(text)?;
        description::describe(&call, valid_methods).map_err(|message| InvalidQuerySyntax::new(text, message))
    }
}

/// Describe an item with the default method mapping.
pub fn parse_object_builder_item(text: &str) -> Result<ObjectBuilderItemDescription, InvalidQuerySyntax> {
    ObjectBuilderTextProcessor.get_description(text, &ValidMethodMapping::default())
}

fn parse_item_call(text: &str) -> Result<parser::ItemCall, InvalidQuerySyntax> {
    let (tokens, lex_errs) = lexer::lexer().parse(text).into_output_errors();
    let tokens: Vec<(lexer::Token<'_>, SimpleSpan)> = match tokens {
        Some(tokens) if lex_errs.is_empty() => tokens,
        _ => return Err(InvalidQuerySyntax::new(text, join_errors(lex_errs))),
    };

    let len = text.len();
    let eoi: SimpleSpan = (len..len).into();
    let token_stream = tokens
        .as_slice()
        .map(eoi, |(tok, span): &(lexer::Token<'_>, SimpleSpan)| (tok, span));

    let (call, parse_errs) = parser::parser().parse(token_stream).into_output_errors();
    match call {
        Some(call) if parse_errs.is_empty() => Ok(call),
        _ => Err(InvalidQuerySyntax::new(text, join_errors(parse_errs))),
    }
}

fn join_errors<T: std::fmt::Display>(errs: Vec<Rich<'_, T>>) -> String {
    if errs.is_empty() {
        return "could not parse".to_string();
    }
    errs.iter()
        .map(|e| {
            let span = e.span();
            format!("{} at {}..{}", e, span.start(), span.end())
        })
        .collect::<Vec<_>>()
        .join("; ")
}
