//! Type parsing implementation.
//!
//! This module handles parsing of type annotations on parameters and
//! variable declarations:
//!
//! - Scalar types (`int`, `float`)
//! - Array types with a size expression (`int[10]`, `float[n + 1]`)

use std::collections::HashMap;

use crate::{
    ast::{ast::ExprId, types::Type},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser};

/// A parsed type annotation. `size` is present for array declarations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedType {
    pub ty: Type,
    pub size: Option<ExprId>,
}

/// Type alias for type handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<ParsedType, Error>;

/// Type alias for type lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Initializes the type parsing lookup table.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Int, parse_symbol_type);
    parser.type_nud(TokenKind::Float, parse_symbol_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<ParsedType, Error> {
    let token = parser.advance();
    let ty = if token.kind == TokenKind::Int {
        Type::Int
    } else {
        Type::Float
    };

    if parser.current_token_kind() != TokenKind::OpenBracket {
        return Ok(ParsedType { ty, size: None });
    }

    parser.advance();
    let size = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(ParsedType {
        ty,
        size: Some(size),
    })
}

pub fn parse_type(parser: &mut Parser) -> Result<ParsedType, Error> {
    let token_kind = parser.current_token_kind();
    match parser.get_type_nud_lookup().get(&token_kind) {
        Some(handler) => {
            let handler = *handler;
            handler(parser)
        }
        None => Err(parser.unexpected_detailed("expected `int` or `float`")),
    }
}
