use std::collections::HashMap;

use crate::{
    ast::ast::{ExprId, StmtId},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{expr::*, parser::Parser, stmt::*};

#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Unary,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<StmtId, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<ExprId, Error>;
pub type LEDHandler = fn(&mut Parser, ExprId, BindingPower) -> Result<ExprId, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led(TokenKind::And, BindingPower::Logical, parse_relation_expr);
    parser.led(TokenKind::Or, BindingPower::Logical, parse_relation_expr);

    // Equality and relational
    parser.led(TokenKind::Equals, BindingPower::Equality, parse_relation_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equality, parse_relation_expr);
    parser.led(TokenKind::Less, BindingPower::Relational, parse_relation_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Relational, parse_relation_expr);
    parser.led(TokenKind::Greater, BindingPower::Relational, parse_relation_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Relational, parse_relation_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    // Literals, symbols and prefixes
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::Plus, parse_prefix_expr);
    parser.nud(TokenKind::Not, parse_not_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);
    parser.nud(TokenKind::Int, parse_type_cast_expr);
    parser.nud(TokenKind::Float, parse_type_cast_expr);

    // Statements
    parser.stmt(TokenKind::While, parse_while_stmt);
    parser.stmt(TokenKind::If, parse_if_stmt);
    parser.stmt(TokenKind::Print, parse_print_stmt);
    parser.stmt(TokenKind::Write, parse_write_stmt);
    parser.stmt(TokenKind::Read, parse_read_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
    parser.stmt(TokenKind::Skip, parse_single_stmt);
    parser.stmt(TokenKind::Break, parse_single_stmt);
    parser.stmt(TokenKind::Begin, parse_block_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
