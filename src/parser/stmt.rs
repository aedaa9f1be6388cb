use log::debug;

use crate::{
    ast::{
        ast::{DeclId, ExprId, FunctionId, StmtId},
        expressions::ExprKind,
        statements::{DeclKind, Function, Local, StmtKind, VarDecl},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Position,
};

use super::{parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()) {
        let handler = *handler;
        return handler(parser);
    }

    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(parser.unexpected_detailed("expected a statement"));
    }

    // Assignment or call statement
    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.current_token_kind() == TokenKind::Assignment {
        if !parser.ast.expr(expr).kind.is_location() {
            return Err(parser.unexpected_detailed("only variables and array elements can be assigned"));
        }

        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;
        let span = parser.span_from(start);
        return Ok(parser.ast.push_stmt(StmtKind::Assign { target: expr, value }, span));
    }

    if let ExprKind::Call { .. } = parser.ast.expr(expr).kind {
        let span = parser.span_from(start);
        return Ok(parser.ast.push_stmt(StmtKind::Call(expr), span));
    }

    Err(parser.unexpected_detailed("expected `:=` after assignment target"))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Do)?;
    let body = parse_stmt(parser)?;

    let span = parser.span_from(start);
    Ok(parser.ast.push_stmt(StmtKind::While { condition, body }, span))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.advance().span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Then)?;
    let then_body = parse_stmt(parser)?;

    let kind = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        let else_body = parse_stmt(parser)?;
        StmtKind::IfThenElse {
            condition,
            then_body,
            else_body,
        }
    } else {
        StmtKind::IfThen {
            condition,
            body: then_body,
        }
    };

    let span = parser.span_from(start);
    Ok(parser.ast.push_stmt(kind, span))
}

/// Parses `keyword ( expr )`, returning the start position and the expression.
fn parse_parenthesized(parser: &mut Parser) -> Result<(Position, ExprId), Error> {
    let start = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok((start, expr))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let (start, expr) = parse_parenthesized(parser)?;
    let span = parser.span_from(start);
    Ok(parser.ast.push_stmt(StmtKind::Print(expr), span))
}

pub fn parse_write_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let (start, expr) = parse_parenthesized(parser)?;
    let span = parser.span_from(start);
    Ok(parser.ast.push_stmt(StmtKind::Write(expr), span))
}

pub fn parse_read_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let (start, location) = parse_parenthesized(parser)?;

    if !parser.ast.expr(location).kind.is_location() {
        let span = parser.expr_span(location);
        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: String::from("read"),
                message: String::from("can only read into a variable or array element"),
            },
            span,
        ));
    }

    let span = parser.span_from(start);
    Ok(parser.ast.push_stmt(StmtKind::Read(location), span))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.advance().span.start;
    let value = parse_expr(parser, BindingPower::Default)?;

    let span = parser.span_from(start);
    Ok(parser.ast.push_stmt(StmtKind::Return(value), span))
}

/// `skip` and `break`.
pub fn parse_single_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let token = parser.advance();
    let kind = if token.kind == TokenKind::Break {
        StmtKind::Break
    } else {
        StmtKind::Skip
    };

    Ok(parser.ast.push_stmt(kind, token.span))
}

/// Parses `begin stmt; stmt; ... end` into its list of statements.
///
/// A trailing `;` before `end` is tolerated, as is an empty list.
fn parse_stmt_list(parser: &mut Parser) -> Result<Vec<StmtId>, Error> {
    parser.expect(TokenKind::Begin)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::End {
        statements.push(parse_stmt(parser)?);

        if parser.current_token_kind() == TokenKind::Semicolon {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::End {
            return Err(parser.unexpected_detailed("expected `;` or `end` after statement"));
        }
    }

    parser.expect(TokenKind::End)?;
    Ok(statements)
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<StmtId, Error> {
    let start = parser.get_position();
    let statements = parse_stmt_list(parser)?;

    let span = parser.span_from(start);
    Ok(parser.ast.push_stmt(StmtKind::Block(statements), span))
}

/// `name: type`, shared by parameters and variable declarations.
fn parse_typed_decl(parser: &mut Parser) -> Result<DeclId, Error> {
    let error = parser.unexpected_detailed("expected identifier during declaration");
    let name_token = parser.expect_error(TokenKind::Identifier, Some(error))?;
    parser.expect(TokenKind::Colon)?;
    let parsed = parse_type(parser)?;

    let kind = match parsed.size {
        Some(size) => DeclKind::Array { size },
        None => DeclKind::Scalar,
    };

    let span = parser.span_from(name_token.span.start);
    Ok(parser.ast.push_decl(VarDecl {
        name: name_token.value,
        kind,
        ty: parsed.ty,
        span,
    }))
}

/// `const name = expr;`
fn parse_const_decl(parser: &mut Parser) -> Result<DeclId, Error> {
    let start = parser.advance().span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Define)?;
    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon)?;

    let span = parser.span_from(start);
    Ok(parser.ast.push_decl(VarDecl {
        name,
        kind: DeclKind::Constant { value },
        ty: Type::Unknown,
        span,
    }))
}

/// `fun name(params) locals begin ... end`
pub fn parse_function(parser: &mut Parser) -> Result<FunctionId, Error> {
    let start = parser.expect(TokenKind::Fun)?.span.start;
    let name = parser.expect(TokenKind::Identifier)?.value;
    debug!("parse_function({})", name);

    let mut function = Function::new(name, parser.span_from(start.clone()));

    parser.expect(TokenKind::OpenParen)?;
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            function.params.push(parse_typed_decl(parser)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    while parser.current_token_kind() != TokenKind::Begin {
        match parser.current_token_kind() {
            TokenKind::Const => function.locals.push(Local::Var(parse_const_decl(parser)?)),
            TokenKind::Fun => {
                function.locals.push(Local::Function(parse_function(parser)?));
                if parser.current_token_kind() == TokenKind::Semicolon {
                    parser.advance();
                }
            }
            TokenKind::Identifier => {
                function.locals.push(Local::Var(parse_typed_decl(parser)?));
                parser.expect(TokenKind::Semicolon)?;
            }
            _ => {
                return Err(parser.unexpected_detailed("expected a declaration or `begin`"));
            }
        }
    }

    function.body = parse_stmt_list(parser)?;
    function.span = parser.span_from(start);

    Ok(parser.ast.push_function(function))
}
