use crate::{
    ast::{
        ast::ExprId,
        expressions::{BinaryOp, ExprKind, RelationOp, UnaryOp},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<ExprId, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected_detailed("expected an expression")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let token = parser.advance();
            let is_float = token.value.contains(['.', 'e', 'E']);

            let kind = if is_float {
                token.value.parse::<f64>().ok().map(ExprKind::Float)
            } else {
                token.value.parse::<i64>().ok().map(ExprKind::Integer)
            };

            match kind {
                Some(kind) => Ok(parser.ast.push_expr(kind, token.span)),
                None => Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span,
                )),
            }
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            match parser.current_token_kind() {
                TokenKind::OpenParen => parse_call_expr(parser, token.value, token.span.start),
                TokenKind::OpenBracket => {
                    parser.advance();
                    let index = parse_expr(parser, BindingPower::Default)?;
                    parser.expect(TokenKind::CloseBracket)?;

                    let span = parser.span_from(token.span.start);
                    Ok(parser.ast.push_expr(
                        ExprKind::ArrayAccess {
                            name: token.value,
                            index,
                        },
                        span,
                    ))
                }
                _ => Ok(parser
                    .ast
                    .push_expr(ExprKind::Identifier(token.value), token.span)),
            }
        }
        TokenKind::String => {
            let token = parser.advance();
            Ok(parser.ast.push_expr(ExprKind::Str(token.value), token.span))
        }
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: ExprId,
    bp: BindingPower,
) -> Result<ExprId, Error> {
    let operator_token = parser.advance();
    let op = match operator_token.kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Dash => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let span = parser.expr_span(left).to(&parser.expr_span(right));

    Ok(parser.ast.push_expr(ExprKind::Binary { op, left, right }, span))
}

pub fn parse_relation_expr(
    parser: &mut Parser,
    left: ExprId,
    bp: BindingPower,
) -> Result<ExprId, Error> {
    let operator_token = parser.advance();
    let op = match operator_token.kind {
        TokenKind::Less => RelationOp::Less,
        TokenKind::LessEquals => RelationOp::LessEquals,
        TokenKind::Greater => RelationOp::Greater,
        TokenKind::GreaterEquals => RelationOp::GreaterEquals,
        TokenKind::Equals => RelationOp::Equals,
        TokenKind::NotEquals => RelationOp::NotEquals,
        TokenKind::And => RelationOp::And,
        TokenKind::Or => RelationOp::Or,
        _ => {
            return Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: operator_token.value,
                },
                operator_token.span,
            ))
        }
    };

    let right = parse_expr(parser, bp)?;
    let span = parser.expr_span(left).to(&parser.expr_span(right));

    Ok(parser.ast.push_expr(ExprKind::Relation { op, left, right }, span))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let operator_token = parser.advance();
    let op = if operator_token.kind == TokenKind::Dash {
        UnaryOp::Minus
    } else {
        UnaryOp::Plus
    };

    let operand = parse_expr(parser, BindingPower::Unary)?;
    let span = operator_token.span.to(&parser.expr_span(operand));

    Ok(parser.ast.push_expr(ExprKind::Unary { op, operand }, span))
}

/// `not` applies to a whole comparison: `not a < b` is `not (a < b)`.
pub fn parse_not_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let operator_token = parser.advance();
    let inner = parse_expr(parser, BindingPower::Logical)?;
    let span = operator_token.span.to(&parser.expr_span(inner));

    Ok(parser.ast.push_expr(ExprKind::Not(inner), span))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// `int(e)` and `float(e)`.
pub fn parse_type_cast_expr(parser: &mut Parser) -> Result<ExprId, Error> {
    let type_token = parser.advance();
    let target = if type_token.kind == TokenKind::Int {
        Type::Int
    } else {
        Type::Float
    };

    parser.expect(TokenKind::OpenParen)?;
    let operand = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    let span = parser.span_from(type_token.span.start);
    Ok(parser.ast.push_expr(ExprKind::TypeCast { target, operand }, span))
}

pub fn parse_call_expr(
    parser: &mut Parser,
    callee: String,
    start: crate::Position,
) -> Result<ExprId, Error> {
    parser.expect(TokenKind::OpenParen)?;

    let mut arguments = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            arguments.push(parse_expr(parser, BindingPower::Default)?);

            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let span = parser.span_from(start);
    Ok(parser.ast.push_expr(ExprKind::Call { callee, arguments }, span))
}
