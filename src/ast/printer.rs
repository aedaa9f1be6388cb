//! Indented dump of a (possibly checked) tree.
//!
//! Every expression is printed with the type currently stored on it, so the
//! output of a checked tree shows what the checker inferred.

use super::{
    ast::{Ast, ExprId, FunctionId, StmtId},
    expressions::ExprKind,
    statements::{DeclKind, Local, StmtKind},
};

pub fn dump(ast: &Ast) -> String {
    let mut printer = Printer {
        ast,
        out: String::new(),
        indent: 0,
    };

    printer.line("Program");
    printer.indent += 1;
    for function in ast.program.iter() {
        printer.function(*function);
    }

    printer.out
}

struct Printer<'a> {
    ast: &'a Ast,
    out: String,
    indent: usize,
}

impl Printer<'_> {
    fn line(&mut self, text: &str) {
        self.out.push_str(&"  ".repeat(self.indent));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn function(&mut self, id: FunctionId) {
        let ast = self.ast;
        let function = ast.function(id);
        self.line(&format!(
            "Function {} -> {}",
            function.name, function.return_type
        ));
        self.indent += 1;

        for param in function.params.iter() {
            let decl = ast.decl(*param);
            self.line(&format!("Param {}: {}", decl.name, decl.ty));
        }

        for local in function.locals.iter() {
            match local {
                Local::Var(decl_id) => {
                    let decl = ast.decl(*decl_id);
                    match &decl.kind {
                        DeclKind::Scalar => self.line(&format!("Var {}: {}", decl.name, decl.ty)),
                        DeclKind::Array { size } => {
                            self.line(&format!("Array {}: {}", decl.name, decl.ty));
                            self.nested_expr("size", *size);
                        }
                        DeclKind::Constant { value } => {
                            self.line(&format!("Const {}: {}", decl.name, decl.ty));
                            self.nested_expr("value", *value);
                        }
                    }
                }
                Local::Function(nested) => self.function(*nested),
            }
        }

        for stmt in function.body.iter() {
            self.stmt(*stmt);
        }

        self.indent -= 1;
    }

    fn nested_expr(&mut self, label: &str, id: ExprId) {
        self.indent += 1;
        self.line(&format!("{}:", label));
        self.indent += 1;
        self.expr(id);
        self.indent -= 2;
    }

    fn nested_stmt(&mut self, label: &str, id: StmtId) {
        self.indent += 1;
        self.line(&format!("{}:", label));
        self.indent += 1;
        self.stmt(id);
        self.indent -= 2;
    }

    fn stmt(&mut self, id: StmtId) {
        let ast = self.ast;
        let stmt = ast.stmt(id);
        match &stmt.kind {
            StmtKind::Assign { target, value } => {
                self.line("Assign");
                self.nested_expr("target", *target);
                self.nested_expr("value", *value);
            }
            StmtKind::While { condition, body } => {
                self.line("While");
                self.nested_expr("condition", *condition);
                self.nested_stmt("body", *body);
            }
            StmtKind::IfThen { condition, body } => {
                self.line("If");
                self.nested_expr("condition", *condition);
                self.nested_stmt("then", *body);
            }
            StmtKind::IfThenElse {
                condition,
                then_body,
                else_body,
            } => {
                self.line("If");
                self.nested_expr("condition", *condition);
                self.nested_stmt("then", *then_body);
                self.nested_stmt("else", *else_body);
            }
            StmtKind::Print(expr)
            | StmtKind::Write(expr)
            | StmtKind::Read(expr)
            | StmtKind::Return(expr)
            | StmtKind::Call(expr) => {
                let name = stmt.kind.name();
                self.line(&capitalize(name));
                self.indent += 1;
                self.expr(*expr);
                self.indent -= 1;
            }
            StmtKind::Break => self.line("Break"),
            StmtKind::Skip => self.line("Skip"),
            StmtKind::Block(body) => {
                self.line("Block");
                self.indent += 1;
                for stmt in body.iter() {
                    self.stmt(*stmt);
                }
                self.indent -= 1;
            }
        }
    }

    fn expr(&mut self, id: ExprId) {
        let ast = self.ast;
        let expr = ast.expr(id);
        let ty = expr.ty;
        match &expr.kind {
            ExprKind::Integer(value) => self.line(&format!("Integer {} : {}", value, ty)),
            ExprKind::Float(value) => self.line(&format!("Float {} : {}", value, ty)),
            ExprKind::Str(value) => self.line(&format!("String {:?} : {}", value, ty)),
            ExprKind::Identifier(name) => self.line(&format!("Identifier {} : {}", name, ty)),
            ExprKind::ArrayAccess { name, index } => {
                self.line(&format!("ArrayAccess {} : {}", name, ty));
                self.children(&[*index]);
            }
            ExprKind::Binary { op, left, right } => {
                self.line(&format!("Binary {} : {}", op, ty));
                self.children(&[*left, *right]);
            }
            ExprKind::Relation { op, left, right } => {
                self.line(&format!("Relation {} : {}", op, ty));
                self.children(&[*left, *right]);
            }
            ExprKind::Not(inner) => {
                self.line(&format!("Not : {}", ty));
                self.children(&[*inner]);
            }
            ExprKind::Unary { op, operand } => {
                self.line(&format!("Unary {} : {}", op, ty));
                self.children(&[*operand]);
            }
            ExprKind::TypeCast { target, operand } => {
                self.line(&format!("TypeCast {} : {}", target, ty));
                self.children(&[*operand]);
            }
            ExprKind::Call { callee, arguments } => {
                self.line(&format!("Call {} : {}", callee, ty));
                self.children(arguments);
            }
        }
    }

    fn children(&mut self, children: &[ExprId]) {
        self.indent += 1;
        for child in children {
            self.expr(*child);
        }
        self.indent -= 1;
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
