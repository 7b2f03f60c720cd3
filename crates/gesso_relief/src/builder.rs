//! Programmatic construction of resolved trees.
//!
//! `NodeBuilder` hands out a fresh, unique span for every node it creates,
//! so nodes built without real source text can still be told apart by
//! position. Resolver integrations that do have positions can overwrite the
//! spans afterwards.

use std::cell::Cell;

use compact_str::CompactString;

use crate::ast::*;
use crate::span::Span;

/// Width of every synthetic span
const SPAN_WIDTH: u32 = 4;

pub struct NodeBuilder {
    next: Cell<u32>,
}

impl Default for NodeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self { next: Cell::new(0) }
    }

    /// Allocate the next unused span
    pub fn span(&self) -> Span {
        let start = self.next.get();
        self.next.set(start + SPAN_WIDTH);
        Span::new(start, start + SPAN_WIDTH - 1)
    }

    pub fn name(&self, name: &str) -> Name {
        Name::new(name, self.span())
    }

    // --------------------------------------------------------
    // Types
    // --------------------------------------------------------

    pub fn ty(&self, name: &str) -> TypeRef {
        self.generic_ty(name, Vec::new())
    }

    pub fn generic_ty(&self, name: &str, args: Vec<TypeRef>) -> TypeRef {
        TypeRef {
            span: self.span(),
            name: CompactString::from(name),
            args,
            nullable: false,
        }
    }

    pub fn keyword(&self, kind: KeywordKind) -> Keyword {
        Keyword {
            kind,
            span: self.span(),
        }
    }

    // --------------------------------------------------------
    // Expressions
    // --------------------------------------------------------

    pub fn ident(&self, name: &str) -> Expr {
        Expr::Identifier(Identifier {
            span: self.span(),
            name: CompactString::from(name),
            resolved: None,
        })
    }

    pub fn ident_resolved(&self, name: &str, resolved: Resolution) -> Expr {
        Expr::Identifier(Identifier {
            span: self.span(),
            name: CompactString::from(name),
            resolved: Some(resolved),
        })
    }

    pub fn this(&self) -> Expr {
        Expr::This(ThisExpr { span: self.span() })
    }

    fn literal(&self, value: LiteralValue) -> Expr {
        Expr::Literal(Literal {
            span: self.span(),
            value,
        })
    }

    pub fn int(&self, value: i64) -> Expr {
        self.literal(LiteralValue::Int(value))
    }

    pub fn string(&self, value: &str) -> Expr {
        self.literal(LiteralValue::String(value.to_string()))
    }

    pub fn bool(&self, value: bool) -> Expr {
        self.literal(LiteralValue::Bool(value))
    }

    pub fn null(&self) -> Expr {
        self.literal(LiteralValue::Null)
    }

    pub fn list(&self, elements: Vec<Expr>) -> Expr {
        Expr::List(ListLiteral {
            span: self.span(),
            type_args: Vec::new(),
            is_const: false,
            elements,
        })
    }

    pub fn spread(&self, argument: Expr) -> Expr {
        Expr::Spread(SpreadExpr {
            span: self.span(),
            argument: Box::new(argument),
            null_aware: false,
        })
    }

    pub fn prop(&self, target: Expr, property: &str) -> Expr {
        Expr::PropertyAccess(PropertyAccess {
            span: self.span(),
            target: Box::new(target),
            property: self.name(property),
            null_aware: false,
        })
    }

    /// `target.value`
    pub fn value_of(&self, target: Expr) -> Expr {
        self.prop(target, "value")
    }

    pub fn index(&self, target: Expr, index: Expr) -> Expr {
        Expr::Index(IndexExpr {
            span: self.span(),
            target: Box::new(target),
            index: Box::new(index),
        })
    }

    fn positional(args: Vec<Expr>) -> Vec<Argument> {
        args.into_iter()
            .map(|value| Argument { name: None, value })
            .collect()
    }

    pub fn named_arg(&self, name: &str, value: Expr) -> Argument {
        Argument {
            name: Some(self.name(name)),
            value,
        }
    }

    /// Call of a bare name resolved as a top-level function (`state(0)`)
    pub fn call(&self, method: &str, args: Vec<Expr>) -> Expr {
        self.call_full(
            None,
            method,
            Vec::new(),
            Self::positional(args),
            Some(Resolution::new(SymbolKind::Function)),
        )
    }

    /// Call of a bare name with explicit type arguments (`provide<T>(x)`)
    pub fn generic_call(&self, method: &str, type_args: Vec<TypeRef>, args: Vec<Expr>) -> Expr {
        self.call_full(
            None,
            method,
            type_args,
            Self::positional(args),
            Some(Resolution::new(SymbolKind::Function)),
        )
    }

    /// `target.method(args)`, unresolved
    pub fn method_call(&self, target: Expr, method: &str, args: Vec<Expr>) -> Expr {
        self.call_full(
            Some(target),
            method,
            Vec::new(),
            Self::positional(args),
            None,
        )
    }

    pub fn call_full(
        &self,
        target: Option<Expr>,
        method: &str,
        type_args: Vec<TypeRef>,
        args: Vec<Argument>,
        resolved: Option<Resolution>,
    ) -> Expr {
        Expr::Call(CallExpr {
            span: self.span(),
            target: target.map(Box::new),
            method: self.name(method),
            type_args,
            args,
            null_aware: false,
            resolved,
        })
    }

    /// `Type(args)`
    pub fn new_instance(&self, ty: &str, args: Vec<Expr>) -> Expr {
        Expr::New(InstanceCreation {
            span: self.span(),
            ty: self.ty(ty),
            constructor: None,
            args: Self::positional(args),
            is_const: false,
        })
    }

    fn params(&self, params: &[&str]) -> Vec<Param> {
        params
            .iter()
            .map(|name| Param {
                span: self.span(),
                name: self.name(name),
                ty: None,
                named: false,
                default_value: None,
            })
            .collect()
    }

    /// `(params) => expr`
    pub fn arrow(&self, params: &[&str], expr: Expr) -> Expr {
        let params = self.params(params);
        Expr::Function(FunctionLiteral {
            span: self.span(),
            params,
            body: self.expr_body(expr),
        })
    }

    /// `(params) { stmts }`
    pub fn closure(&self, params: &[&str], statements: Vec<Stmt>) -> Expr {
        let params = self.params(params);
        Expr::Function(FunctionLiteral {
            span: self.span(),
            params,
            body: self.block_body(statements),
        })
    }

    pub fn assign(&self, target: Expr, value: Expr) -> Expr {
        self.assign_op(AssignOp::Assign, target, value)
    }

    pub fn assign_op(&self, operator: AssignOp, target: Expr, value: Expr) -> Expr {
        Expr::Assign(AssignExpr {
            span: self.span(),
            operator,
            target: Box::new(target),
            value: Box::new(value),
        })
    }

    /// Postfix `argument++` / `argument--`
    pub fn update(&self, operator: UpdateOp, argument: Expr) -> Expr {
        Expr::Update(UpdateExpr {
            span: self.span(),
            operator,
            prefix: false,
            argument: Box::new(argument),
        })
    }

    pub fn conditional(&self, test: Expr, consequent: Expr, alternate: Expr) -> Expr {
        Expr::Conditional(ConditionalExpr {
            span: self.span(),
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    pub fn binary(&self, operator: &str, left: Expr, right: Expr) -> Expr {
        Expr::Binary(BinaryExpr {
            span: self.span(),
            operator: CompactString::from(operator),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn null_assert(&self, argument: Expr) -> Expr {
        Expr::Unary(UnaryExpr {
            span: self.span(),
            operator: UnaryOp::NullAssert,
            argument: Box::new(argument),
        })
    }

    pub fn await_expr(&self, argument: Expr) -> Expr {
        Expr::Await(AwaitExpr {
            span: self.span(),
            argument: Box::new(argument),
        })
    }

    pub fn paren(&self, expression: Expr) -> Expr {
        Expr::Paren(ParenExpr {
            span: self.span(),
            expression: Box::new(expression),
        })
    }

    pub fn cascade(&self, target: Expr, sections: Vec<Expr>) -> Expr {
        Expr::Cascade(CascadeExpr {
            span: self.span(),
            target: Box::new(target),
            sections,
        })
    }

    pub fn cascade_receiver(&self) -> Expr {
        Expr::CascadeReceiver(CascadeReceiver { span: self.span() })
    }

    // --------------------------------------------------------
    // Statements
    // --------------------------------------------------------

    pub fn expr_stmt(&self, expression: Expr) -> Stmt {
        Stmt::Expression(ExpressionStmt {
            span: self.span(),
            expression,
        })
    }

    pub fn local(&self, keyword: Option<KeywordKind>, name: &str, init: Option<Expr>) -> Stmt {
        let keywords = keyword.map(|kind| vec![self.keyword(kind)]).unwrap_or_default();
        let declarator = VariableDeclarator {
            span: self.span(),
            name: self.name(name),
            init,
        };
        Stmt::Variable(VariableDecl {
            span: self.span(),
            keywords,
            ty: None,
            variables: vec![declarator],
        })
    }

    /// `final name = init;`
    pub fn final_local(&self, name: &str, init: Expr) -> Stmt {
        self.local(Some(KeywordKind::Final), name, Some(init))
    }

    /// `var name = init;`
    pub fn var_local(&self, name: &str, init: Expr) -> Stmt {
        self.local(Some(KeywordKind::Var), name, Some(init))
    }

    pub fn variable_pattern(&self, name: &str) -> Pattern {
        Pattern::Variable(VariablePattern {
            span: self.span(),
            name: self.name(name),
            ty: None,
        })
    }

    /// `(:a, :b)`
    pub fn record_pattern(&self, names: &[&str]) -> Pattern {
        let fields = names
            .iter()
            .map(|name| PatternField {
                name: None,
                pattern: self.variable_pattern(name),
            })
            .collect();
        Pattern::Record(RecordPattern {
            span: self.span(),
            fields,
        })
    }

    /// `final pattern = init;`
    pub fn pattern_decl(&self, pattern: Pattern, init: Expr) -> Stmt {
        Stmt::Pattern(PatternDecl {
            span: self.span(),
            keywords: vec![self.keyword(KeywordKind::Final)],
            pattern,
            init,
        })
    }

    pub fn block(&self, statements: Vec<Stmt>) -> Block {
        Block {
            span: self.span(),
            statements,
        }
    }

    pub fn block_stmt(&self, statements: Vec<Stmt>) -> Stmt {
        Stmt::Block(self.block(statements))
    }

    pub fn if_stmt(&self, test: Expr, consequent: Vec<Stmt>) -> Stmt {
        Stmt::If(IfStmt {
            span: self.span(),
            test,
            consequent: Box::new(self.block_stmt(consequent)),
            alternate: None,
        })
    }

    pub fn if_else(&self, test: Expr, consequent: Vec<Stmt>, alternate: Vec<Stmt>) -> Stmt {
        Stmt::If(IfStmt {
            span: self.span(),
            test,
            consequent: Box::new(self.block_stmt(consequent)),
            alternate: Some(Box::new(self.block_stmt(alternate))),
        })
    }

    /// `for (final name in iterable) { body }`
    pub fn for_in(&self, name: &str, iterable: Expr, body: Vec<Stmt>) -> Stmt {
        Stmt::ForIn(ForInStmt {
            span: self.span(),
            binding: self.variable_pattern(name),
            iterable,
            is_await: false,
            body: Box::new(self.block_stmt(body)),
        })
    }

    pub fn while_stmt(&self, test: Expr, body: Vec<Stmt>) -> Stmt {
        Stmt::While(WhileStmt {
            span: self.span(),
            test,
            body: Box::new(self.block_stmt(body)),
        })
    }

    /// Switch whose cases match the given constants, plus an optional default
    pub fn switch_stmt(
        &self,
        discriminant: Expr,
        cases: Vec<(Expr, Vec<Stmt>)>,
        default: Option<Vec<Stmt>>,
    ) -> Stmt {
        let mut switch_cases: Vec<SwitchCase> = cases
            .into_iter()
            .map(|(constant, body)| SwitchCase {
                span: self.span(),
                pattern: Some(Pattern::Constant(ConstantPattern {
                    span: self.span(),
                    expression: constant,
                })),
                guard: None,
                body,
            })
            .collect();
        if let Some(body) = default {
            switch_cases.push(SwitchCase {
                span: self.span(),
                pattern: None,
                guard: None,
                body,
            });
        }
        Stmt::Switch(SwitchStmt {
            span: self.span(),
            discriminant,
            cases: switch_cases,
        })
    }

    pub fn ret(&self, argument: Expr) -> Stmt {
        Stmt::Return(ReturnStmt {
            span: self.span(),
            argument: Some(argument),
        })
    }

    // --------------------------------------------------------
    // Bodies and declarations
    // --------------------------------------------------------

    pub fn block_body(&self, statements: Vec<Stmt>) -> FunctionBody {
        self.body(BodyModifier::Sync, BodyKind::Block(self.block(statements)))
    }

    pub fn expr_body(&self, expr: Expr) -> FunctionBody {
        self.body(BodyModifier::Sync, BodyKind::Expression(Box::new(expr)))
    }

    pub fn body(&self, modifier: BodyModifier, kind: BodyKind) -> FunctionBody {
        FunctionBody {
            span: self.span(),
            modifier,
            kind,
        }
    }

    /// Top-level function declaration
    pub fn function(&self, name: &str, body: FunctionBody) -> Declaration {
        Declaration::Function(FunctionDecl {
            span: self.span(),
            name: self.name(name),
            return_type: None,
            params: Vec::new(),
            body,
        })
    }

    pub fn class(&self, name: &str, superclass: Option<&str>, members: Vec<ClassMember>) -> ClassDecl {
        ClassDecl {
            span: self.span(),
            name: self.name(name),
            superclass: superclass.map(|s| self.ty(s)),
            is_abstract: false,
            members,
        }
    }

    /// Single-variable field declaration such as `final int count = 0;`
    pub fn field(
        &self,
        keywords: &[KeywordKind],
        ty: Option<&str>,
        name: &str,
        init: Option<Expr>,
    ) -> ClassMember {
        let keywords = keywords.iter().map(|kind| self.keyword(*kind)).collect();
        let ty = ty.map(|t| self.ty(t));
        let declarator = VariableDeclarator {
            span: self.span(),
            name: self.name(name),
            init,
        };
        ClassMember::Field(FieldDecl {
            span: self.span(),
            keywords,
            ty,
            variables: vec![declarator],
        })
    }

    pub fn method(&self, name: &str, body: FunctionBody) -> ClassMember {
        ClassMember::Method(MethodDecl {
            span: self.span(),
            name: self.name(name),
            kind: MethodKind::Method,
            keywords: Vec::new(),
            return_type: None,
            params: Vec::new(),
            body,
        })
    }

    pub fn getter(&self, name: &str, body: FunctionBody) -> ClassMember {
        ClassMember::Method(MethodDecl {
            span: self.span(),
            name: self.name(name),
            kind: MethodKind::Getter,
            keywords: Vec::new(),
            return_type: None,
            params: Vec::new(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::GetSpan;

    #[test]
    fn test_spans_are_unique() {
        let b = NodeBuilder::new();
        let first = b.ident("a");
        let second = b.ident("a");
        assert_ne!(first.span(), second.span());
        assert!(!first.span().is_empty());
    }

    #[test]
    fn test_field_keywords() {
        let b = NodeBuilder::new();
        let ClassMember::Field(field) =
            b.field(&[KeywordKind::Static], Some("int"), "counter", Some(b.int(0)))
        else {
            panic!("expected field");
        };
        assert!(field.is_static());
        assert!(!field.is_immutable());
        assert_eq!(field.ty.as_ref().map(|t| t.name.as_str()), Some("int"));
    }
}
