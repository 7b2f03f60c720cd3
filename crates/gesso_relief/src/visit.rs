//! Read-only traversal over the resolved tree.
//!
//! Every `visit_*` method defaults to the matching `walk_*` function, which
//! visits the node's children in source order. Implementors override the
//! hooks they care about and call the `walk_*` function themselves when they
//! still want to descend.

use crate::ast::*;
use crate::unit::ResolvedUnit;

/// Tree visitor. `'a` is the lifetime of the visited tree, so visitors may
/// keep references to nodes they have seen.
#[allow(unused_variables)]
pub trait Visit<'a>: Sized {
    fn visit_unit(&mut self, unit: &'a ResolvedUnit) {
        walk_unit(self, unit);
    }

    fn visit_declaration(&mut self, decl: &'a Declaration) {
        walk_declaration(self, decl);
    }

    fn visit_class(&mut self, class: &'a ClassDecl) {
        walk_class(self, class);
    }

    fn visit_field(&mut self, field: &'a FieldDecl) {
        walk_field(self, field);
    }

    fn visit_method(&mut self, method: &'a MethodDecl) {
        walk_method(self, method);
    }

    fn visit_constructor(&mut self, ctor: &'a ConstructorDecl) {
        walk_constructor(self, ctor);
    }

    fn visit_function_decl(&mut self, func: &'a FunctionDecl) {
        walk_function_decl(self, func);
    }

    fn visit_variable_decl(&mut self, decl: &'a VariableDecl) {
        walk_variable_decl(self, decl);
    }

    fn visit_variable_declarator(&mut self, declarator: &'a VariableDeclarator) {
        walk_variable_declarator(self, declarator);
    }

    fn visit_param(&mut self, param: &'a Param) {
        walk_param(self, param);
    }

    fn visit_function_body(&mut self, body: &'a FunctionBody) {
        walk_function_body(self, body);
    }

    fn visit_block(&mut self, block: &'a Block) {
        walk_block(self, block);
    }

    fn visit_stmt(&mut self, stmt: &'a Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_pattern_decl(&mut self, decl: &'a PatternDecl) {
        walk_pattern_decl(self, decl);
    }

    fn visit_if_stmt(&mut self, stmt: &'a IfStmt) {
        walk_if_stmt(self, stmt);
    }

    fn visit_for_stmt(&mut self, stmt: &'a ForStmt) {
        walk_for_stmt(self, stmt);
    }

    fn visit_for_in_stmt(&mut self, stmt: &'a ForInStmt) {
        walk_for_in_stmt(self, stmt);
    }

    fn visit_while_stmt(&mut self, stmt: &'a WhileStmt) {
        walk_while_stmt(self, stmt);
    }

    fn visit_do_while_stmt(&mut self, stmt: &'a DoWhileStmt) {
        walk_do_while_stmt(self, stmt);
    }

    fn visit_switch_stmt(&mut self, stmt: &'a SwitchStmt) {
        walk_switch_stmt(self, stmt);
    }

    fn visit_try_stmt(&mut self, stmt: &'a TryStmt) {
        walk_try_stmt(self, stmt);
    }

    fn visit_return_stmt(&mut self, stmt: &'a ReturnStmt) {
        walk_return_stmt(self, stmt);
    }

    fn visit_pattern(&mut self, pattern: &'a Pattern) {
        walk_pattern(self, pattern);
    }

    fn visit_expr(&mut self, expr: &'a Expr) {
        walk_expr(self, expr);
    }

    fn visit_identifier(&mut self, ident: &'a Identifier) {}

    fn visit_this(&mut self, this: &'a ThisExpr) {}

    fn visit_property_access(&mut self, access: &'a PropertyAccess) {
        walk_property_access(self, access);
    }

    fn visit_index(&mut self, index: &'a IndexExpr) {
        walk_index(self, index);
    }

    fn visit_call(&mut self, call: &'a CallExpr) {
        walk_call(self, call);
    }

    fn visit_instance_creation(&mut self, creation: &'a InstanceCreation) {
        walk_instance_creation(self, creation);
    }

    fn visit_function_literal(&mut self, func: &'a FunctionLiteral) {
        walk_function_literal(self, func);
    }

    fn visit_assign(&mut self, assign: &'a AssignExpr) {
        walk_assign(self, assign);
    }

    fn visit_update(&mut self, update: &'a UpdateExpr) {
        walk_update(self, update);
    }

    fn visit_conditional(&mut self, cond: &'a ConditionalExpr) {
        walk_conditional(self, cond);
    }

    fn visit_switch_expr(&mut self, switch: &'a SwitchExpr) {
        walk_switch_expr(self, switch);
    }

    fn visit_cascade(&mut self, cascade: &'a CascadeExpr) {
        walk_cascade(self, cascade);
    }
}

pub fn walk_unit<'a, V: Visit<'a>>(v: &mut V, unit: &'a ResolvedUnit) {
    for decl in &unit.declarations {
        v.visit_declaration(decl);
    }
}

pub fn walk_declaration<'a, V: Visit<'a>>(v: &mut V, decl: &'a Declaration) {
    match decl {
        Declaration::Class(class) => v.visit_class(class),
        Declaration::Function(func) => v.visit_function_decl(func),
        Declaration::Variable(var) => v.visit_variable_decl(var),
    }
}

pub fn walk_class<'a, V: Visit<'a>>(v: &mut V, class: &'a ClassDecl) {
    for member in &class.members {
        match member {
            ClassMember::Field(field) => v.visit_field(field),
            ClassMember::Method(method) => v.visit_method(method),
            ClassMember::Constructor(ctor) => v.visit_constructor(ctor),
        }
    }
}

pub fn walk_field<'a, V: Visit<'a>>(v: &mut V, field: &'a FieldDecl) {
    for declarator in &field.variables {
        v.visit_variable_declarator(declarator);
    }
}

pub fn walk_method<'a, V: Visit<'a>>(v: &mut V, method: &'a MethodDecl) {
    for param in &method.params {
        v.visit_param(param);
    }
    v.visit_function_body(&method.body);
}

pub fn walk_constructor<'a, V: Visit<'a>>(v: &mut V, ctor: &'a ConstructorDecl) {
    for param in &ctor.params {
        v.visit_param(param);
    }
    for init in &ctor.initializers {
        v.visit_expr(init);
    }
    v.visit_function_body(&ctor.body);
}

pub fn walk_function_decl<'a, V: Visit<'a>>(v: &mut V, func: &'a FunctionDecl) {
    for param in &func.params {
        v.visit_param(param);
    }
    v.visit_function_body(&func.body);
}

pub fn walk_variable_decl<'a, V: Visit<'a>>(v: &mut V, decl: &'a VariableDecl) {
    for declarator in &decl.variables {
        v.visit_variable_declarator(declarator);
    }
}

pub fn walk_variable_declarator<'a, V: Visit<'a>>(v: &mut V, declarator: &'a VariableDeclarator) {
    if let Some(init) = &declarator.init {
        v.visit_expr(init);
    }
}

pub fn walk_param<'a, V: Visit<'a>>(v: &mut V, param: &'a Param) {
    if let Some(default) = &param.default_value {
        v.visit_expr(default);
    }
}

pub fn walk_function_body<'a, V: Visit<'a>>(v: &mut V, body: &'a FunctionBody) {
    match &body.kind {
        BodyKind::Block(block) => v.visit_block(block),
        BodyKind::Expression(expr) => v.visit_expr(expr),
        BodyKind::Empty => {}
    }
}

pub fn walk_block<'a, V: Visit<'a>>(v: &mut V, block: &'a Block) {
    for stmt in &block.statements {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a Stmt) {
    match stmt {
        Stmt::Block(block) => v.visit_block(block),
        Stmt::Expression(stmt) => v.visit_expr(&stmt.expression),
        Stmt::Variable(decl) => v.visit_variable_decl(decl),
        Stmt::Pattern(decl) => v.visit_pattern_decl(decl),
        Stmt::Function(func) => v.visit_function_decl(func),
        Stmt::If(stmt) => v.visit_if_stmt(stmt),
        Stmt::For(stmt) => v.visit_for_stmt(stmt),
        Stmt::ForIn(stmt) => v.visit_for_in_stmt(stmt),
        Stmt::While(stmt) => v.visit_while_stmt(stmt),
        Stmt::DoWhile(stmt) => v.visit_do_while_stmt(stmt),
        Stmt::Switch(stmt) => v.visit_switch_stmt(stmt),
        Stmt::Try(stmt) => v.visit_try_stmt(stmt),
        Stmt::Return(stmt) => v.visit_return_stmt(stmt),
        Stmt::Break(_) | Stmt::Continue(_) | Stmt::Empty(_) => {}
    }
}

pub fn walk_pattern_decl<'a, V: Visit<'a>>(v: &mut V, decl: &'a PatternDecl) {
    v.visit_pattern(&decl.pattern);
    v.visit_expr(&decl.init);
}

pub fn walk_if_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a IfStmt) {
    v.visit_expr(&stmt.test);
    v.visit_stmt(&stmt.consequent);
    if let Some(alternate) = &stmt.alternate {
        v.visit_stmt(alternate);
    }
}

pub fn walk_for_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a ForStmt) {
    if let Some(init) = &stmt.init {
        v.visit_stmt(init);
    }
    if let Some(test) = &stmt.test {
        v.visit_expr(test);
    }
    for update in &stmt.update {
        v.visit_expr(update);
    }
    v.visit_stmt(&stmt.body);
}

pub fn walk_for_in_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a ForInStmt) {
    v.visit_pattern(&stmt.binding);
    v.visit_expr(&stmt.iterable);
    v.visit_stmt(&stmt.body);
}

pub fn walk_while_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a WhileStmt) {
    v.visit_expr(&stmt.test);
    v.visit_stmt(&stmt.body);
}

pub fn walk_do_while_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a DoWhileStmt) {
    v.visit_stmt(&stmt.body);
    v.visit_expr(&stmt.test);
}

pub fn walk_switch_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a SwitchStmt) {
    v.visit_expr(&stmt.discriminant);
    for case in &stmt.cases {
        if let Some(pattern) = &case.pattern {
            v.visit_pattern(pattern);
        }
        if let Some(guard) = &case.guard {
            v.visit_expr(guard);
        }
        for stmt in &case.body {
            v.visit_stmt(stmt);
        }
    }
}

pub fn walk_try_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a TryStmt) {
    v.visit_block(&stmt.block);
    for handler in &stmt.handlers {
        v.visit_block(&handler.body);
    }
    if let Some(finalizer) = &stmt.finalizer {
        v.visit_block(finalizer);
    }
}

pub fn walk_return_stmt<'a, V: Visit<'a>>(v: &mut V, stmt: &'a ReturnStmt) {
    if let Some(argument) = &stmt.argument {
        v.visit_expr(argument);
    }
}

pub fn walk_pattern<'a, V: Visit<'a>>(v: &mut V, pattern: &'a Pattern) {
    match pattern {
        Pattern::Object(object) => {
            for field in &object.fields {
                v.visit_pattern(&field.pattern);
            }
        }
        Pattern::Record(record) => {
            for field in &record.fields {
                v.visit_pattern(&field.pattern);
            }
        }
        Pattern::List(list) => {
            for element in &list.elements {
                v.visit_pattern(element);
            }
        }
        Pattern::Constant(constant) => v.visit_expr(&constant.expression),
        Pattern::Variable(_) | Pattern::Wildcard(_) => {}
    }
}

pub fn walk_expr<'a, V: Visit<'a>>(v: &mut V, expr: &'a Expr) {
    match expr {
        Expr::Identifier(ident) => v.visit_identifier(ident),
        Expr::This(this) => v.visit_this(this),
        Expr::Literal(_) | Expr::CascadeReceiver(_) => {}
        Expr::Interpolation(interp) => {
            for part in &interp.expressions {
                v.visit_expr(part);
            }
        }
        Expr::List(list) => {
            for element in &list.elements {
                v.visit_expr(element);
            }
        }
        Expr::Map(map) => {
            for entry in &map.entries {
                v.visit_expr(&entry.key);
                if let Some(value) = &entry.value {
                    v.visit_expr(value);
                }
            }
        }
        Expr::Spread(spread) => v.visit_expr(&spread.argument),
        Expr::PropertyAccess(access) => v.visit_property_access(access),
        Expr::Index(index) => v.visit_index(index),
        Expr::Call(call) => v.visit_call(call),
        Expr::New(creation) => v.visit_instance_creation(creation),
        Expr::Function(func) => v.visit_function_literal(func),
        Expr::Assign(assign) => v.visit_assign(assign),
        Expr::Update(update) => v.visit_update(update),
        Expr::Conditional(cond) => v.visit_conditional(cond),
        Expr::Switch(switch) => v.visit_switch_expr(switch),
        Expr::Binary(binary) => {
            v.visit_expr(&binary.left);
            v.visit_expr(&binary.right);
        }
        Expr::Unary(unary) => v.visit_expr(&unary.argument),
        Expr::Await(await_expr) => v.visit_expr(&await_expr.argument),
        Expr::Paren(paren) => v.visit_expr(&paren.expression),
        Expr::Cascade(cascade) => v.visit_cascade(cascade),
        Expr::TypeTest(test) => v.visit_expr(&test.expression),
        Expr::Throw(throw) => v.visit_expr(&throw.argument),
    }
}

pub fn walk_property_access<'a, V: Visit<'a>>(v: &mut V, access: &'a PropertyAccess) {
    v.visit_expr(&access.target);
}

pub fn walk_index<'a, V: Visit<'a>>(v: &mut V, index: &'a IndexExpr) {
    v.visit_expr(&index.target);
    v.visit_expr(&index.index);
}

pub fn walk_arguments<'a, V: Visit<'a>>(v: &mut V, args: &'a [Argument]) {
    for arg in args {
        v.visit_expr(&arg.value);
    }
}

pub fn walk_call<'a, V: Visit<'a>>(v: &mut V, call: &'a CallExpr) {
    if let Some(target) = &call.target {
        v.visit_expr(target);
    }
    walk_arguments(v, &call.args);
}

pub fn walk_instance_creation<'a, V: Visit<'a>>(v: &mut V, creation: &'a InstanceCreation) {
    walk_arguments(v, &creation.args);
}

pub fn walk_function_literal<'a, V: Visit<'a>>(v: &mut V, func: &'a FunctionLiteral) {
    for param in &func.params {
        v.visit_param(param);
    }
    v.visit_function_body(&func.body);
}

pub fn walk_assign<'a, V: Visit<'a>>(v: &mut V, assign: &'a AssignExpr) {
    v.visit_expr(&assign.target);
    v.visit_expr(&assign.value);
}

pub fn walk_update<'a, V: Visit<'a>>(v: &mut V, update: &'a UpdateExpr) {
    v.visit_expr(&update.argument);
}

pub fn walk_conditional<'a, V: Visit<'a>>(v: &mut V, cond: &'a ConditionalExpr) {
    v.visit_expr(&cond.test);
    v.visit_expr(&cond.consequent);
    v.visit_expr(&cond.alternate);
}

pub fn walk_switch_expr<'a, V: Visit<'a>>(v: &mut V, switch: &'a SwitchExpr) {
    v.visit_expr(&switch.discriminant);
    for case in &switch.cases {
        v.visit_pattern(&case.pattern);
        if let Some(guard) = &case.guard {
            v.visit_expr(guard);
        }
        v.visit_expr(&case.body);
    }
}

pub fn walk_cascade<'a, V: Visit<'a>>(v: &mut V, cascade: &'a CascadeExpr) {
    v.visit_expr(&cascade.target);
    for section in &cascade.sections {
        v.visit_expr(section);
    }
}
