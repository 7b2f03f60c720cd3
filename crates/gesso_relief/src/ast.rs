//! Resolved syntax tree node types.
//!
//! The tree is produced by an external parser/resolver and handed to the
//! linter fully owned. Nodes carry byte spans into the original source and,
//! where the resolver could determine it, a [`Resolution`] describing the
//! declaration an identifier or call refers to.
//!
//! All nodes are (de)serializable so that resolver front-ends can hand units
//! over as JSON.

use std::fmt;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::span::{GetSpan, Span};

// ============================================================
// Names, types and resolution
// ============================================================

/// An identifier occurring in declaration position (class name, member
/// name, parameter name, named argument label).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    pub name: CompactString,
    #[serde(default)]
    pub span: Span,
}

impl Name {
    #[inline]
    pub fn new(name: impl Into<CompactString>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.name.as_str()
    }
}

/// A written type annotation or type argument, e.g. `State<List<int>>?`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(default)]
    pub span: Span,
    pub name: CompactString,
    #[serde(default)]
    pub args: Vec<TypeRef>,
    #[serde(default)]
    pub nullable: bool,
}

impl TypeRef {
    /// The last segment of a possibly prefixed name (`ui.State` -> `State`)
    #[inline]
    pub fn simple_name(&self) -> &str {
        match self.name.rfind('.') {
            Some(idx) => &self.name[idx + 1..],
            None => self.name.as_str(),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.args.is_empty() {
            f.write_str("<")?;
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(">")?;
        }
        if self.nullable {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Kind of declaration a reference resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    LocalVariable,
    Parameter,
    /// Field of a class (including the implicit getter/setter of a field)
    Field,
    /// Explicit getter declaration
    Getter,
    /// Explicit setter declaration
    Setter,
    Method,
    Constructor,
    /// Top-level function
    Function,
    TopLevelVariable,
    Class,
    /// Import prefix (`ui` in `ui.state(0)`)
    Prefix,
}

/// Resolved declaration information for a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub kind: SymbolKind,
    /// Name of the type that declares the referenced member, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<CompactString>,
    #[serde(default)]
    pub is_static: bool,
}

impl Resolution {
    #[inline]
    pub fn new(kind: SymbolKind) -> Self {
        Self {
            kind,
            owner: None,
            is_static: false,
        }
    }

    #[inline]
    pub fn member_of(kind: SymbolKind, owner: impl Into<CompactString>) -> Self {
        Self {
            kind,
            owner: Some(owner.into()),
            is_static: false,
        }
    }

    /// Whether this refers to an instance field declared directly on `owner`
    #[inline]
    pub fn is_instance_field_of(&self, owner: &str) -> bool {
        matches!(self.kind, SymbolKind::Field)
            && !self.is_static
            && self.owner.as_deref() == Some(owner)
    }
}

// ============================================================
// Declarations
// ============================================================

/// Declaration modifier keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordKind {
    Static,
    Late,
    Final,
    Const,
    Var,
    Covariant,
    External,
    Abstract,
}

impl KeywordKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Late => "late",
            Self::Final => "final",
            Self::Const => "const",
            Self::Var => "var",
            Self::Covariant => "covariant",
            Self::External => "external",
            Self::Abstract => "abstract",
        }
    }
}

/// A modifier keyword with its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub kind: KeywordKind,
    #[serde(default)]
    pub span: Span,
}

fn find_keyword(keywords: &[Keyword], kind: KeywordKind) -> Option<&Keyword> {
    keywords.iter().find(|k| k.kind == kind)
}

/// Top-level declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Declaration {
    Class(ClassDecl),
    Function(FunctionDecl),
    Variable(VariableDecl),
}

/// Class declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDecl {
    pub span: Span,
    pub name: Name,
    /// Type named in the extends-clause
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superclass: Option<TypeRef>,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub members: Vec<ClassMember>,
}

impl ClassDecl {
    /// Simple name of the direct superclass
    #[inline]
    pub fn superclass_name(&self) -> Option<&str> {
        self.superclass.as_ref().map(TypeRef::simple_name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Field(field) => Some(field),
            _ => None,
        })
    }

    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Method(method) => Some(method),
            _ => None,
        })
    }

    /// Find an instance method by name
    pub fn instance_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods()
            .find(|m| !m.is_static() && m.kind == MethodKind::Method && m.name.as_str() == name)
    }
}

/// Class member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClassMember {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

/// Field declaration, possibly declaring several variables (`int a = 0, b = 1;`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDecl {
    pub span: Span,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
    pub variables: Vec<VariableDeclarator>,
}

impl FieldDecl {
    #[inline]
    pub fn keyword(&self, kind: KeywordKind) -> Option<&Keyword> {
        find_keyword(&self.keywords, kind)
    }

    #[inline]
    pub fn is_static(&self) -> bool {
        self.keyword(KeywordKind::Static).is_some()
    }

    /// `final` or `const`
    #[inline]
    pub fn is_immutable(&self) -> bool {
        self.keyword(KeywordKind::Final).is_some() || self.keyword(KeywordKind::Const).is_some()
    }
}

/// Kind of method-like member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    #[default]
    Method,
    Getter,
    Setter,
    Operator,
}

/// Method declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub span: Span,
    pub name: Name,
    #[serde(default)]
    pub kind: MethodKind,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub params: Vec<Param>,
    pub body: FunctionBody,
}

impl MethodDecl {
    #[inline]
    pub fn is_static(&self) -> bool {
        find_keyword(&self.keywords, KeywordKind::Static).is_some()
    }
}

/// Constructor declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructorDecl {
    pub span: Span,
    /// Named constructor suffix (`Foo.named`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub params: Vec<Param>,
    /// Initializer list entries (`: assert(..), _x = x`)
    #[serde(default)]
    pub initializers: Vec<Expr>,
    pub body: FunctionBody,
}

/// Top-level or local function declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub span: Span,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    #[serde(default)]
    pub params: Vec<Param>,
    pub body: FunctionBody,
}

/// Variable declaration list (top-level or local)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub span: Span,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
    pub variables: Vec<VariableDeclarator>,
}

impl VariableDecl {
    #[inline]
    pub fn keyword(&self, kind: KeywordKind) -> Option<&Keyword> {
        find_keyword(&self.keywords, kind)
    }
}

/// One `name = init` entry of a declaration list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDeclarator {
    pub span: Span,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Expr>,
}

/// Formal parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub span: Span,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
    #[serde(default)]
    pub named: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Expr>,
}

/// Body modifier (`async`, `sync*`, `async*`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyModifier {
    #[default]
    Sync,
    SyncStar,
    Async,
    AsyncStar,
}

/// Body of a function, method or function literal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionBody {
    pub span: Span,
    #[serde(default)]
    pub modifier: BodyModifier,
    pub kind: BodyKind,
}

/// Block body, expression body (`=> expr`), or no body at all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum BodyKind {
    Block(Block),
    Expression(Box<Expr>),
    Empty,
}

impl FunctionBody {
    #[inline]
    pub fn is_async(&self) -> bool {
        matches!(self.modifier, BodyModifier::Async | BodyModifier::AsyncStar)
    }

    #[inline]
    pub fn block(&self) -> Option<&Block> {
        match &self.kind {
            BodyKind::Block(block) => Some(block),
            _ => None,
        }
    }

    #[inline]
    pub fn expression(&self) -> Option<&Expr> {
        match &self.kind {
            BodyKind::Expression(expr) => Some(expr),
            _ => None,
        }
    }
}

// ============================================================
// Statements
// ============================================================

/// Block `{ ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub span: Span,
    #[serde(default)]
    pub statements: Vec<Stmt>,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Stmt {
    Block(Block),
    Expression(ExpressionStmt),
    Variable(VariableDecl),
    /// Destructuring declaration (`final (:a, :b) = record;`)
    Pattern(PatternDecl),
    Function(FunctionDecl),
    If(IfStmt),
    For(ForStmt),
    ForIn(ForInStmt),
    While(WhileStmt),
    DoWhile(DoWhileStmt),
    Switch(SwitchStmt),
    Try(TryStmt),
    Return(ReturnStmt),
    Break(JumpStmt),
    Continue(JumpStmt),
    Empty(EmptyStmt),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStmt {
    pub span: Span,
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternDecl {
    pub span: Span,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    pub pattern: Pattern,
    pub init: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub span: Span,
    pub test: Expr,
    pub consequent: Box<Stmt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate: Option<Box<Stmt>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStmt {
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<Box<Stmt>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<Expr>,
    #[serde(default)]
    pub update: Vec<Expr>,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForInStmt {
    pub span: Span,
    pub binding: Pattern,
    pub iterable: Expr,
    #[serde(default)]
    pub is_await: bool,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub span: Span,
    pub test: Expr,
    pub body: Box<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoWhileStmt {
    pub span: Span,
    pub body: Box<Stmt>,
    pub test: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStmt {
    pub span: Span,
    pub discriminant: Expr,
    #[serde(default)]
    pub cases: Vec<SwitchCase>,
}

/// `case pattern when guard:` followed by statements; `default` has no pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchCase {
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Expr>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TryStmt {
    pub span: Span,
    pub block: Block,
    #[serde(default)]
    pub handlers: Vec<CatchClause>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finalizer: Option<Block>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchClause {
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_type: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param: Option<Name>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JumpStmt {
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<Name>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyStmt {
    pub span: Span,
}

// ============================================================
// Patterns
// ============================================================

/// Destructuring pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Pattern {
    /// Binds a single variable
    Variable(VariablePattern),
    /// `Point(:x, :y)`
    Object(ObjectPattern),
    /// `(a, :b)`
    Record(RecordPattern),
    /// `[a, b, ...rest]`
    List(ListPattern),
    /// Constant or other matching expression (switch cases)
    Constant(ConstantPattern),
    /// `_`
    Wildcard(WildcardPattern),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariablePattern {
    pub span: Span,
    pub name: Name,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectPattern {
    pub span: Span,
    pub ty: TypeRef,
    #[serde(default)]
    pub fields: Vec<PatternField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordPattern {
    pub span: Span,
    #[serde(default)]
    pub fields: Vec<PatternField>,
}

/// `name: pattern`, or `:name` when `name` is omitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPattern {
    pub span: Span,
    #[serde(default)]
    pub elements: Vec<Pattern>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantPattern {
    pub span: Span,
    pub expression: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WildcardPattern {
    pub span: Span,
}

impl Pattern {
    /// Names bound by this pattern, in source order
    pub fn bound_names(&self) -> Vec<&Name> {
        let mut names = Vec::new();
        self.collect_names(&mut names);
        names
    }

    fn collect_names<'a>(&'a self, out: &mut Vec<&'a Name>) {
        match self {
            Pattern::Variable(v) => out.push(&v.name),
            Pattern::Object(o) => o.fields.iter().for_each(|f| f.pattern.collect_names(out)),
            Pattern::Record(r) => r.fields.iter().for_each(|f| f.pattern.collect_names(out)),
            Pattern::List(l) => l.elements.iter().for_each(|p| p.collect_names(out)),
            Pattern::Constant(_) | Pattern::Wildcard(_) => {}
        }
    }

    /// Whether this is a destructuring shape rather than a single binding
    #[inline]
    pub fn is_destructuring(&self) -> bool {
        matches!(
            self,
            Pattern::Object(_) | Pattern::Record(_) | Pattern::List(_)
        )
    }
}

// ============================================================
// Expressions
// ============================================================

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Expr {
    Identifier(Identifier),
    This(ThisExpr),
    Literal(Literal),
    Interpolation(InterpolationExpr),
    List(ListLiteral),
    Map(MapLiteral),
    Spread(SpreadExpr),
    PropertyAccess(PropertyAccess),
    Index(IndexExpr),
    Call(CallExpr),
    New(InstanceCreation),
    Function(FunctionLiteral),
    Assign(AssignExpr),
    Update(UpdateExpr),
    Conditional(ConditionalExpr),
    Switch(SwitchExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
    Await(AwaitExpr),
    Paren(ParenExpr),
    Cascade(CascadeExpr),
    /// Implicit receiver of a cascade section (`..add(x)`)
    CascadeReceiver(CascadeReceiver),
    TypeTest(TypeTestExpr),
    Throw(ThrowExpr),
}

impl Expr {
    /// Strip any enclosing parentheses
    pub fn without_parens(&self) -> &Expr {
        let mut expr = self;
        while let Expr::Paren(paren) = expr {
            expr = &paren.expression;
        }
        expr
    }

    #[inline]
    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self.without_parens() {
            Expr::Identifier(ident) => Some(ident),
            _ => None,
        }
    }

    #[inline]
    pub fn as_function(&self) -> Option<&FunctionLiteral> {
        match self.without_parens() {
            Expr::Function(func) => Some(func),
            _ => None,
        }
    }

    #[inline]
    pub fn is_this(&self) -> bool {
        matches!(self.without_parens(), Expr::This(_))
    }
}

/// Reference to a variable, field, function or type by bare name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub span: Span,
    pub name: CompactString,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Resolution>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThisExpr {
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub span: Span,
    pub value: LiteralValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Symbol(String),
}

/// String with `${...}` parts; only the embedded expressions are kept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpolationExpr {
    pub span: Span,
    #[serde(default)]
    pub expressions: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListLiteral {
    pub span: Span,
    #[serde(default)]
    pub type_args: Vec<TypeRef>,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub elements: Vec<Expr>,
}

/// Map or set literal (a set has entries without values)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLiteral {
    pub span: Span,
    #[serde(default)]
    pub type_args: Vec<TypeRef>,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub entries: Vec<MapEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: Expr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadExpr {
    pub span: Span,
    pub argument: Box<Expr>,
    #[serde(default)]
    pub null_aware: bool,
}

/// `target.property` (also `target?.property`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAccess {
    pub span: Span,
    pub target: Box<Expr>,
    pub property: Name,
    #[serde(default)]
    pub null_aware: bool,
}

/// `target[index]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpr {
    pub span: Span,
    pub target: Box<Expr>,
    pub index: Box<Expr>,
}

/// Function or method invocation `target.method<T>(args)`.
///
/// `target` is `None` for calls of a bare name (`state(0)`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub span: Span,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Box<Expr>>,
    pub method: Name,
    #[serde(default)]
    pub type_args: Vec<TypeRef>,
    #[serde(default)]
    pub args: Vec<Argument>,
    #[serde(default)]
    pub null_aware: bool,
    /// Resolved callee
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved: Option<Resolution>,
}

impl CallExpr {
    #[inline]
    pub fn callee_name(&self) -> &str {
        self.method.as_str()
    }

    /// The single positional argument, when there is exactly one argument
    pub fn sole_argument(&self) -> Option<&Expr> {
        match self.args.as_slice() {
            [arg] if arg.name.is_none() => Some(&arg.value),
            _ => None,
        }
    }

    /// Receiver as a simple identifier (`c` in `c.dispose()`)
    #[inline]
    pub fn receiver_identifier(&self) -> Option<&Identifier> {
        self.target.as_deref().and_then(Expr::as_identifier)
    }
}

/// Positional or named (`label: value`) argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Name>,
    pub value: Expr,
}

/// Constructor invocation `Type.named(args)` (with or without `new`/`const`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceCreation {
    pub span: Span,
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constructor: Option<Name>,
    #[serde(default)]
    pub args: Vec<Argument>,
    #[serde(default)]
    pub is_const: bool,
}

/// Function literal / closure `(params) { ... }` or `(params) => expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionLiteral {
    pub span: Span,
    #[serde(default)]
    pub params: Vec<Param>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AssignOp {
    #[default]
    #[serde(rename = "=")]
    Assign,
    #[serde(rename = "??=")]
    NullAssign,
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Sub,
    #[serde(rename = "*=")]
    Mul,
    #[serde(rename = "/=")]
    Div,
    #[serde(rename = "~/=")]
    IntDiv,
    #[serde(rename = "%=")]
    Rem,
    #[serde(rename = "&=")]
    BitAnd,
    #[serde(rename = "|=")]
    BitOr,
    #[serde(rename = "^=")]
    BitXor,
    #[serde(rename = "<<=")]
    Shl,
    #[serde(rename = ">>=")]
    Shr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignExpr {
    pub span: Span,
    #[serde(default)]
    pub operator: AssignOp,
    pub target: Box<Expr>,
    pub value: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOp {
    #[serde(rename = "++")]
    Increment,
    #[serde(rename = "--")]
    Decrement,
}

/// `++x`, `x--`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateExpr {
    pub span: Span,
    pub operator: UpdateOp,
    #[serde(default)]
    pub prefix: bool,
    pub argument: Box<Expr>,
}

/// `test ? consequent : alternate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionalExpr {
    pub span: Span,
    pub test: Box<Expr>,
    pub consequent: Box<Expr>,
    pub alternate: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchExpr {
    pub span: Span,
    pub discriminant: Box<Expr>,
    #[serde(default)]
    pub cases: Vec<SwitchExprCase>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchExprCase {
    pub span: Span,
    pub pattern: Pattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guard: Option<Expr>,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub span: Span,
    pub operator: CompactString,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Negate,
    BitNot,
    /// Postfix `!`
    NullAssert,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub span: Span,
    pub operator: UnaryOp,
    pub argument: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwaitExpr {
    pub span: Span,
    pub argument: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParenExpr {
    pub span: Span,
    pub expression: Box<Expr>,
}

/// `target..a()..b = c`; each section is rooted at a [`CascadeReceiver`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeExpr {
    pub span: Span,
    pub target: Box<Expr>,
    #[serde(default)]
    pub sections: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeReceiver {
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTestKind {
    Is,
    IsNot,
    As,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTestExpr {
    pub span: Span,
    pub kind: TypeTestKind,
    pub expression: Box<Expr>,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowExpr {
    pub span: Span,
    pub argument: Box<Expr>,
}

// ============================================================
// GetSpan
// ============================================================

macro_rules! impl_get_span {
    ($($ty:ty),* $(,)?) => {
        $(
            impl GetSpan for $ty {
                #[inline]
                fn span(&self) -> Span {
                    self.span
                }
            }
        )*
    };
}

impl_get_span!(
    Name,
    TypeRef,
    Keyword,
    ClassDecl,
    FieldDecl,
    MethodDecl,
    ConstructorDecl,
    FunctionDecl,
    VariableDecl,
    VariableDeclarator,
    Param,
    FunctionBody,
    Block,
    ExpressionStmt,
    PatternDecl,
    IfStmt,
    ForStmt,
    ForInStmt,
    WhileStmt,
    DoWhileStmt,
    SwitchStmt,
    SwitchCase,
    TryStmt,
    CatchClause,
    ReturnStmt,
    JumpStmt,
    EmptyStmt,
    VariablePattern,
    ObjectPattern,
    RecordPattern,
    ListPattern,
    ConstantPattern,
    WildcardPattern,
    Identifier,
    ThisExpr,
    Literal,
    InterpolationExpr,
    ListLiteral,
    MapLiteral,
    SpreadExpr,
    PropertyAccess,
    IndexExpr,
    CallExpr,
    InstanceCreation,
    FunctionLiteral,
    AssignExpr,
    UpdateExpr,
    ConditionalExpr,
    SwitchExpr,
    SwitchExprCase,
    BinaryExpr,
    UnaryExpr,
    AwaitExpr,
    ParenExpr,
    CascadeExpr,
    CascadeReceiver,
    TypeTestExpr,
    ThrowExpr,
);

impl GetSpan for Declaration {
    fn span(&self) -> Span {
        match self {
            Declaration::Class(d) => d.span,
            Declaration::Function(d) => d.span,
            Declaration::Variable(d) => d.span,
        }
    }
}

impl GetSpan for ClassMember {
    fn span(&self) -> Span {
        match self {
            ClassMember::Field(m) => m.span,
            ClassMember::Method(m) => m.span,
            ClassMember::Constructor(m) => m.span,
        }
    }
}

impl GetSpan for Stmt {
    fn span(&self) -> Span {
        match self {
            Stmt::Block(s) => s.span,
            Stmt::Expression(s) => s.span,
            Stmt::Variable(s) => s.span,
            Stmt::Pattern(s) => s.span,
            Stmt::Function(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::For(s) => s.span,
            Stmt::ForIn(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::DoWhile(s) => s.span,
            Stmt::Switch(s) => s.span,
            Stmt::Try(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Break(s) | Stmt::Continue(s) => s.span,
            Stmt::Empty(s) => s.span,
        }
    }
}

impl GetSpan for Pattern {
    fn span(&self) -> Span {
        match self {
            Pattern::Variable(p) => p.span,
            Pattern::Object(p) => p.span,
            Pattern::Record(p) => p.span,
            Pattern::List(p) => p.span,
            Pattern::Constant(p) => p.span,
            Pattern::Wildcard(p) => p.span,
        }
    }
}

impl GetSpan for Expr {
    fn span(&self) -> Span {
        match self {
            Expr::Identifier(e) => e.span,
            Expr::This(e) => e.span,
            Expr::Literal(e) => e.span,
            Expr::Interpolation(e) => e.span,
            Expr::List(e) => e.span,
            Expr::Map(e) => e.span,
            Expr::Spread(e) => e.span,
            Expr::PropertyAccess(e) => e.span,
            Expr::Index(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::New(e) => e.span,
            Expr::Function(e) => e.span,
            Expr::Assign(e) => e.span,
            Expr::Update(e) => e.span,
            Expr::Conditional(e) => e.span,
            Expr::Switch(e) => e.span,
            Expr::Binary(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Await(e) => e.span,
            Expr::Paren(e) => e.span,
            Expr::Cascade(e) => e.span,
            Expr::CascadeReceiver(e) => e.span,
            Expr::TypeTest(e) => e.span,
            Expr::Throw(e) => e.span,
        }
    }
}
