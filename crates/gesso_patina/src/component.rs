//! Component detection and builder-closure boundary.

use gesso_relief::ast::{BodyKind, ClassDecl, FunctionBody, FunctionLiteral, MethodDecl, Stmt};
use gesso_relief::ResolvedUnit;
use smallvec::SmallVec;

use crate::catalog::Vocabulary;

/// A component class with its setup routine and builder closure resolved
/// once, shared by every rule.
#[derive(Debug, Clone, Copy)]
pub struct Component<'a> {
    pub class: &'a ClassDecl,
    /// The setup routine, if the class declares one
    pub setup: Option<&'a MethodDecl>,
    /// The function literal returned by setup, if exactly one was found
    pub builder: Option<&'a FunctionLiteral>,
}

impl<'a> Component<'a> {
    /// View `class` as a component if it directly extends the host base
    pub fn from_class(class: &'a ClassDecl, vocabulary: &Vocabulary) -> Option<Self> {
        if class.superclass_name() != Some(vocabulary.host_base.as_str()) {
            return None;
        }
        let setup = class.instance_method(&vocabulary.setup_method);
        let builder = setup.and_then(|method| find_builder_closure(&method.body));
        Some(Self {
            class,
            setup,
            builder,
        })
    }

    /// All components of a unit, in declaration order
    pub fn collect(unit: &'a ResolvedUnit, vocabulary: &Vocabulary) -> Vec<Self> {
        unit.classes()
            .filter_map(|class| {
                let component = Self::from_class(class, vocabulary);
                if component.is_none() {
                    tracing::trace!(class = %class.name.name, "not a component");
                }
                component
            })
            .collect()
    }

    #[inline]
    pub fn name(&self) -> &'a str {
        self.class.name.as_str()
    }

    /// Whether `func` is this component's builder closure
    #[inline]
    pub fn is_builder(&self, func: &FunctionLiteral) -> bool {
        self.builder.is_some_and(|builder| std::ptr::eq(builder, func))
    }
}

/// Locate the builder closure of a setup body.
///
/// Candidates are the top-level `return` statements whose operand is a
/// function literal (or the body expression itself for `=>` bodies). Exactly
/// one candidate is the builder closure; zero or several yield `None`.
pub fn find_builder_closure(body: &FunctionBody) -> Option<&FunctionLiteral> {
    match &body.kind {
        BodyKind::Expression(expr) => expr.as_function(),
        BodyKind::Block(block) => {
            let candidates: SmallVec<[&FunctionLiteral; 2]> = block
                .statements
                .iter()
                .filter_map(|stmt| match stmt {
                    Stmt::Return(ret) => ret.argument.as_ref().and_then(|arg| arg.as_function()),
                    _ => None,
                })
                .collect();
            match candidates.as_slice() {
                [builder] => Some(*builder),
                [] => None,
                _ => {
                    tracing::debug!(
                        candidates = candidates.len(),
                        "ambiguous builder closure, treating setup as closure-free"
                    );
                    None
                }
            }
        }
        BodyKind::Empty => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gesso_relief::{Declaration, GetSpan, NodeBuilder};

    fn setup_class(b: &NodeBuilder, superclass: &str, body: FunctionBody) -> ClassDecl {
        b.class("Counter", Some(superclass), vec![b.method("setup", body)])
    }

    #[test]
    fn test_single_returned_closure_is_builder() {
        let b = NodeBuilder::new();
        let closure = b.arrow(&["context"], b.new_instance("Text", vec![]));
        let closure_span = closure.span();
        let body = b.block_body(vec![b.final_local("count", b.call("state", vec![b.int(0)])), b.ret(closure)]);

        let builder = find_builder_closure(&body).unwrap();
        assert_eq!(builder.span, closure_span);
    }

    #[test]
    fn test_parenthesized_closure() {
        let b = NodeBuilder::new();
        let body = b.block_body(vec![b.ret(b.paren(b.arrow(&["context"], b.null())))]);
        assert!(find_builder_closure(&body).is_some());
    }

    #[test]
    fn test_expression_bodied_setup() {
        let b = NodeBuilder::new();
        let body = b.expr_body(b.arrow(&["context"], b.null()));
        assert!(find_builder_closure(&body).is_some());
    }

    #[test]
    fn test_zero_or_multiple_candidates() {
        let b = NodeBuilder::new();
        let none = b.block_body(vec![b.ret(b.null())]);
        assert!(find_builder_closure(&none).is_none());

        let two = b.block_body(vec![
            b.if_stmt(b.ident("compact"), vec![b.ret(b.arrow(&["c"], b.null()))]),
            b.ret(b.arrow(&["c"], b.null())),
            b.ret(b.arrow(&["c"], b.null())),
        ]);
        assert!(find_builder_closure(&two).is_none());
    }

    #[test]
    fn test_nested_return_is_not_a_candidate() {
        let b = NodeBuilder::new();
        let body = b.block_body(vec![b.if_stmt(
            b.ident("ready"),
            vec![b.ret(b.arrow(&["c"], b.null()))],
        )]);
        assert!(find_builder_closure(&body).is_none());
    }

    #[test]
    fn test_direct_superclass_only() {
        let b = NodeBuilder::new();
        let vocabulary = Vocabulary::default();
        let direct = setup_class(&b, "CompositionWidget", b.block_body(vec![]));
        let indirect = setup_class(&b, "BaseCounter", b.block_body(vec![]));
        assert!(Component::from_class(&direct, &vocabulary).is_some());
        assert!(Component::from_class(&indirect, &vocabulary).is_none());

        let unit = ResolvedUnit::new(
            "counter.dart",
            vec![Declaration::Class(direct), Declaration::Class(indirect)],
        );
        assert_eq!(Component::collect(&unit, &vocabulary).len(), 1);
    }
}
