//! Visitor and transformer traits over the declaration tree.
//!
//! - `visit_*` is called in pre-order, before the declaration's body
//! - `leave_*` is called in post-order, after the body
//! - Statements are visited in source order, and every body is entered
//!
//! Compound statements are walked transparently: declarations inside an `if`
//! or `try` are visited with the same nesting as their enclosing body.

use crate::tree::{ClassDef, FunctionDef, Module, Statement, Suite};

/// Read-only traversal with one method pair per declaration kind.
#[allow(unused_variables)]
pub trait Visitor {
    fn visit_module(&mut self, node: &Module) {}

    fn visit_class_def(&mut self, node: &ClassDef) {}
    fn leave_class_def(&mut self, node: &ClassDef) {}

    fn visit_function_def(&mut self, node: &FunctionDef) {}
    fn leave_function_def(&mut self, node: &FunctionDef) {}

    fn visit_async_function_def(&mut self, node: &FunctionDef) {}
    fn leave_async_function_def(&mut self, node: &FunctionDef) {}
}

/// Walk a [`Module`] and every declaration in it.
pub fn walk_module<V: Visitor>(visitor: &mut V, node: &Module) {
    visitor.visit_module(node);
    walk_suite(visitor, &node.body);
}

/// Walk each statement of a [`Suite`].
pub fn walk_suite<V: Visitor>(visitor: &mut V, node: &Suite) {
    for statement in &node.statements {
        walk_statement(visitor, statement);
    }
}

/// Walk a [`Statement`], dispatching declarations to their visit methods.
pub fn walk_statement<V: Visitor>(visitor: &mut V, node: &Statement) {
    match node {
        Statement::ClassDef(class) => walk_class_def(visitor, class),
        Statement::FunctionDef(function) => walk_function_def(visitor, function),
        Statement::Compound(compound) => {
            for suite in &compound.suites {
                walk_suite(visitor, suite);
            }
        }
        Statement::Expr(_) | Statement::Simple(_) => {}
    }
}

/// Walk a [`ClassDef`] and its body.
pub fn walk_class_def<V: Visitor>(visitor: &mut V, node: &ClassDef) {
    visitor.visit_class_def(node);
    walk_suite(visitor, &node.body);
    visitor.leave_class_def(node);
}

/// Walk a [`FunctionDef`] and its body, using the async methods for
/// `async def`.
pub fn walk_function_def<V: Visitor>(visitor: &mut V, node: &FunctionDef) {
    if node.asynchronous {
        visitor.visit_async_function_def(node);
        walk_suite(visitor, &node.body);
        visitor.leave_async_function_def(node);
    } else {
        visitor.visit_function_def(node);
        walk_suite(visitor, &node.body);
        visitor.leave_function_def(node);
    }
}

/// Rewriting traversal. Each `transform_*` receives the node before its body
/// is walked and returns the node to keep; the walk then continues into the
/// returned node's body.
#[allow(unused_variables)]
pub trait Transformer {
    fn transform_module(&mut self, node: Module) -> Module {
        node
    }

    fn transform_class_def(&mut self, node: ClassDef) -> ClassDef {
        node
    }

    fn transform_function_def(&mut self, node: FunctionDef) -> FunctionDef {
        node
    }

    fn transform_async_function_def(&mut self, node: FunctionDef) -> FunctionDef {
        node
    }
}

/// Transform a [`Module`] and every declaration in it.
pub fn transform_module<T: Transformer>(transformer: &mut T, node: Module) -> Module {
    let mut module = transformer.transform_module(node);
    module.body = transform_suite(transformer, module.body);
    module
}

/// Transform each statement of a [`Suite`].
pub fn transform_suite<T: Transformer>(transformer: &mut T, mut node: Suite) -> Suite {
    node.statements = node
        .statements
        .into_iter()
        .map(|statement| transform_statement(transformer, statement))
        .collect();
    node
}

/// Transform a [`Statement`], descending into declarations and compound
/// statements.
pub fn transform_statement<T: Transformer>(transformer: &mut T, node: Statement) -> Statement {
    match node {
        Statement::ClassDef(class) => {
            let mut class = transformer.transform_class_def(class);
            class.body = transform_suite(transformer, class.body);
            Statement::ClassDef(class)
        }
        Statement::FunctionDef(function) => {
            let mut function = if function.asynchronous {
                transformer.transform_async_function_def(function)
            } else {
                transformer.transform_function_def(function)
            };
            function.body = transform_suite(transformer, function.body);
            Statement::FunctionDef(function)
        }
        Statement::Compound(mut compound) => {
            compound.suites = compound
                .suites
                .into_iter()
                .map(|suite| transform_suite(transformer, suite))
                .collect();
            Statement::Compound(compound)
        }
        other => other,
    }
}
