//! Synthesized trees produced by refactors.
//!
//! A `SynthNode` is a fresh value: building one never touches the source
//! tree. Existing source nodes take part only through `SynthNode::Ast`, which
//! the printer renders from the original text.

use tsd_parser::NodeIndex;

/// Keyword of a variable declaration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Const,
    Let,
    Var,
}

impl DeclarationKind {
    pub fn keyword(self) -> &'static str {
        match self {
            DeclarationKind::Const => "const",
            DeclarationKind::Let => "let",
            DeclarationKind::Var => "var",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthNode {
    // =========================================================================
    // Leaves
    // =========================================================================
    /// Identifier: `foo`
    Identifier(String),

    /// Verbatim text, printed as is: `2 + 4`
    Raw(String),

    /// Existing source node, printed from the source text
    Ast(NodeIndex),

    // =========================================================================
    // Binding patterns
    // =========================================================================
    /// Object binding pattern: `{ a, b: c, ...rest }`
    ObjectBindingPattern {
        elements: Vec<SynthNode>,
        /// Source range (pos, end) of the pattern this one replaces; a
        /// single-line source keeps the pattern on one line
        source_range: Option<(u32, u32)>,
    },

    /// Binding element: `...name`, `key: name`, `name = init`
    BindingElement {
        dot_dot_dot: bool,
        property_name: Option<Box<SynthNode>>,
        name: Box<SynthNode>,
        initializer: Option<Box<SynthNode>>,
    },

    // =========================================================================
    // Functions
    // =========================================================================
    /// Arrow function: `<T>(a: T): T => body`
    ArrowFunction {
        is_async: bool,
        type_parameters: Option<Vec<SynthNode>>,
        parameters: Vec<SynthNode>,
        return_type: Option<Box<SynthNode>>,
        body: Box<SynthNode>,
    },

    // =========================================================================
    // Statements
    // =========================================================================
    /// Block: `{ statements }`
    Block(Vec<SynthNode>),

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<SynthNode>>),

    /// Variable statement wrapping a declaration list
    VariableStatement(Box<SynthNode>),

    /// Declaration list: `const a = 1, b = 2;`
    VariableDeclarationList {
        kind: DeclarationKind,
        declarations: Vec<SynthNode>,
    },

    /// Single declaration: `name!: Type = init`
    VariableDeclaration {
        name: Box<SynthNode>,
        exclamation: bool,
        type_annotation: Option<Box<SynthNode>>,
        initializer: Option<Box<SynthNode>>,
    },
}

impl SynthNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a verbatim text node
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// Reference an existing source node
    pub const fn ast(node: NodeIndex) -> Self {
        Self::Ast(node)
    }

    /// Create an object binding pattern with no source range
    pub const fn object_pattern(elements: Vec<Self>) -> Self {
        Self::ObjectBindingPattern {
            elements,
            source_range: None,
        }
    }

    /// Create an object binding pattern that replaces the source range
    /// `(pos, end)`
    pub const fn object_pattern_with_source(elements: Vec<Self>, source_range: (u32, u32)) -> Self {
        Self::ObjectBindingPattern {
            elements,
            source_range: Some(source_range),
        }
    }

    /// Create `name`
    pub fn binding(name: impl Into<String>) -> Self {
        Self::BindingElement {
            dot_dot_dot: false,
            property_name: None,
            name: Box::new(Self::id(name)),
            initializer: None,
        }
    }

    /// Create `...name`
    pub fn rest_binding(name: impl Into<String>) -> Self {
        Self::BindingElement {
            dot_dot_dot: true,
            property_name: None,
            name: Box::new(Self::id(name)),
            initializer: None,
        }
    }

    /// Create `property_name: name [= initializer]`
    pub fn renamed_binding(property_name: Self, name: Self, initializer: Option<Self>) -> Self {
        Self::BindingElement {
            dot_dot_dot: false,
            property_name: Some(Box::new(property_name)),
            name: Box::new(name),
            initializer: initializer.map(Box::new),
        }
    }

    /// Create a block
    pub const fn block(statements: Vec<Self>) -> Self {
        Self::Block(statements)
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Create `kind name = initializer;` with a single declaration
    pub fn variable_statement(kind: DeclarationKind, name: Self, initializer: Self) -> Self {
        Self::VariableStatement(Box::new(Self::VariableDeclarationList {
            kind,
            declarations: vec![Self::VariableDeclaration {
                name: Box::new(name),
                exclamation: false,
                type_annotation: None,
                initializer: Some(Box::new(initializer)),
            }],
        }))
    }

    pub fn is_object_binding_pattern(&self) -> bool {
        matches!(self, Self::ObjectBindingPattern { .. })
    }
}

#[cfg(test)]
mod synth_tests {
    use super::*;

    #[test]
    fn builders_produce_expected_shapes() {
        assert_eq!(
            SynthNode::rest_binding("rest"),
            SynthNode::BindingElement {
                dot_dot_dot: true,
                property_name: None,
                name: Box::new(SynthNode::Identifier("rest".into())),
                initializer: None,
            }
        );
        let pattern = SynthNode::object_pattern_with_source(vec![SynthNode::binding("a")], (4, 9));
        assert!(pattern.is_object_binding_pattern());
        assert!(matches!(
            pattern,
            SynthNode::ObjectBindingPattern {
                source_range: Some((4, 9)),
                ..
            }
        ));
    }

    #[test]
    fn declaration_keywords() {
        assert_eq!(DeclarationKind::Const.keyword(), "const");
        assert_eq!(DeclarationKind::Let.keyword(), "let");
        assert_eq!(DeclarationKind::Var.keyword(), "var");
    }
}
