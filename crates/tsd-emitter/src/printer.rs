//! Indentation-aware printer for synthesized trees.
//!
//! Output is relative to a base indentation: nested constructs (binding
//! pattern elements, block statements) print one indent level deeper, and
//! the first line is only indented when `indent_start` is set. Existing
//! source nodes print their source text unchanged.

use crate::synth::SynthNode;
use tracing::trace;
use tsd_common::{DEFAULT_INDENT_SIZE, FormatCodeSettings};
use tsd_parser::SourceFile;

/// Where printed text starts, in columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndentationOptions {
    /// Indentation of the line the printed text belongs to
    pub base: u32,
    /// Whether the first line is prefixed with `base` spaces
    pub indent_start: bool,
}

impl IndentationOptions {
    pub const fn new(base: u32, indent_start: bool) -> Self {
        IndentationOptions { base, indent_start }
    }

    /// Same base, first line not indented.
    const fn inline(self) -> Self {
        IndentationOptions {
            base: self.base,
            indent_start: false,
        }
    }
}

pub struct Printer<'a> {
    source: Option<&'a SourceFile>,
    indent_size: u32,
}

impl<'a> Printer<'a> {
    pub fn new(source: &'a SourceFile, format_options: &FormatCodeSettings) -> Self {
        Printer {
            source: Some(source),
            indent_size: format_options.indent_size(),
        }
    }

    /// A printer for trees that never reference source nodes.
    pub fn without_source(format_options: &FormatCodeSettings) -> Self {
        Printer {
            source: None,
            indent_size: format_options.indent_size(),
        }
    }

    pub fn indent_size(&self) -> u32 {
        self.indent_size
    }

    pub fn print_node_with_indentation(
        &self,
        node: &SynthNode,
        indentation: IndentationOptions,
    ) -> String {
        let mut out = String::new();
        self.emit(&mut out, node, indentation);
        out
    }

    pub fn print_node(&self, node: &SynthNode) -> String {
        self.print_node_with_indentation(node, IndentationOptions::default())
    }

    /// `indentation` spaces.
    pub fn indentation_string(indentation: u32) -> String {
        " ".repeat(indentation as usize)
    }

    fn increment(&self, indentation: u32) -> u32 {
        indentation + self.indent_size
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn emit(&self, out: &mut String, node: &SynthNode, indentation: IndentationOptions) {
        match node {
            SynthNode::ObjectBindingPattern {
                elements,
                source_range,
            } => self.emit_object_binding_pattern(out, elements, *source_range, indentation),
            SynthNode::BindingElement {
                dot_dot_dot,
                property_name,
                name,
                initializer,
            } => self.emit_binding_element(
                out,
                *dot_dot_dot,
                property_name.as_deref(),
                name,
                initializer.as_deref(),
                indentation,
            ),
            SynthNode::ArrowFunction {
                is_async,
                type_parameters,
                parameters,
                return_type,
                body,
            } => {
                self.write_start_indent(out, indentation);
                if *is_async {
                    out.push_str("async ");
                }
                if let Some(type_parameters) = type_parameters {
                    out.push('<');
                    self.emit_list(out, type_parameters, ", ");
                    out.push('>');
                }
                out.push('(');
                self.emit_list(out, parameters, ", ");
                out.push(')');
                if let Some(return_type) = return_type {
                    out.push_str(": ");
                    self.emit(out, return_type, IndentationOptions::default());
                }
                out.push_str(" => ");
                self.emit(out, body, indentation.inline());
            }
            SynthNode::Block(statements) => self.emit_block(out, statements, indentation),
            SynthNode::ReturnStatement(expression) => {
                self.write_start_indent(out, indentation);
                out.push_str("return");
                if let Some(expression) = expression {
                    out.push(' ');
                    self.emit(out, expression, indentation.inline());
                }
                out.push(';');
            }
            SynthNode::VariableStatement(list) => self.emit(out, list, indentation),
            SynthNode::VariableDeclarationList { kind, declarations } => {
                self.write_start_indent(out, indentation);
                out.push_str(kind.keyword());
                out.push(' ');
                for (i, declaration) in declarations.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.emit(out, declaration, indentation.inline());
                }
                out.push(';');
            }
            SynthNode::VariableDeclaration {
                name,
                exclamation,
                type_annotation,
                initializer,
            } => {
                self.emit(out, name, indentation.inline());
                if *exclamation {
                    out.push('!');
                }
                if let Some(type_annotation) = type_annotation {
                    out.push_str(": ");
                    self.emit(out, type_annotation, indentation.inline());
                }
                if let Some(initializer) = initializer {
                    out.push_str(" = ");
                    self.emit(out, initializer, indentation.inline());
                }
            }
            SynthNode::Identifier(_) | SynthNode::Raw(_) | SynthNode::Ast(_) => {
                self.emit_fallback(out, node, indentation);
            }
        }
    }

    // =========================================================================
    // Binding patterns
    // =========================================================================

    fn emit_object_binding_pattern(
        &self,
        out: &mut String,
        elements: &[SynthNode],
        source_range: Option<(u32, u32)>,
        indentation: IndentationOptions,
    ) {
        self.write_start_indent(out, indentation);
        if elements.is_empty() {
            out.push_str("{}");
            return;
        }
        let multi_line = elements.len() > 1 && !self.is_single_line_range(source_range);
        if !multi_line {
            out.push_str("{ ");
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.emit(out, element, indentation.inline());
            }
            out.push_str(" }");
            return;
        }

        let element_indentation = IndentationOptions::new(self.increment(indentation.base), true);
        out.push('{');
        for (i, element) in elements.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push('\n');
            self.emit(out, element, element_indentation);
        }
        out.push('\n');
        self.write_indent(out, indentation.base);
        out.push('}');
    }

    fn emit_binding_element(
        &self,
        out: &mut String,
        dot_dot_dot: bool,
        property_name: Option<&SynthNode>,
        name: &SynthNode,
        initializer: Option<&SynthNode>,
        indentation: IndentationOptions,
    ) {
        self.write_start_indent(out, indentation);
        if dot_dot_dot {
            out.push_str("...");
        }
        if let Some(property_name) = property_name {
            self.emit(out, property_name, indentation.inline());
            out.push_str(": ");
        }
        self.emit(out, name, indentation.inline());
        if let Some(initializer) = initializer {
            out.push_str(" = ");
            self.emit(out, initializer, indentation.inline());
        }
    }

    /// A pattern replacing source text that fits on one line stays on one
    /// line. Synthesized patterns have no source range.
    fn is_single_line_range(&self, source_range: Option<(u32, u32)>) -> bool {
        let (Some((pos, end)), Some(source)) = (source_range, self.source) else {
            return false;
        };
        let text = source.text();
        let end = (end as usize).min(text.len());
        let start = (pos as usize).min(end);
        text.get(start..end).is_some_and(|slice| !slice.contains('\n'))
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn emit_block(&self, out: &mut String, statements: &[SynthNode], indentation: IndentationOptions) {
        self.write_start_indent(out, indentation);
        if statements.is_empty() {
            out.push_str("{}");
            return;
        }
        let statement_indentation = IndentationOptions::new(self.increment(indentation.base), true);
        out.push('{');
        for statement in statements {
            out.push('\n');
            self.emit(out, statement, statement_indentation);
        }
        out.push('\n');
        self.write_indent(out, indentation.base);
        out.push('}');
    }

    // =========================================================================
    // Fallback
    // =========================================================================

    /// Leaves and existing source nodes print their text, indented only when
    /// `indent_start` is set.
    fn emit_fallback(&self, out: &mut String, node: &SynthNode, indentation: IndentationOptions) {
        self.write_start_indent(out, indentation);
        match node {
            SynthNode::Identifier(text) | SynthNode::Raw(text) => out.push_str(text),
            SynthNode::Ast(index) => match self.source {
                Some(source) => out.push_str(source.node_text(*index)),
                None => trace!(node = index.0, "source node printed without a source file"),
            },
            _ => {}
        }
    }

    fn emit_list(&self, out: &mut String, nodes: &[SynthNode], separator: &str) {
        for (i, node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push_str(separator);
            }
            self.emit(out, node, IndentationOptions::default());
        }
    }

    fn write_start_indent(&self, out: &mut String, indentation: IndentationOptions) {
        if indentation.indent_start {
            self.write_indent(out, indentation.base);
        }
    }

    fn write_indent(&self, out: &mut String, columns: u32) {
        out.extend(std::iter::repeat_n(' ', columns as usize));
    }
}

impl Default for Printer<'_> {
    fn default() -> Self {
        Printer {
            source: None,
            indent_size: DEFAULT_INDENT_SIZE,
        }
    }
}
