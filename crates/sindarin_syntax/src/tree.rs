//! Tagged-node syntax tree for Sindarin.
//!
//! The tree is a concrete syntax tree: every node carries its production kind,
//! its source span, and an ordered list of children, where each child is a
//! node or a token optionally tagged with the field name the grammar gives it
//! (`name`, `condition`, `body`, ...). Consumers fetch "the condition of this
//! if-statement" with [`Tree::get_field`] instead of relying on positions.
//!
//! ## Notes
//! - All nodes live in a single arena (`Vec<NodeData>`) owned by the tree and
//!   are freed together when the tree is dropped; node ids never outlive it.
//! - The tree borrows the source buffer; token and node text is always a
//!   slice of the original input, never a copy.
//! - Trivia (comments, whitespace) lives only in the token stream. The
//!   concatenation of every token's text in order reproduces the input.
//! - The tree is immutable after construction; re-parsing builds a new tree.

use crate::diagnostics::Diagnostic;
use crate::lexer::Token;

// ============================================================================
// SPANS
// ============================================================================

/// Source location span (byte offsets, end-exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn len(self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

// ============================================================================
// NODE KINDS AND FIELDS
// ============================================================================

/// Production kind of a syntax-tree node, one per grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    SourceFile,

    // Top-level declarations
    Pragma,
    PragmaPackValue,
    Decorator,
    ImportStatement,
    TypeDeclaration,
    NativeFunctionType,
    StructDeclaration,
    StructBody,
    FieldDeclaration,
    FunctionDeclaration,
    StaticFunctionDeclaration,
    NativeFunctionDeclaration,
    VisibilityModifier,
    ParameterList,
    Parameter,

    // Types
    PrimitiveType,
    NamedType,
    ArrayType,
    FunctionType,
    NamespacedType,

    // Statements
    Block,
    VariableDeclaration,
    AssignmentStatement,
    IfStatement,
    ElseClause,
    ForStatement,
    ForInStatement,
    WhileStatement,
    MatchStatement,
    MatchArm,
    ReturnStatement,
    BreakStatement,
    ContinueStatement,
    ExpressionStatement,

    // Expressions
    ParenthesizedExpression,
    UnaryExpression,
    BinaryExpression,
    CallExpression,
    MemberExpression,
    IndexExpression,
    CastExpression,
    StructLiteral,
    FieldInitializer,
    ArrayLiteral,
    SpawnExpression,
    SyncExpression,
    InterpolatedString,
    Interpolation,

    /// Covers an unrecognized source region after error recovery.
    Error,
}

/// Field names a child can carry, exactly as the grammar tags them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Type,
    Body,
    Value,
    Kind,
    Condition,
    Consequence,
    Alternative,
    Left,
    Right,
    Operator,
    Parameters,
    ReturnType,
    Default,
    Modifier,
    Init,
    Update,
    Variable,
    Iterable,
    Pattern,
    Object,
    Property,
    Index,
    Function,
    Expression,
    Format,
    Path,
    Alias,
    Library,
}

impl Field {
    /// Return the grammar's spelling of this field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Type => "type",
            Field::Body => "body",
            Field::Value => "value",
            Field::Kind => "kind",
            Field::Condition => "condition",
            Field::Consequence => "consequence",
            Field::Alternative => "alternative",
            Field::Left => "left",
            Field::Right => "right",
            Field::Operator => "operator",
            Field::Parameters => "parameters",
            Field::ReturnType => "return_type",
            Field::Default => "default",
            Field::Modifier => "modifier",
            Field::Init => "init",
            Field::Update => "update",
            Field::Variable => "variable",
            Field::Iterable => "iterable",
            Field::Pattern => "pattern",
            Field::Object => "object",
            Field::Property => "property",
            Field::Index => "index",
            Field::Function => "function",
            Field::Expression => "expression",
            Field::Format => "format",
            Field::Path => "path",
            Field::Alias => "alias",
            Field::Library => "library",
        }
    }
}

// ============================================================================
// TREE STORAGE
// ============================================================================

/// Arena index of a node. Only meaningful for the tree that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the tree's token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenId(u32);

impl TokenId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A child element: either a nested node or a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Node(NodeId),
    Token(TokenId),
}

/// A child with its optional field tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Child {
    pub field: Option<Field>,
    pub element: Element,
}

#[derive(Debug)]
pub(crate) struct NodeData {
    kind: NodeKind,
    span: Span,
    children: Vec<Child>,
}

/// Arena-backed accumulator the parser allocates nodes into.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn alloc(&mut self, kind: NodeKind, span: Span, children: Vec<Child>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(NodeData { kind, span, children });
        id
    }

    pub(crate) fn kind(&self, id: NodeId) -> NodeKind {
        self.nodes[id.index()].kind
    }

    pub(crate) fn span(&self, id: NodeId) -> Span {
        self.nodes[id.index()].span
    }

    /// Arena watermark for scoped backtracking.
    pub(crate) fn checkpoint(&self) -> usize {
        self.nodes.len()
    }

    /// Discard nodes allocated since `checkpoint`.
    ///
    /// Safe only while nothing reachable references the discarded ids; the
    /// parser rewinds its children buffers together with the arena.
    pub(crate) fn truncate(&mut self, checkpoint: usize) {
        self.nodes.truncate(checkpoint);
    }

    pub(crate) fn finish<'src>(
        self,
        source: &'src str,
        tokens: Vec<Token>,
        root: NodeId,
        diagnostics: Vec<Diagnostic>,
    ) -> Tree<'src> {
        Tree {
            source,
            tokens,
            nodes: self.nodes,
            root,
            diagnostics,
        }
    }
}

// ============================================================================
// THE TREE
// ============================================================================

/// A parsed source file: root node, full token stream, and diagnostics.
#[derive(Debug)]
pub struct Tree<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    nodes: Vec<NodeData>,
    root: NodeId,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Tree<'src> {
    /// The root `SourceFile` node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The original source text this tree was parsed from.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Every token of the input in order, trivia included.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Lexical and syntax errors collected during the parse.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn kind(&self, node: NodeId) -> NodeKind {
        self.nodes[node.index()].kind
    }

    pub fn span(&self, node: NodeId) -> Span {
        self.nodes[node.index()].span
    }

    /// Ordered children of a node, anonymous tokens included.
    pub fn children(&self, node: NodeId) -> &[Child] {
        &self.nodes[node.index()].children
    }

    /// Fetch the first child tagged with `field`, if present.
    pub fn get_field(&self, node: NodeId, field: Field) -> Option<Element> {
        self.nodes[node.index()]
            .children
            .iter()
            .find(|c| c.field == Some(field))
            .map(|c| c.element)
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    /// Source text of a token.
    pub fn token_text(&self, id: TokenId) -> &'src str {
        let span = self.tokens[id.index()].span;
        &self.source[span.start..span.end]
    }

    /// Source text covered by a node.
    pub fn text(&self, node: NodeId) -> &'src str {
        let span = self.span(node);
        &self.source[span.start..span.end]
    }

    pub fn element_span(&self, element: Element) -> Span {
        match element {
            Element::Node(id) => self.span(id),
            Element::Token(id) => self.tokens[id.index()].span,
        }
    }

    /// 1-based line/column position of a byte offset.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.source.len());
        let mut line = 1;
        let mut line_start = 0;
        for (i, c) in self.source.char_indices() {
            if i >= offset {
                break;
            }
            if c == '\n' {
                line += 1;
                line_start = i + c.len_utf8();
            }
        }
        (line, (self.source[line_start..offset].chars().count() + 1) as u32)
    }

    /// Render the tree as an indented outline for debugging and snapshots.
    ///
    /// Nodes print their kind, tokens print their text, and tagged children
    /// are prefixed with their field name. Spans are omitted so the output is
    /// stable under whitespace-only edits.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_node(self.root, 0, None, &mut out);
        out
    }

    fn dump_node(&self, node: NodeId, depth: usize, field: Option<Field>, out: &mut String) {
        for _ in 0..depth {
            out.push_str("  ");
        }
        if let Some(f) = field {
            out.push_str(f.as_str());
            out.push_str(": ");
        }
        out.push_str(&format!("{:?}\n", self.kind(node)));
        for child in self.children(node) {
            match child.element {
                Element::Node(id) => self.dump_node(id, depth + 1, child.field, out),
                Element::Token(id) => {
                    for _ in 0..=depth {
                        out.push_str("  ");
                    }
                    if let Some(f) = child.field {
                        out.push_str(f.as_str());
                        out.push_str(": ");
                    }
                    out.push_str(&format!("{:?}\n", self.token_text(id)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind;

    #[test]
    fn test_span_merge() {
        let a = Span::new(3, 7);
        let b = Span::new(5, 12);
        assert_eq!(a.merge(b), Span::new(3, 12));
        assert_eq!(b.merge(a), Span::new(3, 12));
    }

    #[test]
    fn test_get_field_and_dump() {
        let source = "break";
        let tokens = vec![
            Token::new(
                TokenKind::Keyword(sindarin_core::lang::keywords::KeywordId::Break),
                Span::new(0, 5),
                1,
                1,
            ),
            Token::new(TokenKind::Eof, Span::new(5, 5), 1, 6),
        ];
        let mut builder = TreeBuilder::new();
        let stmt = builder.alloc(
            NodeKind::BreakStatement,
            Span::new(0, 5),
            vec![Child {
                field: None,
                element: Element::Token(TokenId::new(0)),
            }],
        );
        let root = builder.alloc(
            NodeKind::SourceFile,
            Span::new(0, 5),
            vec![Child {
                field: None,
                element: Element::Node(stmt),
            }],
        );
        let tree = builder.finish(source, tokens, root, Vec::new());

        assert_eq!(tree.kind(tree.root()), NodeKind::SourceFile);
        assert_eq!(tree.get_field(tree.root(), Field::Name), None);
        assert_eq!(tree.text(stmt), "break");
        assert_eq!(tree.dump(), "SourceFile\n  BreakStatement\n    \"break\"\n");
    }

    #[test]
    fn test_line_col() {
        let tree = crate::parse("fn f() =>\n  return 1");
        assert_eq!(tree.line_col(0), (1, 1));
        assert_eq!(tree.line_col(3), (1, 4));
        assert_eq!(tree.line_col(12), (2, 3));
    }
}
