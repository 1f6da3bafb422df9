//! Token and node kinds.
//!
//! One enum covers both scanner tokens and tree nodes, in the same spirit as
//! the TypeScript `SyntaxKind` numbering: tokens first, then keywords, then
//! node kinds.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,

    // Literals
    NumericLiteral,
    StringLiteral,
    NoSubstitutionTemplateLiteral,
    RegularExpressionLiteral,

    // Punctuation
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    CommaToken,
    QuestionDotToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    ExclamationEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsEqualsToken,
    EqualsGreaterThanToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    AsteriskAsteriskToken,
    SlashToken,
    PercentToken,
    PlusPlusToken,
    MinusMinusToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    GreaterThanGreaterThanGreaterThanToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    ExclamationToken,
    TildeToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    AtToken,
    QuestionQuestionToken,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    BarBarEqualsToken,
    AmpersandAmpersandEqualsToken,
    QuestionQuestionEqualsToken,

    Identifier,

    // Reserved words
    BreakKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeleteKeyword,
    DoKeyword,
    ElseKeyword,
    EnumKeyword,
    ExportKeyword,
    ExtendsKeyword,
    FalseKeyword,
    FinallyKeyword,
    ForKeyword,
    FunctionKeyword,
    IfKeyword,
    ImportKeyword,
    InKeyword,
    InstanceOfKeyword,
    NewKeyword,
    NullKeyword,
    ReturnKeyword,
    SuperKeyword,
    SwitchKeyword,
    ThisKeyword,
    ThrowKeyword,
    TrueKeyword,
    TryKeyword,
    TypeOfKeyword,
    VarKeyword,
    VoidKeyword,
    WhileKeyword,
    LetKeyword,

    // Contextual keywords. The scanner emits these as identifiers; the
    // parser promotes them where the grammar calls for it.
    AbstractKeyword,
    AnyKeyword,
    AsKeyword,
    AsyncKeyword,
    BooleanKeyword,
    DeclareKeyword,
    GetKeyword,
    InterfaceKeyword,
    KeyOfKeyword,
    NeverKeyword,
    NumberKeyword,
    ObjectKeyword,
    OfKeyword,
    OverrideKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    ReadonlyKeyword,
    SatisfiesKeyword,
    SetKeyword,
    StaticKeyword,
    StringKeyword,
    SymbolKeyword,
    BigIntKeyword,
    TypeKeyword,
    UndefinedKeyword,
    UnknownKeyword,

    // Names
    QualifiedName,
    ComputedPropertyName,

    // Signature elements
    TypeParameter,
    Parameter,

    // Type members
    PropertySignature,
    MethodSignature,
    IndexSignature,

    // Class members
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,

    // Types
    TypeReference,
    FunctionType,
    TypeQuery,
    TypeLiteral,
    ArrayType,
    TupleType,
    UnionType,
    IntersectionType,
    ParenthesizedType,
    TypeOperator,
    IndexedAccessType,
    MappedType,
    LiteralType,

    // Binding patterns
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // Expressions
    ArrayLiteralExpression,
    ObjectLiteralExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    CallExpression,
    NewExpression,
    ParenthesizedExpression,
    FunctionExpression,
    ArrowFunction,
    TypeOfExpression,
    VoidExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    BinaryExpression,
    ConditionalExpression,
    SpreadElement,
    AsExpression,
    AwaitExpression,
    NonNullExpression,
    OmittedExpression,

    // Object literal members
    PropertyAssignment,
    ShorthandPropertyAssignment,
    SpreadAssignment,

    // Statements
    Block,
    EmptyStatement,
    VariableStatement,
    ExpressionStatement,
    IfStatement,
    WhileStatement,
    ForStatement,
    ForOfStatement,
    ForInStatement,
    ReturnStatement,
    ThrowStatement,
    UnsupportedStatement,

    // Declarations
    VariableDeclaration,
    VariableDeclarationList,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    HeritageClause,
    ExpressionWithTypeArguments,

    SourceFile,
}

impl SyntaxKind {
    /// Map reserved-word text to its keyword kind.
    pub fn reserved_word(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kind = match text {
            "break" => BreakKeyword,
            "case" => CaseKeyword,
            "catch" => CatchKeyword,
            "class" => ClassKeyword,
            "const" => ConstKeyword,
            "continue" => ContinueKeyword,
            "default" => DefaultKeyword,
            "delete" => DeleteKeyword,
            "do" => DoKeyword,
            "else" => ElseKeyword,
            "enum" => EnumKeyword,
            "export" => ExportKeyword,
            "extends" => ExtendsKeyword,
            "false" => FalseKeyword,
            "finally" => FinallyKeyword,
            "for" => ForKeyword,
            "function" => FunctionKeyword,
            "if" => IfKeyword,
            "import" => ImportKeyword,
            "in" => InKeyword,
            "instanceof" => InstanceOfKeyword,
            "new" => NewKeyword,
            "null" => NullKeyword,
            "return" => ReturnKeyword,
            "super" => SuperKeyword,
            "switch" => SwitchKeyword,
            "this" => ThisKeyword,
            "throw" => ThrowKeyword,
            "true" => TrueKeyword,
            "try" => TryKeyword,
            "typeof" => TypeOfKeyword,
            "var" => VarKeyword,
            "void" => VoidKeyword,
            "while" => WhileKeyword,
            "let" => LetKeyword,
            _ => return None,
        };
        Some(kind)
    }

    /// Map contextual-keyword text to its keyword kind.
    pub fn contextual_keyword(text: &str) -> Option<SyntaxKind> {
        use SyntaxKind::*;
        let kind = match text {
            "abstract" => AbstractKeyword,
            "any" => AnyKeyword,
            "as" => AsKeyword,
            "async" => AsyncKeyword,
            "boolean" => BooleanKeyword,
            "declare" => DeclareKeyword,
            "get" => GetKeyword,
            "interface" => InterfaceKeyword,
            "keyof" => KeyOfKeyword,
            "never" => NeverKeyword,
            "number" => NumberKeyword,
            "object" => ObjectKeyword,
            "of" => OfKeyword,
            "override" => OverrideKeyword,
            "private" => PrivateKeyword,
            "protected" => ProtectedKeyword,
            "public" => PublicKeyword,
            "readonly" => ReadonlyKeyword,
            "satisfies" => SatisfiesKeyword,
            "set" => SetKeyword,
            "static" => StaticKeyword,
            "string" => StringKeyword,
            "symbol" => SymbolKeyword,
            "bigint" => BigIntKeyword,
            "type" => TypeKeyword,
            "undefined" => UndefinedKeyword,
            "unknown" => UnknownKeyword,
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_reserved_word(self) -> bool {
        self >= SyntaxKind::BreakKeyword && self <= SyntaxKind::LetKeyword
    }

    /// Keywords that name a primitive or top type in type position.
    pub fn is_keyword_type(self) -> bool {
        matches!(
            self,
            SyntaxKind::AnyKeyword
                | SyntaxKind::UnknownKeyword
                | SyntaxKind::NumberKeyword
                | SyntaxKind::StringKeyword
                | SyntaxKind::BooleanKeyword
                | SyntaxKind::BigIntKeyword
                | SyntaxKind::SymbolKeyword
                | SyntaxKind::ObjectKeyword
                | SyntaxKind::NeverKeyword
                | SyntaxKind::UndefinedKeyword
                | SyntaxKind::VoidKeyword
                | SyntaxKind::NullKeyword
        )
    }

    pub fn is_modifier(self) -> bool {
        matches!(
            self,
            SyntaxKind::ExportKeyword
                | SyntaxKind::DefaultKeyword
                | SyntaxKind::DeclareKeyword
                | SyntaxKind::AbstractKeyword
                | SyntaxKind::PublicKeyword
                | SyntaxKind::PrivateKeyword
                | SyntaxKind::ProtectedKeyword
                | SyntaxKind::StaticKeyword
                | SyntaxKind::ReadonlyKeyword
                | SyntaxKind::OverrideKeyword
                | SyntaxKind::AsyncKeyword
        )
    }

    pub fn is_assignment_operator(self) -> bool {
        self >= SyntaxKind::EqualsToken && self <= SyntaxKind::QuestionQuestionEqualsToken
    }

    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ArrowFunction
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::Constructor
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor
        )
    }

    pub fn is_type_node(self) -> bool {
        self.is_keyword_type()
            || matches!(
                self,
                SyntaxKind::TypeReference
                    | SyntaxKind::FunctionType
                    | SyntaxKind::TypeQuery
                    | SyntaxKind::TypeLiteral
                    | SyntaxKind::ArrayType
                    | SyntaxKind::TupleType
                    | SyntaxKind::UnionType
                    | SyntaxKind::IntersectionType
                    | SyntaxKind::ParenthesizedType
                    | SyntaxKind::TypeOperator
                    | SyntaxKind::IndexedAccessType
                    | SyntaxKind::MappedType
                    | SyntaxKind::LiteralType
            )
    }

    pub fn is_binding_pattern(self) -> bool {
        matches!(
            self,
            SyntaxKind::ObjectBindingPattern | SyntaxKind::ArrayBindingPattern
        )
    }

    /// Expression node kinds, including primary tokens used as expressions.
    pub fn is_expression(self) -> bool {
        matches!(
            self,
            SyntaxKind::Identifier
                | SyntaxKind::NumericLiteral
                | SyntaxKind::StringLiteral
                | SyntaxKind::NoSubstitutionTemplateLiteral
                | SyntaxKind::RegularExpressionLiteral
                | SyntaxKind::ThisKeyword
                | SyntaxKind::SuperKeyword
                | SyntaxKind::TrueKeyword
                | SyntaxKind::FalseKeyword
                | SyntaxKind::NullKeyword
                | SyntaxKind::ArrayLiteralExpression
                | SyntaxKind::ObjectLiteralExpression
                | SyntaxKind::PropertyAccessExpression
                | SyntaxKind::ElementAccessExpression
                | SyntaxKind::CallExpression
                | SyntaxKind::NewExpression
                | SyntaxKind::ParenthesizedExpression
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ArrowFunction
                | SyntaxKind::TypeOfExpression
                | SyntaxKind::VoidExpression
                | SyntaxKind::PrefixUnaryExpression
                | SyntaxKind::PostfixUnaryExpression
                | SyntaxKind::BinaryExpression
                | SyntaxKind::ConditionalExpression
                | SyntaxKind::SpreadElement
                | SyntaxKind::AsExpression
                | SyntaxKind::AwaitExpression
                | SyntaxKind::NonNullExpression
        )
    }

    pub fn is_statement(self) -> bool {
        matches!(
            self,
            SyntaxKind::Block
                | SyntaxKind::EmptyStatement
                | SyntaxKind::VariableStatement
                | SyntaxKind::ExpressionStatement
                | SyntaxKind::IfStatement
                | SyntaxKind::WhileStatement
                | SyntaxKind::ForStatement
                | SyntaxKind::ForOfStatement
                | SyntaxKind::ForInStatement
                | SyntaxKind::ReturnStatement
                | SyntaxKind::ThrowStatement
                | SyntaxKind::UnsupportedStatement
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::ClassDeclaration
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::TypeAliasDeclaration
        )
    }
}
