//! Input AST contract.
//!
//! The concrete grammar and parser live outside this crate; translation only
//! requires the shapes below, one [`CompilationUnit`] per parsed input.
//! Polymorphic parser output (a type that is sometimes a plain string and
//! sometimes a richer node) is represented as a tagged union once, at this
//! boundary, so downstream logic never branches on shape again.

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

// ============================================================================
// COMPILATION UNIT
// ============================================================================

/// One parsed input (translation unit), exposing its top-level declarations.
#[derive(Clone, Debug, Default)]
pub struct CompilationUnit {
    /// Unit name, usually the source file path. Used to scope using-directives
    /// and to report per-unit failures.
    pub name: Option<SmolStr>,
    /// Top-level declarations in source order.
    pub members: Vec<Declaration>,
}

impl CompilationUnit {
    /// Create an empty unnamed unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unit name.
    pub fn with_name(mut self, name: impl Into<SmolStr>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a top-level declaration.
    pub fn with_member(mut self, member: Declaration) -> Self {
        self.members.push(member);
        self
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// A declaration node, tagged by source kind.
#[derive(Clone, Debug)]
pub enum Declaration {
    Namespace(NamespaceDecl),
    /// Covers both `class` and `struct` via [`ClassDecl::keyword`].
    Class(ClassDecl),
    Enum(EnumDecl),
    /// A using/import directive consulted during symbol lookup.
    Using(UsingDecl),
    Field(FieldDecl),
    /// Properties share the field shape and translation path.
    Property(FieldDecl),
    Constructor(MethodDecl),
    Method(MethodDecl),
    /// Constants are intentionally not modeled.
    Constant(ConstantDecl),
}

/// `namespace N { ... }`
#[derive(Clone, Debug)]
pub struct NamespaceDecl {
    pub name: SmolStr,
    pub body: Vec<Declaration>,
}

impl NamespaceDecl {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            body: Vec::new(),
        }
    }

    pub fn with_member(mut self, member: Declaration) -> Self {
        self.body.push(member);
        self
    }
}

/// Which keyword introduced a class-like declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClassKeyword {
    #[default]
    Class,
    Struct,
}

/// `class C : public Base { ... }` or a bodiless forward declaration.
#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub name: SmolStr,
    pub keyword: ClassKeyword,
    pub modifiers: Modifiers,
    /// Base-type tokens listed after the inheritance colon.
    pub bases: Vec<TypeToken>,
    /// `None` marks a pure forward declaration with no body.
    pub body: Option<Vec<Declaration>>,
}

impl ClassDecl {
    /// Create a forward declaration (no body).
    pub fn forward(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            keyword: ClassKeyword::Class,
            modifiers: Modifiers::default(),
            bases: Vec::new(),
            body: None,
        }
    }

    /// Create a class definition with an (initially empty) body.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            body: Some(Vec::new()),
            ..Self::forward(name)
        }
    }

    pub fn with_keyword(mut self, keyword: ClassKeyword) -> Self {
        self.keyword = keyword;
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<SmolStr>) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_base(mut self, base: impl Into<TypeToken>) -> Self {
        self.bases.push(base.into());
        self
    }

    pub fn with_member(mut self, member: Declaration) -> Self {
        self.body.get_or_insert_with(Vec::new).push(member);
        self
    }
}

/// `enum E { ... }`
#[derive(Clone, Debug)]
pub struct EnumDecl {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub body: Option<Vec<Declaration>>,
}

impl EnumDecl {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
            body: None,
        }
    }
}

/// `using ns::path;`
#[derive(Clone, Debug)]
pub struct UsingDecl {
    pub path: SmolStr,
}

impl UsingDecl {
    pub fn new(path: impl Into<SmolStr>) -> Self {
        Self { path: path.into() }
    }
}

/// One field declaration, possibly declaring several variables of one type.
#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub ty: TypeToken,
    pub vars: Vec<DeclaredVar>,
    pub modifiers: Modifiers,
}

impl FieldDecl {
    pub fn new(ty: impl Into<TypeToken>) -> Self {
        Self {
            ty: ty.into(),
            vars: Vec::new(),
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_var(mut self, name: impl Into<SmolStr>) -> Self {
        self.vars.push(DeclaredVar::new(name));
        self
    }

    pub fn with_initialized_var(
        mut self,
        name: impl Into<SmolStr>,
        initializer: impl Into<String>,
    ) -> Self {
        self.vars.push(DeclaredVar {
            name: name.into(),
            initializer: Some(initializer.into()),
        });
        self
    }

    pub fn with_modifier(mut self, modifier: impl Into<SmolStr>) -> Self {
        self.modifiers.insert(modifier);
        self
    }
}

/// A declared variable inside a field declaration.
#[derive(Clone, Debug)]
pub struct DeclaredVar {
    pub name: SmolStr,
    /// Initializer literal, kept as opaque text.
    pub initializer: Option<String>,
}

impl DeclaredVar {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            initializer: None,
        }
    }
}

/// A method or constructor declaration.
#[derive(Clone, Debug)]
pub struct MethodDecl {
    pub name: SmolStr,
    pub modifiers: Modifiers,
    pub params: Vec<ParamDecl>,
    /// Absent for constructors and `void`-less declarations.
    pub return_type: Option<TypeToken>,
}

impl MethodDecl {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            modifiers: Modifiers::default(),
            params: Vec::new(),
            return_type: None,
        }
    }

    pub fn with_modifier(mut self, modifier: impl Into<SmolStr>) -> Self {
        self.modifiers.insert(modifier);
        self
    }

    pub fn with_param(mut self, name: impl Into<SmolStr>, ty: impl Into<TypeToken>) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            ty: Some(ty.into()),
        });
        self
    }

    pub fn with_untyped_param(mut self, name: impl Into<SmolStr>) -> Self {
        self.params.push(ParamDecl {
            name: name.into(),
            ty: None,
        });
        self
    }

    pub fn with_return_type(mut self, ty: impl Into<TypeToken>) -> Self {
        self.return_type = Some(ty.into());
        self
    }
}

/// A formal parameter.
#[derive(Clone, Debug)]
pub struct ParamDecl {
    pub name: SmolStr,
    pub ty: Option<TypeToken>,
}

/// A named constant. Recognized but never modeled.
#[derive(Clone, Debug)]
pub struct ConstantDecl {
    pub name: SmolStr,
    pub value: Option<String>,
}

// ============================================================================
// TYPE TOKENS
// ============================================================================

/// A type occurrence as produced by the parser.
///
/// Parsers emit either plain text or a richer node carrying a `.name` plus
/// bracket-array dimensions. Both shapes expose a safe scalar rendering so a
/// structured node never leaks into the output model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeToken {
    Text(SmolStr),
    Node(TypeNode),
}

/// The richer type-node shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeNode {
    pub name: SmolStr,
    /// Number of `[...]` array dimensions seen in the raw token stream.
    pub array_dims: usize,
}

impl TypeToken {
    /// Create a structured node with array dimensions.
    pub fn node(name: impl Into<SmolStr>, array_dims: usize) -> Self {
        Self::Node(TypeNode {
            name: name.into(),
            array_dims,
        })
    }

    /// The raw type text, without array decoration.
    pub fn text(&self) -> &str {
        match self {
            Self::Text(text) => text,
            Self::Node(node) => &node.name,
        }
    }

    /// Best-effort scalar rendering, safe to attach to the output model.
    pub fn scalar_text(&self) -> String {
        match self {
            Self::Text(text) => text.to_string(),
            Self::Node(node) => {
                let mut out = node.name.to_string();
                for _ in 0..node.array_dims {
                    out.push_str("[]");
                }
                out
            }
        }
    }

    /// Array dimensions carried by the token (0 for plain text).
    pub fn array_dims(&self) -> usize {
        match self {
            Self::Text(_) => 0,
            Self::Node(node) => node.array_dims,
        }
    }
}

impl From<&str> for TypeToken {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for TypeToken {
    fn from(s: String) -> Self {
        Self::Text(s.into())
    }
}

// ============================================================================
// MODIFIERS
// ============================================================================

/// The modifier string-set attached to a declaration.
#[derive(Clone, Debug, Default)]
pub struct Modifiers(FxHashSet<SmolStr>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list of modifier words.
    pub fn of<I, S>(modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self(modifiers.into_iter().map(Into::into).collect())
    }

    pub fn insert(&mut self, modifier: impl Into<SmolStr>) {
        self.0.insert(modifier.into());
    }

    pub fn has(&self, modifier: &str) -> bool {
        self.0.contains(modifier)
    }
}
