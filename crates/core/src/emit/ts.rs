//! A small TypeScript AST and its printer.
//!
//! Artifacts are assembled from these nodes and printed through [`Emit`], so
//! formatting rules (indentation, trailing commas, import layout) live in one
//! place.

use crate::openapi::naming::{escape_js_string, quote_if_needed};

const INDENT: &str = "  ";

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Default import binding (`import axios, { ... }`).
    pub default: Option<String>,
    pub items: Vec<String>,
    pub from: String,
    pub type_only: bool,
}

impl TsImport {
    pub fn named<I, S>(items: I, from: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default: None,
            items: items.into_iter().map(Into::into).collect(),
            from: from.to_string(),
            type_only: false,
        }
    }

    pub fn types<I, S>(items: I, from: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            type_only: true,
            ..Self::named(items, from)
        }
    }

    pub fn with_default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(name.into());
        self
    }
}

impl Emit for TsImport {
    fn emit(&self) -> String {
        let keyword = match (&self.default, self.type_only) {
            (Some(default), false) => format!("import {default},"),
            (Some(default), true) => format!("import type {default},"),
            (None, false) => "import".to_string(),
            (None, true) => "import type".to_string(),
        };
        match self.items.as_slice() {
            [] => format!(
                "{} from \"{}\";",
                keyword.trim_end_matches(','),
                self.from
            ),
            [single] => format!("{keyword} {{ {single} }} from \"{}\";", self.from),
            items => {
                let lines: String = items.iter().map(|item| format!("{INDENT}{item},\n")).collect();
                format!("{keyword} {{\n{lines}}} from \"{}\";", self.from)
            }
        }
    }
}

/// Function parameter; `name` may be a destructuring pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsParam {
    pub name: String,
    pub ty: Option<String>,
    pub optional: bool,
}

impl TsParam {
    pub fn typed(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{opt}: {ty}", self.name),
            None => format!("{}{opt}", self.name),
        }
    }
}

/// Template literal part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplatePart {
    Static(String),
    /// `${expr}`
    Dynamic(String),
}

/// Object literal member; `value: None` is shorthand (`{ params }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsProp {
    pub key: String,
    pub value: Option<TsExpr>,
}

impl TsProp {
    pub fn shorthand(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: None,
        }
    }

    pub fn new(key: impl Into<String>, value: TsExpr) -> Self {
        Self {
            key: key.into(),
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArrowBody {
    Expr(Box<TsExpr>),
    Block(Vec<TsStmt>),
}

/// Expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    Ident(String),
    /// Double-quoted string literal.
    Str(String),
    Template(Vec<TemplatePart>),
    Array(Vec<TsExpr>),
    /// Single-line object literal.
    Object(Vec<TsProp>),
    /// Object literal with one member per line and trailing commas.
    Block(Vec<TsProp>),
    Member {
        object: Box<TsExpr>,
        prop: String,
    },
    Call {
        callee: Box<TsExpr>,
        type_args: Vec<String>,
        args: Vec<TsExpr>,
    },
    Arrow {
        params: Vec<TsParam>,
        body: ArrowBody,
    },
    Await(Box<TsExpr>),
    Raw(String),
}

impl TsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::Call {
            callee: Box::new(callee),
            type_args: Vec::new(),
            args,
        }
    }

    pub fn member(object: Self, prop: impl Into<String>) -> Self {
        Self::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }

    pub fn arrow(params: Vec<TsParam>, body: Self) -> Self {
        Self::Arrow {
            params,
            body: ArrowBody::Expr(Box::new(body)),
        }
    }

    /// Print at a nesting level; only multi-line nodes use it.
    pub fn emit_at(&self, indent: usize) -> String {
        match self {
            Self::Ident(name) | Self::Raw(name) => name.clone(),
            Self::Str(value) => format!("\"{}\"", escape_js_string(value)),
            Self::Template(parts) => {
                let content: String = parts
                    .iter()
                    .map(|part| match part {
                        TemplatePart::Static(s) => escape_template(s),
                        TemplatePart::Dynamic(expr) => format!("${{{expr}}}"),
                    })
                    .collect();
                format!("`{content}`")
            }
            Self::Array(items) => {
                let items = join_exprs(items, indent);
                format!("[{items}]")
            }
            Self::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<String> = props.iter().map(|p| emit_prop(p, indent)).collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            Self::Block(props) => {
                if props.is_empty() {
                    return "{}".to_string();
                }
                let inner = INDENT.repeat(indent + 1);
                let lines: String = props
                    .iter()
                    .map(|p| format!("{inner}{},\n", emit_prop(p, indent + 1)))
                    .collect();
                format!("{{\n{lines}{}}}", INDENT.repeat(indent))
            }
            Self::Member { object, prop } => format!("{}.{prop}", object.emit_at(indent)),
            Self::Call {
                callee,
                type_args,
                args,
            } => {
                let generics = if type_args.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", type_args.join(", "))
                };
                format!(
                    "{}{generics}({})",
                    callee.emit_at(indent),
                    join_exprs(args, indent)
                )
            }
            Self::Arrow { params, body } => {
                let params = params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                match body {
                    ArrowBody::Expr(expr) => format!("({params}) => {}", expr.emit_at(indent)),
                    ArrowBody::Block(stmts) => {
                        let body: String =
                            stmts.iter().map(|s| s.emit_indented(indent + 1)).collect();
                        format!("({params}) => {{\n{body}{}}}", INDENT.repeat(indent))
                    }
                }
            }
            Self::Await(expr) => format!("await {}", expr.emit_at(indent)),
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        self.emit_at(0)
    }
}

fn join_exprs(exprs: &[TsExpr], indent: usize) -> String {
    exprs
        .iter()
        .map(|e| e.emit_at(indent))
        .collect::<Vec<_>>()
        .join(", ")
}

fn emit_prop(prop: &TsProp, indent: usize) -> String {
    let key = quote_if_needed(&prop.key);
    match &prop.value {
        Some(value) => format!("{key}: {}", value.emit_at(indent)),
        None => key,
    }
}

fn escape_template(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// Statement in a function body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsStmt {
    Const { name: String, init: TsExpr },
    Return(TsExpr),
    Expr(TsExpr),
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = INDENT.repeat(indent);
        match self {
            Self::Const { name, init } => {
                format!("{prefix}const {name} = {};\n", init.emit_at(indent))
            }
            Self::Return(expr) => format!("{prefix}return {};\n", expr.emit_at(indent)),
            Self::Expr(expr) => format!("{prefix}{};\n", expr.emit_at(indent)),
        }
    }
}

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

/// `export const name = (...) => { ... };` with an optional JSDoc block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsConstFn {
    pub name: String,
    pub doc: Vec<String>,
    pub is_async: bool,
    pub params: Vec<TsParam>,
    pub body: Vec<TsStmt>,
}

impl Emit for TsConstFn {
    fn emit(&self) -> String {
        let mut output = emit_jsdoc(&self.doc);
        let async_str = if self.is_async { "async " } else { "" };
        let params = self.params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
        output.push_str(&format!(
            "export const {} = {async_str}({params}) => {{\n",
            self.name
        ));
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(1));
        }
        output.push_str("};\n");
        output
    }
}

/// `export type Name = ...;` preceded by an optional line comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsTypeAlias {
    pub name: String,
    /// Already rendered type text.
    pub ty: String,
    pub comment: Option<String>,
}

impl Emit for TsTypeAlias {
    fn emit(&self) -> String {
        let comment = self
            .comment
            .as_ref()
            .map(|c| format!("// {c}\n"))
            .unwrap_or_default();
        format!("{comment}export type {} = {};\n", self.name, self.ty)
    }
}

fn emit_jsdoc(lines: &[String]) -> String {
    if lines.is_empty() {
        return String::new();
    }
    let body: String = lines
        .iter()
        .map(|line| format!(" * {}\n", line.replace("*/", "*\\/")))
        .collect();
    format!("/**\n{body} */\n")
}

/// A complete file: header comment, imports, then top-level items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TsModule {
    pub header: Vec<String>,
    pub imports: Vec<TsImport>,
    /// Already emitted top-level items, separated by blank lines.
    pub items: Vec<String>,
}

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = String::new();
        for line in &self.header {
            if line.is_empty() {
                output.push_str("//\n");
            } else {
                output.push_str(&format!("// {line}\n"));
            }
        }
        if !self.header.is_empty() {
            output.push('\n');
        }
        for import in &self.imports {
            output.push_str(&import.emit());
            output.push('\n');
        }
        if !self.imports.is_empty() && !self.items.is_empty() {
            output.push('\n');
        }
        output.push_str(&self.items.join("\n"));
        output
    }
}
