use std::borrow::Cow;

use syn::visit_mut::{self, VisitMut};
use syn::{Attribute, Expr, ForeignItem, ImplItem, Item, Meta, TraitItem};

use crate::scan::{self, Lead};

/// Synthetic wrapper opened around bare snippets so they parse as a file.
const SNIPPET_HEADER: &str = "fn __snippet__() {";

/// The wrapper header exactly as `prettyplease` prints it back, including
/// the newline. Restoration matches on this literal text.
const PRINTED_HEADER: &str = "fn __snippet__() {\n";

/// One-line form the printer uses when the wrapped body is empty.
const PRINTED_EMPTY: &str = "fn __snippet__() {}";

/// Indent unit `prettyplease` adds to every wrapped body line.
const INDENT: &str = "    ";

/// Failure raised by the parser/formatter adapter. The snippet normalizer
/// and restorer are total over any string and never fail.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    /// The source text (after snippet normalization) is not valid Rust.
    #[error("error parsing source code: {0}")]
    Parse(#[from] syn::Error),

    /// The syntax tree could not be serialized back to source text.
    #[error("error formatting source code: {0}")]
    Format(String),
}

/// Capability set required from the grammar library: parse a complete
/// source file into a tree, clear comment annotations from that tree, and
/// print the tree back through a canonical formatter.
///
/// The pipeline in [`remove_comments_with`] talks only to this trait, so it
/// can be exercised against a minimal fake grammar in tests.
pub trait Syntax {
    type Tree;

    fn parse(&self, source: &str) -> Result<Self::Tree, StripError>;
    fn strip_comments(&self, tree: &mut Self::Tree);
    fn print(&self, tree: &Self::Tree) -> Result<String, StripError>;
}

/// Production grammar: `syn` to parse, `prettyplease` to print.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustSyntax;

impl Syntax for RustSyntax {
    type Tree = syn::File;

    fn parse(&self, source: &str) -> Result<syn::File, StripError> {
        Ok(syn::parse_file(source)?)
    }

    /// Plain `//` and `/* */` comments never make it into the tree; the
    /// tokenizer drops them. Doc comments survive as `#[doc = "..."]`
    /// attributes, which the printer would render back as doc comments, so
    /// those are what gets cleared here.
    fn strip_comments(&self, tree: &mut syn::File) {
        StripDocs.visit_file_mut(tree);
    }

    fn print(&self, tree: &syn::File) -> Result<String, StripError> {
        Ok(prettyplease::unparse(tree))
    }
}

/// Remove all comments from `source` and return it canonically formatted.
///
/// The input may be a complete Rust file or a bare snippet of statements.
/// Snippets are wrapped in a placeholder function so they parse as a file;
/// the wrapper is removed from the output again afterwards. Doc comments
/// are stripped like any other comment.
pub fn remove_comments(source: &str) -> Result<String, StripError> {
    remove_comments_with(&RustSyntax, source)
}

/// Run the Normalize -> Parse -> StripComments -> Print -> Restore pipeline
/// against an arbitrary grammar implementation.
pub fn remove_comments_with<S: Syntax>(syntax: &S, source: &str) -> Result<String, StripError> {
    let (prepared, wrapped) = ensure_unit(source);

    let mut tree = syntax.parse(&prepared)?;
    syntax.strip_comments(&mut tree);
    let printed = syntax.print(&tree)?;

    Ok(if wrapped {
        unwrap_snippet(&printed)
    } else {
        printed
    })
}

/// Decide from the first substantive token whether `source` is already a
/// complete file. Bare statement snippets are wrapped in the placeholder
/// function; the returned flag records whether that happened.
///
/// Inputs holding only comments (or nothing) are left alone: there is no
/// way to tell a stub file from a snippet, and the parser accepts them
/// either way.
fn ensure_unit(source: &str) -> (Cow<'_, str>, bool) {
    match scan::classify(source) {
        Lead::Item | Lead::Empty => (Cow::Borrowed(source), false),
        Lead::Bare => {
            let mut wrapped =
                String::with_capacity(source.len() + SNIPPET_HEADER.len() + 4);
            wrapped.push_str(SNIPPET_HEADER);
            wrapped.push('\n');
            wrapped.push_str(source);
            if !source.ends_with('\n') {
                wrapped.push('\n');
            }
            wrapped.push_str("}\n");
            (Cow::Owned(wrapped), true)
        }
    }
}

/// Undo the placeholder wrapper in printed output: drop the first literal
/// occurrence of the printed header line together with the closing brace,
/// and peel the one indent level the printer added to the body.
///
/// If the printer rendered the wrapper as anything other than the expected
/// literal text, the output is handed back untouched rather than guessed
/// at. Body lines that carry less than a full indent (continuations of
/// multi-line literals) are also left untouched.
fn unwrap_snippet(printed: &str) -> String {
    if printed.trim_end() == PRINTED_EMPTY {
        return String::new();
    }

    let Some(pos) = printed.find(PRINTED_HEADER) else {
        return printed.to_owned();
    };

    let before = &printed[..pos];
    let body = &printed[pos + PRINTED_HEADER.len()..];
    let body = body.strip_suffix("}\n").unwrap_or(body);

    let mut out = String::with_capacity(before.len() + body.len());
    out.push_str(before);
    for line in body.split_inclusive('\n') {
        out.push_str(line.strip_prefix(INDENT).unwrap_or(line));
    }

    out
}

/// Doc comments parse into `#[doc = "..."]` name-value attributes. Other
/// uses of the `doc` attribute, like `#[doc(hidden)]`, are not comments and
/// must survive.
fn is_doc_comment(attr: &Attribute) -> bool {
    attr.path().is_ident("doc") && matches!(attr.meta, Meta::NameValue(_))
}

/// Visitor that clears doc-comment attributes everywhere they can attach.
struct StripDocs;

impl StripDocs {
    fn strip(attrs: &mut Vec<Attribute>) {
        attrs.retain(|attr| !is_doc_comment(attr));
    }
}

fn item_attrs(item: &mut Item) -> Option<&mut Vec<Attribute>> {
    Some(match item {
        Item::Const(i) => &mut i.attrs,
        Item::Enum(i) => &mut i.attrs,
        Item::ExternCrate(i) => &mut i.attrs,
        Item::Fn(i) => &mut i.attrs,
        Item::ForeignMod(i) => &mut i.attrs,
        Item::Impl(i) => &mut i.attrs,
        Item::Macro(i) => &mut i.attrs,
        Item::Mod(i) => &mut i.attrs,
        Item::Static(i) => &mut i.attrs,
        Item::Struct(i) => &mut i.attrs,
        Item::Trait(i) => &mut i.attrs,
        Item::TraitAlias(i) => &mut i.attrs,
        Item::Type(i) => &mut i.attrs,
        Item::Union(i) => &mut i.attrs,
        Item::Use(i) => &mut i.attrs,
        _ => return None,
    })
}

fn expr_attrs(expr: &mut Expr) -> Option<&mut Vec<Attribute>> {
    Some(match expr {
        Expr::Array(e) => &mut e.attrs,
        Expr::Assign(e) => &mut e.attrs,
        Expr::Async(e) => &mut e.attrs,
        Expr::Await(e) => &mut e.attrs,
        Expr::Binary(e) => &mut e.attrs,
        Expr::Block(e) => &mut e.attrs,
        Expr::Break(e) => &mut e.attrs,
        Expr::Call(e) => &mut e.attrs,
        Expr::Cast(e) => &mut e.attrs,
        Expr::Closure(e) => &mut e.attrs,
        Expr::Const(e) => &mut e.attrs,
        Expr::Continue(e) => &mut e.attrs,
        Expr::Field(e) => &mut e.attrs,
        Expr::ForLoop(e) => &mut e.attrs,
        Expr::Group(e) => &mut e.attrs,
        Expr::If(e) => &mut e.attrs,
        Expr::Index(e) => &mut e.attrs,
        Expr::Infer(e) => &mut e.attrs,
        Expr::Let(e) => &mut e.attrs,
        Expr::Lit(e) => &mut e.attrs,
        Expr::Loop(e) => &mut e.attrs,
        Expr::Macro(e) => &mut e.attrs,
        Expr::Match(e) => &mut e.attrs,
        Expr::MethodCall(e) => &mut e.attrs,
        Expr::Paren(e) => &mut e.attrs,
        Expr::Path(e) => &mut e.attrs,
        Expr::Range(e) => &mut e.attrs,
        Expr::Reference(e) => &mut e.attrs,
        Expr::Repeat(e) => &mut e.attrs,
        Expr::Return(e) => &mut e.attrs,
        Expr::Struct(e) => &mut e.attrs,
        Expr::Try(e) => &mut e.attrs,
        Expr::TryBlock(e) => &mut e.attrs,
        Expr::Tuple(e) => &mut e.attrs,
        Expr::Unary(e) => &mut e.attrs,
        Expr::Unsafe(e) => &mut e.attrs,
        Expr::While(e) => &mut e.attrs,
        Expr::Yield(e) => &mut e.attrs,
        _ => return None,
    })
}

fn trait_item_attrs(item: &mut TraitItem) -> Option<&mut Vec<Attribute>> {
    Some(match item {
        TraitItem::Const(i) => &mut i.attrs,
        TraitItem::Fn(i) => &mut i.attrs,
        TraitItem::Type(i) => &mut i.attrs,
        TraitItem::Macro(i) => &mut i.attrs,
        _ => return None,
    })
}

fn impl_item_attrs(item: &mut ImplItem) -> Option<&mut Vec<Attribute>> {
    Some(match item {
        ImplItem::Const(i) => &mut i.attrs,
        ImplItem::Fn(i) => &mut i.attrs,
        ImplItem::Type(i) => &mut i.attrs,
        ImplItem::Macro(i) => &mut i.attrs,
        _ => return None,
    })
}

fn foreign_item_attrs(item: &mut ForeignItem) -> Option<&mut Vec<Attribute>> {
    Some(match item {
        ForeignItem::Fn(i) => &mut i.attrs,
        ForeignItem::Static(i) => &mut i.attrs,
        ForeignItem::Type(i) => &mut i.attrs,
        ForeignItem::Macro(i) => &mut i.attrs,
        _ => return None,
    })
}

impl VisitMut for StripDocs {
    fn visit_file_mut(&mut self, node: &mut syn::File) {
        Self::strip(&mut node.attrs);
        visit_mut::visit_file_mut(self, node);
    }

    fn visit_item_mut(&mut self, node: &mut Item) {
        if let Some(attrs) = item_attrs(node) {
            Self::strip(attrs);
        }
        visit_mut::visit_item_mut(self, node);
    }

    fn visit_trait_item_mut(&mut self, node: &mut TraitItem) {
        if let Some(attrs) = trait_item_attrs(node) {
            Self::strip(attrs);
        }
        visit_mut::visit_trait_item_mut(self, node);
    }

    fn visit_impl_item_mut(&mut self, node: &mut ImplItem) {
        if let Some(attrs) = impl_item_attrs(node) {
            Self::strip(attrs);
        }
        visit_mut::visit_impl_item_mut(self, node);
    }

    fn visit_foreign_item_mut(&mut self, node: &mut ForeignItem) {
        if let Some(attrs) = foreign_item_attrs(node) {
            Self::strip(attrs);
        }
        visit_mut::visit_foreign_item_mut(self, node);
    }

    fn visit_expr_mut(&mut self, node: &mut Expr) {
        if let Some(attrs) = expr_attrs(node) {
            Self::strip(attrs);
        }
        visit_mut::visit_expr_mut(self, node);
    }

    fn visit_field_mut(&mut self, node: &mut syn::Field) {
        Self::strip(&mut node.attrs);
        visit_mut::visit_field_mut(self, node);
    }

    fn visit_variant_mut(&mut self, node: &mut syn::Variant) {
        Self::strip(&mut node.attrs);
        visit_mut::visit_variant_mut(self, node);
    }

    fn visit_local_mut(&mut self, node: &mut syn::Local) {
        Self::strip(&mut node.attrs);
        visit_mut::visit_local_mut(self, node);
    }

    fn visit_arm_mut(&mut self, node: &mut syn::Arm) {
        Self::strip(&mut node.attrs);
        visit_mut::visit_arm_mut(self, node);
    }
}
