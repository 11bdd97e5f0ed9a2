//! Source scanning
//!
//! Reads a crate's `src/` tree with `syn` and reports:
//!
//! - every struct, enum or union carrying `#[service_provider]` or
//!   `#[service_provider(path::To::Capability)]` (matched on the last path
//!   segment of the attribute, so `#[lookup::service_provider]` works too;
//!   a trailing `factory = path` is accepted and ignored)
//! - every `impl Trait for Type`, as the subtype relation used to validate
//!   those declarations
//!
//! Files map to modules the way rustc lays them out (`lib.rs` is the crate
//! root, `a/mod.rs` and `a.rs` are `a`). `main.rs` is only scanned when the
//! crate has no `lib.rs`. Paths are resolved through
//! `crate::`, `self::`, `super::`, `use` imports (including renames and
//! globs) and items declared in function bodies. A path that does not
//! resolve inside the crate but has several segments is taken as an
//! external path, as written, except that every path naming the backend
//! capability is rewritten to its canonical identifier.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use lookup_domain::value_objects::CapabilityId;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, ImplItem, Item, Meta, Stmt, Token, Type, TypeParamBound, UseTree};
use tracing::debug;
use walkdir::WalkDir;

use crate::diagnostics::Diagnostic;
use crate::error::{CodegenError, Result};
use crate::hierarchy::SubtypeIndex;
use crate::model::{Enclosing, ProviderDeclaration, SourceLocation, TypeElement};

/// Name of the marker attribute
pub const MARKER_ATTRIBUTE: &str = "service_provider";

const MAX_RESOLUTION_DEPTH: usize = 16;

/// Everything found in one scan
#[derive(Debug, Default)]
pub struct ScanOutput {
    /// Marker-annotated declarations, in file order
    pub declarations: Vec<ProviderDeclaration>,
    /// `impl Trait for Type` relations
    pub hierarchy: SubtypeIndex,
    /// Malformed, unresolvable or misplaced markers
    pub diagnostics: Vec<Diagnostic>,
    /// Files read
    pub files: Vec<PathBuf>,
}

/// Scans Rust sources of one crate
#[derive(Debug, Clone)]
pub struct SourceScanner {
    crate_name: String,
}

struct SourceFile {
    path: PathBuf,
    module: Vec<String>,
    syntax: syn::File,
}

impl SourceScanner {
    /// Scanner for the crate called `crate_name` (`-` becomes `_`)
    pub fn new(crate_name: impl Into<String>) -> Self {
        Self {
            crate_name: crate_name.into().replace('-', "_"),
        }
    }

    /// Scanner named after the library target declared in `crate_dir/Cargo.toml`
    pub fn for_crate(crate_dir: &Path) -> Result<Self> {
        let path = crate_dir.join("Cargo.toml");
        let content = std::fs::read_to_string(&path)?;
        let manifest: toml::Table =
            toml::from_str(&content).map_err(|e| CodegenError::Manifest {
                path: path.clone(),
                message: e.to_string(),
            })?;

        let name = ["lib", "package"].iter().find_map(|section| {
            manifest
                .get(*section)
                .and_then(|table| table.get("name"))
                .and_then(toml::Value::as_str)
        });

        match name {
            Some(name) => Ok(Self::new(name)),
            None => Err(CodegenError::Manifest {
                path,
                message: "missing [package] name".to_string(),
            }),
        }
    }

    /// Crate name as it appears in paths
    pub fn crate_name(&self) -> &str {
        &self.crate_name
    }

    /// Scan `crate_dir/src`
    pub fn scan_crate(&self, crate_dir: &Path) -> Result<ScanOutput> {
        self.scan_dir(&crate_dir.join("src"))
    }

    /// Scan every `.rs` file below `src_dir`, except binaries in `src/bin`
    /// and, next to a `lib.rs`, the binary root `main.rs`
    pub fn scan_dir(&self, src_dir: &Path) -> Result<ScanOutput> {
        let has_lib = src_dir.join("lib.rs").is_file();
        let mut files = Vec::new();
        for entry in WalkDir::new(src_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() != 1 || !is_binary_source(e, has_lib))
            .filter_map(std::result::Result::ok)
            .filter(|e| e.path().extension().is_some_and(|ext| ext == "rs"))
        {
            let Some(module) = self.module_path(src_dir, entry.path()) else {
                continue;
            };
            let content = std::fs::read_to_string(entry.path())?;
            files.push(parse(entry.path(), module, &content)?);
        }

        debug!(crate_name = %self.crate_name, files = files.len(), "Scanned sources");
        Ok(self.scan_files(files))
    }

    /// Scan a single source text as the crate root
    pub fn scan_str(&self, file: &Path, content: &str) -> Result<ScanOutput> {
        self.scan_module(file, &[], content)
    }

    /// Scan a single source text as the module at `module` below the crate root
    pub fn scan_module(&self, file: &Path, module: &[&str], content: &str) -> Result<ScanOutput> {
        let mut path = vec![self.crate_name.clone()];
        path.extend(module.iter().map(|segment| (*segment).to_string()));
        let source = parse(file, path, content)?;
        Ok(self.scan_files(vec![source]))
    }

    fn module_path(&self, src_dir: &Path, file: &Path) -> Option<Vec<String>> {
        let relative = file.strip_prefix(src_dir).ok()?;
        let mut components = relative
            .components()
            .map(|c| c.as_os_str().to_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()?;
        let file_name = components.pop()?;
        let stem = file_name.strip_suffix(".rs")?;

        let at_root = components.is_empty();
        let mut module = vec![self.crate_name.clone()];
        module.extend(components);
        match stem {
            "lib" | "main" if at_root => {}
            "mod" if !at_root => {}
            _ => module.push(stem.to_string()),
        }
        Some(module)
    }

    fn scan_files(&self, files: Vec<SourceFile>) -> ScanOutput {
        let mut modules: HashMap<Vec<String>, Scope> = HashMap::new();
        for file in &files {
            if let Some((name, parent)) = file.module.split_last()
                && !parent.is_empty()
            {
                modules
                    .entry(parent.to_vec())
                    .or_default()
                    .modules
                    .insert(name.clone());
            }
            index_module(&mut modules, &file.module, &file.syntax.items);
        }

        let resolver = Resolver {
            crate_name: &self.crate_name,
            modules: &modules,
        };
        let mut output = ScanOutput::default();
        for file in &files {
            let items: Vec<&Item> = file.syntax.items.iter().collect();
            let mut walker = Walker {
                resolver: &resolver,
                file: &file.path,
                output: &mut output,
            };
            walker.walk_items(&items, &file.module, &mut Vec::new(), None);
            output.files.push(file.path.clone());
        }
        output
    }
}

fn is_binary_source(entry: &walkdir::DirEntry, has_lib: bool) -> bool {
    if entry.file_type().is_dir() {
        entry.file_name() == "bin"
    } else {
        has_lib && entry.file_name() == "main.rs"
    }
}

fn parse(path: &Path, module: Vec<String>, content: &str) -> Result<SourceFile> {
    let syntax = syn::parse_file(content).map_err(|e| CodegenError::Parse {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(SourceFile {
        path: path.to_path_buf(),
        module,
        syntax,
    })
}

/// Names visible in a module or a function body
#[derive(Debug, Default)]
struct Scope {
    items: HashMap<String, TypeElement>,
    imports: HashMap<String, Vec<String>>,
    globs: Vec<Vec<String>>,
    modules: HashSet<String>,
}

impl Scope {
    fn declare(&mut self, item: &Item, element: impl Fn(&str) -> TypeElement) {
        match item {
            Item::Struct(s) => self.declare_type(&s.ident, &element),
            Item::Enum(e) => self.declare_type(&e.ident, &element),
            Item::Union(u) => self.declare_type(&u.ident, &element),
            Item::Trait(t) => self.declare_type(&t.ident, &element),
            Item::Type(t) => self.declare_type(&t.ident, &element),
            Item::Use(u) => self.import(&u.tree, Vec::new()),
            Item::Mod(m) => {
                self.modules.insert(m.ident.to_string());
            }
            _ => {}
        }
    }

    fn declare_type(&mut self, ident: &syn::Ident, element: &impl Fn(&str) -> TypeElement) {
        let name = ident.to_string();
        let declared = element(&name);
        self.items.insert(name, declared);
    }

    fn import(&mut self, tree: &UseTree, mut prefix: Vec<String>) {
        match tree {
            UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.import(&path.tree, prefix);
            }
            UseTree::Name(name) if name.ident == "self" => {
                if let Some(last) = prefix.last() {
                    self.imports.insert(last.clone(), prefix.clone());
                }
            }
            UseTree::Name(name) => {
                let name = name.ident.to_string();
                prefix.push(name.clone());
                self.imports.insert(name, prefix);
            }
            UseTree::Rename(rename) => {
                if rename.rename == "_" {
                    return;
                }
                if rename.ident != "self" {
                    prefix.push(rename.ident.to_string());
                }
                self.imports.insert(rename.rename.to_string(), prefix);
            }
            UseTree::Glob(_) => self.globs.push(prefix),
            UseTree::Group(group) => {
                for tree in &group.items {
                    self.import(tree, prefix.clone());
                }
            }
        }
    }
}

fn index_module(modules: &mut HashMap<Vec<String>, Scope>, module: &[String], items: &[Item]) {
    let scope = modules.entry(module.to_vec()).or_default();
    for item in items {
        scope.declare(item, |name| TypeElement::top_level(module.to_vec(), name));
    }

    for item in items {
        if let Item::Mod(m) = item
            && let Some((_, inner)) = &m.content
        {
            let mut child = module.to_vec();
            child.push(m.ident.to_string());
            index_module(modules, &child, inner);
        }
    }
}

/// A resolved path
enum Resolved {
    /// Declared in the scanned crate
    Local(TypeElement),
    /// Assumed to live outside the crate
    External(TypeElement),
}

impl Resolved {
    fn into_element(self) -> TypeElement {
        match self {
            Self::Local(element) | Self::External(element) => element,
        }
    }

    fn local(self) -> Option<TypeElement> {
        match self {
            Self::Local(element) => Some(element),
            Self::External(_) => None,
        }
    }
}

/// Where a path is written
#[derive(Clone, Copy)]
struct Position<'a> {
    module: &'a [String],
    locals: &'a [Scope],
    self_type: Option<&'a TypeElement>,
}

impl<'a> Position<'a> {
    fn module(module: &'a [String]) -> Self {
        Self {
            module,
            locals: &[],
            self_type: None,
        }
    }
}

struct Resolver<'a> {
    crate_name: &'a str,
    modules: &'a HashMap<Vec<String>, Scope>,
}

impl Resolver<'_> {
    fn resolve_path(&self, path: &syn::Path, at: Position<'_>) -> Option<Resolved> {
        let segments: Vec<String> = path
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if path.leading_colon.is_some() {
            return external(&segments);
        }
        self.resolve(&segments, at, 0)
    }

    fn resolve(&self, segments: &[String], at: Position<'_>, depth: usize) -> Option<Resolved> {
        if depth > MAX_RESOLUTION_DEPTH {
            return None;
        }
        let (first, rest) = segments.split_first()?;

        match first.as_str() {
            "crate" => {
                return self.resolve_in_module(vec![self.crate_name.to_string()], rest, depth);
            }
            "self" => return self.resolve_in_module(at.module.to_vec(), rest, depth),
            "super" => {
                let mut module = at.module.to_vec();
                let mut remaining = segments;
                while let Some((segment, tail)) = remaining.split_first() {
                    if segment != "super" {
                        break;
                    }
                    if module.len() <= 1 {
                        return None;
                    }
                    module.pop();
                    remaining = tail;
                }
                return self.resolve_in_module(module, remaining, depth);
            }
            "Self" if rest.is_empty() => return at.self_type.cloned().map(Resolved::Local),
            _ => {}
        }

        for scope in at.locals.iter().rev() {
            if let Some(found) = self.resolve_in_scope(scope, first, rest, at.module, depth) {
                return Some(found);
            }
        }
        if let Some(scope) = self.modules.get(at.module)
            && let Some(found) = self.resolve_in_scope(scope, first, rest, at.module, depth)
        {
            return Some(found);
        }
        if first == self.crate_name {
            return self.resolve_in_module(vec![first.clone()], rest, depth);
        }
        external(segments)
    }

    fn resolve_in_scope(
        &self,
        scope: &Scope,
        first: &str,
        rest: &[String],
        module: &[String],
        depth: usize,
    ) -> Option<Resolved> {
        if rest.is_empty()
            && let Some(element) = scope.items.get(first)
        {
            return Some(Resolved::Local(element.clone()));
        }
        if let Some(target) = scope.imports.get(first) {
            let mut path = target.clone();
            path.extend(rest.iter().cloned());
            return self.resolve(&path, Position::module(module), depth + 1);
        }
        if scope.modules.contains(first) {
            let mut child = module.to_vec();
            child.push(first.to_string());
            return self.resolve_in_module(child, rest, depth);
        }
        self.resolve_through_globs(scope, first, rest, module, depth)
    }

    fn resolve_through_globs(
        &self,
        scope: &Scope,
        first: &str,
        rest: &[String],
        module: &[String],
        depth: usize,
    ) -> Option<Resolved> {
        let mut fallback = None;
        for glob in &scope.globs {
            let mut path = glob.clone();
            path.push(first.to_string());
            path.extend(rest.iter().cloned());
            match self.resolve(&path, Position::module(module), depth + 1) {
                Some(Resolved::Local(element)) => return Some(Resolved::Local(element)),
                Some(found) if scope.globs.len() == 1 => fallback = Some(found),
                _ => {}
            }
        }
        fallback
    }

    fn resolve_in_module(
        &self,
        mut module: Vec<String>,
        rest: &[String],
        depth: usize,
    ) -> Option<Resolved> {
        let (name, prefix) = rest.split_last()?;
        for segment in prefix {
            match segment.as_str() {
                "self" => {}
                "super" if module.len() > 1 => {
                    module.pop();
                }
                "super" => return None,
                _ => module.push(segment.clone()),
            }
        }

        let scope = self.modules.get(&module)?;
        if let Some(element) = scope.items.get(name) {
            return Some(Resolved::Local(element.clone()));
        }
        if let Some(target) = scope.imports.get(name) {
            return self.resolve(target, Position::module(&module), depth + 1);
        }
        scope.globs.iter().find_map(|glob| {
            let mut path = glob.clone();
            path.push(name.clone());
            self.resolve(&path, Position::module(&module), depth + 1)
                .and_then(Resolved::local)
                .map(Resolved::Local)
        })
    }
}

fn external(segments: &[String]) -> Option<Resolved> {
    let written = segments.join(".");
    let canonical = CapabilityId::new(&written);
    let segments: Vec<String> = if canonical.as_str() == written {
        segments.to_vec()
    } else {
        canonical.as_str().split('.').map(str::to_string).collect()
    };
    match segments.split_last() {
        Some((name, namespace)) if !namespace.is_empty() => Some(Resolved::External(
            TypeElement::top_level(namespace.to_vec(), name.clone()),
        )),
        _ => None,
    }
}

struct Walker<'a> {
    resolver: &'a Resolver<'a>,
    file: &'a Path,
    output: &'a mut ScanOutput,
}

impl Walker<'_> {
    fn walk_items(
        &mut self,
        items: &[&Item],
        module: &[String],
        locals: &mut Vec<Scope>,
        enclosing: Option<&TypeElement>,
    ) {
        for item in items {
            match item {
                Item::Struct(s) => self.declaration(&s.attrs, &s.ident, module, locals, enclosing),
                Item::Enum(e) => self.declaration(&e.attrs, &e.ident, module, locals, enclosing),
                Item::Union(u) => self.declaration(&u.attrs, &u.ident, module, locals, enclosing),
                Item::Trait(t) => self.marked_trait(&t.attrs, &t.ident, module, enclosing),
                Item::Impl(implementation) => {
                    self.implementation(implementation, module, locals);
                }
                Item::Fn(function) => {
                    let element = element_for(&function.sig.ident.to_string(), module, enclosing);
                    self.walk_block(&function.block, module, locals, &element);
                }
                Item::Mod(m) if enclosing.is_none() => {
                    if let Some((_, inner)) = &m.content {
                        let mut child = module.to_vec();
                        child.push(m.ident.to_string());
                        let inner: Vec<&Item> = inner.iter().collect();
                        self.walk_items(&inner, &child, &mut Vec::new(), None);
                    }
                }
                _ => {}
            }
        }
    }

    fn walk_block(
        &mut self,
        block: &syn::Block,
        module: &[String],
        locals: &mut Vec<Scope>,
        enclosing: &TypeElement,
    ) {
        let items: Vec<&Item> = block
            .stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Item(item) => Some(item),
                _ => None,
            })
            .collect();
        if items.is_empty() {
            return;
        }

        let mut scope = Scope::default();
        for item in &items {
            scope.declare(item, |name| TypeElement::nested(enclosing.clone(), name));
        }
        locals.push(scope);
        self.walk_items(&items, module, locals, Some(enclosing));
        locals.pop();
    }

    fn implementation(
        &mut self,
        implementation: &syn::ItemImpl,
        module: &[String],
        locals: &mut Vec<Scope>,
    ) {
        let Type::Path(self_ty) = implementation.self_ty.as_ref() else {
            return;
        };
        if self_ty.qself.is_some() {
            return;
        }

        let position = Position {
            module,
            locals,
            self_type: None,
        };
        let Some(implementer) = self
            .resolver
            .resolve_path(&self_ty.path, position)
            .map(Resolved::into_element)
        else {
            return;
        };

        if let Some((None, trait_path, _)) = &implementation.trait_ {
            let position = Position {
                self_type: Some(&implementer),
                ..position
            };
            if let Some(capability) = self.resolver.resolve_path(trait_path, position) {
                self.output
                    .hierarchy
                    .record(&implementer, &capability.into_element());
            }
        }

        for item in &implementation.items {
            if let ImplItem::Fn(method) = item {
                let element =
                    TypeElement::nested(implementer.clone(), method.sig.ident.to_string());
                self.walk_block(&method.block, module, locals, &element);
            }
        }
    }

    fn declaration(
        &mut self,
        attrs: &[Attribute],
        ident: &syn::Ident,
        module: &[String],
        locals: &[Scope],
        enclosing: Option<&TypeElement>,
    ) {
        let Some(marker) = attrs.iter().find(|attr| is_marker(attr)) else {
            return;
        };
        let implementer = element_for(&ident.to_string(), module, enclosing);
        let location = SourceLocation {
            file: self.file.to_path_buf(),
            line: ident.span().start().line,
        };

        let capability = match marker_capability(marker) {
            Ok(None) => None,
            Ok(Some(path)) => {
                let position = Position {
                    module,
                    locals,
                    self_type: Some(&implementer),
                };
                match self.resolver.resolve_path(&path, position) {
                    Some(resolved) => Some(resolved.into_element()),
                    None => {
                        self.output.diagnostics.push(Diagnostic::error(
                            format!(
                                "cannot resolve capability `{}` declared by {implementer}",
                                path_text(&path)
                            ),
                            Some(location),
                        ));
                        return;
                    }
                }
            }
            Err(e) => {
                self.output.diagnostics.push(Diagnostic::error(
                    format!("malformed #[{MARKER_ATTRIBUTE}] on {implementer}: {e}"),
                    Some(location),
                ));
                return;
            }
        };

        let named = capability.as_ref().unwrap_or(&implementer);
        if matches!(named.enclosing(), Enclosing::Element(_)) {
            self.output.diagnostics.push(Diagnostic::error(
                format!("capability {named} is local to a function body"),
                Some(location),
            ));
            return;
        }

        self.output.declarations.push(ProviderDeclaration {
            implementer,
            capability,
            location,
        });
    }

    fn marked_trait(
        &mut self,
        attrs: &[Attribute],
        ident: &syn::Ident,
        module: &[String],
        enclosing: Option<&TypeElement>,
    ) {
        if attrs.iter().any(is_marker) {
            let element = element_for(&ident.to_string(), module, enclosing);
            self.output.diagnostics.push(Diagnostic::warning(
                format!("{element} is a trait and cannot be instantiated; declaration ignored"),
                Some(SourceLocation {
                    file: self.file.to_path_buf(),
                    line: ident.span().start().line,
                }),
            ));
        }
    }
}

fn element_for(name: &str, module: &[String], enclosing: Option<&TypeElement>) -> TypeElement {
    match enclosing {
        Some(outer) => TypeElement::nested(outer.clone(), name),
        None => TypeElement::top_level(module.to_vec(), name),
    }
}

fn is_marker(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == MARKER_ATTRIBUTE)
}

/// Marker arguments: `[Capability] [, factory = path]`
struct MarkerArgs {
    capability: Option<Type>,
}

impl Parse for MarkerArgs {
    fn parse(input: ParseStream<'_>) -> syn::Result<Self> {
        let only_options = input.peek(syn::Ident) && input.peek2(Token![=]);
        let capability = if input.is_empty() || only_options {
            None
        } else {
            Some(input.parse::<Type>()?)
        };
        if capability.is_some() && !input.is_empty() {
            input.parse::<Token![,]>()?;
        }
        while !input.is_empty() {
            let key: syn::Ident = input.parse()?;
            if key != "factory" {
                return Err(syn::Error::new(key.span(), "expected `factory = path`"));
            }
            input.parse::<Token![=]>()?;
            input.parse::<syn::ExprPath>()?;
            if !input.is_empty() {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(Self { capability })
    }
}

/// The capability path named by the marker, if any
fn marker_capability(attr: &Attribute) -> syn::Result<Option<syn::Path>> {
    match &attr.meta {
        Meta::Path(_) => Ok(None),
        Meta::List(_) => {
            let Some(ty) = attr.parse_args::<MarkerArgs>()?.capability else {
                return Ok(None);
            };
            type_path(&ty)
                .map(Some)
                .ok_or_else(|| syn::Error::new_spanned(&ty, "expected a trait or type path"))
        }
        Meta::NameValue(value) => Err(syn::Error::new_spanned(
            value,
            "expected a capability path in parentheses",
        )),
    }
}

fn type_path(ty: &Type) -> Option<syn::Path> {
    match ty {
        Type::Path(path) if path.qself.is_none() => Some(path.path.clone()),
        Type::TraitObject(object) => object.bounds.iter().find_map(|bound| match bound {
            TypeParamBound::Trait(bound) => Some(bound.path.clone()),
            _ => None,
        }),
        Type::Paren(inner) => type_path(&inner.elem),
        Type::Group(inner) => type_path(&inner.elem),
        _ => None,
    }
}

fn path_text(path: &syn::Path) -> String {
    let segments: Vec<String> = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect();
    segments.join("::")
}
