//! Nested-type collection.
//!
//! Flattens every nested object of a descriptor tree into a named type, in
//! dependency order (deepest first, containers after their members), and
//! resolves each field to a [`Slot`] that refers to those names. Names are
//! positional: an object under key `k` is `PascalCase(k)`, an object found
//! inside an array (of any depth) under key `k` is `PascalCase(k) + "Item"`.
//! Structurally identical objects under different keys are not merged. Names
//! are unique per plan: a name already taken (by the root or an earlier type)
//! is prefixed with the containing type's name, then numbered if still taken.
//! A name the target reserves gets a `Type` suffix first.
use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::ir::{Fields, Ty};
use crate::naming::to_pascal_case;

static NO_FIELDS: Lazy<Fields> = Lazy::new(Fields::new);

/// What a field refers to, after nested objects have been given names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Null,
    String,
    Integer,
    Number,
    Bool,
    Any,
    List(Box<Slot>),
    Named(String),
}

/// An object destined to become a standalone declaration. Borrows the descriptor's fields.
#[derive(Debug, Clone)]
pub struct NamedType<'a> {
    pub name: String,
    pub fields: &'a Fields,
    /// Declared name of the nested type behind each object-valued field.
    children: HashMap<&'a str, String>,
}

impl<'a> NamedType<'a> {
    /// Fields in source order, each with its original key and resolved slot.
    pub fn slots(&self) -> impl Iterator<Item = (&'a str, Slot)> + '_ {
        self.fields.iter().map(|(key, ty)| (key.as_str(), self.resolve(key, ty)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn resolve(&self, key: &str, ty: &Ty) -> Slot {
        match ty {
            Ty::Object(_) => Slot::Named(self.child_name(key, false)),
            Ty::Array(item) => Slot::List(Box::new(self.resolve_item(key, item))),
            other => scalar(other),
        }
    }

    fn resolve_item(&self, key: &str, ty: &Ty) -> Slot {
        match ty {
            Ty::Object(_) => Slot::Named(self.child_name(key, true)),
            Ty::Array(item) => Slot::List(Box::new(self.resolve_item(key, item))),
            other => scalar(other),
        }
    }

    fn child_name(&self, key: &str, in_array: bool) -> String {
        match self.children.get(key) {
            Some(name) => name.clone(),
            None => nested_name(key, in_array),
        }
    }
}

/// Everything an emitter needs: the nested types in declaration order, then the root.
#[derive(Debug, Clone)]
pub struct Plan<'a> {
    pub nested: Vec<NamedType<'a>>,
    pub root: NamedType<'a>,
    /// How many array layers wrapped the root object (0 for an object root).
    pub root_array_depth: usize,
}

impl<'a> Plan<'a> {
    /// Nested types first, root last.
    pub fn types(&self) -> impl Iterator<Item = &NamedType<'a>> {
        self.nested.iter().chain(std::iter::once(&self.root))
    }
}

/// Build the emission plan for `root` named `root_name` (re-cased to PascalCase).
///
/// An array root is unwrapped down to its element object; any other non-object
/// root becomes a type with no fields. `reserved` tells which type names the
/// target cannot declare.
pub fn plan<'a>(root: &'a Ty, root_name: &str, reserved: &dyn Fn(&str) -> bool) -> Plan<'a> {
    let (inner, depth) = root.innermost();
    let (fields, root_array_depth) = match inner {
        Ty::Object(fields) => (fields, depth),
        _ => (&*NO_FIELDS, 0),
    };
    let mut names = Names { taken: HashSet::new(), reserved };
    let name = names.claim(to_pascal_case(root_name), "");
    let mut nested = Vec::new();
    let children = collect_into(fields, &name, &mut names, &mut nested);
    tracing::debug!(nested = nested.len(), root_array_depth, "collected nested types");
    Plan {
        nested,
        root: NamedType { name, fields, children },
        root_array_depth,
    }
}

/// Names handed out so far within one plan.
struct Names<'r> {
    taken: HashSet<String>,
    reserved: &'r dyn Fn(&str) -> bool,
}

impl Names<'_> {
    fn claim(&mut self, base: String, parent: &str) -> String {
        let base = if (self.reserved)(base.as_str()) { format!("{base}Type") } else { base };
        if self.take(&base) {
            return base;
        }
        let prefixed = format!("{parent}{base}");
        let mut candidate = prefixed.clone();
        let mut n = 2;
        while !self.take(&candidate) {
            candidate = format!("{prefixed}{n}");
            n += 1;
        }
        candidate
    }

    fn take(&mut self, name: &str) -> bool {
        !(self.reserved)(name) && self.taken.insert(name.to_string())
    }
}

/// Push the named types reachable from `fields` onto `out`, deepest first, and
/// return the names given to `fields`' own object-valued entries.
fn collect_into<'a>(
    fields: &'a Fields,
    parent: &str,
    names: &mut Names<'_>,
    out: &mut Vec<NamedType<'a>>,
) -> HashMap<&'a str, String> {
    let mut children = HashMap::new();
    for (key, ty) in fields {
        let (inner, depth) = ty.innermost();
        if let Ty::Object(nested) = inner {
            // claimed before descending so containers win over their members
            let name = names.claim(nested_name(key, depth > 0), parent);
            let grandchildren = collect_into(nested, &name, names, out);
            out.push(NamedType { name: name.clone(), fields: nested, children: grandchildren });
            children.insert(key.as_str(), name);
        }
    }
    children
}

fn nested_name(key: &str, in_array: bool) -> String {
    let base = to_pascal_case(key);
    if in_array { format!("{base}Item") } else { base }
}

fn scalar(ty: &Ty) -> Slot {
    match ty {
        Ty::Null => Slot::Null,
        Ty::String => Slot::String,
        Ty::Integer => Slot::Integer,
        Ty::Number => Slot::Number,
        Ty::Bool => Slot::Bool,
        Ty::Any => Slot::Any,
        // objects only reach here without a key to name them after
        Ty::Array(_) | Ty::Object(_) => Slot::Any,
    }
}
