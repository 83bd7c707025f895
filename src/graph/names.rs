//! Fully-qualified name computation.
//!
//! Names are parent-driven: an entity's FQN is its parent's FQN, a dot and its
//! local name. Entities declared at file level hang off the file's package
//! namespace, which is `.pkg` (or empty for package-less files, so that
//! top-level names come out as `.Name`). Files themselves are keyed by their
//! input path and never take part in dotted names.

/// Separator between FQN segments.
pub const SEPARATOR: char = '.';

/// Namespace that file-level declarations of `package` are qualified against.
pub fn file_namespace(package: &str) -> String {
    if package.is_empty() {
        String::new()
    } else {
        format!("{SEPARATOR}{package}")
    }
}

/// FQN of a declaration named `name` inside the namespace `parent`.
pub fn qualify(parent: &str, name: &str) -> String {
    let mut fqn = String::with_capacity(parent.len() + name.len() + 1);
    fqn.push_str(parent);
    fqn.push(SEPARATOR);
    fqn.push_str(name);
    fqn
}
