//! Traversal protocol.
//!
//! A [`Visitor`] has one hook per entity kind. Each hook decides how the walk
//! continues below the entity it was given:
//!
//! - [`Walk::Descend`]: visit the children with the same visitor;
//! - [`Walk::Skip`]: do not visit the children, carry on with the siblings;
//! - [`Walk::With`]: visit the children with another visitor.
//!
//! The first error returned by any hook aborts the walk and is handed back
//! to the caller unchanged.
//!
//! Children are visited in declaration order:
//!
//! ```text
//! package → files
//! file    → enums, messages, services, extensions
//! message → enums, messages (map entries excluded), fields, oneofs, extensions
//! enum    → values
//! service → methods
//! ```

use crate::graph::{
    AnyEntity, Enum, EnumValue, Extension, Field, File, Message, Method, OneOf, Package, Service,
};

/// How the walk proceeds below a visited entity.
pub enum Walk<'g, E> {
    Descend,
    Skip,
    With(Box<dyn Visitor<'g, Error = E> + 'g>),
}

impl<E> std::fmt::Debug for Walk<'_, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Walk::Descend => f.write_str("Descend"),
            Walk::Skip => f.write_str("Skip"),
            Walk::With(_) => f.write_str("With(..)"),
        }
    }
}

type VisitResult<'g, E> = Result<Walk<'g, E>, E>;

/// Per-kind hooks of a depth-first walk. Every hook defaults to
/// [`Walk::Descend`].
pub trait Visitor<'g> {
    type Error;

    fn visit_package(&mut self, package: Package<'g>) -> VisitResult<'g, Self::Error> {
        let _ = package;
        Ok(Walk::Descend)
    }

    fn visit_file(&mut self, file: File<'g>) -> VisitResult<'g, Self::Error> {
        let _ = file;
        Ok(Walk::Descend)
    }

    fn visit_message(&mut self, message: Message<'g>) -> VisitResult<'g, Self::Error> {
        let _ = message;
        Ok(Walk::Descend)
    }

    fn visit_enum(&mut self, enumeration: Enum<'g>) -> VisitResult<'g, Self::Error> {
        let _ = enumeration;
        Ok(Walk::Descend)
    }

    fn visit_enum_value(&mut self, value: EnumValue<'g>) -> VisitResult<'g, Self::Error> {
        let _ = value;
        Ok(Walk::Descend)
    }

    fn visit_field(&mut self, field: Field<'g>) -> VisitResult<'g, Self::Error> {
        let _ = field;
        Ok(Walk::Descend)
    }

    fn visit_oneof(&mut self, oneof: OneOf<'g>) -> VisitResult<'g, Self::Error> {
        let _ = oneof;
        Ok(Walk::Descend)
    }

    fn visit_extension(&mut self, extension: Extension<'g>) -> VisitResult<'g, Self::Error> {
        let _ = extension;
        Ok(Walk::Descend)
    }

    fn visit_service(&mut self, service: Service<'g>) -> VisitResult<'g, Self::Error> {
        let _ = service;
        Ok(Walk::Descend)
    }

    fn visit_method(&mut self, method: Method<'g>) -> VisitResult<'g, Self::Error> {
        let _ = method;
        Ok(Walk::Descend)
    }
}

type DynVisitor<'a, 'g, E> = dyn Visitor<'g, Error = E> + 'a;

/// Walk `entity` and everything below it.
pub fn walk<'g, E>(visitor: &mut DynVisitor<'_, 'g, E>, entity: AnyEntity<'g>) -> Result<(), E> {
    match entity {
        AnyEntity::File(file) => {
            let next = visitor.visit_file(file)?;
            descend(visitor, next, |v| {
                walk_all(v, file.enums())?;
                walk_all(v, file.messages())?;
                walk_all(v, file.services())?;
                walk_all(v, file.defined_extensions())
            })
        }
        AnyEntity::Message(message) => {
            let next = visitor.visit_message(message)?;
            descend(visitor, next, |v| {
                walk_all(v, message.enums())?;
                walk_all(v, message.messages())?;
                walk_all(v, message.fields())?;
                walk_all(v, message.oneofs())?;
                walk_all(v, message.defined_extensions())
            })
        }
        AnyEntity::Enum(enumeration) => {
            let next = visitor.visit_enum(enumeration)?;
            descend(visitor, next, |v| walk_all(v, enumeration.values()))
        }
        AnyEntity::Service(service) => {
            let next = visitor.visit_service(service)?;
            descend(visitor, next, |v| walk_all(v, service.methods()))
        }
        AnyEntity::EnumValue(value) => visitor.visit_enum_value(value).map(drop),
        AnyEntity::Field(field) => visitor.visit_field(field).map(drop),
        AnyEntity::OneOf(oneof) => visitor.visit_oneof(oneof).map(drop),
        AnyEntity::Extension(extension) => visitor.visit_extension(extension).map(drop),
        AnyEntity::Method(method) => visitor.visit_method(method).map(drop),
    }
}

/// Walk a package and each of its files.
pub fn walk_package<'g, E>(visitor: &mut DynVisitor<'_, 'g, E>, package: Package<'g>) -> Result<(), E> {
    let next = visitor.visit_package(package)?;
    descend(visitor, next, |v| walk_all(v, package.files()))
}

/// [`walk`] when there is an entity; nothing (and success) otherwise.
pub fn walk_optional<'g, E>(
    visitor: &mut DynVisitor<'_, 'g, E>,
    entity: Option<AnyEntity<'g>>,
) -> Result<(), E> {
    match entity {
        Some(entity) => walk(visitor, entity),
        None => Ok(()),
    }
}

fn walk_all<'g, E, T>(visitor: &mut DynVisitor<'_, 'g, E>, children: Vec<T>) -> Result<(), E>
where
    T: Into<AnyEntity<'g>>,
{
    for child in children {
        walk(visitor, child.into())?;
    }
    Ok(())
}

fn descend<'g, E>(
    visitor: &mut DynVisitor<'_, 'g, E>,
    next: Walk<'g, E>,
    children: impl FnOnce(&mut DynVisitor<'_, 'g, E>) -> Result<(), E>,
) -> Result<(), E> {
    match next {
        Walk::Descend => children(visitor),
        Walk::Skip => Ok(()),
        Walk::With(mut other) => children(other.as_mut()),
    }
}
