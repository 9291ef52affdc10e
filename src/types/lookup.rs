use crate::error::DbError;

/// Outcome of a lookup by key.
///
/// Unlike `Option`, a failed query is kept apart from a lookup that simply
/// matched nothing.
#[derive(Debug)]
pub enum Lookup<E> {
    Found(E),
    NotFound,
    Failed(DbError),
}

impl<E> Lookup<E> {
    /// Takes the first entity of an already mapped result set.
    pub fn first_of(entities: Vec<E>) -> Self {
        match entities.into_iter().next() {
            Some(entity) => Lookup::Found(entity),
            None => Lookup::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Lookup::NotFound)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Lookup::Failed(_))
    }

    /// Collapses the outcome, dropping any failure cause.
    pub fn into_option(self) -> Option<E> {
        match self {
            Lookup::Found(entity) => Some(entity),
            Lookup::NotFound | Lookup::Failed(_) => None,
        }
    }

    /// Converts into a `Result`, with not-found as `Ok(None)`.
    pub fn into_result(self) -> Result<Option<E>, DbError> {
        match self {
            Lookup::Found(entity) => Ok(Some(entity)),
            Lookup::NotFound => Ok(None),
            Lookup::Failed(err) => Err(err),
        }
    }
}

impl<E> From<Result<Vec<E>, DbError>> for Lookup<E> {
    fn from(result: Result<Vec<E>, DbError>) -> Self {
        match result {
            Ok(entities) => Lookup::first_of(entities),
            Err(err) => Lookup::Failed(err),
        }
    }
}
