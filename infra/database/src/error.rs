use std::borrow::Cow;

/// A specialized error enum for database infrastructure failures.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Validation errors (missing builder parameters and the like).
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when connectivity or health checks fail.
    #[error("Database connection failed{}: {message}", format_context(.context))]
    Connection { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Occurs when root authentication fails.
    #[error("Authentication failed{}: {message}", format_context(.context))]
    Auth { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A wrapper for underlying `SurrealDB` engine errors.
    #[error("SurrealDB error{}: {source}", format_context(.context))]
    Surreal {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Migration failures or invariant violations.
    #[error("Migration error{}: {message}", format_context(.context))]
    Migration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal database error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<surrealdb::Error> for DatabaseError {
    fn from(source: surrealdb::Error) -> Self {
        Self::Surreal { source, context: None }
    }
}

/// Adds `.context(...)` to results flowing into [`DatabaseError`].
pub trait DatabaseErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError>;
}

impl<T> DatabaseErrorExt<T> for Result<T, DatabaseError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                DatabaseError::Validation { context: c, .. }
                | DatabaseError::Connection { context: c, .. }
                | DatabaseError::Auth { context: c, .. }
                | DatabaseError::Surreal { context: c, .. }
                | DatabaseError::Migration { context: c, .. }
                | DatabaseError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> DatabaseErrorExt<T> for Result<T, surrealdb::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, DatabaseError> {
        self.map_err(|source| DatabaseError::Surreal { source, context: Some(context.into()) })
    }
}

pub(crate) fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
