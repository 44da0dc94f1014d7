use std::borrow::Cow;

/// A specialized error enum for the activity trail.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    /// The underlying insert or query failed.
    #[error("Audit write error{}: {source}", format_context(.context))]
    Write {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues.
    #[error("Internal audit error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<surrealdb::Error> for AuditError {
    fn from(source: surrealdb::Error) -> Self {
        Self::Write { source, context: None }
    }
}

pub trait AuditErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, AuditError>;
}

impl<T> AuditErrorExt<T> for Result<T, AuditError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                AuditError::Write { context: c, .. } | AuditError::Internal { context: c, .. } => {
                    *c = Some(context.into());
                }
            }
            e
        })
    }
}

impl<T> AuditErrorExt<T> for Result<T, surrealdb::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, AuditError> {
        self.map_err(|source| AuditError::Write { source, context: Some(context.into()) })
    }
}

pub(crate) fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
