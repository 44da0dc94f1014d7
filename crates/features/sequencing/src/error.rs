use std::borrow::Cow;

/// A specialized error enum for sequence allocation and formatting.
#[derive(Debug, thiserror::Error)]
pub enum SequenceError {
    /// Bad formatter input (empty codes, negative weight, zero sequence).
    #[error("Sequence validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The allocated sequence no longer fits its fixed zero-padded width.
    /// Past this point lexicographic and numeric ordering diverge, so the
    /// identifier must not be issued.
    #[error("Sequence overflow{}: {message}", format_context(.context))]
    Overflow { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Stored identifier state contradicts the format contract (e.g. a
    /// voucher number with a non-numeric suffix under a valid prefix).
    #[error("Sequence integrity error{}: {message}", format_context(.context))]
    Integrity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The underlying database query failed.
    #[error("Sequence database error{}: {source}", format_context(.context))]
    Database {
        #[source]
        source: surrealdb::Error,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues.
    #[error("Internal sequence error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<surrealdb::Error> for SequenceError {
    fn from(source: surrealdb::Error) -> Self {
        Self::Database { source, context: None }
    }
}

pub trait SequenceErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SequenceError>;
}

impl<T> SequenceErrorExt<T> for Result<T, SequenceError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Self {
        self.map_err(|mut e| {
            match &mut e {
                SequenceError::Validation { context: c, .. }
                | SequenceError::Overflow { context: c, .. }
                | SequenceError::Integrity { context: c, .. }
                | SequenceError::Database { context: c, .. }
                | SequenceError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

impl<T> SequenceErrorExt<T> for Result<T, surrealdb::Error> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, SequenceError> {
        self.map_err(|source| SequenceError::Database { source, context: Some(context.into()) })
    }
}

pub(crate) fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
