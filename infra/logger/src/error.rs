use std::borrow::Cow;

/// A specialized error enum for logger initialization.
#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Invalid builder settings.
    #[error("Logger configuration error{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Failure building the rolling file appender.
    #[error("Log appender error{}: {source}", format_context(.context))]
    Appender {
        #[source]
        source: tracing_appender::rolling::InitError,
        context: Option<Cow<'static, str>>,
    },

    /// A global subscriber is already installed.
    #[error("Subscriber error{}: {source}", format_context(.context))]
    Subscriber {
        #[source]
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// Internal fallback for unexpected issues.
    #[error("Internal logger error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<tracing_appender::rolling::InitError> for LoggerError {
    fn from(source: tracing_appender::rolling::InitError) -> Self {
        Self::Appender { source, context: None }
    }
}

impl From<tracing_subscriber::util::TryInitError> for LoggerError {
    fn from(source: tracing_subscriber::util::TryInitError) -> Self {
        Self::Subscriber { source, context: None }
    }
}

pub trait LoggerErrorExt<T> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, LoggerError>;
}

impl<T> LoggerErrorExt<T> for Result<T, LoggerError> {
    fn context(self, context: impl Into<Cow<'static, str>>) -> Result<T, LoggerError> {
        self.map_err(|mut e| {
            match &mut e {
                LoggerError::InvalidConfiguration { context: c, .. }
                | LoggerError::Appender { context: c, .. }
                | LoggerError::Subscriber { context: c, .. }
                | LoggerError::Internal { context: c, .. } => *c = Some(context.into()),
            }
            e
        })
    }
}

pub(crate) fn format_context(context: &Option<Cow<'static, str>>) -> Cow<'static, str> {
    context.as_ref().map_or(Cow::Borrowed(""), |c| Cow::Owned(format!(" ({c})")))
}
