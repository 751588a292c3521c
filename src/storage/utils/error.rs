// Conversions feeding the wrap_err! macro
use crate::error::Error;

/// Fold foreign error types into the gateway's `Error`.
pub trait IntoGatewayError {
    fn into_error(self) -> Error;
}

impl IntoGatewayError for Error {
    fn into_error(self) -> Error {
        self
    }
}

impl IntoGatewayError for opendal::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

impl IntoGatewayError for std::io::Error {
    fn into_error(self) -> Error {
        self.into()
    }
}

/// Wrap a fallible expression into a Snafu variant carrying `source: Box<Error>`,
/// attaching the operation's context fields:
/// wrap_err!(op.await, DeleteFailed { folder: f, file: n })?
#[macro_export]
macro_rules! wrap_err {
    ($expr:expr, $variant:ident { $($field:ident : $value:expr),* $(,)? }) => {{
        $expr.map_err(|e| {
            let src: $crate::error::Error = $crate::storage::utils::error::IntoGatewayError::into_error(e);
            $crate::error::Error::$variant { $($field: $value),*, source: Box::new(src) }
        })
    }};
}
