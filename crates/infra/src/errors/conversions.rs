use reqwest::Error as HttpError;
use trak_domain::TrakError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TrakError);

impl From<InfraError> for TrakError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TrakError> for InfraError {
    fn from(value: TrakError) -> Self {
        Self(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoTrakError {
    fn into_trak(self) -> TrakError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TrakError */
/* -------------------------------------------------------------------------- */

impl IntoTrakError for HttpError {
    fn into_trak(self) -> TrakError {
        if self.is_timeout() {
            return TrakError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return TrakError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return TrakError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => TrakError::NotFound(message),
                400 | 422 => TrakError::Validation(message),
                _ => TrakError::Network(message),
            };
        }

        if self.is_decode() {
            return TrakError::Network(format!("unexpected response body: {self}"));
        }

        TrakError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_trak())
    }
}
