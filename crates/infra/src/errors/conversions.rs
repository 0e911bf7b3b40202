//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use rota_domain::RosterError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RosterError);

impl From<InfraError> for RosterError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RosterError> for InfraError {
    fn from(value: RosterError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoRosterError {
    fn into_roster(self) -> RosterError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RosterError */
/* -------------------------------------------------------------------------- */

impl IntoRosterError for HttpError {
    fn into_roster(self) -> RosterError {
        if self.is_timeout() {
            return RosterError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return RosterError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                404 => RosterError::NotFound(message),
                400..=499 => RosterError::InvalidInput(message),
                500..=599 => RosterError::Server(message),
                _ => RosterError::Network(message),
            };
        }

        if self.is_builder() {
            return RosterError::Internal(format!("invalid HTTP request: {self}"));
        }

        if self.is_decode() {
            return RosterError::Internal(format!("malformed response body: {self}"));
        }

        RosterError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_roster())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use std::net::TcpListener;

    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(status)).mount(&server).await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn http_status_404_maps_to_not_found() {
        let mapped: RosterError = InfraError::from(status_error(StatusCode::NOT_FOUND).await).into();
        match mapped {
            RosterError::NotFound(msg) => assert!(msg.contains("404")),
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_status_503_maps_to_server_error() {
        let mapped: RosterError =
            InfraError::from(status_error(StatusCode::SERVICE_UNAVAILABLE).await).into();
        assert!(matches!(mapped, RosterError::Server(_)), "got {mapped:?}");
    }

    #[tokio::test]
    async fn http_status_422_maps_to_invalid_input() {
        let mapped: RosterError =
            InfraError::from(status_error(StatusCode::UNPROCESSABLE_ENTITY).await).into();
        assert!(matches!(mapped, RosterError::InvalidInput(_)), "got {mapped:?}");
    }

    #[tokio::test]
    async fn refused_connection_maps_to_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = Client::builder().no_proxy().build().unwrap();
        let error = client.get(format!("http://{addr}")).send().await.unwrap_err();

        let mapped: RosterError = InfraError::from(error).into();
        assert!(matches!(mapped, RosterError::Network(_)), "got {mapped:?}");
    }
}
