use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::{
    AuthResponse, HealthStatus, Movement, MovementQuery, NewMovement, NewProduct, Product,
    Registration, StockAdjustment,
};
use crate::config::ApiConfig;
use crate::session::{SecureString, Session};

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const PRODUCTS_PATH: &str = "/api/products";
pub const MOVEMENTS_PATH: &str = "/api/movements";
pub const HEALTH_PATH: &str = "/health";

/// HTTP client for the inventory service.
///
/// Cloning is cheap; clones share the connection pool and the [`Session`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: Session) -> Result<Self, ApiError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds.into()))
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let builder = self.authorize(self.client.get(self.url(path)));
        self.send("GET", path, builder).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let mut builder = self.client.get(self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.send("GET", path, self.authorize(builder)).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.authorize(self.client.post(self.url(path)).json(body));
        self.send("POST", path, builder).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.authorize(self.client.patch(self.url(path)).json(body));
        self.send("PATCH", path, builder).await
    }

    /// Exchange credentials for a bearer token and store it in the session.
    ///
    /// The session is left untouched when the server rejects the credentials.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<AuthResponse, ApiError> {
        let form = [("username", identifier), ("password", secret)];
        let builder = self.client.post(self.url(LOGIN_PATH)).form(&form);
        let response: AuthResponse = self.send("POST", LOGIN_PATH, builder).await?;

        self.session
            .set_token(SecureString::new(response.access_token.clone()))?;
        tracing::info!(identifier, "Logged in");
        Ok(response)
    }

    pub async fn register(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<serde_json::Value, ApiError> {
        let body = Registration {
            email: identifier,
            password: secret,
        };
        self.post(REGISTER_PATH, &body).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get(PRODUCTS_PATH).await
    }

    pub async fn create_product(&self, product: &NewProduct) -> Result<Product, ApiError> {
        self.post(PRODUCTS_PATH, product).await
    }

    /// Set the absolute stock of one product. The confirmation body is
    /// returned as-is.
    pub async fn set_stock(
        &self,
        product_id: i64,
        adjustment: &StockAdjustment,
    ) -> Result<serde_json::Value, ApiError> {
        self.patch(&format!("{}/{}/stock", PRODUCTS_PATH, product_id), adjustment)
            .await
    }

    pub async fn create_movement(&self, movement: &NewMovement) -> Result<Movement, ApiError> {
        self.post(MOVEMENTS_PATH, movement).await
    }

    pub async fn list_movements(&self, query: &MovementQuery) -> Result<Vec<Movement>, ApiError> {
        self.get_with_query(MOVEMENTS_PATH, &query.pairs()).await
    }

    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.get(HEALTH_PATH).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: &'static str,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("api_request", %request_id, method, path);

        async move {
            let transport = |source| ApiError::Transport {
                path: path.to_string(),
                source,
            };

            let response = builder.send().await.map_err(transport)?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                tracing::warn!(status = status.as_u16(), "Request rejected");
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let bytes = response.bytes().await.map_err(transport)?;
            tracing::debug!(status = status.as_u16(), bytes = bytes.len(), "Request completed");

            // An empty success body decodes like JSON `null`.
            let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
                b"null"
            } else {
                &bytes
            };
            serde_json::from_slice(payload).map_err(|e| ApiError::Decode {
                path: path.to_string(),
                message: e.to_string(),
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ApiConfig {
            base_url: "http://localhost:8000/".to_string(),
            ..ApiConfig::default()
        };
        let client = ApiClient::new(&config, Session::in_memory()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(PRODUCTS_PATH), "http://localhost:8000/api/products");
    }
}
