//! DOMS repository client implementation

use crate::error::{DomsError, Result};
use crate::models::*;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Basic-auth credentials for the repository
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: Secret<String>,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Secret::new(password.into()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Client for the DOMS repository service and its PID generator
#[derive(Clone)]
pub struct DomsClient {
    http: Client,
    base_url: Url,
    pid_generator_url: Url,
    credentials: Option<Credentials>,
}

impl std::fmt::Debug for DomsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomsClient")
            .field("base_url", &self.base_url)
            .field("pid_generator_url", &self.pid_generator_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Builder for creating a DomsClient
#[derive(Default)]
pub struct DomsClientBuilder {
    base_url: Option<String>,
    pid_generator_url: Option<String>,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl DomsClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the repository base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the PID generator service URL
    pub fn pid_generator_url(mut self, url: impl Into<String>) -> Self {
        self.pid_generator_url = Some(url.into());
        self
    }

    /// Set the credentials used for basic auth
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<DomsClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| DomsError::Config("repository base URL is required".to_string()))?;
        let base_url = Url::parse(&base_url)?;

        let pid_generator_url = self
            .pid_generator_url
            .ok_or_else(|| DomsError::Config("PID generator URL is required".to_string()))?;
        let pid_generator_url = Url::parse(&pid_generator_url)?;

        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("doms-client/{}", env!("CARGO_PKG_VERSION")));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let http = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .map_err(DomsError::Http)?;

        Ok(DomsClient {
            http,
            base_url,
            pid_generator_url,
            credentials: self.credentials,
        })
    }
}

impl DomsClient {
    /// Create a new client builder
    pub fn builder() -> DomsClientBuilder {
        DomsClientBuilder::new()
    }

    /// Get the repository base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a URL under `objects/{pid}` on the repository.
    ///
    /// PIDs contain `:` and must go through the segment API; joining them
    /// as relative references would reparse the prefix as a URL scheme.
    fn object_url(&self, pid: &str, parts: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DomsError::Config("repository base URL cannot be a base".to_string()))?;
            segments.pop_if_empty();
            segments.push("objects");
            segments.push(pid);
            segments.extend(parts);
        }
        Ok(url)
    }

    /// Add basic auth if credentials are configured
    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.credentials {
            Some(credentials) => request.basic_auth(
                &credentials.username,
                Some(credentials.password.expose_secret()),
            ),
            None => request,
        }
    }

    /// Handle a JSON response body
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();

        if status.is_success() {
            response.json().await.map_err(DomsError::Http)
        } else {
            Err(Self::backend_error(status, response).await)
        }
    }

    /// Handle a response whose body is irrelevant
    async fn handle_empty_response(&self, response: Response) -> Result<()> {
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            Err(Self::backend_error(status, response).await)
        }
    }

    async fn backend_error(status: StatusCode, response: Response) -> DomsError {
        let message = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                DomsError::InvalidCredentials(message)
            }
            StatusCode::NOT_FOUND | StatusCode::GONE => DomsError::InvalidResource(message),
            _ => DomsError::MethodFailed {
                status: status.as_u16(),
                message,
            },
        }
    }

    // ===== PID generator =====

    /// Allocate a fresh PID from the PID generator service
    #[instrument(skip(self))]
    pub async fn next_pid(&self) -> Result<String> {
        let mut url = self.pid_generator_url.clone();
        url.path_segments_mut()
            .map_err(|_| DomsError::Config("PID generator URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("pids");

        let response = self
            .authed(self.http.post(url))
            .send()
            .await
            .map_err(|e| DomsError::PidGenerator(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(DomsError::PidGenerator(format!("{}: {}", status, message)));
        }

        let allocated: PidResponse = response
            .json()
            .await
            .map_err(|e| DomsError::PidGenerator(e.to_string()))?;

        debug!(pid = %allocated.pid, "PID allocated");
        Ok(allocated.pid)
    }

    // ===== Object API =====

    /// Clone a template object into a new object and return its PID.
    ///
    /// A PID is allocated from the generator first; the repository then
    /// copies the template's structure under that PID.
    #[instrument(skip(self, old_identifiers, log_message))]
    pub async fn clone_template(
        &self,
        template_pid: &str,
        old_identifiers: &[String],
        log_message: &str,
    ) -> Result<String> {
        let pid = self.next_pid().await?;

        let request = CloneTemplateRequest {
            pid: pid.clone(),
            old_identifiers: old_identifiers.to_vec(),
            log_message: log_message.to_string(),
        };

        let url = self.object_url(template_pid, &["clone"])?;
        let response = self
            .authed(self.http.post(url).json(&request))
            .send()
            .await
            .map_err(DomsError::Http)?;

        let cloned: PidResponse = self.handle_response(response).await?;

        debug!(template = %template_pid, pid = %cloned.pid, "Template cloned");
        Ok(cloned.pid)
    }

    /// Set an object's display label
    #[instrument(skip(self, log_message))]
    pub async fn modify_object_label(
        &self,
        pid: &str,
        label: &str,
        log_message: &str,
    ) -> Result<()> {
        let request = ModifyLabelRequest {
            label: label.to_string(),
            log_message: log_message.to_string(),
        };

        let url = self.object_url(pid, &["label"])?;
        let response = self
            .authed(self.http.put(url).json(&request))
            .send()
            .await
            .map_err(DomsError::Http)?;

        self.handle_empty_response(response).await
    }

    /// Replace the content of a named datastream.
    ///
    /// When `checksum` is `None` the repository computes one itself using
    /// `checksum_type`.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, content, alt_ids, log_message, format_uri))]
    pub async fn modify_datastream(
        &self,
        pid: &str,
        datastream_id: &str,
        checksum_type: ChecksumType,
        checksum: Option<String>,
        content: &[u8],
        alt_ids: &[String],
        mime_type: &str,
        log_message: &str,
        format_uri: Option<String>,
    ) -> Result<()> {
        let request = ModifyDatastreamRequest {
            mime_type: mime_type.to_string(),
            checksum_type,
            checksum,
            content: BASE64.encode(content),
            alt_ids: alt_ids.to_vec(),
            format_uri,
            log_message: log_message.to_string(),
        };

        let url = self.object_url(pid, &["datastreams", datastream_id])?;
        let response = self
            .authed(self.http.post(url).json(&request))
            .send()
            .await
            .map_err(DomsError::Http)?;

        debug!(pid = %pid, datastream = %datastream_id, bytes = content.len(), "Datastream uploaded");
        self.handle_empty_response(response).await
    }

    /// Add a relation to an object's RELS-EXT datastream
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, log_message))]
    pub async fn add_relation(
        &self,
        pid: &str,
        subject: &str,
        predicate: &str,
        object: &str,
        literal: bool,
        log_message: &str,
    ) -> Result<()> {
        let request = AddRelationRequest {
            subject: subject.to_string(),
            predicate: predicate.to_string(),
            object: object.to_string(),
            literal,
            log_message: log_message.to_string(),
        };

        let url = self.object_url(pid, &["relations"])?;
        let response = self
            .authed(self.http.post(url).json(&request))
            .send()
            .await
            .map_err(DomsError::Http)?;

        self.handle_empty_response(response).await
    }

    /// Transition an object's lifecycle state
    #[instrument(skip(self, log_message))]
    pub async fn modify_object_state(
        &self,
        pid: &str,
        state: ObjectState,
        log_message: &str,
    ) -> Result<()> {
        let request = ModifyStateRequest {
            state,
            log_message: log_message.to_string(),
        };

        let url = self.object_url(pid, &["state"])?;
        let response = self
            .authed(self.http.put(url).json(&request))
            .send()
            .await
            .map_err(DomsError::Http)?;

        self.handle_empty_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> DomsClient {
        DomsClient::builder()
            .base_url(server.uri())
            .pid_generator_url(format!("{}/pidgen", server.uri()))
            .credentials(Credentials::new("fedoraAdmin", "fedoraAdminPass"))
            .build()
            .unwrap()
    }

    fn expected_auth() -> String {
        format!("Basic {}", BASE64.encode("fedoraAdmin:fedoraAdminPass"))
    }

    #[test]
    fn test_builder_requires_base_url() {
        let result = DomsClient::builder()
            .pid_generator_url("http://localhost:7880/pidgenerator-service")
            .build();
        assert!(matches!(result, Err(DomsError::Config(_))));
    }

    #[test]
    fn test_object_url_keeps_pid_intact() {
        let client = DomsClient::builder()
            .base_url("http://localhost:7880/fedora")
            .pid_generator_url("http://localhost:7880/pidgenerator-service")
            .build()
            .unwrap();

        let url = client.object_url("doms:uuid_1", &["label"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:7880/fedora/objects/doms:uuid_1/label"
        );
    }

    #[tokio::test]
    async fn test_clone_template_allocates_pid_first() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pidgen/pids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pid": "doms:uuid_1"})))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/objects/doms:Template_Newspaper/clone"))
            .and(header("authorization", expected_auth().as_str()))
            .and(body_json(json!({
                "pid": "doms:uuid_1",
                "old_identifiers": ["path:a.xml"],
                "log_message": "Adding newspaper title"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pid": "doms:uuid_1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let pid = client
            .clone_template(
                "doms:Template_Newspaper",
                &["path:a.xml".to_string()],
                "Adding newspaper title",
            )
            .await
            .unwrap();

        assert_eq!(pid, "doms:uuid_1");
    }

    #[tokio::test]
    async fn test_pid_generator_failure_is_distinct() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pidgen/pids"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .clone_template("doms:Template_Newspaper", &[], "msg")
            .await
            .unwrap_err();

        assert!(matches!(err, DomsError::PidGenerator(_)));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_invalid_credentials() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/objects/doms:uuid_1/label"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad password"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .modify_object_label("doms:uuid_1", "report", "msg")
            .await
            .unwrap_err();

        assert!(matches!(err, DomsError::InvalidCredentials(_)));
        assert_eq!(err.status_code(), Some(401));
    }

    #[tokio::test]
    async fn test_missing_object_maps_to_invalid_resource() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/objects/doms:nope/state"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .modify_object_state("doms:nope", ObjectState::Active, "msg")
            .await
            .unwrap_err();

        assert!(matches!(err, DomsError::InvalidResource(_)));
    }

    #[tokio::test]
    async fn test_server_error_maps_to_method_failed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/objects/doms:uuid_1/relations"))
            .respond_with(ResponseTemplate::new(500).set_body_string("triplestore down"))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .add_relation(
                "doms:uuid_1",
                "info:fedora/doms:uuid_1",
                "http://doms.statsbiblioteket.dk/relations/default/0/1/#isPartOfNewspaper",
                "info:fedora/doms:uuid_2",
                false,
                "msg",
            )
            .await
            .unwrap_err();

        assert!(matches!(err, DomsError::MethodFailed { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_datastream_content_is_base64() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/objects/doms:uuid_1/datastreams/MODS"))
            .and(body_json(json!({
                "mime_type": "text/xml",
                "checksum_type": "MD5",
                "content": BASE64.encode("<mods/>"),
                "alt_ids": [],
                "log_message": "Adding newspaper title"
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .modify_datastream(
                "doms:uuid_1",
                "MODS",
                ChecksumType::Md5,
                None,
                b"<mods/>",
                &[],
                "text/xml",
                "Adding newspaper title",
                None,
            )
            .await
            .unwrap();
    }
}
