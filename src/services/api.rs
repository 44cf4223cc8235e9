// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! REST client for the activity API.
//!
//! Handles:
//! - Login/logout and the session `Token` header
//! - Profile, email and password updates, profile access and role checks
//! - Activity CRUD
//! - Paginated activity search (total row count in the `total-rows` header)

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{
    Activity, ActivityPage, ActivitySummary, EmailUpdate, JoinMode, LoginRequest, LoginResponse,
    PasswordUpdate, UserProfile,
};
use crate::services::search::ActivityQueryService;
use crate::session::{SessionToken, TOKEN_HEADER};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Response header carrying the total number of search matches.
pub const TOTAL_ROWS_HEADER: &str = "total-rows";

/// Request header carrying the address checked by `/email`.
const EMAIL_HEADER: &str = "email";

/// Activity API client.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<SessionToken>,
}

impl ApiClient {
    /// Create an unauthenticated client.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client setup failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    /// A copy of this client that sends `session` with every request.
    pub fn with_session(&self, session: SessionToken) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            session: Some(session),
        }
    }

    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    // ─── Authentication ──────────────────────────────────────────────────────

    /// Log in and return the session to use for later requests.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<(SessionToken, u64)> {
        let response: LoginResponse = self
            .send_json(self.request(Method::POST, "/login").json(credentials))
            .await?;

        tracing::info!(user_id = response.user_id, "Logged in");
        Ok((SessionToken::new(response.token), response.user_id))
    }

    /// Register a new profile.
    pub async fn register(&self, profile: &UserProfile) -> Result<()> {
        self.send(self.request(Method::POST, "/profiles").json(profile)).await
    }

    pub async fn logout(&self) -> Result<()> {
        self.send(self.request(Method::POST, "/logout")).await?;
        tracing::info!("Logged out");
        Ok(())
    }

    // ─── Profiles ────────────────────────────────────────────────────────────

    /// Id of the user owning the session.
    pub async fn get_user_id(&self) -> Result<u64> {
        self.send_json(self.request(Method::GET, "/profiles/userId")).await
    }

    /// Profile of the user owning the session.
    pub async fn get_current_user(&self) -> Result<UserProfile> {
        self.send_json(self.request(Method::GET, "/profiles")).await
    }

    pub async fn get_profile(&self, profile_id: u64) -> Result<UserProfile> {
        let path = format!("/profiles/{}", profile_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    pub async fn edit_profile(&self, profile_id: u64, profile: &UserProfile) -> Result<()> {
        let path = format!("/profiles/{}", profile_id);
        self.send(self.request(Method::PUT, &path).json(profile)).await
    }

    /// Succeeds if the session may view and edit `profile_id`.
    pub async fn check_profile(&self, profile_id: u64) -> Result<()> {
        self.send(self.profile_check(profile_id)).await
    }

    /// Role names held by a user.
    pub async fn get_user_roles(&self, profile_id: u64) -> Result<Vec<String>> {
        self.send_json(self.user_roles(profile_id)).await
    }

    /// Whether `email` already belongs to a registered user.
    pub async fn check_user_email(&self, email: &str) -> Result<bool> {
        match self.send(self.email_check(email)).await {
            Ok(()) => Ok(true),
            Err(AppError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub async fn get_user_emails(&self, profile_id: u64) -> Result<EmailUpdate> {
        let path = format!("/profiles/{}/emails", profile_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    /// Add emails to a profile.
    pub async fn add_emails(&self, profile_id: u64, emails: &EmailUpdate) -> Result<()> {
        let path = format!("/profiles/{}/emails", profile_id);
        self.send(self.request(Method::POST, &path).json(emails)).await
    }

    /// Replace a profile's emails.
    pub async fn replace_emails(&self, profile_id: u64, emails: &EmailUpdate) -> Result<()> {
        let path = format!("/profiles/{}/emails", profile_id);
        self.send(self.request(Method::PUT, &path).json(emails)).await
    }

    pub async fn update_password(&self, profile_id: u64, update: &PasswordUpdate) -> Result<()> {
        let path = format!("/profiles/{}/password", profile_id);
        self.send(self.request(Method::PUT, &path).json(update)).await
    }

    // ─── Activities ──────────────────────────────────────────────────────────

    /// Names of all activity types.
    pub async fn get_activity_types(&self) -> Result<Vec<String>> {
        self.send_json(self.request(Method::GET, "/activity-types")).await
    }

    pub async fn get_user_activities(&self, profile_id: u64) -> Result<Vec<Activity>> {
        let path = format!("/profiles/{}/activities", profile_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    pub async fn create_activity(&self, profile_id: u64, activity: &Activity) -> Result<()> {
        let path = format!("/profiles/{}/activities", profile_id);
        self.send(self.request(Method::POST, &path).json(activity)).await
    }

    pub async fn update_activity(
        &self,
        profile_id: u64,
        activity_id: u64,
        activity: &Activity,
    ) -> Result<()> {
        let path = format!("/profiles/{}/activities/{}", profile_id, activity_id);
        self.send(self.request(Method::PUT, &path).json(activity)).await
    }

    pub async fn get_activity(&self, activity_id: u64) -> Result<Activity> {
        let path = format!("/activities/{}", activity_id);
        self.send_json(self.request(Method::GET, &path)).await
    }

    pub async fn delete_activity(&self, activity_id: u64) -> Result<()> {
        let path = format!("/activities/{}", activity_id);
        self.send(self.request(Method::DELETE, &path)).await
    }

    fn profile_check(&self, profile_id: u64) -> RequestBuilder {
        let path = format!("/check-profile/{}", profile_id);
        self.request(Method::GET, &path)
    }

    fn user_roles(&self, profile_id: u64) -> RequestBuilder {
        let path = format!("/profiles/{}/role", profile_id);
        self.request(Method::GET, &path)
    }

    fn email_check(&self, email: &str) -> RequestBuilder {
        self.request(Method::GET, "/email").header(EMAIL_HEADER, email)
    }

    // ─── Search ──────────────────────────────────────────────────────────────

    fn title_search(
        &self,
        terms: &[String],
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> RequestBuilder {
        let mut params: Vec<(&str, String)> = terms
            .iter()
            .map(|term| ("activity_keywords", term.clone()))
            .collect();
        params.extend(fitness_and_page(fitness_min, fitness_max, page_offset));

        self.request(Method::GET, "/activities").query(&params)
    }

    fn type_search(
        &self,
        types: &[String],
        join_mode: JoinMode,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> RequestBuilder {
        let mut params: Vec<(&str, String)> = vec![
            ("activity_types", types.join(",")),
            ("method", join_mode.as_str().to_string()),
        ];
        params.extend(fitness_and_page(fitness_min, fitness_max, page_offset));

        self.request(Method::GET, "/activities").query(&params)
    }

    async fn send_search(&self, builder: RequestBuilder) -> Result<ActivityPage> {
        let response = builder.send().await?;
        let response = check_response(response).await?;
        let total_rows = parse_total_rows(response.headers());
        let items: Vec<ActivitySummary> = response.json().await?;

        let total_rows = total_rows.unwrap_or_else(|| {
            tracing::warn!(
                items = items.len(),
                "Search response without a usable total-rows header"
            );
            items.len() as u64
        });

        Ok(ActivityPage { items, total_rows })
    }

    // ─── Plumbing ────────────────────────────────────────────────────────────

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, url = %url, "API request");

        let builder = self.http.request(method, url);
        match &self.session {
            Some(token) => builder.header(TOKEN_HEADER, token.as_str()),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await?;
        check_response(response).await?;
        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await?;
        let response = check_response(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl ActivityQueryService for ApiClient {
    async fn query_by_title(
        &self,
        terms: &[String],
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> Result<ActivityPage> {
        let request = self.title_search(terms, fitness_min, fitness_max, page_offset);
        self.send_search(request).await
    }

    async fn query_by_type(
        &self,
        types: &[String],
        join_mode: JoinMode,
        fitness_min: i32,
        fitness_max: i32,
        page_offset: u32,
    ) -> Result<ActivityPage> {
        let request = self.type_search(types, join_mode, fitness_min, fitness_max, page_offset);
        self.send_search(request).await
    }
}

fn fitness_and_page(
    fitness_min: i32,
    fitness_max: i32,
    page_offset: u32,
) -> [(&'static str, String); 3] {
    [
        ("min_fitness", fitness_min.to_string()),
        ("max_fitness", fitness_max.to_string()),
        ("page", page_offset.to_string()),
    ]
}

/// Read the `total-rows` header, if present and numeric.
fn parse_total_rows(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_ROWS_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse().ok())
}

/// Map non-success statuses to errors.
async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = %status, "Activity API request failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => AppError::Unauthorized,
        StatusCode::FORBIDDEN => AppError::Forbidden,
        StatusCode::NOT_FOUND => AppError::NotFound(body),
        StatusCode::BAD_REQUEST => AppError::BadRequest(body),
        _ => AppError::Api(format!("HTTP {}: {}", status, body)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn test_client() -> ApiClient {
        ApiClient::new(&Config::default()).unwrap()
    }

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_title_search_sends_raw_terms_and_offset() {
        let client = test_client();
        let terms = vec![
            "running + -walking".to_string(),
            "\"exact phrase\"".to_string(),
        ];

        let request = client.title_search(&terms, -1, 4, 2).build().unwrap();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/activities");
        assert_eq!(
            query_pairs(&request),
            vec![
                (
                    "activity_keywords".to_string(),
                    "running + -walking".to_string()
                ),
                ("activity_keywords".to_string(), "\"exact phrase\"".to_string()),
                ("min_fitness".to_string(), "-1".to_string()),
                ("max_fitness".to_string(), "4".to_string()),
                ("page".to_string(), "2".to_string()),
            ]
        );
    }

    #[test]
    fn test_type_search_sends_join_mode() {
        let client = test_client();
        let types = vec!["Archery".to_string(), "Climbing".to_string()];

        let request = client
            .type_search(&types, JoinMode::And, 0, 3, 0)
            .build()
            .unwrap();
        let pairs = query_pairs(&request);

        assert!(pairs.contains(&("activity_types".to_string(), "Archery,Climbing".to_string())));
        assert!(pairs.contains(&("method".to_string(), "and".to_string())));
        assert!(pairs.contains(&("page".to_string(), "0".to_string())));
    }

    #[test]
    fn test_type_search_any_of() {
        let client = test_client();
        let types = vec!["Archery".to_string(), "Climbing".to_string()];

        let request = client
            .type_search(&types, JoinMode::Or, -1, 4, 1)
            .build()
            .unwrap();

        assert!(query_pairs(&request).contains(&("method".to_string(), "or".to_string())));
    }

    #[test]
    fn test_profile_check_and_roles_paths() {
        let client = test_client().with_session(SessionToken::new("abc123"));

        let request = client.profile_check(42).build().unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/check-profile/42");
        assert!(request.headers().get(TOKEN_HEADER).is_some());

        let request = client.user_roles(42).build().unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().path(), "/profiles/42/role");
        assert!(request.headers().get(TOKEN_HEADER).is_some());
    }

    #[test]
    fn test_email_check_sends_address_header() {
        let client = test_client().with_session(SessionToken::new("abc123"));

        let request = client.email_check("jane@example.com").build().unwrap();

        assert_eq!(request.url().path(), "/email");
        assert!(request.url().query().is_none());
        assert_eq!(
            request.headers().get(EMAIL_HEADER).unwrap(),
            &HeaderValue::from_static("jane@example.com")
        );
        assert_eq!(
            request.headers().get(TOKEN_HEADER).unwrap(),
            &HeaderValue::from_static("abc123")
        );
    }

    #[test]
    fn test_session_token_header() {
        let client = test_client();
        let request = client.request(Method::GET, "/profiles").build().unwrap();
        assert!(request.headers().get(TOKEN_HEADER).is_none());

        let authed = client.with_session(SessionToken::new("abc123"));
        let request = authed.request(Method::GET, "/profiles").build().unwrap();
        assert_eq!(
            request.headers().get(TOKEN_HEADER).unwrap(),
            &HeaderValue::from_static("abc123")
        );
        assert_eq!(request.url().as_str(), "http://localhost:9499/profiles");
    }

    #[test]
    fn test_parse_total_rows() {
        let mut headers = HeaderMap::new();
        assert_eq!(parse_total_rows(&headers), None);

        headers.insert(TOTAL_ROWS_HEADER, HeaderValue::from_static("6"));
        assert_eq!(parse_total_rows(&headers), Some(6));

        headers.insert(TOTAL_ROWS_HEADER, HeaderValue::from_static("six"));
        assert_eq!(parse_total_rows(&headers), None);
    }
}
