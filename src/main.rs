// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fitness client command line
//!
//! Logs in (when credentials are configured) and runs one activity title
//! search, printing the first page of results.

use anyhow::Context;
use fitness_client::{
    config::Config,
    models::LoginRequest,
    services::{ActivitySearch, ApiClient},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured JSON logging on stderr; results go to stdout
    init_logging();

    let terms: Vec<String> = std::env::args().skip(1).collect();
    if terms.is_empty() {
        anyhow::bail!("usage: fitness-client <search term>...");
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(api = %config.api_base_url, "Starting fitness client");

    let state = AppState::from_config(config)?;
    let api = authenticate(&state).await?;

    let mut search = ActivitySearch::with_page_size(api, state.config.search_page_size);
    search.set_title_query(terms);
    search
        .fetch_page()
        .await
        .context("Activity search failed")?;

    for activity in search.results() {
        let types: Vec<&str> = activity
            .activity_types
            .iter()
            .map(|t| t.name.as_str())
            .collect();
        println!(
            "{} ({} {}) [{}]",
            activity.activity_name,
            activity.firstname,
            activity.lastname,
            types.join(", ")
        );
    }
    println!(
        "page {} of {} ({} results)",
        search.current_page(),
        search.page_count(),
        search.total_rows().unwrap_or_default()
    );

    Ok(())
}

/// Log in with the configured credentials, if any.
async fn authenticate(state: &AppState) -> anyhow::Result<ApiClient> {
    let (Some(email), Some(password)) = (&state.config.login_email, &state.config.login_password)
    else {
        tracing::warn!("APP_EMAIL/APP_PASSWORD not set, searching without a session");
        return Ok(state.api.clone());
    };

    let credentials = LoginRequest {
        email: email.clone(),
        password: password.clone(),
    };
    let (session, user_id) = state
        .api
        .login(&credentials)
        .await
        .context("Login failed")?;
    tracing::info!(user_id, "Session established");

    Ok(state.api.with_session(session))
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("fitness_client=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
