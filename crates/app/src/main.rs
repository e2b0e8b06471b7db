use std::sync::Arc;

use anyhow::Context;

use aula_app::pages::{DashboardPage, LoginPage};
use aula_app::{AppConfig, Route, Shell};
use aula_auth::{FileTokenStore, Role, TokenStore};
use aula_client::ApiClient;
use aula_session::{ConnectivityMonitor, HttpProbe, SessionMonitor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    aula_observability::init();

    let config = AppConfig::from_env();

    let tokens: Arc<dyn TokenStore> =
        Arc::new(FileTokenStore::new().context("failed to open the session token store")?);
    let client = ApiClient::new(config.base_url.clone(), tokens.clone());

    let (monitor, session_rx) = SessionMonitor::new(tokens.clone());
    let session_task = monitor.spawn(config.session_poll);
    let (connectivity_rx, connectivity_task) = ConnectivityMonitor::spawn(
        HttpProbe::new(config.base_url.clone()),
        config.connectivity_poll,
    );

    let mut shell = Shell::new(session_rx, connectivity_rx, tokens.clone(), Route::Dashboard);

    // Headless login for scripted use: AULA_USERNAME / AULA_PASSWORD.
    if let (Ok(username), Ok(password)) =
        (std::env::var("AULA_USERNAME"), std::env::var("AULA_PASSWORD"))
    {
        let mut login = LoginPage::new();
        login.username = username;
        login.password = password;
        match login.submit(&client, &monitor).await {
            Some(route) => shell.navigate(route),
            None => {
                for surface in login.surfaces().drain() {
                    tracing::warn!(?surface, "login did not complete");
                }
            }
        }
    }

    match DashboardPage::mount(tokens.as_ref()) {
        Ok(mut dashboard) => {
            dashboard.load(&client, chrono::Local::now().time()).await;

            tracing::info!(user = dashboard.username(), role = %dashboard.role(), "signed in");
            for class in dashboard.reminders() {
                tracing::info!(
                    class = class.name.as_str(),
                    at = class.schedule.as_str(),
                    "upcoming today"
                );
            }
            if let Some(counts) = dashboard.role_counts() {
                tracing::info!(
                    admins = counts.of(Role::Admin.wire_name()),
                    teachers = counts.of(Role::Teacher.wire_name()),
                    students = counts.of(Role::Student.wire_name()),
                    "user counts"
                );
            }
            if let Some(count) = dashboard.class_count() {
                tracing::info!(count, "joined classes");
            }
            if let Some(count) = dashboard.assignment_count() {
                tracing::info!(count, "assignments");
            }
        }
        Err(route) => {
            shell.navigate(route);
            tracing::info!("no valid session; log in first (AULA_USERNAME / AULA_PASSWORD)");
        }
    }

    for surface in shell.poll_surfaces() {
        tracing::info!(?surface, "shell surface");
    }

    session_task.abort();
    connectivity_task.abort();
    Ok(())
}
