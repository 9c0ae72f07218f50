//! End-to-end behaviour of one portal session: the login gate, the timed
//! grade notice, spotlight navigation, profile edits and the AI helper.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use portal_core::catalog::Catalog;
use portal_core::domain::{Sender, View};
use portal_core::gate::LoginError;
use portal_core::ports::{ChatCompletionService, PortResult};
use portal_core::profile::ProfileField;
use portal_core::session::{KeyInput, UiEvent};
use portal_lib::bridge::UNAVAILABLE_REPLY;
use portal_lib::config::Config;
use portal_lib::error::PortalError;
use portal_lib::events::PortalEvent;
use portal_lib::Portal;
use tokio::sync::mpsc::UnboundedReceiver;

const EMAIL: &str = "hanu25csu078@ncuindia.edu";
const ROLL: &str = "25csu078";

struct EchoService;

#[async_trait]
impl ChatCompletionService for EchoService {
    async fn complete(&self, _system_instruction: &str, prompt: &str) -> PortResult<String> {
        Ok(format!("echo: {prompt}"))
    }
}

fn portal_with(
    config: Config,
    chat: Option<Arc<dyn ChatCompletionService>>,
) -> (Portal, UnboundedReceiver<PortalEvent>) {
    Portal::new(Arc::new(config), Arc::new(Catalog::ncu()), chat)
}

fn portal() -> (Portal, UnboundedReceiver<PortalEvent>) {
    portal_with(Config::default(), None)
}

fn drain(events: &mut UnboundedReceiver<PortalEvent>) -> Vec<PortalEvent> {
    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    seen
}

fn grade_notices(events: &[PortalEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, PortalEvent::NotificationArrived { .. }))
        .count()
}

#[tokio::test(start_paused = true)]
async fn login_opens_the_dashboard() {
    let (mut portal, mut events) = portal();
    assert!(!portal.is_authenticated());

    portal.login("student@ncuindia.edu", " 25csu078 ").await.unwrap();

    assert!(portal.is_authenticated());
    assert!(!portal.is_verifying());
    assert_eq!(portal.state().view, View::Dashboard);
    assert_eq!(portal.login_error(), None);
    assert_eq!(
        drain(&mut events),
        vec![PortalEvent::LoginSucceeded { student_id: "25CSU078".to_string() }]
    );
}

#[tokio::test(start_paused = true)]
async fn login_takes_the_configured_delay() {
    let (mut portal, _events) = portal();
    let started = tokio::time::Instant::now();
    portal.login(EMAIL, ROLL).await.unwrap();
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(1500));
    assert!(elapsed < Duration::from_millis(1600));
}

#[tokio::test(start_paused = true)]
async fn rejected_logins_keep_the_gate_closed() {
    let (mut portal, mut events) = portal();

    assert_eq!(portal.login("", ROLL).await, Err(LoginError::MissingFields));
    assert_eq!(portal.login_error(), Some("Please fill in all required fields."));

    assert_eq!(portal.login("me@gmail.com", ROLL).await, Err(LoginError::InvalidDomain));
    assert_eq!(
        portal.login(EMAIL, "25CSU000").await,
        Err(LoginError::CredentialMismatch)
    );
    assert_eq!(
        portal.login_error(),
        Some("Invalid credentials. Please verify your Roll Number.")
    );

    portal.toggle_login_mode();
    assert_eq!(portal.login_error(), None);
    assert_eq!(
        portal.login(EMAIL, "25CSU000").await,
        Err(LoginError::CredentialMismatch)
    );
    assert_eq!(
        portal.login_error(),
        Some("Verification Failed. Roll Number does not match our records for this email.")
    );

    assert!(!portal.is_authenticated());
    let failures = drain(&mut events)
        .into_iter()
        .filter(|e| matches!(e, PortalEvent::LoginFailed { .. }))
        .count();
    assert_eq!(failures, 4);
}

#[tokio::test(start_paused = true)]
async fn grade_notice_arrives_once_after_the_delay() {
    let (mut portal, mut events) = portal();
    portal.login(EMAIL, ROLL).await.unwrap();
    assert_eq!(portal.unread_count().await, 2);

    tokio::time::sleep(Duration::from_secs(7)).await;
    assert_eq!(portal.unread_count().await, 2);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(portal.unread_count().await, 3);
    let notices = portal.notifications().await;
    assert_eq!(notices.len(), 5);
    assert_eq!(notices[0].title, "New Grade Published");
    assert_eq!(notices[0].time, "Just now");

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(portal.notifications().await.len(), 5);
    assert_eq!(grade_notices(&drain(&mut events)), 1);
}

#[tokio::test(start_paused = true)]
async fn logout_cancels_the_pending_notice() {
    let (mut portal, mut events) = portal();
    portal.login(EMAIL, ROLL).await.unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    portal.logout();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(!portal.is_authenticated());
    assert_eq!(portal.notifications().await.len(), 4);
    assert_eq!(grade_notices(&drain(&mut events)), 0);
}

#[tokio::test(start_paused = true)]
async fn quick_relogin_only_sees_its_own_notice() {
    let config = Config {
        login_delay: Duration::ZERO,
        ..Config::default()
    };
    let (mut portal, mut events) = portal_with(config, None);
    portal.login(EMAIL, ROLL).await.unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    portal.logout();
    portal.login(EMAIL, ROLL).await.unwrap();

    // The first session's timer would have fired here.
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(portal.notifications().await.len(), 4);

    tokio::time::sleep(Duration::from_secs(4)).await;
    assert_eq!(portal.notifications().await.len(), 5);
    assert_eq!(grade_notices(&drain(&mut events)), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_portal_cancels_the_notice() {
    let (mut portal, mut events) = portal();
    portal.login(EMAIL, ROLL).await.unwrap();
    drop(portal);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(grade_notices(&drain(&mut events)), 0);
}

#[tokio::test(start_paused = true)]
async fn relogin_starts_from_the_initial_notices() {
    let (mut portal, _events) = portal();
    portal.login(EMAIL, ROLL).await.unwrap();
    tokio::time::sleep(Duration::from_secs(9)).await;
    assert_eq!(portal.unread_count().await, 3);

    portal.mark_all_read().await;
    assert_eq!(portal.unread_count().await, 0);
    portal.clear_notifications().await;
    portal.clear_notifications().await;
    assert!(portal.notifications().await.is_empty());

    portal.logout();
    portal.login(EMAIL, ROLL).await.unwrap();
    assert_eq!(portal.unread_count().await, 2);
    assert_eq!(portal.notifications().await.len(), 4);
}

#[tokio::test(start_paused = true)]
async fn spotlight_selection_navigates() {
    let (mut portal, _events) = portal();
    let ctrl_k = KeyInput::parse("ctrl+k").unwrap();
    assert!(!portal.key(ctrl_k));

    portal.login(EMAIL, ROLL).await.unwrap();
    assert!(portal.key(ctrl_k));
    assert!(portal.state().spotlight.open);

    portal.dispatch(UiEvent::QueryChanged("csl101".to_string()));
    let results = portal.search_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].label, "Programming in C");

    assert_eq!(portal.select_result(0), Some(View::Courses));
    assert_eq!(portal.state().view, View::Courses);
    assert!(!portal.state().spotlight.open);
    assert!(portal.state().spotlight.query.is_empty());
    assert!(portal.search_results().is_empty());

    portal.key(ctrl_k);
    portal.dispatch(UiEvent::QueryChanged("lab".to_string()));
    assert_eq!(portal.select_shortcut(4), None);
    assert!(portal.state().spotlight.open);

    portal.dispatch(UiEvent::QueryChanged(String::new()));
    assert_eq!(portal.select_shortcut(4), Some(View::AiHelp));
    assert_eq!(portal.select_shortcut(0), None);

    portal.key(ctrl_k);
    assert!(portal.key(KeyInput::parse("esc").unwrap()));
    assert!(!portal.state().spotlight.open);
}

#[tokio::test(start_paused = true)]
async fn chat_without_credential_degrades() {
    let (mut portal, _events) = portal();
    assert_eq!(portal.send_chat("hello").await, None);

    portal.login(EMAIL, ROLL).await.unwrap();
    assert_eq!(portal.chat_history().len(), 1);

    assert_eq!(portal.send_chat("").await, None);
    assert_eq!(portal.send_chat("   ").await, None);
    assert_eq!(portal.chat_history().len(), 1);

    assert_eq!(portal.send_chat("hello").await.as_deref(), Some(UNAVAILABLE_REPLY));
    let history = portal.chat_history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].sender, Sender::User);
    assert_eq!(history[1].text, "hello");
    assert_eq!(history[2].sender, Sender::Ai);
    assert_eq!(history[2].text, UNAVAILABLE_REPLY);
}

#[tokio::test(start_paused = true)]
async fn chat_history_is_session_scoped() {
    let (mut portal, mut events) = portal_with(Config::default(), Some(Arc::new(EchoService)));
    portal.login(EMAIL, ROLL).await.unwrap();

    let reply = portal.send_chat("when is my fee due?").await;
    assert_eq!(reply.as_deref(), Some("echo: when is my fee due?"));
    let last_id = portal.chat_history()[2].id;
    assert!(drain(&mut events).contains(&PortalEvent::ChatReplied { message_id: last_id }));

    portal.logout();
    portal.login(EMAIL, ROLL).await.unwrap();
    assert_eq!(portal.chat_history().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn profile_edits_last_until_logout() {
    let (mut portal, _events) = portal();
    portal.login(EMAIL, ROLL).await.unwrap();

    portal.dispatch(UiEvent::BeginProfileEdit);
    portal.dispatch(UiEvent::EditProfile(ProfileField::Phone, "+91 90000 00000".to_string()));
    portal.dispatch(UiEvent::SaveProfile);
    assert_eq!(portal.student().phone, "+91 90000 00000");

    portal.logout();
    portal.login(EMAIL, ROLL).await.unwrap();
    assert_eq!(portal.student().phone, "+91 98765 43210");
}

#[tokio::test]
async fn avatar_file_is_embedded_as_data_uri() {
    let config = Config {
        login_delay: Duration::ZERO,
        ..Config::default()
    };
    let (mut portal, _events) = portal_with(config, None);
    portal.login(EMAIL, ROLL).await.unwrap();

    let dir = std::env::temp_dir();
    let image = dir.join(format!("portal-avatar-{}.png", std::process::id()));
    tokio::fs::write(&image, b"\x89PNG").await.unwrap();

    portal.set_avatar_from_file(&image).await.unwrap();
    let draft = portal.state().profile_edit.as_ref().unwrap();
    assert_eq!(draft.student().avatar, "data:image/png;base64,iVBORw==");

    let text = dir.join("portal-avatar.txt");
    let err = portal.set_avatar_from_file(&text).await.unwrap_err();
    assert!(matches!(err, PortalError::InvalidAvatar(_)));

    portal.dispatch(UiEvent::SaveProfile);
    assert!(portal.student().avatar.starts_with("data:image/png;base64,"));
    tokio::fs::remove_file(&image).await.unwrap();
}
