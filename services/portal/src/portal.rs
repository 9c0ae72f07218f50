//! services/portal/src/portal.rs
//!
//! The `Portal` controller: owns one student's session from the sign-in form
//! to logout, drives the UI reducer, and runs the session's timers.

use std::path::Path;
use std::sync::Arc;

use portal_core::catalog::Catalog;
use portal_core::context::context_snapshot;
use portal_core::domain::{ChatMessage, Notification, Student, View};
use portal_core::gate::{self, LoginError, LoginMode};
use portal_core::notifications::{self, NotificationStore};
use portal_core::ports::ChatCompletionService;
use portal_core::profile::{avatar_data_uri, image_mime_for_extension, ProfileField};
use portal_core::session::{key_event, reduce, KeyInput, PortalState, UiEvent};
use portal_core::spotlight::{self, SearchResult, SHORTCUTS};
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::bridge::ChatBridge;
use crate::config::Config;
use crate::error::PortalError;
use crate::events::PortalEvent;

/// Notices of the current session. Shared with the session's timer task.
type SharedNotifications = Arc<Mutex<NotificationStore>>;

pub struct Portal {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
    chat_service: Option<Arc<dyn ChatCompletionService>>,
    state: PortalState,
    login_mode: LoginMode,
    login_error: Option<String>,
    verifying: bool,
    notifications: SharedNotifications,
    chat: ChatBridge,
    /// Present while signed in; cancelling it stops the session's timers.
    session_token: Option<CancellationToken>,
    events: mpsc::UnboundedSender<PortalEvent>,
}

impl Portal {
    /// Creates a signed-out portal and the receiving end of its event channel.
    pub fn new(
        config: Arc<Config>,
        catalog: Arc<Catalog>,
        chat_service: Option<Arc<dyn ChatCompletionService>>,
    ) -> (Self, mpsc::UnboundedReceiver<PortalEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let portal = Self {
            state: PortalState::new(catalog.student.clone()),
            notifications: fresh_notifications(&catalog),
            chat: ChatBridge::new(chat_service.clone(), &catalog.student),
            config,
            catalog,
            chat_service,
            login_mode: LoginMode::default(),
            login_error: None,
            verifying: false,
            session_token: None,
            events,
        };
        (portal, receiver)
    }

    //=====================================================================================
    // Session Gate
    //=====================================================================================

    /// Verifies the credentials after the simulated network delay and, on
    /// success, opens a new session on the Dashboard.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), LoginError> {
        if self.state.authenticated {
            debug!("Login ignored: a session is already open.");
            return Ok(());
        }

        info!(email = %email, mode = ?self.login_mode, "Verifying login.");
        self.login_error = None;
        self.verifying = true;
        tokio::time::sleep(self.config.login_delay).await;
        self.verifying = false;

        let expected_roll_number = self.state.student.id.clone();
        if let Err(e) = gate::attempt_login(email, password, &expected_roll_number) {
            let message = e.message(self.login_mode).to_string();
            warn!(reason = ?e, "Login rejected.");
            self.login_error = Some(message.clone());
            self.emit(PortalEvent::LoginFailed { message });
            return Err(e);
        }

        self.start_session();
        Ok(())
    }

    fn start_session(&mut self) {
        self.state = reduce(self.state.clone(), UiEvent::LoggedIn);
        self.notifications = fresh_notifications(&self.catalog);
        self.chat = ChatBridge::new(self.chat_service.clone(), &self.state.student);

        let token = CancellationToken::new();
        self.schedule_grade_notice(token.clone());
        self.session_token = Some(token);

        info!(student_id = %self.state.student.id, "Session started.");
        self.emit(PortalEvent::LoginSucceeded {
            student_id: self.state.student.id.clone(),
        });
    }

    /// Ends the session. Pending timers are cancelled and every piece of
    /// session state (notices, chat, profile edits) is discarded.
    pub fn logout(&mut self) {
        if !self.state.authenticated {
            return;
        }
        if let Some(token) = self.session_token.take() {
            token.cancel();
        }
        self.state = reduce(self.state.clone(), UiEvent::LoggedOut);
        self.notifications = fresh_notifications(&self.catalog);
        self.chat = ChatBridge::new(self.chat_service.clone(), &self.state.student);
        self.login_error = None;

        info!("Session ended.");
        self.emit(PortalEvent::LoggedOut);
    }

    /// Switches between signing in and account activation; clears any error.
    pub fn toggle_login_mode(&mut self) {
        self.login_mode = self.login_mode.toggled();
        self.login_error = None;
    }

    /// Injects the "grade published" notice once, after the configured delay,
    /// unless the session ends first.
    fn schedule_grade_notice(&self, token: CancellationToken) {
        let store = Arc::clone(&self.notifications);
        let events = self.events.clone();
        let delay = self.config.grade_notice_delay;
        debug!(delay_ms = delay.as_millis() as u64, "Grade notice scheduled.");

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Grade notice cancelled before it fired.");
                }
                _ = tokio::time::sleep(delay) => {
                    let mut store = store.lock().await;
                    // The session may have ended while we waited for the lock.
                    if token.is_cancelled() {
                        return;
                    }
                    let notice = notifications::grade_published();
                    let event = PortalEvent::NotificationArrived {
                        id: notice.id.clone(),
                        title: notice.title.clone(),
                        message: notice.message.clone(),
                    };
                    store.inject(notice);
                    drop(store);
                    // Logout does not take the store lock; check again before announcing.
                    if token.is_cancelled() {
                        return;
                    }
                    info!("Grade notice delivered.");
                    if events.send(event).is_err() {
                        debug!("No listener for portal events.");
                    }
                }
            }
        });
    }

    //=====================================================================================
    // UI state
    //=====================================================================================

    pub fn dispatch(&mut self, event: UiEvent) {
        self.state = reduce(self.state.clone(), event);
    }

    /// Applies a key press. Returns whether it triggered anything.
    pub fn key(&mut self, input: KeyInput) -> bool {
        match key_event(&self.state, input) {
            Some(event) => {
                self.dispatch(event);
                true
            }
            None => false,
        }
    }

    pub fn navigate(&mut self, view: View) {
        self.dispatch(UiEvent::Navigate(view));
    }

    /// Results for the spotlight's current query; empty while it is closed.
    pub fn search_results(&self) -> Vec<SearchResult> {
        if !self.state.spotlight.open {
            return Vec::new();
        }
        spotlight::search(&self.catalog, &self.state.spotlight.query)
    }

    /// Opens the result at `index` of the current result list.
    pub fn select_result(&mut self, index: usize) -> Option<View> {
        let target = self.search_results().get(index)?.target;
        self.dispatch(UiEvent::SelectView(target));
        Some(target)
    }

    /// Shortcuts are only offered while the query is empty.
    pub fn select_shortcut(&mut self, index: usize) -> Option<View> {
        if !self.state.spotlight.open || !self.state.spotlight.query.trim().is_empty() {
            return None;
        }
        let target = SHORTCUTS.get(index)?.target;
        self.dispatch(UiEvent::SelectView(target));
        Some(target)
    }

    /// Replaces the avatar in the profile draft with an image read from disk.
    /// Opens the editor first when it is not already open.
    pub async fn set_avatar_from_file(&mut self, path: &Path) -> Result<(), PortalError> {
        if !self.state.authenticated {
            return Err(PortalError::Internal("not signed in".to_string()));
        }
        let mime = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(image_mime_for_extension)
            .ok_or_else(|| PortalError::InvalidAvatar(path.display().to_string()))?;
        let bytes = tokio::fs::read(path).await?;

        if self.state.profile_edit.is_none() {
            self.dispatch(UiEvent::BeginProfileEdit);
        }
        self.dispatch(UiEvent::EditProfile(
            ProfileField::Avatar,
            avatar_data_uri(mime, &bytes),
        ));
        debug!(bytes = bytes.len(), mime, "Avatar image embedded in profile draft.");
        Ok(())
    }

    //=====================================================================================
    // Notifications
    //=====================================================================================

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.items().to_vec()
    }

    pub async fn unread_count(&self) -> usize {
        self.notifications.lock().await.unread_count()
    }

    pub async fn mark_all_read(&self) {
        self.notifications.lock().await.mark_all_read();
    }

    pub async fn clear_notifications(&self) {
        self.notifications.lock().await.clear();
    }

    //=====================================================================================
    // AI helper
    //=====================================================================================

    /// Sends one chat turn with a fresh context snapshot. `None` when the
    /// input is blank or nobody is signed in.
    pub async fn send_chat(&mut self, text: &str) -> Option<String> {
        if !self.state.authenticated {
            return None;
        }
        let context = context_snapshot(&self.state.student, &self.catalog);
        let reply = self.chat.send(text, &context).await?;
        if let Some(message) = self.chat.history().last() {
            self.emit(PortalEvent::ChatReplied {
                message_id: message.id,
            });
        }
        Some(reply)
    }

    //=====================================================================================
    // Accessors
    //=====================================================================================

    pub fn state(&self) -> &PortalState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.authenticated
    }

    pub fn student(&self) -> &Student {
        &self.state.student
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn login_mode(&self) -> LoginMode {
        self.login_mode
    }

    pub fn login_error(&self) -> Option<&str> {
        self.login_error.as_deref()
    }

    pub fn is_verifying(&self) -> bool {
        self.verifying
    }

    pub fn chat_history(&self) -> &[ChatMessage] {
        self.chat.history()
    }

    pub fn is_chat_pending(&self) -> bool {
        self.chat.is_pending()
    }

    fn emit(&self, event: PortalEvent) {
        if let Ok(json) = serde_json::to_string(&event) {
            debug!(event = %json, "Portal event.");
        }
        if self.events.send(event).is_err() {
            debug!("No listener for portal events.");
        }
    }
}

impl Drop for Portal {
    fn drop(&mut self) {
        if let Some(token) = self.session_token.take() {
            token.cancel();
        }
    }
}

fn fresh_notifications(catalog: &Catalog) -> SharedNotifications {
    Arc::new(Mutex::new(NotificationStore::new(
        catalog.notifications.clone(),
    )))
}
