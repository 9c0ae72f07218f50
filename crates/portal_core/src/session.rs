//! crates/portal_core/src/session.rs
//!
//! The portal's UI state and its transitions. Every transition is a pure
//! function of the previous state and one event; timers, I/O and the chat
//! history live in the service layer.

use crate::domain::{Student, View};
use crate::profile::{ProfileDraft, ProfileField};

/// The quick-search overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotlightState {
    pub open: bool,
    pub query: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortalState {
    pub authenticated: bool,
    pub view: View,
    pub student: Student,
    pub spotlight: SpotlightState,
    pub notifications_open: bool,
    pub profile_edit: Option<ProfileDraft>,
    /// The record a fresh session starts from.
    baseline: Student,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    LoggedIn,
    LoggedOut,
    Navigate(View),
    OpenSpotlight,
    CloseSpotlight,
    QueryChanged(String),
    /// A spotlight result or shortcut was picked.
    SelectView(View),
    ToggleNotifications,
    CloseNotifications,
    BeginProfileEdit,
    EditProfile(ProfileField, String),
    SaveProfile,
    CancelProfileEdit,
}

impl PortalState {
    pub fn new(student: Student) -> Self {
        Self {
            authenticated: false,
            view: View::Dashboard,
            student: student.clone(),
            spotlight: SpotlightState::default(),
            notifications_open: false,
            profile_edit: None,
            baseline: student,
        }
    }

    /// A signed-out state seeded from the same baseline record.
    fn reset(&self) -> Self {
        Self::new(self.baseline.clone())
    }
}

pub fn reduce(mut state: PortalState, event: UiEvent) -> PortalState {
    if !state.authenticated && event != UiEvent::LoggedIn {
        return state;
    }

    match event {
        UiEvent::LoggedIn => {
            let mut next = state.reset();
            next.authenticated = true;
            return next;
        }
        UiEvent::LoggedOut => return state.reset(),
        UiEvent::Navigate(view) => {
            state.view = view;
            state.notifications_open = false;
        }
        UiEvent::OpenSpotlight => {
            state.spotlight.open = true;
            state.spotlight.query.clear();
        }
        UiEvent::CloseSpotlight => state.spotlight.open = false,
        UiEvent::QueryChanged(query) => {
            if state.spotlight.open {
                state.spotlight.query = query;
            }
        }
        UiEvent::SelectView(view) => {
            state.view = view;
            state.spotlight.open = false;
            state.spotlight.query.clear();
        }
        UiEvent::ToggleNotifications => state.notifications_open = !state.notifications_open,
        UiEvent::CloseNotifications => state.notifications_open = false,
        UiEvent::BeginProfileEdit => {
            state.view = View::Profile;
            state.profile_edit = Some(ProfileDraft::begin(&state.student));
        }
        UiEvent::EditProfile(field, value) => {
            if let Some(draft) = state.profile_edit.as_mut() {
                draft.set(field, value);
            }
        }
        UiEvent::SaveProfile => {
            if let Some(draft) = state.profile_edit.take() {
                state.student = draft.into_student();
            }
        }
        UiEvent::CancelProfileEdit => state.profile_edit = None,
    }
    state
}

//=========================================================================================
// Keyboard
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
    Enter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyInput {
    pub key: Key,
    pub ctrl: bool,
    /// Cmd on macOS.
    pub meta: bool,
}

impl KeyInput {
    pub fn plain(key: Key) -> Self {
        Self { key, ctrl: false, meta: false }
    }

    /// Parses chords such as `ctrl+k`, `cmd+k` or `esc`.
    pub fn parse(chord: &str) -> Option<Self> {
        let mut input = KeyInput::plain(Key::Enter);
        let mut key = None;
        for part in chord.split('+').map(|p| p.trim().to_lowercase()) {
            match part.as_str() {
                "ctrl" | "control" => input.ctrl = true,
                "cmd" | "meta" | "super" => input.meta = true,
                "esc" | "escape" => key = Some(Key::Escape),
                "enter" | "return" => key = Some(Key::Enter),
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => key = Some(Key::Char(c)),
                        _ => return None,
                    }
                }
            }
        }
        input.key = key?;
        Some(input)
    }
}

/// Maps a key press to the UI event it triggers, if any.
pub fn key_event(state: &PortalState, input: KeyInput) -> Option<UiEvent> {
    match input.key {
        Key::Char('k') | Key::Char('K') if (input.ctrl || input.meta) && state.authenticated => {
            Some(UiEvent::OpenSpotlight)
        }
        Key::Escape if state.spotlight.open => Some(UiEvent::CloseSpotlight),
        _ => None,
    }
}
