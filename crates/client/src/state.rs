//! In-memory UI state for the notes client.
//!
//! Everything here is local to one client session. Draft text and format
//! preferences never reach the server.

use notecrypt_core::accounts::{
    validate_credentials, validate_password_strength, MIN_PASSWORD_LENGTH,
};
use notecrypt_core::notes::validate_note_body;

use crate::api::Note;

/// Which credential form is shown while logged out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Tabs available once logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    Create,
    #[default]
    Notes,
    Recycle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    LoggedOut { mode: AuthMode },
    LoggedIn { tab: Tab },
}

impl Default for Screen {
    fn default() -> Self {
        Screen::LoggedOut {
            mode: AuthMode::Login,
        }
    }
}

/// The note being written or edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    /// Set when the draft edits an existing note rather than creating one.
    pub editing_id: Option<i64>,
}

impl Draft {
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Load an existing note into the editor.
    pub fn edit(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            editing_id: Some(note.id),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        validate_note_body(&self.title, &self.content)
    }
}

/// Editor text formatting. Applied to the editor view only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatPrefs {
    pub font_size: u16,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl FormatPrefs {
    pub const MIN_FONT_SIZE: u16 = 10;
    pub const MAX_FONT_SIZE: u16 = 32;

    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size.clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);
    }
}

impl Default for FormatPrefs {
    fn default() -> Self {
        Self {
            font_size: 16,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Error,
}

/// Inline message shown above the current form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }
}

/// Complete client state.
#[derive(Debug, Clone, Default)]
pub struct ClientState {
    pub screen: Screen,
    /// Username as typed into the credential form.
    pub username_input: String,
    /// Password as typed into the credential form. Cleared after each attempt.
    pub password_input: String,
    /// The logged-in account, if any.
    pub username: Option<String>,
    pub notes: Vec<Note>,
    pub recycle_bin: Vec<Note>,
    pub draft: Draft,
    pub format: FormatPrefs,
    pub banner: Option<Banner>,
}

impl ClientState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self.screen, Screen::LoggedIn { .. })
    }

    pub fn current_tab(&self) -> Option<Tab> {
        match self.screen {
            Screen::LoggedIn { tab } => Some(tab),
            Screen::LoggedOut { .. } => None,
        }
    }

    /// Switch between the login and register forms.
    ///
    /// Ignored while logged in.
    pub fn set_auth_mode(&mut self, mode: AuthMode) {
        if let Screen::LoggedOut { .. } = self.screen {
            self.screen = Screen::LoggedOut { mode };
            self.password_input.clear();
            self.banner = None;
        }
    }

    /// Switch tabs. Ignored while logged out.
    pub fn select_tab(&mut self, tab: Tab) {
        if let Screen::LoggedIn { .. } = self.screen {
            self.screen = Screen::LoggedIn { tab };
        }
    }

    /// Check the credential form for the current auth mode.
    ///
    /// Returns the trimmed username.
    pub fn validate_credentials(&self) -> Result<String, String> {
        let username = validate_credentials(&self.username_input, &self.password_input)
            .map_err(|_| "Username and password are required".to_string())?;
        if self.password_input.trim().is_empty() {
            return Err("Username and password are required".to_string());
        }
        if let Screen::LoggedOut {
            mode: AuthMode::Register,
        } = self.screen
        {
            validate_password_strength(&self.password_input, MIN_PASSWORD_LENGTH)?;
        }
        Ok(username.to_string())
    }

    /// Enter the logged-in screen for `username`.
    pub fn enter_session(&mut self, username: String) {
        self.username = Some(username);
        self.screen = Screen::LoggedIn { tab: Tab::Notes };
        self.password_input.clear();
        self.banner = None;
    }

    /// Drop everything tied to the account and show the login form.
    ///
    /// Format preferences survive; they belong to the client, not the user.
    pub fn reset_session(&mut self) {
        let format = std::mem::take(&mut self.format);
        *self = Self {
            format,
            ..Self::default()
        };
    }

    pub fn start_edit(&mut self, note: &Note) {
        self.draft = Draft::edit(note);
        self.screen = Screen::LoggedIn { tab: Tab::Create };
    }

    pub fn cancel_edit(&mut self) {
        self.draft = Draft::default();
    }

    pub fn find_note(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn note(id: i64, title: &str) -> Note {
        let now = Utc::now();
        Note {
            id,
            username: "alice".into(),
            title: title.into(),
            content: "body".into(),
            is_deleted: false,
            deleted_at: None,
            expires_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn register_form(username: &str, password: &str) -> ClientState {
        let mut state = ClientState::default();
        state.set_auth_mode(AuthMode::Register);
        state.username_input = username.into();
        state.password_input = password.into();
        state
    }

    #[test]
    fn starts_logged_out_on_login_form() {
        let state = ClientState::default();
        assert_eq!(
            state.screen,
            Screen::LoggedOut {
                mode: AuthMode::Login
            }
        );
        assert!(!state.is_logged_in());
        assert_eq!(state.current_tab(), None);
    }

    #[test]
    fn credentials_are_trimmed_and_required() {
        let mut state = ClientState::default();
        state.username_input = "  alice ".into();
        state.password_input = "pw".into();
        assert_eq!(state.validate_credentials().unwrap(), "alice");

        state.username_input = "   ".into();
        assert_eq!(
            state.validate_credentials().unwrap_err(),
            "Username and password are required"
        );
    }

    #[test]
    fn whitespace_password_is_rejected() {
        let mut state = ClientState::default();
        state.username_input = "alice".into();
        state.password_input = "    ".into();
        assert_eq!(
            state.validate_credentials().unwrap_err(),
            "Username and password are required"
        );

        let state = register_form("alice", "     ");
        assert_eq!(
            state.validate_credentials().unwrap_err(),
            "Username and password are required"
        );
    }

    #[test]
    fn registration_enforces_password_length() {
        let state = register_form("alice", "abc");
        assert_eq!(
            state.validate_credentials().unwrap_err(),
            "Password must be at least 4 characters"
        );

        let state = register_form("alice", "abcd");
        assert!(state.validate_credentials().is_ok());
    }

    #[test]
    fn login_accepts_short_passwords() {
        let mut state = ClientState::default();
        state.username_input = "alice".into();
        state.password_input = "abc".into();
        assert!(state.validate_credentials().is_ok());
    }

    #[test]
    fn switching_auth_mode_clears_password_and_banner() {
        let mut state = ClientState::default();
        state.password_input = "secret".into();
        state.banner = Some(Banner::error("Wrong password"));

        state.set_auth_mode(AuthMode::Register);
        assert!(state.password_input.is_empty());
        assert!(state.banner.is_none());
    }

    #[test]
    fn tabs_only_change_while_logged_in() {
        let mut state = ClientState::default();
        state.select_tab(Tab::Recycle);
        assert_eq!(state.current_tab(), None);

        state.enter_session("alice".into());
        assert_eq!(state.current_tab(), Some(Tab::Notes));
        state.select_tab(Tab::Recycle);
        assert_eq!(state.current_tab(), Some(Tab::Recycle));
    }

    #[test]
    fn start_edit_loads_note_into_draft() {
        let mut state = ClientState::default();
        state.enter_session("alice".into());
        let n = note(3, "Groceries");

        state.start_edit(&n);
        assert_eq!(state.current_tab(), Some(Tab::Create));
        assert_eq!(state.draft.title, "Groceries");
        assert_eq!(state.draft.editing_id, Some(3));
        assert!(state.draft.is_editing());

        state.cancel_edit();
        assert_eq!(state.draft, Draft::default());
    }

    #[test]
    fn draft_requires_title_and_content() {
        let draft = Draft {
            title: "T".into(),
            content: "  ".into(),
            editing_id: None,
        };
        assert_eq!(draft.validate().unwrap_err(), "Title and content are required");
    }

    #[test]
    fn font_size_is_clamped() {
        let mut prefs = FormatPrefs::default();
        prefs.set_font_size(4);
        assert_eq!(prefs.font_size, FormatPrefs::MIN_FONT_SIZE);
        prefs.set_font_size(99);
        assert_eq!(prefs.font_size, FormatPrefs::MAX_FONT_SIZE);
    }

    #[test]
    fn reset_session_keeps_format_prefs() {
        let mut state = ClientState::default();
        state.enter_session("alice".into());
        state.notes.push(note(1, "a"));
        state.format.bold = true;

        state.reset_session();
        assert!(!state.is_logged_in());
        assert!(state.username.is_none());
        assert!(state.notes.is_empty());
        assert!(state.format.bold);
    }
}
