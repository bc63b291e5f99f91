//! Controller tying the UI state to the notes service.
//!
//! Every mutating operation follows the same shape: validate locally, call
//! the service, then re-fetch both lists. Failures land in the banner with
//! the server's message copied verbatim.

use futures::future::join_all;

use crate::api::{ApiError, NotesApi};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::{Session, SessionStore};
use crate::state::{AuthMode, Banner, BannerKind, ClientState, Draft, Screen};

pub struct NotesApp {
    api: NotesApi,
    sessions: Option<SessionStore>,
    token: Option<String>,
    state: ClientState,
}

impl NotesApp {
    /// Create a controller. Pass a [`SessionStore`] to persist logins.
    pub fn new(api: NotesApi, sessions: Option<SessionStore>) -> Self {
        Self {
            api,
            sessions,
            token: None,
            state: ClientState::default(),
        }
    }

    /// Create a controller for the configured service that persists its
    /// login to the configured session file.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            NotesApi::new(config.api_url.clone()),
            Some(SessionStore::new(config.session_file.clone())),
        )
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    /// Mutable access for form input and purely local toggles.
    pub fn state_mut(&mut self) -> &mut ClientState {
        &mut self.state
    }

    /// Restore a persisted session, if any, and load its notes.
    ///
    /// Returns `true` when the client ends up logged in.
    pub async fn resume(&mut self) -> Result<bool, ClientError> {
        let Some(store) = &self.sessions else {
            return Ok(false);
        };
        let Some(session) = store.load().await? else {
            return Ok(false);
        };

        tracing::debug!(username = %session.username, "Resuming saved session");
        self.token = Some(session.token);
        self.state.enter_session(session.username);

        match self.refresh().await {
            Ok(()) => Ok(true),
            Err(ClientError::SessionExpired) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Submit the credential form in its current mode.
    pub async fn submit_credentials(&mut self) -> Result<(), ClientError> {
        let mode = match self.state.screen {
            Screen::LoggedOut { mode } => mode,
            Screen::LoggedIn { .. } => return Ok(()),
        };
        let result = match mode {
            AuthMode::Login => self.login().await,
            AuthMode::Register => self.register().await,
        };
        self.state.password_input.clear();
        self.report(result)
    }

    async fn register(&mut self) -> Result<(), ClientError> {
        let username = self
            .state
            .validate_credentials()
            .map_err(ClientError::Validation)?;

        self.api
            .register(&username, &self.state.password_input)
            .await?;

        tracing::info!(%username, "Account registered");
        self.state.set_auth_mode(AuthMode::Login);
        self.state.banner = Some(Banner::info("Account created! Now login."));
        Ok(())
    }

    async fn login(&mut self) -> Result<(), ClientError> {
        let username = self
            .state
            .validate_credentials()
            .map_err(ClientError::Validation)?;

        let login = self.api.login(&username, &self.state.password_input).await?;
        let username = login.account.username;

        if let Some(store) = &self.sessions {
            let session = Session {
                username: username.clone(),
                token: login.token.clone(),
            };
            if let Err(e) = store.save(&session).await {
                tracing::warn!(error = %e, "Failed to persist session");
            }
        }

        tracing::info!(%username, "Logged in");
        self.token = Some(login.token);
        self.state.enter_session(username);
        self.refresh().await
    }

    /// Forget the session locally and on disk.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.token = None;
        self.state.reset_session();
        if let Some(store) = &self.sessions {
            store.clear().await?;
        }
        Ok(())
    }

    /// Re-fetch the active list and the recycle bin.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        let (token, username) = self.credentials()?;
        let (active, deleted) = futures::future::join(
            self.api.list_active(&token, &username),
            self.api.list_deleted(&token, &username),
        )
        .await;

        match (active, deleted) {
            (Ok(active), Ok(deleted)) => {
                self.state.notes = active;
                self.state.recycle_bin = deleted;
                Ok(())
            }
            (Err(e), _) | (_, Err(e)) => {
                let err = self.classify(e).await;
                self.report(Err(err))
            }
        }
    }

    /// Create a note from the draft, or save the edit in progress.
    pub async fn save_draft(&mut self) -> Result<(), ClientError> {
        let result = self.save_draft_inner().await;
        self.report(result)
    }

    async fn save_draft_inner(&mut self) -> Result<(), ClientError> {
        let (token, username) = self.credentials()?;
        self.state
            .draft
            .validate()
            .map_err(ClientError::Validation)?;

        let Draft {
            title,
            content,
            editing_id,
        } = &self.state.draft;
        let outcome = match editing_id {
            Some(id) => self.api.update_note(&token, *id, title, content).await,
            None => {
                self.api
                    .create_note(&token, &username, title, content)
                    .await
            }
        };
        self.mutated(outcome.map(|_| ())).await?;
        self.state.draft = Draft::default();
        Ok(())
    }

    /// Move a note to the recycle bin.
    pub async fn delete_note(&mut self, id: i64) -> Result<(), ClientError> {
        let (token, _) = self.credentials()?;
        let outcome = self.api.soft_delete(&token, id).await.map(|_| ());
        let result = self.mutated(outcome).await;
        if result.is_ok() && self.state.draft.editing_id == Some(id) {
            self.state.cancel_edit();
        }
        self.report(result)
    }

    /// Bring a note back from the recycle bin.
    pub async fn restore_note(&mut self, id: i64) -> Result<(), ClientError> {
        let (token, _) = self.credentials()?;
        let outcome = self.api.restore(&token, id).await.map(|_| ());
        let result = self.mutated(outcome).await;
        self.report(result)
    }

    /// Permanently delete one note.
    pub async fn purge_note(&mut self, id: i64) -> Result<(), ClientError> {
        let (token, _) = self.credentials()?;
        let outcome = self.api.purge(&token, id).await;
        let result = self.mutated(outcome).await;
        self.report(result)
    }

    /// Empty the recycle bin.
    ///
    /// All deletions are issued at once with no ordering. If any fail, the
    /// rest still go through and a single generic error is reported.
    pub async fn purge_all(&mut self) -> Result<(), ClientError> {
        let (token, _) = self.credentials()?;
        let ids: Vec<i64> = self.state.recycle_bin.iter().map(|n| n.id).collect();

        let results = join_all(ids.iter().map(|id| self.api.purge(&token, *id))).await;

        let mut failed = 0;
        let mut unauthorized = false;
        for (id, result) in ids.iter().zip(results) {
            if let Err(e) = result {
                tracing::warn!(note_id = *id, error = %e, "Purge failed");
                unauthorized |= e.is_unauthorized();
                failed += 1;
            }
        }

        let result = if unauthorized {
            Err(self.expire_session().await)
        } else {
            let refreshed = self.refresh().await;
            match (failed, refreshed) {
                (0, r) => r,
                (_, Err(ClientError::SessionExpired)) => Err(ClientError::SessionExpired),
                (failed, _) => Err(ClientError::PartialPurge { failed }),
            }
        };
        self.report(result)
    }

    // ---- private helpers ----

    fn credentials(&self) -> Result<(String, String), ClientError> {
        match (&self.token, &self.state.username) {
            (Some(token), Some(username)) => Ok((token.clone(), username.clone())),
            _ => Err(ClientError::NotLoggedIn),
        }
    }

    /// Finish a mutation: map its error, or refresh both lists on success.
    async fn mutated(&mut self, outcome: Result<(), ApiError>) -> Result<(), ClientError> {
        match outcome {
            Ok(()) => self.refresh().await,
            Err(e) => Err(self.classify(e).await),
        }
    }

    /// Turn a service error into a client error, ending the session on 401.
    async fn classify(&mut self, err: ApiError) -> ClientError {
        if err.is_unauthorized() && self.token.is_some() {
            self.expire_session().await
        } else {
            ClientError::Api(err)
        }
    }

    async fn expire_session(&mut self) -> ClientError {
        tracing::info!("Session token rejected, logging out");
        if let Err(e) = self.logout().await {
            tracing::warn!(error = %e, "Failed to clear saved session");
        }
        ClientError::SessionExpired
    }

    /// Mirror the outcome into the banner.
    fn report(&mut self, result: Result<(), ClientError>) -> Result<(), ClientError> {
        match &result {
            Ok(()) => {
                let stale_error = self
                    .state
                    .banner
                    .as_ref()
                    .is_some_and(|b| b.kind == BannerKind::Error);
                if stale_error {
                    self.state.banner = None;
                }
            }
            Err(e) => self.state.banner = Some(Banner::error(e.to_string())),
        }
        result
    }
}
