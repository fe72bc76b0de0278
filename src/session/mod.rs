//! Session host: commands in, exactly one terminal outcome out
//!
//! A spawned worker owns the one in-memory session and processes one
//! command at a time; each command runs a strictly sequential chain of
//! remote calls and emits a single terminal outcome. Browser-window
//! signals (navigation, close) arrive on a separate shell-facing channel
//! and may additionally emit `StartedAuthorizationCode` or
//! `CanceledOAuth` mid-handshake.

mod window;

pub use window::{TrayWindow, WindowEvent, WindowProxy};

use std::path::Path;

use tokio::sync::mpsc;

use crate::api::StatusApi;
use crate::api::oauth::AUTHORIZE_PATH;
use crate::dialogs::Dialogs;
use crate::error::{AuthError, ExchangeError, PublishError, ValidationError};
use crate::models::{
    AccessTokenPair, AuthorizeCode, ImageAttachment, PostResult, RequestTokenPair, UserCredentials,
};

/// Commands sent from the shell to the session worker
#[derive(Debug, Clone)]
pub enum Command {
    /// Begin the OAuth handshake
    StartOAuth,
    /// Redeem the user-supplied authorize code
    SendAuthorizeCode {
        /// Pair returned by the preceding [`Command::StartOAuth`]
        request_token_pair: RequestTokenPair,
        /// Verifier the user copied out of the authorization page
        authorize_code: AuthorizeCode,
    },
    /// Publish a status, with an optional validated attachment
    PostStatus {
        /// Caller-supplied credential; the session never stores one
        access_token_pair: AccessTokenPair,
        /// Status text
        status_text: String,
        /// Attachment to upload before posting
        image: Option<ImageAttachment>,
    },
    /// Open the file dialog and validate the chosen image
    AddImage,
    /// Close the authorization window and drop back to the login view
    ReturnToLogin,
    /// Stop the session worker
    Quit,
}

/// Terminal (and handshake-signal) outcomes sent back to the shell
#[derive(Debug)]
pub enum Outcome {
    /// Handshake step 1 succeeded
    ReceivedRequestTokenPair(RequestTokenPair),
    /// Handshake step 1 failed
    StartOAuthError(AuthError),
    /// The authorization window reached the authorize page
    StartedAuthorizationCode,
    /// The user closed the authorization window mid-handshake
    CanceledOAuth,
    /// Steps 2 and 3 succeeded; the handshake is over
    CompletedOAuth {
        /// Credential for subsequent publish commands, owned by the caller
        access_token_pair: AccessTokenPair,
        /// Profile snapshot from the verify call
        user_credentials: UserCredentials,
    },
    /// Step 2 failed (or the window was already gone)
    SendAuthorizeCodeError(ExchangeError),
    /// Step 3 failed
    VerifyCredentialsError(AuthError),
    /// The status (and any attachment) was published
    PostStatusComplete(PostResult),
    /// Upload or post failed; carries the remote payload untouched
    PostStatusError(PublishError),
    /// Dialog flow finished; `None` covers both rejection and cancel
    AddImageComplete(Option<ImageAttachment>),
}

/// Channel handles for talking to a spawned session worker
pub struct SessionHandle {
    /// Send commands to the worker
    pub commands: mpsc::Sender<Command>,
    /// Receive outcomes from the worker
    pub outcomes: mpsc::Receiver<Outcome>,
    /// Forward authorization-window signals from the shell
    pub window: WindowProxy,
    /// Observe tray visibility and pinning
    pub tray: TrayWindow,
}

/// Spawn the session worker and return its handles
pub fn spawn_session<A>(api: A, dialogs: Box<dyn Dialogs>) -> SessionHandle
where
    A: StatusApi + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<Command>(32);
    let (outcome_tx, outcome_rx) = mpsc::channel::<Outcome>(32);
    let (window_tx, mut window_rx) = mpsc::channel::<WindowEvent>(32);

    let tray = TrayWindow::new();

    let mut session = Session {
        api,
        dialogs,
        tray: tray.clone(),
        outcomes: outcome_tx,
        auth_window_open: false,
        authorization_started: false,
    };

    tokio::spawn(async move {
        loop {
            tokio::select! {
                maybe_cmd = cmd_rx.recv() => match maybe_cmd {
                    None | Some(Command::Quit) => break,
                    Some(cmd) => session.handle_command(cmd).await,
                },
                Some(event) = window_rx.recv() => session.handle_window_event(event).await,
            }
        }
        tracing::debug!("session worker shut down");
    });

    SessionHandle {
        commands: cmd_tx,
        outcomes: outcome_rx,
        window: WindowProxy::new(window_tx),
        tray,
    }
}

struct Session<A> {
    api: A,
    dialogs: Box<dyn Dialogs>,
    tray: TrayWindow,
    outcomes: mpsc::Sender<Outcome>,
    /// Whether an authorization window is live for the current handshake
    auth_window_open: bool,
    /// Whether `StartedAuthorizationCode` was already emitted this handshake
    authorization_started: bool,
}

impl<A: StatusApi> Session<A> {
    async fn emit(&self, outcome: Outcome) {
        let _ = self.outcomes.send(outcome).await;
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::StartOAuth => self.handle_start_oauth().await,
            Command::SendAuthorizeCode {
                request_token_pair,
                authorize_code,
            } => {
                self.handle_send_authorize_code(request_token_pair, authorize_code)
                    .await;
            }
            Command::PostStatus {
                access_token_pair,
                status_text,
                image,
            } => {
                self.handle_post_status(access_token_pair, status_text, image)
                    .await;
            }
            Command::AddImage => self.handle_add_image().await,
            Command::ReturnToLogin => self.handle_return_to_login(),
            // consumed by the worker loop
            Command::Quit => {}
        }
    }

    async fn handle_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Navigated(url) => {
                if self.auth_window_open
                    && !self.authorization_started
                    && window::url_path(&url) == AUTHORIZE_PATH
                {
                    self.authorization_started = true;
                    self.emit(Outcome::StartedAuthorizationCode).await;
                }
            }
            WindowEvent::Closed => {
                // Signals after completion or ReturnToLogin are stale
                if self.auth_window_open {
                    self.invalidate_auth_window();
                    self.emit(Outcome::CanceledOAuth).await;
                }
            }
        }
    }

    async fn handle_start_oauth(&mut self) {
        self.tray.set_pinned(true);

        match self.api.acquire_request_token().await {
            Ok(pair) => {
                // A pending handshake's window is repurposed, not doubled
                self.auth_window_open = true;
                self.authorization_started = false;
                self.emit(Outcome::ReceivedRequestTokenPair(pair)).await;
            }
            Err(e) => {
                self.tray.set_pinned(false);
                self.emit(Outcome::StartOAuthError(e)).await;
            }
        }
    }

    async fn handle_send_authorize_code(
        &mut self,
        pair: RequestTokenPair,
        code: AuthorizeCode,
    ) {
        if !self.auth_window_open {
            self.emit(Outcome::SendAuthorizeCodeError(ExchangeError::WindowClosed))
                .await;
            return;
        }

        let access = match self.api.exchange_authorize_code(&pair, &code).await {
            Ok(access) => access,
            Err(e) => {
                self.emit(Outcome::SendAuthorizeCodeError(e)).await;
                return;
            }
        };

        match self.api.verify_credentials(&access).await {
            Ok(user_credentials) => {
                self.invalidate_auth_window();
                self.emit(Outcome::CompletedOAuth {
                    access_token_pair: access,
                    user_credentials,
                })
                .await;
            }
            Err(e) => self.emit(Outcome::VerifyCredentialsError(e)).await,
        }
    }

    async fn handle_post_status(
        &mut self,
        access: AccessTokenPair,
        status_text: String,
        image: Option<ImageAttachment>,
    ) {
        self.tray.hide();

        let media_id = match image {
            Some(image) => match self.api.upload_image(&image, &access).await {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::warn!("media upload failed: {e}");
                    self.emit(Outcome::PostStatusError(e)).await;
                    return;
                }
            },
            None => None,
        };

        match self
            .api
            .post_status(&status_text, &access, media_id.as_ref())
            .await
        {
            Ok(result) => self.emit(Outcome::PostStatusComplete(result)).await,
            Err(e) => self.emit(Outcome::PostStatusError(e)).await,
        }
    }

    async fn handle_add_image(&mut self) {
        self.tray.set_pinned(true);

        let image = self
            .dialogs
            .pick_image()
            .and_then(|path| self.load_and_validate(&path));

        self.tray.set_pinned(false);
        self.emit(Outcome::AddImageComplete(image)).await;
    }

    fn handle_return_to_login(&mut self) {
        // No-op when no authorization window is open; never an outcome
        if self.auth_window_open {
            self.invalidate_auth_window();
        }
    }

    fn invalidate_auth_window(&mut self) {
        self.auth_window_open = false;
        self.tray.set_pinned(false);
    }

    fn load_and_validate(&self, path: &Path) -> Option<ImageAttachment> {
        let image = match ImageAttachment::from_path(path) {
            Ok(image) => image,
            Err(e) => {
                tracing::warn!("failed to read image {}: {e}", path.display());
                self.dialogs.warn(
                    "Oops, sorry you can't do that",
                    &format!("Could not read {}.", path.display()),
                );
                return None;
            }
        };

        if let Err(e) = image.validate() {
            self.dialogs
                .warn("Oops, sorry you can't do that", &rejection_detail(&e));
            return None;
        }

        Some(image)
    }
}

/// User-facing detail line for a rejected image
fn rejection_detail(error: &ValidationError) -> String {
    match error {
        ValidationError::TooLarge { extension, .. } if extension == ".gif" => {
            "GIFs must be less than 15mb.".to_string()
        }
        ValidationError::TooLarge { .. } => "Images must be less than 5mb.".to_string(),
        ValidationError::UnsupportedFormat { .. } => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::models::MediaId;

    #[derive(Default, Clone)]
    struct StubApi {
        calls: Arc<Mutex<Vec<String>>>,
        fail_request_token: bool,
        fail_exchange: bool,
        fail_verify: bool,
        fail_upload: bool,
    }

    impl StubApi {
        fn record(&self, call: impl Into<String>) {
            self.calls.lock().unwrap().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatusApi for StubApi {
        async fn acquire_request_token(&self) -> Result<RequestTokenPair, AuthError> {
            self.record("request_token");
            if self.fail_request_token {
                return Err(AuthError::Rejected {
                    status: 401,
                    body: "no".to_string(),
                });
            }
            Ok(RequestTokenPair {
                token: "t1".to_string(),
                secret: "s1".to_string(),
            })
        }

        fn authorize_url(&self, pair: &RequestTokenPair) -> String {
            format!("https://api.example.com/oauth/authenticate?oauth_token={}", pair.token)
        }

        async fn exchange_authorize_code(
            &self,
            _pair: &RequestTokenPair,
            _code: &AuthorizeCode,
        ) -> Result<AccessTokenPair, ExchangeError> {
            self.record("exchange");
            if self.fail_exchange {
                return Err(ExchangeError::Auth(AuthError::Rejected {
                    status: 401,
                    body: "bad code".to_string(),
                }));
            }
            Ok(AccessTokenPair {
                token: "at".to_string(),
                secret: "as".to_string(),
            })
        }

        async fn verify_credentials(
            &self,
            _access: &AccessTokenPair,
        ) -> Result<UserCredentials, AuthError> {
            self.record("verify");
            if self.fail_verify {
                return Err(AuthError::Rejected {
                    status: 401,
                    body: "who".to_string(),
                });
            }
            Ok(UserCredentials {
                name: "Wren".to_string(),
                screen_name: "wrenapp".to_string(),
                location: None,
                description: None,
                utc_offset: None,
                time_zone: None,
                geo_enabled: false,
                lang: None,
                profile_image_url: None,
            })
        }

        async fn upload_image(
            &self,
            _image: &ImageAttachment,
            _access: &AccessTokenPair,
        ) -> Result<MediaId, PublishError> {
            self.record("upload");
            if self.fail_upload {
                return Err(PublishError::Remote {
                    status: 400,
                    payload: serde_json::json!({"errors": [{"code": 324}]}),
                });
            }
            Ok(MediaId("media-1".to_string()))
        }

        async fn post_status(
            &self,
            _text: &str,
            _access: &AccessTokenPair,
            media_id: Option<&MediaId>,
        ) -> Result<PostResult, PublishError> {
            self.record(format!(
                "post_status:{}",
                media_id.map_or("none", MediaId::as_str)
            ));
            Ok(PostResult {
                id: "9".to_string(),
                text: "hello".to_string(),
                created_at: "Wed Aug 27 13:08:45 +0000 2008".to_string(),
            })
        }
    }

    struct StubDialogs {
        pick: Option<PathBuf>,
        warnings: Arc<Mutex<Vec<String>>>,
    }

    impl StubDialogs {
        fn new(pick: Option<PathBuf>) -> (Self, Arc<Mutex<Vec<String>>>) {
            let warnings = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    pick,
                    warnings: warnings.clone(),
                },
                warnings,
            )
        }
    }

    impl Dialogs for StubDialogs {
        fn pick_image(&self) -> Option<PathBuf> {
            self.pick.clone()
        }

        fn warn(&self, _message: &str, detail: &str) {
            self.warnings.lock().unwrap().push(detail.to_string());
        }
    }

    fn spawn_stub(api: StubApi) -> SessionHandle {
        let (dialogs, _) = StubDialogs::new(None);
        spawn_session(api, Box::new(dialogs))
    }

    fn access_pair() -> AccessTokenPair {
        AccessTokenPair {
            token: "at".to_string(),
            secret: "as".to_string(),
        }
    }

    fn request_pair() -> RequestTokenPair {
        RequestTokenPair {
            token: "t1".to_string(),
            secret: "s1".to_string(),
        }
    }

    fn png_attachment() -> ImageAttachment {
        ImageAttachment {
            path: PathBuf::from("/tmp/picture.png"),
            base64_data: "aGVsbG8=".to_string(),
            size_mb: 0.1,
            extension: ".png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_start_oauth_emits_pair_and_pins() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api);

        handle.commands.send(Command::StartOAuth).await.unwrap();
        match handle.outcomes.recv().await.unwrap() {
            Outcome::ReceivedRequestTokenPair(pair) => assert_eq!(pair.token, "t1"),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(handle.tray.is_pinned());
    }

    #[tokio::test]
    async fn test_start_oauth_failure_short_circuits() {
        let api = StubApi {
            fail_request_token: true,
            ..StubApi::default()
        };
        let mut handle = spawn_stub(api.clone());

        handle.commands.send(Command::StartOAuth).await.unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::StartOAuthError(AuthError::Rejected { status: 401, .. })
        ));
        assert!(!handle.tray.is_pinned());
        // Exchange and verify are never attempted in the same handshake
        assert_eq!(api.calls(), vec!["request_token"]);
    }

    #[tokio::test]
    async fn test_cancel_scenario_and_stale_exchange() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api.clone());

        handle.commands.send(Command::StartOAuth).await.unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::ReceivedRequestTokenPair(_)
        ));

        handle
            .window
            .navigated("https://api.example.com/oauth/authenticate?oauth_token=t1")
            .await;
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::StartedAuthorizationCode
        ));

        handle.window.closed().await;
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::CanceledOAuth
        ));
        assert!(!handle.tray.is_pinned());

        // The stale pair can no longer be redeemed: there is no live window
        handle
            .commands
            .send(Command::SendAuthorizeCode {
                request_token_pair: request_pair(),
                authorize_code: AuthorizeCode::from("1234"),
            })
            .await
            .unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::SendAuthorizeCodeError(ExchangeError::WindowClosed)
        ));
        assert_eq!(api.calls(), vec!["request_token"]);
    }

    #[tokio::test]
    async fn test_navigation_elsewhere_is_not_the_code_page() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api);

        handle.commands.send(Command::StartOAuth).await.unwrap();
        let _ = handle.outcomes.recv().await.unwrap();

        handle
            .window
            .navigated("https://api.example.com/login?next=authorize")
            .await;
        handle.window.closed().await;

        // Window-channel order is preserved: cancel arrives, no code signal
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::CanceledOAuth
        ));
    }

    #[tokio::test]
    async fn test_full_handshake_completes_and_invalidates_window() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api.clone());

        handle.commands.send(Command::StartOAuth).await.unwrap();
        let _ = handle.outcomes.recv().await.unwrap();

        handle
            .commands
            .send(Command::SendAuthorizeCode {
                request_token_pair: request_pair(),
                authorize_code: AuthorizeCode::from("1234"),
            })
            .await
            .unwrap();
        match handle.outcomes.recv().await.unwrap() {
            Outcome::CompletedOAuth {
                access_token_pair,
                user_credentials,
            } => {
                assert_eq!(access_token_pair.token, "at");
                assert_eq!(user_credentials.screen_name, "wrenapp");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!handle.tray.is_pinned());
        assert_eq!(api.calls(), vec!["request_token", "exchange", "verify"]);

        // The shell's close signal after completion is stale, not a cancel
        handle.window.closed().await;
        handle.commands.send(Command::AddImage).await.unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::AddImageComplete(None)
        ));
    }

    #[tokio::test]
    async fn test_exchange_failure_keeps_window_open() {
        let api = StubApi {
            fail_exchange: true,
            ..StubApi::default()
        };
        let mut handle = spawn_stub(api.clone());

        handle.commands.send(Command::StartOAuth).await.unwrap();
        let _ = handle.outcomes.recv().await.unwrap();

        handle
            .commands
            .send(Command::SendAuthorizeCode {
                request_token_pair: request_pair(),
                authorize_code: AuthorizeCode::from("9999"),
            })
            .await
            .unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::SendAuthorizeCodeError(ExchangeError::Auth(_))
        ));
        assert_eq!(api.calls(), vec!["request_token", "exchange"]);

        // The window survives a failed exchange; closing it still cancels
        handle.window.closed().await;
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::CanceledOAuth
        ));
    }

    #[tokio::test]
    async fn test_verify_failure() {
        let api = StubApi {
            fail_verify: true,
            ..StubApi::default()
        };
        let mut handle = spawn_stub(api.clone());

        handle.commands.send(Command::StartOAuth).await.unwrap();
        let _ = handle.outcomes.recv().await.unwrap();

        handle
            .commands
            .send(Command::SendAuthorizeCode {
                request_token_pair: request_pair(),
                authorize_code: AuthorizeCode::from("1234"),
            })
            .await
            .unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::VerifyCredentialsError(_)
        ));
        assert_eq!(api.calls(), vec!["request_token", "exchange", "verify"]);
    }

    #[tokio::test]
    async fn test_post_without_image_is_a_single_call() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api.clone());
        handle.tray.show();

        handle
            .commands
            .send(Command::PostStatus {
                access_token_pair: access_pair(),
                status_text: "hello".to_string(),
                image: None,
            })
            .await
            .unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::PostStatusComplete(_)
        ));
        assert_eq!(api.calls(), vec!["post_status:none"]);
        assert!(!handle.tray.is_visible());
    }

    #[tokio::test]
    async fn test_upload_failure_short_circuits_with_remote_payload() {
        let api = StubApi {
            fail_upload: true,
            ..StubApi::default()
        };
        let mut handle = spawn_stub(api.clone());

        handle
            .commands
            .send(Command::PostStatus {
                access_token_pair: access_pair(),
                status_text: "hello".to_string(),
                image: Some(png_attachment()),
            })
            .await
            .unwrap();
        match handle.outcomes.recv().await.unwrap() {
            Outcome::PostStatusError(PublishError::Remote { status, payload }) => {
                assert_eq!(status, 400);
                assert_eq!(payload["errors"][0]["code"], 324);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        // The status is never posted after a failed upload
        assert_eq!(api.calls(), vec!["upload"]);
    }

    #[tokio::test]
    async fn test_post_with_image_chains_the_media_id() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api.clone());

        handle
            .commands
            .send(Command::PostStatus {
                access_token_pair: access_pair(),
                status_text: "hello".to_string(),
                image: Some(png_attachment()),
            })
            .await
            .unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::PostStatusComplete(_)
        ));
        assert_eq!(api.calls(), vec!["upload", "post_status:media-1"]);
    }

    #[tokio::test]
    async fn test_add_image_accepts_a_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.png");
        std::fs::write(&path, b"png bytes").unwrap();

        let (dialogs, warnings) = StubDialogs::new(Some(path.clone()));
        let mut handle = spawn_session(StubApi::default(), Box::new(dialogs));

        handle.commands.send(Command::AddImage).await.unwrap();
        match handle.outcomes.recv().await.unwrap() {
            Outcome::AddImageComplete(Some(image)) => {
                assert_eq!(image.extension, ".png");
                assert_eq!(image.path, path);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(warnings.lock().unwrap().is_empty());
        assert!(!handle.tray.is_pinned());
    }

    #[tokio::test]
    async fn test_add_image_rejection_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drawing.bmp");
        std::fs::write(&path, b"bmp bytes").unwrap();

        let (dialogs, warnings) = StubDialogs::new(Some(path));
        let mut handle = spawn_session(StubApi::default(), Box::new(dialogs));

        handle.commands.send(Command::AddImage).await.unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::AddImageComplete(None)
        ));
        assert_eq!(warnings.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_image_cancel_stays_silent() {
        let (dialogs, warnings) = StubDialogs::new(None);
        let mut handle = spawn_session(StubApi::default(), Box::new(dialogs));

        handle.commands.send(Command::AddImage).await.unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::AddImageComplete(None)
        ));
        assert!(warnings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_return_to_login_without_window_is_a_no_op() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api);

        handle.commands.send(Command::ReturnToLogin).await.unwrap();
        handle.commands.send(Command::StartOAuth).await.unwrap();

        // Outcome order proves ReturnToLogin emitted nothing
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::ReceivedRequestTokenPair(_)
        ));
    }

    #[tokio::test]
    async fn test_return_to_login_closes_the_window() {
        let api = StubApi::default();
        let mut handle = spawn_stub(api.clone());

        handle.commands.send(Command::StartOAuth).await.unwrap();
        let _ = handle.outcomes.recv().await.unwrap();

        handle.commands.send(Command::ReturnToLogin).await.unwrap();
        handle
            .commands
            .send(Command::SendAuthorizeCode {
                request_token_pair: request_pair(),
                authorize_code: AuthorizeCode::from("1234"),
            })
            .await
            .unwrap();
        assert!(matches!(
            handle.outcomes.recv().await.unwrap(),
            Outcome::SendAuthorizeCodeError(ExchangeError::WindowClosed)
        ));
        assert!(!handle.tray.is_pinned());
    }

    #[tokio::test]
    async fn test_quit_stops_the_worker() {
        let handle = spawn_stub(StubApi::default());

        handle.commands.send(Command::Quit).await.unwrap();
        handle.commands.closed().await;
        assert!(handle.commands.is_closed());
    }
}
