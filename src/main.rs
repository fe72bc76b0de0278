//! Wren - menu-bar status poster, terminal edition

use anyhow::{Context, Result, bail};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wren::api::{StatusApi, TwitterApi};
use wren::dialogs::NativeDialogs;
use wren::session::{Command as SessionCommand, Outcome, SessionHandle, spawn_session};
use wren::{AccessTokenPair, AuthorizeCode, Config, ImageAttachment, UserCredentials};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug for verbose output)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match parse_args()? {
        Command::Run => run_interactive().await,
        Command::Post {
            text,
            token,
            secret,
            image,
        } => post_cli(&text, token, secret, image.as_deref()).await,
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Version => {
            print_version();
            Ok(())
        }
    }
}

/// CLI commands
enum Command {
    Run,
    Post {
        text: String,
        token: String,
        secret: String,
        image: Option<String>,
    },
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() == 1 {
        return Ok(Command::Run);
    }

    match args[1].as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-v" | "--version" | "version" => Ok(Command::Version),
        "run" | "auth" => Ok(Command::Run),

        "post" => {
            let text = args
                .get(2)
                .ok_or_else(|| anyhow::anyhow!("Missing status text"))?
                .clone();

            let mut token = None;
            let mut secret = None;
            let mut image = None;
            let mut i = 3;
            while i < args.len() {
                match args[i].as_str() {
                    "--token" => {
                        token = args.get(i + 1).cloned();
                        i += 2;
                    }
                    "--secret" => {
                        secret = args.get(i + 1).cloned();
                        i += 2;
                    }
                    "--image" => {
                        image = args.get(i + 1).cloned();
                        i += 2;
                    }
                    _ => i += 1,
                }
            }

            let token = token
                .ok_or_else(|| anyhow::anyhow!("Missing --token (run 'wren' to authorize)"))?;
            let secret = secret
                .ok_or_else(|| anyhow::anyhow!("Missing --secret (run 'wren' to authorize)"))?;

            Ok(Command::Post {
                text,
                token,
                secret,
                image,
            })
        }

        other => Err(anyhow::anyhow!(
            "Unknown command: {other}\nRun 'wren --help' for usage"
        )),
    }
}

fn print_help() {
    let config_path = wren::Config::default_path()
        .map_or_else(|_| "Unknown".to_string(), |p| p.display().to_string());

    println!(
        r#"{}
🐦 Wren - post a status from your menu bar (or terminal)

USAGE:
    wren                               Authorize, then compose interactively
    wren [COMMAND]

COMMANDS:
    post <text> [OPTIONS]              Post a status with a session token pair
      Options:
        --token <token>                Access token (printed by 'wren')
        --secret <secret>              Access token secret
        --image <path>                 Attach an image (jpeg/jpg/png/gif)
      Examples:
        wren post "hello" --token ... --secret ...
        wren post "hello" --token ... --secret ... --image cat.png

OPTIONS:
    -h, --help                         Show this help message
    -v, --version                      Show version information

ENVIRONMENT:
    WREN_CONSUMER_KEY                  Overrides the configured consumer key
    WREN_CONSUMER_SECRET               Overrides the configured consumer secret

CONFIG:
    {}

Access tokens are never written to disk; they live for one session.

HOMEPAGE:
    {}
"#,
        wren::LOGO,
        config_path,
        wren::REPO_URL
    );
}

fn print_version() {
    println!("wren {}", wren::VERSION);
}

fn session_from_config(config: &Config) -> Result<(SessionHandle, TwitterApi)> {
    if !config.has_consumer_keys() {
        bail!(
            "No consumer keys configured.\nAdd them to {} or set WREN_CONSUMER_KEY / WREN_CONSUMER_SECRET",
            Config::default_path()?.display()
        );
    }

    let api = TwitterApi::from_config(config)?;
    let handle = spawn_session(api.clone(), Box::new(NativeDialogs));
    Ok((handle, api))
}

/// Authorize, then compose statuses until the user quits
async fn run_interactive() -> Result<()> {
    let config = Config::load()?;
    let (mut handle, api) = session_from_config(&config)?;

    let (access, user) = authorize(&mut handle, &api).await?;
    println!("\n✓ Logged in as @{}", user.screen_name);
    if let Some(location) = &user.location {
        if !location.is_empty() {
            println!("  {} · {}", user.name, location);
        }
    }
    println!("\nYour session token pair (valid until you close this session):");
    println!("  token:  {}", access.token);
    println!("  secret: {}", access.secret);

    loop {
        println!("\nWhat's happening? (empty line to quit)");
        let text = read_line()?;
        if text.is_empty() {
            break;
        }

        println!("Attach an image? (path, or Enter to skip)");
        let image_path = read_line()?;
        let image = if image_path.is_empty() {
            None
        } else {
            match load_attachment(&image_path) {
                Ok(image) => Some(image),
                Err(e) => {
                    println!("⚠ {e}");
                    continue;
                }
            }
        };

        handle
            .commands
            .send(SessionCommand::PostStatus {
                access_token_pair: access.clone(),
                status_text: text,
                image,
            })
            .await
            .context("Session worker is gone")?;

        match handle.outcomes.recv().await {
            Some(Outcome::PostStatusComplete(result)) => {
                println!("✓ Posted (id {})", result.id);
            }
            Some(Outcome::PostStatusError(e)) => println!("⚠ Post failed: {e}"),
            other => bail!("Unexpected session outcome: {other:?}"),
        }
    }

    let _ = handle.commands.send(SessionCommand::Quit).await;
    Ok(())
}

/// Drive the OAuth handshake through the session
async fn authorize(
    handle: &mut SessionHandle,
    api: &TwitterApi,
) -> Result<(AccessTokenPair, UserCredentials)> {
    handle
        .commands
        .send(SessionCommand::StartOAuth)
        .await
        .context("Session worker is gone")?;

    let pair = match handle.outcomes.recv().await {
        Some(Outcome::ReceivedRequestTokenPair(pair)) => pair,
        Some(Outcome::StartOAuthError(e)) => return Err(e).context("Could not start OAuth"),
        other => bail!("Unexpected session outcome: {other:?}"),
    };

    let auth_url = api.authorize_url(&pair);
    println!("\n📋 Open this URL in your browser:\n\n  {}\n", auth_url);

    // Try to open browser; the CLI is its own shell, so it reports the
    // navigation hand-off itself
    let _ = open::that(&auth_url);
    handle.window.navigated(&auth_url).await;
    match handle.outcomes.recv().await {
        Some(Outcome::StartedAuthorizationCode) => {}
        other => bail!("Unexpected session outcome: {other:?}"),
    }

    println!("Paste the authorization code here:");
    let code = read_line()?;

    handle
        .commands
        .send(SessionCommand::SendAuthorizeCode {
            request_token_pair: pair,
            authorize_code: AuthorizeCode::from(code.as_str()),
        })
        .await
        .context("Session worker is gone")?;

    match handle.outcomes.recv().await {
        Some(Outcome::CompletedOAuth {
            access_token_pair,
            user_credentials,
        }) => Ok((access_token_pair, user_credentials)),
        Some(Outcome::SendAuthorizeCodeError(e)) => {
            Err(e).context("Could not redeem the authorization code")
        }
        Some(Outcome::VerifyCredentialsError(e)) => {
            Err(e).context("Could not verify the new credentials")
        }
        other => bail!("Unexpected session outcome: {other:?}"),
    }
}

/// One-shot post with a caller-supplied token pair
async fn post_cli(
    text: &str,
    token: String,
    secret: String,
    image_path: Option<&str>,
) -> Result<()> {
    let config = Config::load()?;
    let (mut handle, _api) = session_from_config(&config)?;

    let image = match image_path {
        Some(path) => Some(load_attachment(path)?),
        None => None,
    };

    handle
        .commands
        .send(SessionCommand::PostStatus {
            access_token_pair: AccessTokenPair { token, secret },
            status_text: text.to_string(),
            image,
        })
        .await
        .context("Session worker is gone")?;

    match handle.outcomes.recv().await {
        Some(Outcome::PostStatusComplete(result)) => {
            println!("✓ Posted (id {})", result.id);
        }
        Some(Outcome::PostStatusError(e)) => bail!("Post failed: {e}"),
        other => bail!("Unexpected session outcome: {other:?}"),
    }

    let _ = handle.commands.send(SessionCommand::Quit).await;
    Ok(())
}

/// Read and validate an attachment; rejection blocks the post entirely
fn load_attachment(path: &str) -> Result<ImageAttachment> {
    let image = ImageAttachment::from_path(std::path::Path::new(path))?;
    image.validate()?;
    Ok(image)
}

fn read_line() -> Result<String> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
