//! services/portal/src/bin/portal.rs
//!
//! Line-oriented terminal front-end for the student portal.

use std::path::Path;
use std::sync::Arc;

use chrono::{Datelike, Local};
use portal_core::catalog::Catalog;
use portal_core::domain::View;
use portal_core::gate::LoginMode;
use portal_core::ports::ChatCompletionService;
use portal_core::profile::ProfileField;
use portal_core::session::{KeyInput, UiEvent};
use portal_lib::{
    adapters::OpenAiChatAdapter,
    config::Config,
    error::PortalError,
    events::PortalEvent,
    views::{render, render_notifications, render_spotlight, ViewContext},
    Portal,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HELP: &str = "\
Commands:
  login <email> <roll-no>      sign in
  activate <email> <roll-no>   activate a new account
  logout
  go <view>                    dashboard, attendance, timetable, courses, exams,
                               fees, assignments, profile, ai
  view                         show the current view again
  search <text>                open the spotlight with a query
  open <n> | open s<n>         pick a search result or a shortcut
  key <chord>                  ctrl+k opens the spotlight, esc closes it
  notifications | read-all | clear
  chat <message>               ask the NCU Assistant
  edit [<field> <value>]       fields: name, email, phone, dob, avatar
  avatar <url|image file>
  save | cancel
  help | quit";

#[tokio::main]
async fn main() -> Result<(), PortalError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    info!("Configuration loaded. Starting portal...");

    // --- 2. Initialize the AI Adapter ---
    let chat_service: Option<Arc<dyn ChatCompletionService>> =
        match OpenAiChatAdapter::from_config(&config) {
            Some(adapter) => {
                info!(model = %config.chat_model, "AI helper enabled.");
                Some(Arc::new(adapter))
            }
            None => {
                warn!("No GEMINI_API_KEY set; the AI helper will report itself unavailable.");
                None
            }
        };

    // --- 3. Build the Portal ---
    let catalog = Arc::new(Catalog::ncu());
    let (mut portal, mut events) = Portal::new(config, catalog, chat_service);

    // --- 4. Run the Command Loop ---
    println!("NCU Portal - Student Login");
    println!("Type `help` for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(&mut portal, line.trim()).await {
                    break;
                }
            }
            Some(event) = events.recv() => print_event(&event),
        }
    }

    portal.logout();
    info!("Portal closed.");
    Ok(())
}

/// Runs one command. Returns `false` when the user asked to quit.
async fn handle_command(portal: &mut Portal, line: &str) -> bool {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "help" => println!("{HELP}"),
        "quit" | "exit" => return false,
        "login" | "activate" => {
            let wanted = if command == "login" { LoginMode::SignIn } else { LoginMode::Activate };
            if portal.login_mode() != wanted {
                portal.toggle_login_mode();
            }
            let (email, password) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            println!("Verifying...");
            match portal.login(email.trim(), password).await {
                Ok(()) => show(portal),
                Err(_) => println!("{}", portal.login_error().unwrap_or("Login failed.")),
            }
        }
        _ if !portal.is_authenticated() => println!("Please sign in first (`login <email> <roll-no>`)."),
        "logout" => {
            portal.logout();
            println!("Signed out.");
        }
        "go" => match View::from_name(rest) {
            Some(view) => {
                portal.navigate(view);
                show(portal);
            }
            None => println!("Unknown view `{rest}`."),
        },
        "view" => show(portal),
        "search" => {
            portal.dispatch(UiEvent::OpenSpotlight);
            portal.dispatch(UiEvent::QueryChanged(rest.to_string()));
            show_spotlight(portal);
        }
        "open" => {
            let picked = match rest.strip_prefix('s') {
                Some(n) => n.parse::<usize>().ok().and_then(|n| portal.select_shortcut(n.checked_sub(1)?)),
                None => rest.parse::<usize>().ok().and_then(|n| portal.select_result(n.checked_sub(1)?)),
            };
            match picked {
                Some(_) => show(portal),
                None => println!("Nothing to open at `{rest}`."),
            }
        }
        "key" => match KeyInput::parse(rest) {
            Some(input) => {
                if portal.key(input) {
                    if portal.state().spotlight.open {
                        show_spotlight(portal);
                    } else {
                        println!("Spotlight closed.");
                    }
                }
            }
            None => println!("Unknown key chord `{rest}`."),
        },
        "notifications" => print!("{}", render_notifications(&portal.notifications().await)),
        "read-all" => {
            portal.mark_all_read().await;
            println!("All notifications marked as read.");
        }
        "clear" => {
            portal.clear_notifications().await;
            println!("Notifications cleared.");
        }
        "chat" => {
            if portal.state().view != View::AiHelp {
                portal.navigate(View::AiHelp);
            }
            if let Some(reply) = portal.send_chat(rest).await {
                println!("NCU Assistant: {reply}");
            }
        }
        "edit" => {
            if portal.state().profile_edit.is_none() {
                portal.dispatch(UiEvent::BeginProfileEdit);
            }
            if !rest.is_empty() {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                match ProfileField::from_name(field) {
                    Some(field) => portal.dispatch(UiEvent::EditProfile(field, value.trim().to_string())),
                    None => println!("Unknown profile field `{field}`."),
                }
            }
            show(portal);
        }
        "avatar" => {
            let is_link = ["http://", "https://", "data:"].iter().any(|p| rest.starts_with(p));
            if is_link {
                if portal.state().profile_edit.is_none() {
                    portal.dispatch(UiEvent::BeginProfileEdit);
                }
                portal.dispatch(UiEvent::EditProfile(ProfileField::Avatar, rest.to_string()));
                show(portal);
            } else if let Err(e) = portal.set_avatar_from_file(Path::new(rest)).await {
                println!("Could not use that image: {e}");
            } else {
                show(portal);
            }
        }
        "save" => {
            portal.dispatch(UiEvent::SaveProfile);
            show(portal);
        }
        "cancel" => {
            portal.dispatch(UiEvent::CancelProfileEdit);
            show(portal);
        }
        other => println!("Unknown command `{other}`. Type `help`."),
    }
    true
}

fn show(portal: &Portal) {
    let state = portal.state();
    let ctx = ViewContext {
        catalog: portal.catalog(),
        student: &state.student,
        chat: portal.chat_history(),
        chat_pending: portal.is_chat_pending(),
        profile_edit: state.profile_edit.as_ref(),
        today: Local::now().weekday(),
    };
    print!("{}", render(state.view, &ctx));
}

fn show_spotlight(portal: &Portal) {
    print!(
        "{}",
        render_spotlight(&portal.state().spotlight.query, &portal.search_results())
    );
}

fn print_event(event: &PortalEvent) {
    match event {
        PortalEvent::NotificationArrived { title, message, .. } => {
            println!("\n[notification] {title}: {message}");
        }
        PortalEvent::LoginSucceeded { student_id } => println!("Signed in as {student_id}."),
        // Already reported inline by the command that caused them.
        PortalEvent::LoginFailed { .. } | PortalEvent::LoggedOut | PortalEvent::ChatReplied { .. } => {}
    }
}
