//! Terminal front-end — stdin/stdout REPL over the session controller.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::Backend;
use crate::contact::ContactForm;
use crate::error::{Error, LocationError, SessionError};
use crate::location::LOCATION_UNAVAILABLE_MESSAGE;
use crate::model::{AgeBracket, ServiceCategory};
use crate::session::{SessionController, SessionPhase};
use crate::view::{
    ResultsView, Route, render_age_menu, render_category_menu, render_message, render_nav,
    render_transcript,
};

pub const HELP: &str = "\
Commands:
  /age <bracket>      verify age (0-3, 4-9, 10-12, 13-17, 18+ or 1-5)
  /locate             use this device's location
  /search <place>     search for a place by name
  /pick <n>           choose a search result
  /change             change location
  /categories         list service categories
  /category <n|NAME>  search nearby services in a category
  /results            show the latest results
  /contact            send us a message
  /nav <route>        go to home, discover, chat, about, or contact
  /help               show this help
  /quit               exit
Anything else is sent to the assistant.";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Age(Option<AgeBracket>),
    Locate,
    SearchPlace(String),
    Pick(Option<usize>),
    ChangeLocation,
    Categories,
    Category(Option<ServiceCategory>),
    Results,
    Contact,
    Navigate(Option<Route>),
    Help,
    Quit,
    Chat(String),
    Unknown(String),
}

pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(Command::Chat(line.to_string()));
    };
    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let cmd = match name.to_ascii_lowercase().as_str() {
        "age" => Command::Age(AgeBracket::parse(arg)),
        "locate" | "gps" => Command::Locate,
        "search" => Command::SearchPlace(arg.to_string()),
        "pick" => Command::Pick(arg.parse::<usize>().ok().and_then(|n| n.checked_sub(1))),
        "change" => Command::ChangeLocation,
        "categories" => Command::Categories,
        "category" | "cat" => Command::Category(ServiceCategory::parse(arg)),
        "results" => Command::Results,
        "contact" => Command::Contact,
        "nav" | "go" => Command::Navigate(Route::parse(arg)),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    };
    Some(cmd)
}

type Lines = BoxStream<'static, String>;

/// Stream of trimmed stdin lines, ending at EOF.
fn stdin_lines() -> Lines {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line.trim().to_string()).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    break;
                }
            }
        }
    });
    stream::unfold(rx, |mut rx| async move { rx.recv().await.map(|line| (line, rx)) }).boxed()
}

pub struct Cli {
    controller: SessionController,
    backend: Arc<dyn Backend>,
    route: Route,
    ansi: bool,
}

impl Cli {
    pub fn new(controller: SessionController, backend: Arc<dyn Backend>) -> Self {
        Self {
            controller,
            backend,
            route: Route::Home,
            ansi: true,
        }
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Run until `/quit` or EOF.
    pub async fn run(mut self) {
        let mut lines = stdin_lines();
        println!("{}\n", render_nav(self.route));
        println!("{}\n", render_age_menu(None));
        eprint!("> ");

        while let Some(line) = lines.next().await {
            let Some(command) = parse_command(&line) else {
                eprint!("> ");
                continue;
            };
            if command == Command::Quit {
                break;
            }
            let output = if command == Command::Contact {
                self.contact_dialog(&mut lines).await
            } else {
                self.handle(command).await
            };
            if !output.is_empty() {
                println!("\n{output}\n");
            }
            eprint!("> ");
        }
    }

    /// Execute one command and return what to print.
    pub async fn handle(&mut self, command: Command) -> String {
        match command {
            Command::Age(None) => format!("Unknown age bracket.\n{}", render_age_menu(None)),
            Command::Age(Some(bracket)) => {
                let info = self.controller.verify_age(bracket).await;
                tracing::debug!(age = info.age, category = %info.age_category, "Age verified");
                "Set Your Location: /locate to use this device, or /search <place>.".to_string()
            }
            Command::Locate => {
                let first = self.awaiting_location().await;
                match self.controller.locate_with_device().await {
                    Ok(Some(location)) => self.after_location(&location.describe(), first).await,
                    Ok(None) => String::new(),
                    Err(Error::Location(LocationError::PermissionDenied))
                    | Err(Error::Location(LocationError::Unavailable(_))) => {
                        LOCATION_UNAVAILABLE_MESSAGE.to_string()
                    }
                    Err(e) => self.describe_error(e),
                }
            }
            Command::SearchPlace(query) => match self.controller.search_places(&query).await {
                Ok(predictions) if predictions.is_empty() => "No matching places.".to_string(),
                Ok(predictions) => predictions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| format!("{}. {}", i + 1, p.description))
                    .chain(std::iter::once("Choose one with /pick <n>.".to_string()))
                    .collect::<Vec<_>>()
                    .join("\n"),
                Err(e) => self.describe_error(e),
            },
            Command::Pick(None) => "Usage: /pick <n>".to_string(),
            Command::Pick(Some(index)) => {
                let first = self.awaiting_location().await;
                match self.controller.choose_place(index).await {
                    Ok(Some(location)) => self.after_location(&location.describe(), first).await,
                    Ok(None) => String::new(),
                    Err(e) => self.describe_error(e),
                }
            }
            Command::ChangeLocation => {
                self.controller.change_location().await;
                "Location cleared. Step 1: Select Your Location (/locate or /search <place>)."
                    .to_string()
            }
            Command::Categories => {
                let session = self.controller.session();
                let selected = session.read().await.category();
                render_category_menu(selected)
            }
            Command::Category(None) => {
                format!("Unknown category.\n{}", render_category_menu(None))
            }
            Command::Category(Some(category)) => {
                self.route = Route::Discover;
                match self.controller.select_category(category).await {
                    Ok(true) => self.results().await,
                    Ok(false) => {
                        let session = self.controller.session();
                        if session.read().await.location().is_none() {
                            format!("{} selected. Set a location first.", category.label())
                        } else {
                            String::new()
                        }
                    }
                    Err(e) => self.describe_error(e),
                }
            }
            Command::Results => self.results().await,
            Command::Navigate(None) => "Unknown route.".to_string(),
            Command::Navigate(Some(route)) => {
                self.route = route;
                self.show_route().await
            }
            Command::Help => HELP.to_string(),
            Command::Chat(text) => {
                self.route = Route::Chat;
                match self.controller.send_message(&text).await {
                    Ok(true) => self.latest_reply().await,
                    Ok(false) => String::new(),
                    Err(e) => self.describe_error(e),
                }
            }
            Command::Unknown(name) => format!("Unknown command /{name}. Type /help."),
            Command::Contact | Command::Quit => String::new(),
        }
    }

    async fn awaiting_location(&self) -> bool {
        let session = self.controller.session();
        let phase = session.read().await.phase();
        phase == SessionPhase::AwaitingLocation
    }

    /// `first` is whether this location readied the session, which is the
    /// only time the welcome is seeded.
    async fn after_location(&self, place: &str, first: bool) -> String {
        if !first {
            return format!("Location set: {place}");
        }
        let session = self.controller.session();
        let session = session.read().await;
        let greeting = session
            .transcript()
            .messages()
            .first()
            .map(|m| format!("\n\n{}", render_message(m, self.ansi)))
            .unwrap_or_default();
        format!("Location set: {place}{greeting}")
    }

    async fn results(&self) -> String {
        let session = self.controller.session();
        let session = session.read().await;
        let view = ResultsView::from_state(session.discovery());
        match view {
            ResultsView::Hidden => "No search yet. Pick a category with /category.".to_string(),
            _ => view.render(session.hide_location()),
        }
    }

    async fn latest_reply(&self) -> String {
        let session = self.controller.session();
        let session = session.read().await;
        if let Some(error) = session.chat_error() {
            return format!("! {error}");
        }
        session
            .transcript()
            .last()
            .map(|m| render_message(m, self.ansi))
            .unwrap_or_default()
    }

    async fn show_route(&self) -> String {
        let nav = render_nav(self.route);
        let body = match self.route {
            Route::Home => "Find food, shelter, medical, and community support near you.".to_string(),
            Route::About => {
                "ConnectCare connects people with nearby support services.".to_string()
            }
            Route::Contact => "Type /contact to send us a message.".to_string(),
            Route::Discover => {
                let session = self.controller.session();
                let session = session.read().await;
                let location = match session.location() {
                    Some(loc) => format!("Location set: {}", loc.label()),
                    None => "Step 1: Select Your Location".to_string(),
                };
                format!("{location}\n\n{}", render_category_menu(session.category()))
            }
            Route::Chat => {
                let session = self.controller.session();
                let session = session.read().await;
                match session.phase() {
                    SessionPhase::AwaitingAge => render_age_menu(None),
                    SessionPhase::AwaitingLocation => {
                        "Set Your Location: /locate or /search <place>.".to_string()
                    }
                    SessionPhase::Ready => render_transcript(
                        session.transcript().messages(),
                        session.chat_pending(),
                        session.chat_error(),
                        self.ansi,
                    ),
                }
            }
        };
        format!("{nav}\n\n{body}")
    }

    fn describe_error(&self, err: Error) -> String {
        tracing::debug!(error = %err, "Command failed");
        match err {
            Error::Session(SessionError::AgeMissing | SessionError::WrongPhase { .. }) => {
                format!("Before We Start\n{}", render_age_menu(None))
            }
            Error::Session(SessionError::LocationMissing) => {
                "Set Your Location: /locate or /search <place>.".to_string()
            }
            Error::Session(SessionError::CategoryMissing) => render_category_menu(None),
            Error::Session(SessionError::EmptyMessage) => String::new(),
            Error::Session(SessionError::NoSuchPrediction(i)) => {
                format!("No search result #{}.", i + 1)
            }
            Error::Location(LocationError::Lookup(crate::error::ApiError::PlacesUnavailable)) => {
                "Place search is not available. Use /locate instead.".to_string()
            }
            Error::Location(_) => "Unable to find that place. Please try another search.".to_string(),
            other => format!("! {other}"),
        }
    }

    async fn contact_dialog(&mut self, lines: &mut Lines) -> String {
        self.route = Route::Contact;
        let mut form = ContactForm::default();
        for (label, field) in [
            ("Name", &mut form.name),
            ("Email", &mut form.email),
            ("Subject", &mut form.subject),
            ("Message", &mut form.message),
        ] {
            eprint!("{label}: ");
            match lines.next().await {
                Some(line) => *field = line,
                None => return String::new(),
            }
        }
        form.submit(&*self.backend).await.message().to_string()
    }
}
