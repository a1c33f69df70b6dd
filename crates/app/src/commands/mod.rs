//! Shell commands - user input to service calls
//!
//! Each line typed at the prompt parses into a [`Command`]; [`execute`]
//! dispatches it to the handler module for its area. Service failures are
//! already reported through the notifier, so handlers only print results.

mod ai;
mod data;
mod settings;
mod tasks;
mod window;

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use trak_domain::{Result, SettingKey, TaskId, TrakError};

use crate::console::Console;
use crate::context::AppContext;

pub const HELP: &str = "\
Tasks
  start <title> [-- <description>]   start tracking a new task
  switch <title> [-- <description>]  stop the current task and start another
  break                              stop the current task and take a break
  stop                               stop the current task
  pause | resume                     pause or resume the timer
  status                             show the timer
  watch                              live timer until Enter is pressed
  today                              list today's tasks
  stats                              today and all-time totals
  rename <id> <title>                change a task's title
  describe <id> <text>               change a task's description
  category <id> [name]               set a category, or suggest one with AI
  retitle <id>                       new AI title from the task's description
  delete <id>...                     delete tasks
  refresh                            reload tasks and stats
Settings
  settings                           show all settings
  get <key> | set <key> <value>      read or change one setting
AI
  summary                            summarize today's completed tasks
  chat <message>                     ask the assistant
  ai-status                          check the Ollama connection
Data
  export [path]                      write all tasks and settings as JSON
  import <path>                      recreate tasks from an export file
  clear --yes                        delete every task
Window
  minimize | maximize | close | quit";

/// A parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start { title: String, description: Option<String> },
    Switch { title: String, description: Option<String> },
    Break,
    Stop,
    Pause,
    Resume,
    Status,
    Watch,
    Today,
    Stats,
    Rename { id: TaskId, title: String },
    Describe { id: TaskId, description: String },
    Categorize { id: TaskId, category: Option<String> },
    Retitle { id: TaskId },
    Delete { ids: Vec<TaskId> },
    Refresh,
    Settings,
    Get { key: SettingKey },
    Set { key: SettingKey, value: String },
    Summary,
    Chat { message: String },
    AiStatus,
    Export { path: Option<PathBuf> },
    Import { path: PathBuf },
    Clear { confirmed: bool },
    Minimize,
    Maximize,
    Close,
    Quit,
    Help,
}

fn usage(text: &str) -> TrakError {
    TrakError::Validation(format!("usage: {text}"))
}

fn parse_id(raw: &str) -> Result<TaskId> {
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| TrakError::Validation(format!("'{raw}' is not a task id")))
}

fn split_first(text: &str) -> (&str, &str) {
    match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    }
}

/// `title -- description`
fn title_and_description(rest: &str) -> (String, Option<String>) {
    let padded = format!(" {rest}");
    match padded.split_once(" -- ") {
        Some((title, description)) => {
            let description = description.trim();
            (title.trim().to_string(), (!description.is_empty()).then(|| description.to_string()))
        }
        None => (rest.trim().to_string(), None),
    }
}

fn parse_key(raw: &str) -> Result<SettingKey> {
    raw.parse::<SettingKey>().map_err(|_| {
        let known: Vec<&str> = SettingKey::ALL.iter().map(SettingKey::as_str).collect();
        TrakError::Validation(format!("unknown setting '{raw}', expected one of {}", known.join(", ")))
    })
}

impl FromStr for Command {
    type Err = TrakError;

    fn from_str(line: &str) -> Result<Self> {
        let (name, rest) = split_first(line.trim());

        let command = match name.to_ascii_lowercase().as_str() {
            "start" | "switch" => {
                let (title, description) = title_and_description(rest);
                if title.is_empty() {
                    return Err(usage(&format!("{name} <title> [-- <description>]")));
                }
                if name.eq_ignore_ascii_case("start") {
                    Self::Start { title, description }
                } else {
                    Self::Switch { title, description }
                }
            }
            "break" => Self::Break,
            "stop" => Self::Stop,
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "status" => Self::Status,
            "watch" => Self::Watch,
            "today" | "list" | "ls" => Self::Today,
            "stats" => Self::Stats,
            "rename" => {
                let (id, title) = split_first(rest);
                if id.is_empty() || title.is_empty() {
                    return Err(usage("rename <id> <title>"));
                }
                Self::Rename { id: parse_id(id)?, title: title.to_string() }
            }
            "describe" => {
                let (id, description) = split_first(rest);
                if id.is_empty() || description.is_empty() {
                    return Err(usage("describe <id> <text>"));
                }
                Self::Describe { id: parse_id(id)?, description: description.to_string() }
            }
            "category" => {
                let (id, category) = split_first(rest);
                if id.is_empty() {
                    return Err(usage("category <id> [name]"));
                }
                let category = (!category.is_empty()).then(|| category.to_string());
                Self::Categorize { id: parse_id(id)?, category }
            }
            "retitle" => {
                if rest.is_empty() {
                    return Err(usage("retitle <id>"));
                }
                Self::Retitle { id: parse_id(rest)? }
            }
            "delete" | "rm" => {
                let ids = rest.split_whitespace().map(parse_id).collect::<Result<Vec<_>>>()?;
                if ids.is_empty() {
                    return Err(usage("delete <id>..."));
                }
                Self::Delete { ids }
            }
            "refresh" => Self::Refresh,
            "settings" => Self::Settings,
            "get" => {
                if rest.is_empty() {
                    return Err(usage("get <key>"));
                }
                Self::Get { key: parse_key(rest)? }
            }
            "set" => {
                let (key, value) = split_first(rest);
                if key.is_empty() || value.is_empty() {
                    return Err(usage("set <key> <value>"));
                }
                Self::Set { key: parse_key(key)?, value: value.to_string() }
            }
            "summary" => Self::Summary,
            "chat" | "ask" => {
                if rest.is_empty() {
                    return Err(usage("chat <message>"));
                }
                Self::Chat { message: rest.to_string() }
            }
            "ai-status" => Self::AiStatus,
            "export" => Self::Export { path: (!rest.is_empty()).then(|| PathBuf::from(rest)) },
            "import" => {
                if rest.is_empty() {
                    return Err(usage("import <path>"));
                }
                Self::Import { path: PathBuf::from(rest) }
            }
            "clear" => Self::Clear { confirmed: rest == "--yes" },
            "minimize" => Self::Minimize,
            "maximize" => Self::Maximize,
            "close" => Self::Close,
            "quit" | "exit" => Self::Quit,
            "help" | "?" => Self::Help,
            other => {
                return Err(TrakError::Validation(format!(
                    "unknown command '{other}', type 'help' for a list"
                )));
            }
        };
        Ok(command)
    }
}

impl Command {
    /// Commands that depend on the in-process timer
    ///
    /// The timer only lives as long as the process, so these cannot run as a
    /// single command line.
    pub fn needs_session(&self) -> bool {
        matches!(
            self,
            Self::Start { .. }
                | Self::Switch { .. }
                | Self::Break
                | Self::Stop
                | Self::Pause
                | Self::Resume
                | Self::Watch
        )
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Switch { .. } => "switch",
            Self::Break => "break",
            Self::Stop => "stop",
            Self::Pause => "pause",
            Self::Resume => "resume",
            Self::Watch => "watch",
            _ => "this command",
        }
    }
}

/// Run a single command line outside the interactive shell
///
/// Timer commands are rejected with a `Validation` error before anything is
/// sent to the backend.
pub async fn run_once(ctx: &Arc<AppContext>, console: &Console, line: &str) -> Result<()> {
    let command: Command = line.parse()?;
    if command.needs_session() {
        return Err(TrakError::Validation(format!(
            "'{}' needs the interactive shell, the timer only lives for one session",
            command.name()
        )));
    }
    execute(ctx, console, command).await
}

/// Run one command against the context
///
/// `watch` and `quit` drive the input loop and are handled by the shell.
pub async fn execute(ctx: &Arc<AppContext>, console: &Console, command: Command) -> Result<()> {
    match command {
        Command::Start { title, description } => {
            tasks::start(ctx, console, &title, description).await
        }
        Command::Switch { title, description } => {
            tasks::switch(ctx, console, &title, description).await
        }
        Command::Break => tasks::take_break(ctx, console).await,
        Command::Stop => tasks::stop(ctx, console).await,
        Command::Pause => {
            tasks::pause(ctx, console);
            Ok(())
        }
        Command::Resume => {
            tasks::resume(ctx, console);
            Ok(())
        }
        Command::Status => {
            tasks::status(ctx, console);
            Ok(())
        }
        Command::Today => {
            tasks::today(ctx, console);
            Ok(())
        }
        Command::Stats => {
            tasks::stats(ctx, console);
            Ok(())
        }
        Command::Rename { id, title } => tasks::rename(ctx, console, id, title).await,
        Command::Describe { id, description } => {
            tasks::describe(ctx, console, id, description).await
        }
        Command::Categorize { id, category } => ai::categorize(ctx, console, id, category).await,
        Command::Retitle { id } => ai::retitle(ctx, console, id).await,
        Command::Delete { ids } => tasks::delete(ctx, console, &ids).await,
        Command::Refresh => {
            ctx.lifecycle.refresh().await;
            tasks::today(ctx, console);
            Ok(())
        }
        Command::Settings => {
            settings::show(ctx, console);
            Ok(())
        }
        Command::Get { key } => settings::get(ctx, console, key).await,
        Command::Set { key, value } => settings::set(ctx, console, key, &value).await,
        Command::Summary => ai::summary(ctx, console).await,
        Command::Chat { message } => ai::chat(ctx, console, &message).await,
        Command::AiStatus => ai::status(ctx, console).await,
        Command::Export { path } => data::export(ctx, console, path).await,
        Command::Import { path } => data::import(ctx, console, &path).await,
        Command::Clear { confirmed } => data::clear(ctx, console, confirmed).await,
        Command::Minimize => {
            ctx.window.minimize();
            Ok(())
        }
        Command::Maximize => {
            ctx.window.maximize();
            Ok(())
        }
        Command::Close => {
            window::close(ctx, console);
            Ok(())
        }
        Command::Help => {
            console.line(HELP);
            Ok(())
        }
        Command::Watch | Command::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn start_splits_title_and_description() {
        assert_eq!(
            parse("start Write report -- Q2 numbers for finance"),
            Command::Start {
                title: "Write report".into(),
                description: Some("Q2 numbers for finance".into())
            }
        );
        assert_eq!(
            parse("  START   fix login  "),
            Command::Start { title: "fix login".into(), description: None }
        );
    }

    #[test]
    fn start_requires_a_title() {
        assert!(matches!("start".parse::<Command>(), Err(TrakError::Validation(_))));
        assert!(matches!("start -- only text".parse::<Command>(), Err(TrakError::Validation(_))));
    }

    #[test]
    fn ids_accept_hash_prefix() {
        assert_eq!(parse("delete #4 5"), Command::Delete { ids: vec![4, 5] });
        assert_eq!(
            parse("rename 3 Better title"),
            Command::Rename { id: 3, title: "Better title".into() }
        );
        assert!("delete four".parse::<Command>().is_err());
    }

    #[test]
    fn settings_keys_are_checked() {
        assert_eq!(
            parse("set use_ai on"),
            Command::Set { key: SettingKey::UseAi, value: "on".into() }
        );
        let err = "set theme dark".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("use_ai"));
    }

    #[test]
    fn category_name_is_optional() {
        assert_eq!(parse("category 2"), Command::Categorize { id: 2, category: None });
        assert_eq!(
            parse("category 2 Deep work"),
            Command::Categorize { id: 2, category: Some("Deep work".into()) }
        );
    }

    #[test]
    fn retitle_takes_one_id() {
        assert_eq!(parse("retitle #7"), Command::Retitle { id: 7 });
        assert!(matches!("retitle".parse::<Command>(), Err(TrakError::Validation(_))));
        assert!("retitle 7 extra".parse::<Command>().is_err());
    }

    #[test]
    fn timer_commands_need_a_session() {
        for line in ["start Plan", "switch Code", "break", "stop", "pause", "resume", "watch"] {
            assert!(parse(line).needs_session(), "{line}");
        }
        for line in ["status", "today", "stats", "rename 1 x", "retitle 1", "delete 1", "export"] {
            assert!(!parse(line).needs_session(), "{line}");
        }
    }

    #[test]
    fn clear_needs_confirmation_flag() {
        assert_eq!(parse("clear"), Command::Clear { confirmed: false });
        assert_eq!(parse("clear --yes"), Command::Clear { confirmed: true });
    }

    #[test]
    fn unknown_command_points_to_help() {
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.to_string().contains("help"));
    }
}
