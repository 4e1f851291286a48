//! Line commands understood by the shell.

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

use mengya_nav::{Host, MemoryHost, NavEvent, Session, page_config};
use mengya_types::input::KeyEvent;
use mengya_ui::{Notifier, Severity};

pub const HELP: &str = "\
commands:
  go <page>              navigate to a page
  back                   go back (or home)
  key <combo>            press a key, e.g. alt+left
  pop <page>             simulate browser back/forward to <page>
  scroll <y>             scroll the current page
  tick [ms]              advance time (default: until idle)
  reload                 reload the current document
  where                  show the current page
  history                show the navigation history
  pages                  list navigable pages
  set <path> <json>      write a value
  get <path>             read a value
  local <key>            read a raw persisted entry
  sync                   write memory back and sweep expired entries
  clean                  sweep expired entries
  toast <level> <text>   show a toast
  toasts                 list visible toasts
  vibrate [ms ...]       run a vibration pattern (default 50)
  help                   show this text
  quit                   flush and exit";

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Go(String),
    Back,
    Key(KeyEvent),
    Pop(String),
    Scroll(i32),
    Tick(Option<u32>),
    Reload,
    Where,
    History,
    Pages,
    Set(String, Value),
    Get(String),
    Local(String),
    Sync,
    Clean,
    Toast(Severity, String),
    Toasts,
    Vibrate(Option<Vec<u32>>),
    Help,
    Quit,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let arg = |what: &str| -> Result<String> {
        if rest.is_empty() {
            bail!("{name}: missing {what}");
        }
        Ok(rest.to_string())
    };

    let cmd = match name {
        "go" => Command::Go(arg("page")?),
        "back" => Command::Back,
        "key" => {
            let combo = arg("key combination")?;
            let event =
                KeyEvent::parse(&combo).ok_or_else(|| anyhow!("key: unknown key {combo:?}"))?;
            Command::Key(event)
        },
        "pop" => Command::Pop(arg("page")?),
        "scroll" => Command::Scroll(
            arg("offset")?
                .parse()
                .context("scroll: offset must be an integer")?,
        ),
        "tick" if rest.is_empty() => Command::Tick(None),
        "tick" => Command::Tick(Some(
            rest.parse()
                .context("tick: duration must be a whole number of ms")?,
        )),
        "reload" => Command::Reload,
        "where" => Command::Where,
        "history" => Command::History,
        "pages" => Command::Pages,
        "set" => {
            let (path, json) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("set: usage is set <path> <json>"))?;
            let value = serde_json::from_str(json.trim()).context("set: value is not JSON")?;
            Command::Set(path.to_string(), value)
        },
        "get" => Command::Get(arg("path")?),
        "local" => Command::Local(arg("key")?),
        "sync" => Command::Sync,
        "clean" => Command::Clean,
        "toast" => {
            let (level, text) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| anyhow!("toast: usage is toast <level> <text>"))?;
            Command::Toast(Severity::from_name(level), text.trim().to_string())
        },
        "toasts" => Command::Toasts,
        "vibrate" if rest.is_empty() => Command::Vibrate(None),
        "vibrate" => Command::Vibrate(Some(
            rest.split_whitespace()
                .map(str::parse::<u32>)
                .collect::<std::result::Result<Vec<_>, _>>()
                .context("vibrate: pattern must be whole numbers of ms")?,
        )),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command: {other} (try 'help')"),
    };
    Ok(Some(cmd))
}

/// Result of running a command.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Lines(Vec<String>),
    Quit,
}

/// Run `cmd` against `session`.
pub fn execute(cmd: Command, session: &mut Session<MemoryHost>) -> Result<Outcome> {
    let mut out = Vec::new();
    match cmd {
        Command::Go(page) => {
            let ticket = session.navigate(&page)?;
            out.push(format!("navigating to {} ({})", ticket.page, ticket.target));
        },
        Command::Back => {
            let ticket = session.back()?;
            out.push(format!("going back to {}", ticket.page));
        },
        Command::Key(event) => {
            let outcome = session.handle_event(&NavEvent::Key(event));
            if outcome.handled {
                out.push("handled".to_string());
            }
        },
        Command::Pop(page) => {
            session.handle_event(&NavEvent::PopState { page: Some(page) });
        },
        Command::Scroll(y) => {
            session.host_mut().scroll_to(y);
            out.push(format!("scrollY = {}", session.host().scroll_y()));
        },
        Command::Tick(Some(ms)) => {
            let ran = session.tick(ms);
            out.push(format!("{ran} task(s) ran"));
        },
        Command::Tick(None) => {
            let waited = session.settle();
            out.push(format!("idle after {waited}ms"));
        },
        Command::Reload => {
            let report = session.reload();
            out.push(format!(
                "reloaded {} ({} written, {} expired)",
                session.current_page(),
                report.written,
                report.expired
            ));
        },
        Command::Where => {
            let page = session.current_page();
            let cfg = page_config(&page);
            out.push(format!(
                "{page} \"{}\" scrollY={}",
                cfg.title,
                session.host().scroll_y()
            ));
        },
        Command::History => {
            let entries = session.nav().history().to_vec();
            if entries.is_empty() {
                out.push("(empty)".to_string());
            }
            for (i, page) in entries.iter().enumerate() {
                out.push(format!("{i:>2}  {page}"));
            }
        },
        Command::Pages => {
            out.extend(session.nav().pages().ids().map(str::to_string));
        },
        Command::Set(path, value) => {
            if session.store_mut().set_data(&path, &value) {
                out.push(format!("{path} = {value}"));
            } else {
                bail!("failed to write {path}");
            }
        },
        Command::Get(path) => match session.store_mut().get_data(&path) {
            Some(value) => out.push(serde_json::to_string_pretty(&value)?),
            None => out.push("(none)".to_string()),
        },
        Command::Local(key) => match session.store().get_local(&key) {
            Some(value) => out.push(value.to_string()),
            None => out.push("(none)".to_string()),
        },
        Command::Sync => {
            let report = session.store_mut().sync_data();
            out.push(format!(
                "{} written, {} expired",
                report.written, report.expired
            ));
        },
        Command::Clean => {
            let removed = session.store_mut().clean_expired_data();
            out.push(format!("{removed} expired"));
        },
        Command::Toast(severity, text) => {
            let duration = session.config().toast_duration_ms;
            session.toasts_mut().notify(&text, severity, duration);
        },
        Command::Toasts => {
            for toast in session.toasts().toasts() {
                out.push(format!(
                    "[{}] {} ({}ms)",
                    toast.severity, toast.message, toast.duration_ms
                ));
            }
        },
        Command::Vibrate(pattern) => {
            session.vibrate(pattern.as_deref());
            if let Some(last) = session.host().vibrations.last() {
                out.push(format!("vibrate {last:?}"));
            }
        },
        Command::Help => out.push(HELP.to_string()),
        Command::Quit => return Ok(Outcome::Quit),
    }
    Ok(Outcome::Lines(out))
}

/// Move alerts the host has shown since the last call into error toasts and
/// return them for display.
pub fn drain_alerts(session: &mut Session<MemoryHost>) -> Vec<String> {
    let alerts = std::mem::take(&mut session.host_mut().alerts);
    for alert in &alerts {
        session.toasts_mut().error(alert, None);
    }
    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use mengya_store::MemoryStorage;
    use mengya_types::clock::ManualClock;
    use mengya_types::config::MengyaConfig;
    use mengya_types::input::{Key, Modifiers};
    use serde_json::json;

    fn session() -> Session<MemoryHost> {
        let mut session = Session::new(
            MengyaConfig::default(),
            MemoryHost::new("/home.html"),
            Box::new(MemoryStorage::new()),
            Box::new(ManualClock::at_ms(1_700_000_000_000)),
        );
        session.page_ready();
        session
    }

    fn run(session: &mut Session<MemoryHost>, line: &str) -> Vec<String> {
        let cmd = parse(line).unwrap().unwrap();
        match execute(cmd, session).unwrap() {
            Outcome::Lines(lines) => lines,
            Outcome::Quit => panic!("unexpected quit"),
        }
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse("go profile").unwrap(), Some(Command::Go("profile".into())));
        assert_eq!(
            parse("key alt+left").unwrap(),
            Some(Command::Key(KeyEvent::new(Key::ArrowLeft, Modifiers::ALT)))
        );
        assert_eq!(
            parse("set child.profile.level 3").unwrap(),
            Some(Command::Set("child.profile.level".into(), json!(3)))
        );
        assert_eq!(
            parse("toast success Saved it").unwrap(),
            Some(Command::Toast(Severity::Success, "Saved it".into()))
        );
        assert_eq!(parse("tick").unwrap(), Some(Command::Tick(None)));
        assert_eq!(parse("tick 50").unwrap(), Some(Command::Tick(Some(50))));
        assert_eq!(parse("vibrate").unwrap(), Some(Command::Vibrate(None)));
        assert_eq!(
            parse("vibrate 100 30 100").unwrap(),
            Some(Command::Vibrate(Some(vec![100, 30, 100])))
        );
        assert_eq!(parse("  # comment").unwrap(), None);
        assert_eq!(parse("").unwrap(), None);
    }

    #[test]
    fn parse_errors() {
        assert!(parse("go").is_err());
        assert!(parse("tick soon").is_err());
        assert!(parse("key hyper+q+z").is_err());
        assert!(parse("set a.b {oops").is_err());
        assert!(parse("fly home").is_err());
        assert!(parse("vibrate long").is_err());
    }

    #[test]
    fn navigate_and_go_back() {
        let mut s = session();
        run(&mut s, "go profile");
        run(&mut s, "tick 200");
        assert_eq!(run(&mut s, "where")[0], "profile \"Profile\" scrollY=0");
        assert_eq!(run(&mut s, "history"), vec![" 0  home", " 1  profile"]);

        assert_eq!(run(&mut s, "key alt+left"), vec!["handled"]);
        run(&mut s, "tick 200");
        assert_eq!(s.current_page(), "home");
    }

    #[test]
    fn bare_tick_runs_until_idle() {
        let mut s = session();
        run(&mut s, "go story-wall");
        assert_eq!(run(&mut s, "tick"), vec!["idle after 200ms"]);
        assert_eq!(s.current_page(), "story-wall");
        assert_eq!(run(&mut s, "tick"), vec!["idle after 0ms"]);
    }

    #[test]
    fn unknown_page_becomes_error_toast() {
        let mut s = session();
        let err = execute(Command::Go("moon".into()), &mut s).unwrap_err();
        assert!(err.to_string().contains("moon"));
        let alerts = drain_alerts(&mut s);
        assert_eq!(alerts.len(), 1);
        assert_eq!(s.toasts().toasts()[0].severity, Severity::Error);
        assert!(drain_alerts(&mut s).is_empty());
    }

    #[test]
    fn store_round_trip_through_commands() {
        let mut s = session();
        run(&mut s, r#"set child.profile.nickname "Mia""#);
        assert_eq!(run(&mut s, "get child.profile.nickname"), vec!["\"Mia\""]);
        assert_eq!(
            run(&mut s, "local child.profile.nickname"),
            vec!["\"Mia\""]
        );
        assert_eq!(run(&mut s, "get nothing.here"), vec!["(none)"]);
    }

    #[test]
    fn vibrate_uses_default_pattern() {
        let mut s = session();
        assert_eq!(run(&mut s, "vibrate"), vec!["vibrate [50]"]);
        assert_eq!(run(&mut s, "vibrate 20 10 20"), vec!["vibrate [20, 10, 20]"]);
        assert_eq!(s.host().vibrations.len(), 2);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut s = session();
        assert_eq!(execute(Command::Quit, &mut s).unwrap(), Outcome::Quit);
    }
}
