//! The interactive shell: line commands mapped onto application events.
//!
//! The shell and the controller share one loop, so a command and a posted
//! event never race; whichever arrives first is handled to completion.

use anyhow::Result;
use serde::Serialize;
use tabled::Tabled;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use aoimap_core::models::ViewMode;

use crate::app::{AppEvent, Controller};
use crate::output::OutputWriter;

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Search(String),
    Results,
    Select(usize),
    Apply,
    Draw,
    Click { lat: f64, lon: f64 },
    DblClick,
    List,
    Toggle(String),
    Delete(String),
    ToggleView,
    Mode(ViewMode),
    Status,
    Restart,
    Help,
    Quit,
}

/// Parse a raw input line. `Ok(None)` for blank lines; `Err` carries the
/// message to show the user.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let parsed = match command {
        "search" => {
            // Everything after the keyword is the query, spaces included.
            ShellCommand::Search(rest.join(" "))
        }
        "results" => ShellCommand::Results,
        "select" => {
            let n: usize = one_arg(&rest, "select <n>")?
                .parse()
                .map_err(|_| "select expects a result number".to_string())?;
            if n == 0 {
                return Err("results are numbered from 1".to_string());
            }
            ShellCommand::Select(n)
        }
        "apply" => ShellCommand::Apply,
        "draw" => ShellCommand::Draw,
        "click" => {
            let [lat, lon] = two_args(&rest, "click <lat> <lon>")?;
            ShellCommand::Click {
                lat: lat.parse().map_err(|_| "latitude must be a number".to_string())?,
                lon: lon.parse().map_err(|_| "longitude must be a number".to_string())?,
            }
        }
        "dblclick" => ShellCommand::DblClick,
        "list" => ShellCommand::List,
        "toggle" => ShellCommand::Toggle(one_arg(&rest, "toggle <id>")?.to_string()),
        "delete" => ShellCommand::Delete(one_arg(&rest, "delete <id>")?.to_string()),
        "view" => ShellCommand::ToggleView,
        "mode" => match one_arg(&rest, "mode <define-aoi|project-scope>")? {
            "define-aoi" => ShellCommand::Mode(ViewMode::DefineAoi),
            "project-scope" => ShellCommand::Mode(ViewMode::ProjectScope),
            other => return Err(format!("unknown mode '{other}'")),
        },
        "status" => ShellCommand::Status,
        "restart" => ShellCommand::Restart,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(parsed))
}

fn one_arg<'a>(rest: &[&'a str], usage: &str) -> Result<&'a str, String> {
    match rest {
        [arg] => Ok(arg),
        _ => Err(format!("usage: {usage}")),
    }
}

fn two_args<'a>(rest: &[&'a str], usage: &str) -> Result<[&'a str; 2], String> {
    match rest {
        [a, b] => Ok([a, b]),
        _ => Err(format!("usage: {usage}")),
    }
}

/// Run the shell until EOF or `quit`.
///
/// Stdin lines and controller events are multiplexed on one task; spawned
/// debounce/search tasks post back through `events`.
pub async fn run(
    mut controller: Controller,
    mut rx: mpsc::UnboundedReceiver<AppEvent>,
    out: &OutputWriter,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    out.info("aoimap shell ready; type 'help' for commands");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse(&line) {
                    Ok(None) => {}
                    Ok(Some(ShellCommand::Quit)) => break,
                    Ok(Some(command)) => dispatch(command, &mut controller, out),
                    Err(message) => out.error(message),
                }
            }
            Some(event) = rx.recv() => controller.handle(event),
        }
    }
    Ok(())
}

fn dispatch(command: ShellCommand, controller: &mut Controller, out: &OutputWriter) {
    match command {
        ShellCommand::Search(text) => controller.handle(AppEvent::SearchInput(text)),
        ShellCommand::Results => print_results(controller, out),
        ShellCommand::Select(n) => controller.handle(AppEvent::SelectCandidate(n - 1)),
        ShellCommand::Apply => controller.handle(AppEvent::ApplyOutline),
        ShellCommand::Draw => controller.handle(AppEvent::ToggleDrawMode),
        ShellCommand::Click { lat, lon } => controller.handle(AppEvent::MapClick { lat, lon }),
        ShellCommand::DblClick => controller.handle(AppEvent::MapDoubleClick),
        ShellCommand::List => print_areas(controller, out),
        ShellCommand::Toggle(id) => controller.handle(AppEvent::ToggleVisibility(id)),
        ShellCommand::Delete(id) => controller.handle(AppEvent::DeleteArea(id)),
        ShellCommand::ToggleView => controller.handle(AppEvent::ToggleMapView),
        ShellCommand::Mode(mode) => controller.handle(AppEvent::SetViewMode(mode)),
        ShellCommand::Status => print_status(controller, out),
        ShellCommand::Restart => controller.handle(AppEvent::Restart),
        ShellCommand::Help => print_help(out),
        ShellCommand::Quit => {}
    }
}

#[derive(Tabled, Serialize)]
struct AreaRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Origin")]
    origin: String,
    #[tabled(rename = "Vertices")]
    vertices: usize,
    #[tabled(rename = "Visible")]
    visible: bool,
    #[tabled(rename = "Color")]
    color: String,
}

fn print_areas(controller: &Controller, out: &OutputWriter) {
    let rows: Vec<AreaRow> = controller
        .areas()
        .iter()
        .map(|area| AreaRow {
            id: area.id.clone(),
            name: area.name.clone(),
            origin: format!("{:?}", area.origin).to_lowercase(),
            vertices: area.geometry.outer().map(|r| r.len()).unwrap_or(0),
            visible: area.visible,
            color: area.color.clone(),
        })
        .collect();
    out.table(rows);
}

fn print_results(controller: &Controller, out: &OutputWriter) {
    if controller.is_searching() {
        out.info("searching...");
        return;
    }
    let results = controller.results();
    if results.is_empty() {
        out.info("no results");
        return;
    }
    for (i, candidate) in results.iter().enumerate() {
        out.info(format!("{}. {} ({})", i + 1, candidate.short_name(), candidate.display_name));
    }
}

fn print_status(controller: &Controller, out: &OutputWriter) {
    let view = controller.view();
    out.info(format!(
        "map {:?} | panel {:?} | {} area(s) | drawing: {} | selection: {}",
        view.map_view,
        view.view_mode,
        controller.areas().len(),
        controller.is_drawing(),
        controller
            .candidate()
            .map(|c| c.short_name().to_string())
            .unwrap_or_else(|| "none".to_string()),
    ));
}

fn print_help(out: &OutputWriter) {
    out.info("search <text>      look up a place (debounced)");
    out.info("results            show the current result list");
    out.info("select <n>         pick a result");
    out.info("apply              turn the selection into an area");
    out.info("draw               enter/leave draw mode");
    out.info("click <lat> <lon>  add a vertex while drawing");
    out.info("dblclick           close the drawn polygon");
    out.info("list               list areas");
    out.info("toggle <id>        show/hide an area");
    out.info("delete <id>        remove an area");
    out.info("view               switch street/satellite");
    out.info("mode <m>           define-aoi | project-scope");
    out.info("status             current session state");
    out.info("restart            clear search state, re-home the map");
    out.info("quit               leave");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_search_keeps_spaces() {
        assert_eq!(
            parse("search bad godesberg"),
            Ok(Some(ShellCommand::Search("bad godesberg".to_string())))
        );
    }

    #[test]
    fn test_parse_click() {
        assert_eq!(
            parse("click 50.94 6.95"),
            Ok(Some(ShellCommand::Click { lat: 50.94, lon: 6.95 }))
        );
        assert!(parse("click 50.94").is_err());
        assert!(parse("click a b").is_err());
    }

    #[test]
    fn test_parse_select_is_one_based() {
        assert_eq!(parse("select 1"), Ok(Some(ShellCommand::Select(1))));
        assert!(parse("select 0").is_err());
        assert!(parse("select").is_err());
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            parse("mode project-scope"),
            Ok(Some(ShellCommand::Mode(ViewMode::ProjectScope)))
        );
        assert!(parse("mode sideways").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse("teleport").is_err());
    }
}
