//! # Screen Layout
//!
//! Turns a [`TuiModel`] into the rows of one frame:
//!
//! ```text
//! row 0        header
//! row 1        status / search
//! row 2        (blank)
//! rows 3..     body, scrolled to keep the cursor visible
//! second last  error, if any
//! last         key hints
//! ```
//!
//! Content is cut to the terminal width before styling is applied.

use super::model::{TuiModel, View};
use crate::models::CliOverrides;
use crate::output::{result_lines, truncate, Formatter};
use crossterm::style::Stylize;
use std::path::Path;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Rows above the body plus the footer
const CHROME_ROWS: usize = 4;

pub fn render(
    model: &TuiModel,
    formatter: &mut Formatter,
    overrides: Option<&CliOverrides>,
    (width, height): (u16, u16),
) -> Vec<String> {
    let width = usize::from(width).max(1);
    let height = usize::from(height);

    let body = body_lines(model, formatter, overrides, width);
    let reserved = CHROME_ROWS + usize::from(model.error().is_some());
    let body_height = height.saturating_sub(reserved).max(1);

    let offset = match model.view() {
        View::List => model.cursor().saturating_sub(body_height - 1),
        View::FileSelect => model.file_cursor().saturating_sub(body_height - 1),
        _ => model
            .scroll()
            .min(body.len().saturating_sub(body_height)),
    };

    let mut lines = Vec::with_capacity(height);
    lines.push(format!("{}", truncate(&header(model), width).bold().reverse()));
    lines.push(truncate(&status(model), width));
    lines.push(String::new());

    let visible: Vec<String> = body.into_iter().skip(offset).take(body_height).collect();
    let padding = body_height - visible.len();
    lines.extend(visible);
    lines.extend(std::iter::repeat(String::new()).take(padding));

    if let Some(error) = model.error() {
        lines.push(format!("{}", truncate(&format!("⚠ Error: {error}"), width).red()));
    }
    lines.push(format!("{}", truncate(&footer(model), width).dark_grey()));
    lines
}

fn header(model: &TuiModel) -> String {
    match model.view() {
        View::FileSelect => " Select HCL File ".to_string(),
        View::List => match model.file_path() {
            Some(path) => format!(" rpcline: {} ", file_name(path)),
            None => " rpcline ".to_string(),
        },
        View::Detail => match model.current_request() {
            Some((index, request)) if model.is_selected(index) => {
                format!(" Request Details: {} [SELECTED] ", request.name)
            }
            Some((_, request)) => format!(" Request Details: {} ", request.name),
            None => " Request Details ".to_string(),
        },
        View::Results => " Execution Results ".to_string(),
        View::Help => " Help - Keyboard Shortcuts ".to_string(),
    }
}

fn status(model: &TuiModel) -> String {
    if model.view() == View::FileSelect {
        return format!("Found {} HCL file(s)", model.files().len());
    }

    let mut status = if model.is_searching() {
        format!("🔍 Search: {}_", model.query())
    } else if !model.query().is_empty() {
        format!("Filter: {}", model.query())
    } else {
        String::new()
    };

    if !status.is_empty() {
        status.push_str(" | ");
    }
    status.push_str(&format!(
        "Total: {} | Filtered: {} | Selected: {}",
        model.total_count(),
        model.filtered_count(),
        model.selected_count()
    ));

    if model.is_running() {
        status.push_str(&format!(" | {} running", spinner(model)));
    }
    status
}

fn footer(model: &TuiModel) -> String {
    let hints: &[&str] = if model.is_searching() {
        &["enter: keep filter", "esc: clear search"]
    } else {
        match model.view() {
            View::FileSelect => &["↑/k: up", "↓/j: down", "enter: open"],
            View::List => &["?: help", "/: search", "space: select", "a/A: all/none", "r: run"],
            View::Detail => &["esc: back", "space: select", "r: run"],
            View::Results => &["esc: back", "↑/↓: scroll", "r: rerun"],
            View::Help => &["esc/?: close"],
        }
    };

    let mut parts: Vec<&str> = hints.to_vec();
    parts.push("q: quit");
    parts.join(" | ")
}

fn body_lines(
    model: &TuiModel,
    formatter: &mut Formatter,
    overrides: Option<&CliOverrides>,
    width: usize,
) -> Vec<String> {
    match model.view() {
        View::FileSelect => file_lines(model, width),
        View::List => request_lines(model, width),
        View::Detail => match (model.request_file(), model.current_request()) {
            (Some(file), Some((_, request))) => formatter
                .request_detail_lines(file, request, overrides)
                .iter()
                .map(|line| truncate(line, width))
                .collect(),
            _ => vec!["No request selected".to_string()],
        },
        View::Results => results_lines(model, width),
        View::Help => help_lines(),
    }
}

fn file_lines(model: &TuiModel, width: usize) -> Vec<String> {
    if model.files().is_empty() {
        return vec!["No HCL files found in current directory.".to_string()];
    }

    model
        .files()
        .iter()
        .enumerate()
        .map(|(index, path)| {
            let name = truncate(&file_name(path), width.saturating_sub(2));
            if index == model.file_cursor() {
                format!("{} {}", "→".cyan(), name.reverse())
            } else {
                format!("  {name}")
            }
        })
        .collect()
}

fn request_lines(model: &TuiModel, width: usize) -> Vec<String> {
    if model.request_file().is_none() {
        return vec!["No request file loaded".to_string()];
    }
    if model.filtered_count() == 0 {
        return vec!["No requests match".to_string()];
    }

    let cursor_index = model.current_request().map(|(index, _)| index);
    model
        .visible_requests()
        .map(|(index, request)| {
            let mark = if model.is_selected(index) {
                format!("{}", "◉".green())
            } else {
                "○".to_string()
            };

            let tag = match (request.config_ref(), request.has_custom_url()) {
                (Some(config), _) => format!("[{config}]"),
                (None, true) => "[custom-url]".to_string(),
                (None, false) => String::new(),
            };

            let plain = truncate(
                &format!("{} ({}) {}", request.name, request.method, tag),
                width.saturating_sub(4),
            );
            if Some(index) == cursor_index {
                format!("{mark} {} {}", "→".cyan(), plain.trim_end().reverse())
            } else {
                format!("{mark}   {}", plain.trim_end())
            }
        })
        .collect()
}

fn results_lines(model: &TuiModel, width: usize) -> Vec<String> {
    if model.is_running() {
        return vec![format!(
            "{} Executing {} request(s)...",
            spinner(model).cyan(),
            model.running_count()
        )];
    }

    let Some(results) = model.results() else {
        return vec!["No results to display".to_string()];
    };

    let mut lines: Vec<String> = result_lines(results)
        .iter()
        .map(|line| truncate(line, width))
        .collect();

    if let Some(last) = model.history().last() {
        lines.push(String::new());
        lines.push(format!(
            "History: {} execution(s) recorded, last at {}",
            model.history().len(),
            last.timestamp.format("%H:%M:%S")
        ));
    }
    lines
}

fn help_lines() -> Vec<String> {
    [
        ("↑/k, ↓/j", "move up / down"),
        ("space", "select or deselect request"),
        ("a / A", "select all / deselect all"),
        ("enter, l, →", "view details (open file)"),
        ("esc, h, ←", "go back"),
        ("/", "search by name or method"),
        ("r", "run selected requests"),
        ("?", "toggle this help"),
        ("q, ctrl+c", "quit"),
    ]
    .iter()
    .map(|(keys, description)| format!("  {keys:<14} {description}"))
    .collect()
}

fn spinner(model: &TuiModel) -> &'static str {
    SPINNER_FRAMES[model.spinner_frame() % SPINNER_FRAMES.len()]
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Config, Request, RequestFile};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::path::PathBuf;

    fn model() -> TuiModel {
        let mut file = RequestFile::new();
        file.configs.insert(
            "default".to_string(),
            Config::new().with_url("https://rpc.example.com"),
        );
        let mut bound = Request::new("status", "node_status");
        bound.config = Some("production".to_string());
        let mut custom = Request::new("custom", "custom_call");
        custom.url = Some("http://localhost:9000".to_string());
        file.requests = vec![Request::new("ping", "net_ping"), bound, custom];

        let mut model = TuiModel::new();
        model.file_loaded(PathBuf::from("/tmp/api.hcl"), Ok(file));
        model
    }

    fn press(model: &mut TuiModel, code: KeyCode) {
        model.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(model: &TuiModel, size: (u16, u16)) -> String {
        render(model, &mut Formatter::new(), None, size).join("\n")
    }

    #[test]
    fn frame_should_fill_the_terminal_height() {
        let lines = render(&model(), &mut Formatter::new(), None, (80, 20));
        assert_eq!(lines.len(), 20);
        assert!(lines.last().unwrap().contains("q: quit"));
    }

    #[test]
    fn list_view_should_show_requests_and_tags() {
        let mut model = model();
        press(&mut model, KeyCode::Char(' '));
        let text = screen(&model, (80, 20));

        assert!(text.contains("rpcline: api.hcl"));
        assert!(text.contains("Total: 3 | Filtered: 3 | Selected: 1"));
        assert!(text.contains("ping (net_ping)"));
        assert!(text.contains("status (node_status) [production]"));
        assert!(text.contains("custom (custom_call) [custom-url]"));
        assert!(text.contains("◉"));
    }

    #[test]
    fn list_view_should_scroll_to_cursor() {
        let mut model = model();
        press(&mut model, KeyCode::Down);
        press(&mut model, KeyCode::Down);
        // Body has room for one row only
        let text = screen(&model, (80, 5));
        assert!(text.contains("custom (custom_call)"));
        assert!(!text.contains("ping (net_ping)"));
    }

    #[test]
    fn detail_view_should_show_effective_config() {
        let mut model = model();
        press(&mut model, KeyCode::Enter);
        let text = screen(&model, (100, 30));

        assert!(text.contains("Request Details: ping"));
        assert!(text.contains("URL:     https://rpc.example.com"));
        assert!(text.contains("Timeout: 30s"));
    }

    #[test]
    fn search_status_should_show_query() {
        let mut model = model();
        press(&mut model, KeyCode::Char('/'));
        press(&mut model, KeyCode::Char('s'));
        let text = screen(&model, (80, 20));
        assert!(text.contains("🔍 Search: s_"));
        assert!(text.contains("esc: clear search"));
    }

    #[test]
    fn running_batch_should_show_spinner() {
        let mut model = model();
        press(&mut model, KeyCode::Char('a'));
        press(&mut model, KeyCode::Char('r'));
        let text = screen(&model, (80, 20));
        assert!(text.contains("Executing 3 request(s)..."));
        assert!(text.contains("running"));
    }

    #[test]
    fn error_should_be_shown_above_footer() {
        let mut model = model();
        model.batch_failed("validation failed: boom".to_string());
        let lines = render(&model, &mut Formatter::new(), None, (80, 12));
        assert_eq!(lines.len(), 12);
        assert!(lines[10].contains("⚠ Error: validation failed: boom"));
    }

    #[test]
    fn file_select_should_list_files() {
        let model = TuiModel::with_files(vec![
            PathBuf::from("/work/a.hcl"),
            PathBuf::from("/work/b.hcl"),
        ]);
        let text = screen(&model, (80, 20));
        assert!(text.contains("Select HCL File"));
        assert!(text.contains("Found 2 HCL file(s)"));
        assert!(text.contains("a.hcl"));
        assert!(text.contains("  b.hcl"));
    }

    #[test]
    fn help_view_should_list_keys() {
        let mut model = model();
        press(&mut model, KeyCode::Char('?'));
        let text = screen(&model, (80, 20));
        assert!(text.contains("Help - Keyboard Shortcuts"));
        assert!(text.contains("run selected requests"));
    }
}
