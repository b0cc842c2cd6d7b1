//! # Interactive State
//!
//! Everything the interactive screen shows, and the key handling that
//! changes it. Side effects (loading files, running batches) are returned as
//! [`Action`]s for the controller to carry out.

use crate::models::{ExecutionResult, Request, RequestFile};
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    FileSelect,
    List,
    Detail,
    Results,
    Help,
}

/// Work the controller has to do in response to a key
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    LoadFile(PathBuf),
    /// Run these requests, already in file order
    Run(Vec<Request>),
}

/// One completed batch
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Local>,
    pub selected: Vec<String>,
    pub results: Arc<Vec<ExecutionResult>>,
}

#[derive(Debug)]
pub struct TuiModel {
    view: View,

    files: Vec<PathBuf>,
    file_cursor: usize,

    file_path: Option<PathBuf>,
    request_file: Option<Arc<RequestFile>>,
    /// Indices into the file's requests
    selected: BTreeSet<usize>,
    /// Indices of the requests matching the search, in file order
    filtered: Vec<usize>,
    cursor: usize,

    search_mode: bool,
    query: String,

    /// First visible line of the detail, results and help views
    scroll: usize,

    results: Option<Arc<Vec<ExecutionResult>>>,
    history: Vec<HistoryEntry>,
    /// Names of the batch in flight
    running: Option<Vec<String>>,
    spinner_frame: usize,

    error: Option<String>,
}

impl TuiModel {
    /// Start on the request list with nothing loaded
    pub fn new() -> Self {
        Self {
            view: View::List,
            files: Vec::new(),
            file_cursor: 0,
            file_path: None,
            request_file: None,
            selected: BTreeSet::new(),
            filtered: Vec::new(),
            cursor: 0,
            search_mode: false,
            query: String::new(),
            scroll: 0,
            results: None,
            history: Vec::new(),
            running: None,
            spinner_frame: 0,
            error: None,
        }
    }

    /// Start by picking one of `files`
    pub fn with_files(files: Vec<PathBuf>) -> Self {
        Self {
            view: View::FileSelect,
            files,
            ..Self::new()
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn file_cursor(&self) -> usize {
        self.file_cursor
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn request_file(&self) -> Option<&Arc<RequestFile>> {
        self.request_file.as_ref()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn is_searching(&self) -> bool {
        self.search_mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> Option<&Arc<Vec<ExecutionResult>>> {
        self.results.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Number of requests in the batch in flight
    pub fn running_count(&self) -> usize {
        self.running.as_ref().map_or(0, Vec::len)
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_count(&self) -> usize {
        self.requests().len()
    }

    pub fn filtered_count(&self) -> usize {
        self.filtered.len()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Requests matching the search as (file index, request)
    pub fn visible_requests(&self) -> impl Iterator<Item = (usize, &Request)> + '_ {
        let requests = self.requests();
        self.filtered
            .iter()
            .filter_map(move |&index| requests.get(index).map(|request| (index, request)))
    }

    /// Request under the cursor as (file index, request)
    pub fn current_request(&self) -> Option<(usize, &Request)> {
        let index = *self.filtered.get(self.cursor)?;
        self.requests().get(index).map(|request| (index, request))
    }

    /// Replace the loaded file, or report why it could not be read
    pub fn file_loaded(&mut self, path: PathBuf, result: Result<RequestFile, String>) {
        match result {
            Ok(file) => {
                tracing::debug!(
                    "Loaded '{}' with {} request(s)",
                    path.display(),
                    file.requests.len()
                );
                self.request_file = Some(Arc::new(file));
                self.file_path = Some(path);
                self.selected.clear();
                self.query.clear();
                self.search_mode = false;
                self.results = None;
                self.error = None;
                self.apply_filter();
                self.show(View::List);
            }
            Err(message) => {
                tracing::warn!("Cannot load '{}': {}", path.display(), message);
                self.error = Some(message);
            }
        }
    }

    /// A batch finished; its results become current and join the history
    pub fn finish_batch(&mut self, results: Vec<ExecutionResult>) {
        let selected = self.running.take().unwrap_or_default();
        let results = Arc::new(results);

        self.history.push(HistoryEntry {
            timestamp: Local::now(),
            selected,
            results: Arc::clone(&results),
        });
        self.results = Some(results);
        self.show(View::Results);
    }

    /// A batch could not be started
    pub fn batch_failed(&mut self, message: String) {
        self.running = None;
        self.error = Some(message);
    }

    /// Advance the busy indicator
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }

        if self.search_mode {
            self.handle_search_key(key);
            return None;
        }

        if key.code == KeyCode::Char('q') {
            return Some(Action::Quit);
        }

        if self.view != View::FileSelect && key.code == KeyCode::Char('?') {
            let target = if self.view == View::Help {
                View::List
            } else {
                View::Help
            };
            self.show(target);
            return None;
        }

        match self.view {
            View::FileSelect => self.handle_file_select_key(key),
            View::List => self.handle_list_key(key),
            View::Detail => self.handle_detail_key(key),
            View::Results => self.handle_results_key(key),
            View::Help => {
                if is_back(key.code) {
                    self.show(View::List);
                } else {
                    self.scroll_by(key.code);
                }
                None
            }
        }
    }

    fn handle_file_select_key(&mut self, key: KeyEvent) -> Option<Action> {
        if is_up(key.code) {
            self.file_cursor = self.file_cursor.saturating_sub(1);
        } else if is_down(key.code) {
            if self.file_cursor + 1 < self.files.len() {
                self.file_cursor += 1;
            }
        } else if is_enter(key.code) {
            return self.files.get(self.file_cursor).cloned().map(Action::LoadFile);
        }
        None
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('/') => self.search_mode = true,
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('a') => self.selected = (0..self.total_count()).collect(),
            KeyCode::Char('A') => self.selected.clear(),
            KeyCode::Char('r') => return self.run_selected(),
            code if is_up(code) => self.cursor = self.cursor.saturating_sub(1),
            code if is_down(code) => {
                if self.cursor + 1 < self.filtered.len() {
                    self.cursor += 1;
                }
            }
            code if is_enter(code) => {
                if self.current_request().is_some() {
                    self.show(View::Detail);
                }
            }
            code if is_back(code) => {
                if !self.files.is_empty() {
                    self.show(View::FileSelect);
                }
            }
            _ => {}
        }
        None
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char(' ') => self.toggle_current(),
            KeyCode::Char('r') => return self.run_selected(),
            code if is_back(code) => self.show(View::List),
            code => self.scroll_by(code),
        }
        None
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Char('r') => return self.run_selected(),
            code if is_back(code) => {
                self.results = None;
                self.error = None;
                self.show(View::List);
            }
            code => self.scroll_by(code),
        }
        None
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.search_mode = false;
                self.query.clear();
                self.apply_filter();
            }
            KeyCode::Enter => self.search_mode = false,
            KeyCode::Backspace => {
                self.query.pop();
                self.apply_filter();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.apply_filter();
            }
            _ => {}
        }
    }

    /// Start running the selection unless a batch is already in flight
    fn run_selected(&mut self) -> Option<Action> {
        if self.running.is_some() || self.selected.is_empty() {
            return None;
        }

        let requests: Vec<Request> = self
            .selected
            .iter()
            .filter_map(|&index| self.requests().get(index).cloned())
            .collect();

        self.running = Some(requests.iter().map(|r| r.name.clone()).collect());
        self.results = None;
        self.error = None;
        self.show(View::Results);
        Some(Action::Run(requests))
    }

    fn toggle_current(&mut self) {
        if let Some((index, _)) = self.current_request() {
            if !self.selected.remove(&index) {
                self.selected.insert(index);
            }
        }
    }

    fn apply_filter(&mut self) {
        let query = self.query.trim().to_lowercase();
        self.filtered = self
            .requests()
            .iter()
            .enumerate()
            .filter(|(_, request)| {
                query.is_empty()
                    || request.name.to_lowercase().contains(&query)
                    || request.method.to_lowercase().contains(&query)
            })
            .map(|(index, _)| index)
            .collect();
        self.cursor = 0;
    }

    fn scroll_by(&mut self, code: KeyCode) {
        if is_up(code) {
            self.scroll = self.scroll.saturating_sub(1);
        } else if is_down(code) {
            self.scroll += 1;
        }
    }

    fn show(&mut self, view: View) {
        self.view = view;
        self.scroll = 0;
    }

    fn requests(&self) -> &[Request] {
        self.request_file
            .as_deref()
            .map(|file| file.requests.as_slice())
            .unwrap_or_default()
    }
}

impl Default for TuiModel {
    fn default() -> Self {
        Self::new()
    }
}

fn is_up(code: KeyCode) -> bool {
    matches!(code, KeyCode::Up | KeyCode::Char('k'))
}

fn is_down(code: KeyCode) -> bool {
    matches!(code, KeyCode::Down | KeyCode::Char('j'))
}

fn is_enter(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Right | KeyCode::Char('l'))
}

fn is_back(code: KeyCode) -> bool {
    matches!(code, KeyCode::Esc | KeyCode::Left | KeyCode::Char('h'))
}
