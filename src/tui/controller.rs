//! # Interactive Controller
//!
//! Owns the event loop: reads input, applies it to the model, starts batches
//! and redraws. A batch runs as one spawned task that reports back once over
//! a channel, so the screen keeps updating (and quitting keeps working) while
//! requests are in flight.

use super::io::{EventStream, RenderStream};
use super::model::{Action, TuiModel};
use super::{load_request_file, view};
use crate::executor::Executor;
use crate::models::{CliOverrides, ExecutionResult, Request};
use crate::output::Formatter;
use crate::parser::validate;
use anyhow::Result;
use crossterm::event::{Event, KeyEventKind};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Message sent by a finished batch task
#[derive(Debug)]
pub struct BatchComplete {
    pub results: Vec<ExecutionResult>,
}

pub struct TuiController<ES: EventStream, RS: RenderStream> {
    model: TuiModel,
    executor: Executor,
    formatter: Formatter,
    overrides: Option<CliOverrides>,
    event_stream: ES,
    render_stream: RS,
    batch_sender: mpsc::Sender<BatchComplete>,
    batch_receiver: mpsc::Receiver<BatchComplete>,
    should_quit: bool,
}

impl<ES: EventStream, RS: RenderStream> TuiController<ES, RS> {
    pub fn new(
        model: TuiModel,
        overrides: Option<CliOverrides>,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let (batch_sender, batch_receiver) = mpsc::channel(1);

        Ok(Self {
            model,
            executor: Executor::new()?,
            formatter: Formatter::new(),
            overrides,
            event_stream,
            render_stream,
            batch_sender,
            batch_receiver,
            should_quit: false,
        })
    }

    pub fn model(&self) -> &TuiModel {
        &self.model
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Take over the terminal, run until quit, then restore it
    pub async fn run(&mut self) -> Result<()> {
        self.setup()?;
        let result = self.event_loop().await;
        let restored = self.cleanup();
        result.and(restored)
    }

    async fn event_loop(&mut self) -> Result<()> {
        self.render()?;

        while !self.should_quit {
            let mut dirty = self.poll_batch();

            if self.event_stream.poll(POLL_INTERVAL)? {
                let event = self.event_stream.read()?;
                self.handle_event(event);
                dirty = true;
            }

            if self.model.is_running() {
                self.model.tick();
                dirty = true;
            }

            if dirty && !self.should_quit {
                self.render()?;
            }

            // Give the batch task a chance on single-threaded runtimes
            tokio::task::yield_now().await;
        }

        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                tracing::debug!("Key event: {:?}", key);
                if let Some(action) = self.model.handle_key(key) {
                    self.apply(action);
                }
            }
            // The size is read again on every frame
            Event::Resize(width, height) => tracing::debug!("Resized to {}x{}", width, height),
            _ => {}
        }
    }

    /// Pick up a finished batch, if any
    pub fn poll_batch(&mut self) -> bool {
        match self.batch_receiver.try_recv() {
            Ok(complete) => {
                tracing::info!("Batch finished with {} result(s)", complete.results.len());
                self.model.finish_batch(complete.results);
                true
            }
            Err(_) => false,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::LoadFile(path) => self.load_file(path),
            Action::Run(requests) => self.spawn_batch(requests),
        }
    }

    fn load_file(&mut self, path: PathBuf) {
        let result = load_request_file(&path);
        self.model.file_loaded(path, result);
    }

    fn spawn_batch(&mut self, requests: Vec<Request>) {
        let Some(file) = self.model.request_file().map(Arc::clone) else {
            self.model
                .batch_failed("no request file loaded".to_string());
            return;
        };

        if let Err(e) = validate(&file) {
            self.model.batch_failed(format!("validation failed: {e}"));
            return;
        }

        tracing::info!("Starting batch of {} request(s)", requests.len());
        let mut executor = self.executor.clone();
        let overrides = self.overrides.clone();
        let sender = self.batch_sender.clone();

        tokio::spawn(async move {
            let results = executor
                .execute_all(&file, &requests, overrides.as_ref())
                .await;
            // The receiver is gone only when the UI has quit
            let _ = sender.send(BatchComplete { results }).await;
        });
    }

    fn render(&mut self) -> Result<()> {
        let size = self.render_stream.get_size()?;
        let lines = view::render(
            &self.model,
            &mut self.formatter,
            self.overrides.as_ref(),
            size,
        );

        self.render_stream.draw_frame(&lines)
    }

    fn setup(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }
}
