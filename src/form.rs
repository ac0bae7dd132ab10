//! Translation form controller.
//!
//! The controller is the single owner of [`FormState`]. Every mutation goes
//! through it, either as a command from a [`FormHandle`] or as a resolved
//! translation posted back by a submission task. Events are applied one at a
//! time, so no locking is needed.
//!
//! Submissions are fire-and-forget: the form stays editable while requests
//! are in flight, nothing is cancelled, and whichever response completes
//! last is the one left in the output.

use crate::catalog::{Language, UnknownLanguage};
use crate::render::render;
use crate::translation::{TranslateError, TranslationRequest, TranslationService};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    UnknownLanguage(#[from] UnknownLanguage),

    #[error("Form controller has stopped")]
    ControllerStopped,
}

/// The four fields behind the form.
///
/// Only the controller can mutate it, and there is no setter for the output:
/// it changes only when a translation resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormState {
    source_language: Language,
    target_language: Language,
    input_text: String,
    output_text: String,
}

impl FormState {
    /// State at mount time: English to French, both text areas empty.
    pub fn new() -> Self {
        Self {
            source_language: Language::default_source(),
            target_language: Language::default_target(),
            input_text: String::new(),
            output_text: String::new(),
        }
    }

    pub fn source_language(&self) -> Language {
        self.source_language
    }

    pub fn target_language(&self) -> Language {
        self.target_language
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn output_text(&self) -> &str {
        &self.output_text
    }

    /// Build the request a submission would send right now.
    pub fn translation_request(&self) -> TranslationRequest {
        TranslationRequest {
            q: self.input_text.clone(),
            source: self.source_language.code().to_string(),
            target: self.target_language.code().to_string(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Commands sent by a [`FormHandle`]; each carries a reply channel.
#[derive(Debug)]
enum Command {
    SetSourceLanguage(String, oneshot::Sender<Result<(), FormError>>),
    SetTargetLanguage(String, oneshot::Sender<Result<(), FormError>>),
    SetInputText(String, oneshot::Sender<()>),
    Submit(oneshot::Sender<u64>),
    Post(PostedForm, oneshot::Sender<Result<u64, FormError>>),
    Snapshot(oneshot::Sender<FormState>),
    Render(oneshot::Sender<String>),
}

/// All posted fields of one form submission, applied together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedForm {
    pub source_language: String,
    pub target_language: String,
    pub input_text: String,
}

/// Outcome of one submission, posted back by its task.
#[derive(Debug)]
struct Resolution {
    submission: u64,
    result: Result<String, TranslateError>,
}

pub struct FormController {
    state: FormState,
    view: String,
    service: TranslationService,
    commands_rx: mpsc::UnboundedReceiver<Command>,
    commands_closed: bool,
    resolutions_tx: mpsc::UnboundedSender<Resolution>,
    resolutions_rx: mpsc::UnboundedReceiver<Resolution>,
    next_submission: u64,
    in_flight: usize,
}

impl FormController {
    /// Mount the form with its default state.
    ///
    /// The returned handle is the first sender of the command queue; clone it
    /// for more. Once every handle is dropped, [`FormController::run`] winds down.
    pub fn new(service: TranslationService) -> (Self, FormHandle) {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let (resolutions_tx, resolutions_rx) = mpsc::unbounded_channel();
        let state = FormState::new();
        let view = render(&state);

        let controller = Self {
            state,
            view,
            service,
            commands_rx,
            commands_closed: false,
            resolutions_tx,
            resolutions_rx,
            next_submission: 0,
            in_flight: 0,
        };

        (controller, FormHandle { tx: commands_tx })
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The markup rendered after the last mutation.
    pub fn view(&self) -> &str {
        &self.view
    }

    /// Number of submissions whose response has not arrived yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn set_source_language(&mut self, code: &str) -> Result<(), FormError> {
        self.state.source_language = Language::from_code(code)?;
        self.rerender();
        Ok(())
    }

    pub fn set_target_language(&mut self, code: &str) -> Result<(), FormError> {
        self.state.target_language = Language::from_code(code)?;
        self.rerender();
        Ok(())
    }

    /// Replace the input text verbatim.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
        self.rerender();
    }

    /// Apply a whole posted form and submit it in one step.
    ///
    /// Both codes are checked first; if either is unknown nothing changes and
    /// nothing is sent.
    pub fn apply_and_submit(&mut self, posted: PostedForm) -> Result<JoinHandle<()>, FormError> {
        let source = Language::from_code(&posted.source_language)?;
        let target = Language::from_code(&posted.target_language)?;

        self.state.source_language = source;
        self.state.target_language = target;
        self.state.input_text = posted.input_text;
        self.rerender();

        Ok(self.submit())
    }

    /// Send the current form contents to the translation service.
    ///
    /// Returns immediately with the spawned task. The response is applied
    /// later, when the controller processes it from its queue.
    pub fn submit(&mut self) -> JoinHandle<()> {
        self.next_submission += 1;
        self.in_flight += 1;

        let submission = self.next_submission;
        let request = self.state.translation_request();
        let service = self.service.clone();
        let resolutions = self.resolutions_tx.clone();

        info!(
            "Submission #{}: {} -> {} ({} in flight)",
            submission, request.source, request.target, self.in_flight
        );

        tokio::spawn(async move {
            let result = service.translate(&request).await;
            // The controller may have been dropped (form unmounted).
            let _ = resolutions.send(Resolution { submission, result });
        })
    }

    /// Apply the next queued event, waiting for one if necessary.
    ///
    /// Returns `false` once no further event can arrive: every handle is
    /// gone and no submission is outstanding.
    pub async fn process_next(&mut self) -> bool {
        if self.commands_closed && self.in_flight == 0 {
            return false;
        }

        tokio::select! {
            Some(resolution) = self.resolutions_rx.recv() => {
                self.apply_resolution(resolution);
                true
            }
            command = self.commands_rx.recv(), if !self.commands_closed => {
                match command {
                    Some(command) => self.apply_command(command),
                    None => {
                        debug!("All form handles dropped");
                        self.commands_closed = true;
                    }
                }
                true
            }
        }
    }

    /// Process events until every handle is dropped and no response is pending.
    pub async fn run(mut self) {
        info!("Form controller started");
        while self.process_next().await {}
        info!("Form controller stopped");
    }

    fn apply_command(&mut self, command: Command) {
        match command {
            Command::SetSourceLanguage(code, reply) => {
                let _ = reply.send(self.set_source_language(&code));
            }
            Command::SetTargetLanguage(code, reply) => {
                let _ = reply.send(self.set_target_language(&code));
            }
            Command::SetInputText(text, reply) => {
                self.set_input_text(text);
                let _ = reply.send(());
            }
            Command::Submit(reply) => {
                let _task = self.submit();
                let _ = reply.send(self.next_submission);
            }
            Command::Post(posted, reply) => {
                let result = self
                    .apply_and_submit(posted)
                    .map(|_task| self.next_submission);
                let _ = reply.send(result);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.state.clone());
            }
            Command::Render(reply) => {
                let _ = reply.send(self.view.clone());
            }
        }
    }

    fn apply_resolution(&mut self, resolution: Resolution) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match resolution.result {
            Ok(translated) => {
                info!(
                    "Submission #{} resolved ({} chars)",
                    resolution.submission,
                    translated.chars().count()
                );
                self.state.output_text = translated;
                self.rerender();
            }
            Err(TranslateError::MissingTranslatedText) => {
                warn!(
                    "Submission #{} resolved without translatedText, clearing output",
                    resolution.submission
                );
                self.state.output_text.clear();
                self.rerender();
            }
            Err(e) => {
                warn!("Submission #{} failed: {}", resolution.submission, e);
            }
        }
    }

    fn rerender(&mut self) {
        self.view = render(&self.state);
        debug!("Form re-rendered ({} bytes)", self.view.len());
    }
}

/// Cloneable sender side of a [`FormController`].
#[derive(Debug, Clone)]
pub struct FormHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl FormHandle {
    pub async fn set_source_language(&self, code: &str) -> Result<(), FormError> {
        self.request(|reply| Command::SetSourceLanguage(code.to_string(), reply))
            .await?
    }

    pub async fn set_target_language(&self, code: &str) -> Result<(), FormError> {
        self.request(|reply| Command::SetTargetLanguage(code.to_string(), reply))
            .await?
    }

    pub async fn set_input_text(&self, text: impl Into<String>) -> Result<(), FormError> {
        let text = text.into();
        self.request(|reply| Command::SetInputText(text, reply)).await
    }

    /// Start a submission and return its number without waiting for the response.
    pub async fn submit(&self) -> Result<u64, FormError> {
        self.request(Command::Submit).await
    }

    /// Apply every posted field and submit, without other events in between.
    pub async fn apply_and_submit(&self, posted: PostedForm) -> Result<u64, FormError> {
        self.request(|reply| Command::Post(posted, reply)).await?
    }

    pub async fn snapshot(&self) -> Result<FormState, FormError> {
        self.request(Command::Snapshot).await
    }

    pub async fn render(&self) -> Result<String, FormError> {
        self.request(Command::Render).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, FormError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(command(reply_tx))
            .map_err(|_| FormError::ControllerStopped)?;
        reply_rx.await.map_err(|_| FormError::ControllerStopped)
    }
}
