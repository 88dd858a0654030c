//! Interaction state machine driving detection and translation.
//!
//! The orchestrator owns the [`UiState`] and is the only writer. Front-ends
//! call the action methods (`set_input`, `translate`, `swap`, ...) and render
//! `snapshot()`; transient notifications are delivered on the channel
//! returned by [`Orchestrator::new`].
//!
//! Every input edit bumps a generation counter. Oracle results are applied
//! only when the generation they were issued under is still current, so a
//! slow response for old text never overwrites state for newer text.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::catalog;
use crate::clipboard::Clipboard;
use crate::config::UiConfig;
use crate::debounce::Debouncer;
use crate::detect::LanguageDetector;
use crate::error::{LinguaError, Result};
use crate::oracle::Oracle;
use crate::session::{Status, UiState};
use crate::translate::{TranslationRequest, Translator};

pub const MSG_EMPTY_INPUT: &str = "Please enter text to translate.";
pub const MSG_NO_SOURCE: &str =
    "Could not determine source language. Try typing more text or check if the language is supported.";
pub const MSG_NO_TARGET: &str = "Please select a target language.";
pub const MSG_TRANSLATION_FAILED: &str =
    "Error translating text. The language pair might not be supported or an API error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotificationKind {
    Info,
    Success,
    Destructive,
}

/// Transient, non-blocking message for the user (a toast)
#[derive(Debug, Clone, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
    pub at: DateTime<Local>,
}

impl Notification {
    fn new(kind: NotificationKind, title: &str, description: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            description: description.into(),
            at: Local::now(),
        }
    }
}

struct Inner {
    detector: LanguageDetector,
    translator: Translator,
    clipboard: Arc<dyn Clipboard>,
    state: Mutex<UiState>,
    generation: AtomicU64,
    debouncer: Debouncer,
    debounce: Duration,
    notifier: mpsc::UnboundedSender<Notification>,
}

impl Inner {
    fn state(&self) -> MutexGuard<'_, UiState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn notify(&self, notification: Notification) {
        // the front-end may have gone away; nothing left to tell
        let _ = self.notifier.send(notification);
    }

    async fn run_detection(self: Arc<Self>, generation: u64, text: String) {
        {
            let mut state = self.state();
            if generation != self.current_generation() {
                return;
            }
            // an open translation stays visible as the busy state
            if state.status != Status::Translating {
                state.status = Status::Detecting;
            }
            state.output_text.clear();
            state.error = None;
        }

        debug!("Detecting language of {} chars", text.chars().count());
        let result = self.detector.detect(&text).await;

        let mut state = self.state();
        if generation != self.current_generation() {
            debug!("Discarding detection result for superseded input");
            return;
        }

        match result {
            Ok(detection) => {
                info!("Detected language: {}", detection.language);
                state.detected_language_name = detection.language.clone();
                state.source_language_for_api = detection.language;
                if state.status == Status::Detecting {
                    state.status = Status::Detected;
                }
            }
            Err(e) => {
                warn!("Error detecting language: {}", e);
                state.detected_language_name.clear();
                state.source_language_for_api.clear();
                if state.status == Status::Detecting {
                    state.status = Status::DetectionFailed;
                }
                drop(state);
                self.notify(Notification::new(
                    NotificationKind::Destructive,
                    "Language Detection Failed",
                    "Could not automatically detect the input language.",
                ));
            }
        }
    }
}

/// Drives one translation session; cheap to clone, clones share state
#[derive(Clone)]
pub struct Orchestrator {
    inner: Arc<Inner>,
}

impl Orchestrator {
    /// Create an orchestrator bound to the runtime it is constructed in.
    ///
    /// Must be called from within a tokio runtime; use [`Orchestrator::with_runtime`]
    /// to construct it elsewhere.
    pub fn new(
        oracle: Arc<dyn Oracle>,
        clipboard: Arc<dyn Clipboard>,
        config: &UiConfig,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        Self::with_runtime(oracle, clipboard, config, Handle::current())
    }

    /// Create an orchestrator whose deferred work runs on `runtime`.
    ///
    /// The action methods may then be called from any thread, including one
    /// without a runtime of its own (a GUI event loop, for instance).
    pub fn with_runtime(
        oracle: Arc<dyn Oracle>,
        clipboard: Arc<dyn Clipboard>,
        config: &UiConfig,
        runtime: Handle,
    ) -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (notifier, notifications) = mpsc::unbounded_channel();
        let inner = Inner {
            detector: LanguageDetector::new(oracle.clone()),
            translator: Translator::new(oracle),
            clipboard,
            state: Mutex::new(UiState::new(config.default_target.clone())),
            generation: AtomicU64::new(0),
            debouncer: Debouncer::new(runtime),
            debounce: Duration::from_millis(config.debounce_ms),
            notifier,
        };
        (Self { inner: Arc::new(inner) }, notifications)
    }

    pub fn snapshot(&self) -> UiState {
        self.inner.state().clone()
    }

    /// Replace the input text.
    ///
    /// Empty (after trimming) input clears every derived field immediately;
    /// anything else re-arms the detection debounce.
    pub fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.inner.state();
        state.input_text = text;
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let trimmed = state.input_text.trim().to_string();
        if trimmed.is_empty() {
            self.inner.debouncer.cancel();
            state.reset_derived();
            return;
        }
        drop(state);

        let inner = self.inner.clone();
        self.inner
            .debouncer
            .schedule(self.inner.debounce, inner.run_detection(generation, trimmed));
    }

    pub fn clear_input(&self) {
        self.set_input(String::new());
    }

    /// Select the translation target by catalog code; an empty code clears the selection
    pub fn select_target(&self, code: &str) -> Result<()> {
        if !code.is_empty() && !catalog::is_selectable(code) {
            return Err(LinguaError::Precondition(format!("Unknown target language code '{}'", code)));
        }
        self.inner.state().target_language_code = code.to_string();
        Ok(())
    }

    /// Translate the current input into the selected target language
    pub async fn translate(&self) -> Result<()> {
        let (request, generation) = {
            let mut state = self.inner.state();
            let text = state.input_text.trim().to_string();

            let missing = if text.is_empty() {
                Some(MSG_EMPTY_INPUT)
            } else if state.source_language_for_api.is_empty() {
                Some(MSG_NO_SOURCE)
            } else if state.target_language_code.is_empty() {
                Some(MSG_NO_TARGET)
            } else {
                None
            };

            if let Some(message) = missing {
                state.error = Some(message.to_string());
                drop(state);
                self.inner.notify(Notification::new(
                    NotificationKind::Destructive,
                    "Translation Error",
                    message,
                ));
                return Err(LinguaError::Precondition(message.to_string()));
            }

            state.status = Status::Translating;
            state.output_text.clear();
            state.error = None;

            let request = catalog::find_by_code(&state.target_language_code)
                .ok_or_else(|| LinguaError::Translation("Invalid target language selected.".to_string()))
                .and_then(|target| {
                    TranslationRequest::new(&text, state.source_language_for_api.clone(), target.label)
                });
            (request, self.inner.current_generation())
        };

        let result = match request {
            Ok(request) => self.inner.translator.translate(&request).await,
            Err(e) => Err(e),
        };

        let mut state = self.inner.state();
        if generation != self.inner.current_generation() {
            debug!("Discarding translation result for superseded input");
            if state.status == Status::Translating {
                state.status = state.settled_status();
            }
            return Ok(());
        }

        match result {
            Ok(translation) => {
                state.output_text = translation.translated_text;
                state.status = Status::Translated;
                Ok(())
            }
            Err(e) => {
                warn!("Error translating text: {}", e);
                state.error = Some(MSG_TRANSLATION_FAILED.to_string());
                state.status = Status::TranslationFailed;
                drop(state);
                self.inner.notify(Notification::new(
                    NotificationKind::Destructive,
                    "Translation Error",
                    MSG_TRANSLATION_FAILED,
                ));
                Err(e)
            }
        }
    }

    /// Feed the translation back as input and aim at the previously detected language.
    ///
    /// Returns false without touching anything unless output, detected
    /// language and target are all present.
    pub fn swap(&self) -> bool {
        let new_input = {
            let mut state = self.inner.state();
            if state.output_text.is_empty()
                || state.detected_language_name.is_empty()
                || state.target_language_code.is_empty()
            {
                return false;
            }

            let detected = state.detected_language_name.clone();
            match catalog::find_by_label(&detected).filter(|option| catalog::is_selectable(option.code)) {
                Some(option) => state.target_language_code = option.code.to_string(),
                None => self.inner.notify(Notification::new(
                    NotificationKind::Info,
                    "Swap Info",
                    format!(
                        "Could not automatically set target to \"{}\". Please select manually if needed.",
                        detected
                    ),
                )),
            }

            std::mem::take(&mut state.output_text)
        };

        self.set_input(new_input);
        true
    }

    /// Copy the translation to the clipboard; returns false when there is nothing to copy
    pub fn copy_output(&self) -> Result<bool> {
        let output = self.inner.state().output_text.clone();
        if output.is_empty() {
            return Ok(false);
        }

        match self.inner.clipboard.set_contents(&output) {
            Ok(()) => {
                self.inner.notify(Notification::new(
                    NotificationKind::Success,
                    "Copied!",
                    "Text copied to clipboard.",
                ));
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to copy text: {}", e);
                self.inner.notify(Notification::new(
                    NotificationKind::Destructive,
                    "Error",
                    "Failed to copy text.",
                ));
                Err(e)
            }
        }
    }

    /// Whether the translate action should be offered right now
    pub fn can_translate(&self) -> bool {
        let state = self.inner.state();
        !state.is_translating()
            && !state.is_detecting()
            && state.has_input()
            && !state.source_language_for_api.is_empty()
            && !state.target_language_code.is_empty()
    }

    /// Whether the swap action should be offered right now
    pub fn can_swap(&self) -> bool {
        let state = self.inner.state();
        !state.is_translating()
            && !state.is_detecting()
            && !state.output_text.is_empty()
            && !state.detected_language_name.is_empty()
            && !state.target_language_code.is_empty()
    }

    pub fn is_detection_pending(&self) -> bool {
        self.inner.debouncer.is_pending()
    }
}
