//! Application state using Sycamore signals
//!
//! This module defines the reactive state for the scribble-web application:
//! the drawing session, the two startup-trained classifiers, and the
//! currently displayed predictions.

use scribble_core::{Classifier, GlyphMode, Prediction, PredictionTicket, RasterImage, Session};
use std::cell::RefCell;
use std::rc::Rc;
use sycamore::prelude::*;

/// Logical size of the drawing surface.
pub const DRAW_SIZE: u32 = 280;

/// Brush width in logical pixels.
pub const BRUSH_SIZE: f64 = 8.0;

/// Nearest-neighbor magnification of the 28x28 preview.
pub const PREVIEW_SCALE: u32 = 5;

/// Classifier readiness
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingStatus {
    /// Models are still training on synthetic data
    Training,
    /// Both classifiers are ready
    Ready,
    /// Training failed; prediction stays disabled
    Error(String),
}

/// Wrapper for a classifier that can be shared across signals
#[derive(Clone, Default)]
pub struct ClassifierHolder {
    inner: Rc<RefCell<Option<Classifier>>>,
}

impl ClassifierHolder {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(None)),
        }
    }

    pub fn set(&self, classifier: Classifier) {
        *self.inner.borrow_mut() = Some(classifier);
    }

    pub fn is_ready(&self) -> bool {
        self.inner.borrow().is_some()
    }

    /// Run a prediction against the held classifier, if any.
    pub fn predict(&self, features: &[f32]) -> Option<Result<Vec<Prediction>, String>> {
        self.inner.borrow().as_ref().map(|c| c.predict(features))
    }
}

/// Wrapper for the drawing session shared across event handlers
#[derive(Clone)]
pub struct SessionHolder {
    inner: Rc<RefCell<Session>>,
}

impl SessionHolder {
    pub fn new(mode: GlyphMode) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Session::new(mode, DRAW_SIZE, DRAW_SIZE))),
        }
    }

    pub fn set_mode(&self, mode: GlyphMode) {
        self.inner.borrow_mut().set_mode(mode);
    }

    pub fn update_drawing(&self, drawing: RasterImage) {
        self.inner.borrow_mut().update_drawing(drawing);
    }

    pub fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    pub fn canonical(&self) -> RasterImage {
        self.inner.borrow().canonical().clone()
    }

    pub fn has_ink(&self) -> bool {
        self.inner.borrow().features().iter().any(|&f| f > 0.0)
    }

    pub fn begin_prediction(&self) -> PredictionTicket {
        self.inner.borrow_mut().begin_prediction()
    }

    pub fn accept_result(&self, ticket: &PredictionTicket) -> bool {
        self.inner.borrow_mut().accept_result(ticket)
    }
}

/// Application state context
#[derive(Clone)]
pub struct AppState {
    /// Selected label alphabet
    pub mode: Signal<GlyphMode>,

    /// Ranked predictions currently on display
    pub predictions: Signal<Vec<Prediction>>,

    /// Startup training status
    pub status: Signal<TrainingStatus>,

    /// A prediction request is in flight
    pub is_predicting: Signal<bool>,

    /// The canvas has at least one inked pixel
    pub has_ink: Signal<bool>,

    /// Digit classifier (trained at startup)
    pub digit_classifier: ClassifierHolder,

    /// Letter classifier (trained at startup)
    pub letter_classifier: ClassifierHolder,

    /// The one drawing session for this page
    pub session: SessionHolder,
}

impl AppState {
    /// Create new application state with default values
    pub fn new() -> Self {
        Self {
            mode: create_signal(GlyphMode::Digits),
            predictions: create_signal(Vec::new()),
            status: create_signal(TrainingStatus::Training),
            is_predicting: create_signal(false),
            has_ink: create_signal(false),
            digit_classifier: ClassifierHolder::new(),
            letter_classifier: ClassifierHolder::new(),
            session: SessionHolder::new(GlyphMode::Digits),
        }
    }

    /// Classifier for the currently selected mode.
    pub fn active_classifier(&self) -> ClassifierHolder {
        match self.mode.get() {
            GlyphMode::Digits => self.digit_classifier.clone(),
            GlyphMode::Letters => self.letter_classifier.clone(),
        }
    }

    /// Switch alphabets and drop predictions from the other one.
    pub fn set_mode(&self, mode: GlyphMode) {
        self.mode.set(mode);
        self.session.set_mode(mode);
        self.predictions.set(Vec::new());
    }

    /// Both classifiers trained and ready for prediction requests.
    pub fn is_ready(&self) -> bool {
        self.status.get_clone() == TrainingStatus::Ready
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
