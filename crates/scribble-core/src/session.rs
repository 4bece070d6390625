//! Per-session drawing and prediction state
//!
//! The UI layer owns exactly one `Session`. Every stroke update replaces the
//! drawing snapshot and reruns the full locate -> normalize -> tensorize pass
//! before the next input event is handled; nothing is pooled or shared
//! between cycles.
//!
//! Prediction requests get a monotonically increasing ticket. A classifier
//! call is allowed to finish after newer drawing state exists; its result is
//! still valid for the state it was computed against and is only superseded
//! when a newer ticket's result lands. There is no cancellation.

use crate::classifier::GlyphMode;
use crate::pipeline::{preprocess, CANONICAL_SIZE, FEATURE_LEN};
use crate::raster::RasterImage;

/// Snapshot handed to a classifier call.
#[derive(Debug, Clone)]
pub struct PredictionTicket {
    /// Monotonic request id; higher means requested later
    pub id: u64,

    /// Mode the request was issued under
    pub mode: GlyphMode,

    /// Feature snapshot taken at request time
    pub features: Vec<f32>,
}

/// Explicit state for one drawing session.
pub struct Session {
    mode: GlyphMode,
    drawing: RasterImage,
    canonical: RasterImage,
    features: Vec<f32>,
    next_ticket: u64,
    displayed_ticket: Option<u64>,
}

impl Session {
    /// Start a session with a blank drawing surface of the given size.
    pub fn new(mode: GlyphMode, width: u32, height: u32) -> Self {
        let drawing = RasterImage::blank(width, height);
        let glyph = preprocess(&drawing);
        Self {
            mode,
            drawing,
            canonical: glyph.canonical,
            features: glyph.features,
            next_ticket: 0,
            displayed_ticket: None,
        }
    }

    pub fn mode(&self) -> GlyphMode {
        self.mode
    }

    /// Switch label alphabet. Clears any displayed result, since it belongs
    /// to the other alphabet.
    pub fn set_mode(&mut self, mode: GlyphMode) {
        self.mode = mode;
        self.displayed_ticket = None;
    }

    /// Replace the drawing snapshot and rerun the preprocessing pass.
    pub fn update_drawing(&mut self, drawing: RasterImage) {
        let glyph = preprocess(&drawing);
        self.drawing = drawing;
        self.canonical = glyph.canonical;
        self.features = glyph.features;
    }

    /// Reset to a blank surface of the same dimensions.
    pub fn clear(&mut self) {
        let blank = RasterImage::blank(self.drawing.width, self.drawing.height);
        self.update_drawing(blank);
        self.displayed_ticket = None;
    }

    /// Current drawing snapshot.
    pub fn drawing(&self) -> &RasterImage {
        &self.drawing
    }

    /// Canonical 28x28 preview of the current drawing.
    pub fn canonical(&self) -> &RasterImage {
        debug_assert_eq!(self.canonical.width, CANONICAL_SIZE);
        &self.canonical
    }

    /// Feature vector of the current drawing.
    pub fn features(&self) -> &[f32] {
        debug_assert_eq!(self.features.len(), FEATURE_LEN);
        &self.features
    }

    /// Issue a ticket snapshotting the current features and mode.
    pub fn begin_prediction(&mut self) -> PredictionTicket {
        let id = self.next_ticket;
        self.next_ticket += 1;
        PredictionTicket {
            id,
            mode: self.mode,
            features: self.features.clone(),
        }
    }

    /// Decide whether a completed prediction should be displayed.
    ///
    /// Newest wins: a result is shown unless a result from a later ticket is
    /// already on screen, or the mode changed since the request was issued.
    pub fn accept_result(&mut self, ticket: &PredictionTicket) -> bool {
        if ticket.mode != self.mode {
            return false;
        }
        if let Some(displayed) = self.displayed_ticket {
            if displayed > ticket.id {
                return false;
            }
        }
        self.displayed_ticket = Some(ticket.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_blank() {
        let session = Session::new(GlyphMode::Digits, 280, 280);
        assert_eq!(session.canonical().width, CANONICAL_SIZE);
        assert!(session.features().iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_update_drawing_refreshes_preview_and_features() {
        let mut session = Session::new(GlyphMode::Digits, 100, 100);

        let mut drawing = RasterImage::blank(100, 100);
        for y in 30..70 {
            for x in 48..52 {
                let idx = drawing.pixel_index(x, y);
                drawing.data[idx] = 0;
                drawing.data[idx + 1] = 0;
                drawing.data[idx + 2] = 0;
            }
        }
        session.update_drawing(drawing);

        assert!(
            session.features().iter().any(|&f| f > 0.5),
            "ink should show up in the feature snapshot"
        );

        session.clear();
        assert!(session.features().iter().all(|&f| f == 0.0));
    }

    #[test]
    fn test_tickets_are_monotonic_and_snapshot_mode() {
        let mut session = Session::new(GlyphMode::Digits, 50, 50);
        let a = session.begin_prediction();
        let b = session.begin_prediction();
        assert!(b.id > a.id);
        assert_eq!(a.mode, GlyphMode::Digits);
        assert_eq!(a.features.len(), FEATURE_LEN);
    }

    #[test]
    fn test_stale_result_is_superseded_only_by_newer_display() {
        let mut session = Session::new(GlyphMode::Digits, 50, 50);
        let old = session.begin_prediction();
        let new = session.begin_prediction();

        // The newer request completes first and is displayed.
        assert!(session.accept_result(&new));

        // The stale one finishing afterwards must not replace it.
        assert!(!session.accept_result(&old));
    }

    #[test]
    fn test_out_of_order_completion_in_request_order_is_fine() {
        let mut session = Session::new(GlyphMode::Digits, 50, 50);
        let first = session.begin_prediction();
        let second = session.begin_prediction();

        // Results arriving in request order both display; each supersedes
        // the previous.
        assert!(session.accept_result(&first));
        assert!(session.accept_result(&second));
    }

    #[test]
    fn test_mode_switch_invalidates_in_flight_results() {
        let mut session = Session::new(GlyphMode::Digits, 50, 50);
        let ticket = session.begin_prediction();

        session.set_mode(GlyphMode::Letters);
        assert!(
            !session.accept_result(&ticket),
            "a digit-mode result must not display in letter mode"
        );
    }
}
