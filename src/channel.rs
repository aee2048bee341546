/*!
 * Per-channel and per-service element accumulation.
 *
 * An `ElementSequence` holds elements in arrival order. At most the trailing
 * element may be an open text run; character events extend it in place and
 * any other element closes it.
 */

use log::trace;

use crate::caption_time::CaptionTime;
use crate::elements::{CaptionElement, ElementKind, TextRun};

/// Number of CEA-608 channels
pub const LINE21_CHANNELS: usize = 4;

/// Number of CEA-708 services
pub const DTVCC_SERVICES: usize = 16;

#[derive(Debug, Clone, Default)]
pub struct ElementSequence {
    elements: Vec<CaptionElement>,
    run_open: bool,
}

impl ElementSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `edit` to the open trailing text run, starting a new run at
    /// `time` if the sequence is empty or ends in a closed element
    pub fn with_open_run<F>(&mut self, time: CaptionTime, edit: F)
    where
        F: FnOnce(&mut TextRun),
    {
        if self.run_open {
            let index = self.elements.len().saturating_sub(1);
            if let Some(CaptionElement { kind: ElementKind::Text(run), .. }) = self.elements.last_mut() {
                trace!("Extending open text run at index {}", index);
                edit(run);
                return;
            }
        }

        let mut run = TextRun::new();
        edit(&mut run);
        self.elements.push(CaptionElement::new(time, ElementKind::Text(run)));
        self.run_open = true;
    }

    /// Appends a closed element, closing any open text run
    pub fn push(&mut self, element: CaptionElement) {
        self.elements.push(element);
        self.run_open = false;
    }

    /// Whether the next character event will extend the trailing run
    pub fn has_open_run(&self) -> bool {
        self.run_open
    }

    pub fn elements(&self) -> &[CaptionElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn clear(&mut self) {
        self.elements.clear();
        self.run_open = false;
    }
}
