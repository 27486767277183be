use std::cell::RefCell;

use geodraw_types::FeatureRecord;

use crate::drawing_mode::DrawingMode;
use crate::host::DrawingHost;

#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    Ready,
    ModeChange(DrawingMode),
    Change(FeatureRecord),
}

/// Host remembering every notification it receives.
#[derive(Default)]
pub struct RecordingHost {
    calls: RefCell<Vec<HostCall>>,
}

impl RecordingHost {
    pub fn take(&self) -> Vec<HostCall> {
        self.calls.take()
    }

    pub fn changes(&self) -> Vec<FeatureRecord> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                HostCall::Change(record) => Some(record.clone()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingHost for RecordingHost {
    fn on_ready(&self) {
        self.calls.borrow_mut().push(HostCall::Ready);
    }

    fn on_drawing_mode_change(&self, mode: DrawingMode) {
        self.calls.borrow_mut().push(HostCall::ModeChange(mode));
    }

    fn on_change(&self, record: &FeatureRecord) {
        self.calls.borrow_mut().push(HostCall::Change(record.clone()));
    }
}
