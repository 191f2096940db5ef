//! Feature-report transport seam
//!
//! The panel codecs are I/O-free; delivering a built feature report to the
//! physical device is the job of whatever owns the raw handle. That
//! collaborator is represented by [`FeatureReportSink`], and tests use the
//! in-memory mock below.

use crate::{ProflightHidError, ProflightHidResult};

/// Synchronous, bounded transmission of one fixed-size feature report.
pub trait FeatureReportSink: Send + Sync {
    /// Transmit `data` (report id in byte 0) and return the number of bytes
    /// accepted by the device.
    fn send_feature_report(&self, data: &[u8]) -> ProflightHidResult<usize>;
}

/// Sinks are usable through shared ownership, so a session can move an
/// `Arc` clone in while the owner keeps inspecting the transport.
impl<T: FeatureReportSink> FeatureReportSink for std::sync::Arc<T> {
    fn send_feature_report(&self, data: &[u8]) -> ProflightHidResult<usize> {
        (**self).send_feature_report(data)
    }
}

pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Records every transmitted report; can simulate a detached device.
    pub struct MockFeatureSink {
        sent: Mutex<Vec<Vec<u8>>>,
        connected: Mutex<bool>,
    }

    impl MockFeatureSink {
        pub fn new() -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                connected: Mutex::new(true),
            }
        }

        pub fn sent_reports(&self) -> Vec<Vec<u8>> {
            let sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.clone()
        }

        pub fn disconnect(&self) {
            let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
            *connected = false;
        }

        pub fn reconnect(&self) {
            let mut connected = self.connected.lock().unwrap_or_else(|e| e.into_inner());
            *connected = true;
        }
    }

    impl FeatureReportSink for MockFeatureSink {
        fn send_feature_report(&self, data: &[u8]) -> ProflightHidResult<usize> {
            let connected = *self.connected.lock().unwrap_or_else(|e| e.into_inner());
            if !connected {
                return Err(ProflightHidError::Disconnected);
            }
            let mut sent = self.sent.lock().unwrap_or_else(|e| e.into_inner());
            sent.push(data.to_vec());
            Ok(data.len())
        }
    }

    impl Default for MockFeatureSink {
        fn default() -> Self {
            Self::new()
        }
    }
}
