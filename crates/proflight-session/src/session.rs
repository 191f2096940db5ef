//! Session state, locking and codec dispatch

use crate::{SessionError, SessionResult};
use hid_proflight_protocol::{
    DecodeOutcome, MultipanelState, PanelKind, RadiopanelState, ResetMode, SAITEK_VENDOR_ID,
};
use parking_lot::RwLock;
use proflight_hid_common::{FeatureReportSink, HidDeviceInfo};
use tracing::{debug, trace, warn};

/// The one live panel-state variant, matching the session's product tag by
/// construction. Dispatch is an exhaustive match — there is no unreachable
/// default arm to get wrong.
#[derive(Debug, Clone)]
pub enum PanelState {
    Multipanel(MultipanelState),
    Radiopanel(RadiopanelState),
}

impl PanelState {
    fn for_kind(kind: PanelKind) -> Self {
        match kind {
            PanelKind::Multipanel => Self::Multipanel(MultipanelState::new()),
            PanelKind::Radiopanel => Self::Radiopanel(RadiopanelState::new()),
        }
    }

    pub fn kind(&self) -> PanelKind {
        match self {
            Self::Multipanel(_) => PanelKind::Multipanel,
            Self::Radiopanel(_) => PanelKind::Radiopanel,
        }
    }

    fn reset_mode(&self) -> ResetMode {
        match self {
            Self::Multipanel(state) => state.reset_mode,
            Self::Radiopanel(state) => state.reset_mode,
        }
    }

    fn decode(
        &mut self,
        report_id: u8,
        report_type: u8,
        data: &[u8],
    ) -> Result<DecodeOutcome, hid_proflight_protocol::ProflightError> {
        match self {
            Self::Multipanel(state) => state.decode(report_id, report_type, data),
            Self::Radiopanel(state) => state.decode(report_id, report_type, data),
        }
    }

    fn format_text(&self) -> String {
        match self {
            Self::Multipanel(state) => state.format_text(),
            Self::Radiopanel(state) => state.format_text(),
        }
    }

    fn read_text(&mut self) -> String {
        match self {
            Self::Multipanel(state) => state.read_text(),
            Self::Radiopanel(state) => state.read_text(),
        }
    }

    fn parse_text(&mut self, text: &str) -> Result<(), hid_proflight_protocol::ProflightError> {
        match self {
            Self::Multipanel(state) => state.parse_text(text),
            Self::Radiopanel(state) => state.parse_text(text),
        }
    }

    fn build_report(&self) -> Vec<u8> {
        match self {
            Self::Multipanel(state) => state.build_report(),
            Self::Radiopanel(state) => state.build_report(),
        }
    }
}

struct SessionInner {
    state: PanelState,
    /// Outgoing feature-report buffer, reused across text writes.
    outgoing: Vec<u8>,
}

/// One attached panel: product tag, guarded state, transport collaborator.
pub struct DeviceSession<S: FeatureReportSink> {
    kind: PanelKind,
    transport: S,
    inner: RwLock<SessionInner>,
}

impl<S: FeatureReportSink> DeviceSession<S> {
    /// Create a session for a freshly attached panel. State starts zeroed
    /// and the reset policy defaults to reset-on-read.
    pub fn new(kind: PanelKind, transport: S) -> Self {
        Self {
            kind,
            transport,
            inner: RwLock::new(SessionInner {
                state: PanelState::for_kind(kind),
                outgoing: Vec::with_capacity(kind.feature_report_size()),
            }),
        }
    }

    /// Create a session from an enumerated HID device.
    ///
    /// # Errors
    /// Returns [`SessionError::UnsupportedDevice`] when the vendor/product
    /// ids do not name one of the two panels.
    pub fn from_device_info(info: &HidDeviceInfo, transport: S) -> SessionResult<Self> {
        let kind = if info.vendor_id == SAITEK_VENDOR_ID {
            PanelKind::from_product_id(info.product_id)
        } else {
            None
        };
        let kind = kind.ok_or(SessionError::UnsupportedDevice {
            vendor_id: info.vendor_id,
            product_id: info.product_id,
        })?;
        debug!(panel = kind.display_name(), path = %info.path, "panel session created");
        Ok(Self::new(kind, transport))
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    /// Feed one raw input report to the panel codec.
    ///
    /// # Errors
    /// Propagates the codec's decode failure for short reports.
    pub fn on_raw_report(
        &self,
        report_id: u8,
        report_type: u8,
        data: &[u8],
    ) -> SessionResult<DecodeOutcome> {
        let mut inner = self.inner.write();
        let outcome = inner.state.decode(report_id, report_type, data)?;
        trace!(report_id, report_type, len = data.len(), ?outcome, "raw report");
        Ok(outcome)
    }

    /// Produce the status text. Takes the shared lock unless the
    /// reset-on-read policy is active, in which case the read mutates the
    /// accumulators and needs the exclusive lock.
    pub fn on_text_read(&self) -> String {
        {
            let inner = self.inner.read();
            if inner.state.reset_mode() == ResetMode::Normal {
                return inner.state.format_text();
            }
        }
        // Policy may have changed between the two acquisitions; read_text
        // re-checks it under the write lock.
        let mut inner = self.inner.write();
        inner.state.read_text()
    }

    /// Apply a text write: parse the display/LED/reset portion, build the
    /// feature report and hand it to the transport. One trailing newline is
    /// stripped before parsing but counted in the returned consumed length.
    ///
    /// # Errors
    /// Parse failures leave the state unmodified. A transport failure is the
    /// write's result; the parsed state is not rolled back and the lock is
    /// released either way.
    pub fn on_text_write(&self, text: &str) -> SessionResult<usize> {
        let consumed = text.len();
        let body = text.strip_suffix('\n').unwrap_or(text);

        let mut inner = self.inner.write();
        let SessionInner { state, outgoing } = &mut *inner;

        state.parse_text(body)?;
        let contract = self.kind.text_write_size();
        let body_len = body.chars().count();
        if body_len > contract {
            warn!(len = body_len, contract, "status text longer than contract; excess ignored");
        }

        *outgoing = state.build_report();
        let sent = self.transport.send_feature_report(outgoing)?;
        debug!(bytes = sent, panel = self.kind.display_name(), "feature report sent");
        Ok(consumed)
    }
}
