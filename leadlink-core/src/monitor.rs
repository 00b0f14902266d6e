//! Monitor cycle coordinating link, leads and display
//!
//! The monitor owns every piece of runtime state and is driven from a
//! periodic tick. One call to [`Monitor::cycle`]:
//!
//! 1. Polls the host link for at most one completed line
//! 2. Feeds it to the heartbeat monitor
//! 3. Checks the heartbeat timeout
//! 4. Redraws the link row if the link state changed
//! 5. Samples the leads-off pins and redraws the lead row on change
//! 6. Sends one telemetry line to the host
//!
//! The cycle never fails. I/O errors are collected in the returned
//! [`CycleReport`] and the next tick simply tries again. A row whose redraw
//! failed stays stale and is redrawn every cycle until a write succeeds.

use heapless::Vec;

use leadlink_hal::{AnalogInput, InputPin, SerialRx, SerialTx};
use leadlink_protocol::{LineTokenizer, Telemetry};

use crate::config::MonitorConfig;
use crate::heartbeat::HeartbeatMonitor;
use crate::leads::LeadFaultDetector;
use crate::presenter::Presenter;
use crate::state::{ConnectionState, EdgeDetector, LeadPlacement};
use crate::traits::{DisplayBackend, DisplayError};

/// Maximum faults a single cycle can produce
pub const MAX_CYCLE_FAULTS: usize = 4;

/// Non-fatal I/O failures seen during a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleFault {
    /// Reading from the host link failed
    SerialRead,
    /// Writing telemetry to the host link failed
    SerialWrite,
    /// Analog conversion failed, no telemetry sent
    Analog,
    /// A display row could not be redrawn
    Display(DisplayError),
}

/// What happened during one cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// New link state, if it changed
    pub connection: Option<ConnectionState>,
    /// New lead placement, if it changed
    pub lead_placement: Option<LeadPlacement>,
    /// Telemetry sent to the host
    pub telemetry: Option<Telemetry>,
    /// Failures encountered
    pub faults: Vec<CycleFault, MAX_CYCLE_FAULTS>,
}

impl CycleReport {
    fn fault(&mut self, fault: CycleFault) {
        let _ = self.faults.push(fault);
    }

    /// Check if any state changed
    pub fn changed(&self) -> bool {
        self.connection.is_some() || self.lead_placement.is_some()
    }
}

/// Monitor state and peripherals
///
/// - `L`: host serial link
/// - `P`, `N`: LO+ and LO- inputs
/// - `A`: ECG analog channel
/// - `D`: character display
pub struct Monitor<L, P, N, A, D> {
    /// Host serial link
    link: L,
    /// Leads-off inputs
    leads: LeadFaultDetector<P, N>,
    /// ECG signal
    analog: A,
    /// Display renderer
    presenter: Presenter<D>,
    /// Inbound line assembly
    tokenizer: LineTokenizer,
    /// Link state
    heartbeat: HeartbeatMonitor,
    /// Lead placement seen last cycle
    lead_placement: EdgeDetector<LeadPlacement>,
    /// Link row does not show the current link state
    connection_stale: bool,
    /// Lead row does not show the current lead placement
    lead_stale: bool,
}

impl<L, P, N, A, D> Monitor<L, P, N, A, D>
where
    L: SerialRx + SerialTx,
    P: InputPin,
    N: InputPin,
    A: AnalogInput,
    D: DisplayBackend,
{
    /// Create a monitor in the power-on state (Disconnected / Fault)
    pub fn new(
        link: L,
        leads: LeadFaultDetector<P, N>,
        analog: A,
        presenter: Presenter<D>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            link,
            leads,
            analog,
            presenter,
            tokenizer: LineTokenizer::new(),
            heartbeat: HeartbeatMonitor::with_timeout(config.heartbeat_timeout_ms),
            lead_placement: EdgeDetector::new(LeadPlacement::Fault),
            connection_stale: true,
            lead_stale: true,
        }
    }

    /// Draw both status rows unconditionally
    ///
    /// Call once after the display is initialized so the screen shows the
    /// power-on state before the first transition. Both rows are attempted
    /// even if the first write fails; the first error is returned.
    pub fn boot(&mut self) -> Result<(), DisplayError> {
        let lead = self.draw_lead_placement();
        let link = self.draw_connection();
        lead.and(link)
    }

    /// Run one monitor cycle at time `now_ms` (ms since boot)
    pub fn cycle(&mut self, now_ms: u32) -> CycleReport {
        self.cycle_with_clock(|| now_ms)
    }

    /// Run one monitor cycle, reading `clock` (ms since boot) when needed
    ///
    /// The link is timed at the start of the cycle. Telemetry is stamped
    /// when it is sent, after any display writes.
    pub fn cycle_with_clock<C>(&mut self, mut clock: C) -> CycleReport
    where
        C: FnMut() -> u32,
    {
        let mut report = CycleReport::default();
        let now_ms = clock();

        let mut connection = match self.tokenizer.poll(&mut self.link) {
            Ok(Some(token)) => self.heartbeat.on_token(&token, now_ms),
            Ok(None) => None,
            Err(_) => {
                report.fault(CycleFault::SerialRead);
                None
            }
        };

        if let Some(state) = self.heartbeat.check_timeout(now_ms) {
            connection = Some(state);
        }

        if let Some(state) = connection {
            report.connection = Some(state);
            self.connection_stale = true;
        }
        if self.connection_stale {
            if let Err(e) = self.draw_connection() {
                report.fault(CycleFault::Display(e));
            }
        }

        let placement = self.leads.sample();
        if let Some(placement) = self.lead_placement.update(placement) {
            report.lead_placement = Some(placement);
            self.lead_stale = true;
        }
        if self.lead_stale {
            if let Err(e) = self.draw_lead_placement() {
                report.fault(CycleFault::Display(e));
            }
        }

        match self.analog.read() {
            Ok(sample) => {
                let telemetry = Telemetry::new(clock(), sample);
                match self.link.write_blocking(telemetry.to_line().as_bytes()) {
                    Ok(()) => report.telemetry = Some(telemetry),
                    Err(_) => report.fault(CycleFault::SerialWrite),
                }
            }
            Err(_) => report.fault(CycleFault::Analog),
        }

        report
    }

    fn draw_connection(&mut self) -> Result<(), DisplayError> {
        let result = self.presenter.render_connection(self.heartbeat.state());
        self.connection_stale = result.is_err();
        result
    }

    fn draw_lead_placement(&mut self) -> Result<(), DisplayError> {
        let result = self
            .presenter
            .render_lead_placement(self.lead_placement.current());
        self.lead_stale = result.is_err();
        result
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.heartbeat.state()
    }

    pub fn lead_placement(&self) -> LeadPlacement {
        self.lead_placement.current()
    }

    pub fn heartbeat(&self) -> &HeartbeatMonitor {
        &self.heartbeat
    }

    pub fn presenter(&self) -> &Presenter<D> {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut Presenter<D> {
        &mut self.presenter
    }
}
