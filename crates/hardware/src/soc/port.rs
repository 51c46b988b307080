//! Handshake adapter between a hart and the bus.
//!
//! A `BusPort` turns the hart's combinational `BusRequest` into the
//! valid/ready lines it samples on the next step. It models a fixed response
//! latency:
//! 1. **Countdown:** A new request waits `latency` steps before it is served.
//! 2. **Hold:** Once served, the response stays asserted for as long as the
//!    hart keeps driving the same request.
//! 3. **Reset:** An idle step or a different request restarts the countdown.
//!
//! Writes reach the device exactly once, when the countdown completes.

use crate::core::hart::{BusRequest, HartInputs};
use crate::soc::interconnect::Bus;

/// Latency-modelling handshake adapter for one hart.
#[derive(Clone, Copy, Debug, Default)]
pub struct BusPort {
    latency: u32,
    request: BusRequest,
    remaining: u32,
    response: Option<HartInputs>,
}

impl BusPort {
    /// Creates a port answering every request after `latency` extra steps.
    pub const fn new(latency: u32) -> Self {
        Self {
            latency,
            request: BusRequest::Idle,
            remaining: 0,
            response: None,
        }
    }

    /// Configured latency in steps.
    pub const fn latency(&self) -> u32 {
        self.latency
    }

    /// Services one step of `req` against `bus`.
    ///
    /// # Returns
    ///
    /// Hart inputs with only the handshake fields populated; the caller
    /// fills in the control lines with struct-update syntax.
    pub fn service(&mut self, req: BusRequest, bus: &mut Bus) -> HartInputs {
        if req != self.request {
            self.request = req;
            self.remaining = self.latency;
            self.response = None;
        }
        if req == BusRequest::Idle {
            return HartInputs::default();
        }
        if let Some(resp) = self.response {
            return resp;
        }
        if self.remaining > 0 {
            self.remaining -= 1;
            return HartInputs::default();
        }

        let resp = match req {
            BusRequest::Idle => HartInputs::default(),
            BusRequest::Fetch { addr } => HartInputs {
                imem_valid: true,
                imem_data: bus.read_u32(addr),
                ..HartInputs::default()
            },
            BusRequest::Read { addr } => HartInputs {
                dmem_rvalid: true,
                dmem_rdata: bus.read_u32(addr),
                ..HartInputs::default()
            },
            BusRequest::Write { addr, data } => {
                bus.write_u32(addr, data);
                HartInputs {
                    dmem_wready: true,
                    ..HartInputs::default()
                }
            }
        };
        self.response = Some(resp);
        resp
    }
}
