//! Simulator: owns the harts, their bus ports, and the shared system.
//!
//! Each tick advances every hart by exactly one FSM step, in index order:
//! 1. **Request:** the hart's combinational `BusRequest` is taken from its current state.
//! 2. **Handshake:** the hart's `BusPort` services the request against the shared bus.
//! 3. **Step:** the hart samples the handshake and its control lines and advances.
//!
//! Harts share nothing but the bus; a hart never observes another hart's
//! state except through memory.

use std::path::Path;

use tracing::{debug, info};

use crate::common::constants::EXTERNAL_TRIGGER_INPUTS;
use crate::common::error::SimError;
use crate::config::Config;
use crate::core::hart::{Hart, HartInputs, HartOutputs};
use crate::sim::loader::{self, LoadedImage};
use crate::soc::{BusPort, System};

/// Control lines the harness drives into one hart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlLines {
    /// Halt request from the debug module.
    pub haltreq: bool,
    /// External trigger inputs.
    pub external_triggers: [bool; EXTERNAL_TRIGGER_INPUTS],
    /// Machine timer interrupt.
    pub timer_irq: bool,
    /// Machine software interrupt.
    pub software_irq: bool,
    /// Machine external interrupt.
    pub external_irq: bool,
}

/// Why `Simulator::run` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every hart completed its `tohost` store.
    Exited,
    /// Every hart that has not exited is parked in debug mode.
    Halted,
    /// The cycle limit was reached.
    CycleLimit,
}

/// Top-level simulator: N harts on one shared bus.
#[derive(Debug)]
pub struct Simulator {
    config: Config,
    /// Shared bus and devices.
    pub system: System,
    harts: Vec<Hart>,
    ports: Vec<BusPort>,
    lines: Vec<ControlLines>,
    outputs: Vec<HartOutputs>,
    cycle: u64,
    halt_at: Option<u64>,
}

impl Simulator {
    /// Builds the system and `config.system.harts` harts in their reset state.
    pub fn new(config: &Config) -> Self {
        let n = config.system.harts.max(1);
        let mut sim = Self {
            config: config.clone(),
            system: System::new(config),
            harts: Vec::with_capacity(n),
            ports: vec![BusPort::new(config.system.bus_latency); n],
            lines: vec![ControlLines::default(); n],
            outputs: vec![HartOutputs::default(); n],
            cycle: 0,
            halt_at: None,
        };
        sim.rebuild_harts();
        sim
    }

    fn rebuild_harts(&mut self) {
        let n = self.ports.len();
        self.harts = (0..n)
            .map(|id| {
                let mut hart = Hart::new(&self.config.core, id as u32);
                hart.set_trace(self.config.general.trace_instructions);
                hart
            })
            .collect();
    }

    /// Loads a program and points every hart at its entry and `tohost`.
    ///
    /// ELF images override `core.reset_pc` with their entry point and
    /// `core.tohost` with their `tohost` symbol; harts are reset afterwards.
    pub fn load_program(&mut self, path: &Path) -> Result<LoadedImage, SimError> {
        let image = loader::load_program(&mut self.system.bus, path, self.config.core.reset_pc)?;
        if let Some(entry) = image.entry {
            self.config.core.reset_pc = entry;
        }
        if let Some(tohost) = image.tohost {
            self.config.core.tohost = tohost;
        }
        self.rebuild_harts();
        info!(
            bytes = image.bytes_loaded,
            entry = format_args!("{:#010x}", self.config.core.reset_pc),
            tohost = format_args!("{:#010x}", self.config.core.tohost),
            "program loaded"
        );
        Ok(image)
    }

    /// Writes debugger code at the debug entry address.
    pub fn write_program_buffer(&mut self, words: &[u32]) -> Result<(), SimError> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        self.system
            .bus
            .load_binary_at(&bytes, self.config.core.debug_entry)
    }

    /// Asserts `haltreq` on every hart for the single tick at `cycle`.
    pub const fn schedule_halt(&mut self, cycle: u64) {
        self.halt_at = Some(cycle);
    }

    /// Control lines of hart `idx`; they hold their value across ticks.
    pub fn lines_mut(&mut self, idx: usize) -> Option<&mut ControlLines> {
        self.lines.get_mut(idx)
    }

    /// Advances every hart by one FSM step.
    ///
    /// # Returns
    ///
    /// The outputs of each hart on this tick, in hart order.
    pub fn tick(&mut self) -> &[HartOutputs] {
        let pulse_halt = self.halt_at == Some(self.cycle);
        if pulse_halt {
            debug!(cycle = self.cycle, "halt request asserted");
        }

        for (i, hart) in self.harts.iter_mut().enumerate() {
            let req = hart.bus_request();
            let bus_in = self.ports[i].service(req, &mut self.system.bus);
            let lines = self.lines[i];
            let inputs = HartInputs {
                haltreq: lines.haltreq || pulse_halt,
                external_triggers: lines.external_triggers,
                timer_irq: lines.timer_irq,
                software_irq: lines.software_irq,
                external_irq: lines.external_irq,
                ..bus_in
            };
            self.outputs[i] = hart.step(&inputs);
        }
        self.cycle += 1;
        &self.outputs
    }

    /// Ticks until every hart exits or halts, or the cycle limit is reached.
    pub fn run(&mut self) -> RunOutcome {
        let limit = self.config.general.max_cycles;
        while self.cycle < limit {
            let _ = self.tick();
            if self.harts.iter().all(Hart::exited) {
                return RunOutcome::Exited;
            }
            if self
                .harts
                .iter()
                .all(|h| h.exited() || h.in_debug_mode())
            {
                return RunOutcome::Halted;
            }
        }
        RunOutcome::CycleLimit
    }

    /// Cycles ticked so far.
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Effective configuration (after any ELF overrides).
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// All harts, indexed by `mhartid`.
    pub fn harts(&self) -> &[Hart] {
        &self.harts
    }

    /// One hart.
    pub fn hart(&self, idx: usize) -> Option<&Hart> {
        self.harts.get(idx)
    }

    /// One hart, mutably (debugger access).
    pub fn hart_mut(&mut self, idx: usize) -> Option<&mut Hart> {
        self.harts.get_mut(idx)
    }
}
