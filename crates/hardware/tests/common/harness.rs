use rvdbg_core::Simulator;
use rvdbg_core::config::Config;
use rvdbg_core::core::hart::{Hart, HartOutputs};
use rvdbg_core::sim::ControlLines;

/// Upper bound on steps per expected retirement before a helper gives up.
const STEPS_PER_RETIREMENT: u64 = 64;

pub struct TestContext {
    pub sim: Simulator,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter("rvdbg_core=debug")
            .try_init();
        Self {
            sim: Simulator::new(&config),
        }
    }

    /// Base address programs are loaded at (the reset PC).
    pub fn base(&self) -> u32 {
        self.sim.config().core.reset_pc
    }

    /// Load a sequence of 32-bit instructions at the reset PC.
    pub fn load_program(mut self, instructions: &[u32]) -> Self {
        let base = self.base();
        self.write_words(base, instructions);
        self
    }

    /// Write words at `addr` through the shared bus.
    pub fn write_words(&mut self, addr: u32, words: &[u32]) {
        for (i, w) in words.iter().enumerate() {
            self.sim.system.bus.write_u32(addr + (i as u32) * 4, *w);
        }
    }

    pub fn read_word(&mut self, addr: u32) -> u32 {
        self.sim.system.bus.read_u32(addr)
    }

    /// Replace the debug ROM contents.
    pub fn program_buffer(mut self, words: &[u32]) -> Self {
        self.sim.write_program_buffer(words).unwrap();
        self
    }

    pub fn hart(&self) -> &Hart {
        self.sim.hart(0).unwrap()
    }

    pub fn hart_mut(&mut self) -> &mut Hart {
        self.sim.hart_mut(0).unwrap()
    }

    pub fn lines(&mut self) -> &mut ControlLines {
        self.sim.lines_mut(0).unwrap()
    }

    pub fn set_reg(&mut self, reg: usize, val: u32) {
        self.hart_mut().set_reg(reg, val);
    }

    pub fn get_reg(&self, reg: usize) -> u32 {
        self.hart().reg(reg)
    }

    /// Advance one tick and return hart 0's outputs.
    pub fn tick(&mut self) -> HartOutputs {
        self.sim.tick()[0]
    }

    /// Tick until hart 0 has retired `n` more instructions.
    ///
    /// Returns the outputs of the step that retired the last one.
    pub fn run_until_retired(&mut self, n: u64) -> HartOutputs {
        let mut retired = 0;
        for _ in 0..n.max(1) * STEPS_PER_RETIREMENT {
            let out = self.tick();
            if out.instruction_retired {
                retired += 1;
                if retired == n {
                    return out;
                }
            }
        }
        panic!("only {retired} of {n} instructions retired");
    }

    /// Tick until `pred` holds for hart 0, at most `limit` ticks.
    pub fn run_until(&mut self, limit: u64, pred: impl Fn(&Hart) -> bool) -> bool {
        for _ in 0..limit {
            if pred(self.hart()) {
                return true;
            }
            let _ = self.tick();
        }
        pred(self.hart())
    }
}
