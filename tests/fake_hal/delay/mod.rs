use embedded_hal::delay::DelayNs;

/// Returns immediately, keeping a tally of the time it was asked to wait.
#[derive(Debug, Default)]
pub struct Delay {
    total_ns: u64,
}

impl Delay {
    pub fn new() -> Delay {
        Delay { total_ns: 0 }
    }

    pub fn get_total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
    }
}
