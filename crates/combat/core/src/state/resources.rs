//! Bounded resource pools (health, mana).

/// A resource pool that always satisfies `0 <= current <= maximum`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    /// Creates a meter, clamping `current` to `maximum`.
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    /// Creates a full meter.
    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current == self.maximum
    }

    /// Headroom left before the meter is full.
    pub fn missing(&self) -> u32 {
        self.maximum - self.current
    }

    /// Adds up to `amount`, never exceeding the maximum.
    ///
    /// Returns the amount actually restored.
    pub fn restore(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.missing());
        self.current += restored;
        restored
    }

    /// Removes up to `amount`, never going below zero.
    ///
    /// Returns the amount actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let drained = amount.min(self.current);
        self.current -= drained;
        drained
    }

    /// Removes `amount` only if the whole amount is available.
    pub fn try_spend(&mut self, amount: u32) -> bool {
        if self.current < amount {
            return false;
        }
        self.current -= amount;
        true
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }

    /// Raises the maximum without touching the current value.
    pub fn grow(&mut self, amount: u32) {
        self.maximum = self.maximum.saturating_add(amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restore_is_clamped_to_headroom() {
        let mut meter = ResourceMeter::new(90, 100);
        assert_eq!(meter.restore(25), 10);
        assert!(meter.is_full());
        assert_eq!(meter.restore(5), 0);
    }

    #[test]
    fn drain_never_underflows() {
        let mut meter = ResourceMeter::new(3, 10);
        assert_eq!(meter.drain(7), 3);
        assert!(meter.is_empty());
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut meter = ResourceMeter::full(20);
        assert!(meter.try_spend(15));
        assert!(!meter.try_spend(6));
        assert_eq!(meter.current(), 5);
    }

    #[test]
    fn new_clamps_current() {
        let meter = ResourceMeter::new(150, 100);
        assert_eq!(meter.current(), 100);
    }
}
