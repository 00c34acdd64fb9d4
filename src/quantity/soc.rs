quantity!(
    /// Battery state of charge, normalized to `0..=1`.
    StateOfCharge, suffix: "%", precision: 1, scale: 100.0
);

impl StateOfCharge {
    /// Midpoint between the two bounds.
    pub fn midpoint(min: Self, max: Self) -> Self {
        Self(f64::midpoint(min.0, max.0))
    }
}
