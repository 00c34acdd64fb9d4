quantity!(
    /// Mechanical or electrical power.
    ///
    /// Positive battery power means discharging, negative – charging.
    Kilowatts, suffix: "kW", precision: 2
);
