quantity!(
    /// Optimization cost: fuel-equivalent power plus the battery usage penalty.
    Cost, suffix: "¤", precision: 3
);
