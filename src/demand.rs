//! Power demand profile loading.

use std::{fs, path::Path};

use serde::Deserialize;

use crate::{prelude::*, quantity::power::Kilowatts};

/// Power demand per time step, the last entry being the terminal one.
#[must_use]
#[derive(Clone, Debug, Deserialize)]
pub struct DemandProfile {
    pub demand: Vec<Kilowatts>,
}

impl DemandProfile {
    /// Read the profile from a JSON or TOML file, depending on its extension.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let profile = match path.extension().and_then(|extension| extension.to_str()) {
            Some("json") => Self::from_json(&contents),
            Some("toml") => Self::from_toml(&contents),
            _ => bail!("unsupported demand file format: `{}`", path.display()),
        }
        .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(len = profile.demand.len(), "loaded the demand profile");
        Ok(profile)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_ok() {
        let profile = DemandProfile::from_json(r#"{"demand": [30, 42.5, 0]}"#).unwrap();
        assert_eq!(profile.demand, [Kilowatts(30.0), Kilowatts(42.5), Kilowatts(0.0)]);
    }

    #[test]
    fn from_toml_ok() {
        let profile = DemandProfile::from_toml("demand = [30.0, -5.0]").unwrap();
        assert_eq!(profile.demand, [Kilowatts(30.0), Kilowatts(-5.0)]);
    }

    #[test]
    fn from_json_rejects_missing_demand() {
        assert!(DemandProfile::from_json(r#"{"power": [30]}"#).is_err());
    }

    #[test]
    fn read_from_rejects_unknown_extension() {
        assert!(DemandProfile::read_from(Path::new("demand.csv")).is_err());
    }
}
