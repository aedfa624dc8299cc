use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual phase of the eclipse as reported by the classifier.
///
/// The four known stages match the model's class names. Any other class name
/// is carried verbatim in `Other` so that a custom rule table can still refer
/// to it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StageLabel {
    Sun,
    PartialSolarEclipse,
    TotalSolarEclipse,
    AnnularSolarEclipse,
    Other(String),
}

impl StageLabel {
    /// Canonical CamelCase name.
    pub fn name(&self) -> &str {
        match self {
            Self::Sun => "Sun",
            Self::PartialSolarEclipse => "PartialSolarEclipse",
            Self::TotalSolarEclipse => "TotalSolarEclipse",
            Self::AnnularSolarEclipse => "AnnularSolarEclipse",
            Self::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for StageLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageLabel {
    type Err = String;

    /// Accepts `PartialSolarEclipse` as well as the spaced class names the
    /// detector model emits (`Partial Solar Eclipse`). Matching of the known
    /// stages ignores case and whitespace; unknown names are kept as-is.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("stage label must not be empty".into());
        }
        let key: String = trimmed
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        Ok(match key.as_str() {
            "sun" => Self::Sun,
            "partialsolareclipse" => Self::PartialSolarEclipse,
            "totalsolareclipse" => Self::TotalSolarEclipse,
            "annularsolareclipse" => Self::AnnularSolarEclipse,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl TryFrom<String> for StageLabel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StageLabel> for String {
    fn from(label: StageLabel) -> Self {
        label.name().to_string()
    }
}
