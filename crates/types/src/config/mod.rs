// Path: crates/types/src/config/mod.rs

//! Configuration structures for a forwarder instance.
use crate::app::{Address, Committee, EligibilitySet};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Who may endorse, as written in a config file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "mode")]
pub enum EligibilityConfig {
    /// One fixed endorser.
    Single {
        /// The endorser's address.
        endorser: Address,
    },
    /// A threshold committee.
    Committee {
        /// The committee members. Duplicates are rejected.
        members: Vec<Address>,
        /// How many distinct members must sign.
        threshold: u32,
    },
}

impl TryFrom<&EligibilityConfig> for EligibilitySet {
    type Error = ConfigError;

    fn try_from(cfg: &EligibilityConfig) -> Result<Self, Self::Error> {
        match cfg {
            EligibilityConfig::Single { endorser } => Ok(EligibilitySet::Single(*endorser)),
            EligibilityConfig::Committee { members, threshold } => {
                let unique: BTreeSet<&Address> = members.iter().collect();
                if unique.len() != members.len() {
                    return Err(ConfigError::Invalid(
                        "committee members must be unique".into(),
                    ));
                }
                Committee::new(members.iter().copied(), *threshold)
                    .map(EligibilitySet::Committee)
                    .map_err(|e| ConfigError::Invalid(e.to_string()))
            }
        }
    }
}

/// Whether stored proposals need an endorsement to be created and executed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "PascalCase")]
pub enum ProposalGate {
    /// Anyone may create and execute proposals. Supplied endorsements are ignored.
    #[default]
    Open,
    /// Both operations require a valid endorsement.
    Endorsed,
}

/// Where forwarder state lives.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Path of the redb database file. Absent means in-memory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The full configuration of one forwarder instance.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ForwarderConfig {
    /// The protected instance whose nonce endorsements consume.
    pub subject: Address,
    /// Eligibility installed on first start. Omit to call `initialize` later.
    #[serde(default)]
    pub eligibility: Option<EligibilityConfig>,
    #[serde(default)]
    pub proposal_gate: ProposalGate,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl ForwarderConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(eligibility) = &self.eligibility {
            EligibilitySet::try_from(eligibility)?;
        }
        Ok(())
    }

    /// The eligibility set described by this config, if any.
    pub fn eligibility_set(&self) -> Result<Option<EligibilitySet>, ConfigError> {
        self.eligibility
            .as_ref()
            .map(EligibilitySet::try_from)
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUBJECT: &str = "0x1111111111111111111111111111111111111111";

    #[test]
    fn parses_committee_config() {
        let raw = format!(
            r#"
subject = "{SUBJECT}"
proposal_gate = "Endorsed"

[eligibility]
mode = "Committee"
members = [
  "0x00000000000000000000000000000000000000a1",
  "0x00000000000000000000000000000000000000a2",
  "0x00000000000000000000000000000000000000a3",
]
threshold = 2

[storage]
path = "/var/lib/endorse/state.redb"
"#
        );
        let cfg = ForwarderConfig::from_toml_str(&raw).unwrap();
        assert_eq!(cfg.proposal_gate, ProposalGate::Endorsed);
        assert_eq!(
            cfg.storage.path.as_deref(),
            Some(Path::new("/var/lib/endorse/state.redb"))
        );
        match cfg.eligibility_set().unwrap() {
            Some(EligibilitySet::Committee(c)) => {
                assert_eq!(c.threshold(), 2);
                assert_eq!(c.members().len(), 3);
            }
            other => panic!("unexpected eligibility: {other:?}"),
        }
    }

    #[test]
    fn defaults_to_open_gate_and_memory_storage() {
        let raw = format!(
            "subject = \"{SUBJECT}\"\n[eligibility]\nmode = \"Single\"\nendorser = \"{SUBJECT}\"\n"
        );
        let cfg = ForwarderConfig::from_toml_str(&raw).unwrap();
        assert_eq!(cfg.proposal_gate, ProposalGate::Open);
        assert!(cfg.storage.path.is_none());
        assert!(matches!(
            cfg.eligibility_set().unwrap(),
            Some(EligibilitySet::Single(_))
        ));
    }

    #[test]
    fn rejects_threshold_above_membership() {
        let raw = format!(
            "subject = \"{SUBJECT}\"\n[eligibility]\nmode = \"Committee\"\nmembers = [\"{SUBJECT}\"]\nthreshold = 2\n"
        );
        assert!(matches!(
            ForwarderConfig::from_toml_str(&raw),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_duplicate_members() {
        let raw = format!(
            "subject = \"{SUBJECT}\"\n[eligibility]\nmode = \"Committee\"\nmembers = [\"{SUBJECT}\", \"{SUBJECT}\"]\nthreshold = 1\n"
        );
        let err = ForwarderConfig::from_toml_str(&raw).unwrap_err();
        assert!(err.to_string().contains("unique"));
    }

    #[test]
    fn load_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forwarder.toml");
        std::fs::write(&path, format!("subject = \"{SUBJECT}\"\n")).unwrap();
        let cfg = ForwarderConfig::load(&path).unwrap();
        assert_eq!(cfg.subject, SUBJECT.parse().unwrap());
        assert!(cfg.eligibility.is_none());
    }
}
