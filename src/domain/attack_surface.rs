//! MITRE ATT&CK-derived technique catalog: the attacker's action space.
//!
//! The catalog is a process-wide constant table, carried forward from the
//! original implementation's curated technique list. Success rates and
//! noise values are tuned for game balance, not calibrated against real
//! attack telemetry.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::network::{NodeAttributes, Os, Service};

/// ATT&CK tactic categories represented in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tactic {
    InitialAccess,
    Execution,
    Persistence,
    PrivilegeEscalation,
    CredentialAccess,
    Discovery,
    LateralMovement,
    Collection,
    Exfiltration,
}

/// Ordered access level an attacker holds on a node: none < user < root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    None,
    User,
    Root,
}

/// A single catalog entry: an ATT&CK-derived technique parameterised for
/// the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Technique {
    pub id: &'static str,
    pub name: &'static str,
    pub tactic: Tactic,
    pub base_success_rate: f64,
    pub noise: f64,
    pub required_access: AccessLevel,
    pub grants_access: AccessLevel,
    pub required_services: &'static [Service],
    pub supported_os: Option<&'static [Os]>,
}

impl Technique {
    /// Whether this technique can target the given node's OS and services.
    pub fn applicable_to(&self, node: &NodeAttributes) -> bool {
        if let Some(os_set) = self.supported_os {
            if !os_set.contains(&node.os) {
                return false;
            }
        }
        if self.required_services.is_empty() {
            return true;
        }
        let node_services: HashSet<Service> = node.services.iter().copied().collect();
        self.required_services.iter().any(|s| node_services.contains(s))
    }
}

macro_rules! technique {
    ($id:expr, $name:expr, $tactic:expr, $rate:expr, $noise:expr, $req:expr, $grants:expr, $services:expr, $os:expr $(,)?) => {
        Technique {
            id: $id,
            name: $name,
            tactic: $tactic,
            base_success_rate: $rate,
            noise: $noise,
            required_access: $req,
            grants_access: $grants,
            required_services: $services,
            supported_os: $os,
        }
    };
}

/// The fixed 18-entry technique catalog, spanning initial access through
/// exfiltration. Initialised once at first use without reflection.
pub fn technique_catalog() -> &'static [Technique] {
    static CATALOG: OnceLock<Vec<Technique>> = OnceLock::new();
    CATALOG.get_or_init(|| {
        use AccessLevel::*;
        use Os::*;
        use Service::*;
        use Tactic::*;

        vec![
            technique!(
                "T1190", "Exploit Public-Facing Application", InitialAccess,
                0.35, 0.4, None, User, &[Http, Https], Option::<&[Os]>::None,
            ),
            technique!(
                "T1133", "External Remote Services", InitialAccess,
                0.30, 0.3, None, User, &[Ssh, Rdp], Option::<&[Os]>::None,
            ),
            technique!(
                "T1059.004", "Unix Shell Command Execution", Execution,
                0.80, 0.2, User, User, &[Ssh], Some(&[Linux] as &[Os]),
            ),
            technique!(
                "T1059.001", "PowerShell Execution", Execution,
                0.80, 0.3, User, User, &[Smb, Rdp], Some(&[Windows] as &[Os]),
            ),
            technique!(
                "T1068", "Exploitation for Privilege Escalation", PrivilegeEscalation,
                0.25, 0.5, User, Root, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1078", "Valid Accounts", PrivilegeEscalation,
                0.40, 0.1, User, Root, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1110", "Brute Force", CredentialAccess,
                0.20, 0.7, None, User, &[Ssh, Rdp, Ftp], Option::<&[Os]>::None,
            ),
            technique!(
                "T1003", "OS Credential Dumping", CredentialAccess,
                0.55, 0.4, Root, Root, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1552", "Unsecured Credentials", CredentialAccess,
                0.45, 0.15, User, User, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1046", "Network Service Discovery", Discovery,
                0.90, 0.35, User, User, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1083", "File and Directory Discovery", Discovery,
                0.95, 0.1, User, User, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1021.001", "Remote Desktop Protocol", LateralMovement,
                0.50, 0.3, User, User, &[Rdp], Some(&[Windows] as &[Os]),
            ),
            technique!(
                "T1021.004", "SSH Lateral Movement", LateralMovement,
                0.55, 0.2, User, User, &[Ssh], Some(&[Linux] as &[Os]),
            ),
            technique!(
                "T1021.002", "SMB/Windows Admin Shares", LateralMovement,
                0.45, 0.35, Root, User, &[Smb], Some(&[Windows] as &[Os]),
            ),
            technique!(
                "T1210", "Exploitation of Remote Services", LateralMovement,
                0.30, 0.5, User, User, &[Http, Https, Mysql, Postgresql], Option::<&[Os]>::None,
            ),
            technique!(
                "T1005", "Data from Local System", Collection,
                0.85, 0.15, User, User, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1039", "Data from Network Shared Drive", Collection,
                0.75, 0.2, User, User, &[Smb, Ftp], Option::<&[Os]>::None,
            ),
            technique!(
                "T1041", "Exfiltration Over C2 Channel", Exfiltration,
                0.70, 0.45, User, User, &[], Option::<&[Os]>::None,
            ),
            technique!(
                "T1048", "Exfiltration Over Alternative Protocol", Exfiltration,
                0.60, 0.25, User, User, &[Dns, Ftp], Option::<&[Os]>::None,
            ),
        ]
    })
}

/// Techniques the attacker can use against `node`, given current access.
pub fn get_applicable_techniques(node: &NodeAttributes, attacker_access: AccessLevel) -> Vec<&'static Technique> {
    technique_catalog()
        .iter()
        .filter(|t| t.required_access <= attacker_access && t.applicable_to(node))
        .collect()
}

pub fn techniques_by_tactic(tactic: Tactic) -> Vec<&'static Technique> {
    technique_catalog().iter().filter(|t| t.tactic == tactic).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::network::NodeType;

    #[test]
    fn catalog_has_eighteen_entries() {
        assert_eq!(technique_catalog().len(), 18);
    }

    #[test]
    fn applicable_to_respects_os_and_services() {
        let linux_ssh = NodeAttributes::new(NodeType::Server, Os::Linux, vec![Service::Ssh], 1.0);
        let windows_smb = NodeAttributes::new(NodeType::Workstation, Os::Windows, vec![Service::Smb], 1.0);

        let unix_shell = technique_catalog().iter().find(|t| t.id == "T1059.004").unwrap();
        assert!(unix_shell.applicable_to(&linux_ssh));
        assert!(!unix_shell.applicable_to(&windows_smb));

        let powershell = technique_catalog().iter().find(|t| t.id == "T1059.001").unwrap();
        assert!(!powershell.applicable_to(&linux_ssh));
    }

    #[test]
    fn get_applicable_techniques_respects_access_gate() {
        let node = NodeAttributes::new(NodeType::Server, Os::Linux, vec![Service::Ssh], 1.0);
        let none_access = get_applicable_techniques(&node, AccessLevel::None);
        assert!(none_access.iter().all(|t| t.required_access == AccessLevel::None));

        let root_access = get_applicable_techniques(&node, AccessLevel::Root);
        assert!(root_access.len() >= none_access.len());
    }

    #[test]
    fn access_level_ordering() {
        assert!(AccessLevel::None < AccessLevel::User);
        assert!(AccessLevel::User < AccessLevel::Root);
    }
}
