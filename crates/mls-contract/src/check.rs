#![deny(unsafe_code)]

//! Report-worthy configurations that are valid but probably unintended.

use std::collections::BTreeMap;

use mls_model::{AssetClass, CanonicalField, normalize_column_name};
use serde::Serialize;

use crate::contract::{Contract, ReconciliationMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    /// A declared class has no status rules, so none of its statuses would map.
    SignatureWithoutStatusRules,
    /// A signature section entry with no columns never matches.
    EmptySignature,
    /// Status rules for a class that inference can never select.
    StatusRulesWithoutSignature,
    /// No rules for the fallback class; every unmatched dataset would fail.
    DefaultClassWithoutStatusRules,
    /// Two status keys that differ only by case map to different targets.
    AmbiguousStatusCase,
    /// One alias claimed by more than one canonical field.
    DuplicateAlias,
    /// An alias listed more than once for the same field.
    RedundantAlias,
    /// A section the selected reconciliation mode does not read.
    IgnoredSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractFinding {
    pub kind: FindingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassSummary {
    pub asset_class: String,
    pub signature_columns: usize,
    pub status_rules: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContractReport {
    pub schema: String,
    pub schema_version: u32,
    pub name: String,
    pub version: Option<String>,
    pub fingerprint: String,
    pub reconciliation: ReconciliationMode,
    pub asset_classes: Vec<ClassSummary>,
    pub findings: Vec<ContractFinding>,
}

impl ContractReport {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }

    pub fn count(&self, kind: FindingKind) -> usize {
        self.findings.iter().filter(|f| f.kind == kind).count()
    }
}

impl Contract {
    /// Inspect the contract for configurations that load fine but are worth
    /// a second look.
    pub fn check(&self) -> ContractReport {
        let mut findings = Vec::new();
        check_classes(self, &mut findings);
        check_status_case(self, &mut findings);
        check_aliases(self, &mut findings);
        check_sections(self, &mut findings);
        findings.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.asset_class.cmp(&b.asset_class))
                .then_with(|| a.message.cmp(&b.message))
        });
        findings.dedup();

        let asset_classes = self
            .asset_classes()
            .iter()
            .map(|class| ClassSummary {
                asset_class: class.to_string(),
                signature_columns: self.signature(class).map_or(0, <[String]>::len),
                status_rules: self.status_rules(class).map_or(0, BTreeMap::len),
            })
            .collect();

        ContractReport {
            schema: "mls.contract-report".to_string(),
            schema_version: 1,
            name: self.name().to_string(),
            version: self.version().map(str::to_string),
            fingerprint: self.fingerprint().to_string(),
            reconciliation: self.reconciliation(),
            asset_classes,
            findings,
        }
    }
}

fn class_finding(kind: FindingKind, class: &AssetClass, message: String) -> ContractFinding {
    ContractFinding {
        kind,
        asset_class: Some(class.to_string()),
        message,
    }
}

fn check_classes(contract: &Contract, findings: &mut Vec<ContractFinding>) {
    for (class, columns) in contract.signatures() {
        if columns.is_empty() {
            findings.push(class_finding(
                FindingKind::EmptySignature,
                class,
                format!("signature for {class} lists no columns and never matches"),
            ));
        }
        if contract.status_rules(class).is_none_or(BTreeMap::is_empty) {
            findings.push(class_finding(
                FindingKind::SignatureWithoutStatusRules,
                class,
                format!("{class} is declared but has no status rules; every row bound to it would be rejected"),
            ));
        }
    }

    for (class, _) in contract.all_status_rules() {
        if *class != AssetClass::ResidentialSale && contract.signature(class).is_none() {
            findings.push(class_finding(
                FindingKind::StatusRulesWithoutSignature,
                class,
                format!("{class} has status rules but no signature; it is only reachable by forcing the asset class"),
            ));
        }
    }

    let default_class = AssetClass::ResidentialSale;
    if contract
        .status_rules(&default_class)
        .is_none_or(BTreeMap::is_empty)
    {
        findings.push(class_finding(
            FindingKind::DefaultClassWithoutStatusRules,
            &default_class,
            format!("no status rules for {default_class}, the fallback class"),
        ));
    }
}

fn check_status_case(contract: &Contract, findings: &mut Vec<ContractFinding>) {
    for (class, rules) in contract.all_status_rules() {
        let mut folded: BTreeMap<String, Vec<&str>> = BTreeMap::new();
        for key in rules.keys() {
            folded.entry(key.to_ascii_uppercase()).or_default().push(key);
        }
        for keys in folded.values().filter(|keys| keys.len() > 1) {
            let first = &rules[keys[0]];
            if keys.iter().any(|key| rules[*key] != *first) {
                findings.push(class_finding(
                    FindingKind::AmbiguousStatusCase,
                    class,
                    format!(
                        "statuses {} differ only by case but map to different values",
                        keys.join(", ")
                    ),
                ));
            }
        }
    }
}

fn check_aliases(contract: &Contract, findings: &mut Vec<ContractFinding>) {
    let mut owners: BTreeMap<String, Vec<CanonicalField>> = BTreeMap::new();
    for field in CanonicalField::reconcilable_fields() {
        let mut seen: Vec<String> = Vec::new();
        let names = std::iter::once(field.name())
            .chain(contract.aliases(field).iter().map(String::as_str))
            .chain(field.aliases().iter().copied());
        for name in names {
            let key = normalize_column_name(name);
            if seen.contains(&key) {
                if contract
                    .aliases(field)
                    .iter()
                    .any(|alias| normalize_column_name(alias) == key)
                {
                    findings.push(ContractFinding {
                        kind: FindingKind::RedundantAlias,
                        asset_class: None,
                        message: format!("alias `{key}` is listed more than once for {field}"),
                    });
                }
                continue;
            }
            seen.push(key.clone());
            owners.entry(key).or_default().push(field);
        }
    }

    for (alias, fields) in owners.iter().filter(|(_, fields)| fields.len() > 1) {
        let contract_owned = fields
            .iter()
            .any(|field| contract.aliases(*field).iter().any(|a| normalize_column_name(a) == *alias));
        if !contract_owned {
            continue;
        }
        let names: Vec<&str> = fields.iter().map(|field| field.name()).collect();
        findings.push(ContractFinding {
            kind: FindingKind::DuplicateAlias,
            asset_class: None,
            message: format!(
                "alias `{alias}` is claimed by {}; {} wins",
                names.join(", "),
                names[0]
            ),
        });
    }
}

fn check_sections(contract: &Contract, findings: &mut Vec<ContractFinding>) {
    let (ignored, count) = match contract.reconciliation() {
        ReconciliationMode::AliasLookup => ("columns", contract.all_columns().count()),
        ReconciliationMode::ExactColumnName => ("aliases", contract.all_aliases().count()),
    };
    if count > 0 {
        findings.push(ContractFinding {
            kind: FindingKind::IgnoredSection,
            asset_class: None,
            message: format!(
                "[{ignored}] has {count} entries but reconciliation is {}",
                contract.reconciliation()
            ),
        });
    }
}
