//! The engine registry: every launchable code, its descriptor, and the
//! content dispatch used when a window mounts.
//!
//! Dispatch is a registered-variant lookup, not inheritance: a code maps to
//! a [`ContentView`] variant, and unknown codes land on the generic
//! fallback overlay carrying whatever descriptor fields are known.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::model::workspace::TabFilter;

pub const FIRMAMENT_CODE: &str = "FIRMAMENT";
pub const IDE_CODE: &str = "IDE";

/// Which facet of the dock a tab belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TabKind {
    /// Global system views; only visible under the ALL facet.
    System,
    Engine,
    Project,
    Ide,
}

impl TabFilter {
    pub fn admits(&self, kind: TabKind) -> bool {
        match self {
            TabFilter::All => true,
            TabFilter::Engine => kind == TabKind::Engine,
            TabFilter::Project => kind == TabKind::Project,
            TabFilter::Ide => kind == TabKind::Ide,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineDescriptor {
    pub code: &'static str,
    pub name: &'static str,
    pub kind: TabKind,
    pub category: &'static str,
    pub blurb: &'static str,
    pub status: &'static str,
}

impl EngineDescriptor {
    /// Case-insensitive substring match over code, name, and description.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return true;
        }
        self.code.to_lowercase().contains(&q)
            || self.name.to_lowercase().contains(&q)
            || self.blurb.to_lowercase().contains(&q)
    }
}

/// The dock's tab list, in presentation order: the firmament, active
/// projects, tooling, then the engine suite.
static TABS: &[EngineDescriptor] = &[
    EngineDescriptor {
        code: FIRMAMENT_CODE,
        name: "Firmament",
        kind: TabKind::System,
        category: "System",
        blurb: "Global Operations",
        status: "Active",
    },
    EngineDescriptor {
        code: "FRK",
        name: "Project Fork",
        kind: TabKind::Project,
        category: "Experimental",
        blurb: "Experimental branches and divergence tracking.",
        status: "Active",
    },
    EngineDescriptor {
        code: "INC",
        name: "Project Incubator",
        kind: TabKind::Project,
        category: "Venture",
        blurb: "Venture hatching and early-stage project maturity.",
        status: "Active",
    },
    EngineDescriptor {
        code: "CRN",
        name: "Chronicle",
        kind: TabKind::Project,
        category: "System",
        blurb: "Daily capture, continuity, and decision journaling.",
        status: "Active",
    },
    EngineDescriptor {
        code: IDE_CODE,
        name: "Northfield IDE",
        kind: TabKind::Ide,
        category: "Tooling",
        blurb: "Integrated Development Environment",
        status: "Active",
    },
    EngineDescriptor {
        code: "GGP",
        name: "Governance Graph Processor",
        kind: TabKind::Engine,
        category: "Governance",
        blurb: "Nucleus engine for permissions, approvals, state transitions, and auditability.",
        status: "Active build",
    },
    EngineDescriptor {
        code: "DRE",
        name: "Deep Research Engine",
        kind: TabKind::Engine,
        category: "Research",
        blurb: "Continuous deep research and knowledge mapping.",
        status: "Active build",
    },
    EngineDescriptor {
        code: "PIE",
        name: "Product InsightIQ Engine",
        kind: TabKind::Engine,
        category: "Research",
        blurb: "Product research intelligence and insight synthesis.",
        status: "Planned / MVP soon",
    },
    EngineDescriptor {
        code: "INT",
        name: "Intervention Engine",
        kind: TabKind::Engine,
        category: "State",
        blurb: "System-wide state fabric and context plane.",
        status: "Active build",
    },
    EngineDescriptor {
        code: "MUX",
        name: "Market Integration Layer",
        kind: TabKind::Engine,
        category: "Integration",
        blurb: "Connectors/adapters across marketplaces and channels.",
        status: "Active build",
    },
    EngineDescriptor {
        code: "SIG",
        name: "Signal Aggregation Engine",
        kind: TabKind::Engine,
        category: "Research",
        blurb: "Signal ingestion, normalization, scoring, and routing.",
        status: "Active build",
    },
    EngineDescriptor {
        code: "IDN",
        name: "Identity & Entity Nexus",
        kind: TabKind::Engine,
        category: "Identity",
        blurb: "Entities, roles, identity surfaces, and trust modeling.",
        status: "Planned / foundational",
    },
    EngineDescriptor {
        code: "SIM",
        name: "Simulation & Scenario Engine",
        kind: TabKind::Engine,
        category: "Simulation",
        blurb: "What-if modeling, stress tests, scenario runs, and projections.",
        status: "Planned",
    },
    EngineDescriptor {
        code: "DAT",
        name: "Digital Arbitrage Tooling",
        kind: TabKind::Engine,
        category: "Execution",
        blurb: "Execution tooling for digital market moves with traceable outcomes.",
        status: "Active build",
    },
    EngineDescriptor {
        code: "FLO",
        name: "Financial Ledger Orchestrator",
        kind: TabKind::Engine,
        category: "Finance",
        blurb: "Ledgering, reconciliation, and governed financial workflows.",
        status: "Planned",
    },
    EngineDescriptor {
        code: "BCP",
        name: "Business Continuity Protocol",
        kind: TabKind::Engine,
        category: "Resilience",
        blurb: "Failover, recovery, and resilience orchestration.",
        status: "Planned",
    },
];

pub fn tabs() -> &'static [EngineDescriptor] { TABS }

pub fn find(code: &str) -> Option<&'static EngineDescriptor> {
    TABS.iter().find(|t| t.code == code)
}

/// Descriptor handed to the generic fallback overlay. Every field except
/// the code is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineInfo {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl From<&EngineDescriptor> for EngineInfo {
    fn from(d: &EngineDescriptor) -> EngineInfo {
        EngineInfo {
            code: d.code.to_string(),
            name: Some(d.name.to_string()),
            category: Some(d.category.to_string()),
            description: Some(d.blurb.to_string()),
            status: Some(d.status.to_string()),
        }
    }
}

/// The content variant mounted inside a window frame for a given code.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentView {
    Firmament,
    Ide,
    Engine(&'static EngineDescriptor),
    Project(&'static EngineDescriptor),
    Fallback(EngineInfo),
}

pub fn resolve(code: &str) -> ContentView {
    match code {
        FIRMAMENT_CODE => ContentView::Firmament,
        IDE_CODE => ContentView::Ide,
        other => match find(other) {
            Some(d) if d.kind == TabKind::Project => ContentView::Project(d),
            Some(d) => ContentView::Engine(d),
            None => ContentView::Fallback(EngineInfo {
                code: other.to_string(),
                ..Default::default()
            }),
        },
    }
}
