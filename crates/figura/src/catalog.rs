//! Diagram descriptions compiled into the binary.

/// A named description source shipped with Figura.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    name: &'static str,
    source: &'static str,
}

impl CatalogEntry {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// TOML source of the description.
    pub fn source(&self) -> &'static str {
        self.source
    }
}

const BUILTIN: &[CatalogEntry] = &[
    CatalogEntry {
        name: "general_war_methodology",
        source: include_str!("../diagrams/general_war_methodology.toml"),
    },
    CatalogEntry {
        name: "sampling_strategy",
        source: include_str!("../diagrams/sampling_strategy.toml"),
    },
    CatalogEntry {
        name: "analytical_workflow",
        source: include_str!("../diagrams/analytical_workflow.toml"),
    },
    CatalogEntry {
        name: "risk_assessment",
        source: include_str!("../diagrams/risk_assessment.toml"),
    },
    CatalogEntry {
        name: "temporal_monitoring",
        source: include_str!("../diagrams/temporal_monitoring.toml"),
    },
    CatalogEntry {
        name: "multiscale_integration",
        source: include_str!("../diagrams/multiscale_integration.toml"),
    },
    CatalogEntry {
        name: "publication_framework",
        source: include_str!("../diagrams/publication_framework.toml"),
    },
    CatalogEntry {
        name: "data_synthesis",
        source: include_str!("../diagrams/data_synthesis.toml"),
    },
    CatalogEntry {
        name: "integration_workflow",
        source: include_str!("../diagrams/integration_workflow.toml"),
    },
    CatalogEntry {
        name: "knowledge_synthesis",
        source: include_str!("../diagrams/knowledge_synthesis.toml"),
    },
    CatalogEntry {
        name: "main_flowchart",
        source: include_str!("../diagrams/main_flowchart.toml"),
    },
    CatalogEntry {
        name: "equipment_network",
        source: include_str!("../diagrams/equipment_network.toml"),
    },
    CatalogEntry {
        name: "parameter_analysis",
        source: include_str!("../diagrams/parameter_analysis.toml"),
    },
    CatalogEntry {
        name: "site_layout",
        source: include_str!("../diagrams/site_layout.toml"),
    },
];

/// Built-in descriptions in generation order.
pub fn builtin() -> &'static [CatalogEntry] {
    BUILTIN
}

/// Looks up a built-in description by name.
pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    BUILTIN.iter().find(|entry| entry.name == name)
}
