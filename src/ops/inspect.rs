//! Recipe inspection reports.

use serde::Serialize;

use crate::core::compat::ConfigurationError;
use crate::core::layout::Layout;
use crate::core::options::OptionSet;
use crate::core::package::PackageIdentity;
use crate::core::settings::Settings;
use crate::generators::cmake_path;
use crate::ops::recipe::Recipe;

/// Everything `inspect` shows about a loaded recipe.
#[derive(Debug, Clone, Serialize)]
pub struct InspectReport {
    pub identity: PackageIdentity,
    pub settings: Settings,
    pub options: OptionSet,
    pub layout: Layout,
    /// `None` when the configuration is accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejected: Option<String>,
}

impl InspectReport {
    pub fn new(recipe: &Recipe) -> Self {
        InspectReport {
            identity: recipe.identity.clone(),
            settings: recipe.settings.clone(),
            options: recipe.options,
            layout: recipe.layout.clone(),
            rejected: recipe
                .validate()
                .err()
                .map(|e: ConfigurationError| e.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Plain-text rendering of an inspect report.
pub fn format_report(report: &InspectReport) -> String {
    let id = &report.identity;
    let settings = &report.settings;
    let mut lines = vec![
        id.reference(),
        format!("  license: {}", id.license),
        format!("  homepage: {}", id.homepage),
        format!("  url: {}", id.url),
        format!("  description: {}", id.description),
        format!("  topics: {}", id.topics.join(", ")),
        String::new(),
        "settings:".to_string(),
        format!("  os: {}", settings.os),
        format!("  arch: {}", settings.arch),
        format!("  build_type: {}", settings.build_type),
        format!("  compiler: {}", settings.compiler.name),
        format!("  compiler.version: {}", settings.compiler.version),
    ];
    if let Some(cppstd) = &settings.compiler.cppstd {
        lines.push(format!("  compiler.cppstd: {}", cppstd));
    }

    lines.push(String::new());
    lines.push("options:".to_string());
    for (name, value) in report.options.entries() {
        lines.push(format!("  {}: {}", name, if value { "True" } else { "False" }));
    }

    lines.push(String::new());
    lines.push(format_layout(&report.layout));

    lines.push(String::new());
    match &report.rejected {
        None => lines.push("configuration: accepted".to_string()),
        Some(reason) => lines.push(format!("configuration: rejected ({})", reason)),
    }

    lines.join("\n")
}

/// Plain-text rendering of a layout.
pub fn format_layout(layout: &Layout) -> String {
    let lines = vec![
        "layout:".to_string(),
        format!("  source: {}", cmake_path(&layout.source_dir)),
        format!("  build: {}", cmake_path(&layout.build_dir)),
        format!("  generators: {}", cmake_path(&layout.generators_dir)),
        format!(
            "  source includedirs: {}",
            join_paths(&layout.source_includedirs)
        ),
        "package:".to_string(),
        format!("  libs: {}", layout.package.libs.join(", ")),
        format!("  includedirs: {}", join_paths(&layout.package.includedirs)),
    ];
    lines.join("\n")
}

fn join_paths(paths: &[std::path::PathBuf]) -> String {
    paths
        .iter()
        .map(|p| cmake_path(p))
        .collect::<Vec<_>>()
        .join(", ")
}
