//! Resolved dependency graph handed over by the hosting package manager.
//!
//! Resolution itself happens elsewhere; this module only loads the result,
//! checks that it is a well-formed DAG and orders it leaves-first.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One resolved dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub name: String,
    pub version: String,
    /// Root of the dependency's installed package.
    pub package_folder: PathBuf,
    #[serde(default = "default_includedirs")]
    pub includedirs: Vec<PathBuf>,
    #[serde(default = "default_libdirs")]
    pub libdirs: Vec<PathBuf>,
    #[serde(default)]
    pub libs: Vec<String>,
    /// Names of direct requirements, which must also appear in the graph.
    #[serde(default)]
    pub requires: Vec<String>,
}

fn default_includedirs() -> Vec<PathBuf> {
    vec![PathBuf::from("include")]
}

fn default_libdirs() -> Vec<PathBuf> {
    vec![PathBuf::from("lib")]
}

impl DependencyNode {
    /// Include dirs resolved against the package folder.
    pub fn include_paths(&self) -> Vec<PathBuf> {
        self.includedirs
            .iter()
            .map(|dir| self.package_folder.join(dir))
            .collect()
    }

    /// Library dirs resolved against the package folder.
    pub fn lib_paths(&self) -> Vec<PathBuf> {
        self.libdirs
            .iter()
            .map(|dir| self.package_folder.join(dir))
            .collect()
    }
}

/// Errors in a dependency graph document.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("failed to read dependency graph {}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to parse dependency graph {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        error: serde_json::Error,
    },

    #[error("invalid dependency name `{0}`: names must be non-empty and contain no path separators")]
    InvalidName(String),

    #[error("dependency `{0}` appears more than once")]
    Duplicate(String),

    #[error("`{dependency}` requires `{requirement}`, which is not in the graph")]
    UnknownRequirement {
        dependency: String,
        requirement: String,
    },

    #[error("cycle detected in dependency graph at `{0}`")]
    Cycle(String),
}

/// The resolved dependency graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    #[serde(default)]
    pub dependencies: Vec<DependencyNode>,
}

impl DependencyGraph {
    pub fn new(dependencies: Vec<DependencyNode>) -> Self {
        DependencyGraph { dependencies }
    }

    /// Load a graph from a JSON document.
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let contents = std::fs::read_to_string(path).map_err(|error| GraphError::Unreadable {
            path: path.to_path_buf(),
            error,
        })?;

        serde_json::from_str(&contents).map_err(|error| GraphError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty()
    }

    /// Dependencies ordered so that every node comes after its requirements.
    pub fn ordered(&self) -> Result<Vec<&DependencyNode>, GraphError> {
        let mut graph: DiGraph<usize, ()> = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for (i, dep) in self.dependencies.iter().enumerate() {
            if !is_valid_name(&dep.name) {
                return Err(GraphError::InvalidName(dep.name.clone()));
            }
            let node = graph.add_node(i);
            if index.insert(dep.name.as_str(), node).is_some() {
                return Err(GraphError::Duplicate(dep.name.clone()));
            }
        }

        for dep in &self.dependencies {
            let from = index[dep.name.as_str()];
            for requirement in &dep.requires {
                let to = index.get(requirement.as_str()).copied().ok_or_else(|| {
                    GraphError::UnknownRequirement {
                        dependency: dep.name.clone(),
                        requirement: requirement.clone(),
                    }
                })?;
                graph.add_edge(from, to, ());
            }
        }

        let sorted = toposort(&graph, None).map_err(|cycle| {
            GraphError::Cycle(self.dependencies[graph[cycle.node_id()]].name.clone())
        })?;

        // toposort puts dependents first; descriptors are emitted leaves-first.
        Ok(sorted
            .into_iter()
            .rev()
            .map(|node| &self.dependencies[graph[node]])
            .collect())
    }
}

/// Names become file names under the generators directory.
fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn node(name: &str, requires: &[&str]) -> DependencyNode {
        DependencyNode {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            package_folder: PathBuf::from(format!("/deps/{}", name)),
            includedirs: default_includedirs(),
            libdirs: default_libdirs(),
            libs: vec![name.to_string()],
            requires: requires.iter().map(|r| r.to_string()).collect(),
        }
    }

    fn names(nodes: &[&DependencyNode]) -> Vec<String> {
        nodes.iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn test_ordered_leaves_first() {
        let graph = DependencyGraph::new(vec![
            node("app-support", &["fmt", "zlib"]),
            node("fmt", &[]),
            node("zlib", &[]),
        ]);

        let order = names(&graph.ordered().unwrap());
        let pos = |n: &str| order.iter().position(|x| x == n).unwrap();
        assert!(pos("fmt") < pos("app-support"));
        assert!(pos("zlib") < pos("app-support"));
    }

    #[test]
    fn test_rejects_path_like_names() {
        for name in ["../escape", "nested/fmt", r"..\escape", "", ".."] {
            let graph = DependencyGraph::new(vec![node(name, &[])]);
            assert!(
                matches!(graph.ordered(), Err(GraphError::InvalidName(_))),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_unknown_requirement() {
        let graph = DependencyGraph::new(vec![node("fmt", &["missing"])]);
        assert!(matches!(
            graph.ordered(),
            Err(GraphError::UnknownRequirement { .. })
        ));
    }

    #[test]
    fn test_cycle_detected() {
        let graph = DependencyGraph::new(vec![node("a", &["b"]), node("b", &["a"])]);
        assert!(matches!(graph.ordered(), Err(GraphError::Cycle(_))));
    }

    #[test]
    fn test_duplicate_detected() {
        let graph = DependencyGraph::new(vec![node("a", &[]), node("a", &[])]);
        assert!(matches!(graph.ordered(), Err(GraphError::Duplicate(_))));
    }

    #[test]
    fn test_load_applies_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deps.json");
        std::fs::write(
            &path,
            r#"{"dependencies": [{"name": "fmt", "version": "10.2.1", "package_folder": "/opt/fmt", "libs": ["fmt"]}]}"#,
        )
        .unwrap();

        let graph = DependencyGraph::load(&path).unwrap();
        let fmt = &graph.dependencies[0];
        assert_eq!(fmt.include_paths(), vec![PathBuf::from("/opt/fmt/include")]);
        assert_eq!(fmt.lib_paths(), vec![PathBuf::from("/opt/fmt/lib")]);
        assert!(fmt.requires.is_empty());
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("deps.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            DependencyGraph::load(&path),
            Err(GraphError::Parse { .. })
        ));
    }
}
