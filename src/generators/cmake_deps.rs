//! CMake package-config files for resolved dependencies.
//!
//! Each dependency becomes `<name>-config.cmake` plus
//! `<name>-config-version.cmake` in the generators directory, so a plain
//! `find_package(<name> CONFIG)` in the library's CMakeLists resolves to an
//! imported `<name>::<name>` target.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::generators::cmake_path;
use crate::generators::graph::{DependencyGraph, DependencyNode};
use crate::util::fs::write_string;

/// Emits package-config files for every node of a dependency graph.
pub struct CMakeDeps<'a> {
    graph: &'a DependencyGraph,
}

impl<'a> CMakeDeps<'a> {
    pub fn new(graph: &'a DependencyGraph) -> Self {
        CMakeDeps { graph }
    }

    /// Write the config files and return their paths.
    pub fn generate(&self, generators_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        for dep in self.graph.ordered()? {
            tracing::debug!("writing CMake config for {}/{}", dep.name, dep.version);

            let config = generators_dir.join(format!("{}-config.cmake", dep.name));
            write_string(&config, &render_config(dep))?;
            written.push(config);

            let version = generators_dir.join(format!("{}-config-version.cmake", dep.name));
            write_string(&version, &render_version(dep))?;
            written.push(version);
        }

        Ok(written)
    }
}

/// Imported target name for a dependency.
pub fn target_name(name: &str) -> String {
    format!("{0}::{0}", name)
}

fn render_config(dep: &DependencyNode) -> String {
    let target = target_name(&dep.name);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "# {}/{} package configuration. Generated by funcgen-recipe; do not edit.",
        dep.name, dep.version
    );
    out.push_str("include_guard()\n");

    if !dep.requires.is_empty() {
        out.push_str("include(CMakeFindDependencyMacro)\n");
        for requirement in &dep.requires {
            let _ = writeln!(out, "find_dependency({} REQUIRED CONFIG)", requirement);
        }
    }

    let _ = writeln!(out, "\nset({}_VERSION \"{}\")", dep.name, dep.version);
    let _ = writeln!(out, "set({}_FOUND TRUE)\n", dep.name);

    let _ = writeln!(out, "if(NOT TARGET {})", target);
    let _ = writeln!(out, "    add_library({} INTERFACE IMPORTED)", target);

    let includes = join_paths(&dep.include_paths());
    if !includes.is_empty() {
        let _ = writeln!(
            out,
            "    target_include_directories({} INTERFACE {})",
            target, includes
        );
    }

    let libdirs = join_paths(&dep.lib_paths());
    if !dep.libs.is_empty() && !libdirs.is_empty() {
        let _ = writeln!(out, "    target_link_directories({} INTERFACE {})", target, libdirs);
    }

    let mut link: Vec<String> = dep.libs.clone();
    link.extend(dep.requires.iter().map(|r| target_name(r)));
    if !link.is_empty() {
        let _ = writeln!(
            out,
            "    target_link_libraries({} INTERFACE {})",
            target,
            link.join(" ")
        );
    }
    out.push_str("endif()\n");

    out
}

fn render_version(dep: &DependencyNode) -> String {
    format!(
        "# {name}/{version} version check. Generated by funcgen-recipe; do not edit.\n\
         set(PACKAGE_VERSION \"{version}\")\n\
         \n\
         if(PACKAGE_FIND_VERSION AND PACKAGE_VERSION VERSION_LESS PACKAGE_FIND_VERSION)\n\
         \x20   set(PACKAGE_VERSION_COMPATIBLE FALSE)\n\
         else()\n\
         \x20   set(PACKAGE_VERSION_COMPATIBLE TRUE)\n\
         \x20   if(PACKAGE_FIND_VERSION STREQUAL PACKAGE_VERSION)\n\
         \x20       set(PACKAGE_VERSION_EXACT TRUE)\n\
         \x20   endif()\n\
         endif()\n",
        name = dep.name,
        version = dep.version
    )
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("\"{}\"", cmake_path(p)))
        .collect::<Vec<_>>()
        .join(" ")
}
