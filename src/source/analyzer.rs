//! Walks a Rails source tree and builds a [`SourceModel`].

use std::path::{Path, PathBuf};

use super::rules::{
    extract_controller, extract_record, extract_routes, template_name, template_variables,
};
use super::{SourceModel, Template};
use crate::ports::filesystem::FileSystem;

/// Domain records directory, relative to the source root.
pub const MODELS_DIR: &str = "app/models";
/// Controllers directory, relative to the source root.
pub const CONTROLLERS_DIR: &str = "app/controllers";
/// Routes file, relative to the source root.
pub const ROUTES_FILE: &str = "config/routes.rb";
/// Views directory, relative to the source root.
pub const VIEWS_DIR: &str = "app/views";

/// Extracts the source model of the application rooted at `root`.
///
/// Never fails: a missing conventional directory yields an empty section and a
/// warning, and an unreadable file is treated as empty text.
pub fn analyze(fs: &dyn FileSystem, root: &Path) -> SourceModel {
    let domain_records = ruby_sources(fs, &root.join(MODELS_DIR))
        .iter()
        .filter_map(|path| extract_record(&read_or_empty(fs, path)))
        .collect();

    let controllers = ruby_sources(fs, &root.join(CONTROLLERS_DIR))
        .iter()
        .filter_map(|path| extract_controller(&read_or_empty(fs, path)))
        .collect();

    let routes_path = root.join(ROUTES_FILE);
    let routes = if fs.exists(&routes_path) {
        extract_routes(&read_or_empty(fs, &routes_path))
    } else {
        tracing::warn!(path = %routes_path.display(), "routes file not found");
        Vec::new()
    };

    let templates = templates(fs, &root.join(VIEWS_DIR));

    let model = SourceModel { domain_records, controllers, routes, templates };
    tracing::info!(
        records = model.domain_records.len(),
        controllers = model.controllers.len(),
        routes = model.routes.len(),
        templates = model.templates.len(),
        "source analysis complete"
    );
    model
}

/// Every template file below `views_dir`, paired with its template name.
///
/// Shared by the analyzer and the template converter so both see the same set.
pub fn template_files(fs: &dyn FileSystem, views_dir: &Path) -> Vec<(PathBuf, String)> {
    list_files(fs, views_dir)
        .into_iter()
        .filter_map(|path| {
            let name = template_name(path.strip_prefix(views_dir).ok()?)?;
            Some((path, name))
        })
        .collect()
}

fn templates(fs: &dyn FileSystem, views_dir: &Path) -> Vec<Template> {
    template_files(fs, views_dir)
        .into_iter()
        .map(|(path, name)| Template { name, variables: template_variables(&read_or_empty(fs, &path)) })
        .collect()
}

fn ruby_sources(fs: &dyn FileSystem, dir: &Path) -> Vec<PathBuf> {
    list_files(fs, dir)
        .into_iter()
        .filter(|path| path.extension().is_some_and(|ext| ext == "rb"))
        .collect()
}

fn list_files(fs: &dyn FileSystem, dir: &Path) -> Vec<PathBuf> {
    if !fs.exists(dir) {
        tracing::warn!(path = %dir.display(), "directory not found, section left empty");
        return Vec::new();
    }
    fs.walk_files(dir).unwrap_or_else(|e| {
        tracing::warn!(path = %dir.display(), error = %e, "failed to list directory");
        Vec::new()
    })
}

fn read_or_empty(fs: &dyn FileSystem, path: &Path) -> String {
    fs.read_to_string(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "unreadable file treated as empty");
        String::new()
    })
}
