//! Plan-driven Django project generator.
//!
//! [`scaffold`] writes the project-level Django files and [`generate`] writes
//! one directory per planned app. Output follows plan
//! order exactly and embeds no timestamps, so regenerating an unchanged plan
//! rewrites identical bytes. The first failed write aborts generation.

pub mod render;

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::error::GenerateError;
use crate::plan::{AppPlan, Plan};
use crate::ports::filesystem::FileSystem;
use crate::source::analyzer::template_files;
use crate::source::erb::convert_erb_to_django;

/// Directory, under the project root and under each app, that holds templates.
pub const TEMPLATES_DIR: &str = "templates";

/// What a generation run wrote.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct GeneratedProject {
    /// Project root all apps were written below.
    pub root: PathBuf,
    /// One entry per generated app, in plan order.
    pub apps: Vec<GeneratedApp>,
    /// Project-level files: `manage.py`, the settings package and the base layout.
    pub scaffold: Vec<PathBuf>,
    /// Project-level templates converted from the source views.
    pub converted_templates: Vec<PathBuf>,
}

/// Files written for one app.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GeneratedApp {
    /// App name.
    pub name: String,
    /// App directory.
    pub dir: PathBuf,
    /// Every file written, in write order.
    pub files: Vec<PathBuf>,
}

/// Generates every app declared in `plan` below `project_root`.
///
/// A raw plan declares no apps and yields an empty project.
///
/// # Errors
///
/// Returns the first filesystem failure, or [`GenerateError::UnsafePath`] for an
/// app or template name that would escape its directory.
pub fn generate(
    fs: &dyn FileSystem,
    plan: &Plan,
    project_root: &Path,
) -> Result<GeneratedProject, GenerateError> {
    if plan.is_raw() {
        tracing::warn!("plan is unstructured, no apps will be generated");
    }
    create_dir(fs, project_root)?;

    let apps = plan
        .apps()
        .iter()
        .map(|app| generate_app(fs, app, project_root))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::info!(root = %project_root.display(), apps = apps.len(), "project generated");
    Ok(GeneratedProject { root: project_root.to_path_buf(), apps, ..GeneratedProject::default() })
}

/// Writes the files that make `project_root` a runnable Django project.
///
/// `package` names the settings package below the root. Its `settings.py`
/// installs every app the plan declares and the root `urls.py` includes
/// each app's urls.
///
/// # Errors
///
/// Returns the first filesystem failure, [`GenerateError::UnsafePath`] for a
/// package name that is not a single directory entry, or
/// [`GenerateError::NameCollision`] when an app is named like the package.
pub fn scaffold(
    fs: &dyn FileSystem,
    plan: &Plan,
    project_root: &Path,
    package: &str,
) -> Result<Vec<PathBuf>, GenerateError> {
    let package_dir = project_root.join(single_component(package)?);
    let apps: Vec<&str> = plan.apps().iter().map(|app| app.name.as_str()).collect();
    if apps.contains(&package) {
        return Err(GenerateError::NameCollision { name: package.to_string() });
    }

    let files = [
        (project_root.join("manage.py"), render::manage_py(package)),
        (package_dir.join("__init__.py"), String::new()),
        (package_dir.join("settings.py"), render::settings_py(package, &apps)),
        (package_dir.join("urls.py"), render::root_urls_py(&apps)),
        (package_dir.join("wsgi.py"), render::wsgi_py(package)),
        (project_root.join(TEMPLATES_DIR).join("base.html"), render::base_html(package)),
    ];
    let mut written = Vec::with_capacity(files.len());
    for (path, contents) in files {
        write(fs, &path, &contents)?;
        written.push(path);
    }

    tracing::info!(root = %project_root.display(), package, "project scaffold written");
    Ok(written)
}

fn generate_app(
    fs: &dyn FileSystem,
    app: &AppPlan,
    project_root: &Path,
) -> Result<GeneratedApp, GenerateError> {
    let dir = project_root.join(single_component(&app.name)?);
    create_dir(fs, &dir)?;

    let mut files = Vec::new();
    let mut emit = |path: PathBuf, contents: String| -> Result<(), GenerateError> {
        write(fs, &path, &contents)?;
        files.push(path);
        Ok(())
    };

    emit(dir.join("models.py"), render::models_py(&app.models))?;
    emit(dir.join("views.py"), render::views_py(&app.views))?;
    emit(dir.join("urls.py"), render::urls_py(&app.urls))?;
    for template in &app.templates {
        let path = dir.join(TEMPLATES_DIR).join(relative_path(&template.name)?);
        emit(path, render::template_stub(&template.name))?;
    }
    emit(dir.join("apps.py"), render::apps_py(&app.name))?;
    emit(dir.join("__init__.py"), String::new())?;

    tracing::info!(app = %app.name, files = files.len(), "app generated");
    Ok(GeneratedApp { name: app.name.clone(), dir, files })
}

/// Converts every ERB template below `views_dir` into `<project_root>/templates/<name>.html`.
///
/// Unreadable templates are converted from empty text.
///
/// # Errors
///
/// Returns the first failed write.
pub fn convert_templates(
    fs: &dyn FileSystem,
    views_dir: &Path,
    project_root: &Path,
) -> Result<Vec<PathBuf>, GenerateError> {
    let mut written = Vec::new();
    for (source, name) in template_files(fs, views_dir) {
        let text = fs.read_to_string(&source).unwrap_or_else(|e| {
            tracing::warn!(path = %source.display(), error = %e, "unreadable template converted as empty");
            String::new()
        });
        let target = project_root.join(TEMPLATES_DIR).join(relative_path(&format!("{name}.html"))?);
        write(fs, &target, &convert_erb_to_django(&text))?;
        tracing::debug!(from = %source.display(), to = %target.display(), "template converted");
        written.push(target);
    }
    Ok(written)
}

/// Validates a name that must stay below its parent directory.
fn relative_path(name: &str) -> Result<PathBuf, GenerateError> {
    let path = Path::new(name);
    let safe = !name.is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)));
    if safe {
        Ok(path.to_path_buf())
    } else {
        Err(GenerateError::UnsafePath { path: name.to_string() })
    }
}

/// Validates a name that must be exactly one directory entry.
fn single_component(name: &str) -> Result<PathBuf, GenerateError> {
    let path = relative_path(name)?;
    if path.components().count() == 1 {
        Ok(path)
    } else {
        Err(GenerateError::UnsafePath { path: name.to_string() })
    }
}

fn create_dir(fs: &dyn FileSystem, path: &Path) -> Result<(), GenerateError> {
    fs.create_dir_all(path).map_err(|source| GenerateError::Io { path: path.to_path_buf(), source })
}

fn write(fs: &dyn FileSystem, path: &Path, contents: &str) -> Result<(), GenerateError> {
    fs.write(path, contents).map_err(|source| GenerateError::Io { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::filesystem::LiveFileSystem;
    use crate::plan::{ModelPlan, StructuredPlan, TemplatePlan, UrlPlan, ViewPlan};

    fn app(name: &str, templates: &[&str]) -> AppPlan {
        AppPlan {
            name: name.into(),
            models: vec![ModelPlan {
                name: "Item".into(),
                fields: [("title", None::<String>)].into_iter().collect(),
            }],
            views: vec![ViewPlan {
                name: "ItemList".into(),
                type_tag: Some("ListView".into()),
                model: Some("Item".into()),
                template: None,
            }],
            urls: vec![UrlPlan { pattern: "items/".into(), view: "ItemList".into() }],
            templates: templates.iter().map(|t| TemplatePlan { name: (*t).into() }).collect(),
        }
    }

    fn relative_files(root: &Path) -> Vec<String> {
        LiveFileSystem
            .walk_files(root)
            .unwrap()
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().display().to_string())
            .collect()
    }

    #[test]
    fn two_apps_get_disjoint_directories_with_every_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let plan = Plan::Structured(StructuredPlan {
            apps: vec![app("blog", &["blog/item_list.html"]), app("shop", &[])],
        });

        let project = generate(&LiveFileSystem, &plan, dir.path()).unwrap();

        assert_eq!(project.apps.len(), 2);
        assert_eq!(
            relative_files(dir.path()),
            vec![
                "blog/__init__.py",
                "blog/apps.py",
                "blog/models.py",
                "blog/templates/blog/item_list.html",
                "blog/urls.py",
                "blog/views.py",
                "shop/__init__.py",
                "shop/apps.py",
                "shop/models.py",
                "shop/urls.py",
                "shop/views.py",
            ]
        );
        assert_eq!(LiveFileSystem.read_to_string(&dir.path().join("shop/__init__.py")).unwrap(), "");
    }

    #[test]
    fn app_with_no_declarations_still_gets_all_files() {
        let dir = tempfile::tempdir().unwrap();
        let plan = Plan::Structured(StructuredPlan {
            apps: vec![AppPlan {
                name: "core".into(),
                models: vec![],
                views: vec![],
                urls: vec![],
                templates: vec![],
            }],
        });

        let project = generate(&LiveFileSystem, &plan, dir.path()).unwrap();
        assert_eq!(project.apps[0].files.len(), 5);
    }

    #[test]
    fn regenerating_produces_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let plan = Plan::Structured(StructuredPlan { apps: vec![app("blog", &["a.html"])] });

        let first = generate(&LiveFileSystem, &plan, dir.path()).unwrap();
        let before: Vec<String> = first.apps[0]
            .files
            .iter()
            .map(|p| LiveFileSystem.read_to_string(p).unwrap())
            .collect();
        let second = generate(&LiveFileSystem, &plan, dir.path()).unwrap();
        let after: Vec<String> = second.apps[0]
            .files
            .iter()
            .map(|p| LiveFileSystem.read_to_string(p).unwrap())
            .collect();

        assert_eq!(first, second);
        assert_eq!(before, after);
    }

    #[test]
    fn raw_plan_generates_no_apps() {
        let dir = tempfile::tempdir().unwrap();
        let project = generate(&LiveFileSystem, &Plan::Raw("nope".into()), dir.path()).unwrap();
        assert!(project.apps.is_empty());
        assert!(relative_files(dir.path()).is_empty());
    }

    #[test]
    fn escaping_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let bad_app = Plan::Structured(StructuredPlan { apps: vec![app("../evil", &[])] });
        assert!(matches!(
            generate(&LiveFileSystem, &bad_app, dir.path()),
            Err(GenerateError::UnsafePath { .. })
        ));

        let bad_template =
            Plan::Structured(StructuredPlan { apps: vec![app("blog", &["/etc/passwd"])] });
        assert!(matches!(
            generate(&LiveFileSystem, &bad_template, dir.path()),
            Err(GenerateError::UnsafePath { .. })
        ));
    }

    #[test]
    fn scaffold_registers_every_planned_app() {
        let dir = tempfile::tempdir().unwrap();
        let plan = Plan::Structured(StructuredPlan { apps: vec![app("blog", &[]), app("shop", &[])] });

        let written = scaffold(&LiveFileSystem, &plan, dir.path(), "site").unwrap();

        assert_eq!(
            relative_files(dir.path()),
            vec![
                "manage.py",
                "site/__init__.py",
                "site/settings.py",
                "site/urls.py",
                "site/wsgi.py",
                "templates/base.html",
            ]
        );
        assert_eq!(written.len(), 6);
        let settings = LiveFileSystem.read_to_string(&dir.path().join("site/settings.py")).unwrap();
        assert!(settings.contains("    'blog',\n    'shop',\n]"));
        let urls = LiveFileSystem.read_to_string(&dir.path().join("site/urls.py")).unwrap();
        assert!(urls.contains("include('shop.urls')"));
    }

    #[test]
    fn scaffold_for_a_raw_plan_installs_no_custom_apps() {
        let dir = tempfile::tempdir().unwrap();
        scaffold(&LiveFileSystem, &Plan::Raw("prose".into()), dir.path(), "site").unwrap();
        let settings = LiveFileSystem.read_to_string(&dir.path().join("site/settings.py")).unwrap();
        assert!(settings.contains("    'django.contrib.staticfiles',\n]"));
    }

    #[test]
    fn app_named_like_the_settings_package_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let plan = Plan::Structured(StructuredPlan { apps: vec![app("site", &[])] });
        assert!(matches!(
            scaffold(&LiveFileSystem, &plan, dir.path(), "site"),
            Err(GenerateError::NameCollision { .. })
        ));
        assert!(!dir.path().join("manage.py").exists());
    }

    #[test]
    fn source_templates_are_converted_under_the_project() {
        let dir = tempfile::tempdir().unwrap();
        let views = dir.path().join("app/views");
        LiveFileSystem.write(&views.join("posts/show.html.erb"), "<%= @post.title %>").unwrap();
        let root = dir.path().join("out");

        let written = convert_templates(&LiveFileSystem, &views, &root).unwrap();

        assert_eq!(written, vec![root.join("templates/posts/show.html")]);
        assert_eq!(LiveFileSystem.read_to_string(&written[0]).unwrap(), "{{ post.title }}");
    }
}
