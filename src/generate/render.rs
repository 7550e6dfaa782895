//! Text of each generated Django artifact.
//!
//! Every function is pure and deterministic: the same plan always renders the
//! same bytes.

use std::fmt::Write as _;

use crate::plan::{ModelPlan, UrlPlan, ViewPlan};

/// Field declaration used when the plan leaves a field's type unspecified.
pub const DEFAULT_FIELD: &str = "CharField(max_length=255)";

/// `models.py`: one `models.Model` subclass per plan model.
#[must_use]
pub fn models_py(models: &[ModelPlan]) -> String {
    let mut out = String::from("from django.db import models\n");
    for model in models {
        let _ = write!(out, "\n\nclass {}(models.Model):\n", model.name);
        if model.fields.is_empty() {
            out.push_str("    pass\n");
        }
        for (name, tag) in model.fields.iter() {
            let _ = writeln!(out, "    {name} = models.{}", field_constructor(tag));
        }
    }
    out
}

/// Constructor expression for a field type tag, without the `models.` prefix.
fn field_constructor(tag: Option<&str>) -> String {
    match tag.map(|t| t.strip_prefix("models.").unwrap_or(t)) {
        None => DEFAULT_FIELD.to_string(),
        Some(tag) if tag.contains('(') => tag.to_string(),
        Some(tag) => format!("{tag}()"),
    }
}

/// `views.py`: one generic class-based view per plan view.
#[must_use]
pub fn views_py(views: &[ViewPlan]) -> String {
    let mut out = String::from("from django.views import generic\nfrom .models import *\n");
    for view in views {
        let base = view.type_tag.as_deref().map(str::trim).filter(|t| !t.is_empty()).unwrap_or("View");
        let _ = write!(out, "\n\nclass {}(generic.{base}):\n", view.name);
        if view.model.is_none() && view.template.is_none() {
            out.push_str("    pass\n");
        }
        if let Some(model) = &view.model {
            let _ = writeln!(out, "    model = {model}");
        }
        if let Some(template) = &view.template {
            let _ = writeln!(out, "    template_name = '{template}'");
        }
    }
    out
}

/// `urls.py`: one `path()` entry per plan URL, named after the view in lower case.
#[must_use]
pub fn urls_py(urls: &[UrlPlan]) -> String {
    let mut out = String::from("from django.urls import path\nfrom . import views\n\nurlpatterns = [\n");
    for url in urls {
        let _ = writeln!(
            out,
            "    path('{}', views.{}.as_view(), name='{}'),",
            url.pattern,
            url.view,
            url.view.to_lowercase()
        );
    }
    out.push_str("]\n");
    out
}

/// Placeholder template extending the project base layout.
#[must_use]
pub fn template_stub(name: &str) -> String {
    format!(
        "{{% extends 'base.html' %}}\n{{% block content %}}\n<!-- Auto-generated template for {name} -->\n{{% endblock %}}\n"
    )
}

/// `apps.py`: the app's `AppConfig` subclass.
#[must_use]
pub fn apps_py(app_name: &str) -> String {
    format!(
        "from django.apps import AppConfig\n\n\nclass {}(AppConfig):\n    default_auto_field = 'django.db.models.BigAutoField'\n    name = '{app_name}'\n",
        config_class_name(app_name)
    )
}

/// `blog` becomes `BlogConfig`; the first character is upper-cased and the rest lower-cased.
#[must_use]
pub fn config_class_name(app_name: &str) -> String {
    let mut chars = app_name.chars();
    let capitalized = match chars.next() {
        Some(first) => {
            let mut head: String = first.to_uppercase().collect();
            head.push_str(&chars.as_str().to_lowercase());
            head
        }
        None => String::new(),
    };
    format!("{capitalized}Config")
}

/// Django apps every generated project installs ahead of its own.
const CONTRIB_APPS: [&str; 6] = [
    "django.contrib.admin",
    "django.contrib.auth",
    "django.contrib.contenttypes",
    "django.contrib.sessions",
    "django.contrib.messages",
    "django.contrib.staticfiles",
];

/// `manage.py` pointing at the settings of `package`.
#[must_use]
pub fn manage_py(package: &str) -> String {
    format!(
        r#"#!/usr/bin/env python
"""Django's command-line utility for administrative tasks."""
import os
import sys


def main():
    os.environ.setdefault('DJANGO_SETTINGS_MODULE', '{package}.settings')
    from django.core.management import execute_from_command_line
    execute_from_command_line(sys.argv)


if __name__ == '__main__':
    main()
"#
    )
}

/// `<package>/settings.py` installing the contrib apps followed by `apps`.
///
/// The secret key is a fixed development placeholder so regeneration stays byte-identical.
#[must_use]
pub fn settings_py(package: &str, apps: &[&str]) -> String {
    let mut installed = String::new();
    for app in CONTRIB_APPS.iter().chain(apps) {
        let _ = writeln!(installed, "    '{app}',");
    }
    format!(
        r#"from pathlib import Path

BASE_DIR = Path(__file__).resolve().parent.parent

SECRET_KEY = 'django-insecure-replace-before-deploying'
DEBUG = True
ALLOWED_HOSTS = []

INSTALLED_APPS = [
{installed}]

MIDDLEWARE = [
    'django.middleware.security.SecurityMiddleware',
    'django.contrib.sessions.middleware.SessionMiddleware',
    'django.middleware.common.CommonMiddleware',
    'django.middleware.csrf.CsrfViewMiddleware',
    'django.contrib.auth.middleware.AuthenticationMiddleware',
    'django.contrib.messages.middleware.MessageMiddleware',
    'django.middleware.clickjacking.XFrameOptionsMiddleware',
]

ROOT_URLCONF = '{package}.urls'

TEMPLATES = [
    {{
        'BACKEND': 'django.template.backends.django.DjangoTemplates',
        'DIRS': [BASE_DIR / 'templates'],
        'APP_DIRS': True,
        'OPTIONS': {{
            'context_processors': [
                'django.template.context_processors.request',
                'django.contrib.auth.context_processors.auth',
                'django.contrib.messages.context_processors.messages',
            ],
        }},
    }},
]

WSGI_APPLICATION = '{package}.wsgi.application'

DATABASES = {{
    'default': {{
        'ENGINE': 'django.db.backends.sqlite3',
        'NAME': BASE_DIR / 'db.sqlite3',
    }}
}}

LANGUAGE_CODE = 'en-us'
TIME_ZONE = 'UTC'
USE_I18N = True
USE_TZ = True

STATIC_URL = 'static/'

DEFAULT_AUTO_FIELD = 'django.db.models.BigAutoField'
"#
    )
}

/// Root `urls.py`: the admin plus each app's urls mounted at `<app>/`.
#[must_use]
pub fn root_urls_py(apps: &[&str]) -> String {
    let mut out = String::from(
        "from django.contrib import admin\nfrom django.urls import include, path\n\nurlpatterns = [\n    path('admin/', admin.site.urls),\n",
    );
    for app in apps {
        let _ = writeln!(out, "    path('{app}/', include('{app}.urls')),");
    }
    out.push_str("]\n");
    out
}

/// `<package>/wsgi.py`.
#[must_use]
pub fn wsgi_py(package: &str) -> String {
    format!(
        "import os\n\nfrom django.core.wsgi import get_wsgi_application\n\nos.environ.setdefault('DJANGO_SETTINGS_MODULE', '{package}.settings')\n\napplication = get_wsgi_application()\n"
    )
}

/// `templates/base.html`, the layout every template stub extends.
#[must_use]
pub fn base_html(package: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n  <meta charset=\"utf-8\">\n  <title>{{% block title %}}{package}{{% endblock %}}</title>\n</head>\n<body>\n{{% block content %}}{{% endblock %}}\n</body>\n</html>\n"
    )
}
