//! Build plan for the target Django project.
//!
//! A plan arrives as free text from the plan synthesizer. [`Plan::parse`]
//! either yields a [`StructuredPlan`] or keeps the text as [`Plan::Raw`];
//! malformed input is never an error.

pub mod fields;

use std::sync::LazyLock;

use regex::Regex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

pub use fields::FieldMap;

static RE_CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^```[A-Za-z]*[ \t]*$|```\s*$").expect("valid code fence regex")
});

/// A fully structured build plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredPlan {
    /// Apps to generate, in generation order.
    pub apps: Vec<AppPlan>,
}

/// One Django app.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppPlan {
    /// App name; also the directory name.
    pub name: String,
    /// Model declarations.
    #[serde(default)]
    pub models: Vec<ModelPlan>,
    /// Class-based view declarations.
    #[serde(default)]
    pub views: Vec<ViewPlan>,
    /// URL bindings.
    #[serde(default)]
    pub urls: Vec<UrlPlan>,
    /// Template stubs to emit.
    #[serde(default)]
    pub templates: Vec<TemplatePlan>,
}

/// A model declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelPlan {
    /// Model class name.
    pub name: String,
    /// Field name to type tag.
    #[serde(default)]
    pub fields: FieldMap,
}

/// A view declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewPlan {
    /// View class name.
    pub name: String,
    /// Generic view base, e.g. `ListView`.
    #[serde(default, alias = "type")]
    pub type_tag: Option<String>,
    /// Model the view is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Template the view renders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
}

/// A URL binding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UrlPlan {
    /// Route pattern, e.g. `posts/<int:pk>/`.
    pub pattern: String,
    /// View class the pattern dispatches to.
    pub view: String,
}

/// A template stub request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplatePlan {
    /// Path relative to the app's `templates/` directory.
    pub name: String,
}

/// Either a structured plan or the unparsed collaborator text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// The text parsed into the expected shape.
    Structured(StructuredPlan),
    /// The text did not parse; kept verbatim.
    Raw(String),
}

impl Plan {
    /// Parses collaborator text into a plan, falling back to [`Plan::Raw`].
    ///
    /// Surrounding Markdown code fences are ignored.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let body = strip_code_fences(text);
        match serde_json::from_str::<StructuredPlan>(&body) {
            Ok(plan) => {
                tracing::debug!(apps = plan.apps.len(), "parsed structured plan");
                Self::Structured(plan)
            }
            Err(e) => {
                tracing::warn!(error = %e, "plan text is not a structured plan, keeping raw text");
                Self::Raw(text.to_string())
            }
        }
    }

    /// Apps to generate. A raw plan has none.
    #[must_use]
    pub fn apps(&self) -> &[AppPlan] {
        match self {
            Self::Structured(plan) => &plan.apps,
            Self::Raw(_) => &[],
        }
    }

    /// Returns `true` for the raw fallback.
    #[must_use]
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl Serialize for Plan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Structured(plan) => plan.serialize(serializer),
            Self::Raw(text) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("raw_plan", text)?;
                map.end()
            }
        }
    }
}

fn strip_code_fences(text: &str) -> String {
    RE_CODE_FENCE.replace_all(text.trim(), "").trim().to_string()
}
