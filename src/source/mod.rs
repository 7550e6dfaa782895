//! Source model: framework-agnostic description of a legacy Rails application.
//!
//! [`analyzer::analyze`] walks the conventional Rails directories and applies
//! the independent text rules in [`rules`] to each file.

pub mod analyzer;
pub mod erb;
pub mod rules;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Structured extraction result for a whole source tree.
///
/// Every section may be empty; a missing directory is an empty list, never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceModel {
    /// Persistent domain records (`ApplicationRecord` subclasses).
    pub domain_records: Vec<DomainRecord>,
    /// Request controllers (`ApplicationController` subclasses).
    pub controllers: Vec<Controller>,
    /// Route bindings from the routes file.
    pub routes: Vec<Route>,
    /// View templates.
    pub templates: Vec<Template>,
}

impl SourceModel {
    /// Returns `true` when nothing at all was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.domain_records.is_empty()
            && self.controllers.is_empty()
            && self.routes.is_empty()
            && self.templates.is_empty()
    }
}

/// A persistent domain record declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainRecord {
    /// Declared class name.
    pub name: String,
    /// Names declared through `attr_accessor`.
    pub attributes: Vec<String>,
    /// Relation directives in file order.
    pub associations: Vec<Association>,
}

/// One relation directive on a domain record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Association {
    /// Relation keyword.
    pub kind: AssociationKind,
    /// Target symbol, without the leading colon.
    pub target: String,
}

/// Relation keywords recognized on domain records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AssociationKind {
    /// `has_many :things`
    HasMany,
    /// `belongs_to :thing`
    BelongsTo,
    /// `has_one :thing`
    HasOne,
    /// `has_one_attached :file`
    HasOneAttached,
    /// `has_rich_text :body`
    HasRichText,
}

impl AssociationKind {
    /// The directive keyword as written in source.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::HasMany => "has_many",
            Self::BelongsTo => "belongs_to",
            Self::HasOne => "has_one",
            Self::HasOneAttached => "has_one_attached",
            Self::HasRichText => "has_rich_text",
        }
    }

    /// Parses a directive keyword.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "has_many" => Some(Self::HasMany),
            "belongs_to" => Some(Self::BelongsTo),
            "has_one" => Some(Self::HasOne),
            "has_one_attached" => Some(Self::HasOneAttached),
            "has_rich_text" => Some(Self::HasRichText),
            _ => None,
        }
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A request controller declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Controller {
    /// Declared class name, including the `Controller` suffix.
    pub name: String,
    /// Method names in file order.
    pub actions: Vec<String>,
    /// Arguments of `before_action` directives.
    pub before_filters: Vec<String>,
    /// Receiver type of the first `@var = Type.find...` assignment.
    pub inferred_model: Option<String>,
}

/// The seven actions a collection resource directive expands to, in order.
pub const COLLECTION_ACTIONS: [&str; 7] =
    ["index", "show", "new", "edit", "create", "update", "destroy"];

/// A route binding.
///
/// Serialized untagged: the presence of `actions` or `action` tells the two forms apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Route {
    /// Expansion of a `resources :x` directive.
    Collection {
        /// Path of the collection, e.g. `/posts`.
        path: String,
        /// Controller symbol.
        controller: String,
        /// The fixed CRUD action set.
        actions: Vec<String>,
    },
    /// A single `verb 'path', to: 'controller#action'` binding.
    Explicit {
        /// Bound path.
        path: String,
        /// Controller symbol.
        controller: String,
        /// Action name.
        action: String,
    },
}

impl Route {
    /// Path the route is bound to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Collection { path, .. } | Self::Explicit { path, .. } => path,
        }
    }

    /// Controller symbol the route dispatches to.
    #[must_use]
    pub fn controller(&self) -> &str {
        match self {
            Self::Collection { controller, .. } | Self::Explicit { controller, .. } => controller,
        }
    }
}

/// A view template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Template {
    /// Path relative to the views root, `/`-separated, extension removed.
    pub name: String,
    /// Instance variables referenced in the template, sorted and unique.
    pub variables: BTreeSet<String>,
}
