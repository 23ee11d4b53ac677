use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use thiserror::Error;

use crate::error::StylegenError;
use crate::{CatalogError, PropertyRuleSet, PropertyRuleSetBuilder, Style, ValidationError};

/// Read-only source of rule sets and styles.
///
/// `Ok(None)` means "no such entry"; `Err` means the lookup itself broke and
/// aborts generation. Implementations backed by storage return owned values,
/// in-memory ones lend.
pub trait RuleCatalog {
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the backing store cannot be queried.
    fn rule_set(
        &self,
        version: &str,
        property: &str,
    ) -> Result<Option<Cow<'_, PropertyRuleSet>>, CatalogError>;

    /// # Errors
    ///
    /// Returns [`CatalogError`] when the backing store cannot be queried.
    fn style(&self, name: &str) -> Result<Option<Cow<'_, Style>>, CatalogError>;
}

impl<C: RuleCatalog + ?Sized> RuleCatalog for &C {
    fn rule_set(
        &self,
        version: &str,
        property: &str,
    ) -> Result<Option<Cow<'_, PropertyRuleSet>>, CatalogError> {
        (**self).rule_set(version, property)
    }

    fn style(&self, name: &str) -> Result<Option<Cow<'_, Style>>, CatalogError> {
        (**self).style(name)
    }
}

impl<C: RuleCatalog + ?Sized> RuleCatalog for Arc<C> {
    fn rule_set(
        &self,
        version: &str,
        property: &str,
    ) -> Result<Option<Cow<'_, PropertyRuleSet>>, CatalogError> {
        (**self).rule_set(version, property)
    }

    fn style(&self, name: &str) -> Result<Option<Cow<'_, Style>>, CatalogError> {
        (**self).style(name)
    }
}

/// Why [`resolve`] produced no rule set.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The property is unsupported for the version. Carries a `RuleNotFound` error.
    #[error("{0}")]
    NotFound(ValidationError),

    /// The catalog lookup failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Look up the rule set for `(version, property)`.
///
/// # Errors
///
/// Returns [`ResolveError::NotFound`] when the catalog has no entry, and
/// [`ResolveError::Catalog`] when the lookup fails.
pub fn resolve<'c, C: RuleCatalog + ?Sized>(
    catalog: &'c C,
    version: &str,
    property: &str,
) -> Result<Cow<'c, PropertyRuleSet>, ResolveError> {
    match catalog.rule_set(version, property) {
        Ok(Some(rule)) => Ok(rule),
        Ok(None) => Err(ResolveError::NotFound(ValidationError::rule_not_found(
            property, version,
        ))),
        Err(err) => Err(ResolveError::Catalog(err)),
    }
}

/// A catalog held entirely in memory. Immutable once built.
///
/// # Example
///
/// ```
/// use stylegen::{InMemoryCatalog, RuleCatalog, Style};
///
/// let catalog = InMemoryCatalog::builder()
///     .style(Style::new("anime", "illustration"))
///     .property("6", "chaos", |p| p.min("0").max("100"))
///     .property("6", "ar", |p| p.parameters(["16:9", "1:1"]))
///     .build()
///     .unwrap();
///
/// assert!(catalog.rule_set("6", "chaos").unwrap().is_some());
/// assert_eq!(catalog.properties("6"), vec!["ar", "chaos"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    rules: BTreeMap<String, BTreeMap<String, PropertyRuleSet>>,
    styles: BTreeMap<String, Style>,
}

impl InMemoryCatalog {
    #[must_use]
    pub fn builder() -> InMemoryCatalogBuilder {
        InMemoryCatalogBuilder::default()
    }

    /// All versions with at least one property, sorted.
    #[must_use]
    pub fn versions(&self) -> Vec<&str> {
        self.rules.keys().map(String::as_str).collect()
    }

    /// Property names defined for `version`, sorted. Empty for unknown versions.
    #[must_use]
    pub fn properties(&self, version: &str) -> Vec<&str> {
        self.rules
            .get(version)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// All rule sets for `version`, sorted by property name.
    pub fn rule_sets(&self, version: &str) -> impl Iterator<Item = &PropertyRuleSet> {
        self.rules.get(version).into_iter().flat_map(BTreeMap::values)
    }

    /// All styles, sorted by name.
    pub fn styles(&self) -> impl Iterator<Item = &Style> {
        self.styles.values()
    }

    /// Styles carrying `tag`, sorted by name.
    pub fn styles_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Style> {
        self.styles.values().filter(move |s| s.has_tag(tag))
    }

    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.values().map(BTreeMap::len).sum()
    }
}

impl RuleCatalog for InMemoryCatalog {
    fn rule_set(
        &self,
        version: &str,
        property: &str,
    ) -> Result<Option<Cow<'_, PropertyRuleSet>>, CatalogError> {
        Ok(self
            .rules
            .get(version)
            .and_then(|props| props.get(property))
            .map(Cow::Borrowed))
    }

    fn style(&self, name: &str) -> Result<Option<Cow<'_, Style>>, CatalogError> {
        Ok(self.styles.get(name).map(Cow::Borrowed))
    }
}

enum PendingRule {
    Built(PropertyRuleSet),
    Deferred(PropertyRuleSetBuilder),
}

/// Builder for [`InMemoryCatalog`]. Definitions are checked in [`build()`](Self::build).
#[derive(Default)]
#[must_use]
pub struct InMemoryCatalogBuilder {
    rules: Vec<PendingRule>,
    styles: Vec<Style>,
}

impl std::fmt::Debug for InMemoryCatalogBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCatalogBuilder")
            .field("rules", &self.rules.len())
            .field("styles", &self.styles.len())
            .finish()
    }
}

impl InMemoryCatalogBuilder {
    /// Define a property rule set. The closure configures the rule builder.
    pub fn property(
        mut self,
        version: &str,
        name: &str,
        f: impl FnOnce(PropertyRuleSetBuilder) -> PropertyRuleSetBuilder,
    ) -> Self {
        let builder = f(PropertyRuleSet::builder(version, name));
        self.rules.push(PendingRule::Deferred(builder));
        self
    }

    /// Add an already-built rule set.
    pub fn rule_set(mut self, rule: PropertyRuleSet) -> Self {
        self.rules.push(PendingRule::Built(rule));
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.styles.push(style);
        self
    }

    /// Build every pending rule set and index everything.
    ///
    /// # Errors
    ///
    /// Returns [`StylegenError::RuleDefinition`] for an invalid rule,
    /// [`StylegenError::DuplicateRule`] when a `(version, property)` pair is
    /// defined twice, and [`StylegenError::DuplicateStyle`] for a repeated style name.
    pub fn build(self) -> Result<InMemoryCatalog, StylegenError> {
        let mut rules: BTreeMap<String, BTreeMap<String, PropertyRuleSet>> = BTreeMap::new();
        for pending in self.rules {
            let rule = match pending {
                PendingRule::Built(rule) => rule,
                PendingRule::Deferred(builder) => builder.build()?,
            };
            let props = rules.entry(rule.version().to_owned()).or_default();
            if props.contains_key(rule.property_name()) {
                return Err(StylegenError::DuplicateRule {
                    version: rule.version().to_owned(),
                    property: rule.property_name().to_owned(),
                });
            }
            props.insert(rule.property_name().to_owned(), rule);
        }

        let mut seen = HashSet::new();
        let mut styles = BTreeMap::new();
        for style in self.styles {
            if !seen.insert(style.name.clone()) {
                return Err(StylegenError::DuplicateStyle { name: style.name });
            }
            styles.insert(style.name.clone(), style);
        }

        tracing::debug!(
            versions = rules.len(),
            styles = styles.len(),
            "built in-memory catalog"
        );
        Ok(InMemoryCatalog { rules, styles })
    }
}
