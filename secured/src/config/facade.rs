//! The configuration facade: load documents, look up keys, compose secrets.
//!
//! This module provides:
//!
//! - [`Secured`]: Holds one masked root per successfully loaded document
//! - [`SecuredBuilder`]: Sources, policy, and collaborator injection
//! - [`ComposeSource`]: What may be substituted into a compose template
//!
//! Construction never fails because of one bad source: each load failure
//! becomes a single diagnostic and the remaining sources still load.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::Level;

use super::env::{EnvAccessor, KeyProvider, ProcessEnv};
use super::loader::{DocumentLoader, YamlFileLoader};
use crate::diag::{DiagnosticSink, default_sink};
use crate::error::{Error, Result};
use crate::mapping::{ConfigNode, convert, convert_plain};
use crate::masked::Masked;
use crate::policy::{DEFAULT_PLACEHOLDER, MaskPolicy};
use crate::scalar::Scalar;

// =============================================================================
// Secured - the facade
// =============================================================================

/// Masked configuration loaded from one or more documents.
///
/// Each successfully loaded source contributes one named root, keyed by the
/// source's base name with `-` normalized to `_` (so `config-secrets.yaml`
/// becomes the root `config_secrets`). Roots are either attribute-accessible
/// mappings or plain mappings, switchable after construction with
/// [`Secured::use_attr_maps`].
///
/// A facade and its tree are effectively immutable after construction except
/// for that representation toggle, which callers sharing a facade across
/// threads must synchronize externally — there is no internal locking.
///
/// # Example
///
/// ```rust,no_run
/// use secured::Secured;
///
/// let secured = Secured::builder()
///     .source("config-secrets.yaml")
///     .secure(true)
///     .load();
///
/// let root = secured.root("config_secrets").unwrap();
/// // Prints the placeholder, not the password.
/// println!("{}", root["db"]["password"]);
/// ```
pub struct Secured {
    attr_maps: bool,
    policy: MaskPolicy,
    roots: IndexMap<String, ConfigNode>,
    sink: Arc<dyn DiagnosticSink>,
    env: Box<dyn EnvAccessor>,
    providers: Vec<Box<dyn KeyProvider>>,
}

impl Secured {
    /// Starts a builder with no sources, an open policy, and attribute maps on.
    #[must_use]
    pub fn builder() -> SecuredBuilder {
        SecuredBuilder::new()
    }

    /// The root loaded from the document named `name`.
    pub fn root(&self, name: &str) -> Result<&ConfigNode> {
        self.roots.get(name).ok_or_else(|| Error::NotFound {
            container: "Secured",
            key: name.to_owned(),
        })
    }

    /// Iterates `(name, root)` pairs in load order.
    pub fn roots(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.roots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The facade's masking policy.
    #[must_use]
    pub fn policy(&self) -> &MaskPolicy {
        &self.policy
    }

    /// Whether loaded roots use the attribute-accessible representation.
    #[must_use]
    pub fn uses_attr_maps(&self) -> bool {
        self.attr_maps
    }

    /// Converts `data` the way this facade converts loaded documents.
    ///
    /// The representation follows the facade's current mode; the masking
    /// follows `secure` with the facade's placeholder. Both representations
    /// apply the same leaf rule, so they mask identically.
    #[must_use]
    pub fn create_config(&self, data: impl Into<ConfigNode>, secure: bool) -> ConfigNode {
        let policy = MaskPolicy::new(secure).with_placeholder(self.policy.placeholder());
        if self.attr_maps {
            convert(data.into(), &policy)
        } else {
            convert_plain(data.into(), &policy)
        }
    }

    /// Switches every held root between the two mapping representations.
    ///
    /// Re-derives each root under the facade's current policy; toggling off
    /// and back on yields a tree equal key-for-key to the original.
    pub fn use_attr_maps(&mut self, use_attr: bool) {
        self.attr_maps = use_attr;
        for node in self.roots.values_mut() {
            let taken = std::mem::replace(node, ConfigNode::Scalar(Scalar::Null));
            *node = if use_attr {
                convert(taken, &self.policy)
            } else {
                convert_plain(taken, &self.policy)
            };
        }
    }

    /// Looks up `key` in the extra providers, then the environment.
    ///
    /// A found value comes back masked with the facade's placeholder. A key
    /// held by both a provider and the environment is a [`Error::Conflict`].
    /// A miss is `Ok(None)`, unless `required` — then one diagnostic is
    /// emitted and the lookup fails with [`Error::EnvNotFound`].
    pub fn get(&self, key: &str, required: bool) -> Result<Option<Masked>> {
        let env_value = self.env.var(key);

        for provider in &self.providers {
            if let Some(value) = provider.get(key) {
                if env_value.is_some() {
                    return Err(Error::Conflict {
                        key: key.to_owned(),
                    });
                }
                return Ok(Some(self.policy.mask(value)));
            }
        }

        match env_value {
            Some(value) => Ok(Some(self.policy.mask(value))),
            None if required => {
                self.sink.log(
                    Level::ERROR,
                    &format!(
                        "required key `{key}` was not found in the environment or any key provider"
                    ),
                );
                Err(Error::EnvNotFound {
                    name: key.to_owned(),
                })
            }
            None => Ok(None),
        }
    }

    /// Builds a new masked value by substituting originals into `template`.
    ///
    /// Each `(name, value)` pair contributes its substitution text — the
    /// original for a masked value, the display text otherwise — to the
    /// `{name}` placeholders of the template. The composed string comes back
    /// wrapped with the facade's placeholder: no unmasked value ever becomes
    /// the default display of the result.
    ///
    /// # Example
    ///
    /// ```rust
    /// use secured::{Masked, Secured};
    ///
    /// let secured = Secured::builder().load();
    /// let host = Masked::new("db-server.local");
    /// let url = secured
    ///     .compose("postgres://{host}/app", &[("host", &host)])
    ///     .unwrap();
    ///
    /// assert_eq!(url.to_string(), "<Sensitive data secured>");
    /// assert_eq!(url, "postgres://db-server.local/app");
    /// ```
    pub fn compose(&self, template: &str, values: &[(&str, &dyn ComposeSource)]) -> Result<Masked> {
        let context: IndexMap<&str, String> = values
            .iter()
            .map(|(name, value)| (*name, value.compose_text()))
            .collect();
        let composed = substitute(template, &context)?;
        Ok(self.policy.mask(composed))
    }
}

impl std::fmt::Debug for Secured {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secured")
            .field("attr_maps", &self.attr_maps)
            .field("policy", &self.policy)
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// SecuredBuilder
// =============================================================================

/// Builds a [`Secured`] facade.
///
/// Defaults: no sources, open policy, default placeholder, attribute maps
/// on, YAML file loader, process environment, the process-wide default sink,
/// and no extra key providers.
pub struct SecuredBuilder {
    sources: Vec<String>,
    secure: bool,
    placeholder: String,
    attr_maps: bool,
    sink: Option<Arc<dyn DiagnosticSink>>,
    loader: Box<dyn DocumentLoader>,
    env: Box<dyn EnvAccessor>,
    providers: Vec<Box<dyn KeyProvider>>,
}

impl SecuredBuilder {
    fn new() -> Self {
        Self {
            sources: Vec::new(),
            secure: false,
            placeholder: DEFAULT_PLACEHOLDER.to_owned(),
            attr_maps: true,
            sink: None,
            loader: Box::new(YamlFileLoader),
            env: Box::new(ProcessEnv),
            providers: Vec::new(),
        }
    }

    /// Appends one source identifier to load.
    #[must_use]
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Appends an ordered sequence of source identifiers.
    #[must_use]
    pub fn sources<I, S>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sources.extend(sources.into_iter().map(Into::into));
        self
    }

    /// Masks every leaf of every loaded document.
    #[must_use]
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Uses a specific placeholder text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Chooses the mapping representation for loaded roots.
    #[must_use]
    pub fn attr_maps(mut self, attr_maps: bool) -> Self {
        self.attr_maps = attr_maps;
        self
    }

    /// Routes diagnostics to a specific sink.
    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Loads documents through a specific loader.
    #[must_use]
    pub fn loader(mut self, loader: impl DocumentLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Reads variables through a specific environment accessor.
    #[must_use]
    pub fn env(mut self, env: impl EnvAccessor + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Appends an extra key provider consulted before the environment.
    #[must_use]
    pub fn key_provider(mut self, provider: impl KeyProvider + 'static) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// Loads every source, in order, and returns the facade.
    ///
    /// A source that fails to load is skipped with one `ERROR` diagnostic;
    /// the facade still holds every root that did load.
    #[must_use]
    pub fn load(self) -> Secured {
        let sink = self.sink.unwrap_or_else(default_sink);
        let policy = MaskPolicy::new(self.secure).with_placeholder(self.placeholder);

        let mut roots = IndexMap::new();
        for source in &self.sources {
            match self.loader.load(source) {
                Ok(value) => {
                    let node = ConfigNode::from(value);
                    let converted = if self.attr_maps {
                        convert(node, &policy)
                    } else {
                        convert_plain(node, &policy)
                    };
                    roots.insert(root_name(source), converted);
                }
                Err(err) => {
                    sink.log(Level::ERROR, &format!("skipping source `{source}`: {err}"));
                }
            }
        }

        Secured {
            attr_maps: self.attr_maps,
            policy,
            roots,
            sink,
            env: self.env,
            providers: self.providers,
        }
    }
}

/// Derives a root name from a source identifier: the base name without its
/// extension, with `-` normalized to `_` so it reads as a field name.
fn root_name(source: &str) -> String {
    Path::new(source)
        .file_stem()
        .map_or_else(|| source.to_owned(), |stem| stem.to_string_lossy().into_owned())
        .replace('-', "_")
}

// =============================================================================
// ComposeSource - what can be substituted into a template
// =============================================================================

/// A value usable in a [`Secured::compose`] substitution context.
///
/// Masked values contribute their *original*; everything else contributes
/// its ordinary text. The composed result is masked again before it is
/// returned, so the unmasking never reaches a display path.
pub trait ComposeSource {
    /// The text substituted into the template.
    fn compose_text(&self) -> String;
}

impl ComposeSource for Masked {
    fn compose_text(&self) -> String {
        self.expose_original().to_string()
    }
}

impl ComposeSource for Scalar {
    fn compose_text(&self) -> String {
        self.to_string()
    }
}

impl ComposeSource for ConfigNode {
    /// Leaves substitute as above; mappings and sequences substitute their
    /// unmasked YAML rendering.
    fn compose_text(&self) -> String {
        match self {
            Self::Masked(masked) => masked.compose_text(),
            Self::Scalar(scalar) => scalar.compose_text(),
            other => serde_yaml::to_string(&other.expose_original())
                .map(|s| s.trim_end().to_owned())
                .unwrap_or_default(),
        }
    }
}

impl ComposeSource for str {
    fn compose_text(&self) -> String {
        self.to_owned()
    }
}

impl ComposeSource for &str {
    fn compose_text(&self) -> String {
        (*self).to_owned()
    }
}

impl ComposeSource for String {
    fn compose_text(&self) -> String {
        self.clone()
    }
}

impl ComposeSource for i64 {
    fn compose_text(&self) -> String {
        self.to_string()
    }
}

impl ComposeSource for f64 {
    fn compose_text(&self) -> String {
        self.to_string()
    }
}

impl ComposeSource for bool {
    fn compose_text(&self) -> String {
        self.to_string()
    }
}

/// Substitutes `{name}` placeholders from `context`; `{{` and `}}` escape.
fn substitute(template: &str, context: &IndexMap<&str, String>) -> Result<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => name.push(ch),
                        None => return Err(Error::UnbalancedTemplate),
                    }
                }
                match context.get(name.as_str()) {
                    Some(text) => out.push_str(text),
                    None => return Err(Error::Substitution { name }),
                }
            }
            '}' => return Err(Error::UnbalancedTemplate),
            _ => out.push(c),
        }
    }
    Ok(out)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_names_are_normalized_field_names() {
        assert_eq!(root_name("config-secrets.yaml"), "config_secrets");
        assert_eq!(root_name("etc/app/settings.yml"), "settings");
        assert_eq!(root_name("plain"), "plain");
    }

    #[test]
    fn substitution_handles_escapes() {
        let mut context = IndexMap::new();
        context.insert("host", "db".to_owned());
        assert_eq!(
            substitute("{{literal}} {host}", &context).unwrap(),
            "{literal} db"
        );
    }

    #[test]
    fn substitution_reports_the_missing_name() {
        let context = IndexMap::new();
        let err = substitute("{absent}", &context).unwrap_err();
        assert_eq!(err.to_string(), "template references unknown key `absent`");
    }

    #[test]
    fn substitution_rejects_unbalanced_braces() {
        let context = IndexMap::new();
        assert!(matches!(
            substitute("{open", &context),
            Err(Error::UnbalancedTemplate)
        ));
        assert!(matches!(
            substitute("close}", &context),
            Err(Error::UnbalancedTemplate)
        ));
    }
}
