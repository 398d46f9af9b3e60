//! Role Catalog — immutable mapping of job role → ordered keyword list.
//!
//! Built once at startup and carried in `AppState` behind an `Arc`. Every
//! keyword is compiled into a literal, boundary-delimited matcher up front so
//! the per-request path does no pattern compilation.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;
use tracing::warn;

/// Catalog shipped with the service, used when no `ROLE_CATALOG_PATH` is set.
const BUILTIN_CATALOG: &str = include_str!("../../catalog/roles.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read role catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Role catalog is not a JSON object of role -> [keyword]: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Keyword '{keyword}' for role '{role}' cannot be compiled: {source}")]
    InvalidKeyword {
        role: String,
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

/// A single catalog keyword and its compiled whole-word matcher.
#[derive(Debug, Clone)]
pub struct Keyword {
    text: String,
    pattern: Regex,
}

impl Keyword {
    fn compile(role: &str, text: String) -> Result<Self, CatalogError> {
        // Boundary = string edge or a non-word character on each side. The
        // keyword itself is escaped, so "c++" or "node.js" match literally.
        let source = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&text));
        let pattern = Regex::new(&source).map_err(|e| CatalogError::InvalidKeyword {
            role: role.to_string(),
            keyword: text.clone(),
            source: e,
        })?;
        Ok(Self { text, pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// True when the keyword occurs in `text` as a whole word.
    /// `text` is expected to be lowercased already.
    pub fn is_found_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Immutable role → keywords mapping. Roles iterate in ascending name order.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: BTreeMap<String, Vec<Keyword>>,
}

impl RoleCatalog {
    /// Builds a catalog from `(role, keywords)` pairs.
    ///
    /// Keywords are trimmed and lowercased; blanks are dropped and repeated
    /// keywords within a role keep only their first occurrence. A role listed
    /// twice has its keyword lists merged in order.
    pub fn from_roles<R, K, S>(roles: R) -> Result<Self, CatalogError>
    where
        R: IntoIterator<Item = (S, K)>,
        K: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut raw: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (role, keywords) in roles {
            raw.entry(role.into())
                .or_default()
                .extend(keywords.into_iter().map(Into::into));
        }

        let mut catalog = BTreeMap::new();
        for (role, keywords) in raw {
            let mut seen = HashSet::new();
            let mut compiled = Vec::with_capacity(keywords.len());
            for keyword in keywords {
                let normalized = keyword.trim().to_lowercase();
                if normalized.is_empty() {
                    continue;
                }
                if !seen.insert(normalized.clone()) {
                    warn!(role = %role, keyword = %normalized, "Duplicate keyword in role catalog ignored");
                    continue;
                }
                compiled.push(Keyword::compile(&role, normalized)?);
            }
            if compiled.is_empty() {
                warn!(role = %role, "Role has no keywords and will never be scored");
            }
            catalog.insert(role, compiled);
        }

        Ok(Self { roles: catalog })
    }

    /// Parses a JSON object of the form `{"role": ["keyword", ...]}`.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let raw: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::from_roles(raw)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&json)
    }

    /// The catalog bundled into the binary.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterates roles in ascending name order with their keywords in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Keyword])> {
        self.roles.iter().map(|(r, k)| (r.as_str(), k.as_slice()))
    }

    /// Total keyword count for `role`; 0 for unknown roles.
    pub fn keyword_count(&self, role: &str) -> usize {
        self.roles.get(role).map(Vec::len).unwrap_or(0)
    }

    /// Plain role → keyword strings view, as served by `GET /roles`.
    pub fn to_keyword_map(&self) -> BTreeMap<String, Vec<String>> {
        self.roles
            .iter()
            .map(|(role, keywords)| {
                (
                    role.clone(),
                    keywords.iter().map(|k| k.text.clone()).collect(),
                )
            })
            .collect()
    }
}
