//! Token registry: the fixed mapping from placeholder to alias set.
//!
//! A [`TokenRegistry`] is built once at startup and shared (usually behind an
//! `Arc`) by everything that needs to recognise placeholders. Each
//! placeholder's aliases are compiled into a single disjunctive pattern at
//! construction, so no pattern is ever compiled per file.
//!
//! Aliases are matched literally. `{{module_name}}` is escaped before being
//! joined into the pattern, so braces never take on repetition meaning.

use std::collections::HashMap;

use regex::bytes::Regex;

use super::{DomainError, Placeholder};

/// Ordered, non-empty list of literals that all denote one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasSet(Vec<String>);

impl AliasSet {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, literal: &str) -> bool {
        self.0.iter().any(|a| a == literal)
    }
}

#[derive(Debug, Clone)]
struct RegistryEntry {
    aliases: AliasSet,
    pattern: Regex,
}

/// Immutable placeholder-to-alias mapping with pre-compiled patterns.
#[derive(Debug, Clone)]
pub struct TokenRegistry {
    // Laid out in `Placeholder::ALL` order.
    entries: Vec<RegistryEntry>,
}

impl TokenRegistry {
    /// The registry recognising the literal set used by existing templates.
    ///
    /// # Panics
    /// Panics if the built-in alias table violates the registry invariants,
    /// which would be a bug in [`Placeholder::standard_aliases`].
    pub fn standard() -> Self {
        Self::new(
            Placeholder::ALL
                .iter()
                .map(|p| (*p, p.standard_aliases().iter().copied())),
        )
        .expect("built-in alias table is valid")
    }

    /// Build a registry from explicit alias sets.
    ///
    /// Every placeholder must receive at least one alias. Repeating a
    /// placeholder appends to its set. Fails if an alias is empty, if a literal
    /// appears twice (within one set or across sets), or if a pattern does not
    /// compile.
    pub fn new<I, A, S>(alias_sets: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (Placeholder, A)>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut collected: [Vec<String>; 4] = Default::default();
        for (placeholder, aliases) in alias_sets {
            collected[placeholder.index()].extend(aliases.into_iter().map(Into::into));
        }

        let mut owners: HashMap<String, Placeholder> = HashMap::new();
        let mut entries = Vec::with_capacity(Placeholder::ALL.len());

        for placeholder in Placeholder::ALL {
            let aliases = std::mem::take(&mut collected[placeholder.index()]);
            if aliases.is_empty() {
                return Err(DomainError::NoAliases { placeholder });
            }

            for alias in &aliases {
                if alias.is_empty() {
                    return Err(DomainError::EmptyAlias { placeholder });
                }
                if let Some(first) = owners.insert(alias.clone(), placeholder) {
                    return Err(DomainError::DuplicateAlias {
                        alias: alias.clone(),
                        first,
                        second: placeholder,
                    });
                }
            }

            let pattern = compile(placeholder, &aliases)?;
            entries.push(RegistryEntry {
                aliases: AliasSet(aliases),
                pattern,
            });
        }

        Ok(Self { entries })
    }

    /// Ordered alias literals for `placeholder`.
    pub fn aliases_for(&self, placeholder: Placeholder) -> &AliasSet {
        &self.entry(placeholder).aliases
    }

    /// Compiled pattern matching any alias of `placeholder`.
    pub fn pattern_for(&self, placeholder: Placeholder) -> &Regex {
        &self.entry(placeholder).pattern
    }

    /// Source text of the compiled pattern, e.g. `BIN_NAME|\{\{bin_name\}\}`.
    pub fn pattern_source(&self, placeholder: Placeholder) -> &str {
        self.entry(placeholder).pattern.as_str()
    }

    fn entry(&self, placeholder: Placeholder) -> &RegistryEntry {
        // Every placeholder gets an entry in `new`; a miss here is a bug.
        &self.entries[placeholder.index()]
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn compile(placeholder: Placeholder, aliases: &[String]) -> Result<Regex, DomainError> {
    let source = aliases
        .iter()
        .map(|a| regex::escape(a))
        .collect::<Vec<_>>()
        .join("|");

    Regex::new(&source).map_err(|e| DomainError::InvalidPattern {
        placeholder,
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_exposes_literal_set() {
        let registry = TokenRegistry::standard();

        let module: Vec<_> = registry.aliases_for(Placeholder::ModuleName).iter().collect();
        assert_eq!(module, ["MODULE_NAME", "{{module_name}}"]);

        let vendor: Vec<_> = registry.aliases_for(Placeholder::VendorName).iter().collect();
        assert_eq!(vendor, ["IMG_VENDOR_NAME", "{{vendor_name}}"]);

        let description: Vec<_> = registry
            .aliases_for(Placeholder::Description)
            .iter()
            .collect();
        assert_eq!(description, ["IMG_DESCRIPTION", "{{description}}"]);
    }

    #[test]
    fn pattern_source_escapes_braces() {
        let registry = TokenRegistry::standard();
        assert_eq!(
            registry.pattern_source(Placeholder::ModuleName),
            r"MODULE_NAME|\{\{module_name\}\}"
        );
    }

    #[test]
    fn patterns_match_every_alias_literally() {
        let registry = TokenRegistry::standard();
        for placeholder in Placeholder::ALL {
            let pattern = registry.pattern_for(placeholder);
            for alias in registry.aliases_for(placeholder).iter() {
                let m = pattern.find(alias.as_bytes()).unwrap();
                assert_eq!(m.as_bytes(), alias.as_bytes());
            }
        }
    }

    fn custom(sets: Vec<(Placeholder, Vec<&str>)>) -> Result<TokenRegistry, DomainError> {
        TokenRegistry::new(sets)
    }

    #[test]
    fn rejects_alias_shared_across_placeholders() {
        let err = custom(vec![
            (Placeholder::ModuleName, vec!["NAME"]),
            (Placeholder::BinName, vec!["NAME"]),
            (Placeholder::VendorName, vec!["VENDOR"]),
            (Placeholder::Description, vec!["DESC"]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::DuplicateAlias {
                alias: "NAME".into(),
                first: Placeholder::ModuleName,
                second: Placeholder::BinName,
            }
        );
    }

    #[test]
    fn rejects_empty_alias() {
        let err = custom(vec![
            (Placeholder::ModuleName, vec!["MOD", ""]),
            (Placeholder::BinName, vec!["BIN"]),
            (Placeholder::VendorName, vec!["VENDOR"]),
            (Placeholder::Description, vec!["DESC"]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::EmptyAlias {
                placeholder: Placeholder::ModuleName
            }
        );
    }

    #[test]
    fn rejects_missing_placeholder() {
        let err = custom(vec![
            (Placeholder::ModuleName, vec!["MOD"]),
            (Placeholder::BinName, vec!["BIN"]),
            (Placeholder::VendorName, vec!["VENDOR"]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::NoAliases {
                placeholder: Placeholder::Description
            }
        );
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let registry = custom(vec![
            (Placeholder::ModuleName, vec!["a.b"]),
            (Placeholder::BinName, vec!["(bin)"]),
            (Placeholder::VendorName, vec!["v+"]),
            (Placeholder::Description, vec!["$desc"]),
        ])
        .unwrap();

        let pattern = registry.pattern_for(Placeholder::ModuleName);
        assert!(pattern.is_match(b"a.b"));
        assert!(!pattern.is_match(b"axb"));
    }
}
