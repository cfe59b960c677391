//! Template descriptor: the validated inputs of one scaffolding run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::bytes::Regex;

use super::{AliasSet, DomainError, Placeholder, TokenRegistry};

/// Value bound to the vendor placeholder when the caller supplies none.
pub const DEFAULT_VENDOR_NAME: &str = "TODO: provide a vendor name";

/// Description bound when the caller supplies none.
pub fn default_description(bin_name: &str) -> String {
    format!("TODO: provide a description for {bin_name}")
}

/// A placeholder's aliases, their compiled pattern, and the value that
/// replaces them.
#[derive(Debug, Clone, Copy)]
pub struct TokenBinding<'a> {
    pub placeholder: Placeholder,
    pub aliases: &'a AliasSet,
    pub pattern: &'a Regex,
    pub value: &'a str,
}

/// Validated, immutable bundle of bound values and paths for one run.
///
/// Construction is the only place validation happens: a value of this type
/// always has non-empty module name, binary name, source location and root
/// directory. Values are stored byte-for-byte as supplied; any case policy is
/// the caller's business.
#[derive(Debug, Clone)]
pub struct TemplateDescriptor {
    values: [String; 4],
    root_dir: PathBuf,
    source_location: String,
    registry: Arc<TokenRegistry>,
}

impl TemplateDescriptor {
    /// Build a descriptor against the standard token registry.
    ///
    /// Checks run in order and the first failure wins: module name, binary
    /// name, source location, root directory. Empty vendor name and
    /// description are replaced by default text.
    pub fn new(
        source_location: impl Into<String>,
        root_dir: impl Into<PathBuf>,
        module_name: impl Into<String>,
        bin_name: impl Into<String>,
        vendor_name: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, DomainError> {
        Self::builder(Arc::new(TokenRegistry::standard()))
            .source_location(source_location)
            .root_dir(root_dir)
            .module_name(module_name)
            .bin_name(bin_name)
            .vendor_name(vendor_name)
            .description(description)
            .build()
    }

    /// Start a descriptor bound to an existing registry.
    pub fn builder(registry: Arc<TokenRegistry>) -> TemplateDescriptorBuilder {
        TemplateDescriptorBuilder {
            registry,
            source_location: String::new(),
            root_dir: PathBuf::new(),
            module_name: String::new(),
            bin_name: String::new(),
            vendor_name: String::new(),
            description: String::new(),
        }
    }

    pub fn value(&self, placeholder: Placeholder) -> &str {
        &self.values[placeholder.index()]
    }

    pub fn module_name(&self) -> &str {
        self.value(Placeholder::ModuleName)
    }

    pub fn bin_name(&self) -> &str {
        self.value(Placeholder::BinName)
    }

    pub fn vendor_name(&self) -> &str {
        self.value(Placeholder::VendorName)
    }

    pub fn description(&self) -> &str {
        self.value(Placeholder::Description)
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    pub fn source_location(&self) -> &str {
        &self.source_location
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    /// Aliases and bound value for one placeholder.
    pub fn binding(&self, placeholder: Placeholder) -> TokenBinding<'_> {
        TokenBinding {
            placeholder,
            aliases: self.registry.aliases_for(placeholder),
            pattern: self.registry.pattern_for(placeholder),
            value: self.value(placeholder),
        }
    }

    /// All bindings in substitution order.
    pub fn bindings(&self) -> impl Iterator<Item = TokenBinding<'_>> {
        Placeholder::ALL.into_iter().map(|p| self.binding(p))
    }
}

impl fmt::Display for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) from {} into {}",
            self.bin_name(),
            self.module_name(),
            self.source_location,
            self.root_dir.display()
        )
    }
}

/// Builder for [`TemplateDescriptor`]; validation happens in [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct TemplateDescriptorBuilder {
    registry: Arc<TokenRegistry>,
    source_location: String,
    root_dir: PathBuf,
    module_name: String,
    bin_name: String,
    vendor_name: String,
    description: String,
}

impl TemplateDescriptorBuilder {
    pub fn source_location(mut self, source_location: impl Into<String>) -> Self {
        self.source_location = source_location.into();
        self
    }

    pub fn root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = root_dir.into();
        self
    }

    pub fn module_name(mut self, module_name: impl Into<String>) -> Self {
        self.module_name = module_name.into();
        self
    }

    pub fn bin_name(mut self, bin_name: impl Into<String>) -> Self {
        self.bin_name = bin_name.into();
        self
    }

    pub fn vendor_name(mut self, vendor_name: impl Into<String>) -> Self {
        self.vendor_name = vendor_name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn build(self) -> Result<TemplateDescriptor, DomainError> {
        if self.module_name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "module name",
            });
        }
        if self.bin_name.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "binary name",
            });
        }
        if self.source_location.is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "source location",
            });
        }
        if self.root_dir.as_os_str().is_empty() {
            return Err(DomainError::MissingRequiredField {
                field: "root directory",
            });
        }

        let vendor_name = if self.vendor_name.is_empty() {
            DEFAULT_VENDOR_NAME.to_string()
        } else {
            self.vendor_name
        };
        let description = if self.description.is_empty() {
            default_description(&self.bin_name)
        } else {
            self.description
        };

        Ok(TemplateDescriptor {
            values: [self.module_name, self.bin_name, vendor_name, description],
            root_dir: self.root_dir,
            source_location: self.source_location,
            registry: self.registry,
        })
    }
}
