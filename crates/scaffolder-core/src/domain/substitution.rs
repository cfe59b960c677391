//! Substitution engine.
//!
//! Rewrites raw file content by replacing every alias of every placeholder
//! with the value bound in a [`TemplateDescriptor`].
//!
//! ## Ordering
//!
//! Placeholders are processed one pass each, in
//! [`Placeholder::ALL`](super::Placeholder::ALL) order. Within a pass the
//! scan is left-to-right and non-overlapping; replaced text is never
//! re-scanned by the same pass. A later pass does scan the output of
//! earlier passes, so a module name that contains `BIN_NAME` will have that
//! text rewritten by the binary-name pass. Re-running the engine over its own
//! output is therefore a no-op unless some bound value contains an alias.
//!
//! Content is treated as bytes. Nothing is decoded, so non-UTF-8 files pass
//! through untouched apart from alias matches.

use std::borrow::Cow;
use std::path::PathBuf;

use regex::bytes::NoExpand;

use super::{FileMode, TemplateDescriptor};

/// Replace every recognised alias in `content` with its bound value.
pub fn rewrite(content: &[u8], descriptor: &TemplateDescriptor) -> Vec<u8> {
    if content.is_empty() {
        return Vec::new();
    }

    let mut current: Cow<'_, [u8]> = Cow::Borrowed(content);

    for binding in descriptor.bindings() {
        // `NoExpand`: bound values are literal even if they contain `$`.
        let next = match binding
            .pattern
            .replace_all(&current, NoExpand(binding.value.as_bytes()))
        {
            Cow::Borrowed(_) => None,
            Cow::Owned(bytes) => Some(bytes),
        };

        if let Some(bytes) = next {
            current = Cow::Owned(bytes);
        }
    }

    current.into_owned()
}

/// Outcome of rewriting one file, handed from the engine to the writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRewriteResult {
    pub path: PathBuf,
    pub content: Vec<u8>,
    pub mode: FileMode,
    pub changed: bool,
}

impl FileRewriteResult {
    /// Run the engine over one file's content, carrying its mode forward.
    pub fn compute(
        path: impl Into<PathBuf>,
        original: &[u8],
        mode: FileMode,
        descriptor: &TemplateDescriptor,
    ) -> Self {
        let content = rewrite(original, descriptor);
        let changed = content.as_slice() != original;
        Self {
            path: path.into(),
            content,
            mode,
            changed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Placeholder;

    fn descriptor() -> TemplateDescriptor {
        TemplateDescriptor::new(
            "https://example.com/template.git",
            "app",
            "github.com/acme/app",
            "app",
            "Acme",
            "An app",
        )
        .unwrap()
    }

    fn rewrite_str(content: &str, descriptor: &TemplateDescriptor) -> String {
        String::from_utf8(rewrite(content.as_bytes(), descriptor)).unwrap()
    }

    #[test]
    fn every_alias_becomes_its_value() {
        let descriptor = descriptor();
        for placeholder in Placeholder::ALL {
            let expected = descriptor.value(placeholder);
            for alias in descriptor.registry().aliases_for(placeholder).iter() {
                assert_eq!(rewrite_str(alias, &descriptor), expected, "alias {alias}");
            }
        }
    }

    #[test]
    fn replaces_all_occurrences_in_context() {
        let descriptor = descriptor();
        let input = "module MODULE_NAME\n\nLABEL vendor=\"{{vendor_name}}\" desc=\"IMG_DESCRIPTION\"\nbin: BIN_NAME BIN_NAME\n";
        let output = rewrite_str(input, &descriptor);
        assert_eq!(
            output,
            "module github.com/acme/app\n\nLABEL vendor=\"Acme\" desc=\"An app\"\nbin: app app\n"
        );
    }

    #[test]
    fn empty_content_is_empty() {
        assert!(rewrite(b"", &descriptor()).is_empty());
    }

    #[test]
    fn content_without_aliases_is_unchanged() {
        let input = "package main\n\nfunc main() {}\n";
        assert_eq!(rewrite_str(input, &descriptor()), input);
    }

    #[test]
    fn dollar_signs_in_values_are_literal() {
        let descriptor =
            TemplateDescriptor::new("url", "root", "mod", "bin", "$1 ${vendor}", "").unwrap();
        assert_eq!(rewrite_str("IMG_VENDOR_NAME", &descriptor), "$1 ${vendor}");
    }

    #[test]
    fn non_utf8_bytes_survive() {
        let descriptor = descriptor();
        let mut input = vec![0xff, 0xfe, 0x00];
        input.extend_from_slice(b"BIN_NAME");
        input.push(0x80);

        let mut expected = vec![0xff, 0xfe, 0x00];
        expected.extend_from_slice(b"app");
        expected.push(0x80);

        assert_eq!(rewrite(&input, &descriptor), expected);
    }

    #[test]
    fn rerun_is_noop_without_coincident_values() {
        let descriptor = descriptor();
        let once = rewrite(b"MODULE_NAME/BIN_NAME {{description}}", &descriptor);
        let twice = rewrite(&once, &descriptor);
        assert_eq!(once, twice);
    }

    #[test]
    fn coincident_value_is_rewritten_by_later_pass_and_on_rerun() {
        // The module name deliberately contains the description alias. The
        // description pass runs after the module pass, so it rewrites it.
        let descriptor =
            TemplateDescriptor::new("url", "root", "mod-IMG_DESCRIPTION", "bin", "", "d")
                .unwrap();
        assert_eq!(rewrite_str("MODULE_NAME", &descriptor), "mod-d");

        // The vendor value contains the module alias. The module pass already
        // ran, so the first run leaves it; a second run rewrites it.
        let descriptor =
            TemplateDescriptor::new("url", "root", "m", "bin", "MODULE_NAME inc", "d").unwrap();
        let once = rewrite_str("IMG_VENDOR_NAME", &descriptor);
        assert_eq!(once, "MODULE_NAME inc");
        let twice = rewrite_str(&once, &descriptor);
        assert_eq!(twice, "m inc");
    }

    #[test]
    fn a_pass_does_not_rescan_its_own_output() {
        // Value contains its own alias: one run substitutes exactly once.
        let descriptor =
            TemplateDescriptor::new("url", "root", "m", "BIN_NAME-x", "", "d").unwrap();
        assert_eq!(rewrite_str("BIN_NAME", &descriptor), "BIN_NAME-x");
    }

    #[test]
    fn compute_reports_change_and_keeps_mode() {
        let descriptor = descriptor();
        let result = FileRewriteResult::compute(
            "build.sh",
            b"echo BIN_NAME",
            FileMode::new(0o755),
            &descriptor,
        );
        assert!(result.changed);
        assert_eq!(result.content, b"echo app");
        assert_eq!(result.mode, FileMode::new(0o755));

        let untouched =
            FileRewriteResult::compute("README", b"hello", FileMode::new(0o644), &descriptor);
        assert!(!untouched.changed);
    }
}
