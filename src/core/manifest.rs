//! Reading OSGi identity out of a jar's `META-INF/MANIFEST.MF`.

use crate::domain::model::BundleId;
use crate::utils::error::{Result, SetupError};
use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;
use zip::ZipArchive;

pub const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";

pub const BUNDLE_SYMBOLIC_NAME: &str = "Bundle-SymbolicName";
pub const BUNDLE_VERSION: &str = "Bundle-Version";
pub const ECLIPSE_SOURCE_BUNDLE: &str = "Eclipse-SourceBundle";

static HEADER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap());

static SYMBOLIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+(\.[A-Za-z0-9_-]+)*$").unwrap());

static OSGI_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+(\.[0-9]+(\.[0-9]+(\.[A-Za-z0-9_-]+)?)?)?$").unwrap()
});

/// Main section of a jar manifest. Per-entry sections are not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    headers: Vec<(String, String)>,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let normalized = content.replace("\r\n", "\n").replace('\r', "\n");

        let mut headers: Vec<(String, String)> = Vec::new();

        for (idx, line) in normalized.split('\n').enumerate() {
            let line_no = idx + 1;

            if line.is_empty() {
                break;
            }

            if let Some(rest) = line.strip_prefix(' ') {
                match headers.last_mut() {
                    Some((_, value)) => value.push_str(rest),
                    None => {
                        return Err(SetupError::ManifestSyntax {
                            line: line_no,
                            message: "continuation line without a preceding header".to_string(),
                        })
                    }
                }
                continue;
            }

            let (name, value) =
                line.split_once(": ")
                    .ok_or_else(|| SetupError::ManifestSyntax {
                        line: line_no,
                        message: format!("expected 'Name: value', found '{}'", line),
                    })?;

            if !HEADER_NAME.is_match(name) {
                return Err(SetupError::ManifestSyntax {
                    line: line_no,
                    message: format!("invalid header name '{}'", name),
                });
            }

            headers.push((name.to_string(), value.to_string()));
        }

        Ok(Self { headers })
    }

    /// Case-insensitive lookup; the first occurrence wins.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let entry_name = archive
        .file_names()
        .find(|name| name.eq_ignore_ascii_case(MANIFEST_PATH))
        .map(str::to_owned)
        .ok_or(SetupError::MissingManifest)?;

    let mut bytes = Vec::new();
    archive.by_name(&entry_name)?.read_to_end(&mut bytes)?;

    let content = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        SetupError::ManifestSyntax {
            line: valid.iter().filter(|b| **b == b'\n').count() + 1,
            message: "manifest is not valid UTF-8".to_string(),
        }
    })?;

    Manifest::parse(&content)
}

impl BundleId {
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        let raw_name = required_header(manifest, BUNDLE_SYMBOLIC_NAME)?;
        // drop directives such as `;singleton:=true`
        let symbolic_name = raw_name.split(';').next().unwrap_or_default().trim();
        if !SYMBOLIC_NAME.is_match(symbolic_name) {
            return Err(SetupError::InvalidHeader {
                header: BUNDLE_SYMBOLIC_NAME.to_string(),
                value: raw_name.to_string(),
                reason: "expected dot-separated tokens of letters, digits, '_' or '-'"
                    .to_string(),
            });
        }

        let version = required_header(manifest, BUNDLE_VERSION)?.trim();
        if !OSGI_VERSION.is_match(version) {
            return Err(SetupError::InvalidHeader {
                header: BUNDLE_VERSION.to_string(),
                value: version.to_string(),
                reason: "expected major[.minor[.micro[.qualifier]]]".to_string(),
            });
        }

        Ok(Self {
            symbolic_name: symbolic_name.to_string(),
            version: version.to_string(),
            is_source: manifest.get(ECLIPSE_SOURCE_BUNDLE).is_some(),
        })
    }
}

fn required_header<'a>(manifest: &'a Manifest, header: &str) -> Result<&'a str> {
    match manifest.get(header) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SetupError::MissingHeader {
            header: header.to_string(),
        }),
    }
}

/// Parses the identity of the plugin archive at `path`, naming the archive in any failure.
pub fn read_bundle(path: &Path) -> Result<BundleId> {
    read_manifest(path)
        .and_then(|manifest| BundleId::from_manifest(&manifest))
        .map_err(|e| SetupError::invalid_plugin(path.display().to_string(), e))
}
