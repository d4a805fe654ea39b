use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Plugin source not found: {path}")]
    SourceNotFound { path: String },

    #[error("Archive has no META-INF/MANIFEST.MF")]
    MissingManifest,

    #[error("Manifest syntax error at line {line}: {message}")]
    ManifestSyntax { line: usize, message: String },

    #[error("Manifest is missing required header '{header}'")]
    MissingHeader { header: String },

    #[error("Invalid value '{value}' for manifest header '{header}': {reason}")]
    InvalidHeader {
        header: String,
        value: String,
        reason: String,
    },

    #[error("Invalid plugin {path}: {source}")]
    InvalidPlugin {
        path: String,
        #[source]
        source: Box<SetupError>,
    },

    #[error("Plugins {first} and {second} would both be installed as {file_name}")]
    DuplicateBundle {
        file_name: String,
        first: String,
        second: String,
    },

    #[error("Plugin {path} lives inside the install directory {install_dir}")]
    SourceInsideInstallDir { path: String, install_dir: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration '{field}'")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Bundle,
    Configuration,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SetupError {
    pub fn invalid_plugin(path: impl Into<String>, source: SetupError) -> Self {
        SetupError::InvalidPlugin {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SetupError::IoError(_) | SetupError::SourceNotFound { .. } => ErrorCategory::Io,
            SetupError::ZipError(_)
            | SetupError::MissingManifest
            | SetupError::ManifestSyntax { .. }
            | SetupError::MissingHeader { .. }
            | SetupError::InvalidHeader { .. }
            | SetupError::DuplicateBundle { .. } => ErrorCategory::Bundle,
            SetupError::InvalidPlugin { source, .. } => source.category(),
            SetupError::SourceInsideInstallDir { .. }
            | SetupError::ConfigError { .. }
            | SetupError::ConfigValidationError { .. }
            | SetupError::InvalidConfigValueError { .. }
            | SetupError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SetupError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => match self {
                SetupError::SourceNotFound { .. } => ErrorSeverity::High,
                _ => ErrorSeverity::Critical,
            },
            ErrorCategory::Bundle | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Internal => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SetupError::InvalidPlugin { source, .. } => source.recovery_suggestion(),
            SetupError::SourceNotFound { .. } => {
                "Check that every plugin path and plugin directory exists"
            }
            SetupError::IoError(_) => {
                "Check permissions on the plugin archives and the install directory"
            }
            SetupError::ZipError(_) | SetupError::MissingManifest => {
                "Make sure every plugin is a valid jar archive with a META-INF/MANIFEST.MF"
            }
            SetupError::ManifestSyntax { .. }
            | SetupError::MissingHeader { .. }
            | SetupError::InvalidHeader { .. } => {
                "Fix the Bundle-SymbolicName and Bundle-Version headers of the plugin manifest"
            }
            SetupError::DuplicateBundle { .. } => {
                "Remove one of the plugins that share the same symbolic name and version"
            }
            SetupError::SourceInsideInstallDir { .. } => {
                "Move the plugin out of the install directory or choose another install directory"
            }
            SetupError::ConfigError { .. }
            | SetupError::ConfigValidationError { .. }
            | SetupError::InvalidConfigValueError { .. }
            | SetupError::MissingConfigError { .. } => {
                "Review the command-line flags and the TOML configuration file"
            }
            SetupError::SerializationError(_) => "Retry; if the problem persists report a bug",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SetupError::InvalidPlugin { path, source } => {
                format!("Plugin '{}' cannot be installed: {}", path, source)
            }
            SetupError::SourceNotFound { path } => format!("Cannot find plugin source '{}'", path),
            SetupError::DuplicateBundle {
                file_name,
                first,
                second,
            } => format!(
                "'{}' and '{}' are the same bundle ({}); only one can be installed",
                first, second, file_name
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_plugin_delegates_to_source() {
        let err = SetupError::invalid_plugin(
            "libs/broken.jar",
            SetupError::MissingHeader {
                header: "Bundle-Version".to_string(),
            },
        );

        assert_eq!(err.category(), ErrorCategory::Bundle);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("Bundle-Version"));
        assert!(err.user_friendly_message().contains("libs/broken.jar"));
        assert!(err.to_string().contains("Bundle-Version"));
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err = SetupError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);

        let missing = SetupError::SourceNotFound {
            path: "a.jar".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_exit_codes_are_never_zero() {
        let high = SetupError::MissingManifest;
        let medium = SetupError::from(serde_json::from_str::<u8>("x").unwrap_err());
        let critical = SetupError::from(std::io::Error::other("disk gone"));

        assert_eq!(high.exit_code(), 1);
        assert_eq!(medium.exit_code(), 2);
        assert_eq!(critical.exit_code(), 3);
    }
}
