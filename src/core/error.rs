use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigInvalidYaml,
    ConfigInvalidValue,

    ValidationInvalidArgument,
    ValidationLengthMismatch,
    ValidationArgumentSyntax,

    FileAlreadyExists,
    FileUnsupportedType,

    TemplateRenderFailed,

    InternalIoError,
    InternalJsonError,
    InternalUnexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigInvalidYaml => "config.invalid_yaml",
            ErrorCode::ConfigInvalidValue => "config.invalid_value",

            ErrorCode::ValidationInvalidArgument => "validation.invalid_argument",
            ErrorCode::ValidationLengthMismatch => "validation.length_mismatch",
            ErrorCode::ValidationArgumentSyntax => "validation.argument_syntax",

            ErrorCode::FileAlreadyExists => "file.already_exists",
            ErrorCode::FileUnsupportedType => "file.unsupported_type",

            ErrorCode::TemplateRenderFailed => "template.render_failed",

            ErrorCode::InternalIoError => "internal.io_error",
            ErrorCode::InternalJsonError => "internal.json_error",
            ErrorCode::InternalUnexpected => "internal.unexpected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
    pub details: Value,
    pub hints: Vec<Hint>,
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidArgumentDetails {
    pub field: String,
    pub problem: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthMismatchDetails {
    pub length: usize,
    pub chunk_size: usize,
    pub remainder: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgumentSyntaxDetails {
    pub argument: String,
    pub expected_prefix: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlreadyExistsDetails {
    pub path: String,
    pub target: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsupportedTypeDetails {
    pub path: String,
    pub mime_type: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidYamlDetails {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigInvalidValueDetails {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub problem: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRenderFailedDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalIoErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InternalJsonErrorDetails {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

fn to_details<T: Serialize>(details: T) -> Value {
    serde_json::to_value(details).unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>, details: Value) -> Self {
        Self {
            code,
            message: message.into(),
            details,
            hints: Vec::new(),
        }
    }

    pub fn validation_invalid_argument(
        field: impl Into<String>,
        problem: impl Into<String>,
        value: Option<String>,
    ) -> Self {
        let problem = problem.into();
        let details = to_details(InvalidArgumentDetails {
            field: field.into(),
            problem: problem.clone(),
            value,
        });

        Self::new(
            ErrorCode::ValidationInvalidArgument,
            format!("Invalid argument: {}", problem),
            details,
        )
    }

    pub fn length_mismatch(length: usize, chunk_size: usize) -> Self {
        let remainder = if chunk_size == 0 { length } else { length % chunk_size };
        let details = to_details(LengthMismatchDetails {
            length,
            chunk_size,
            remainder,
        });

        Self::new(
            ErrorCode::ValidationLengthMismatch,
            format!(
                "Length {} is not a multiple of chunk size {}",
                length, chunk_size
            ),
            details,
        )
    }

    pub fn argument_syntax(argument: impl Into<String>, expected_prefix: impl Into<String>) -> Self {
        let argument = argument.into();
        let expected_prefix = expected_prefix.into();
        let message = format!("unrecognized argument: {}", argument);
        let hint = format!("Flags on this platform start with '{}'", expected_prefix);
        let details = to_details(ArgumentSyntaxDetails {
            argument,
            expected_prefix,
        });

        Self::new(ErrorCode::ValidationArgumentSyntax, message, details).with_hint(hint)
    }

    pub fn file_already_exists(path: impl Into<String>, target: impl Into<String>) -> Self {
        let target = target.into();
        let message = format!("{} already exists!", target);
        let details = to_details(AlreadyExistsDetails {
            path: path.into(),
            target,
        });

        Self::new(ErrorCode::FileAlreadyExists, message, details)
            .with_hint("Remove or rename the existing file, then run again")
    }

    pub fn file_unsupported_type(path: impl Into<String>, mime_type: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("Unsupported! {}", path);
        let details = to_details(UnsupportedTypeDetails {
            path,
            mime_type: mime_type.into(),
        });

        Self::new(ErrorCode::FileUnsupportedType, message, details)
            .with_hint("Only text/* content can be given an extension automatically")
    }

    pub fn config_invalid_yaml(path: impl Into<String>, err: serde_yml::Error) -> Self {
        let details = to_details(ConfigInvalidYamlDetails {
            path: path.into(),
            error: err.to_string(),
        });

        Self::new(
            ErrorCode::ConfigInvalidYaml,
            "Invalid YAML in variables file",
            details,
        )
    }

    pub fn config_invalid_value(
        key: impl Into<String>,
        value: Option<String>,
        problem: impl Into<String>,
    ) -> Self {
        let details = to_details(ConfigInvalidValueDetails {
            key: key.into(),
            value,
            problem: problem.into(),
        });

        Self::new(
            ErrorCode::ConfigInvalidValue,
            "Invalid configuration value",
            details,
        )
    }

    pub fn template_render_failed(err: &minijinja::Error) -> Self {
        let details = to_details(TemplateRenderFailedDetails {
            error: err.to_string(),
            line: err.line(),
        });

        Self::new(
            ErrorCode::TemplateRenderFailed,
            "Template rendering failed",
            details,
        )
    }

    pub fn internal_io(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalIoErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalIoError, "IO error", details)
    }

    pub fn internal_json(error: impl Into<String>, context: Option<String>) -> Self {
        let details = to_details(InternalJsonErrorDetails {
            error: error.into(),
            context,
        });

        Self::new(ErrorCode::InternalJsonError, "JSON error", details)
    }

    pub fn internal_unexpected(error: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::InternalUnexpected,
            "Unexpected error",
            serde_json::json!({ "error": error.into() }),
        )
    }

    pub fn with_hint(mut self, message: impl Into<String>) -> Self {
        self.hints.push(Hint {
            message: message.into(),
        });
        self
    }
}
