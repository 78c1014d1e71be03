use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
#[error("Invalid XML in '{file}'")]
#[diagnostic(
    code(doxdepends::xml_parse_error),
    help("Regenerate the Doxygen XML output; the highlighted position could not be parsed")
)]
pub struct XmlParseError {
    pub file: String,
    #[source_code]
    pub source_code: NamedSource<String>,
    #[label("malformed here")]
    pub span: Option<SourceSpan>,
    #[source]
    pub source: roxmltree::Error,
}

#[derive(Error, Debug, Diagnostic)]
pub enum DoxDependsError {
    #[error("Input not found: '{path}'")]
    #[diagnostic(
        code(doxdepends::input_not_found),
        help("Point XML_DIRECTORY at Doxygen's XML output (GENERATE_XML = YES)")
    )]
    InputNotFound { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedInput(Box<XmlParseError>),

    #[error("Missing required {field} in '{file}'")]
    #[diagnostic(
        code(doxdepends::missing_field),
        help("The XML does not follow the Doxygen schema; regenerate it")
    )]
    MissingField { file: String, field: String },

    #[error("Failed to read file '{path}'")]
    #[diagnostic(
        code(doxdepends::io_error),
        help("Check if the file exists and you have read permissions")
    )]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file '{path}'")]
    #[diagnostic(
        code(doxdepends::output_write_failure),
        help("Check that the destination directory exists and is writable")
    )]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error")]
    #[diagnostic(
        code(doxdepends::json_error),
        help("This is likely an internal error - please report it")
    )]
    Json(#[from] serde_json::Error),

    #[error("String formatting error")]
    #[diagnostic(
        code(doxdepends::fmt_error),
        help("This is likely an internal error - please report it")
    )]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error")]
    #[diagnostic(
        code(doxdepends::io_error),
        help("Check file permissions and disk space")
    )]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(doxdepends::config_error),
        help("Check your command arguments and environment variables")
    )]
    ConfigurationError { message: String },

    #[error("Graph error: {message}")]
    #[diagnostic(
        code(doxdepends::graph_error),
        help("This may be an internal error with graph processing")
    )]
    GraphError { message: String },
}

#[cfg(test)]
mod tests {
    use std::io;

    use miette::NamedSource;

    use super::*;

    #[test]
    fn test_xml_parse_error_display() {
        let source_code = "<doxygenindex><compound></doxygenindex>";
        let xml_err = roxmltree::Document::parse(source_code).unwrap_err();

        let error = XmlParseError {
            file: "index.xml".to_string(),
            source_code: NamedSource::new("index.xml", source_code.to_string()),
            span: Some((25, 1).into()),
            source: xml_err,
        };

        assert_eq!(error.to_string(), "Invalid XML in 'index.xml'");
    }

    #[test]
    fn test_input_not_found() {
        let error = DoxDependsError::InputNotFound {
            path: PathBuf::from("/tmp/xml/index.xml"),
        };

        assert_eq!(error.to_string(), "Input not found: '/tmp/xml/index.xml'");
    }

    #[test]
    fn test_missing_field() {
        let error = DoxDependsError::MissingField {
            file: "classFoo.xml".to_string(),
            field: "attribute 'refid' on <innerclass>".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Missing required attribute 'refid' on <innerclass> in 'classFoo.xml'"
        );
    }

    #[test]
    fn test_output_write_failure() {
        let error = DoxDependsError::OutputWriteFailure {
            path: PathBuf::from("/readonly/doxdepends.dot"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };

        assert_eq!(
            error.to_string(),
            "Failed to write output file '/readonly/doxdepends.dot'"
        );
    }

    #[test]
    fn test_error_codes() {
        use miette::Diagnostic;

        let error = DoxDependsError::FileReadError {
            path: PathBuf::from("index.xml"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "access denied"),
        };

        assert!(error.code().is_some());
        assert!(error.help().is_some());
    }

    #[test]
    fn test_error_conversion_from_io() {
        let io_err = io::Error::other("some io error");
        let err: DoxDependsError = io_err.into();

        match err {
            DoxDependsError::Io(_) => {}
            _ => panic!("Expected Io variant"),
        }
    }
}
