//! Plan model produced by the generation pipeline.
//!
//! A generation run turns a scanned source tree into two kinds of values:
//! [`Invocation`] descriptors for the external compiler calls, and
//! [`OutputFile`] descriptors for rendered artifacts. Both are plain data,
//! constructed in full before any side effect happens, so a failure at plan
//! time leaves the filesystem untouched.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// A fully specified external compiler invocation.
///
/// # Examples
///
/// ```
/// use protogen_core::Invocation;
///
/// let invocation = Invocation::new(
///     "protoc",
///     vec!["--go_out=pkg/".to_string(), "--proto_path=pbf".to_string()],
///     "pkg/pbf",
/// );
/// assert_eq!(
///     invocation.command_line(),
///     "protoc --go_out=pkg/ --proto_path=pbf"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
    /// Name of the binary to execute, resolved through `PATH`.
    pub binary: String,

    /// Arguments handed to the binary, in order. Never mutated after
    /// construction.
    pub arguments: Vec<String>,

    /// Directory the compiler writes generated code into.
    ///
    /// Must exist before the invocation runs; the executor pre-creates it.
    /// The child process keeps the caller's working directory, since the
    /// file arguments are relative to the invoking directory.
    pub directory: PathBuf,
}

impl Invocation {
    /// Creates a new invocation descriptor.
    #[must_use]
    pub fn new(
        binary: impl Into<String>,
        arguments: Vec<String>,
        directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            binary: binary.into(),
            arguments,
            directory: directory.into(),
        }
    }

    /// Returns the canonical single-line form: the binary and its arguments
    /// joined by single spaces.
    ///
    /// This is the form shown to users and the comparison key in
    /// order-independent tests.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::Invocation;
    ///
    /// let invocation = Invocation::new(
    ///     "protoc",
    ///     vec!["--x=1".to_string(), "a.proto".to_string()],
    ///     "pkg",
    /// );
    /// assert_eq!(invocation.command_line(), "protoc --x=1 a.proto");
    /// ```
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut line = self.binary.clone();
        for argument in &self.arguments {
            line.push(' ');
            line.push_str(argument);
        }
        line
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// A generated artifact ready to be written.
///
/// # Examples
///
/// ```
/// use protogen_core::OutputFile;
///
/// let file = OutputFile::new("pkg/index.ts", "export {};\n");
/// assert_eq!(file.path.to_str(), Some("pkg/index.ts"));
/// assert_eq!(file.contents_utf8(), Some("export {};\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Destination path of the artifact.
    ///
    /// The parent directory may not exist yet; the consumer creates it
    /// before writing.
    pub path: PathBuf,

    /// Raw byte content to write.
    pub contents: Vec<u8>,
}

impl OutputFile {
    /// Creates a new output file descriptor.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    /// Returns the content as UTF-8 text, or `None` if it is not valid
    /// UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use protogen_core::OutputFile;
    ///
    /// let file = OutputFile::new("pkg/index.ts", "// generated\n");
    /// assert_eq!(file.contents_utf8(), Some("// generated\n"));
    /// ```
    #[must_use]
    pub fn contents_utf8(&self) -> Option<&str> {
        std::str::from_utf8(&self.contents).ok()
    }
}
