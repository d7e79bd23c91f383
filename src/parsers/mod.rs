//! Parsers for Go source headers and go.mod manifests

pub mod lexer;
pub mod manifest;
pub mod source_scanner;

pub use lexer::{Lexer, Token, TokenKind};
pub use manifest::{ManifestParser, MANIFEST_FILE};
pub use source_scanner::SourceScanner;
