//! Extracts the package clause and import paths from Go source text

use super::lexer::{Lexer, Token, TokenKind};
use crate::error::{PkgDiffError, Result, ScanError};
use crate::models::SourceFile;
use std::path::Path;
use tracing::trace;

const PACKAGE_KEYWORD: &str = "package";
const IMPORT_KEYWORD: &str = "import";

/// Scanner for the declaration header of a single source file.
///
/// Only two facts are extracted: the unqualified package name and the
/// import paths in file order. Scanning stops at the first top-level
/// declaration that is not an import, so function bodies are never lexed.
pub struct SourceScanner<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> SourceScanner<'a> {
    fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Scan source text into a [`SourceFile`] with an empty path
    pub fn scan(source: &str) -> std::result::Result<SourceFile, ScanError> {
        let mut scanner = SourceScanner::new(source);
        let package_name = scanner.package_clause()?;
        let imports = scanner.import_decls()?;

        Ok(SourceFile {
            path: Default::default(),
            package_name,
            imports,
        })
    }

    /// Read and scan a file, attaching its path to both result and error
    pub fn scan_file(path: &Path) -> Result<SourceFile> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PkgDiffError::file_read_error(path, e))?;

        let file = Self::scan(&content).map_err(|e| PkgDiffError::from_scan(path, e))?;
        trace!(
            path = %path.display(),
            package = %file.package_name,
            imports = file.imports.len(),
            "scanned"
        );
        Ok(file.with_path(path))
    }

    fn bump(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Ident(ident) if ident == keyword)
    }

    fn skip_semicolons(&mut self) {
        while self.current.kind == TokenKind::Semicolon {
            self.bump();
        }
    }

    fn package_clause(&mut self) -> std::result::Result<String, ScanError> {
        loop {
            match &self.current.kind {
                TokenKind::Eof => return Err(ScanError::PackageClauseMissing),
                TokenKind::Ident(ident) if ident == PACKAGE_KEYWORD => {
                    self.bump();
                    return match self.bump().kind {
                        TokenKind::Ident(name) => Ok(name),
                        _ => Err(ScanError::PackageClauseMissing),
                    };
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn import_decls(&mut self) -> std::result::Result<Vec<String>, ScanError> {
        let mut imports = Vec::new();

        loop {
            self.skip_semicolons();
            if !self.at_keyword(IMPORT_KEYWORD) {
                return Ok(imports);
            }
            let keyword = self.bump();

            if self.current.kind == TokenKind::LParen {
                self.bump();
                self.import_block(keyword.line, &mut imports)?;
            } else {
                imports.push(self.import_spec(keyword.line)?);
            }
        }
    }

    fn import_block(
        &mut self,
        opened_at: usize,
        imports: &mut Vec<String>,
    ) -> std::result::Result<(), ScanError> {
        loop {
            match self.current.kind {
                TokenKind::RParen => {
                    self.bump();
                    return Ok(());
                }
                TokenKind::Semicolon => {
                    self.bump();
                }
                TokenKind::Eof => {
                    return Err(ScanError::ImportBlockMalformed {
                        line: opened_at,
                        message: "import block is never closed".to_string(),
                    });
                }
                _ => imports.push(self.import_spec(opened_at)?),
            }
        }
    }

    /// `["." | "_" | name] path`
    fn import_spec(&mut self, decl_line: usize) -> std::result::Result<String, ScanError> {
        if matches!(self.current.kind, TokenKind::Ident(_) | TokenKind::Dot) {
            self.bump();
        }

        let token = self.bump();
        match token.kind {
            TokenKind::StringLit(path) => Ok(path),
            TokenKind::UnterminatedString => Err(ScanError::ImportBlockMalformed {
                line: token.line,
                message: "unterminated import path".to_string(),
            }),
            TokenKind::Eof => Err(ScanError::ImportBlockMalformed {
                line: decl_line,
                message: "expected import path before end of file".to_string(),
            }),
            other => Err(ScanError::ImportBlockMalformed {
                line: token.line,
                message: format!("expected import path, found {:?}", other),
            }),
        }
    }
}
