/// Public parser API.

/// Parse a token stream into a raw module.
///
/// Tolerant by contract: always returns a module, with every recovered problem in the
/// diagnostics list.
#[tracing::instrument(skip_all, fields(file = file.0, tokens = tokens.len()))]
pub fn parse(file: FileId, tokens: &[Token]) -> (RawModule, Vec<Diagnostic>) {
    Parser::new(file, tokens).parse_module()
}
