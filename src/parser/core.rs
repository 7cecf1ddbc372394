/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse_module()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single god file.

/// Leading trivia attached to the next declaration: annotations plus `=>` summary lines.
struct LeadingTrivia {
    annotations: Vec<Spanned<RawAnnotation>>,
    summary: Vec<String>,
}

/// Parser state.
///
/// ## Notes
/// - Single pass. Recovers from errors by synchronizing at declaration or statement
///   boundaries; every recovery leaves a diagnostic behind.
pub struct Parser<'a> {
    tokens: &'a [Token],
    file: FileId,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    pub fn new(file: FileId, tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            file,
            pos: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Parse the entire token stream into a [`RawModule`].
    ///
    /// Never fails: malformed constructs become diagnostics and the parser moves on to
    /// the next declaration boundary.
    pub fn parse_module(mut self) -> (RawModule, Vec<Diagnostic>) {
        let mut decls = Vec::new();

        self.skip_layout();

        while !self.is_at_end() {
            let start = self.current_span();
            match self.declaration() {
                Ok(decl) => {
                    let span = start.merge(self.previous_span());
                    decls.push(Spanned::new(decl, span));
                }
                Err(d) => {
                    self.diagnostics.push(d);
                    self.synchronize();
                }
            }
            self.skip_layout();
        }

        (RawModule { decls }, self.diagnostics)
    }
}
