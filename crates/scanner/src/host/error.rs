//! Parse errors recorded by the reference host where a grammar would build an
//! ERROR or MISSING node.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorCode {
    UnexpectedCharacter,
    MissingTagName,
    UnterminatedStartTag,
    MissingEndTag,
    MissingCloseAngle,
    UnterminatedComment,
    MissingSectionName,
    MissingIdentifier,
    MissingEndDelimiter,
    RejectedDelimiterChange,
}

impl ParseErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ParseErrorCode::UnexpectedCharacter => "unexpected-character",
            ParseErrorCode::MissingTagName => "missing-tag-name",
            ParseErrorCode::UnterminatedStartTag => "unterminated-start-tag",
            ParseErrorCode::MissingEndTag => "missing-end-tag",
            ParseErrorCode::MissingCloseAngle => "missing-close-angle",
            ParseErrorCode::UnterminatedComment => "unterminated-comment",
            ParseErrorCode::MissingSectionName => "missing-section-name",
            ParseErrorCode::MissingIdentifier => "missing-identifier",
            ParseErrorCode::MissingEndDelimiter => "missing-end-delimiter",
            ParseErrorCode::RejectedDelimiterChange => "rejected-delimiter-change",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub position: usize,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at byte {}", self.code.as_str(), self.position)
    }
}
