use super::*;
use crate::cursor::StrLexer;
use crate::state::Section;
use tags::TagKind;

fn scan_at<'t>(
    scanner: &mut Scanner,
    text: &'t str,
    pos: usize,
    valid: &[TokenKind],
) -> Option<(TokenKind, &'t str)> {
    let mut lexer = StrLexer::at(text, pos);
    let kind = scanner.scan(&mut lexer, ValidTokens::of(valid))?;
    let span = lexer.token_span();
    Some((kind, &text[span.start..span.end]))
}

fn scan_one<'t>(
    scanner: &mut Scanner,
    text: &'t str,
    valid: &[TokenKind],
) -> Option<(TokenKind, &'t str)> {
    scan_at(scanner, text, 0, valid)
}

fn scanner_with_tags(tags: &[TagKind]) -> Scanner {
    let mut scanner = Scanner::default();
    for kind in tags {
        scanner.push_tag(Tag::Known(*kind));
    }
    scanner
}

const CONTENT: &[TokenKind] = &[
    TokenKind::Comment,
    TokenKind::MustacheStartDelimiter,
    TokenKind::MustacheText,
    TokenKind::ImplicitEndTag,
];

#[test]
fn start_tag_name_is_uppercased_and_pushed() {
    let mut scanner = Scanner::default();
    let result = scan_one(&mut scanner, "div class=x", &[TokenKind::StartTagName]);
    assert_eq!(result, Some((TokenKind::StartTagName, "div")));
    assert_eq!(scanner.state().tags.top(), Some(&Tag::Known(TagKind::Div)));
}

#[test]
fn script_and_style_get_their_own_start_token() {
    let mut scanner = Scanner::default();
    let valid = [TokenKind::StartTagName];
    assert_eq!(
        scan_one(&mut scanner, "SCRIPT>", &valid).map(|(kind, _)| kind),
        Some(TokenKind::ScriptStartTagName)
    );
    assert_eq!(
        scan_one(&mut scanner, "style>", &valid).map(|(kind, _)| kind),
        Some(TokenKind::StyleStartTagName)
    );
    assert_eq!(scanner.state().tags.len(), 2);
}

#[test]
fn end_tag_name_closes_only_the_top() {
    let mut scanner = scanner_with_tags(&[TagKind::Div, TagKind::Span]);
    let valid = [TokenKind::EndTagName, TokenKind::ErroneousEndTagName];
    assert_eq!(
        scan_one(&mut scanner, "div>", &valid),
        Some((TokenKind::ErroneousEndTagName, "div"))
    );
    assert_eq!(scanner.state().tags.len(), 2);
    assert_eq!(
        scan_one(&mut scanner, "span>", &valid),
        Some((TokenKind::EndTagName, "span"))
    );
    assert_eq!(scanner.state().tags.top(), Some(&Tag::Known(TagKind::Div)));
}

#[test]
fn custom_end_tag_matches_by_name() {
    let mut scanner = Scanner::default();
    let _ = scan_one(&mut scanner, "my-el>", &[TokenKind::StartTagName]);
    let valid = [TokenKind::EndTagName];
    assert_eq!(
        scan_one(&mut scanner, "other-el>", &valid).map(|(kind, _)| kind),
        Some(TokenKind::ErroneousEndTagName)
    );
    assert_eq!(
        scan_one(&mut scanner, "MY-EL>", &valid).map(|(kind, _)| kind),
        Some(TokenKind::EndTagName)
    );
    assert!(scanner.state().tags.is_empty());
}

#[test]
fn implicit_end_tag_for_void_parent() {
    let mut scanner = scanner_with_tags(&[TagKind::Img]);
    let result = scan_one(&mut scanner, "<span>", CONTENT);
    assert_eq!(result, Some((TokenKind::ImplicitEndTag, "")));
    assert!(scanner.state().tags.is_empty());
}

#[test]
fn implicit_end_tag_when_parent_cannot_contain_child() {
    let mut scanner = scanner_with_tags(&[TagKind::P]);
    assert_eq!(
        scan_one(&mut scanner, "<p>two", CONTENT),
        Some((TokenKind::ImplicitEndTag, ""))
    );
    assert!(scanner.state().tags.is_empty());

    let mut scanner = scanner_with_tags(&[TagKind::Div]);
    assert_eq!(scan_one(&mut scanner, "<p>", CONTENT), None);
    assert_eq!(scanner.state().tags.len(), 1);
}

#[test]
fn implicit_end_tag_closes_one_level_per_call() {
    let mut scanner = scanner_with_tags(&[TagKind::Ul, TagKind::Li, TagKind::P]);
    let text = "</ul>";
    assert_eq!(
        scan_one(&mut scanner, text, CONTENT),
        Some((TokenKind::ImplicitEndTag, ""))
    );
    assert_eq!(scanner.state().tags.len(), 2);
    assert_eq!(
        scan_one(&mut scanner, text, CONTENT),
        Some((TokenKind::ImplicitEndTag, ""))
    );
    assert_eq!(scanner.state().tags.len(), 1);
    // `</ul>` now matches the top and is left to the end-tag rule.
    assert_eq!(scan_one(&mut scanner, text, CONTENT), None);
    assert_eq!(scanner.state().tags.len(), 1);
}

#[test]
fn implicit_end_tag_ignores_unknown_closing_tag() {
    let mut scanner = scanner_with_tags(&[TagKind::Div]);
    assert_eq!(scan_one(&mut scanner, "</table>", CONTENT), None);
    assert_eq!(scanner.state().tags.len(), 1);
}

#[test]
fn implicit_end_tag_at_eof_closes_document_elements_only() {
    let mut scanner = scanner_with_tags(&[TagKind::Html, TagKind::Body, TagKind::Div]);
    assert_eq!(scan_one(&mut scanner, "", CONTENT), None);

    scanner.pop_tag();
    assert_eq!(
        scan_one(&mut scanner, "", CONTENT),
        Some((TokenKind::ImplicitEndTag, ""))
    );
    assert_eq!(
        scan_one(&mut scanner, "", CONTENT),
        Some((TokenKind::ImplicitEndTag, ""))
    );
    assert!(scanner.state().tags.is_empty());
    assert_eq!(scan_one(&mut scanner, "", CONTENT), None);
    assert_eq!(scanner.stats().implicit_closes, 2);
}

#[test]
fn self_closing_pops_the_open_tag() {
    let mut scanner = scanner_with_tags(&[TagKind::Br]);
    let valid = [TokenKind::SelfClosingTagDelimiter];
    assert_eq!(
        scan_one(&mut scanner, "/>", &valid),
        Some((TokenKind::SelfClosingTagDelimiter, "/>"))
    );
    assert!(scanner.state().tags.is_empty());
}

#[test]
fn self_closing_on_empty_stack_produces_no_token() {
    let mut scanner = Scanner::default();
    let text = "/>";
    let mut lexer = StrLexer::new(text);
    let result = scanner.scan(
        &mut lexer,
        ValidTokens::none().with(TokenKind::SelfClosingTagDelimiter),
    );
    assert_eq!(result, None);
    assert_eq!(lexer.position(), 2);
    assert!(scanner.state().tags.is_empty());
}

#[test]
fn raw_text_stops_before_case_insensitive_close_tag() {
    let mut scanner = scanner_with_tags(&[TagKind::Script]);
    let text = "if (a < b && c <</b) {}</ScRiPt>";
    let result = scan_one(&mut scanner, text, &[TokenKind::RawText]);
    assert_eq!(
        result,
        Some((TokenKind::RawText, "if (a < b && c <</b) {}"))
    );
}

#[test]
fn raw_text_may_be_empty() {
    let mut scanner = scanner_with_tags(&[TagKind::Style]);
    assert_eq!(
        scan_one(&mut scanner, "</style>", &[TokenKind::RawText]),
        Some((TokenKind::RawText, ""))
    );
}

#[test]
fn raw_text_without_close_runs_to_end_minus_partial_match() {
    let mut scanner = scanner_with_tags(&[TagKind::Style]);
    assert_eq!(
        scan_one(&mut scanner, "a{color:red}</sty", &[TokenKind::RawText]),
        Some((TokenKind::RawText, "a{color:red}"))
    );
}

#[test]
fn raw_text_needs_an_open_element() {
    let mut scanner = Scanner::default();
    assert_eq!(scan_one(&mut scanner, "x", &[TokenKind::RawText]), None);
}

#[test]
fn comment_with_dashes_inside() {
    let mut scanner = Scanner::default();
    let text = "<!-- a -- b --->rest";
    assert_eq!(
        scan_one(&mut scanner, text, CONTENT),
        Some((TokenKind::Comment, "<!-- a -- b --->"))
    );
}

#[test]
fn unterminated_comment_declines() {
    let mut scanner = Scanner::default();
    assert_eq!(scan_one(&mut scanner, "<!-- open", CONTENT), None);
    assert_eq!(scan_one(&mut scanner, "<!DOCTYPE html>", CONTENT), None);
}

#[test]
fn leading_whitespace_is_skipped_not_emitted() {
    let mut scanner = Scanner::default();
    assert_eq!(
        scan_one(&mut scanner, "  \n<!---->", CONTENT),
        Some((TokenKind::Comment, "<!---->"))
    );
}

#[test]
fn text_run_ends_before_tag_or_delimiter() {
    let mut scanner = Scanner::default();
    assert_eq!(
        scan_one(&mut scanner, "hello <b>", CONTENT),
        Some((TokenKind::MustacheText, "hello "))
    );
    assert_eq!(
        scan_one(&mut scanner, "a { b {{x}}", CONTENT),
        Some((TokenKind::MustacheText, "a { b "))
    );
    assert_eq!(
        scan_one(&mut scanner, "x }} y", CONTENT),
        Some((TokenKind::MustacheText, "x "))
    );
}

#[test]
fn text_run_keeps_everything_at_eof() {
    let mut scanner = Scanner::default();
    assert_eq!(
        scan_one(&mut scanner, "tail {", CONTENT),
        Some((TokenKind::MustacheText, "tail {"))
    );
}

#[test]
fn start_delimiter_at_run_head() {
    let mut scanner = Scanner::default();
    assert_eq!(
        scan_one(&mut scanner, "{{name}}", CONTENT),
        Some((TokenKind::MustacheStartDelimiter, "{{"))
    );
}

#[test]
fn end_delimiter_at_run_head_declines() {
    let mut scanner = Scanner::default();
    assert_eq!(scan_one(&mut scanner, "}}", CONTENT), None);
}

#[test]
fn identifier_stops_at_dot_space_and_end_delimiter() {
    let mut scanner = Scanner::default();
    let valid = [TokenKind::MustacheIdentifier];
    assert_eq!(
        scan_one(&mut scanner, "user.name}}", &valid),
        Some((TokenKind::MustacheIdentifier, "user"))
    );
    assert_eq!(
        scan_one(&mut scanner, " name }}", &valid),
        Some((TokenKind::MustacheIdentifier, "name"))
    );
    assert_eq!(scan_one(&mut scanner, "}}", &valid), None);
    assert_eq!(scan_one(&mut scanner, "unterminated", &valid), None);
}

#[test]
fn sections_nest_independently_of_tags() {
    let mut scanner = scanner_with_tags(&[TagKind::Div]);
    let open = [TokenKind::MustacheSectionName];
    let close = [
        TokenKind::MustacheEndSectionName,
        TokenKind::MustacheErroneousEndSectionName,
    ];
    assert_eq!(
        scan_one(&mut scanner, "items}}", &open),
        Some((TokenKind::MustacheSectionName, "items"))
    );
    assert_eq!(
        scan_one(&mut scanner, "other}}", &close),
        Some((TokenKind::MustacheErroneousEndSectionName, "other"))
    );
    assert_eq!(
        scan_one(&mut scanner, "items}}", &close),
        Some((TokenKind::MustacheEndSectionName, "items"))
    );
    assert!(scanner.state().sections.is_empty());
    assert_eq!(scanner.state().tags.len(), 1);
}

#[test]
fn section_names_compare_exactly() {
    let mut scanner = Scanner::default();
    scanner.state.sections.push(Section::new("Items"));
    assert_eq!(
        scan_one(&mut scanner, "items}}", &[TokenKind::MustacheEndSectionName]),
        Some((TokenKind::MustacheErroneousEndSectionName, "items"))
    );
}

#[test]
fn mustache_comment_runs_to_end_delimiter() {
    let mut scanner = Scanner::default();
    let valid = [TokenKind::MustacheComment];
    assert_eq!(
        scan_one(&mut scanner, "note <b> }}", &valid),
        Some((TokenKind::MustacheComment, "note <b> "))
    );
    assert_eq!(scan_one(&mut scanner, "never closed", &valid), None);
}

#[test]
fn delimiter_directive_switches_delimiters() {
    let mut scanner = Scanner::default();
    let text = "=<% %>=}}<%name%>{{x}}";
    assert_eq!(
        scan_at(&mut scanner, text, 1, &[TokenKind::MustacheSetStartDelimiter]),
        Some((TokenKind::MustacheSetStartDelimiter, "<%"))
    );
    assert_eq!(
        scan_at(&mut scanner, text, 3, &[TokenKind::MustacheSetEndDelimiter]),
        Some((TokenKind::MustacheSetEndDelimiter, "%>"))
    );
    assert_eq!(scanner.state().delimiters.old_end(), "}}");
    assert_eq!(
        scan_at(&mut scanner, text, 7, &[TokenKind::MustacheOldEndDelimiter]),
        Some((TokenKind::MustacheOldEndDelimiter, "}}"))
    );
    assert!(scanner.state().delimiters.old_end_slot().is_default());

    assert_eq!(
        scan_at(&mut scanner, text, 9, CONTENT),
        Some((TokenKind::MustacheStartDelimiter, "<%"))
    );
    assert_eq!(
        scan_at(&mut scanner, text, 11, &[TokenKind::MustacheIdentifier]),
        Some((TokenKind::MustacheIdentifier, "name"))
    );
    assert_eq!(
        scan_at(&mut scanner, text, 15, &[TokenKind::MustacheEndDelimiter]),
        Some((TokenKind::MustacheEndDelimiter, "%>"))
    );
    assert_eq!(
        scan_at(&mut scanner, text, 17, CONTENT),
        Some((TokenKind::MustacheText, "{{x}}"))
    );
}

#[test]
fn delimiter_directive_declines_when_disabled() {
    let mut scanner = Scanner::new(ScannerConfig {
        delimiter_changes: false,
        ..ScannerConfig::default()
    });
    assert_eq!(
        scan_one(&mut scanner, "<% %>=}}", &[TokenKind::MustacheSetStartDelimiter]),
        None
    );
    assert!(scanner.state().is_fresh());
}

#[test]
fn set_end_delimiter_rejects_whitespace() {
    let mut scanner = Scanner::default();
    assert_eq!(
        scan_one(&mut scanner, "%> x=", &[TokenKind::MustacheSetEndDelimiter]),
        None
    );
    assert_eq!(scanner.state().delimiters.end(), "}}");
}

#[test]
fn text_run_with_angle_delimiters() {
    let mut scanner = Scanner::default();
    scanner.state.delimiters.set_start("<%");
    scanner.state.delimiters.set_end("%>");
    assert_eq!(
        scan_one(&mut scanner, "a<%b%>", CONTENT),
        Some((TokenKind::MustacheText, "a"))
    );
    assert_eq!(
        scan_one(&mut scanner, "a<div>", CONTENT),
        Some((TokenKind::MustacheText, "a"))
    );
}

#[test]
fn text_run_stops_at_mark_when_overlapping_partials_hide_the_boundary() {
    let mut scanner = Scanner::default();
    scanner.state.delimiters.set_start("[[%");
    scanner.state.delimiters.set_end("%]]");
    let text = "x[[[%name%]]";
    assert_eq!(
        scan_at(&mut scanner, text, 0, CONTENT),
        Some((TokenKind::MustacheText, "x"))
    );
    assert_eq!(
        scan_at(&mut scanner, text, 1, CONTENT),
        Some((TokenKind::MustacheText, "["))
    );
    assert_eq!(
        scan_at(&mut scanner, text, 2, CONTENT),
        Some((TokenKind::MustacheStartDelimiter, "[[%"))
    );
}

#[test]
fn text_run_keeps_head_of_dead_partial_before_end_delimiter() {
    let mut scanner = Scanner::default();
    scanner.state.delimiters.set_start("{%%");
    scanner.state.delimiters.set_end("%}");
    let text = "a{%}b";
    assert_eq!(
        scan_at(&mut scanner, text, 0, CONTENT),
        Some((TokenKind::MustacheText, "a"))
    );
    assert_eq!(
        scan_at(&mut scanner, text, 1, CONTENT),
        Some((TokenKind::MustacheText, "{"))
    );
    assert_eq!(scan_at(&mut scanner, text, 2, CONTENT), None);
}

#[test]
fn single_char_start_delimiter_after_angle() {
    let mut scanner = Scanner::default();
    scanner.state.delimiters.set_start("<");
    assert_eq!(
        scan_one(&mut scanner, "<x", CONTENT),
        Some((TokenKind::MustacheStartDelimiter, "<"))
    );
}

#[test]
fn stats_count_tokens_and_declines() {
    let mut scanner = Scanner::default();
    let _ = scan_one(&mut scanner, "div", &[TokenKind::StartTagName]);
    let _ = scan_one(&mut scanner, "", &[TokenKind::StartTagName]);
    let stats = scanner.stats();
    assert_eq!(stats.scans, 2);
    assert_eq!(stats.tokens, 1);
    assert_eq!(stats.declines, 1);
}

#[test]
fn serialize_then_deserialize_restores_state() {
    let mut scanner = scanner_with_tags(&[TagKind::Table, TagKind::Tr]);
    scanner.state.sections.push(Section::new("rows"));
    scanner.state.delimiters.set_start("[[");
    let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
    let outcome = scanner.serialize(&mut buffer);
    assert!(outcome.is_lossless());

    let mut restored = Scanner::default();
    restored.deserialize(&buffer[..outcome.written]);
    assert_eq!(restored.state(), scanner.state());

    restored.deserialize(&[]);
    assert!(restored.state().is_fresh());
}
