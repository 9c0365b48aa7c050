use super::*;
use crate::token_fmt::TokenFmt;
use tags::TagKind;

fn token_lines(text: &str, config: HostConfig) -> (Vec<String>, HostOutput) {
    let output = parse(text, config);
    let lines = TokenFmt::new(text)
        .format_tokens(&output.tokens)
        .unwrap_or_else(|err| panic!("format failed: {err}"));
    (lines, output)
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|line| line.to_string()).collect()
}

#[test]
fn nested_elements_close_explicitly() {
    let (tokens, output) = token_lines("<div><span></span></div>", HostConfig::default());
    assert_eq!(
        tokens,
        lines(&[
            "start_tag_name \"div\"",
            "start_tag_name \"span\"",
            "end_tag_name \"span\"",
            "end_tag_name \"div\"",
        ])
    );
    assert!(output.open_tags.is_empty());
    assert!(output.errors.is_empty());
}

#[test]
fn paragraph_closes_before_paragraph() {
    let (tokens, output) = token_lines("<p>one<p>two", HostConfig::default());
    assert_eq!(
        tokens,
        lines(&[
            "start_tag_name \"p\"",
            "mustache_text \"one\"",
            "implicit_end_tag \"\"",
            "start_tag_name \"p\"",
            "mustache_text \"two\"",
        ])
    );
    assert_eq!(output.open_tags, vec![Tag::Known(TagKind::P)]);
    assert_eq!(
        output.errors,
        vec![ParseError {
            code: ParseErrorCode::MissingEndTag,
            position: 12,
        }]
    );
}

#[test]
fn void_element_closes_at_end_of_input() {
    let (tokens, output) = token_lines("<img src=x>", HostConfig::default());
    assert_eq!(
        tokens,
        lines(&["start_tag_name \"img\"", "implicit_end_tag \"\""])
    );
    assert!(output.open_tags.is_empty());
    assert!(output.errors.is_empty());
}

#[test]
fn section_with_identifier() {
    let (tokens, output) = token_lines("{{#items}}{{name}}{{/items}}", HostConfig::default());
    assert_eq!(
        tokens,
        lines(&[
            "mustache_start_delimiter \"{{\"",
            "mustache_section_name \"items\"",
            "mustache_end_delimiter \"}}\"",
            "mustache_start_delimiter \"{{\"",
            "mustache_identifier \"name\"",
            "mustache_end_delimiter \"}}\"",
            "mustache_start_delimiter \"{{\"",
            "mustache_end_section_name \"items\"",
            "mustache_end_delimiter \"}}\"",
        ])
    );
    assert!(output.open_sections.is_empty());
}

#[test]
fn list_items_close_implicitly() {
    let (tokens, output) = token_lines("<ul><li>a<li>b</ul>", HostConfig::default());
    let implicit = tokens
        .iter()
        .filter(|line| line.starts_with("implicit_end_tag"))
        .count();
    assert_eq!(implicit, 2);
    assert_eq!(tokens.last().map(String::as_str), Some("end_tag_name \"ul\""));
    assert!(output.open_tags.is_empty());
    assert!(output.errors.is_empty());
}

#[test]
fn delimiter_change_applies_to_later_tags() {
    let text = "{{=<% %>=}}<%name%> {{name}}";
    let (tokens, output) = token_lines(text, HostConfig::default());
    assert_eq!(
        tokens,
        lines(&[
            "mustache_start_delimiter \"{{\"",
            "mustache_set_start_delimiter \"<%\"",
            "mustache_set_end_delimiter \"%>\"",
            "mustache_old_end_delimiter \"}}\"",
            "mustache_start_delimiter \"<%\"",
            "mustache_identifier \"name\"",
            "mustache_end_delimiter \"%>\"",
            "mustache_text \"{{name}}\"",
        ])
    );
    assert!(output.errors.is_empty());
}

#[test]
fn repeated_delimiter_prefix_is_not_swallowed_by_text() {
    let text = "{{=[[% %]]=}}x[[[%name%]]";
    let (tokens, output) = token_lines(text, HostConfig::default());
    assert_eq!(
        tokens[4..],
        lines(&[
            "mustache_text \"x\"",
            "mustache_text \"[\"",
            "mustache_start_delimiter \"[[%\"",
            "mustache_identifier \"name\"",
            "mustache_end_delimiter \"%]]\"",
        ])
    );
    assert!(output.errors.is_empty());
}

#[test]
fn text_before_end_delimiter_inside_partial_start_is_kept() {
    let text = "{{={%% %}=}}a{%}b";
    let (tokens, output) = token_lines(text, HostConfig::default());
    assert_eq!(
        tokens[4..],
        lines(&[
            "mustache_text \"a\"",
            "mustache_text \"{\"",
            "mustache_text \"}b\"",
        ])
    );
    // Only the stray end delimiter itself is reported.
    assert_eq!(
        output.errors,
        vec![ParseError {
            code: ParseErrorCode::UnexpectedCharacter,
            position: 14,
        }]
    );
}

#[test]
fn rejected_delimiter_change_is_an_error() {
    let config = HostConfig {
        scanner: ScannerConfig {
            delimiter_changes: false,
            ..ScannerConfig::default()
        },
        checkpoint: false,
    };
    let (tokens, output) = token_lines("{{=<% %>=}}{{x}}", config);
    assert_eq!(
        output.errors.first().map(|error| error.code),
        Some(ParseErrorCode::RejectedDelimiterChange)
    );
    assert!(tokens.contains(&"mustache_identifier \"x\"".to_string()));
}

#[test]
fn script_body_is_raw_text() {
    let (tokens, output) = token_lines(
        "<script>if (a<b) {}</SCRIPT><p>x</p>",
        HostConfig::default(),
    );
    assert_eq!(
        tokens,
        lines(&[
            "script_start_tag_name \"script\"",
            "raw_text \"if (a<b) {}\"",
            "end_tag_name \"SCRIPT\"",
            "start_tag_name \"p\"",
            "mustache_text \"x\"",
            "end_tag_name \"p\"",
        ])
    );
    assert!(output.open_tags.is_empty());
}

#[test]
fn self_closing_start_tag() {
    let (tokens, output) = token_lines("<br/><x-icon name='a' />", HostConfig::default());
    assert_eq!(
        tokens,
        lines(&[
            "start_tag_name \"br\"",
            "self_closing_tag_delimiter \"/>\"",
            "start_tag_name \"x-icon\"",
            "self_closing_tag_delimiter \"/>\"",
        ])
    );
    assert!(output.open_tags.is_empty());
}

#[test]
fn stray_end_tag_is_erroneous() {
    let (tokens, output) = token_lines("</div>text", HostConfig::default());
    assert_eq!(
        tokens,
        lines(&["erroneous_end_tag_name \"div\"", "mustache_text \"text\""])
    );
    assert!(output.errors.is_empty());
}

#[test]
fn doctype_and_comments() {
    let (tokens, _) = token_lines(
        "<!DOCTYPE html><!-- c --><html></html>",
        HostConfig::default(),
    );
    assert_eq!(
        tokens,
        lines(&[
            "comment \"<!-- c -->\"",
            "start_tag_name \"html\"",
            "end_tag_name \"html\"",
        ])
    );
}

#[test]
fn unclosed_section_stays_open() {
    let output = parse("{{#a}}{{#b}}{{/b}}", HostConfig::default());
    assert_eq!(output.open_sections, vec![Section::new("a")]);
}

#[test]
fn checkpointing_does_not_change_the_token_stream() {
    let text = "<html><body><ul><li>{{#xs}}<b>{{x.y}}</b>{{/xs}}<li>z</ul>";
    let plain = parse(text, HostConfig::default());
    let checkpointed = parse(
        text,
        HostConfig {
            checkpoint: true,
            ..HostConfig::default()
        },
    );
    assert_eq!(plain, checkpointed);
}

#[test]
fn parse_with_scanner_continues_from_existing_state() {
    let mut scanner = Scanner::default();
    let first = parse_with_scanner("<div>", &mut scanner, false);
    assert_eq!(first.open_tags, vec![Tag::Known(TagKind::Div)]);
    let second = parse_with_scanner("</div>", &mut scanner, false);
    assert_eq!(second.tokens.len(), 1);
    assert_eq!(second.tokens[0].kind, TokenKind::EndTagName);
    assert!(second.open_tags.is_empty());
}
