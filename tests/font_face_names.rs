use fontmirror::css::{declarations, file_name, parse_stylesheet, source_url};
use fontmirror::error::{Error, FontError};

fn name_for(css: &str) -> fontmirror::Result<String> {
  let rules = parse_stylesheet(css).unwrap();
  file_name(&declarations(&rules[0]).unwrap())
}

#[test]
fn fira_code_scenario() {
  let css = r#"@font-face {
    font-family: "Fira Code";
    font-weight: 400;
    src: url(https://x/a.ttf) format("truetype");
  }"#;
  assert_eq!(name_for(css).unwrap(), "Fira_Code-normal-400.ttf");
}

#[test]
fn name_computation_is_deterministic() {
  let css = r#"@font-face {
    font-family: 'Open Sans';
    font-style: italic;
    font-weight: 300;
    src: url(https://x/b.ttf) format('truetype');
  }"#;
  assert_eq!(name_for(css).unwrap(), name_for(css).unwrap());
  assert_eq!(name_for(css).unwrap(), "Open_Sans-italic-300.ttf");
}

#[test]
fn dot_and_space_runs_collapse_to_single_underscores() {
  let css = r#"@font-face {
    font-family: "My.Fancy  Font";
    font-style: normal;
    font-weight: 400;
    src: url(https://x/c.ttf) format("truetype");
  }"#;
  assert_eq!(name_for(css).unwrap(), "My_Fancy_Font-normal-400.ttf");
}

#[test]
fn fractional_weights_render_as_integers() {
  let css = r#"@font-face {
    font-family: X;
    font-weight: 550.5;
    src: url(https://x/d.ttf) format("truetype");
  }"#;
  assert_eq!(name_for(css).unwrap(), "X-normal-550.ttf");
}

#[test]
fn missing_style_and_weight_use_initial_values() {
  let css = r#"@font-face {
    font-family: X;
    src: url(https://x/e.ttf) format("truetype");
  }"#;
  assert_eq!(name_for(css).unwrap(), "X-normal-400.ttf");
}

#[test]
fn missing_family_is_fatal() {
  let css = r#"@font-face {
    font-weight: 400;
    src: url(https://x/f.ttf) format("truetype");
  }"#;
  match name_for(css).unwrap_err() {
    Error::Font(FontError::MissingDeclaration { name }) => assert_eq!(name, "font-family"),
    other => panic!("unexpected error: {other}"),
  }
}

#[test]
fn unknown_format_is_fatal_and_names_the_tag() {
  let css = r#"@font-face {
    font-family: X;
    src: url(https://x/g.eot) format("embedded-opentype");
  }"#;
  let err = name_for(css).unwrap_err();
  match &err {
    Error::Font(FontError::UnknownFormat { format }) => assert_eq!(format, "embedded-opentype"),
    other => panic!("unexpected error: {other}"),
  }
  assert!(err.to_string().contains("embedded-opentype"));
}

#[test]
fn src_without_format_call_is_fatal() {
  let css = r#"@font-face {
    font-family: X;
    src: url(https://x/h.ttf);
  }"#;
  assert!(matches!(
    name_for(css).unwrap_err(),
    Error::Font(FontError::MissingFormat)
  ));
}

#[test]
fn source_url_is_the_first_url_entry() {
  let css = r#"@font-face {
    font-family: X;
    src: local("X"), url(https://x/i.ttf) format("truetype");
  }"#;
  let rules = parse_stylesheet(css).unwrap();
  let block = declarations(&rules[0]).unwrap();
  assert_eq!(source_url(&block).unwrap(), "https://x/i.ttf");
}

#[test]
fn src_without_url_entry_is_fatal() {
  let css = r#"@font-face {
    font-family: X;
    src: local("X") format("truetype");
  }"#;
  let rules = parse_stylesheet(css).unwrap();
  let block = declarations(&rules[0]).unwrap();
  assert!(matches!(
    source_url(&block).unwrap_err(),
    Error::Font(FontError::MissingSource)
  ));
}
