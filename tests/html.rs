use rstest::rstest;
use seqdiff::{DiffError, HtmlDiff, TableOptions};

mod common;

const NON_ASCII_FROM: &str = "
   1. Beautiful is beTTer than ugly.
   2. Explicit is better than ımplıcıt.
   3. Simple is better than complex.
   4. Complex is better than complicated.
";

const NON_ASCII_TO: &str = "
   1. Beautiful is better than ügly.
   3.   Sımple is better than complex.
   4. Complicated is better than cömplex.
   5. Flat is better than nested.
";

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[rstest]
#[case("utf-8")]
#[case("us-ascii")]
#[case("ISO-8859-1")]
fn document_declares_its_charset(#[case] charset: &str) -> Result<(), DiffError> {
    let options = TableOptions::default().charset(charset);
    let document = HtmlDiff::new().make_file(&["a\n"], &["b\n"], &options)?;

    assert!(document.contains(&format!("content=\"text/html; charset={charset}\"")));
    assert!(document.trim_start().starts_with(
        "<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\""
    ));
    Ok(())
}

#[test]
fn characters_outside_the_charset_become_references() -> Result<(), DiffError> {
    let options = TableOptions::default().charset("us-ascii");
    let document =
        HtmlDiff::new().make_file(&lines(NON_ASCII_FROM), &lines(NON_ASCII_TO), &options)?;

    assert!(document.contains("&#305;mpl&#305;c&#305;t"));
    assert!(document.contains("&#252;"));
    assert!(!document.contains('ı'));
    Ok(())
}

#[test]
fn charset_defaults_to_utf8() -> Result<(), DiffError> {
    let document = HtmlDiff::new().make_file(
        &lines(NON_ASCII_FROM),
        &lines(NON_ASCII_TO),
        &TableOptions::default(),
    )?;

    assert!(document.contains(r#"content="text/html; charset=utf-8""#));
    assert!(document.contains("ımplıcıt"));
    Ok(())
}

#[test]
fn unknown_charset_is_rejected() {
    let options = TableOptions::default().charset("klingon");
    let result = HtmlDiff::new().make_file(&["a"], &["b"], &options);

    assert!(matches!(result, Err(DiffError::UnknownCharset(_))));
}

#[test]
fn long_lines_wrap_onto_continuation_rows() {
    let table = HtmlDiff::new().wrapcolumn(Some(10)).make_table(
        &["0123456789abcdefghij\n"],
        &["0123456789abcdefghiJ\n"],
        &TableOptions::default(),
    );

    assert!(table.contains(
        r#"<td class="diff_header" id="from0_1">1</td><td nowrap="nowrap">0123456789</td>"#
    ));
    assert!(table.contains(
        r#"<td class="diff_header">></td><td nowrap="nowrap">abcdefghi<span class="diff_chg">j</span></td>"#
    ));
    assert!(table.contains(
        r#"<td class="diff_header">></td><td nowrap="nowrap">abcdefghi<span class="diff_chg">J</span></td>"#
    ));
}

#[test]
fn context_table_keeps_lines_around_the_change() {
    let from: Vec<String> = (0..20).map(|i| format!("line {i}\n")).collect();
    let mut to = from.clone();
    to[10] = "changed\n".to_string();

    let options = TableOptions::default().context(true).numlines(2);
    let table = HtmlDiff::new().make_table(&from, &to, &options);

    let rows = table.matches("<tr>").count();
    assert_eq!(rows, 5);
    assert!(table.contains(r#"id="from0_9">9</td>"#));
    assert!(table.contains(r#"id="from0_13">13</td>"#));
    assert!(!table.contains(r#"id="from0_8""#));
    assert!(table.contains(r#"<span class="diff_sub">line&nbsp;10</span>"#));
    assert!(table.contains(r#"<span class="diff_add">changed</span>"#));
    assert!(!table.contains("</tbody>        \n        <tbody>"));
}

#[test]
fn identical_files_in_context_mode_say_so() {
    let same = ["one\n", "two\n"];
    let options = TableOptions::default().context(true);

    let table = HtmlDiff::new().make_table(&same, &same, &options);
    assert!(table.contains("No Differences Found"));
}

#[test]
fn descriptions_fill_the_header_row() {
    let options = TableOptions::default().descriptions("from", "to");
    let table = HtmlDiff::new().make_table(&["a\n"], &["b\n"], &options);

    assert!(table.contains(
        r#"<thead><tr><th class="diff_next"><br /></th><th colspan="2" class="diff_header">from</th><th class="diff_next"><br /></th><th colspan="2" class="diff_header">to</th></tr></thead>"#
    ));
}
