use pretty_assertions::assert_eq;
use rstest::rstest;
use seqdiff::{
    Differ, DiffFormat, DiffOptions, DiffRequest, Side, context_diff, diff_bytes, ndiff, restore,
    unified_diff,
};

mod common;

use common::lorem_lines;

const ZEN_BEFORE: [&str; 4] = [
    "  1. Beautiful is better than ugly.\n",
    "  2. Explicit is better than implicit.\n",
    "  3. Simple is better than complex.\n",
    "  4. Complex is better than complicated.\n",
];

const ZEN_AFTER: [&str; 4] = [
    "  1. Beautiful is better than ugly.\n",
    "  3.   Simple is better than complex.\n",
    "  4. Complicated is better than complex.\n",
    "  5. Flat is better than nested.\n",
];

#[test]
fn differ_marks_intraline_changes() {
    let delta: Vec<String> = Differ::new().compare(&ZEN_BEFORE, &ZEN_AFTER).collect();

    assert_eq!(
        delta,
        vec![
            "    1. Beautiful is better than ugly.\n",
            "-   2. Explicit is better than implicit.\n",
            "-   3. Simple is better than complex.\n",
            "+   3.   Simple is better than complex.\n",
            "?     ++\n",
            "-   4. Complex is better than complicated.\n",
            "?            ^                     ---- ^\n",
            "+   4. Complicated is better than complex.\n",
            "?           ++++ ^                      ^\n",
            "+   5. Flat is better than nested.\n",
        ]
    );
}

#[rstest]
#[case(Side::One, &ZEN_BEFORE)]
#[case(Side::Two, &ZEN_AFTER)]
fn ndiff_restores_either_side(#[case] side: Side, #[case] expected: &[&str; 4]) {
    let delta: Vec<String> = ndiff(&ZEN_BEFORE, &ZEN_AFTER, None).collect();
    let restored: Vec<&str> = restore(&delta, side).collect();

    assert_eq!(restored, expected.to_vec());
}

#[rstest]
fn ndiff_of_generated_text_restores_both_sides(
    #[from(lorem_lines)] before: Vec<String>,
) {
    let mut after = before.clone();
    after.remove(3);
    after.insert(7, "an extra line\n".to_string());
    after[9] = after[9].replacen(": ", " - ", 1);

    let delta: Vec<String> = ndiff(&before, &after, None).collect();
    assert_eq!(restore(&delta, Side::One).collect::<Vec<_>>(), before);
    assert_eq!(restore(&delta, Side::Two).collect::<Vec<_>>(), after);
}

#[test]
fn unified_diff_without_line_terminators() {
    let a = ["one", "two", "three"];
    let b = ["zero", "one", "tree", "four"];
    let options = DiffOptions::default()
        .files("Original", "Current")
        .dates("2005-01-26 23:30:50", "2010-04-02 10:20:52")
        .lineterm("");

    let diff: Vec<String> = unified_diff(&a, &b, options).collect();
    assert_eq!(
        diff,
        vec![
            "--- Original\t2005-01-26 23:30:50",
            "+++ Current\t2010-04-02 10:20:52",
            "@@ -1,3 +1,4 @@",
            "+zero",
            " one",
            "-two",
            "-three",
            "+tree",
            "+four",
        ]
    );
}

#[test]
fn context_diff_marks_changed_lines() {
    let a = ["one\n", "two\n", "three\n", "four\n"];
    let b = ["zero\n", "one\n", "tree\n", "four\n"];
    let options = DiffOptions::default().files("Original", "Current");

    let diff: Vec<String> = context_diff(&a, &b, options).collect();
    assert_eq!(
        diff,
        vec![
            "*** Original\n",
            "--- Current\n",
            "***************\n",
            "*** 1,4 ****\n",
            "  one\n",
            "! two\n",
            "! three\n",
            "  four\n",
            "--- 1,4 ----\n",
            "+ zero\n",
            "  one\n",
            "! tree\n",
            "  four\n",
        ]
    );
}

#[rstest]
#[case(&[], &["a\n"], "@@ -0,0 +1 @@\n")]
#[case(&["a\n"], &[], "@@ -1 +0,0 @@\n")]
fn empty_side_ranges_name_the_line_before(
    #[case] a: &[&str],
    #[case] b: &[&str],
    #[case] range: &str,
) {
    let diff: Vec<String> = unified_diff(a, b, DiffOptions::default()).collect();
    assert_eq!(diff[2], range);
}

#[test]
fn identical_input_produces_no_output() {
    let lines = ["same\n", "lines\n"];
    let options = DiffOptions::default();

    assert_eq!(unified_diff(&lines, &lines, options.clone()).count(), 0);
    assert_eq!(context_diff(&lines, &lines, options).count(), 0);
}

#[test]
fn byte_diff_reproduces_undecodable_input() -> Result<(), seqdiff::DiffError> {
    let request = DiffRequest::new([b"\xa3odz\n".as_slice()], [b"\xa3\xf3dz\n".as_slice()])
        .files(b"a".as_slice(), b"b".as_slice());

    let diff: Vec<Vec<u8>> = diff_bytes(DiffFormat::Unified, request)?.collect();
    assert_eq!(
        diff,
        vec![
            b"--- a\n".to_vec(),
            b"+++ b\n".to_vec(),
            b"@@ -1 +1 @@\n".to_vec(),
            b"-\xa3odz\n".to_vec(),
            b"+\xa3\xf3dz\n".to_vec(),
        ]
    );

    Ok(())
}

#[test]
fn byte_diff_rejects_text_lines() {
    let request = DiffRequest::new(["text\n"], [b"bytes\n".as_slice()]);

    let err = diff_bytes(DiffFormat::Context, request).err();
    assert!(matches!(
        err,
        Some(seqdiff::DiffError::LineTypeMismatch { .. })
            | Some(seqdiff::DiffError::ArgumentTypeMismatch { .. })
    ));
}
