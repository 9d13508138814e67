//! Markup skeletons of the HTML renderer

pub(crate) const STYLES: &str = r#"
        table.diff {font-family:Courier; border:medium;}
        .diff_header {background-color:#e0e0e0}
        td.diff_header {text-align:right}
        .diff_next {background-color:#c0c0c0}
        .diff_add {background-color:#aaffaa}
        .diff_chg {background-color:#ffff77}
        .diff_sub {background-color:#ffaaaa}"#;

pub(crate) const LEGEND: &str = r#"
    <table class="diff" summary="Legends">
        <tr> <th colspan="2"> Legends </th> </tr>
        <tr> <td> <table border="" summary="Colors">
                      <tr><th> Colors </th> </tr>
                      <tr><td class="diff_add">&nbsp;Added&nbsp;</td></tr>
                      <tr><td class="diff_chg">Changed</td> </tr>
                      <tr><td class="diff_sub">Deleted</td> </tr>
                  </table></td>
             <td> <table border="" summary="Links">
                      <tr><th colspan="2"> Links </th> </tr>
                      <tr><td>(f)irst change</td> </tr>
                      <tr><td>(n)ext change</td> </tr>
                      <tr><td>(t)op</td> </tr>
                  </table></td> </tr>
    </table>"#;

/// Placeholder cells for tables without any row
pub(crate) const NO_DIFFERENCES_CELLS: &str = "<td></td><td>&nbsp;No Differences Found&nbsp;</td>";
pub(crate) const EMPTY_FILE_CELLS: &str = "<td></td><td>&nbsp;Empty File&nbsp;</td>";

/// Closes one change section and opens the next
pub(crate) const SECTION_BREAK: &str = "        </tbody>        \n        <tbody>\n";

pub(crate) fn document(charset: &str, table: &str) -> String {
    format!(
        r#"
<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN"
          "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">

<html>

<head>
    <meta http-equiv="Content-Type"
          content="text/html; charset={charset}" />
    <title></title>
    <style type="text/css">{styles}
    </style>
</head>

<body>
    {table}{legend}
</body>

</html>"#,
        styles = STYLES,
        legend = LEGEND,
    )
}

pub(crate) fn table(prefix: &str, header_row: &str, data_rows: &str) -> String {
    format!(
        r#"
    <table class="diff" id="difflib_chg_{prefix}_top"
           cellspacing="0" cellpadding="0" rules="groups" >
        <colgroup></colgroup> <colgroup></colgroup> <colgroup></colgroup>
        <colgroup></colgroup> <colgroup></colgroup> <colgroup></colgroup>
        {header_row}
        <tbody>
{data_rows}        </tbody>
    </table>"#
    )
}

pub(crate) fn header_row(fromdesc: &str, todesc: &str) -> String {
    format!(
        r#"<thead><tr><th class="diff_next"><br /></th><th colspan="2" class="diff_header">{fromdesc}</th><th class="diff_next"><br /></th><th colspan="2" class="diff_header">{todesc}</th></tr></thead>"#
    )
}

pub(crate) fn data_row(next_id: &str, next_href: &str, from_cells: &str, to_cells: &str) -> String {
    format!(
        "            <tr><td class=\"diff_next\"{next_id}>{next_href}</td>{from_cells}<td class=\"diff_next\">{next_href}</td>{to_cells}</tr>\n"
    )
}

pub(crate) fn line_cells(id: &str, number: &str, text: &str) -> String {
    format!(r#"<td class="diff_header"{id}>{number}</td><td nowrap="nowrap">{text}</td>"#)
}
