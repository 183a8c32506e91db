//! Fixed layout and regulatory prose of Form 1.

pub(crate) const DOCUMENT_OPEN: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
    body {
        font-family: "Arial Narrow", sans-serif;
        font-size: 15px;
        line-height: 13.5pt;
        margin: 0;
        padding: 20px;
    }
    .text-center {
        text-align: center;
    }
    .text-justify {
        text-align: justify;
    }
    .form-title {
        margin-top: 4.9pt;
        margin-bottom: 6.0pt;
        margin-left: 12.3pt;
        text-indent: -12.3pt;
    }
    .underline {
        text-decoration: underline;
    }
    table {
        border-collapse: collapse;
        width: 100%;
        margin: 10px 0;
    }
    table, th, td {
        border: 1px solid black;
    }
    th, td {
        padding: 5px;
        vertical-align: top;
    }
    th {
        background-color: #d9d9d9;
        text-align: center;
    }
    .dotted-field {
        border-bottom: 1px dotted black;
        min-width: 200px;
        display: inline-block;
    }
    ol {
        padding-left: 20px;
    }
    ol.lower-roman {
        list-style-type: lower-roman;
    }
    .checkbox {
        font-family: "Arial Unicode MS";
    }
</style>
</head>
<body>
<div style="max-width: 800px; margin: 0 auto;">
"#;

pub const FORM_HEADING: &str = "APPLICATION CUM QUESTIONNAIRE TO BE SUBMITTED BY";

pub(crate) const LETTER_HEAD: &str = r#"<p class="form-title"><strong>FORM 1</strong></p>
<p class="text-center"><strong>APPLICATION CUM QUESTIONNAIRE TO BE SUBMITTED BY<br>PRACTICE UNIT</strong></p>
<p class="text-center"><strong>[<em>As per</em> <em>Clause 6(1) &amp; 6 (2) of the Peer Review Guidelines 2022]</em></strong></p>
<p><strong>&nbsp;</strong></p>
<p><strong>The Secretary, Peer Review Board,</strong></p>
<p><strong>The Institute of Chartered Accountants of India,&nbsp;</strong></p>
<p><strong>ICAI Bhawan,</strong></p>
<p><strong>Post Box No. 7100,</strong></p>
<p><strong>Indraprastha Marg, New Delhi – 110002&nbsp;</strong></p>
<p><strong>&nbsp;</strong></p>
<p class="text-center"><strong>APPLICATION</strong></p>
<p class="text-center"><strong>&nbsp;</strong></p>
<p>Dear Sir,</p>
<p class="text-center"><strong><s><span style="text-decoration:none;">&nbsp;</span></s></strong></p>
"#;

pub(crate) const GUIDELINES_URL: &str =
    "https://resource.cdn.icai.org/72010prb57960-peer-review-guidelines2022.pdf";

pub(crate) const SERVICES_INTRO: &str = "I/We hereby declare that my/our firm has signed reports pertaining to the following assurance services during the period under review:";

pub(crate) const SERVICES_TABLE_HEADER: &str = r#"<tr>
    <th>S. No.</th>
    <th>Type of Assurance service rendered</th>
    <th>Major type of Client <u>(please specify)</u> (e.g.: Banks; Insurance Company; Manufacturing; Individuals; Trading ; any other )</th>
</tr>
"#;

/// Labels of the assurance service rows, numbered from 1 in the rendered table.
/// The seventh row appends the applicant's own description.
pub(crate) const ASSURANCE_SERVICES: [&str; 7] = [
    "Central Statutory Audit",
    "Statutory Audit",
    "Internal Audit",
    "Tax Audit",
    "Concurrent Audit",
    "Certification work",
    "Any other, please specify",
];

pub(crate) const APPLY_REASON_LABELS: [&str; 5] = [
    "As it is Mandatory by: ICAI Any other Regulator (please specify)",
    "Voluntarily:",
    "As a special case Review initiated by the Board:",
    "New Unit:",
    "As per decision of the Board:",
];

pub(crate) const REVIEWER_OPTION_LABELS: [&str; 4] = [
    "Same City",
    "From outside City",
    "Either option (i) or (ii)",
    "Preferred City in case of option (ii)",
];

pub(crate) const LISTED_AUDIT_TAIL: &str = "Statutory Audit of enterprises Listed in India or abroad as defined under SEBI LODR, 2015 during the Review Period.";

pub const NEW_UNIT_HEADING: &str = "Further Information to be submitted by New Unit";

pub(crate) const DOCUMENT_CLOSE: &str = "</div>\n</body>\n</html>\n";
