//! CEX bundle parsing.
//!
//! A bundle is a flat text file divided into sections by `#!<name>` markers.
//! Only `#!ctsdata` (passages) and `#!ctscatalog` (catalog entries) are
//! consumed here; unknown sections are ignored. Records are newline-
//! separated with `#` as the field separator, and whole lines starting with
//! `//` are comments.

use serde::Serialize;

use crate::error::{Error, Result};

/// One citable unit of text: a leaf URN and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Passage {
    pub urn: String,
    pub text: String,
}

/// The ordered passage sequence of one bundle's `#!ctsdata` section.
///
/// Order is the order of appearance; a passage's 1-based sequence number is
/// its index plus one. Duplicate URNs are preserved, and exact lookups
/// return the first occurrence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    pub passages: Vec<Passage>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.passages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passages.is_empty()
    }

    /// Index of the first passage with exactly this URN.
    pub fn index_of(&self, urn: &str) -> Option<usize> {
        self.passages.iter().position(|p| p.urn == urn)
    }

    /// Work stems (`urn:cts:<group>:<work>:`) in first-appearance order,
    /// deduplicated.
    pub fn work_stems(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for p in &self.passages {
            if let Some(stem) = crate::urn::work_stem(&p.urn)
                && seen.insert(stem.clone())
            {
                out.push(stem);
            }
        }
        out
    }
}

/// One row of the `#!ctscatalog` section.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub urn: String,
    pub citation_scheme: String,
    pub group_name: String,
    pub work_title: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version_label: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub exemplar_label: String,
    pub online: bool,
}

/// Extract the body of a `#!<marker>` section: everything after the marker
/// up to the next `#!`, with whole-line `//` comments removed.
fn section<'a>(input: &'a str, marker: &'static str) -> Result<Vec<&'a str>> {
    let tag = ["#!", marker].concat();
    let (_, rest) = input
        .split_once(tag.as_str())
        .ok_or(Error::MissingSection(marker))?;
    let body = rest.split("#!").next().unwrap_or("");
    Ok(body.lines().filter(|l| !l.starts_with("//")).collect())
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(field: &str) -> &str {
    if field.len() >= 2 && field.starts_with('"') && field.ends_with('"') {
        &field[1..field.len() - 1]
    } else {
        field
    }
}

/// Parse the `#!ctsdata` section into an ordered corpus.
///
/// Each record is `urn#text`. The line is split at its first `#`, so text
/// containing the separator survives intact. The URN is trimmed; the text
/// is kept verbatim apart from an optional surrounding quote pair. Lines
/// with no separator or an empty URN are skipped rather than failing the
/// whole section.
pub fn parse_data(input: &str) -> Result<Corpus> {
    let mut passages = Vec::new();
    for line in section(input, "ctsdata")? {
        if line.trim().is_empty() {
            continue;
        }
        let Some((urn, text)) = line.split_once('#') else {
            continue;
        };
        let urn = unquote(urn.trim()).trim();
        if urn.is_empty() {
            continue;
        }
        passages.push(Passage {
            urn: urn.to_string(),
            text: unquote(text).to_string(),
        });
    }
    Ok(Corpus { passages })
}

/// Parse the `#!ctscatalog` section.
///
/// Records carry four to seven `#`-separated fields: urn, citation scheme,
/// group name, work title, then optional version label, exemplar label, and
/// an `online` flag parsed as case-insensitive `true`. A leading header row
/// (first field `urn`, any case) is skipped, as are rows with fewer than
/// four fields.
pub fn parse_catalog(input: &str) -> Result<Vec<CatalogEntry>> {
    let mut entries = Vec::new();
    let mut row = 0usize;
    for line in section(input, "ctscatalog")? {
        if line.trim().is_empty() {
            continue;
        }
        row += 1;
        let fields: Vec<&str> = line.split('#').map(|f| unquote(f.trim()).trim()).collect();
        if row == 1 && fields.first().is_some_and(|f| f.eq_ignore_ascii_case("urn")) {
            continue;
        }
        if fields.len() < 4 {
            continue;
        }
        entries.push(CatalogEntry {
            urn: fields[0].to_string(),
            citation_scheme: fields[1].to_string(),
            group_name: fields[2].to_string(),
            work_title: fields[3].to_string(),
            version_label: fields.get(4).unwrap_or(&"").to_string(),
            exemplar_label: fields.get(5).unwrap_or(&"").to_string(),
            online: fields.get(6).is_some_and(|f| f.eq_ignore_ascii_case("true")),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUNDLE: &str = "\
#!cexversion
3.0
#!ctscatalog
urn#citationScheme#groupName#workTitle#versionLabel#exemplarLabel#online
urn:cts:greekLit:tlg0012.tlg001:#book/line#Homer#Iliad#Allen##true
urn:cts:latinLit:phi0959.phi006:#book#Ovid#Metamorphoses#Magnus#school ed.#false
#!ctsdata
// opening lines
urn:cts:greekLit:tlg0012.tlg001:1.1#Sing, goddess, the wrath
urn:cts:greekLit:tlg0012.tlg001:1.2#of Achilles son of Peleus
urn:cts:latinLit:phi0959.phi006:1.1#In nova fert animus
";

    #[test]
    fn parses_passages_in_order() {
        let corpus = parse_data(BUNDLE).unwrap();
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.passages[0].urn, "urn:cts:greekLit:tlg0012.tlg001:1.1");
        assert_eq!(corpus.passages[0].text, "Sing, goddess, the wrath");
        assert_eq!(corpus.passages[2].urn, "urn:cts:latinLit:phi0959.phi006:1.1");
    }

    #[test]
    fn missing_ctsdata_is_fatal() {
        let err = parse_data("#!ctscatalog\nurn#a#b#c\n").unwrap_err();
        assert!(matches!(err, Error::MissingSection("ctsdata")));
    }

    #[test]
    fn comments_and_blank_lines_are_skipped() {
        let corpus = parse_data("#!ctsdata\n// comment\n\nurn:cts:g:w:1#text\n").unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn text_keeps_embedded_separators() {
        let corpus = parse_data("#!ctsdata\nurn:cts:g:w:1#note #1 survives\n").unwrap();
        assert_eq!(corpus.passages[0].text, "note #1 survives");
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let corpus = parse_data("#!ctsdata\nno separator here\n#orphan text\nurn:cts:g:w:1#ok\n")
            .unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.passages[0].text, "ok");
    }

    #[test]
    fn quoted_fields_are_unwrapped() {
        let corpus = parse_data("#!ctsdata\n\"urn:cts:g:w:1\"#\"quoted text\"\n").unwrap();
        assert_eq!(corpus.passages[0].urn, "urn:cts:g:w:1");
        assert_eq!(corpus.passages[0].text, "quoted text");
    }

    #[test]
    fn section_stops_at_next_marker() {
        let corpus =
            parse_data("#!ctsdata\nurn:cts:g:w:1#a\n#!citedata\nurn:cite2:x:y:1#junk\n").unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn crlf_lines_parse_cleanly() {
        let corpus = parse_data("#!ctsdata\r\n// c\r\nurn:cts:g:w:1#a\r\nurn:cts:g:w:2#b\r\n")
            .unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.passages[1].text, "b");
    }

    #[test]
    fn index_of_returns_first_duplicate() {
        let corpus =
            parse_data("#!ctsdata\nurn:cts:g:w:1#first\nurn:cts:g:w:1#second\n").unwrap();
        assert_eq!(corpus.index_of("urn:cts:g:w:1"), Some(0));
        assert_eq!(corpus.len(), 2);
    }

    #[test]
    fn work_stems_dedup_preserving_order() {
        let corpus = parse_data(BUNDLE).unwrap();
        assert_eq!(
            corpus.work_stems(),
            vec![
                "urn:cts:greekLit:tlg0012.tlg001:",
                "urn:cts:latinLit:phi0959.phi006:"
            ]
        );
    }

    #[test]
    fn catalog_parses_full_and_short_rows() {
        let entries = parse_catalog(BUNDLE).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].group_name, "Homer");
        assert_eq!(entries[0].version_label, "Allen");
        assert_eq!(entries[0].exemplar_label, "");
        assert!(entries[0].online);
        assert_eq!(entries[1].exemplar_label, "school ed.");
        assert!(!entries[1].online);
    }

    #[test]
    fn catalog_header_skip_is_case_insensitive() {
        let entries =
            parse_catalog("#!ctscatalog\nURN#scheme#group#title\nurn:cts:g:w:#s#g#t\n").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].urn, "urn:cts:g:w:");
    }

    #[test]
    fn catalog_rows_under_four_fields_are_skipped() {
        let entries = parse_catalog("#!ctscatalog\nurn:cts:g:w:#only#three\n").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn catalog_missing_section_is_fatal() {
        let err = parse_catalog("#!ctsdata\nurn:cts:g:w:1#a\n").unwrap_err();
        assert!(matches!(err, Error::MissingSection("ctscatalog")));
    }

    #[test]
    fn catalog_entry_serializes_with_camel_case_and_omits_empty_labels() {
        let entries = parse_catalog(BUNDLE).unwrap();
        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["citationScheme"], "book/line");
        assert_eq!(json["versionLabel"], "Allen");
        assert!(json.get("exemplarLabel").is_none());
        assert_eq!(json["online"], true);
    }
}
