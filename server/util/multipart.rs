/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Splits `haystack` on every occurrence of `needle`, returning the pieces
/// between occurrences (excluding the needle itself).
pub fn split_on<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    let mut result = Vec::new();
    let mut start = 0;
    while start <= haystack.len() {
        if let Some(pos) = find_subsequence(&haystack[start..], needle) {
            result.push(&haystack[start..start + pos]);
            start += pos + needle.len();
        } else {
            result.push(&haystack[start..]);
            break;
        }
    }
    result
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| {
            let (key, value) = (s.get(..9)?, s.get(9..)?);
            key.eq_ignore_ascii_case("boundary=").then(|| value.trim_matches('"').to_owned())
        })
        .filter(|b| !b.is_empty())
}

/// One body part of a multipart/form-data payload.
#[derive(Debug)]
pub struct Part<'a> {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub data: &'a [u8],
}

/// Parses every part that has a header block.
pub fn parts<'a>(body: &'a [u8], boundary: &str) -> Vec<Part<'a>> {
    let delimiter = format!("--{}", boundary);
    let sep = b"\r\n\r\n";

    split_on(body, delimiter.as_bytes())
        .into_iter()
        .filter_map(|raw| {
            let sep_pos = find_subsequence(raw, sep)?;
            let headers = String::from_utf8_lossy(&raw[..sep_pos]);
            let disposition = headers
                .lines()
                .find(|l| l.to_ascii_lowercase().starts_with("content-disposition:"))?;
            let data = &raw[sep_pos + sep.len()..];
            Some(Part {
                name: disposition_param(disposition, "name"),
                filename: disposition_param(disposition, "filename"),
                data: data.strip_suffix(b"\r\n").unwrap_or(data),
            })
        })
        .collect()
}

/// Returns the upload in the file part named `field_name`, or failing that
/// the first file part in the body.
pub fn extract_file<'a>(body: &'a [u8], boundary: &str, field_name: &str) -> Option<&'a [u8]> {
    let all = parts(body, boundary);
    all.iter()
        .find(|p| p.name.as_deref() == Some(field_name))
        .or_else(|| all.iter().find(|p| p.filename.is_some()))
        .map(|p| p.data)
}

/// Reads `key="value"` (or bare `key=value`) from a Content-Disposition line.
/// Matches whole parameter names, so `name` never picks up `filename`.
fn disposition_param(disposition: &str, key: &str) -> Option<String> {
    disposition.split(';').skip(1).find_map(|param| {
        let (k, v) = param.trim().split_once('=')?;
        if k.trim().eq_ignore_ascii_case(key) {
            Some(v.trim().trim_matches('"').to_owned())
        } else {
            None
        }
    })
}
