/// Version extraction from `kubectl version` output
use crate::error::VersionError;
use regex::Regex;
use std::sync::LazyLock;

pub static REGEX_VERSION_MAJOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Major:"([0-9]+)""#).expect("valid major version regex"));

pub static REGEX_VERSION_MINOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"Minor:"([0-9]+)""#).expect("valid minor version regex"));

/// First capture group of `re` in `s`, if any
pub fn version_match<'a>(re: &Regex, s: &'a str) -> Option<&'a str> {
    re.captures(s)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Extract `(major, minor)` for `kind` ("Client" or "Server").
///
/// Understands both the verbose form
/// `Client Version: version.Info{Major:"1", Minor:"7", ...}`
/// and the short form `Client Version: v1.28.2`.
pub fn parse_component_version(kind: &str, output: &str) -> Option<(String, String)> {
    let kind = regex::escape(kind);

    let info_re = Regex::new(&format!(r"{} Version: version\.Info\{{(.*)\}}", kind)).ok()?;
    if let Some(m) = info_re.find(output) {
        let info = m.as_str();
        return match (
            version_match(&REGEX_VERSION_MAJOR, info),
            version_match(&REGEX_VERSION_MINOR, info),
        ) {
            (Some(major), Some(minor)) => Some((major.to_string(), minor.to_string())),
            _ => None,
        };
    }

    let short_re = Regex::new(&format!(r"{} Version: v?([0-9]+)\.([0-9]+)", kind)).ok()?;
    let caps = short_re.captures(output)?;
    Some((caps[1].to_string(), caps[2].to_string()))
}

/// Check that the `kind` version reported in `output` is `major.minor`
pub fn check_version(
    kind: &str,
    output: &str,
    expected_major: &str,
    expected_minor: &str,
) -> Result<(), VersionError> {
    let Some((major, minor)) = parse_component_version(kind, output) else {
        return Err(VersionError::NotFound {
            kind: kind.to_string(),
            output: output.to_string(),
        });
    };

    if major != expected_major || minor != expected_minor {
        return Err(VersionError::Unexpected {
            kind: kind.to_string(),
            major,
            minor,
        });
    }

    Ok(())
}

/// Split "1.7" (or "v1.7.0") into major and minor
pub fn split_major_minor(version: &str) -> Option<(&str, &str)> {
    let mut parts = version.trim().trim_start_matches('v').split('.');
    let major = parts.next().filter(|p| is_number(p))?;
    let minor = parts.next().filter(|p| is_number(p))?;
    Some((major, minor))
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
