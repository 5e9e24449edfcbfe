/// Placeholder substitution for benchmark control text
use std::collections::BTreeMap;
use tracing::debug;

/// Replace every occurrence of `name` in `text` with `value`, quoting
/// values of more than one word so they stay a single shell argument
pub fn multi_word_replace(text: &str, name: &str, value: &str) -> String {
    if value.split_whitespace().count() > 1 {
        text.replace(name, &format!("'{}'", value))
    } else {
        text.replace(name, value)
    }
}

/// Replace `$<key><ext>` placeholders with the mapped values.
///
/// With `ext = "bin"` the entry `apiserver -> kube-apiserver` turns
/// `$apiserverbin` into `kube-apiserver`. Empty values are left unreplaced.
pub fn make_substitutions(text: &str, ext: &str, subs: &BTreeMap<String, String>) -> String {
    let mut text = text.to_string();

    for (key, value) in subs {
        let placeholder = format!("${}{}", key, ext);
        if value.is_empty() {
            debug!("No substitution for '{}'", placeholder);
            continue;
        }
        debug!("Substituting {} with '{}'", placeholder, value);
        text = multi_word_replace(&text, &placeholder, value);
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(items: &[(&str, &str)]) -> BTreeMap<String, String> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_multi_word_replace() {
        let cases = vec![
            (
                "Here's a file with no substitutions",
                "blah",
                "blah",
                "Here's a file with no substitutions",
            ),
            (
                "Here's a file with a substitution",
                "blah",
                "substitution",
                "Here's a file with a blah",
            ),
            (
                "Here's a file with multi-word substitutions",
                "multi word",
                "multi-word",
                "Here's a file with 'multi word' substitutions",
            ),
            (
                "Here's a file with several several substitutions several",
                "blah",
                "several",
                "Here's a file with blah blah substitutions blah",
            ),
        ];

        for (input, sub, subname, expected) in cases {
            assert_eq!(multi_word_replace(input, subname, sub), expected);
        }
    }

    #[test]
    fn test_make_substitutions() {
        let cases = vec![
            ("Replace $thisbin", map(&[("this", "that")]), "Replace that"),
            (
                "Replace $thisbin",
                map(&[("this", "that"), ("here", "there")]),
                "Replace that",
            ),
            (
                "Replace $thisbin and $herebin",
                map(&[("this", "that"), ("here", "there")]),
                "Replace that and there",
            ),
        ];

        for (input, subs, expected) in cases {
            assert_eq!(make_substitutions(input, "bin", &subs), expected, "{}", input);
        }
    }

    #[test]
    fn test_make_substitutions_only_touches_own_extension() {
        let subs = map(&[("apiserver", "hyperkube apiserver")]);
        let text = "ps -ef | grep $apiserverbin; cat $apiserverconf";
        assert_eq!(
            make_substitutions(text, "bin", &subs),
            "ps -ef | grep 'hyperkube apiserver'; cat $apiserverconf"
        );
    }

    #[test]
    fn test_make_substitutions_skips_empty_values() {
        let subs = map(&[("kubelet", "")]);
        assert_eq!(
            make_substitutions("stat $kubeletconf", "conf", &subs),
            "stat $kubeletconf"
        );
    }
}
