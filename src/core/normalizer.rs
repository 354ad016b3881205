use regex::Regex;
use std::sync::LazyLock;

// 只接受「單一標籤 + TLD」，sub.example.com 之類的多層網域會被拒絕
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{1,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
        .expect("domain pattern is a valid regex")
});

const STRIPPED_PREFIXES: [&str; 3] = ["https://", "http://", "www."];

/// Cleans user input down to a bare host name.
///
/// Lowercases and trims, drops a leading `http://`/`https://` and `www.`, then
/// cuts at the first `/` and the first `:`. Never fails: empty input gives an
/// empty string. Prefixes are stripped until none is left so the result is a
/// fixed point (`normalize(normalize(x)) == normalize(x)`).
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut domain = lowered.trim();

    loop {
        let stripped = STRIPPED_PREFIXES
            .iter()
            .find_map(|prefix| domain.strip_prefix(prefix));
        match stripped {
            Some(rest) => domain = rest.trim_start(),
            None => break,
        }
    }

    let domain = domain.split('/').next().unwrap_or_default();
    let domain = domain.split(':').next().unwrap_or_default();
    domain.trim_end().to_string()
}

/// Whether an already-normalized domain matches the accepted pattern.
///
/// Multi-level names such as `sub.example.com` or `example.co.uk` are rejected;
/// this is a known limitation of the accepted format, kept as-is.
pub fn is_valid_format(domain: &str) -> bool {
    DOMAIN_PATTERN.is_match(domain)
}

/// Valid/invalid hint shown next to the input while the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputIndicator {
    Neutral,
    Valid,
    Invalid,
}

impl InputIndicator {
    pub fn for_input(raw: &str) -> Self {
        let domain = normalize(raw);
        if domain.is_empty() {
            InputIndicator::Neutral
        } else if is_valid_format(&domain) {
            InputIndicator::Valid
        } else {
            InputIndicator::Invalid
        }
    }
}
