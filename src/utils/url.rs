//! URL helpers for feed links.
//!
//! Feed readers need absolute URLs everywhere, while the site build hands
//! us root-relative page paths. These helpers glue `hostname + base + path`
//! together consistently.

use regex::Regex;
use std::sync::LazyLock;

/// Whether `link` already carries a scheme (`https://`, `mailto:` ...).
pub fn is_absolute_url(link: &str) -> bool {
    static RE_SCHEME: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*:").unwrap());
    link.starts_with("//") || RE_SCHEME.is_match(link)
}

/// Strip a single leading `/`.
pub fn remove_leading_slash(s: &str) -> &str {
    s.strip_prefix('/').unwrap_or(s)
}

/// Strip every trailing `/`.
pub fn remove_ending_slash(s: &str) -> &str {
    s.trim_end_matches('/')
}

/// Normalize a hostname into an origin, adding `https://` when no scheme
/// was given and dropping trailing slashes.
///
/// ```ignore
/// normalize_hostname("example.com")          -> "https://example.com"
/// normalize_hostname("http://example.com/")  -> "http://example.com"
/// ```
pub fn normalize_hostname(hostname: &str) -> String {
    let hostname = remove_ending_slash(hostname.trim());
    if is_absolute_url(hostname) {
        hostname.to_string()
    } else {
        format!("https://{hostname}")
    }
}

/// Normalize a site base into `/` or `/sub/`.
pub fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// Build an absolute URL from hostname, base and a page path.
///
/// `base` must already be normalized (see [`normalize_base`]). Paths that are
/// absolute URLs are returned untouched.
pub fn get_url(hostname: &str, base: &str, path: &str) -> String {
    if is_absolute_url(path) {
        return path.to_string();
    }
    format!(
        "{}{}{}",
        normalize_hostname(hostname),
        base,
        remove_leading_slash(path)
    )
}

/// Rewrite root-relative `href="/.."` / `src="/.."` attributes in rendered
/// HTML into absolute URLs.
///
/// Protocol-relative (`//cdn`) and already absolute links stay as they are.
/// Links already under a non-root `base` (`/docs/guide/` with base `/docs/`)
/// only get the origin, so the base is never doubled.
pub fn absolutize_links(html: &str, hostname: &str, base: &str) -> String {
    static RE_ATTR: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r#"(href|src)=(["'])/([^/"'][^"']*)?(["'])"#).unwrap());

    let origin = normalize_hostname(hostname);
    let base_root = base.trim_end_matches('/');

    RE_ATTR
        .replace_all(html, |caps: &regex::Captures<'_>| {
            let rest = caps.get(3).map_or("", |m| m.as_str());
            let path = format!("/{rest}");
            let url = if !base_root.is_empty()
                && (path == base_root || path.starts_with(base))
            {
                format!("{origin}{path}")
            } else {
                get_url(hostname, base, rest)
            };
            format!("{}={}{}{}", &caps[1], &caps[2], url, &caps[4])
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("https://example.com"));
        assert!(is_absolute_url("mailto:me@example.com"));
        assert!(is_absolute_url("//cdn.example.com/a.png"));
        assert!(!is_absolute_url("/guide/"));
        assert!(!is_absolute_url("guide/intro.html"));
    }

    #[test]
    fn test_normalize_hostname() {
        assert_eq!(normalize_hostname("example.com"), "https://example.com");
        assert_eq!(normalize_hostname("http://example.com/"), "http://example.com");
        assert_eq!(normalize_hostname(" https://a.b// "), "https://a.b");
    }

    #[test]
    fn test_normalize_base() {
        assert_eq!(normalize_base(""), "/");
        assert_eq!(normalize_base("/"), "/");
        assert_eq!(normalize_base("docs"), "/docs/");
        assert_eq!(normalize_base("/docs"), "/docs/");
        assert_eq!(normalize_base("/a/b/"), "/a/b/");
    }

    #[test]
    fn test_get_url() {
        assert_eq!(
            get_url("example.com", "/", "/guide/intro.html"),
            "https://example.com/guide/intro.html"
        );
        assert_eq!(
            get_url("https://example.com/", "/docs/", "/zh/"),
            "https://example.com/docs/zh/"
        );
        assert_eq!(get_url("example.com", "/", "/"), "https://example.com/");
        assert_eq!(
            get_url("example.com", "/", "https://other.org/x"),
            "https://other.org/x"
        );
    }

    #[test]
    fn test_absolutize_links() {
        let html = r#"<a href="/guide/">g</a><img src='/logo.png'><a href="//cdn.x/y">c</a><a href="https://z.org/">z</a><a href="rel.html">r</a>"#;
        let out = absolutize_links(html, "example.com", "/docs/");
        assert_eq!(
            out,
            r#"<a href="https://example.com/docs/guide/">g</a><img src='https://example.com/docs/logo.png'><a href="//cdn.x/y">c</a><a href="https://z.org/">z</a><a href="rel.html">r</a>"#
        );
    }

    #[test]
    fn test_absolutize_keeps_existing_base() {
        let html = r#"<a href="/docs/guide/">g</a><a href="/docs">d</a><a href="/docsite/">s</a>"#;
        let out = absolutize_links(html, "example.com", "/docs/");
        assert_eq!(
            out,
            r#"<a href="https://example.com/docs/guide/">g</a><a href="https://example.com/docs">d</a><a href="https://example.com/docs/docsite/">s</a>"#
        );
    }

    #[test]
    fn test_absolutize_root_link() {
        let out = absolutize_links(r#"<a href="/">home</a>"#, "example.com", "/");
        assert_eq!(out, r#"<a href="https://example.com/">home</a>"#);
    }
}
