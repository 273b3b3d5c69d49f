//! Social sharing intents built from the current page URL and savings text.
//!
//! Sharing never fails the caller: a missing native share capability falls back
//! to copying text, and copy failures surface as a transient notice.

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::warn;
use crate::config::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareAction {
    Generic,
    Twitter,
    Facebook,
    CopyLink,
}

impl FromStr for ShareAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(ShareAction::Generic),
            "twitter" => Ok(ShareAction::Twitter),
            "facebook" => Ok(ShareAction::Facebook),
            "copy-link" => Ok(ShareAction::CopyLink),
            _ => Err(format!("Unknown share action: {}", s)),
        }
    }
}

impl fmt::Display for ShareAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShareAction::Generic => write!(f, "generic"),
            ShareAction::Twitter => write!(f, "twitter"),
            ShareAction::Facebook => write!(f, "facebook"),
            ShareAction::CopyLink => write!(f, "copy-link"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied { notice: &'static str },
    OpenUrl(String),
    CopyFailed { notice: &'static str },
}

impl ShareOutcome {
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            ShareOutcome::Copied { notice } | ShareOutcome::CopyFailed { notice } => Some(notice),
            _ => None,
        }
    }
}

/// Capabilities of the environment the page runs in.
pub trait ShareEnvironment {
    /// `None` when the environment has no native share capability.
    fn native_share(&mut self, payload: &SharePayload) -> Option<std::io::Result<()>>;
    fn copy_text(&mut self, text: &str) -> std::io::Result<()>;
}

/// Terminal environment: no native share sheet, "copying" writes to stdout.
pub struct TerminalShareEnvironment<W: Write> {
    out: W,
}

impl<W: Write> TerminalShareEnvironment<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> ShareEnvironment for TerminalShareEnvironment<W> {
    fn native_share(&mut self, _payload: &SharePayload) -> Option<std::io::Result<()>> {
        None
    }

    fn copy_text(&mut self, text: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

/// Percent-encodes everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, byte-wise over UTF-8.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9'
            | b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

pub fn headline(savings_display: &str) -> String {
    format!("{} {}", savings_display, SHARE_HEADLINE_SUFFIX)
}

pub fn twitter_intent_url(text: &str, page_url: &str) -> String {
    format!(
        "{}?text={}&url={}",
        TWITTER_INTENT_URL,
        encode_uri_component(text),
        encode_uri_component(page_url)
    )
}

pub fn facebook_share_url(page_url: &str) -> String {
    format!("{}?u={}", FACEBOOK_SHARER_URL, encode_uri_component(page_url))
}

fn copy_or_notice<E: ShareEnvironment>(env: &mut E, text: &str, success: &'static str) -> ShareOutcome {
    match env.copy_text(text) {
        Ok(()) => ShareOutcome::Copied { notice: success },
        Err(e) => {
            warn!("Copy to clipboard failed: {}", e);
            ShareOutcome::CopyFailed { notice: NOTICE_COPY_FAILED }
        }
    }
}

/// Runs a share action for the displayed savings total.
pub fn perform_share<E: ShareEnvironment>(
    action: ShareAction,
    env: &mut E,
    savings_display: &str,
    page_url: &str,
) -> ShareOutcome {
    let text = headline(savings_display);

    match action {
        ShareAction::Generic => {
            let payload = SharePayload {
                title: SHARE_TITLE.to_string(),
                text: text.clone(),
                url: page_url.to_string(),
            };
            match env.native_share(&payload) {
                Some(Ok(())) => ShareOutcome::Shared,
                Some(Err(e)) => {
                    warn!("Native share failed, copying instead: {}", e);
                    copy_or_notice(env, &format!("{} {}", text, page_url), NOTICE_COPIED)
                }
                None => copy_or_notice(env, &format!("{} {}", text, page_url), NOTICE_COPIED),
            }
        }
        ShareAction::Twitter => ShareOutcome::OpenUrl(twitter_intent_url(&text, page_url)),
        ShareAction::Facebook => ShareOutcome::OpenUrl(facebook_share_url(page_url)),
        ShareAction::CopyLink => copy_or_notice(env, page_url, NOTICE_LINK_COPIED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeEnvironment {
        native: Option<bool>,
        copy_fails: bool,
        copied: Vec<String>,
        shared: Vec<SharePayload>,
    }

    impl FakeEnvironment {
        fn new(native: Option<bool>, copy_fails: bool) -> Self {
            Self { native, copy_fails, copied: Vec::new(), shared: Vec::new() }
        }
    }

    impl ShareEnvironment for FakeEnvironment {
        fn native_share(&mut self, payload: &SharePayload) -> Option<std::io::Result<()>> {
            self.native.map(|works| {
                if works {
                    self.shared.push(payload.clone());
                    Ok(())
                } else {
                    Err(std::io::Error::new(std::io::ErrorKind::Other, "dismissed"))
                }
            })
        }

        fn copy_text(&mut self, text: &str) -> std::io::Result<()> {
            if self.copy_fails {
                return Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"));
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("https://x.org/?q=1"), "https%3A%2F%2Fx.org%2F%3Fq%3D1");
        assert_eq!(encode_uri_component("CO₂"), "CO%E2%82%82");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
    }

    #[test]
    fn test_generic_share_uses_native_capability() {
        let mut env = FakeEnvironment::new(Some(true), false);
        let outcome = perform_share(ShareAction::Generic, &mut env, "1,234", "https://x.org/");
        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(env.shared[0].title, SHARE_TITLE);
        assert_eq!(env.shared[0].text, "1,234 TONS OF CO₂ SAVED BECAUSE OF THE GOVERNMENT SHUTDOWN");
    }

    #[test]
    fn test_generic_share_falls_back_to_copy() {
        let mut env = FakeEnvironment::new(None, false);
        let outcome = perform_share(ShareAction::Generic, &mut env, "1,234", "https://x.org/");
        assert_eq!(outcome.notice(), Some("Copied to clipboard!"));
        assert_eq!(env.copied, vec!["1,234 TONS OF CO₂ SAVED BECAUSE OF THE GOVERNMENT SHUTDOWN https://x.org/"]);

        let mut rejected = FakeEnvironment::new(Some(false), false);
        let outcome = perform_share(ShareAction::Generic, &mut rejected, "1", "https://x.org/");
        assert!(matches!(outcome, ShareOutcome::Copied { .. }));
    }

    #[test]
    fn test_copy_failure_is_a_notice() {
        let mut env = FakeEnvironment::new(None, true);
        let outcome = perform_share(ShareAction::CopyLink, &mut env, "1", "https://x.org/");
        assert_eq!(outcome, ShareOutcome::CopyFailed { notice: NOTICE_COPY_FAILED });
    }

    #[test]
    fn test_copy_link_and_social_urls() {
        let mut env = FakeEnvironment::new(None, false);
        let outcome = perform_share(ShareAction::CopyLink, &mut env, "1", "https://x.org/");
        assert_eq!(outcome.notice(), Some("Link Copied!"));
        assert_eq!(env.copied, vec!["https://x.org/"]);

        assert_eq!(
            perform_share(ShareAction::Facebook, &mut env, "1", "https://x.org/"),
            ShareOutcome::OpenUrl("https://www.facebook.com/sharer/sharer.php?u=https%3A%2F%2Fx.org%2F".to_string())
        );
        match perform_share(ShareAction::Twitter, &mut env, "5", "https://x.org/") {
            ShareOutcome::OpenUrl(url) => {
                assert!(url.starts_with("https://twitter.com/intent/tweet?text=5%20TONS%20OF%20CO%E2%82%82"));
                assert!(url.ends_with("&url=https%3A%2F%2Fx.org%2F"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_terminal_environment_writes_copied_text() {
        let mut env = TerminalShareEnvironment::new(Vec::new());
        assert!(env.native_share(&SharePayload { title: String::new(), text: String::new(), url: String::new() }).is_none());
        env.copy_text("hello").unwrap();
        assert_eq!(env.out, b"hello\n");
    }
}
