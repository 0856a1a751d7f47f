//! Dismissible donation notice shown in the plugin's admin description.
//!
//! Rendering is a pure view; dismissal is a separate command the admin
//! request handler calls before rendering.

use crate::error::Result;
use crate::plugin::host_fns::{AdminSurface, CacheStore, FlashKind, RequestInput};
use crate::plugin::installer::PluginInstaller;

pub const DISMISS_MARKER: &str = "deactivate-donation";
pub const POST_KEY_PARAM: &str = "my_post_key";
pub const DISMISSED_NOTICE: &str = "The donation message has been successfully closed.";

const BUY_ME_A_COFFEE: &str = r#"<a href="https://www.buymeacoffee.com/tedem"><b>Buy me a coffee</b></a>"#;
const KO_FI: &str = r#"<a href="https://ko-fi.com/tedem"><b>KO-FI</b></a>"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissOutcome {
    Dismissed,
    Ignored,
}

#[derive(Debug, Clone)]
pub struct DonationBanner {
    plugins_url: String,
    action_param: String,
}

impl DonationBanner {
    /// `action_param` is the query key carrying the dismiss marker,
    /// `<namespace>-<plugin id>`.
    pub fn new(plugins_url: impl Into<String>, action_param: impl Into<String>) -> Self {
        Self {
            plugins_url: plugins_url.into(),
            action_param: action_param.into(),
        }
    }

    pub fn dismiss_url(&self, post_code: &str) -> String {
        format!(
            "{}&{}={DISMISS_MARKER}&{POST_KEY_PARAM}={post_code}",
            self.plugins_url, self.action_param
        )
    }

    pub fn render(&self, post_code: &str) -> String {
        let close_button = format!(
            r#" &mdash; <a href="{}"><b>Close Donation</b></a>"#,
            self.dismiss_url(post_code)
        );
        let message = format!(
            "<b>Donation:</b> Support for new plugins, themes, etc. via {BUY_ME_A_COFFEE} or {KO_FI}{close_button}"
        );

        format!(r#"<div style="margin-top: 1em;">{message}</div>"#)
    }

    pub fn handle_dismiss_request(
        &self,
        request: &dyn RequestInput,
        post_code: &str,
        installer: &PluginInstaller,
        cache: &mut dyn CacheStore,
        admin: &mut dyn AdminSurface,
    ) -> Result<DismissOutcome> {
        let token_ok = !post_code.is_empty() && request.get_input(POST_KEY_PARAM) == Some(post_code);
        let marker_ok = request.get_input(&self.action_param) == Some(DISMISS_MARKER);
        if !(token_ok && marker_ok) {
            return Ok(DismissOutcome::Ignored);
        }

        if !installer.disable_donation(cache)? {
            return Ok(DismissOutcome::Ignored);
        }

        tracing::info!("donation banner dismissed");
        admin.flash_message(DISMISSED_NOTICE, FlashKind::Success);
        admin.redirect(&self.plugins_url);
        Ok(DismissOutcome::Dismissed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{AdminRequest, MemoryCache, RecordingAdmin};
    use crate::plugin::manifest::PluginId;

    const PLUGINS_URL: &str = "index.php?module=config-plugins";

    fn setup() -> (DonationBanner, PluginInstaller, MemoryCache) {
        let banner = DonationBanner::new(PLUGINS_URL, "tedem-heroicon");
        let installer = PluginInstaller::new("tedem", PluginId::default());
        let mut cache = MemoryCache::default();
        installer.install(&mut cache).unwrap();
        (banner, installer, cache)
    }

    #[test]
    fn render_links_dismiss_action_with_post_key() {
        let (banner, _, _) = setup();
        let html = banner.render("abc123");
        assert!(html.starts_with(r#"<div style="margin-top: 1em;"><b>Donation:</b>"#));
        assert!(html.contains("https://www.buymeacoffee.com/tedem"));
        assert!(html.contains("https://ko-fi.com/tedem"));
        assert!(html.contains(
            r#"href="index.php?module=config-plugins&tedem-heroicon=deactivate-donation&my_post_key=abc123""#
        ));
        assert!(html.ends_with("<b>Close Donation</b></a></div>"));
    }

    #[test]
    fn matching_request_dismisses_and_redirects() {
        let (banner, installer, mut cache) = setup();
        let mut admin = RecordingAdmin::default();
        let request =
            AdminRequest::from_query("tedem-heroicon=deactivate-donation&my_post_key=abc123");

        let outcome = banner
            .handle_dismiss_request(&request, "abc123", &installer, &mut cache, &mut admin)
            .unwrap();

        assert_eq!(outcome, DismissOutcome::Dismissed);
        assert!(!installer.donation_enabled(&cache).unwrap());
        assert_eq!(
            admin.flashes,
            vec![(DISMISSED_NOTICE.to_string(), FlashKind::Success)]
        );
        assert_eq!(admin.redirects, vec![PLUGINS_URL.to_string()]);
    }

    #[test]
    fn mismatched_requests_change_nothing() {
        let (banner, installer, mut cache) = setup();
        let mut admin = RecordingAdmin::default();

        for query in [
            "tedem-heroicon=deactivate-donation&my_post_key=wrong",
            "tedem-heroicon=deactivate-donation",
            "tedem-heroicon=something-else&my_post_key=abc123",
            "heroicon=deactivate-donation&my_post_key=abc123",
            "my_post_key=abc123",
        ] {
            let request = AdminRequest::from_query(query);
            let outcome = banner
                .handle_dismiss_request(&request, "abc123", &installer, &mut cache, &mut admin)
                .unwrap();
            assert_eq!(outcome, DismissOutcome::Ignored, "{query}");
        }

        assert!(installer.donation_enabled(&cache).unwrap());
        assert!(admin.flashes.is_empty());
        assert!(admin.redirects.is_empty());
    }

    #[test]
    fn empty_session_token_never_matches() {
        let (banner, installer, mut cache) = setup();
        let mut admin = RecordingAdmin::default();
        let request = AdminRequest::from_query("tedem-heroicon=deactivate-donation&my_post_key=");

        let outcome = banner
            .handle_dismiss_request(&request, "", &installer, &mut cache, &mut admin)
            .unwrap();

        assert_eq!(outcome, DismissOutcome::Ignored);
        assert!(installer.donation_enabled(&cache).unwrap());
    }

    #[test]
    fn dismiss_before_install_is_ignored() {
        let banner = DonationBanner::new(PLUGINS_URL, "tedem-heroicon");
        let installer = PluginInstaller::new("tedem", PluginId::default());
        let mut cache = MemoryCache::default();
        let mut admin = RecordingAdmin::default();
        let request =
            AdminRequest::from_query("tedem-heroicon=deactivate-donation&my_post_key=abc123");

        let outcome = banner
            .handle_dismiss_request(&request, "abc123", &installer, &mut cache, &mut admin)
            .unwrap();

        assert_eq!(outcome, DismissOutcome::Ignored);
        assert!(!cache.contains("tedem"));
        assert!(admin.redirects.is_empty());
    }
}
