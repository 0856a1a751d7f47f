use regex::Regex;

use crate::error::Result;
use crate::model::config::AppConfig;
use crate::plugin::donation::{DismissOutcome, DonationBanner};
use crate::plugin::expander::IconExpander;
use crate::plugin::host_fns::{
    AdminSurface, CacheStore, HookRegistry, PARSE_MESSAGE_HOOK, RequestContext, RequestInput,
    TemplateStore,
};
use crate::plugin::installer::PluginInstaller;
use crate::plugin::manifest::{DESCRIPTION, PluginId, PluginInfo, RegistrationRecord};

pub const STYLESHEETS_PLACEHOLDER: &str = "{$stylesheets}";
pub const STYLE_SEPARATOR: &str = "\r\r";

pub const STYLES: &str = "<style>.t-code-heroicon{display:inline-block;margin-top:-2px;vertical-align:middle}.t-code-heroicon svg{height:1.25rem;width:1.25rem}.t-code-heroicon svg path{stroke:currentColor}</style>";

/// Entry points the host calls over the plugin's lifetime.
#[derive(Debug, Clone)]
pub struct PluginManager {
    expander: IconExpander,
    installer: PluginInstaller,
    banner: DonationBanner,
    template: String,
}

impl PluginManager {
    pub fn new(config: &AppConfig) -> Self {
        let id = PluginId::default();
        let namespace = config.host.namespace.clone();
        let action_param = format!("{namespace}-{}", id.as_key());

        Self {
            expander: IconExpander::with_class(config.icon_dir(), config.icons.class.clone()),
            installer: PluginInstaller::new(namespace, id),
            banner: DonationBanner::new(config.host.plugins_url.clone(), action_param),
            template: config.host.template.clone(),
        }
    }

    pub fn expander(&self) -> &IconExpander {
        &self.expander
    }

    /// Metadata for the plugin list; carries the donation banner while it is enabled.
    pub fn info(&self, cache: &dyn CacheStore, post_code: &str) -> Result<PluginInfo> {
        let mut description = DESCRIPTION.to_string();
        if self.donation_status(cache)? {
            description.push_str(&self.banner.render(post_code));
        }

        Ok(PluginInfo::new(description))
    }

    pub fn install(&self, cache: &mut dyn CacheStore) -> Result<()> {
        self.installer.install(cache)?;
        tracing::info!("installed under namespace {}", self.installer.namespace());
        Ok(())
    }

    pub fn is_installed(&self, cache: &dyn CacheStore) -> Result<bool> {
        self.installer.is_installed(cache)
    }

    pub fn uninstall(&self, cache: &mut dyn CacheStore) -> Result<()> {
        self.installer.uninstall(cache)?;
        tracing::info!("uninstalled from namespace {}", self.installer.namespace());
        Ok(())
    }

    pub fn record(&self, cache: &dyn CacheStore) -> Result<Option<RegistrationRecord>> {
        self.installer.record(cache)
    }

    /// Put exactly one copy of the icon stylesheet after the placeholder.
    pub fn activate(&self, templates: &mut dyn TemplateStore) -> Result<()> {
        self.remove_styles(templates)?;

        let placeholder = Regex::new(&regex::escape(STYLESHEETS_PLACEHOLDER))?;
        let replacement = format!("{STYLESHEETS_PLACEHOLDER}{STYLE_SEPARATOR}{STYLES}");
        templates.find_replace(&self.template, &placeholder, &replacement)?;

        tracing::info!("stylesheet added to template {}", self.template);
        Ok(())
    }

    pub fn deactivate(&self, templates: &mut dyn TemplateStore) -> Result<()> {
        self.remove_styles(templates)?;
        tracing::info!("stylesheet removed from template {}", self.template);
        Ok(())
    }

    pub fn donation_status(&self, cache: &dyn CacheStore) -> Result<bool> {
        self.installer.donation_enabled(cache)
    }

    pub fn handle_dismiss_request(
        &self,
        request: &dyn RequestInput,
        post_code: &str,
        cache: &mut dyn CacheStore,
        admin: &mut dyn AdminSurface,
    ) -> Result<DismissOutcome> {
        self.banner
            .handle_dismiss_request(request, post_code, &self.installer, cache, admin)
    }

    /// Hook the expander into message parsing. The admin panel never renders posts.
    pub fn register(&self, hooks: &mut dyn HookRegistry, context: RequestContext) {
        if context == RequestContext::AdminPanel {
            return;
        }

        let expander = self.expander.clone();
        hooks.add_hook(
            PARSE_MESSAGE_HOOK,
            Box::new(move |message: &str| expander.expand(message)),
        );
    }

    fn remove_styles(&self, templates: &mut dyn TemplateStore) -> Result<bool> {
        let existing = Regex::new(&regex::escape(&format!("{STYLE_SEPARATOR}{STYLES}")))?;
        templates.find_replace(&self.template, &existing, "")
    }
}
