use std::collections::HashMap;

use crate::plugin::host_fns::{HookRegistry, MessageHandler};

/// Named hook chains, run in registration order.
#[derive(Default)]
pub struct Hooks {
    handlers: HashMap<String, Vec<MessageHandler>>,
}

impl Hooks {
    pub fn run(&self, hook: &str, text: &str) -> String {
        let Some(chain) = self.handlers.get(hook) else {
            return text.to_string();
        };

        chain
            .iter()
            .fold(text.to_string(), |current, handler| handler(&current))
    }

    pub fn handler_count(&self, hook: &str) -> usize {
        self.handlers.get(hook).map_or(0, Vec::len)
    }
}

impl HookRegistry for Hooks {
    fn add_hook(&mut self, hook: &str, handler: MessageHandler) {
        self.handlers
            .entry(hook.to_string())
            .or_default()
            .push(handler);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_hook_passes_text_through() {
        let hooks = Hooks::default();
        assert_eq!(hooks.run("parse_message", "hello"), "hello");
    }

    #[test]
    fn handlers_chain_in_order() {
        let mut hooks = Hooks::default();
        hooks.add_hook("parse_message", Box::new(|text: &str| format!("{text}a")));
        hooks.add_hook("parse_message", Box::new(|text: &str| format!("{text}b")));

        assert_eq!(hooks.handler_count("parse_message"), 2);
        assert_eq!(hooks.run("parse_message", "x"), "xab");
    }
}
