//! Rule-based chat replies.
//!
//! Rules are evaluated in order against the lower-cased message and the first
//! matching rule builds the reply from the original message. When no rule
//! matches, one of the fallback templates is picked by a [`TemplateSelector`].

mod selector;
mod templates;

pub use selector::{RandomSelector, TemplateSelector};

#[cfg(test)]
pub use selector::MockTemplateSelector;

use crate::{Error, Result};
use std::sync::Arc;
use tracing::debug;

pub type Predicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
pub type ResponseBuilder = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Name reported for replies built from a fallback template.
pub const FALLBACK_RULE: &str = "fallback";

pub struct Rule {
    name: &'static str,
    predicate: Predicate,
    builder: ResponseBuilder,
}

impl Rule {
    pub fn new(
        name: &'static str,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
        builder: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            predicate: Box::new(predicate),
            builder: Box::new(builder),
        }
    }

    /// Matches when the lower-cased message contains any of `keywords`.
    pub fn keywords(
        name: &'static str,
        keywords: &'static [&'static str],
        builder: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            name,
            move |lowered: &str| keywords.iter().any(|k| lowered.contains(k)),
            builder,
        )
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub rule: &'static str,
    pub text: String,
}

pub struct Advisor {
    rules: Vec<Rule>,
    fallbacks: Vec<ResponseBuilder>,
    selector: Arc<dyn TemplateSelector>,
}

impl Advisor {
    /// Default policy: workflow, greeting, help, then three generic fallbacks.
    pub fn new(selector: Arc<dyn TemplateSelector>) -> Self {
        Self {
            rules: templates::default_rules(),
            fallbacks: templates::default_fallbacks(),
            selector,
        }
    }

    pub fn with_rules(
        rules: Vec<Rule>,
        fallbacks: Vec<ResponseBuilder>,
        selector: Arc<dyn TemplateSelector>,
    ) -> Result<Self> {
        if fallbacks.is_empty() {
            return Err(Error::config("advisor needs at least one fallback template"));
        }
        Ok(Self {
            rules,
            fallbacks,
            selector,
        })
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(Rule::name).collect()
    }

    pub fn fallback_count(&self) -> usize {
        self.fallbacks.len()
    }

    pub fn reply(&self, message: &str) -> Result<Reply> {
        let lowered = message.to_lowercase();

        if let Some(rule) = self.rules.iter().find(|rule| (rule.predicate)(&lowered)) {
            debug!("Chat message matched rule: {}", rule.name);
            return Ok(Reply {
                rule: rule.name,
                text: (rule.builder)(message),
            });
        }

        let candidates = self.fallbacks.len();
        let index = self.selector.choose(candidates);
        let builder = self
            .fallbacks
            .get(index)
            .ok_or(Error::TemplateOutOfRange { index, candidates })?;

        debug!("Chat message fell through to fallback template {}", index);
        Ok(Reply {
            rule: FALLBACK_RULE,
            text: builder(message),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixed(index: usize) -> Arc<dyn TemplateSelector> {
        let mut selector = MockTemplateSelector::new();
        selector.expect_choose().return_const(index);
        Arc::new(selector)
    }

    fn unused_selector() -> Arc<dyn TemplateSelector> {
        let mut selector = MockTemplateSelector::new();
        selector.expect_choose().never();
        Arc::new(selector)
    }

    #[test]
    fn workflow_rule_wins_over_greeting() {
        let advisor = Advisor::new(unused_selector());
        let reply = advisor.reply("Hi, my workflow is broken").unwrap();
        assert_eq!(reply.rule, "workflow");
        assert!(reply.text.contains("\"Hi, my workflow is broken\""));
    }

    #[test]
    fn matching_ignores_case_but_echo_keeps_it() {
        let advisor = Advisor::new(unused_selector());
        let reply = advisor.reply("HELLO THERE").unwrap();
        assert_eq!(reply.rule, "greeting");
        assert!(reply.text.contains("You said: \"HELLO THERE\""));
    }

    #[test]
    fn fallback_uses_selected_template() {
        let mut selector = MockTemplateSelector::new();
        selector
            .expect_choose()
            .withf(|candidates| *candidates == 3)
            .times(1)
            .return_const(1usize);
        let advisor = Advisor::new(Arc::new(selector));

        let reply = advisor.reply("the sky is blue").unwrap();
        assert_eq!(reply.rule, FALLBACK_RULE);
        assert_eq!(
            reply.text,
            "Thank you for sharing: \"the sky is blue\". Let me analyze this from a workflow efficiency perspective."
        );
    }

    #[test]
    fn out_of_range_selection_is_an_error() {
        let advisor = Advisor::new(fixed(3));
        let err = advisor.reply("the sky is blue").unwrap_err();
        assert!(matches!(
            err,
            Error::TemplateOutOfRange {
                index: 3,
                candidates: 3
            }
        ));
    }

    #[test]
    fn custom_rules_run_in_order() {
        let rules = vec![
            Rule::keywords("first", &["alpha"], |m: &str| format!("first:{m}")),
            Rule::keywords("second", &["alpha", "beta"], |m: &str| format!("second:{m}")),
        ];
        let fallbacks = vec![Box::new(|m: &str| format!("none:{m}")) as ResponseBuilder];
        let advisor = Advisor::with_rules(rules, fallbacks, fixed(0)).unwrap();

        assert_eq!(advisor.rule_names(), vec!["first", "second"]);
        assert_eq!(advisor.reply("Alpha Beta").unwrap().text, "first:Alpha Beta");
        assert_eq!(advisor.reply("beta").unwrap().text, "second:beta");
        assert_eq!(advisor.reply("gamma").unwrap().text, "none:gamma");
    }

    #[test]
    fn empty_fallbacks_are_rejected() {
        let result = Advisor::with_rules(Vec::new(), Vec::new(), fixed(0));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
