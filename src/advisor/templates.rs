use super::{ResponseBuilder, Rule};

pub fn default_rules() -> Vec<Rule> {
    vec![
        Rule::keywords("workflow", &["n8n", "workflow"], workflow),
        Rule::keywords("greeting", &["hello", "hi"], greeting),
        Rule::keywords("help", &["help"], help),
    ]
}

pub fn default_fallbacks() -> Vec<ResponseBuilder> {
    let templates: [fn(&str) -> String; 3] =
        [interesting_point, thanks_for_sharing, you_mentioned];
    templates
        .into_iter()
        .map(|template| Box::new(template) as ResponseBuilder)
        .collect()
}

fn workflow(message: &str) -> String {
    format!(
        "I can help you with n8n workflows! You mentioned: \"{message}\". I can analyze workflow security, optimize efficiency, and suggest improvements. What specific aspect would you like to explore?"
    )
}

fn greeting(message: &str) -> String {
    format!(
        "Hello! I'm your AI workflow advisor. You said: \"{message}\". I'm here to help you optimize your n8n workflows and improve automation processes!"
    )
}

fn help(message: &str) -> String {
    format!(
        "I'm here to help! You asked: \"{message}\". I can assist with workflow analysis, security audits, performance optimization, and n8n best practices."
    )
}

fn interesting_point(message: &str) -> String {
    format!(
        "Interesting point about: \"{message}\". In workflow automation, this relates to optimizing data flow and reducing bottlenecks."
    )
}

fn thanks_for_sharing(message: &str) -> String {
    format!(
        "Thank you for sharing: \"{message}\". Let me analyze this from a workflow efficiency perspective."
    )
}

fn you_mentioned(message: &str) -> String {
    format!(
        "You mentioned: \"{message}\". This is important for workflow design - would you like me to elaborate on optimization strategies?"
    )
}
