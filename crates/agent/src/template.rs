//! Prompt templates with named placeholders.
//!
//! Templates use the f-string convention the MRKL prompts were written in:
//! `{name}` is a placeholder, `{{` and `}}` are literal braces. Templates are
//! parsed once at construction so malformed text fails before any model call.

use rmrkl_core::error::TemplateError;
use rmrkl_core::message::{Message, Role};
use std::collections::HashMap;

/// Values for template placeholders, keyed by placeholder name.
pub type Variables = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Var(String),
}

/// A single parsed text template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Parse a template, validating brace syntax and placeholder names.
    pub fn parse(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        let segments = parse_segments(&template)?;
        Ok(Self { template, segments })
    }

    /// A template with no placeholders; braces are kept verbatim.
    pub fn literal(text: impl Into<String>) -> Self {
        let template = text.into();
        let segments = if template.is_empty() {
            Vec::new()
        } else {
            vec![Segment::Text(template.clone())]
        };
        Self { template, segments }
    }

    /// The template text as supplied.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Placeholder names in first-appearance order, without repeats.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for segment in &self.segments {
            if let Segment::Var(name) = segment
                && !names.contains(&name.as_str())
            {
                names.push(name);
            }
        }
        names
    }

    pub fn has_variable(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Var(v) if v == name))
    }

    /// Substitute every placeholder. Unused entries in `vars` are ignored.
    pub fn format(&self, vars: &Variables) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.template.len());
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Var(name) => {
                    let value = vars.get(name).ok_or_else(|| TemplateError::MissingVariable {
                        name: name.clone(),
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

fn parse_segments(template: &str) -> Result<Vec<Segment>, TemplateError> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' => {
                if chars.next_if(|&(_, next)| next == '{').is_some() {
                    text.push('{');
                    continue;
                }

                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed {
                    return Err(TemplateError::UnclosedBrace { position });
                }
                if !is_identifier(&name) {
                    return Err(TemplateError::InvalidPlaceholder { name, position });
                }

                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Var(name));
            }
            '}' => {
                if chars.next_if(|&(_, next)| next == '}').is_none() {
                    return Err(TemplateError::UnmatchedBrace { position });
                }
                text.push('}');
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    Ok(segments)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

/// A template tagged with the role of the message it renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageTemplate {
    pub role: Role,
    pub template: PromptTemplate,
}

impl MessageTemplate {
    pub fn system(template: PromptTemplate) -> Self {
        Self {
            role: Role::System,
            template,
        }
    }

    pub fn human(template: PromptTemplate) -> Self {
        Self {
            role: Role::User,
            template,
        }
    }

    pub fn format(&self, vars: &Variables) -> Result<Message, TemplateError> {
        Ok(Message {
            role: self.role,
            content: self.template.format(vars)?,
        })
    }
}

/// An ordered list of message templates rendered together into a chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPromptTemplate {
    messages: Vec<MessageTemplate>,
}

impl ChatPromptTemplate {
    pub fn from_messages(messages: Vec<MessageTemplate>) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &[MessageTemplate] {
        &self.messages
    }

    /// Union of every message's placeholders, in order.
    pub fn input_variables(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for message in &self.messages {
            for name in message.template.input_variables() {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Render all messages with the same variables.
    pub fn format_messages(&self, vars: &Variables) -> Result<Vec<Message>, TemplateError> {
        self.messages.iter().map(|m| m.format(vars)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Variables {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parse_and_format() {
        let t = PromptTemplate::parse("Question: {input}\nThought:{agent_scratchpad}").unwrap();
        assert_eq!(t.input_variables(), vec!["input", "agent_scratchpad"]);
        let out = t
            .format(&vars(&[("input", "2+2?"), ("agent_scratchpad", "")]))
            .unwrap();
        assert_eq!(out, "Question: 2+2?\nThought:");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let t = PromptTemplate::parse(r#"Input: {{"q": "{q}"}}"#).unwrap();
        assert_eq!(t.input_variables(), vec!["q"]);
        assert_eq!(t.format(&vars(&[("q", "x")])).unwrap(), r#"Input: {"q": "x"}"#);
    }

    #[test]
    fn repeated_placeholder_listed_once() {
        let t = PromptTemplate::parse("{a} and {b} and {a}").unwrap();
        assert_eq!(t.input_variables(), vec!["a", "b"]);
        assert_eq!(
            t.format(&vars(&[("a", "1"), ("b", "2")])).unwrap(),
            "1 and 2 and 1"
        );
    }

    #[test]
    fn unclosed_brace_rejected() {
        let err = PromptTemplate::parse("hello {name").unwrap_err();
        assert_eq!(err, TemplateError::UnclosedBrace { position: 6 });
    }

    #[test]
    fn stray_closing_brace_rejected() {
        let err = PromptTemplate::parse("oops } here").unwrap_err();
        assert_eq!(err, TemplateError::UnmatchedBrace { position: 5 });
    }

    #[test]
    fn invalid_placeholder_names_rejected() {
        for bad in ["{}", "{0}", "{tool names}", "{a-b}"] {
            let err = PromptTemplate::parse(bad).unwrap_err();
            assert!(
                matches!(err, TemplateError::InvalidPlaceholder { position: 0, .. }),
                "{bad} gave {err:?}"
            );
        }
    }

    #[test]
    fn missing_variable_at_render() {
        let t = PromptTemplate::parse("{input}").unwrap();
        let err = t.format(&Variables::new()).unwrap_err();
        assert_eq!(
            err,
            TemplateError::MissingVariable {
                name: "input".into()
            }
        );
    }

    #[test]
    fn literal_keeps_braces() {
        let t = PromptTemplate::literal("json like {\"a\": 1}");
        assert!(t.input_variables().is_empty());
        assert_eq!(t.format(&Variables::new()).unwrap(), "json like {\"a\": 1}");
        assert_eq!(t.template(), "json like {\"a\": 1}");
    }

    #[test]
    fn chat_template_renders_in_order() {
        let chat = ChatPromptTemplate::from_messages(vec![
            MessageTemplate::system(PromptTemplate::literal("rules")),
            MessageTemplate::human(PromptTemplate::parse("{input}{agent_scratchpad}").unwrap()),
        ]);
        assert_eq!(chat.input_variables(), vec!["input", "agent_scratchpad"]);

        let messages = chat
            .format_messages(&vars(&[("input", "hi"), ("agent_scratchpad", "!")]))
            .unwrap();
        assert_eq!(messages, vec![Message::system("rules"), Message::user("hi!")]);
    }
}
