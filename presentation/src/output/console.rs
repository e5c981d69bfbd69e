//! Console output formatter for desk results

use colored::Colorize;
use guidance_application::{QueryOutcome, ResponderBadge};
use guidance_domain::PendingQuery;

/// Formats desk outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the result of handling one question
    pub fn format_outcome(outcome: &QueryOutcome) -> String {
        match outcome {
            QueryOutcome::Fixed(reply) => format!("{} {}", "Bot:".cyan().bold(), reply),
            QueryOutcome::Matched {
                question,
                answer,
                ratio,
            } => format!(
                "{} {}\n{}",
                "Bot:".cyan().bold(),
                answer,
                format!("  (matched \"{}\", similarity {:.2})", question, ratio).dimmed()
            ),
            QueryOutcome::Routed(pending) => format!(
                "{} I don't know the answer yet. Your question was forwarded to {} ({}).",
                "Bot:".cyan().bold(),
                pending.responder.name().yellow().bold(),
                pending.domain
            ),
        }
    }

    /// Format the outcome as a single JSON object
    pub fn format_outcome_json(outcome: &QueryOutcome) -> String {
        let value = match outcome {
            QueryOutcome::Fixed(reply) => serde_json::json!({
                "kind": "fixed",
                "reply": reply,
            }),
            QueryOutcome::Matched {
                question,
                answer,
                ratio,
            } => serde_json::json!({
                "kind": "matched",
                "question": question,
                "reply": answer,
                "ratio": ratio,
            }),
            QueryOutcome::Routed(pending) => serde_json::json!({
                "kind": "routed",
                "question": pending.question,
                "domain": pending.domain,
                "responder": pending.responder,
            }),
        };
        serde_json::to_string(&value).unwrap_or_default()
    }

    /// Format the responder list with unread badges
    pub fn format_badges(badges: &[ResponderBadge]) -> String {
        let mut output = Self::section_header("Responders");
        for badge in badges {
            let count = if badge.unread > 0 {
                format!("[{}]", badge.unread).red().bold().to_string()
            } else {
                "[0]".dimmed().to_string()
            };
            output.push_str(&format!(
                "  {:<20} {:<16} {}\n",
                badge.responder.name(),
                badge.domain.as_str(),
                count
            ));
        }
        output
    }

    /// Format the question a responder has been asked
    pub fn format_pending(pending: &PendingQuery) -> String {
        format!(
            "{} {}\n{}",
            format!("Question for {}:", pending.responder).yellow().bold(),
            pending.question,
            Self::indent(
                &format!("domain: {}\nreply with /answer <text>", pending.domain),
                "  "
            )
            .dimmed()
        )
    }

    /// Format the banner shown when the REPL starts
    pub fn banner(corpus_size: usize, threshold: f64) -> String {
        format!(
            "{}\n{} {} known questions, match threshold {:.2}\n",
            Self::header("Guidance Desk"),
            "Corpus:".cyan().bold(),
            corpus_size,
            threshold
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    /// Indent every line of text
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidance_domain::{Domain, Responder};

    fn plain() {
        colored::control::set_override(false);
    }

    fn routed() -> QueryOutcome {
        QueryOutcome::Routed(PendingQuery::new(
            "visa extension",
            Domain::Migration,
            Responder::new("Dr Asim Zeb"),
        ))
    }

    #[test]
    fn test_format_outcomes() {
        plain();
        assert_eq!(
            ConsoleFormatter::format_outcome(&QueryOutcome::Fixed("You're welcome!".into())),
            "Bot: You're welcome!"
        );

        let matched = ConsoleFormatter::format_outcome(&QueryOutcome::Matched {
            question: "What is the fee?".into(),
            answer: "1500 per term.".into(),
            ratio: 0.8,
        });
        assert!(matched.starts_with("Bot: 1500 per term."));
        assert!(matched.contains("similarity 0.80"));

        let text = ConsoleFormatter::format_outcome(&routed());
        assert!(text.contains("Dr Asim Zeb (Migration)"));
    }

    #[test]
    fn test_format_outcome_json() {
        let value: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_outcome_json(&routed())).unwrap();
        assert_eq!(value["kind"], "routed");
        assert_eq!(value["domain"], "Migration");
        assert_eq!(value["responder"], "Dr Asim Zeb");
    }

    #[test]
    fn test_format_badges() {
        plain();
        let badges = vec![
            ResponderBadge {
                domain: Domain::Admission,
                responder: Responder::new("Dr Gohar"),
                unread: 2,
            },
            ResponderBadge {
                domain: Domain::StudentAffairs,
                responder: Responder::new("Sir Sibtual Hassan"),
                unread: 0,
            },
        ];
        let output = ConsoleFormatter::format_badges(&badges);
        assert!(output.contains("Dr Gohar"));
        assert!(output.contains("[2]"));
        assert!(output.contains("Student Affairs"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
