//! REPL (Read-Eval-Print Loop) for the interactive desk

use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use colored::Colorize;
use guidance_application::{DeskError, HandleQueryUseCase, SessionStore};
use guidance_domain::SessionState;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};
use std::sync::Arc;

const HISTORY_SIZE: usize = 1000;

/// What the loop should do after a line was processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplStep {
    Continue(String),
    Quit(String),
}

/// Interactive desk REPL
///
/// Plain lines are questions from the end user; slash commands let a
/// responder see their badge, pick up the pending question and answer it.
pub struct DeskRepl {
    use_case: Arc<HandleQueryUseCase>,
    config: ReplConfig,
    session: SessionState,
    session_store: Option<Arc<dyn SessionStore>>,
    selected: Option<String>,
}

impl DeskRepl {
    /// Create a new DeskRepl
    pub fn new(use_case: Arc<HandleQueryUseCase>) -> Self {
        Self {
            use_case,
            config: ReplConfig::default(),
            session: SessionState::new(),
            session_store: None,
            selected: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Continue a session restored from an earlier run
    pub fn with_session(mut self, session: SessionState) -> Self {
        self.session = session;
        self
    }

    /// Save the session after every question and answer
    pub fn with_session_store(mut self, store: Arc<dyn SessionStore>) -> Self {
        self.session_store = Some(store);
        self
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Run the interactive REPL
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut line_editor = Reedline::create();

        if let Some(path) = self.config.resolved_history_file() {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_SIZE, path) {
                Ok(history) => line_editor = line_editor.with_history(Box::new(history)),
                Err(e) => eprintln!("History disabled: {}", e),
            }
        }

        if self.config.show_banner {
            println!(
                "{}",
                ConsoleFormatter::banner(self.use_case.corpus().len(), self.use_case.threshold())
            );
            println!("{}", Self::help_text());
        }

        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("desk".to_string()),
            DefaultPromptSegment::Empty,
        );

        loop {
            match line_editor.read_line(&prompt)? {
                Signal::Success(line) => match self.execute_line(&line) {
                    ReplStep::Continue(output) => {
                        if !output.is_empty() {
                            println!("{}\n", output);
                        }
                    }
                    ReplStep::Quit(output) => {
                        println!("{}", output);
                        break;
                    }
                },
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
                _ => {
                    println!("^C");
                }
            }
        }

        Ok(())
    }

    /// Process one input line and return what to print.
    pub fn execute_line(&mut self, line: &str) -> ReplStep {
        let line = line.trim();
        if line.is_empty() {
            return ReplStep::Continue(String::new());
        }
        if line.starts_with('/') {
            return self.handle_command(line);
        }
        let output = self.process_question(line);
        ReplStep::Continue(self.save_session(output))
    }

    fn handle_command(&mut self, line: &str) -> ReplStep {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (line, ""),
        };

        let output = match cmd {
            "/quit" | "/exit" | "/q" => return ReplStep::Quit("Bye!".to_string()),
            "/help" | "/h" | "/?" => Self::help_text(),
            "/responders" | "/r" => {
                ConsoleFormatter::format_badges(&self.use_case.routing().badges())
            }
            "/select" | "/s" => self.select(arg),
            "/answer" | "/a" => {
                let output = self.answer(arg);
                self.save_session(output)
            }
            "/pending" | "/p" => match &self.session.pending {
                Some(pending) => ConsoleFormatter::format_pending(pending),
                None => "No question is waiting for an answer.".to_string(),
            },
            _ => format!("Unknown command: {}\nType /help for available commands", cmd),
        };
        ReplStep::Continue(output)
    }

    /// Persist the session, appending a warning to `output` if that failed
    fn save_session(&self, output: String) -> String {
        let Some(store) = &self.session_store else {
            return output;
        };
        match store.save(&self.session) {
            Ok(()) => output,
            Err(e) => format!(
                "{}\n{} session was not saved: {}",
                output,
                "Warning:".yellow().bold(),
                e
            ),
        }
    }

    fn process_question(&mut self, question: &str) -> String {
        match self.use_case.handle(&mut self.session, question) {
            Ok(outcome) => ConsoleFormatter::format_outcome(&outcome),
            Err(e) => Self::format_error(&e),
        }
    }

    fn select(&mut self, name: &str) -> String {
        if name.is_empty() {
            return "Usage: /select <responder name>".to_string();
        }
        let routing = self.use_case.routing();
        let Some(responder) = routing.classifier().directory().find(name) else {
            return format!("Unknown responder: {} (see /responders)", name);
        };
        let responder = responder.name().to_string();
        let view = match routing.peek(&self.session, &responder) {
            Some(pending) => ConsoleFormatter::format_pending(&pending),
            None => format!("No unread questions for {}.", responder),
        };
        self.selected = Some(responder);
        view
    }

    fn answer(&mut self, text: &str) -> String {
        let Some(responder) = self.selected.clone() else {
            return "Select a responder first: /select <name>".to_string();
        };
        let routing = self.use_case.routing();
        if routing.peek(&self.session, &responder).is_none() {
            return format!("No question is pending for {}.", responder);
        }
        match routing.answer(&mut self.session, text) {
            Ok(()) => format!(
                "{} Answer saved to the corpus; {}'s unread count is reset.",
                "Saved.".green().bold(),
                responder
            ),
            Err(e) if e.answer_was_recorded() => format!(
                "{} {}\nThe answer is saved, but {}'s unread count was not reset; \
                 resubmit the same answer to retry.",
                "Error:".red().bold(),
                e,
                responder
            ),
            Err(e) => Self::format_error(&e),
        }
    }

    fn format_error(error: &DeskError) -> String {
        if error.is_persistence_failure() {
            format!(
                "{} {}\nNothing was changed; please resubmit.",
                "Error:".red().bold(),
                error
            )
        } else {
            format!("{} {}", "Error:".red().bold(), error)
        }
    }

    fn help_text() -> String {
        [
            "Type a question, or one of these commands:",
            "  /responders, /r        - Show responders and unread counts",
            "  /select <name>, /s     - Act as a responder and view their question",
            "  /answer <text>, /a     - Answer the selected responder's question",
            "  /pending, /p           - Show the question waiting in this session",
            "  /help, /h, /?          - Show this help",
            "  /quit, /exit, /q       - Exit",
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidance_application::{
        CorpusSource, CorpusSourceError, CorpusStore, DeskParams, RoutingStateMachine,
        SessionStoreError, UnreadStore, UnreadStoreError,
    };
    use guidance_domain::{CorpusEntry, DomainClassifier, RoutingPhase};
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[derive(Default)]
    struct MemorySource {
        rows: Mutex<Vec<CorpusEntry>>,
    }

    impl CorpusSource for MemorySource {
        fn load(&self, _partitions: &[String]) -> Result<Vec<CorpusEntry>, CorpusSourceError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        fn append(&self, _partition: &str, entry: &CorpusEntry) -> Result<(), CorpusSourceError> {
            self.rows.lock().unwrap().push(entry.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        counts: Mutex<Option<BTreeMap<String, u64>>>,
        fail_writes: AtomicBool,
    }

    impl UnreadStore for MemoryStore {
        fn load(&self) -> Result<Option<BTreeMap<String, u64>>, UnreadStoreError> {
            Ok(self.counts.lock().unwrap().clone())
        }

        fn save(&self, counts: &BTreeMap<String, u64>) -> Result<(), UnreadStoreError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(UnreadStoreError::Io("read-only".to_string()));
            }
            *self.counts.lock().unwrap() = Some(counts.clone());
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemorySessions {
        saved: Mutex<Option<SessionState>>,
    }

    impl SessionStore for MemorySessions {
        fn load(&self) -> Result<Option<SessionState>, SessionStoreError> {
            Ok(self.saved.lock().unwrap().clone())
        }

        fn save(&self, session: &SessionState) -> Result<(), SessionStoreError> {
            *self.saved.lock().unwrap() = Some(session.clone());
            Ok(())
        }
    }

    /// Shared backing stores, so several REPLs can act as successive runs
    #[derive(Default)]
    struct Desk {
        source: Arc<MemorySource>,
        store: Arc<MemoryStore>,
        sessions: Arc<MemorySessions>,
    }

    impl Desk {
        fn repl(&self) -> DeskRepl {
            colored::control::set_override(false);
            let params = DeskParams::default();
            let corpus = Arc::new(CorpusStore::load(self.source.clone(), &params).unwrap());
            let routing = Arc::new(
                RoutingStateMachine::open(
                    DomainClassifier::default(),
                    corpus.clone(),
                    self.store.clone(),
                )
                .unwrap(),
            );
            let session = self
                .sessions
                .load()
                .unwrap()
                .map(|s| routing.restore_session(s))
                .unwrap_or_default();
            let use_case = HandleQueryUseCase::new(corpus, routing, &params).unwrap();
            DeskRepl::new(Arc::new(use_case))
                .with_session(session)
                .with_session_store(self.sessions.clone())
        }
    }

    fn repl() -> DeskRepl {
        Desk::default().repl()
    }

    fn output(step: ReplStep) -> String {
        match step {
            ReplStep::Continue(text) => text,
            ReplStep::Quit(text) => panic!("unexpected quit: {}", text),
        }
    }

    #[test]
    fn test_question_route_select_answer() {
        let mut repl = repl();

        let routed = output(repl.execute_line("Is there a scholarship for me?"));
        assert!(routed.contains("Dr Naeem"));

        let view = output(repl.execute_line("/select Dr Naeem"));
        assert!(view.contains("is there a scholarship for me?"));

        let saved = output(repl.execute_line("/answer Yes, merit-based ones."));
        assert!(saved.starts_with("Saved."));
        assert_eq!(repl.session().phase(), RoutingPhase::Idle);

        let again = output(repl.execute_line("is there a scholarship for me"));
        assert!(again.contains("Yes, merit-based ones."));
    }

    #[test]
    fn test_answer_requires_matching_selection() {
        let mut repl = repl();
        assert!(output(repl.execute_line("/answer text")).contains("Select a responder first"));

        repl.execute_line("visa rules");
        output(repl.execute_line("/select Dr Gohar"));
        let reply = output(repl.execute_line("/answer Not mine"));
        assert!(reply.contains("No question is pending for Dr Gohar"));
        assert_eq!(repl.session().phase(), RoutingPhase::Pending);
    }

    #[test]
    fn test_empty_answer_is_rejected() {
        let mut repl = repl();
        repl.execute_line("visa rules");
        output(repl.execute_line("/select Dr Asim Zeb"));
        assert!(output(repl.execute_line("/answer")).starts_with("Error:"));
        assert_eq!(repl.session().phase(), RoutingPhase::Pending);
    }

    #[test]
    fn test_unknown_responder_and_command() {
        let mut repl = repl();
        assert!(output(repl.execute_line("/select Nobody")).contains("Unknown responder"));
        assert!(output(repl.execute_line("/bogus")).contains("Unknown command"));
        assert_eq!(output(repl.execute_line("   ")), "");
    }

    #[test]
    fn test_quit() {
        let mut repl = repl();
        assert_eq!(repl.execute_line("/quit"), ReplStep::Quit("Bye!".to_string()));
    }

    #[test]
    fn test_pending_question_carries_over_to_next_run() {
        let desk = Desk::default();

        let mut first = desk.repl();
        assert!(output(first.execute_line("visa rules")).contains("Dr Asim Zeb"));
        drop(first);

        let mut second = desk.repl();
        assert_eq!(second.session().phase(), RoutingPhase::Pending);
        let view = output(second.execute_line("/select Dr Asim Zeb"));
        assert!(view.contains("visa rules"));
        assert!(output(second.execute_line("/answer Apply online.")).starts_with("Saved."));

        let saved = desk.sessions.load().unwrap().unwrap();
        assert_eq!(saved.phase(), RoutingPhase::Idle);
        assert_eq!(saved.last_response.as_deref(), Some("Apply online."));
    }

    #[test]
    fn test_answer_saved_but_badge_not_reset() {
        let desk = Desk::default();
        let mut repl = desk.repl();
        repl.execute_line("visa rules");
        output(repl.execute_line("/select Dr Asim Zeb"));

        desk.store.fail_writes.store(true, Ordering::SeqCst);
        let reply = output(repl.execute_line("/answer Apply online."));
        assert!(reply.contains("The answer is saved"));
        assert!(!reply.contains("Nothing was changed"));
        assert_eq!(desk.source.rows.lock().unwrap().len(), 1);

        desk.store.fail_writes.store(false, Ordering::SeqCst);
        assert!(output(repl.execute_line("/answer Apply online.")).starts_with("Saved."));
        assert_eq!(desk.source.rows.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_routing_failure_says_nothing_changed() {
        let desk = Desk::default();
        let mut repl = desk.repl();
        desk.store.fail_writes.store(true, Ordering::SeqCst);

        let reply = output(repl.execute_line("visa rules"));
        assert!(reply.contains("Nothing was changed"));
        assert_eq!(repl.session().phase(), RoutingPhase::Idle);
    }
}
